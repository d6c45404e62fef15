//! Utility routines for loading datasets from and storing results into
//! CSV files.
use std::path::Path;

use csv::{ReaderBuilder, Writer, WriterBuilder};
use ndarray::prelude::*;
use serde::Serialize;

use crate::complexity::ComplexityEstimator;
use crate::dataset::{Dataset, Label};
use crate::error::{Error, Result};

/// Loads a CSV data file.
///
/// The file has no header; the format should be, for each row:
///     label, x1, x2, ...
/// where x1, x2, ... are features forming a feature vector.
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new().has_headers(false)
                                         .from_path(path)?;

    let mut inputs: Vec<f64> = Vec::new();
    let mut targets: Vec<Label> = Vec::new();
    let mut d: Option<usize> = None;

    for (line, result) in reader.records().enumerate() {
        let record = result?;

        if record.len() < 2 {
            return Err(Error::invalid(format!("line {}: expected a label and features",
                                              line + 1)));
        }
        let n_features = record.len() - 1;
        if let Some(d) = d {
            if d != n_features {
                return Err(Error::invalid(format!("line {}: expected {} features, got {}",
                                                  line + 1, d, n_features)));
            }
        } else {
            d = Some(n_features);
        }

        targets.push(parse_field(&record[0], line)?);
        for x in record.iter().skip(1) {
            inputs.push(parse_field(x, line)?);
        }
    }

    let d = d.ok_or_else(|| Error::invalid("empty data file"))?;
    let inputs = Array::from_shape_vec((targets.len(), d), inputs)?;

    Dataset::new(inputs, Array::from(targets))
}

fn parse_field<T: std::str::FromStr>(field: &str, line: usize) -> Result<T> {
    field.trim()
         .parse::<T>()
         .map_err(|_| Error::invalid(format!("line {}: cannot parse `{}`", line + 1, field)))
}

/// Stores serializable records into a CSV file, with a header.
pub fn store_records<T, P>(records: &[T], path: P) -> Result<()>
        where T: Serialize, P: AsRef<Path> {
    let mut writer = Writer::from_path(path)?;

    for r in records {
        writer.serialize(r)?;
    }

    writer.flush()?;
    Ok(())
}

/// Stores the seeds of an estimator into a CSV file.
///
/// Each line contains a seed index followed by its features:
///     index, x1, x2, ...
pub fn store_seeds<P: AsRef<Path>>(estimator: &ComplexityEstimator, path: P) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false)
                                         .from_path(path)?;
    let inputs = estimator.dataset().inputs();

    for &i in estimator.seeds() {
        let x = inputs.row(i);
        let row = std::iter::once(i.to_string())
                      .chain(x.iter().map(|v| v.to_string()));
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}
