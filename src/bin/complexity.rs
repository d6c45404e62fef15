extern crate cada;
extern crate docopt;
extern crate env_logger;
#[macro_use]
extern crate serde_derive;

use cada::ComplexityEstimator;
use cada::report::curve_records;
use cada::utils::{load_data, store_records, store_seeds};
use docopt::Docopt;

const USAGE: &'static str = "
Estimate the k-NN complexity of a labeled dataset.

Prints the normalized AUC of the complexity curve, and stores the curve
(k, error) into <output-file>. If --seeds is given, the seeds are stored
there as `index, x1, x2, ...` rows.

The data file has no header, and one `label, x1, x2, ...` row per sample.

Usage: complexity [options] [--] <output-file> <data-file>
       complexity (--help | --version)

Options:
    -w, --windows=<w>       Number of points of the curve [default: 10].
    -k, --knn=<k>           Largest neighborhood size [default: 10].
    --seeds=<file>          Where to store the seeds.
    -h, --help              Show help.
    --version               Show the version.
";

#[derive(Deserialize)]
struct Args {
    flag_windows: usize,
    flag_knn: usize,
    flag_seeds: Option<String>,
    arg_output_file: String,
    arg_data_file: String,
}


fn main() {
    env_logger::init();

    // Parse args from command line.
    let args: Args = Docopt::new(USAGE)
                            .and_then(|d| d.version(Some(env!("CARGO_PKG_VERSION").to_string()))
                                           .deserialize())
                            .unwrap_or_else(|e| e.exit());

    let dataset = load_data(&args.arg_data_file)
                      .expect("Failed to load data");
    let estimator = ComplexityEstimator::from_dataset(dataset, args.flag_windows,
                                                      args.flag_knn)
                                       .expect("Failed to build the estimator");

    println!("AUC={:.4}", estimator.auc());

    store_records(&curve_records(&estimator), &args.arg_output_file)
        .expect("Failed to store the curve");

    if let Some(seeds_file) = args.flag_seeds {
        store_seeds(&estimator, &seeds_file)
            .expect("Failed to store the seeds");
    }
}
