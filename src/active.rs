//! The active-learning loop.
//!
//! An `ActiveLearner` moves through the states
//! `Init -> SelectQuery -> Reveal -> Retrain -> (SelectQuery | Terminated)`,
//! one query per iteration, until `quota` queries were made:
//!
//! * `Init`: the known set is the source dataset. For CADA, the whole
//!   ranking of `quota` target indices is computed here.
//! * `SelectQuery`: the next target index is obtained from the oracle
//!   (random or uncertainty sampling) or from the CADA ranking.
//!   Uncertainty sampling refits the model on the known set first.
//! * `Reveal`: the revealed example is appended to the known set.
//! * `Retrain`: at checkpoints (first iteration, every
//!   `checkpoint_every` iterations, last iteration) the model is refit on
//!   the known set and evaluated on the whole target.
//!
//! Target labels held by the learner are only used for evaluation;
//! queries go through the `Oracle`.
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use ndarray::prelude::*;

use crate::cada::{Cada, CadaConfig};
use crate::classifier::Classifier;
use crate::dataset::{Dataset, KnownSet, Label};
use crate::error::{Error, Result};
use crate::oracle::{Oracle, Query, Uncertainty, DEFAULT_SEED};


/// Query strategy of an experiment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    RandomSampling,
    UncertaintySampling,
    Cada,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Strategy> {
        match s {
            "random" | "RandomSampling" => Ok(Strategy::RandomSampling),
            "uncertainty" | "UncertaintySampling" => Ok(Strategy::UncertaintySampling),
            "cada" | "CADA" => Ok(Strategy::Cada),
            _ => Err(Error::invalid(format!("unknown strategy `{}`", s))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Strategy::RandomSampling => "RandomSampling",
            Strategy::UncertaintySampling => "UncertaintySampling",
            Strategy::Cada => "CADA",
        };
        write!(f, "{}", name)
    }
}

/// Parameters of one active-learning run.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentConfig {
    pub strategy: Strategy,
    /// Number of queries.
    pub quota: usize,
    /// Checkpoint period, in queries; 0 only checkpoints the first and
    /// last iteration.
    pub checkpoint_every: usize,
    /// Seed of the oracle's PRNG.
    pub seed: u64,
    /// Uncertainty measure for uncertainty sampling.
    pub uncertainty: Uncertainty,
    /// Parameters of the CADA selector.
    pub cada: CadaConfig,
}

impl Default for ExperimentConfig {
    fn default() -> ExperimentConfig {
        ExperimentConfig {
            strategy: Strategy::RandomSampling,
            quota: 25,
            checkpoint_every: 5,
            seed: DEFAULT_SEED,
            uncertainty: Uncertainty::Margin,
            cada: CadaConfig::default(),
        }
    }
}

/// State of an `ActiveLearner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Init,
    SelectQuery,
    Reveal,
    Retrain,
    Terminated,
}

/// Evaluation of the model at one iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    /// Iteration (0-based) at which the checkpoint was taken; the model
    /// was trained with `queries + 1` revealed target examples.
    pub queries: usize,
    /// Accuracy on the whole target.
    pub score: f64,
    /// Predicted target labels.
    pub predictions: Array1<Label>,
}

/// What a terminated run leaves behind.
#[derive(Debug)]
pub struct RunOutcome<C> {
    pub known: KnownSet,
    pub checkpoints: Vec<Checkpoint>,
    /// The model as trained at the last checkpoint.
    pub model: C,
}

/// Drives one active-learning run.
pub struct ActiveLearner<C: Classifier> {
    config: ExperimentConfig,
    source: Dataset,
    target: Dataset,
    model: C,
    oracle: Oracle,
    known: KnownSet,
    state: State,
    iteration: usize,
    plan: VecDeque<usize>,
    pending: Option<Query>,
    checkpoints: Vec<Checkpoint>,
}

impl<C: Classifier> ActiveLearner<C> {
    /// Prepares a run.
    ///
    /// # Arguments
    ///
    /// * `source` - Labeled source dataset; the initial known set.
    /// * `target` - Target dataset. Its labels are handed to the oracle,
    ///              and used to evaluate the model at checkpoints.
    /// * `model` - Classifier to train.
    /// * `config` - Run parameters.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if source and target dimensionality differ.
    pub fn new(source: Dataset, target: Dataset, model: C, config: ExperimentConfig)
            -> Result<ActiveLearner<C>> {
        if source.dim() != target.dim() {
            return Err(Error::invalid(format!("source has {} features, target has {}",
                                              source.dim(), target.dim())));
        }

        Ok(ActiveLearner {
            oracle: Oracle::from_dataset(target.clone(), config.seed),
            known: KnownSet::from_dataset(&source),
            config,
            source,
            target,
            model,
            state: State::Init,
            iteration: 0,
            plan: VecDeque::new(),
            pending: None,
            checkpoints: vec![],
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn known(&self) -> &KnownSet {
        &self.known
    }

    pub fn model(&self) -> &C {
        &self.model
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Performs one state transition and returns the new state.
    ///
    /// Errors leave the learner in the state where they occurred; they
    /// are fatal for the run.
    pub fn step(&mut self) -> Result<State> {
        self.state = match self.state {
            State::Init => self.init()?,
            State::SelectQuery => self.select_query()?,
            State::Reveal => self.reveal()?,
            State::Retrain => self.retrain()?,
            State::Terminated => State::Terminated,
        };

        Ok(self.state)
    }

    /// Runs until termination.
    pub fn run(self) -> Result<RunOutcome<C>> {
        self.run_with(|_, _| {})
    }

    /// Runs until termination, calling `observer` with every new
    /// checkpoint and the model it was computed with.
    pub fn run_with<F>(mut self, mut observer: F) -> Result<RunOutcome<C>>
            where F: FnMut(&Checkpoint, &C) {
        while self.state != State::Terminated {
            let n_checkpoints = self.checkpoints.len();
            self.step()?;
            if self.checkpoints.len() > n_checkpoints {
                if let Some(checkpoint) = self.checkpoints.last() {
                    observer(checkpoint, &self.model);
                }
            }
        }

        Ok(RunOutcome {
            known: self.known,
            checkpoints: self.checkpoints,
            model: self.model,
        })
    }

    fn init(&mut self) -> Result<State> {
        info!("starting {} run: quota={}, {} source, {} target examples",
              self.config.strategy, self.config.quota, self.source.len(), self.target.len());

        if self.config.strategy == Strategy::Cada {
            let cada = Cada::with_config(&self.source.inputs(), &self.source.targets(),
                                         self.config.cada.clone())?;
            self.plan = cada.query(&self.target.inputs(), self.config.quota)?
                            .into_iter()
                            .collect();
        }

        Ok(if self.config.quota == 0 { State::Terminated } else { State::SelectQuery })
    }

    fn select_query(&mut self) -> Result<State> {
        let query = match self.config.strategy {
            Strategy::RandomSampling => self.oracle.random_query()?,
            Strategy::UncertaintySampling => {
                self.model.fit(&self.known.inputs(), &self.known.targets())?;
                self.oracle.uncertainty_sampling_with(&self.model, self.config.uncertainty)?
            },
            Strategy::Cada => {
                let index = self.plan
                                .pop_front()
                                .ok_or(Error::ExhaustedOracle { revealed: self.iteration })?;
                self.oracle.reveal(index)?
            },
        };
        debug!("iteration {}: queried target {} (label {})",
               self.iteration, query.index, query.label);
        self.pending = Some(query);

        Ok(State::Reveal)
    }

    fn reveal(&mut self) -> Result<State> {
        if let Some(query) = self.pending.take() {
            self.known.push(&query.features.view(), query.label)?;
        }

        Ok(State::Retrain)
    }

    fn retrain(&mut self) -> Result<State> {
        let i = self.iteration;
        let every = self.config.checkpoint_every;
        let is_checkpoint = i == 0
                            || (every > 0 && i % every == 0)
                            || i + 1 == self.config.quota;

        if is_checkpoint {
            self.model.fit(&self.known.inputs(), &self.known.targets())?;
            let score = self.model.score(&self.target.inputs(), &self.target.targets())?;
            let predictions = self.model.predict(&self.target.inputs())?;
            info!("{} queries={} accuracy={:.2}", self.model.name(), i, score);

            self.checkpoints.push(Checkpoint { queries: i, score, predictions });
        }

        self.iteration += 1;

        Ok(if self.iteration == self.config.quota { State::Terminated } else { State::SelectQuery })
    }
}
