extern crate cada;
extern crate docopt;
extern crate env_logger;
#[macro_use]
extern crate serde_derive;

use cada::{ActiveLearner, ComplexityEstimator, ExperimentConfig, Strategy};
use cada::cada::CadaConfig;
use cada::classifier::KNNClassifier;
use cada::report::checkpoint_records;
use cada::utils::{load_data, store_records};
use docopt::Docopt;

const USAGE: &'static str = "
Run an active-learning experiment from a labeled source domain to a
target domain, querying target labels with the chosen strategy and
training a k-NN classifier.

Prints the complexity AUC of both domains and the target accuracy at each
checkpoint, and stores the (queries, score) checkpoints into <output-file>.

Data files have no header, and one `label, x1, x2, ...` row per sample.

Usage: active random [options] [--] <output-file> <source-file> <target-file>
       active uncertainty [options] [--] <output-file> <source-file> <target-file>
       active cada [options] [--] <output-file> <source-file> <target-file>
       active (--help | --version)

Options:
    -q, --quota=<q>         Number of queries [default: 25].
    -e, --every=<n>         Checkpoint every <n> queries [default: 5].
    -k, --knn=<k>           Neighbors of the k-NN classifier [default: 5].
    --windows=<w>           Windows of the complexity estimators [default: 10].
    --nk=<nk>               Largest neighborhood of the complexity
                            estimators [default: 10].
    --seed=<s>              Oracle PRNG seed [default: 0].
    -h, --help              Show help.
    --version               Show the version.
";

#[derive(Deserialize)]
struct Args {
    flag_quota: usize,
    flag_every: usize,
    flag_knn: usize,
    flag_windows: usize,
    flag_nk: usize,
    flag_seed: u64,
    arg_output_file: String,
    arg_source_file: String,
    arg_target_file: String,
    cmd_random: bool,
    cmd_uncertainty: bool,
    cmd_cada: bool,
}


fn main() {
    env_logger::init();

    // Parse args from command line.
    let args: Args = Docopt::new(USAGE)
                            .and_then(|d| d.version(Some(env!("CARGO_PKG_VERSION").to_string()))
                                           .deserialize())
                            .unwrap_or_else(|e| e.exit());

    let strategy = if args.cmd_random {
        Strategy::RandomSampling
    } else if args.cmd_uncertainty {
        Strategy::UncertaintySampling
    } else if args.cmd_cada {
        Strategy::Cada
    } else {
        // Docopt shouldn't let this happen.
        panic!("This shouldn't happen");
    };

    let source = load_data(&args.arg_source_file)
                     .expect("Failed to load source data");
    let target = load_data(&args.arg_target_file)
                     .expect("Failed to load target data");

    for (name, dataset) in [("Source", &source), ("Target", &target)].iter() {
        let estimator = ComplexityEstimator::from_dataset((*dataset).clone(),
                                                          args.flag_windows, args.flag_nk)
                                           .expect("Failed to build the estimator");
        println!("{} complexity AUC={:.2}", name, estimator.auc());
    }

    let config = ExperimentConfig {
        strategy,
        quota: args.flag_quota,
        checkpoint_every: args.flag_every,
        seed: args.flag_seed,
        cada: CadaConfig { n_windows: args.flag_windows, nk: args.flag_nk,
                           ..Default::default() },
        ..Default::default()
    };
    let learner = ActiveLearner::new(source, target, KNNClassifier::new(args.flag_knn), config)
                                .expect("Failed to set up the experiment");

    let outcome = learner.run_with(|c, _| {
                             println!("{} # Queries={} Accuracy={:.2}", strategy, c.queries,
                                      c.score);
                         })
                         .expect("Active learning run failed");

    store_records(&checkpoint_records(&outcome.checkpoints), &args.arg_output_file)
        .expect("Failed to store the output");
}
