use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use symnmf_analyzer::config::{AnalysisConfig, SymNmfConfig, DEFAULT_MAX_ITER, DEFAULT_SEED};
use symnmf_analyzer::{analysis, data, storage, Goal};

/// Message printed for every failure, whatever the cause
const ERROR_MESSAGE: &str = "An Error Has Occurred";

#[derive(Parser, Debug)]
#[clap(
    name = "symnmf-analyzer",
    about = "Compare K-means and SymNMF clusterings of a point set"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Seed for the SymNMF initialization
    #[clap(long, global = true, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Iteration cap for both algorithms
    #[clap(long, global = true, default_value_t = DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Verbose logging
    #[clap(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run K-means and SymNMF and print both silhouette scores
    Analysis {
        /// Number of clusters
        k: usize,

        /// Comma-separated point file
        input: PathBuf,

        /// Also write a JSON report to this path
        #[clap(long)]
        report: Option<PathBuf>,
    },

    /// Print the matrix for one goal: symnmf, sym, ddg or norm
    Symnmf {
        /// Number of clusters (used by the symnmf goal)
        k: usize,

        /// Which matrix to print
        goal: String,

        /// Comma-separated point file
        input: PathBuf,
    },
}

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            println!("{}", ERROR_MESSAGE);
            process::exit(1);
        }
    };

    // Results go to stdout; keep stderr quiet unless asked
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    match run(&args) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            log::error!("{:#}", e);
            println!("{}", ERROR_MESSAGE);
            process::exit(1);
        }
    }
}

/// Execute the chosen command and return everything it prints
fn run(args: &Cli) -> Result<String> {
    match &args.command {
        Command::Analysis { k, input, report } => {
            let points = data::read_points(input)
                .with_context(|| format!("failed to load {}", input.display()))?;

            let config = AnalysisConfig::new(*k)
                .with_max_iter(args.max_iter)
                .with_seed(args.seed);
            let result = analysis::run_analysis(points.view(), &config)?;

            if let Some(path) = report {
                storage::save_report(&result, path)?;
            }

            Ok(storage::format_scores(&result))
        }
        Command::Symnmf { k, goal, input } => {
            let goal: Goal = goal.parse()?;
            let points = data::read_points(input)
                .with_context(|| format!("failed to load {}", input.display()))?;

            let config = SymNmfConfig::new(*k).with_max_iter(args.max_iter);
            let matrix = analysis::compute_goal(points.view(), goal, &config, args.seed)?;

            Ok(storage::format_matrix(matrix.view()))
        }
    }
}
