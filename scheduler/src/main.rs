#![forbid(unsafe_code)]
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use log::{debug, error};

mod commands;

#[derive(Debug, Parser)]
/// Flexible job-shop instance and schedule tooling
struct App {
    #[clap(flatten)]
    verbose: Verbosity,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an instance file and print a summary of its structure
    Validate {
        #[clap(long, default_value = "instances/Mk01.fjs")]
        instance: PathBuf,
    },
    /// Check a candidate schedule against an instance and report its
    /// makespan and violations
    Evaluate {
        /// JSON file mapping 0-based job indices to ordered lists of
        /// {machine, start, end} records
        #[clap(required = true)]
        schedule: PathBuf,
        #[clap(long, default_value = "instances/Mk01.fjs")]
        instance: PathBuf,
    },
    /// Draw random candidate schedules and keep the best one
    Sample {
        #[clap(long, default_value = "instances/Mk01.fjs")]
        instance: PathBuf,
        /// Number of candidates to draw
        #[clap(long, default_value_t = 1000)]
        count: u32,
        /// Base seed for reproducible sampling
        #[clap(long)]
        seed: Option<u64>,
        /// Evaluate candidates on a single thread
        #[clap(long)]
        sequential: bool,
        /// Write the best schedule as JSON to this path
        #[clap(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let args: App = App::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    debug!("{args:?}");

    if let Err(err) = match args.command {
        Commands::Validate { instance } => commands::validate(instance),
        Commands::Evaluate { schedule, instance } => commands::evaluate(instance, schedule),
        Commands::Sample {
            instance,
            count,
            seed,
            sequential,
            output,
        } => commands::sample(instance, count, seed, sequential, output),
    } {
        error!("An error occurred: {}", err);
        std::process::exit(1);
    }
}
