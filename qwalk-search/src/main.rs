//! `qwalk`: run the hypercube quantum walk search sweep.

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;

use qwalk_search::params::{ParameterSpace, WalkParams, NUM_COMBINATIONS};
use qwalk_search::record::{HistogramRow, ROW_LAYOUT};
use qwalk_search::search::{QuantumWalkSearch, SearchConfig};
use qwalk_search::sweep::{combination_rng, run_sweep, verify_file, SweepConfig};

#[derive(Parser)]
#[command(name = "qwalk")]
#[command(about = "Coined quantum walk search on the 4-dimensional hypercube")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone)]
struct SearchArgs {
    /// Samples per circuit
    #[arg(long, default_value_t = 1024)]
    shots: usize,

    /// Oracle + reflection rounds
    #[arg(long, default_value_t = 2)]
    iterations: usize,

    /// Base seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            iterations: self.iterations,
            shots: self.shots,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Simulate every parameter combination and write one row per combination
    Sweep {
        #[command(flatten)]
        search: SearchArgs,

        /// Output file
        #[arg(short, long, default_value = "data.out")]
        output: PathBuf,

        /// Keep the valid rows already in the output file and continue after them
        #[arg(long)]
        resume: bool,

        /// First combination index
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// One past the last combination index
        #[arg(long, default_value_t = NUM_COMBINATIONS)]
        end: usize,

        /// Combinations simulated between flushes
        #[arg(long, default_value_t = 256)]
        chunk_size: usize,
    },

    /// Simulate a single combination and print its counts and row
    Run {
        #[command(flatten)]
        search: SearchArgs,

        #[arg(long, default_value = "0")]
        aux: String,
        #[arg(long, default_value = "00")]
        coin: String,
        #[arg(long, default_value = "0000")]
        node: String,
        #[arg(long, default_value = "0000")]
        theta: String,
        #[arg(long)]
        target: String,
    },

    /// Check that an output file holds one valid row per combination
    Verify {
        file: PathBuf,

        #[arg(long, default_value_t = 1024)]
        shots: usize,

        #[arg(long, default_value_t = 0)]
        start: usize,

        #[arg(long, default_value_t = NUM_COMBINATIONS)]
        end: usize,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Sweep {
            search,
            output,
            resume,
            start,
            end,
            chunk_size,
        } => {
            let config = SweepConfig {
                output,
                search: search.config(),
                seed: search.seed,
                resume,
                space: ParameterSpace::range(start, end)?,
                chunk_size,
            };
            let summary = run_sweep(&config)?;
            info!(
                "wrote {} rows ({} resumed) to {} in {:.1?}",
                summary.rows_written,
                summary.rows_resumed,
                config.output.display(),
                summary.elapsed
            );
            Ok(())
        }
        Command::Run {
            search,
            aux,
            coin,
            node,
            theta,
            target,
        } => {
            let params = WalkParams::parse(&aux, &coin, &node, &theta, &target)?;
            let walk = QuantumWalkSearch::new(search.config())?;
            let mut rng = combination_rng(search.seed, params.index());
            let counts = walk.run(&params, &mut rng)?;
            println!("{}", params);
            println!("counts: {}", counts);
            println!(
                "P(target) = {:.4}",
                walk.success_probability(&params)?
            );
            println!();
            println!("{}", ROW_LAYOUT);
            println!("{}", HistogramRow::from_counts(params, &counts, search.shots));
            Ok(())
        }
        Command::Verify {
            file,
            shots,
            start,
            end,
        } => {
            let report = verify_file(&file, shots, &ParameterSpace::range(start, end)?)?;
            println!("{}", report);
            if !report.is_ok() {
                return Err(format!("{} does not hold a complete sweep", file.display()).into());
            }
            Ok(())
        }
    }
}
