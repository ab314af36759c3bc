//! Runs a JSON list of independent panel-method cases in parallel.
//!
//! Usage:
//!     panelflow-sweep --config sweep.json --summary-dir results

use clap::Parser;
use panelflow::sweep::{run_sweep, write_summary};
use panelflow::SweepConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "panelflow-sweep")]
#[command(version, about = "Parallel sweep of panel-method cases")]
struct Cli {
    /// Sweep configuration (JSON with a `cases` list).
    #[arg(short, long)]
    config: PathBuf,

    /// Directory receiving summary.json.
    #[arg(long, default_value = ".")]
    summary_dir: PathBuf,

    /// Worker threads (defaults to the number of cores).
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

fn run(cli: Cli) -> Result<usize, Box<dyn std::error::Error>> {
    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()?;
    }

    let sweep = SweepConfig::load(&cli.config)?;
    log::info!(
        "running {} cases from {}",
        sweep.cases.len(),
        cli.config.display()
    );

    let summary = run_sweep(&sweep);
    let path = write_summary(&cli.summary_dir, &summary)?;
    log::info!("summary written to {}", path.display());

    Ok(summary.failures())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(0) => {}
        Ok(failures) => {
            eprintln!("Error: {failures} case(s) failed");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
