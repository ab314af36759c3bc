//! Surface pressure coefficient of an airfoil by the panel method.

use clap::Parser;
use panelflow::config::{CaseConfig, DEFAULT_PANELS};
use panelflow::sweep::run_case;
use panelflow::Method;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "panelflow")]
#[command(version, about = "Source-vortex panel method")]
struct Cli {
    /// The 4 digits of the NACA foil to be generated.
    #[arg(long)]
    naca: Option<String>,

    /// Path of the file with airfoil coordinates.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of rows to skip when reading coordinates.
    #[arg(long, default_value_t = 0)]
    skiprows: usize,

    /// Number of panels to discretize the airfoil.
    #[arg(short, long, default_value_t = DEFAULT_PANELS)]
    n: usize,

    /// Freestream speed.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Freestream angle of incidence (degrees).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    alpha: f64,

    /// Panel method to use.
    #[arg(long, value_enum, default_value_t = Method::SourceVortex)]
    method: Method,

    /// Output directory for cp.txt.
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Keep the finite-thickness trailing edge of the NACA formula.
    #[arg(long)]
    open_trailing_edge: bool,
}

impl From<Cli> for CaseConfig {
    fn from(cli: Cli) -> Self {
        CaseConfig {
            naca: cli.naca,
            input: cli.input,
            skiprows: cli.skiprows,
            n: cli.n,
            speed: cli.speed,
            alpha: cli.alpha,
            method: cli.method,
            output: cli.output,
            sharp_trailing_edge: !cli.open_trailing_edge,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CaseConfig::from(Cli::parse());

    if let Err(e) = run_case(&config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
