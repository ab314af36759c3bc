//! Running cases: one at a time, or many independent ones in parallel.

use crate::coefficients::AeroCoefficients;
use crate::config::{CaseConfig, SweepConfig};
use crate::error::PanelResult;
use crate::output::{write_cp, write_json};
use crate::solver::Airfoil;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of one successfully solved case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub label: String,
    pub cp_file: PathBuf,
    pub panels: usize,
    pub coefficients: AeroCoefficients,
}

/// Solves one case and writes its `cp.txt`.
pub fn run_case(config: &CaseConfig) -> PanelResult<CaseReport> {
    let label = config.label();
    let source = config.geometry()?;
    let freestream = config.freestream()?;

    let (airfoil, solution) = Airfoil::analyze(source.as_ref(), config.n, freestream, config.method)?;
    let coefficients = AeroCoefficients::compute(&airfoil, &solution);
    let cp_file = write_cp(&config.output, airfoil.panels())?;

    log::info!(
        "{label}: cl = {:.4} (circulation {:.4}), cm = {:.4}, wrote {}",
        coefficients.cl,
        coefficients.cl_circulation,
        coefficients.cm,
        cp_file.display()
    );

    Ok(CaseReport {
        label,
        cp_file,
        panels: airfoil.panels().len(),
        coefficients,
    })
}

/// Summary entry for one case of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub case: CaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<CaseReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub entries: Vec<SweepEntry>,
}

impl SweepSummary {
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| e.error.is_some()).count()
    }
}

/// Runs every case on the rayon pool. A failing case is recorded and the
/// rest still run; entries keep the order of the configuration.
pub fn run_sweep(sweep: &SweepConfig) -> SweepSummary {
    let entries = sweep
        .cases
        .par_iter()
        .map(|case| match run_case(case) {
            Ok(report) => SweepEntry {
                case: case.clone(),
                report: Some(report),
                error: None,
            },
            Err(e) => {
                log::error!("{}: {e}", case.label());
                SweepEntry {
                    case: case.clone(),
                    report: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    SweepSummary { entries }
}

pub const SUMMARY_FILE_NAME: &str = "summary.json";

pub fn write_summary(dir: &Path, summary: &SweepSummary) -> PanelResult<PathBuf> {
    let path = dir.join(SUMMARY_FILE_NAME);
    write_json(&path, summary)?;
    Ok(path)
}
