//! Case configuration shared by the CLI and the sweep runner.

use crate::error::{PanelError, PanelResult};
use crate::freestream::Freestream;
use crate::geometry::{CoordinateFile, CoordinateSource, Naca4};
use crate::solver::Method;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One panel-method run: geometry, discretization, freestream, output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// NACA 4-digit code; exclusive with `input`.
    #[serde(default)]
    pub naca: Option<String>,
    /// Coordinate file; exclusive with `naca`.
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// Header lines to skip in `input`.
    #[serde(default)]
    pub skiprows: usize,
    /// Number of panels.
    #[serde(default = "default_panels")]
    pub n: usize,
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Angle of incidence (degrees).
    #[serde(default)]
    pub alpha: f64,
    #[serde(default)]
    pub method: Method,
    /// Directory receiving `cp.txt`.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Close the NACA trailing edge to a cusp.
    #[serde(default = "default_sharp_trailing_edge")]
    pub sharp_trailing_edge: bool,
}

pub const DEFAULT_PANELS: usize = 40;

fn default_panels() -> usize {
    DEFAULT_PANELS
}

fn default_speed() -> f64 {
    1.0
}

fn default_output() -> PathBuf {
    PathBuf::from(".")
}

fn default_sharp_trailing_edge() -> bool {
    true
}

impl Default for CaseConfig {
    fn default() -> Self {
        CaseConfig {
            naca: None,
            input: None,
            skiprows: 0,
            n: default_panels(),
            speed: default_speed(),
            alpha: 0.0,
            method: Method::default(),
            output: default_output(),
            sharp_trailing_edge: default_sharp_trailing_edge(),
        }
    }
}

impl CaseConfig {
    /// Builds the geometry source; exactly one of `naca` and `input` must be set.
    pub fn geometry(&self) -> PanelResult<Box<dyn CoordinateSource>> {
        match (&self.naca, &self.input) {
            (Some(code), None) => {
                // One station per panel node keeps the raw contour as fine as the panels
                let stations = self.n.max(2) + 1;
                Ok(Box::new(Naca4::new(code, stations, self.sharp_trailing_edge)?))
            }
            (None, Some(path)) => Ok(Box::new(CoordinateFile::new(path, self.skiprows))),
            (Some(code), Some(path)) => Err(PanelError::InvalidGeometry(format!(
                "both NACA {code} and input file {} given; choose one",
                path.display()
            ))),
            (None, None) => Err(PanelError::InvalidGeometry(
                "no geometry source: give a NACA code or an input file".to_string(),
            )),
        }
    }

    pub fn freestream(&self) -> PanelResult<Freestream> {
        Freestream::new(self.speed, self.alpha)
    }

    /// Human-readable case label for logs and summaries.
    pub fn label(&self) -> String {
        let geometry = match (&self.naca, &self.input) {
            (Some(code), _) => format!("NACA {code}"),
            (None, Some(path)) => path.display().to_string(),
            (None, None) => "<no geometry>".to_string(),
        };
        format!(
            "{geometry}, n={}, speed={}, alpha={}, {}",
            self.n, self.speed, self.alpha, self.method
        )
    }
}

/// A list of independent cases, loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub cases: Vec<CaseConfig>,
}

impl SweepConfig {
    pub fn from_json(text: &str) -> PanelResult<Self> {
        serde_json::from_str(text).map_err(|e| PanelError::Serialization(e.to_string()))
    }

    pub fn load(path: &Path) -> PanelResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| PanelError::io(path, e))?;
        Self::from_json(&text)
    }
}
