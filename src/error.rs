//! Error types for the panel-method solver.
//!
//! Every fallible operation returns `PanelResult<T>`. All variants are fatal
//! for the configuration being solved.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    /// Geometry could not be built: bad file, too few points, bad NACA code,
    /// conflicting or missing geometry source.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A panel collapsed to zero length after resampling.
    #[error("Degenerate panel {index}: length {length:.3e}")]
    DegeneratePanel { index: usize, length: f64 },

    /// The influence matrix could not be factorised.
    #[error("Singular system: {0}")]
    SingularSystem(String),

    #[error("Invalid freestream: {0}")]
    InvalidFreestream(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PanelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PanelError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PanelResult<T> = Result<T, PanelError>;
