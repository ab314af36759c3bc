//! Source and source-vortex panel method for 2-D airfoils.
//!
//! Geometry comes from the NACA 4-digit formula or a coordinate file, is
//! resampled into straight panels, and the panel singularity strengths are
//! found from the no-penetration and Kutta conditions. The surface pressure
//! coefficient is written per panel to `cp.txt`.

pub mod coefficients;
pub mod config;
pub mod error;
pub mod freestream;
pub mod geometry;
pub mod influence;
pub mod output;
pub mod panel;
pub mod solver;
pub mod sweep;

pub use coefficients::AeroCoefficients;
pub use config::{CaseConfig, SweepConfig};
pub use error::{PanelError, PanelResult};
pub use freestream::Freestream;
pub use geometry::{CoordinateFile, CoordinateSource, Naca4};
pub use panel::{panelize, Panel, SurfaceLoc};
pub use solver::{Airfoil, Method, Solution};
