//! Source and source-vortex panel method.
//!
//! The unknowns are one uniform source strength per panel and, for the
//! source-vortex method, one vortex strength shared by every panel. The
//! no-penetration condition is enforced at each control point and the Kutta
//! condition is appended as an extra equation, giving a square system.

use crate::error::{PanelError, PanelResult};
use crate::freestream::Freestream;
use crate::geometry::CoordinateSource;
use crate::influence::InfluenceMatrices;
use crate::panel::{panelize, Panel};
use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Pivot magnitude, relative to the largest, below which the factorisation
/// is treated as singular.
const PIVOT_RATIO_TOLERANCE: f64 = 1e-14;

/// Dense LU solve with a pivot-ratio check for near singularity.
pub fn solve_dense(
    matrix: na::DMatrix<f64>,
    rhs: &na::DVector<f64>,
) -> PanelResult<na::DVector<f64>> {
    let size = rhs.len();
    let lu = matrix.lu();
    if !lu.is_invertible() {
        return Err(PanelError::SingularSystem(format!(
            "{size}x{size} influence matrix has a zero pivot"
        )));
    }

    let pivots = lu.u().diagonal().map(f64::abs);
    let pivot_ratio = pivots.min() / pivots.max();
    log::debug!("pivot ratio {pivot_ratio:.3e}");
    if !(pivot_ratio > PIVOT_RATIO_TOLERANCE) {
        return Err(PanelError::SingularSystem(format!(
            "{size}x{size} influence matrix is numerically singular \
             (pivot ratio {pivot_ratio:.3e})"
        )));
    }

    let solution = lu
        .solve(rhs)
        .ok_or_else(|| PanelError::SingularSystem(format!("{size}x{size} LU solve failed")))?;
    if let Some(index) = solution.iter().position(|s| !s.is_finite()) {
        return Err(PanelError::SingularSystem(format!(
            "non-finite strength for unknown {index}"
        )));
    }
    Ok(solution)
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Sources only: no circulation, no lift.
    Source,
    /// Sources plus one shared vortex strength fixed by the Kutta condition.
    #[default]
    SourceVortex,
}

impl Method {
    pub fn has_vortex(&self) -> bool {
        matches!(self, Method::SourceVortex)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Source => f.write_str("source"),
            Method::SourceVortex => f.write_str("source-vortex"),
        }
    }
}

/// Output of the linear solve, kept so post-processing reuses the
/// assembled coefficients.
#[derive(Debug, Clone)]
pub struct Solution {
    pub method: Method,
    pub influence: InfluenceMatrices,
    pub source_strengths: na::DVector<f64>,
    /// Counter-clockwise positive; `None` for the source-only method.
    pub vortex_strength: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Airfoil {
    panels: Vec<Panel>,
    freestream: Freestream,
}

impl Airfoil {
    pub fn new(panels: Vec<Panel>, freestream: Freestream) -> Self {
        Airfoil { panels, freestream }
    }

    /// Reads the contour from `source` and discretizes it into `n` panels.
    pub fn from_source(
        source: &dyn CoordinateSource,
        n: usize,
        freestream: Freestream,
    ) -> PanelResult<Self> {
        let raw = source.coordinates()?;
        let panels = panelize(&raw, n).map_err(|e| match e {
            PanelError::InvalidGeometry(msg) => {
                PanelError::InvalidGeometry(format!("{}: {msg}", source.describe()))
            }
            other => other,
        })?;
        log::debug!(
            "{}: {} raw points -> {} panels",
            source.describe(),
            raw.len(),
            panels.len()
        );
        Ok(Airfoil::new(panels, freestream))
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn freestream(&self) -> &Freestream {
        &self.freestream
    }

    /// Chord as the x-extent of the panel nodes.
    pub fn chord(&self) -> f64 {
        let xs = self.panels.iter().map(|p| p.start.x);
        let x_min = xs.clone().fold(f64::INFINITY, f64::min);
        let x_max = xs.fold(f64::NEG_INFINITY, f64::max);
        x_max - x_min
    }

    /// Assembles and solves the singularity system, storing each panel's
    /// source strength.
    pub fn solve(&mut self, method: Method) -> PanelResult<Solution> {
        let n = self.panels.len();
        if n == 0 {
            return Err(PanelError::SingularSystem("no panels to solve".to_string()));
        }

        let influence = InfluenceMatrices::assemble(&self.panels, method.has_vortex());
        let (matrix, rhs) = self.build_system(&influence);
        let size = rhs.len();
        log::debug!("assembled {size}x{size} system ({method})");

        let strengths = solve_dense(matrix, &rhs)?;

        for (panel, sigma) in self.panels.iter_mut().zip(strengths.iter()) {
            panel.source_strength = *sigma;
        }
        let source_strengths = strengths.rows(0, n).into_owned();
        let vortex_strength = method.has_vortex().then(|| strengths[n]);

        Ok(Solution {
            method,
            influence,
            source_strengths,
            vortex_strength,
        })
    }

    fn build_system(&self, influence: &InfluenceMatrices) -> (na::DMatrix<f64>, na::DVector<f64>) {
        let n = self.panels.len();
        let size = if influence.vortex.is_some() { n + 1 } else { n };
        let scale = 0.5 / PI;

        let mut matrix = na::DMatrix::zeros(size, size);
        let mut rhs = na::DVector::zeros(size);

        matrix
            .view_mut((0, 0), (n, n))
            .copy_from(&(&influence.source_normal * scale));
        for (i, panel) in self.panels.iter().enumerate() {
            rhs[i] = -self.freestream.normal_component(panel);
        }

        if let Some(vortex) = &influence.vortex {
            for i in 0..n {
                matrix[(i, n)] = vortex.normal.row(i).sum() * scale;
            }

            // Kutta condition: vt on the two trailing-edge panels cancels
            let (first, last) = (0, n - 1);
            for j in 0..n {
                matrix[(n, j)] = (influence.source_tangential[(first, j)]
                    + influence.source_tangential[(last, j)])
                    * scale;
            }
            matrix[(n, n)] = (vortex.tangential.row(first).sum()
                + vortex.tangential.row(last).sum())
                * scale;
            rhs[n] = -(self.freestream.tangential_component(&self.panels[first])
                + self.freestream.tangential_component(&self.panels[last]));
        }

        (matrix, rhs)
    }

    /// Surface tangential velocity from the solved strengths.
    pub fn compute_tangential_velocity(&mut self, solution: &Solution) {
        let scale = 0.5 / PI;
        let influence = &solution.influence;
        let induced = &influence.source_tangential * &solution.source_strengths * scale;

        for (i, panel) in self.panels.iter_mut().enumerate() {
            let mut vt = self.freestream.tangential_component(panel) + induced[i];
            if let (Some(vortex), Some(gamma)) = (&influence.vortex, solution.vortex_strength) {
                vt += gamma * vortex.tangential.row(i).sum() * scale;
            }
            panel.vt = vt;
        }
    }

    /// Incompressible pressure coefficient from the tangential velocity.
    pub fn compute_pressure_coefficient(&mut self) {
        let speed = self.freestream.speed();
        for panel in self.panels.iter_mut() {
            panel.cp = 1.0 - (panel.vt / speed).powi(2);
        }
    }

    /// Runs the full pipeline for one configuration.
    pub fn analyze(
        source: &dyn CoordinateSource,
        n: usize,
        freestream: Freestream,
        method: Method,
    ) -> PanelResult<(Airfoil, Solution)> {
        let mut airfoil = Airfoil::from_source(source, n, freestream)?;
        let solution = airfoil.solve(method)?;
        airfoil.compute_tangential_velocity(&solution);
        airfoil.compute_pressure_coefficient();
        Ok((airfoil, solution))
    }
}
