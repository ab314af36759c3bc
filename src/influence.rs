//! Influence coefficients of uniform source and vortex panels.
//!
//! A coefficient is the raw panel integral
//!
//! ```text
//! I(k) = ∫ (r · k) / |r|² ds
//! ```
//!
//! where `r` runs from a point of the source panel to the evaluation
//! control point and `k` is the projection direction. Induced velocities
//! carry the `1 / 2pi` factor, so a panel's own normal coefficient is pi.
//!
//! Matrices are indexed `[(i, j)]` with `i` the evaluation (control) panel
//! and `j` the panel carrying the singularity.

use crate::panel::Panel;
use nalgebra as na;
use std::f64::consts::PI;

/// Panel integral of `(r · k) / |r|²`, evaluated in closed form.
fn panel_integral(point: &na::Point2<f64>, panel: &Panel, k: &na::Vector2<f64>) -> f64 {
    let r0 = point - panel.start;
    // Local frame: xi along the panel, eta along its normal
    let xi = r0.dot(&panel.tangent);
    let eta = r0.dot(&panel.normal);
    let length = panel.length;

    let log_term = 0.5 * f64::ln((xi * xi + eta * eta) / ((xi - length).powi(2) + eta * eta));
    let angle_term = f64::atan2(eta, xi - length) - f64::atan2(eta, xi);

    panel.tangent.dot(k) * log_term + panel.normal.dot(k) * angle_term
}

/// Normal velocity at `target`'s control point from a unit source on `source`.
pub fn source_normal(target: &Panel, source: &Panel, same: bool) -> f64 {
    if same {
        return PI;
    }
    panel_integral(&target.control_point, source, &target.normal)
}

/// Tangential velocity at `target`'s control point from a unit source on `source`.
pub fn source_tangential(target: &Panel, source: &Panel, same: bool) -> f64 {
    if same {
        return 0.0;
    }
    panel_integral(&target.control_point, source, &target.tangent)
}

/// Normal velocity from a unit counter-clockwise vortex sheet. The vortex
/// kernel is the source kernel rotated a quarter turn, so this is the source
/// integral projected on `-tangent`.
pub fn vortex_normal(target: &Panel, source: &Panel, same: bool) -> f64 {
    if same {
        return 0.0;
    }
    panel_integral(&target.control_point, source, &(-target.tangent))
}

/// Tangential velocity from a unit counter-clockwise vortex sheet; the source
/// integral projected on the normal.
pub fn vortex_tangential(target: &Panel, source: &Panel, same: bool) -> f64 {
    if same {
        return PI;
    }
    panel_integral(&target.control_point, source, &target.normal)
}

/// All four coefficient matrices for one panelization.
#[derive(Debug, Clone)]
pub struct InfluenceMatrices {
    pub source_normal: na::DMatrix<f64>,
    pub source_tangential: na::DMatrix<f64>,
    /// Present only when vortex terms were requested.
    pub vortex: Option<VortexMatrices>,
}

#[derive(Debug, Clone)]
pub struct VortexMatrices {
    pub normal: na::DMatrix<f64>,
    pub tangential: na::DMatrix<f64>,
}

impl InfluenceMatrices {
    pub fn assemble(panels: &[Panel], with_vortex: bool) -> Self {
        let n = panels.len();
        let build = |f: fn(&Panel, &Panel, bool) -> f64| {
            na::DMatrix::from_fn(n, n, |i, j| f(&panels[i], &panels[j], i == j))
        };

        InfluenceMatrices {
            source_normal: build(source_normal),
            source_tangential: build(source_tangential),
            vortex: with_vortex.then(|| VortexMatrices {
                normal: build(vortex_normal),
                tangential: build(vortex_tangential),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.source_normal.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
