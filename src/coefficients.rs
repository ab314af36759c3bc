//! Force and moment coefficients from a solved surface.

use crate::solver::{Airfoil, Solution};
use serde::{Deserialize, Serialize};

/// Integrated loads for one solved configuration, normalised by freestream
/// dynamic pressure and chord.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroCoefficients {
    /// Lift coefficient from pressure integration.
    pub cl: f64,
    /// Pressure drag coefficient; zero in exact potential flow.
    pub cd: f64,
    /// Pitching moment about the quarter chord, positive nose-up.
    pub cm: f64,
    /// Kutta-Joukowski lift from the shared vortex strength.
    pub cl_circulation: f64,
    /// Sum of source strength times panel length; zero for a closed body.
    pub source_sum: f64,
}

impl AeroCoefficients {
    pub fn compute(airfoil: &Airfoil, solution: &Solution) -> Self {
        let panels = airfoil.panels();
        let freestream = airfoil.freestream();
        let chord = airfoil.chord();
        let alpha = freestream.alpha_radians();

        let x_le = panels
            .iter()
            .map(|p| p.start.x)
            .fold(f64::INFINITY, f64::min);
        let x_ref = x_le + 0.25 * chord;

        // Body-axis force and moment from -cp * L * n on each panel
        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut moment = 0.0;
        for panel in panels {
            let fx = -panel.cp * panel.length * panel.normal.x;
            let fy = -panel.cp * panel.length * panel.normal.y;
            cx += fx;
            cy += fy;
            moment += (panel.control_point.x - x_ref) * fy - panel.control_point.y * fx;
        }
        cx /= chord;
        cy /= chord;

        let perimeter: f64 = panels.iter().map(|p| p.length).sum();
        // Vortex strength is counter-clockwise positive; lift follows clockwise circulation
        let circulation = -solution.vortex_strength.unwrap_or(0.0) * perimeter;

        AeroCoefficients {
            cl: cy * alpha.cos() - cx * alpha.sin(),
            cd: cx * alpha.cos() + cy * alpha.sin(),
            cm: -moment / (chord * chord),
            cl_circulation: 2.0 * circulation / (freestream.speed() * chord),
            source_sum: panels.iter().map(|p| p.source_strength * p.length).sum(),
        }
    }
}
