//! Onset flow and its projection onto panels.

use crate::error::{PanelError, PanelResult};
use crate::panel::Panel;
use nalgebra as na;

/// Uniform onset flow: speed and angle of incidence in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Freestream {
    speed: f64,
    alpha: f64,
}

impl Freestream {
    pub fn new(speed: f64, alpha: f64) -> PanelResult<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(PanelError::InvalidFreestream(format!(
                "speed must be positive and finite, got {speed}"
            )));
        }
        if !alpha.is_finite() {
            return Err(PanelError::InvalidFreestream(format!(
                "angle of incidence must be finite, got {alpha}"
            )));
        }
        Ok(Freestream { speed, alpha })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Angle of incidence in degrees.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_radians(&self) -> f64 {
        self.alpha.to_radians()
    }

    pub fn velocity(&self) -> na::Vector2<f64> {
        let alpha = self.alpha_radians();
        na::Vector2::new(self.speed * alpha.cos(), self.speed * alpha.sin())
    }

    /// Freestream velocity along the panel's outward normal.
    pub fn normal_component(&self, panel: &Panel) -> f64 {
        self.speed * f64::cos(self.alpha_radians() - panel.beta)
    }

    /// Freestream velocity along the panel's tangent.
    pub fn tangential_component(&self, panel: &Panel) -> f64 {
        self.speed * f64::sin(self.alpha_radians() - panel.beta)
    }
}
