//! Airfoil boundary coordinates.
//!
//! Two sources produce a raw contour: the closed-form NACA 4-digit formula and
//! a two-column coordinate file. Panelization resamples either into panels,
//! so the raw point count is independent of the final panel count.

use crate::error::{PanelError, PanelResult};
use nalgebra as na;
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

/// Anything that can produce the raw boundary contour of an airfoil.
pub trait CoordinateSource {
    fn coordinates(&self) -> PanelResult<Vec<na::Point2<f64>>>;

    /// Short description used in logs and error messages.
    fn describe(&self) -> String;
}

/// NACA 4-digit section generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Naca4 {
    code: String,
    /// Maximum camber (fraction of chord).
    m: f64,
    /// Location of maximum camber (fraction of chord).
    p: f64,
    /// Maximum thickness (fraction of chord).
    t: f64,
    stations: usize,
    sharp_trailing_edge: bool,
}

impl Naca4 {
    /// Parses a 4-digit code; `stations` is the number of x-stations per
    /// surface (at least 3).
    pub fn new(code: &str, stations: usize, sharp_trailing_edge: bool) -> PanelResult<Self> {
        let code = code.trim();
        if code.len() != 4 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(PanelError::InvalidGeometry(format!(
                "NACA code must be 4 digits, got '{code}'"
            )));
        }
        if stations < 3 {
            return Err(PanelError::InvalidGeometry(format!(
                "NACA {code}: need at least 3 stations per surface, got {stations}"
            )));
        }

        let digit = |range: std::ops::Range<usize>| -> f64 {
            code[range].parse::<u32>().map(f64::from).unwrap_or(0.0)
        };
        let m = digit(0..1) / 100.0;
        let p = digit(1..2) / 10.0;
        let t = digit(2..4) / 100.0;

        if t <= 0.0 {
            return Err(PanelError::InvalidGeometry(format!(
                "NACA {code}: zero thickness"
            )));
        }
        if m > 0.0 && p <= 0.0 {
            return Err(PanelError::InvalidGeometry(format!(
                "NACA {code}: cambered section needs a non-zero camber location"
            )));
        }

        Ok(Naca4 {
            code: code.to_string(),
            m,
            p,
            t,
            stations,
            sharp_trailing_edge,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    fn camber(&self, x: f64) -> (f64, f64) {
        let (m, p) = (self.m, self.p);
        if m == 0.0 {
            return (0.0, 0.0);
        }
        if x < p {
            (
                m / p.powi(2) * (2.0 * p * x - x * x),
                2.0 * m / p.powi(2) * (p - x),
            )
        } else {
            (
                m / (1.0 - p).powi(2) * ((1.0 - 2.0 * p) + 2.0 * p * x - x * x),
                2.0 * m / (1.0 - p).powi(2) * (p - x),
            )
        }
    }

    fn half_thickness(&self, x: f64) -> f64 {
        // The modified last coefficient closes the trailing edge exactly.
        let a4 = if self.sharp_trailing_edge { -0.1036 } else { -0.1015 };
        5.0 * self.t
            * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                + a4 * x.powi(4))
    }
}

impl CoordinateSource for Naca4 {
    fn coordinates(&self) -> PanelResult<Vec<na::Point2<f64>>> {
        let n = self.stations - 1;
        let theta_spacing = PI / n as f64;

        let mut upper_surface = Vec::with_capacity(self.stations);
        let mut lower_surface = Vec::with_capacity(self.stations);

        for i in 0..=n {
            // Cosine spacing clusters stations at both edges
            let x = 0.5 * (1.0 - f64::cos(i as f64 * theta_spacing));
            let (yc, dyc_dx) = self.camber(x);
            let yt = self.half_thickness(x);
            let theta = f64::atan(dyc_dx);

            upper_surface.push(na::Point2::new(
                x - yt * f64::sin(theta),
                yc + yt * f64::cos(theta),
            ));
            lower_surface.push(na::Point2::new(
                x + yt * f64::sin(theta),
                yc - yt * f64::cos(theta),
            ));
        }

        // Trailing edge -> upper -> leading edge -> lower -> trailing edge
        upper_surface.reverse();
        let mut points = upper_surface;
        points.extend(lower_surface.into_iter().skip(1));
        Ok(points)
    }

    fn describe(&self) -> String {
        format!("NACA {}", self.code)
    }
}

/// Two-column coordinate file, already ordered around the perimeter.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateFile {
    path: PathBuf,
    skiprows: usize,
}

impl CoordinateFile {
    pub fn new(path: impl Into<PathBuf>, skiprows: usize) -> Self {
        CoordinateFile {
            path: path.into(),
            skiprows,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CoordinateSource for CoordinateFile {
    fn coordinates(&self) -> PanelResult<Vec<na::Point2<f64>>> {
        let text = fs::read_to_string(&self.path).map_err(|e| PanelError::io(&self.path, e))?;
        parse_coordinates(&text, self.skiprows, &self.describe())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Parses whitespace-separated `x y` rows after skipping `skiprows` lines.
/// Blank lines and `#` comments are ignored; extra columns are not allowed.
pub fn parse_coordinates(
    text: &str,
    skiprows: usize,
    origin: &str,
) -> PanelResult<Vec<na::Point2<f64>>> {
    let mut points = Vec::new();

    for (line_no, line) in text.lines().enumerate().skip(skiprows) {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(PanelError::InvalidGeometry(format!(
                "{origin}, line {}: expected 2 columns, found {}",
                line_no + 1,
                fields.len()
            )));
        }

        let parse = |s: &str| -> PanelResult<f64> {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    PanelError::InvalidGeometry(format!(
                        "{origin}, line {}: '{s}' is not a finite number",
                        line_no + 1
                    ))
                })
        };
        points.push(na::Point2::new(parse(fields[0])?, parse(fields[1])?));
    }

    if points.len() < 2 {
        return Err(PanelError::InvalidGeometry(format!(
            "{origin}: need at least 2 coordinates, found {}",
            points.len()
        )));
    }

    Ok(points)
}
