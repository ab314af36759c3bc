//! Straight-line panels and the discretization of a raw contour into them.

use crate::error::{PanelError, PanelResult};
use nalgebra as na;
use std::f64::consts::PI;
use std::fmt;

/// Which side of the airfoil a panel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceLoc {
    Upper,
    Lower,
}

impl SurfaceLoc {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceLoc::Upper => "upper",
            SurfaceLoc::Lower => "lower",
        }
    }
}

impl fmt::Display for SurfaceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub start: na::Point2<f64>,
    pub end: na::Point2<f64>,
    pub control_point: na::Point2<f64>,
    /// Outward unit normal, `(cos beta, sin beta)`.
    pub normal: na::Vector2<f64>,
    /// Unit vector along the traversal direction, `(-sin beta, cos beta)`.
    pub tangent: na::Vector2<f64>,
    pub length: f64,
    /// Angle from the +x axis to the outward normal, in `[0, 2pi)`.
    pub beta: f64,
    pub loc: SurfaceLoc,
    pub source_strength: f64,
    pub vt: f64,
    pub cp: f64,
}

impl Panel {
    /// Builds a panel on a counter-clockwise contour, so the outward normal is
    /// the right-hand normal of the segment.
    pub fn new(start: na::Point2<f64>, end: na::Point2<f64>) -> Self {
        let midpoint = na::Point2::new((start.x + end.x) * 0.5, (start.y + end.y) * 0.5);

        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = (dx * dx + dy * dy).sqrt();

        let beta = f64::atan2(-dx, dy).rem_euclid(2.0 * PI);
        let normal = na::Vector2::new(beta.cos(), beta.sin());
        let tangent = na::Vector2::new(-beta.sin(), beta.cos());

        let loc = if normal.y >= 0.0 {
            SurfaceLoc::Upper
        } else {
            SurfaceLoc::Lower
        };

        Panel {
            start,
            end,
            control_point: midpoint,
            normal,
            tangent,
            length,
            beta,
            loc,
            source_strength: 0.0,
            vt: 0.0,
            cp: 0.0,
        }
    }
}

/// Twice the signed area of the closed polygon; positive when counter-clockwise.
fn signed_area2(points: &[na::Point2<f64>]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Resamples a raw contour into exactly `n` panels.
///
/// Node abscissae come from cosine spacing on a circle whose diameter is the
/// chord; ordinates are interpolated along the contour, which is walked once
/// from its first point. Clockwise contours are reversed first so every
/// panel normal points out of the body, and an open trailing edge is closed
/// by moving both of its endpoints to their midpoint.
pub fn panelize(raw: &[na::Point2<f64>], n: usize) -> PanelResult<Vec<Panel>> {
    if n < 3 {
        return Err(PanelError::InvalidGeometry(format!(
            "need at least 3 panels, got {n}"
        )));
    }
    if raw.len() < 2 {
        return Err(PanelError::InvalidGeometry(format!(
            "need at least 2 boundary points, got {}",
            raw.len()
        )));
    }

    let mut contour = raw.to_vec();
    if signed_area2(&contour) < 0.0 {
        contour.reverse();
    }
    // A trailing-edge gap is closed at its midpoint, so both trailing-edge
    // panels meet at one node
    let last = contour.len() - 1;
    if contour[0] != contour[last] {
        let joint = na::center(&contour[0], &contour[last]);
        contour[0] = joint;
        contour[last] = joint;
    }

    let x_min = contour.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let x_max = contour.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let radius = (x_max - x_min) / 2.0;
    let x_center = (x_max + x_min) / 2.0;
    if !(radius > 0.0) {
        return Err(PanelError::InvalidGeometry(format!(
            "contour has zero chord (x in [{x_min}, {x_max}])"
        )));
    }

    // Nodes on the first half of the circle lie on the stretch before the
    // leading edge, the rest after it
    let leading_edge = contour
        .iter()
        .enumerate()
        .fold(0, |best, (i, p)| if p.x < contour[best].x { i } else { best });

    let mut nodes = Vec::with_capacity(n + 1);
    let mut seg = 0;
    for i in 0..n {
        let theta = 2.0 * PI * i as f64 / n as f64;
        // Pin the extremes so rounding never leaves the contour's x-range
        let x = (x_center + radius * theta.cos()).clamp(x_min, x_max);

        let (lo, hi) = if 2 * i <= n {
            (0, leading_edge)
        } else {
            (leading_edge, last)
        };
        seg = seg.max(lo);
        while seg < hi {
            let (a, b) = (contour[seg], contour[seg + 1]);
            if (a.x <= x && x <= b.x) || (b.x <= x && x <= a.x) {
                break;
            }
            seg += 1;
        }
        if seg >= hi {
            return Err(PanelError::InvalidGeometry(format!(
                "node {i} at x = {x} is not bracketed by the contour; points must \
                 run once around the perimeter starting at the trailing edge"
            )));
        }

        let (a, b) = (contour[seg], contour[seg + 1]);
        let dx = b.x - a.x;
        let y = if dx.abs() <= f64::EPSILON * radius {
            a.y
        } else {
            a.y + (b.y - a.y) * (x - a.x) / dx
        };
        nodes.push(na::Point2::new(x, y));
    }
    nodes.push(nodes[0]);

    // Coincident nodes survive rounding as lengths of a few ulps
    let min_length = 1e-12 * (x_max - x_min);
    nodes
        .windows(2)
        .enumerate()
        .map(|(index, pts)| {
            let panel = Panel::new(pts[0], pts[1]);
            if panel.length > min_length {
                Ok(panel)
            } else {
                Err(PanelError::DegeneratePanel {
                    index,
                    length: panel.length,
                })
            }
        })
        .collect()
}
