//! End-to-end behaviour of the panel method on NACA sections.

use approx::assert_abs_diff_eq;
use panelflow::output::format_cp;
use panelflow::{
    AeroCoefficients, Airfoil, CoordinateFile, CoordinateSource, Freestream, Method, Naca4,
    PanelError, SurfaceLoc,
};
use std::path::PathBuf;

fn solve_naca(code: &str, n: usize, alpha: f64, method: Method) -> Airfoil {
    let source = Naca4::new(code, n + 1, true).unwrap();
    let freestream = Freestream::new(1.0, alpha).unwrap();
    Airfoil::analyze(&source, n, freestream, method).unwrap().0
}

fn circulation_lift(source: &dyn CoordinateSource, n: usize, alpha: f64) -> f64 {
    let freestream = Freestream::new(1.0, alpha).unwrap();
    let (airfoil, solution) =
        Airfoil::analyze(source, n, freestream, Method::SourceVortex).unwrap();
    AeroCoefficients::compute(&airfoil, &solution).cl_circulation
}

fn net_source(n: usize, alpha: f64, method: Method) -> f64 {
    solve_naca("0012", n, alpha, method)
        .panels()
        .iter()
        .map(|p| p.source_strength * p.length)
        .sum()
}

fn surface_cp(airfoil: &Airfoil, loc: SurfaceLoc) -> Vec<f64> {
    airfoil
        .panels()
        .iter()
        .filter(|p| p.loc == loc)
        .map(|p| p.cp)
        .collect()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn test_symmetric_section_has_mirrored_cp() {
    let airfoil = solve_naca("0012", 100, 0.0, Method::SourceVortex);
    let panels = airfoil.panels();
    let n = panels.len();

    for k in 0..n / 2 {
        let upper = &panels[k];
        let lower = &panels[n - 1 - k];
        assert_eq!(upper.loc, SurfaceLoc::Upper);
        assert_eq!(lower.loc, SurfaceLoc::Lower);
        assert_abs_diff_eq!(upper.control_point.x, lower.control_point.x, epsilon = 1e-12);
        assert_abs_diff_eq!(upper.cp, lower.cp, epsilon = 1e-8);
    }
}

#[test]
fn test_naca0012_zero_incidence_distribution() {
    let airfoil = solve_naca("0012", 100, 0.0, Method::SourceVortex);
    let panels = airfoil.panels();

    let stagnation = panels
        .iter()
        .max_by(|a, b| a.cp.total_cmp(&b.cp))
        .unwrap();
    assert!(stagnation.cp > 0.9 && stagnation.cp <= 1.0, "{}", stagnation.cp);
    assert!(stagnation.control_point.x < 0.01);

    let suction = panels
        .iter()
        .min_by(|a, b| a.cp.total_cmp(&b.cp))
        .unwrap();
    assert!(suction.cp < -0.3 && suction.cp > -0.6, "{}", suction.cp);
    let x = suction.control_point.x;
    assert!(x > 0.05 && x < 0.4, "suction peak at x = {x}");

    assert_eq!(surface_cp(&airfoil, SurfaceLoc::Upper).len(), 50);
    assert_eq!(surface_cp(&airfoil, SurfaceLoc::Lower).len(), 50);
}

#[test]
fn test_incidence_lowers_upper_surface_pressure() {
    let airfoil = solve_naca("0012", 100, 4.0, Method::SourceVortex);
    let upper = surface_cp(&airfoil, SurfaceLoc::Upper);
    let lower = surface_cp(&airfoil, SurfaceLoc::Lower);

    let min = |v: &[f64]| v.iter().copied().fold(f64::INFINITY, f64::min);
    let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
    assert!(min(&upper) < min(&lower));
    assert!(mean(&upper) < mean(&lower));
    assert!(min(&upper) < -1.0);
}

#[test]
fn test_closed_body_has_no_net_source() {
    for method in [Method::Source, Method::SourceVortex] {
        for alpha in [0.0, 4.0] {
            let coarse = net_source(100, alpha, method);
            let fine = net_source(200, alpha, method);
            assert!(coarse.abs() < 3e-3, "{method} alpha={alpha}: {coarse}");
            // First-order discretisation error: halves with the panel size
            assert!(
                fine.abs() < 0.6 * coarse.abs(),
                "{method} alpha={alpha}: {fine} vs {coarse}"
            );
        }
    }
}

#[test]
fn test_solver_is_deterministic() {
    let first = solve_naca("2412", 80, 3.0, Method::SourceVortex);
    let second = solve_naca("2412", 80, 3.0, Method::SourceVortex);
    assert_eq!(format_cp(first.panels()), format_cp(second.panels()));
}

#[test]
fn test_lift_grows_with_incidence() {
    let mut previous = f64::NEG_INFINITY;
    for alpha in [0.0, 2.0, 4.0, 6.0, 8.0, 10.0] {
        let source = Naca4::new("0012", 101, true).unwrap();
        let freestream = Freestream::new(1.0, alpha).unwrap();
        let (airfoil, solution) =
            Airfoil::analyze(&source, 100, freestream, Method::SourceVortex).unwrap();
        let cl = AeroCoefficients::compute(&airfoil, &solution).cl_circulation;
        assert!(cl > previous, "alpha={alpha}: cl {cl} <= {previous}");
        previous = cl;
    }
}

#[test]
fn test_coordinate_file_matches_generator() {
    let freestream = Freestream::new(1.0, 2.0).unwrap();
    let file = CoordinateFile::new(fixture("naca0012.dat"), 1);
    let (from_file, file_solution) =
        Airfoil::analyze(&file, 60, freestream, Method::SourceVortex).unwrap();

    let naca = Naca4::new("0012", 81, true).unwrap();
    let (generated, generated_solution) =
        Airfoil::analyze(&naca, 60, freestream, Method::SourceVortex).unwrap();

    for (a, b) in from_file.panels().iter().zip(generated.panels()) {
        assert_eq!(a.loc, b.loc);
        assert_abs_diff_eq!(a.cp, b.cp, epsilon = 0.05);
    }

    let cl_file = AeroCoefficients::compute(&from_file, &file_solution).cl;
    let cl_generated = AeroCoefficients::compute(&generated, &generated_solution).cl;
    assert_abs_diff_eq!(cl_file, cl_generated, epsilon = 1e-3);
}

#[test]
fn test_open_trailing_edge_lift_converges() {
    let sharp = Naca4::new("0012", 101, true).unwrap();
    let reference = circulation_lift(&sharp, 100, 4.0);

    let coarse = circulation_lift(&Naca4::new("0012", 101, false).unwrap(), 100, 4.0);
    let fine = circulation_lift(&Naca4::new("0012", 201, false).unwrap(), 200, 4.0);
    assert_abs_diff_eq!(coarse, reference, epsilon = 0.02);
    assert_abs_diff_eq!(fine, reference, epsilon = 0.02);
    assert_abs_diff_eq!(fine, coarse, epsilon = 0.01);
}

#[test]
fn test_open_trailing_edge_file_matches_generator() {
    let freestream = Freestream::new(1.0, 2.0).unwrap();
    let file = CoordinateFile::new(fixture("naca0012_open.dat"), 1);
    let (from_file, file_solution) =
        Airfoil::analyze(&file, 60, freestream, Method::SourceVortex).unwrap();

    let panels = from_file.panels();
    let trailing_edge = panels[0].start;
    assert_eq!(panels[panels.len() - 1].end, trailing_edge);
    assert_eq!(panels[panels.len() - 1].loc, SurfaceLoc::Lower);
    assert_abs_diff_eq!(trailing_edge.y, 0.0, epsilon = 1e-12);

    let naca = Naca4::new("0012", 81, false).unwrap();
    let (generated, generated_solution) =
        Airfoil::analyze(&naca, 60, freestream, Method::SourceVortex).unwrap();
    for (a, b) in panels.iter().zip(generated.panels()) {
        assert_eq!(a.loc, b.loc);
        assert_abs_diff_eq!(a.cp, b.cp, epsilon = 0.05);
    }

    let cl_file = AeroCoefficients::compute(&from_file, &file_solution).cl;
    let cl_generated = AeroCoefficients::compute(&generated, &generated_solution).cl;
    assert_abs_diff_eq!(cl_file, cl_generated, epsilon = 1e-3);
}

#[test]
fn test_header_must_be_skipped() {
    let file = CoordinateFile::new(fixture("naca0012.dat"), 0);
    let freestream = Freestream::new(1.0, 0.0).unwrap();
    let result = Airfoil::analyze(&file, 40, freestream, Method::SourceVortex);
    assert!(matches!(result, Err(PanelError::InvalidGeometry(_))));
}

#[test]
fn test_two_panels_are_rejected() {
    let source = Naca4::new("0012", 3, true).unwrap();
    let freestream = Freestream::new(1.0, 0.0).unwrap();
    let result = Airfoil::analyze(&source, 2, freestream, Method::SourceVortex);
    assert!(matches!(result, Err(PanelError::InvalidGeometry(_))));
}
