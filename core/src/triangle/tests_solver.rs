use crate::config::SolverConfig;
use crate::triangle::error::FeasibilityError;
use crate::triangle::rules::angle_from_cosine_rule;
use crate::triangle::solver::TriangleSolver;
use crate::triangle::types::{Method, Quantity, Triangle, Vertex};

fn sine_ratio_at(t: &Triangle, v: Vertex) -> f64 {
    t.side(v).unwrap() / t.angle(v).unwrap().to_radians().sin()
}

#[test]
fn test_angle_sum_closure() {
    let t = Triangle::new()
        .with_angle(Vertex::A, 50.0)
        .with_angle(Vertex::B, 60.0)
        .with_side(Vertex::A, 10.0);

    let solution = TriangleSolver::solve(t).expect("should solve");
    assert!((solution.triangle.angle_c.unwrap() - 70.0).abs() < 1e-4);
    assert_eq!(solution.steps[0].quantity, Quantity::Angle(Vertex::C));
    assert_eq!(solution.steps[0].method, Method::AngleSum);
    assert!(solution.is_complete());
    assert!(solution.converged);
}

#[test]
fn test_right_triangle_round_trip() {
    let t = Triangle::new()
        .with_side(Vertex::A, 3.0)
        .with_side(Vertex::B, 4.0)
        .with_angle(Vertex::C, 90.0);

    let solution = TriangleSolver::solve(t).expect("should solve");
    let solved = solution.triangle;

    assert!((solved.side_c.unwrap() - 5.0).abs() < 1e-9);
    assert!((solved.angle_a.unwrap() - 0.6f64.asin().to_degrees()).abs() < 1e-9);
    assert!((solved.angle_b.unwrap() - 0.8f64.asin().to_degrees()).abs() < 1e-9);
    assert!((solved.angle_a.unwrap() + solved.angle_b.unwrap() - 90.0).abs() < 1e-9);
    assert_eq!(solution.hypotenuse, Some(Vertex::C));

    let methods: Vec<_> = solution.steps.iter().map(|s| s.method).collect();
    assert_eq!(methods, vec![Method::Pythagorean, Method::Arcsine, Method::Arcsine]);
    assert_eq!(solution.rounds, 1);
}

#[test]
fn test_law_of_cosines_consistency() {
    let t = Triangle::new()
        .with_side(Vertex::A, 5.0)
        .with_side(Vertex::B, 6.0)
        .with_angle(Vertex::C, 60.0);

    let solution = TriangleSolver::solve(t).expect("should solve");
    let c = solution.triangle.side_c.unwrap();
    let expected = 25.0 + 36.0 - 2.0 * 5.0 * 6.0 * 60f64.to_radians().cos();
    assert!((c * c - expected).abs() < 1e-9);

    let rederived = angle_from_cosine_rule(5.0, 6.0, c).unwrap();
    assert!((rederived - 60.0).abs() < 1e-4);
    assert!(solution.is_complete());
}

#[test]
fn test_law_of_sines_ratio_invariance() {
    let t = Triangle::new()
        .with_side(Vertex::A, 7.0)
        .with_angle(Vertex::B, 40.0)
        .with_angle(Vertex::C, 75.0);

    let solution = TriangleSolver::solve(t).expect("should solve");
    let solved = solution.triangle;
    assert!(solved.is_complete());

    let ra = sine_ratio_at(&solved, Vertex::A);
    let rb = sine_ratio_at(&solved, Vertex::B);
    let rc = sine_ratio_at(&solved, Vertex::C);
    assert!((ra - rb).abs() < 1e-6);
    assert!((ra - rc).abs() < 1e-6);
}

#[test]
fn test_ratio_invariance_from_three_sides() {
    let t = Triangle::from_values([Some(7.0), Some(8.0), Some(9.0)], [None, None, None]);
    let solved = TriangleSolver::solve(t).unwrap().triangle;

    let angle_sum = solved.angle_a.unwrap() + solved.angle_b.unwrap() + solved.angle_c.unwrap();
    assert!((angle_sum - 180.0).abs() < 1e-9);

    let ra = sine_ratio_at(&solved, Vertex::A);
    assert!((ra - sine_ratio_at(&solved, Vertex::B)).abs() < 1e-6);
    assert!((ra - sine_ratio_at(&solved, Vertex::C)).abs() < 1e-6);
}

#[test]
fn test_infeasible_sides_rejected() {
    let t = Triangle::from_values([Some(1.0), Some(1.0), Some(5.0)], [None, None, None]);
    assert_eq!(
        TriangleSolver::solve(t),
        Err(FeasibilityError::InvalidTriangleInequality { a: 1.0, b: 1.0, c: 5.0 })
    );
}

#[test]
fn test_infeasible_angles_rejected() {
    let bare = Triangle::new().with_angle(Vertex::A, 100.0).with_angle(Vertex::B, 100.0);
    assert!(matches!(TriangleSolver::solve(bare), Err(FeasibilityError::AngleSumExceeded { .. })));

    let with_side = bare.with_side(Vertex::A, 3.0);
    assert!(matches!(
        TriangleSolver::solve(with_side),
        Err(FeasibilityError::AngleSumExceeded { .. })
    ));
}

#[test]
fn test_insufficient_data_rejected() {
    let single = Triangle::new().with_side(Vertex::B, 4.0);
    assert_eq!(
        TriangleSolver::solve(single),
        Err(FeasibilityError::InsufficientData { known: 1 })
    );

    let pair = Triangle::new().with_side(Vertex::A, 5.0).with_angle(Vertex::A, 30.0);
    assert_eq!(
        TriangleSolver::solve(pair),
        Err(FeasibilityError::InsufficientData { known: 2 })
    );
}

#[test]
fn test_domain_violation_mid_propagation() {
    let t = Triangle::new()
        .with_side(Vertex::C, 3.0)
        .with_side(Vertex::A, 5.0)
        .with_angle(Vertex::C, 90.0);
    let err = TriangleSolver::solve(t).unwrap_err();
    assert_eq!(err.code(), "DOMAIN_VIOLATION");
}

#[test]
fn test_given_leg_longer_than_hypotenuse_rejected() {
    let t = Triangle::new()
        .with_side(Vertex::A, 5.0)
        .with_side(Vertex::B, 1.0)
        .with_side(Vertex::C, 4.5)
        .with_angle(Vertex::C, 90.0);

    match TriangleSolver::solve(t) {
        Err(FeasibilityError::DomainViolation { quantity, .. }) => {
            assert_eq!(quantity, Quantity::Angle(Vertex::A));
        }
        other => panic!("Expected DomainViolation, got {:?}", other),
    }
}

#[test]
fn test_fixed_point_is_stable() {
    let solver = TriangleSolver::default();
    let t = Triangle::new()
        .with_side(Vertex::A, 6.0)
        .with_angle(Vertex::A, 30.0)
        .with_side(Vertex::B, 8.0);

    let solution = solver.run(t).unwrap();
    let extra = solver.round(&solution.triangle).unwrap();
    assert!(!extra.progressed);
    assert!(extra.derivations.is_empty());
    assert_eq!(extra.triangle, solution.triangle);
}

#[test]
fn test_angles_only_settles_without_sides() {
    let t = Triangle::new()
        .with_angle(Vertex::A, 60.0)
        .with_angle(Vertex::B, 60.0)
        .with_angle(Vertex::C, 60.0);

    let solution = TriangleSolver::solve(t).unwrap();
    assert!(solution.steps.is_empty());
    assert_eq!(solution.rounds, 1);
    assert!(solution.converged);
    assert!(!solution.is_complete());
}

#[test]
fn test_multi_round_propagation() {
    // Round 1 finds B by the law of sines, round 2 closes the angles and
    // gets c from the law of cosines
    let t = Triangle::new()
        .with_side(Vertex::A, 6.0)
        .with_angle(Vertex::A, 30.0)
        .with_side(Vertex::B, 8.0);

    let solution = TriangleSolver::solve(t).unwrap();
    assert_eq!(solution.rounds, 2);
    assert!(solution.is_complete());

    let quantities: Vec<_> = solution.steps.iter().map(|s| s.quantity).collect();
    assert_eq!(
        quantities,
        vec![Quantity::Angle(Vertex::B), Quantity::Angle(Vertex::C), Quantity::Side(Vertex::C)]
    );
    assert_eq!(solution.steps[2].method, Method::LawOfCosines);
}

#[test]
fn test_round_cap_returns_partial_result() {
    let config = SolverConfig { max_rounds: 1, ..SolverConfig::default() };
    let solver = TriangleSolver::new(config);
    let t = Triangle::new()
        .with_side(Vertex::A, 6.0)
        .with_angle(Vertex::A, 30.0)
        .with_side(Vertex::B, 8.0);

    let solution = solver.run(t).expect("partial results are not an error");
    assert_eq!(solution.rounds, 1);
    assert_eq!(solution.steps.len(), 1);
    assert!(!solution.converged);
    assert!(!solution.is_complete());
    assert!(solution.triangle.angle_c.is_none());
}

#[test]
fn test_known_values_are_never_overwritten() {
    let t = Triangle::new()
        .with_side(Vertex::A, 3.0)
        .with_side(Vertex::B, 4.0)
        .with_side(Vertex::C, 5.0)
        .with_angle(Vertex::C, 90.0);

    let solution = TriangleSolver::solve(t).unwrap();
    assert_eq!(solution.triangle.side_a, Some(3.0));
    assert_eq!(solution.triangle.side_b, Some(4.0));
    assert_eq!(solution.triangle.side_c, Some(5.0));
    assert_eq!(solution.triangle.angle_c, Some(90.0));
    assert!(solution.steps.iter().all(|s| s.quantity.is_angle()));
}
