//! Feasibility checks run before and after propagation.

use super::error::FeasibilityError;
use super::types::{Triangle, ANGLE_EPSILON};

/// Fewest known values that can pin down a triangle.
pub const MIN_KNOWN_VALUES: usize = 3;

/// Checks run before any rule fires.
///
/// The angle-sum bound is checked first so that two impossible angles are
/// reported as such even when nothing else is known.
pub fn precheck(triangle: &Triangle) -> Result<(), FeasibilityError> {
    check_angle_sum(triangle)?;
    check_minimum_information(triangle)
}

pub fn check_minimum_information(triangle: &Triangle) -> Result<(), FeasibilityError> {
    let known = triangle.known_values_count();
    if known < MIN_KNOWN_VALUES {
        return Err(FeasibilityError::InsufficientData { known });
    }
    Ok(())
}

/// Three known angles must close to 180°; two must leave room for a third.
pub fn check_angle_sum(triangle: &Triangle) -> Result<(), FeasibilityError> {
    let known = triangle.known_angles_count();
    let sum = triangle.known_angle_sum();

    let violated = match known {
        3 => (sum - 180.0).abs() > ANGLE_EPSILON,
        2 => sum >= 180.0,
        _ => false,
    };

    if violated {
        return Err(FeasibilityError::AngleSumExceeded { sum, known });
    }
    Ok(())
}

/// Each side strictly shorter than the sum of the other two. Skipped while any
/// side is still unknown.
pub fn check_triangle_inequality(triangle: &Triangle) -> Result<(), FeasibilityError> {
    let (a, b, c) = match (triangle.side_a, triangle.side_b, triangle.side_c) {
        (Some(a), Some(b), Some(c)) => (a, b, c),
        _ => return Ok(()),
    };

    if a + b > c && b + c > a && a + c > b {
        Ok(())
    } else {
        Err(FeasibilityError::InvalidTriangleInequality { a, b, c })
    }
}

/// Checks run once propagation has finished.
pub fn postcheck(triangle: &Triangle) -> Result<(), FeasibilityError> {
    check_triangle_inequality(triangle)
}
