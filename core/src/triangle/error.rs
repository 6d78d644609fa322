use super::types::Quantity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a set of measurements cannot be solved into a real triangle.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeasibilityError {
    #[error("at least 3 known values are required, got {known}")]
    InsufficientData { known: usize },

    #[error("{known} known angles sum to {sum}°, which cannot close a triangle")]
    AngleSumExceeded { sum: f64, known: usize },

    #[error("sides {a}, {b}, {c} violate the triangle inequality")]
    InvalidTriangleInequality { a: f64, b: f64, c: f64 },

    #[error("cannot derive {quantity}: {reason}")]
    DomainViolation { quantity: Quantity, reason: String },
}

impl FeasibilityError {
    /// Stable identifier for API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "INSUFFICIENT_DATA",
            Self::AngleSumExceeded { .. } => "ANGLE_SUM_EXCEEDED",
            Self::InvalidTriangleInequality { .. } => "INVALID_TRIANGLE",
            Self::DomainViolation { .. } => "DOMAIN_VIOLATION",
        }
    }

    pub(crate) fn domain(quantity: Quantity, reason: impl Into<String>) -> Self {
        Self::DomainViolation { quantity, reason: reason.into() }
    }
}
