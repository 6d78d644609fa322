//! Partial-triangle solver.
//!
//! Given any mix of known sides and angles, repeatedly applies the angle sum,
//! the Pythagorean theorem, the law of cosines and the law of sines until no
//! more values can be derived:
//! - Feasibility checks before and after propagation
//! - Ordered derivation trail for display
//! - Bounded number of rounds

pub mod types;
pub mod error;
pub mod validate;
pub mod rules;
pub mod solver;

#[cfg(test)]
mod tests_solver;

pub use types::{Triangle, Vertex, Quantity, Method, Derivation, ANGLE_EPSILON};
pub use error::FeasibilityError;
pub use rules::{Rule, all_rules};
pub use solver::{TriangleSolver, Solution, SolvePhase, RoundOutcome};
