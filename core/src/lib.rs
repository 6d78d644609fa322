pub mod config;
pub mod triangle;

pub use config::{ConfigError, SolverConfig};
pub use triangle::{
    Derivation, FeasibilityError, Method, Quantity, Solution, Triangle, TriangleSolver, Vertex,
};

pub fn version() -> &'static str {
    "0.1.0"
}
