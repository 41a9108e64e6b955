mod error_handling;
pub mod random_network;
mod tolerance;

pub use error_handling::{Result, SolverError};
pub use tolerance::approx_equal;
