mod algorithms;
mod network;
mod options;
mod util;

pub use algorithms::{Equilibrium, IterationRecord, ShortestPathTree, Termination};
pub use network::*;
pub use options::*;
pub use util::{approx_equal, Result, SolverError};
