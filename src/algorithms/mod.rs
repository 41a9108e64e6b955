mod all_or_nothing;
mod equilibrium;
mod gap;
mod heap_dijkstra;
mod label_setting;
mod line_search;
mod shortest_path_tree;

pub(crate) use all_or_nothing::*;
pub use equilibrium::{Equilibrium, IterationRecord, Termination};
pub(crate) use equilibrium::user_equilibrium;
pub(crate) use gap::*;
pub(crate) use heap_dijkstra::heap_dijkstra;
pub(crate) use label_setting::label_setting;
pub(crate) use line_search::frank_wolfe_step_size;
pub use shortest_path_tree::ShortestPathTree;
