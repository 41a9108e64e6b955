use std::fmt::Display;

use super::NodeId;

#[derive(Debug, Clone)]
pub struct OdPair {
    pub origin: NodeId,
    pub destination: NodeId,
    pub demand: f64,
}

impl OdPair {
    pub fn new(origin: NodeId, destination: NodeId, demand: f64) -> Self {
        OdPair {
            origin,
            destination,
            demand,
        }
    }
}

impl Display for OdPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}->{}: {})", self.origin, self.destination, self.demand)
    }
}
