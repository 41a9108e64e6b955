use crate::network::{LinkId, Network, NodeId};

/// Minimum-cost labels and predecessor links from a single origin.
///
/// Both vectors are indexed by node position in [`Network::nodes`]. Unreachable nodes keep an
/// infinite cost and no predecessor.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub(crate) origin: usize,
    pub(crate) costs: Vec<f64>,
    pub(crate) predecessors: Vec<Option<usize>>,
}

impl ShortestPathTree {
    pub(crate) fn new(origin: usize, node_count: usize) -> Self {
        let mut costs = vec![f64::INFINITY; node_count];
        costs[origin] = 0.0;
        ShortestPathTree {
            origin,
            costs,
            predecessors: vec![None; node_count],
        }
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Predecessor link position (in [`Network::links`]) per node position.
    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessors
    }

    pub fn cost_to(&self, network: &Network, node: NodeId) -> Option<f64> {
        let position = network.node_position(node).ok()?;
        Some(self.costs[position]).filter(|cost| cost.is_finite())
    }

    /// Links of the shortest path to `destination` in travel order.
    pub fn path_to(&self, network: &Network, destination: NodeId) -> Option<Vec<LinkId>> {
        let mut node = network.node_position(destination).ok()?;
        let mut path = vec![];
        while node != self.origin {
            let link = self.predecessors[node]?;
            path.push(network.links[link].id);
            node = network.link_ends[link].0;
        }
        path.reverse();
        Some(path)
    }
}
