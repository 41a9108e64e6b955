use clap::ValueEnum;
use strum::Display;

use crate::{
    algorithms::{heap_dijkstra, label_setting, ShortestPathTree},
    network::Network,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[clap(rename_all = "kebab-case")]
pub enum ShortestPathAlgorithm {
    /// Scan list of recently improved labels, no priority queue
    #[strum(serialize = "label-setting")]
    LabelSetting,

    /// Binary heap keyed by tentative cost
    #[default]
    #[strum(serialize = "heap-dijkstra")]
    HeapDijkstra,
}

impl ShortestPathAlgorithm {
    /// Shortest-path tree rooted at the node in position `origin` of [`Network::nodes`].
    pub fn apply(&self, network: &Network, origin: usize) -> ShortestPathTree {
        match self {
            ShortestPathAlgorithm::LabelSetting => label_setting(network, origin),
            ShortestPathAlgorithm::HeapDijkstra => heap_dijkstra(network, origin),
        }
    }
}
