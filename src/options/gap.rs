use clap::ValueEnum;
use strum::Display;

use crate::{
    algorithms::{average_excess_cost, relative_gap},
    network::Network,
    Result,
};

use super::ShortestPathAlgorithm;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[clap(rename_all = "kebab-case")]
pub enum GapFunction {
    #[default]
    #[strum(serialize = "relativeGap")]
    RelativeGap,

    #[strum(serialize = "averageExcessCost")]
    AverageExcessCost,
}

impl GapFunction {
    pub fn apply(&self, network: &Network, algorithm: &ShortestPathAlgorithm) -> Result<f64> {
        match self {
            GapFunction::RelativeGap => relative_gap(network, algorithm),
            GapFunction::AverageExcessCost => average_excess_cost(network, algorithm),
        }
    }
}
