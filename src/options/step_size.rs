use clap::ValueEnum;
use strum::Display;

use crate::{algorithms::frank_wolfe_step_size, network::Network, Result};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[clap(rename_all = "kebab-case")]
pub enum StepSizeRule {
    /// Exact line search on the Beckmann objective
    #[default]
    #[value(alias = "fw")]
    #[strum(serialize = "FW")]
    FrankWolfe,

    /// Diminishing step 1/(k+1)
    #[value(alias = "msa")]
    #[strum(serialize = "MSA")]
    SuccessiveAverages,
}

impl StepSizeRule {
    /// Step size for the 1-based `iteration`, moving from the current flows towards `target`.
    pub fn apply(
        &self,
        network: &Network,
        target: &[f64],
        iteration: usize,
        tolerance: f64,
    ) -> Result<f64> {
        match self {
            StepSizeRule::FrankWolfe => frank_wolfe_step_size(network, target, tolerance),
            StepSizeRule::SuccessiveAverages => Ok(1.0 / (iteration as f64 + 1.0)),
        }
    }
}
