use std::{fs::OpenOptions, io::Write, path::Path};

use serde::Serialize;

use crate::{algorithms::Equilibrium, options::Options, Result};

use super::{Metrics, Network};

#[derive(Serialize, Debug)]
pub struct AssignmentReport {
    node_count: usize,
    link_count: usize,
    od_pair_count: usize,
    total_demand: f64,

    step_rule: String,
    gap_fn: String,
    shortest_path: String,
    max_iterations: usize,
    target_gap: f64,

    termination: String,
    iterations: usize,
    final_gap: f64,
    beckmann_objective: f64,
    metrics: Metrics,

    time_solve: f64,
}

impl AssignmentReport {
    pub fn from_network(
        network: &Network,
        equilibrium: &Equilibrium,
        options: &Options,
    ) -> Result<Self> {
        Ok(AssignmentReport {
            node_count: network.node_count(),
            link_count: network.link_count(),
            od_pair_count: network.od_pairs().count(),
            total_demand: network.total_demand(),

            step_rule: options.step_rule.to_string(),
            gap_fn: options.gap_fn.to_string(),
            shortest_path: options.shortest_path.to_string(),
            max_iterations: options.max_iterations,
            target_gap: options.target_gap,

            termination: equilibrium.termination.to_string(),
            iterations: equilibrium.iterations,
            final_gap: equilibrium.gap,
            beckmann_objective: network.beckmann_objective(),
            metrics: network.metrics()?,

            time_solve: equilibrium
                .trace
                .last()
                .map(|record| record.elapsed_seconds)
                .unwrap_or_default(),
        })
    }
}

impl Network {
    /// Appends a one-line JSON report of a finished solve to `filename`.
    pub fn export(
        &self,
        filename: impl AsRef<Path>,
        equilibrium: &Equilibrium,
        options: &Options,
    ) -> Result<()> {
        let report = AssignmentReport::from_network(self, equilibrium, options)?;
        let json_str = serde_json::to_string(&report)?;
        log::debug!("Appending\n{json_str}\nto {}", filename.as_ref().display());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(filename)?;
        writeln!(file, "{json_str}")?;
        Ok(())
    }
}
