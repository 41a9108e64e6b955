use serde::Serialize;

use crate::Result;

use super::Network;

#[derive(Debug, Clone, Serialize)]
pub struct Metrics {
    pub total_system_travel_time: f64,
    pub average_cost: f64,
    pub max_utilisation: f64,
    pub congested_links: usize,
    pub total_demand: f64,
    pub relative_gap: f64,
    pub average_excess_cost: f64,
}

impl Network {
    /// Summary measures of the current flow pattern.
    pub fn metrics(&self) -> Result<Metrics> {
        let total_system_travel_time = self.total_system_travel_time();
        let total_flow: f64 = self.links.iter().map(|link| link.flow).sum();
        let average_cost = if total_flow > 0.0 {
            total_system_travel_time / total_flow
        } else {
            0.0
        };

        Ok(Metrics {
            total_system_travel_time,
            average_cost,
            max_utilisation: self
                .links
                .iter()
                .map(|link| link.utilisation())
                .fold(0.0, f64::max),
            congested_links: self
                .links
                .iter()
                .filter(|link| link.utilisation() > 1.0)
                .count(),
            total_demand: self.total_demand(),
            relative_gap: self.relative_gap()?,
            average_excess_cost: self.average_excess_cost()?,
        })
    }
}
