use crate::{Result, SolverError};

use super::{LinkId, Network, NodeId};

/// Modifications applied between solves to study capacity, demand and pricing policies.
///
/// Unknown links and OD pairs are skipped with a warning so that one policy definition can be
/// applied to several networks.
impl Network {
    pub fn expand_capacity(&mut self, link_ids: &[LinkId], factor: f64) -> Result<()> {
        check_factor(factor)?;
        let positions: Vec<usize> = link_ids
            .iter()
            .filter_map(|id| {
                let position = self.link_position(id);
                if position.is_none() {
                    log::warn!("Cannot expand capacity of {id}: no such link.");
                }
                position
            })
            .collect();
        self.rescale_capacities(&positions, factor)
    }

    pub fn scale_capacity(&mut self, factor: f64) -> Result<()> {
        check_factor(factor)?;
        let positions: Vec<usize> = (0..self.link_count()).collect();
        self.rescale_capacities(&positions, factor)
    }

    /// Either every link at `positions` gets its new capacity or none does.
    fn rescale_capacities(&mut self, positions: &[usize], factor: f64) -> Result<()> {
        for &i in positions {
            let capacity = self.links[i].capacity * factor;
            if !(capacity.is_finite() && capacity > 0.0) {
                return Err(SolverError::InvalidCapacityError(self.links[i].id, capacity));
            }
        }
        for &i in positions {
            let link = &mut self.links[i];
            link.capacity *= factor;
            link.update_cost()?;
        }
        Ok(())
    }

    pub fn scale_demand(&mut self, factor: f64) -> Result<()> {
        check_factor(factor)?;
        self.od_pairs
            .values_mut()
            .flat_map(|destinations| destinations.values_mut())
            .for_each(|od| od.demand *= factor);
        Ok(())
    }

    pub fn scale_specific_demand(
        &mut self,
        od_pairs: &[(NodeId, NodeId)],
        factor: f64,
    ) -> Result<()> {
        check_factor(factor)?;
        for (origin, destination) in od_pairs {
            match self.od_pair_mut(*origin, *destination) {
                Some(od) => od.demand *= factor,
                None => log::warn!("Cannot scale demand of ({origin}->{destination}): no such OD pair."),
            }
        }
        Ok(())
    }

    pub fn add_toll(&mut self, link_ids: &[LinkId], toll: f64) -> Result<()> {
        if !(toll.is_finite() && toll >= 0.0) {
            return Err(SolverError::InvalidOptionError(format!(
                "toll {toll} must be a non-negative number"
            )));
        }
        for id in link_ids {
            match self.link_mut(id) {
                Some(link) => {
                    link.toll = toll;
                    link.update_cost()?;
                }
                None => log::warn!("Cannot toll {id}: no such link."),
            }
        }
        Ok(())
    }

    pub fn remove_toll(&mut self, link_ids: &[LinkId]) -> Result<()> {
        self.add_toll(link_ids, 0.0)
    }

    pub fn reset_flows(&mut self) -> Result<()> {
        self.links.iter_mut().try_for_each(|link| {
            link.flow = 0.0;
            link.update_cost()
        })
    }
}

fn check_factor(factor: f64) -> Result<()> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidOptionError(format!(
            "scaling factor {factor} must be positive"
        )))
    }
}
