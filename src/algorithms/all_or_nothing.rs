use crate::{network::Network, options::ShortestPathAlgorithm, Result, SolverError};

/// Assigns the demand of every OD pair to its shortest path at the current link costs. One
/// shortest-path tree is built per origin that has positive demand.
pub(crate) fn all_or_nothing(
    network: &Network,
    algorithm: &ShortestPathAlgorithm,
) -> Result<Vec<f64>> {
    let mut flows = vec![0.0; network.link_count()];

    for (origin, destinations) in network.od_pairs.iter() {
        if destinations.values().all(|od| od.demand == 0.0) {
            continue;
        }
        let origin_position = network.node_position(*origin)?;
        let tree = algorithm.apply(network, origin_position);

        for od in destinations.values().filter(|od| od.demand > 0.0) {
            let mut node = network.node_position(od.destination)?;
            while node != origin_position {
                let link = tree.predecessors[node].ok_or(
                    SolverError::UnreachableDestinationError(od.origin, od.destination),
                )?;
                flows[link] += od.demand;
                node = network.link_ends[link].0;
            }
        }
    }

    Ok(flows)
}

/// Total travel time if every OD pair travelled at its current shortest-path cost.
pub(crate) fn shortest_path_travel_time(
    network: &Network,
    algorithm: &ShortestPathAlgorithm,
) -> Result<f64> {
    let mut total = 0.0;
    for (origin, destinations) in network.od_pairs.iter() {
        if destinations.values().all(|od| od.demand == 0.0) {
            continue;
        }
        let tree = algorithm.apply(network, network.node_position(*origin)?);

        for od in destinations.values().filter(|od| od.demand > 0.0) {
            let cost = tree.costs[network.node_position(od.destination)?];
            if !cost.is_finite() {
                return Err(SolverError::UnreachableDestinationError(
                    od.origin,
                    od.destination,
                ));
            }
            total += od.demand * cost;
        }
    }
    Ok(total)
}
