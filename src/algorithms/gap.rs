use crate::{network::Network, options::ShortestPathAlgorithm, Result, SolverError};

use super::shortest_path_travel_time;

/// Below this the relative gap is not attributed to rounding any more.
const NEGATIVE_GAP_TOLERANCE: f64 = -1e-9;

/// `1 - SPTT / TSTT`. Zero exactly at equilibrium and never negative for a flow pattern that
/// serves the demand, so a negative result is reported as an error instead of being clamped.
pub(crate) fn relative_gap(network: &Network, algorithm: &ShortestPathAlgorithm) -> Result<f64> {
    let total_system_travel_time = network.total_system_travel_time();
    let shortest_path_travel_time = shortest_path_travel_time(network, algorithm)?;

    if total_system_travel_time <= 0.0 {
        if shortest_path_travel_time <= 0.0 {
            return Ok(0.0);
        }
        return Err(SolverError::EmptyLoadingError);
    }

    let gap = 1.0 - shortest_path_travel_time / total_system_travel_time;
    if gap < NEGATIVE_GAP_TOLERANCE {
        log::error!(
            "TSTT {total_system_travel_time} lies below the shortest-path bound {shortest_path_travel_time}."
        );
        return Err(SolverError::NegativeGapError(gap));
    }
    Ok(gap)
}

/// `(TSTT - SPTT) / total demand`, the excess cost of an average traveller.
pub(crate) fn average_excess_cost(
    network: &Network,
    algorithm: &ShortestPathAlgorithm,
) -> Result<f64> {
    let total_demand = network.total_demand();
    if total_demand <= 0.0 {
        return Ok(0.0);
    }
    let shortest_path_travel_time = shortest_path_travel_time(network, algorithm)?;
    Ok((network.total_system_travel_time() - shortest_path_travel_time) / total_demand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Link, OdPair};
    use approx::assert_relative_eq;

    fn setup() -> Network {
        // direct route 20 + 0.2x, detour 10 + 0.1x
        let links = vec![
            Link::new(1, 2, 20.0, 100.0)
                .unwrap()
                .with_shape(1.0, 1.0)
                .unwrap(),
            Link::new(1, 3, 5.0, 100.0)
                .unwrap()
                .with_shape(1.0, 1.0)
                .unwrap(),
            Link::new(3, 2, 5.0, 100.0)
                .unwrap()
                .with_shape(1.0, 1.0)
                .unwrap(),
        ];
        Network::new(links, vec![OdPair::new(1, 2, 200.0)]).unwrap()
    }

    #[test]
    fn test_gap_of_free_flow_loading() {
        let mut network = setup();
        network.shift_flows(&[0.0, 200.0, 200.0], 1.0).unwrap();

        // TSTT = 2 * 200 * 15, SPTT = 200 * 20
        for algorithm in [
            ShortestPathAlgorithm::LabelSetting,
            ShortestPathAlgorithm::HeapDijkstra,
        ] {
            assert_relative_eq!(
                1.0 / 3.0,
                relative_gap(&network, &algorithm).unwrap(),
                max_relative = 1e-12
            );
            assert_relative_eq!(
                10.0,
                average_excess_cost(&network, &algorithm).unwrap(),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_gap_at_equilibrium() {
        let mut network = setup();
        let direct = 100.0 / 3.0;
        network
            .shift_flows(&[direct, 200.0 - direct, 200.0 - direct], 1.0)
            .unwrap();

        let gap = relative_gap(&network, &ShortestPathAlgorithm::default()).unwrap();
        assert!(gap.abs() < 1e-12);
        let excess = average_excess_cost(&network, &ShortestPathAlgorithm::default()).unwrap();
        assert!(excess.abs() < 1e-9);
    }

    #[test]
    fn test_empty_loading() {
        let network = setup();

        assert!(matches!(
            relative_gap(&network, &ShortestPathAlgorithm::default()),
            Err(SolverError::EmptyLoadingError)
        ));
    }

    #[test]
    fn test_no_demand_has_no_gap() {
        let links = vec![Link::new(1, 2, 6.0, 100.0).unwrap()];
        let network = Network::new(links, vec![]).unwrap();

        assert_eq!(0.0, relative_gap(&network, &ShortestPathAlgorithm::default()).unwrap());
        assert_eq!(
            0.0,
            average_excess_cost(&network, &ShortestPathAlgorithm::default()).unwrap()
        );
    }

    #[test]
    fn test_underloaded_network_is_a_negative_gap() {
        let mut network = setup();
        // half the demand is missing from the links
        network.shift_flows(&[0.0, 100.0, 100.0], 1.0).unwrap();

        assert!(matches!(
            relative_gap(&network, &ShortestPathAlgorithm::default()),
            Err(SolverError::NegativeGapError(gap)) if gap < -0.5
        ));
    }
}
