use crate::{
    network::{Link, Network, NodeId, OdPair},
    Result, SolverError,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

impl Network {
    /// Generates a bidirectional `grid_size` x `grid_size` grid network with random free-flow
    /// times, capacities and demand. Every node is a potential origin and destination.
    pub fn from_random(
        grid_size: usize,
        demand_density: f64,
        range_free_flow_time: (f64, f64),
        range_capacity: (f64, f64),
        range_demand: (f64, f64),
    ) -> Result<Self> {
        Self::from_random_with_rng(
            &mut StdRng::from_entropy(),
            grid_size,
            demand_density,
            range_free_flow_time,
            range_capacity,
            range_demand,
        )
    }

    pub fn from_random_with_rng<R: Rng>(
        rng: &mut R,
        grid_size: usize,
        demand_density: f64,
        range_free_flow_time: (f64, f64),
        range_capacity: (f64, f64),
        range_demand: (f64, f64),
    ) -> Result<Self> {
        if grid_size < 2 {
            return Err(SolverError::NetworkShapeError(format!(
                "a random grid needs at least 2x2 nodes, got {grid_size}x{grid_size}"
            )));
        }
        if !(0.0..=1.0).contains(&demand_density) {
            return Err(SolverError::InvalidOptionError(format!(
                "demand density must lie in [0, 1], got {demand_density}"
            )));
        }
        for (name, (low, high)) in [
            ("free-flow time", range_free_flow_time),
            ("capacity", range_capacity),
            ("demand", range_demand),
        ] {
            if !(low.is_finite() && high.is_finite() && low <= high) {
                return Err(SolverError::InvalidOptionError(format!(
                    "{name} range ({low}, {high}) is empty"
                )));
            }
        }

        let node = |row: usize, column: usize| -> NodeId { row * grid_size + column + 1 };

        let mut links: Vec<Link> = vec![];
        for row in 0..grid_size {
            for column in 0..grid_size {
                let mut neighbours = vec![];
                if column + 1 < grid_size {
                    neighbours.push(node(row, column + 1));
                }
                if row + 1 < grid_size {
                    neighbours.push(node(row + 1, column));
                }
                for neighbour in neighbours {
                    for (tail, head) in [(node(row, column), neighbour), (neighbour, node(row, column))] {
                        links.push(Link::new(
                            tail,
                            head,
                            generate_random_value(rng, range_free_flow_time),
                            generate_random_value(rng, range_capacity),
                        )?);
                    }
                }
            }
        }

        let num_nodes = grid_size * grid_size;
        let od_pairs: Vec<OdPair> = (1..=num_nodes)
            .flat_map(|origin| (1..=num_nodes).map(move |destination| (origin, destination)))
            .filter(|(origin, destination)| origin != destination)
            .filter_map(|(origin, destination)| {
                if rng.gen_bool(demand_density) {
                    Some(OdPair::new(
                        origin,
                        destination,
                        generate_random_value(rng, range_demand),
                    ))
                } else {
                    None
                }
            })
            .collect();

        log::debug!(
            "Generated random grid with {} links and {} OD pairs.",
            links.len(),
            od_pairs.len()
        );
        Network::new(links, od_pairs)
    }
}

fn generate_random_value<R: Rng>(rng: &mut R, range: (f64, f64)) -> f64 {
    rng.gen_range(range.0..=range.1)
}
