use std::collections::{BTreeMap, HashMap};

use crate::{
    algorithms::{
        all_or_nothing, average_excess_cost, frank_wolfe_step_size, relative_gap,
        shortest_path_travel_time, user_equilibrium, Equilibrium, ShortestPathTree,
    },
    options::{Options, ShortestPathAlgorithm},
    Result, SolverError,
};

use super::{FlowMap, Link, LinkId, NodeId, OdPair};

/// A road network together with its OD demand table.
///
/// The network exclusively owns all flow and cost state. Link costs are kept in sync with link
/// flows by every operation in this crate that changes flows, but direct mutation through
/// [`Network::link_mut`] requires an explicit [`Link::update_cost`] or
/// [`Network::update_costs`] afterwards.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) nodes: Vec<NodeId>,
    pub(crate) node_positions: HashMap<NodeId, usize>,
    pub(crate) links: Vec<Link>,
    pub(crate) link_positions: HashMap<LinkId, usize>,
    /// (tail position, head position) per link
    pub(crate) link_ends: Vec<(usize, usize)>,
    pub(crate) forward_star: Vec<Vec<usize>>,
    pub(crate) od_pairs: BTreeMap<NodeId, BTreeMap<NodeId, OdPair>>,
    pub(crate) first_through_node: NodeId,
}

impl Network {
    pub fn new(links: Vec<Link>, od_pairs: Vec<OdPair>) -> Result<Self> {
        let mut nodes: Vec<NodeId> = links
            .iter()
            .flat_map(|link| [link.id.tail, link.id.head])
            .collect();
        nodes.sort_unstable();
        nodes.dedup();
        let node_positions: HashMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(i, n)| (*n, i)).collect();

        let mut link_positions: HashMap<LinkId, usize> = HashMap::with_capacity(links.len());
        let mut link_ends: Vec<(usize, usize)> = Vec::with_capacity(links.len());
        let mut forward_star: Vec<Vec<usize>> = vec![vec![]; nodes.len()];
        for (i, link) in links.iter().enumerate() {
            if link.id.tail == link.id.head {
                return Err(SolverError::NetworkShapeError(format!(
                    "link {} is a self-loop",
                    link.id
                )));
            }
            if link_positions.insert(link.id, i).is_some() {
                return Err(SolverError::NetworkShapeError(format!(
                    "link {} is defined more than once",
                    link.id
                )));
            }
            let tail = node_positions[&link.id.tail];
            let head = node_positions[&link.id.head];
            link_ends.push((tail, head));
            forward_star[tail].push(i);
        }

        let mut od_table: BTreeMap<NodeId, BTreeMap<NodeId, OdPair>> = BTreeMap::new();
        for od in od_pairs {
            for node in [od.origin, od.destination] {
                if !node_positions.contains_key(&node) {
                    return Err(SolverError::UnknownNodeError(node));
                }
            }
            if !(od.demand.is_finite() && od.demand >= 0.0) {
                return Err(SolverError::InvalidDemandError(
                    od.origin,
                    od.destination,
                    od.demand,
                ));
            }
            if od.origin == od.destination {
                log::debug!("Skipping intrazonal demand {od}.");
                continue;
            }
            let destinations = od_table.entry(od.origin).or_default();
            if destinations.contains_key(&od.destination) {
                return Err(SolverError::NetworkShapeError(format!(
                    "OD pair ({}->{}) is defined more than once",
                    od.origin, od.destination
                )));
            }
            destinations.insert(od.destination, od);
        }

        let mut network = Network {
            nodes,
            node_positions,
            links,
            link_positions,
            link_ends,
            forward_star,
            od_pairs: od_table,
            first_through_node: 0,
        };
        network.update_costs()?;

        log::info!(
            "Constructed network with {} nodes, {} links and {} OD pairs.",
            network.node_count(),
            network.link_count(),
            network.od_pairs().count()
        );
        Ok(network)
    }

    /// Nodes numbered below `first_through_node` are zone centroids: shortest paths may start or
    /// end there, but never pass through them.
    pub fn with_first_through_node(mut self, first_through_node: NodeId) -> Self {
        self.first_through_node = first_through_node;
        self
    }

    pub fn first_through_node(&self) -> NodeId {
        self.first_through_node
    }

    /// Checks that every OD pair with positive demand has a way out of its origin and into its
    /// destination. Full reachability is only established by a shortest-path run.
    pub fn validate_network(&self) -> Result<()> {
        let mut has_incoming = vec![false; self.node_count()];
        self.link_ends
            .iter()
            .for_each(|(_, head)| has_incoming[*head] = true);

        for od in self.od_pairs().filter(|od| od.demand > 0.0) {
            let origin = self.node_position(od.origin)?;
            let destination = self.node_position(od.destination)?;
            if self.forward_star[origin].is_empty() || !has_incoming[destination] {
                log::error!("OD pair {od} cannot be routed.");
                return Err(SolverError::UnreachableDestinationError(
                    od.origin,
                    od.destination,
                ));
            }
        }
        for (origin, destinations) in self.od_pairs.iter() {
            if destinations.values().all(|od| od.demand == 0.0) {
                log::warn!("Origin {origin} has no positive demand.");
            }
        }

        log::info!("Network is valid.");
        Ok(())
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node_position(&self, node: NodeId) -> Result<usize> {
        self.node_positions
            .get(&node)
            .copied()
            .ok_or(SolverError::UnknownNodeError(node))
    }

    pub(crate) fn is_through_node(&self, position: usize) -> bool {
        self.nodes[position] >= self.first_through_node
    }

    pub(crate) fn outgoing(&self, position: usize) -> &[usize] {
        &self.forward_star[position]
    }

    /// Links in a fixed order. Flow vectors passed to and returned from this network are indexed
    /// in this order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.link_positions.get(id).map(|i| &self.links[*i])
    }

    pub fn link_mut(&mut self, id: &LinkId) -> Option<&mut Link> {
        self.link_positions.get(id).map(|i| &mut self.links[*i])
    }

    pub fn link_position(&self, id: &LinkId) -> Option<usize> {
        self.link_positions.get(id).copied()
    }

    pub fn od_pairs(&self) -> impl Iterator<Item = &OdPair> {
        self.od_pairs.values().flat_map(|destinations| destinations.values())
    }

    pub fn od_pair(&self, origin: NodeId, destination: NodeId) -> Option<&OdPair> {
        self.od_pairs.get(&origin)?.get(&destination)
    }

    pub fn od_pair_mut(&mut self, origin: NodeId, destination: NodeId) -> Option<&mut OdPair> {
        self.od_pairs.get_mut(&origin)?.get_mut(&destination)
    }

    pub fn origins(&self) -> impl Iterator<Item = &NodeId> {
        self.od_pairs.keys()
    }

    pub fn total_demand(&self) -> f64 {
        self.od_pairs().map(|od| od.demand).sum()
    }

    /// Recomputes the cost of every link from its current flow.
    pub fn update_costs(&mut self) -> Result<()> {
        self.links.iter_mut().try_for_each(|link| link.update_cost())
    }

    pub fn current_flows(&self) -> Vec<f64> {
        self.links.iter().map(|link| link.flow).collect()
    }

    pub fn flows(&self) -> FlowMap {
        self.links.iter().map(|link| (link.id, link.flow)).collect()
    }

    /// Converts a flow map into a vector in link order. Every link must be present; keys that do
    /// not belong to the network are rejected.
    pub fn flow_vector(&self, flows: &FlowMap) -> Result<Vec<f64>> {
        if let Some(unknown) = flows.keys().find(|id| !self.link_positions.contains_key(id)) {
            return Err(SolverError::UnknownLinkError(*unknown));
        }
        self.links
            .iter()
            .map(|link| {
                flows
                    .get(&link.id)
                    .copied()
                    .ok_or(SolverError::MissingFlowError(link.id))
            })
            .collect()
    }

    /// Replaces every link flow and recomputes costs.
    pub fn set_flows(&mut self, flows: &FlowMap) -> Result<()> {
        let flows = self.flow_vector(flows)?;
        self.links
            .iter_mut()
            .zip(flows)
            .try_for_each(|(link, flow)| {
                link.flow = flow;
                link.update_cost()
            })
    }

    pub fn total_system_travel_time(&self) -> f64 {
        self.links.iter().map(|link| link.flow * link.cost).sum()
    }

    pub fn beckmann_objective(&self) -> f64 {
        self.links
            .iter()
            .map(|link| link.cost_integral_at(link.flow))
            .sum()
    }

    /// Total travel time if every traveller used a shortest path at the current costs.
    pub fn shortest_path_travel_time(&self) -> Result<f64> {
        shortest_path_travel_time(self, &ShortestPathAlgorithm::default())
    }

    pub fn shortest_paths(
        &self,
        origin: NodeId,
        algorithm: &ShortestPathAlgorithm,
    ) -> Result<ShortestPathTree> {
        let origin = self.node_position(origin)?;
        Ok(algorithm.apply(self, origin))
    }

    /// Routes every OD pair's demand along its shortest path at the current costs and returns
    /// the resulting flow per link, in link order. The network itself is left unchanged.
    pub fn all_or_nothing(&self, algorithm: &ShortestPathAlgorithm) -> Result<Vec<f64>> {
        all_or_nothing(self, algorithm)
    }

    /// Moves every link flow towards `target` by `step_size` and recomputes costs.
    pub fn shift_flows(&mut self, target: &[f64], step_size: f64) -> Result<()> {
        self.check_flow_vector(target)?;
        if !(0.0..=1.0).contains(&step_size) {
            return Err(SolverError::InvalidOptionError(format!(
                "step size {step_size} lies outside [0, 1]"
            )));
        }
        self.links
            .iter_mut()
            .zip(target)
            .try_for_each(|(link, target_flow)| {
                link.flow = (1.0 - step_size) * link.flow + step_size * target_flow;
                link.update_cost()
            })
    }

    /// Step size minimizing the Beckmann objective on the segment from the current flows to
    /// `target`, found by bisection down to `tolerance`.
    pub fn frank_wolfe_step_size(&self, target: &[f64], tolerance: f64) -> Result<f64> {
        self.check_flow_vector(target)?;
        frank_wolfe_step_size(self, target, tolerance)
    }

    pub fn user_equilibrium(&mut self, options: &Options) -> Result<Equilibrium> {
        user_equilibrium(self, options)
    }

    pub fn relative_gap(&self) -> Result<f64> {
        relative_gap(self, &ShortestPathAlgorithm::default())
    }

    pub fn average_excess_cost(&self) -> Result<f64> {
        average_excess_cost(self, &ShortestPathAlgorithm::default())
    }

    fn check_flow_vector(&self, flows: &[f64]) -> Result<()> {
        if flows.len() != self.link_count() {
            return Err(SolverError::NetworkShapeError(format!(
                "expected {} link flows, got {}",
                self.link_count(),
                flows.len()
            )));
        }
        if let Some(i) = flows.iter().position(|f| !(f.is_finite() && *f >= 0.0)) {
            return Err(SolverError::InvalidLinkParameterError(
                self.links[i].id,
                format!("target flow {} is not a non-negative number", flows[i]),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn setup() -> Network {
        let links = vec![
            Link::new(1, 2, 6.0, 100.0).unwrap(),
            Link::new(2, 1, 6.0, 100.0).unwrap(),
            Link::new(1, 3, 4.0, 50.0).unwrap(),
            Link::new(3, 2, 4.0, 50.0).unwrap(),
        ];
        let od_pairs = vec![OdPair::new(1, 2, 50.0), OdPair::new(2, 1, 10.0)];
        Network::new(links, od_pairs).unwrap()
    }

    #[test]
    fn test_construction() {
        let network = setup();

        assert_eq!(vec![1, 2, 3], network.nodes());
        assert_eq!(4, network.link_count());
        assert_eq!(2, network.od_pairs().count());
        assert_eq!(60.0, network.total_demand());
        assert!(network.links().iter().all(|l| l.flow == 0.0));
        assert_eq!(Some(2), network.link_position(&LinkId::new(1, 3)));
    }

    #[test]
    fn test_duplicate_link_fails() {
        let links = vec![
            Link::new(1, 2, 6.0, 100.0).unwrap(),
            Link::new(1, 2, 3.0, 100.0).unwrap(),
        ];
        assert!(matches!(
            Network::new(links, vec![]),
            Err(SolverError::NetworkShapeError(_))
        ));
    }

    #[test]
    fn test_unknown_od_node_fails() {
        let links = vec![Link::new(1, 2, 6.0, 100.0).unwrap()];
        assert!(matches!(
            Network::new(links, vec![OdPair::new(1, 7, 5.0)]),
            Err(SolverError::UnknownNodeError(7))
        ));
    }

    #[test]
    fn test_negative_demand_fails() {
        let links = vec![Link::new(1, 2, 6.0, 100.0).unwrap()];
        assert!(matches!(
            Network::new(links, vec![OdPair::new(1, 2, -5.0)]),
            Err(SolverError::InvalidDemandError(1, 2, _))
        ));
    }

    #[test]
    fn test_intrazonal_demand_is_dropped() {
        let links = vec![Link::new(1, 2, 6.0, 100.0).unwrap()];
        let network = Network::new(links, vec![OdPair::new(1, 1, 5.0)]).unwrap();

        assert_eq!(0, network.od_pairs().count());
    }

    #[test]
    fn test_set_flows_updates_costs() {
        let mut network = setup();
        let mut flows = network.flows();
        flows.insert(LinkId::new(1, 2), 100.0);
        network.set_flows(&flows).unwrap();

        let link = network.link(&LinkId::new(1, 2)).unwrap();
        assert_eq!(100.0, link.flow);
        assert_relative_eq!(6.9, link.cost, max_relative = 1e-12);
    }

    #[test]
    fn test_set_flows_requires_every_link() {
        let mut network = setup();
        let mut flows = network.flows();
        flows.remove(&LinkId::new(3, 2));

        assert!(matches!(
            network.set_flows(&flows),
            Err(SolverError::MissingFlowError(id)) if id == LinkId::new(3, 2)
        ));

        let mut flows = network.flows();
        flows.insert(LinkId::new(3, 1), 1.0);
        assert!(matches!(
            network.set_flows(&flows),
            Err(SolverError::UnknownLinkError(_))
        ));
    }

    #[test]
    fn test_shift_flows() {
        let mut network = setup();
        let target = vec![100.0, 0.0, 40.0, 20.0];

        network.shift_flows(&target, 0.25).unwrap();
        assert_eq!(vec![25.0, 0.0, 10.0, 5.0], network.current_flows());

        let after_first = network.current_flows();
        network.shift_flows(&target, 0.0).unwrap();
        assert_eq!(after_first, network.current_flows());

        network.shift_flows(&target, 1.0).unwrap();
        assert_eq!(target, network.current_flows());
        for link in network.links() {
            assert_eq!(link.cost_at(link.flow), link.cost);
        }
    }

    #[test]
    fn test_shift_flows_rejects_bad_input() {
        let mut network = setup();

        assert!(network.shift_flows(&[1.0, 2.0], 0.5).is_err());
        assert!(network.shift_flows(&[1.0, 2.0, 3.0, 4.0], 1.5).is_err());
        assert!(network.shift_flows(&[1.0, -2.0, 3.0, 4.0], 0.5).is_err());
    }

    #[test]
    fn test_validate_network() {
        let network = setup();
        assert!(network.validate_network().is_ok());

        let links = vec![
            Link::new(1, 2, 6.0, 100.0).unwrap(),
            Link::new(3, 2, 6.0, 100.0).unwrap(),
        ];
        let network = Network::new(links, vec![OdPair::new(2, 1, 5.0)]).unwrap();
        assert!(matches!(
            network.validate_network(),
            Err(SolverError::UnreachableDestinationError(2, 1))
        ));
    }

    #[test]
    fn test_beckmann_objective() {
        let mut network = setup();
        network.shift_flows(&[100.0, 0.0, 0.0, 0.0], 1.0).unwrap();

        // 6 * (100 + 0.15 * 100 / 5)
        assert_relative_eq!(618.0, network.beckmann_objective(), max_relative = 1e-12);
        assert_relative_eq!(690.0, network.total_system_travel_time(), max_relative = 1e-12);
    }
}
