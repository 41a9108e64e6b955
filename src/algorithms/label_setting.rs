use std::collections::VecDeque;

use crate::network::Network;

use super::ShortestPathTree;

/// Shortest paths without a priority queue: nodes whose label improved are appended to a scan
/// list and relaxed in FIFO order until no label changes.
pub(crate) fn label_setting(network: &Network, origin: usize) -> ShortestPathTree {
    let mut tree = ShortestPathTree::new(origin, network.node_count());
    let mut scan_list: VecDeque<usize> = VecDeque::from([origin]);
    let mut in_scan_list = vec![false; network.node_count()];
    in_scan_list[origin] = true;

    while let Some(node) = scan_list.pop_front() {
        in_scan_list[node] = false;
        if node != origin && !network.is_through_node(node) {
            continue;
        }
        let label = tree.costs[node];
        for &link in network.outgoing(node) {
            let head = network.link_ends[link].1;
            let candidate = label + network.links[link].cost;
            if candidate < tree.costs[head] {
                tree.costs[head] = candidate;
                tree.predecessors[head] = Some(link);
                if !in_scan_list[head] {
                    scan_list.push_back(head);
                    in_scan_list[head] = true;
                }
            }
        }
    }

    log::trace!(
        "Label setting from node {} resulted in labels {:?}",
        network.nodes[origin],
        tree.costs
    );
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Link, LinkId};

    fn setup() -> Network {
        let links = vec![
            Link::new(1, 2, 1.0, 100.0).unwrap(),
            Link::new(2, 3, 1.0, 100.0).unwrap(),
            Link::new(1, 3, 5.0, 100.0).unwrap(),
            Link::new(3, 4, 2.0, 100.0).unwrap(),
            Link::new(5, 1, 1.0, 100.0).unwrap(),
        ];
        Network::new(links, vec![]).unwrap()
    }

    #[test]
    fn test_labels() {
        let network = setup();
        let tree = label_setting(&network, network.node_position(1).unwrap());

        assert_eq!(Some(0.0), tree.cost_to(&network, 1));
        assert_eq!(Some(2.0), tree.cost_to(&network, 3));
        assert_eq!(Some(4.0), tree.cost_to(&network, 4));
        assert_eq!(
            Some(vec![LinkId::new(1, 2), LinkId::new(2, 3), LinkId::new(3, 4)]),
            tree.path_to(&network, 4)
        );
    }

    #[test]
    fn test_unreachable_node() {
        let network = setup();
        let tree = label_setting(&network, network.node_position(1).unwrap());
        let position = network.node_position(5).unwrap();

        assert_eq!(f64::INFINITY, tree.costs()[position]);
        assert_eq!(None, tree.predecessors()[position]);
        assert_eq!(None, tree.cost_to(&network, 5));
        assert_eq!(None, tree.path_to(&network, 5));
    }

    #[test]
    fn test_centroids_are_not_passed_through() {
        let network = setup().with_first_through_node(3);
        let tree = label_setting(&network, network.node_position(1).unwrap());

        // node 2 is still reachable as a destination
        assert_eq!(Some(1.0), tree.cost_to(&network, 2));
        assert_eq!(Some(5.0), tree.cost_to(&network, 3));
        assert_eq!(Some(vec![LinkId::new(1, 3)]), tree.path_to(&network, 3));
    }

    #[test]
    fn test_centroid_ends_onward_paths() {
        let network = setup().with_first_through_node(3);
        let tree = label_setting(&network, network.node_position(5).unwrap());

        assert_eq!(Some(1.0), tree.cost_to(&network, 1));
        assert_eq!(None, tree.cost_to(&network, 3));
    }
}
