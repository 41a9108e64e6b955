use std::{cmp::Ordering, collections::BinaryHeap};

use crate::network::Network;

use super::ShortestPathTree;

#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    cost: f64,
    node: usize,
}

impl Eq for HeapEntry {}

// Reversed so that the max-heap pops the cheapest entry, lower positions first on ties.
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm on a binary heap with lazy deletion. Requires non-negative link costs,
/// which [`crate::Link::validate`] guarantees.
pub(crate) fn heap_dijkstra(network: &Network, origin: usize) -> ShortestPathTree {
    let mut tree = ShortestPathTree::new(origin, network.node_count());
    let mut settled = vec![false; network.node_count()];
    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry {
        cost: 0.0,
        node: origin,
    });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if settled[node] || cost > tree.costs[node] {
            continue;
        }
        settled[node] = true;
        if node != origin && !network.is_through_node(node) {
            continue;
        }
        for &link in network.outgoing(node) {
            let head = network.link_ends[link].1;
            let candidate = cost + network.links[link].cost;
            if candidate < tree.costs[head] {
                tree.costs[head] = candidate;
                tree.predecessors[head] = Some(link);
                heap.push(HeapEntry {
                    cost: candidate,
                    node: head,
                });
            }
        }
    }

    log::trace!(
        "Heap Dijkstra from node {} resulted in labels {:?}",
        network.nodes[origin],
        tree.costs
    );
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algorithms::label_setting, network::Link};
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn setup(seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut network = Network::from_random_with_rng(
            &mut rng,
            6,
            0.1,
            (1.0, 10.0),
            (20.0, 100.0),
            (1.0, 10.0),
        )
        .unwrap();
        let flows: Vec<f64> = (0..network.link_count())
            .map(|_| rng.gen_range(0.0..150.0))
            .collect();
        network.shift_flows(&flows, 1.0).unwrap();
        network
    }

    #[test]
    fn test_matches_label_setting() {
        for seed in 0..5 {
            let network = setup(seed);
            for origin in 0..network.node_count() {
                let heap = heap_dijkstra(&network, origin);
                let labels = label_setting(&network, origin);

                for (a, b) in heap.costs().iter().zip(labels.costs()) {
                    assert_relative_eq!(*a, *b, max_relative = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_matches_label_setting_with_centroids() {
        let network = setup(11).with_first_through_node(8);
        for origin in 0..network.node_count() {
            let heap = heap_dijkstra(&network, origin);
            let labels = label_setting(&network, origin);

            for (a, b) in heap.costs().iter().zip(labels.costs()) {
                assert!(a == b || (a - b).abs() <= 1e-9 * a.abs());
            }
        }
    }

    #[test]
    fn test_ties_give_equal_costs() {
        // two routes of cost 2 from 1 to 4
        let links = vec![
            Link::new(1, 2, 1.0, 100.0).unwrap(),
            Link::new(1, 3, 1.0, 100.0).unwrap(),
            Link::new(2, 4, 1.0, 100.0).unwrap(),
            Link::new(3, 4, 1.0, 100.0).unwrap(),
        ];
        let network = Network::new(links, vec![]).unwrap();

        let heap = heap_dijkstra(&network, 0);
        let labels = label_setting(&network, 0);
        assert_eq!(heap.costs(), labels.costs());
        assert_eq!(Some(2.0), heap.cost_to(&network, 4));
        assert_eq!(2, heap.path_to(&network, 4).unwrap().len());
    }

    #[test]
    fn test_heap_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        for (cost, node) in [(3.0, 0), (1.0, 2), (1.0, 1), (2.0, 5)] {
            heap.push(HeapEntry { cost, node });
        }

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(vec![1, 2, 5, 0], order);
    }
}
