//! Sort primitives shared by several heuristics: a stable by-weight layer
//! sort, a by-degree sort, and (via [`crate::rng::Rng`]) a seeded random
//! permutation.

use crate::graph::{Graph, NodeId};

/// Stably sorts `layer`'s nodes by `Node::weight` (ties preserve the
/// current order) and reassigns `position` to match the new slot order.
pub fn layer_sort(graph: &mut Graph, layer: usize) {
    let mut order = graph.layer(layer).node_ids.clone();
    order.sort_by(|&a, &b| {
        graph
            .node(a)
            .weight
            .partial_cmp(&graph.node(b).weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    graph.set_layer_order(layer, order);
}

/// Sorts `ids` by ascending `up_degree + down_degree`.
pub fn sort_by_degree(graph: &Graph, ids: &mut [NodeId]) {
    ids.sort_by_key(|&id| graph.node(id).degree());
}
