//! The heuristic library: sweep heuristics (median, barycenter, modified
//! barycenter), sifting-family heuristics (sifting, mcn, mce/mce_s, mse),
//! preprocessors (bfs, dfs, mds) and the adjacent-swap post-processor.
//!
//! Every heuristic preserves the layer invariant after each unit of work
//! and calls [`crate::controller::Controller::end_of_iteration`] once per
//! unit, per the shared `(init -> iterate -> pass-end -> terminate?)` shape
//! described for the family.

mod mce;
mod mcn;
mod mse;
mod preprocess;
mod sift;
mod sifting;
mod swap;
mod sweep;

pub use mce::{MceEndOfPass, maximum_crossings_edge};
pub use mcn::maximum_crossings_node;
pub use mse::maximum_stretch_edge;
pub use preprocess::{breadth_first_search, depth_first_search, middle_degree_sort};
pub use sift::SiftObjective;
pub use sifting::{SiftOrder, sifting};
pub use swap::swapping;
pub use sweep::{barycenter, median, modified_barycenter};

use crate::graph::{EdgeId, Graph, NodeId};

/// How a node's weight is derived from the positions of its neighbours on
/// one adjacent layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMethod {
    Median,
    Barycenter,
}

/// What to do with a node that has no neighbours in the direction used to
/// assign weights for the current sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoNeighborPolicy {
    /// Leave the weight at 0.
    None,
    /// Inherit the left neighbour's (already-resolved) weight on the same
    /// layer. Keeps nodes with no signal close to nodes that do have one.
    #[default]
    Left,
    /// The average of all nodes on the layer that did get a defined
    /// weight.
    Avg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    /// Ascending layer order; each layer's weights come from the
    /// already-positioned layer below it (its `down_edges` neighbours).
    Up,
    /// Descending layer order; each layer's weights come from the
    /// already-positioned layer above it (its `up_edges` neighbours).
    Down,
}

/// Neighbour positions of `node` reached via `edges`, where `edges` is
/// either `node.up_edges` (neighbour is the edge's `up_node`) or
/// `node.down_edges` (neighbour is the edge's `down_node`).
fn neighbor_positions(graph: &Graph, edges: &[EdgeId], edges_are_up: bool) -> Vec<usize> {
    edges
        .iter()
        .map(|&e| {
            let edge = graph.edge(e);
            let target = if edges_are_up { edge.up_node } else { edge.down_node };
            graph.node(target).position
        })
        .collect()
}

/// A node's weight from one side only, or `None` if it has no neighbours
/// on that side.
fn one_sided_weight(graph: &Graph, edges: &[EdgeId], edges_are_up: bool, method: WeightMethod) -> Option<f64> {
    if edges.is_empty() {
        return None;
    }
    let mut positions = neighbor_positions(graph, edges, edges_are_up);
    Some(match method {
        WeightMethod::Barycenter => positions.iter().sum::<usize>() as f64 / positions.len() as f64,
        WeightMethod::Median => {
            positions.sort_unstable();
            median_of_sorted(&positions)
        }
    })
}

/// The classic layered-graph median formula (Gansner et al.): the true
/// median for an odd-sized neighbourhood, and a spread-weighted average of
/// the two middle values for an even-sized one.
fn median_of_sorted(positions: &[usize]) -> f64 {
    let n = positions.len();
    if n % 2 == 1 {
        return positions[n / 2] as f64;
    }
    if n == 2 {
        return (positions[0] + positions[1]) as f64 / 2.0;
    }
    let left = positions[n / 2 - 1];
    let right = positions[n / 2];
    let left_span = (right - positions[0]) as f64;
    let right_span = (positions[n - 1] - left) as f64;
    if left_span + right_span == 0.0 {
        return (left + right) as f64 / 2.0;
    }
    (left as f64 * right_span + right as f64 * left_span) / (left_span + right_span)
}

/// Fills in weights for nodes with no defined weight according to `policy`.
/// `order` lists the nodes in left-to-right (position) order, matching
/// `weights`.
fn apply_no_neighbor_policy(weights: &mut [Option<f64>], policy: NoNeighborPolicy) {
    match policy {
        NoNeighborPolicy::None => {
            for w in weights.iter_mut() {
                w.get_or_insert(0.0);
            }
        }
        NoNeighborPolicy::Avg => {
            let defined: Vec<f64> = weights.iter().filter_map(|w| *w).collect();
            let avg = if defined.is_empty() {
                0.0
            } else {
                defined.iter().sum::<f64>() / defined.len() as f64
            };
            for w in weights.iter_mut() {
                w.get_or_insert(avg);
            }
        }
        NoNeighborPolicy::Left => {
            let mut last = 0.0;
            for w in weights.iter_mut() {
                match w {
                    Some(v) => last = *v,
                    None => *w = Some(last),
                }
            }
        }
    }
}

/// Assigns every node on `layer` a weight computed from its neighbours on
/// one side (`edges_are_up` selects `up_edges` vs `down_edges`), applying
/// `policy` to nodes with no such neighbours, then writes the weights back
/// onto the graph.
fn assign_one_sided_weights(
    graph: &mut Graph,
    layer: usize,
    edges_are_up: bool,
    method: WeightMethod,
    policy: NoNeighborPolicy,
) {
    let ids = graph.layer(layer).node_ids.clone();
    let mut weights: Vec<Option<f64>> = ids
        .iter()
        .map(|&id| {
            let node = graph.node(id);
            let edges = if edges_are_up { &node.up_edges } else { &node.down_edges };
            one_sided_weight(graph, edges, edges_are_up, method)
        })
        .collect();
    apply_no_neighbor_policy(&mut weights, policy);
    for (id, weight) in ids.iter().zip(weights) {
        graph.node_mut(*id).weight = weight.unwrap_or(0.0);
    }
}

/// Assigns weights from both neighbouring layers at once (used by modified
/// barycenter when it fixes the layer with the most crossings).
/// `balanced_weight` averages the two one-sided means rather than dividing
/// the combined position sum by the combined degree.
fn assign_both_sided_weights(graph: &mut Graph, layer: usize, balanced_weight: bool, policy: NoNeighborPolicy) {
    let ids = graph.layer(layer).node_ids.clone();
    let mut weights: Vec<Option<f64>> = ids
        .iter()
        .map(|&id| {
            let node = graph.node(id);
            let up_positions = neighbor_positions(graph, &node.up_edges, true);
            let down_positions = neighbor_positions(graph, &node.down_edges, false);
            combined_weight(&up_positions, &down_positions, balanced_weight)
        })
        .collect();
    apply_no_neighbor_policy(&mut weights, policy);
    for (id, weight) in ids.iter().zip(weights) {
        graph.node_mut(*id).weight = weight.unwrap_or(0.0);
    }
}

fn combined_weight(up: &[usize], down: &[usize], balanced_weight: bool) -> Option<f64> {
    match (up.is_empty(), down.is_empty()) {
        (true, true) => None,
        (false, true) => Some(up.iter().sum::<usize>() as f64 / up.len() as f64),
        (true, false) => Some(down.iter().sum::<usize>() as f64 / down.len() as f64),
        (false, false) => {
            if balanced_weight {
                let up_mean = up.iter().sum::<usize>() as f64 / up.len() as f64;
                let down_mean = down.iter().sum::<usize>() as f64 / down.len() as f64;
                Some((up_mean + down_mean) / 2.0)
            } else {
                let sum = up.iter().sum::<usize>() + down.iter().sum::<usize>();
                let degree = up.len() + down.len();
                Some(sum as f64 / degree as f64)
            }
        }
    }
}

/// Sum of up+down crossings for every node on `layer`: the total crossings
/// of edges incident to the layer.
fn layer_crossings(graph: &Graph, layer: usize) -> u32 {
    graph
        .layer(layer)
        .node_ids
        .iter()
        .map(|&id| graph.node(id).crossings())
        .sum()
}

/// The unfixed layer with the most incident crossings, lowest index first
/// on ties; `None` if every layer is fixed.
fn max_crossings_layer(graph: &Graph) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for layer in 0..graph.num_layers() {
        if graph.layer(layer).fixed {
            continue;
        }
        let crossings = layer_crossings(graph, layer);
        match best {
            Some((_, best_crossings)) if crossings <= best_crossings => {}
            _ => best = Some((layer, crossings)),
        }
    }
    best.map(|(layer, _)| layer)
}

/// Sum of up+down crossings for a single node.
fn node_total_crossings(graph: &Graph, node: NodeId) -> u32 {
    graph.node(node).crossings()
}

/// The unfixed node whose incident edges accumulate the most crossings,
/// lowest id first on ties; `None` if every node is fixed.
fn max_crossings_node(graph: &Graph) -> Option<NodeId> {
    let mut best: Option<(NodeId, u32)> = None;
    for id in graph.node_ids() {
        if graph.node(id).fixed {
            continue;
        }
        let crossings = node_total_crossings(graph, id);
        match best {
            Some((_, best_crossings)) if crossings <= best_crossings => {}
            _ => best = Some((id, crossings)),
        }
    }
    best.map(|(id, _)| id)
}

/// The edge with the most crossings among those not fixed, lowest id first
/// on ties.
fn max_crossings_edge(graph: &Graph) -> Option<EdgeId> {
    let mut best: Option<(EdgeId, u32)> = None;
    for id in graph.edge_ids() {
        if graph.edge(id).fixed {
            continue;
        }
        let crossings = graph.edge(id).crossings;
        match best {
            Some((_, best_crossings)) if crossings <= best_crossings => {}
            _ => best = Some((id, crossings)),
        }
    }
    best.map(|(id, _)| id)
}

/// The edge with the most stretch among those not fixed, lowest id first on
/// ties.
fn max_stretch_edge(graph: &Graph) -> Option<EdgeId> {
    let mut best: Option<(EdgeId, f64)> = None;
    for id in graph.edge_ids() {
        if graph.edge(id).fixed {
            continue;
        }
        let stretch = crate::crossing::edge_stretch(graph, id);
        match best {
            Some((_, best_stretch)) if stretch <= best_stretch => {}
            _ => best = Some((id, stretch)),
        }
    }
    best.map(|(id, _)| id)
}
