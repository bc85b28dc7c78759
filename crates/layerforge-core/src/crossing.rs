//! Crossing and stretch accounting.
//!
//! Every edge belongs to exactly one layer boundary (the pair of adjacent
//! layers its two endpoints sit on), so `Edge::crossings` can always be
//! recomputed from scratch for a single boundary without touching any other
//! edge's cached count. `number_of_crossings` treats each crossing *pair* as
//! one unit: since both edges of a crossing pair are incremented, the total
//! is `sum(edge.crossings) / 2`.

use crate::graph::{EdgeId, Graph, NodeId};

/// Recomputes every cached crossing count (per edge, per node, in total)
/// from the current positions.
pub fn update_all_crossings(graph: &mut Graph) {
    for layer in 0..graph.num_layers() {
        let ids = graph.layer(layer).node_ids.clone();
        for id in ids {
            let node = graph.node_mut(id);
            node.up_crossings = 0;
            node.down_crossings = 0;
        }
    }
    for lower in 0..graph.num_layers().saturating_sub(1) {
        recompute_boundary(graph, lower);
    }
}

/// Cheaper local recomputation: only the (up to two) boundaries touching
/// `layer` are recomputed, instead of the whole graph.
pub fn update_crossings_for_layer(graph: &mut Graph, layer: usize) {
    if layer > 0 {
        recompute_boundary(graph, layer - 1);
    }
    if layer + 1 < graph.num_layers() {
        recompute_boundary(graph, layer);
    }
}

/// Recomputes crossings for the boundary between `lower` and `lower + 1`.
fn recompute_boundary(graph: &mut Graph, lower: usize) {
    let edge_ids: Vec<EdgeId> = graph
        .layer(lower)
        .node_ids
        .iter()
        .flat_map(|&id| graph.node(id).up_edges.iter().copied())
        .collect();

    for &id in &graph.layer(lower).node_ids.clone() {
        graph.node_mut(id).up_crossings = 0;
    }
    if lower + 1 < graph.num_layers() {
        for &id in &graph.layer(lower + 1).node_ids.clone() {
            graph.node_mut(id).down_crossings = 0;
        }
    }

    let n = edge_ids.len();
    let mut down_pos = Vec::with_capacity(n);
    let mut up_pos = Vec::with_capacity(n);
    for &eid in &edge_ids {
        let edge = graph.edge(eid);
        down_pos.push(graph.node(edge.down_node).position);
        up_pos.push(graph.node(edge.up_node).position);
    }

    let mut counts = vec![0u32; n];
    for i in 0..n {
        for j in (i + 1)..n {
            if down_pos[i] == down_pos[j] || up_pos[i] == up_pos[j] {
                continue;
            }
            let down_order = down_pos[i].cmp(&down_pos[j]);
            let up_order = up_pos[i].cmp(&up_pos[j]);
            if down_order != up_order {
                counts[i] += 1;
                counts[j] += 1;
            }
        }
    }

    for (i, &eid) in edge_ids.iter().enumerate() {
        graph.edge_mut(eid).crossings = counts[i];
        let edge = *graph.edge(eid);
        graph.node_mut(edge.down_node).up_crossings += counts[i];
        graph.node_mut(edge.up_node).down_crossings += counts[i];
    }
}

/// Sum of all edge crossings, counting each unordered crossing pair once.
pub fn number_of_crossings(graph: &Graph) -> u32 {
    graph.edges().iter().map(|e| e.crossings).sum::<u32>() / 2
}

/// The maximum per-edge crossing count (the bottleneck).
pub fn max_edge_crossings(graph: &Graph) -> u32 {
    graph.edges().iter().map(|e| e.crossings).max().unwrap_or(0)
}

/// Number of crossings that would be contributed by edges incident to `u`
/// or `v` if `u` were placed immediately to the left of `v` on their shared
/// layer. Used by sifting and the adjacent-swap post-processor; does not
/// mutate any cached counts.
pub fn node_crossings(graph: &Graph, u: NodeId, v: NodeId) -> u32 {
    let un = graph.node(u);
    let vn = graph.node(v);
    debug_assert_eq!(un.layer, vn.layer);

    let mut total = 0u32;
    total += count_side_crossings(graph, &un.up_edges, &vn.up_edges, true);
    total += count_side_crossings(graph, &un.down_edges, &vn.down_edges, false);
    total
}

fn count_side_crossings(graph: &Graph, u_edges: &[EdgeId], v_edges: &[EdgeId], up_side: bool) -> u32 {
    let mut count = 0u32;
    for &ue in u_edges {
        let u_target = if up_side {
            graph.edge(ue).up_node
        } else {
            graph.edge(ue).down_node
        };
        let u_pos = graph.node(u_target).position;
        for &ve in v_edges {
            let v_target = if up_side {
                graph.edge(ve).up_node
            } else {
                graph.edge(ve).down_node
            };
            let v_pos = graph.node(v_target).position;
            if u_pos > v_pos {
                count += 1;
            }
        }
    }
    count
}

/// Normalized stretch of a single edge: `|pu/(nu-1) - pv/(nv-1)|`, with the
/// convention that a layer of size 1 contributes 0 for its side.
pub fn edge_stretch(graph: &Graph, edge: EdgeId) -> f64 {
    let e = graph.edge(edge);
    let up = graph.node(e.up_node);
    let down = graph.node(e.down_node);
    let up_frac = normalized_position(up.position, graph.layer(up.layer).len());
    let down_frac = normalized_position(down.position, graph.layer(down.layer).len());
    (up_frac - down_frac).abs()
}

fn normalized_position(position: usize, layer_size: usize) -> f64 {
    if layer_size <= 1 {
        0.0
    } else {
        position as f64 / (layer_size - 1) as f64
    }
}

pub fn total_stretch(graph: &Graph) -> f64 {
    graph.edge_ids().map(|e| edge_stretch(graph, e)).sum()
}

pub fn bottleneck_stretch(graph: &Graph) -> f64 {
    graph
        .edge_ids()
        .map(|e| edge_stretch(graph, e))
        .fold(0.0_f64, f64::max)
}
