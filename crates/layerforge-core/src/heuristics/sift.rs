//! The shared sifting routine: try every position on a node's layer and
//! move it to the one minimizing the chosen objective, breaking ties
//! leftmost.

use crate::graph::{Graph, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiftObjective {
    /// Minimize the graph's total number of crossings. Used by `sifting`,
    /// `mcn`, and `mce_s`.
    TotalCrossings,
    /// Minimize the maximum crossing count among edges incident to the
    /// sifted node. This is mce's own objective (Stallmann, JEA 2012).
    MaxIncidentCrossings,
    /// Minimize the total stretch of edges incident to the sifted node.
    /// Used by `mse`.
    TotalIncidentStretch,
}

/// Tries every position on `node`'s layer, moving it there and measuring
/// `objective` after a local crossings update, and leaves it at whichever
/// position minimized the objective (leftmost on ties). Returns the
/// winning objective value.
pub fn sift(graph: &mut Graph, node: NodeId, objective: SiftObjective) -> f64 {
    let layer = graph.node(node).layer;
    let layer_len = graph.layer(layer).len();

    let mut best_position = graph.node(node).position;
    let mut best_value = f64::INFINITY;

    for candidate in 0..layer_len {
        graph.move_within_layer(node, candidate);
        crate::crossing::update_crossings_for_layer(graph, layer);
        let value = evaluate(graph, node, objective);
        if value < best_value {
            best_value = value;
            best_position = candidate;
        }
    }

    graph.move_within_layer(node, best_position);
    crate::crossing::update_crossings_for_layer(graph, layer);
    best_value
}

fn evaluate(graph: &Graph, node: NodeId, objective: SiftObjective) -> f64 {
    match objective {
        SiftObjective::TotalCrossings => crate::crossing::number_of_crossings(graph) as f64,
        SiftObjective::MaxIncidentCrossings => incident_edges(graph, node)
            .map(|e| graph.edge(e).crossings)
            .max()
            .unwrap_or(0) as f64,
        SiftObjective::TotalIncidentStretch => {
            incident_edges(graph, node).map(|e| crate::crossing::edge_stretch(graph, e)).sum()
        }
    }
}

fn incident_edges(graph: &Graph, node: NodeId) -> impl Iterator<Item = crate::graph::EdgeId> + '_ {
    let n = graph.node(node);
    n.up_edges.iter().chain(n.down_edges.iter()).copied()
}
