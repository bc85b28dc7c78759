//! Ordering snapshots: a flat, node-object-independent record of a full
//! layer ordering, used to remember the best configuration found so far for
//! a given objective.

use crate::graph::{Graph, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingSnapshot {
    /// For each layer, the node ids in left-to-right order at capture time.
    layers: Vec<Vec<NodeId>>,
}

impl OrderingSnapshot {
    /// Captures the current ordering of every layer in `graph`.
    pub fn capture(graph: &Graph) -> Self {
        let layers = graph
            .layers()
            .iter()
            .map(|layer| layer.node_ids.clone())
            .collect();
        Self { layers }
    }

    /// Rewrites every layer's node sequence and every node's `position` in
    /// `graph` to match this snapshot. Callers must call
    /// [`crate::crossing::update_all_crossings`] afterwards before
    /// consulting any crossing count.
    pub fn restore(&self, graph: &mut Graph) {
        for (layer_index, order) in self.layers.iter().enumerate() {
            graph.set_layer_order(layer_index, order.clone());
        }
    }
}
