//! The plain sifting heuristic: visit nodes in a configurable order and
//! move each to the position on its layer that minimizes total crossings.

use super::sift::{SiftObjective, sift};
use crate::controller::Controller;
use crate::graph::{Graph, NodeId};
use crate::rng::Rng;

/// The order in which nodes are visited, per Matuszewski et al.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiftOrder {
    /// Layer-by-layer sweep, left to right within a layer.
    Layer,
    /// Largest degree first (the default in the literature).
    #[default]
    Degree,
    /// A fresh random permutation at the start of every pass.
    Random,
}

fn layer_sweep_order(graph: &Graph) -> Vec<NodeId> {
    graph.layers().iter().flat_map(|l| l.node_ids.clone()).collect()
}

fn degree_order(graph: &Graph) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = graph.node_ids().collect();
    ids.sort_by_key(|&id| std::cmp::Reverse(graph.node(id).degree()));
    ids
}

pub fn sifting(graph: &mut Graph, controller: &mut Controller, order: SiftOrder, randomize_order: bool, rng: &mut Rng) {
    let mut nodes = match order {
        SiftOrder::Layer => layer_sweep_order(graph),
        SiftOrder::Degree => degree_order(graph),
        SiftOrder::Random => {
            let mut ids: Vec<NodeId> = graph.node_ids().collect();
            rng.shuffle(&mut ids);
            ids
        }
    };

    loop {
        let mut improved_this_pass = false;
        for &node in &nodes {
            sift(graph, node, SiftObjective::TotalCrossings);
            controller.trace(graph, Some(graph.node(node).layer), "sifting");
            let outcome = controller.end_of_iteration(graph);
            improved_this_pass |= outcome.improved;
            if outcome.done {
                return;
            }
        }
        controller.trace(graph, None, "sifting end of pass");

        match order {
            SiftOrder::Layer => {}
            SiftOrder::Degree => nodes = degree_order(graph),
            SiftOrder::Random => {
                if randomize_order {
                    rng.shuffle(&mut nodes);
                }
            }
        }

        if controller.pass_complete(improved_this_pass) {
            return;
        }
    }
}
