//! Maximum-crossings-edge (mce) and its total-crossings variant (mce_s).

use super::max_crossings_edge;
use super::sift::{SiftObjective, sift};
use crate::controller::Controller;
use crate::graph::Graph;

/// How a pass of mce decides it is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MceEndOfPass {
    /// A pass ends once every node has been fixed; each node is sifted
    /// only once. Works best in practice.
    #[default]
    Nodes,
    /// A pass ends once every edge has been fixed; both endpoints of an
    /// edge are sifted at every iteration regardless of node-fixed state.
    Edges,
    /// A pass ends as soon as the chosen edge already has both endpoints
    /// fixed.
    Early,
    /// Only the endpoint with the larger node-crossing count is sifted.
    OneNode,
}

/// `objective` is [`SiftObjective::MaxIncidentCrossings`] for mce proper,
/// or [`SiftObjective::TotalCrossings`] for the mce_s variant.
pub fn maximum_crossings_edge(graph: &mut Graph, controller: &mut Controller, end_of_pass: MceEndOfPass, objective: SiftObjective) {
    loop {
        graph.clear_fixed_nodes();
        graph.clear_fixed_edges();
        let mut improved = false;

        loop {
            let Some(edge_id) = max_crossings_edge(graph) else {
                break;
            };
            let edge = *graph.edge(edge_id);
            let up_fixed = graph.node(edge.up_node).fixed;
            let down_fixed = graph.node(edge.down_node).fixed;

            if end_of_pass == MceEndOfPass::Early && up_fixed && down_fixed {
                graph.edge_mut(edge_id).fixed = true;
                break;
            }

            if end_of_pass == MceEndOfPass::OneNode {
                let up_crossings = graph.node(edge.up_node).crossings();
                let down_crossings = graph.node(edge.down_node).crossings();
                let target = if up_crossings >= down_crossings { edge.up_node } else { edge.down_node };
                sift(graph, target, objective);
                graph.node_mut(target).fixed = true;
                controller.trace(graph, Some(graph.node(target).layer), "mce one-node sift");
                let outcome = controller.end_of_iteration(graph);
                improved |= outcome.improved;
                if outcome.done {
                    return;
                }
            } else {
                let sift_up = end_of_pass == MceEndOfPass::Edges || !up_fixed;
                let sift_down = end_of_pass == MceEndOfPass::Edges || !down_fixed;
                if sift_up {
                    sift(graph, edge.up_node, objective);
                    graph.node_mut(edge.up_node).fixed = true;
                    controller.trace(graph, Some(graph.node(edge.up_node).layer), "mce sift up endpoint");
                    let outcome = controller.end_of_iteration(graph);
                    improved |= outcome.improved;
                    if outcome.done {
                        return;
                    }
                }
                if sift_down {
                    sift(graph, edge.down_node, objective);
                    graph.node_mut(edge.down_node).fixed = true;
                    controller.trace(graph, Some(graph.node(edge.down_node).layer), "mce sift down endpoint");
                    let outcome = controller.end_of_iteration(graph);
                    improved |= outcome.improved;
                    if outcome.done {
                        return;
                    }
                }
            }

            graph.edge_mut(edge_id).fixed = true;

            if end_of_pass == MceEndOfPass::Nodes && graph.nodes().iter().all(|n| n.fixed) {
                break;
            }
        }

        controller.trace(graph, None, "mce end of pass");
        if controller.pass_complete(improved) {
            return;
        }
    }
}
