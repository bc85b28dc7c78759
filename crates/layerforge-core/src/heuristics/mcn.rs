//! Maximum-crossings-node (mcn): repeatedly sift the unfixed node with the
//! most incident crossings, then fix it. A pass ends once every node is
//! fixed.

use super::max_crossings_node;
use super::sift::{SiftObjective, sift};
use crate::controller::Controller;
use crate::graph::Graph;

pub fn maximum_crossings_node(graph: &mut Graph, controller: &mut Controller) {
    loop {
        graph.clear_fixed_nodes();
        let mut improved = false;

        while let Some(node) = max_crossings_node(graph) {
            sift(graph, node, SiftObjective::TotalCrossings);
            graph.node_mut(node).fixed = true;
            controller.trace(graph, Some(graph.node(node).layer), "mcn");
            let outcome = controller.end_of_iteration(graph);
            improved |= outcome.improved;
            if outcome.done {
                return;
            }
        }

        controller.trace(graph, None, "mcn end of pass");
        if controller.pass_complete(improved) {
            return;
        }
    }
}
