//! Maximum-stretch-edge (mse): repeatedly pick the unfixed edge with the
//! most stretch and sift both endpoints to minimize incident stretch.

use super::max_stretch_edge;
use super::sift::{SiftObjective, sift};
use crate::controller::Controller;
use crate::graph::Graph;

pub fn maximum_stretch_edge(graph: &mut Graph, controller: &mut Controller) {
    loop {
        graph.clear_fixed_nodes();
        graph.clear_fixed_edges();
        let mut improved = false;

        while let Some(edge_id) = max_stretch_edge(graph) {
            let edge = *graph.edge(edge_id);

            if !graph.node(edge.up_node).fixed {
                sift(graph, edge.up_node, SiftObjective::TotalIncidentStretch);
                graph.node_mut(edge.up_node).fixed = true;
                controller.trace(graph, Some(graph.node(edge.up_node).layer), "mse sift up endpoint");
                let outcome = controller.end_of_iteration(graph);
                improved |= outcome.improved;
                if outcome.done {
                    return;
                }
            }
            if !graph.node(edge.down_node).fixed {
                sift(graph, edge.down_node, SiftObjective::TotalIncidentStretch);
                graph.node_mut(edge.down_node).fixed = true;
                controller.trace(graph, Some(graph.node(edge.down_node).layer), "mse sift down endpoint");
                let outcome = controller.end_of_iteration(graph);
                improved |= outcome.improved;
                if outcome.done {
                    return;
                }
            }

            graph.edge_mut(edge_id).fixed = true;
        }

        controller.trace(graph, None, "mse end of pass");
        if controller.pass_complete(improved) {
            return;
        }
    }
}
