//! The adjacent-swap post-processor: scans each layer for neighbouring
//! pairs whose order contributes more crossings than the reverse order
//! would, and swaps them. Runs even-offset and odd-offset passes over each
//! layer's positions so a single sweep can move a node more than one slot.

use crate::controller::Controller;
use crate::crossing::{node_crossings, update_crossings_for_layer};
use crate::graph::Graph;

pub fn swapping(graph: &mut Graph, controller: &mut Controller) {
    loop {
        let mut improved = false;
        let mut any_swap = false;

        for parity in [0usize, 1usize] {
            for layer in 0..graph.num_layers() {
                let len = graph.layer(layer).len();
                if len < 2 {
                    continue;
                }
                let mut position = parity;
                while position + 1 < len {
                    let u = graph.node_at(layer, position);
                    let v = graph.node_at(layer, position + 1);
                    // node_crossings assumes its first argument sits left of
                    // the second, so this compares the current arrangement
                    // against the swapped one without touching cached counts.
                    let current = node_crossings(graph, u, v);
                    let swapped = node_crossings(graph, v, u);
                    if current > swapped {
                        graph.swap_adjacent(layer, position);
                        any_swap = true;
                    }
                    position += 2;
                }

                update_crossings_for_layer(graph, layer);
                controller.trace(graph, Some(layer), "swap");
                let outcome = controller.end_of_iteration(graph);
                improved |= outcome.improved;
                if outcome.done {
                    return;
                }
            }
        }

        controller.trace(graph, None, "swap end of pass");
        if controller.pass_complete(improved || any_swap) {
            return;
        }
    }
}
