//! Initial-ordering preprocessors: breadth-first and depth-first traversal
//! orderings, and the middle-degree-sort (mds) heuristic. None of these
//! call [`crate::controller::Controller`] — they run once, before the main
//! heuristic loop, to pick a starting order.

use crate::graph::{Graph, NodeId};
use std::collections::VecDeque;

fn reset_traversal_state(graph: &mut Graph) {
    for id in graph.node_ids() {
        let node = graph.node_mut(id);
        node.marked = false;
        node.preorder_number = -1;
    }
}

fn neighbors(graph: &Graph, id: NodeId) -> Vec<NodeId> {
    let node = graph.node(id);
    node.up_edges
        .iter()
        .map(|&e| graph.edge(e).up_node)
        .chain(node.down_edges.iter().map(|&e| graph.edge(e).down_node))
        .collect()
}

/// Writes `preorder_number` onto every node as `weight`, then stably sorts
/// every layer by it.
fn apply_preorder_weights(graph: &mut Graph) {
    for id in graph.node_ids() {
        let preorder = graph.node(id).preorder_number;
        graph.node_mut(id).weight = preorder as f64;
    }
    for layer in 0..graph.num_layers() {
        crate::sort::layer_sort(graph, layer);
    }
}

/// Visits every node in breadth-first order, starting a fresh traversal
/// from the lowest-id unvisited node whenever the current component is
/// exhausted, then orders each layer by visit order.
pub fn breadth_first_search(graph: &mut Graph) {
    reset_traversal_state(graph);
    let mut counter = 0i32;
    let mut queue: VecDeque<NodeId> = VecDeque::new();

    for start in graph.node_ids() {
        if graph.node(start).marked {
            continue;
        }
        graph.node_mut(start).marked = true;
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            graph.node_mut(id).preorder_number = counter;
            counter += 1;
            for neighbor in neighbors(graph, id) {
                if !graph.node(neighbor).marked {
                    graph.node_mut(neighbor).marked = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    apply_preorder_weights(graph);
}

/// Visits every node in depth-first order, same component-restart rule as
/// [`breadth_first_search`].
pub fn depth_first_search(graph: &mut Graph) {
    reset_traversal_state(graph);
    let mut counter = 0i32;
    let mut stack: Vec<NodeId> = Vec::new();

    for start in graph.node_ids() {
        if graph.node(start).marked {
            continue;
        }
        graph.node_mut(start).marked = true;
        stack.push(start);

        while let Some(id) = stack.pop() {
            graph.node_mut(id).preorder_number = counter;
            counter += 1;
            for neighbor in neighbors(graph, id).into_iter().rev() {
                if !graph.node(neighbor).marked {
                    graph.node_mut(neighbor).marked = true;
                    stack.push(neighbor);
                }
            }
        }
    }

    apply_preorder_weights(graph);
}

/// The position sequence `mid, mid+1, mid-1, mid+2, mid-2, ...` used to
/// place a descending-degree-sorted run of nodes with the highest-degree
/// node in the middle of the layer.
fn center_out_positions(n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let mid = n / 2;
    let mut positions = vec![mid];
    let mut left = mid as i64 - 1;
    let mut right = mid as i64 + 1;
    let mut go_right = true;
    while positions.len() < n {
        if go_right {
            if right < n as i64 {
                positions.push(right as usize);
                right += 1;
            } else {
                positions.push(left as usize);
                left -= 1;
            }
        } else if left >= 0 {
            positions.push(left as usize);
            left -= 1;
        } else {
            positions.push(right as usize);
            right += 1;
        }
        go_right = !go_right;
    }
    positions
}

/// Sorts each layer by descending degree and places the nodes from the
/// middle outward, so the busiest node on a layer starts centered.
pub fn middle_degree_sort(graph: &mut Graph) {
    for layer in 0..graph.num_layers() {
        let mut ids = graph.layer(layer).node_ids.clone();
        ids.sort_by(|&a, &b| graph.node(b).degree().cmp(&graph.node(a).degree()));

        let positions = center_out_positions(ids.len());
        let mut order: Vec<Option<NodeId>> = vec![None; ids.len()];
        for (id, position) in ids.into_iter().zip(positions) {
            order[position] = Some(id);
        }
        let order: Vec<NodeId> = order.into_iter().map(|slot| slot.expect("every position filled exactly once")).collect();
        graph.set_layer_order(layer, order);
    }
}
