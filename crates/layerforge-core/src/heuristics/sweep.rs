//! Median, barycenter, and modified barycenter: the alternating-sweep
//! family of heuristics.

use super::{
    NoNeighborPolicy, SweepDirection, WeightMethod, assign_both_sided_weights, assign_one_sided_weights,
    max_crossings_layer,
};
use crate::controller::Controller;
use crate::graph::Graph;

struct SweepResult {
    done: bool,
    improved: bool,
}

/// Sorts every layer in `layers` (in the given order) by weights derived
/// from `direction`'s already-positioned neighbour layer, calling
/// `end_of_iteration` once per layer.
fn sweep(
    graph: &mut Graph,
    controller: &mut Controller,
    layers: impl Iterator<Item = usize>,
    direction: SweepDirection,
    method: WeightMethod,
    policy: NoNeighborPolicy,
    trace_tag: &str,
) -> SweepResult {
    let edges_are_up = matches!(direction, SweepDirection::Down);
    let mut improved = false;
    for layer in layers {
        if graph.layer(layer).fixed {
            continue;
        }
        assign_one_sided_weights(graph, layer, edges_are_up, method, policy);
        crate::sort::layer_sort(graph, layer);
        crate::crossing::update_crossings_for_layer(graph, layer);
        controller.trace(graph, Some(layer), trace_tag);
        let outcome = controller.end_of_iteration(graph);
        improved |= outcome.improved;
        if outcome.done {
            return SweepResult { done: true, improved };
        }
    }
    SweepResult { done: false, improved }
}

fn up_sweep(graph: &mut Graph, controller: &mut Controller, start: usize, method: WeightMethod, policy: NoNeighborPolicy) -> SweepResult {
    sweep(graph, controller, start..graph.num_layers(), SweepDirection::Up, method, policy, "up sweep")
}

fn down_sweep(
    graph: &mut Graph,
    controller: &mut Controller,
    start: usize,
    method: WeightMethod,
    policy: NoNeighborPolicy,
) -> SweepResult {
    let layers: Vec<usize> = (0..=start).rev().collect();
    sweep(graph, controller, layers.into_iter(), SweepDirection::Down, method, policy, "down sweep")
}

fn sweep_heuristic(graph: &mut Graph, controller: &mut Controller, method: WeightMethod, policy: NoNeighborPolicy, label: &str) {
    if graph.num_layers() < 2 {
        return;
    }
    loop {
        let up = up_sweep(graph, controller, 1, method, policy);
        if up.done {
            return;
        }
        let down = down_sweep(graph, controller, graph.num_layers().saturating_sub(2), method, policy);
        if down.done {
            return;
        }
        controller.trace(graph, None, label);
        if controller.pass_complete(up.improved || down.improved) {
            return;
        }
    }
}

pub fn median(graph: &mut Graph, controller: &mut Controller, policy: NoNeighborPolicy) {
    sweep_heuristic(graph, controller, WeightMethod::Median, policy, "median end of pass");
}

pub fn barycenter(graph: &mut Graph, controller: &mut Controller, policy: NoNeighborPolicy) {
    sweep_heuristic(graph, controller, WeightMethod::Barycenter, policy, "bary end of pass");
}

/// Repeatedly fixes the currently-unfixed layer with the most crossings,
/// sorting it from both neighbours' positions, then resumes one-sided
/// barycenter sweeps above and below it. A pass ends when every layer is
/// fixed.
pub fn modified_barycenter(graph: &mut Graph, controller: &mut Controller, balanced_weight: bool, policy: NoNeighborPolicy) {
    loop {
        graph.clear_fixed_layers();
        let mut any_improved = false;
        loop {
            let Some(layer) = max_crossings_layer(graph) else {
                break;
            };
            graph.layer_mut(layer).fixed = true;
            assign_both_sided_weights(graph, layer, balanced_weight, policy);
            crate::sort::layer_sort(graph, layer);
            crate::crossing::update_crossings_for_layer(graph, layer);
            controller.trace(graph, Some(layer), "max crossings layer");
            let outcome = controller.end_of_iteration(graph);
            any_improved |= outcome.improved;
            if outcome.done {
                return;
            }

            if layer + 1 < graph.num_layers() {
                let up = up_sweep(graph, controller, layer + 1, WeightMethod::Barycenter, policy);
                any_improved |= up.improved;
                if up.done {
                    return;
                }
            }
            if layer > 0 {
                let down = down_sweep(graph, controller, layer - 1, WeightMethod::Barycenter, policy);
                any_improved |= down.improved;
                if down.done {
                    return;
                }
            }
        }
        controller.trace(graph, None, "mod_bary end of pass");
        if controller.pass_complete(any_improved) {
            return;
        }
    }
}
