//! Ties the graph, controller and RNG together into the run loop a
//! frontend drives: construct an [`Engine`] from a loaded [`Graph`], run an
//! optional preprocessor, run exactly one heuristic to termination, and
//! optionally finish with the swap post-processor.

use crate::controller::{Controller, RunOptions};
use crate::graph::Graph;
use crate::heuristics::{
    MceEndOfPass, NoNeighborPolicy, SiftObjective, SiftOrder, barycenter, breadth_first_search, depth_first_search,
    maximum_crossings_edge, maximum_crossings_node, maximum_stretch_edge, median, middle_degree_sort,
    modified_barycenter, sifting, swapping,
};
use crate::rng::Rng;
use crate::tracker::{Measures, ParetoFrontier, ParetoObjectivePair};

/// Which preprocessor to run, if any, before the main heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessorKind {
    BreadthFirstSearch,
    DepthFirstSearch,
    MiddleDegreeSort,
}

/// Which heuristic to run. Closed over its own parameters rather than
/// dispatched by name, so an invalid combination cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    Median(NoNeighborPolicy),
    Barycenter(NoNeighborPolicy),
    ModifiedBarycenter { balanced_weight: bool, policy: NoNeighborPolicy },
    Sifting { order: SiftOrder, randomize_order: bool },
    MaximumCrossingsNode,
    /// mce: sifts to minimize each endpoint's maximum incident crossings.
    MaximumCrossingsEdge { end_of_pass: MceEndOfPass },
    /// mce_s: the same edge-selection and pass-end policy as mce, but
    /// sifts to minimize total crossings instead.
    MaximumCrossingsEdgeTotal { end_of_pass: MceEndOfPass },
    MaximumStretchEdge,
}

pub struct Engine {
    pub graph: Graph,
    pub controller: Controller,
    pub rng: Rng,
}

impl Engine {
    /// Builds an engine over an already-loaded graph, computing its initial
    /// crossing counts and wiring up an optional Pareto frontier.
    pub fn new(mut graph: Graph, run_options: RunOptions, seed: u64, pareto: Option<ParetoObjectivePair>) -> Self {
        crate::crossing::update_all_crossings(&mut graph);
        let mut controller = Controller::new(run_options);
        if let Some(pair) = pareto {
            controller.pareto = Some(ParetoFrontier::new(pair));
        }
        controller.trackers.update(&graph, controller.iteration);
        Self {
            graph,
            controller,
            rng: Rng::from_seed(seed),
        }
    }

    pub fn preprocess(&mut self, kind: PreprocessorKind) {
        match kind {
            PreprocessorKind::BreadthFirstSearch => breadth_first_search(&mut self.graph),
            PreprocessorKind::DepthFirstSearch => depth_first_search(&mut self.graph),
            PreprocessorKind::MiddleDegreeSort => middle_degree_sort(&mut self.graph),
        }
        crate::crossing::update_all_crossings(&mut self.graph);
    }

    pub fn run(&mut self, heuristic: HeuristicKind) {
        match heuristic {
            HeuristicKind::Median(policy) => median(&mut self.graph, &mut self.controller, policy),
            HeuristicKind::Barycenter(policy) => barycenter(&mut self.graph, &mut self.controller, policy),
            HeuristicKind::ModifiedBarycenter { balanced_weight, policy } => {
                modified_barycenter(&mut self.graph, &mut self.controller, balanced_weight, policy)
            }
            HeuristicKind::Sifting { order, randomize_order } => {
                sifting(&mut self.graph, &mut self.controller, order, randomize_order, &mut self.rng)
            }
            HeuristicKind::MaximumCrossingsNode => maximum_crossings_node(&mut self.graph, &mut self.controller),
            HeuristicKind::MaximumCrossingsEdge { end_of_pass } => maximum_crossings_edge(
                &mut self.graph,
                &mut self.controller,
                end_of_pass,
                SiftObjective::MaxIncidentCrossings,
            ),
            HeuristicKind::MaximumCrossingsEdgeTotal { end_of_pass } => {
                maximum_crossings_edge(&mut self.graph, &mut self.controller, end_of_pass, SiftObjective::TotalCrossings)
            }
            HeuristicKind::MaximumStretchEdge => maximum_stretch_edge(&mut self.graph, &mut self.controller),
        }
    }

    pub fn swap_postprocess(&mut self) {
        swapping(&mut self.graph, &mut self.controller);
    }

    pub fn measures(&self) -> Measures {
        Measures::compute(&self.graph)
    }
}
