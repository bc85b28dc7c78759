//! Owns the global iteration/pass counters, termination policy, end-of-unit
//! bookkeeping (best-so-far updates, snapshot capture), and trace events.
//! Heuristics take this by `&mut` reference alongside the graph; there is
//! never more than one heuristic driving a controller at a time (see the
//! crate's concurrency notes).

use std::time::Instant;

use crate::graph::Graph;
use crate::snapshot::OrderingSnapshot;
use crate::tracker::{Measures, ObjectiveTrackers, ParetoFrontier};

/// `tracePrint` prints an end-of-pass message whenever `trace_freq` is at or
/// below this threshold, in addition to any periodic mid-pass messages.
const TRACE_FREQ_THRESHOLD: i64 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// `-i`: exceeding this stops the run; also disables standard
    /// termination.
    pub max_iterations: Option<i64>,
    /// `-r`: exceeding this (wall-clock seconds) stops the run; also
    /// disables standard termination.
    pub max_runtime: Option<f64>,
    /// `-c`: capture the ordering at the end of this iteration.
    pub capture_iteration: Option<i64>,
    /// `-t`/`-v`: -1 suppresses tracing, 0 emits only at pass end, >0 emits
    /// every `trace_freq` iterations (and suppresses pass-end messages once
    /// it exceeds [`TRACE_FREQ_THRESHOLD`]).
    pub trace_freq: i64,
}

impl RunOptions {
    pub fn standard_termination(&self) -> bool {
        self.max_iterations.is_none() && self.max_runtime.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IterationOutcome {
    /// True once a hard limit (`max_iterations`/`max_runtime`) has been
    /// reached; sticky for the rest of the run.
    pub done: bool,
    /// True iff any tracked objective improved at this call.
    pub improved: bool,
}

#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub iteration: i64,
    /// `None` for a pass-level event (start/end of pass); `Some(layer)` for
    /// an event tied to a specific layer having just been reordered.
    pub layer: Option<usize>,
    pub message: String,
    pub measures: Measures,
    pub elapsed_seconds: f64,
}

pub struct Controller {
    pub iteration: i64,
    pub pass: i64,
    pub trackers: ObjectiveTrackers,
    pub pareto: Option<ParetoFrontier>,
    pub captures: Vec<(i64, OrderingSnapshot)>,
    pub trace_events: Vec<TraceEvent>,
    options: RunOptions,
    start: Instant,
    hard_limit_reached: bool,
    last_traced_iteration: i64,
}

impl Controller {
    pub fn new(options: RunOptions) -> Self {
        Self {
            iteration: 0,
            pass: 0,
            trackers: ObjectiveTrackers::default(),
            pareto: None,
            captures: Vec::new(),
            trace_events: Vec::new(),
            options,
            start: Instant::now(),
            hard_limit_reached: false,
            last_traced_iteration: 0,
        }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Does the bookkeeping prescribed for the end of a single unit of
    /// work: updates every best-so-far tracker and the Pareto frontier (if
    /// any), captures the ordering if this is the capture iteration, checks
    /// the hard limits, and advances `iteration`.
    pub fn end_of_iteration(&mut self, graph: &Graph) -> IterationOutcome {
        let improved = self.trackers.update(graph, self.iteration);
        if let Some(pareto) = &mut self.pareto {
            pareto.consider(graph);
        }
        if self.options.capture_iteration == Some(self.iteration) {
            self.captures
                .push((self.iteration, OrderingSnapshot::capture(graph)));
        }
        self.iteration += 1;
        if let Some(max_it) = self.options.max_iterations {
            if self.iteration >= max_it {
                self.hard_limit_reached = true;
            }
        }
        if let Some(max_rt) = self.options.max_runtime {
            if self.elapsed_seconds() >= max_rt {
                self.hard_limit_reached = true;
            }
        }
        IterationOutcome {
            done: self.hard_limit_reached,
            improved,
        }
    }

    /// Called once a heuristic has finished a full pass. Increments `pass`
    /// and returns `true` iff the run should stop: either a hard limit has
    /// already been reached, or standard termination applies and nothing
    /// improved during the pass.
    pub fn pass_complete(&mut self, improved_this_pass: bool) -> bool {
        self.pass += 1;
        self.hard_limit_reached || (self.options.standard_termination() && !improved_this_pass)
    }

    pub fn is_done(&self) -> bool {
        self.hard_limit_reached
    }

    /// Records a trace event per the policy in [`RunOptions::trace_freq`].
    /// `layer = None` marks a pass-level event (start/end of pass, as
    /// opposed to an event tied to a specific layer just having been
    /// reordered).
    pub fn trace(&mut self, graph: &Graph, layer: Option<usize>, message: impl Into<String>) {
        let freq = self.options.trace_freq;
        if freq < 0 {
            return;
        }
        let periodic = freq > 0 && self.iteration % freq == 0 && self.iteration > self.last_traced_iteration;
        let pass_level = layer.is_none() && freq <= TRACE_FREQ_THRESHOLD;
        if !periodic && !pass_level {
            return;
        }
        if periodic {
            self.last_traced_iteration = self.iteration;
        }
        self.trace_events.push(TraceEvent {
            iteration: self.iteration,
            layer,
            message: message.into(),
            measures: Measures::compute(graph),
            elapsed_seconds: self.elapsed_seconds(),
        });
    }
}
