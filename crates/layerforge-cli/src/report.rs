//! Diagnostics: trace lines (§4.4 policy, already decided by
//! [`layerforge_core::controller::Controller::trace`]) and the `-v`
//! verbose end-of-run summary, both written to stderr.

use layerforge_core::controller::TraceEvent;
use layerforge_core::graph::Graph;
use layerforge_core::tracker::Measures;

pub fn print_trace_event(event: &TraceEvent) {
    let layer = match event.layer {
        Some(l) => l.to_string(),
        None => "-".to_string(),
    };
    eprintln!(
        "[{:>6}] layer={:<4} {:<24} crossings={:<6} bottleneck={:<4} stretch={:<8.3} bstretch={:<6.3} t={:.3}s",
        event.iteration,
        layer,
        event.message,
        event.measures.total_crossings,
        event.measures.bottleneck_crossings,
        event.measures.total_stretch,
        event.measures.bottleneck_stretch,
        event.elapsed_seconds,
    );
}

pub fn print_warning(message: &str) {
    eprintln!("warning: {message}");
}

pub fn print_isolated_nodes_notice(graph: &Graph) {
    let count = graph.num_isolated_nodes();
    if count > 0 {
        eprintln!("note: {count} isolated node(s) kept in place (degree 0, no crossings contributed)");
    }
}

pub fn print_verbose_summary(graph: &Graph, measures: &Measures, iterations: i64, passes: i64) {
    eprintln!("--- summary ---");
    eprintln!("graph: {} ({} nodes, {} edges, {} layers)", graph.name, graph.num_nodes(), graph.num_edges(), graph.num_layers());
    eprintln!("iterations: {iterations}, passes: {passes}");
    eprintln!(
        "crossings: total={} bottleneck={} stretch={:.3} bottleneck_stretch={:.3}",
        measures.total_crossings, measures.bottleneck_crossings, measures.total_stretch, measures.bottleneck_stretch
    );
}
