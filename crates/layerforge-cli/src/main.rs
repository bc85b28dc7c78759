mod dot_ord;
mod naming;
mod report;
mod sgf;

use std::io::Read;

use layerforge_core::controller::RunOptions;
use layerforge_core::engine::{Engine, HeuristicKind, PreprocessorKind};
use layerforge_core::graph::Graph;
use layerforge_core::heuristics::{MceEndOfPass, NoNeighborPolicy, SiftOrder};
use layerforge_core::snapshot::OrderingSnapshot;
use layerforge_core::tracker::ParetoObjectivePair;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(layerforge_core::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<layerforge_core::Error> for CliError {
    fn from(value: layerforge_core::Error) -> Self {
        Self::Core(value)
    }
}

fn usage() -> &'static str {
    "layerforge\n\
\n\
USAGE:\n\
  layerforge [options] [file.sgf]\n\
  layerforge [options] file.dot file.ord\n\
  layerforge -I [options]\n\
\n\
OPTIONS:\n\
  -I                  read sgf from stdin when no file args given\n\
  -h <name>           heuristic: median, bary, mod_bary, mcn, sifting, mce, mce_s, mse\n\
  -p <name>           preprocessor: bfs, dfs, mds\n\
  -z                  enable the swapping post-processor\n\
  -i <n>              max iterations (disables standard termination)\n\
  -r <secs>           max runtime in seconds (disables standard termination)\n\
  -R <seed>           seed; also enables order randomisation between passes\n\
  -c <n>              capture the ordering at the end of iteration n\n\
  -P b_t|s_t|b_s       track a two-objective Pareto frontier\n\
  -o t|b|s|bs         primary objective for the selected output\n\
  -w <base>|_         write result file(s); _ uses the graph name\n\
  -O                  write the selected result to stdout\n\
  -s layer|degree|random   sifting order\n\
  -g total|max        sifting objective style (mce/mce_s already encode this split)\n\
  -v                  verbose end-of-run summary\n\
  -t <n>              trace frequency\n\
"
}

#[derive(Debug, Default)]
struct Args {
    stdin: bool,
    heuristic: Option<String>,
    preprocessor: Option<String>,
    swap: bool,
    max_iterations: Option<i64>,
    max_runtime: Option<f64>,
    seed: Option<u64>,
    capture_iteration: Option<i64>,
    pareto: Option<String>,
    primary_objective: Option<String>,
    write_base: Option<String>,
    write_stdout: bool,
    sift_order: Option<String>,
    verbose: bool,
    trace_freq: Option<i64>,
    files: Vec<String>,
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1).peekable();

    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" => return Err(CliError::Usage(usage())),
            "-I" => args.stdin = true,
            "-z" => args.swap = true,
            "-O" => args.write_stdout = true,
            "-v" => args.verbose = true,
            "-h" => args.heuristic = Some(next_value(&mut it)?),
            "-p" => args.preprocessor = Some(next_value(&mut it)?),
            "-i" => args.max_iterations = Some(parse_value(&mut it)?),
            "-r" => args.max_runtime = Some(parse_value(&mut it)?),
            "-R" => args.seed = Some(parse_value(&mut it)?),
            "-c" => args.capture_iteration = Some(parse_value(&mut it)?),
            "-P" => args.pareto = Some(next_value(&mut it)?),
            "-o" => args.primary_objective = Some(next_value(&mut it)?),
            "-w" => args.write_base = Some(next_value(&mut it)?),
            "-s" => args.sift_order = Some(next_value(&mut it)?),
            "-g" => {
                let _ = next_value(&mut it)?;
            }
            "-t" => args.trace_freq = Some(parse_value(&mut it)?),
            other if other.starts_with('-') && other.len() > 1 => return Err(CliError::Usage(usage())),
            path => args.files.push(path.to_string()),
        }
    }

    if args.files.len() > 2 {
        return Err(CliError::Usage(usage()));
    }
    if args.files.is_empty() && !args.stdin {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn next_value(it: &mut std::iter::Peekable<std::iter::Skip<std::slice::Iter<String>>>) -> Result<String, CliError> {
    it.next().cloned().ok_or(CliError::Usage(usage()))
}

fn parse_value<T: std::str::FromStr>(
    it: &mut std::iter::Peekable<std::iter::Skip<std::slice::Iter<String>>>,
) -> Result<T, CliError> {
    next_value(it)?.parse::<T>().map_err(|_| CliError::Usage(usage()))
}

enum InputDialect {
    Sgf,
    DotOrd,
}

fn load_graph(args: &Args) -> Result<(Graph, InputDialect, Vec<String>), CliError> {
    match args.files.len() {
        0 => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            let (graph, warnings) = sgf::read_sgf(&buf)?;
            Ok((graph, InputDialect::Sgf, warnings))
        }
        1 => {
            let text = std::fs::read_to_string(&args.files[0])?;
            let (graph, warnings) = sgf::read_sgf(&text)?;
            Ok((graph, InputDialect::Sgf, warnings))
        }
        2 => {
            let dot_text = std::fs::read_to_string(&args.files[0])?;
            let ord_text = std::fs::read_to_string(&args.files[1])?;
            let dot = dot_ord::read_dot(&dot_text)?;
            let ord = dot_ord::read_ord(&ord_text)?;
            let graph = dot_ord::build_graph(dot, ord)?;
            Ok((graph, InputDialect::DotOrd, Vec::new()))
        }
        _ => unreachable!("parse_args rejects more than two files"),
    }
}

fn heuristic_kind(name: &str, sift_order: SiftOrder, randomize_order: bool) -> Result<HeuristicKind, CliError> {
    Ok(match name {
        "median" => HeuristicKind::Median(NoNeighborPolicy::default()),
        "bary" => HeuristicKind::Barycenter(NoNeighborPolicy::default()),
        "mod_bary" => HeuristicKind::ModifiedBarycenter {
            balanced_weight: false,
            policy: NoNeighborPolicy::default(),
        },
        "mcn" => HeuristicKind::MaximumCrossingsNode,
        "sifting" => HeuristicKind::Sifting { order: sift_order, randomize_order },
        "mce" => HeuristicKind::MaximumCrossingsEdge { end_of_pass: MceEndOfPass::default() },
        "mce_s" => HeuristicKind::MaximumCrossingsEdgeTotal { end_of_pass: MceEndOfPass::default() },
        "mse" => HeuristicKind::MaximumStretchEdge,
        _ => return Err(CliError::Usage(usage())),
    })
}

fn preprocessor_kind(name: &str) -> Result<PreprocessorKind, CliError> {
    Ok(match name {
        "bfs" => PreprocessorKind::BreadthFirstSearch,
        "dfs" => PreprocessorKind::DepthFirstSearch,
        "mds" => PreprocessorKind::MiddleDegreeSort,
        _ => return Err(CliError::Usage(usage())),
    })
}

fn sift_order(name: &str) -> Result<SiftOrder, CliError> {
    Ok(match name {
        "layer" => SiftOrder::Layer,
        "degree" => SiftOrder::Degree,
        "random" => SiftOrder::Random,
        _ => return Err(CliError::Usage(usage())),
    })
}

fn pareto_pair(name: &str) -> Result<ParetoObjectivePair, CliError> {
    Ok(match name {
        "b_t" => ParetoObjectivePair::BottleneckTotal,
        "s_t" => ParetoObjectivePair::StretchTotal,
        "b_s" => ParetoObjectivePair::BottleneckStretch,
        _ => return Err(CliError::Usage(usage())),
    })
}

/// Which tracked best-so-far snapshot `-o` selects. `Engine::new` runs an
/// initial tracker update, so every objective already has a snapshot by
/// the time this is called.
fn select_snapshot<'a>(engine: &'a Engine, objective: &str) -> Result<(&'a OrderingSnapshot, &'static str), CliError> {
    let trackers = &engine.controller.trackers;
    let (snapshot, tag) = match objective {
        "t" => (&trackers.total_crossings.snapshot, naming::objective_tag_total()),
        "b" => (&trackers.bottleneck_crossings.snapshot, naming::objective_tag_bottleneck()),
        "s" => (&trackers.total_stretch.snapshot, naming::objective_tag_stretch()),
        "bs" => (&trackers.bottleneck_stretch.snapshot, naming::objective_tag_bottleneck_stretch()),
        _ => return Err(CliError::Usage(usage())),
    };
    let snapshot = snapshot
        .as_ref()
        .expect("Engine::new always seeds every tracker's snapshot");
    Ok((snapshot, tag))
}

fn write_result(graph: &Graph, dialect: &InputDialect, base: &str, preprocessor: Option<&str>, heuristic: Option<&str>, tag: &str, to_stdout: bool) -> Result<(), CliError> {
    match dialect {
        InputDialect::Sgf => {
            if to_stdout {
                sgf::write_sgf_stdout(graph)?;
            } else {
                let name = naming::build_name(base, preprocessor, heuristic, tag, "sgf");
                sgf::write_sgf_to(std::path::Path::new(&name), graph)?;
            }
        }
        InputDialect::DotOrd => {
            if to_stdout {
                print!("{}", dot_ord::write_ord(graph));
            } else {
                let name = naming::build_name(base, preprocessor, heuristic, tag, "ord");
                dot_ord::write_ord_to(std::path::Path::new(&name), graph)?;
            }
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let (graph, dialect, warnings) = load_graph(&args)?;
    for warning in &warnings {
        report::print_warning(warning);
    }
    report::print_isolated_nodes_notice(&graph);

    let trace_freq = args.trace_freq.unwrap_or(if args.verbose { 0 } else { -1 });
    let run_options = RunOptions {
        max_iterations: args.max_iterations,
        max_runtime: args.max_runtime,
        capture_iteration: args.capture_iteration,
        trace_freq,
    };
    let pareto = args.pareto.as_deref().map(pareto_pair).transpose()?;
    let seed = args.seed.unwrap_or(0);
    let mut engine = Engine::new(graph, run_options, seed, pareto);

    if let Some(name) = &args.preprocessor {
        engine.preprocess(preprocessor_kind(name)?);
    }

    let order = args.sift_order.as_deref().map(sift_order).transpose()?.unwrap_or_default();
    if let Some(name) = &args.heuristic {
        let kind = heuristic_kind(name, order, args.seed.is_some())?;
        engine.run(kind);
    }

    let mut swapped = false;
    if args.swap {
        engine.swap_postprocess();
        swapped = true;
    }

    for event in &engine.controller.trace_events {
        report::print_trace_event(event);
    }

    if args.verbose {
        let measures = engine.measures();
        report::print_verbose_summary(&engine.graph, &measures, engine.controller.iteration, engine.controller.pass);
    }

    if args.write_base.is_some() || args.write_stdout {
        let base = match args.write_base.as_deref() {
            Some("_") | None => engine.graph.name.clone(),
            Some(other) => other.to_string(),
        };
        let objective = args.primary_objective.as_deref().unwrap_or("t");

        let (out_graph, tag) = if swapped {
            (engine.graph.clone(), naming::objective_tag_post().to_string())
        } else {
            let (snapshot, tag) = select_snapshot(&engine, objective)?;
            let mut g = engine.graph.clone();
            snapshot.restore(&mut g);
            layerforge_core::crossing::update_all_crossings(&mut g);
            (g, tag.to_string())
        };

        write_result(
            &out_graph,
            &dialect,
            &base,
            args.preprocessor.as_deref(),
            args.heuristic.as_deref(),
            &tag,
            args.write_stdout,
        )?;

        for (iteration, snapshot) in &engine.controller.captures {
            let mut g = engine.graph.clone();
            snapshot.restore(&mut g);
            layerforge_core::crossing::update_all_crossings(&mut g);
            write_result(
                &g,
                &dialect,
                &base,
                args.preprocessor.as_deref(),
                args.heuristic.as_deref(),
                &naming::objective_tag_capture(*iteration),
                false,
            )?;
        }
    }

    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
