use layerforge_core::controller::RunOptions;
use layerforge_core::crossing::number_of_crossings;
use layerforge_core::engine::{Engine, HeuristicKind};
use layerforge_core::graph::{Graph, GraphBuilder};
use layerforge_core::heuristics::{NoNeighborPolicy, SiftOrder};

fn path_graph() -> Graph {
    let mut b = GraphBuilder::new("path");
    let n0 = b.add_node("0", 0, 0);
    let n1 = b.add_node("1", 1, 0);
    let n2 = b.add_node("2", 2, 0);
    b.add_edge(n0, n1).unwrap();
    b.add_edge(n1, n2).unwrap();
    b.build().unwrap()
}

fn k22() -> Graph {
    let mut b = GraphBuilder::new("k22");
    let a0 = b.add_node("a0", 0, 0);
    let a1 = b.add_node("a1", 0, 1);
    let b0 = b.add_node("b0", 1, 0);
    let b1 = b.add_node("b1", 1, 1);
    b.add_edge(a0, b0).unwrap();
    b.add_edge(a0, b1).unwrap();
    b.add_edge(a1, b0).unwrap();
    b.add_edge(a1, b1).unwrap();
    b.build().unwrap()
}

fn identity_three_by_three() -> Graph {
    let mut b = GraphBuilder::new("identity");
    let mut rows = Vec::new();
    for layer in 0..3 {
        let row: Vec<_> = (0..3).map(|position| b.add_node(format!("{layer}.{position}"), layer, position)).collect();
        if let Some(prev) = rows.last() {
            let prev: &Vec<_> = prev;
            for i in 0..3 {
                b.add_edge(prev[i], row[i]).unwrap();
            }
        }
        rows.push(row);
    }
    b.build().unwrap()
}

fn three_node_crossing_pair() -> Graph {
    let mut b = GraphBuilder::new("three");
    let a0 = b.add_node("a0", 0, 0);
    let a1 = b.add_node("a1", 0, 1);
    let a2 = b.add_node("a2", 0, 2);
    let b0 = b.add_node("b0", 1, 0);
    let b1 = b.add_node("b1", 1, 1);
    let b2 = b.add_node("b2", 1, 2);
    b.add_edge(a0, b2).unwrap();
    b.add_edge(a1, b1).unwrap();
    b.add_edge(a2, b0).unwrap();
    b.build().unwrap()
}

#[test]
fn path_graph_has_zero_crossings_under_barycenter() {
    let mut engine = Engine::new(path_graph(), RunOptions::default(), 1, None);
    engine.run(HeuristicKind::Barycenter(NoNeighborPolicy::default()));
    assert_eq!(number_of_crossings(&engine.graph), 0);
}

#[test]
fn k22_converges_to_one_crossing_under_barycenter_and_median() {
    let mut engine = Engine::new(k22(), RunOptions::default(), 1, None);
    engine.run(HeuristicKind::Barycenter(NoNeighborPolicy::default()));
    assert_eq!(number_of_crossings(&engine.graph), 1);

    let mut engine = Engine::new(k22(), RunOptions::default(), 1, None);
    engine.run(HeuristicKind::Median(NoNeighborPolicy::default()));
    assert_eq!(number_of_crossings(&engine.graph), 1);
}

#[test]
fn identity_matching_is_left_unchanged_by_every_heuristic() {
    for heuristic in [
        HeuristicKind::Barycenter(NoNeighborPolicy::default()),
        HeuristicKind::Median(NoNeighborPolicy::default()),
        HeuristicKind::MaximumCrossingsNode,
    ] {
        let mut engine = Engine::new(identity_three_by_three(), RunOptions::default(), 1, None);
        engine.run(heuristic);
        assert_eq!(number_of_crossings(&engine.graph), 0);
    }
}

#[test]
fn three_crossings_resolve_to_zero_under_barycenter_and_sifting() {
    let mut engine = Engine::new(three_node_crossing_pair(), RunOptions::default(), 1, None);
    assert_eq!(number_of_crossings(&engine.graph), 3);
    engine.run(HeuristicKind::Barycenter(NoNeighborPolicy::default()));
    assert_eq!(number_of_crossings(&engine.graph), 0);

    let mut engine = Engine::new(three_node_crossing_pair(), RunOptions::default(), 1, None);
    engine.run(HeuristicKind::Sifting {
        order: SiftOrder::Degree,
        randomize_order: false,
    });
    assert_eq!(number_of_crossings(&engine.graph), 0);
}

fn random_bipartite(seed: u64, left: usize, right: usize, edges: usize) -> Graph {
    use layerforge_core::rng::Rng;
    let mut rng = Rng::from_seed(seed);
    let mut b = GraphBuilder::new("random");
    let left_ids: Vec<_> = (0..left).map(|p| b.add_node(format!("l{p}"), 0, p)).collect();
    let right_ids: Vec<_> = (0..right).map(|p| b.add_node(format!("r{p}"), 1, p)).collect();
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for l in 0..left {
        for r in 0..right {
            pairs.push((l, r));
        }
    }
    rng.shuffle(&mut pairs);
    for &(l, r) in pairs.iter().take(edges.min(pairs.len())) {
        b.add_edge(left_ids[l], right_ids[r]).unwrap();
    }
    b.build().unwrap()
}

#[test]
fn zero_runtime_budget_stops_after_at_most_one_pass() {
    let graph = random_bipartite(7, 40, 40, 1000);
    let options = RunOptions {
        max_runtime: Some(0.0),
        ..Default::default()
    };
    let mut engine = Engine::new(graph, options, 7, None);
    let initial_best = engine.controller.trackers.total_crossings.best.unwrap();
    engine.run(HeuristicKind::Barycenter(NoNeighborPolicy::default()));
    assert!(engine.controller.pass <= 1);
    let final_best = engine.controller.trackers.total_crossings.best.unwrap();
    assert!(final_best <= initial_best);
}
