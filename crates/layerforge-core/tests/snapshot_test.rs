use layerforge_core::crossing::{number_of_crossings, update_all_crossings};
use layerforge_core::graph::GraphBuilder;
use layerforge_core::snapshot::OrderingSnapshot;

#[test]
fn restoring_a_snapshot_reproduces_its_crossing_count() {
    let mut b = GraphBuilder::new("g");
    let a0 = b.add_node("a0", 0, 0);
    let a1 = b.add_node("a1", 0, 1);
    let b0 = b.add_node("b0", 1, 0);
    let b1 = b.add_node("b1", 1, 1);
    b.add_edge(a0, b1).unwrap();
    b.add_edge(a1, b0).unwrap();
    let mut g = b.build().unwrap();
    update_all_crossings(&mut g);

    let snapshot = OrderingSnapshot::capture(&g);
    let crossings_at_capture = number_of_crossings(&g);
    assert_eq!(crossings_at_capture, 1);

    g.swap_adjacent(0, 0);
    update_all_crossings(&mut g);
    assert_eq!(number_of_crossings(&g), 0);

    snapshot.restore(&mut g);
    update_all_crossings(&mut g);
    assert_eq!(number_of_crossings(&g), crossings_at_capture);
}

#[test]
fn layer_invariant_holds_after_restore() {
    let mut b = GraphBuilder::new("g");
    for position in 0..4 {
        b.add_node(format!("n{position}"), 0, position);
    }
    let mut g = b.build().unwrap();
    let snapshot = OrderingSnapshot::capture(&g);

    g.swap_adjacent(0, 0);
    g.swap_adjacent(0, 2);
    snapshot.restore(&mut g);

    for (position, &id) in g.layer(0).node_ids.iter().enumerate() {
        assert_eq!(g.node(id).position, position);
        assert_eq!(g.node(id).layer, 0);
    }
}
