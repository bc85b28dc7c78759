use layerforge_core::crossing::{edge_stretch, max_edge_crossings, node_crossings, number_of_crossings, update_all_crossings};
use layerforge_core::graph::{Graph, GraphBuilder};

fn two_layer_k22() -> Graph {
    let mut b = GraphBuilder::new("k22");
    let a0 = b.add_node("a0", 0, 0);
    let a1 = b.add_node("a1", 0, 1);
    let b0 = b.add_node("b0", 1, 0);
    let b1 = b.add_node("b1", 1, 1);
    b.add_edge(a0, b0).unwrap();
    b.add_edge(a0, b1).unwrap();
    b.add_edge(a1, b0).unwrap();
    b.add_edge(a1, b1).unwrap();
    let mut g = b.build().unwrap();
    update_all_crossings(&mut g);
    g
}

#[test]
fn k22_has_exactly_one_crossing() {
    let g = two_layer_k22();
    assert_eq!(number_of_crossings(&g), 1);
    assert_eq!(max_edge_crossings(&g), 1);
}

#[test]
fn per_edge_crossings_sum_to_twice_the_total() {
    let g = two_layer_k22();
    let sum: u32 = g.edges().iter().map(|e| e.crossings).sum();
    assert_eq!(sum, 2 * number_of_crossings(&g));
}

#[test]
fn identity_matching_has_no_crossings() {
    let mut b = GraphBuilder::new("identity");
    let mut prev = Vec::new();
    for layer in 0..3 {
        let mut row = Vec::new();
        for position in 0..3 {
            row.push(b.add_node(format!("{layer}.{position}"), layer, position));
        }
        if let Some(prev_row) = prev.last() {
            let prev_row: &Vec<_> = prev_row;
            for i in 0..3 {
                b.add_edge(prev_row[i], row[i]).unwrap();
            }
        }
        prev.push(row);
    }
    let mut g = b.build().unwrap();
    update_all_crossings(&mut g);
    assert_eq!(number_of_crossings(&g), 0);
}

#[test]
fn node_crossings_predicts_the_effect_of_a_swap() {
    // layer 0: u, v   layer 1: p, q   edges u-q, v-p cross when u is left of v
    let mut b = GraphBuilder::new("swap");
    let u = b.add_node("u", 0, 0);
    let v = b.add_node("v", 0, 1);
    let p = b.add_node("p", 1, 0);
    let q = b.add_node("q", 1, 1);
    b.add_edge(u, q).unwrap();
    b.add_edge(v, p).unwrap();
    let mut g = b.build().unwrap();
    update_all_crossings(&mut g);

    assert_eq!(number_of_crossings(&g), 1);
    let uv = node_crossings(&g, u, v);
    let vu = node_crossings(&g, v, u);
    assert_eq!(uv, 1);
    assert_eq!(vu, 0);

    g.swap_adjacent(0, 0);
    update_all_crossings(&mut g);
    let after = number_of_crossings(&g);
    assert_eq!(after as i64 - 1, -(uv as i64 - vu as i64));
}

#[test]
fn stretch_is_zero_for_a_vertical_path() {
    let mut b = GraphBuilder::new("path");
    let a = b.add_node("a", 0, 0);
    let c = b.add_node("c", 1, 0);
    let e = b.add_edge(a, c).unwrap();
    let mut g = b.build().unwrap();
    update_all_crossings(&mut g);
    assert_eq!(edge_stretch(&g, e), 0.0);
}

#[test]
fn stretch_is_maximal_for_opposite_corners() {
    let mut b = GraphBuilder::new("diagonal");
    let a0 = b.add_node("a0", 0, 0);
    let _a1 = b.add_node("a1", 0, 1);
    let _b0 = b.add_node("b0", 1, 0);
    let b1 = b.add_node("b1", 1, 1);
    let e = b.add_edge(a0, b1).unwrap();
    let mut g = b.build().unwrap();
    update_all_crossings(&mut g);
    assert_eq!(edge_stretch(&g, e), 1.0);
}
