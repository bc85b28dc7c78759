//! The `dot`+`ord` input pair: a minimal graphviz-subset edge list plus an
//! `ord` file giving each layer's node order.
//!
//! ```text
//! # ord: optional comments, then per-layer blocks
//! 0 { a b c }
//! 1 { d e }
//! ```
//!
//! `dot` is read only for its graph name and directed edge list; edge
//! direction is ignored, since layer membership (and therefore which
//! endpoint is "up") comes entirely from `ord`.

use std::collections::HashMap;
use std::fmt::Write as _;

use layerforge_core::Result;
use layerforge_core::error::Error;
use layerforge_core::graph::{Graph, GraphBuilder, NodeId};

pub struct OrdLayers {
    pub layers: Vec<Vec<String>>,
}

pub fn read_ord(text: &str) -> Result<OrdLayers> {
    let mut layers: Vec<Vec<String>> = Vec::new();
    for (line_no, raw_line) in text.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let open = line.find('{').ok_or_else(|| malformed(line_no, "expected '{'"))?;
        let close = line.find('}').ok_or_else(|| malformed(line_no, "expected '}'"))?;
        let layer_index: usize = line[..open]
            .trim()
            .parse()
            .map_err(|_| malformed(line_no, "expected a layer number"))?;
        let names: Vec<String> = line[open + 1..close].split_whitespace().map(str::to_string).collect();
        if layer_index >= layers.len() {
            layers.resize(layer_index + 1, Vec::new());
        }
        layers[layer_index] = names;
    }
    Ok(OrdLayers { layers })
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn malformed(line_no: usize, message: &str) -> Error {
    Error::MalformedInput {
        context: format!("ord line {}", line_no + 1),
        message: message.to_string(),
    }
}

pub struct DotGraph {
    pub name: String,
    pub edges: Vec<(String, String)>,
}

/// Reads just enough of the `dot` subset this format needs: the graph name
/// from `digraph NAME {`, and every `a -> b` / `a -- b` edge line.
pub fn read_dot(text: &str) -> Result<DotGraph> {
    let mut name = String::from("graph");
    let mut edges = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        if let Some(rest) = line.strip_prefix("digraph") {
            if let Some(brace) = rest.find('{') {
                let candidate = rest[..brace].trim();
                if !candidate.is_empty() {
                    name = candidate.to_string();
                }
            }
            continue;
        }
        if line == "{" || line == "}" || line.starts_with('}') {
            continue;
        }
        let arrow = line.find("->").or_else(|| line.find("--"));
        if let Some(pos) = arrow {
            let (left, right) = line.split_at(pos);
            let right = &right[2..];
            let a = left.trim().trim_matches('"');
            let b = right
                .trim()
                .trim_end_matches(';')
                .trim()
                .trim_matches('"');
            if a.is_empty() || b.is_empty() {
                return Err(malformed(line_no, "malformed edge statement"));
            }
            edges.push((a.to_string(), b.to_string()));
        }
    }

    Ok(DotGraph { name, edges })
}

/// Combines a parsed `dot` edge list with `ord`'s layer orderings into a
/// [`Graph`]: every name in `ord` becomes a node at its layer/position;
/// `dot` edges are reclassified up/down by comparing endpoint layers.
pub fn build_graph(dot: DotGraph, ord: OrdLayers) -> Result<Graph> {
    let mut builder = GraphBuilder::new(dot.name);
    builder.set_declared_layer_count(ord.layers.len());
    let mut by_name: HashMap<String, NodeId> = HashMap::new();

    for (layer, names) in ord.layers.iter().enumerate() {
        for (position, name) in names.iter().enumerate() {
            let id = builder.add_node(name.clone(), layer, position);
            by_name.insert(name.clone(), id);
        }
    }

    for (a, b) in dot.edges {
        let a_id = by_name
            .get(&a)
            .copied()
            .ok_or_else(|| Error::MalformedInput {
                context: "dot edge".to_string(),
                message: format!("node '{a}' not present in ord file"),
            })?;
        let b_id = by_name
            .get(&b)
            .copied()
            .ok_or_else(|| Error::MalformedInput {
                context: "dot edge".to_string(),
                message: format!("node '{b}' not present in ord file"),
            })?;
        builder.add_edge(a_id, b_id)?;
    }

    builder.build()
}

/// Renders `graph`'s current layer orderings as an `ord` document (the
/// edge list lives in the untouched `dot` source, which this format never
/// rewrites).
pub fn write_ord(graph: &Graph) -> String {
    let mut out = String::new();
    for (index, layer) in graph.layers().iter().enumerate() {
        let names: Vec<&str> = layer.node_ids.iter().map(|&id| graph.node(id).name.as_str()).collect();
        let _ = writeln!(out, "{index} {{ {} }}", names.join(" "));
    }
    out
}

pub fn write_ord_to(path: &std::path::Path, graph: &Graph) -> std::io::Result<()> {
    std::fs::write(path, write_ord(graph))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORD: &str = "\
# layer 0, then layer 1
0 { a b }
1 { c d }
";

    const DOT: &str = "\
digraph demo {
  a -> c;
  b -> d;
}
";

    #[test]
    fn reads_ord_blocks_into_per_layer_name_lists() {
        let ord = read_ord(ORD).unwrap();
        assert_eq!(ord.layers, vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string(), "d".to_string()]]);
    }

    #[test]
    fn reads_dot_name_and_edges() {
        let dot = read_dot(DOT).unwrap();
        assert_eq!(dot.name, "demo");
        assert_eq!(dot.edges, vec![("a".to_string(), "c".to_string()), ("b".to_string(), "d".to_string())]);
    }

    #[test]
    fn build_graph_combines_ord_positions_with_dot_edges() {
        let dot = read_dot(DOT).unwrap();
        let ord = read_ord(ORD).unwrap();
        let graph = build_graph(dot, ord).unwrap();
        assert_eq!(graph.name, "demo");
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.num_layers(), 2);
        let a = graph.node_ids().find(|&id| graph.node(id).name == "a").unwrap();
        assert_eq!(graph.node(a).layer, 0);
        assert_eq!(graph.node(a).position, 0);
    }

    #[test]
    fn build_graph_rejects_an_edge_naming_a_node_absent_from_ord() {
        let dot = read_dot("digraph demo {\n  a -> z;\n}\n").unwrap();
        let ord = read_ord("0 { a }\n").unwrap();
        assert!(build_graph(dot, ord).is_err());
    }

    #[test]
    fn write_ord_round_trips_the_layer_blocks() {
        let dot = read_dot(DOT).unwrap();
        let ord = read_ord(ORD).unwrap();
        let graph = build_graph(dot, ord).unwrap();
        let rewritten = write_ord(&graph);
        let reread = read_ord(&rewritten).unwrap();
        assert_eq!(reread.layers.len(), 2);
        assert_eq!(reread.layers[0].len(), 2);
        assert_eq!(reread.layers[1].len(), 2);
    }
}
