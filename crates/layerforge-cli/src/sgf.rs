//! The `sgf` text format: a self-contained layered graph.
//!
//! ```text
//! c <comment>                  # zero or more
//! t <name> <N> <M> <L>
//! n <id> <layer> <position>    # exactly N, in any order
//! e <source_id> <target_id>    # exactly M
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write;

use layerforge_core::Result;
use layerforge_core::graph::{Graph, GraphBuilder, NodeId};

/// Parses an `sgf` document into a [`Graph`]. A mismatch between the
/// declared node/edge counts on the `t` line and the counts actually read
/// is a warning, returned alongside the graph rather than raised as an
/// error — the loader trusts what it actually saw.
pub fn read_sgf(text: &str) -> Result<(Graph, Vec<String>)> {
    let mut warnings = Vec::new();
    let mut builder: Option<GraphBuilder> = None;
    let mut declared_nodes = 0usize;
    let mut declared_edges = 0usize;
    let mut id_to_node: HashMap<i64, NodeId> = HashMap::new();
    let mut read_nodes = 0usize;
    let mut pending_edges: Vec<(i64, i64)> = Vec::new();
    let mut pending_comments: Vec<String> = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let Some(tag) = fields.next() else { continue };

        match tag {
            "c" => {
                let comment = line.strip_prefix('c').unwrap_or("").trim().to_string();
                match builder.as_mut() {
                    Some(b) => b.push_comment(&comment),
                    None => pending_comments.push(comment),
                }
            }
            "t" => {
                let name = fields.next().ok_or_else(|| malformed(line_no, "missing graph name on t line"))?;
                declared_nodes = parse_usize(line_no, fields.next())?;
                declared_edges = parse_usize(line_no, fields.next())?;
                let declared_layers = parse_usize(line_no, fields.next())?;
                let mut b = GraphBuilder::new(name);
                b.set_declared_layer_count(declared_layers);
                for comment in pending_comments.drain(..) {
                    b.push_comment(&comment);
                }
                builder = Some(b);
            }
            "n" => {
                let b = builder
                    .as_mut()
                    .ok_or_else(|| malformed(line_no, "n line before t line"))?;
                let id = parse_i64(line_no, fields.next())?;
                let layer = parse_usize(line_no, fields.next())?;
                let position = parse_usize(line_no, fields.next())?;
                let node_id = b.add_node(id.to_string(), layer, position);
                id_to_node.insert(id, node_id);
                read_nodes += 1;
            }
            "e" => {
                let source = parse_i64(line_no, fields.next())?;
                let target = parse_i64(line_no, fields.next())?;
                pending_edges.push((source, target));
            }
            other => return Err(malformed(line_no, &format!("unrecognized tag '{other}'"))),
        }
    }

    let mut builder = builder.ok_or_else(|| malformed(0, "missing t line"))?;
    for (source, target) in &pending_edges {
        let a = lookup(*source, &id_to_node)?;
        let b = lookup(*target, &id_to_node)?;
        builder.add_edge(a, b)?;
    }

    if read_nodes != declared_nodes {
        warnings.push(format!(
            "sgf header declared {declared_nodes} nodes but {read_nodes} were read; using the actual count"
        ));
    }
    if pending_edges.len() != declared_edges {
        warnings.push(format!(
            "sgf header declared {declared_edges} edges but {} were read; using the actual count",
            pending_edges.len()
        ));
    }

    Ok((builder.build()?, warnings))
}

fn lookup(id: i64, map: &HashMap<i64, NodeId>) -> Result<NodeId> {
    map.get(&id)
        .copied()
        .ok_or(layerforge_core::Error::MissingNode { id })
}

fn malformed(line_no: usize, message: &str) -> layerforge_core::Error {
    layerforge_core::Error::MalformedInput {
        context: format!("sgf line {}", line_no + 1),
        message: message.to_string(),
    }
}

fn parse_usize(line_no: usize, field: Option<&str>) -> Result<usize> {
    field
        .ok_or_else(|| malformed(line_no, "missing field"))?
        .parse::<usize>()
        .map_err(|_| malformed(line_no, "expected a non-negative integer"))
}

fn parse_i64(line_no: usize, field: Option<&str>) -> Result<i64> {
    field
        .ok_or_else(|| malformed(line_no, "missing field"))?
        .parse::<i64>()
        .map_err(|_| malformed(line_no, "expected an integer"))
}

/// Renders `graph` as an `sgf` document. Node names round-trip as their
/// numeric ids when the graph was itself loaded from `sgf`; arbitrary
/// `dot` names are mapped to their master-sequence index instead, since
/// `sgf` ids must be integers.
pub fn write_sgf(graph: &Graph) -> String {
    let mut out = String::new();
    for line in graph.comments.lines() {
        let _ = writeln!(out, "c {line}");
    }
    let _ = writeln!(
        out,
        "t {} {} {} {}",
        graph.name,
        graph.num_nodes(),
        graph.num_edges(),
        graph.num_layers()
    );
    for id in graph.node_ids() {
        let node = graph.node(id);
        let _ = writeln!(out, "n {} {} {}", id.0, node.layer, node.position);
    }
    for id in graph.edge_ids() {
        let edge = graph.edge(id);
        let _ = writeln!(out, "e {} {}", edge.down_node.0, edge.up_node.0);
    }
    out
}

pub fn write_sgf_to(path: &std::path::Path, graph: &Graph) -> std::io::Result<()> {
    std::fs::write(path, write_sgf(graph))
}

pub fn write_sgf_stdout(graph: &Graph) -> std::io::Result<()> {
    std::io::stdout().lock().write_all(write_sgf(graph).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
c a sample graph
t demo 4 2 2
n 0 0 0
n 1 0 1
n 2 1 1
n 3 1 0
e 0 2
e 1 3
";

    #[test]
    fn reads_nodes_sorted_by_declared_position() {
        let (graph, warnings) = read_sgf(DOC).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(graph.name, "demo");
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.comments.trim(), "a sample graph");
        // node 3 was declared last but sits at layer 1 position 0.
        let n3 = graph.node_ids().find(|&id| graph.node(id).name == "3").unwrap();
        assert_eq!(graph.node(n3).position, 0);
    }

    #[test]
    fn mismatched_header_counts_produce_a_warning_not_an_error() {
        let doc = "t demo 9 9 2\nn 0 0 0\nn 1 1 0\ne 0 1\n";
        let (graph, warnings) = read_sgf(doc).unwrap();
        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn round_trips_through_write_then_read() {
        let (graph, _) = read_sgf(DOC).unwrap();
        let rewritten = write_sgf(&graph);
        let (reread, warnings) = read_sgf(&rewritten).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(reread.num_nodes(), graph.num_nodes());
        assert_eq!(reread.num_edges(), graph.num_edges());
        assert_eq!(reread.num_layers(), graph.num_layers());
        for layer in 0..graph.num_layers() {
            assert_eq!(reread.layer(layer).len(), graph.layer(layer).len());
        }
    }

    #[test]
    fn duplicate_position_is_rejected() {
        let doc = "t bad 2 0 1\nn 0 0 0\nn 1 0 0\n";
        assert!(read_sgf(doc).is_err());
    }
}
