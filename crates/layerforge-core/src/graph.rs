//! The layered DAG data model: layers, nodes with a position within their
//! layer, edges classified by the layer-direction of their endpoints, and
//! the master node/edge sequences that let heuristics walk the whole graph.

use crate::error::{Error, Result};

/// Stable identifier for a node: equal to its 0-based index in the master
/// node sequence, in order of first appearance at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Stable identifier for an edge: equal to its 0-based index in the master
/// edge sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub layer: usize,
    pub position: usize,
    /// Edges to the higher-numbered layer.
    pub up_edges: Vec<EdgeId>,
    /// Edges to the lower-numbered layer.
    pub down_edges: Vec<EdgeId>,
    /// Sort-key used by weight-based heuristics (median, barycenter, ...).
    pub weight: f64,
    /// Pinned by heuristics that iteratively fix nodes (mcn, mce, sifting).
    pub fixed: bool,
    pub up_crossings: u32,
    pub down_crossings: u32,
    /// DFS scratch.
    pub marked: bool,
    pub preorder_number: i32,
}

impl Node {
    pub fn degree(&self) -> usize {
        self.up_edges.len() + self.down_edges.len()
    }

    pub fn crossings(&self) -> u32 {
        self.up_crossings + self.down_crossings
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub id: EdgeId,
    /// Endpoint on the higher-numbered layer.
    pub up_node: NodeId,
    /// Endpoint on the lower-numbered layer.
    pub down_node: NodeId,
    pub crossings: u32,
    /// Used by mce to mark an edge as processed in the current pass.
    pub fixed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub node_ids: Vec<NodeId>,
    pub fixed: bool,
}

impl Layer {
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Graph {
    pub name: String,
    pub comments: String,
    layers: Vec<Layer>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    isolated_nodes: usize,
}

impl Graph {
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_isolated_nodes(&self) -> usize {
        self.isolated_nodes
    }

    pub fn layer(&self, index: usize) -> &Layer {
        &self.layers[index]
    }

    pub fn layer_mut(&mut self, index: usize) -> &mut Layer {
        &mut self.layers[index]
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Master node order (order of first appearance at load time); ids are
    /// indices into this sequence, so this is just `0..num_nodes`.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + use<> {
        (0..self.edges.len() as u32).map(EdgeId)
    }

    /// The node at `layer`/`position`, per the layer invariant.
    pub fn node_at(&self, layer: usize, position: usize) -> NodeId {
        self.layers[layer].node_ids[position]
    }

    /// Rewrites `layer`'s node sequence to `order`, and reassigns every
    /// affected node's `position` to match its new slot. `order` must be a
    /// permutation of the node ids already on `layer`.
    pub fn set_layer_order(&mut self, layer: usize, order: Vec<NodeId>) {
        debug_assert_eq!(order.len(), self.layers[layer].node_ids.len());
        for (position, &node_id) in order.iter().enumerate() {
            self.nodes[node_id.index()].position = position;
        }
        self.layers[layer].node_ids = order;
    }

    /// Swaps the nodes at `position` and `position + 1` on `layer` and
    /// updates their cached positions.
    pub fn swap_adjacent(&mut self, layer: usize, position: usize) {
        let ids = &mut self.layers[layer].node_ids;
        ids.swap(position, position + 1);
        let a = ids[position];
        let b = ids[position + 1];
        self.nodes[a.index()].position = position;
        self.nodes[b.index()].position = position + 1;
    }

    /// Removes `node_id` from its current slot on its layer and reinserts
    /// it at `new_position`, shifting the nodes in between and reassigning
    /// every shifted node's `position`. Used by sifting.
    pub fn move_within_layer(&mut self, node_id: NodeId, new_position: usize) {
        let layer_index = self.nodes[node_id.index()].layer;
        let ids = &mut self.layers[layer_index].node_ids;
        let old_position = self.nodes[node_id.index()].position;
        if old_position == new_position {
            return;
        }
        ids.remove(old_position);
        ids.insert(new_position, node_id);
        let lo = old_position.min(new_position);
        let hi = old_position.max(new_position);
        for (offset, &id) in ids[lo..=hi].iter().enumerate() {
            self.nodes[id.index()].position = lo + offset;
        }
    }

    pub fn isolated(&self, id: NodeId) -> bool {
        self.node(id).degree() == 0
    }

    pub fn clear_fixed_nodes(&mut self) {
        for node in &mut self.nodes {
            node.fixed = false;
        }
    }

    pub fn clear_fixed_edges(&mut self) {
        for edge in &mut self.edges {
            edge.fixed = false;
        }
    }

    pub fn clear_fixed_layers(&mut self) {
        for layer in &mut self.layers {
            layer.fixed = false;
        }
    }

    pub fn total_degree(&self, layer: usize) -> usize {
        self.layers[layer]
            .node_ids
            .iter()
            .map(|&id| self.node(id).degree())
            .sum()
    }

    pub fn max_degree_layer(&self) -> Option<usize> {
        (0..self.num_layers()).max_by_key(|&l| self.total_degree(l))
    }
}

/// Accumulates nodes and edges during loading, then validates and freezes
/// them into a [`Graph`]. Mirrors the append-only adjacency-building pass
/// the original C loader performs before crossings can be computed.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    name: String,
    comments: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    declared_layer_count: Option<usize>,
}

impl GraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: String::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            declared_layer_count: None,
        }
    }

    pub fn push_comment(&mut self, line: &str) {
        self.comments.push_str(line);
        self.comments.push('\n');
    }

    pub fn set_declared_layer_count(&mut self, count: usize) {
        self.declared_layer_count = Some(count);
    }

    /// Adds a node at the given layer/position. The returned id equals the
    /// node's index in the master sequence, i.e. order of first appearance.
    pub fn add_node(&mut self, name: impl Into<String>, layer: usize, position: usize) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name: name.into(),
            layer,
            position,
            up_edges: Vec::new(),
            down_edges: Vec::new(),
            weight: 0.0,
            fixed: false,
            up_crossings: 0,
            down_crossings: 0,
            marked: false,
            preorder_number: -1,
        });
        id
    }

    /// Adds an edge between two already-added nodes. Endpoints may be
    /// supplied in either order; the one on the higher layer becomes
    /// `up_node`. Fails if the two layers are not exactly 1 apart.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<EdgeId> {
        let layer_a = self.nodes[a.index()].layer as i64;
        let layer_b = self.nodes[b.index()].layer as i64;
        if (layer_a - layer_b).abs() != 1 {
            return Err(Error::NonAdjacentLayers {
                from: self.nodes[a.index()].name.clone(),
                target: self.nodes[b.index()].name.clone(),
                source_layer: layer_a,
                target_layer: layer_b,
            });
        }
        let (up_node, down_node) = if layer_a > layer_b { (a, b) } else { (b, a) };
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            id,
            up_node,
            down_node,
            crossings: 0,
            fixed: false,
        });
        self.nodes[down_node.index()].up_edges.push(id);
        self.nodes[up_node.index()].down_edges.push(id);
        Ok(id)
    }

    /// Validates the layer invariant and freezes the builder into a
    /// [`Graph]. `positions` gives, for each node id (in master-list
    /// order), the within-layer position it was assigned at load time;
    /// duplicate positions on a layer are a fatal error.
    pub fn build(self) -> Result<Graph> {
        let num_layers = self
            .nodes
            .iter()
            .map(|n| n.layer + 1)
            .max()
            .unwrap_or(0)
            .max(self.declared_layer_count.unwrap_or(0));

        let mut layers: Vec<Layer> = (0..num_layers).map(|_| Layer::default()).collect();
        let mut seen_positions: Vec<std::collections::HashSet<usize>> =
            (0..num_layers).map(|_| std::collections::HashSet::new()).collect();

        // Group nodes by declared layer/position, then sort each layer by
        // ascending declared position and reassign position to match the
        // resulting slot, per the sgf loading contract.
        let mut by_layer: Vec<Vec<(usize, NodeId)>> = (0..num_layers).map(|_| Vec::new()).collect();
        for node in &self.nodes {
            if !seen_positions[node.layer].insert(node.position) {
                return Err(Error::DuplicatePosition {
                    layer: node.layer,
                    position: node.position,
                });
            }
            by_layer[node.layer].push((node.position, node.id));
        }
        for layer_nodes in &mut by_layer {
            layer_nodes.sort_by_key(|&(position, _)| position);
        }

        let mut nodes = self.nodes;
        for (layer_index, layer_nodes) in by_layer.into_iter().enumerate() {
            let ids: Vec<NodeId> = layer_nodes.into_iter().map(|(_, id)| id).collect();
            for (position, &id) in ids.iter().enumerate() {
                nodes[id.index()].position = position;
            }
            layers[layer_index].node_ids = ids;
        }

        let isolated_nodes = nodes.iter().filter(|n| n.degree() == 0).count();

        Ok(Graph {
            name: self.name,
            comments: self.comments,
            layers,
            nodes,
            edges: self.edges,
            isolated_nodes,
        })
    }
}
