//! Arena graph: nodes and links live in two flat vectors and refer to each other through
//! [`NodeId`] / [`LinkId`] handles.

use crate::palette::spread_color;
use crate::settings::DEFAULTS;
use crate::table::{DataTable, Record};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// Measured text width in pixels (filled in by layout).
    pub width: f64,
    /// Measured text height in pixels (filled in by layout).
    pub height: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: Label,
    pub input_weight: f64,
    pub output_weight: f64,
    /// Incident links in insertion order; the layout re-sorts them by the opposite endpoint.
    pub links: Vec<LinkId>,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl Node {
    /// The larger of the two aggregate weights; drives the node's height.
    pub fn weight(&self) -> f64 {
        self.input_weight.max(self.output_weight)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub source: NodeId,
    pub destination: NodeId,
    pub weight: f64,
    pub height: f64,
    pub dy_source: f64,
    pub dy_destination: f64,
    pub color: String,
}

impl Link {
    /// The endpoint that is not `node`.
    pub fn other_end(&self, node: NodeId) -> NodeId {
        if self.source == node {
            self.destination
        } else {
            self.source
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SankeyGraph {
    nodes: Vec<Node>,
    links: Vec<Link>,
    #[serde(skip)]
    index: IndexMap<String, NodeId>,
}

impl SankeyGraph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn link_mut(&mut self, id: LinkId) -> &mut Link {
        &mut self.links[id.0]
    }

    pub fn node_by_label(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&id| self.node(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Outgoing links of `id` (the node is the link's source).
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &Link> + '_ {
        self.node(id)
            .links
            .iter()
            .map(|&l| self.link(l))
            .filter(move |l| l.source == id)
    }
}

/// Incremental builder. Labels are deduplicated in first-seen order; self-referencing links
/// are dropped.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: SankeyGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for `name`, creating it on first sight.
    pub fn ensure_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.graph.index.get(name) {
            return id;
        }
        let id = NodeId(self.graph.nodes.len());
        self.graph.nodes.push(Node {
            id,
            label: Label {
                name: name.to_string(),
                width: 0.0,
                height: 0.0,
                color: DEFAULTS.label_color.to_string(),
            },
            input_weight: 0.0,
            output_weight: 0.0,
            links: Vec::new(),
            column: 0,
            x: 0.0,
            y: 0.0,
            width: DEFAULTS.node_width,
            height: 0.0,
            color: DEFAULTS.node_color.to_string(),
        });
        self.graph.index.insert(name.to_string(), id);
        id
    }

    /// Adds a directed link. Returns `None` (and records nothing) when both ends are the same
    /// node. `weight` is expected to be normalized already.
    pub fn add_link(
        &mut self,
        source: NodeId,
        destination: NodeId,
        weight: f64,
        color: Option<&str>,
    ) -> Option<LinkId> {
        if source == destination {
            tracing::trace!(node = source.0, "dropping self-referencing link");
            return None;
        }
        let id = LinkId(self.graph.links.len());
        self.graph.links.push(Link {
            id,
            source,
            destination,
            weight,
            height: 0.0,
            dy_source: 0.0,
            dy_destination: 0.0,
            color: color.unwrap_or(DEFAULTS.link_color).to_string(),
        });

        let src = self.graph.node_mut(source);
        src.links.push(id);
        src.output_weight += weight;

        let dst = self.graph.node_mut(destination);
        dst.links.push(id);
        dst.input_weight += weight;

        Some(id)
    }

    /// Assigns node colours from `palette` and hands back the graph.
    pub fn finish(mut self, palette: &[&str]) -> SankeyGraph {
        let count = self.graph.nodes.len();
        for (i, node) in self.graph.nodes.iter_mut().enumerate() {
            if let Some(color) = spread_color(palette, i, count) {
                node.color = color.to_string();
            }
        }
        self.graph
    }
}

/// Builds the graph for a list of normalized records.
///
/// Nodes are created for every source label first, then every destination label, so a label
/// that only appears on self-referencing rows still gets a node.
pub fn build_graph_from_records(
    records: &[Record],
    label_color: &str,
    palette: &[&str],
) -> SankeyGraph {
    let mut builder = GraphBuilder::new();
    for r in records {
        builder.ensure_node(&r.source);
    }
    for r in records {
        builder.ensure_node(&r.destination);
    }
    for r in records {
        if r.is_self_reference() {
            continue;
        }
        let source = builder.ensure_node(&r.source);
        let destination = builder.ensure_node(&r.destination);
        builder.add_link(source, destination, r.weight, r.link_color.as_deref());
    }

    let mut graph = builder.finish(palette);
    for node in graph.nodes_mut() {
        node.label.color = label_color.to_string();
    }
    tracing::debug!(
        nodes = graph.node_count(),
        links = graph.link_count(),
        "built sankey graph"
    );
    graph
}

pub fn build_graph(table: &DataTable, palette: &[&str]) -> SankeyGraph {
    let settings = table.settings();
    build_graph_from_records(&table.records(), &settings.label_color, palette)
}
