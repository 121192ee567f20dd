//! Graphviz DOT rendering
//!
//! Output is deterministic: nodes and edges are emitted sorted by identifier.
//! An undirected connection is stored as two edges; only the one whose tail
//! identifier sorts before its head identifier is emitted.

use crate::graph::{Edge, Graph};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// Presentation settings for DOT output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotConfig {
    /// Name written after `graph`/`digraph`
    pub graph_name: String,
    /// Default attributes applied to every node (`node [...]`)
    pub node_attributes: Vec<(String, String)>,
    /// Default attributes applied to every edge (`edge [...]`)
    pub edge_attributes: Vec<(String, String)>,
    /// Label every edge with its weight
    pub weight_labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            graph_name: "G".to_string(),
            node_attributes: vec![("shape".to_string(), "circle".to_string())],
            edge_attributes: Vec::new(),
            weight_labels: false,
        }
    }
}

/// `Display` adapter rendering a graph as DOT
///
/// The graph is snapshotted through its query methods each time the adapter
/// is formatted.
pub struct Dot<'a> {
    graph: &'a Graph,
    config: &'a DotConfig,
}

impl<'a> Dot<'a> {
    pub fn new(graph: &'a Graph, config: &'a DotConfig) -> Self {
        Dot { graph, config }
    }
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let directed = self.graph.is_directed();
        let (keyword, connector) = if directed {
            ("digraph", "->")
        } else {
            ("graph", "--")
        };

        writeln!(f, "{} {} {{", keyword, quote(&self.config.graph_name))?;
        if !self.config.node_attributes.is_empty() {
            writeln!(f, "    node [{}];", attribute_list(&self.config.node_attributes))?;
        }
        if !self.config.edge_attributes.is_empty() {
            writeln!(f, "    edge [{}];", attribute_list(&self.config.edge_attributes))?;
        }

        let nodes = self.graph.get_nodes();
        let mut ids: Vec<_> = nodes.keys().collect();
        ids.sort();
        for id in ids {
            writeln!(f, "    {};", quote(id.as_str()))?;
        }

        let edges = self.graph.get_edges();
        let mut rendered: Vec<&Edge> = edges
            .values()
            .flat_map(|heads| heads.values())
            .filter(|edge| directed || edge.tail().id() < edge.head().id())
            .collect();
        rendered.sort_by(|a, b| {
            (a.tail().id(), a.head().id()).cmp(&(b.tail().id(), b.head().id()))
        });

        for edge in rendered {
            write!(
                f,
                "    {} {} {}",
                quote(edge.tail().id().as_str()),
                connector,
                quote(edge.head().id().as_str())
            )?;
            if self.config.weight_labels {
                write!(f, " [label={}]", quote(&edge.weight().to_string()))?;
            }
            writeln!(f, ";")?;
        }

        writeln!(f, "}}")
    }
}

/// Render `graph` with the default [`DotConfig`]
pub fn to_dot(graph: &Graph) -> String {
    Dot::new(graph, &DotConfig::default()).to_string()
}

/// Write the DOT rendering of `graph` to `writer`
pub fn write_dot<W: io::Write>(
    graph: &Graph,
    config: &DotConfig,
    mut writer: W,
) -> io::Result<()> {
    write!(writer, "{}", Dot::new(graph, config))?;
    writer.flush()
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn attribute_list(attributes: &[(String, String)]) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!("{}={}", key, quote(value)))
        .collect::<Vec<_>>()
        .join(", ")
}
