use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{AlgoError, AlgoResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Missing weights count as 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default)]
    pub directed: bool,
}

impl Edge {
    pub fn weight(&self) -> i64 {
        self.weight.unwrap_or(1)
    }
}

/// Immutable traversal input: nodes plus an edge list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node(mut self, id: impl Into<String>) -> Self {
        self.nodes.push(Node {
            id: id.into(),
            label: None,
        });
        self
    }

    #[must_use]
    pub fn edge(mut self, source: impl Into<String>, target: impl Into<String>, weight: i64) -> Self {
        self.edges.push(Edge {
            source: source.into(),
            target: target.into(),
            weight: Some(weight),
            directed: false,
        });
        self
    }

    /// Unique node ids and edges that only reference known nodes.
    pub fn validate(&self) -> AlgoResult<()> {
        self.index().map(|_| ())
    }

    fn index(&self) -> AlgoResult<HashMap<&str, usize>> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if index.insert(node.id.as_str(), i).is_some() {
                return Err(AlgoError::invalid_input(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !index.contains_key(endpoint.as_str()) {
                    return Err(AlgoError::invalid_input(format!(
                        "edge {} -> {} references unknown node '{}'",
                        edge.source, edge.target, endpoint
                    )));
                }
            }
        }
        Ok(index)
    }

    /// Index-based view with arcs laid out according to `view`.
    pub(crate) fn indexed(&self, view: EdgeView) -> AlgoResult<Indexed> {
        let index = self.index()?;
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        let mut edges = Vec::with_capacity(self.edges.len());

        for edge in &self.edges {
            let source = index[edge.source.as_str()];
            let target = index[edge.target.as_str()];
            let weight = edge.weight();
            adjacency[source].push(Link { to: target, weight });
            if view.both_ways(edge) && source != target {
                adjacency[target].push(Link { to: source, weight });
            }
            edges.push(IndexedEdge {
                source,
                target,
                weight,
            });
        }

        Ok(Indexed {
            ids: self.nodes.iter().map(|n| n.id.clone()).collect(),
            adjacency,
            edges,
        })
    }
}

/// How edge direction flags are read when building adjacency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EdgeView {
    /// Per-edge flags apply; `all_directed` makes every edge one-way.
    AsGiven { all_directed: bool },
    /// Every edge is traversable both ways, whatever its flag says.
    Undirected,
}

impl EdgeView {
    fn both_ways(self, edge: &Edge) -> bool {
        match self {
            Self::AsGiven { all_directed } => !all_directed && !edge.directed,
            Self::Undirected => true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    pub to: usize,
    pub weight: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct IndexedEdge {
    pub source: usize,
    pub target: usize,
    pub weight: i64,
}

/// Validated graph with nodes addressed by position.
#[derive(Clone, Debug)]
pub(crate) struct Indexed {
    ids: Vec<String>,
    adjacency: Vec<Vec<Link>>,
    edges: Vec<IndexedEdge>,
}

impl Indexed {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn id(&self, node: usize) -> &str {
        &self.ids[node]
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|known| known == id)
    }

    /// Outgoing arcs in edge-list order.
    pub fn neighbors(&self, node: usize) -> &[Link] {
        &self.adjacency[node]
    }

    pub fn edges(&self) -> &[IndexedEdge] {
        &self.edges
    }
}
