//! Graph traversals and spanning trees over an immutable node/edge list.
//!
//! Every algorithm reports the same snapshot shape: the visit order, the node
//! being expanded, the parent map and the explored-edge list where each entry
//! is tagged `tree` or `examining`. A disconnected graph is valid input; only
//! the start node's component is reached by the traversals.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::control::stepper::{DelayCurve, StepResult, Stepper};
use crate::foundation::error::{AlgoError, AlgoResult};

mod model;
mod traverse;
mod union_find;
mod weighted;

pub use model::{Edge, Graph, Node};
pub(crate) use model::{EdgeView, Indexed};

/// Graph delay: 800 ms at speed 0 down to 50 ms at speed 100.
pub const DELAY_CURVE: DelayCurve = DelayCurve::new(800, 50);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Tree,
    Examining,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExploredEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    /// Tentative distance of `target` (Dijkstra tree edges only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot {
    /// Visited node ids, in visit order.
    pub visited: Vec<String>,
    pub current: Option<String>,
    pub parents: BTreeMap<String, String>,
    pub explored: Vec<ExploredEdge>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeEdge {
    pub source: String,
    pub target: String,
    pub weight: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    pub edges: Vec<TreeEdge>,
    pub total_weight: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraversalOutcome {
    pub visit_order: Vec<String>,
    pub parents: BTreeMap<String, String>,
    pub explored: Vec<ExploredEdge>,
    /// Dijkstra only; `None` marks an unreachable node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distances: Option<BTreeMap<String, Option<i64>>>,
    /// Prim and Kruskal only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spanning_tree: Option<SpanningTree>,
}

impl TraversalOutcome {
    pub fn path_to(&self, target: &str) -> Vec<String> {
        shortest_path(&self.parents, target)
    }
}

/// Follows parent links from `target` back to the root, returned root first.
///
/// Stops if the links loop back on themselves.
pub fn shortest_path(parents: &BTreeMap<String, String>, target: &str) -> Vec<String> {
    let mut path = vec![target.to_owned()];
    let mut current = target;
    while let Some(parent) = parents.get(current) {
        if path.len() > parents.len() {
            break;
        }
        path.push(parent.clone());
        current = parent;
    }
    path.reverse();
    path
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
    Prim,
    Kruskal,
}

impl GraphAlgorithm {
    /// Validate the graph and resolve the start node. Nothing is emitted on error.
    pub fn prepare(
        self,
        graph: &Graph,
        start: Option<&str>,
        directed: bool,
    ) -> AlgoResult<GraphRun> {
        // Spanning trees are defined on the undirected view.
        let view = match self {
            Self::Prim | Self::Kruskal => EdgeView::Undirected,
            _ => EdgeView::AsGiven {
                all_directed: directed,
            },
        };
        let indexed = graph.indexed(view)?;

        if self == Self::Dijkstra {
            if let Some(edge) = graph.edges.iter().find(|e| e.weight() < 0) {
                return Err(AlgoError::invalid_input(format!(
                    "dijkstra needs non-negative weights; {} -> {} has {}",
                    edge.source,
                    edge.target,
                    edge.weight()
                )));
            }
        }

        let start = match (start, self) {
            (_, Self::Kruskal) if indexed.len() == 0 => 0,
            (Some(id), _) => indexed.position(id).ok_or_else(|| {
                AlgoError::invalid_input(format!("start node '{id}' is not in the graph"))
            })?,
            (None, _) if indexed.len() > 0 => 0,
            (None, _) => return Err(AlgoError::invalid_input("graph has no nodes")),
        };

        Ok(GraphRun {
            algorithm: self,
            graph: indexed,
            start,
        })
    }
}

/// A validated graph ready to be traversed.
#[derive(Clone, Debug)]
pub struct GraphRun {
    algorithm: GraphAlgorithm,
    graph: Indexed,
    start: usize,
}

impl GraphRun {
    pub fn algorithm(&self) -> GraphAlgorithm {
        self.algorithm
    }

    pub fn start(&self) -> &str {
        self.graph.id(self.start)
    }

    #[tracing::instrument(skip_all, fields(algorithm = ?self.algorithm, nodes = self.graph.len()))]
    pub fn run(&self, stepper: &mut Stepper<'_, GraphSnapshot>) -> StepResult<TraversalOutcome> {
        let g = &self.graph;
        match self.algorithm {
            GraphAlgorithm::Bfs => traverse::bfs(g, self.start, stepper),
            GraphAlgorithm::Dfs => traverse::dfs(g, self.start, stepper),
            GraphAlgorithm::Dijkstra => weighted::dijkstra(g, self.start, stepper),
            GraphAlgorithm::Prim => weighted::prim(g, self.start, stepper),
            GraphAlgorithm::Kruskal => weighted::kruskal(g, stepper),
        }
    }
}

/// Mutable traversal state shared by all algorithms; snapshots are copies of it.
pub(crate) struct Trace<'g> {
    graph: &'g Indexed,
    order: Vec<usize>,
    visited: Vec<bool>,
    current: Option<usize>,
    parents: Vec<Option<usize>>,
    explored: Vec<ExploredEdge>,
}

impl<'g> Trace<'g> {
    pub fn new(graph: &'g Indexed) -> Self {
        Self {
            graph,
            order: Vec::new(),
            visited: vec![false; graph.len()],
            current: None,
            parents: vec![None; graph.len()],
            explored: Vec::new(),
        }
    }

    pub fn is_visited(&self, node: usize) -> bool {
        self.visited[node]
    }

    /// Marks `node` visited and current; no-op on the visit order if already seen.
    pub fn visit(&mut self, node: usize) {
        if !self.visited[node] {
            self.visited[node] = true;
            self.order.push(node);
        }
        self.current = Some(node);
    }

    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents[node]
    }

    pub fn set_parent(&mut self, node: usize, parent: usize) {
        self.parents[node] = Some(parent);
    }

    /// Reverses the parent chain above `node`, making it the root of its tree.
    pub fn reroot(&mut self, node: usize) {
        let mut below = None;
        let mut current = Some(node);
        while let Some(n) = current {
            current = std::mem::replace(&mut self.parents[n], below);
            below = Some(n);
        }
    }

    /// Demotes the latest `tree` edge into `target` to `examining`.
    pub fn retract_tree_edge(&mut self, target: usize) {
        let graph = self.graph;
        let id = graph.id(target);
        if let Some(edge) = self
            .explored
            .iter_mut()
            .rev()
            .find(|e| e.kind == EdgeKind::Tree && e.target == id)
        {
            edge.kind = EdgeKind::Examining;
        }
    }

    pub fn explore(
        &mut self,
        source: usize,
        target: usize,
        kind: EdgeKind,
        weight: Option<i64>,
        distance: Option<i64>,
    ) {
        self.explored.push(ExploredEdge {
            source: self.graph.id(source).to_owned(),
            target: self.graph.id(target).to_owned(),
            kind,
            weight,
            distance,
        });
    }

    fn parent_map(&self) -> BTreeMap<String, String> {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(node, parent)| {
                parent.map(|p| (self.graph.id(node).to_owned(), self.graph.id(p).to_owned()))
            })
            .collect()
    }

    fn ids(&self, nodes: &[usize]) -> Vec<String> {
        nodes.iter().map(|&n| self.graph.id(n).to_owned()).collect()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            visited: self.ids(&self.order),
            current: self.current.map(|n| self.graph.id(n).to_owned()),
            parents: self.parent_map(),
            explored: self.explored.clone(),
        }
    }

    pub fn finish(self) -> TraversalOutcome {
        TraversalOutcome {
            visit_order: self.ids(&self.order),
            parents: self.parent_map(),
            explored: self.explored,
            distances: None,
            spanning_tree: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/mod.rs"]
mod tests;
