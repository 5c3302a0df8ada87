use std::collections::BTreeMap;

use crate::control::stepper::{Beat, StepResult, Stepper};
use crate::foundation::heap::StableMinHeap;

use super::union_find::UnionFind;
use super::{EdgeKind, GraphSnapshot, Indexed, SpanningTree, Trace, TraversalOutcome, TreeEdge};

/// Single-source shortest paths keyed by cumulative distance.
pub(crate) fn dijkstra(
    graph: &Indexed,
    start: usize,
    stepper: &mut Stepper<'_, GraphSnapshot>,
) -> StepResult<TraversalOutcome> {
    let mut trace = Trace::new(graph);
    let mut distances: Vec<Option<i64>> = vec![None; graph.len()];
    let mut queue = StableMinHeap::new();
    distances[start] = Some(0);
    queue.push(0, start);

    while let Some((distance, current)) = queue.pop() {
        stepper.checkpoint()?;
        if trace.is_visited(current) {
            continue;
        }
        trace.visit(current);
        stepper.emit(trace.snapshot())?;

        for link in graph.neighbors(current) {
            if trace.is_visited(link.to) {
                continue;
            }
            trace.explore(current, link.to, EdgeKind::Examining, Some(link.weight), None);
            stepper.emit_beat(trace.snapshot(), Beat::Brief)?;

            let candidate = distance.saturating_add(link.weight);
            if distances[link.to].is_none_or(|known| candidate < known) {
                distances[link.to] = Some(candidate);
                trace.retract_tree_edge(link.to);
                trace.set_parent(link.to, current);
                trace.explore(
                    current,
                    link.to,
                    EdgeKind::Tree,
                    Some(link.weight),
                    Some(candidate),
                );
                queue.push(candidate, link.to);
                stepper.emit_beat(trace.snapshot(), Beat::Brief)?;
            }
        }
    }

    let distances: BTreeMap<String, Option<i64>> = distances
        .into_iter()
        .enumerate()
        .map(|(node, d)| (graph.id(node).to_owned(), d))
        .collect();
    let mut outcome = trace.finish();
    outcome.distances = Some(distances);
    Ok(outcome)
}

/// Minimum spanning tree grown from `start`, keyed by connecting edge weight.
pub(crate) fn prim(
    graph: &Indexed,
    start: usize,
    stepper: &mut Stepper<'_, GraphSnapshot>,
) -> StepResult<TraversalOutcome> {
    let mut trace = Trace::new(graph);
    let mut best: Vec<Option<i64>> = vec![None; graph.len()];
    let mut queue = StableMinHeap::new();
    let mut tree = SpanningTree::default();
    queue.push(0, start);

    while let Some((weight, current)) = queue.pop() {
        stepper.checkpoint()?;
        if trace.is_visited(current) {
            continue;
        }
        trace.visit(current);
        if let Some(parent) = trace.parent(current) {
            trace.explore(parent, current, EdgeKind::Tree, Some(weight), None);
            tree.edges.push(TreeEdge {
                source: graph.id(parent).to_owned(),
                target: graph.id(current).to_owned(),
                weight,
            });
            tree.total_weight += weight;
        }
        stepper.emit(trace.snapshot())?;

        for link in graph.neighbors(current) {
            if trace.is_visited(link.to) {
                continue;
            }
            trace.explore(current, link.to, EdgeKind::Examining, Some(link.weight), None);
            if best[link.to].is_none_or(|known| link.weight < known) {
                best[link.to] = Some(link.weight);
                trace.set_parent(link.to, current);
                queue.push(link.weight, link.to);
            }
            stepper.emit_beat(trace.snapshot(), Beat::Brief)?;
        }
    }

    let mut outcome = trace.finish();
    outcome.spanning_tree = Some(tree);
    Ok(outcome)
}

/// Minimum spanning forest. Every edge is examined, even after the forest
/// is complete.
pub(crate) fn kruskal(
    graph: &Indexed,
    stepper: &mut Stepper<'_, GraphSnapshot>,
) -> StepResult<TraversalOutcome> {
    let mut trace = Trace::new(graph);
    let mut sets = UnionFind::new(graph.len());
    let mut tree = SpanningTree::default();

    let mut edges = graph.edges().to_vec();
    edges.sort_by_key(|e| e.weight);

    for edge in edges {
        stepper.checkpoint()?;
        trace.explore(edge.source, edge.target, EdgeKind::Examining, Some(edge.weight), None);
        stepper.emit_beat(trace.snapshot(), Beat::Brief)?;

        if !sets.union(edge.source, edge.target) {
            continue;
        }
        trace.visit(edge.source);
        trace.visit(edge.target);
        if trace.parent(edge.target).is_none() {
            trace.set_parent(edge.target, edge.source);
        } else if trace.parent(edge.source).is_none() {
            trace.set_parent(edge.source, edge.target);
        } else {
            // Both sides already hang off a root; hang target's tree off source.
            trace.reroot(edge.target);
            trace.set_parent(edge.target, edge.source);
        }
        trace.explore(edge.source, edge.target, EdgeKind::Tree, Some(edge.weight), None);
        tree.edges.push(TreeEdge {
            source: graph.id(edge.source).to_owned(),
            target: graph.id(edge.target).to_owned(),
            weight: edge.weight,
        });
        tree.total_weight += edge.weight;
        stepper.emit(trace.snapshot())?;
    }

    let mut outcome = trace.finish();
    outcome.spanning_tree = Some(tree);
    Ok(outcome)
}
