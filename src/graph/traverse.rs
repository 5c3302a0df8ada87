use std::collections::VecDeque;

use crate::control::stepper::{Beat, StepResult, Stepper};

use super::{EdgeKind, GraphSnapshot, Indexed, Trace, TraversalOutcome};

/// Breadth-first search. Nodes are marked visited when dequeued; the first node
/// to discover a neighbor becomes its parent.
pub(crate) fn bfs(
    graph: &Indexed,
    start: usize,
    stepper: &mut Stepper<'_, GraphSnapshot>,
) -> StepResult<TraversalOutcome> {
    let mut trace = Trace::new(graph);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        stepper.checkpoint()?;
        if trace.is_visited(current) {
            continue;
        }
        trace.visit(current);
        if let Some(parent) = trace.parent(current) {
            trace.explore(parent, current, EdgeKind::Tree, None, None);
        }
        stepper.emit(trace.snapshot())?;

        for link in graph.neighbors(current) {
            if trace.is_visited(link.to) {
                continue;
            }
            trace.explore(current, link.to, EdgeKind::Examining, None, None);
            if link.to != start && trace.parent(link.to).is_none() {
                trace.set_parent(link.to, current);
            }
            queue.push_back(link.to);
            stepper.emit_beat(trace.snapshot(), Beat::Brief)?;
        }
    }

    Ok(trace.finish())
}

/// Depth-first search on an explicit `(node, parent)` stack. Neighbors are
/// pushed in reverse so they pop in adjacency order, like the recursive form.
pub(crate) fn dfs(
    graph: &Indexed,
    start: usize,
    stepper: &mut Stepper<'_, GraphSnapshot>,
) -> StepResult<TraversalOutcome> {
    let mut trace = Trace::new(graph);
    let mut stack = vec![(start, None)];

    while let Some((current, parent)) = stack.pop() {
        stepper.checkpoint()?;
        if trace.is_visited(current) {
            continue;
        }
        trace.visit(current);
        if let Some(parent) = parent {
            trace.set_parent(current, parent);
            trace.explore(parent, current, EdgeKind::Tree, None, None);
        }
        stepper.emit(trace.snapshot())?;

        for link in graph.neighbors(current).iter().rev() {
            if trace.is_visited(link.to) {
                continue;
            }
            trace.explore(current, link.to, EdgeKind::Examining, None, None);
            stack.push((link.to, Some(current)));
            stepper.emit_beat(trace.snapshot(), Beat::Brief)?;
        }
    }

    Ok(trace.finish())
}
