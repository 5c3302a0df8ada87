//! Binary search trees (plain, AVL, Red-Black) plus read-only walks.
//!
//! Nodes live in an arena and link to each other by index, parent links
//! included. Every operation emits the whole tree shape with the node being
//! looked at; mutating operations re-check the tree's invariants afterwards
//! and abort the run with [`Halt::Invariant`] if a rebalance went wrong.

use serde::{Deserialize, Serialize};

use crate::control::stepper::{DelayCurve, Halt, NullSink, StepResult, Stepper};
use crate::foundation::error::{AlgoError, AlgoResult};

mod arena;
mod ops;
mod walk;

pub use arena::{Color, Tree, TreeKind, TreeShape};
pub use walk::Traversal;

pub const DELAY_CURVE: DelayCurve = DelayCurve::new(800, 50);

/// Upper bound on keys per run, initial keys and operations together.
pub const MAX_TREE_KEYS: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreeEvent {
    Visit,
    Insert,
    Duplicate,
    /// A node took its in-order successor's key before the successor is removed.
    Replace,
    Remove,
    RotateLeft,
    RotateRight,
    Recolor,
    Found,
    Missing,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub root: Option<TreeShape>,
    pub current: Option<i64>,
    /// Keys visited by the current operation, in order.
    pub visited: Vec<i64>,
    pub event: TreeEvent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeOp {
    Insert(i64),
    Delete(i64),
    Search(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OpResult {
    pub op: TreeOp,
    /// Inserted, removed or found.
    pub applied: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeOutcome {
    pub kind: TreeKind,
    pub results: Vec<OpResult>,
    pub in_order: Vec<i64>,
    pub root: Option<TreeShape>,
}

pub fn check_tree_input(kind: TreeKind, keys: usize, ops: usize) -> AlgoResult<()> {
    if !kind.is_ordered() {
        return Err(AlgoError::invalid_input(
            "insert, delete and search need an ordered tree kind",
        ));
    }
    if keys.saturating_add(ops) > MAX_TREE_KEYS {
        return Err(AlgoError::invalid_input(format!(
            "at most {MAX_TREE_KEYS} keys and operations per run"
        )));
    }
    Ok(())
}

/// Inserts `keys` in order without emitting anything.
pub fn build(kind: TreeKind, keys: &[i64]) -> AlgoResult<Tree> {
    let mut tree = Tree::new(kind);
    let mut sink = NullSink;
    let mut stepper: Stepper<'_, TreeSnapshot> = Stepper::detached(&mut sink);
    for &key in keys {
        tree.insert(key, &mut stepper).map_err(|halt| match halt {
            Halt::Invariant(msg) => AlgoError::invariant(msg),
            Halt::Cancelled => AlgoError::invariant("detached build was cancelled"),
        })?;
    }
    Ok(tree)
}

/// Applies `ops` in order, emitting each operation's steps.
#[tracing::instrument(skip_all, fields(kind = ?tree.kind(), ops = ops.len()))]
pub fn apply_ops(
    tree: &mut Tree,
    ops: &[TreeOp],
    stepper: &mut Stepper<'_, TreeSnapshot>,
) -> StepResult<TreeOutcome> {
    let mut results = Vec::with_capacity(ops.len());
    for &op in ops {
        let applied = match op {
            TreeOp::Insert(key) => tree.insert(key, stepper)?,
            TreeOp::Delete(key) => tree.delete(key, stepper)?,
            TreeOp::Search(key) => tree.search(key, stepper)?,
        };
        results.push(OpResult { op, applied });
    }
    Ok(TreeOutcome {
        kind: tree.kind(),
        results,
        in_order: tree.in_order(),
        root: tree.shape(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/tree/mod.rs"]
mod tests;
