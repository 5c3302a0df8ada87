use std::sync::mpsc;

use serde::Serialize;

use crate::backtracking::{BoardSnapshot, QueensOutcome, SudokuCell, SudokuOutcome};
use crate::control::stepper::SnapshotSink;
use crate::dp::{FibonacciOutcome, KnapsackOutcome, LcsOutcome, LisOutcome, TableSnapshot};
use crate::graph::{GraphSnapshot, TraversalOutcome};
use crate::greedy::{
    ActivityOutcome, ActivitySnapshot, FractionalOutcome, FractionalSnapshot, HuffmanOutcome,
    HuffmanSnapshot, JobOutcome, JobSnapshot,
};
use crate::numeric::{
    FactorOutcome, FactorSnapshot, GcdOutcome, GcdSnapshot, SieveOutcome, SieveSnapshot,
};
use crate::searching::{ProbeSnapshot, SearchOutcome};
use crate::sorting::ArraySnapshot;
use crate::tree::{TreeOutcome, TreeSnapshot};

/// One observable state of a running algorithm, tagged by engine family.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "family", content = "data", rename_all = "snake_case")]
pub enum Snapshot {
    Array(ArraySnapshot<i64>),
    Probe(ProbeSnapshot),
    Graph(GraphSnapshot),
    Table(TableSnapshot),
    Activity(ActivitySnapshot),
    Huffman(HuffmanSnapshot),
    Fractional(FractionalSnapshot),
    Jobs(JobSnapshot),
    Queens(BoardSnapshot<bool>),
    Sudoku(BoardSnapshot<SudokuCell>),
    Tree(TreeSnapshot),
    Sieve(SieveSnapshot),
    Gcd(GcdSnapshot),
    Factor(FactorSnapshot),
}

/// Final answer of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AlgorithmResult {
    Sorted(Vec<i64>),
    Search(SearchOutcome),
    Graph(TraversalOutcome),
    Fibonacci(FibonacciOutcome),
    Knapsack(KnapsackOutcome),
    Lcs(LcsOutcome),
    Lis(LisOutcome),
    Activities(ActivityOutcome),
    Huffman(HuffmanOutcome),
    Fractional(FractionalOutcome),
    Jobs(JobOutcome),
    Queens(QueensOutcome),
    Sudoku(SudokuOutcome),
    Tree(TreeOutcome),
    Traversal(Vec<i64>),
    Lca(Option<i64>),
    Sieve(SieveOutcome),
    Gcd(GcdOutcome),
    Factors(FactorOutcome),
}

/// Forwards snapshots to a channel. A dropped receiver only means nobody is
/// watching; the run itself carries on.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<Snapshot>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Snapshot>) -> Self {
        Self { tx }
    }
}

impl SnapshotSink<Snapshot> for ChannelSink {
    fn push(&mut self, snapshot: Snapshot) {
        let _ = self.tx.send(snapshot);
    }
}

/// Lifts an engine's own snapshot type into [`Snapshot`] on the way out.
pub(crate) struct Mapped<'a, S> {
    inner: &'a mut dyn SnapshotSink<Snapshot>,
    wrap: fn(S) -> Snapshot,
}

impl<'a, S> Mapped<'a, S> {
    pub(crate) fn new(inner: &'a mut dyn SnapshotSink<Snapshot>, wrap: fn(S) -> Snapshot) -> Self {
        Self { inner, wrap }
    }
}

impl<S> SnapshotSink<S> for Mapped<'_, S> {
    fn push(&mut self, snapshot: S) {
        self.inner.push((self.wrap)(snapshot));
    }
}

/// Counts what passes through to `inner`.
pub(crate) struct Tally<'a> {
    inner: &'a mut dyn SnapshotSink<Snapshot>,
    pub(crate) count: u64,
}

impl<'a> Tally<'a> {
    pub(crate) fn new(inner: &'a mut dyn SnapshotSink<Snapshot>) -> Self {
        Self { inner, count: 0 }
    }
}

impl SnapshotSink<Snapshot> for Tally<'_> {
    fn push(&mut self, snapshot: Snapshot) {
        self.count += 1;
        self.inner.push(snapshot);
    }
}
