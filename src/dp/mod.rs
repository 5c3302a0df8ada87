//! Table-filling dynamic programming.
//!
//! Each problem pre-sizes a zeroed table, emits it once before the fill loop,
//! then emits after every cell it writes. Outcomes echo the inputs next to the
//! answer and carry one reconstructed solution.

use serde::{Deserialize, Serialize};

use crate::control::stepper::DelayCurve;
use crate::foundation::core::Cell;
use crate::foundation::error::{AlgoError, AlgoResult};

mod grid;
mod sequence;

pub use grid::{knapsack, lcs};
pub use sequence::{fibonacci, lis};

pub const DELAY_CURVE: DelayCurve = DelayCurve::new(800, 50);

/// `fib(93)` is the last value that fits in a `u64`.
pub const MAX_FIBONACCI: usize = 93;
pub const MAX_KNAPSACK_ITEMS: usize = 64;
pub const MAX_KNAPSACK_CAPACITY: usize = 500;
pub const MAX_LCS_LEN: usize = 128;
pub const MAX_LIS_LEN: usize = 512;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DpTable {
    Linear(Vec<u64>),
    Grid(Vec<Vec<u64>>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cursor {
    Index(usize),
    Cell(Cell),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub table: DpTable,
    pub cursor: Option<Cursor>,
}

impl TableSnapshot {
    pub(crate) fn linear(table: &[u64], cursor: Option<usize>) -> Self {
        Self {
            table: DpTable::Linear(table.to_vec()),
            cursor: cursor.map(Cursor::Index),
        }
    }

    pub(crate) fn grid(table: &[Vec<u64>], cursor: Option<Cell>) -> Self {
        Self {
            table: DpTable::Grid(table.to_vec()),
            cursor: cursor.map(Cursor::Cell),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackProblem {
    pub weights: Vec<u64>,
    pub values: Vec<u64>,
    pub capacity: usize,
}

impl KnapsackProblem {
    pub fn validate(&self) -> AlgoResult<()> {
        if self.weights.len() != self.values.len() {
            return Err(AlgoError::invalid_input(format!(
                "knapsack has {} weights but {} values",
                self.weights.len(),
                self.values.len()
            )));
        }
        if self.weights.len() > MAX_KNAPSACK_ITEMS {
            return Err(AlgoError::invalid_input(format!(
                "knapsack supports at most {MAX_KNAPSACK_ITEMS} items"
            )));
        }
        if self.capacity > MAX_KNAPSACK_CAPACITY {
            return Err(AlgoError::invalid_input(format!(
                "knapsack capacity {} exceeds {MAX_KNAPSACK_CAPACITY}",
                self.capacity
            )));
        }
        Ok(())
    }
}

pub fn check_fibonacci(n: usize) -> AlgoResult<()> {
    if n > MAX_FIBONACCI {
        return Err(AlgoError::invalid_input(format!(
            "fibonacci index {n} exceeds {MAX_FIBONACCI}"
        )));
    }
    Ok(())
}

pub fn check_lcs(first: &str, second: &str) -> AlgoResult<()> {
    for s in [first, second] {
        if s.chars().count() > MAX_LCS_LEN {
            return Err(AlgoError::invalid_input(format!(
                "lcs strings are limited to {MAX_LCS_LEN} characters"
            )));
        }
    }
    Ok(())
}

pub fn check_lis(values: &[i64]) -> AlgoResult<()> {
    if values.len() > MAX_LIS_LEN {
        return Err(AlgoError::invalid_input(format!(
            "lis input is limited to {MAX_LIS_LEN} values"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FibonacciOutcome {
    pub n: usize,
    pub value: u64,
    pub table: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KnapsackOutcome {
    pub best_value: u64,
    pub weights: Vec<u64>,
    pub values: Vec<u64>,
    pub capacity: usize,
    /// Indices of the chosen items, ascending.
    pub chosen: Vec<usize>,
    pub table: Vec<Vec<u64>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LcsOutcome {
    pub length: u64,
    pub first: String,
    pub second: String,
    pub sequence: String,
    pub table: Vec<Vec<u64>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LisOutcome {
    pub length: u64,
    pub array: Vec<i64>,
    pub subsequence: Vec<i64>,
    pub table: Vec<u64>,
}

#[cfg(test)]
#[path = "../../tests/unit/dp/mod.rs"]
mod tests;
