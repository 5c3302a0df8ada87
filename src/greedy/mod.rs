//! Greedy algorithms: activity selection, Huffman coding, fractional knapsack
//! and job sequencing with deadlines.

use crate::control::stepper::DelayCurve;

mod activity;
mod huffman;
mod jobs;
mod knapsack;

pub use activity::{Activity, ActivityOutcome, ActivitySnapshot, select_activities};
pub use huffman::{HuffmanNode, HuffmanOutcome, HuffmanSnapshot, Symbol, huffman_coding};
pub use jobs::{Job, JobOutcome, JobSnapshot, MAX_DEADLINE, schedule_jobs};
pub use knapsack::{
    FractionalOutcome, FractionalSnapshot, Item, Taken, fractional_knapsack,
};

pub(crate) use huffman::check_symbols;
pub(crate) use jobs::check_jobs;
pub(crate) use knapsack::check_items;

pub const DELAY_CURVE: DelayCurve = DelayCurve::new(800, 50);

#[cfg(test)]
#[path = "../../tests/unit/greedy/mod.rs"]
mod tests;
