//! Exhaustive search with undo: N-Queens (all solutions) and a Sudoku solver
//! (first solution).
//!
//! Both consult the run's cancellation at every candidate, so a cancelled run
//! unwinds within one placement attempt and never reports a partial solution.
//! Each decision point is emitted as a board snapshot and, when enabled,
//! appended to a replayable step log.

use serde::Serialize;

use crate::control::stepper::{Beat, DelayCurve, StepResult, Stepper};
use crate::foundation::core::Cell;

mod queens;
mod sudoku;

pub use queens::{MAX_QUEENS, QueensOutcome, check_queens, n_queens};
pub use sudoku::{Difficulty, Sudoku, SudokuCell, SudokuOutcome, solve_sudoku};

pub const DELAY_CURVE: DelayCurve = DelayCurve::new(800, 50);

/// Step log entries kept per run; later steps are still emitted and counted.
pub const STEP_LOG_LIMIT: usize = 4_096;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    Place,
    Backtrack,
    Solution,
}

impl StepAction {
    fn beat(self) -> Beat {
        match self {
            Self::Place => Beat::Full,
            Self::Backtrack => Beat::Half,
            Self::Solution => Beat::Double,
        }
    }
}

/// One replayable entry of the step log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepRecord<C> {
    pub board: Vec<Vec<C>>,
    pub action: StepAction,
    pub cell: Option<Cell>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot<C> {
    pub board: Vec<Vec<C>>,
    pub action: StepAction,
    pub cell: Option<Cell>,
    pub steps_taken: usize,
    pub solutions_found: usize,
}

pub(crate) struct Journal<C> {
    keep: bool,
    steps: Vec<StepRecord<C>>,
    taken: usize,
}

impl<C: Clone> Journal<C> {
    pub fn new(keep: bool) -> Self {
        Self {
            keep,
            steps: Vec::new(),
            taken: 0,
        }
    }

    pub fn record(
        &mut self,
        board: Vec<Vec<C>>,
        action: StepAction,
        cell: Option<Cell>,
        solutions_found: usize,
        stepper: &mut Stepper<'_, BoardSnapshot<C>>,
    ) -> StepResult<()> {
        self.taken += 1;
        if self.keep && self.steps.len() < STEP_LOG_LIMIT {
            self.steps.push(StepRecord {
                board: board.clone(),
                action,
                cell,
            });
        }
        stepper.emit_beat(
            BoardSnapshot {
                board,
                action,
                cell,
                steps_taken: self.taken,
                solutions_found,
            },
            action.beat(),
        )
    }

    pub fn taken(&self) -> usize {
        self.taken
    }

    /// True when steps were taken past the log limit.
    pub fn truncated(&self) -> bool {
        self.keep && self.taken > self.steps.len()
    }

    pub fn into_steps(self) -> Vec<StepRecord<C>> {
        self.steps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backtracking/mod.rs"]
mod tests;
