use serde::Serialize;

use crate::control::stepper::{Beat, StepResult, Stepper};
use crate::foundation::core::Cell;
use crate::foundation::error::{AlgoError, AlgoResult};

use super::{BoardSnapshot, Journal, StepAction, StepRecord};

pub const MAX_QUEENS: usize = 12;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueensOutcome {
    pub n: usize,
    /// Each solution lists the queen's column for every row.
    pub solutions: Vec<Vec<usize>>,
    pub steps_taken: usize,
    /// The first steps of the run, up to [`super::STEP_LOG_LIMIT`].
    pub steps: Vec<StepRecord<bool>>,
    pub steps_truncated: bool,
}

pub fn check_queens(n: usize) -> AlgoResult<()> {
    if n == 0 || n > MAX_QUEENS {
        return Err(AlgoError::invalid_input(format!(
            "board size {n} is outside 1..={MAX_QUEENS}"
        )));
    }
    Ok(())
}

struct Board {
    n: usize,
    queens: Vec<Option<usize>>,
    columns: Vec<bool>,
    diagonals: Vec<bool>,
    anti_diagonals: Vec<bool>,
}

impl Board {
    fn new(n: usize) -> Self {
        Self {
            n,
            queens: vec![None; n],
            columns: vec![false; n],
            diagonals: vec![false; (2 * n).saturating_sub(1)],
            anti_diagonals: vec![false; (2 * n).saturating_sub(1)],
        }
    }

    fn is_safe(&self, row: usize, col: usize) -> bool {
        !self.columns[col]
            && !self.diagonals[row + col]
            && !self.anti_diagonals[row + self.n - 1 - col]
    }

    fn set(&mut self, row: usize, col: usize, occupied: bool) {
        self.queens[row] = occupied.then_some(col);
        self.columns[col] = occupied;
        self.diagonals[row + col] = occupied;
        self.anti_diagonals[row + self.n - 1 - col] = occupied;
    }

    fn cells(&self) -> Vec<Vec<bool>> {
        self.queens
            .iter()
            .map(|queen| (0..self.n).map(|c| *queen == Some(c)).collect())
            .collect()
    }

    fn placement(&self) -> Vec<usize> {
        self.queens.iter().flatten().copied().collect()
    }
}

struct Search<'s, 'a> {
    board: Board,
    solutions: Vec<Vec<usize>>,
    journal: Journal<bool>,
    stepper: &'s mut Stepper<'a, BoardSnapshot<bool>>,
}

impl Search<'_, '_> {
    fn log(&mut self, action: StepAction, cell: Option<Cell>) -> StepResult<()> {
        let found = self.solutions.len();
        self.journal
            .record(self.board.cells(), action, cell, found, self.stepper)
    }

    fn solve(&mut self, row: usize) -> StepResult<()> {
        if row == self.board.n {
            self.solutions.push(self.board.placement());
            return self.log(StepAction::Solution, None);
        }
        for col in 0..self.board.n {
            self.stepper.checkpoint()?;
            if !self.board.is_safe(row, col) {
                self.stepper.idle(Beat::Brief)?;
                continue;
            }
            let cell = Cell::new(row, col);
            self.board.set(row, col, true);
            self.log(StepAction::Place, Some(cell))?;
            self.solve(row + 1)?;
            self.board.set(row, col, false);
            self.log(StepAction::Backtrack, Some(cell))?;
        }
        Ok(())
    }
}

/// Finds every placement of `n` non-attacking queens, row by row.
#[tracing::instrument(skip(stepper))]
pub fn n_queens(
    n: usize,
    record_steps: bool,
    stepper: &mut Stepper<'_, BoardSnapshot<bool>>,
) -> StepResult<QueensOutcome> {
    let mut search = Search {
        board: Board::new(n),
        solutions: Vec::new(),
        journal: Journal::new(record_steps),
        stepper,
    };
    search.solve(0)?;
    tracing::debug!(solutions = search.solutions.len(), "n-queens exhausted");

    Ok(QueensOutcome {
        n,
        solutions: search.solutions,
        steps_taken: search.journal.taken(),
        steps_truncated: search.journal.truncated(),
        steps: search.journal.into_steps(),
    })
}
