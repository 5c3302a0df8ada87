use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::control::stepper::{StepResult, Stepper};
use crate::foundation::core::Cell;
use crate::foundation::error::{AlgoError, AlgoResult};

use super::{BoardSnapshot, Journal, StepAction, StepRecord};

/// A board cell; `value == 0` means empty. Fixed cells come from the puzzle
/// and are never touched by the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuCell {
    pub value: u8,
    pub fixed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// The preset puzzle for this difficulty, `0` for blanks.
    pub fn puzzle(self) -> [[u8; 9]; 9] {
        match self {
            Self::Easy => [
                [5, 3, 0, 0, 7, 0, 0, 0, 0],
                [6, 0, 0, 1, 9, 5, 0, 0, 0],
                [0, 9, 8, 0, 0, 0, 0, 6, 0],
                [8, 0, 0, 0, 6, 0, 0, 0, 3],
                [4, 0, 0, 8, 0, 3, 0, 0, 1],
                [7, 0, 0, 0, 2, 0, 0, 0, 6],
                [0, 6, 0, 0, 0, 0, 2, 8, 0],
                [0, 0, 0, 4, 1, 9, 0, 0, 5],
                [0, 0, 0, 0, 8, 0, 0, 7, 9],
            ],
            Self::Medium => [
                [0, 0, 0, 2, 6, 0, 7, 0, 1],
                [6, 8, 0, 0, 7, 0, 0, 9, 0],
                [1, 9, 0, 0, 0, 4, 5, 0, 0],
                [8, 2, 0, 1, 0, 0, 0, 4, 0],
                [0, 0, 4, 6, 0, 2, 9, 0, 0],
                [0, 5, 0, 0, 0, 3, 0, 2, 8],
                [0, 0, 9, 3, 0, 0, 0, 7, 4],
                [0, 4, 0, 0, 5, 0, 0, 3, 6],
                [7, 0, 3, 0, 1, 8, 0, 0, 0],
            ],
            Self::Hard => [
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 3, 5, 0, 0, 0],
                [0, 0, 0, 6, 0, 0, 0, 0, 3],
                [0, 7, 0, 0, 9, 0, 2, 0, 0],
                [0, 5, 0, 0, 0, 0, 0, 4, 0],
                [0, 0, 3, 0, 2, 0, 0, 5, 0],
                [9, 0, 0, 0, 0, 4, 0, 0, 0],
                [0, 0, 0, 1, 8, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
            ],
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AlgoError::invalid_input(format!("unknown difficulty '{s}'")))
    }
}

/// 9x9 board with explicit fixed-cell flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sudoku {
    cells: [[SudokuCell; 9]; 9],
}

impl Sudoku {
    /// Non-zero entries become fixed cells. Rejects anything but 9 rows of 9
    /// digits in `0..=9`.
    pub fn from_rows(rows: &[Vec<u8>]) -> AlgoResult<Self> {
        if rows.len() != 9 || rows.iter().any(|r| r.len() != 9) {
            return Err(AlgoError::invalid_input("sudoku board must be 9x9"));
        }
        let mut cells = [[SudokuCell::default(); 9]; 9];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value > 9 {
                    return Err(AlgoError::invalid_input(format!(
                        "sudoku cell ({r}, {c}) holds {value}"
                    )));
                }
                cells[r][c] = SudokuCell {
                    value,
                    fixed: value != 0,
                };
            }
        }
        Ok(Self { cells })
    }

    pub fn preset(difficulty: Difficulty) -> Self {
        let puzzle = difficulty.puzzle();
        let cells = puzzle.map(|row| {
            row.map(|value| SudokuCell {
                value,
                fixed: value != 0,
            })
        });
        Self { cells }
    }

    pub fn cell(&self, row: usize, col: usize) -> SudokuCell {
        self.cells[row][col]
    }

    pub fn values(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.value).collect())
            .collect()
    }

    pub fn rows(&self) -> Vec<Vec<SudokuCell>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    /// Every cell filled and no digit repeated in a row, column or box.
    pub fn is_solved(&self) -> bool {
        let full = self.cells.iter().flatten().all(|c| c.value != 0);
        full && self.givens_consistent()
    }

    /// No non-zero digit is repeated in a row, column or box.
    pub fn givens_consistent(&self) -> bool {
        (0..9).all(|r| {
            (0..9).all(|c| {
                let value = self.cells[r][c].value;
                value == 0 || self.allows_ignoring(r, c, value, true)
            })
        })
    }

    fn allows(&self, row: usize, col: usize, digit: u8) -> bool {
        self.allows_ignoring(row, col, digit, false)
    }

    fn allows_ignoring(&self, row: usize, col: usize, digit: u8, skip_self: bool) -> bool {
        let (box_row, box_col) = (row / 3 * 3, col / 3 * 3);
        for i in 0..9 {
            let peers = [
                (row, i),
                (i, col),
                (box_row + i / 3, box_col + i % 3),
            ];
            for (r, c) in peers {
                if skip_self && (r, c) == (row, col) {
                    continue;
                }
                if self.cells[r][c].value == digit {
                    return false;
                }
            }
        }
        true
    }

    fn next_empty(&self) -> Option<(usize, usize)> {
        (0..81)
            .map(|i| (i / 9, i % 9))
            .find(|&(r, c)| self.cells[r][c].value == 0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SudokuOutcome {
    pub solved: bool,
    pub solution: Option<Sudoku>,
    pub steps_taken: usize,
    /// The first steps of the run, up to [`super::STEP_LOG_LIMIT`].
    pub steps: Vec<StepRecord<SudokuCell>>,
    pub steps_truncated: bool,
}

struct Search<'s, 'a> {
    board: Sudoku,
    journal: Journal<SudokuCell>,
    stepper: &'s mut Stepper<'a, BoardSnapshot<SudokuCell>>,
}

impl Search<'_, '_> {
    fn log(&mut self, action: StepAction, cell: Option<Cell>, found: usize) -> StepResult<()> {
        self.journal
            .record(self.board.rows(), action, cell, found, self.stepper)
    }

    fn solve(&mut self) -> StepResult<bool> {
        let Some((row, col)) = self.board.next_empty() else {
            return Ok(true);
        };
        let cell = Cell::new(row, col);
        for digit in 1..=9 {
            self.stepper.checkpoint()?;
            if !self.board.allows(row, col, digit) {
                continue;
            }
            self.board.cells[row][col].value = digit;
            self.log(StepAction::Place, Some(cell), 0)?;
            if self.solve()? {
                return Ok(true);
            }
            self.board.cells[row][col].value = 0;
            self.log(StepAction::Backtrack, Some(cell), 0)?;
        }
        Ok(false)
    }
}

/// Row-major backtracking; stops at the first full solution. Boards whose
/// givens already clash finish immediately without a solution.
#[tracing::instrument(skip(board, stepper))]
pub fn solve_sudoku(
    board: &Sudoku,
    record_steps: bool,
    stepper: &mut Stepper<'_, BoardSnapshot<SudokuCell>>,
) -> StepResult<SudokuOutcome> {
    let mut search = Search {
        board: board.clone(),
        journal: Journal::new(record_steps),
        stepper,
    };

    let solved = if board.givens_consistent() {
        search.solve()?
    } else {
        tracing::debug!("sudoku givens conflict; nothing to search");
        false
    };
    if solved {
        search.log(StepAction::Solution, None, 1)?;
    }

    Ok(SudokuOutcome {
        solved,
        solution: solved.then(|| search.board.clone()),
        steps_taken: search.journal.taken(),
        steps_truncated: search.journal.truncated(),
        steps: search.journal.into_steps(),
    })
}
