use crate::control::stepper::{Beat, StepResult, Stepper};
use crate::foundation::core::Cell;

use super::{KnapsackOutcome, KnapsackProblem, LcsOutcome, TableSnapshot};

/// 0/1 knapsack over an `(items + 1) x (capacity + 1)` table.
#[tracing::instrument(skip_all, fields(items = problem.weights.len(), capacity = problem.capacity))]
pub fn knapsack(
    problem: &KnapsackProblem,
    stepper: &mut Stepper<'_, TableSnapshot>,
) -> StepResult<KnapsackOutcome> {
    let KnapsackProblem {
        weights,
        values,
        capacity,
    } = problem;
    let (n, capacity) = (weights.len(), *capacity);
    let mut dp = vec![vec![0u64; capacity + 1]; n + 1];
    stepper.emit_beat(TableSnapshot::grid(&dp, None), Beat::Double)?;

    for i in 0..=n {
        for w in 0..=capacity {
            let cell = Cell::new(i, w);
            if i == 0 || w == 0 {
                stepper.emit_beat(TableSnapshot::grid(&dp, Some(cell)), Beat::Half)?;
                continue;
            }
            let skip = dp[i - 1][w];
            dp[i][w] = match usize::try_from(weights[i - 1]) {
                Ok(weight) if weight <= w => {
                    skip.max(values[i - 1].saturating_add(dp[i - 1][w - weight]))
                }
                _ => skip,
            };
            stepper.emit(TableSnapshot::grid(&dp, Some(cell)))?;
        }
    }

    let mut chosen = Vec::new();
    let mut w = capacity;
    for i in (1..=n).rev() {
        if dp[i][w] != dp[i - 1][w] {
            chosen.push(i - 1);
            // A differing row means the item fit, so its weight is at most `w`.
            w -= weights[i - 1] as usize;
        }
    }
    chosen.reverse();

    Ok(KnapsackOutcome {
        best_value: dp[n][capacity],
        weights: weights.clone(),
        values: values.clone(),
        capacity,
        chosen,
        table: dp,
    })
}

/// Longest common subsequence over Unicode scalar values.
#[tracing::instrument(skip(stepper))]
pub fn lcs(
    first: &str,
    second: &str,
    stepper: &mut Stepper<'_, TableSnapshot>,
) -> StepResult<LcsOutcome> {
    let a: Vec<char> = first.chars().collect();
    let b: Vec<char> = second.chars().collect();
    let (m, n) = (a.len(), b.len());
    let mut dp = vec![vec![0u64; n + 1]; m + 1];
    stepper.emit(TableSnapshot::grid(&dp, None))?;

    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
            stepper.emit(TableSnapshot::grid(&dp, Some(Cell::new(i, j))))?;
        }
    }
    if m > 0 && n > 0 {
        stepper.emit_beat(TableSnapshot::grid(&dp, None), Beat::Brief)?;
    }

    let mut sequence = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            sequence.push(a[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    sequence.reverse();

    Ok(LcsOutcome {
        length: dp[m][n],
        first: first.to_owned(),
        second: second.to_owned(),
        sequence: sequence.into_iter().collect(),
        table: dp,
    })
}
