use crate::control::stepper::{Beat, StepResult, Stepper};

use super::{FibonacciOutcome, LisOutcome, TableSnapshot};

/// Bottom-up Fibonacci, `dp[i] = dp[i - 1] + dp[i - 2]` with `dp[1] = 1`.
#[tracing::instrument(skip(stepper))]
pub fn fibonacci(
    n: usize,
    stepper: &mut Stepper<'_, TableSnapshot>,
) -> StepResult<FibonacciOutcome> {
    let mut dp = vec![0u64; n + 1];
    if n >= 1 {
        dp[1] = 1;
    }
    stepper.emit(TableSnapshot::linear(&dp, None))?;

    for i in 2..=n {
        dp[i] = dp[i - 1].saturating_add(dp[i - 2]);
        stepper.emit(TableSnapshot::linear(&dp, Some(i)))?;
    }

    Ok(FibonacciOutcome {
        n,
        value: dp[n],
        table: dp,
    })
}

/// O(n^2) longest strictly increasing subsequence.
#[tracing::instrument(skip_all, fields(len = values.len()))]
pub fn lis(values: &[i64], stepper: &mut Stepper<'_, TableSnapshot>) -> StepResult<LisOutcome> {
    let n = values.len();
    let mut dp = vec![1u64; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    stepper.emit(TableSnapshot::linear(&dp, None))?;

    for i in 1..n {
        stepper.emit(TableSnapshot::linear(&dp, Some(i)))?;
        for j in 0..i {
            stepper.checkpoint()?;
            if values[j] < values[i] {
                if dp[j] + 1 > dp[i] {
                    dp[i] = dp[j] + 1;
                    prev[i] = Some(j);
                }
                stepper.emit_beat(TableSnapshot::linear(&dp, Some(i)), Beat::Half)?;
            }
        }
        stepper.emit(TableSnapshot::linear(&dp, Some(i)))?;
    }
    if n > 0 {
        stepper.emit_beat(TableSnapshot::linear(&dp, None), Beat::Brief)?;
    }

    let mut end = None;
    for (i, &len) in dp.iter().enumerate() {
        if end.is_none_or(|e: usize| len > dp[e]) {
            end = Some(i);
        }
    }
    let mut subsequence = Vec::new();
    let mut cursor = end;
    while let Some(i) = cursor {
        subsequence.push(values[i]);
        cursor = prev[i];
    }
    subsequence.reverse();

    Ok(LisOutcome {
        length: end.map_or(0, |e| dp[e]),
        array: values.to_vec(),
        subsequence,
        table: dp,
    })
}
