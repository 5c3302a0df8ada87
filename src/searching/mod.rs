//! Index searches over integer arrays, one snapshot per probe.
//!
//! Binary, jump and interpolation search assume sorted ascending input; that
//! precondition is documented, never re-validated.

use crate::control::stepper::{DelayCurve, StepResult, Stepper};

pub const DELAY_CURVE: DelayCurve = DelayCurve::new(1000, 50);

/// One probe plus the live search window `low..=high`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ProbeSnapshot {
    pub index: usize,
    pub low: usize,
    pub high: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SearchOutcome {
    pub index: Option<usize>,
    pub probes: usize,
}

impl SearchOutcome {
    /// `-1` when the target is absent.
    pub fn as_signed(&self) -> i64 {
        self.index.map_or(-1, |i| i as i64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchAlgorithm {
    Linear,
    Binary,
    Jump,
    Interpolation,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 4] = [
        Self::Linear,
        Self::Binary,
        Self::Jump,
        Self::Interpolation,
    ];

    /// Whether the input must be sorted ascending.
    pub fn needs_sorted_input(self) -> bool {
        !matches!(self, Self::Linear)
    }

    pub fn run(
        self,
        arr: &[i64],
        target: i64,
        stepper: &mut Stepper<'_, ProbeSnapshot>,
    ) -> StepResult<SearchOutcome> {
        let mut probe = Probe {
            stepper,
            probes: 0,
        };
        let index = match self {
            Self::Linear => linear(arr, target, &mut probe)?,
            Self::Binary => binary(arr, target, &mut probe)?,
            Self::Jump => jump(arr, target, &mut probe)?,
            Self::Interpolation => interpolation(arr, target, &mut probe)?,
        };
        Ok(SearchOutcome {
            index,
            probes: probe.probes,
        })
    }
}

struct Probe<'s, 'a> {
    stepper: &'s mut Stepper<'a, ProbeSnapshot>,
    probes: usize,
}

impl Probe<'_, '_> {
    fn at(&mut self, index: usize, low: usize, high: usize) -> StepResult<()> {
        self.probes += 1;
        self.stepper.emit(ProbeSnapshot { index, low, high })
    }
}

#[tracing::instrument(level = "debug", skip(arr, probe), fields(len = arr.len()))]
fn linear(arr: &[i64], target: i64, probe: &mut Probe<'_, '_>) -> StepResult<Option<usize>> {
    let Some(last) = arr.len().checked_sub(1) else {
        return Ok(None);
    };
    for (i, &value) in arr.iter().enumerate() {
        probe.at(i, i, last)?;
        if value == target {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

#[tracing::instrument(level = "debug", skip(arr, probe), fields(len = arr.len()))]
fn binary(arr: &[i64], target: i64, probe: &mut Probe<'_, '_>) -> StepResult<Option<usize>> {
    let Some(mut high) = arr.len().checked_sub(1) else {
        return Ok(None);
    };
    let mut low = 0;
    while low <= high {
        let mid = low + (high - low) / 2;
        probe.at(mid, low, high)?;
        match arr[mid].cmp(&target) {
            std::cmp::Ordering::Equal => return Ok(Some(mid)),
            std::cmp::Ordering::Less => low = mid + 1,
            std::cmp::Ordering::Greater => {
                if mid == 0 {
                    break;
                }
                high = mid - 1;
            }
        }
    }
    Ok(None)
}

/// Block jumps of `floor(sqrt(n))`, then a linear scan inside the block.
#[tracing::instrument(level = "debug", skip(arr, probe), fields(len = arr.len()))]
fn jump(arr: &[i64], target: i64, probe: &mut Probe<'_, '_>) -> StepResult<Option<usize>> {
    let n = arr.len();
    if n == 0 {
        return Ok(None);
    }
    let step = n.isqrt().max(1);

    let mut start = 0;
    let mut end = step.min(n);
    loop {
        probe.at(end - 1, start, end - 1)?;
        if arr[end - 1] >= target {
            break;
        }
        start = end;
        if start >= n {
            return Ok(None);
        }
        end = (end + step).min(n);
    }

    for i in start..end {
        probe.at(i, start, end - 1)?;
        if arr[i] == target {
            return Ok(Some(i));
        }
        if arr[i] > target {
            break;
        }
    }
    Ok(None)
}

#[tracing::instrument(level = "debug", skip(arr, probe), fields(len = arr.len()))]
fn interpolation(
    arr: &[i64],
    target: i64,
    probe: &mut Probe<'_, '_>,
) -> StepResult<Option<usize>> {
    let Some(mut high) = arr.len().checked_sub(1) else {
        return Ok(None);
    };
    let mut low = 0;
    while low <= high && target >= arr[low] && target <= arr[high] {
        if arr[high] == arr[low] {
            probe.at(low, low, high)?;
            return Ok((arr[low] == target).then_some(low));
        }

        let span = i128::from(arr[high]) - i128::from(arr[low]);
        let offset = (i128::from(target) - i128::from(arr[low])) * (high - low) as i128 / span;
        let pos = low + offset as usize;
        probe.at(pos, low, high)?;

        match arr[pos].cmp(&target) {
            std::cmp::Ordering::Equal => return Ok(Some(pos)),
            std::cmp::Ordering::Less => low = pos + 1,
            std::cmp::Ordering::Greater => {
                if pos == 0 {
                    break;
                }
                high = pos - 1;
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "../../tests/unit/searching/mod.rs"]
mod tests;
