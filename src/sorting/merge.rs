use crate::control::stepper::{Beat, StepResult, Stepper};

use super::{ArraySnapshot, Comparator};

/// Top-down merge sort. Stable: on ties the left run's element is placed first.
#[tracing::instrument(skip_all, fields(len = input.len()))]
pub fn merge_sort<T: Clone>(
    input: &[T],
    cmp: &Comparator<T>,
    stepper: &mut Stepper<'_, ArraySnapshot<T>>,
) -> StepResult<Vec<T>> {
    let mut arr = input.to_vec();
    if arr.len() <= 1 {
        return Ok(arr);
    }

    let last = arr.len() - 1;
    sort_range(&mut arr, 0, last, cmp, stepper)?;
    stepper.emit(ArraySnapshot::settled(&arr))?;
    Ok(arr)
}

// `start..=end`, inclusive on both sides.
fn sort_range<T: Clone>(
    arr: &mut [T],
    start: usize,
    end: usize,
    cmp: &Comparator<T>,
    stepper: &mut Stepper<'_, ArraySnapshot<T>>,
) -> StepResult<()> {
    if start >= end {
        return Ok(());
    }
    let mid = start + (end - start) / 2;

    stepper.emit(ArraySnapshot::new(arr, Some(start), Some(end)))?;
    sort_range(arr, start, mid, cmp, stepper)?;
    sort_range(arr, mid + 1, end, cmp, stepper)?;
    merge(arr, start, mid, end, cmp, stepper)
}

fn merge<T: Clone>(
    arr: &mut [T],
    start: usize,
    mid: usize,
    end: usize,
    cmp: &Comparator<T>,
    stepper: &mut Stepper<'_, ArraySnapshot<T>>,
) -> StepResult<()> {
    let left = arr[start..=mid].to_vec();
    let right = arr[mid + 1..=end].to_vec();
    let (mut i, mut j, mut k) = (0, 0, start);

    while i < left.len() && j < right.len() {
        stepper.emit(ArraySnapshot::new(arr, Some(start + i), Some(mid + 1 + j)))?;
        if cmp.in_order(&left[i], &right[j]) {
            arr[k] = left[i].clone();
            i += 1;
        } else {
            arr[k] = right[j].clone();
            j += 1;
        }
        k += 1;
        stepper.emit_beat(ArraySnapshot::new(arr, Some(k - 1), None), Beat::Half)?;
    }

    for item in &left[i..] {
        arr[k] = item.clone();
        k += 1;
        stepper.emit_beat(ArraySnapshot::new(arr, Some(k - 1), None), Beat::Half)?;
    }
    for item in &right[j..] {
        arr[k] = item.clone();
        k += 1;
        stepper.emit_beat(ArraySnapshot::new(arr, None, Some(k - 1)), Beat::Half)?;
    }
    Ok(())
}
