use crate::control::stepper::{Beat, StepResult, Stepper};

use super::{ArraySnapshot, Comparator};

/// Quick sort with a Lomuto partition around the last element. Not stable.
#[tracing::instrument(skip_all, fields(len = input.len()))]
pub fn quick_sort<T: Clone>(
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

fn sort_range<T: Clone>(
    arr: &mut [T],
    low: usize,
    high: usize,
    cmp: &Comparator<T>,
    stepper: &mut Stepper<'_, ArraySnapshot<T>>,
) -> StepResult<()> {
    if low >= high {
        return Ok(());
    }
    let pivot = partition(arr, low, high, cmp, stepper)?;
    stepper.emit_beat(ArraySnapshot::settled(arr), Beat::Brief)?;

    if pivot > low {
        sort_range(arr, low, pivot - 1, cmp, stepper)?;
    }
    sort_range(arr, pivot + 1, high, cmp, stepper)
}

fn partition<T: Clone>(
    arr: &mut [T],
    low: usize,
    high: usize,
    cmp: &Comparator<T>,
    stepper: &mut Stepper<'_, ArraySnapshot<T>>,
) -> StepResult<usize> {
    let pivot = arr[high].clone();
    stepper.emit_beat(ArraySnapshot::new(arr, Some(high), None), Beat::Half)?;

    let mut store = low;
    for j in low..high {
        stepper.emit(ArraySnapshot::new(arr, Some(high), Some(j)))?;
        if cmp.in_order(&arr[j], &pivot) {
            if store != j {
                swap(arr, store, j, stepper)?;
            }
            store += 1;
        }
    }
    swap(arr, store, high, stepper)?;
    Ok(store)
}

fn swap<T: Clone>(
    arr: &mut [T],
    a: usize,
    b: usize,
    stepper: &mut Stepper<'_, ArraySnapshot<T>>,
) -> StepResult<()> {
    stepper.emit_beat(ArraySnapshot::new(arr, Some(a), Some(b)), Beat::Half)?;
    arr.swap(a, b);
    stepper.emit_beat(ArraySnapshot::new(arr, Some(a), Some(b)), Beat::Half)
}
