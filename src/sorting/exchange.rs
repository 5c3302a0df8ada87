use crate::control::stepper::{Beat, StepResult, Stepper};

use super::{ArraySnapshot, Comparator};

/// Adjacent compare-and-swap passes; stops after a pass without swaps.
#[tracing::instrument(skip_all, fields(len = input.len()))]
pub fn bubble_sort<T: Clone>(
    input: &[T],
    cmp: &Comparator<T>,
    stepper: &mut Stepper<'_, ArraySnapshot<T>>,
) -> StepResult<Vec<T>> {
    let mut arr = input.to_vec();
    let n = arr.len();
    if n <= 1 {
        return Ok(arr);
    }

    for pass in 0..n - 1 {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            stepper.emit(ArraySnapshot::new(&arr, Some(j), Some(j + 1)))?;
            if cmp.out_of_order(&arr[j], &arr[j + 1]) {
                arr.swap(j, j + 1);
                swapped = true;
                stepper.emit_beat(ArraySnapshot::new(&arr, Some(j), Some(j + 1)), Beat::Swap)?;
            }
        }
        if !swapped {
            break;
        }
    }

    stepper.emit(ArraySnapshot::settled(&arr))?;
    Ok(arr)
}

/// Shifts larger elements right until the held key fits.
#[tracing::instrument(skip_all, fields(len = input.len()))]
pub fn insertion_sort<T: Clone>(
    input: &[T],
    cmp: &Comparator<T>,
    stepper: &mut Stepper<'_, ArraySnapshot<T>>,
) -> StepResult<Vec<T>> {
    let mut arr = input.to_vec();
    let n = arr.len();
    if n <= 1 {
        return Ok(arr);
    }

    for i in 1..n {
        let key = arr[i].clone();
        stepper.emit_beat(ArraySnapshot::new(&arr, Some(i), None), Beat::Half)?;

        let mut j = i;
        while j > 0 && cmp.out_of_order(&arr[j - 1], &key) {
            stepper.emit_beat(ArraySnapshot::new(&arr, Some(i), Some(j - 1)), Beat::Half)?;
            arr[j] = arr[j - 1].clone();
            stepper.emit_beat(ArraySnapshot::new(&arr, Some(j), Some(j - 1)), Beat::Half)?;
            j -= 1;
        }

        arr[j] = key;
        stepper.emit_beat(ArraySnapshot::new(&arr, Some(j), None), Beat::Half)?;
    }

    stepper.emit(ArraySnapshot::settled(&arr))?;
    Ok(arr)
}

/// Linear scan for the extremum of the unsorted suffix, one swap per pass.
#[tracing::instrument(skip_all, fields(len = input.len()))]
pub fn selection_sort<T: Clone>(
    input: &[T],
    cmp: &Comparator<T>,
    stepper: &mut Stepper<'_, ArraySnapshot<T>>,
) -> StepResult<Vec<T>> {
    let mut arr = input.to_vec();
    let n = arr.len();
    if n <= 1 {
        return Ok(arr);
    }

    for i in 0..n - 1 {
        let mut extreme = i;
        for j in i + 1..n {
            stepper.emit(ArraySnapshot::new(&arr, Some(i), Some(j)))?;
            if cmp.before(&arr[j], &arr[extreme]) {
                extreme = j;
            }
        }

        if extreme != i {
            stepper.emit_beat(ArraySnapshot::new(&arr, Some(i), Some(extreme)), Beat::Half)?;
            arr.swap(i, extreme);
            stepper.emit_beat(ArraySnapshot::new(&arr, Some(i), Some(extreme)), Beat::Half)?;
        }
    }

    stepper.emit(ArraySnapshot::settled(&arr))?;
    Ok(arr)
}
