//! Comparison sorts that emit array snapshots as they go.
//!
//! Every sort takes its input by reference, works on a private copy and
//! returns the sorted copy. Ascending/descending is carried by one
//! [`Comparator`] threaded through the algorithm, never by duplicated code.

use std::cmp::Ordering;

use crate::control::stepper::{DelayCurve, StepResult, Stepper};
use crate::foundation::core::SortOrder;

mod exchange;
mod merge;
mod quick;

pub use exchange::{bubble_sort, insertion_sort, selection_sort};
pub use merge::merge_sort;
pub use quick::quick_sort;

/// Sorting delay: 1000 ms at speed 0 down to 50 ms at speed 100.
pub const DELAY_CURVE: DelayCurve = DelayCurve::new(1000, 50);

/// Array state plus the highlighted indices.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ArraySnapshot<T> {
    pub values: Vec<T>,
    /// Primary highlight (element being placed, pivot, pass anchor).
    pub current: Option<usize>,
    /// Secondary highlight (element compared against).
    pub compare: Option<usize>,
}

impl<T: Clone> ArraySnapshot<T> {
    pub fn new(values: &[T], current: Option<usize>, compare: Option<usize>) -> Self {
        Self {
            values: values.to_vec(),
            current,
            compare,
        }
    }

    /// Snapshot without highlights.
    pub fn settled(values: &[T]) -> Self {
        Self::new(values, None, None)
    }
}

/// Ordering strategy shared by all sorts.
pub struct Comparator<T> {
    order: SortOrder,
    compare: fn(&T, &T) -> Ordering,
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Comparator<T> {}

impl<T: Ord> Comparator<T> {
    pub fn natural(order: SortOrder) -> Self {
        Self {
            order,
            compare: T::cmp,
        }
    }
}

impl<T> Comparator<T> {
    /// Compare by a custom key function, e.g. `|a, b| a.0.cmp(&b.0)`.
    pub fn by(order: SortOrder, compare: fn(&T, &T) -> Ordering) -> Self {
        Self { order, compare }
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// `Less` means `a` belongs before `b` in the requested order.
    pub fn ordering(&self, a: &T, b: &T) -> Ordering {
        self.order.orient((self.compare)(a, b))
    }

    /// `a` must come strictly before `b`.
    pub fn before(&self, a: &T, b: &T) -> bool {
        self.ordering(a, b) == Ordering::Less
    }

    /// `a` may stay in front of `b` (ties included).
    pub fn in_order(&self, a: &T, b: &T) -> bool {
        self.ordering(a, b) != Ordering::Greater
    }

    /// `a` in front of `b` violates the order.
    pub fn out_of_order(&self, a: &T, b: &T) -> bool {
        self.ordering(a, b) == Ordering::Greater
    }
}

/// The five sorts, selectable at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        Self::Bubble,
        Self::Insertion,
        Self::Selection,
        Self::Merge,
        Self::Quick,
    ];

    pub fn run<T: Clone>(
        self,
        input: &[T],
        cmp: &Comparator<T>,
        stepper: &mut Stepper<'_, ArraySnapshot<T>>,
    ) -> StepResult<Vec<T>> {
        match self {
            Self::Bubble => bubble_sort(input, cmp, stepper),
            Self::Insertion => insertion_sort(input, cmp, stepper),
            Self::Selection => selection_sort(input, cmp, stepper),
            Self::Merge => merge_sort(input, cmp, stepper),
            Self::Quick => quick_sort(input, cmp, stepper),
        }
    }

    /// Whether equal keys keep their input order.
    pub fn is_stable(self) -> bool {
        matches!(self, Self::Bubble | Self::Insertion | Self::Merge)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sorting/mod.rs"]
mod tests;
