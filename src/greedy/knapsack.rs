use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::control::stepper::{StepResult, Stepper};
use crate::foundation::error::{AlgoError, AlgoResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub name: String,
    pub weight: u64,
    pub value: u64,
}

impl Item {
    pub fn new(name: impl Into<String>, weight: u64, value: u64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
        }
    }

    // value/weight compared by cross-multiplication; higher ratio first.
    fn by_ratio_desc(a: &Self, b: &Self) -> Ordering {
        let lhs = u128::from(b.value) * u128::from(a.weight);
        let rhs = u128::from(a.value) * u128::from(b.weight);
        lhs.cmp(&rhs)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Taken {
    pub item: Item,
    /// In `(0, 1]`.
    pub fraction: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FractionalSnapshot {
    pub selected: Vec<Taken>,
    pub total_value: f64,
    pub remaining_capacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FractionalOutcome {
    pub selected: Vec<Taken>,
    pub total_value: f64,
}

pub(crate) fn check_items(items: &[Item]) -> AlgoResult<()> {
    match items.iter().find(|i| i.weight == 0) {
        Some(item) => Err(AlgoError::invalid_input(format!(
            "item '{}' has zero weight",
            item.name
        ))),
        None => Ok(()),
    }
}

/// Takes items by descending value density, splitting the last one that fits
/// only partially. One snapshot up front, then one per item considered.
#[tracing::instrument(skip(items, stepper), fields(items = items.len()))]
pub fn fractional_knapsack(
    items: &[Item],
    capacity: u64,
    stepper: &mut Stepper<'_, FractionalSnapshot>,
) -> StepResult<FractionalOutcome> {
    let mut by_ratio = items.to_vec();
    by_ratio.sort_by(Item::by_ratio_desc);

    let mut selected: Vec<Taken> = Vec::new();
    let mut total_value = 0.0;
    let mut remaining = capacity as f64;
    let snapshot = |selected: &[Taken], total_value: f64, remaining: f64| FractionalSnapshot {
        selected: selected.to_vec(),
        total_value,
        remaining_capacity: remaining,
    };
    stepper.emit(snapshot(&selected, total_value, remaining))?;

    for item in by_ratio {
        let weight = item.weight as f64;
        if remaining >= weight {
            total_value += item.value as f64;
            remaining -= weight;
            selected.push(Taken {
                item,
                fraction: 1.0,
            });
        } else if remaining > 0.0 {
            let fraction = remaining / weight;
            total_value += item.value as f64 * fraction;
            remaining = 0.0;
            selected.push(Taken { item, fraction });
        }
        stepper.emit(snapshot(&selected, total_value, remaining))?;
        if remaining == 0.0 {
            break;
        }
    }

    Ok(FractionalOutcome {
        selected,
        total_value,
    })
}
