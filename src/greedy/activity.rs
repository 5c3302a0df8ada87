use serde::{Deserialize, Serialize};

use crate::control::stepper::{Beat, StepResult, Stepper};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub name: String,
    pub start: i64,
    pub finish: i64,
}

impl Activity {
    pub fn new(name: impl Into<String>, start: i64, finish: i64) -> Self {
        Self {
            name: name.into(),
            start,
            finish,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivitySnapshot {
    pub selected: Vec<Activity>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityOutcome {
    /// Input sorted by finish time.
    pub by_finish: Vec<Activity>,
    pub selected: Vec<Activity>,
}

/// Earliest-finish-first selection. Only inclusions are emitted; a skipped
/// activity costs half a beat of idle time.
#[tracing::instrument(skip_all, fields(len = activities.len()))]
pub fn select_activities(
    activities: &[Activity],
    stepper: &mut Stepper<'_, ActivitySnapshot>,
) -> StepResult<ActivityOutcome> {
    let mut by_finish = activities.to_vec();
    by_finish.sort_by_key(|a| a.finish);

    let mut selected: Vec<Activity> = Vec::new();
    for activity in &by_finish {
        let fits = selected
            .last()
            .is_none_or(|last| activity.start >= last.finish);
        if fits {
            selected.push(activity.clone());
            stepper.emit(ActivitySnapshot {
                selected: selected.clone(),
            })?;
        } else {
            stepper.idle(Beat::Half)?;
        }
    }

    Ok(ActivityOutcome {
        by_finish,
        selected,
    })
}
