use serde::{Deserialize, Serialize};

use crate::control::stepper::{StepResult, Stepper};
use crate::foundation::error::{AlgoError, AlgoResult};

pub const MAX_DEADLINE: usize = 1_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub name: String,
    /// 1-based slot by which the job must run.
    pub deadline: usize,
    pub profit: u64,
}

impl Job {
    pub fn new(name: impl Into<String>, deadline: usize, profit: u64) -> Self {
        Self {
            name: name.into(),
            deadline,
            profit,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JobSnapshot {
    pub slots: Vec<Option<Job>>,
    pub scheduled: Vec<Job>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub slots: Vec<Option<Job>>,
    pub scheduled: Vec<Job>,
    pub total_profit: u64,
}

pub(crate) fn check_jobs(jobs: &[Job]) -> AlgoResult<()> {
    for job in jobs {
        if job.deadline == 0 || job.deadline > MAX_DEADLINE {
            return Err(AlgoError::invalid_input(format!(
                "job '{}' deadline {} is outside 1..={MAX_DEADLINE}",
                job.name, job.deadline
            )));
        }
    }
    Ok(())
}

/// Most profitable first, each into the latest free slot before its deadline.
#[tracing::instrument(skip_all, fields(jobs = jobs.len()))]
pub fn schedule_jobs(jobs: &[Job], stepper: &mut Stepper<'_, JobSnapshot>) -> StepResult<JobOutcome> {
    let mut by_profit = jobs.to_vec();
    by_profit.sort_by(|a, b| b.profit.cmp(&a.profit));

    let horizon = by_profit.iter().map(|j| j.deadline).max().unwrap_or(0);
    let mut slots: Vec<Option<Job>> = vec![None; horizon];
    let mut scheduled = Vec::new();
    stepper.emit(JobSnapshot {
        slots: slots.clone(),
        scheduled: scheduled.clone(),
    })?;

    for job in by_profit {
        let last = job.deadline.min(horizon);
        if let Some(slot) = (0..last).rev().find(|&s| slots[s].is_none()) {
            slots[slot] = Some(job.clone());
            scheduled.push(job);
        }
        stepper.emit(JobSnapshot {
            slots: slots.clone(),
            scheduled: scheduled.clone(),
        })?;
    }

    let total_profit = scheduled.iter().map(|j| j.profit).sum();
    Ok(JobOutcome {
        slots,
        scheduled,
        total_profit,
    })
}
