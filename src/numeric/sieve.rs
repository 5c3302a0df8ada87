use crate::control::stepper::{Beat, StepResult, Stepper};

use super::{Mark, SieveOutcome, SieveSnapshot};

struct Grid {
    marks: Vec<Mark>,
    primes: Vec<u64>,
}

impl Grid {
    fn slot(n: u64) -> usize {
        (n - 2) as usize
    }

    fn snapshot(&self, prime: u64, multiple: Option<u64>) -> SieveSnapshot {
        SieveSnapshot {
            marks: self.marks.clone(),
            current_prime: Some(prime),
            current_multiple: multiple,
            primes: self.primes.clone(),
        }
    }
}

/// Every number in `2..=limit` is settled in ascending order: a pending number
/// is prime, and its multiples from `p * p` on are crossed out one at a time.
#[tracing::instrument(skip(stepper))]
pub fn sieve(limit: u64, stepper: &mut Stepper<'_, SieveSnapshot>) -> StepResult<SieveOutcome> {
    let mut grid = Grid {
        marks: vec![Mark::Pending; limit.saturating_sub(1) as usize],
        primes: Vec::new(),
    };

    for p in 2..=limit {
        if grid.marks[Grid::slot(p)] != Mark::Pending {
            stepper.checkpoint()?;
            continue;
        }
        grid.marks[Grid::slot(p)] = Mark::Prime;
        grid.primes.push(p);
        stepper.emit(grid.snapshot(p, None))?;

        let mut multiple = p.saturating_mul(p);
        while multiple <= limit {
            let slot = Grid::slot(multiple);
            if grid.marks[slot] == Mark::Pending {
                grid.marks[slot] = Mark::Composite;
                stepper.emit_beat(grid.snapshot(p, Some(multiple)), Beat::Half)?;
            }
            multiple += p;
        }
    }

    Ok(SieveOutcome {
        limit,
        primes: grid.primes,
    })
}
