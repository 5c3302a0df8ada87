use crate::control::stepper::{Beat, StepResult, Stepper};

use super::{DivisionStep, FactorEvent, FactorOutcome, FactorSnapshot, GcdOutcome, GcdSnapshot};

/// Euclid's algorithm by repeated division, one snapshot per division.
/// `gcd(0, 0)` is 0 and takes no steps.
#[tracing::instrument(skip(stepper))]
pub fn gcd(a: u64, b: u64, stepper: &mut Stepper<'_, GcdSnapshot>) -> StepResult<GcdOutcome> {
    let (mut x, mut y) = (a.max(b), a.min(b));
    let mut steps = Vec::new();
    while y != 0 {
        let step = DivisionStep {
            dividend: x,
            divisor: y,
            quotient: x / y,
            remainder: x % y,
        };
        steps.push(step);
        stepper.emit(GcdSnapshot {
            steps: steps.clone(),
        })?;
        (x, y) = (y, step.remainder);
    }
    Ok(GcdOutcome {
        a,
        b,
        gcd: x,
        steps,
    })
}

/// Trial division by 2 and then odd candidates up to `sqrt(remaining)`.
/// Whatever is left above 1 afterwards is itself prime.
#[tracing::instrument(skip(stepper))]
pub fn factorize(n: u64, stepper: &mut Stepper<'_, FactorSnapshot>) -> StepResult<FactorOutcome> {
    let mut remaining = n;
    let mut divisor = 2u64;
    let mut factors = Vec::new();

    let mut show = |remaining: u64, divisor: u64, factors: &[u64], event: FactorEvent| {
        let beat = match event {
            FactorEvent::Divide => Beat::Full,
            FactorEvent::Advance => Beat::Brief,
        };
        stepper.emit_beat(
            FactorSnapshot {
                remaining,
                divisor,
                factors: factors.to_vec(),
                event,
            },
            beat,
        )
    };

    while divisor.saturating_mul(divisor) <= remaining {
        if remaining % divisor == 0 {
            remaining /= divisor;
            factors.push(divisor);
            show(remaining, divisor, &factors, FactorEvent::Divide)?;
        } else {
            divisor += if divisor == 2 { 1 } else { 2 };
            show(remaining, divisor, &factors, FactorEvent::Advance)?;
        }
    }
    if remaining > 1 {
        factors.push(remaining);
        show(1, remaining, &factors, FactorEvent::Divide)?;
    }

    Ok(FactorOutcome { n, factors })
}
