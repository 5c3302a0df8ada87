//! Number-theory walkthroughs: the Sieve of Eratosthenes, Euclid's GCD and
//! prime factorization by trial division.

use serde::Serialize;

use crate::control::stepper::DelayCurve;
use crate::foundation::error::{AlgoError, AlgoResult};

mod divisors;
mod sieve;

pub use divisors::{factorize, gcd};
pub use sieve::sieve;

pub const DELAY_CURVE: DelayCurve = DelayCurve::new(800, 50);

pub const MAX_SIEVE_LIMIT: u64 = 10_000;
/// Keeps trial division under ~32k divisor advances.
pub const MAX_FACTOR_INPUT: u64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Pending,
    Prime,
    Composite,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SieveSnapshot {
    /// `marks[i]` describes the number `i + 2`.
    pub marks: Vec<Mark>,
    pub current_prime: Option<u64>,
    pub current_multiple: Option<u64>,
    pub primes: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SieveOutcome {
    pub limit: u64,
    pub primes: Vec<u64>,
}

/// `dividend = quotient * divisor + remainder`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DivisionStep {
    pub dividend: u64,
    pub divisor: u64,
    pub quotient: u64,
    pub remainder: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GcdSnapshot {
    pub steps: Vec<DivisionStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GcdOutcome {
    pub a: u64,
    pub b: u64,
    pub gcd: u64,
    pub steps: Vec<DivisionStep>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorEvent {
    /// The divisor went into the remaining value.
    Divide,
    /// The divisor stopped dividing; moved on to the next candidate.
    Advance,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FactorSnapshot {
    pub remaining: u64,
    pub divisor: u64,
    pub factors: Vec<u64>,
    pub event: FactorEvent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FactorOutcome {
    pub n: u64,
    /// Prime factors in non-decreasing order, with multiplicity.
    pub factors: Vec<u64>,
}

pub fn check_sieve(limit: u64) -> AlgoResult<()> {
    if limit > MAX_SIEVE_LIMIT {
        return Err(AlgoError::invalid_input(format!(
            "sieve limit {limit} exceeds {MAX_SIEVE_LIMIT}"
        )));
    }
    Ok(())
}

pub fn check_factor_input(n: u64) -> AlgoResult<()> {
    if !(2..=MAX_FACTOR_INPUT).contains(&n) {
        return Err(AlgoError::invalid_input(format!(
            "can only factor 2..={MAX_FACTOR_INPUT}, got {n}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/numeric/mod.rs"]
mod tests;
