use super::*;
use crate::control::stepper::{Recorder, StepResult, Stepper};

fn recorded<S, T>(f: impl FnOnce(&mut Stepper<'_, S>) -> StepResult<T>) -> (T, Vec<S>) {
    let mut rec: Recorder<S> = Recorder::new();
    let out = {
        let mut stepper = Stepper::detached(&mut rec);
        f(&mut stepper).expect("detached")
    };
    (out, rec.snapshots)
}

#[test]
fn sieve_settles_every_number_once() {
    let (out, snaps) = recorded(|s| sieve(30, s));
    assert_eq!(out.primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    // One snapshot per prime plus one per newly crossed composite.
    assert_eq!(snaps.len(), 29);
    let last = snaps.last().expect("snapshots");
    assert!(last.marks.iter().all(|m| *m != Mark::Pending));
    assert_eq!(last.marks.len(), 29);

    let crossed: Vec<u64> = snaps.iter().filter_map(|s| s.current_multiple).collect();
    assert_eq!(crossed.len(), 19);
    assert_eq!(&crossed[..3], &[4, 6, 8]);
}

#[test]
fn sieve_below_two_is_empty() {
    for limit in [0, 1] {
        let (out, snaps) = recorded(|s| sieve(limit, s));
        assert!(out.primes.is_empty());
        assert!(snaps.is_empty());
    }
    assert!(check_sieve(MAX_SIEVE_LIMIT + 1).is_err());
}

#[test]
fn gcd_records_each_division() {
    let (out, snaps) = recorded(|s| gcd(48, 18, s));
    assert_eq!(out.gcd, 6);
    let remainders: Vec<u64> = out.steps.iter().map(|s| s.remainder).collect();
    assert_eq!(remainders, vec![12, 6, 0]);
    assert_eq!(snaps.len(), 3);
    assert_eq!(snaps[2].steps, out.steps);
}

#[test]
fn gcd_with_zero_operands() {
    assert_eq!(recorded(|s| gcd(0, 5, s)).0.gcd, 5);
    let (out, snaps) = recorded(|s| gcd(0, 0, s));
    assert_eq!(out.gcd, 0);
    assert!(snaps.is_empty());
}

#[test]
fn factorization_divides_then_advances() {
    let (out, snaps) = recorded(|s| factorize(360, s));
    assert_eq!(out.factors, vec![2, 2, 2, 3, 3, 5]);
    let events: Vec<FactorEvent> = snaps.iter().map(|s| s.event).collect();
    use FactorEvent::{Advance, Divide};
    assert_eq!(events, vec![Divide, Divide, Divide, Advance, Divide, Divide, Divide]);
    assert_eq!(snaps.last().map(|s| s.remaining), Some(1));
}

#[test]
fn factorizing_a_prime_walks_odd_divisors() {
    let (out, snaps) = recorded(|s| factorize(97, s));
    assert_eq!(out.factors, vec![97]);
    let divisors: Vec<u64> = snaps.iter().map(|s| s.divisor).collect();
    assert_eq!(divisors, vec![3, 5, 7, 9, 11, 97]);
    assert!(check_factor_input(1).is_err());
    assert!(check_factor_input(MAX_FACTOR_INPUT + 1).is_err());
}
