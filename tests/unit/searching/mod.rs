use super::*;
use crate::control::stepper::Recorder;

fn search(algo: SearchAlgorithm, arr: &[i64], target: i64) -> (SearchOutcome, Vec<ProbeSnapshot>) {
    let mut rec: Recorder<ProbeSnapshot> = Recorder::new();
    let out = {
        let mut stepper = Stepper::detached(&mut rec);
        algo.run(arr, target, &mut stepper).expect("detached")
    };
    (out, rec.snapshots)
}

#[test]
fn binary_search_examples() {
    let arr = [1, 3, 5, 7, 9, 11];
    let (hit, _) = search(SearchAlgorithm::Binary, &arr, 7);
    assert_eq!(hit.as_signed(), 3);
    let (miss, _) = search(SearchAlgorithm::Binary, &arr, 4);
    assert_eq!(miss.as_signed(), -1);
}

#[test]
fn binary_search_first_probe_is_floor_midpoint() {
    let (_, probes) = search(SearchAlgorithm::Binary, &[1, 3, 5, 7, 9, 11], 7);
    assert_eq!(probes[0], ProbeSnapshot { index: 2, low: 0, high: 5 });
    assert_eq!(probes.len(), 3);
}

#[test]
fn every_variant_finds_present_values_and_rejects_absent_ones() {
    let arr: Vec<i64> = (0..40).map(|i| i * 3).collect();
    for algo in SearchAlgorithm::ALL {
        for (i, &v) in arr.iter().enumerate() {
            let (out, _) = search(algo, &arr, v);
            assert_eq!(out.index, Some(i), "{algo:?} target {v}");
        }
        for v in [-5, 1, 59, 200] {
            let (out, _) = search(algo, &arr, v);
            assert_eq!(out.index, None, "{algo:?} target {v}");
        }
    }
}

#[test]
fn empty_input_never_probes() {
    for algo in SearchAlgorithm::ALL {
        let (out, probes) = search(algo, &[], 1);
        assert_eq!(out.as_signed(), -1);
        assert!(probes.is_empty());
    }
}

#[test]
fn probe_counts_stay_within_complexity_bounds() {
    let n = 1024usize;
    let arr: Vec<i64> = (0..n as i64).collect();
    let log_bound = (usize::BITS - n.leading_zeros()) as usize; // ceil(log2(n + 1))
    let sqrt_bound = 2 * n.isqrt() + 2;
    for target in [0, 1, 511, 777, 1023, 5000, -1] {
        let (out, probes) = search(SearchAlgorithm::Binary, &arr, target);
        assert!(out.probes <= log_bound, "binary {target}: {}", out.probes);
        assert_eq!(out.probes, probes.len());

        let (out, _) = search(SearchAlgorithm::Interpolation, &arr, target);
        assert!(out.probes <= log_bound, "interpolation {target}: {}", out.probes);

        let (out, _) = search(SearchAlgorithm::Jump, &arr, target);
        assert!(out.probes <= sqrt_bound, "jump {target}: {}", out.probes);

        let (out, _) = search(SearchAlgorithm::Linear, &arr, target);
        assert!(out.probes <= n);
    }
}

#[test]
fn interpolation_handles_flat_arrays() {
    let arr = [4, 4, 4, 4];
    let (out, probes) = search(SearchAlgorithm::Interpolation, &arr, 4);
    assert_eq!(out.index, Some(0));
    assert_eq!(probes.len(), 1);
    let (out, _) = search(SearchAlgorithm::Interpolation, &arr, 5);
    assert_eq!(out.index, None);
}

#[test]
fn linear_search_returns_first_match() {
    let (out, _) = search(SearchAlgorithm::Linear, &[9, 2, 7, 2], 2);
    assert_eq!(out.index, Some(1));
    assert!(!SearchAlgorithm::Linear.needs_sorted_input());
}
