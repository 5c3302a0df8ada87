use super::*;
use crate::control::stepper::Recorder;

fn by_key(a: &(i32, char), b: &(i32, char)) -> Ordering {
    a.0.cmp(&b.0)
}

fn run_sort(
    algo: SortAlgorithm,
    input: &[i64],
    order: SortOrder,
) -> (Vec<i64>, Vec<ArraySnapshot<i64>>) {
    let mut rec: Recorder<ArraySnapshot<i64>> = Recorder::new();
    let out = {
        let mut stepper = Stepper::detached(&mut rec);
        algo.run(input, &Comparator::natural(order), &mut stepper)
            .expect("detached sorts never halt")
    };
    (out, rec.snapshots)
}

#[test]
fn every_sort_orders_ascending_and_descending() {
    let input = [5, 3, 8, 1, 9, 2, 2, 7];
    for algo in SortAlgorithm::ALL {
        let (asc, _) = run_sort(algo, &input, SortOrder::Ascending);
        assert_eq!(asc, vec![1, 2, 2, 3, 5, 7, 8, 9], "{algo:?}");

        let (desc, _) = run_sort(algo, &input, SortOrder::Descending);
        assert_eq!(desc, vec![9, 8, 7, 5, 3, 2, 2, 1], "{algo:?}");
    }
}

#[test]
fn trivial_inputs_return_without_snapshots() {
    for algo in SortAlgorithm::ALL {
        let (out, snaps) = run_sort(algo, &[], SortOrder::Ascending);
        assert!(out.is_empty());
        assert!(snaps.is_empty(), "{algo:?}");

        let (out, snaps) = run_sort(algo, &[42], SortOrder::Descending);
        assert_eq!(out, vec![42]);
        assert!(snaps.is_empty(), "{algo:?}");
    }
}

#[test]
fn all_equal_keys_terminate() {
    let input = [4; 16];
    for algo in SortAlgorithm::ALL {
        let (out, snaps) = run_sort(algo, &input, SortOrder::Ascending);
        assert_eq!(out, input.to_vec());
        assert!(!snaps.is_empty());
    }
}

#[test]
fn bubble_exits_after_one_pass_on_sorted_input() {
    let input = [1, 2, 3, 4, 5];
    let (_, snaps) = run_sort(SortAlgorithm::Bubble, &input, SortOrder::Ascending);
    // n - 1 comparisons plus the settled snapshot.
    assert_eq!(snaps.len(), 5);
}

#[test]
fn bubble_emits_before_compare_and_after_swap() {
    let (_, snaps) = run_sort(SortAlgorithm::Bubble, &[2, 1], SortOrder::Ascending);
    assert_eq!(snaps[0].values, vec![2, 1]);
    assert_eq!(snaps[0].current, Some(0));
    assert_eq!(snaps[0].compare, Some(1));
    assert_eq!(snaps[1].values, vec![1, 2]);
    assert_eq!(snaps.last().map(|s| s.current), Some(None));
}

#[test]
fn selection_swaps_at_most_once_per_pass() {
    let input = [3, 1, 2];
    let (out, snaps) = run_sort(SortAlgorithm::Selection, &input, SortOrder::Ascending);
    assert_eq!(out, vec![1, 2, 3]);
    let changes = snaps
        .windows(2)
        .filter(|w| w[0].values != w[1].values)
        .count();
    assert!(changes <= input.len() - 1);
}

#[test]
fn stable_sorts_keep_tied_pairs_in_input_order() {
    let input = vec![(1, 'a'), (0, 'x'), (1, 'b'), (0, 'y'), (1, 'c')];
    let cmp = Comparator::by(SortOrder::Ascending, by_key);
    for algo in SortAlgorithm::ALL.into_iter().filter(|a| a.is_stable()) {
        let mut sink = crate::control::stepper::NullSink;
        let mut stepper: Stepper<'_, ArraySnapshot<(i32, char)>> = Stepper::detached(&mut sink);
        let out = algo.run(&input, &cmp, &mut stepper).expect("detached");
        assert_eq!(
            out,
            vec![(0, 'x'), (0, 'y'), (1, 'a'), (1, 'b'), (1, 'c')],
            "{algo:?}"
        );
    }
}

#[test]
fn merge_sort_stable_descending() {
    let input = vec![(1, 'a'), (2, 'z'), (1, 'b')];
    let cmp = Comparator::by(SortOrder::Descending, by_key);
    let mut sink = crate::control::stepper::NullSink;
    let mut stepper: Stepper<'_, ArraySnapshot<(i32, char)>> = Stepper::detached(&mut sink);
    let out = merge_sort(&input, &cmp, &mut stepper).expect("detached");
    assert_eq!(out, vec![(2, 'z'), (1, 'a'), (1, 'b')]);
}

#[test]
fn quick_sort_final_snapshot_matches_result() {
    let input = [9, -4, 0, 12, 3, 3, -8];
    let (out, snaps) = run_sort(SortAlgorithm::Quick, &input, SortOrder::Ascending);
    assert_eq!(snaps.last().map(|s| s.values.clone()), Some(out));
}

#[test]
fn input_slice_is_left_untouched() {
    let input = vec![3, 2, 1];
    let _ = run_sort(SortAlgorithm::Insertion, &input, SortOrder::Ascending);
    assert_eq!(input, vec![3, 2, 1]);
}

#[test]
fn comparator_orientation() {
    let asc = Comparator::<i32>::natural(SortOrder::Ascending);
    assert!(asc.before(&1, &2));
    assert!(asc.in_order(&2, &2));
    assert!(!asc.out_of_order(&2, &2));

    let desc = Comparator::<i32>::natural(SortOrder::Descending);
    assert!(desc.before(&2, &1));
    assert!(desc.out_of_order(&1, &2));
}
