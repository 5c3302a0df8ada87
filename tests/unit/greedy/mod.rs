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

fn classic_activities() -> Vec<Activity> {
    vec![
        Activity::new("a1", 1, 4),
        Activity::new("a2", 3, 5),
        Activity::new("a3", 0, 6),
        Activity::new("a4", 5, 7),
        Activity::new("a5", 3, 9),
        Activity::new("a6", 5, 9),
        Activity::new("a7", 6, 10),
        Activity::new("a8", 8, 11),
        Activity::new("a9", 8, 12),
        Activity::new("a10", 2, 14),
        Activity::new("a11", 12, 16),
    ]
}

#[test]
fn activity_selection_keeps_compatible_activities() {
    let (out, snaps) = recorded(|s| select_activities(&classic_activities(), s));
    let names: Vec<&str> = out.selected.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["a1", "a4", "a8", "a11"]);
    // Inclusions only.
    assert_eq!(snaps.len(), 4);
    assert_eq!(snaps.last().map(|s| s.selected.len()), Some(4));
    assert!(out.by_finish.windows(2).all(|w| w[0].finish <= w[1].finish));
}

#[test]
fn activity_selection_on_empty_input() {
    let (out, snaps) = recorded(|s| select_activities(&[], s));
    assert!(out.selected.is_empty());
    assert!(snaps.is_empty());
}

#[test]
fn huffman_codes_are_prefix_free_and_optimal() {
    let symbols = vec![
        Symbol::new("a", 5),
        Symbol::new("b", 9),
        Symbol::new("c", 12),
        Symbol::new("d", 13),
        Symbol::new("e", 16),
        Symbol::new("f", 45),
    ];
    let (out, snaps) = recorded(|s| huffman_coding(&symbols, s));
    assert_eq!(out.root.as_ref().map(|r| r.frequency), Some(100));
    assert_eq!(out.codes.len(), 6);
    assert_eq!(out.codes["f"].len(), 1);
    assert_eq!(out.encoded_bits, 224);

    let codes: Vec<&String> = out.codes.values().collect();
    for a in &codes {
        for b in &codes {
            if a != b {
                assert!(!b.starts_with(a.as_str()), "{a} prefixes {b}");
            }
        }
    }
    // Initial forest plus one per merge.
    assert_eq!(snaps.len(), 1 + 5);
    assert_eq!(snaps[0].forest.len(), 6);
    assert_eq!(snaps.last().map(|s| s.forest.len()), Some(1));
}

#[test]
fn huffman_single_symbol_gets_one_bit() {
    let (out, _) = recorded(|s| huffman_coding(&[Symbol::new("x", 7)], s));
    assert_eq!(out.codes["x"], "0");
    assert_eq!(out.encoded_bits, 7);
    assert!(out.root.is_some_and(|r| r.is_leaf()));
}

#[test]
fn huffman_empty_input_has_no_tree() {
    let (out, snaps) = recorded(|s| huffman_coding(&[], s));
    assert!(out.root.is_none());
    assert!(out.codes.is_empty());
    assert!(snaps.is_empty());
}

#[test]
fn huffman_rejects_duplicate_symbols() {
    assert!(check_symbols(&[Symbol::new("a", 1), Symbol::new("a", 2)]).is_err());
}

#[test]
fn fractional_knapsack_splits_the_last_item() {
    let items = vec![
        Item::new("x", 10, 60),
        Item::new("y", 20, 100),
        Item::new("z", 30, 120),
    ];
    let (out, snaps) = recorded(|s| fractional_knapsack(&items, 50, s));
    assert!((out.total_value - 240.0).abs() < 1e-9);
    assert_eq!(out.selected.len(), 3);
    assert_eq!(out.selected[0].item.name, "x");
    let last = out.selected.last().expect("split item");
    assert_eq!(last.item.name, "z");
    assert!((last.fraction - 2.0 / 3.0).abs() < 1e-9);
    // Initial plus one per item considered.
    assert_eq!(snaps.len(), 4);
    assert_eq!(snaps.last().map(|s| s.remaining_capacity), Some(0.0));
}

#[test]
fn fractional_knapsack_rejects_weightless_items() {
    assert!(check_items(&[Item::new("free", 0, 10)]).is_err());
}

#[test]
fn job_scheduling_fills_latest_free_slots() {
    let jobs = vec![
        Job::new("a", 2, 100),
        Job::new("b", 1, 19),
        Job::new("c", 2, 27),
        Job::new("d", 1, 25),
        Job::new("e", 3, 15),
    ];
    let (out, snaps) = recorded(|s| schedule_jobs(&jobs, s));
    let slots: Vec<Option<&str>> = out
        .slots
        .iter()
        .map(|s| s.as_ref().map(|j| j.name.as_str()))
        .collect();
    assert_eq!(slots, vec![Some("c"), Some("a"), Some("e")]);
    assert_eq!(out.total_profit, 142);
    assert_eq!(snaps.len(), 1 + jobs.len());
}

#[test]
fn job_deadlines_are_validated() {
    assert!(check_jobs(&[Job::new("late", 0, 1)]).is_err());
    assert!(check_jobs(&[Job::new("far", MAX_DEADLINE + 1, 1)]).is_err());
    assert!(check_jobs(&[Job::new("ok", 3, 1)]).is_ok());
}
