use std::time::Duration;

use super::*;
use crate::control::cancel::CancellationSource;
use crate::control::playback::PlaybackControl;
use crate::control::stepper::{Pacing, Recorder};
use crate::tree::{Tree, TreeOp};

fn bubble(values: Vec<i64>) -> RunRequest {
    RunRequest::new(AlgorithmId::BubbleSort, AlgorithmInput::Array { values })
}

#[test]
fn blocking_run_completes_and_counts_snapshots() {
    let mut rec: Recorder<Snapshot> = Recorder::new();
    let outcome = run_blocking(
        &bubble(vec![4, 3, 2, 1]),
        &mut rec,
        &RunnerConfig::unpaced(),
        PlaybackControl::default().view(),
        CancellationToken::never(),
    )
    .unwrap();

    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.kind, "sort.bubble");
    assert_eq!(outcome.generation, 0);
    assert_eq!(outcome.snapshots, rec.len() as u64);
    assert_eq!(
        outcome.result,
        Some(AlgorithmResult::Sorted(vec![1, 2, 3, 4]))
    );
    assert!(outcome.error.is_none());
}

#[test]
fn invalid_request_emits_nothing() {
    let mut rec: Recorder<Snapshot> = Recorder::new();
    let err = run_blocking(
        &RunRequest::new(AlgorithmId::Knapsack, AlgorithmInput::Number { n: 1 }),
        &mut rec,
        &RunnerConfig::unpaced(),
        PlaybackControl::default().view(),
        CancellationToken::never(),
    )
    .unwrap_err();
    assert!(matches!(err, crate::AlgoError::InvalidInput(_)));
    assert!(rec.is_empty());
}

#[test]
fn cancelled_before_start_reports_cancelled() {
    let source = CancellationSource::new();
    source.cancel();
    let mut rec: Recorder<Snapshot> = Recorder::new();
    let outcome = run_blocking(
        &bubble(vec![2, 1]),
        &mut rec,
        &RunnerConfig::unpaced(),
        PlaybackControl::default().view(),
        source.token(),
    )
    .unwrap();
    assert_eq!(outcome.status, RunStatus::Cancelled);
    assert!(outcome.result.is_none());
    assert_eq!(outcome.snapshots, 0);
    assert!(rec.is_empty());
}

#[test]
fn broken_invariant_aborts_the_run() {
    // Plain trees have no key order, so an insert trips the engine's guard.
    let plan = Plan::TreeOps {
        tree: Tree::from_level_order(&[Some(1), Some(2)]),
        ops: vec![TreeOp::Insert(3)],
    };
    let mut rec: Recorder<Snapshot> = Recorder::new();
    let outcome = drive(
        plan,
        AlgorithmId::BinarySearchTree,
        7,
        &mut rec,
        &RunnerConfig::unpaced(),
        PlaybackControl::default().view(),
        CancellationToken::never(),
    );
    assert_eq!(outcome.status, RunStatus::Aborted);
    assert_eq!(outcome.generation, 7);
    assert!(outcome.result.is_none());
    assert!(outcome.error.is_some());
}

#[test]
fn outcome_serializes_with_tagged_result() {
    let mut rec: Recorder<Snapshot> = Recorder::new();
    let outcome = run_blocking(
        &RunRequest::new(AlgorithmId::Gcd, AlgorithmInput::Pair { a: 10, b: 4 }),
        &mut rec,
        &RunnerConfig::unpaced(),
        PlaybackControl::default().view(),
        CancellationToken::never(),
    )
    .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "completed");
    assert_eq!(json["algorithm"], "gcd");
    assert_eq!(json["result"]["kind"], "gcd");
    assert_eq!(json["result"]["value"]["gcd"], 2);
    assert!(json.get("error").is_none());

    let first = serde_json::to_value(&rec.snapshots[0]).unwrap();
    assert_eq!(first["family"], "gcd");
}

#[test]
fn runner_config_reads_partial_json() {
    let config: RunnerConfig =
        serde_json::from_str(r#"{"pacing": "unpaced", "poll_interval": 10}"#).unwrap();
    assert_eq!(config.pacing, Pacing::Unpaced);
    assert_eq!(config.poll_interval, Duration::from_millis(10));
    assert_eq!(config.initial_speed, crate::DEFAULT_SPEED);
    assert!(config.record_steps);
    assert_eq!(RunnerConfig::default().with_initial_speed(200).initial_speed, 100);
}

#[test]
fn status_reports_finished_states() {
    assert!(!RunStatus::Idle.is_finished());
    assert!(!RunStatus::Paused.is_finished());
    assert!(RunStatus::Aborted.is_finished());
    assert_eq!(serde_json::to_string(&RunStatus::Cancelled).unwrap(), "\"cancelled\"");
}
