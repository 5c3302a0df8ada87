use super::*;
use crate::backtracking::Difficulty;
use crate::control::stepper::Recorder;
use crate::graph::Graph;
use crate::tree::TreeEvent;

fn request(algorithm: AlgorithmId, input: AlgorithmInput) -> RunRequest {
    RunRequest::new(algorithm, input)
}

fn execute(plan: Plan) -> (AlgorithmResult, Vec<Snapshot>) {
    let mut rec: Recorder<Snapshot> = Recorder::new();
    let result = plan
        .execute(&mut rec, Pacer::detached(), true)
        .expect("detached run");
    (result, rec.snapshots)
}

#[test]
fn mismatched_input_shape_is_rejected() {
    let err = prepare(&request(
        AlgorithmId::BubbleSort,
        AlgorithmInput::Number { n: 3 },
    ))
    .unwrap_err();
    assert!(matches!(err, AlgoError::InvalidInput(_)));
    assert!(err.to_string().contains("expects 'array'"), "{err}");

    assert!(prepare(&request(AlgorithmId::Gcd, AlgorithmInput::Number { n: 3 })).is_err());
}

#[test]
fn oversized_inputs_are_rejected() {
    let values: Vec<i64> = (0..=MAX_ARRAY_LEN as i64).collect();
    assert!(prepare(&request(AlgorithmId::MergeSort, AlgorithmInput::Array { values })).is_err());
    assert!(
        prepare(&request(
            AlgorithmId::SieveOfEratosthenes,
            AlgorithmInput::Number { n: 1_000_000 }
        ))
        .is_err()
    );
    assert!(
        prepare(&request(
            AlgorithmId::NQueens,
            AlgorithmInput::Board { size: 20 }
        ))
        .is_err()
    );
}

#[test]
fn graph_validation_happens_up_front() {
    let graph = Graph::new().node("A").node("B").edge("A", "B", -2);
    let input = AlgorithmInput::Graph {
        graph: graph.clone(),
        start: None,
    };
    assert!(prepare(&request(AlgorithmId::Dijkstra, input.clone())).is_err());
    assert!(prepare(&request(AlgorithmId::Bfs, input)).is_ok());

    let missing_start = AlgorithmInput::Graph {
        graph,
        start: Some("Z".into()),
    };
    assert!(prepare(&request(AlgorithmId::Dfs, missing_start)).is_err());
}

#[test]
fn backwards_activity_is_rejected() {
    let input = AlgorithmInput::Activities {
        activities: vec![Activity::new("a", 5, 2)],
    };
    let err = prepare(&request(AlgorithmId::ActivitySelection, input)).unwrap_err();
    assert!(err.to_string().contains("finishes before it starts"));
}

#[test]
fn sudoku_without_board_uses_difficulty_preset() {
    let req = request(
        AlgorithmId::SudokuSolver,
        AlgorithmInput::Sudoku { board: None },
    )
    .with_options(RunOptions {
        difficulty: Difficulty::Hard,
        ..RunOptions::default()
    });
    match prepare(&req).unwrap() {
        Plan::Sudoku(board) => assert_eq!(board, Sudoku::preset(Difficulty::Hard)),
        other => panic!("unexpected plan {other:?}"),
    }
}

#[test]
fn sort_plan_emits_array_snapshots() {
    let req = request(
        AlgorithmId::InsertionSort,
        AlgorithmInput::Array {
            values: vec![3, 1, 2],
        },
    )
    .with_options(RunOptions {
        order: SortOrder::Descending,
        ..RunOptions::default()
    });
    let (result, snaps) = execute(prepare(&req).unwrap());
    assert_eq!(result, AlgorithmResult::Sorted(vec![3, 2, 1]));
    assert!(!snaps.is_empty());
    assert!(snaps.iter().all(|s| matches!(s, Snapshot::Array(_))));
}

#[test]
fn lis_reads_array_input() {
    let req = request(
        AlgorithmId::Lis,
        AlgorithmInput::Array {
            values: vec![10, 9, 2, 5, 3, 7, 101, 18],
        },
    );
    let (result, snaps) = execute(prepare(&req).unwrap());
    let AlgorithmResult::Lis(lis) = result else {
        panic!("unexpected result {result:?}");
    };
    assert_eq!(lis.length, 4);
    assert!(snaps.iter().all(|s| matches!(s, Snapshot::Table(_))));
}

#[test]
fn tree_ops_start_from_silent_keys() {
    let req = request(
        AlgorithmId::RedBlackTree,
        AlgorithmInput::TreeOps {
            keys: vec![10, 20, 30],
            ops: vec![TreeOp::Search(20), TreeOp::Insert(25)],
        },
    );
    let (result, snaps) = execute(prepare(&req).unwrap());
    let AlgorithmResult::Tree(outcome) = result else {
        panic!("unexpected result {result:?}");
    };
    assert_eq!(outcome.in_order, vec![10, 20, 25, 30]);
    // The prebuilt keys emit nothing; the search finds the root at once.
    match &snaps[0] {
        Snapshot::Tree(t) => {
            assert_eq!(t.event, TreeEvent::Visit);
            assert_eq!(t.current, Some(20));
        }
        other => panic!("unexpected snapshot {other:?}"),
    }
}

#[test]
fn numeric_plans_dispatch() {
    let (result, _) = execute(
        prepare(&request(AlgorithmId::Gcd, AlgorithmInput::Pair { a: 84, b: 36 })).unwrap(),
    );
    match result {
        AlgorithmResult::Gcd(g) => assert_eq!(g.gcd, 12),
        other => panic!("unexpected result {other:?}"),
    }

    let (result, snaps) = execute(
        prepare(&request(
            AlgorithmId::PrimeFactorization,
            AlgorithmInput::Number { n: 12 },
        ))
        .unwrap(),
    );
    match result {
        AlgorithmResult::Factors(f) => assert_eq!(f.factors, vec![2, 2, 3]),
        other => panic!("unexpected result {other:?}"),
    }
    assert!(snaps.iter().all(|s| matches!(s, Snapshot::Factor(_))));
}
