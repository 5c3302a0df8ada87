//! Request validation and engine selection.
//!
//! [`prepare`] turns a [`RunRequest`] into a [`Plan`] whose inputs are already
//! known to be acceptable, so a rejected request never produces a snapshot.

use crate::backtracking::{self, Sudoku, check_queens};
use crate::control::stepper::{Pacer, SnapshotSink, StepResult, Stepper};
use crate::dp::{self, KnapsackProblem};
use crate::foundation::core::SortOrder;
use crate::foundation::error::{AlgoError, AlgoResult};
use crate::graph::{GraphAlgorithm, GraphRun};
use crate::greedy::{self, Activity, Item, Job, Symbol};
use crate::numeric::{self, check_factor_input, check_sieve};
use crate::searching::SearchAlgorithm;
use crate::sorting::{Comparator, SortAlgorithm};
use crate::tree::{self, Traversal, Tree, TreeKind, TreeOp};

use super::request::{AlgorithmId, AlgorithmInput, RunOptions, RunRequest};
use super::snapshot::{AlgorithmResult, Mapped, Snapshot};

/// Longest array accepted by the sorts and searches.
pub const MAX_ARRAY_LEN: usize = 1_000;
/// Longest activity list accepted by activity selection.
pub const MAX_ACTIVITIES: usize = 256;

#[derive(Clone, Debug)]
pub(crate) enum Plan {
    Sort {
        algorithm: SortAlgorithm,
        values: Vec<i64>,
        order: SortOrder,
    },
    Search {
        algorithm: SearchAlgorithm,
        values: Vec<i64>,
        target: i64,
    },
    Graph(GraphRun),
    Fibonacci(usize),
    Knapsack(KnapsackProblem),
    Lcs {
        first: String,
        second: String,
    },
    Lis(Vec<i64>),
    Activities(Vec<Activity>),
    Huffman(Vec<Symbol>),
    Fractional {
        items: Vec<Item>,
        capacity: u64,
    },
    Jobs(Vec<Job>),
    Queens(usize),
    Sudoku(Sudoku),
    TreeOps {
        tree: Tree,
        ops: Vec<TreeOp>,
    },
    Traverse {
        tree: Tree,
        order: Traversal,
    },
    Lca {
        tree: Tree,
        a: i64,
        b: i64,
    },
    Sieve(u64),
    Gcd {
        a: u64,
        b: u64,
    },
    Factor(u64),
}

fn expected(id: AlgorithmId, shape: &str, input: &AlgorithmInput) -> AlgoError {
    AlgoError::invalid_input(format!(
        "{id} expects '{shape}' input, got '{}'",
        input.shape()
    ))
}

fn check_array(values: &[i64]) -> AlgoResult<()> {
    if values.len() > MAX_ARRAY_LEN {
        return Err(AlgoError::invalid_input(format!(
            "array has {} elements; at most {MAX_ARRAY_LEN}",
            values.len()
        )));
    }
    Ok(())
}

fn sort(
    id: AlgorithmId,
    algorithm: SortAlgorithm,
    input: &AlgorithmInput,
    options: &RunOptions,
) -> AlgoResult<Plan> {
    let AlgorithmInput::Array { values } = input else {
        return Err(expected(id, "array", input));
    };
    check_array(values)?;
    Ok(Plan::Sort {
        algorithm,
        values: values.clone(),
        order: options.order,
    })
}

fn search(id: AlgorithmId, algorithm: SearchAlgorithm, input: &AlgorithmInput) -> AlgoResult<Plan> {
    let AlgorithmInput::Search { values, target } = input else {
        return Err(expected(id, "search", input));
    };
    check_array(values)?;
    Ok(Plan::Search {
        algorithm,
        values: values.clone(),
        target: *target,
    })
}

fn graph(
    id: AlgorithmId,
    algorithm: GraphAlgorithm,
    input: &AlgorithmInput,
    options: &RunOptions,
) -> AlgoResult<Plan> {
    let AlgorithmInput::Graph { graph, start } = input else {
        return Err(expected(id, "graph", input));
    };
    algorithm
        .prepare(graph, start.as_deref(), options.directed)
        .map(Plan::Graph)
}

fn tree_ops(id: AlgorithmId, kind: TreeKind, input: &AlgorithmInput) -> AlgoResult<Plan> {
    let AlgorithmInput::TreeOps { keys, ops } = input else {
        return Err(expected(id, "tree_ops", input));
    };
    tree::check_tree_input(kind, keys.len(), ops.len())?;
    Ok(Plan::TreeOps {
        tree: tree::build(kind, keys)?,
        ops: ops.clone(),
    })
}

fn level_order(values: &[Option<i64>]) -> AlgoResult<Tree> {
    if values.len() > tree::MAX_TREE_KEYS {
        return Err(AlgoError::invalid_input(format!(
            "level order has {} slots; at most {}",
            values.len(),
            tree::MAX_TREE_KEYS
        )));
    }
    Ok(Tree::from_level_order(values))
}

fn number(id: AlgorithmId, input: &AlgorithmInput) -> AlgoResult<u64> {
    match input {
        AlgorithmInput::Number { n } => Ok(*n),
        _ => Err(expected(id, "number", input)),
    }
}

/// Validate `request` against its algorithm. Nothing runs on error.
pub(crate) fn prepare(request: &RunRequest) -> AlgoResult<Plan> {
    use AlgorithmId as Id;
    use AlgorithmInput as In;

    let RunRequest {
        algorithm: id,
        input,
        options,
    } = request;
    let id = *id;

    let plan = match id {
        Id::BubbleSort => sort(id, SortAlgorithm::Bubble, input, options)?,
        Id::InsertionSort => sort(id, SortAlgorithm::Insertion, input, options)?,
        Id::SelectionSort => sort(id, SortAlgorithm::Selection, input, options)?,
        Id::MergeSort => sort(id, SortAlgorithm::Merge, input, options)?,
        Id::QuickSort => sort(id, SortAlgorithm::Quick, input, options)?,

        Id::LinearSearch => search(id, SearchAlgorithm::Linear, input)?,
        Id::BinarySearch => search(id, SearchAlgorithm::Binary, input)?,
        Id::JumpSearch => search(id, SearchAlgorithm::Jump, input)?,
        Id::InterpolationSearch => search(id, SearchAlgorithm::Interpolation, input)?,

        Id::Bfs => graph(id, GraphAlgorithm::Bfs, input, options)?,
        Id::Dfs => graph(id, GraphAlgorithm::Dfs, input, options)?,
        Id::Dijkstra => graph(id, GraphAlgorithm::Dijkstra, input, options)?,
        Id::Prim => graph(id, GraphAlgorithm::Prim, input, options)?,
        Id::Kruskal => graph(id, GraphAlgorithm::Kruskal, input, options)?,

        Id::Fibonacci => {
            let n = usize::try_from(number(id, input)?)
                .map_err(|_| AlgoError::invalid_input("fibonacci index out of range"))?;
            dp::check_fibonacci(n)?;
            Plan::Fibonacci(n)
        }
        Id::Knapsack => {
            let In::Knapsack(problem) = input else {
                return Err(expected(id, "knapsack", input));
            };
            problem.validate()?;
            Plan::Knapsack(problem.clone())
        }
        Id::Lcs => {
            let In::Strings { first, second } = input else {
                return Err(expected(id, "strings", input));
            };
            dp::check_lcs(first, second)?;
            Plan::Lcs {
                first: first.clone(),
                second: second.clone(),
            }
        }
        Id::Lis => {
            let In::Array { values } = input else {
                return Err(expected(id, "array", input));
            };
            dp::check_lis(values)?;
            Plan::Lis(values.clone())
        }

        Id::ActivitySelection => {
            let In::Activities { activities } = input else {
                return Err(expected(id, "activities", input));
            };
            if activities.len() > MAX_ACTIVITIES {
                return Err(AlgoError::invalid_input(format!(
                    "at most {MAX_ACTIVITIES} activities"
                )));
            }
            if let Some(bad) = activities.iter().find(|a| a.finish < a.start) {
                return Err(AlgoError::invalid_input(format!(
                    "activity '{}' finishes before it starts",
                    bad.name
                )));
            }
            Plan::Activities(activities.clone())
        }
        Id::HuffmanCoding => {
            let In::Symbols { symbols } = input else {
                return Err(expected(id, "symbols", input));
            };
            greedy::check_symbols(symbols)?;
            Plan::Huffman(symbols.clone())
        }
        Id::FractionalKnapsack => {
            let In::Items { items, capacity } = input else {
                return Err(expected(id, "items", input));
            };
            greedy::check_items(items)?;
            Plan::Fractional {
                items: items.clone(),
                capacity: *capacity,
            }
        }
        Id::JobScheduling => {
            let In::Jobs { jobs } = input else {
                return Err(expected(id, "jobs", input));
            };
            greedy::check_jobs(jobs)?;
            Plan::Jobs(jobs.clone())
        }

        Id::NQueens => {
            let In::Board { size } = input else {
                return Err(expected(id, "board", input));
            };
            check_queens(*size)?;
            Plan::Queens(*size)
        }
        Id::SudokuSolver => {
            let In::Sudoku { board } = input else {
                return Err(expected(id, "sudoku", input));
            };
            let sudoku = match board {
                Some(rows) => Sudoku::from_rows(rows)?,
                None => Sudoku::preset(options.difficulty),
            };
            Plan::Sudoku(sudoku)
        }

        Id::BinarySearchTree => tree_ops(id, TreeKind::Bst, input)?,
        Id::AvlTree => tree_ops(id, TreeKind::Avl, input)?,
        Id::RedBlackTree => tree_ops(id, TreeKind::RedBlack, input)?,
        Id::TreeTraversal => {
            let In::LevelOrder { values, traversal } = input else {
                return Err(expected(id, "level_order", input));
            };
            Plan::Traverse {
                tree: level_order(values)?,
                order: *traversal,
            }
        }
        Id::LowestCommonAncestor => {
            let In::Lca { values, a, b } = input else {
                return Err(expected(id, "lca", input));
            };
            Plan::Lca {
                tree: level_order(values)?,
                a: *a,
                b: *b,
            }
        }

        Id::SieveOfEratosthenes => {
            let limit = number(id, input)?;
            check_sieve(limit)?;
            Plan::Sieve(limit)
        }
        Id::Gcd => {
            let In::Pair { a, b } = input else {
                return Err(expected(id, "pair", input));
            };
            Plan::Gcd { a: *a, b: *b }
        }
        Id::PrimeFactorization => {
            let n = number(id, input)?;
            check_factor_input(n)?;
            Plan::Factor(n)
        }
    };
    Ok(plan)
}

/// Run `body` against a stepper whose snapshots are wrapped into [`Snapshot`].
fn stepped<S, T>(
    out: &mut dyn SnapshotSink<Snapshot>,
    pacer: Pacer,
    wrap: fn(S) -> Snapshot,
    body: impl FnOnce(&mut Stepper<'_, S>) -> StepResult<T>,
) -> StepResult<T> {
    let mut sink = Mapped::new(out, wrap);
    let mut stepper = Stepper::new(&mut sink, pacer);
    body(&mut stepper)
}

impl Plan {
    pub(crate) fn execute(
        self,
        out: &mut dyn SnapshotSink<Snapshot>,
        pacer: Pacer,
        record_steps: bool,
    ) -> StepResult<AlgorithmResult> {
        use AlgorithmResult as R;

        match self {
            Plan::Sort {
                algorithm,
                values,
                order,
            } => {
                let cmp = Comparator::natural(order);
                stepped(out, pacer, Snapshot::Array, |s| {
                    algorithm.run(&values, &cmp, s)
                })
                .map(R::Sorted)
            }
            Plan::Search {
                algorithm,
                values,
                target,
            } => stepped(out, pacer, Snapshot::Probe, |s| {
                algorithm.run(&values, target, s)
            })
            .map(R::Search),
            Plan::Graph(run) => stepped(out, pacer, Snapshot::Graph, |s| run.run(s)).map(R::Graph),
            Plan::Fibonacci(n) => {
                stepped(out, pacer, Snapshot::Table, |s| dp::fibonacci(n, s)).map(R::Fibonacci)
            }
            Plan::Knapsack(problem) => {
                stepped(out, pacer, Snapshot::Table, |s| dp::knapsack(&problem, s))
                    .map(R::Knapsack)
            }
            Plan::Lcs { first, second } => {
                stepped(out, pacer, Snapshot::Table, |s| dp::lcs(&first, &second, s)).map(R::Lcs)
            }
            Plan::Lis(values) => {
                stepped(out, pacer, Snapshot::Table, |s| dp::lis(&values, s)).map(R::Lis)
            }
            Plan::Activities(activities) => stepped(out, pacer, Snapshot::Activity, |s| {
                greedy::select_activities(&activities, s)
            })
            .map(R::Activities),
            Plan::Huffman(symbols) => stepped(out, pacer, Snapshot::Huffman, |s| {
                greedy::huffman_coding(&symbols, s)
            })
            .map(R::Huffman),
            Plan::Fractional { items, capacity } => {
                stepped(out, pacer, Snapshot::Fractional, |s| {
                    greedy::fractional_knapsack(&items, capacity, s)
                })
                .map(R::Fractional)
            }
            Plan::Jobs(jobs) => {
                stepped(out, pacer, Snapshot::Jobs, |s| greedy::schedule_jobs(&jobs, s))
                    .map(R::Jobs)
            }
            Plan::Queens(n) => stepped(out, pacer, Snapshot::Queens, |s| {
                backtracking::n_queens(n, record_steps, s)
            })
            .map(R::Queens),
            Plan::Sudoku(board) => stepped(out, pacer, Snapshot::Sudoku, |s| {
                backtracking::solve_sudoku(&board, record_steps, s)
            })
            .map(R::Sudoku),
            Plan::TreeOps { mut tree, ops } => stepped(out, pacer, Snapshot::Tree, |s| {
                tree::apply_ops(&mut tree, &ops, s)
            })
            .map(R::Tree),
            Plan::Traverse { tree, order } => {
                stepped(out, pacer, Snapshot::Tree, |s| tree.traverse(order, s))
                    .map(R::Traversal)
            }
            Plan::Lca { tree, a, b } => stepped(out, pacer, Snapshot::Tree, |s| {
                tree.lowest_common_ancestor(a, b, s)
            })
            .map(R::Lca),
            Plan::Sieve(limit) => {
                stepped(out, pacer, Snapshot::Sieve, |s| numeric::sieve(limit, s)).map(R::Sieve)
            }
            Plan::Gcd { a, b } => {
                stepped(out, pacer, Snapshot::Gcd, |s| numeric::gcd(a, b, s)).map(R::Gcd)
            }
            Plan::Factor(n) => {
                stepped(out, pacer, Snapshot::Factor, |s| numeric::factorize(n, s))
                    .map(R::Factors)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/run/dispatch.rs"]
mod tests;
