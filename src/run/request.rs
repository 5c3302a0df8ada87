use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backtracking::Difficulty;
use crate::control::stepper::DelayCurve;
use crate::dp::KnapsackProblem;
use crate::foundation::core::SortOrder;
use crate::foundation::error::{AlgoError, AlgoResult};
use crate::graph::Graph;
use crate::greedy::{Activity, Item, Job, Symbol};
use crate::tree::{Traversal, TreeOp};

/// Engine family an algorithm belongs to; fixes the snapshot shape and delay curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Sort,
    Search,
    Graph,
    Dp,
    Greedy,
    Backtracking,
    Tree,
    Numeric,
}

impl Family {
    pub fn delay_curve(self) -> DelayCurve {
        match self {
            Self::Sort => crate::sorting::DELAY_CURVE,
            Self::Search => crate::searching::DELAY_CURVE,
            Self::Graph => crate::graph::DELAY_CURVE,
            Self::Dp => crate::dp::DELAY_CURVE,
            Self::Greedy => crate::greedy::DELAY_CURVE,
            Self::Backtracking => crate::backtracking::DELAY_CURVE,
            Self::Tree => crate::tree::DELAY_CURVE,
            Self::Numeric => crate::numeric::DELAY_CURVE,
        }
    }
}

macro_rules! algorithm_ids {
    ($($variant:ident => $id:literal, $kind:literal, $family:ident;)+) => {
        /// Every runnable algorithm, addressed by a kebab-case id.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum AlgorithmId {
            $(#[serde(rename = $id)] $variant,)+
        }

        impl AlgorithmId {
            pub const ALL: &'static [AlgorithmId] = &[$(Self::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }

            /// Dotted `family.variant` tag, e.g. `sort.quick`.
            pub fn kind(self) -> &'static str {
                match self {
                    $(Self::$variant => $kind,)+
                }
            }

            pub fn family(self) -> Family {
                match self {
                    $(Self::$variant => Family::$family,)+
                }
            }
        }
    };
}

algorithm_ids! {
    BubbleSort => "bubble-sort", "sort.bubble", Sort;
    InsertionSort => "insertion-sort", "sort.insertion", Sort;
    SelectionSort => "selection-sort", "sort.selection", Sort;
    MergeSort => "merge-sort", "sort.merge", Sort;
    QuickSort => "quick-sort", "sort.quick", Sort;
    LinearSearch => "linear-search", "search.linear", Search;
    BinarySearch => "binary-search", "search.binary", Search;
    JumpSearch => "jump-search", "search.jump", Search;
    InterpolationSearch => "interpolation-search", "search.interpolation", Search;
    Bfs => "bfs", "graph.bfs", Graph;
    Dfs => "dfs", "graph.dfs", Graph;
    Dijkstra => "dijkstra", "graph.dijkstra", Graph;
    Prim => "prim", "graph.prim", Graph;
    Kruskal => "kruskal", "graph.kruskal", Graph;
    Fibonacci => "fibonacci", "dp.fibonacci", Dp;
    Knapsack => "knapsack", "dp.knapsack", Dp;
    Lcs => "lcs", "dp.lcs", Dp;
    Lis => "lis", "dp.lis", Dp;
    ActivitySelection => "activity-selection", "greedy.activity", Greedy;
    HuffmanCoding => "huffman-coding", "greedy.huffman", Greedy;
    FractionalKnapsack => "fractional-knapsack", "greedy.fractional-knapsack", Greedy;
    JobScheduling => "job-scheduling", "greedy.job-scheduling", Greedy;
    NQueens => "n-queens", "backtracking.n-queens", Backtracking;
    SudokuSolver => "sudoku-solver", "backtracking.sudoku", Backtracking;
    BinarySearchTree => "binary-search-tree", "tree.bst", Tree;
    AvlTree => "avl-tree", "tree.avl", Tree;
    RedBlackTree => "red-black-tree", "tree.red-black", Tree;
    TreeTraversal => "tree-traversal", "tree.traversal", Tree;
    LowestCommonAncestor => "lowest-common-ancestor", "tree.lca", Tree;
    SieveOfEratosthenes => "sieve-of-eratosthenes", "numeric.sieve", Numeric;
    Gcd => "gcd", "numeric.gcd", Numeric;
    PrimeFactorization => "prime-factorization", "numeric.factorization", Numeric;
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| AlgoError::invalid_input(format!("unknown algorithm '{s}'")))
    }
}

/// Algorithm-specific input, tagged by shape: `{"array": {"values": [3, 1, 2]}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmInput {
    Array {
        values: Vec<i64>,
    },
    Search {
        values: Vec<i64>,
        target: i64,
    },
    Graph {
        graph: Graph,
        /// Defaults to the first node.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<String>,
    },
    Number {
        n: u64,
    },
    Pair {
        a: u64,
        b: u64,
    },
    Knapsack(KnapsackProblem),
    Strings {
        first: String,
        second: String,
    },
    Activities {
        activities: Vec<Activity>,
    },
    Symbols {
        symbols: Vec<Symbol>,
    },
    Items {
        items: Vec<Item>,
        capacity: u64,
    },
    Jobs {
        jobs: Vec<Job>,
    },
    Board {
        size: usize,
    },
    /// Rows of digits, `0` for blanks. Without a board the difficulty preset is used.
    Sudoku {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        board: Option<Vec<Vec<u8>>>,
    },
    TreeOps {
        /// Inserted silently before the operations run.
        #[serde(default)]
        keys: Vec<i64>,
        #[serde(default)]
        ops: Vec<TreeOp>,
    },
    LevelOrder {
        values: Vec<Option<i64>>,
        #[serde(default)]
        traversal: Traversal,
    },
    Lca {
        values: Vec<Option<i64>>,
        a: i64,
        b: i64,
    },
}

impl AlgorithmInput {
    /// The shape tag as it appears in JSON.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Array { .. } => "array",
            Self::Search { .. } => "search",
            Self::Graph { .. } => "graph",
            Self::Number { .. } => "number",
            Self::Pair { .. } => "pair",
            Self::Knapsack(_) => "knapsack",
            Self::Strings { .. } => "strings",
            Self::Activities { .. } => "activities",
            Self::Symbols { .. } => "symbols",
            Self::Items { .. } => "items",
            Self::Jobs { .. } => "jobs",
            Self::Board { .. } => "board",
            Self::Sudoku { .. } => "sudoku",
            Self::TreeOps { .. } => "tree_ops",
            Self::LevelOrder { .. } => "level_order",
            Self::Lca { .. } => "lca",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub order: SortOrder,
    pub directed: bool,
    pub difficulty: Difficulty,
}

/// One start-run call: which algorithm, on what, with which options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub algorithm: AlgorithmId,
    pub input: AlgorithmInput,
    #[serde(default)]
    pub options: RunOptions,
}

impl RunRequest {
    pub fn new(algorithm: AlgorithmId, input: AlgorithmInput) -> Self {
        Self {
            algorithm,
            input,
            options: RunOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> AlgoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| AlgoError::invalid_input(format!("parse run request JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> AlgoResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| AlgoError::invalid_input(format!("parse run request JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> AlgoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AlgoError::invalid_input(format!("open run request '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> AlgoResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AlgoError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/run/request.rs"]
mod tests;
