use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::control::stepper::{Halt, StepResult, Stepper};
use crate::foundation::error::{AlgoError, AlgoResult};
use crate::foundation::heap::StableMinHeap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub symbol: String,
    pub frequency: u64,
}

impl Symbol {
    pub fn new(symbol: impl Into<String>, frequency: u64) -> Self {
        Self {
            symbol: symbol.into(),
            frequency,
        }
    }
}

/// Leaves carry a symbol; internal nodes own both children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HuffmanNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub frequency: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<HuffmanNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<HuffmanNode>>,
}

impl HuffmanNode {
    fn leaf(symbol: &Symbol) -> Self {
        Self {
            symbol: Some(symbol.symbol.clone()),
            frequency: symbol.frequency,
            left: None,
            right: None,
        }
    }

    fn merge(left: Self, right: Self) -> Self {
        Self {
            symbol: None,
            frequency: left.frequency.saturating_add(right.frequency),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Root-to-leaf codes: `0` for left, `1` for right. A lone leaf gets `0`.
    pub fn codes(&self) -> BTreeMap<String, String> {
        let mut codes = BTreeMap::new();
        if self.is_leaf() {
            if let Some(symbol) = &self.symbol {
                codes.insert(symbol.clone(), "0".to_owned());
            }
            return codes;
        }

        let mut stack = vec![(self, String::new())];
        while let Some((node, prefix)) = stack.pop() {
            if let Some(symbol) = &node.symbol {
                codes.insert(symbol.clone(), prefix);
                continue;
            }
            if let Some(right) = &node.right {
                stack.push((right.as_ref(), format!("{prefix}1")));
            }
            if let Some(left) = &node.left {
                stack.push((left.as_ref(), format!("{prefix}0")));
            }
        }
        codes
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HuffmanSnapshot {
    /// Remaining trees, lowest frequency first.
    pub forest: Vec<HuffmanNode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HuffmanOutcome {
    pub root: Option<HuffmanNode>,
    pub codes: BTreeMap<String, String>,
    /// Total encoded length in bits, `sum(frequency * code length)`.
    pub encoded_bits: u64,
}

pub(crate) fn check_symbols(symbols: &[Symbol]) -> AlgoResult<()> {
    let mut seen = HashSet::new();
    for s in symbols {
        if !seen.insert(s.symbol.as_str()) {
            return Err(AlgoError::invalid_input(format!(
                "symbol '{}' listed twice",
                s.symbol
            )));
        }
    }
    Ok(())
}

fn forest(queue: &StableMinHeap<HuffmanNode>) -> HuffmanSnapshot {
    HuffmanSnapshot {
        forest: queue.ordered().into_iter().map(|(_, n)| n.clone()).collect(),
    }
}

/// Merges the two lightest trees until one remains; ties pop in input order.
#[tracing::instrument(skip_all, fields(symbols = symbols.len()))]
pub fn huffman_coding(
    symbols: &[Symbol],
    stepper: &mut Stepper<'_, HuffmanSnapshot>,
) -> StepResult<HuffmanOutcome> {
    let mut queue = StableMinHeap::new();
    for symbol in symbols {
        queue.push(priority(symbol.frequency), HuffmanNode::leaf(symbol));
    }
    if queue.is_empty() {
        return Ok(HuffmanOutcome {
            root: None,
            codes: BTreeMap::new(),
            encoded_bits: 0,
        });
    }
    stepper.emit(forest(&queue))?;

    loop {
        let Some((_, left)) = queue.pop() else {
            return Err(Halt::invariant("huffman queue drained without a root"));
        };
        let Some((_, right)) = queue.pop() else {
            let codes = left.codes();
            let encoded_bits = symbols
                .iter()
                .map(|s| {
                    let bits = codes.get(&s.symbol).map_or(0, |c| c.len() as u64);
                    s.frequency.saturating_mul(bits)
                })
                .fold(0u64, u64::saturating_add);
            return Ok(HuffmanOutcome {
                root: Some(left),
                codes,
                encoded_bits,
            });
        };
        let parent = HuffmanNode::merge(left, right);
        queue.push(priority(parent.frequency), parent);
        stepper.emit(forest(&queue))?;
    }
}

fn priority(frequency: u64) -> i64 {
    i64::try_from(frequency).unwrap_or(i64::MAX)
}
