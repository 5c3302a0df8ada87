use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::control::stepper::{Beat, StepResult, Stepper};

use super::arena::{NodeId, Tree, TreeShape};
use super::{TreeEvent, TreeSnapshot};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    #[default]
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
}

impl Traversal {
    pub const ALL: [Traversal; 4] = [
        Self::InOrder,
        Self::PreOrder,
        Self::PostOrder,
        Self::LevelOrder,
    ];
}

fn order_ids(tree: &Tree, order: Traversal) -> Vec<NodeId> {
    let mut ids = Vec::with_capacity(tree.len());
    let Some(root) = tree.root() else {
        return ids;
    };
    match order {
        Traversal::InOrder => {
            let mut stack = Vec::new();
            let mut cursor = Some(root);
            while cursor.is_some() || !stack.is_empty() {
                while let Some(id) = cursor {
                    stack.push(id);
                    cursor = tree.node(id).left;
                }
                if let Some(id) = stack.pop() {
                    ids.push(id);
                    cursor = tree.node(id).right;
                }
            }
        }
        Traversal::PreOrder | Traversal::PostOrder => {
            // Post-order is the reverse of a root-right-left pre-order.
            let post = order == Traversal::PostOrder;
            let mut stack = vec![root];
            while let Some(id) = stack.pop() {
                ids.push(id);
                let node = tree.node(id);
                let (first, second) = if post {
                    (node.left, node.right)
                } else {
                    (node.right, node.left)
                };
                stack.extend(first);
                stack.extend(second);
            }
            if post {
                ids.reverse();
            }
        }
        Traversal::LevelOrder => {
            let mut queue = VecDeque::from([root]);
            while let Some(id) = queue.pop_front() {
                ids.push(id);
                let node = tree.node(id);
                queue.extend(node.left);
                queue.extend(node.right);
            }
        }
    }
    ids
}

struct Lca<'t, 's, 'a> {
    tree: &'t Tree,
    shape: Option<TreeShape>,
    targets: (i64, i64),
    visited: Vec<i64>,
    stepper: &'s mut Stepper<'a, TreeSnapshot>,
}

impl Lca<'_, '_, '_> {
    fn snapshot(&self, event: TreeEvent, current: Option<i64>) -> TreeSnapshot {
        TreeSnapshot {
            root: self.shape.clone(),
            current,
            visited: self.visited.clone(),
            event,
        }
    }

    /// Returns the first node holding either target, or the node where the
    /// two targets' paths split.
    fn find(&mut self, id: Option<NodeId>) -> StepResult<Option<NodeId>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let key = self.tree.key(id);
        self.visited.push(key);
        let snapshot = self.snapshot(TreeEvent::Visit, Some(key));
        self.stepper.emit(snapshot)?;

        if key == self.targets.0 || key == self.targets.1 {
            return Ok(Some(id));
        }
        let node = self.tree.node(id);
        let (left, right) = (node.left, node.right);
        let left = self.find(left)?;
        let right = self.find(right)?;
        Ok(match (left, right) {
            (Some(_), Some(_)) => Some(id),
            (found, None) | (None, found) => found,
        })
    }
}

impl Tree {
    /// Read-only walk in `order`, one visit snapshot per node. Returns the
    /// keys in visit order.
    #[tracing::instrument(skip(self, stepper), fields(nodes = self.len()))]
    pub fn traverse(
        &self,
        order: Traversal,
        stepper: &mut Stepper<'_, TreeSnapshot>,
    ) -> StepResult<Vec<i64>> {
        let shape = self.shape();
        let mut visited = Vec::with_capacity(self.len());
        for id in order_ids(self, order) {
            let key = self.key(id);
            visited.push(key);
            stepper.emit(TreeSnapshot {
                root: shape.clone(),
                current: Some(key),
                visited: visited.clone(),
                event: TreeEvent::Visit,
            })?;
        }
        Ok(visited)
    }

    /// Lowest common ancestor of the nodes holding `a` and `b`. Works on any
    /// tree shape; `None` unless both keys are present.
    #[tracing::instrument(skip(self, stepper))]
    pub fn lowest_common_ancestor(
        &self,
        a: i64,
        b: i64,
        stepper: &mut Stepper<'_, TreeSnapshot>,
    ) -> StepResult<Option<i64>> {
        let mut lca = Lca {
            tree: self,
            shape: self.shape(),
            targets: (a, b),
            visited: Vec::new(),
            stepper,
        };
        let found = lca.find(self.root())?;
        let answer = found
            .filter(|_| self.contains(a) && self.contains(b))
            .map(|id| self.key(id));

        let event = if answer.is_some() {
            TreeEvent::Found
        } else {
            TreeEvent::Missing
        };
        let snapshot = lca.snapshot(event, answer);
        lca.stepper.emit_beat(snapshot, Beat::Double)?;
        Ok(answer)
    }
}
