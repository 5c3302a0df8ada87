use std::cmp::Ordering;

use crate::control::stepper::{Beat, Halt, StepResult, Stepper};

use super::arena::{Color, NodeId, Side, Tree, TreeKind};
use super::{TreeEvent, TreeSnapshot};

/// One insert, delete or search on a tree, with the keys visited so far.
struct Pass<'t, 's, 'a> {
    tree: &'t mut Tree,
    visited: Vec<i64>,
    stepper: &'s mut Stepper<'a, TreeSnapshot>,
}

impl Pass<'_, '_, '_> {
    fn show(&mut self, event: TreeEvent, at: Option<NodeId>, beat: Beat) -> StepResult<()> {
        let snapshot = TreeSnapshot {
            root: self.tree.shape(),
            current: at.map(|id| self.tree.key(id)),
            visited: self.visited.clone(),
            event,
        };
        self.stepper.emit_beat(snapshot, beat)
    }

    fn visit(&mut self, id: NodeId) -> StepResult<()> {
        self.visited.push(self.tree.key(id));
        self.show(TreeEvent::Visit, Some(id), Beat::Full)
    }

    /// Walks down towards `key`. Returns the matching node, or the last node
    /// on the path and the side `key` would hang from.
    fn descend(&mut self, key: i64) -> StepResult<Result<NodeId, Option<(NodeId, Side)>>> {
        let mut slot = None;
        let mut cursor = self.tree.root();
        while let Some(id) = cursor {
            self.visit(id)?;
            let side = match key.cmp(&self.tree.key(id)) {
                Ordering::Equal => return Ok(Ok(id)),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            slot = Some((id, side));
            cursor = self.tree.child(id, side);
        }
        Ok(Err(slot))
    }

    fn rotate(&mut self, id: NodeId, dir: Side) -> StepResult<NodeId> {
        let top = self.tree.rotate(id, dir).ok_or_else(|| {
            Halt::invariant(format!("cannot rotate {} without a child", self.tree.key(id)))
        })?;
        let event = match dir {
            Side::Left => TreeEvent::RotateLeft,
            Side::Right => TreeEvent::RotateRight,
        };
        self.show(event, Some(top), Beat::Full)?;
        Ok(top)
    }

    fn audit(&self) -> StepResult<()> {
        self.tree.check_invariants().map_err(Halt::Invariant)
    }

    fn insert(&mut self, key: i64) -> StepResult<bool> {
        let slot = match self.descend(key)? {
            Ok(existing) => {
                self.show(TreeEvent::Duplicate, Some(existing), Beat::Half)?;
                return Ok(false);
            }
            Err(slot) => slot,
        };
        let id = self.tree.attach(key, slot);
        self.show(TreeEvent::Insert, Some(id), Beat::Full)?;

        match self.tree.kind() {
            TreeKind::Avl => self.rebalance_from(slot.map(|(p, _)| p))?,
            TreeKind::RedBlack => self.insert_fixup(id)?,
            _ => {}
        }
        self.audit()?;
        Ok(true)
    }

    fn delete(&mut self, key: i64) -> StepResult<bool> {
        let found = match self.descend(key)? {
            Ok(id) => id,
            Err(_) => {
                self.show(TreeEvent::Missing, None, Beat::Half)?;
                return Ok(false);
            }
        };

        // Two children: take the in-order successor's key, then remove the
        // successor, which has no left child.
        let target = match (self.tree.node(found).left, self.tree.node(found).right) {
            (Some(_), Some(right)) => {
                let mut successor = right;
                self.visit(successor)?;
                while let Some(left) = self.tree.child(successor, Side::Left) {
                    successor = left;
                    self.visit(successor)?;
                }
                let promoted = self.tree.key(successor);
                self.tree.set_key(found, promoted);
                self.show(TreeEvent::Replace, Some(found), Beat::Half)?;
                successor
            }
            _ => found,
        };

        let parent = self.tree.parent(target);
        let removed = self.tree.color(target);
        let child = self.tree.splice_out(target);
        self.show(TreeEvent::Remove, child.or(parent), Beat::Full)?;

        match self.tree.kind() {
            TreeKind::Avl => self.rebalance_from(parent)?,
            TreeKind::RedBlack if removed == Color::Black => self.delete_fixup(child, parent)?,
            _ => {}
        }
        self.audit()?;
        Ok(true)
    }

    fn search(&mut self, key: i64) -> StepResult<bool> {
        match self.descend(key)? {
            Ok(id) => {
                self.show(TreeEvent::Found, Some(id), Beat::Double)?;
                Ok(true)
            }
            Err(_) => {
                self.show(TreeEvent::Missing, None, Beat::Half)?;
                Ok(false)
            }
        }
    }

    /// Restores AVL balance from `start` up to the root, fixing heights on the way.
    fn rebalance_from(&mut self, start: Option<NodeId>) -> StepResult<()> {
        let mut cursor = start;
        while let Some(id) = cursor {
            self.tree.refresh_height(id);
            let balance = self.tree.balance(id);
            let top = if balance.abs() > 1 {
                let heavy = if balance > 1 { Side::Left } else { Side::Right };
                let child = self.tree.child(id, heavy).ok_or_else(|| {
                    Halt::invariant(format!("node {} is unbalanced without a child", self.tree.key(id)))
                })?;
                // LR / RL: straighten the zig-zag first.
                let child_balance = self.tree.balance(child);
                if (heavy == Side::Left && child_balance < 0)
                    || (heavy == Side::Right && child_balance > 0)
                {
                    self.rotate(child, heavy)?;
                }
                self.rotate(id, heavy.flip())?
            } else {
                id
            };
            cursor = self.tree.parent(top);
        }
        Ok(())
    }

    fn insert_fixup(&mut self, inserted: NodeId) -> StepResult<()> {
        let mut node = inserted;
        while let Some(parent) = self.tree.parent(node) {
            if !self.tree.is_red(Some(parent)) {
                break;
            }
            let Some(grand) = self.tree.parent(parent) else {
                break;
            };
            let side = self.tree.side_of(grand, Some(parent));
            let uncle = self.tree.child(grand, side.flip());

            if self.tree.is_red(uncle) {
                self.tree.paint(Some(parent), Color::Black);
                self.tree.paint(uncle, Color::Black);
                self.tree.paint(Some(grand), Color::Red);
                self.show(TreeEvent::Recolor, Some(grand), Beat::Half)?;
                node = grand;
                continue;
            }

            let mut parent = parent;
            if self.tree.child(parent, side.flip()) == Some(node) {
                node = parent;
                parent = self.rotate(node, side)?;
            }
            self.tree.paint(Some(parent), Color::Black);
            self.tree.paint(Some(grand), Color::Red);
            self.show(TreeEvent::Recolor, Some(parent), Beat::Half)?;
            self.rotate(grand, side.flip())?;
        }
        self.blacken_root()
    }

    /// Textbook double-black repair. `node` took the removed black node's
    /// place (possibly empty) under `parent`.
    fn delete_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) -> StepResult<()> {
        while node != self.tree.root() && !self.tree.is_red(node) {
            let Some(p) = parent else {
                break;
            };
            let side = self.tree.side_of(p, node);
            let p_key = self.tree.key(p);
            let missing_sibling =
                || Halt::invariant(format!("double-black under {p_key} has no sibling"));

            let mut sibling = self.tree.child(p, side.flip()).ok_or_else(missing_sibling)?;
            if self.tree.is_red(Some(sibling)) {
                self.tree.paint(Some(sibling), Color::Black);
                self.tree.paint(Some(p), Color::Red);
                self.rotate(p, side)?;
                sibling = self.tree.child(p, side.flip()).ok_or_else(missing_sibling)?;
            }

            let near = self.tree.child(sibling, side);
            let far = self.tree.child(sibling, side.flip());
            if !self.tree.is_red(near) && !self.tree.is_red(far) {
                self.tree.paint(Some(sibling), Color::Red);
                self.show(TreeEvent::Recolor, Some(sibling), Beat::Half)?;
                node = Some(p);
                parent = self.tree.parent(p);
                continue;
            }

            if !self.tree.is_red(far) {
                self.tree.paint(near, Color::Black);
                self.tree.paint(Some(sibling), Color::Red);
                self.rotate(sibling, side.flip())?;
                sibling = self.tree.child(p, side.flip()).ok_or_else(missing_sibling)?;
            }
            let parent_color = self.tree.color(p);
            self.tree.paint(Some(sibling), parent_color);
            self.tree.paint(Some(p), Color::Black);
            let far = self.tree.child(sibling, side.flip());
            self.tree.paint(far, Color::Black);
            self.rotate(p, side)?;
            node = self.tree.root();
            parent = None;
        }
        self.tree.paint(node, Color::Black);
        self.blacken_root()
    }

    fn blacken_root(&mut self) -> StepResult<()> {
        let root = self.tree.root();
        if self.tree.is_red(root) {
            self.tree.paint(root, Color::Black);
            self.show(TreeEvent::Recolor, root, Beat::Half)?;
        }
        Ok(())
    }
}

impl Tree {
    fn pass<'t, 's, 'a>(&'t mut self, stepper: &'s mut Stepper<'a, TreeSnapshot>) -> StepResult<Pass<'t, 's, 'a>> {
        if !self.kind().is_ordered() {
            return Err(Halt::invariant("plain trees have no key order to search by"));
        }
        Ok(Pass {
            tree: self,
            visited: Vec::new(),
            stepper,
        })
    }

    /// Inserts `key`, rebalancing as the tree's kind requires. Returns `false`
    /// if the key was already present.
    #[tracing::instrument(skip(self, stepper), fields(kind = ?self.kind()))]
    pub fn insert(&mut self, key: i64, stepper: &mut Stepper<'_, TreeSnapshot>) -> StepResult<bool> {
        self.pass(stepper)?.insert(key)
    }

    /// Removes `key`; a node with two children takes its in-order successor's
    /// key. Returns `false` if the key was absent.
    #[tracing::instrument(skip(self, stepper), fields(kind = ?self.kind()))]
    pub fn delete(&mut self, key: i64, stepper: &mut Stepper<'_, TreeSnapshot>) -> StepResult<bool> {
        self.pass(stepper)?.delete(key)
    }

    pub fn search(&mut self, key: i64, stepper: &mut Stepper<'_, TreeSnapshot>) -> StepResult<bool> {
        self.pass(stepper)?.search(key)
    }
}
