use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub(crate) type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red,
    Black,
}

/// Which balancing discipline a tree follows. `Plain` trees come from a
/// level-order listing and carry no ordering; they only support read-only walks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreeKind {
    Plain,
    #[default]
    Bst,
    Avl,
    RedBlack,
}

impl TreeKind {
    pub fn is_ordered(self) -> bool {
        !matches!(self, Self::Plain)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub key: i64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub height: u32,
    pub color: Color,
}

/// Nested copy of a tree, handed out in snapshots and outcomes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeShape {
    pub key: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<TreeShape>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<TreeShape>>,
}

/// Binary tree stored in a flat arena. Links are indices, so parent pointers
/// never form ownership cycles; freed slots are recycled.
#[derive(Clone, Debug)]
pub struct Tree {
    kind: TreeKind,
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
}

impl Tree {
    pub fn new(kind: TreeKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Builds a plain tree from a breadth-first listing where `None` marks a
    /// missing child. Children are assigned to the queued nodes in order, so a
    /// gap consumes a slot but queues nothing.
    pub fn from_level_order(values: &[Option<i64>]) -> Self {
        let mut tree = Self::new(TreeKind::Plain);
        let Some(&Some(first)) = values.first() else {
            return tree;
        };
        let root = tree.attach(first, None);
        let mut queue = VecDeque::from([root]);
        let mut rest = values[1..].iter();

        while let Some(id) = queue.pop_front() {
            for side in [Side::Left, Side::Right] {
                match rest.next() {
                    Some(Some(key)) => queue.push_back(tree.attach(*key, Some((id, side)))),
                    Some(None) => {}
                    None => return tree,
                }
            }
        }
        tree
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn key(&self, id: NodeId) -> i64 {
        self.nodes[id].key
    }

    pub(crate) fn set_key(&mut self, id: NodeId, key: i64) {
        self.nodes[id].key = key;
    }

    pub(crate) fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.nodes[id].left,
            Side::Right => self.nodes[id].right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.nodes[id].left = child,
            Side::Right => self.nodes[id].right = child,
        }
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Side of `parent` that `child` hangs from. An absent child resolves to
    /// whichever side is empty.
    pub(crate) fn side_of(&self, parent: NodeId, child: Option<NodeId>) -> Side {
        if self.nodes[parent].left == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Allocates a leaf and links it under `parent`, or as the root.
    pub(crate) fn attach(&mut self, key: i64, parent: Option<(NodeId, Side)>) -> NodeId {
        let node = Node {
            key,
            left: None,
            right: None,
            parent: parent.map(|(p, _)| p),
            height: 1,
            color: match self.kind {
                TreeKind::RedBlack => Color::Red,
                _ => Color::Black,
            },
        };
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        match parent {
            Some((p, side)) => self.set_child(p, side, Some(id)),
            None => self.root = Some(id),
        }
        self.len += 1;
        id
    }

    /// Unlinks a node with at most one child, lifting that child into its place.
    /// Returns the lifted child.
    pub(crate) fn splice_out(&mut self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id];
        let child = node.left.or(node.right);
        let parent = node.parent;
        self.replace_child(parent, id, child);
        if let Some(c) = child {
            self.nodes[c].parent = parent;
        }
        self.free.push(id);
        self.len -= 1;
        child
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(p, Some(old));
                self.set_child(p, side, new);
            }
        }
    }

    /// Rotates `id` down towards `dir`; its opposite child takes its place.
    /// Returns the new subtree root, or `None` when that child is missing.
    pub(crate) fn rotate(&mut self, id: NodeId, dir: Side) -> Option<NodeId> {
        let up = self.child(id, dir.flip())?;
        let inner = self.child(up, dir);

        self.set_child(id, dir.flip(), inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(id);
        }
        let parent = self.nodes[id].parent;
        self.nodes[up].parent = parent;
        self.replace_child(parent, id, Some(up));
        self.set_child(up, dir, Some(id));
        self.nodes[id].parent = Some(up);

        self.refresh_height(id);
        self.refresh_height(up);
        Some(up)
    }

    pub(crate) fn height(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.nodes[id].height)
    }

    pub(crate) fn refresh_height(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let height = 1 + self.height(node.left).max(self.height(node.right));
        self.nodes[id].height = height;
    }

    /// Left height minus right height.
    pub(crate) fn balance(&self, id: NodeId) -> i64 {
        let node = &self.nodes[id];
        i64::from(self.height(node.left)) - i64::from(self.height(node.right))
    }

    /// Absent nodes count as black leaves.
    pub(crate) fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.nodes[id].color == Color::Red)
    }

    pub(crate) fn color(&self, id: NodeId) -> Color {
        self.nodes[id].color
    }

    pub(crate) fn paint(&mut self, id: Option<NodeId>, color: Color) {
        if let Some(id) = id {
            self.nodes[id].color = color;
        }
    }

    /// Whether `key` is stored anywhere in the tree.
    pub fn contains(&self, key: i64) -> bool {
        if self.kind.is_ordered() {
            let mut cursor = self.root;
            while let Some(id) = cursor {
                let node = &self.nodes[id];
                cursor = match key.cmp(&node.key) {
                    std::cmp::Ordering::Less => node.left,
                    std::cmp::Ordering::Greater => node.right,
                    std::cmp::Ordering::Equal => return true,
                };
            }
            false
        } else {
            self.in_order().contains(&key)
        }
    }

    pub fn in_order(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cursor = self.root;
        while cursor.is_some() || !stack.is_empty() {
            while let Some(id) = cursor {
                stack.push(id);
                cursor = self.nodes[id].left;
            }
            if let Some(id) = stack.pop() {
                keys.push(self.nodes[id].key);
                cursor = self.nodes[id].right;
            }
        }
        keys
    }

    pub fn shape(&self) -> Option<TreeShape> {
        self.root.map(|id| self.shape_of(id))
    }

    fn shape_of(&self, id: NodeId) -> TreeShape {
        let node = &self.nodes[id];
        TreeShape {
            key: node.key,
            color: (self.kind == TreeKind::RedBlack).then_some(node.color),
            height: (self.kind == TreeKind::Avl).then_some(node.height),
            left: node.left.map(|l| Box::new(self.shape_of(l))),
            right: node.right.map(|r| Box::new(self.shape_of(r))),
        }
    }

    /// Checks link consistency plus whatever the tree's kind promises:
    /// strictly increasing in-order keys, AVL heights and balance, and the
    /// Red-Black colour rules.
    pub fn check_invariants(&self) -> Result<(), String> {
        let Some(root) = self.root else {
            return match self.len {
                0 => Ok(()),
                n => Err(format!("empty tree reports {n} nodes")),
            };
        };
        if self.nodes[root].parent.is_some() {
            return Err("root has a parent".to_owned());
        }
        if self.kind == TreeKind::RedBlack && self.nodes[root].color != Color::Black {
            return Err("red-black root is red".to_owned());
        }
        let mut count = 0;
        self.audit(root, &mut count)?;
        if count != self.len {
            return Err(format!("reached {count} nodes, expected {}", self.len));
        }
        if self.kind.is_ordered() {
            let keys = self.in_order();
            if let Some(w) = keys.windows(2).find(|w| w[0] >= w[1]) {
                return Err(format!("keys out of order: {} before {}", w[0], w[1]));
            }
        }
        Ok(())
    }

    /// Returns the subtree's black height.
    fn audit(&self, id: NodeId, count: &mut usize) -> Result<u32, String> {
        *count += 1;
        if *count > self.len {
            return Err("cycle in child links".to_owned());
        }
        let node = &self.nodes[id];
        let mut black_heights = [0; 2];
        for (slot, child) in [node.left, node.right].into_iter().enumerate() {
            let Some(c) = child else {
                black_heights[slot] = 1;
                continue;
            };
            if self.nodes[c].parent != Some(id) {
                return Err(format!("node {} has a stale parent link", self.nodes[c].key));
            }
            if self.kind == TreeKind::RedBlack
                && node.color == Color::Red
                && self.nodes[c].color == Color::Red
            {
                return Err(format!("red node {} has a red child", node.key));
            }
            black_heights[slot] = self.audit(c, count)?;
        }

        match self.kind {
            TreeKind::Avl => {
                let expected = 1 + self.height(node.left).max(self.height(node.right));
                if node.height != expected {
                    return Err(format!("node {} caches height {}", node.key, node.height));
                }
                let balance = self.balance(id);
                if balance.abs() > 1 {
                    return Err(format!("node {} has balance {balance}", node.key));
                }
            }
            TreeKind::RedBlack if black_heights[0] != black_heights[1] => {
                return Err(format!("black heights differ below {}", node.key));
            }
            _ => {}
        }
        Ok(black_heights[0] + u32::from(node.color == Color::Black))
    }
}
