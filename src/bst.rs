use std::cmp::Ordering;
use std::fmt::{self, Debug};

/*
 * Handle to a node of a BinarySearchTree, only meaningful for the tree
 * that returned it. The generation is bumped each time the slot is freed,
 * so a handle to a deleted node keeps resolving to nothing even after the
 * slot holds a new node.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    slot: usize,
    generation: u32,
}

struct TreeNode<T> {
    value: T,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

struct Slot<T> {
    generation: u32,
    node: Option<TreeNode<T>>,
}

/*
 * Unbalanced binary search tree stored in a node arena.
 *
 * Left subtrees hold strictly smaller values, right subtrees hold values
 * greater or equal, so duplicates go right. Search, insert and delete are
 * O(height): O(log n) on a balanced tree, O(n) once it degenerates.
 */
pub struct BinarySearchTree<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    root: Option<NodeId>,
    length: usize,
}

impl<T: Ord> BinarySearchTree<T> {
    pub fn new() -> Self {
        BinarySearchTree {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            length: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.lookup(id).map(|node| &node.value)
    }

    pub fn insert(&mut self, value: T) -> NodeId {
        let mut parent = None;
        let mut go_left = false;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            parent = Some(id);
            let node = self.node(id);
            go_left = value < node.value;
            cursor = if go_left { node.left } else { node.right };
        }

        let id = self.alloc(TreeNode {
            value,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(id),
            Some(p) if go_left => self.node_mut(p).left = Some(id),
            Some(p) => self.node_mut(p).right = Some(id),
        }
        self.length += 1;
        id
    }

    /*
     * First node holding <value> on the way down from the root.
     */
    pub fn search(&self, value: &T) -> Option<NodeId> {
        self.find(value).map(|(id, _depth)| id)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /*
     * Number of edges from the root to the node holding <value>.
     */
    pub fn depth(&self, value: &T) -> Option<usize> {
        self.find(value).map(|(_id, depth)| depth)
    }

    /*
     * Largest number of edges from <id> down to a leaf.
     */
    pub fn height(&self, id: NodeId) -> Option<usize> {
        self.value(id)?;
        Some(self.subtree_height(id))
    }

    pub fn tree_height(&self) -> Option<usize> {
        self.root.map(|root| self.subtree_height(root))
    }

    pub fn minimum(&self, id: NodeId) -> Option<NodeId> {
        self.value(id)?;
        Some(self.leftmost(id))
    }

    pub fn maximum(&self, id: NodeId) -> Option<NodeId> {
        self.value(id)?;
        let mut id = id;
        while let Some(right) = self.node(id).right {
            id = right;
        }
        Some(id)
    }

    /*
     * Next node of an in-order traversal: leftmost node of the right
     * subtree, or else the first ancestor reached from its left side.
     */
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.value(id)?;
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).right != Some(child) {
                break;
            }
            child = p;
            parent = self.node(p).parent;
        }
        parent
    }

    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        let node = self.lookup(id)?;
        if let Some(left) = node.left {
            return self.maximum(left);
        }
        let mut child = id;
        let mut parent = node.parent;
        while let Some(p) = parent {
            if self.node(p).left != Some(child) {
                break;
            }
            child = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /*
     * Remove the first node holding <value> and return its value.
     * A node with two children is replaced by its in-order successor.
     */
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let Some(z) = self.search(value) else {
            tracing::debug!("delete of a value not in the tree");
            return None;
        };

        let (left, right) = {
            let node = self.node(z);
            (node.left, node.right)
        };
        match (left, right) {
            (None, _) => self.transplant(z, right),
            (_, None) => self.transplant(z, left),
            (Some(l), Some(r)) => {
                let y = self.leftmost(r);
                if self.node(y).parent != Some(z) {
                    let y_right = self.node(y).right;
                    self.transplant(y, y_right);
                    self.node_mut(y).right = Some(r);
                    self.node_mut(r).parent = Some(y);
                }
                self.transplant(z, Some(y));
                self.node_mut(y).left = Some(l);
                self.node_mut(l).parent = Some(y);
            }
        }

        self.length -= 1;
        Some(self.release(z))
    }

    pub fn in_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut order = Vec::with_capacity(self.length);
        self.walk_in_order(&mut order);
        order
    }

    pub fn pre_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut order = Vec::with_capacity(self.length);
        self.walk_pre_order(&mut order);
        order
    }

    pub fn post_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut order = Vec::with_capacity(self.length);
        self.walk_post_order(&mut order);
        order
    }

    fn find(&self, value: &T) -> Option<(NodeId, usize)> {
        let mut cursor = self.root;
        let mut depth = 0;
        while let Some(id) = cursor {
            let node = self.node(id);
            cursor = match value.cmp(&node.value) {
                Ordering::Equal => return Some((id, depth)),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            depth += 1;
        }
        None
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    /*
     * Counted level by level, a degenerate tree is as deep as it is long.
     */
    fn subtree_height(&self, id: NodeId) -> usize {
        let mut level = vec![id];
        let mut height = 0;
        loop {
            let next: Vec<NodeId> = level
                .iter()
                .flat_map(|&id| {
                    let node = self.node(id);
                    node.left.into_iter().chain(node.right)
                })
                .collect();
            if next.is_empty() {
                return height;
            }
            height += 1;
            level = next;
        }
    }

    /*
     * Hang <with> (possibly empty) where <replace> was under its parent.
     */
    fn transplant(&mut self, replace: NodeId, with: Option<NodeId>) {
        let parent = self.node(replace).parent;
        match parent {
            None => self.root = with,
            Some(p) => {
                let p = self.node_mut(p);
                if p.left == Some(replace) {
                    p.left = with;
                } else {
                    p.right = with;
                }
            }
        }
        if let Some(w) = with {
            self.node_mut(w).parent = parent;
        }
    }

    fn walk_in_order(&self, order: &mut Vec<T>)
    where
        T: Clone,
    {
        let mut stack = Vec::new();
        let mut cursor = self.root;
        loop {
            while let Some(id) = cursor {
                stack.push(id);
                cursor = self.node(id).left;
            }
            let Some(id) = stack.pop() else {
                return;
            };
            let node = self.node(id);
            order.push(node.value.clone());
            cursor = node.right;
        }
    }

    fn walk_pre_order(&self, order: &mut Vec<T>)
    where
        T: Clone,
    {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            order.push(node.value.clone());
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    /*
     * Node, right, left is post-order reversed.
     */
    fn walk_post_order(&self, order: &mut Vec<T>)
    where
        T: Clone,
    {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            order.push(node.value.clone());
            stack.extend(node.left);
            stack.extend(node.right);
        }
        order.reverse();
    }
}

impl<T> BinarySearchTree<T> {
    fn lookup(&self, id: NodeId) -> Option<&TreeNode<T>> {
        let slot = self.slots.get(id.slot)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node(&self, id: NodeId) -> &TreeNode<T> {
        match self.lookup(id) {
            Some(node) => node,
            None => unreachable!("link to deleted node {:?}", id),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode<T> {
        match self.slots.get_mut(id.slot) {
            Some(Slot {
                generation,
                node: Some(node),
            }) if *generation == id.generation => node,
            _ => unreachable!("link to deleted node {:?}", id),
        }
    }

    fn alloc(&mut self, node: TreeNode<T>) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot];
                entry.node = Some(node);
                NodeId {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    slot: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    fn release(&mut self, id: NodeId) -> T {
        let slot = &mut self.slots[id.slot];
        let node = match slot.node.take() {
            Some(node) => node,
            None => unreachable!("released deleted node {:?}", id),
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.slot);
        node.value
    }
}

impl<T: Ord> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/*
 * Debug formatter : values in order
 */
impl<T: Ord + Clone + Debug> Debug for BinarySearchTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.in_order()).finish()
    }
}
