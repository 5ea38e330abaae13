use alloc::collections::VecDeque;
use core::cmp::Ordering::{self, Equal, Greater, Less};
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// Inline capacity of traversal stacks. A red-black tree of height 48 holds far more nodes than
/// a `Handle` can address, so the stacks never spill in practice.
const STACK_INLINE: usize = 48;

type Stack = SmallVec<[Handle; STACK_INLINE]>;

/// The node graph shared by `RBTree` and `MultiKeyRBTree`.
///
/// Nodes live in an arena and refer to each other by [`Handle`]. This layer knows about binary
/// search ordering and rotations; the red-black repair lives in `raw::balance`.
pub(crate) struct RawRBTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<T> RawRBTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of nodes in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the handle of the root node, if any.
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    /// Returns which child slot of `parent` holds `child`.
    #[inline]
    pub(crate) fn side_of(&self, parent: Handle, child: Handle) -> Side {
        if self.node(parent).left() == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Binary search driven by `cmp`, which orders the probe against a node's payload.
    pub(crate) fn search_by<F>(&self, mut cmp: F) -> Option<Handle>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.node(handle);
            current = match cmp(node.value()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }

        None
    }

    /// Promotes `child` into the position held by its parent `parent`.
    ///
    /// `child`'s inner subtree (the one on the side facing `parent`) is handed to `parent`,
    /// `parent` becomes `child`'s outer child, and whatever pointed at `parent` (its own parent
    /// or the root slot) now points at `child`. Colors are not touched.
    pub(crate) fn rotate(&mut self, child: Handle, parent: Handle) {
        debug_assert_eq!(self.node(child).parent(), Some(parent), "`rotate()` - nodes are not linked");

        let side = self.side_of(parent, child);
        let grandparent = self.node(parent).parent();
        let inner = self.node(child).child(side.opposite());

        // The inner subtree changes hands.
        self.node_mut(parent).set_child(side, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(parent));
        }

        // `parent` hangs below `child` on the opposite side.
        self.node_mut(child).set_child(side.opposite(), Some(parent));
        self.node_mut(parent).set_parent(Some(child));

        // Re-point the subtree root reference.
        self.node_mut(child).set_parent(grandparent);
        match grandparent {
            Some(grandparent) => {
                let slot = self.side_of(grandparent, parent);
                self.node_mut(grandparent).set_child(slot, Some(child));
            }
            None => self.root = Some(child),
        }
    }

    /// Returns an iterator over the payloads in breadth-first order.
    pub(crate) fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self)
    }

    /// Returns an in-order cursor starting at the minimum.
    pub(crate) fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(self)
    }

    /// Returns an in-order cursor starting at the first payload for which `cmp` (ordering the
    /// seek probe against a payload) is not `Greater`.
    pub(crate) fn in_order_from<F>(&self, cmp: F) -> InOrder<'_, T>
    where
        F: FnMut(&T) -> Ordering,
    {
        InOrder::seek(self, cmp)
    }
}

impl<T: Ord> RawRBTree<T> {
    /// Links `value` as a new red leaf at its binary search position.
    ///
    /// Performs no deduplication of its own: if an equal payload is already present the value
    /// is handed back untouched. The tree is not rebalanced; see [`RawRBTree::insert`].
    pub(crate) fn insert_at(&mut self, value: T) -> Result<Handle, T> {
        let Some(mut current) = self.root else {
            let handle = self.nodes.alloc(Node::new_red(value, None));
            self.root = Some(handle);
            return Ok(handle);
        };

        loop {
            let node = self.node(current);
            let side = match value.cmp(node.value()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return Err(value),
            };

            match node.child(side) {
                Some(next) => current = next,
                None => {
                    let handle = self.nodes.alloc(Node::new_red(value, Some(current)));
                    self.node_mut(current).set_child(side, Some(handle));
                    return Ok(handle);
                }
            }
        }
    }

    /// Links `value` and restores the red-black invariants.
    pub(crate) fn insert(&mut self, value: T) -> Result<Handle, T> {
        let handle = self.insert_at(value)?;
        self.repair_after_insert(handle);
        Ok(handle)
    }
}

/// In-order traversal over a [`RawRBTree`] with an explicit stack.
///
/// The stack always holds, top to bottom, the nodes still to be visited in ascending order;
/// popping a node pushes its right child's left spine.
pub(crate) struct InOrder<'a, T> {
    tree: &'a RawRBTree<T>,
    stack: Stack,
}

impl<'a, T> InOrder<'a, T> {
    fn new(tree: &'a RawRBTree<T>) -> Self {
        let mut cursor = Self {
            tree,
            stack: Stack::new(),
        };
        cursor.push_left_spine(tree.root());
        cursor
    }

    fn seek<F>(tree: &'a RawRBTree<T>, mut cmp: F) -> Self
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut stack = Stack::new();
        let mut current = tree.root();

        while let Some(handle) = current {
            let node = tree.node(handle);
            if cmp(node.value()) == Greater {
                // This node and its left subtree sort before the probe.
                current = node.right();
            } else {
                stack.push(handle);
                current = node.left();
            }
        }

        Self { tree, stack }
    }

    fn push_left_spine(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.stack.push(handle);
            current = self.tree.node(handle).left();
        }
    }

    /// Returns true if at least one more node will be produced.
    #[inline]
    pub(crate) fn has_next(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Returns the number of nodes on the stack.
    #[inline]
    pub(crate) fn pending(&self) -> usize {
        self.stack.len()
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let tree = self.tree;
        let node = tree.node(handle);
        self.push_left_spine(node.right());
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.tree.len()))
    }
}

impl<T> FusedIterator for InOrder<'_, T> {}

/// Breadth-first traversal over a [`RawRBTree`].
pub(crate) struct LevelOrder<'a, T> {
    tree: &'a RawRBTree<T>,
    queue: VecDeque<Handle>,
}

impl<'a, T> LevelOrder<'a, T> {
    fn new(tree: &'a RawRBTree<T>) -> Self {
        let mut queue = VecDeque::with_capacity(tree.len());
        queue.extend(tree.root());
        Self { tree, queue }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.queue.pop_front()?;
        let tree = self.tree;
        let node = tree.node(handle);
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.tree.len()))
    }
}

impl<T> FusedIterator for LevelOrder<'_, T> {}

/// Writes payloads as `[ a, b, c ]`; an empty sequence renders as `[  ]`.
pub(crate) fn write_bracketed<I, D, W>(out: &mut W, items: I) -> core::fmt::Result
where
    I: IntoIterator<Item = D>,
    D: core::fmt::Display,
    W: core::fmt::Write + ?Sized,
{
    out.write_str("[ ")?;
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{item}")?;
    }
    out.write_str(" ]")
}
