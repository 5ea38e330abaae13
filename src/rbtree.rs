use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{InOrder, RawRBTree, write_bracketed};

/// An ordered set based on a red-black tree.
///
/// Each value occupies its own node; inserting a value equal to one already present is
/// rejected. [`MultiKeyRBTree`](crate::MultiKeyRBTree) builds on the same tree but keeps
/// duplicates.
///
/// # Examples
///
/// ```
/// use multikey_rbtree::RBTree;
///
/// let mut tree = RBTree::new();
/// for value in [3, 1, 4] {
///     assert!(tree.insert(value));
/// }
/// assert!(!tree.insert(4));
///
/// assert_eq!(tree.to_level_order_string(), "[ 3, 1, 4 ]");
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4]);
/// ```
pub struct RBTree<T> {
    raw: RawRBTree<T>,
}

/// An iterator over the values of an [`RBTree`] in ascending order.
///
/// This `struct` is created by the [`iter`](RBTree::iter) method on [`RBTree`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    inner: InOrder<'a, T>,
}

impl<T> RBTree<T> {
    /// Makes a new, empty `RBTree`.
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawRBTree::new() }
    }

    /// Makes a new, empty `RBTree` with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawRBTree::with_capacity(capacity),
        }
    }

    /// Returns the number of values in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of values the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the value at the root of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use multikey_rbtree::RBTree;
    ///
    /// let tree: RBTree<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(tree.root(), Some(&2));
    /// ```
    #[must_use]
    pub fn root(&self) -> Option<&T> {
        self.raw.root().map(|root| self.raw.node(root).value())
    }

    /// Gets an iterator over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.raw.in_order(),
        }
    }
}

impl<T: Ord> RBTree<T> {
    /// Adds a value, returning `false` (and dropping `value`) if an equal value is present.
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value).is_ok()
    }

    /// Returns `true` if the tree contains a value equal to `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get(value).is_some()
    }

    /// Returns a reference to the value equal to `value`, if any.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search_by(|node| value.cmp(node.borrow()))?;
        Some(self.raw.node(handle).value())
    }
}

impl<T: fmt::Display> RBTree<T> {
    /// Renders the values in breadth-first order, as `[ 3, 2, 4 ]`. An empty tree renders as
    /// `[  ]`.
    #[must_use]
    pub fn to_level_order_string(&self) -> String {
        let mut out = String::new();
        let _ = write_bracketed(&mut out, self.raw.level_order());
        out
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Default for RBTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for RBTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RBTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a RBTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for RBTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
