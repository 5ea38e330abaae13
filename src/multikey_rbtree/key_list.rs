use core::cmp::Ordering;
use core::fmt;

use smallvec::{SmallVec, smallvec};

/// All values stored under one key of a [`MultiKeyRBTree`](crate::MultiKeyRBTree).
///
/// The first value inserted is the representative key. Every later value that compares equal to
/// it is appended, so the list preserves insertion order.
///
/// Comparisons between key lists look only at the representative keys: two lists are equal when
/// their keys are, regardless of how many values they hold.
#[derive(Clone)]
pub struct KeyList<T> {
    // Never empty; `values[0]` is the key.
    values: SmallVec<[T; 1]>,
}

impl<T> KeyList<T> {
    pub(crate) fn new(key: T) -> Self {
        Self { values: smallvec![key] }
    }

    pub(crate) fn push(&mut self, value: T) {
        self.values.push(value);
    }

    /// Returns the representative key.
    ///
    /// # Examples
    ///
    /// ```
    /// use multikey_rbtree::MultiKeyRBTree;
    ///
    /// let tree: MultiKeyRBTree<i32> = [4, 4].into_iter().collect();
    /// assert_eq!(*tree.get(&4).unwrap().key(), 4);
    /// ```
    #[must_use]
    pub fn key(&self) -> &T {
        &self.values[0]
    }

    /// Returns every value in the list, in insertion order. The key comes first.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns an iterator over the values in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Returns the number of values in the list. Always at least one.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<'a, T> IntoIterator for &'a KeyList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> PartialEq for KeyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T: Ord> Eq for KeyList<T> {}

impl<T: Ord> PartialOrd for KeyList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for KeyList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(other.key())
    }
}

impl<T: fmt::Debug> fmt::Debug for KeyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

/// Displays the representative key.
impl<T: fmt::Display> fmt::Display for KeyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.key(), f)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;

    #[derive(Debug)]
    struct Tagged(i32, char);

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }
    impl Eq for Tagged {}
    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> Ordering {
            self.0.cmp(&other.0)
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let mut list = KeyList::new(Tagged(1, 'a'));
        list.push(Tagged(1, 'b'));
        list.push(Tagged(1, 'c'));

        assert_eq!(list.len(), 3);
        assert_eq!(list.key().1, 'a');
        let tags: alloc::string::String = list.iter().map(|t| t.1).collect();
        assert_eq!(tags, "abc");
    }

    #[test]
    fn compares_by_key_only() {
        let mut long = KeyList::new(5);
        long.push(5);
        long.push(5);
        let short = KeyList::new(5);

        assert!(long == short);
        assert!(KeyList::new(4) < short);
        assert_eq!(KeyList::new(9).cmp(&short), Ordering::Greater);
    }

    #[test]
    fn formatting() {
        let mut list = KeyList::new(2);
        list.push(2);
        assert_eq!(format!("{list}"), "2");
        assert_eq!(format!("{list:?}"), "[2, 2]");
    }
}
