use core::cmp::Ordering;

/// A probe that can be positioned against the values of a collection of `T`.
///
/// Iteration from a start point begins at the first key for which
/// [`compare`](StartPoint::compare) is not [`Ordering::Greater`]. Every `T: Ord` is a start point
/// for its own collections; other probe types let callers seek by a single field without building
/// a whole value.
///
/// The ordering must agree with `T`'s [`Ord`]: if `a <= b` then
/// `probe.compare(a) >= probe.compare(b)`.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use multikey_rbtree::{MultiKeyRBTree, StartPoint};
///
/// #[derive(PartialEq, Eq, PartialOrd, Ord)]
/// struct Song {
///     seconds: u32,
/// }
///
/// struct AtLeast(u32);
///
/// impl StartPoint<Song> for AtLeast {
///     fn compare(&self, song: &Song) -> Ordering {
///         self.0.cmp(&song.seconds)
///     }
/// }
///
/// let mut songs: MultiKeyRBTree<Song> = [180, 240, 95].map(|seconds| Song { seconds }).into_iter().collect();
/// songs.set_iteration_start_probe(AtLeast(100));
/// assert_eq!(songs.iter().map(|s| s.seconds).collect::<Vec<_>>(), [180, 240]);
/// ```
pub trait StartPoint<T: ?Sized> {
    /// Orders the start point relative to `value`.
    fn compare(&self, value: &T) -> Ordering;
}

impl<T: Ord> StartPoint<T> for T {
    #[inline]
    fn compare(&self, value: &T) -> Ordering {
        self.cmp(value)
    }
}
