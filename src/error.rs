/// Errors reported by the collections in this crate.
///
/// Both variants are local to the failing call: the collection (and, for
/// [`Exhausted`](Error::Exhausted), the iterator) is left exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An absent value was offered for insertion.
    #[error("key is null")]
    NullKey,
    /// A value was requested from an iterator that has none left.
    #[error("no elements left")]
    Exhausted,
}
