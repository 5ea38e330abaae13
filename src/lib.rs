//! Red-black tree collections that keep duplicate keys.
//!
//! This crate provides [`MultiKeyRBTree`], a sorted collection in which values that compare
//! equal share a single tree node, and [`RBTree`], the plain ordered set it is built on.
//!
//! - [`insert_single_key`](MultiKeyRBTree::insert_single_key) - Add a value, creating a key
//!   node or appending to an existing one
//! - [`iter`](MultiKeyRBTree::iter) - Visit every value in ascending order; duplicates come out
//!   in insertion order
//! - [`set_iteration_start_point`](MultiKeyRBTree::set_iteration_start_point) - Make later
//!   iterators skip every key ordered before a probe
//!
//! # Example
//!
//! ```
//! use multikey_rbtree::MultiKeyRBTree;
//!
//! let mut runtimes = MultiKeyRBTree::new();
//! for minutes in [95, 120, 95, 180, 88] {
//!     runtimes.insert_single_key(minutes);
//! }
//!
//! // One node per distinct key, every value kept
//! assert_eq!(runtimes.len(), 4);
//! assert_eq!(runtimes.num_keys(), 5);
//!
//! // Skip everything shorter than 100 minutes
//! runtimes.set_iteration_start_point(100);
//! assert_eq!(runtimes.iter().copied().collect::<Vec<_>>(), [120, 180]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Field probes** - Any [`StartPoint`] can position an iterator, not just a full value
//! - **Compact storage** - Nodes live in one arena and link to each other by 32-bit handles
//!
//! # Implementation
//!
//! Insertion is a plain binary-search-tree insert followed by the classic bottom-up red-black
//! repair (recolor on a red uncle, rotate otherwise). Nodes are never removed individually, so
//! the arena is append-only and [`clear`](MultiKeyRBTree::clear) simply empties it.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod multikey_rbtree;
pub mod rbtree;

pub use error::Error;
pub use multikey_rbtree::{KeyList, MultiKeyRBTree, StartPoint};
pub use rbtree::RBTree;
