//! Circular doubly-linked rings over external storage.
//!
//! Nodes live in an arena and carry their own `prev`/`next` links as
//! indices. A [`Ring`] owns nothing but its sentinel's two links; every
//! operation is a splice that rewrites a handful of indices, never a copy
//! of node data.
//!
//! ```text
//! Storage (BoxedStorage / Slab) - owns nodes, hands out stable indices
//! Ring                          - coordinates indices, owns the sentinel
//! ```
//!
//! # Quick Start
//!
//! ```
//! use qring_link::{BoxedStorage, Index, Linked, Ring, Storage};
//!
//! #[derive(Debug)]
//! struct Node {
//!     value: &'static str,
//!     next: u32,
//!     prev: u32,
//! }
//!
//! impl Linked<u32> for Node {
//!     fn next(&self) -> u32 { self.next }
//!     fn prev(&self) -> u32 { self.prev }
//!     fn set_next(&mut self, idx: u32) { self.next = idx; }
//!     fn set_prev(&mut self, idx: u32) { self.prev = idx; }
//! }
//!
//! let mut storage: BoxedStorage<Node> = BoxedStorage::try_with_capacity(8).unwrap();
//! let mut ring: Ring<u32> = Ring::new();
//!
//! for value in ["pear", "fig", "apple"] {
//!     let idx = storage
//!         .try_insert(Node { value, next: u32::NONE, prev: u32::NONE })
//!         .unwrap();
//!     ring.push_back(&mut storage, idx);
//! }
//!
//! ring.sort_by(&mut storage, |a: &Node, b: &Node| a.value.cmp(b.value));
//!
//! let sorted: Vec<_> = ring.iter(&storage).map(|i| storage.get(i).unwrap().value).collect();
//! assert_eq!(sorted, ["apple", "fig", "pear"]);
//! ```
//!
//! # Critical Invariant: Same Storage Instance
//!
//! All operations on a ring must use the same storage instance. This is the
//! caller's responsibility (same discipline as the `slab` crate). Passing a
//! different storage corrupts the ring.
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab`

#![warn(missing_docs)]

mod index;
mod linked;
pub mod ring;
mod shuffle;
mod sort;
pub mod storage;

pub use index::Index;
pub use linked::Linked;
pub use ring::{LinkError, Ring};
pub use storage::{BoxedStorage, Full, Storage, StorageError};
