//! A string queue on a circular doubly-linked list with a sentinel.
//!
//! Elements hold an optional, owned string and live in a fixed-capacity
//! arena. Insert and remove work at both ends; the structural operations
//! (delete-middle, delete-duplicates, swap-pairs, reverse, merge sort and
//! Fisher–Yates shuffle) are all performed by relinking nodes in place.
//!
//! # Quick Start
//!
//! ```
//! use qring::Queue;
//!
//! let mut q = Queue::builder().seed(1).build().unwrap();
//! q.extend_tail(["a", "a", "b", "b", "b", "c"]).unwrap();
//!
//! q.delete_duplicates().unwrap();
//! assert_eq!(q.iter().flatten().collect::<Vec<_>>(), ["c"]);
//! ```
//!
//! # Handle API
//!
//! [`handle`] exposes the same operations as free functions over
//! `Option<&mut Queue>`, where a missing queue is a silent no-op and
//! failures collapse to `false` or `None`.
//!
//! # Logging
//!
//! Events are emitted through `tracing`; install a subscriber to see them.
//! Allocation failures log at `warn`, whole-queue operations at `debug` and
//! per-element deletions at `trace`.
//!
//! # Storage
//!
//! | Queue | Arena | Capacity |
//! |-------|-------|----------|
//! | [`Queue`] | [`SlabQueueStorage`] | Growable, reserved up front by the builder |
//! | [`FixedQueue`] | [`BoxedQueueStorage`] | Fixed (runtime), single allocation |

#![warn(missing_docs)]

mod builder;
mod element;
mod error;
pub mod handle;
mod queue;

pub use builder::{DEFAULT_CAPACITY, QueueBuilder};
pub use element::Element;
pub use error::{AllocError, QueueError, Result};
pub use queue::{BoxedQueueStorage, FixedQueue, Iter, Node, Queue, SlabQueueStorage};

pub use qring_link::{Index, LinkError, Storage, StorageError};
