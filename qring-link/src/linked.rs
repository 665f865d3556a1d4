//! Linked trait for index-linked ring nodes.
//!
//! Nodes embed their own prev/next links, allowing O(1) splicing without
//! the ring owning the data.

use crate::Index;

/// Trait for types that can sit in a [`Ring`](crate::Ring).
///
/// Implementors embed prev/next indices directly in their struct. A link
/// equal to `Idx::NONE` points at the ring's sentinel.
///
/// # Example
///
/// ```
/// use qring_link::{Index, Linked};
///
/// struct Job {
///     id: u64,
///     next: u32,
///     prev: u32,
/// }
///
/// impl Linked<u32> for Job {
///     fn next(&self) -> u32 { self.next }
///     fn prev(&self) -> u32 { self.prev }
///     fn set_next(&mut self, idx: u32) { self.next = idx; }
///     fn set_prev(&mut self, idx: u32) { self.prev = idx; }
/// }
/// ```
pub trait Linked<Idx: Index> {
    /// Returns the next node's index, or `Idx::NONE` if the sentinel follows.
    fn next(&self) -> Idx;

    /// Returns the previous node's index, or `Idx::NONE` if the sentinel precedes.
    fn prev(&self) -> Idx;

    /// Sets the next node's index.
    fn set_next(&mut self, idx: Idx);

    /// Sets the previous node's index.
    fn set_prev(&mut self, idx: Idx);
}
