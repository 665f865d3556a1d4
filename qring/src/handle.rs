//! Handle-style entry points.
//!
//! Every function accepts an absent queue (`None`) and degrades to a no-op,
//! `false`, `0` or `None` instead of failing. Errors from the method API are
//! collapsed the same way.

use tracing::warn;

use crate::element::Element;
use crate::queue::Queue;

/// Creates an empty queue, or `None` if allocation fails.
pub fn queue_new() -> Option<Queue> {
    Queue::new()
        .inspect_err(|err| warn!(error = %err, "queue allocation failed"))
        .ok()
}

/// Releases every element and then the queue. No-op on `None`.
pub fn queue_free(queue: Option<Queue>) {
    if let Some(queue) = queue {
        queue.free();
    }
}

/// Inserts a copy of `value` at the head. `false` if absent or on failure.
pub fn insert_head(queue: Option<&mut Queue>, value: Option<&str>) -> bool {
    queue.is_some_and(|q| q.insert_head(value).is_ok())
}

/// Inserts a copy of `value` at the tail. `false` if absent or on failure.
pub fn insert_tail(queue: Option<&mut Queue>, value: Option<&str>) -> bool {
    queue.is_some_and(|q| q.insert_tail(value).is_ok())
}

/// Removes the head element, copying its text into `buf` if given.
///
/// `None` if the queue is absent or empty.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    queue?.remove_head(buf)
}

/// Removes the tail element, copying its text into `buf` if given.
///
/// `None` if the queue is absent or empty.
pub fn remove_tail(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    queue?.remove_tail(buf)
}

/// Number of elements; `0` if absent.
pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::len)
}

/// Deletes the middle element. `false` if absent or empty.
pub fn delete_middle(queue: Option<&mut Queue>) -> bool {
    queue.is_some_and(|q| q.delete_middle().is_ok())
}

/// Deletes every run of equal values. `false` if absent or empty.
pub fn delete_duplicates(queue: Option<&mut Queue>) -> bool {
    queue.is_some_and(|q| q.delete_duplicates().is_ok())
}

/// Swaps adjacent pairs. No-op if absent.
pub fn swap_pairs(queue: Option<&mut Queue>) {
    if let Some(q) = queue {
        q.swap_pairs();
    }
}

/// Reverses in place. No-op if absent.
pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(q) = queue {
        q.reverse();
    }
}

/// Sorts ascending. No-op if absent.
pub fn sort(queue: Option<&mut Queue>) {
    if let Some(q) = queue {
        q.sort();
    }
}

/// Shuffles uniformly. No-op if absent.
pub fn shuffle(queue: Option<&mut Queue>) {
    if let Some(q) = queue {
        q.shuffle();
    }
}

/// Releases an element obtained from a remove call.
pub fn element_release(element: Element) {
    element.release();
}
