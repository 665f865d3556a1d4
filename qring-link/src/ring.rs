//! Circular doubly-linked ring with a sentinel.
//!
//! The sentinel is not a slot in storage. It is the index `Idx::NONE`, and
//! its two links are the ring's `head` (sentinel.next) and `tail`
//! (sentinel.prev). Seen that way every node has two real neighbours and the
//! list is circular:
//!
//! ```text
//!        ┌──────────────────────────────────────────────┐
//!        ▼                                              │
//!   [sentinel] ──head──► [a] ──► [b] ──► [c] ──next=NONE┘
//!        ▲                                  │
//!        └──────────────tail────────────────┘
//! ```
//!
//! Empty means both sentinel links point back at the sentinel, i.e. `head`
//! is `NONE`. Every primitive below accepts the sentinel wherever a position
//! is expected, so inserting after the sentinel is a push to the front and
//! inserting before it is a push to the back.

use core::fmt;
use core::marker::PhantomData;

use crate::{Index, Linked, Storage};

/// A circular doubly-linked ring over external storage.
///
/// The ring stores only the sentinel's links. Nodes live in user-provided
/// storage and embed their own links via [`Linked`].
///
/// # Storage Invariant
///
/// A ring must always be used with the same storage instance, and a node
/// may belong to at most one ring at a time.
///
/// # Example
///
/// ```
/// use qring_link::{BoxedStorage, Index, Linked, Ring, Storage};
///
/// #[derive(Debug)]
/// struct Node {
///     value: u64,
///     next: u32,
///     prev: u32,
/// }
///
/// impl Node {
///     fn new(value: u64) -> Self {
///         Self { value, next: u32::NONE, prev: u32::NONE }
///     }
/// }
///
/// impl Linked<u32> for Node {
///     fn next(&self) -> u32 { self.next }
///     fn prev(&self) -> u32 { self.prev }
///     fn set_next(&mut self, idx: u32) { self.next = idx; }
///     fn set_prev(&mut self, idx: u32) { self.prev = idx; }
/// }
///
/// let mut storage: BoxedStorage<Node> = BoxedStorage::try_with_capacity(16).unwrap();
/// let mut ring: Ring<u32> = Ring::new();
///
/// let a = storage.try_insert(Node::new(1)).unwrap();
/// let b = storage.try_insert(Node::new(2)).unwrap();
/// ring.push_back(&mut storage, a);
/// ring.push_front(&mut storage, b);
///
/// let order: Vec<u64> = ring.iter(&storage).map(|i| storage.get(i).unwrap().value).collect();
/// assert_eq!(order, vec![2, 1]);
/// assert_eq!(ring.next(&storage, a), Ring::<u32>::SENTINEL);
/// ```
#[derive(Debug)]
pub struct Ring<Idx: Index = u32> {
    /// Sentinel's next: first node, or `NONE` when empty.
    head: Idx,
    /// Sentinel's prev: last node, or `NONE` when empty.
    tail: Idx,
}

impl<Idx: Index> Default for Ring<Idx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Idx: Index> Ring<Idx> {
    /// Index naming the sentinel.
    pub const SENTINEL: Idx = Idx::NONE;

    /// Creates an empty ring (sentinel linked to itself).
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: Idx::NONE,
            tail: Idx::NONE,
        }
    }

    /// Returns `true` if the sentinel's neighbours are the sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns `true` if the ring holds exactly one node.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.head.is_some() && self.head == self.tail
    }

    /// Returns the first node, or the sentinel if empty.
    #[inline]
    pub fn first(&self) -> Idx {
        self.head
    }

    /// Returns the last node, or the sentinel if empty.
    #[inline]
    pub fn last(&self) -> Idx {
        self.tail
    }

    /// Counts the nodes by walking from the sentinel. O(n).
    pub fn len<T, S>(&self, storage: &S) -> usize
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        self.iter(storage).count()
    }

    /// Returns the node after `node`. The sentinel's successor is the first node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is neither the sentinel nor valid in storage.
    #[inline]
    pub fn next<T, S>(&self, storage: &S, node: Idx) -> Idx
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if node.is_none() {
            self.head
        } else {
            storage.get(node).expect("invalid index").next()
        }
    }

    /// Returns the node before `node`. The sentinel's predecessor is the last node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is neither the sentinel nor valid in storage.
    #[inline]
    pub fn prev<T, S>(&self, storage: &S, node: Idx) -> Idx
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if node.is_none() {
            self.tail
        } else {
            storage.get(node).expect("invalid index").prev()
        }
    }

    /// Link-following successor for traversal code.
    ///
    /// `node` must be the sentinel or a node reached through this ring's links.
    #[inline]
    pub(crate) fn step_next<T, S>(&self, storage: &S, node: Idx) -> Idx
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if node.is_none() {
            self.head
        } else {
            // Safety: node came from ring links (list invariant)
            unsafe { storage.get_unchecked(node) }.next()
        }
    }

    /// Link-following predecessor for traversal code.
    #[inline]
    pub(crate) fn step_prev<T, S>(&self, storage: &S, node: Idx) -> Idx
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if node.is_none() {
            self.tail
        } else {
            // Safety: node came from ring links (list invariant)
            unsafe { storage.get_unchecked(node) }.prev()
        }
    }

    /// Writes `at.next = to`, where `at` may be the sentinel.
    #[inline]
    pub(crate) fn set_next<T, S>(&mut self, storage: &mut S, at: Idx, to: Idx)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if at.is_none() {
            self.head = to;
        } else {
            // Safety: at is validated by the caller or reached through links
            unsafe { storage.get_unchecked_mut(at) }.set_next(to);
        }
    }

    /// Writes `at.prev = to`, where `at` may be the sentinel.
    #[inline]
    pub(crate) fn set_prev<T, S>(&mut self, storage: &mut S, at: Idx, to: Idx)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if at.is_none() {
            self.tail = to;
        } else {
            // Safety: at is validated by the caller or reached through links
            unsafe { storage.get_unchecked_mut(at) }.set_prev(to);
        }
    }

    /// Overwrites the sentinel links. Used by whole-ring rewrites such as sort.
    #[inline]
    pub(crate) fn set_ends(&mut self, head: Idx, tail: Idx) {
        self.head = head;
        self.tail = tail;
    }

    // ========================================================================
    // Splice primitives
    // ========================================================================

    /// Splices `node` between `at` and its successor.
    ///
    /// `at` may be the sentinel, which makes this a push to the front.
    /// `node` must not currently be linked into any ring.
    ///
    /// # Panics
    ///
    /// Panics if `node` or a non-sentinel `at` is not valid in storage.
    #[inline]
    pub fn insert_after<T, S>(&mut self, storage: &mut S, at: Idx, node: Idx)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        debug_assert!(node.is_some(), "cannot insert the sentinel");
        let next = self.next(storage, at);

        {
            let n = storage.get_mut(node).expect("invalid index");
            n.set_prev(at);
            n.set_next(next);
        }

        self.set_next(storage, at, node);
        self.set_prev(storage, next, node);
    }

    /// Splices `node` between `at` and its predecessor.
    ///
    /// `at` may be the sentinel, which makes this a push to the back.
    ///
    /// # Panics
    ///
    /// Panics if `node` or a non-sentinel `at` is not valid in storage.
    #[inline]
    pub fn insert_before<T, S>(&mut self, storage: &mut S, at: Idx, node: Idx)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        let prev = self.prev(storage, at);
        self.insert_after(storage, prev, node);
    }

    /// Links `node` as the first element.
    #[inline]
    pub fn push_front<T, S>(&mut self, storage: &mut S, node: Idx)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        self.insert_after(storage, Self::SENTINEL, node);
    }

    /// Links `node` as the last element.
    #[inline]
    pub fn push_back<T, S>(&mut self, storage: &mut S, node: Idx)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        self.insert_before(storage, Self::SENTINEL, node);
    }

    /// Relinks `node`'s neighbours to each other.
    ///
    /// The node stays in storage with both links reset to `NONE`.
    /// Returns `false` if the node was not linked into this ring.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not valid in storage.
    #[inline]
    pub fn remove<T, S>(&mut self, storage: &mut S, node: Idx) -> bool
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if node.is_none() {
            return false;
        }

        let (prev, next) = {
            let n = storage.get(node).expect("invalid index");
            (n.prev(), n.next())
        };

        // A detached node has both links at NONE but is not our only element
        if prev.is_none() && next.is_none() && self.head != node {
            return false;
        }

        self.set_next(storage, prev, next);
        self.set_prev(storage, next, prev);

        // Safety: node validated above
        let n = unsafe { storage.get_unchecked_mut(node) };
        n.set_prev(Idx::NONE);
        n.set_next(Idx::NONE);
        true
    }

    /// Unlinks and returns the first node, or the sentinel if empty.
    #[inline]
    pub fn pop_front<T, S>(&mut self, storage: &mut S) -> Idx
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        let node = self.head;
        self.remove(storage, node);
        node
    }

    /// Unlinks and returns the last node, or the sentinel if empty.
    #[inline]
    pub fn pop_back<T, S>(&mut self, storage: &mut S) -> Idx
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        let node = self.tail;
        self.remove(storage, node);
        node
    }

    /// Moves `node` so it directly follows `dest`.
    ///
    /// `dest` may be the sentinel (move to front). Moving a node after
    /// itself is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if either index is not valid in storage.
    #[inline]
    pub fn move_after<T, S>(&mut self, storage: &mut S, node: Idx, dest: Idx)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if node == dest {
            return;
        }
        self.remove(storage, node);
        self.insert_after(storage, dest, node);
    }

    /// Moves `node` so it directly precedes `dest`.
    ///
    /// `dest` may be the sentinel (move to back).
    ///
    /// # Panics
    ///
    /// Panics if either index is not valid in storage.
    #[inline]
    pub fn move_before<T, S>(&mut self, storage: &mut S, node: Idx, dest: Idx)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if node == dest {
            return;
        }
        self.remove(storage, node);
        self.insert_before(storage, dest, node);
    }

    /// Exchanges the positions of two linked nodes.
    ///
    /// # Panics
    ///
    /// Panics if either index is not valid in storage.
    pub fn swap<T, S>(&mut self, storage: &mut S, a: Idx, b: Idx)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if a == b {
            return;
        }

        let a_prev = self.prev(storage, a);
        if a_prev == b {
            // b directly precedes a
            self.move_after(storage, b, a);
            return;
        }

        self.move_after(storage, a, b);
        self.move_after(storage, b, a_prev);
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Returns an iterator over node indices, first to last.
    #[inline]
    pub fn iter<'a, T, S>(&self, storage: &'a S) -> Iter<'a, T, S, Idx>
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        Iter {
            storage,
            front: self.head,
            back: self.tail,
            _marker: PhantomData,
        }
    }

    /// Walks the ring and checks `n.next.prev == n` for every node,
    /// including the sentinel.
    ///
    /// Returns the number of nodes on success.
    pub fn validate<T, S>(&self, storage: &S) -> Result<usize, LinkError>
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if self.head.is_none() != self.tail.is_none() {
            return Err(LinkError::BrokenSentinel);
        }

        let mut prev = Idx::NONE;
        let mut current = self.head;
        let mut count = 0;

        while current.is_some() {
            let node = storage.get(current).ok_or(LinkError::Dangling {
                node: current.as_usize(),
            })?;
            if node.prev() != prev {
                return Err(LinkError::BrokenPrev {
                    node: current.as_usize(),
                });
            }
            prev = current;
            current = node.next();
            count += 1;
        }

        if self.tail != prev {
            return Err(LinkError::BrokenSentinel);
        }

        Ok(count)
    }
}

/// Link inconsistency found by [`Ring::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// A link points at an index that is not occupied in storage.
    Dangling {
        /// The dangling index.
        node: usize,
    },
    /// `node.prev` does not point at the node that links to it.
    BrokenPrev {
        /// The node with the wrong back link.
        node: usize,
    },
    /// The sentinel's links disagree with the first/last nodes.
    BrokenSentinel,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangling { node } => write!(f, "link to vacant slot {node}"),
            Self::BrokenPrev { node } => write!(f, "node {node} has an inconsistent prev link"),
            Self::BrokenSentinel => write!(f, "sentinel links do not match ring ends"),
        }
    }
}

impl std::error::Error for LinkError {}

// =============================================================================
// Iterator
// =============================================================================

/// Iterator over the node indices of a ring.
pub struct Iter<'a, T, S, Idx: Index> {
    storage: &'a S,
    front: Idx,
    back: Idx,
    _marker: PhantomData<T>,
}

impl<'a, T, S, Idx> Iterator for Iter<'a, T, S, Idx>
where
    T: Linked<Idx>,
    S: Storage<T, Index = Idx>,
    Idx: Index,
{
    type Item = Idx;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.is_none() {
            return None;
        }

        let idx = self.front;
        if self.front == self.back {
            self.front = Idx::NONE;
            self.back = Idx::NONE;
        } else {
            // Safety: ring invariants guarantee front is valid
            self.front = unsafe { self.storage.get_unchecked(idx) }.next();
        }

        Some(idx)
    }
}

impl<'a, T, S, Idx> DoubleEndedIterator for Iter<'a, T, S, Idx>
where
    T: Linked<Idx>,
    S: Storage<T, Index = Idx>,
    Idx: Index,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.is_none() {
            return None;
        }

        let idx = self.back;
        if self.front == self.back {
            self.front = Idx::NONE;
            self.back = Idx::NONE;
        } else {
            // Safety: ring invariants guarantee back is valid
            self.back = unsafe { self.storage.get_unchecked(idx) }.prev();
        }

        Some(idx)
    }
}
