//! String queue over a sentinel ring.
//!
//! A [`Queue`] pairs a node arena with a [`Ring`] and the RNG used by
//! [`Queue::shuffle`]. Every operation below is a sequence of ring splices;
//! element text is never copied once inserted.

use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use qring_link::ring;
use qring_link::{BoxedStorage, Index, LinkError, Linked, Ring, Storage};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::builder::QueueBuilder;
use crate::element::Element;
use crate::error::{AllocError, QueueError, Result};

// =============================================================================
// Node
// =============================================================================

/// Arena node: an [`Element`] plus its ring links.
#[derive(Debug)]
pub struct Node<K: Index = usize> {
    element: Element,
    next: K,
    prev: K,
}

impl<K: Index> Node<K> {
    fn new(element: Element) -> Self {
        Self {
            element,
            next: K::NONE,
            prev: K::NONE,
        }
    }

    /// Returns the element held by this node.
    #[inline]
    pub fn element(&self) -> &Element {
        &self.element
    }

    #[inline]
    fn into_element(self) -> Element {
        self.element
    }
}

impl<K: Index> Linked<K> for Node<K> {
    #[inline]
    fn next(&self) -> K {
        self.next
    }

    #[inline]
    fn prev(&self) -> K {
        self.prev
    }

    #[inline]
    fn set_next(&mut self, idx: K) {
        self.next = idx;
    }

    #[inline]
    fn set_prev(&mut self, idx: K) {
        self.prev = idx;
    }
}

/// Fixed-capacity arena for queue nodes.
pub type BoxedQueueStorage<K = u32> = BoxedStorage<Node<K>, K>;

/// Growable arena for queue nodes backed by `slab::Slab`.
pub type SlabQueueStorage = slab::Slab<Node<usize>>;

/// Queue over a fixed-capacity arena; inserts fail once every slot is taken.
pub type FixedQueue = Queue<BoxedQueueStorage, u32>;

// =============================================================================
// Queue
// =============================================================================

/// A queue of optional strings on a circular doubly-linked list.
///
/// The queue owns its arena and every element linked into it. Removing an
/// element hands ownership to the caller; dropping the queue releases the
/// rest.
///
/// The default arena is a growable `slab::Slab`, so inserts are limited
/// only by memory. [`FixedQueue`] trades that for a single up-front
/// allocation with a hard cap (see [`QueueBuilder::build_fixed`]).
///
/// # Example
///
/// ```
/// use qring::Queue;
///
/// let mut q = Queue::builder().seed(7).build().unwrap();
/// for fruit in ["banana", "apple", "cherry"] {
///     q.insert_tail(Some(fruit)).unwrap();
/// }
///
/// q.sort();
/// let sorted: Vec<_> = q.iter().flatten().collect();
/// assert_eq!(sorted, ["apple", "banana", "cherry"]);
///
/// let mut buf = [0u8; 4];
/// let head = q.remove_head(Some(&mut buf)).unwrap();
/// assert_eq!(head.value(), Some("apple"));
/// assert_eq!(&buf, b"app\0");
/// ```
pub struct Queue<S = SlabQueueStorage, K: Index = usize> {
    storage: S,
    ring: Ring<K>,
    rng: SmallRng,
}

impl Queue {
    /// Creates an empty queue with the default configuration.
    ///
    /// See [`QueueBuilder`] for capacity and seeding options.
    pub fn new() -> Result<Self> {
        QueueBuilder::default().build()
    }

    /// Returns a builder for configuring a queue.
    pub fn builder() -> QueueBuilder {
        QueueBuilder::default()
    }
}

impl<S, K> Queue<S, K>
where
    K: Index,
    S: Storage<Node<K>, Index = K>,
{
    /// Creates an empty queue over `storage`, seeding the shuffle RNG from
    /// OS entropy.
    ///
    /// `storage` must be empty.
    pub fn with_storage(storage: S) -> Self {
        Self::from_parts(storage, None)
    }

    /// Creates an empty queue over `storage` with a deterministic shuffle RNG.
    ///
    /// `storage` must be empty.
    pub fn with_storage_and_seed(storage: S, seed: u64) -> Self {
        Self::from_parts(storage, Some(seed))
    }

    pub(crate) fn from_parts(storage: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => entropy_rng(),
        };
        debug!(seeded = seed.is_some(), "queue created");

        Self {
            storage,
            ring: Ring::new(),
            rng,
        }
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts a copy of `value` at the head. Returns the node's key.
    ///
    /// On failure the queue is unchanged.
    pub fn insert_head(&mut self, value: Option<&str>) -> Result<K> {
        let idx = self.alloc(value)?;
        self.ring.push_front(&mut self.storage, idx);
        Ok(idx)
    }

    /// Inserts a copy of `value` at the tail. Returns the node's key.
    ///
    /// On failure the queue is unchanged.
    pub fn insert_tail(&mut self, value: Option<&str>) -> Result<K> {
        let idx = self.alloc(value)?;
        self.ring.push_back(&mut self.storage, idx);
        Ok(idx)
    }

    /// Appends every value at the tail, all or nothing.
    ///
    /// If any insertion fails, the values already appended by this call are
    /// released and the error is returned. Returns the number appended.
    pub fn extend_tail<I, V>(&mut self, values: I) -> Result<usize>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let mut added = 0;
        for value in values {
            if let Err(err) = self.insert_tail(Some(value.as_ref())) {
                for _ in 0..added {
                    self.pop_back();
                }
                return Err(err);
            }
            added += 1;
        }
        Ok(added)
    }

    fn alloc(&mut self, value: Option<&str>) -> std::result::Result<K, AllocError> {
        let element = Element::new(value).inspect_err(|err| {
            warn!(error = %err, "element allocation failed");
        })?;

        // a rejected node is dropped here along with its text
        self.storage.try_insert(Node::new(element)).map_err(|_| {
            warn!("node storage exhausted");
            AllocError::StorageFull
        })
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Unlinks the head element and returns it.
    pub fn pop_front(&mut self) -> Option<Element> {
        let idx = self.ring.pop_front(&mut self.storage);
        self.take(idx)
    }

    /// Unlinks the tail element and returns it.
    pub fn pop_back(&mut self) -> Option<Element> {
        let idx = self.ring.pop_back(&mut self.storage);
        self.take(idx)
    }

    /// Unlinks the head element and returns it, copying its text into `buf`.
    ///
    /// The copy follows [`Element::copy_to`]: truncated to `buf.len() - 1`
    /// bytes and NUL-terminated. Returns `None` if the queue is empty.
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.pop_front()?;
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Unlinks the tail element and returns it, copying its text into `buf`.
    ///
    /// See [`remove_head`](Self::remove_head).
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.pop_back()?;
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Releases every element.
    pub fn clear(&mut self) {
        let mut released = 0usize;
        while let Some(element) = self.pop_front() {
            element.release();
            released += 1;
        }
        debug!(released, "queue cleared");
    }

    /// Releases every element and then the queue itself.
    pub fn free(mut self) {
        self.clear();
        debug!("queue freed");
    }

    #[inline]
    fn take(&mut self, idx: K) -> Option<Element> {
        if idx.is_none() {
            return None;
        }
        self.storage.remove(idx).map(Node::into_element)
    }

    /// Unlinks `idx` and releases its element.
    fn discard(&mut self, idx: K) {
        self.ring.remove(&mut self.storage, idx);
        if let Some(element) = self.take(idx) {
            trace!(value = ?element.value(), "element deleted");
            element.release();
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the head element without removing it.
    #[inline]
    pub fn front(&self) -> Option<&Element> {
        self.get(self.ring.first())
    }

    /// Returns the tail element without removing it.
    #[inline]
    pub fn back(&self) -> Option<&Element> {
        self.get(self.ring.last())
    }

    /// Returns the element stored under `key`.
    #[inline]
    pub fn get(&self, key: K) -> Option<&Element> {
        if key.is_none() {
            return None;
        }
        self.storage.get(key).map(Node::element)
    }

    /// Counts the elements by traversal. O(n).
    pub fn len(&self) -> usize {
        self.ring.len(&self.storage)
    }

    /// Returns `true` if the queue holds no elements. O(1).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Iterates element values from head to tail.
    pub fn iter(&self) -> Iter<'_, S, K> {
        Iter {
            storage: &self.storage,
            keys: self.ring.iter(&self.storage),
        }
    }

    /// Iterates node keys from head to tail.
    pub fn keys(&self) -> ring::Iter<'_, Node<K>, S, K> {
        self.ring.iter(&self.storage)
    }

    /// Checks every link and returns the element count.
    pub fn validate(&self) -> std::result::Result<usize, LinkError> {
        self.ring.validate(&self.storage)
    }

    // ========================================================================
    // Structural transforms
    // ========================================================================

    /// Deletes the element at index ⌊n / 2⌋ (0-based).
    ///
    /// For six elements that is the fourth; for one it is the only element.
    pub fn delete_middle(&mut self) -> Result<()> {
        if self.ring.is_empty() {
            return Err(QueueError::InvalidOperation("delete_middle on empty queue"));
        }

        // fast moves two links per step, slow one
        let mut slow = self.ring.first();
        let mut fast = self.ring.first();
        while fast.is_some() {
            let after = self.ring.next(&self.storage, fast);
            if after.is_none() {
                break;
            }
            slow = self.ring.next(&self.storage, slow);
            fast = self.ring.next(&self.storage, after);
        }

        self.discard(slow);
        Ok(())
    }

    /// Deletes every element whose value occurs more than once in a row.
    ///
    /// Meant for sorted queues: whole runs go, including their last copy, so
    /// `["a", "a", "b", "c", "c"]` becomes `["b"]`. Values compare byte-wise
    /// over their full length (see [`sort`](Self::sort)) and an absent value
    /// equals nothing, not even another absent value.
    pub fn delete_duplicates(&mut self) -> Result<()> {
        if self.ring.is_empty() {
            return Err(QueueError::InvalidOperation(
                "delete_duplicates on empty queue",
            ));
        }

        let mut deleted = 0usize;
        let mut in_run = false;
        let mut cur = self.ring.first();
        while cur.is_some() {
            let next = self.ring.next(&self.storage, cur);
            let matches = next.is_some() && self.values_equal(cur, next);
            if in_run || matches {
                self.discard(cur);
                deleted += 1;
            }
            in_run = matches;
            cur = next;
        }

        debug!(deleted, "duplicates deleted");
        Ok(())
    }

    fn values_equal(&self, a: K, b: K) -> bool {
        match (
            self.get(a).and_then(Element::value),
            self.get(b).and_then(Element::value),
        ) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Swaps adjacent pairs: 1st with 2nd, 3rd with 4th, and so on.
    ///
    /// An odd trailing element stays put.
    pub fn swap_pairs(&mut self) {
        let mut first = self.ring.first();
        while first.is_some() {
            let second = self.ring.next(&self.storage, first);
            if second.is_none() {
                break;
            }
            self.ring.move_before(&mut self.storage, second, first);
            first = self.ring.next(&self.storage, first);
        }
    }

    /// Reverses the queue in place.
    pub fn reverse(&mut self) {
        let mut node = self.ring.first();
        while node.is_some() {
            let next = self.ring.next(&self.storage, node);
            self.ring.move_after(&mut self.storage, node, Ring::<K>::SENTINEL);
            node = next;
        }
    }

    /// Sorts ascending by byte-wise comparison. Stable.
    ///
    /// Absent values order before every string. Every byte of the UTF-8 text
    /// is compared, including an interior `'\0'`, so `"a"` orders before
    /// `"a\0b"` where a NUL-terminated comparison would call them equal.
    pub fn sort(&mut self) {
        let passes = self.ring.sort_by(&mut self.storage, |a: &Node<K>, b: &Node<K>| {
            a.element.value().cmp(&b.element.value())
        });
        debug!(passes, "queue sorted");
    }

    /// Shuffles the queue uniformly using the queue's own RNG.
    pub fn shuffle(&mut self) {
        self.ring.shuffle(&mut self.storage, &mut self.rng);
        debug!("queue shuffled");
    }

    /// Shuffles the queue uniformly using a caller-supplied RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.ring.shuffle(&mut self.storage, rng);
    }
}

impl<S, K> fmt::Debug for Queue<S, K>
where
    K: Index,
    S: Storage<Node<K>, Index = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, S, K> IntoIterator for &'a Queue<S, K>
where
    K: Index,
    S: Storage<Node<K>, Index = K>,
{
    type Item = Option<&'a str>;
    type IntoIter = Iter<'a, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Seeds from OS entropy, falling back to the clock.
fn entropy_rng() -> SmallRng {
    match SmallRng::try_from_os_rng() {
        Ok(rng) => rng,
        Err(err) => {
            let seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default();
            warn!(error = %err, "os entropy unavailable, seeding from clock");
            SmallRng::seed_from_u64(seed)
        }
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// Iterator over element values, head to tail.
pub struct Iter<'a, S, K: Index> {
    storage: &'a S,
    keys: ring::Iter<'a, Node<K>, S, K>,
}

impl<'a, S, K> Iterator for Iter<'a, S, K>
where
    K: Index + 'a,
    S: Storage<Node<K>, Index = K>,
{
    type Item = Option<&'a str>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let node = self.storage.get(key)?;
        Some(node.element.value())
    }
}

impl<'a, S, K> DoubleEndedIterator for Iter<'a, S, K>
where
    K: Index + 'a,
    S: Storage<Node<K>, Index = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        let node = self.storage.get(key)?;
        Some(node.element.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(values: &[&str]) -> Queue {
        let mut q = Queue::builder().capacity(64).seed(12345).build().unwrap();
        q.extend_tail(values).unwrap();
        q
    }

    fn texts<S, K>(q: &Queue<S, K>) -> Vec<&str>
    where
        K: Index,
        S: Storage<Node<K>, Index = K>,
    {
        q.validate().unwrap();
        q.iter().map(|v| v.unwrap_or("<absent>")).collect()
    }

    #[test]
    fn new_queue_is_empty() {
        let q = Queue::new().unwrap();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert!(q.front().is_none());
        assert!(q.back().is_none());
    }

    #[test]
    fn insert_head_and_tail() {
        let mut q = queue_of(&[]);
        q.insert_tail(Some("b")).unwrap();
        q.insert_head(Some("a")).unwrap();
        q.insert_tail(Some("c")).unwrap();

        assert_eq!(texts(&q), ["a", "b", "c"]);
        assert_eq!(q.front().and_then(Element::value), Some("a"));
        assert_eq!(q.back().and_then(Element::value), Some("c"));
    }

    #[test]
    fn insert_returns_usable_key() {
        let mut q = queue_of(&[]);
        let k = q.insert_tail(Some("x")).unwrap();
        assert_eq!(q.get(k).and_then(Element::value), Some("x"));
        assert_eq!(q.keys().collect::<Vec<_>>(), vec![k]);
    }

    #[test]
    fn absent_value_round_trips() {
        let mut q = queue_of(&[]);
        q.insert_tail(None).unwrap();

        let mut buf = [0xaau8; 4];
        let e = q.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(e.value(), None);
        assert_eq!(buf, [0xaa; 4]);
    }

    #[test]
    fn full_storage_rejects_without_mutation() {
        let mut q = Queue::builder().capacity(2).seed(1).build_fixed().unwrap();
        q.insert_tail(Some("a")).unwrap();
        q.insert_tail(Some("b")).unwrap();

        assert_eq!(
            q.insert_head(Some("c")),
            Err(QueueError::Allocation(AllocError::StorageFull))
        );
        assert_eq!(texts(&q), ["a", "b"]);
    }

    #[test]
    fn extend_tail_is_all_or_nothing() {
        let mut q = Queue::builder().capacity(4).seed(1).build_fixed().unwrap();
        q.insert_tail(Some("keep")).unwrap();

        assert!(q.extend_tail(["a", "b", "c", "d"]).is_err());
        assert_eq!(texts(&q), ["keep"]);

        assert_eq!(q.extend_tail(["a", "b"]), Ok(2));
        assert_eq!(texts(&q), ["keep", "a", "b"]);
    }

    #[test]
    fn remove_head_and_tail() {
        let mut q = queue_of(&["a", "b", "c"]);

        let mut buf = [0u8; 8];
        assert_eq!(q.remove_head(Some(&mut buf)).unwrap().value(), Some("a"));
        assert_eq!(&buf[..2], b"a\0");

        assert_eq!(q.remove_tail(None).unwrap().value(), Some("c"));
        assert_eq!(texts(&q), ["b"]);
    }

    #[test]
    fn remove_from_empty_returns_none() {
        let mut q = queue_of(&[]);
        let mut buf = [0xaau8; 4];

        assert!(q.remove_head(Some(&mut buf)).is_none());
        assert!(q.remove_tail(Some(&mut buf)).is_none());
        assert_eq!(buf, [0xaa; 4]);
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn removed_slot_is_reused() {
        let mut q = Queue::builder().capacity(1).seed(1).build_fixed().unwrap();
        for round in 0..10 {
            let text = round.to_string();
            q.insert_tail(Some(&text)).unwrap();
            assert_eq!(q.pop_front().unwrap().value(), Some(text.as_str()));
        }
    }

    #[test]
    fn clear_releases_everything() {
        let mut q = queue_of(&["a", "b", "c"]);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.validate(), Ok(0));

        q.insert_tail(Some("d")).unwrap();
        assert_eq!(texts(&q), ["d"]);
    }

    #[test]
    fn delete_middle_picks_floor_half() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["1"], &[]),
            (&["1", "2"], &["1"]),
            (&["1", "2", "3"], &["1", "3"]),
            (&["1", "2", "3", "4"], &["1", "2", "4"]),
            (&["1", "2", "3", "4", "5", "6"], &["1", "2", "3", "5", "6"]),
        ];

        for (input, expected) in cases {
            let mut q = queue_of(input);
            q.delete_middle().unwrap();
            assert_eq!(texts(&q), *expected, "input {input:?}");
        }
    }

    #[test]
    fn delete_middle_on_empty_is_invalid() {
        let mut q = queue_of(&[]);
        assert!(matches!(
            q.delete_middle(),
            Err(QueueError::InvalidOperation(_))
        ));
    }

    #[test]
    fn delete_duplicates_removes_whole_runs() {
        let mut q = queue_of(&["a", "a", "b", "b", "b", "c"]);
        q.delete_duplicates().unwrap();
        assert_eq!(texts(&q), ["c"]);

        let mut q = queue_of(&["a", "b", "b", "c", "d", "d"]);
        q.delete_duplicates().unwrap();
        assert_eq!(texts(&q), ["a", "c"]);

        let mut q = queue_of(&["x", "x"]);
        q.delete_duplicates().unwrap();
        assert!(q.is_empty());
    }

    #[test]
    fn delete_duplicates_is_case_sensitive() {
        let mut q = queue_of(&["A", "a", "a"]);
        q.delete_duplicates().unwrap();
        assert_eq!(texts(&q), ["A"]);
    }

    #[test]
    fn absent_values_are_never_duplicates() {
        let mut q = queue_of(&[]);
        q.insert_tail(None).unwrap();
        q.insert_tail(None).unwrap();
        q.insert_tail(Some("a")).unwrap();

        q.delete_duplicates().unwrap();
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn delete_duplicates_on_empty_is_invalid() {
        let mut q = queue_of(&[]);
        assert!(q.delete_duplicates().is_err());
    }

    #[test]
    fn swap_pairs_even_and_odd() {
        let mut q = queue_of(&["1", "2", "3", "4", "5"]);
        q.swap_pairs();
        assert_eq!(texts(&q), ["2", "1", "4", "3", "5"]);

        let mut q = queue_of(&["1", "2", "3", "4"]);
        q.swap_pairs();
        assert_eq!(texts(&q), ["2", "1", "4", "3"]);

        let mut q = queue_of(&["1"]);
        q.swap_pairs();
        assert_eq!(texts(&q), ["1"]);

        let mut q = queue_of(&[]);
        q.swap_pairs();
        assert!(q.is_empty());
    }

    #[test]
    fn reverse_in_place() {
        let mut q = queue_of(&["a", "b", "c", "d"]);
        q.reverse();
        assert_eq!(texts(&q), ["d", "c", "b", "a"]);

        let mut q = queue_of(&[]);
        q.reverse();
        assert!(q.is_empty());
    }

    #[test]
    fn sort_strcmp_order() {
        let mut q = queue_of(&["banana", "apple", "cherry"]);
        q.sort();
        assert_eq!(texts(&q), ["apple", "banana", "cherry"]);

        let mut q = queue_of(&["b", "B", "a", "ab", "A", ""]);
        q.sort();
        assert_eq!(texts(&q), ["", "A", "B", "a", "ab", "b"]);
    }

    #[test]
    fn interior_nul_is_an_ordinary_byte() {
        let mut q = queue_of(&["a\0b", "a", "a\0"]);

        q.sort();
        assert_eq!(texts(&q), ["a", "a\0", "a\0b"]);

        q.delete_duplicates().unwrap();
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn sort_places_absent_first() {
        let mut q = queue_of(&["b"]);
        q.insert_tail(None).unwrap();
        q.insert_tail(Some("a")).unwrap();

        q.sort();
        let values: Vec<_> = q.iter().collect();
        assert_eq!(values, [None, Some("a"), Some("b")]);
    }

    #[test]
    fn sort_is_stable_for_equal_text() {
        let mut q = queue_of(&["b", "a", "b", "a"]);
        let keys: Vec<usize> = q.keys().collect();

        q.sort();
        let sorted: Vec<usize> = q.keys().collect();
        assert_eq!(sorted, [keys[1], keys[3], keys[0], keys[2]]);
    }

    #[test]
    fn shuffle_is_seed_deterministic() {
        let input: Vec<String> = (0..32).map(|i| i.to_string()).collect();

        let mut a = Queue::builder().seed(9).build().unwrap();
        let mut b = Queue::builder().seed(9).build().unwrap();
        a.extend_tail(&input).unwrap();
        b.extend_tail(&input).unwrap();

        a.shuffle();
        b.shuffle();
        assert_eq!(texts(&a), texts(&b));
    }

    #[test]
    fn shuffle_with_external_rng() {
        let mut q = queue_of(&["a", "b", "c", "d", "e"]);
        let mut rng = SmallRng::seed_from_u64(3);
        q.shuffle_with(&mut rng);

        let mut got = texts(&q);
        got.sort();
        assert_eq!(got, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn debug_lists_values() {
        let mut q = queue_of(&["a"]);
        q.insert_tail(None).unwrap();
        assert_eq!(format!("{q:?}"), r#"[Some("a"), None]"#);
    }

    #[test]
    fn iter_both_directions() {
        let q = queue_of(&["a", "b", "c"]);
        let back: Vec<_> = q.iter().rev().flatten().collect();
        assert_eq!(back, ["c", "b", "a"]);

        let mut n = 0;
        for value in &q {
            assert!(value.is_some());
            n += 1;
        }
        assert_eq!(n, 3);
    }

    #[test]
    fn default_queue_grows_past_initial_capacity() {
        let mut q = Queue::builder().capacity(2).seed(5).build().unwrap();
        for i in 0..5000 {
            q.insert_tail(Some(&i.to_string())).unwrap();
        }
        assert_eq!(q.validate(), Ok(5000));

        q.sort();
        q.reverse();
        assert_eq!(q.front().and_then(Element::value), Some("9999"));
        assert_eq!(q.back().and_then(Element::value), Some("0"));
    }

    #[test]
    fn fixed_queue_runs_every_transform() {
        let mut q = Queue::builder().capacity(8).seed(5).build_fixed().unwrap();
        q.extend_tail(["d", "b", "b", "a", "c"]).unwrap();

        q.sort();
        q.delete_duplicates().unwrap();
        q.swap_pairs();
        q.reverse();
        q.delete_middle().unwrap();
        assert_eq!(q.validate(), Ok(2));
        q.shuffle();
        assert_eq!(q.len(), 2);
    }
}
