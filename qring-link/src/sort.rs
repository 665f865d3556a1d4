//! Bottom-up merge sort over ring links.
//!
//! Runs are walked through `next` links only; no node moves in storage and
//! no buffer is allocated. During the passes the list is treated as a
//! NONE-terminated chain and `prev` links are rebuilt as nodes are emitted,
//! so the ring is fully consistent again once the final pass closes.

use core::cmp::Ordering;

use crate::{Index, Linked, Ring, Storage};

impl<Idx: Index> Ring<Idx> {
    /// Sorts the ring in ascending order by `cmp`.
    ///
    /// Every node starts as a run of one. Adjacent runs are merged pairwise,
    /// doubling the run width each pass, and an unpaired trailing run is
    /// carried into the next pass untouched. Merging takes from the left run
    /// whenever `cmp(left, right)` is not `Greater`, so equal nodes keep their
    /// relative order.
    ///
    /// Returns the number of merge passes performed (`0` for fewer than two
    /// nodes). O(n log n) comparisons, O(1) extra space.
    pub fn sort_by<T, S, F>(&mut self, storage: &mut S, mut cmp: F) -> usize
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.first() == self.last() {
            return 0;
        }

        let mut list = self.first();
        let mut tail;
        let mut width = 1usize;
        let mut passes = 0;

        loop {
            let mut p = list;
            list = Idx::NONE;
            tail = Idx::NONE;
            let mut merges = 0usize;

            while p.is_some() {
                merges += 1;

                // q starts `width` nodes past p, or at the chain's end
                let mut q = p;
                let mut psize = 0;
                while psize < width && q.is_some() {
                    psize += 1;
                    q = next_of(storage, q);
                }
                let mut qsize = width;

                while psize > 0 || (qsize > 0 && q.is_some()) {
                    let take_left = if psize == 0 {
                        false
                    } else if qsize == 0 || q.is_none() {
                        true
                    } else {
                        // Safety: p and q are live nodes reached through links
                        let (left, right) =
                            unsafe { (storage.get_unchecked(p), storage.get_unchecked(q)) };
                        cmp(left, right) != Ordering::Greater
                    };

                    let e = if take_left {
                        let e = p;
                        p = next_of(storage, p);
                        psize -= 1;
                        e
                    } else {
                        let e = q;
                        q = next_of(storage, q);
                        qsize -= 1;
                        e
                    };

                    if tail.is_some() {
                        // Safety: tail is a node emitted earlier in this pass
                        unsafe { storage.get_unchecked_mut(tail) }.set_next(e);
                    } else {
                        list = e;
                    }
                    // Safety: e was reached through links
                    unsafe { storage.get_unchecked_mut(e) }.set_prev(tail);
                    tail = e;
                }

                p = q;
            }

            // Safety: the ring had at least two nodes, so this pass emitted some
            unsafe { storage.get_unchecked_mut(tail) }.set_next(Idx::NONE);
            passes += 1;

            if merges <= 1 {
                break;
            }
            width *= 2;
        }

        self.set_ends(list, tail);
        passes
    }
}

#[inline]
fn next_of<T, S, Idx>(storage: &S, idx: Idx) -> Idx
where
    T: Linked<Idx>,
    S: Storage<T, Index = Idx>,
    Idx: Index,
{
    // Safety: callers only pass nodes reached through ring links
    unsafe { storage.get_unchecked(idx) }.next()
}
