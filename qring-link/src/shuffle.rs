//! In-place Fisher–Yates shuffle over ring links.

use rand::Rng;

use crate::{Index, Linked, Ring, Storage};

impl<Idx: Index> Ring<Idx> {
    /// Shuffles the ring uniformly at random.
    ///
    /// The ring is split into a placed prefix and an unplaced suffix. Each
    /// step draws a position uniformly from the unplaced nodes and moves that
    /// node to the end of the prefix, so after `n - 1` steps every one of the
    /// `n!` orders is equally likely. Draws use [`Rng::random_range`], which
    /// is free of modulo bias.
    ///
    /// Reaching the drawn node walks from whichever of the last position,
    /// the suffix start or the suffix end is nearest.
    pub fn shuffle<T, S, R>(&mut self, storage: &mut S, rng: &mut R)
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
        R: Rng + ?Sized,
    {
        let n = self.len(storage);
        if n < 2 {
            return;
        }

        let mut placed = Self::SENTINEL;
        let mut cursor = self.first();
        let mut cursor_pos = 0usize;

        for i in 0..n - 1 {
            let remaining = n - i;
            let target = rng.random_range(0..remaining);
            let chosen = self.seek(storage, placed, (cursor, cursor_pos), target, remaining);

            let after = self.step_next(storage, chosen);
            self.move_after(storage, chosen, placed);
            placed = chosen;

            // `after` slides into the chosen node's old position
            if after.is_some() {
                cursor = after;
                cursor_pos = target;
            } else {
                cursor = self.step_next(storage, placed);
                cursor_pos = 0;
            }
        }
    }

    /// Finds the node at `target` within the unplaced suffix that follows
    /// `placed`.
    fn seek<T, S>(
        &self,
        storage: &S,
        placed: Idx,
        (cursor, cursor_pos): (Idx, usize),
        target: usize,
        remaining: usize,
    ) -> Idx
    where
        T: Linked<Idx>,
        S: Storage<T, Index = Idx>,
    {
        let from_start = target;
        let from_end = remaining - 1 - target;
        let from_cursor = cursor_pos.abs_diff(target);

        let (mut node, steps, forward) = if from_cursor <= from_start && from_cursor <= from_end {
            (cursor, from_cursor, target >= cursor_pos)
        } else if from_start <= from_end {
            (self.step_next(storage, placed), from_start, true)
        } else {
            (self.last(), from_end, false)
        };

        for _ in 0..steps {
            node = if forward {
                self.step_next(storage, node)
            } else {
                self.step_prev(storage, node)
            };
        }
        node
    }
}
