//! Queue configuration.

use std::alloc::Layout;

use qring_link::{BoxedStorage, StorageError};
use tracing::debug;

use crate::error::Result;
use crate::queue::{BoxedQueueStorage, FixedQueue, Node, Queue, SlabQueueStorage};

/// Default number of arena slots reserved up front.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Builder for [`Queue`] and [`FixedQueue`].
///
/// # Example
///
/// ```
/// use qring::QueueBuilder;
///
/// // growable: capacity is only the initial reservation
/// let q = QueueBuilder::default().capacity(16).seed(42).build().unwrap();
/// assert!(q.is_empty());
///
/// // fixed: capacity rounds up to 128 and is a hard limit
/// let fixed = QueueBuilder::default().capacity(100).build_fixed().unwrap();
/// assert!(fixed.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct QueueBuilder {
    capacity: usize,
    seed: Option<u64>,
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            seed: None,
        }
    }
}

impl QueueBuilder {
    /// Number of element slots. Default: 1024.
    ///
    /// For [`build`](Self::build) this is the initial reservation and the
    /// arena grows past it. For [`build_fixed`](Self::build_fixed) it is
    /// rounded up to a power of two and never changes.
    pub fn capacity(mut self, slots: usize) -> Self {
        self.capacity = slots;
        self
    }

    /// Seed for the shuffle RNG. Default: OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds an empty queue over a growable arena.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Allocation`](crate::QueueError::Allocation) if the
    /// initial reservation exceeds the address space.
    pub fn build(self) -> Result<Queue> {
        if Layout::array::<Node<usize>>(self.capacity).is_err() {
            return Err(StorageError::CapacityOverflow {
                capacity: self.capacity,
            }
            .into());
        }

        let storage = SlabQueueStorage::with_capacity(self.capacity);
        debug!(reserved = storage.capacity(), "growable queue storage allocated");
        Ok(Queue::from_parts(storage, self.seed))
    }

    /// Allocates a fixed arena and builds an empty queue over it.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Allocation`](crate::QueueError::Allocation) if the
    /// capacity is zero, too large for `u32` indices, or cannot be allocated.
    pub fn build_fixed(self) -> Result<FixedQueue> {
        let storage: BoxedQueueStorage = BoxedStorage::try_with_capacity(self.capacity)?;
        debug!(capacity = storage.capacity(), "fixed queue storage allocated");
        Ok(Queue::from_parts(storage, self.seed))
    }
}
