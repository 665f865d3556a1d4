//! Arena storage with stable indices.
//!
//! A ring never owns its nodes. They live in a [`Storage`] that hands out
//! an index on insert and keeps it valid until the slot is removed, so
//! links can be plain indices instead of pointers.

use crate::Index;

use core::fmt;
use core::mem::MaybeUninit;
use core::ptr::NonNull;
use std::alloc::{Layout, alloc, dealloc};
use std::marker::PhantomData;

/// Slab-like storage with stable indices.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable indices**: an index remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Slot reuse**: removed slots can be reused by future inserts
///
/// # Implementations
///
/// - `BoxedStorage<T>` - fixed capacity, one allocation (in this crate)
/// - `slab::Slab<T>` - growable (feature `slab`)
pub trait Storage<T> {
    /// Index type for this storage.
    type Index: Index;

    /// Error type for failed insertions.
    ///
    /// - `Full<T>` for fixed-capacity storage
    /// - `Infallible` for growable storage
    type Error;

    /// Inserts a value, returning its stable index.
    fn try_insert(&mut self, value: T) -> Result<Self::Index, Self::Error>;

    /// Removes and returns the value at `index`, if present.
    fn remove(&mut self, index: Self::Index) -> Option<T>;

    /// Returns a reference to the value at `index`, if present.
    fn get(&self, index: Self::Index) -> Option<&T>;

    /// Returns a mutable reference to the value at `index`, if present.
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T>;

    /// Returns a reference without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be valid and occupied.
    unsafe fn get_unchecked(&self, index: Self::Index) -> &T;

    /// Returns a mutable reference without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be valid and occupied.
    unsafe fn get_unchecked_mut(&mut self, index: Self::Index) -> &mut T;

    /// Removes an element without bounds checking.
    ///
    /// # Safety
    ///
    /// The index must be valid and occupied.
    unsafe fn remove_unchecked(&mut self, index: Self::Index) -> T;
}

/// Error returned when fixed-capacity storage is full.
///
/// Carries the rejected value back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

/// Error while allocating a storage arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Capacity is zero.
    ZeroCapacity,
    /// Requested capacity does not fit the index type or the address space.
    CapacityOverflow {
        /// Slots requested, after rounding to a power of two.
        capacity: usize,
    },
    /// The allocator returned null.
    OutOfMemory {
        /// Size of the failed allocation.
        bytes: usize,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "capacity must be > 0"),
            Self::CapacityOverflow { capacity } => {
                write!(f, "capacity {capacity} exceeds index type maximum")
            }
            Self::OutOfMemory { bytes } => write!(f, "failed to allocate {bytes} bytes"),
        }
    }
}

impl std::error::Error for StorageError {}

// =============================================================================
// BoxedStorage - runtime capacity, single allocation, bitmap occupancy
// =============================================================================

/// Fixed-capacity storage with runtime-determined size.
///
/// Uses a single heap allocation containing:
/// - Entry array (`MaybeUninit<T>`)
/// - Occupancy bitmap (`u64` words)
/// - Free stack (indices)
///
/// Capacity is rounded up to the next power of 2 for bitmap efficiency.
/// `Idx::NONE` is never handed out, so it stays free for use as a sentinel.
///
/// # Example
///
/// ```
/// use qring_link::{BoxedStorage, Storage};
///
/// let mut storage: BoxedStorage<u64> = BoxedStorage::try_with_capacity(1000).unwrap();
/// assert_eq!(storage.capacity(), 1024);
///
/// let idx = storage.try_insert(42).unwrap();
/// assert_eq!(storage.get(idx), Some(&42));
/// ```
pub struct BoxedStorage<T, Idx: Index = u32> {
    /// Single allocation containing entries, bitmap, and free stack.
    ptr: NonNull<u8>,
    /// Capacity (always power of 2).
    capacity: usize,
    /// Number of free slots.
    free_len: usize,
    /// Cached layout for deallocation.
    layout: Layout,
    /// Offset to bitmap from ptr.
    bitmap_offset: usize,
    /// Offset to free stack from ptr.
    free_stack_offset: usize,
    _marker: PhantomData<(T, Idx)>,
}

impl<T, Idx: Index> BoxedStorage<T, Idx> {
    /// Creates storage with at least `min_capacity` slots.
    ///
    /// Actual capacity is rounded up to the next power of 2. Allocation
    /// failure is reported instead of aborting the process.
    pub fn try_with_capacity(min_capacity: usize) -> Result<Self, StorageError> {
        if min_capacity == 0 {
            return Err(StorageError::ZeroCapacity);
        }

        let capacity = min_capacity
            .checked_next_power_of_two()
            .ok_or(StorageError::CapacityOverflow {
                capacity: min_capacity,
            })?;

        // NONE must stay out of the handed-out range
        if capacity > Idx::NONE.as_usize() {
            return Err(StorageError::CapacityOverflow { capacity });
        }

        // Layout: [entries][padding][bitmap][padding][free_stack]
        let (layout, bitmap_offset, free_stack_offset) =
            Self::layout_for(capacity).ok_or(StorageError::CapacityOverflow { capacity })?;

        let ptr = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            return Err(StorageError::OutOfMemory {
                bytes: layout.size(),
            });
        };

        let mut storage = Self {
            ptr,
            capacity,
            free_len: capacity,
            layout,
            bitmap_offset,
            free_stack_offset,
            _marker: PhantomData,
        };
        storage.reset_slots();
        Ok(storage)
    }

    fn layout_for(capacity: usize) -> Option<(Layout, usize, usize)> {
        let entries_layout = Layout::array::<MaybeUninit<T>>(capacity).ok()?;
        let bitmap_layout = Layout::array::<u64>(bitmap_words(capacity)).ok()?;
        let free_stack_layout = Layout::array::<Idx>(capacity).ok()?;

        let (layout, bitmap_offset) = entries_layout.extend(bitmap_layout).ok()?;
        let (layout, free_stack_offset) = layout.extend(free_stack_layout).ok()?;
        Some((layout.pad_to_align(), bitmap_offset, free_stack_offset))
    }

    /// Returns the capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.capacity - self.free_len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.free_len == self.capacity
    }

    fn drop_occupied(&mut self) {
        for i in 0..self.capacity {
            if self.is_occupied(i) {
                // Safety: slot is occupied
                unsafe {
                    let ptr = self.entries_ptr().add(i);
                    core::ptr::drop_in_place((*ptr).as_mut_ptr());
                }
            }
        }
    }

    fn reset_slots(&mut self) {
        // All vacant
        unsafe {
            core::ptr::write_bytes(self.bitmap_ptr(), 0, bitmap_words(self.capacity));
        }

        // Lowest index on top of the stack
        let free_stack = self.free_stack_ptr();
        for i in 0..self.capacity {
            unsafe {
                free_stack.add(i).write(Idx::from_usize(self.capacity - 1 - i));
            }
        }
        self.free_len = self.capacity;
    }

    #[inline]
    fn entries_ptr(&self) -> *mut MaybeUninit<T> {
        self.ptr.as_ptr() as *mut MaybeUninit<T>
    }

    #[inline]
    fn bitmap_ptr(&self) -> *mut u64 {
        unsafe { self.ptr.as_ptr().add(self.bitmap_offset) as *mut u64 }
    }

    #[inline]
    fn free_stack_ptr(&self) -> *mut Idx {
        unsafe { self.ptr.as_ptr().add(self.free_stack_offset) as *mut Idx }
    }

    #[inline]
    fn is_occupied(&self, idx: usize) -> bool {
        let word = idx / 64;
        let bit = idx % 64;
        unsafe { (*self.bitmap_ptr().add(word) & (1 << bit)) != 0 }
    }

    #[inline]
    fn set_occupied(&mut self, idx: usize) {
        let word = idx / 64;
        let bit = idx % 64;
        unsafe {
            *self.bitmap_ptr().add(word) |= 1 << bit;
        }
    }

    #[inline]
    fn set_vacant(&mut self, idx: usize) {
        let word = idx / 64;
        let bit = idx % 64;
        unsafe {
            *self.bitmap_ptr().add(word) &= !(1 << bit);
        }
    }
}

impl<T, Idx: Index> Storage<T> for BoxedStorage<T, Idx> {
    type Index = Idx;
    type Error = Full<T>;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Index, Self::Error> {
        if self.free_len == 0 {
            return Err(Full(value));
        }

        self.free_len -= 1;
        let idx = unsafe { *self.free_stack_ptr().add(self.free_len) };
        let i = idx.as_usize();

        unsafe {
            self.entries_ptr().add(i).write(MaybeUninit::new(value));
        }
        self.set_occupied(i);

        Ok(idx)
    }

    #[inline]
    fn remove(&mut self, index: Self::Index) -> Option<T> {
        let i = index.as_usize();
        if i >= self.capacity || !self.is_occupied(i) {
            return None;
        }

        // Safety: bounds and occupancy checked above
        Some(unsafe { self.remove_unchecked(index) })
    }

    #[inline]
    fn get(&self, index: Self::Index) -> Option<&T> {
        let i = index.as_usize();
        if i >= self.capacity || !self.is_occupied(i) {
            return None;
        }

        Some(unsafe { (*self.entries_ptr().add(i)).assume_init_ref() })
    }

    #[inline]
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T> {
        let i = index.as_usize();
        if i >= self.capacity || !self.is_occupied(i) {
            return None;
        }

        Some(unsafe { (*self.entries_ptr().add(i)).assume_init_mut() })
    }

    #[inline]
    unsafe fn get_unchecked(&self, index: Self::Index) -> &T {
        unsafe { (*self.entries_ptr().add(index.as_usize())).assume_init_ref() }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, index: Self::Index) -> &mut T {
        unsafe { (*self.entries_ptr().add(index.as_usize())).assume_init_mut() }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, index: Self::Index) -> T {
        let i = index.as_usize();

        self.set_vacant(i);
        let value = unsafe { self.entries_ptr().add(i).read().assume_init() };

        unsafe {
            self.free_stack_ptr().add(self.free_len).write(index);
        }
        self.free_len += 1;

        value
    }
}

impl<T, Idx: Index> Drop for BoxedStorage<T, Idx> {
    fn drop(&mut self) {
        self.drop_occupied();

        unsafe {
            dealloc(self.ptr.as_ptr(), self.layout);
        }
    }
}

impl<T, Idx: Index> fmt::Debug for BoxedStorage<T, Idx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedStorage")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

// Safety: BoxedStorage owns its data, safe to send if T is Send
unsafe impl<T: Send, Idx: Index + Send> Send for BoxedStorage<T, Idx> {}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Index = usize;
    type Error = core::convert::Infallible;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Index, Self::Error> {
        Ok(self.insert(value))
    }

    #[inline]
    fn remove(&mut self, index: Self::Index) -> Option<T> {
        self.try_remove(index)
    }

    #[inline]
    fn get(&self, index: Self::Index) -> Option<&T> {
        slab::Slab::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T> {
        slab::Slab::get_mut(self, index)
    }

    #[inline]
    unsafe fn get_unchecked(&self, index: Self::Index) -> &T {
        unsafe { slab::Slab::get_unchecked(self, index) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, index: Self::Index) -> &mut T {
        unsafe { slab::Slab::get_unchecked_mut(self, index) }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, index: Self::Index) -> T {
        slab::Slab::remove(self, index)
    }
}

#[inline]
const fn bitmap_words(capacity: usize) -> usize {
    capacity.div_ceil(64)
}
