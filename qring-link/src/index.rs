//! Sentinel-based index trait for arena links.
//!
//! A reserved value (`MAX`) stands in for "no node". Inside a [`Ring`](crate::Ring)
//! the same value names the ring's sentinel, so a node whose `next` is
//! `Idx::NONE` is the last element and wraps back to the sentinel.

/// A copyable arena index with a reserved sentinel value.
///
/// # Example
///
/// ```
/// use qring_link::Index;
///
/// let idx: u32 = 5;
/// let none: u32 = u32::NONE;
///
/// assert!(idx.is_some());
/// assert!(none.is_none());
/// ```
pub trait Index: Copy + Eq + core::fmt::Debug {
    /// Sentinel value: the ring head, or "unlinked" for a detached node.
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the index as a slot offset.
    fn as_usize(self) -> usize;

    /// Builds an index from a slot offset.
    fn from_usize(val: usize) -> Self;
}

macro_rules! impl_index_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }
            }
        )*
    };
}

impl_index_for_unsigned!(u16, u32, u64, usize);
