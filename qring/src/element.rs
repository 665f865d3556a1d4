//! Text-holding queue elements.

use crate::error::AllocError;

/// One queue entry: an owned, optional text value.
///
/// An absent value is a valid state distinct from the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    value: Option<Box<str>>,
}

impl Element {
    /// Creates an element holding a private copy of `value`.
    ///
    /// Text is UTF-8, so byte strings that are not valid UTF-8 must be
    /// converted by the caller. There is no terminator: an interior `'\0'`
    /// is stored as an ordinary byte, takes part in comparisons and is
    /// copied out by [`copy_to`](Self::copy_to).
    ///
    /// Fails without side effects if the text buffer cannot be allocated.
    pub fn new(value: Option<&str>) -> Result<Self, AllocError> {
        let value = match value {
            Some(text) => Some(dup_text(text)?),
            None => None,
        };
        Ok(Self { value })
    }

    /// Returns the element's text, if any.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Consumes the element, returning its text buffer.
    #[inline]
    pub fn into_value(self) -> Option<Box<str>> {
        self.value
    }

    /// Copies the text into `buf` as a NUL-terminated byte string.
    ///
    /// At most `buf.len() - 1` bytes are copied and the remainder of the
    /// buffer is zero-filled, so the result is always terminated in bounds.
    /// Nothing is written when `buf` is empty or the element has no text.
    ///
    /// Returns the number of text bytes copied.
    ///
    /// # Example
    ///
    /// ```
    /// use qring::Element;
    ///
    /// let e = Element::new(Some("cherry")).unwrap();
    /// let mut buf = [0xffu8; 4];
    /// assert_eq!(e.copy_to(&mut buf), 3);
    /// assert_eq!(&buf, b"che\0");
    /// ```
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let Some(text) = self.value.as_deref() else {
            return 0;
        };
        let Some(limit) = buf.len().checked_sub(1) else {
            return 0;
        };

        let n = text.len().min(limit);
        buf[..n].copy_from_slice(&text.as_bytes()[..n]);
        buf[n..].fill(0);
        n
    }

    /// Releases the element and its text.
    #[inline]
    pub fn release(self) {}
}

fn dup_text(text: &str) -> Result<Box<str>, AllocError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(text.len())
        .map_err(|_| AllocError::Text { bytes: text.len() })?;
    owned.push_str(text);
    Ok(owned.into_boxed_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_copies_text() {
        let source = String::from("apple");
        let e = Element::new(Some(&source)).unwrap();
        drop(source);
        assert_eq!(e.value(), Some("apple"));
    }

    #[test]
    fn absent_and_empty_are_distinct() {
        let absent = Element::new(None).unwrap();
        let empty = Element::new(Some("")).unwrap();

        assert_eq!(absent.value(), None);
        assert_eq!(empty.value(), Some(""));
        assert_ne!(absent, empty);
    }

    #[test]
    fn copy_to_fits() {
        let e = Element::new(Some("fig")).unwrap();
        let mut buf = [0xaau8; 8];

        assert_eq!(e.copy_to(&mut buf), 3);
        assert_eq!(&buf, b"fig\0\0\0\0\0");
    }

    #[test]
    fn copy_to_truncates_and_terminates() {
        let e = Element::new(Some("banana")).unwrap();
        let mut buf = [0xaau8; 4];

        assert_eq!(e.copy_to(&mut buf), 3);
        assert_eq!(&buf, b"ban\0");
    }

    #[test]
    fn copy_to_exact_length_leaves_room_for_nul() {
        let e = Element::new(Some("abcd")).unwrap();
        let mut buf = [0xaau8; 4];

        assert_eq!(e.copy_to(&mut buf), 3);
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn copy_to_single_byte_buffer() {
        let e = Element::new(Some("abc")).unwrap();
        let mut buf = [0xaau8; 1];

        assert_eq!(e.copy_to(&mut buf), 0);
        assert_eq!(buf, [0]);
    }

    #[test]
    fn copy_to_zero_length_writes_nothing() {
        let e = Element::new(Some("abc")).unwrap();
        let mut buf: [u8; 0] = [];
        assert_eq!(e.copy_to(&mut buf), 0);
    }

    #[test]
    fn copy_to_absent_value_writes_nothing() {
        let e = Element::new(None).unwrap();
        let mut buf = [0xaau8; 4];

        assert_eq!(e.copy_to(&mut buf), 0);
        assert_eq!(buf, [0xaa; 4]);
    }

    #[test]
    fn interior_nul_is_kept_verbatim() {
        let e = Element::new(Some("ab\0cd")).unwrap();
        assert_eq!(e.value().map(str::len), Some(5));

        let mut buf = [0xaau8; 8];
        assert_eq!(e.copy_to(&mut buf), 5);
        assert_eq!(&buf, b"ab\0cd\0\0\0");
    }

    #[test]
    fn into_value_hands_back_buffer() {
        let e = Element::new(Some("kiwi")).unwrap();
        assert_eq!(e.into_value().as_deref(), Some("kiwi"));
    }
}
