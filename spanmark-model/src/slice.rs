//! Immutable views into a parent text

/// A contiguous piece of a parent text together with its character offsets.
///
/// `end - start` always equals the number of characters in [`TextSlice::text`],
/// and slices are only ever produced by cutting a single parent string, so the
/// offsets can be used directly as [`Span`](crate::Span) bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSlice<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl<'a> TextSlice<'a> {
    /// Create a slice for `text` starting at character offset `start`.
    pub fn new(text: &'a str, start: usize) -> Self {
        let end = start + crate::char_len(text);
        Self { text, start, end }
    }

    /// Create a slice whose character length is already known.
    pub(crate) fn from_parts(text: &'a str, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "slice start {start} past end {end}");
        debug_assert_eq!(end - start, crate::char_len(text));
        Self { text, start, end }
    }

    /// The sliced text
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Character offset of the first character in the parent text
    pub fn start(&self) -> usize {
        self.start
    }

    /// Character offset one past the last character in the parent text
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }

    /// True when the slice covers no characters
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the slice is empty or contains only whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl AsRef<str> for TextSlice<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_count_characters() {
        let slice = TextSlice::new("héllo 世界", 4);
        assert_eq!(slice.start(), 4);
        assert_eq!(slice.end(), 12);
        assert_eq!(slice.char_len(), 8);
        assert_ne!(slice.char_len(), slice.text().len());
    }

    #[test]
    fn test_blank_and_empty() {
        assert!(TextSlice::new("", 3).is_empty());
        assert!(TextSlice::new(" \t\n", 0).is_blank());
        assert!(!TextSlice::new(" \t\n", 0).is_empty());
        assert!(!TextSlice::new(" x ", 0).is_blank());
    }
}
