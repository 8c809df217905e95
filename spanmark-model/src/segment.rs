//! Offset-preserving paragraph and line segmentation
//!
//! Both splitters walk the text once and record character offsets as they
//! go, so every returned [`TextSlice`] points back into the parent string.
//!
//! - [`split_paragraphs`] keeps each paragraph's trailing newline, so
//!   concatenating all slices (with `remove_empty = false`) gives back the
//!   original text with no separator at all.
//! - [`split_lines`] drops the newline separators. With
//!   [`LineSplit::Verbatim`] joining the slices with `"\n"` restores the text;
//!   with [`LineSplit::CollapseBlank`] the gaps between consecutive slices are
//!   runs of newlines.

use crate::TextSlice;

/// How [`split_lines`] treats consecutive newlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSplit {
    /// One line per `\n`; blank lines survive as empty slices and a trailing
    /// newline yields a final empty line.
    #[default]
    Verbatim,
    /// A run of one or more newlines is a single separator, so blank lines
    /// disappear. Leading and trailing runs still produce one empty line.
    CollapseBlank,
}

/// Split `text` into paragraphs.
///
/// A paragraph is any run of non-newline characters followed by a newline,
/// or a non-empty run at the very end of the text. The newline belongs to the
/// paragraph it terminates. When `remove_empty` is set, paragraphs containing
/// only whitespace are dropped; the offsets of the survivors are unchanged.
pub fn split_paragraphs(text: &str, remove_empty: bool) -> Vec<TextSlice<'_>> {
    let mut paragraphs = Vec::new();
    let mut byte_start = 0;
    let mut char_start = 0;
    let mut char_pos = 0;

    for (idx, ch) in text.char_indices() {
        char_pos += 1;
        if ch == '\n' {
            paragraphs.push(TextSlice::from_parts(
                &text[byte_start..=idx],
                char_start,
                char_pos,
            ));
            byte_start = idx + 1;
            char_start = char_pos;
        }
    }

    if byte_start < text.len() {
        paragraphs.push(TextSlice::from_parts(
            &text[byte_start..],
            char_start,
            char_pos,
        ));
    }

    if remove_empty {
        paragraphs.retain(|paragraph| !paragraph.is_blank());
    }

    paragraphs
}

/// Split `text` into lines without their newline separators.
///
/// Always returns at least one slice: the empty text is a single empty line.
pub fn split_lines(text: &str, policy: LineSplit) -> Vec<TextSlice<'_>> {
    let mut lines = Vec::new();
    let mut byte_start = 0;
    let mut char_start = 0;
    let mut char_pos = 0;
    let mut in_newline_run = false;

    for (idx, ch) in text.char_indices() {
        if ch == '\n' {
            let collapsed = in_newline_run && policy == LineSplit::CollapseBlank;
            if !collapsed {
                lines.push(TextSlice::from_parts(
                    &text[byte_start..idx],
                    char_start,
                    char_pos,
                ));
            }
            in_newline_run = true;
            byte_start = idx + 1;
            char_start = char_pos + 1;
        } else {
            in_newline_run = false;
        }
        char_pos += 1;
    }

    lines.push(TextSlice::from_parts(
        &text[byte_start..],
        char_start,
        char_pos,
    ));
    lines
}
