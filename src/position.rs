//! Turning byte offsets into line and column numbers.
//!
//! Validation only records byte offsets. Finding the line of an offset means scanning the text up
//! to it, which most callers never need, so it happens in a separate pass over a whole batch of
//! errors at once.

use std::fmt;

use crate::ValidationError;

/// A 1-based line and column in the input.
///
/// Columns count bytes, the same unit [`ValidationError::offset`] is measured in. Only `\n` starts
/// a new line, so `\r\n` counts as one line break.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextPos {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl TextPos {
    /// Compute the position of a single byte offset.
    ///
    /// ```
    /// use htmlcheck::TextPos;
    ///
    /// assert_eq!(TextPos::of("<b>\n<i>", 5), TextPos { line: 2, column: 2 });
    /// ```
    #[must_use]
    pub fn of(text: impl AsRef<[u8]>, offset: usize) -> TextPos {
        let text = text.as_ref();
        let mut counter = LineCounter::default();
        counter.advance_to(text, offset)
    }
}

impl fmt::Display for TextPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Scans text front to back, remembering how far it got.
#[derive(Debug)]
struct LineCounter {
    scanned: usize,
    line: usize,
    line_start: usize,
}

impl Default for LineCounter {
    fn default() -> Self {
        LineCounter {
            scanned: 0,
            line: 1,
            line_start: 0,
        }
    }
}

impl LineCounter {
    /// Count the line breaks before `offset`. Offsets must not decrease between calls.
    fn advance_to(&mut self, text: &[u8], offset: usize) -> TextPos {
        let offset = offset.min(text.len());
        debug_assert!(offset >= self.scanned);

        for (i, &b) in text[self.scanned..offset].iter().enumerate() {
            if b == b'\n' {
                self.line += 1;
                self.line_start = self.scanned + i + 1;
            }
        }
        self.scanned = offset;

        TextPos {
            line: self.line,
            column: offset - self.line_start + 1,
        }
    }
}

/// Fill in [`ValidationError::text_pos`] for a batch of errors.
///
/// `text` has to be the input the errors were produced from. The errors may come in any order, the
/// text is still scanned only once. Offsets past the end of the text resolve to the end of the
/// text. Running this again on the same errors produces the same positions.
///
/// ```
/// use htmlcheck::{resolve_positions, TagRule, TextPos, Validator};
///
/// let mut validator = Validator::new();
/// validator.add_valid_tag(TagRule::new("b")).unwrap();
///
/// let html = "<b></b>\n<b></b>\n<b kkk='kkk'></b>";
/// let mut errors = validator.validate(html);
/// resolve_positions(html, &mut errors);
/// assert_eq!(errors[0].text_pos, Some(TextPos { line: 3, column: 2 }));
/// ```
pub fn resolve_positions(text: impl AsRef<[u8]>, errors: &mut [ValidationError]) {
    let text = text.as_ref();
    let mut order: Vec<usize> = (0..errors.len()).collect();
    order.sort_by_key(|&i| errors[i].offset);

    let mut counter = LineCounter::default();
    for i in order {
        let pos = counter.advance_to(text, errors[i].offset);
        errors[i].text_pos = Some(pos);
    }
}
