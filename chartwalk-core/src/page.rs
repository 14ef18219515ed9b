//! Cursor and page arithmetic.
//!
//! There is no stored page: the visible window is always derived from the
//! cursor and the fixed page size.

/// Number of rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// The window of a list that is visible for a given cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page number
    pub index: usize,
    /// First visible absolute index
    pub start: usize,
    /// One past the last visible absolute index
    pub end: usize,
    /// Total number of pages (0 for an empty list)
    pub count: usize,
}

impl Page {
    pub fn for_cursor(cursor: usize, len: usize) -> Self {
        let index = cursor / PAGE_SIZE;
        let start = index * PAGE_SIZE;
        Self {
            index,
            start,
            end: (start + PAGE_SIZE).min(len),
            count: len.div_ceil(PAGE_SIZE),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn cursor_up(cursor: usize) -> usize {
    cursor.saturating_sub(1)
}

pub fn cursor_down(cursor: usize, len: usize) -> usize {
    if cursor + 1 < len { cursor + 1 } else { cursor.min(len.saturating_sub(1)) }
}

/// Resolves a page-relative digit shortcut to an absolute index.
///
/// `1`..`9` address the first nine rows of the current page and `0` the
/// tenth. Returns `None` for anything past the end of the list.
pub fn shortcut_index(digit: u8, cursor: usize, len: usize) -> Option<usize> {
    let slot = match digit {
        0 => 9,
        1..=9 => usize::from(digit) - 1,
        _ => return None,
    };
    let index = Page::for_cursor(cursor, len).start + slot;
    (index < len).then_some(index)
}
