//! A single rendered line of code.

use crate::page::Page;

/// One scanned line: its position, its text at scan time, and the row the
/// visibility operations act on.
///
/// The text is captured once and never re-read from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineModel<E> {
    index: usize,
    text: String,
    row: E,
}

impl<E> LineModel<E> {
    pub fn new(index: usize, text: impl Into<String>, row: E) -> Self {
        Self {
            index,
            text: text.into(),
            row,
        }
    }

    /// Zero-based position among all scanned lines.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn row(&self) -> &E {
        &self.row
    }

    /// Apply comment styling. Visibility is unchanged.
    pub fn render<P: Page<Element = E>>(&self, page: &P) {
        page.mark_comment(&self.row);
    }

    pub fn show<P: Page<Element = E>>(&self, page: &P) {
        page.set_hidden(&self.row, false);
    }

    pub fn hide<P: Page<Element = E>>(&self, page: &P) {
        page.set_hidden(&self.row, true);
    }
}
