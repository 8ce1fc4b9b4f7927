//! Grouping of consecutive lines into block comments.
//!
//! Segmentation is a three-state machine fed one line at a time. Blocks do
//! not nest: while inside a block, further openers are ordinary content
//! until a closer is seen. A block still open when input ends is dropped,
//! since hiding it would hide whatever code follows the stray opener.

use std::ops::RangeInclusive;

use crate::patterns::{closes_on_opening_line, is_block_end, is_block_start};

/// Position of the segmenter relative to block comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Not inside a block.
    #[default]
    Outside,
    /// Inside a block opened at line `start`.
    InBlock { start: usize },
    /// The previous line closed a block.
    JustClosed,
}

/// Incremental block comment recognizer.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    state: ScanState,
    next_index: usize,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Number of lines fed so far.
    pub fn lines_seen(&self) -> usize {
        self.next_index
    }

    /// Feed the next line. Returns the inclusive index range of a block if
    /// this line closed one.
    pub fn feed(&mut self, text: &str) -> Option<RangeInclusive<usize>> {
        let index = self.next_index;
        self.next_index += 1;

        match self.state {
            ScanState::Outside | ScanState::JustClosed => {
                if !is_block_start(text) {
                    self.state = ScanState::Outside;
                    return None;
                }
                if closes_on_opening_line(text) {
                    self.state = ScanState::JustClosed;
                    return Some(index..=index);
                }
                self.state = ScanState::InBlock { start: index };
                None
            }
            ScanState::InBlock { start } => {
                if is_block_end(text) {
                    self.state = ScanState::JustClosed;
                    Some(start..=index)
                } else {
                    None
                }
            }
        }
    }

    /// End of input. Returns the start of a block that never closed, which
    /// is discarded.
    pub fn finish(self) -> Option<usize> {
        match self.state {
            ScanState::InBlock { start } => {
                tracing::debug!(start, "discarding unterminated block comment");
                Some(start)
            }
            ScanState::Outside | ScanState::JustClosed => None,
        }
    }
}

/// Segment a whole sequence of lines into block comment ranges.
///
/// The result is ordered, non-overlapping, and every range is contiguous.
pub fn segment<'a, I>(lines: I) -> Vec<RangeInclusive<usize>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut segmenter = Segmenter::new();
    let blocks = lines
        .into_iter()
        .filter_map(|text| segmenter.feed(text))
        .collect();
    segmenter.finish();
    blocks
}
