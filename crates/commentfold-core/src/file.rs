//! Scanning the rendered file into lines and comment blocks.

use std::cell::RefCell;
use std::rc::Rc;

use crate::block::CommentBlock;
use crate::line::LineModel;
use crate::page::{CodeLine, Page};
use crate::segment::Segmenter;

/// All lines and block comments of one generation of page content.
///
/// A scanner is never updated incrementally. When the page swaps its
/// content the old scanner is destroyed and a new one built.
pub struct FileScanner<P: Page> {
    page: Rc<P>,
    lines: RefCell<Rc<[LineModel<P::Element>]>>,
    comments: RefCell<Vec<Rc<CommentBlock<P>>>>,
}

impl<P: Page> FileScanner<P> {
    /// Read every code line from the page and segment it into blocks,
    /// without touching the page.
    pub fn parse(page: Rc<P>) -> Self {
        let mut segmenter = Segmenter::new();
        let mut lines = Vec::new();
        let mut spans = Vec::new();

        for (index, CodeLine { text, row }) in page.code_lines().into_iter().enumerate() {
            if let Some(span) = segmenter.feed(&text) {
                spans.push(span);
            }
            lines.push(LineModel::new(index, text, row));
        }
        segmenter.finish();

        let lines: Rc<[LineModel<P::Element>]> = lines.into();
        let comments: Vec<_> = spans
            .into_iter()
            .map(|span| CommentBlock::new(Rc::clone(&page), Rc::clone(&lines), span))
            .collect();

        tracing::debug!(
            lines = lines.len(),
            comments = comments.len(),
            "parsed file"
        );

        Self {
            page,
            lines: RefCell::new(lines),
            comments: RefCell::new(comments),
        }
    }

    pub fn lines(&self) -> Rc<[LineModel<P::Element>]> {
        Rc::clone(&self.lines.borrow())
    }

    pub fn comments(&self) -> Vec<Rc<CommentBlock<P>>> {
        self.comments.borrow().clone()
    }

    /// Expand every block.
    pub fn show(&self) {
        for comment in self.comments.borrow().iter() {
            comment.show();
        }
    }

    /// Collapse every block, except one strictly containing the line the
    /// page location points at, which is expanded instead.
    pub fn hide(&self) {
        let target = self.page.target_line();
        for comment in self.comments.borrow().iter() {
            if target.is_some_and(|line| comment.contains_strictly(line)) {
                tracing::trace!(span = ?comment.span(), ?target, "keeping targeted comment open");
                comment.show();
            } else {
                comment.hide();
            }
        }
    }

    /// Detach every placeholder and release all lines. Safe to call twice.
    pub fn destroy(&self) {
        for comment in self.comments.take() {
            comment.destroy();
        }
        *self.lines.borrow_mut() = Rc::from(Vec::new());
    }
}

impl<P: Page + 'static> FileScanner<P> {
    /// Parse the page and render every block collapsed.
    pub fn new(page: Rc<P>) -> Self {
        let file = Self::parse(page);
        file.render();
        file
    }

    /// Render every block. Rendering again reuses existing placeholders.
    pub fn render(&self) {
        for comment in self.comments.borrow().iter() {
            comment.render();
        }
    }
}
