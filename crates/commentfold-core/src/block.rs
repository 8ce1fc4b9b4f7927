//! Block comments and their fold state.

use std::cell::RefCell;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

use crate::line::LineModel;
use crate::page::Page;
use crate::patterns::clean_excerpt;
use crate::toggle::ToggleControl;

/// A run of contiguous lines recognized as one block comment.
///
/// The lines themselves belong to the scanner; a block only records which
/// of them it covers. The block owns its [`ToggleControl`], which points
/// back at the block without keeping it alive.
///
/// `show` and `hide` assert an absolute state, so calling either any number
/// of times in any order is safe.
pub struct CommentBlock<P: Page> {
    page: Rc<P>,
    lines: Rc<[LineModel<P::Element>]>,
    span: RangeInclusive<usize>,
    toggle: RefCell<Option<ToggleControl<P>>>,
}

impl<P: Page> fmt::Debug for CommentBlock<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentBlock")
            .field("span", &self.span)
            .field("rendered", &self.is_rendered())
            .finish()
    }
}

impl<P: Page> CommentBlock<P> {
    /// Create a block covering `span` of the scanner's `lines`.
    pub fn new(
        page: Rc<P>,
        lines: Rc<[LineModel<P::Element>]>,
        span: RangeInclusive<usize>,
    ) -> Rc<Self> {
        debug_assert!(span.start() <= span.end(), "empty block span {span:?}");
        debug_assert!(*span.end() < lines.len(), "block span {span:?} out of bounds");
        Rc::new(Self {
            page,
            lines,
            span,
            toggle: RefCell::new(None),
        })
    }

    pub fn page(&self) -> &Rc<P> {
        &self.page
    }

    /// The lines covered by this block, in order.
    pub fn lines(&self) -> &[LineModel<P::Element>] {
        &self.lines[self.span.clone()]
    }

    pub fn start(&self) -> &LineModel<P::Element> {
        &self.lines[*self.span.start()]
    }

    pub fn end(&self) -> &LineModel<P::Element> {
        &self.lines[*self.span.end()]
    }

    pub fn span(&self) -> RangeInclusive<usize> {
        self.span.clone()
    }

    pub fn len(&self) -> usize {
        self.span.end() - self.span.start() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `line` falls strictly between the first and last line.
    pub fn contains_strictly(&self, line: usize) -> bool {
        *self.span.start() < line && line < *self.span.end()
    }

    /// Placeholder label: the 1-based line range and an excerpt of the
    /// second line, or the first when the block is a single line.
    pub fn preview(&self) -> String {
        let lines = self.lines();
        let source = lines.get(1).unwrap_or(&lines[0]);
        let label = format!(
            "@@ {}-{} @@ {}",
            self.start().index() + 1,
            self.end().index() + 1,
            clean_excerpt(source.text())
        );
        label.trim_end().to_string()
    }

    /// Whether a toggle has been attached.
    pub fn is_rendered(&self) -> bool {
        self.toggle.borrow().is_some()
    }

    /// The placeholder row, once rendered.
    pub fn toggle_element(&self) -> Option<P::Element> {
        self.toggle
            .borrow()
            .as_ref()
            .map(|toggle| toggle.element().clone())
    }

    /// Reveal every line with comment styling and hide the placeholder.
    pub fn show(&self) {
        for line in self.lines() {
            line.show(&*self.page);
            line.render(&*self.page);
        }
        if let Some(toggle) = self.toggle.borrow().as_ref() {
            toggle.hide();
        }
    }

    /// Hide every line and show the placeholder.
    ///
    /// Without a placeholder there would be no way to expand the block
    /// again, so an unrendered block stays as it is.
    pub fn hide(&self) {
        let toggle = self.toggle.borrow();
        let Some(toggle) = toggle.as_ref() else {
            tracing::trace!(span = ?self.span, "hide on unrendered block ignored");
            return;
        };
        for line in self.lines() {
            line.hide(&*self.page);
        }
        toggle.show();
    }

    /// Detach the placeholder and its click handler. Safe to call twice.
    pub fn destroy(&self) {
        if let Some(mut toggle) = self.toggle.borrow_mut().take() {
            toggle.destroy();
        }
    }
}

impl<P: Page + 'static> CommentBlock<P> {
    /// Style the lines, attach the placeholder and collapse the block.
    ///
    /// Rendering an already rendered block rebinds its existing placeholder
    /// instead of creating another one. If the placeholder cannot be
    /// created the lines stay visible as ordinary code.
    pub fn render(self: &Rc<Self>) {
        for line in self.lines() {
            line.render(&*self.page);
        }

        {
            let mut slot = self.toggle.borrow_mut();
            match slot.as_mut() {
                Some(toggle) => toggle.bind(),
                None => match ToggleControl::new(self) {
                    Ok(toggle) => *slot = Some(toggle),
                    Err(err) => {
                        tracing::warn!(span = ?self.span, %err, "could not attach comment toggle");
                        return;
                    }
                },
            }
        }

        self.hide();
    }
}
