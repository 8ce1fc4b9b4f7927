//! Collapsed placeholder rows.

use std::rc::{Rc, Weak};

use crate::block::CommentBlock;
use crate::error::PageError;
use crate::page::Page;

/// The placeholder row standing in for a hidden [`CommentBlock`].
///
/// Clicking it expands the block. Collapsing again only happens through
/// [`CommentBlock::hide`]; the placeholder is hidden once clicked so it
/// cannot be clicked a second time.
pub struct ToggleControl<P: Page> {
    page: Rc<P>,
    owner: Weak<CommentBlock<P>>,
    element: P::Element,
    listener: Option<P::Listener>,
}

impl<P: Page> ToggleControl<P> {
    pub fn element(&self) -> &P::Element {
        &self.element
    }

    pub fn is_bound(&self) -> bool {
        self.listener.is_some()
    }

    /// The block this placeholder expands, if it is still alive.
    pub fn owner(&self) -> Option<Rc<CommentBlock<P>>> {
        self.owner.upgrade()
    }

    pub fn show(&self) {
        self.page.set_hidden(&self.element, false);
    }

    pub fn hide(&self) {
        self.page.set_hidden(&self.element, true);
    }

    /// Drop the click handler, if any.
    pub fn unbind(&mut self) {
        self.listener = None;
    }

    /// Unbind and detach the row from the document.
    pub fn destroy(&mut self) {
        self.unbind();
        if self.page.contains(&self.element) {
            self.page.remove(&self.element);
        }
    }
}

impl<P: Page + 'static> ToggleControl<P> {
    /// Attach a placeholder directly before the block's first row.
    ///
    /// A placeholder already sitting in that position is adopted instead of
    /// inserting a duplicate.
    pub fn new(owner: &Rc<CommentBlock<P>>) -> Result<Self, PageError> {
        let page = Rc::clone(owner.page());
        let first_row = owner.start().row();

        let element = match page.placeholder_before(first_row) {
            Some(existing) => {
                tracing::trace!(start = owner.start().index(), "adopting existing placeholder");
                existing
            }
            None => {
                let element = page.create_placeholder(owner.start().index(), &owner.preview())?;
                page.set_hidden(&element, true);
                element
            }
        };

        if !page.contains(&element) {
            page.insert_before(&element, first_row)?;
        }

        let mut toggle = Self {
            page,
            owner: Rc::downgrade(owner),
            element,
            listener: None,
        };
        toggle.bind();
        Ok(toggle)
    }

    /// (Re)bind the click handler. Any previous handler is dropped first,
    /// so at most one is ever live.
    pub fn bind(&mut self) {
        self.unbind();

        let owner = self.owner.clone();
        let element = self.element.clone();
        let handler = move || {
            let Some(block) = owner.upgrade() else {
                return;
            };
            block.show();
            block.page().set_hidden(&element, true);
        };

        self.listener = Some(self.page.on_click(&self.element, Box::new(handler)));
    }
}
