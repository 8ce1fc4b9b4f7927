//! The page-wide show/hide button.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::file::FileScanner;
use crate::page::Page;

/// Flips every block of a [`FileScanner`] between expanded and collapsed.
///
/// The button element is optional: when the navigation chrome is missing,
/// or a button is already present, nothing is inserted but the hidden flag
/// is still tracked and [`FileToggle::toggle`] still works.
pub struct FileToggle<P: Page> {
    page: Rc<P>,
    file: Rc<FileScanner<P>>,
    hidden: Cell<bool>,
    element: RefCell<Option<P::Element>>,
    listener: RefCell<Option<P::Listener>>,
}

impl<P: Page> FileToggle<P> {
    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn file(&self) -> &Rc<FileScanner<P>> {
        &self.file
    }

    /// The inserted button, if one was created.
    pub fn element(&self) -> Option<P::Element> {
        self.element.borrow().clone()
    }

    /// Switch to the opposite of the current state.
    pub fn toggle(&self) {
        if self.hidden.get() {
            self.show();
        } else {
            self.hide();
        }
    }

    /// Expand every block.
    pub fn show(&self) {
        self.hidden.set(false);
        self.file.show();
    }

    /// Collapse every block not holding the targeted line.
    pub fn hide(&self) {
        self.hidden.set(true);
        self.file.hide();
    }

    /// Unbind and detach the button. Safe to call twice.
    pub fn destroy(&self) {
        self.listener.take();
        if let Some(element) = self.element.take() {
            self.page.remove(&element);
        }
    }
}

impl<P: Page + 'static> FileToggle<P> {
    /// Create the toggle, inserting its button after the navigation anchor.
    ///
    /// Does not change any block's visibility; `hidden` only seeds the flag.
    pub fn new(page: Rc<P>, file: Rc<FileScanner<P>>, hidden: bool, label: &str) -> Rc<Self> {
        Rc::new_cyclic(|weak| {
            let toggle = Self {
                page,
                file,
                hidden: Cell::new(hidden),
                element: RefCell::new(None),
                listener: RefCell::new(None),
            };
            toggle.attach(weak.clone(), label);
            toggle
        })
    }

    fn attach(&self, weak: Weak<Self>, label: &str) {
        let Some(anchor) = self.page.nav_anchor() else {
            tracing::debug!("navigation chrome not found, skipping toggle button");
            return;
        };
        if self.page.toggle_button_exists() {
            tracing::debug!("toggle button already present");
            return;
        }

        let button = match self.page.create_toggle_button(label) {
            Ok(button) => button,
            Err(err) => {
                tracing::warn!(%err, "could not create toggle button");
                return;
            }
        };
        if let Err(err) = self.page.insert_after(&button, &anchor) {
            tracing::warn!(%err, "could not insert toggle button");
            return;
        }

        let listener = self.page.on_click(
            &button,
            Box::new(move || {
                if let Some(toggle) = weak.upgrade() {
                    toggle.toggle();
                }
            }),
        );
        *self.listener.borrow_mut() = Some(listener);
        *self.element.borrow_mut() = Some(button);
    }
}
