//! Platform abstraction over the host page.
//!
//! The fold state machine only ever talks to the document through this
//! trait. The browser implementation lives in `commentfold-browser`; tests
//! use an in-memory page.

use std::fmt::Debug;

use crate::error::PageError;

/// One rendered line of code as found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine<E> {
    /// Text content of the line at scan time.
    pub text: String,
    /// The row shown or hidden for this line.
    pub row: E,
}

/// Document operations needed to fold comments.
///
/// Every method takes `&self`: implementations are handles onto a document
/// that is shared with click and mutation callbacks, so any mutable state
/// belongs behind interior mutability.
pub trait Page {
    /// Handle to an element in the document.
    type Element: Clone + PartialEq + Debug;

    /// Guard for a click subscription. Dropping it unbinds the handler.
    type Listener;

    /// Guard for a content-replacement subscription. Dropping it stops
    /// notifications.
    type Observer;

    /// All rendered code lines in document order. Placeholder rows are not
    /// code lines and are never returned.
    fn code_lines(&self) -> Vec<CodeLine<Self::Element>>;

    /// Suppress or restore display of an element.
    fn set_hidden(&self, element: &Self::Element, hidden: bool);

    /// Apply comment styling to a line's row.
    fn mark_comment(&self, row: &Self::Element);

    /// The row directly before `row`, if it is a placeholder row.
    fn placeholder_before(&self, row: &Self::Element) -> Option<Self::Element>;

    /// Create a detached placeholder row for a block starting at
    /// `position`, labelled with `preview`.
    fn create_placeholder(
        &self,
        position: usize,
        preview: &str,
    ) -> Result<Self::Element, PageError>;

    /// Insert `element` directly before `reference`.
    fn insert_before(
        &self,
        element: &Self::Element,
        reference: &Self::Element,
    ) -> Result<(), PageError>;

    /// Insert `element` directly after `reference`.
    fn insert_after(
        &self,
        element: &Self::Element,
        reference: &Self::Element,
    ) -> Result<(), PageError>;

    /// Whether `element` is attached to the document.
    fn contains(&self, element: &Self::Element) -> bool;

    /// Detach `element` from the document. Detached elements are ignored.
    fn remove(&self, element: &Self::Element);

    /// Zero-based index of the line addressed by the page location, if any.
    fn target_line(&self) -> Option<usize>;

    /// Whether a page-wide toggle button is already present.
    fn toggle_button_exists(&self) -> bool;

    /// The navigation element the page-wide button goes after.
    fn nav_anchor(&self) -> Option<Self::Element>;

    /// Create a detached page-wide toggle button.
    fn create_toggle_button(&self, label: &str) -> Result<Self::Element, PageError>;

    /// Call `handler` whenever `element` is clicked, until the returned
    /// guard is dropped.
    fn on_click(&self, element: &Self::Element, handler: Box<dyn FnMut()>) -> Self::Listener;

    /// Call `handler` whenever the host page replaces its content. Returns
    /// `None` when there is no content container to watch.
    fn observe_content(&self, handler: Box<dyn FnMut()>) -> Option<Self::Observer>;
}
