//! [`Page`] over the live document.

use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Node};

use commentfold_core::{CodeLine, Page, PageError, PageSelectors, parse_line_fragment};

use crate::observer::ContentObserver;

/// Convert a thrown JS value into a [`PageError`].
pub(crate) fn js_error(err: JsValue) -> PageError {
    match err.as_string() {
        Some(message) => PageError::Dom(message),
        None => PageError::Dom(format!("{err:?}")),
    }
}

/// Handle onto the current document, configured with the host page's
/// class names and selectors.
#[derive(Debug, Clone)]
pub struct BrowserPage {
    document: Document,
    selectors: PageSelectors,
}

impl BrowserPage {
    /// Attach to the window's document.
    pub fn new(selectors: PageSelectors) -> Result<Self, PageError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(PageError::Dom("no document available".into()))?;
        Ok(Self::with_document(document, selectors))
    }

    pub fn with_document(document: Document, selectors: PageSelectors) -> Self {
        Self {
            document,
            selectors,
        }
    }

    fn create(&self, tag: &str, class: &str) -> Result<Element, PageError> {
        let element = self.document.create_element(tag).map_err(js_error)?;
        element.set_class_name(class);
        Ok(element)
    }

    /// Rows skipped when reading code lines. Host hunk rows carry the
    /// class without the marker attribute and are skipped too.
    fn is_placeholder(&self, row: &Element) -> bool {
        row.has_attribute(&self.selectors.placeholder_attr)
            || row
                .class_list()
                .contains(&self.selectors.placeholder_class)
    }
}

impl Page for BrowserPage {
    type Element = Element;
    type Listener = EventListener;
    type Observer = ContentObserver;

    fn code_lines(&self) -> Vec<CodeLine<Element>> {
        let cells = self
            .document
            .get_elements_by_class_name(&self.selectors.line_class);

        let mut lines = Vec::with_capacity(cells.length() as usize);
        for i in 0..cells.length() {
            let Some(cell) = cells.item(i) else {
                continue;
            };
            let Some(row) = cell.parent_element() else {
                continue;
            };
            // Hunk cells in placeholder rows share the line class.
            if self.is_placeholder(&row) {
                continue;
            }
            lines.push(CodeLine {
                text: cell.text_content().unwrap_or_default(),
                row,
            });
        }
        lines
    }

    fn set_hidden(&self, element: &Element, hidden: bool) {
        let Some(element) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = element.style();
        let result = if hidden {
            style.set_property("display", "none")
        } else {
            style.remove_property("display").map(|_| ())
        };
        if let Err(err) = result {
            tracing::trace!(err = ?err, "could not change element display");
        }
    }

    fn mark_comment(&self, row: &Element) {
        if let Err(err) = row.class_list().add_1(&self.selectors.comment_class) {
            tracing::trace!(err = ?err, "could not mark comment row");
        }
    }

    fn placeholder_before(&self, row: &Element) -> Option<Element> {
        // Only rows carrying the marker attribute are ours to adopt.
        row.previous_element_sibling()
            .filter(|prev| prev.has_attribute(&self.selectors.placeholder_attr))
    }

    fn create_placeholder(&self, position: usize, preview: &str) -> Result<Element, PageError> {
        let row = self.create("tr", &self.selectors.placeholder_class)?;
        row.set_attribute(&self.selectors.placeholder_attr, &position.to_string())
            .map_err(js_error)?;

        let num = self.create("td", "blob-num blob-num-expandable")?;
        let expander = self.create("a", "diff-expander js-expand")?;
        expander.set_attribute("title", "Expand").map_err(js_error)?;
        expander
            .set_attribute("aria-label", "Expand")
            .map_err(js_error)?;
        let icon = self.create("span", "octicon octicon-unfold")?;
        expander.append_child(&icon).map_err(js_error)?;
        num.append_child(&expander).map_err(js_error)?;

        let hunk = self.create("td", "blob-code blob-code-hunk")?;
        hunk.set_text_content(Some(preview));

        row.append_child(&num).map_err(js_error)?;
        row.append_child(&hunk).map_err(js_error)?;
        Ok(row)
    }

    fn insert_before(&self, element: &Element, reference: &Element) -> Result<(), PageError> {
        if !self.contains(reference) {
            return Err(PageError::Detached);
        }
        let parent = reference.parent_node().ok_or(PageError::MissingParent)?;
        let reference: &Node = reference;
        parent
            .insert_before(element, Some(reference))
            .map_err(js_error)?;
        Ok(())
    }

    fn insert_after(&self, element: &Element, reference: &Element) -> Result<(), PageError> {
        if !self.contains(reference) {
            return Err(PageError::Detached);
        }
        let parent = reference.parent_node().ok_or(PageError::MissingParent)?;
        parent
            .insert_before(element, reference.next_sibling().as_ref())
            .map_err(js_error)?;
        Ok(())
    }

    fn contains(&self, element: &Element) -> bool {
        let node: &Node = element;
        self.document.contains(Some(node))
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn target_line(&self) -> Option<usize> {
        let hash = self.document.location()?.hash().ok()?;
        parse_line_fragment(&hash)
    }

    fn toggle_button_exists(&self) -> bool {
        self.document
            .get_elements_by_class_name(&self.selectors.button_class)
            .length()
            > 0
    }

    fn nav_anchor(&self) -> Option<Element> {
        self.document
            .query_selector(&self.selectors.nav_selector)
            .ok()
            .flatten()
    }

    fn create_toggle_button(&self, label: &str) -> Result<Element, PageError> {
        let class = format!("{} minibutton right", self.selectors.button_class);
        let button = self.create("a", &class)?;
        if let Some(html) = button.dyn_ref::<HtmlElement>() {
            html.style()
                .set_property("margin-right", "8px")
                .map_err(js_error)?;
        }
        button.set_text_content(Some(label));
        Ok(button)
    }

    fn on_click(&self, element: &Element, mut handler: Box<dyn FnMut()>) -> EventListener {
        EventListener::new(element, "click", move |_event| handler())
    }

    fn observe_content(&self, handler: Box<dyn FnMut()>) -> Option<ContentObserver> {
        let container = self
            .document
            .get_element_by_id(&self.selectors.container_id)?;
        match ContentObserver::observe(&container, handler) {
            Ok(observer) => Some(observer),
            Err(err) => {
                tracing::warn!(%err, "could not observe content container");
                None
            }
        }
    }
}
