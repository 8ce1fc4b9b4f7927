//! In-memory [`Page`] for exercising the fold state machine natively.
//!
//! Models just enough of the host document: an ordered list of table rows
//! (code lines and placeholders), a navigation area holding the anchor and
//! any buttons, click handler registration, and a content container that
//! can be swapped out.

use std::cell::{Cell, RefCell};
use std::fmt::Write as _;
use std::rc::{Rc, Weak};

use crate::error::PageError;
use crate::page::{CodeLine, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Line { text: String },
    Placeholder { position: usize, preview: String },
    Anchor,
    Button { label: String },
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    hidden: bool,
    comment: bool,
}

#[derive(Default)]
struct Dom {
    nodes: Vec<Node>,
    /// Attached table rows in document order.
    rows: Vec<NodeId>,
    /// Attached navigation elements in document order.
    nav: Vec<NodeId>,
    target: Option<usize>,
}

impl Dom {
    fn create(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            hidden: false,
            comment: false,
        });
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn detach(&mut self, id: NodeId) {
        self.rows.retain(|&row| row != id);
        self.nav.retain(|&el| el != id);
    }
}

type Handler = Rc<RefCell<Box<dyn FnMut()>>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    clicks: Vec<(u64, NodeId, Handler)>,
    observers: Vec<(u64, Handler)>,
}

impl Registry {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove(&mut self, id: u64) {
        self.clicks.retain(|(listener, _, _)| *listener != id);
        self.observers.retain(|(observer, _)| *observer != id);
    }
}

/// Unbinds its handler when dropped.
pub struct MemoryListener {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.id);
        }
    }
}

pub struct MemoryPage {
    dom: RefCell<Dom>,
    registry: Rc<RefCell<Registry>>,
    has_container: Cell<bool>,
    fail_placeholders: Cell<bool>,
}

impl MemoryPage {
    /// A page showing `lines`, with navigation chrome and a content
    /// container.
    pub fn new(lines: &[&str]) -> Rc<Self> {
        let mut dom = Dom::default();
        let anchor = dom.create(NodeKind::Anchor);
        dom.nav.push(anchor);
        for text in lines {
            let row = dom.create(NodeKind::Line {
                text: text.to_string(),
            });
            dom.rows.push(row);
        }
        Rc::new(Self {
            dom: RefCell::new(dom),
            registry: Rc::new(RefCell::new(Registry::default())),
            has_container: Cell::new(true),
            fail_placeholders: Cell::new(false),
        })
    }

    pub fn set_target(&self, line: Option<usize>) {
        self.dom.borrow_mut().target = line;
    }

    pub fn remove_nav(&self) {
        let mut dom = self.dom.borrow_mut();
        let anchors: Vec<_> = dom
            .nav
            .iter()
            .copied()
            .filter(|&id| matches!(dom.node(id).kind, NodeKind::Anchor))
            .collect();
        for anchor in anchors {
            dom.detach(anchor);
        }
    }

    pub fn remove_container(&self) {
        self.has_container.set(false);
    }

    /// Make `create_placeholder` fail from now on.
    pub fn fail_placeholders(&self, fail: bool) {
        self.fail_placeholders.set(fail);
    }

    /// Swap all rows for fresh, unstyled `lines` and notify observers, as
    /// the host page does on in-page navigation.
    pub fn replace_content(&self, lines: &[&str]) {
        {
            let mut dom = self.dom.borrow_mut();
            dom.rows.clear();
            for text in lines {
                let row = dom.create(NodeKind::Line {
                    text: text.to_string(),
                });
                dom.rows.push(row);
            }
        }
        self.notify_content_replaced();
    }

    pub fn notify_content_replaced(&self) {
        if !self.has_container.get() {
            return;
        }
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .observers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            let mut handler = handler.borrow_mut();
            (*handler)();
        }
    }

    /// Fire every click handler bound to `element`.
    pub fn click(&self, element: NodeId) {
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .clicks
            .iter()
            .filter(|(_, target, _)| *target == element)
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            let mut handler = handler.borrow_mut();
            (*handler)();
        }
    }

    /// Insert a placeholder that did not come from a comment block.
    pub fn insert_placeholder_before(&self, line: usize, position: usize, preview: &str) -> NodeId {
        let reference = self.row(line);
        let mut dom = self.dom.borrow_mut();
        let id = dom.create(NodeKind::Placeholder {
            position,
            preview: preview.to_string(),
        });
        let at = dom
            .rows
            .iter()
            .position(|&row| row == reference)
            .expect("line row attached");
        dom.rows.insert(at, id);
        id
    }

    pub fn set_line_text(&self, line: usize, text: &str) {
        let row = self.row(line);
        if let NodeKind::Line { text: current } = &mut self.dom.borrow_mut().node_mut(row).kind {
            *current = text.to_string();
        }
    }

    /// Row of the `line`th attached code line.
    pub fn row(&self, line: usize) -> NodeId {
        let dom = self.dom.borrow();
        dom.rows
            .iter()
            .copied()
            .filter(|&id| matches!(dom.node(id).kind, NodeKind::Line { .. }))
            .nth(line)
            .expect("line exists")
    }

    pub fn is_hidden(&self, element: NodeId) -> bool {
        self.dom.borrow().node(element).hidden
    }

    pub fn line_hidden(&self, line: usize) -> bool {
        self.is_hidden(self.row(line))
    }

    pub fn line_is_comment(&self, line: usize) -> bool {
        self.dom.borrow().node(self.row(line)).comment
    }

    /// Attached placeholder rows in document order.
    pub fn placeholders(&self) -> Vec<NodeId> {
        let dom = self.dom.borrow();
        dom.rows
            .iter()
            .copied()
            .filter(|&id| matches!(dom.node(id).kind, NodeKind::Placeholder { .. }))
            .collect()
    }

    pub fn placeholder_position(&self, element: NodeId) -> Option<usize> {
        match self.dom.borrow().node(element).kind {
            NodeKind::Placeholder { position, .. } => Some(position),
            _ => None,
        }
    }

    pub fn placeholder_preview(&self, element: NodeId) -> Option<String> {
        match &self.dom.borrow().node(element).kind {
            NodeKind::Placeholder { preview, .. } => Some(preview.clone()),
            _ => None,
        }
    }

    /// Attached toggle buttons.
    pub fn buttons(&self) -> Vec<NodeId> {
        let dom = self.dom.borrow();
        dom.nav
            .iter()
            .copied()
            .filter(|&id| matches!(dom.node(id).kind, NodeKind::Button { .. }))
            .collect()
    }

    pub fn button_label(&self, element: NodeId) -> Option<String> {
        match &self.dom.borrow().node(element).kind {
            NodeKind::Button { label } => Some(label.clone()),
            _ => None,
        }
    }

    pub fn click_listener_count(&self) -> usize {
        self.registry.borrow().clicks.len()
    }

    pub fn observer_count(&self) -> usize {
        self.registry.borrow().observers.len()
    }

    /// One line per attached row: a state marker, then its text.
    ///
    /// Markers: `P` visible placeholder, `p` hidden placeholder, `H` hidden
    /// line, `C` visible comment line, `.` ordinary line.
    pub fn snapshot(&self) -> String {
        let dom = self.dom.borrow();
        let mut out = String::new();
        for &id in &dom.rows {
            let node = dom.node(id);
            let (marker, text) = match &node.kind {
                NodeKind::Placeholder { preview, .. } => {
                    (if node.hidden { 'p' } else { 'P' }, preview.as_str())
                }
                NodeKind::Line { text } => {
                    let marker = if node.hidden {
                        'H'
                    } else if node.comment {
                        'C'
                    } else {
                        '.'
                    };
                    (marker, text.as_str())
                }
                NodeKind::Anchor | NodeKind::Button { .. } => continue,
            };
            let _ = writeln!(out, "{marker}| {text}");
        }
        out
    }

    fn listener(&self, id: u64) -> MemoryListener {
        MemoryListener {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }
}

impl Page for MemoryPage {
    type Element = NodeId;
    type Listener = MemoryListener;
    type Observer = MemoryListener;

    fn code_lines(&self) -> Vec<CodeLine<NodeId>> {
        let dom = self.dom.borrow();
        dom.rows
            .iter()
            .filter_map(|&id| match &dom.node(id).kind {
                NodeKind::Line { text } => Some(CodeLine {
                    text: text.clone(),
                    row: id,
                }),
                _ => None,
            })
            .collect()
    }

    fn set_hidden(&self, element: &NodeId, hidden: bool) {
        self.dom.borrow_mut().node_mut(*element).hidden = hidden;
    }

    fn mark_comment(&self, row: &NodeId) {
        self.dom.borrow_mut().node_mut(*row).comment = true;
    }

    fn placeholder_before(&self, row: &NodeId) -> Option<NodeId> {
        let dom = self.dom.borrow();
        let at = dom.rows.iter().position(|id| id == row)?;
        let previous = *dom.rows.get(at.checked_sub(1)?)?;
        matches!(dom.node(previous).kind, NodeKind::Placeholder { .. }).then_some(previous)
    }

    fn create_placeholder(&self, position: usize, preview: &str) -> Result<NodeId, PageError> {
        if self.fail_placeholders.get() {
            return Err(PageError::Dom("createElement refused".into()));
        }
        Ok(self.dom.borrow_mut().create(NodeKind::Placeholder {
            position,
            preview: preview.to_string(),
        }))
    }

    fn insert_before(&self, element: &NodeId, reference: &NodeId) -> Result<(), PageError> {
        let mut dom = self.dom.borrow_mut();
        dom.detach(*element);
        let at = dom
            .rows
            .iter()
            .position(|id| id == reference)
            .ok_or(PageError::MissingParent)?;
        dom.rows.insert(at, *element);
        Ok(())
    }

    fn insert_after(&self, element: &NodeId, reference: &NodeId) -> Result<(), PageError> {
        let mut dom = self.dom.borrow_mut();
        dom.detach(*element);
        let at = dom
            .nav
            .iter()
            .position(|id| id == reference)
            .ok_or(PageError::MissingParent)?;
        dom.nav.insert(at + 1, *element);
        Ok(())
    }

    fn contains(&self, element: &NodeId) -> bool {
        let dom = self.dom.borrow();
        dom.rows.contains(element) || dom.nav.contains(element)
    }

    fn remove(&self, element: &NodeId) {
        self.dom.borrow_mut().detach(*element);
    }

    fn target_line(&self) -> Option<usize> {
        self.dom.borrow().target
    }

    fn toggle_button_exists(&self) -> bool {
        !self.buttons().is_empty()
    }

    fn nav_anchor(&self) -> Option<NodeId> {
        let dom = self.dom.borrow();
        dom.nav
            .iter()
            .copied()
            .find(|&id| matches!(dom.node(id).kind, NodeKind::Anchor))
    }

    fn create_toggle_button(&self, label: &str) -> Result<NodeId, PageError> {
        Ok(self.dom.borrow_mut().create(NodeKind::Button {
            label: label.to_string(),
        }))
    }

    fn on_click(&self, element: &NodeId, handler: Box<dyn FnMut()>) -> MemoryListener {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next();
        registry
            .clicks
            .push((id, *element, Rc::new(RefCell::new(handler))));
        drop(registry);
        self.listener(id)
    }

    fn observe_content(&self, handler: Box<dyn FnMut()>) -> Option<MemoryListener> {
        if !self.has_container.get() {
            return None;
        }
        let mut registry = self.registry.borrow_mut();
        let id = registry.next();
        registry.observers.push((id, Rc::new(RefCell::new(handler))));
        drop(registry);
        Some(self.listener(id))
    }
}
