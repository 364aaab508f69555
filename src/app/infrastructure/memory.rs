//! In-memory document and manual clock.
//!
//! `MemoryDom` models the parts of a browser document the controllers use:
//! an element tree with classes, attributes and inline styles, listeners
//! on elements, the document and the window, and click dispatch that
//! bubbles from the target to the root and then to the document, honoring
//! `stopPropagation` between elements. `ManualScheduler` runs delayed tasks
//! only when the test advances its clock.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::dom::{Dom, DomEvent, EventKind, Handler, ListenTarget, Scheduler};
use super::error::{Result, UiError};
use super::selector::{SelectorList, SelectorTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const HTML: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

type SharedHandler = Rc<RefCell<Handler<MemoryEvent>>>;

struct ListenerEntry {
    id: u64,
    target: ListenTarget<NodeId>,
    kind: EventKind,
    handler: SharedHandler,
}

struct Document {
    nodes: Vec<NodeData>,
    listeners: Vec<ListenerEntry>,
    next_listener: u64,
    viewport_width: f64,
    scroll_offset: f64,
}

impl SelectorTree for Document {
    fn tag(&self, node: usize) -> &str {
        &self.nodes[node].tag
    }

    fn has_class(&self, node: usize, class: &str) -> bool {
        self.nodes[node].classes.iter().any(|c| c == class)
    }

    fn has_attribute(&self, node: usize, name: &str) -> bool {
        self.nodes[node].attributes.contains_key(name)
    }

    fn parent(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent.map(|p| p.0)
    }
}

impl Document {
    /// Preorder walk below `root`, excluding `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    fn handlers_for(&self, target: &ListenTarget<NodeId>, kind: EventKind) -> Vec<SharedHandler> {
        self.listeners
            .iter()
            .filter(|l| l.kind == kind && &l.target == target)
            .map(|l| l.handler.clone())
            .collect()
    }
}

#[derive(Debug)]
pub struct MemoryEvent {
    target: Option<NodeId>,
    stopped: Cell<bool>,
    prevented: Cell<bool>,
}

impl MemoryEvent {
    fn new(target: Option<NodeId>) -> Self {
        Self {
            target,
            stopped: Cell::new(false),
            prevented: Cell::new(false),
        }
    }
}

impl DomEvent for MemoryEvent {
    type Node = NodeId;

    fn target(&self) -> Option<NodeId> {
        self.target
    }

    fn stop_propagation(&self) {
        self.stopped.set(true);
    }

    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

/// Result of a simulated click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    pub default_prevented: bool,
    pub reached_document: bool,
}

/// Unregisters its listener from the owning document on drop.
pub struct MemoryListener {
    document: Weak<RefCell<Document>>,
    id: u64,
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        if let Some(document) = self.document.upgrade()
            && let Ok(mut doc) = document.try_borrow_mut()
        {
            doc.listeners.retain(|l| l.id != self.id);
        }
    }
}

#[derive(Clone)]
pub struct MemoryDom {
    inner: Rc<RefCell<Document>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty `<html><body></body></html>` with a 1280px desktop viewport.
    pub fn new() -> Self {
        let html = NodeData {
            tag: "html".to_string(),
            children: vec![BODY],
            ..Default::default()
        };
        let body = NodeData {
            tag: "body".to_string(),
            parent: Some(HTML),
            ..Default::default()
        };
        Self {
            inner: Rc::new(RefCell::new(Document {
                nodes: vec![html, body],
                listeners: Vec::new(),
                next_listener: 1,
                viewport_width: 1280.0,
                scroll_offset: 0.0,
            })),
        }
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    /// Appends a new `<tag class="...">` under `parent`.
    pub fn element(&self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let mut doc = self.inner.borrow_mut();
        let id = NodeId(doc.nodes.len());
        doc.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            parent: Some(parent),
            ..Default::default()
        });
        doc.nodes[parent.0].children.push(id);
        id
    }

    pub fn set_text(&self, node: NodeId, text: &str) {
        self.inner.borrow_mut().nodes[node.0].text = text.to_string();
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.inner.borrow().nodes[node.0].tag.clone()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.borrow().nodes[node.0].children.clone()
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.inner.borrow_mut().viewport_width = width;
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Dispatches a bubbling click at `target`.
    pub fn click(&self, target: NodeId) -> ClickOutcome {
        let event = MemoryEvent::new(Some(target));
        let mut path = Vec::new();
        {
            let doc = self.inner.borrow();
            let mut cursor = Some(target);
            while let Some(node) = cursor {
                path.push(node);
                cursor = doc.nodes[node.0].parent;
            }
        }

        for node in path {
            if self.fire(&ListenTarget::Node(node), EventKind::Click, &event) {
                return ClickOutcome {
                    default_prevented: event.prevented.get(),
                    reached_document: false,
                };
            }
        }
        self.fire(&ListenTarget::Document, EventKind::Click, &event);
        ClickOutcome {
            default_prevented: event.prevented.get(),
            reached_document: true,
        }
    }

    /// Moves the vertical scroll position and fires `scroll` on the window.
    pub fn scroll_to(&self, offset: f64) {
        self.inner.borrow_mut().scroll_offset = offset;
        self.fire(&ListenTarget::Window, EventKind::Scroll, &MemoryEvent::new(None));
    }

    /// Changes the viewport width and fires `resize` on the window.
    pub fn resize(&self, width: f64) {
        self.inner.borrow_mut().viewport_width = width;
        self.fire(&ListenTarget::Window, EventKind::Resize, &MemoryEvent::new(None));
    }

    /// Runs every handler registered on `target`, in registration order.
    /// Returns whether propagation was stopped.
    fn fire(&self, target: &ListenTarget<NodeId>, kind: EventKind, event: &MemoryEvent) -> bool {
        let handlers = self.inner.borrow().handlers_for(target, kind);
        for handler in handlers {
            (handler.borrow_mut())(event);
        }
        event.stopped.get()
    }

    fn with_node<T>(&self, node: &NodeId, f: impl FnOnce(&NodeData) -> T) -> T {
        f(&self.inner.borrow().nodes[node.0])
    }

    fn with_node_mut<T>(&self, node: &NodeId, f: impl FnOnce(&mut NodeData) -> T) -> T {
        f(&mut self.inner.borrow_mut().nodes[node.0])
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;
    type Event = MemoryEvent;
    type Listener = MemoryListener;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_within(&HTML, selector)
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        let Some(list) = SelectorList::parse(selector) else {
            return Vec::new();
        };
        let doc = self.inner.borrow();
        doc.descendants(*scope)
            .into_iter()
            .filter(|n| list.matches(&*doc, n.0))
            .collect()
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn next_sibling_with_class(&self, node: &NodeId, class: &str) -> Option<NodeId> {
        let doc = self.inner.borrow();
        let parent = doc.nodes[node.0].parent?;
        let siblings = &doc.nodes[parent.0].children;
        let position = siblings.iter().position(|s| s == node)?;
        siblings[position + 1..]
            .iter()
            .copied()
            .find(|s| doc.has_class(s.0, class))
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let doc = self.inner.borrow();
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if current == *ancestor {
                return true;
            }
            cursor = doc.nodes[current.0].parent;
        }
        false
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.inner.borrow().has_class(node.0, class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_node_mut(node, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_node_mut(node, |n| n.classes.retain(|c| c != class));
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.with_node(node, |n| n.styles.get(property).cloned())
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_node_mut(node, |n| {
            if value.is_empty() {
                n.styles.remove(property);
            } else {
                n.styles.insert(property.to_string(), value.to_string());
            }
        });
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.with_node(node, |n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<()> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(UiError::Dom(format!("invalid attribute name `{name}`")));
        }
        self.with_node_mut(node, |n| {
            n.attributes
                .insert(name.to_ascii_lowercase(), value.to_string())
        });
        Ok(())
    }

    fn text_content(&self, node: &NodeId) -> String {
        let doc = self.inner.borrow();
        let mut text = doc.nodes[node.0].text.clone();
        for child in doc.descendants(*node) {
            text.push_str(&doc.nodes[child.0].text);
        }
        text
    }

    fn create_element(&self, tag: &str) -> Result<NodeId> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(UiError::Dom(format!("invalid tag name `{tag}`")));
        }
        let mut doc = self.inner.borrow_mut();
        let id = NodeId(doc.nodes.len());
        doc.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        });
        Ok(id)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        if self.contains(child, parent) {
            return Err(UiError::Dom("append would create a cycle".to_string()));
        }
        let mut doc = self.inner.borrow_mut();
        if let Some(old) = doc.nodes[child.0].parent.take() {
            doc.nodes[old.0].children.retain(|c| c != child);
        }
        doc.nodes[child.0].parent = Some(*parent);
        doc.nodes[parent.0].children.push(*child);
        Ok(())
    }

    fn viewport_width(&self) -> f64 {
        self.inner.borrow().viewport_width
    }

    fn scroll_offset(&self) -> f64 {
        self.inner.borrow().scroll_offset
    }

    fn listen(
        &self,
        target: ListenTarget<NodeId>,
        kind: EventKind,
        handler: Handler<MemoryEvent>,
    ) -> MemoryListener {
        let mut doc = self.inner.borrow_mut();
        let id = doc.next_listener;
        doc.next_listener += 1;
        doc.listeners.push(ListenerEntry {
            id,
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        MemoryListener {
            document: Rc::downgrade(&self.inner),
            id,
        }
    }
}

struct PendingTask {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_seq: u64,
    tasks: Vec<PendingTask>,
}

/// Virtual clock; tasks run only inside [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().tasks.len()
    }

    /// Moves time forward by `by`, running due tasks in deadline order
    /// (ties in scheduling order). Tasks scheduled while advancing run in
    /// the same call if they fall due before the new time.
    pub fn advance(&self, by: Duration) {
        let until = self.now() + by;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let earliest = clock
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= until)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                earliest.map(|i| {
                    let task = clock.tasks.remove(i);
                    clock.now = task.due;
                    task.task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = until;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let mut clock = self.clock.borrow_mut();
        let seq = clock.next_seq;
        clock.next_seq += 1;
        let due = clock.now + delay;
        clock.tasks.push(PendingTask { due, seq, task });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_in_document_order() {
        let dom = MemoryDom::new();
        let nav = dom.element(dom.body_id(), "nav", &["nav-links"]);
        let first = dom.element(nav, "a", &["item"]);
        let inner = dom.element(first, "span", &["item"]);
        let second = dom.element(nav, "a", &["item"]);

        assert_eq!(dom.query_all(".item"), vec![first, inner, second]);
        assert_eq!(dom.query(".nav-links"), Some(nav));
        assert_eq!(dom.query_within(&first, ".item"), vec![inner]);
        assert!(dom.query("#bad selector").is_none());
    }

    #[test]
    fn test_click_bubbles_then_reaches_document() {
        let dom = MemoryDom::new();
        let outer = dom.element(dom.body_id(), "div", &[]);
        let inner = dom.element(outer, "button", &[]);
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = log.clone();
        let _a = dom.listen(ListenTarget::Node(inner), EventKind::Click, Box::new(move |_: &MemoryEvent| l1.borrow_mut().push("inner")));
        let l2 = log.clone();
        let _b = dom.listen(ListenTarget::Node(outer), EventKind::Click, Box::new(move |_: &MemoryEvent| l2.borrow_mut().push("outer")));
        let l3 = log.clone();
        let _c = dom.listen(ListenTarget::Document, EventKind::Click, Box::new(move |_: &MemoryEvent| l3.borrow_mut().push("document")));

        let outcome = dom.click(inner);
        assert!(outcome.reached_document);
        assert_eq!(*log.borrow(), vec!["inner", "outer", "document"]);
    }

    #[test]
    fn test_stop_propagation_finishes_current_node_only() {
        let dom = MemoryDom::new();
        let button = dom.element(dom.body_id(), "button", &[]);
        let count = Rc::new(Cell::new(0));

        let _stop = dom.listen(
            ListenTarget::Node(button),
            EventKind::Click,
            Box::new(|e: &MemoryEvent| e.stop_propagation()),
        );
        let c1 = count.clone();
        let _same = dom.listen(ListenTarget::Node(button), EventKind::Click, Box::new(move |_: &MemoryEvent| c1.set(c1.get() + 1)));
        let c2 = count.clone();
        let _doc = dom.listen(ListenTarget::Document, EventKind::Click, Box::new(move |_: &MemoryEvent| c2.set(c2.get() + 100)));

        let outcome = dom.click(button);
        assert!(!outcome.reached_document);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_dropping_listener_unregisters() {
        let dom = MemoryDom::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let listener = dom.listen(ListenTarget::Window, EventKind::Scroll, Box::new(move |_: &MemoryEvent| h.set(h.get() + 1)));
        dom.scroll_to(10.0);
        assert_eq!(dom.listener_count(), 1);

        drop(listener);
        dom.scroll_to(20.0);
        assert_eq!(hits.get(), 1);
        assert_eq!(dom.listener_count(), 0);
        assert_eq!(dom.scroll_offset(), 20.0);
    }

    #[test]
    fn test_create_and_append() {
        let dom = MemoryDom::new();
        let card = dom.element(dom.body_id(), "div", &["product-card"]);
        let link = dom.create_element("a").unwrap();
        dom.set_attribute(&link, "href", "/products/x").unwrap();
        dom.append_child(&card, &link).unwrap();

        assert_eq!(dom.children(card), vec![link]);
        assert_eq!(dom.query_within(&card, "a[href]"), vec![link]);
        assert!(dom.create_element("not a tag").is_err());
        assert!(dom.append_child(&link, &card).is_err());
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let dom = MemoryDom::new();
        let h = dom.element(dom.body_id(), "h3", &[]);
        dom.set_text(h, "Netrun ");
        let span = dom.element(h, "span", &[]);
        dom.set_text(span, "CRM");
        assert_eq!(dom.text_content(&h), "Netrun CRM");
    }

    #[test]
    fn test_manual_scheduler_runs_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        let nested = scheduler.clone();
        scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                l.borrow_mut().push("first");
                let l = l.clone();
                nested.schedule(Duration::from_millis(50), Box::new(move || l.borrow_mut().push("nested")));
            }),
        );
        let l = log.clone();
        scheduler.schedule(Duration::from_millis(120), Box::new(move || l.borrow_mut().push("second")));

        scheduler.advance(Duration::from_millis(99));
        assert!(log.borrow().is_empty());

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*log.borrow(), vec!["first", "second", "nested"]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(199));
    }
}
