//! Host abstraction over the page document and the timer source.
//!
//! Controllers never touch a browser API directly; everything goes through
//! [`Dom`] and [`Scheduler`]. The browser build implements them with
//! `web-sys`, tests use the in-memory document and a manual clock.

use std::fmt::Debug;
use std::time::Duration;

use super::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
    Resize,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenTarget<N> {
    Node(N),
    Document,
    Window,
}

/// The slice of a dispatched DOM event the handlers need.
pub trait DomEvent {
    type Node;

    fn target(&self) -> Option<Self::Node>;
    fn stop_propagation(&self);
    fn prevent_default(&self);
}

pub type Handler<E> = Box<dyn FnMut(&E)>;

/// Document access used by the controllers.
///
/// Element lookups return `Option`/empty `Vec` rather than errors: a missing
/// element is an expected page configuration, not a failure. Mutations that
/// can genuinely throw in a browser (element creation, tree insertion,
/// attribute writes) return [`Result`].
pub trait Dom: Clone + 'static {
    type Node: Clone + PartialEq + Debug + 'static;
    type Event: DomEvent<Node = Self::Node> + 'static;
    /// Registration guard; dropping it unregisters the listener.
    type Listener;

    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    fn query(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    /// Descendants of `scope` (excluding `scope` itself) matching `selector`.
    fn query_within(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn body(&self) -> Option<Self::Node>;

    /// First following element sibling carrying `class`.
    fn next_sibling_with_class(&self, node: &Self::Node, class: &str) -> Option<Self::Node>;

    /// `Node.contains` semantics: a node contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    fn set_class(&self, node: &Self::Node, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Inline style value; `None` when unset.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;
    /// Sets an inline style; an empty `value` clears it.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    fn text_content(&self, node: &Self::Node) -> String;

    fn create_element(&self, tag: &str) -> Result<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    fn viewport_width(&self) -> f64;
    fn scroll_offset(&self) -> f64;

    fn listen(
        &self,
        target: ListenTarget<Self::Node>,
        kind: EventKind,
        handler: Handler<Self::Event>,
    ) -> Self::Listener;
}

/// One-shot delayed task source. Tasks are fire-and-forget.
pub trait Scheduler: Clone + 'static {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}
