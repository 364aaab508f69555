//! Browser adapter backed by `web-sys`.

use std::time::Duration;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use super::dom::{Dom, DomEvent, EventKind, Handler, ListenTarget, Scheduler};
use super::error::{Result, UiError};

fn js_error(context: &str, err: JsValue) -> UiError {
    let detail = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"));
    UiError::Dom(format!("{context}: {detail}"))
}

#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn event_target(&self, target: &ListenTarget<Element>) -> EventTarget {
        match target {
            ListenTarget::Node(el) => el.clone().into(),
            ListenTarget::Document => self.document.clone().into(),
            ListenTarget::Window => self.window.clone().into(),
        }
    }

    fn collect(list: std::result::Result<web_sys::NodeList, JsValue>, selector: &str) -> Vec<Element> {
        match list {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|n| n.dyn_into::<Element>().ok())
                .collect(),
            Err(err) => {
                warn!("{}", js_error(&format!("querySelectorAll(`{selector}`)"), err));
                Vec::new()
            }
        }
    }
}

pub struct WebEvent(Event);

impl DomEvent for WebEvent {
    type Node = Element;

    fn target(&self) -> Option<Element> {
        self.0.target().and_then(|t| t.dyn_into::<Element>().ok())
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }

    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// Keeps the JS closure alive; removes the listener on drop.
pub struct WebListener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for WebListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

impl Dom for WebDom {
    type Node = Element;
    type Event = WebEvent;
    type Listener = Option<WebListener>;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        Self::collect(self.document.query_selector_all(selector), selector)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        Self::collect(scope.query_selector_all(selector), selector)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn next_sibling_with_class(&self, node: &Element, class: &str) -> Option<Element> {
        let mut cursor = node.next_element_sibling();
        while let Some(sibling) = cursor {
            if sibling.class_list().contains(class) {
                return Some(sibling);
            }
            cursor = sibling.next_element_sibling();
        }
        None
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            warn!("{}", js_error("classList.add", err));
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            warn!("{}", js_error("classList.remove", err));
        }
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        let el = node.dyn_ref::<HtmlElement>()?;
        el.style()
            .get_property_value(property)
            .ok()
            .filter(|v| !v.is_empty())
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            warn!("{}", js_error(&format!("style.{property}"), err));
        }
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<()> {
        node.set_attribute(name, value)
            .map_err(|err| js_error("setAttribute", err))
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn create_element(&self, tag: &str) -> Result<Element> {
        self.document
            .create_element(tag)
            .map_err(|err| js_error("createElement", err))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<()> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|err| js_error("appendChild", err))
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn listen(
        &self,
        target: ListenTarget<Element>,
        kind: EventKind,
        mut handler: Handler<WebEvent>,
    ) -> Option<WebListener> {
        let target = self.event_target(&target);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            handler(&WebEvent(event));
        });
        match target.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(WebListener {
                target,
                kind: kind.as_str(),
                closure,
            }),
            Err(err) => {
                warn!("{}", js_error(&format!("addEventListener({})", kind.as_str()), err));
                None
            }
        }
    }
}

/// `setTimeout`-backed scheduler.
#[derive(Clone)]
pub struct WebScheduler {
    window: Window,
}

impl WebScheduler {
    pub fn from_window() -> Option<Self> {
        Some(Self {
            window: web_sys::window()?,
        })
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            warn!("{}", js_error("setTimeout", err));
        }
    }
}
