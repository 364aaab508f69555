use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::app::controllers::dropdown::{DropdownSet, Visibility};
use crate::app::domain::settings::SelectorSettings;
use crate::app::infrastructure::dom::{Dom, DomEvent, EventKind, ListenTarget};

pub struct DropdownBinding<D: Dom> {
    pub dropdowns: Rc<RefCell<DropdownSet>>,
    pub listeners: Vec<D::Listener>,
}

/// Binds every header that has a content panel after it. Headers without
/// one are skipped; the rest are unaffected.
pub fn bind_dropdowns<D: Dom>(dom: &D, selectors: &SelectorSettings) -> DropdownBinding<D> {
    let dropdowns = Rc::new(RefCell::new(DropdownSet::new()));
    let mut listeners = Vec::new();

    for header in dom.query_all(&selectors.dropdown_header) {
        let Some(content) = dom.next_sibling_with_class(&header, &selectors.dropdown_content_class) else {
            debug!("dropdown header {:?} has no content panel; skipped", header);
            continue;
        };
        let initial = Visibility::from_display(dom.style(&content, "display").as_deref());
        let id = dropdowns.borrow_mut().register(initial);

        let (dom_c, set) = (dom.clone(), dropdowns.clone());
        listeners.push(dom.listen(
            ListenTarget::Node(header),
            EventKind::Click,
            Box::new(move |e: &D::Event| {
                e.prevent_default();
                if let Some(visibility) = set.borrow_mut().toggle(id) {
                    debug!("dropdown {:?} -> {:?}", id, visibility);
                    dom_c.set_style(&content, "display", visibility.display_value());
                }
            }),
        ));
    }

    DropdownBinding {
        dropdowns,
        listeners,
    }
}
