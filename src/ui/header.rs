use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::app::controllers::scroll_hide::{ScrollConfig, ScrollState};
use crate::app::domain::markers;
use crate::app::infrastructure::dom::{Dom, EventKind, ListenTarget};

pub struct ScrollHideBinding<D: Dom> {
    pub state: Rc<Cell<ScrollState>>,
    pub listeners: Vec<D::Listener>,
}

fn apply<D: Dom>(dom: &D, header: &D::Node, state: &Cell<ScrollState>, next: ScrollState) {
    if next.is_hidden != state.get().is_hidden {
        debug!("header hidden={}", next.is_hidden);
    }
    state.set(next);
    dom.set_class(header, markers::HIDE_ON_SCROLL, next.is_hidden);
}

/// Binds window scroll and resize to the header's hide marker. `None` when
/// the page has no header.
pub fn bind_scroll_hide<D: Dom>(dom: &D, header_selector: &str, config: ScrollConfig) -> Option<ScrollHideBinding<D>> {
    let header = dom.query(header_selector)?;
    let state = Rc::new(Cell::new(ScrollState {
        last_scroll_top: dom.scroll_offset().max(0.0),
        is_hidden: false,
    }));

    let on_scroll = {
        let (dom_c, header, state) = (dom.clone(), header.clone(), state.clone());
        dom.listen(
            ListenTarget::Window,
            EventKind::Scroll,
            Box::new(move |_: &D::Event| {
                let next = state
                    .get()
                    .on_scroll(dom_c.scroll_offset(), dom_c.viewport_width(), &config);
                apply(&dom_c, &header, &state, next);
            }),
        )
    };

    let on_resize = {
        let (dom_c, state) = (dom.clone(), state.clone());
        dom.listen(
            ListenTarget::Window,
            EventKind::Resize,
            Box::new(move |_: &D::Event| {
                let next = state.get().on_resize(dom_c.viewport_width(), &config);
                apply(&dom_c, &header, &state, next);
            }),
        )
    };

    Some(ScrollHideBinding {
        state,
        listeners: vec![on_scroll, on_resize],
    })
}
