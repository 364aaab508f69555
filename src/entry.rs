//! Browser entry points.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::app::infrastructure::logging::init_logging;
use crate::app::infrastructure::web::{WebDom, WebScheduler};
use crate::app::{SiteUi, SiteUiSettings};

thread_local! {
    static SITE_UI: RefCell<Option<SiteUi<WebDom, WebScheduler>>> = const { RefCell::new(None) };
}

fn install_now() {
    let (Some(dom), Some(scheduler)) = (WebDom::from_window(), WebScheduler::from_window()) else {
        return;
    };
    let settings = SiteUiSettings::load(&dom);
    if let Err(e) = init_logging(&settings.log_level) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
    SITE_UI.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(|| SiteUi::new(dom, scheduler, settings))
            .install();
    });
}

/// Installs once the document has been parsed.
#[wasm_bindgen(start)]
pub fn start() {
    let Some(dom) = WebDom::from_window() else {
        return;
    };
    if dom.document().ready_state() != "loading" {
        install_now();
        return;
    }
    let callback = Closure::once_into_js(install_now);
    if let Err(err) = dom
        .document()
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        web_sys::console::warn_1(&err);
    }
}

/// Unbinds every listener, e.g. before a client-side route swaps the page.
#[wasm_bindgen]
pub fn teardown() {
    SITE_UI.with(|cell| {
        if let Some(ui) = cell.borrow_mut().as_mut() {
            ui.teardown();
        }
    });
}

/// Tears down and binds again against the current markup.
#[wasm_bindgen]
pub fn reinstall() {
    SITE_UI.with(|cell| {
        if let Some(ui) = cell.borrow_mut().as_mut() {
            ui.teardown();
            ui.install();
        }
    });
}
