use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::app::controllers::menu::{MenuController, MenuEvent, MenuMode, MenuView};
use crate::app::domain::markers;
use crate::app::domain::settings::SelectorSettings;
use crate::app::infrastructure::dom::{Dom, DomEvent, EventKind, ListenTarget};

/// The page elements the menu drives.
#[derive(Debug, Clone)]
pub struct MenuElements<N> {
    pub trigger: N,
    pub panel: N,
    pub overlay: N,
    pub close_button: Option<N>,
    pub body: N,
}

pub struct MenuBinding<D: Dom> {
    pub controller: Rc<RefCell<MenuController>>,
    pub elements: Rc<MenuElements<D::Node>>,
    pub listeners: Vec<D::Listener>,
}

/// First element matched by the earliest selector in `candidates` that
/// matches anything. Order of the list beats document order.
pub fn query_first_of<D: Dom>(dom: &D, candidates: &[String]) -> Option<D::Node> {
    candidates.iter().find_map(|selector| dom.query(selector))
}

/// Finds the menu elements, creating the overlay when the markup has none.
/// Returns `None` when the trigger, panel or body is missing, or the
/// overlay cannot be created; nothing is created in that case.
pub fn resolve_menu<D: Dom>(dom: &D, selectors: &SelectorSettings) -> Option<MenuElements<D::Node>> {
    let trigger = query_first_of(dom, &selectors.trigger)?;
    let panel = query_first_of(dom, &selectors.panel)?;
    let body = dom.body()?;
    let overlay = match dom.query(&selectors.overlay()) {
        Some(overlay) => overlay,
        None => match create_overlay(dom, &body, &selectors.overlay_class) {
            Ok(overlay) => overlay,
            Err(e) => {
                warn!("Could not create menu overlay: {}", e);
                return None;
            }
        },
    };
    let close_button = dom.query(&selectors.close_button);
    Some(MenuElements {
        trigger,
        panel,
        overlay,
        close_button,
        body,
    })
}

fn create_overlay<D: Dom>(
    dom: &D,
    body: &D::Node,
    class: &str,
) -> crate::app::infrastructure::error::Result<D::Node> {
    let overlay = dom.create_element("div")?;
    dom.add_class(&overlay, class);
    dom.append_child(body, &overlay)?;
    Ok(overlay)
}

/// Writes all three menu markers from one view.
pub fn apply_view<D: Dom>(dom: &D, elements: &MenuElements<D::Node>, view: MenuView) {
    dom.set_class(&elements.panel, markers::ACTIVE, view.panel_active);
    dom.set_class(&elements.overlay, markers::ACTIVE, view.overlay_active);
    let overflow = if view.scroll_locked {
        markers::SCROLL_LOCKED
    } else {
        markers::SCROLL_UNLOCKED
    };
    dom.set_style(&elements.body, "overflow", overflow);
}

/// Reads the markers back; used to verify the lockstep invariant.
pub fn observed_view<D: Dom>(dom: &D, elements: &MenuElements<D::Node>) -> MenuView {
    MenuView {
        panel_active: dom.has_class(&elements.panel, markers::ACTIVE),
        overlay_active: dom.has_class(&elements.overlay, markers::ACTIVE),
        scroll_locked: dom.style(&elements.body, "overflow").as_deref() == Some(markers::SCROLL_LOCKED),
    }
}

fn dispatch<D: Dom>(
    dom: &D,
    controller: &RefCell<MenuController>,
    elements: &MenuElements<D::Node>,
    event: MenuEvent,
) {
    let view = controller.borrow_mut().handle(event);
    debug!("menu {:?} -> open={}", event, view.panel_active);
    apply_view(dom, elements, view);
}

pub fn bind_menu<D: Dom>(dom: &D, selectors: &SelectorSettings, mode: MenuMode) -> Option<MenuBinding<D>> {
    let elements = Rc::new(resolve_menu(dom, selectors)?);
    let controller = Rc::new(RefCell::new(MenuController::new(mode)));

    // Normalize whatever the markup shipped with to the closed state.
    apply_view(dom, &elements, controller.borrow().state().view());

    let mut listeners = Vec::with_capacity(4);

    // The trigger stops propagation so the outside-click listener below
    // never sees the same click.
    {
        let (dom_c, ctl, els) = (dom.clone(), controller.clone(), elements.clone());
        listeners.push(dom.listen(
            ListenTarget::Node(elements.trigger.clone()),
            EventKind::Click,
            Box::new(move |e: &D::Event| {
                e.stop_propagation();
                dispatch(&dom_c, &ctl, &els, MenuEvent::TriggerClicked);
            }),
        ));
    }

    if let Some(close_button) = &elements.close_button {
        let (dom_c, ctl, els) = (dom.clone(), controller.clone(), elements.clone());
        listeners.push(dom.listen(
            ListenTarget::Node(close_button.clone()),
            EventKind::Click,
            Box::new(move |_: &D::Event| dispatch(&dom_c, &ctl, &els, MenuEvent::CloseClicked)),
        ));
    }

    {
        let (dom_c, ctl, els) = (dom.clone(), controller.clone(), elements.clone());
        listeners.push(dom.listen(
            ListenTarget::Node(elements.overlay.clone()),
            EventKind::Click,
            Box::new(move |_: &D::Event| dispatch(&dom_c, &ctl, &els, MenuEvent::OverlayClicked)),
        ));
    }

    {
        let (dom_c, ctl, els) = (dom.clone(), controller.clone(), elements.clone());
        listeners.push(dom.listen(
            ListenTarget::Document,
            EventKind::Click,
            Box::new(move |e: &D::Event| {
                let Some(target) = e.target() else {
                    return;
                };
                let outside =
                    !dom_c.contains(&els.panel, &target) && !dom_c.contains(&els.trigger, &target);
                if outside {
                    dispatch(&dom_c, &ctl, &els, MenuEvent::OutsideClicked);
                }
            }),
        ));
    }

    Some(MenuBinding {
        controller,
        elements,
        listeners,
    })
}
