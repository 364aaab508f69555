use std::time::Duration;

use netrun_site_ui::app::controllers::menu::MenuMode;
use netrun_site_ui::app::domain::markers;
use netrun_site_ui::app::infrastructure::dom::Dom;
use netrun_site_ui::app::infrastructure::memory::{ManualScheduler, MemoryDom, NodeId};
use netrun_site_ui::{SiteUi, SiteUiSettings};
use proptest::prelude::*;

struct Page {
    dom: MemoryDom,
    scheduler: ManualScheduler,
    header: NodeId,
    trigger: NodeId,
    panel: NodeId,
    close: NodeId,
    panel_link: NodeId,
    dropdowns: Vec<(NodeId, NodeId)>,
    flashes: Vec<NodeId>,
    card: NodeId,
    content: NodeId,
}

/// Markup shaped like the site's base template.
fn site_page() -> Page {
    let dom = MemoryDom::new();
    let body = dom.body_id();

    let header = dom.element(body, "header", &["site-header"]);
    let trigger = dom.element(header, "div", &["hamburger"]);
    dom.element(trigger, "span", &["bar"]);

    let panel = dom.element(body, "nav", &["mobile-menu"]);
    let close = dom.element(panel, "button", &["mobile-close"]);
    let list = dom.element(panel, "ul", &["mobile-nav-links"]);
    let panel_link = dom.element(list, "a", &[]);
    dom.set_attribute(&panel_link, "href", "/contact").unwrap();

    let mut dropdowns = Vec::new();
    for label in ["Products", "Services"] {
        let item = dom.element(list, "li", &["dropdown"]);
        let head = dom.element(item, "a", &[]);
        dom.set_text(head, label);
        let content = dom.element(item, "ul", &["dropdown-content"]);
        dropdowns.push((head, content));
    }

    let main = dom.element(body, "main", &[]);
    let flashes = vec![
        dom.element(main, "div", &["flash", "flash-success"]),
        dom.element(main, "div", &["flash", "flash-info"]),
    ];

    let card = dom.element(main, "div", &["product-card"]);
    let title = dom.element(card, "h3", &[]);
    dom.set_text(title, "Netrun Intirkon");
    let more = dom.element(card, "a", &["btn"]);
    dom.set_attribute(&more, "href", "/products/x").unwrap();
    dom.set_text(more, "Learn More");

    let content = dom.element(main, "p", &[]);

    Page {
        dom,
        scheduler: ManualScheduler::new(),
        header,
        trigger,
        panel,
        close,
        panel_link,
        dropdowns,
        flashes,
        card,
        content,
    }
}

fn install(page: &Page, settings: SiteUiSettings) -> SiteUi<MemoryDom, ManualScheduler> {
    let mut ui = SiteUi::new(page.dom.clone(), page.scheduler.clone(), settings);
    ui.install().expect("first install");
    ui
}

fn overlay(page: &Page) -> NodeId {
    page.dom.query(".overlay").expect("overlay exists after install")
}

#[test]
fn menu_open_and_close_paths() {
    let page = site_page();
    let ui = install(&page, SiteUiSettings::default());
    let body = page.dom.body_id();

    page.dom.click(page.trigger);
    assert!(page.dom.has_class(&page.panel, markers::ACTIVE));
    assert!(page.dom.has_class(&overlay(&page), markers::ACTIVE));
    assert_eq!(page.dom.style(&body, "overflow").as_deref(), Some("hidden"));

    page.dom.click(overlay(&page));
    assert!(!page.dom.has_class(&page.panel, markers::ACTIVE));
    assert_eq!(page.dom.style(&body, "overflow"), None);
    assert_eq!(ui.menu_markers_consistent(), Some(true));
}

#[test]
fn trigger_click_is_not_undone_by_outside_click_handler() {
    let page = site_page();
    let ui = install(&page, SiteUiSettings::default());

    // Click the bar inside the hamburger: the target is a descendant of
    // the trigger and the event must still not reach the document.
    let bar = page.dom.children(page.trigger)[0];
    let outcome = page.dom.click(bar);
    assert!(!outcome.reached_document);
    assert!(ui.menu_state().unwrap().is_open);
}

#[test]
fn open_only_mode_requires_explicit_close() {
    let page = site_page();
    let settings = SiteUiSettings {
        menu_mode: MenuMode::OpenOnly,
        ..Default::default()
    };
    let ui = install(&page, settings);

    page.dom.click(page.trigger);
    page.dom.click(page.trigger);
    assert!(ui.menu_state().unwrap().is_open);

    page.dom.click(page.close);
    assert!(!ui.menu_state().unwrap().is_open);
    assert_eq!(ui.menu_markers_consistent(), Some(true));
}

#[test]
fn dropdowns_toggle_independently_and_keep_menu_open() {
    let page = site_page();
    let ui = install(&page, SiteUiSettings::default());
    let (products, products_content) = page.dropdowns[0];
    let (_, services_content) = page.dropdowns[1];

    page.dom.click(page.trigger);
    let outcome = page.dom.click(products);
    assert!(outcome.default_prevented);
    assert_eq!(page.dom.style(&products_content, "display").as_deref(), Some("block"));
    assert_eq!(page.dom.style(&services_content, "display"), None);
    assert_eq!(ui.dropdown_open(0), Some(true));
    assert_eq!(ui.dropdown_open(1), Some(false));
    assert!(ui.menu_state().unwrap().is_open);

    page.dom.click(products);
    assert_eq!(page.dom.style(&products_content, "display").as_deref(), Some("none"));
}

#[test]
fn scroll_hide_follows_direction_on_mobile_only() {
    let page = site_page();
    page.dom.set_viewport_width(500.0);
    let ui = install(&page, SiteUiSettings::default());

    page.dom.scroll_to(50.0);
    page.dom.scroll_to(200.0);
    assert!(page.dom.has_class(&page.header, markers::HIDE_ON_SCROLL));
    assert_eq!(ui.scroll_state().unwrap().last_scroll_top, 200.0);

    page.dom.resize(900.0);
    assert!(!page.dom.has_class(&page.header, markers::HIDE_ON_SCROLL));
    page.dom.scroll_to(800.0);
    assert!(!page.dom.has_class(&page.header, markers::HIDE_ON_SCROLL));

    // Back on mobile, direction tracking resumes from the last offset.
    page.dom.resize(500.0);
    page.dom.scroll_to(850.0);
    assert!(page.dom.has_class(&page.header, markers::HIDE_ON_SCROLL));
}

#[test]
fn flashes_fade_then_disappear() {
    let page = site_page();
    let _ui = install(&page, SiteUiSettings::default());
    let late = page.dom.element(page.dom.body_id(), "div", &["flash"]);

    page.scheduler.advance(Duration::from_millis(5000));
    for flash in &page.flashes {
        assert_eq!(page.dom.style(flash, "opacity").as_deref(), Some("0"));
        assert_eq!(page.dom.style(flash, "display"), None);
    }

    page.scheduler.advance(Duration::from_millis(500));
    for flash in &page.flashes {
        assert_eq!(page.dom.style(flash, "display").as_deref(), Some("none"));
    }
    assert_eq!(page.dom.style(&late, "opacity"), None);
    assert_eq!(page.dom.style(&late, "display"), None);
}

#[test]
fn card_links_are_added_once() {
    let page = site_page();
    let mut ui = install(&page, SiteUiSettings::default());
    ui.teardown();
    ui.install().unwrap();

    let links = page.dom.query_within(&page.card, ".card-link");
    assert_eq!(links.len(), 1);
    assert_eq!(page.dom.attribute(&links[0], "href").as_deref(), Some("/products/x"));
    assert!(page.dom.has_class(&page.card, markers::CLICKABLE));
}

#[test]
fn reinstall_does_not_double_bind() {
    let page = site_page();
    let mut ui = install(&page, SiteUiSettings::default());
    let bound = page.dom.listener_count();

    assert!(ui.install().is_none());
    assert_eq!(page.dom.listener_count(), bound);

    ui.teardown();
    ui.install().unwrap();
    assert_eq!(page.dom.listener_count(), bound);

    // A single trigger click still toggles exactly once.
    page.dom.click(page.trigger);
    assert!(ui.menu_state().unwrap().is_open);
}

#[test]
fn page_config_element_is_honored() {
    let page = site_page();
    let script = page.dom.element(page.dom.body_id(), "script", &["site-ui-config"]);
    page.dom.set_text(script, r#"{"menu_mode": "OpenOnly", "flash_delay_ms": 1000}"#);

    let settings = SiteUiSettings::load(&page.dom);
    let ui = install(&page, settings);
    page.dom.click(page.trigger);
    page.dom.click(page.trigger);
    assert!(ui.menu_state().unwrap().is_open);

    page.scheduler.advance(Duration::from_millis(1000));
    assert_eq!(page.dom.style(&page.flashes[0], "opacity").as_deref(), Some("0"));
}

#[test]
fn simple_nav_links_variant_uses_desktop_list_as_panel() {
    let dom = MemoryDom::new();
    let body = dom.body_id();
    let nav = dom.element(body, "nav", &[]);
    let links = dom.element(nav, "ul", &["nav-links"]);
    let link = dom.element(links, "a", &[]);
    let trigger = dom.element(nav, "div", &["hamburger"]);
    let content = dom.element(body, "main", &[]);

    let mut ui = SiteUi::new(dom.clone(), ManualScheduler::new(), SiteUiSettings::default());
    assert!(ui.install().unwrap().menu);

    dom.click(trigger);
    assert!(dom.has_class(&links, markers::ACTIVE));
    assert_eq!(dom.style(&body, "overflow").as_deref(), Some("hidden"));

    dom.click(link);
    assert!(ui.menu_state().unwrap().is_open);

    dom.click(content);
    assert!(!dom.has_class(&links, markers::ACTIVE));
    assert_eq!(ui.menu_markers_consistent(), Some(true));
}

#[test]
fn hamburger_icon_trigger_opens_menu() {
    let dom = MemoryDom::new();
    let body = dom.body_id();
    let header = dom.element(body, "header", &[]);
    let icon = dom.element(header, "span", &["hamburger-icon"]);
    let panel = dom.element(body, "div", &["mobile-menu"]);

    let mut ui = SiteUi::new(dom.clone(), ManualScheduler::new(), SiteUiSettings::default());
    ui.install().unwrap();

    let outcome = dom.click(icon);
    assert!(!outcome.reached_document);
    assert!(dom.has_class(&panel, markers::ACTIVE));
    assert_eq!(ui.menu_markers_consistent(), Some(true));
}

#[test]
fn page_with_desktop_links_and_mobile_drawer_binds_the_drawer() {
    let dom = MemoryDom::new();
    let body = dom.body_id();
    let header = dom.element(body, "header", &[]);
    let nav = dom.element(header, "nav", &[]);
    let desktop_links = dom.element(nav, "ul", &["nav-links"]);
    let trigger = dom.element(nav, "div", &["hamburger"]);

    let drawer = dom.element(body, "div", &["mobile-menu"]);
    let list = dom.element(drawer, "ul", &["mobile-nav-links"]);
    let item = dom.element(list, "li", &["dropdown"]);
    let head = dom.element(item, "a", &[]);
    let content = dom.element(item, "ul", &["dropdown-content"]);

    let mut ui = SiteUi::new(dom.clone(), ManualScheduler::new(), SiteUiSettings::default());
    ui.install().unwrap();

    dom.click(trigger);
    assert!(dom.has_class(&drawer, markers::ACTIVE));
    assert!(!dom.has_class(&desktop_links, markers::ACTIVE));

    // A dropdown header inside the drawer is not an outside click.
    dom.click(head);
    assert!(ui.menu_state().unwrap().is_open);
    assert_eq!(dom.style(&content, "display").as_deref(), Some("block"));
    assert_eq!(ui.menu_markers_consistent(), Some(true));
}

#[derive(Debug, Clone, Copy)]
enum Click {
    Trigger,
    Overlay,
    Close,
    PanelLink,
    Outside,
}

fn click_strategy() -> impl Strategy<Value = Click> {
    prop_oneof![
        Just(Click::Trigger),
        Just(Click::Overlay),
        Just(Click::Close),
        Just(Click::PanelLink),
        Just(Click::Outside),
    ]
}

proptest! {
    #[test]
    fn menu_markers_never_desynchronize(
        clicks in prop::collection::vec(click_strategy(), 0..40),
        open_only in any::<bool>(),
    ) {
        let page = site_page();
        let mode = if open_only { MenuMode::OpenOnly } else { MenuMode::Toggle };
        let ui = install(&page, SiteUiSettings { menu_mode: mode, ..Default::default() });
        let overlay = overlay(&page);

        for click in clicks {
            let was_open = ui.menu_state().unwrap().is_open;
            let target = match click {
                Click::Trigger => page.trigger,
                Click::Overlay => overlay,
                Click::Close => page.close,
                Click::PanelLink => page.panel_link,
                Click::Outside => page.content,
            };
            page.dom.click(target);
            let is_open = ui.menu_state().unwrap().is_open;

            prop_assert_eq!(ui.menu_markers_consistent(), Some(true));
            prop_assert_eq!(page.dom.has_class(&page.panel, markers::ACTIVE), is_open);

            let expected = match (click, mode) {
                (Click::Trigger, MenuMode::Toggle) => !was_open,
                (Click::Trigger, MenuMode::OpenOnly) => true,
                (Click::PanelLink, _) => was_open,
                _ => false,
            };
            prop_assert_eq!(is_open, expected);
        }
    }

    #[test]
    fn desktop_header_never_hides(offsets in prop::collection::vec(0.0f64..5000.0, 1..30), width in 769.0f64..2560.0) {
        let page = site_page();
        page.dom.set_viewport_width(width);
        let _ui = install(&page, SiteUiSettings::default());
        for offset in offsets {
            page.dom.scroll_to(offset);
            prop_assert!(!page.dom.has_class(&page.header, markers::HIDE_ON_SCROLL));
        }
    }
}
