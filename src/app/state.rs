use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::info;

use super::controllers::dropdown::{DropdownId, DropdownSet};
use super::controllers::menu::{MenuController, MenuState};
use super::controllers::notifications::FlashDismisser;
use super::controllers::scroll_hide::ScrollState;
use super::domain::settings::SiteUiSettings;
use super::infrastructure::dom::{Dom, Scheduler};
use crate::ui::cards::synthesize_card_links;
use crate::ui::dropdown::bind_dropdowns;
use crate::ui::flash::schedule_flash_dismissal;
use crate::ui::header::bind_scroll_hide;
use crate::ui::menu::{MenuElements, bind_menu, observed_view};

/// What one `install` call bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstallReport {
    pub menu: bool,
    pub dropdowns: usize,
    pub scroll_hide: bool,
    pub flash_banners: usize,
    pub card_links: usize,
}

/// Page-lifetime coordinator owning every controller binding.
///
/// `install` is idempotent; `teardown` unregisters every listener so the
/// page (or an SPA route) can install again without double-binding. Flash
/// timers already scheduled are fire-and-forget and survive teardown.
pub struct SiteUi<D: Dom, S: Scheduler> {
    dom: D,
    scheduler: S,
    settings: SiteUiSettings,
    installed: bool,
    listeners: Vec<D::Listener>,
    menu: Option<(Rc<RefCell<MenuController>>, Rc<MenuElements<D::Node>>)>,
    dropdowns: Option<Rc<RefCell<DropdownSet>>>,
    scroll: Option<Rc<Cell<ScrollState>>>,
    flashes: Option<Rc<RefCell<FlashDismisser>>>,
}

impl<D: Dom, S: Scheduler> SiteUi<D, S> {
    pub fn new(dom: D, scheduler: S, settings: SiteUiSettings) -> Self {
        Self {
            dom,
            scheduler,
            settings,
            installed: false,
            listeners: Vec::new(),
            menu: None,
            dropdowns: None,
            scroll: None,
            flashes: None,
        }
    }

    pub fn settings(&self) -> &SiteUiSettings {
        &self.settings
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Binds every controller whose elements are present. Returns `None`
    /// if already installed.
    pub fn install(&mut self) -> Option<InstallReport> {
        if self.installed {
            return None;
        }
        self.installed = true;
        let mut report = InstallReport::default();
        let selectors = &self.settings.selectors;

        if let Some(binding) = bind_menu(&self.dom, selectors, self.settings.menu_mode) {
            self.listeners.extend(binding.listeners);
            self.menu = Some((binding.controller, binding.elements));
            report.menu = true;
        }

        let dropdowns = bind_dropdowns(&self.dom, selectors);
        report.dropdowns = dropdowns.dropdowns.borrow().len();
        self.listeners.extend(dropdowns.listeners);
        self.dropdowns = Some(dropdowns.dropdowns);

        if self.settings.scroll_hide_enabled
            && let Some(binding) = bind_scroll_hide(&self.dom, &selectors.header, self.settings.scroll_config())
        {
            self.listeners.extend(binding.listeners);
            self.scroll = Some(binding.state);
            report.scroll_hide = true;
        }

        if self.settings.notifications_enabled {
            self.flashes = schedule_flash_dismissal(
                &self.dom,
                &self.scheduler,
                &selectors.flash,
                self.settings.flash_timing(),
            );
            report.flash_banners = self.flashes.as_ref().map_or(0, |f| f.borrow().len());
        }

        if self.settings.card_links_enabled {
            report.card_links =
                synthesize_card_links(&self.dom, &selectors.cards, &self.settings.card_fallback_noun);
        }

        info!(
            "site UI installed: menu={} dropdowns={} scroll_hide={} flashes={} card_links={}",
            report.menu, report.dropdowns, report.scroll_hide, report.flash_banners, report.card_links
        );
        Some(report)
    }

    /// Drops every listener and controller. No-op when not installed.
    pub fn teardown(&mut self) {
        if !self.installed {
            return;
        }
        self.listeners.clear();
        self.menu = None;
        self.dropdowns = None;
        self.scroll = None;
        self.flashes = None;
        self.installed = false;
        info!("site UI torn down");
    }

    pub fn menu_state(&self) -> Option<MenuState> {
        self.menu.as_ref().map(|(c, _)| c.borrow().state())
    }

    /// Whether the page's panel, overlay and scroll-lock markers agree.
    /// `None` when the menu is not bound.
    pub fn menu_markers_consistent(&self) -> Option<bool> {
        self.menu
            .as_ref()
            .map(|(_, elements)| observed_view(&self.dom, elements).is_consistent())
    }

    pub fn dropdown_open(&self, index: usize) -> Option<bool> {
        self.dropdowns.as_ref()?.borrow().is_open(DropdownId(index))
    }

    pub fn scroll_state(&self) -> Option<ScrollState> {
        self.scroll.as_ref().map(|s| s.get())
    }

    pub fn flash_dismisser(&self) -> Option<Rc<RefCell<FlashDismisser>>> {
        self.flashes.clone()
    }
}
