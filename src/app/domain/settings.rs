use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::app::controllers::menu::MenuMode;
use crate::app::controllers::notifications::FlashTiming;
use crate::app::controllers::scroll_hide::ScrollConfig;
use crate::app::infrastructure::dom::Dom;
use crate::app::infrastructure::error::Result;

/// Selector of the inline JSON element carrying page-level overrides.
pub const CONFIG_ELEMENT_SELECTOR: &str = "script.site-ui-config";

/// Element roles the controllers bind to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSettings {
    /// Candidate trigger selectors in priority order; the first one that
    /// matches anything wins.
    #[serde(default = "default_trigger")]
    pub trigger: Vec<String>,

    /// Candidate panel selectors in priority order. A page with both a
    /// desktop `.nav-links` list and a `.mobile-menu` drawer binds the drawer.
    #[serde(default = "default_panel")]
    pub panel: Vec<String>,

    /// Class of the overlay element; created under `<body>` when absent.
    #[serde(default = "default_overlay_class")]
    pub overlay_class: String,

    #[serde(default = "default_close_button")]
    pub close_button: String,

    #[serde(default = "default_dropdown_header")]
    pub dropdown_header: String,

    #[serde(default = "default_dropdown_content_class")]
    pub dropdown_content_class: String,

    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_flash")]
    pub flash: String,

    #[serde(default = "default_cards")]
    pub cards: String,
}

fn default_trigger() -> Vec<String> {
    vec![".hamburger".to_string(), ".hamburger-icon".to_string()]
}

fn default_panel() -> Vec<String> {
    vec![".mobile-menu".to_string(), ".nav-links".to_string()]
}

fn default_overlay_class() -> String {
    "overlay".to_string()
}

fn default_close_button() -> String {
    ".mobile-close".to_string()
}

fn default_dropdown_header() -> String {
    ".mobile-nav-links .dropdown > a".to_string()
}

fn default_dropdown_content_class() -> String {
    "dropdown-content".to_string()
}

fn default_header() -> String {
    "header".to_string()
}

fn default_flash() -> String {
    ".flash".to_string()
}

fn default_cards() -> String {
    ".product-card, .feature-card, .post-card, .about-card".to_string()
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            panel: default_panel(),
            overlay_class: default_overlay_class(),
            close_button: default_close_button(),
            dropdown_header: default_dropdown_header(),
            dropdown_content_class: default_dropdown_content_class(),
            header: default_header(),
            flash: default_flash(),
            cards: default_cards(),
        }
    }
}

impl SelectorSettings {
    pub fn overlay(&self) -> String {
        format!(".{}", self.overlay_class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteUiSettings {
    #[serde(default)]
    pub selectors: SelectorSettings,

    #[serde(default)]
    pub menu_mode: MenuMode,

    /// Widths above this are desktop; scroll-hide is inactive there.
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint_px: f64,

    /// Minimum scroll offset before the header may hide.
    #[serde(default = "default_hide_threshold")]
    pub hide_threshold_px: f64,

    #[serde(default = "default_flash_delay")]
    pub flash_delay_ms: u64,

    #[serde(default = "default_flash_fade")]
    pub flash_fade_ms: u64,

    /// Used in a card link's label when the card has no heading.
    #[serde(default = "default_card_fallback_noun")]
    pub card_fallback_noun: String,

    #[serde(default = "default_enabled")]
    pub scroll_hide_enabled: bool,

    #[serde(default = "default_enabled")]
    pub notifications_enabled: bool,

    #[serde(default = "default_enabled")]
    pub card_links_enabled: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_mobile_breakpoint() -> f64 {
    768.0
}

fn default_hide_threshold() -> f64 {
    100.0
}

fn default_flash_delay() -> u64 {
    5000
}

fn default_flash_fade() -> u64 {
    500
}

fn default_card_fallback_noun() -> String {
    "card".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SiteUiSettings {
    fn default() -> Self {
        Self {
            selectors: SelectorSettings::default(),
            menu_mode: MenuMode::default(),
            mobile_breakpoint_px: default_mobile_breakpoint(),
            hide_threshold_px: default_hide_threshold(),
            flash_delay_ms: default_flash_delay(),
            flash_fade_ms: default_flash_fade(),
            card_fallback_noun: default_card_fallback_noun(),
            scroll_hide_enabled: default_enabled(),
            notifications_enabled: default_enabled(),
            card_links_enabled: default_enabled(),
            log_level: default_log_level(),
        }
    }
}

impl SiteUiSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read overrides from the page's inline config element, or defaults
    /// if there is none or it does not parse.
    pub fn load<D: Dom>(dom: &D) -> Self {
        let Some(element) = dom.query(CONFIG_ELEMENT_SELECTOR) else {
            return Self::default();
        };
        let text = dom.text_content(&element);
        if text.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&text) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to parse site UI config: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn scroll_config(&self) -> ScrollConfig {
        ScrollConfig {
            mobile_breakpoint: self.mobile_breakpoint_px,
            hide_threshold: self.hide_threshold_px,
        }
    }

    pub fn flash_timing(&self) -> FlashTiming {
        FlashTiming {
            delay: Duration::from_millis(self.flash_delay_ms),
            fade: Duration::from_millis(self.flash_fade_ms),
        }
    }
}
