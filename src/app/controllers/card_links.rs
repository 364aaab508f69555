//! Full-card link planning.
//!
//! A card with an inner link gets one overlay anchor pointing at the same
//! place, labelled from the card heading.

/// What the page reports about one card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardProbe {
    pub already_linked: bool,
    pub inner_href: Option<String>,
    pub heading: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLink {
    pub href: String,
    pub aria_label: String,
}

pub fn plan_card_link(probe: &CardProbe, fallback_noun: &str) -> Option<CardLink> {
    if probe.already_linked {
        return None;
    }
    let href = probe
        .inner_href
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())?;
    Some(CardLink {
        href: href.to_string(),
        aria_label: aria_label(probe.heading.as_deref(), fallback_noun),
    })
}

fn aria_label(heading: Option<&str>, fallback_noun: &str) -> String {
    let heading = heading
        .map(|h| h.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|h| !h.is_empty());
    match heading {
        Some(h) => format!("Learn more about {h}"),
        None => format!("Learn more about this {fallback_noun}"),
    }
}
