use log::{debug, warn};

use crate::app::controllers::card_links::{CardLink, CardProbe, plan_card_link};
use crate::app::domain::markers;
use crate::app::infrastructure::dom::Dom;
use crate::app::infrastructure::error::Result;

const HEADING_SELECTOR: &str = "h1, h2, h3, h4";
const LINK_SELECTOR: &str = "a[href]";

fn probe_card<D: Dom>(dom: &D, card: &D::Node) -> CardProbe {
    let already_linked = !dom
        .query_within(card, &format!(".{}", markers::CARD_LINK))
        .is_empty();
    let inner_href = dom
        .query_within(card, LINK_SELECTOR)
        .into_iter()
        .find(|a| !dom.has_class(a, markers::CARD_LINK))
        .and_then(|a| dom.attribute(&a, "href"));
    let heading = dom
        .query_within(card, HEADING_SELECTOR)
        .first()
        .map(|h| dom.text_content(h));
    CardProbe {
        already_linked,
        inner_href,
        heading,
    }
}

fn insert_card_link<D: Dom>(dom: &D, card: &D::Node, link: &CardLink) -> Result<()> {
    let anchor = dom.create_element("a")?;
    dom.set_attribute(&anchor, "href", &link.href)?;
    dom.set_attribute(&anchor, "aria-label", &link.aria_label)?;
    dom.add_class(&anchor, markers::CARD_LINK);
    dom.append_child(card, &anchor)?;
    dom.add_class(card, markers::CLICKABLE);
    Ok(())
}

/// Gives every matching card with an inner link a full-card anchor.
/// Safe to run repeatedly; returns how many anchors were added.
pub fn synthesize_card_links<D: Dom>(dom: &D, card_selector: &str, fallback_noun: &str) -> usize {
    let mut added = 0;
    for card in dom.query_all(card_selector) {
        let Some(link) = plan_card_link(&probe_card(dom, &card), fallback_noun) else {
            continue;
        };
        match insert_card_link(dom, &card, &link) {
            Ok(()) => {
                debug!("card link -> {}", link.href);
                added += 1;
            }
            Err(e) => warn!("Skipping card link for {}: {}", link.href, e),
        }
    }
    added
}
