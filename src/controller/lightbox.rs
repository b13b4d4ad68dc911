use std::collections::HashMap;

use crate::dom::NodeId;
use crate::events::{EventState, Handler};
use crate::page::Page;

pub(crate) const OVERLAY_CLASS: &str = "lightbox-overlay";
pub(crate) const IMAGE_CLASS: &str = "lightbox-image";
pub(crate) const CLOSE_CLASS: &str = "lightbox-close";
const DEFAULT_ALT: &str = "Gallery image";
const SCROLL_LOCK_STYLE: &str = "overflow: hidden";

/// Overlay singleton. Constructed on first open, then only shown and hidden;
/// its listeners are wired exactly once, at construction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lightbox {
    pub(crate) overlay: NodeId,
    pub(crate) image: NodeId,
    pub(crate) close_glyph: NodeId,
    pub(crate) visible: bool,
}

pub(crate) fn open_from_item(page: &mut Page, event: &mut EventState) {
    event.prevent_default();
    let item = event.current_target;
    let Some(image) = page
        .dom
        .elements_in_document_order(item)
        .into_iter()
        .find(|&id| {
            page.dom
                .tag_name(id)
                .map(|tag| tag.eq_ignore_ascii_case("img"))
                .unwrap_or(false)
        })
    else {
        return;
    };
    let src = page.dom.attr(image, "src").unwrap_or("").to_string();
    let alt = page.dom.attr(image, "alt").unwrap_or("").to_string();
    open(page, &src, &alt);
}

pub(crate) fn open(page: &mut Page, src: &str, alt: &str) {
    let lightbox = ensure_overlay(page);
    page.dom.set_attr(lightbox.image, "src", src);
    let alt = if alt.trim().is_empty() { DEFAULT_ALT } else { alt };
    page.dom.set_attr(lightbox.image, "alt", alt);
    page.dom.remove_attr(lightbox.overlay, "hidden");
    if let Some(body) = page.dom.body() {
        page.dom.set_attr(body, "style", SCROLL_LOCK_STYLE);
    }
    page.scroll_locked = true;
    if let Some(state) = page.controller.lightbox.as_mut() {
        state.visible = true;
    }
}

/// No-op before the overlay ever existed.
pub(crate) fn close(page: &mut Page) {
    let Some(lightbox) = page.controller.lightbox else {
        return;
    };
    page.dom.set_attr(lightbox.overlay, "hidden", "");
    if let Some(body) = page.dom.body() {
        page.dom.remove_attr(body, "style");
    }
    page.scroll_locked = false;
    if let Some(state) = page.controller.lightbox.as_mut() {
        state.visible = false;
    }
}

fn ensure_overlay(page: &mut Page) -> Lightbox {
    if let Some(lightbox) = page.controller.lightbox {
        return lightbox;
    }

    let parent = page.dom.body_or_root();
    let overlay = page.dom.create_element(
        parent,
        "div".to_string(),
        HashMap::from([
            ("class".to_string(), OVERLAY_CLASS.to_string()),
            ("hidden".to_string(), String::new()),
        ]),
    );
    let image = page.dom.create_element(
        overlay,
        "img".to_string(),
        HashMap::from([("class".to_string(), IMAGE_CLASS.to_string())]),
    );
    let close_glyph = page.dom.create_element(
        overlay,
        "span".to_string(),
        HashMap::from([("class".to_string(), CLOSE_CLASS.to_string())]),
    );
    page.dom.create_text(close_glyph, "\u{d7}".to_string());

    page.listeners
        .add(overlay, "click", Handler::CloseLightboxOnBackdrop);
    page.listeners
        .add(close_glyph, "click", Handler::CloseLightboxOnGlyph);
    page.listeners
        .add(page.dom.root, "keydown", Handler::CloseLightboxOnEscape);

    let lightbox = Lightbox {
        overlay,
        image,
        close_glyph,
        visible: false,
    };
    page.controller.lightbox = Some(lightbox);
    lightbox
}
