use crate::dom::NodeId;
use crate::events::{EventState, Handler};
use crate::page::Page;
use crate::selector;
use crate::Result;

pub(crate) mod form;
pub(crate) mod lightbox;
pub(crate) mod nav;
pub(crate) mod scroll_spy;
pub(crate) mod year;

pub(crate) use lightbox::Lightbox;

/// Configuration handed to the scroll-animation library on startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationConfig {
    pub duration_ms: u32,
    pub easing: String,
    pub once: bool,
    pub mirror: bool,
    pub anchor_placement: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 800,
            easing: "ease-in-out".to_string(),
            once: true,
            mirror: false,
            anchor_placement: "top-bottom".to_string(),
        }
    }
}

/// Optional scroll-animation capability. The page works without one; tests
/// substitute a recording fake to observe the bootstrap call.
pub trait ScrollAnimations {
    fn init(&mut self, config: &AnimationConfig);
}

#[derive(Debug, Default)]
pub(crate) struct ControllerState {
    pub(crate) menu_toggle: Option<NodeId>,
    pub(crate) nav_list: Option<NodeId>,
    pub(crate) sections: Vec<NodeId>,
    pub(crate) nav_links: Vec<NodeId>,
    pub(crate) navbar: Option<NodeId>,
    pub(crate) alert_area: Option<NodeId>,
    pub(crate) lightbox: Option<Lightbox>,
    pub(crate) active_section_id: Option<String>,
}

/// Wires every behavior whose elements are present. Each step is independent;
/// a missing element disables that one behavior and nothing else.
pub(crate) fn init_interactions(page: &mut Page) -> Result<()> {
    year::stamp_footer_year(page);

    let menu_toggle = selector::query_one(&page.dom, ".menu-toggle")?;
    let nav_list = selector::query_one(&page.dom, ".nav-list")?;
    if let (Some(toggle), Some(list)) = (menu_toggle, nav_list) {
        page.controller.menu_toggle = Some(toggle);
        page.controller.nav_list = Some(list);
        page.listeners.add(toggle, "click", Handler::ToggleMenu);
        for link in selector::query_all(&page.dom, ".nav-list a")? {
            page.listeners.add(link, "click", Handler::CloseMenuOnNavigate);
        }
    }

    let sections = selector::query_all(&page.dom, "section")?
        .into_iter()
        .filter(|&id| {
            page.dom
                .attr(id, "id")
                .map(|value| !value.is_empty())
                .unwrap_or(false)
        })
        .collect::<Vec<_>>();
    let nav_links = selector::query_all(&page.dom, ".nav-list a[href^=\"#\"]")?;
    if !sections.is_empty() && !nav_links.is_empty() {
        page.controller.sections = sections;
        page.controller.nav_links = nav_links;
        page.controller.navbar = selector::query_one(&page.dom, ".navbar")?;
        page.listeners
            .add(page.dom.root, "scroll", Handler::HighlightActiveSection);
        scroll_spy::recompute_active_section(page);
    }

    for item in selector::query_all(&page.dom, ".gallery-item")? {
        let has_image = page
            .dom
            .elements_in_document_order(item)
            .into_iter()
            .any(|id| {
                page.dom
                    .tag_name(id)
                    .map(|tag| tag.eq_ignore_ascii_case("img"))
                    .unwrap_or(false)
            });
        if has_image {
            page.listeners.add(item, "click", Handler::OpenLightboxFromItem);
        }
    }

    if let Some(form) = selector::query_one(&page.dom, "#booking-form")? {
        page.controller.alert_area = selector::query_one(&page.dom, "#form-alert")?;
        page.listeners.add(form, "submit", Handler::ValidateBookingForm);
    }

    match page.animations.take() {
        Some(mut animations) => {
            animations.init(&AnimationConfig::default());
            page.animations = Some(animations);
        }
        None => page.trace_warn("scroll animation library not present; skipping init"),
    }

    Ok(())
}

pub(crate) fn run_handler(page: &mut Page, handler: Handler, event: &mut EventState) {
    match handler {
        Handler::ToggleMenu => nav::toggle_menu(page),
        Handler::CloseMenuOnNavigate => nav::close_menu_after_navigate(page),
        Handler::HighlightActiveSection => scroll_spy::recompute_active_section(page),
        Handler::OpenLightboxFromItem => lightbox::open_from_item(page, event),
        Handler::CloseLightboxOnBackdrop => {
            let on_backdrop = page
                .controller
                .lightbox
                .map(|lightbox| lightbox.overlay == event.target)
                .unwrap_or(false);
            if on_backdrop {
                lightbox::close(page);
            }
        }
        Handler::CloseLightboxOnGlyph => {
            let on_glyph = page
                .controller
                .lightbox
                .map(|lightbox| lightbox.close_glyph == event.current_target)
                .unwrap_or(false);
            if on_glyph {
                lightbox::close(page);
            }
        }
        Handler::CloseLightboxOnEscape => {
            let visible = page
                .controller
                .lightbox
                .map(|lightbox| lightbox.visible)
                .unwrap_or(false);
            if event.key.as_deref() == Some("Escape") && visible {
                lightbox::close(page);
            }
        }
        Handler::ValidateBookingForm => form::validate(page, event),
    }
}
