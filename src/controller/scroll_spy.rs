use crate::page::Page;

const ACTIVE_CLASS: &str = "active";
const BOTTOM_SLACK_PX: f64 = 50.0;

/// Recomputes which section owns the viewport and moves the `active` class to
/// its nav link. When several sections claim the scroll position, the last one
/// in document order wins.
pub(crate) fn recompute_active_section(page: &mut Page) {
    if page.controller.sections.is_empty() || page.controller.nav_links.is_empty() {
        return;
    }

    let navbar_height = page
        .controller
        .navbar
        .and_then(|id| page.dom.element(id))
        .map(|element| element.offset_height)
        .unwrap_or(0.0);

    let mut current: Option<String> = None;
    for &section in &page.controller.sections {
        let Some(element) = page.dom.element(section) else {
            continue;
        };
        let top = element.offset_top - navbar_height - 1.0;
        let height = element.offset_height;
        if page.scroll_y >= top && page.scroll_y < top + height {
            if let Some(id) = element.attrs.get("id") {
                current = Some(id.clone());
            }
        }
    }

    // Short trailing sections never satisfy the range test near the bottom of
    // the document; force-select the last section there.
    if page.scroll_y + page.inner_height >= page.document_height() - BOTTOM_SLACK_PX {
        if let Some(&last) = page.controller.sections.last() {
            if let Some(id) = page.dom.attr(last, "id") {
                current = Some(id.to_string());
            }
        }
    }

    for &link in &page.controller.nav_links {
        page.dom.remove_class(link, ACTIVE_CLASS);
    }
    if let Some(id) = &current {
        let anchor = format!("#{id}");
        for &link in &page.controller.nav_links {
            if page.dom.attr(link, "href") == Some(anchor.as_str()) {
                page.dom.add_class(link, ACTIVE_CLASS);
                break;
            }
        }
    }
    page.controller.active_section_id = current;
}
