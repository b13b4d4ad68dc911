use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::dom::{Dom, NodeId};
use crate::events::EventState;
use crate::page::Page;

const ERROR_CLASS: &str = "input-error";
const FALLBACK_FIELD_NAME: &str = "A required field";

/// Presence validation for the booking form. Recomputes from scratch on every
/// submit attempt: prior error marks and alert messages are cleared first.
pub(crate) fn validate(page: &mut Page, event: &mut EventState) {
    let form = event.current_target;

    let controls = page
        .dom
        .elements_in_document_order(form)
        .into_iter()
        .filter(|&id| page.dom.is_form_control(id))
        .collect::<Vec<_>>();

    for &control in &controls {
        page.dom.remove_class(control, ERROR_CLASS);
    }
    if let Some(alert) = page.controller.alert_area {
        page.dom.clear_children(alert);
    }

    let missing = controls
        .iter()
        .copied()
        .filter(|&id| {
            page.dom
                .element(id)
                .map(|element| element.required)
                .unwrap_or(false)
        })
        .filter(|&id| is_empty(&page.dom, id))
        .collect::<Vec<_>>();

    if missing.is_empty() {
        if let Some(alert) = page.controller.alert_area {
            page.dom.set_attr(alert, "hidden", "");
        }
        return;
    }

    event.prevent_default();

    let messages = missing
        .iter()
        .map(|&id| format!("Please fill out: {}", field_display_name(&page.dom, id)))
        .collect::<Vec<_>>();

    match page.controller.alert_area {
        Some(alert) => {
            for message in &messages {
                let entry = page
                    .dom
                    .create_element(alert, "p".to_string(), HashMap::new());
                page.dom.create_text(entry, message.clone());
            }
            if !messages.is_empty() {
                page.dom.remove_attr(alert, "hidden");
            }
        }
        None => {
            for message in &messages {
                page.trace_warn(message);
            }
        }
    }

    for &control in &missing {
        page.dom.add_class(control, ERROR_CLASS);
    }
    page.active_element = missing.first().copied();
}

fn is_empty(dom: &Dom, control: NodeId) -> bool {
    if dom.is_checkbox(control) {
        return !dom
            .element(control)
            .map(|element| element.checked)
            .unwrap_or(false);
    }
    if dom.is_multi_select(control) {
        return dom.selected_option_values(control).is_empty();
    }
    control_value(dom, control).trim().is_empty()
}

fn control_value(dom: &Dom, control: NodeId) -> String {
    let Some(element) = dom.element(control) else {
        return String::new();
    };
    if element.tag_name.eq_ignore_ascii_case("textarea") {
        if element.value.is_empty() {
            return dom.text_content(control);
        }
        return element.value.clone();
    }
    if element.tag_name.eq_ignore_ascii_case("select") {
        let selected = dom.selected_option_values(control);
        if let Some(value) = selected.first() {
            return value.clone();
        }
        // Single selects fall back to their first option, like a browser does.
        return dom
            .elements_in_document_order(control)
            .into_iter()
            .find(|&id| {
                dom.tag_name(id)
                    .map(|tag| tag.eq_ignore_ascii_case("option"))
                    .unwrap_or(false)
            })
            .map(|id| dom.option_value(id))
            .unwrap_or_default();
    }
    element.value.clone()
}

/// Label text (with any trailing `*` marker stripped), else the control's
/// `name` attribute, else a generic fallback.
fn field_display_name(dom: &Dom, control: NodeId) -> String {
    if let Some(label) = dom.label_text_for(control) {
        let normalized = label.nfc().collect::<String>();
        let cleaned = normalized.trim().trim_end_matches('*').trim();
        if !cleaned.is_empty() {
            return cleaned.to_string();
        }
    }
    if let Some(name) = dom.attr(control, "name") {
        if !name.is_empty() {
            return name.to_string();
        }
    }
    FALLBACK_FIELD_NAME.to_string()
}
