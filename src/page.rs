use crate::controller::{self, ControllerState, ScrollAnimations, lightbox};
use crate::dom::{Dom, NodeId};
use crate::events::{EventState, ListenerStore};
use crate::html::parse_html;
use crate::selector;
use crate::{Error, Result};

/// A parsed page plus the interaction controller's live state. Drives the
/// same behaviors the site ships, deterministically and without a browser.
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) controller: ControllerState,
    pub(crate) animations: Option<Box<dyn ScrollAnimations>>,
    pub(crate) now_ms: i64,
    pub(crate) scroll_y: f64,
    pub(crate) inner_height: f64,
    pub(crate) scroll_locked: bool,
    pub(crate) active_element: Option<NodeId>,
    document_height_override: Option<f64>,
    navigations: Vec<String>,
    submissions: Vec<String>,
    trace: bool,
    trace_to_stderr: bool,
    trace_logs: Vec<String>,
    trace_log_limit: usize,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        let dom = parse_html(html)?;
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            controller: ControllerState::default(),
            animations: None,
            now_ms: 0,
            scroll_y: 0.0,
            inner_height: 800.0,
            scroll_locked: false,
            active_element: None,
            document_height_override: None,
            navigations: Vec::new(),
            submissions: Vec::new(),
            trace: false,
            trace_to_stderr: false,
            trace_logs: Vec::new(),
            trace_log_limit: 10_000,
        })
    }

    /// Injects the scroll-animation capability. Call before
    /// `init_interactions`; without it the bootstrap logs a warning and skips.
    pub fn set_animations(&mut self, animations: Box<dyn ScrollAnimations>) {
        self.animations = Some(animations);
    }

    pub fn init_interactions(&mut self) -> Result<()> {
        controller::init_interactions(self)
    }

    // ---- deterministic environment -------------------------------------

    pub fn set_now_ms(&mut self, now_ms: i64) {
        self.now_ms = now_ms;
    }

    pub fn set_viewport(&mut self, scroll_y: f64, inner_height: f64) {
        self.scroll_y = scroll_y;
        self.inner_height = inner_height;
    }

    /// Assigns offset metrics to every element matching the selector.
    pub fn set_layout(&mut self, selector: &str, offset_top: f64, offset_height: f64) -> Result<()> {
        let matches = selector::query_all(&self.dom, selector)?;
        if matches.is_empty() {
            return Err(Error::SelectorNotFound(selector.to_string()));
        }
        for node_id in matches {
            if let Some(element) = self.dom.element_mut(node_id) {
                element.offset_top = offset_top;
                element.offset_height = offset_height;
            }
        }
        Ok(())
    }

    pub fn set_document_height(&mut self, height: f64) {
        self.document_height_override = Some(height);
    }

    pub(crate) fn document_height(&self) -> f64 {
        self.document_height_override
            .unwrap_or_else(|| self.dom.layout_height())
    }

    // ---- user actions --------------------------------------------------

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        self.click_node(target);
        Ok(())
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.max(0.0);
        self.dispatch_event(EventState::new("scroll", self.dom.root));
    }

    pub fn press_key(&mut self, key: &str) {
        let target = self.active_element.unwrap_or(self.dom.root);
        self.dispatch_event(EventState::with_key("keydown", target, key));
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        if let Some(element) = self.dom.element_mut(target) {
            element.value = text.to_string();
        }
        self.dispatch_event(EventState::new("input", target));
        Ok(())
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        if let Some(element) = self.dom.element_mut(target) {
            element.checked = checked;
        }
        self.dispatch_event(EventState::new("change", target));
        Ok(())
    }

    pub fn select_option(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        let options = self
            .dom
            .elements_in_document_order(target)
            .into_iter()
            .filter(|&id| {
                self.dom
                    .tag_name(id)
                    .map(|tag| tag.eq_ignore_ascii_case("option"))
                    .unwrap_or(false)
            })
            .collect::<Vec<_>>();
        let chosen = options
            .iter()
            .copied()
            .find(|&id| self.dom.option_value(id) == value)
            .ok_or_else(|| {
                Error::SelectorNotFound(format!("option \"{value}\" under {selector}"))
            })?;
        let multiple = self.dom.is_multi_select(target);
        for option in options {
            let selected = option == chosen
                || (multiple
                    && self
                        .dom
                        .element(option)
                        .map(|element| element.selected)
                        .unwrap_or(false));
            if let Some(element) = self.dom.element_mut(option) {
                element.selected = selected;
            }
        }
        self.dispatch_event(EventState::new("change", target));
        Ok(())
    }

    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        let is_form = self
            .dom
            .tag_name(target)
            .map(|tag| tag.eq_ignore_ascii_case("form"))
            .unwrap_or(false);
        let form = if is_form {
            target
        } else {
            self.dom
                .enclosing_form(target)
                .ok_or_else(|| Error::SelectorNotFound(format!("{selector} has no form")))?
        };
        self.submit_node(form);
        Ok(())
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        self.active_element = Some(target);
        Ok(())
    }

    pub fn dispatch(&mut self, selector: &str, event_type: &str) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        self.dispatch_event(EventState::new(event_type, target));
        Ok(())
    }

    // ---- lightbox operations -------------------------------------------

    pub fn open_lightbox(&mut self, src: &str, alt: &str) {
        lightbox::open(self, src, alt);
    }

    pub fn close_lightbox(&mut self) {
        lightbox::close(self);
    }

    // ---- observers -----------------------------------------------------

    pub fn active_section_id(&self) -> Option<&str> {
        self.controller.active_section_id.as_deref()
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn submissions(&self) -> &[String] {
        &self.submissions
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(selector::query_all(&self.dom, selector)?.len())
    }

    pub fn text_of(&self, selector: &str) -> Result<String> {
        let target = selector::select_one(&self.dom, selector)?;
        Ok(self.dom.text_content(target).trim().to_string())
    }

    // ---- assertions ----------------------------------------------------

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        selector::select_one(&self.dom, selector).map(|_| ())
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        let actual = self.dom.text_content(target).trim().to_string();
        self.check(selector, target, expected, &actual)
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        let actual = self
            .dom
            .element(target)
            .map(|element| element.value.clone())
            .unwrap_or_default();
        self.check(selector, target, expected, &actual)
    }

    pub fn assert_checked(&self, selector: &str, expected: bool) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        let actual = self
            .dom
            .element(target)
            .map(|element| element.checked)
            .unwrap_or(false);
        self.check(selector, target, &expected.to_string(), &actual.to_string())
    }

    pub fn assert_class(&self, selector: &str, class: &str, expected: bool) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        let actual = self.dom.has_class(target, class);
        self.check(
            selector,
            target,
            &format!("class {class}: {expected}"),
            &format!("class {class}: {actual}"),
        )
    }

    pub fn assert_attr(&self, selector: &str, name: &str, expected: Option<&str>) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        let actual = self.dom.attr(target, name).map(str::to_string);
        self.check(
            selector,
            target,
            &format!("{name}={expected:?}"),
            &format!("{name}={actual:?}"),
        )
    }

    pub fn assert_focused(&self, selector: &str) -> Result<()> {
        let target = selector::select_one(&self.dom, selector)?;
        if self.active_element == Some(target) {
            return Ok(());
        }
        let actual = self
            .active_element
            .map(|id| self.dom.dump_node(id))
            .unwrap_or_else(|| "<nothing focused>".to_string());
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: "focused".to_string(),
            actual,
            dom_snippet: self.dom.dump_node(target),
        })
    }

    fn check(&self, selector: &str, target: NodeId, expected: &str, actual: &str) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
                dom_snippet: self.dom.dump_node(target),
            })
        }
    }

    // ---- trace ---------------------------------------------------------

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_to_stderr = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_logs)
    }

    pub(crate) fn trace_warn(&mut self, message: &str) {
        self.trace_push(format!("warn: {message}"));
    }

    fn trace_push(&mut self, entry: String) {
        if self.trace_to_stderr {
            eprintln!("{entry}");
        }
        self.trace_logs.push(entry);
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
    }

    // ---- dispatch ------------------------------------------------------

    fn dispatch_event(&mut self, mut event: EventState) -> EventState {
        if self.trace {
            let entry = format!(
                "event: {} on {}",
                event.event_type,
                self.dom.dump_node(event.target)
            );
            self.trace_push(entry);
        }
        let mut path = vec![event.target];
        path.extend(self.dom.ancestors(event.target));
        for node in path {
            event.current_target = node;
            for handler in self.listeners.get(node, &event.event_type) {
                controller::run_handler(self, handler, &mut event);
            }
            if event.propagation_stopped {
                break;
            }
        }
        event
    }

    fn click_node(&mut self, target: NodeId) {
        let event = self.dispatch_event(EventState::new("click", target));
        if event.default_prevented {
            return;
        }
        if self.dom.is_checkbox(target) {
            if let Some(element) = self.dom.element_mut(target) {
                element.checked = !element.checked;
            }
            return;
        }
        let anchor = std::iter::once(target)
            .chain(self.dom.ancestors(target))
            .find(|&id| {
                self.dom
                    .tag_name(id)
                    .map(|tag| tag.eq_ignore_ascii_case("a"))
                    .unwrap_or(false)
            });
        if let Some(anchor) = anchor {
            if let Some(href) = self.dom.attr(anchor, "href") {
                let href = href.to_string();
                self.navigations.push(href);
                return;
            }
        }
        if self.dom.is_submit_control(target) {
            if let Some(form) = self.dom.enclosing_form(target) {
                self.submit_node(form);
            }
        }
    }

    fn submit_node(&mut self, form: NodeId) {
        let event = self.dispatch_event(EventState::new("submit", form));
        if event.default_prevented {
            return;
        }
        let name = self.dom.attr(form, "id").unwrap_or("form").to_string();
        self.submissions.push(name);
    }
}
