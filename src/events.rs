use std::collections::HashMap;

use crate::dom::NodeId;

/// Controller actions registered in the listener table. Handlers are plain
/// data so tests can invoke them directly instead of synthesizing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    ToggleMenu,
    CloseMenuOnNavigate,
    HighlightActiveSection,
    OpenLightboxFromItem,
    CloseLightboxOnBackdrop,
    CloseLightboxOnGlyph,
    CloseLightboxOnEscape,
    ValidateBookingForm,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Handler>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, handler: Handler) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Handler> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) key: Option<String>,
    pub(crate) default_prevented: bool,
    pub(crate) propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            key: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub(crate) fn with_key(event_type: &str, target: NodeId, key: &str) -> Self {
        let mut event = Self::new(event_type, target);
        event.key = Some(key.to_string());
        event
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
