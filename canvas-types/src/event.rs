//! Trigger events fired by widget interactions.
//!
//! A trigger names the widget property that holds the bound action (for
//! example `onTextChanged`) together with the event that caused it. The
//! core only routes triggers; executing the bound action belongs to the
//! action-execution layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of interaction that fired a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    OnTextChange,
    OnSubmit,
    OnIframeUrlChanged,
    OnIframeMessageReceived,
    OnTabChange,
}

impl EventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTextChange => "ON_TEXT_CHANGE",
            Self::OnSubmit => "ON_SUBMIT",
            Self::OnIframeUrlChanged => "ON_IFRAME_URL_CHANGED",
            Self::OnIframeMessageReceived => "ON_IFRAME_MESSAGE_RECEIVED",
            Self::OnTabChange => "ON_TAB_CHANGE",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes the interaction handed to a bound action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub event_type: EventType,
    /// Optional event data (e.g. the message posted by an embedded page).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl TriggerEvent {
    /// Creates an event without payload.
    #[must_use]
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            payload: None,
        }
    }

    /// Attaches event data.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// A request to fire the action bound to `property` on a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// Name of the trigger property holding the action binding
    /// (e.g. `"onTextChanged"`).
    pub property: String,
    pub event: TriggerEvent,
}

impl Trigger {
    #[must_use]
    pub fn new(property: impl Into<String>, event_type: EventType) -> Self {
        Self {
            property: property.into(),
            event: TriggerEvent::new(event_type),
        }
    }

    /// Replaces the event, keeping the property.
    #[must_use]
    pub fn with_event(mut self, event: TriggerEvent) -> Self {
        self.event = event;
        self
    }
}
