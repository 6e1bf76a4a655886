//! Error types for the widget runtime.

use canvas_types::{WidgetId, WidgetType};
use canvas_widgets::KeyKind;
use thiserror::Error;

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur in runtime operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No widget with this id is mounted.
    #[error("widget not mounted: {0}")]
    WidgetNotMounted(WidgetId),

    /// The key is declared as a property or derived key, so it cannot be
    /// written as meta-state.
    #[error("{key} is a {kind:?} key of {widget_type}, not meta-state")]
    NotAMetaKey {
        widget_type: WidgetType,
        key: String,
        kind: KeyKind,
    },

    /// A handler was called on a widget of the wrong type.
    #[error("expected a {expected} widget, found {actual}")]
    WrongWidgetType {
        expected: WidgetType,
        actual: WidgetType,
    },

    /// Invalid runtime configuration.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// A bound action failed.
    #[error("action failed: {0}")]
    Action(String),
}
