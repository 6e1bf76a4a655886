//! Core type definitions for the canvas widget engine.
//!
//! This crate defines the fundamental types every other layer depends on:
//! - Widget identifiers (UUID v7)
//! - The closed set of widget type tags
//! - Trigger events fired by widget interactions
//!
//! Property schemas, instances and behaviour live in `canvas-model` and
//! `canvas-widgets`; nothing here knows what a widget renders.

mod event;
mod ids;
mod widget_type;

pub use event::{EventType, Trigger, TriggerEvent};
pub use ids::WidgetId;
pub use widget_type::WidgetType;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unknown widget type: {0}")]
    UnknownWidgetType(String),
}
