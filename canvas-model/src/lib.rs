//! Widget model for the canvas engine.
//!
//! Defines the types every widget-aware subsystem depends on:
//! - [`WidgetInstance`]: the persisted widget record (id, type, version, properties)
//! - [`PropertySection`] / [`PropertySchemaEntry`]: the property pane declaration
//! - [`ValidationRule`]: how a configured property value is checked and coerced
//! - [`TextPattern`]: user-supplied regex strings (`/foo/i` or bare patterns)
//! - [`WidgetBehavior`]: per-type defaults, derived properties and load hooks
//!
//! Meta-state and derived values are not part of
//! [`WidgetInstance`]: they are never persisted with the application.

mod behavior;
mod instance;
mod pattern;
mod schema;
mod validation;

pub use behavior::{DefaultPropertyMap, DerivedPropertyMap, WidgetBehavior};
pub use instance::{WidgetInstance, is_binding_expression};
pub use pattern::{RegexFlags, TextPattern};
pub use schema::{ControlType, DropdownOption, HiddenWhen, PropertySchemaEntry, PropertySection};
pub use validation::{KeyDefault, ObjectKey, ValidationOutcome, ValidationRule, generate_key};
