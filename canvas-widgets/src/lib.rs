//! Built-in widgets for the canvas engine.
//!
//! Each widget type is a [`WidgetBehavior`](canvas_model::WidgetBehavior)
//! implementation; [`registry`] maps the closed [`WidgetType`] set onto them.
//! On top of that this crate provides:
//! - [`derived`]: evaluation of derived properties (`isValid`, `value`, ...)
//! - [`migrate`]: the legacy tab list to keyed tab map migration
//! - [`input_is_valid`]: the input widget's validity rule
//!
//! [`WidgetType`]: canvas_types::WidgetType

pub mod derived;
mod iframe;
mod input;
pub mod migrate;
pub mod registry;
mod tabs;

pub use iframe::IframeWidget;
pub use input::{EMAIL_PATTERN, InputWidget, input_is_valid, parse_regex_string};
pub use migrate::{CURRENT_TABS_VERSION, MigrationPatch, migrate, needs_migration};
pub use registry::{KeyKind, behavior, create_instance, get_schema, get_schema_by_tag, load};
pub use tabs::{TabsMigratorWidget, TabsWidget, resolve_tab_widget_id, tab_label};

use serde_json::{Map, Value};

/// Unwraps a `json!({...})` literal into its map.
pub(crate) fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
