//! Widget type registry.
//!
//! Maps every [`WidgetType`] to its behaviour. The match is exhaustive, so
//! adding a widget type without registering it does not compile.

use crate::iframe::IframeWidget;
use crate::input::InputWidget;
use crate::migrate::CURRENT_TABS_VERSION;
use crate::tabs::{TabsMigratorWidget, TabsWidget};
use canvas_model::{PropertySection, WidgetBehavior, WidgetInstance};
use canvas_types::WidgetType;
use std::collections::BTreeSet;
use tracing::debug;

/// The behaviour implementing `widget_type`.
pub fn behavior(widget_type: WidgetType) -> &'static dyn WidgetBehavior {
    match widget_type {
        WidgetType::Input => &InputWidget,
        WidgetType::Iframe => &IframeWidget,
        WidgetType::Tabs => &TabsWidget,
        WidgetType::TabsMigrator => &TabsMigratorWidget,
    }
}

/// The property pane of `widget_type`, in display order.
pub fn get_schema(widget_type: WidgetType) -> Vec<PropertySection> {
    behavior(widget_type).property_pane()
}

/// Schema lookup by persisted type tag. Unknown tags have no configurable
/// properties.
pub fn get_schema_by_tag(tag: &str) -> Vec<PropertySection> {
    match WidgetType::from_tag(tag) {
        Some(widget_type) => get_schema(widget_type),
        None => {
            debug!("No schema for unknown widget type {}", tag);
            Vec::new()
        }
    }
}

/// A new instance with the type's default configuration, as created when a
/// widget is dropped onto the canvas.
pub fn create_instance(widget_type: WidgetType, widget_name: &str) -> WidgetInstance {
    let mut instance = WidgetInstance::new(widget_type, widget_name);
    instance.properties = behavior(widget_type).default_config();
    if widget_type == WidgetType::Tabs {
        instance.version = Some(CURRENT_TABS_VERSION);
    }
    instance
}

/// Prepares a stored instance for use: runs the type's load hook, which
/// applies any pending migration.
pub fn load(mut instance: WidgetInstance) -> WidgetInstance {
    behavior(instance.widget_type).on_after_load(&mut instance);
    instance
}

/// Which category a key belongs to for a widget type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Property,
    Meta,
    Derived,
    /// Not declared by the type; treated as ad-hoc meta-state.
    Undeclared,
}

impl KeyKind {
    /// Classifies `key` for `widget_type`.
    pub fn of(widget_type: WidgetType, key: &str) -> Self {
        let behavior = behavior(widget_type);
        if property_names(widget_type).contains(key) {
            Self::Property
        } else if behavior.derived_properties().iter().any(|(k, _)| *k == key) {
            Self::Derived
        } else if behavior.meta_defaults().contains_key(key) {
            Self::Meta
        } else {
            Self::Undeclared
        }
    }

    /// Whether a key of this kind may be written as meta-state.
    pub fn is_writable_meta(self) -> bool {
        matches!(self, Self::Meta | Self::Undeclared)
    }
}

/// Names declared in the property pane of `widget_type`.
pub fn property_names(widget_type: WidgetType) -> BTreeSet<String> {
    get_schema(widget_type)
        .into_iter()
        .flat_map(|section| section.children)
        .map(|entry| entry.property_name)
        .collect()
}

/// Keys declared in more than one of the property, meta and derived
/// categories. Empty for every built-in type.
pub fn overlapping_keys(widget_type: WidgetType) -> Vec<String> {
    let behavior = behavior(widget_type);
    let properties = property_names(widget_type);
    let meta: BTreeSet<String> = behavior.meta_defaults().keys().cloned().collect();
    let derived: BTreeSet<String> = behavior
        .derived_properties()
        .iter()
        .map(|(k, _)| (*k).to_string())
        .collect();

    let mut overlap: BTreeSet<String> = properties.intersection(&meta).cloned().collect();
    overlap.extend(properties.intersection(&derived).cloned());
    overlap.extend(meta.intersection(&derived).cloned());
    overlap.into_iter().collect()
}
