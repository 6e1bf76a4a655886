//! Migration of persisted tab containers to the keyed `tabsObj` shape.
//!
//! Early tab widgets stored their tabs as an ordered `tabs` array (or a
//! binding that evaluated to one). Version 2 keys every tab by its `id` in
//! `tabsObj`. The migration runs once per load, before the widget is
//! mounted or evaluated, and is a no-op on anything already at version 2.

use canvas_model::{WidgetInstance, generate_key, is_binding_expression};
use canvas_types::WidgetType;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Current schema version of tab containers.
pub const CURRENT_TABS_VERSION: u32 = 2;

const LEGACY_TABS: &str = "tabs";
const TABS_OBJ: &str = "tabsObj";
const EVALUATION_MARKER: &str = "__evaluation__";
const EVALUATED_TABS: &str = "/__evaluation__/evaluatedValues/tabs";
const PATH_LISTS: [&str; 2] = ["dynamicBindingPathList", "dynamicPropertyPathList"];

/// A structural change to apply to an instance: properties to set,
/// properties to remove, and the resulting type and version.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationPatch {
    pub modify: Map<String, Value>,
    pub remove: Vec<String>,
    pub widget_type: WidgetType,
    pub version: u32,
}

impl MigrationPatch {
    pub fn apply(self, instance: &mut WidgetInstance) {
        for key in &self.remove {
            instance.remove_property(key);
        }
        instance.properties.extend(self.modify);
        instance.widget_type = self.widget_type;
        instance.version = Some(self.version);
    }
}

/// Whether `instance` is a tab container below the current version.
pub fn needs_migration(instance: &WidgetInstance) -> bool {
    instance.widget_type.is_tab_container()
        && instance.version.is_none_or(|v| v < CURRENT_TABS_VERSION)
}

/// Computes the patch that brings `instance` to the current version, or
/// `None` if it is already current.
pub fn plan(instance: &WidgetInstance) -> Option<MigrationPatch> {
    if !needs_migration(instance) {
        return None;
    }

    let mut modify = Map::new();
    match legacy_items(instance) {
        Some(items) => {
            modify.insert(TABS_OBJ.into(), Value::Object(key_tabs(&items, instance)));
        }
        None if instance.get(TABS_OBJ).is_none_or(|v| !v.is_object()) => {
            modify.insert(TABS_OBJ.into(), Value::Object(Map::new()));
        }
        None => {}
    }
    for list in PATH_LISTS {
        if let Some(Value::Array(paths)) = instance.get(list) {
            let kept: Vec<Value> = paths
                .iter()
                .filter(|p| p.get("key").and_then(Value::as_str) != Some(LEGACY_TABS))
                .cloned()
                .collect();
            modify.insert(list.into(), Value::Array(kept));
        }
    }

    Some(MigrationPatch {
        modify,
        remove: vec![LEGACY_TABS.into(), EVALUATION_MARKER.into()],
        widget_type: WidgetType::Tabs,
        version: CURRENT_TABS_VERSION,
    })
}

/// Migrates `instance` to the current version. Idempotent.
pub fn migrate(mut instance: WidgetInstance) -> WidgetInstance {
    migrate_in_place(&mut instance);
    instance
}

/// In-place form of [`migrate`]. Returns whether anything changed.
pub fn migrate_in_place(instance: &mut WidgetInstance) -> bool {
    let Some(patch) = plan(instance) else {
        return false;
    };
    info!(
        "Migrating {} ({}) from version {:?} to {}",
        instance.widget_name, instance.widget_type, instance.version, patch.version
    );
    patch.apply(instance);
    true
}

/// The legacy tab list: the `tabs` array itself, a JSON string holding
/// one, or for a binding the value it last evaluated to.
fn legacy_items(instance: &WidgetInstance) -> Option<Vec<Value>> {
    let raw = instance.get(LEGACY_TABS)?;
    let resolved = match raw {
        Value::String(s) if is_binding_expression(s) => {
            let evaluated = instance.pointer(EVALUATED_TABS);
            if evaluated.is_none() {
                warn!(
                    "{}: tabs binding has no evaluated value, no tabs migrated",
                    instance.widget_name
                );
            }
            evaluated?
        }
        other => other,
    };

    match resolved {
        Value::Array(items) => Some(items.clone()),
        Value::String(s) => match serde_json::from_str::<Vec<Value>>(s) {
            Ok(items) => Some(items),
            Err(e) => {
                warn!("{}: legacy tabs are not a JSON array: {}", instance.widget_name, e);
                Some(Vec::new())
            }
        },
        other => {
            warn!("{}: unexpected legacy tabs value {}", instance.widget_name, other);
            Some(Vec::new())
        }
    }
}

/// Keys tab items by id. Items without a string label are dropped;
/// missing or duplicate ids and missing widget ids are generated.
fn key_tabs(items: &[Value], instance: &WidgetInstance) -> Map<String, Value> {
    let mut tabs = Map::new();
    let mut seen = HashSet::new();

    for (position, item) in items.iter().enumerate() {
        let Some(mut tab) = item
            .as_object()
            .filter(|t| t.get("label").is_some_and(Value::is_string))
            .cloned()
        else {
            warn!(
                "{}: dropping malformed tab at position {}: {}",
                instance.widget_name, position, item
            );
            continue;
        };

        let id = match tab.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() && !seen.contains(id) => id.to_string(),
            Some(id) if !id.is_empty() => {
                debug!("{}: duplicate tab id {}, generating a new one", instance.widget_name, id);
                generate_key()
            }
            _ => generate_key(),
        };
        if tab
            .get("widgetId")
            .and_then(Value::as_str)
            .is_none_or(str::is_empty)
        {
            tab.insert("widgetId".into(), Value::String(generate_key()));
        }
        if !tab.get("isVisible").is_some_and(Value::is_boolean) {
            tab.insert("isVisible".into(), Value::Bool(true));
        }
        tab.insert("id".into(), Value::String(id.clone()));
        tab.insert("index".into(), Value::from(tabs.len()));

        seen.insert(id.clone());
        tabs.insert(id, Value::Object(tab));
    }

    tabs
}
