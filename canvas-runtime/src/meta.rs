//! Per-widget meta-state.
//!
//! Meta-state is transient (focus, current text, selected tab) and is
//! never persisted. It is seeded when a widget mounts and dropped when it
//! unmounts. Writes are crate-private: everything outside this crate goes
//! through [`WidgetRuntime::request_update`](crate::WidgetRuntime::request_update).

use crate::error::{RuntimeError, RuntimeResult};
use canvas_model::WidgetInstance;
use canvas_types::WidgetId;
use canvas_widgets::behavior;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct MetaEntry {
    defaults: Map<String, Value>,
    values: Map<String, Value>,
}

/// Meta-state of every mounted widget, keyed by widget id.
#[derive(Debug, Default)]
pub struct MetaStore {
    entries: HashMap<WidgetId, MetaEntry>,
}

impl MetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)initializes the meta-state of `instance`, discarding any previous
    /// values.
    pub fn seed(&mut self, instance: &WidgetInstance) {
        let behavior = behavior(instance.widget_type);
        self.entries.insert(
            instance.widget_id,
            MetaEntry {
                defaults: behavior.meta_defaults(),
                values: behavior.seed_meta(instance),
            },
        );
    }

    /// Current value of `key`: the stored value, else the declared
    /// default, else `null`.
    pub fn read(&self, id: WidgetId, key: &str) -> Value {
        self.entries
            .get(&id)
            .and_then(|e| e.values.get(key).or_else(|| e.defaults.get(key)))
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Overwrites `key`, returning the previous value.
    pub(crate) fn write(&mut self, id: WidgetId, key: &str, value: Value) -> RuntimeResult<Value> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(RuntimeError::WidgetNotMounted(id))?;
        Ok(entry.values.insert(key.to_string(), value).unwrap_or(Value::Null))
    }

    /// Drops the meta-state of a removed widget.
    pub fn unregister(&mut self, id: WidgetId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn is_registered(&self, id: WidgetId) -> bool {
        self.entries.contains_key(&id)
    }

    /// All meta values of `id`, defaults included.
    pub fn snapshot(&self, id: WidgetId) -> Option<Map<String, Value>> {
        self.entries.get(&id).map(|e| {
            let mut snapshot = e.defaults.clone();
            snapshot.extend(e.values.iter().map(|(k, v)| (k.clone(), v.clone())));
            snapshot
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
