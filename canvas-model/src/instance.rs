use canvas_types::{WidgetId, WidgetType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A widget placed on the canvas, as stored in the application document.
///
/// `properties` holds arbitrary JSON whose meaning is declared by the
/// widget type's property pane. Values are either literals or binding
/// expressions (`"{{Input1.text}}"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInstance {
    pub widget_id: WidgetId,
    pub widget_name: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    /// Schema version of the stored shape. Absent on legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl WidgetInstance {
    /// Creates an instance with a fresh id and no properties.
    pub fn new(widget_type: WidgetType, widget_name: impl Into<String>) -> Self {
        Self {
            widget_id: WidgetId::new(),
            widget_name: widget_name.into(),
            widget_type,
            version: None,
            properties: Map::new(),
        }
    }

    /// Builder-style property setter.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Returns a property by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Extract a value from `properties` using a JSON pointer (e.g., "/tabsObj/tab1/label").
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let mut parts = pointer.strip_prefix('/')?.splitn(2, '/');
        let head = self.properties.get(parts.next()?)?;
        match parts.next() {
            Some(rest) => head.pointer(&format!("/{rest}")),
            None => Some(head),
        }
    }

    /// Extract a string property.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(|v| v.as_str())
    }

    /// Extract a boolean property.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.properties.get(name).and_then(|v| v.as_bool())
    }

    /// Extract a numeric property.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.properties.get(name).and_then(|v| v.as_f64())
    }

    /// Sets a property, returning the previous value.
    pub fn set_property(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.properties.insert(name.into(), value)
    }

    /// Removes a property, returning its value.
    pub fn remove_property(&mut self, name: &str) -> Option<Value> {
        self.properties.remove(name)
    }

    /// Whether the named property currently holds a binding expression.
    pub fn is_bound(&self, name: &str) -> bool {
        self.get_str(name).is_some_and(is_binding_expression)
    }
}

/// Whether a string contains a `{{ ... }}` binding.
pub fn is_binding_expression(value: &str) -> bool {
    value
        .find("{{")
        .is_some_and(|start| value[start + 2..].contains("}}"))
}
