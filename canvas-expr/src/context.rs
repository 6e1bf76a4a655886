use crate::functions::Functions;
use serde_json::Value;
use std::collections::HashMap;

/// The complete set of names an expression can see.
///
/// `this` is the evaluating widget (properties overlaid with meta-state);
/// other widgets are visible only when registered by name. Anything not
/// registered here is unreachable from an expression.
#[derive(Debug, Clone)]
pub struct BindingContext<'a> {
    this: Value,
    widgets: HashMap<String, Value>,
    functions: &'a Functions,
}

impl<'a> BindingContext<'a> {
    pub fn new(this: Value, functions: &'a Functions) -> Self {
        Self {
            this,
            widgets: HashMap::new(),
            functions,
        }
    }

    /// Exposes another widget's state under `name` (e.g. `Input1`).
    #[must_use]
    pub fn with_widget(mut self, name: impl Into<String>, state: Value) -> Self {
        self.widgets.insert(name.into(), state);
        self
    }

    /// Adds a widget in place.
    pub fn insert_widget(&mut self, name: impl Into<String>, state: Value) {
        self.widgets.insert(name.into(), state);
    }

    /// Resolves a root identifier.
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        if name == "this" {
            Some(&self.this)
        } else {
            self.widgets.get(name)
        }
    }

    pub fn functions(&self) -> &Functions {
        self.functions
    }

    pub fn this(&self) -> &Value {
        &self.this
    }
}
