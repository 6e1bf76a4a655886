//! Derived property evaluation.
//!
//! Derived properties are binding templates declared per widget type. They
//! are evaluated against `this`, the widget's properties overlaid with its
//! meta-state. Nothing is cached: callers recompute the whole set after
//! every change.

use crate::input::input_is_valid;
use crate::registry::behavior;
use crate::tabs::tab_label;
use canvas_expr::value::{display, truthy};
use canvas_expr::{BindingContext, Functions, evaluate_template};
use canvas_types::WidgetType;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::warn;

static FUNCTIONS: LazyLock<Functions> = LazyLock::new(|| {
    let mut functions = Functions::standard();
    functions.register("inputIsValid", 4, |args| {
        Ok(Value::Bool(input_is_valid(
            &display(&args[0]),
            &display(&args[1]),
            &display(&args[2]),
            truthy(&args[3]),
        )))
    });
    functions.register("tabLabel", 2, |args| Ok(tab_label(&args[0], &args[1])));
    functions
});

/// The function table available to widget bindings.
pub fn functions() -> &'static Functions {
    &FUNCTIONS
}

/// The value `this` refers to: properties with meta-state on top.
pub fn binding_this(properties: &Map<String, Value>, meta: &Map<String, Value>) -> Value {
    let mut this = properties.clone();
    this.extend(meta.iter().map(|(k, v)| (k.clone(), v.clone())));
    Value::Object(this)
}

/// Evaluates every derived property of `widget_type`.
pub fn evaluate(
    widget_type: WidgetType,
    properties: &Map<String, Value>,
    meta: &Map<String, Value>,
) -> Map<String, Value> {
    evaluate_with_context(widget_type, properties, meta, &Map::new())
}

/// Like [`evaluate`], with other widgets visible by name. `widgets` maps a
/// widget name to the state its bindings see.
///
/// A key whose expression fails evaluates to `null`.
pub fn evaluate_with_context(
    widget_type: WidgetType,
    properties: &Map<String, Value>,
    meta: &Map<String, Value>,
    widgets: &Map<String, Value>,
) -> Map<String, Value> {
    let mut ctx = BindingContext::new(binding_this(properties, meta), functions());
    for (name, state) in widgets {
        ctx.insert_widget(name.clone(), state.clone());
    }

    behavior(widget_type)
        .derived_properties()
        .iter()
        .map(|(key, template)| {
            let value = evaluate_template(template, &ctx).unwrap_or_else(|e| {
                warn!("Derived property {}.{} failed: {}", widget_type, key, e);
                Value::Null
            });
            ((*key).to_string(), value)
        })
        .collect()
}
