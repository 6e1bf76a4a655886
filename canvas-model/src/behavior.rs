use crate::instance::{WidgetInstance, is_binding_expression};
use crate::schema::PropertySection;
use crate::validation::ValidationOutcome;
use canvas_types::WidgetType;
use serde_json::{Map, Value};

/// `(meta key, property name)` pairs: the meta key is seeded from the
/// property when a widget mounts (e.g. `text` from `defaultText`).
pub type DefaultPropertyMap = &'static [(&'static str, &'static str)];

/// `(derived key, binding template)` pairs evaluated against the widget's
/// properties and meta-state.
pub type DerivedPropertyMap = &'static [(&'static str, &'static str)];

/// Per-type widget behaviour.
///
/// Every widget type implements this; the registry in `canvas-widgets`
/// resolves a [`WidgetType`] to its implementation with an exhaustive match.
/// Only `widget_type` and `property_pane` are mandatory, the remaining hooks
/// default to "nothing declared".
pub trait WidgetBehavior: Send + Sync {
    fn widget_type(&self) -> WidgetType;

    /// The property pane, in display order.
    fn property_pane(&self) -> Vec<PropertySection>;

    /// Properties given to a freshly dropped widget.
    fn default_config(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Transient per-instance state and its initial values.
    fn meta_defaults(&self) -> Map<String, Value> {
        Map::new()
    }

    fn default_properties(&self) -> DefaultPropertyMap {
        &[]
    }

    fn derived_properties(&self) -> DerivedPropertyMap {
        &[]
    }

    /// Initial meta-state for a mounting instance: the declared defaults,
    /// overridden by any default-property source that is set.
    fn seed_meta(&self, instance: &WidgetInstance) -> Map<String, Value> {
        let mut meta = self.meta_defaults();
        for (meta_key, property) in self.default_properties() {
            if let Some(value) = instance.get(property).filter(|v| !v.is_null()) {
                meta.insert((*meta_key).to_string(), value.clone());
            }
        }
        meta
    }

    /// Called after an instance is loaded from storage, before it is mounted.
    fn on_after_load(&self, instance: &mut WidgetInstance) {
        let _ = instance;
    }

    /// Validates every literal property that declares a rule. Binding
    /// expressions are skipped; they are validated after evaluation.
    fn validate(&self, instance: &WidgetInstance) -> Vec<(String, ValidationOutcome)> {
        self.property_pane()
            .iter()
            .flat_map(|section| section.children.iter())
            .filter_map(|entry| {
                let rule = entry.validation.as_ref()?;
                let value = instance.get(&entry.property_name)?;
                if value.as_str().is_some_and(is_binding_expression) {
                    return None;
                }
                Some((
                    entry.property_name.clone(),
                    rule.validate(value, &instance.properties),
                ))
            })
            .collect()
    }
}
