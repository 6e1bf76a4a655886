//! The update protocol.
//!
//! [`WidgetRuntime`] owns the mounted widgets and their meta-state. All
//! meta-state writes go through [`WidgetRuntime::request_update`], which
//! writes synchronously and only then hands any bound action to the
//! [`ActionExecutor`] on a separate task. A caller reading meta-state right
//! after an update therefore always sees the new value, whether or not the
//! action has finished.

use crate::action::{ActionExecutor, ActionRequest, NoopExecutor};
use crate::config::RuntimeConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::meta::MetaStore;
use canvas_expr::BindingContext;
use canvas_model::{WidgetInstance, is_binding_expression};
use canvas_types::{Trigger, WidgetId, WidgetType};
use canvas_widgets::{KeyKind, derived, get_schema, load};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Result of a successful [`WidgetRuntime::request_update`].
#[derive(Debug)]
pub struct UpdateOutcome {
    /// Value held by the key before the write (`null` if unset).
    pub previous: Value,
    /// Task running the bound action, if one was dispatched. Dropping the
    /// handle does not cancel the action.
    pub dispatch: Option<JoinHandle<()>>,
}

impl UpdateOutcome {
    pub fn dispatched(&self) -> bool {
        self.dispatch.is_some()
    }
}

/// Live widgets, their meta-state and the action dispatch seam.
pub struct WidgetRuntime {
    config: RuntimeConfig,
    executor: Arc<dyn ActionExecutor>,
    widgets: HashMap<WidgetId, WidgetInstance>,
    meta: MetaStore,
}

impl WidgetRuntime {
    /// Creates a runtime whose actions go nowhere.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_executor(config, Arc::new(NoopExecutor))
    }

    /// Creates a runtime dispatching bound actions to `executor`.
    pub fn with_executor(config: RuntimeConfig, executor: Arc<dyn ActionExecutor>) -> Self {
        Self {
            config,
            executor,
            widgets: HashMap::new(),
            meta: MetaStore::new(),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Read-only view of the meta-state store.
    pub fn meta(&self) -> &MetaStore {
        &self.meta
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Mounts a widget loaded from storage (or freshly created): applies
    /// pending migrations, then seeds its meta-state. Mounting an id that
    /// is already mounted replaces it and re-seeds its meta-state.
    pub fn mount(&mut self, instance: WidgetInstance) -> WidgetId {
        let instance = load(instance);
        let id = instance.widget_id;
        info!("Mounted {} {} ({})", instance.widget_type, instance.widget_name, id);
        self.widgets.insert(id, instance);
        self.seed(id);
        id
    }

    /// Removes a widget and its meta-state.
    pub fn unmount(&mut self, id: WidgetId) -> Option<WidgetInstance> {
        self.meta.unregister(id);
        let removed = self.widgets.remove(&id);
        if let Some(instance) = &removed {
            info!("Unmounted {} ({})", instance.widget_name, id);
        }
        removed
    }

    /// Restores a widget's meta-state to its seeded values.
    pub fn reset_meta(&mut self, id: WidgetId) -> RuntimeResult<()> {
        if !self.seed(id) {
            return Err(RuntimeError::WidgetNotMounted(id));
        }
        debug!("Reset meta-state of {}", id);
        Ok(())
    }

    /// Seeds meta-state from the widget's properties. Bound defaults (a
    /// `defaultText` of `{{ Other.text }}`) seed from their evaluated value.
    fn seed(&mut self, id: WidgetId) -> bool {
        let Some(instance) = self.widgets.get(&id) else {
            return false;
        };
        self.meta.seed(instance);
        let has_bindings = instance
            .properties
            .values()
            .any(|v| v.as_str().is_some_and(is_binding_expression));
        if has_bindings && let Ok(properties) = self.resolved_properties(id) {
            let resolved = WidgetInstance {
                properties,
                ..instance.clone()
            };
            self.meta.seed(&resolved);
        }
        true
    }

    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    pub fn instance(&self, id: WidgetId) -> Option<&WidgetInstance> {
        self.widgets.get(&id)
    }

    /// Finds a mounted widget by name.
    pub fn find_by_name(&self, widget_name: &str) -> Option<WidgetId> {
        self.widgets
            .values()
            .find(|w| w.widget_name == widget_name)
            .map(|w| w.widget_id)
    }

    // ── Update protocol ──────────────────────────────────────────

    /// Writes `value` into the meta-state of `id` and, if `trigger` names a
    /// property holding an action binding, dispatches that action.
    ///
    /// The write is visible to [`read_meta`](Self::read_meta) and
    /// [`derived`](Self::derived) as soon as this returns. The action runs on
    /// a spawned task and sees the meta-state as of this write; its outcome
    /// never affects the update.
    pub fn request_update(
        &mut self,
        id: WidgetId,
        key: &str,
        value: Value,
        trigger: Option<Trigger>,
    ) -> RuntimeResult<UpdateOutcome> {
        let instance = self.widgets.get(&id).ok_or(RuntimeError::WidgetNotMounted(id))?;
        let kind = KeyKind::of(instance.widget_type, key);
        if !kind.is_writable_meta() {
            return Err(RuntimeError::NotAMetaKey {
                widget_type: instance.widget_type,
                key: key.to_string(),
                kind,
            });
        }

        let previous = self.meta.write(id, key, value)?;
        debug!("{}.{} updated", instance.widget_name, key);

        let dispatch = match trigger {
            Some(trigger) => self.execute_action(id, trigger)?,
            None => None,
        };
        Ok(UpdateOutcome { previous, dispatch })
    }

    /// Dispatches the action bound to `trigger.property` without writing
    /// meta-state. Returns `None` when the property holds no action, action
    /// dispatch is disabled, or no async runtime is available.
    pub fn execute_action(
        &self,
        id: WidgetId,
        trigger: Trigger,
    ) -> RuntimeResult<Option<JoinHandle<()>>> {
        let instance = self.widgets.get(&id).ok_or(RuntimeError::WidgetNotMounted(id))?;
        let Some(action) = instance
            .get_str(&trigger.property)
            .filter(|a| !a.trim().is_empty())
        else {
            return Ok(None);
        };
        if !self.config.dispatch_actions {
            debug!("Action dispatch disabled, skipping {}.{}", instance.widget_name, trigger.property);
            return Ok(None);
        }
        let Ok(handle) = Handle::try_current() else {
            warn!(
                "No async runtime, dropping {}.{} action",
                instance.widget_name, trigger.property
            );
            return Ok(None);
        };

        let request = ActionRequest {
            widget_id: id,
            widget_name: instance.widget_name.clone(),
            trigger_property: trigger.property,
            action: action.to_string(),
            event: trigger.event,
            meta: self.meta.snapshot(id).unwrap_or_default(),
        };
        debug!(
            "Dispatching {}.{} ({})",
            request.widget_name, request.trigger_property, request.event.event_type
        );

        let executor = Arc::clone(&self.executor);
        Ok(Some(handle.spawn(async move {
            let (name, property) = (request.widget_name.clone(), request.trigger_property.clone());
            if let Err(e) = executor.execute(request).await {
                warn!("Action {}.{} failed: {}", name, property, e);
            }
        })))
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Current meta value of `key` (declared default or `null` if unset).
    pub fn read_meta(&self, id: WidgetId, key: &str) -> RuntimeResult<Value> {
        if !self.is_mounted(id) {
            return Err(RuntimeError::WidgetNotMounted(id));
        }
        Ok(self.meta.read(id, key))
    }

    /// Properties of `id` with bindings evaluated against the mounted
    /// widgets and coerced by their validation rules. Action bindings are
    /// left as written. A binding that fails to evaluate yields `null`, which
    /// the rule then coerces.
    pub fn resolved_properties(&self, id: WidgetId) -> RuntimeResult<Map<String, Value>> {
        let instance = self.widgets.get(&id).ok_or(RuntimeError::WidgetNotMounted(id))?;
        let meta = self.meta.snapshot(id).unwrap_or_default();
        let mut ctx = BindingContext::new(
            derived::binding_this(&instance.properties, &meta),
            derived::functions(),
        );
        for other in self.widgets.values() {
            ctx.insert_widget(other.widget_name.clone(), self.widget_state(other));
        }

        let schema = get_schema(instance.widget_type);
        let find_entry = |name: &str| schema.iter().find_map(|section| section.entry(name));

        let mut resolved = instance.properties.clone();
        for (name, value) in resolved.iter_mut() {
            let Some(source) = value.as_str().filter(|s| is_binding_expression(s)) else {
                continue;
            };
            let entry = find_entry(name);
            if entry.is_some_and(|e| e.is_trigger_property) {
                continue;
            }
            let evaluated = canvas_expr::evaluate_template(source, &ctx).unwrap_or_else(|e| {
                warn!("Binding {}.{} failed: {}", instance.widget_name, name, e);
                Value::Null
            });
            *value = match entry.and_then(|e| e.validation.as_ref()) {
                Some(rule) => rule.validate(&evaluated, &instance.properties).parsed,
                None => evaluated,
            };
        }
        Ok(resolved)
    }

    /// Derived properties of `id`, recomputed from its resolved properties
    /// and current meta-state.
    pub fn derived(&self, id: WidgetId) -> RuntimeResult<Map<String, Value>> {
        let properties = self.resolved_properties(id)?;
        let instance = self.widgets.get(&id).ok_or(RuntimeError::WidgetNotMounted(id))?;
        let meta = self.meta.snapshot(id).unwrap_or_default();
        let widgets: Map<String, Value> = self
            .widgets
            .values()
            .filter(|w| w.widget_id != id)
            .map(|w| (w.widget_name.clone(), self.widget_state(w)))
            .collect();
        Ok(derived::evaluate_with_context(
            instance.widget_type,
            &properties,
            &meta,
            &widgets,
        ))
    }

    /// What other widgets' bindings see of `instance`: its raw properties,
    /// meta-state and derived values.
    fn widget_state(&self, instance: &WidgetInstance) -> Value {
        let meta = self.meta.snapshot(instance.widget_id).unwrap_or_default();
        let mut state = derived::binding_this(&instance.properties, &meta);
        if let Value::Object(map) = &mut state {
            map.extend(derived::evaluate(instance.widget_type, &instance.properties, &meta));
        }
        state
    }

    /// Fails unless `id` is a mounted widget of `expected` type.
    pub(crate) fn expect_type(&self, id: WidgetId, expected: WidgetType) -> RuntimeResult<&WidgetInstance> {
        let instance = self.widgets.get(&id).ok_or(RuntimeError::WidgetNotMounted(id))?;
        if instance.widget_type != expected {
            return Err(RuntimeError::WrongWidgetType {
                expected,
                actual: instance.widget_type,
            });
        }
        Ok(instance)
    }
}
