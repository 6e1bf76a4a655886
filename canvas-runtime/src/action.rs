//! Bound-action dispatch.
//!
//! Executing an action (running a query, navigating, showing an alert) is
//! the host's job. The runtime only hands it an [`ActionRequest`] through
//! the [`ActionExecutor`] seam and never waits for the result.

use crate::error::RuntimeResult;
use async_trait::async_trait;
use canvas_types::{TriggerEvent, WidgetId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Everything an executor needs to run one bound action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub widget_id: WidgetId,
    pub widget_name: String,
    /// The trigger property the action is bound to (e.g. `onTextChanged`).
    pub trigger_property: String,
    /// The action binding, as configured on the widget.
    pub action: String,
    pub event: TriggerEvent,
    /// Meta-state of the widget after the write that fired the trigger.
    pub meta: Map<String, Value>,
}

/// Runs bound actions on behalf of the runtime.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    /// Executes one action. Errors are logged by the runtime and dropped.
    async fn execute(&self, request: ActionRequest) -> RuntimeResult<()>;
}

/// Executor that discards every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExecutor;

#[async_trait]
impl ActionExecutor for NoopExecutor {
    async fn execute(&self, request: ActionRequest) -> RuntimeResult<()> {
        debug!(
            "Discarding action {} of {}.{}",
            request.action, request.widget_name, request.trigger_property
        );
        Ok(())
    }
}
