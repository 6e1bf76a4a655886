//! Widget interaction handlers.
//!
//! These are the entry points a rendering layer calls on user input. Each
//! one checks the widget type and then goes through the update protocol.

use crate::error::RuntimeResult;
use crate::runtime::{UpdateOutcome, WidgetRuntime};
use canvas_expr::value::truthy;
use canvas_types::{EventType, Trigger, TriggerEvent, WidgetId, WidgetType};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

impl WidgetRuntime {
    // ── Input ────────────────────────────────────────────────────

    /// The user edited the text. Fires `onTextChanged` and marks the input
    /// dirty on the first edit.
    pub fn on_text_changed(&mut self, id: WidgetId, text: &str) -> RuntimeResult<UpdateOutcome> {
        self.expect_type(id, WidgetType::Input)?;
        let outcome = self.request_update(
            id,
            "text",
            Value::String(text.to_string()),
            Some(Trigger::new("onTextChanged", EventType::OnTextChange)),
        )?;
        if !truthy(&self.read_meta(id, "isDirty")?) {
            self.request_update(id, "isDirty", Value::Bool(true), None)?;
        }
        Ok(outcome)
    }

    pub fn on_focus_changed(&mut self, id: WidgetId, focused: bool) -> RuntimeResult<()> {
        self.expect_type(id, WidgetType::Input)?;
        self.request_update(id, "isFocused", Value::Bool(focused), None)?;
        Ok(())
    }

    /// Whether pressing enter submits: `onSubmit` must be bound and the
    /// current text valid.
    pub fn can_submit(&self, id: WidgetId) -> RuntimeResult<bool> {
        let instance = self.expect_type(id, WidgetType::Input)?;
        let bound = instance
            .get_str("onSubmit")
            .is_some_and(|a| !a.trim().is_empty());
        Ok(bound && self.derived(id)?.get("isValid") == Some(&Value::Bool(true)))
    }

    /// Enter was pressed: dispatches `onSubmit` if [`can_submit`](Self::can_submit).
    pub fn submit(&self, id: WidgetId) -> RuntimeResult<Option<JoinHandle<()>>> {
        if !self.can_submit(id)? {
            return Ok(None);
        }
        self.execute_action(id, Trigger::new("onSubmit", EventType::OnSubmit))
    }

    /// Completion of the `onSubmit` action. Clears the text when the
    /// action succeeded and `resetOnSubmit` is set.
    pub fn on_submit_succeeded(
        &mut self,
        id: WidgetId,
        success: bool,
    ) -> RuntimeResult<Option<UpdateOutcome>> {
        self.expect_type(id, WidgetType::Input)?;
        let reset = self
            .resolved_properties(id)?
            .get("resetOnSubmit")
            .is_some_and(truthy);
        if !(success && reset) {
            return Ok(None);
        }
        self.request_update(
            id,
            "text",
            Value::String(String::new()),
            Some(Trigger::new("onTextChanged", EventType::OnTextChange)),
        )
        .map(Some)
    }

    // ── Iframe ───────────────────────────────────────────────────

    /// A `postMessage` arrived. Messages from origins outside the
    /// configured source are ignored.
    pub fn on_message_received(
        &mut self,
        id: WidgetId,
        origin: &str,
        data: Value,
    ) -> RuntimeResult<Option<UpdateOutcome>> {
        self.expect_type(id, WidgetType::Iframe)?;
        let source = self
            .resolved_properties(id)?
            .get("source")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default();
        if !source.contains(origin) {
            debug!("Ignoring message from {} (source {})", origin, source);
            return Ok(None);
        }
        self.request_update(
            id,
            "message",
            data,
            Some(Trigger::new("onMessageReceived", EventType::OnIframeMessageReceived)),
        )
        .map(Some)
    }

    /// The embedded page navigated. Fires `onURLChanged` for a non-empty url.
    pub fn on_url_changed(&self, id: WidgetId, url: &str) -> RuntimeResult<Option<JoinHandle<()>>> {
        self.expect_type(id, WidgetType::Iframe)?;
        if url.is_empty() {
            return Ok(None);
        }
        let trigger = Trigger::new("onURLChanged", EventType::OnIframeUrlChanged).with_event(
            TriggerEvent::new(EventType::OnIframeUrlChanged).with_payload(Value::String(url.into())),
        );
        self.execute_action(id, trigger)
    }

    // ── Tabs ─────────────────────────────────────────────────────

    /// A tab header was clicked.
    pub fn on_tab_selected(
        &mut self,
        id: WidgetId,
        tab_widget_id: &str,
    ) -> RuntimeResult<UpdateOutcome> {
        self.expect_type(id, WidgetType::Tabs)?;
        self.request_update(
            id,
            "selectedTabWidgetId",
            Value::String(tab_widget_id.to_string()),
            Some(Trigger::new("onTabSelected", EventType::OnTabChange)),
        )
    }
}
