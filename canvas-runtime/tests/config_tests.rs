use canvas_runtime::{ActionExecutor, ActionRequest, NoopExecutor, RuntimeConfig, RuntimeError, init_tracing};
use canvas_types::{EventType, TriggerEvent, WidgetId};
use pretty_assertions::assert_eq;
use serde_json::{Map, json};
use std::io::Write;

// ── Config ──────────────────────────────────────────────────────

#[test]
fn defaults_dispatch_actions() {
    let config = RuntimeConfig::default();
    assert!(config.dispatch_actions);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn parses_runtime_table() {
    let config = RuntimeConfig::from_toml_str(
        r#"
        [runtime]
        dispatch-actions = false
        log-filter = "canvas_runtime=debug"
        "#,
    )
    .unwrap();

    assert!(!config.dispatch_actions);
    assert_eq!(config.log_filter, "canvas_runtime=debug");
}

#[test]
fn missing_fields_use_defaults() {
    assert_eq!(RuntimeConfig::from_toml_str("").unwrap(), RuntimeConfig::default());

    let partial = RuntimeConfig::from_toml_str("[runtime]\nlog-filter = \"warn\"\n").unwrap();
    assert!(partial.dispatch_actions);
    assert_eq!(partial.log_filter, "warn");
}

#[test]
fn malformed_toml_is_an_error() {
    let result = RuntimeConfig::from_toml_str("[runtime]\ndispatch-actions = \"maybe\"\n");
    assert!(matches!(result, Err(RuntimeError::Config(_))));
}

#[test]
fn load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::load_from(&dir.path().join("canvas.toml"));
    assert_eq!(config, RuntimeConfig::default());
}

#[test]
fn load_from_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[runtime]\ndispatch-actions = false").unwrap();

    let config = RuntimeConfig::load_from(file.path());
    assert!(!config.dispatch_actions);
}

#[test]
fn load_from_malformed_file_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[runtime").unwrap();

    assert_eq!(RuntimeConfig::load_from(file.path()), RuntimeConfig::default());
}

// ── Tracing ─────────────────────────────────────────────────────

#[test]
fn tracing_installs_once() {
    let _ = init_tracing("debug");
    assert!(!init_tracing("info"));
}

// ── Actions ─────────────────────────────────────────────────────

#[test]
fn noop_executor_accepts_everything() {
    let request = ActionRequest {
        widget_id: WidgetId::new(),
        widget_name: "Input1".into(),
        trigger_property: "onSubmit".into(),
        action: "{{ save.run() }}".into(),
        event: TriggerEvent::new(EventType::OnSubmit),
        meta: Map::new(),
    };
    assert!(tokio_test::block_on(NoopExecutor.execute(request)).is_ok());
}

#[test]
fn action_request_serializes_camel_case() {
    let request = ActionRequest {
        widget_id: WidgetId::new(),
        widget_name: "Input1".into(),
        trigger_property: "onTextChanged".into(),
        action: "{{ a.run() }}".into(),
        event: TriggerEvent::new(EventType::OnTextChange),
        meta: Map::new(),
    };
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["widgetName"], json!("Input1"));
    assert_eq!(value["triggerProperty"], json!("onTextChanged"));
    assert!(value.get("widget_name").is_none());
}
