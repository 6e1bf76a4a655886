use canvas_model::{WidgetInstance, is_binding_expression};
use canvas_types::WidgetType;
use pretty_assertions::assert_eq;
use serde_json::json;

fn make_input() -> WidgetInstance {
    WidgetInstance::new(WidgetType::Input, "Input1")
        .with_property("inputType", json!("TEXT"))
        .with_property("isRequired", json!(true))
        .with_property("maxChars", json!(12))
        .with_property("tabsObj", json!({"t1": {"label": "Tab 1"}}))
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn typed_accessors() {
    let w = make_input();
    assert_eq!(w.get_str("inputType"), Some("TEXT"));
    assert_eq!(w.get_bool("isRequired"), Some(true));
    assert_eq!(w.get_number("maxChars"), Some(12.0));
}

#[test]
fn typed_accessors_wrong_type_is_none() {
    let w = make_input();
    assert_eq!(w.get_bool("inputType"), None);
    assert_eq!(w.get_str("isRequired"), None);
    assert_eq!(w.get_number("missing"), None);
}

#[test]
fn pointer_descends_into_properties() {
    let w = make_input();
    assert_eq!(w.pointer("/tabsObj/t1/label"), Some(&json!("Tab 1")));
    assert_eq!(w.pointer("/inputType"), Some(&json!("TEXT")));
    assert_eq!(w.pointer("/tabsObj/t2"), None);
    assert_eq!(w.pointer("inputType"), None);
}

#[test]
fn set_and_remove_property() {
    let mut w = make_input();
    let previous = w.set_property("inputType", json!("EMAIL"));
    assert_eq!(previous, Some(json!("TEXT")));
    assert_eq!(w.remove_property("inputType"), Some(json!("EMAIL")));
    assert_eq!(w.get("inputType"), None);
}

#[test]
fn new_instance_is_unversioned() {
    let w = WidgetInstance::new(WidgetType::Iframe, "Iframe1");
    assert_eq!(w.version, None);
    assert!(w.properties.is_empty());
    assert_eq!(w.widget_name, "Iframe1");
}

// ── Binding detection ────────────────────────────────────────────

#[test]
fn binding_expression_detection() {
    assert!(is_binding_expression("{{Input1.text}}"));
    assert!(is_binding_expression("Hello {{ name }}!"));
    assert!(!is_binding_expression("plain"));
    assert!(!is_binding_expression("{{ unterminated"));
    assert!(!is_binding_expression("}} {{"));
}

#[test]
fn is_bound_checks_property() {
    let w = make_input().with_property("defaultText", json!("{{Other.text}}"));
    assert!(w.is_bound("defaultText"));
    assert!(!w.is_bound("inputType"));
    assert!(!w.is_bound("isRequired"));
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serializes_with_document_field_names() {
    let w = make_input();
    let json = serde_json::to_value(&w).unwrap();
    assert_eq!(json["type"], json!("INPUT_WIDGET"));
    assert_eq!(json["widgetName"], json!("Input1"));
    assert_eq!(json["widgetId"], json!(w.widget_id.to_string()));
    assert!(json.get("version").is_none());
}

#[test]
fn deserializes_legacy_record_without_version() {
    let id = canvas_types::WidgetId::new();
    let raw = json!({
        "widgetId": id.to_string(),
        "widgetName": "Tabs1",
        "type": "TABS_MIGRATOR_WIDGET",
        "properties": {"tabs": [{"label": "Tab 1"}]}
    });
    let w: WidgetInstance = serde_json::from_value(raw).unwrap();
    assert_eq!(w.widget_id, id);
    assert_eq!(w.widget_type, WidgetType::TabsMigrator);
    assert_eq!(w.version, None);
    assert_eq!(w.pointer("/tabs/0/label"), Some(&json!("Tab 1")));
}

#[test]
fn deserializing_unknown_type_fails() {
    let raw = json!({
        "widgetId": canvas_types::WidgetId::new().to_string(),
        "widgetName": "Chart1",
        "type": "CHART_WIDGET"
    });
    assert!(serde_json::from_value::<WidgetInstance>(raw).is_err());
}
