use canvas_types::WidgetType;
use canvas_widgets::derived::{binding_this, evaluate, evaluate_with_context, functions};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

fn map(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn input(input_type: &str, regex: &str, is_required: bool, text: Value) -> Map<String, Value> {
    let properties = map(json!({
        "inputType": input_type,
        "regex": regex,
        "isRequired": is_required,
    }));
    let meta = map(json!({ "text": text }));
    evaluate(WidgetType::Input, &properties, &meta)
}

// ── Input ────────────────────────────────────────────────────────

#[test]
fn email_validity_and_value() {
    let derived = input("EMAIL", "", false, json!("a@b.co"));
    assert_eq!(derived["isValid"], json!(true));
    assert_eq!(derived["value"], json!("a@b.co"));

    let derived = input("EMAIL", "", false, json!("a@b"));
    assert_eq!(derived["isValid"], json!(false));
    assert_eq!(derived["value"], json!("a@b"));
}

#[test]
fn number_validity() {
    assert_eq!(input("NUMBER", "", false, json!(""))["isValid"], json!(true));
    assert_eq!(input("NUMBER", "", false, json!("12a"))["isValid"], json!(false));
    assert_eq!(input("NUMBER", "", false, json!("12"))["isValid"], json!(true));
}

#[test]
fn text_validity() {
    assert_eq!(input("TEXT", "", true, json!(""))["isValid"], json!(false));
    assert_eq!(input("TEXT", "", true, json!("x"))["isValid"], json!(true));
}

#[test]
fn missing_text_counts_as_empty() {
    let derived = input("TEXT", "", true, Value::Null);
    assert_eq!(derived["isValid"], json!(false));
    assert_eq!(derived["value"], Value::Null);

    let properties = map(json!({ "inputType": "NUMBER" }));
    let derived = evaluate(WidgetType::Input, &properties, &Map::new());
    assert_eq!(derived["isValid"], json!(true));
}

#[test]
fn unterminated_regex_does_not_fail() {
    let derived = input("TEXT", "/abc", false, json!("xx/abcxx"));
    assert_eq!(derived["isValid"], json!(true));
    let derived = input("TEXT", "/abc", false, json!("abc"));
    assert_eq!(derived["isValid"], json!(false));
}

#[test]
fn derived_keys_are_exactly_the_declared_ones() {
    let derived = input("TEXT", "", false, json!("x"));
    let mut keys: Vec<_> = derived.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["isValid", "value"]);
}

#[test]
fn evaluation_leaves_inputs_untouched() {
    let properties = map(json!({ "inputType": "TEXT", "regex": "^a" }));
    let meta = map(json!({ "text": "abc" }));
    let (p, m) = (properties.clone(), meta.clone());
    let _ = evaluate(WidgetType::Input, &properties, &meta);
    assert_eq!(properties, p);
    assert_eq!(meta, m);
}

// ── Iframe and Tabs ──────────────────────────────────────────────

#[test]
fn iframe_value_mirrors_message() {
    let meta = map(json!({ "message": { "kind": "ping" } }));
    let derived = evaluate(WidgetType::Iframe, &Map::new(), &meta);
    assert_eq!(derived["value"], json!({ "kind": "ping" }));
}

#[test]
fn tabs_selected_label() {
    let properties = map(json!({
        "tabsObj": {
            "t1": { "id": "t1", "label": "First", "widgetId": "w1", "index": 0 },
            "t2": { "id": "t2", "label": "Second", "widgetId": "w2", "index": 1 },
        }
    }));
    let meta = map(json!({ "selectedTabWidgetId": "w2" }));
    let derived = evaluate(WidgetType::Tabs, &properties, &meta);
    assert_eq!(derived["selectedTab"], json!("Second"));

    let meta = map(json!({ "selectedTabWidgetId": "nope" }));
    assert_eq!(evaluate(WidgetType::Tabs, &properties, &meta)["selectedTab"], Value::Null);
}

#[test]
fn migrator_declares_nothing_derived() {
    assert!(evaluate(WidgetType::TabsMigrator, &Map::new(), &Map::new()).is_empty());
}

// ── Binding context ──────────────────────────────────────────────

#[test]
fn meta_overlays_properties_in_this() {
    let this = binding_this(&map(json!({"a": 1, "b": 2})), &map(json!({"b": 3})));
    assert_eq!(this, json!({"a": 1, "b": 3}));
}

#[test]
fn widgets_in_context_do_not_leak_into_this() {
    let widgets = map(json!({ "Input2": { "text": "other" } }));
    let meta = map(json!({ "text": "mine" }));
    let derived = evaluate_with_context(WidgetType::Input, &Map::new(), &meta, &widgets);
    assert_eq!(derived["value"], json!("mine"));
}

#[test]
fn widget_functions_are_registered() {
    assert!(functions().contains("inputIsValid"));
    assert!(functions().contains("tabLabel"));
    assert!(functions().contains("upper"));
    assert!(!functions().contains("fetch"));
}
