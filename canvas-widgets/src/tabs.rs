use crate::into_map;
use crate::migrate;
use canvas_model::{
    DefaultPropertyMap, DerivedPropertyMap, KeyDefault, ObjectKey, PropertySchemaEntry,
    PropertySection, ValidationRule, WidgetBehavior, WidgetInstance, generate_key,
};
use canvas_types::WidgetType;
use serde_json::{Map, Value, json};

/// Label of the tab whose `widgetId` is `widget_id`, or `null`.
pub fn tab_label(tabs_obj: &Value, widget_id: &Value) -> Value {
    let Some(widget_id) = widget_id.as_str() else {
        return Value::Null;
    };
    tabs(tabs_obj)
        .find(|tab| tab.get("widgetId").and_then(Value::as_str) == Some(widget_id))
        .and_then(|tab| tab.get("label").cloned())
        .unwrap_or(Value::Null)
}

/// The tab selected when a tabs widget mounts: the tab labelled
/// `default_tab`, else the first tab by `index`.
pub fn resolve_tab_widget_id(tabs_obj: &Value, default_tab: Option<&str>) -> Option<String> {
    let widget_id = |tab: &Value| tab.get("widgetId").and_then(Value::as_str).map(str::to_string);

    if let Some(label) = default_tab.filter(|l| !l.is_empty()) {
        if let Some(id) = tabs(tabs_obj)
            .find(|tab| tab.get("label").and_then(Value::as_str) == Some(label))
            .and_then(widget_id)
        {
            return Some(id);
        }
    }
    tabs(tabs_obj)
        .min_by_key(|tab| tab.get("index").and_then(Value::as_u64).unwrap_or(u64::MAX))
        .and_then(widget_id)
}

fn tabs(tabs_obj: &Value) -> impl Iterator<Item = &Value> {
    tabs_obj.as_object().into_iter().flat_map(|m| m.values())
}

fn general_section(tabs_entry: PropertySchemaEntry) -> PropertySection {
    PropertySection::new(
        "General",
        vec![
            tabs_entry,
            PropertySchemaEntry::switch("shouldShowTabs", "Show Tabs", false)
                .help("Hides the tabs so that different widgets can be displayed based on the default tab"),
            PropertySchemaEntry::input_text("defaultTab", "Default Tab")
                .help("Selects a tab name specified by default")
                .placeholder("Enter tab name")
                .validated(ValidationRule::TabName),
            PropertySchemaEntry::switch("shouldScrollContents", "Scroll Contents", false),
            PropertySchemaEntry::switch("isVisible", "Visible", true)
                .help("Controls the visibility of the widget"),
        ],
    )
}

fn actions_section() -> PropertySection {
    PropertySection::new(
        "Actions",
        vec![PropertySchemaEntry::action(
            "onTabSelected",
            "Triggers an action when the button is clicked",
        )],
    )
}

/// Container showing one child canvas per tab, keyed in `tabsObj`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabsWidget;

impl WidgetBehavior for TabsWidget {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Tabs
    }

    fn property_pane(&self) -> Vec<PropertySection> {
        vec![
            general_section(
                PropertySchemaEntry::tabs_input("tabsObj", "Tabs")
                    .help("Tabs of the widget, keyed by id")
                    .validated(ValidationRule::Object {
                        allowed_keys: Vec::new(),
                    }),
            ),
            actions_section(),
        ]
    }

    fn default_config(&self) -> Map<String, Value> {
        into_map(json!({
            "tabsObj": {
                "tab1": {
                    "label": "Tab 1",
                    "id": "tab1",
                    "widgetId": generate_key(),
                    "isVisible": true,
                    "index": 0,
                },
                "tab2": {
                    "label": "Tab 2",
                    "id": "tab2",
                    "widgetId": generate_key(),
                    "isVisible": true,
                    "index": 1,
                },
            },
            "shouldShowTabs": true,
            "defaultTab": "Tab 1",
            "shouldScrollContents": false,
            "isVisible": true,
        }))
    }

    fn meta_defaults(&self) -> Map<String, Value> {
        into_map(json!({ "selectedTabWidgetId": null }))
    }

    fn default_properties(&self) -> DefaultPropertyMap {
        &[("selectedTabWidgetId", "defaultTab")]
    }

    fn derived_properties(&self) -> DerivedPropertyMap {
        &[(
            "selectedTab",
            "{{ tabLabel(this.tabsObj, this.selectedTabWidgetId) }}",
        )]
    }

    /// `defaultTab` holds a label, so it is resolved to that tab's widget id.
    fn seed_meta(&self, instance: &WidgetInstance) -> Map<String, Value> {
        let mut meta = self.meta_defaults();
        let tabs_obj = instance.get("tabsObj").cloned().unwrap_or(Value::Null);
        if let Some(id) = resolve_tab_widget_id(&tabs_obj, instance.get_str("defaultTab")) {
            meta.insert("selectedTabWidgetId".into(), Value::String(id));
        }
        meta
    }

    fn on_after_load(&self, instance: &mut WidgetInstance) {
        migrate::migrate_in_place(instance);
    }
}

/// Placeholder type for tabs saved before `tabsObj` existed. It renders
/// nothing and is rewritten into a [`TabsWidget`] when loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabsMigratorWidget;

impl WidgetBehavior for TabsMigratorWidget {
    fn widget_type(&self) -> WidgetType {
        WidgetType::TabsMigrator
    }

    fn property_pane(&self) -> Vec<PropertySection> {
        let tab_item = ValidationRule::Object {
            allowed_keys: vec![
                ObjectKey::new("label", ValidationRule::Text),
                ObjectKey::new("id", ValidationRule::Text).with_default(KeyDefault::GeneratedKey),
                ObjectKey::new("widgetId", ValidationRule::Text)
                    .with_default(KeyDefault::GeneratedKey),
            ],
        };
        vec![
            general_section(
                PropertySchemaEntry::tabs_input("tabs", "Tabs")
                    .help("Takes an array of tab names to render tabs")
                    .validated(ValidationRule::Array {
                        children: Some(Box::new(tab_item)),
                    }),
            ),
            actions_section(),
        ]
    }

    fn default_config(&self) -> Map<String, Value> {
        into_map(json!({
            "tabs": [
                { "label": "Tab 1", "id": "tab1", "widgetId": generate_key() },
                { "label": "Tab 2", "id": "tab2", "widgetId": generate_key() },
            ],
            "shouldShowTabs": true,
            "defaultTab": "Tab 1",
            "shouldScrollContents": false,
            "isVisible": true,
        }))
    }

    fn on_after_load(&self, instance: &mut WidgetInstance) {
        migrate::migrate_in_place(instance);
    }
}
