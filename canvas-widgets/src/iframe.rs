use crate::into_map;
use canvas_model::{
    DerivedPropertyMap, PropertySchemaEntry, PropertySection, ValidationRule, WidgetBehavior,
};
use canvas_types::WidgetType;
use serde_json::{Map, Value, json};

const DEFAULT_SOURCE: &str = "https://wikipedia.org";

/// Embeds an external page and relays its `postMessage` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct IframeWidget;

impl WidgetBehavior for IframeWidget {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Iframe
    }

    fn property_pane(&self) -> Vec<PropertySection> {
        vec![
            PropertySection::new(
                "General",
                vec![
                    PropertySchemaEntry::input_text("source", "Source")
                        .help("The URL of the page to embed")
                        .placeholder("Enter the URL of the page to embed")
                        .validated(ValidationRule::SafeUrl {
                            default: Some(DEFAULT_SOURCE.into()),
                        }),
                    PropertySchemaEntry::input_text("title", "Title")
                        .help("Label the content of the page to embed")
                        .placeholder("Enter the title of the page to embed")
                        .validated(ValidationRule::Text),
                ],
            ),
            PropertySection::new(
                "Actions",
                vec![
                    PropertySchemaEntry::action(
                        "onURLChanged",
                        "Triggers an action when the source URL is changed",
                    ),
                    PropertySchemaEntry::action(
                        "onMessageReceived",
                        "Triggers an action when a message event is received",
                    ),
                ],
            ),
            PropertySection::new(
                "Styles",
                vec![
                    PropertySchemaEntry::color("borderColor", "Border Color"),
                    PropertySchemaEntry::input_text("borderOpacity", "Border Opacity (%)").validated(
                        ValidationRule::Number {
                            min: Some(0.0),
                            max: Some(100.0),
                            default: Some(100.0),
                        },
                    ),
                    PropertySchemaEntry::input_text("borderWidth", "Border Width (px)").validated(
                        ValidationRule::Number {
                            min: Some(0.0),
                            max: None,
                            default: Some(1.0),
                        },
                    ),
                ],
            ),
        ]
    }

    fn default_config(&self) -> Map<String, Value> {
        into_map(json!({
            "source": DEFAULT_SOURCE,
            "borderOpacity": 100,
            "borderWidth": 1,
        }))
    }

    fn meta_defaults(&self) -> Map<String, Value> {
        into_map(json!({ "message": null }))
    }

    fn derived_properties(&self) -> DerivedPropertyMap {
        &[("value", "{{ this.message }}")]
    }
}
