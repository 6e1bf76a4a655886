use crate::validation::ValidationRule;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named group of property pane entries ("General", "Actions", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySection {
    pub section_name: String,
    pub children: Vec<PropertySchemaEntry>,
}

impl PropertySection {
    pub fn new(section_name: &str, children: Vec<PropertySchemaEntry>) -> Self {
        Self {
            section_name: section_name.into(),
            children,
        }
    }

    /// Finds an entry by property name.
    pub fn entry(&self, property_name: &str) -> Option<&PropertySchemaEntry> {
        self.children.iter().find(|e| e.property_name == property_name)
    }

    /// Entries visible for the given property values, in declaration order.
    pub fn visible_entries<'a>(
        &'a self,
        properties: &'a Map<String, Value>,
    ) -> impl Iterator<Item = &'a PropertySchemaEntry> + 'a {
        self.children.iter().filter(move |e| !e.is_hidden(properties))
    }
}

/// One configurable property of a widget type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchemaEntry {
    pub property_name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_text: Option<String>,
    pub control_type: ControlType,
    /// Choices offered by drop-down controls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<DropdownOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    /// The value may be a binding expression.
    pub is_bind_property: bool,
    /// The value is an action binding rather than data.
    pub is_trigger_property: bool,
    /// The control can be toggled into a raw binding editor.
    #[serde(default)]
    pub is_js_convertible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<HiddenWhen>,
}

impl PropertySchemaEntry {
    fn simple(property_name: &str, label: &str, control_type: ControlType) -> Self {
        Self {
            property_name: property_name.into(),
            label: label.into(),
            help_text: None,
            placeholder_text: None,
            control_type,
            options: Vec::new(),
            validation: None,
            is_bind_property: false,
            is_trigger_property: false,
            is_js_convertible: false,
            hidden: None,
        }
    }

    /// Shorthand for a bindable text input.
    pub fn input_text(property_name: &str, label: &str) -> Self {
        Self {
            is_bind_property: true,
            ..Self::simple(property_name, label, ControlType::InputText)
        }
    }

    /// Shorthand for a boolean switch. `bindable` switches are also JS-convertible.
    pub fn switch(property_name: &str, label: &str, bindable: bool) -> Self {
        Self {
            is_bind_property: bindable,
            is_js_convertible: bindable,
            validation: bindable.then_some(ValidationRule::Boolean),
            ..Self::simple(property_name, label, ControlType::Switch)
        }
    }

    /// Shorthand for a non-bindable drop-down.
    pub fn dropdown(property_name: &str, label: &str, options: Vec<DropdownOption>) -> Self {
        Self {
            options,
            ..Self::simple(property_name, label, ControlType::DropDown)
        }
    }

    /// Shorthand for an action selector (trigger property).
    pub fn action(property_name: &str, help_text: &str) -> Self {
        Self {
            help_text: Some(help_text.into()),
            is_bind_property: true,
            is_trigger_property: true,
            is_js_convertible: true,
            ..Self::simple(property_name, property_name, ControlType::ActionSelector)
        }
    }

    /// Shorthand for a colour picker.
    pub fn color(property_name: &str, label: &str) -> Self {
        Self::simple(property_name, label, ControlType::ColorPicker)
    }

    /// Shorthand for the tab list editor.
    pub fn tabs_input(property_name: &str, label: &str) -> Self {
        Self {
            is_bind_property: true,
            is_js_convertible: true,
            ..Self::simple(property_name, label, ControlType::TabsInput)
        }
    }

    #[must_use]
    pub fn help(mut self, text: &str) -> Self {
        self.help_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: &str) -> Self {
        self.placeholder_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn validated(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }

    #[must_use]
    pub fn hidden_when(mut self, predicate: HiddenWhen) -> Self {
        self.hidden = Some(predicate);
        self
    }

    /// Evaluates the visibility predicate against the current property values.
    pub fn is_hidden(&self, properties: &Map<String, Value>) -> bool {
        self.hidden.as_ref().is_some_and(|h| h.evaluate(properties))
    }
}

/// UI control used to edit a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlType {
    InputText,
    DropDown,
    Switch,
    ActionSelector,
    ColorPicker,
    TabsInput,
}

/// A labelled drop-down choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: Value,
}

impl DropdownOption {
    pub fn new(label: &str, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Visibility predicate over a widget's configured properties.
///
/// Predicates are plain data so schemas stay serializable, and they only
/// see persisted properties: visibility never depends on meta-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "when", rename_all = "snake_case")]
pub enum HiddenWhen {
    /// Hidden unless `property` equals `value`.
    PropertyNotEquals { property: String, value: Value },
    /// Hidden while `property` equals `value`.
    PropertyEquals { property: String, value: Value },
}

impl HiddenWhen {
    pub fn unless(property: &str, value: impl Into<Value>) -> Self {
        Self::PropertyNotEquals {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Returns `true` when the entry should be hidden.
    pub fn evaluate(&self, properties: &Map<String, Value>) -> bool {
        match self {
            Self::PropertyNotEquals { property, value } => properties.get(property) != Some(value),
            Self::PropertyEquals { property, value } => properties.get(property) == Some(value),
        }
    }
}
