//! Validation rules for configured property values.
//!
//! A rule both checks and coerces: the property pane shows `message` for an
//! invalid value while the widget keeps working with `parsed`.

use crate::pattern::TextPattern;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a property value is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationRule {
    Text,
    Boolean,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<f64>,
    },
    Regex,
    SafeUrl {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        children: Option<Box<ValidationRule>>,
    },
    Object {
        allowed_keys: Vec<ObjectKey>,
    },
    /// Must name one of the widget's tabs.
    TabName,
}

/// A key accepted by [`ValidationRule::Object`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectKey {
    pub name: String,
    pub rule: ValidationRule,
    #[serde(default)]
    pub default: KeyDefault,
}

impl ObjectKey {
    pub fn new(name: &str, rule: ValidationRule) -> Self {
        Self {
            name: name.into(),
            rule,
            default: KeyDefault::None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: KeyDefault) -> Self {
        self.default = default;
        self
    }
}

/// Value filled in for a missing object key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KeyDefault {
    #[default]
    None,
    Value(Value),
    /// A freshly generated unique key, see [`generate_key`].
    GeneratedKey,
}

impl KeyDefault {
    fn produce(&self) -> Option<Value> {
        match self {
            Self::None => None,
            Self::Value(v) => Some(v.clone()),
            Self::GeneratedKey => Some(Value::String(generate_key())),
        }
    }
}

/// Result of validating one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// The coerced value the widget should use.
    pub parsed: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn valid(parsed: Value) -> Self {
        Self {
            is_valid: true,
            parsed,
            message: None,
        }
    }

    pub fn invalid(parsed: Value, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            parsed,
            message: Some(message.into()),
        }
    }
}

/// Generates a short random key for tabs and other keyed children.
pub fn generate_key() -> String {
    let mut key = uuid::Uuid::new_v4().simple().to_string();
    key.truncate(10);
    key
}

impl ValidationRule {
    /// Validates `value`. `properties` is the owning widget's property map,
    /// needed by rules that cross-reference other properties.
    pub fn validate(&self, value: &Value, properties: &Map<String, Value>) -> ValidationOutcome {
        match self {
            Self::Text => validate_text(value),
            Self::Boolean => validate_boolean(value),
            Self::Number { min, max, default } => validate_number(value, *min, *max, *default),
            Self::Regex => validate_regex(value),
            Self::SafeUrl { default } => validate_url(value, default.as_deref()),
            Self::Array { children } => validate_array(value, children.as_deref(), properties),
            Self::Object { allowed_keys } => validate_object(value, allowed_keys, properties),
            Self::TabName => validate_tab_name(value, properties),
        }
    }
}

fn validate_text(value: &Value) -> ValidationOutcome {
    match value {
        Value::String(_) => ValidationOutcome::valid(value.clone()),
        Value::Null => ValidationOutcome::valid(Value::String(String::new())),
        Value::Bool(b) => ValidationOutcome::valid(Value::String(b.to_string())),
        Value::Number(n) => ValidationOutcome::valid(Value::String(n.to_string())),
        Value::Array(_) | Value::Object(_) => ValidationOutcome::invalid(
            Value::String(value.to_string()),
            "This value does not evaluate to type string",
        ),
    }
}

fn validate_boolean(value: &Value) -> ValidationOutcome {
    match value {
        Value::Bool(_) => ValidationOutcome::valid(value.clone()),
        Value::Null => ValidationOutcome::valid(Value::Bool(false)),
        Value::String(s) if s == "true" => ValidationOutcome::valid(Value::Bool(true)),
        Value::String(s) if s == "false" => ValidationOutcome::valid(Value::Bool(false)),
        _ => ValidationOutcome::invalid(
            Value::Bool(false),
            "This value does not evaluate to type boolean",
        ),
    }
}

fn validate_number(
    value: &Value,
    min: Option<f64>,
    max: Option<f64>,
    default: Option<f64>,
) -> ValidationOutcome {
    let fallback = default.map(number_value).unwrap_or(Value::Null);
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                return ValidationOutcome::invalid(
                    fallback,
                    "This value does not evaluate to type number",
                );
            }
        },
        Value::Null => None,
        _ => {
            return ValidationOutcome::invalid(
                fallback,
                "This value does not evaluate to type number",
            );
        }
    };

    let Some(n) = n else {
        return if default.is_some() {
            ValidationOutcome::valid(fallback)
        } else {
            ValidationOutcome::invalid(fallback, "This value does not evaluate to type number")
        };
    };

    if let Some(min) = min.filter(|min| n < *min) {
        return ValidationOutcome::invalid(
            default.map_or_else(|| number_value(n), number_value),
            format!("Minimum allowed value: {}", number_value(min)),
        );
    }
    if let Some(max) = max.filter(|max| n > *max) {
        return ValidationOutcome::invalid(
            default.map_or_else(|| number_value(n), number_value),
            format!("Maximum allowed value: {}", number_value(max)),
        );
    }
    ValidationOutcome::valid(number_value(n))
}

fn validate_regex(value: &Value) -> ValidationOutcome {
    match value {
        Value::Null => ValidationOutcome::valid(Value::String(String::new())),
        Value::String(s) => match TextPattern::parse(s) {
            Some(p) if p.is_literal_fallback() => {
                ValidationOutcome::invalid(
                    value.clone(),
                    "Unsupported regex pattern, it is matched as literal text",
                )
            }
            _ => ValidationOutcome::valid(value.clone()),
        },
        _ => ValidationOutcome::invalid(
            Value::String(String::new()),
            "This value does not evaluate to type regex",
        ),
    }
}

fn validate_url(value: &Value, default: Option<&str>) -> ValidationOutcome {
    let fallback = Value::String(default.unwrap_or_default().to_string());
    match value {
        Value::Null => ValidationOutcome::valid(fallback),
        Value::String(s) => {
            let lower = s.trim().to_ascii_lowercase();
            if lower.starts_with("https://") || lower.starts_with("http://") {
                ValidationOutcome::valid(Value::String(s.trim().to_string()))
            } else {
                ValidationOutcome::invalid(fallback, "Please provide a valid url")
            }
        }
        _ => ValidationOutcome::invalid(fallback, "Please provide a valid url"),
    }
}

fn validate_array(
    value: &Value,
    children: Option<&ValidationRule>,
    properties: &Map<String, Value>,
) -> ValidationOutcome {
    let items = match value {
        Value::Array(items) => items.clone(),
        Value::String(s) => match serde_json::from_str::<Vec<Value>>(s) {
            Ok(items) => items,
            Err(_) => {
                return ValidationOutcome::invalid(
                    Value::Array(Vec::new()),
                    "This value does not evaluate to type Array",
                );
            }
        },
        _ => {
            return ValidationOutcome::invalid(
                Value::Array(Vec::new()),
                "This value does not evaluate to type Array",
            );
        }
    };

    let Some(rule) = children else {
        return ValidationOutcome::valid(Value::Array(items));
    };

    let mut parsed = Vec::with_capacity(items.len());
    let mut message = None;
    for (index, item) in items.iter().enumerate() {
        let outcome = rule.validate(item, properties);
        if !outcome.is_valid && message.is_none() {
            message = Some(format!(
                "Invalid entry at index: {index}. {}",
                outcome.message.unwrap_or_default()
            ));
        }
        parsed.push(outcome.parsed);
    }

    match message {
        Some(m) => ValidationOutcome::invalid(Value::Array(parsed), m),
        None => ValidationOutcome::valid(Value::Array(parsed)),
    }
}

fn validate_object(
    value: &Value,
    allowed_keys: &[ObjectKey],
    properties: &Map<String, Value>,
) -> ValidationOutcome {
    let mut object = match value {
        Value::Object(map) => map.clone(),
        Value::String(s) => match serde_json::from_str::<Map<String, Value>>(s) {
            Ok(map) => map,
            Err(_) => {
                return ValidationOutcome::invalid(
                    Value::Object(Map::new()),
                    "This value does not evaluate to type Object",
                );
            }
        },
        _ => {
            return ValidationOutcome::invalid(
                Value::Object(Map::new()),
                "This value does not evaluate to type Object",
            );
        }
    };

    let mut message = None;
    for key in allowed_keys {
        match object.get(&key.name) {
            Some(v) => {
                let outcome = key.rule.validate(v, properties);
                if !outcome.is_valid && message.is_none() {
                    message = Some(format!(
                        "Value of key: {} is invalid. {}",
                        key.name,
                        outcome.message.unwrap_or_default()
                    ));
                }
                object.insert(key.name.clone(), outcome.parsed);
            }
            None => {
                if let Some(default) = key.default.produce() {
                    object.insert(key.name.clone(), default);
                }
            }
        }
    }

    match message {
        Some(m) => ValidationOutcome::invalid(Value::Object(object), m),
        None => ValidationOutcome::valid(Value::Object(object)),
    }
}

fn validate_tab_name(value: &Value, properties: &Map<String, Value>) -> ValidationOutcome {
    let name = match value {
        Value::Null => return ValidationOutcome::valid(Value::String(String::new())),
        Value::String(s) => s,
        _ => {
            return ValidationOutcome::invalid(
                Value::String(String::new()),
                "This value does not evaluate to type: Tab Name (string)",
            );
        }
    };
    if name.is_empty() || tab_labels(properties).any(|label| label == name) {
        ValidationOutcome::valid(value.clone())
    } else {
        ValidationOutcome::invalid(
            Value::String(String::new()),
            format!("Tab name {name} does not exist"),
        )
    }
}

fn tab_labels(properties: &Map<String, Value>) -> impl Iterator<Item = &str> {
    let keyed = properties
        .get("tabsObj")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|tabs| tabs.values());
    let legacy = properties
        .get("tabs")
        .and_then(Value::as_array)
        .into_iter()
        .flatten();
    keyed
        .chain(legacy)
        .filter_map(|tab| tab.get("label").and_then(Value::as_str))
}

/// Integral values stay integers so `12` round-trips as `12`, not `12.0`.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}
