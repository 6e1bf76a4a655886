use crate::into_map;
use canvas_expr::value::is_numeric_str;
use canvas_model::{
    DefaultPropertyMap, DerivedPropertyMap, DropdownOption, HiddenWhen, PropertySchemaEntry,
    PropertySection, TextPattern, ValidationRule, WidgetBehavior,
};
use canvas_types::WidgetType;
use regex_lite::Regex;
use serde_json::{Map, Value, json};
use std::sync::LazyLock;

/// Shape an `EMAIL` input must have.
pub const EMAIL_PATTERN: &str = r"^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,3})+$";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

const CURRENCY: &str = "CURRENCY";

/// Parses the `regex` property. `None` means no pattern constraint.
pub fn parse_regex_string(regex: &str) -> Option<TextPattern> {
    TextPattern::parse(regex)
}

/// Whether the current text of an input widget is valid.
///
/// `EMAIL` inputs always use [`EMAIL_PATTERN`]. `NUMBER` inputs treat a
/// configured pattern as authoritative, otherwise the text must be numeric
/// (or empty, unless required). Every other type requires non-empty text
/// when `is_required` and must match the pattern if one is set.
pub fn input_is_valid(input_type: &str, text: &str, regex: &str, is_required: bool) -> bool {
    let pattern = parse_regex_string(regex);

    match input_type {
        "EMAIL" => EMAIL.is_match(text),
        "NUMBER" => match pattern {
            Some(p) => p.is_match(text),
            None if is_required => !text.is_empty() && is_numeric_str(text),
            None => text.is_empty() || is_numeric_str(text),
        },
        _ if is_required && text.is_empty() => false,
        _ => pattern.is_none_or(|p| p.is_match(text)),
    }
}

/// Single-line text, number, password, email or currency input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputWidget;

impl WidgetBehavior for InputWidget {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Input
    }

    fn property_pane(&self) -> Vec<PropertySection> {
        vec![
            PropertySection::new(
                "General",
                vec![
                    PropertySchemaEntry::dropdown(
                        "inputType",
                        "Data Type",
                        vec![
                            DropdownOption::new("Text", "TEXT"),
                            DropdownOption::new("Number", "NUMBER"),
                            DropdownOption::new("Password", "PASSWORD"),
                            DropdownOption::new("Email", "EMAIL"),
                            DropdownOption::new("Currency", CURRENCY),
                        ],
                    )
                    .help("Changes the type of data captured in the input"),
                    PropertySchemaEntry {
                        is_js_convertible: false,
                        ..PropertySchemaEntry::switch("allowCurrencyChange", "Allow currency change", true)
                    }
                    .help("Search by currency or country")
                    .hidden_when(HiddenWhen::unless("inputType", CURRENCY)),
                    PropertySchemaEntry::dropdown("currencyCountryCode", "Currency", currency_options())
                        .help("Changes the type of currency")
                        .placeholder("Search by code or name")
                        .hidden_when(HiddenWhen::unless("inputType", CURRENCY)),
                    PropertySchemaEntry::dropdown(
                        "decimalsInCurrency",
                        "Decimals",
                        vec![DropdownOption::new("1", 1), DropdownOption::new("2", 2)],
                    )
                    .help("No. of decimals in currency input")
                    .hidden_when(HiddenWhen::unless("inputType", CURRENCY)),
                    PropertySchemaEntry::input_text("defaultText", "Default Text")
                        .help("Sets the default text of the widget. The text is updated if the default text changes")
                        .placeholder("Enter default text")
                        .validated(ValidationRule::Text),
                    PropertySchemaEntry::input_text("placeholderText", "Placeholder")
                        .help("Sets a placeholder text for the input")
                        .placeholder("Enter placeholder text")
                        .validated(ValidationRule::Text),
                    PropertySchemaEntry::input_text("regex", "Regex")
                        .help("Adds a validation to the input which displays an error on failure")
                        .placeholder(r"^\w+@[a-zA-Z_]+?\.[a-zA-Z]{2,3}$")
                        .validated(ValidationRule::Regex),
                    PropertySchemaEntry::input_text("errorMessage", "Error Message")
                        .help("Displays the error message if the regex validation fails")
                        .placeholder("Enter error message")
                        .validated(ValidationRule::Text),
                    PropertySchemaEntry::switch("isRequired", "Required", true)
                        .help("Makes input to the widget mandatory"),
                    PropertySchemaEntry::switch("isVisible", "Visible", true)
                        .help("Controls the visibility of the widget"),
                    PropertySchemaEntry::switch("isDisabled", "Disabled", true)
                        .help("Disables input to this widget"),
                    PropertySchemaEntry::switch("resetOnSubmit", "Reset on submit", true)
                        .help("Clears the input value after submit"),
                ],
            ),
            PropertySection::new(
                "Actions",
                vec![
                    PropertySchemaEntry::action(
                        "onTextChanged",
                        "Triggers an action when the text is changed",
                    ),
                    PropertySchemaEntry::action(
                        "onSubmit",
                        "Triggers an action on submit (when the enter key is pressed)",
                    ),
                ],
            ),
        ]
    }

    fn default_config(&self) -> Map<String, Value> {
        into_map(json!({
            "inputType": "TEXT",
            "defaultText": "",
            "regex": "",
            "isRequired": false,
            "isVisible": true,
            "isDisabled": false,
            "resetOnSubmit": true,
        }))
    }

    fn meta_defaults(&self) -> Map<String, Value> {
        into_map(json!({
            "text": null,
            "isFocused": false,
            "isDirty": false,
            "selectedCurrencyType": null,
        }))
    }

    fn default_properties(&self) -> DefaultPropertyMap {
        &[("text", "defaultText")]
    }

    fn derived_properties(&self) -> DerivedPropertyMap {
        &[
            (
                "isValid",
                "{{ inputIsValid(this.inputType, this.text, this.regex, this.isRequired) }}",
            ),
            ("value", "{{ this.text }}"),
        ]
    }
}

fn currency_options() -> Vec<DropdownOption> {
    [
        ("USD - US Dollar", "USD"),
        ("EUR - Euro", "EUR"),
        ("GBP - British Pound", "GBP"),
        ("INR - Indian Rupee", "INR"),
        ("JPY - Japanese Yen", "JPY"),
        ("AUD - Australian Dollar", "AUD"),
        ("CAD - Canadian Dollar", "CAD"),
    ]
    .into_iter()
    .map(|(label, code)| DropdownOption::new(label, code))
    .collect()
}
