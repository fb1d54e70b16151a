//! Declarative value schemas evaluated against projected step data.

use quote_domain::options::{self, OptionItem};
use serde_json::Value;

use super::{
    rules::{validate_email, validate_phone},
    FieldErrors,
};

/// Shape and constraints for one JSON value.
#[derive(Debug, Clone)]
pub enum Schema {
    /// String whose trimmed length lies in `[min, max]`. `min == 0` makes it optional.
    Text {
        min: usize,
        max: usize,
        required: &'static str,
    },
    Email,
    /// Optional phone number.
    Phone,
    /// One value from `options`; empty or null is accepted only when `optional`.
    Choice {
        options: &'static [OptionItem],
        message: &'static str,
        optional: bool,
    },
    /// List of values from `options` with at least `min` entries.
    MultiChoice {
        options: &'static [OptionItem],
        min: usize,
        message: &'static str,
    },
    /// Free-form list of strings, at most `max` entries.
    TextList { max: usize },
    Bool,
    NullableBool,
    List {
        item: Box<Schema>,
        min: usize,
        message: &'static str,
    },
    Object {
        fields: Vec<(&'static str, Schema)>,
        message: &'static str,
    },
}

impl Schema {
    pub fn text(min: usize, max: usize, required: &'static str) -> Self {
        Schema::Text { min, max, required }
    }

    pub fn optional_text(max: usize) -> Self {
        Schema::Text {
            min: 0,
            max,
            required: "",
        }
    }

    pub fn choice(options: &'static [OptionItem], message: &'static str) -> Self {
        Schema::Choice {
            options,
            message,
            optional: false,
        }
    }

    pub fn optional_choice(options: &'static [OptionItem]) -> Self {
        Schema::Choice {
            options,
            message: "Please select a valid option",
            optional: true,
        }
    }

    pub fn multi(options: &'static [OptionItem], min: usize, message: &'static str) -> Self {
        Schema::MultiChoice {
            options,
            min,
            message,
        }
    }

    /// Records the first violation per path into `errors`.
    pub fn check(&self, value: Option<&Value>, path: &str, errors: &mut FieldErrors) {
        let value = value.unwrap_or(&Value::Null);
        match self {
            Schema::Text { min, max, required } => {
                let Some(text) = as_text(value) else {
                    return push(errors, path, "Expected text");
                };
                let length = text.trim().chars().count();
                if length == 0 {
                    if *min > 0 {
                        push(errors, path, *required);
                    }
                } else if length < *min {
                    push(errors, path, format!("Must be at least {min} characters"));
                } else if length > *max {
                    push(errors, path, format!("Must be at most {max} characters"));
                }
            }
            Schema::Email => match as_text(value) {
                Some(text) => {
                    if let Err(message) = validate_email(text) {
                        push(errors, path, message);
                    }
                }
                None => push(errors, path, "Email address is required"),
            },
            Schema::Phone => match as_text(value) {
                Some(text) => {
                    if let Err(message) = validate_phone(text) {
                        push(errors, path, message);
                    }
                }
                None => push(errors, path, "Expected text"),
            },
            Schema::Choice {
                options: choices,
                message,
                optional,
            } => {
                let Some(text) = as_text(value) else {
                    return push(errors, path, *message);
                };
                if text.is_empty() {
                    if !optional {
                        push(errors, path, *message);
                    }
                } else if !options::contains(choices, text) {
                    push(errors, path, *message);
                }
            }
            Schema::MultiChoice {
                options: choices,
                min,
                message,
            } => {
                let Some(items) = value.as_array() else {
                    return push(errors, path, *message);
                };
                for (index, item) in items.iter().enumerate() {
                    let known = item
                        .as_str()
                        .map(|text| options::contains(choices, text))
                        .unwrap_or(false);
                    if !known {
                        push(errors, &join(path, index), "Invalid option");
                    }
                }
                if items.len() < *min {
                    push(errors, path, *message);
                }
            }
            Schema::TextList { max } => {
                let Some(items) = value.as_array() else {
                    return push(errors, path, "Expected a list");
                };
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        push(errors, &join(path, index), "Expected text");
                    }
                }
                if items.len() > *max {
                    push(errors, path, format!("Select at most {max} entries"));
                }
            }
            Schema::Bool => {
                if !value.is_boolean() {
                    push(errors, path, "Expected true or false");
                }
            }
            Schema::NullableBool => {
                if !(value.is_boolean() || value.is_null()) {
                    push(errors, path, "Expected true, false or unknown");
                }
            }
            Schema::List { item, min, message } => {
                let Some(items) = value.as_array() else {
                    return push(errors, path, *message);
                };
                if items.len() < *min {
                    push(errors, path, *message);
                }
                for (index, entry) in items.iter().enumerate() {
                    item.check(Some(entry), &join(path, index), errors);
                }
            }
            Schema::Object { fields, message } => {
                let Some(object) = value.as_object() else {
                    return push(errors, path, *message);
                };
                for (key, schema) in fields {
                    schema.check(object.get(*key), &join(path, key), errors);
                }
            }
        }
    }
}

fn as_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) => Some(text),
        Value::Null => Some(""),
        _ => None,
    }
}

fn join(path: &str, segment: impl std::fmt::Display) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

pub(crate) fn push(errors: &mut FieldErrors, path: &str, message: impl Into<String>) {
    errors
        .entry(path.to_string())
        .or_insert_with(|| message.into());
}
