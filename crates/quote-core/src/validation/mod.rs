//! Step validation engine.
//!
//! A step is validated by resolving `(step, flow)` to a [`StepKind`], looking
//! up its [`schemas::StepSchema`] and checking the projected step data against
//! it. Errors are keyed by dot-joined field path; the first message recorded
//! for a path wins.

pub mod rules;
pub mod schema;
pub mod schemas;

use std::collections::BTreeMap;

use quote_domain::{FlowKind, FormData, ServiceContext};
use serde_json::{Map, Value};

use crate::{selector::get_step_data, steps::step_kind};
use schema::push;
use schemas::{schema_for, StepSchema};

pub use rules::{sanitize_form_data, sanitize_input, validate_email, validate_phone};

/// Field path → message.
pub type FieldErrors = BTreeMap<String, String>;

/// Key used for errors that do not belong to a single field.
pub const GENERAL_ERROR_KEY: &str = "general";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepValidation {
    pub is_valid: bool,
    pub errors: FieldErrors,
}

impl StepValidation {
    fn from_errors(errors: FieldErrors) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Schema for `step` under the flow selected by `context`.
pub fn step_schema(step: u8, context: Option<ServiceContext>) -> Option<&'static StepSchema> {
    step_kind(step, FlowKind::for_context(context)).map(schema_for)
}

/// Validates the projected data of one step.
///
/// Unknown step numbers fail closed with a `general` error.
pub fn validate_step(
    step: u8,
    step_data: &Map<String, Value>,
    context: Option<ServiceContext>,
) -> StepValidation {
    let mut errors = FieldErrors::new();
    match step_schema(step, context) {
        Some(schema) => check_step(schema, step_data, &mut errors),
        None => push(&mut errors, GENERAL_ERROR_KEY, "Invalid step"),
    }
    StepValidation::from_errors(errors)
}

/// Validates every step of the flow against the whole form, cross-field
/// rules included.
pub fn validate_form(form_data: &FormData, context: Option<ServiceContext>) -> StepValidation {
    let mut errors = FieldErrors::new();
    for step in 1..=FlowKind::for_context(context).total_steps() {
        if let Some(schema) = step_schema(step, context) {
            let data = get_step_data(form_data, step, context);
            check_step(schema, &data, &mut errors);
        }
    }
    StepValidation::from_errors(errors)
}

/// Validates a single top-level field against the step's shape table.
///
/// Fields that the step does not own are reported valid.
pub fn validate_field(
    step: u8,
    field: &str,
    value: &Value,
    context: Option<ServiceContext>,
) -> Result<(), String> {
    let Some(schema) = step_schema(step, context).and_then(|schema| schema.field(field)) else {
        return Ok(());
    };
    let mut errors = FieldErrors::new();
    schema.check(Some(value), field, &mut errors);
    match errors.remove(field) {
        Some(message) => Err(message),
        None => errors.into_values().next().map_or(Ok(()), Err),
    }
}

fn check_step(schema: &StepSchema, data: &Map<String, Value>, errors: &mut FieldErrors) {
    for (key, field_schema) in &schema.fields {
        field_schema.check(data.get(*key), key, errors);
    }
    if schema.consultation_rule {
        check_consultation(data, errors);
    }
}

/// A requested consultation needs a format and at least one time slot.
fn check_consultation(data: &Map<String, Value>, errors: &mut FieldErrors) {
    if data.get("needsConsultation").and_then(Value::as_bool) != Some(true) {
        return;
    }
    let has_format = data
        .get("consultationFormat")
        .and_then(Value::as_str)
        .map(|format| !format.trim().is_empty())
        .unwrap_or(false);
    if !has_format {
        push(errors, "consultationFormat", "Please select a consultation format");
    }
    let has_slot = data
        .get("preferredTimeSlots")
        .and_then(Value::as_array)
        .map(|slots| !slots.is_empty())
        .unwrap_or(false);
    if !has_slot {
        push(
            errors,
            "preferredTimeSlots",
            "Please select at least one preferred time slot",
        );
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn consultation_requires_format_and_slot_when_requested() {
        let data = object(json!({
            "needsConsultation": true,
            "consultationFormat": null,
            "preferredTimeSlots": []
        }));
        let result = validate_step(5, &data, None);
        assert!(!result.is_valid);
        assert!(result.errors.contains_key("consultationFormat"));
        assert!(result.errors.contains_key("preferredTimeSlots"));

        let declined = object(json!({
            "needsConsultation": false,
            "consultationFormat": null,
            "preferredTimeSlots": []
        }));
        let result = validate_step(5, &declined, None);
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn unknown_step_fails_closed() {
        let result = validate_step(9, &Map::new(), Some(ServiceContext::SmartAssistant));
        assert!(!result.is_valid);
        assert_eq!(result.errors.keys().collect::<Vec<_>>(), vec!["general"]);

        let result = validate_step(6, &Map::new(), Some(ServiceContext::Solutions));
        assert!(result.errors.contains_key(GENERAL_ERROR_KEY));
    }

    #[test]
    fn step_three_schema_follows_context() {
        let data = object(json!({ "applicationConfig": null }));
        let result = validate_step(3, &data, Some(ServiceContext::IntelligentApplications));
        assert_eq!(
            result.errors.get("applicationConfig").map(String::as_str),
            Some("Please complete the application requirements")
        );

        let result = validate_step(3, &data, Some(ServiceContext::SystemIntegration));
        assert!(result.errors.contains_key("integrationConfig"));
    }

    #[test]
    fn validate_field_ignores_foreign_fields() {
        assert!(validate_field(1, "budgetRange", &json!(""), None).is_ok());
        assert_eq!(
            validate_field(1, "email", &json!("user@mailinator.com"), None),
            Err("Please use your business email address".to_string())
        );
        assert!(validate_field(1, "email", &json!("user@company.com"), None).is_ok());
        assert!(validate_field(4, "budgetRange", &json!("not-sure"), None).is_ok());
    }

    #[test]
    fn validate_field_reports_nested_errors() {
        let value = json!({ "integrations": [], "dataVolume": "low" });
        let result = validate_field(3, "integrationConfig", &value, Some(ServiceContext::SystemIntegration));
        assert_eq!(
            result,
            Err("Add at least one integration".to_string())
        );
    }

    #[test]
    fn empty_form_fails_every_required_section() {
        let result = validate_form(&FormData::default(), Some(ServiceContext::SmartAssistant));
        assert!(!result.is_valid);
        for key in ["companyName", "projectDescription", "aiAssistantConfig", "hostingPreference", "timeline"] {
            assert!(result.errors.contains_key(key), "missing {key}");
        }
        assert!(!result.errors.contains_key("consultationFormat"));
    }
}
