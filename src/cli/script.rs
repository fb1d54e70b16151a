//! Non-interactive wizard runs driven by an answers file.
//!
//! The answers file is a form-data JSON object. Only keys present in the file
//! are applied, so a partial file resumes on top of a restored draft.

use std::{collections::BTreeSet, fs, path::Path};

use quote_core::{get_step_data, QuotationWizard, StepOutcome};
use quote_domain::{FieldValue, FormData, FormField, ServiceContext};
use serde_json::Value;

use crate::{cli::output, errors::CliError};

#[derive(Debug, Clone)]
pub struct ScriptedAnswers {
    data: FormData,
    present: BTreeSet<String>,
}

impl ScriptedAnswers {
    pub fn from_json(raw: &str) -> Result<Self, CliError> {
        let Value::Object(object) = serde_json::from_str::<Value>(raw)? else {
            return Err(CliError::InvalidArguments(
                "answers must be a JSON object of form fields".into(),
            ));
        };
        let present = object.keys().cloned().collect();
        let data = serde_json::from_value(Value::Object(object))?;
        Ok(Self { data, present })
    }

    pub fn read(path: &Path) -> Result<Self, CliError> {
        let raw = fs::read_to_string(path).map_err(|source| CliError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Updates for the fields `step` collects that the file provides.
    pub fn values_for_step(&self, step: u8, context: Option<ServiceContext>) -> Vec<FieldValue> {
        get_step_data(&self.data, step, context)
            .keys()
            .filter_map(|key| step_field(key, context))
            .filter(|field| self.present.contains(field.key()))
            .map(|field| self.data.value_of(field))
            .collect()
    }
}

/// Top-level form field behind a projected step key. The configuration step
/// projects the service config under its own key.
fn step_field(key: &str, context: Option<ServiceContext>) -> Option<FormField> {
    FormField::from_key(key).or_else(|| {
        context
            .and_then(ServiceContext::config_kind)
            .filter(|kind| kind.step_key() == key)
            .map(|_| FormField::ServiceConfig)
    })
}

/// Walks every step with the scripted answers. Returns the reference number
/// on confirmation; any blocked step saves the draft and stops.
pub fn run(wizard: &mut QuotationWizard, answers: &ScriptedAnswers) -> Result<String, CliError> {
    loop {
        let step = wizard.state().current_step;
        let title = wizard
            .current_step_kind()
            .map(|kind| kind.title())
            .unwrap_or("Unknown step");
        for value in answers.values_for_step(step, wizard.service_context()) {
            wizard.update_field(value);
        }

        match wizard.next() {
            StepOutcome::Advanced { .. } => {
                output::info(format!("Step {step} ({title}) complete"));
            }
            StepOutcome::Confirmed { reference_number } => {
                wizard.close();
                return Ok(reference_number);
            }
            StepOutcome::Invalid { errors } => {
                output::field_errors(&errors);
                wizard.close();
                return Err(CliError::StepInvalid {
                    step,
                    title: title.to_string(),
                    count: errors.len(),
                });
            }
            StepOutcome::SubmissionFailed => {
                output::field_errors(&wizard.state().errors);
                wizard.close();
                return Err(CliError::SubmissionFailed);
            }
            StepOutcome::Ignored => return Err(CliError::Cancelled),
        }
    }
}
