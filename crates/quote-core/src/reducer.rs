//! Form state machine.
//!
//! [`form_reducer`] is a pure function over a closed action set; the
//! orchestrator owns the state and feeds actions through it.

use quote_domain::{FieldValue, FormData};
use serde_json::{Map, Value};

use crate::validation::FieldErrors;

const DEFAULT_TOTAL_STEPS: u8 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub current_step: u8,
    pub total_steps: u8,
    pub form_data: FormData,
    pub errors: FieldErrors,
    pub is_submitting: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            current_step: 1,
            total_steps: DEFAULT_TOTAL_STEPS,
            form_data: FormData::default(),
            errors: FieldErrors::new(),
            is_submitting: false,
        }
    }
}

impl FormState {
    pub fn is_last_step(&self) -> bool {
        self.current_step >= self.total_steps
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetStep(u8),
    NextStep,
    PrevStep,
    UpdateField(FieldValue),
    SetErrors(FieldErrors),
    ClearError(String),
    SetSubmitting(bool),
    SetTotalSteps(u8),
    ResetForm,
    LoadSavedData(Map<String, Value>),
}

pub fn form_reducer(state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetStep(step) => FormState {
            current_step: clamp_step(step, state.total_steps),
            ..state
        },
        FormAction::NextStep => FormState {
            current_step: clamp_step(state.current_step.saturating_add(1), state.total_steps),
            ..state
        },
        FormAction::PrevStep => FormState {
            current_step: clamp_step(state.current_step.saturating_sub(1), state.total_steps),
            ..state
        },
        FormAction::UpdateField(value) => {
            let mut form_data = state.form_data;
            form_data.apply(value);
            FormState { form_data, ..state }
        }
        FormAction::SetErrors(errors) => FormState { errors, ..state },
        FormAction::ClearError(field) => {
            let mut errors = state.errors;
            errors.remove(&field);
            FormState { errors, ..state }
        }
        FormAction::SetSubmitting(is_submitting) => FormState {
            is_submitting,
            ..state
        },
        FormAction::SetTotalSteps(total) => {
            let total_steps = total.max(1);
            FormState {
                total_steps,
                current_step: clamp_step(state.current_step, total_steps),
                ..state
            }
        }
        FormAction::ResetForm => FormState::default(),
        FormAction::LoadSavedData(partial) => {
            let form_data = merge_saved(state.form_data, &partial);
            FormState { form_data, ..state }
        }
    }
}

fn clamp_step(step: u8, total_steps: u8) -> u8 {
    step.clamp(1, total_steps.max(1))
}

/// Shallow merge of `partial` over `current`. Unknown keys and values that do
/// not fit the field type are skipped.
fn merge_saved(current: FormData, partial: &Map<String, Value>) -> FormData {
    let mut merged = match serde_json::to_value(&current) {
        Ok(Value::Object(map)) => map,
        _ => return current,
    };
    for (key, value) in partial {
        if !merged.contains_key(key) {
            continue;
        }
        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value.clone());
        if serde_json::from_value::<FormData>(Value::Object(candidate.clone())).is_ok() {
            merged = candidate;
        }
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reduce(state: FormState, actions: impl IntoIterator<Item = FormAction>) -> FormState {
        actions.into_iter().fold(state, form_reducer)
    }

    #[test]
    fn initial_state() {
        let state = FormState::default();
        assert_eq!(state.current_step, 1);
        assert_eq!(state.total_steps, 5);
        assert!(state.errors.is_empty());
        assert!(!state.is_submitting);
        assert!(state.form_data.is_blank());
    }

    #[test]
    fn step_navigation_is_clamped() {
        let state = reduce(FormState::default(), std::iter::repeat(FormAction::NextStep).take(9));
        assert_eq!(state.current_step, 5);

        let state = reduce(state, std::iter::repeat(FormAction::PrevStep).take(9));
        assert_eq!(state.current_step, 1);

        let state = form_reducer(state, FormAction::SetStep(0));
        assert_eq!(state.current_step, 1);
        let state = form_reducer(state, FormAction::SetStep(42));
        assert_eq!(state.current_step, 5);
    }

    #[test]
    fn shrinking_total_steps_clamps_current_step() {
        let state = reduce(
            FormState::default(),
            [FormAction::SetTotalSteps(6), FormAction::SetStep(6)],
        );
        assert_eq!(state.current_step, 6);
        let state = form_reducer(state, FormAction::SetTotalSteps(5));
        assert_eq!(state.total_steps, 5);
        assert_eq!(state.current_step, 5);
    }

    #[test]
    fn errors_are_replaced_and_cleared_individually() {
        let mut first = FieldErrors::new();
        first.insert("email".into(), "bad".into());
        first.insert("phone".into(), "bad".into());
        let mut second = FieldErrors::new();
        second.insert("companyName".into(), "missing".into());

        let state = reduce(
            FormState::default(),
            [FormAction::SetErrors(first), FormAction::SetErrors(second)],
        );
        assert_eq!(state.errors.len(), 1);

        let state = form_reducer(state, FormAction::ClearError("companyName".into()));
        assert!(state.errors.is_empty());
    }

    #[test]
    fn load_saved_data_merges_shallowly() {
        let state = form_reducer(
            FormState::default(),
            FormAction::UpdateField(FieldValue::CompanyName("Acme".into())),
        );
        let partial = json!({
            "email": "ops@acme.io",
            "primaryGoals": ["reduce-costs"],
            "phone": 42,
            "unknownField": "ignored"
        });
        let Value::Object(partial) = partial else {
            unreachable!()
        };
        let state = form_reducer(state, FormAction::LoadSavedData(partial));

        assert_eq!(state.form_data.company_name, "Acme");
        assert_eq!(state.form_data.email, "ops@acme.io");
        assert_eq!(state.form_data.primary_goals, vec!["reduce-costs".to_string()]);
        assert!(state.form_data.phone.is_empty());
    }

    #[test]
    fn reset_returns_initial_state() {
        let state = reduce(
            FormState::default(),
            [
                FormAction::SetTotalSteps(6),
                FormAction::NextStep,
                FormAction::SetSubmitting(true),
                FormAction::UpdateField(FieldValue::NeedsConsultation(true)),
                FormAction::ResetForm,
            ],
        );
        assert_eq!(state, FormState::default());
    }
}
