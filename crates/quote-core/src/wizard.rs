//! Step orchestrator for the quotation wizard.
//!
//! Owns the [`FormState`] lifecycle and composes the reducer, selector,
//! validation engine, draft store and submission port.

use std::sync::Arc;

use chrono::Duration;
use quote_domain::{
    total_steps_for, FieldValue, FlowKind, FormData, IntegrationPair, PackageType,
    QuotationRequest, RoiSnapshot, ServiceConfig, ServiceContext,
};
use tracing::{debug, info, warn};

use crate::{
    debounce::Debouncer,
    persistence::DraftStore,
    reducer::{form_reducer, FormAction, FormState},
    selector::get_step_data,
    steps::{step_kind, StepKind},
    submission::{QuotationSubmitter, RequestContext},
    time::Clock,
    validation::{sanitize_form_data, validate_step, FieldErrors, GENERAL_ERROR_KEY},
};

pub const DEFAULT_AUTOSAVE_DELAY_MS: i64 = 2_000;
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "We could not submit your request. Please try again or contact us directly.";

/// Visibility and completion of the wizard, tracked outside the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    Closed,
    Editing,
    Confirmed { reference_number: String },
}

/// Result of pressing Next (or Submit on the last step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced { step: u8 },
    Invalid { errors: FieldErrors },
    Confirmed { reference_number: String },
    SubmissionFailed,
    /// The wizard is not editable right now (closed, confirmed or submitting).
    Ignored,
}

#[derive(Debug, Clone)]
pub struct WizardOptions {
    pub service_context: Option<ServiceContext>,
    pub service_name: String,
    pub package_type: PackageType,
    pub package_name: String,
    pub request_context: RequestContext,
    pub autosave_delay: Duration,
}

impl WizardOptions {
    pub fn new(service_context: Option<ServiceContext>) -> Self {
        let service_name = service_context
            .unwrap_or(ServiceContext::Solutions)
            .display_name()
            .to_string();
        Self {
            service_context,
            service_name,
            package_type: PackageType::default(),
            package_name: PackageType::default().display_name().to_string(),
            request_context: RequestContext::default(),
            autosave_delay: Duration::milliseconds(DEFAULT_AUTOSAVE_DELAY_MS),
        }
    }

    pub fn with_package(mut self, package_type: PackageType, package_name: impl Into<String>) -> Self {
        self.package_type = package_type;
        self.package_name = package_name.into();
        self
    }

    pub fn with_request_context(mut self, request_context: RequestContext) -> Self {
        self.request_context = request_context;
        self
    }

    pub fn with_autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay = delay;
        self
    }
}

pub struct QuotationWizard {
    options: WizardOptions,
    state: FormState,
    phase: WizardPhase,
    drafts: DraftStore,
    clock: Arc<dyn Clock>,
    submitter: Box<dyn QuotationSubmitter>,
    autosave: Debouncer,
    roi_snapshot: Option<RoiSnapshot>,
}

impl QuotationWizard {
    pub fn new(
        options: WizardOptions,
        drafts: DraftStore,
        clock: Arc<dyn Clock>,
        submitter: Box<dyn QuotationSubmitter>,
    ) -> Self {
        let autosave = Debouncer::new(options.autosave_delay);
        let mut wizard = Self {
            options,
            state: FormState::default(),
            phase: WizardPhase::Closed,
            drafts,
            clock,
            submitter,
            autosave,
            roi_snapshot: None,
        };
        wizard.sync_total_steps();
        wizard
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub fn service_context(&self) -> Option<ServiceContext> {
        self.options.service_context
    }

    pub fn current_step_kind(&self) -> Option<StepKind> {
        step_kind(self.state.current_step, self.flow())
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Attaches the ROI calculator result sent along with the submission.
    pub fn set_roi_snapshot(&mut self, snapshot: Option<RoiSnapshot>) {
        self.roi_snapshot = snapshot;
    }

    /// Opens the wizard, restoring the most relevant saved draft and
    /// initialising the service-specific configuration.
    pub fn open(&mut self) {
        if self.phase == WizardPhase::Editing {
            return;
        }
        self.phase = WizardPhase::Editing;
        self.sync_total_steps();
        self.restore_draft();
        self.ensure_service_config();
        debug!(
            context = ?self.options.service_context,
            total_steps = self.state.total_steps,
            "quotation wizard opened"
        );
    }

    /// Replaces one field, clears its error and schedules an autosave once the
    /// user is past the first step.
    pub fn update_field(&mut self, value: FieldValue) {
        if self.phase != WizardPhase::Editing {
            return;
        }
        let field = value.field();
        self.dispatch(FormAction::UpdateField(value));
        self.dispatch(FormAction::ClearError(field.key().to_string()));
        if self.state.current_step > 1 {
            self.autosave.schedule(self.clock.now());
        }
    }

    /// Fires the pending autosave when its deadline has passed.
    pub fn tick(&mut self) -> bool {
        if !self.autosave.fire_if_due(self.clock.now()) {
            return false;
        }
        self.save_draft();
        true
    }

    /// Validates the current step and advances, or submits on the last step.
    pub fn next(&mut self) -> StepOutcome {
        if self.phase != WizardPhase::Editing || self.state.is_submitting {
            return StepOutcome::Ignored;
        }
        if let Err(errors) = self.validate_current_step() {
            return StepOutcome::Invalid { errors };
        }
        if self.state.is_last_step() {
            return self.submit();
        }
        self.dispatch(FormAction::SetErrors(FieldErrors::new()));
        self.dispatch(FormAction::NextStep);
        debug!(step = self.state.current_step, "wizard advanced");
        StepOutcome::Advanced {
            step: self.state.current_step,
        }
    }

    /// Moves one step back; a no-op on the first step.
    pub fn back(&mut self) {
        if self.phase == WizardPhase::Editing {
            self.dispatch(FormAction::PrevStep);
        }
    }

    /// Closes the wizard. While editing the draft is saved; after a
    /// confirmation the form is reset.
    pub fn close(&mut self) {
        self.autosave.cancel();
        match self.phase {
            WizardPhase::Editing => {
                if !self.state.form_data.is_blank() {
                    self.save_draft();
                }
            }
            WizardPhase::Confirmed { .. } => {
                self.dispatch(FormAction::ResetForm);
                self.sync_total_steps();
            }
            WizardPhase::Closed => {}
        }
        self.phase = WizardPhase::Closed;
    }

    /// Appends a blank integration pair. Returns its id, or `None` outside the
    /// system-integration flow.
    pub fn add_integration(&mut self) -> Option<String> {
        let mut config = self.integration_config()?;
        let id = match &mut config {
            ServiceConfig::Integration(integration) => integration.add_integration(),
            _ => return None,
        };
        self.update_field(FieldValue::ServiceConfig(Some(config)));
        Some(id)
    }

    /// Removes an integration pair; refused while only one remains.
    pub fn remove_integration(&mut self, id: &str) -> bool {
        let Some(mut config) = self.integration_config() else {
            return false;
        };
        let removed = match &mut config {
            ServiceConfig::Integration(integration) => integration.remove_integration(id),
            _ => false,
        };
        if removed {
            self.update_field(FieldValue::ServiceConfig(Some(config)));
        }
        removed
    }

    /// Replaces the integration pair carrying the same id.
    pub fn update_integration(&mut self, pair: IntegrationPair) -> bool {
        let Some(mut config) = self.integration_config() else {
            return false;
        };
        let updated = match &mut config {
            ServiceConfig::Integration(integration) => match integration.pair_mut(&pair.id) {
                Some(slot) => {
                    *slot = pair;
                    true
                }
                None => false,
            },
            _ => false,
        };
        if updated {
            self.update_field(FieldValue::ServiceConfig(Some(config)));
        }
        updated
    }

    fn integration_config(&self) -> Option<ServiceConfig> {
        self.state
            .form_data
            .service_config
            .as_ref()
            .filter(|config| config.as_integration().is_some())
            .cloned()
    }

    fn dispatch(&mut self, action: FormAction) {
        let state = std::mem::take(&mut self.state);
        self.state = form_reducer(state, action);
    }

    fn flow(&self) -> FlowKind {
        FlowKind::for_context(self.options.service_context)
    }

    fn sync_total_steps(&mut self) {
        let total = total_steps_for(self.options.service_context);
        if self.state.total_steps != total {
            self.dispatch(FormAction::SetTotalSteps(total));
        }
    }

    fn restore_draft(&mut self) {
        let context = self.options.service_context;
        let saved = self
            .drafts
            .load(context)
            .or_else(|| context.and_then(|_| self.drafts.load_legacy()));
        let restored = match saved {
            Some(fields) => Some(fields),
            None => self.drafts.recover_exit_intent(context),
        };
        if let Some(fields) = restored {
            debug!(fields = fields.len(), "restoring saved quotation data");
            self.dispatch(FormAction::LoadSavedData(fields));
        }
    }

    fn ensure_service_config(&mut self) {
        let Some(kind) = self.options.service_context.and_then(ServiceContext::config_kind) else {
            return;
        };
        let config = match &self.state.form_data.service_config {
            None => ServiceConfig::initial(kind),
            Some(ServiceConfig::Integration(config)) if config.integrations.is_empty() => {
                let mut config = config.clone();
                config.integrations.push(IntegrationPair::new());
                ServiceConfig::Integration(config)
            }
            Some(_) => return,
        };
        self.dispatch(FormAction::UpdateField(FieldValue::ServiceConfig(Some(
            config,
        ))));
    }

    fn save_draft(&self) {
        self.drafts
            .save(self.options.service_context, &self.state.form_data);
    }

    fn validate_current_step(&mut self) -> Result<(), FieldErrors> {
        let step = self.state.current_step;
        let context = self.options.service_context;
        let data = get_step_data(&self.state.form_data, step, context);
        let result = validate_step(step, &data, context);
        if result.is_valid {
            return Ok(());
        }
        debug!(step, errors = result.errors.len(), "step validation failed");
        self.dispatch(FormAction::SetErrors(result.errors.clone()));
        Err(result.errors)
    }

    fn submit(&mut self) -> StepOutcome {
        self.dispatch(FormAction::SetErrors(FieldErrors::new()));
        self.dispatch(FormAction::SetSubmitting(true));
        let result = self.send();
        self.dispatch(FormAction::SetSubmitting(false));

        match result {
            Some(reference_number) => {
                info!(reference = %reference_number, "quotation request submitted");
                let context = self.options.service_context;
                self.autosave.cancel();
                self.drafts.clear(context);
                self.drafts.clear_legacy();
                self.phase = WizardPhase::Confirmed {
                    reference_number: reference_number.clone(),
                };
                StepOutcome::Confirmed { reference_number }
            }
            None => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    GENERAL_ERROR_KEY.to_string(),
                    SUBMISSION_FAILED_MESSAGE.to_string(),
                );
                self.dispatch(FormAction::SetErrors(errors));
                StepOutcome::SubmissionFailed
            }
        }
    }

    fn send(&self) -> Option<String> {
        let mut form_data: FormData = self.state.form_data.clone();
        sanitize_form_data(&mut form_data);
        let request = QuotationRequest {
            service_context: self
                .options
                .service_context
                .unwrap_or(ServiceContext::Solutions),
            service_name: self.options.service_name.clone(),
            package_type: self.options.package_type,
            package_name: self.options.package_name.clone(),
            form_data,
            metadata: self.options.request_context.metadata(self.clock.now()),
            roi_snapshot: self.roi_snapshot.clone(),
        };

        match self.submitter.submit(&request) {
            Ok(response) => {
                let reference = response.confirmed_reference().map(str::to_string);
                if reference.is_none() {
                    warn!(
                        error = response.error.as_deref().unwrap_or("missing reference number"),
                        "quotation request rejected"
                    );
                }
                reference
            }
            Err(err) => {
                warn!(error = %err, "quotation submission failed");
                None
            }
        }
    }
}

impl Drop for QuotationWizard {
    fn drop(&mut self) {
        self.autosave.cancel();
    }
}
