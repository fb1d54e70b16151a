//! quote-core
//!
//! Quotation wizard engine: form state machine, step validation, step data
//! projection, draft persistence and the step orchestrator.
//! Depends on quote-domain. No terminal I/O; storage, time and submission are
//! reached only through the ports defined here.

pub mod debounce;
pub mod error;
pub mod persistence;
pub mod reducer;
pub mod selector;
pub mod steps;
pub mod storage;
pub mod submission;
pub mod time;
pub mod validation;
pub mod wizard;

pub use debounce::Debouncer;
pub use error::{StorageError, SubmitError};
pub use persistence::DraftStore;
pub use reducer::{form_reducer, FormAction, FormState};
pub use selector::get_step_data;
pub use steps::{step_kind, StepKind};
pub use storage::{KeyValueStore, MemoryStore};
pub use submission::{QuotationSubmitter, RequestContext};
pub use time::{Clock, FixedClock, SystemClock};
pub use validation::{validate_field, validate_form, validate_step, FieldErrors, StepValidation};
pub use wizard::{QuotationWizard, StepOutcome, WizardOptions, WizardPhase};
