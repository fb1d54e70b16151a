//! quote-domain
//!
//! Pure data models for the quotation wizard (service contexts, option
//! registry, form data, service configs, submission payloads).
//! No I/O, no storage, no validation logic.

pub mod context;
pub mod form;
pub mod options;
pub mod service_config;
pub mod submission;

pub use context::*;
pub use form::*;
pub use service_config::*;
pub use submission::*;
