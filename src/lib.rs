#![doc(test(attr(deny(warnings))))]

//! Quotation Wizard wires the quotation engine to the filesystem and the
//! terminal: JSON-file draft storage, a file outbox for submissions and the
//! `quote_cli` front end.

pub mod cli;
pub mod errors;
pub mod outbox;
pub mod utils;

use std::sync::Once;

pub use errors::CliError;
pub use outbox::OutboxSubmitter;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Quotation wizard tracing initialized.");
    });
}
