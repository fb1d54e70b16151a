//! quote-config
//!
//! Persistent settings for the quotation wizard: draft lifetime, autosave
//! quiet period, storage naming and where drafts live on disk.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
