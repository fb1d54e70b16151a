use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DATA_DIR_NAME: &str = "quotation-wizard";

/// User-tunable wizard settings. Missing keys fall back to their defaults so
/// older config files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_draft_ttl_days")]
    pub draft_ttl_days: u32,
    #[serde(default = "Config::default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,
    #[serde(default = "Config::default_storage_base_key")]
    pub storage_base_key: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    /// Optional custom directory for drafts and the outbox. Defaults to the
    /// platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            draft_ttl_days: Self::default_draft_ttl_days(),
            autosave_debounce_ms: Self::default_autosave_debounce_ms(),
            storage_base_key: Self::default_storage_base_key(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_draft_ttl_days() -> u32 {
        7
    }

    pub fn default_autosave_debounce_ms() -> u64 {
        2_000
    }

    pub fn default_storage_base_key() -> String {
        "quotation_form_data".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn set_draft_ttl_days(&mut self, days: u32) -> Result<(), ConfigError> {
        if days == 0 {
            return Err(ConfigError::Invalid {
                key: "draft_ttl_days",
                reason: "must be at least one day".into(),
            });
        }
        self.draft_ttl_days = days;
        Ok(())
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(DATA_DIR_NAME)
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.resolve_data_dir().join("drafts")
    }

    pub fn outbox_dir(&self) -> PathBuf {
        self.resolve_data_dir().join("outbox")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = serde_json::from_str(r#"{"draft_ttl_days": 3}"#).unwrap();
        assert_eq!(config.draft_ttl_days, 3);
        assert_eq!(config.autosave_debounce_ms, 2_000);
        assert_eq!(config.storage_base_key, "quotation_form_data");
        assert!(config.ui_color_enabled);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let mut config = Config::default();
        assert!(config.set_draft_ttl_days(0).is_err());
        assert_eq!(config.draft_ttl_days, 7);
        config.set_draft_ttl_days(30).unwrap();
        assert_eq!(config.draft_ttl_days, 30);
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/quotes")),
            ..Config::default()
        };
        assert_eq!(config.drafts_dir(), PathBuf::from("/srv/quotes/drafts"));
        assert_eq!(config.outbox_dir(), PathBuf::from("/srv/quotes/outbox"));
    }
}
