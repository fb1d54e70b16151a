//! Resolves configuration and on-disk locations for one CLI invocation and
//! builds the wizard components from them.

use std::{path::PathBuf, sync::Arc};

use chrono::Duration;
use quote_config::{Config, ConfigManager};
use quote_core::{
    Clock, DraftStore, QuotationWizard, RequestContext, SystemClock, WizardOptions,
};
use quote_domain::{PackageType, ServiceContext};
use quote_storage_json::JsonFileStore;
use tracing::debug;

use crate::{cli::output, errors::CliError, outbox::OutboxSubmitter};

const APP_DIR_NAME: &str = "quotation-wizard";
const MAX_AUTOSAVE_DEBOUNCE_MS: u64 = 60 * 60 * 1000;

pub struct Session {
    manager: ConfigManager,
    config: Config,
    data_dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// With `home`, everything lives below it unless the config names its own
    /// data directory. Without it, the platform config and data dirs are used.
    pub fn open(home: Option<PathBuf>) -> Result<Self, CliError> {
        let base = match &home {
            Some(home) => home.clone(),
            None => dirs::config_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME),
        };
        let manager = ConfigManager::with_base_dir(base)?;
        let config = manager.load()?;
        let data_dir = match (&config.data_dir, home) {
            (Some(dir), _) => dir.clone(),
            (None, Some(home)) => home,
            (None, None) => config.resolve_data_dir(),
        };
        debug!(config = %manager.config_path().display(), data = %data_dir.display(), "session opened");
        output::set_preferences(output::OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });
        Ok(Self {
            manager,
            config,
            data_dir,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.data_dir.join("drafts")
    }

    pub fn outbox_dir(&self) -> PathBuf {
        self.data_dir.join("outbox")
    }

    pub fn draft_store(&self) -> Result<DraftStore, CliError> {
        let store = Arc::new(JsonFileStore::new(self.drafts_dir())?);
        Ok(DraftStore::new(store, self.clock.clone())
            .with_base_key(self.config.storage_base_key.clone())
            .with_ttl(Duration::days(i64::from(self.config.draft_ttl_days))))
    }

    pub fn wizard(
        &self,
        context: Option<ServiceContext>,
        package: PackageType,
        request_context: RequestContext,
    ) -> Result<QuotationWizard, CliError> {
        let autosave_ms = self.config.autosave_debounce_ms.min(MAX_AUTOSAVE_DEBOUNCE_MS) as i64;
        let options = WizardOptions::new(context)
            .with_package(package, package.display_name())
            .with_request_context(request_context)
            .with_autosave_delay(Duration::milliseconds(autosave_ms));
        let submitter = OutboxSubmitter::new(self.outbox_dir(), self.clock.clone());
        Ok(QuotationWizard::new(
            options,
            self.draft_store()?,
            self.clock.clone(),
            Box::new(submitter),
        ))
    }
}

/// Parses `--context`. Unknown names fall back to the standard flow with a
/// warning.
pub fn parse_context(raw: Option<&str>) -> Option<ServiceContext> {
    let raw = raw?;
    let context = ServiceContext::parse(raw);
    if context.is_none() {
        output::warning(format!(
            "Unknown service context `{raw}`; using the standard flow"
        ));
    }
    context
}

pub fn parse_package(raw: &str) -> Result<PackageType, CliError> {
    PackageType::parse(raw).ok_or_else(|| {
        CliError::InvalidArguments(format!(
            "unknown package `{raw}` (use basic, standard or enterprise)"
        ))
    })
}
