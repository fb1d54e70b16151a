//! Draft persistence: namespaced form snapshots with passive expiry.
//!
//! Every failure here is logged and swallowed. Saving degrades to a no-op,
//! loading degrades to "no draft".

use std::sync::Arc;

use chrono::Duration;
use quote_domain::{FormData, FormField, ServiceContext};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{storage::KeyValueStore, time::Clock};

pub const DEFAULT_BASE_KEY: &str = "quotation_form_data";
pub const EXIT_INTENT_KEY_PREFIX: &str = "exit_intent_lead";
pub const DEFAULT_DRAFT_TTL_DAYS: i64 = 7;

/// Saved snapshot as loaded back: a partial form-data object.
pub type SavedFields = Map<String, Value>;

/// Lead captured by the exit-intent popup. Only email and name are recovered.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExitIntentCapture {
    email: Option<String>,
    name: Option<String>,
}

#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    base_key: String,
    ttl: Duration,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            base_key: DEFAULT_BASE_KEY.to_string(),
            ttl: Duration::days(DEFAULT_DRAFT_TTL_DAYS),
        }
    }

    pub fn with_base_key(mut self, base_key: impl Into<String>) -> Self {
        self.base_key = base_key.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// `<base>` or `<base>_<service>`.
    pub fn data_key(&self, context: Option<ServiceContext>) -> String {
        match context {
            Some(service) => format!("{}_{}", self.base_key, service.as_str()),
            None => self.base_key.clone(),
        }
    }

    /// `<base>_expiry` or `<base>_expiry_<service>`.
    pub fn expiry_key(&self, context: Option<ServiceContext>) -> String {
        match context {
            Some(service) => format!("{}_expiry_{}", self.base_key, service.as_str()),
            None => format!("{}_expiry", self.base_key),
        }
    }

    pub fn save(&self, context: Option<ServiceContext>, data: &FormData) {
        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize draft");
                return;
            }
        };
        let expiry = self.clock.now_millis() + self.ttl.num_milliseconds();
        let data_key = self.data_key(context);
        let result = self
            .store
            .set(&data_key, &json)
            .and_then(|_| self.store.set(&self.expiry_key(context), &expiry.to_string()));
        match result {
            Ok(()) => debug!(key = %data_key, expiry, "draft saved"),
            Err(err) => warn!(key = %data_key, error = %err, "failed to save draft"),
        }
    }

    /// Returns the saved snapshot, or `None` when absent, expired or unreadable.
    /// Expired and expiry-less snapshots are removed as a side effect.
    pub fn load(&self, context: Option<ServiceContext>) -> Option<SavedFields> {
        let expiry_key = self.expiry_key(context);
        let expiry = match self.store.get(&expiry_key) {
            Ok(value) => value.and_then(|raw| raw.trim().parse::<i64>().ok()),
            Err(err) => {
                warn!(key = %expiry_key, error = %err, "failed to read draft expiry");
                return None;
            }
        };
        let Some(expiry) = expiry else {
            self.clear(context);
            return None;
        };
        if self.clock.now_millis() > expiry {
            debug!(key = %expiry_key, "draft expired");
            self.clear(context);
            return None;
        }

        let data_key = self.data_key(context);
        let raw = match self.store.get(&data_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %data_key, error = %err, "failed to read draft");
                return None;
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(fields)) => Some(fields),
            Ok(_) => {
                warn!(key = %data_key, "draft is not a JSON object");
                None
            }
            Err(err) => {
                warn!(key = %data_key, error = %err, "failed to parse draft");
                None
            }
        }
    }

    pub fn clear(&self, context: Option<ServiceContext>) {
        for key in [self.data_key(context), self.expiry_key(context)] {
            if let Err(err) = self.store.remove(&key) {
                warn!(key = %key, error = %err, "failed to clear draft");
            }
        }
    }

    /// Reads the non-namespaced snapshot written by earlier releases.
    pub fn load_legacy(&self) -> Option<SavedFields> {
        self.load(None)
    }

    pub fn clear_legacy(&self) {
        self.clear(None);
    }

    pub fn exit_intent_key(context: Option<ServiceContext>) -> String {
        let id = context.unwrap_or(ServiceContext::Solutions).exit_intent_id();
        format!("{EXIT_INTENT_KEY_PREFIX}_{id}")
    }

    /// Recovers email and contact name from an exit-intent capture.
    pub fn recover_exit_intent(&self, context: Option<ServiceContext>) -> Option<SavedFields> {
        let key = Self::exit_intent_key(context);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read exit-intent capture");
                return None;
            }
        };
        let capture: ExitIntentCapture = match serde_json::from_str(&raw) {
            Ok(capture) => capture,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to parse exit-intent capture");
                return None;
            }
        };

        let mut fields = SavedFields::new();
        let entries = [
            (FormField::Email, capture.email),
            (FormField::ContactName, capture.name),
        ];
        for (field, value) in entries {
            if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
                fields.insert(field.key().to_string(), Value::String(value));
            }
        }
        (!fields.is_empty()).then_some(fields)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use quote_domain::FieldValue;

    use super::*;
    use crate::{FixedClock, MemoryStore, StorageError};

    fn fixture() -> (Arc<MemoryStore>, Arc<FixedClock>, DraftStore) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap(),
        ));
        let drafts = DraftStore::new(store.clone(), clock.clone());
        (store, clock, drafts)
    }

    fn sample() -> FormData {
        let mut data = FormData::default();
        data.apply(FieldValue::CompanyName("Acme".into()));
        data.apply(FieldValue::PrimaryGoals(vec!["reduce-costs".into()]));
        data
    }

    #[test]
    fn keys_are_namespaced_by_service() {
        let (_, _, drafts) = fixture();
        assert_eq!(
            drafts.data_key(Some(ServiceContext::SmartAssistant)),
            "quotation_form_data_smart-assistant"
        );
        assert_eq!(
            drafts.expiry_key(Some(ServiceContext::SmartAssistant)),
            "quotation_form_data_expiry_smart-assistant"
        );
        assert_eq!(drafts.data_key(None), "quotation_form_data");
        assert_eq!(drafts.expiry_key(None), "quotation_form_data_expiry");
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_, _, drafts) = fixture();
        let context = Some(ServiceContext::Solutions);
        drafts.save(context, &sample());

        let loaded = drafts.load(context).expect("draft present");
        let restored: FormData =
            serde_json::from_value(Value::Object(loaded)).expect("valid form data");
        assert_eq!(restored, sample());
        assert!(drafts.load(Some(ServiceContext::SmartAssistant)).is_none());
    }

    #[test]
    fn expired_draft_is_cleared_on_read() {
        let (store, clock, drafts) = fixture();
        let context = Some(ServiceContext::SystemIntegration);
        drafts.save(context, &sample());

        clock.advance(Duration::days(7));
        assert!(drafts.load(context).is_some());

        clock.advance(Duration::milliseconds(1));
        assert!(drafts.load(context).is_none());
        assert!(!store.contains(&drafts.data_key(context)));
        assert!(!store.contains(&drafts.expiry_key(context)));
    }

    #[test]
    fn missing_expiry_counts_as_expired() {
        let (store, _, drafts) = fixture();
        store
            .set("quotation_form_data", r#"{"companyName":"Legacy"}"#)
            .expect("seed");
        assert!(drafts.load_legacy().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_json_loads_as_none() {
        let (store, clock, drafts) = fixture();
        let expiry = clock.now_millis() + 1_000;
        store.set("quotation_form_data", "{not json").expect("seed");
        store
            .set("quotation_form_data_expiry", &expiry.to_string())
            .expect("seed");
        assert!(drafts.load_legacy().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let (store, _, drafts) = fixture();
        drafts.save(None, &sample());
        drafts.clear(None);
        drafts.clear(None);
        assert!(store.is_empty());
    }

    #[test]
    fn exit_intent_recovers_email_and_name_only() {
        let (store, _, drafts) = fixture();
        store
            .set(
                "exit_intent_lead_ai_assistant",
                r#"{"email":"lead@acme.io","name":"Robin","company":"Acme","capturedAt":1}"#,
            )
            .expect("seed");
        let fields = drafts
            .recover_exit_intent(Some(ServiceContext::SmartAssistant))
            .expect("capture");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["email"], "lead@acme.io");
        assert_eq!(fields["contactName"], "Robin");

        store.set("exit_intent_lead_solutions", "[broken").expect("seed");
        assert!(drafts.recover_exit_intent(None).is_none());
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn storage_failures_never_escape() {
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let drafts = DraftStore::new(Arc::new(FailingStore), clock);
        drafts.save(Some(ServiceContext::Solutions), &sample());
        assert!(drafts.load(Some(ServiceContext::Solutions)).is_none());
        assert!(drafts.recover_exit_intent(None).is_none());
        drafts.clear(Some(ServiceContext::Solutions));
    }
}
