//! File outbox standing in for the quotation backend.
//!
//! Each accepted request is written as `<reference>.json` into the outbox
//! directory; a separate process is expected to forward them.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use quote_core::{Clock, QuotationSubmitter, SubmitError};
use quote_domain::{QuotationRequest, QuotationResponse};
use tracing::info;
use uuid::Uuid;

const REFERENCE_PREFIX: &str = "Q";
const REFERENCE_DATE_FORMAT: &str = "%Y%m%d";
const TMP_SUFFIX: &str = "tmp";

pub struct OutboxSubmitter {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl OutboxSubmitter {
    pub fn new(dir: PathBuf, clock: Arc<dyn Clock>) -> Self {
        Self { dir, clock }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `Q-<yyyymmdd>-<8 hex>`, dated by the injected clock.
    pub fn next_reference(&self) -> String {
        let date = self.clock.now().format(REFERENCE_DATE_FORMAT);
        format!("{REFERENCE_PREFIX}-{date}-{}", short_id(Uuid::new_v4()))
    }

    pub fn entry_path(&self, reference: &str) -> PathBuf {
        self.dir.join(format!("{reference}.json"))
    }
}

impl QuotationSubmitter for OutboxSubmitter {
    fn submit(&self, request: &QuotationRequest) -> Result<QuotationResponse, SubmitError> {
        fs::create_dir_all(&self.dir)?;
        let reference = self.next_reference();
        let path = self.entry_path(&reference);
        let json = serde_json::to_string_pretty(request)?;

        let mut tmp = path.clone();
        tmp.set_extension(format!("json.{TMP_SUFFIX}"));
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &path)?;

        info!(reference = %reference, path = %path.display(), "quotation request queued");
        Ok(QuotationResponse {
            contact_id: Some(request.form_data.email.clone()).filter(|email| !email.is_empty()),
            ..QuotationResponse::accepted(reference)
        })
    }
}

fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use quote_core::{FixedClock, RequestContext};
    use quote_domain::{FormData, PackageType, ServiceContext};
    use tempfile::tempdir;

    use super::*;

    fn request() -> QuotationRequest {
        let mut form_data = FormData::default();
        form_data.email = "ops@northwind.io".into();
        QuotationRequest {
            service_context: ServiceContext::Solutions,
            service_name: "Solutions".into(),
            package_type: PackageType::Standard,
            package_name: "Standard".into(),
            form_data,
            metadata: RequestContext::default().metadata(Utc::now()),
            roi_snapshot: None,
        }
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 3, 9, 16, 45, 0).unwrap(),
        ))
    }

    #[test]
    fn reference_is_dated_and_short() {
        let outbox = OutboxSubmitter::new(PathBuf::from("unused"), clock());
        let reference = outbox.next_reference();
        assert!(reference.starts_with("Q-20250309-"), "{reference}");
        let suffix = reference.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn submit_writes_request_into_outbox() {
        let dir = tempdir().expect("tempdir");
        let outbox = OutboxSubmitter::new(dir.path().join("outbox"), clock());

        let response = outbox.submit(&request()).expect("submit");
        let reference = response.confirmed_reference().expect("reference").to_string();
        assert_eq!(response.contact_id.as_deref(), Some("ops@northwind.io"));

        let written = fs::read_to_string(outbox.entry_path(&reference)).expect("outbox entry");
        let stored: QuotationRequest = serde_json::from_str(&written).expect("request json");
        assert_eq!(stored, request_with_metadata(&stored));
        assert_eq!(fs::read_dir(outbox.dir()).unwrap().count(), 1);
    }

    #[test]
    fn unwritable_outbox_is_a_submit_error() {
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("outbox");
        fs::write(&blocker, "not a directory").expect("write");

        let outbox = OutboxSubmitter::new(blocker, clock());
        assert!(matches!(outbox.submit(&request()), Err(SubmitError::Io(_))));
    }

    fn request_with_metadata(stored: &QuotationRequest) -> QuotationRequest {
        QuotationRequest {
            metadata: stored.metadata.clone(),
            ..request()
        }
    }
}
