use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use quote_domain::{QuotationRequest, QuotationResponse, SubmissionMetadata};

use crate::SubmitError;

/// Port to the backend that receives finished quotation requests.
pub trait QuotationSubmitter {
    fn submit(&self, request: &QuotationRequest) -> Result<QuotationResponse, SubmitError>;
}

/// Ambient request details attached to every submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_agent: String,
    pub referrer_url: String,
    pub utm_params: BTreeMap<String, String>,
}

impl RequestContext {
    /// Builds a context, taking UTM parameters from the landing page URL.
    pub fn new(
        user_agent: impl Into<String>,
        referrer_url: impl Into<String>,
        landing_url: &str,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            referrer_url: referrer_url.into(),
            utm_params: utm_params_from_url(landing_url),
        }
    }

    pub fn metadata(&self, submitted_at: DateTime<Utc>) -> SubmissionMetadata {
        SubmissionMetadata {
            submitted_at,
            user_agent: self.user_agent.clone(),
            referrer_url: self.referrer_url.clone(),
            utm_params: self.utm_params.clone(),
        }
    }
}

/// Extracts `utm_*` query parameters. Values are percent-decoded; `+` reads
/// as a space.
pub fn utm_params_from_url(url: &str) -> BTreeMap<String, String> {
    let Some((_, query)) = url.split_once('?') else {
        return BTreeMap::new();
    };
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            key.starts_with("utm_")
                .then(|| (key, decode_component(value)))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'+' => decoded.push(b' '),
            b'%' if index + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[index + 1..index + 3]).ok();
                match hex.and_then(|hex| u8::from_str_radix(hex, 16).ok()) {
                    Some(byte) => {
                        decoded.push(byte);
                        index += 2;
                    }
                    None => decoded.push(b'%'),
                }
            }
            byte => decoded.push(byte),
        }
        index += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}
