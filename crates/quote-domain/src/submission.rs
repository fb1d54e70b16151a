//! Request and response shapes exchanged with the quotation backend.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{context::ServiceContext, form::FormData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Basic,
    #[default]
    Standard,
    Enterprise,
}

impl PackageType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(PackageType::Basic),
            "standard" => Some(PackageType::Standard),
            "enterprise" => Some(PackageType::Enterprise),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PackageType::Basic => "Basic",
            PackageType::Standard => "Standard",
            PackageType::Enterprise => "Enterprise",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionMetadata {
    pub submitted_at: DateTime<Utc>,
    pub user_agent: String,
    pub referrer_url: String,
    pub utm_params: BTreeMap<String, String>,
}

/// Savings estimate carried over from the ROI calculator, when one was run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiSnapshot {
    pub service_type: String,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub calculated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payback_period: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRequest {
    pub service_context: ServiceContext,
    pub service_name: String,
    pub package_type: PackageType,
    pub package_name: String,
    pub form_data: FormData,
    pub metadata: SubmissionMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi_snapshot: Option<RoiSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuotationResponse {
    pub fn accepted(reference_number: impl Into<String>) -> Self {
        Self {
            success: true,
            reference_number: Some(reference_number.into()),
            ..Self::default()
        }
    }

    /// Reference number of a successful submission. A response without
    /// `success` or without a non-empty reference counts as a failure.
    pub fn confirmed_reference(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.reference_number
            .as_deref()
            .filter(|reference| !reference.trim().is_empty())
    }
}
