//! The quotation form record and its typed field updates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::service_config::ServiceConfig;

/// Every field the wizard can collect, across all steps and service contexts.
///
/// Fields outside the active flow keep their defaults and are ignored by
/// validation for that flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    // Business information
    pub company_name: String,
    pub industry: String,
    pub company_size: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,

    // Project scope
    pub project_description: String,
    pub primary_goals: Vec<String>,
    pub current_challenges: String,

    // Technical requirements
    pub current_systems: Vec<String>,
    pub integration_requirements: Vec<String>,
    pub hosting_preference: String,
    pub security_requirements: Vec<String>,

    // Timeline and budget
    pub timeline: String,
    pub budget_range: String,
    pub decision_timeframe: String,

    // Consultation preference
    pub needs_consultation: bool,
    pub consultation_format: Option<String>,
    pub preferred_time_slots: Vec<String>,
    pub additional_notes: String,

    pub service_config: Option<ServiceConfig>,
}

impl FormData {
    /// Replaces one field wholesale.
    pub fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::CompanyName(v) => self.company_name = v,
            FieldValue::Industry(v) => self.industry = v,
            FieldValue::CompanySize(v) => self.company_size = v,
            FieldValue::ContactName(v) => self.contact_name = v,
            FieldValue::Email(v) => self.email = v,
            FieldValue::Phone(v) => self.phone = v,
            FieldValue::JobTitle(v) => self.job_title = v,
            FieldValue::ProjectDescription(v) => self.project_description = v,
            FieldValue::PrimaryGoals(v) => self.primary_goals = v,
            FieldValue::CurrentChallenges(v) => self.current_challenges = v,
            FieldValue::CurrentSystems(v) => self.current_systems = v,
            FieldValue::IntegrationRequirements(v) => self.integration_requirements = v,
            FieldValue::HostingPreference(v) => self.hosting_preference = v,
            FieldValue::SecurityRequirements(v) => self.security_requirements = v,
            FieldValue::Timeline(v) => self.timeline = v,
            FieldValue::BudgetRange(v) => self.budget_range = v,
            FieldValue::DecisionTimeframe(v) => self.decision_timeframe = v,
            FieldValue::NeedsConsultation(v) => self.needs_consultation = v,
            FieldValue::ConsultationFormat(v) => self.consultation_format = v,
            FieldValue::PreferredTimeSlots(v) => self.preferred_time_slots = v,
            FieldValue::AdditionalNotes(v) => self.additional_notes = v,
            FieldValue::ServiceConfig(v) => self.service_config = v,
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == FormData::default()
    }

    /// Current value of `field`, as an update that would reproduce it.
    pub fn value_of(&self, field: FormField) -> FieldValue {
        match field {
            FormField::CompanyName => FieldValue::CompanyName(self.company_name.clone()),
            FormField::Industry => FieldValue::Industry(self.industry.clone()),
            FormField::CompanySize => FieldValue::CompanySize(self.company_size.clone()),
            FormField::ContactName => FieldValue::ContactName(self.contact_name.clone()),
            FormField::Email => FieldValue::Email(self.email.clone()),
            FormField::Phone => FieldValue::Phone(self.phone.clone()),
            FormField::JobTitle => FieldValue::JobTitle(self.job_title.clone()),
            FormField::ProjectDescription => {
                FieldValue::ProjectDescription(self.project_description.clone())
            }
            FormField::PrimaryGoals => FieldValue::PrimaryGoals(self.primary_goals.clone()),
            FormField::CurrentChallenges => {
                FieldValue::CurrentChallenges(self.current_challenges.clone())
            }
            FormField::CurrentSystems => FieldValue::CurrentSystems(self.current_systems.clone()),
            FormField::IntegrationRequirements => {
                FieldValue::IntegrationRequirements(self.integration_requirements.clone())
            }
            FormField::HostingPreference => {
                FieldValue::HostingPreference(self.hosting_preference.clone())
            }
            FormField::SecurityRequirements => {
                FieldValue::SecurityRequirements(self.security_requirements.clone())
            }
            FormField::Timeline => FieldValue::Timeline(self.timeline.clone()),
            FormField::BudgetRange => FieldValue::BudgetRange(self.budget_range.clone()),
            FormField::DecisionTimeframe => {
                FieldValue::DecisionTimeframe(self.decision_timeframe.clone())
            }
            FormField::NeedsConsultation => FieldValue::NeedsConsultation(self.needs_consultation),
            FormField::ConsultationFormat => {
                FieldValue::ConsultationFormat(self.consultation_format.clone())
            }
            FormField::PreferredTimeSlots => {
                FieldValue::PreferredTimeSlots(self.preferred_time_slots.clone())
            }
            FormField::AdditionalNotes => FieldValue::AdditionalNotes(self.additional_notes.clone()),
            FormField::ServiceConfig => FieldValue::ServiceConfig(self.service_config.clone()),
        }
    }
}

/// Top-level field identifiers, named by their wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CompanyName,
    Industry,
    CompanySize,
    ContactName,
    Email,
    Phone,
    JobTitle,
    ProjectDescription,
    PrimaryGoals,
    CurrentChallenges,
    CurrentSystems,
    IntegrationRequirements,
    HostingPreference,
    SecurityRequirements,
    Timeline,
    BudgetRange,
    DecisionTimeframe,
    NeedsConsultation,
    ConsultationFormat,
    PreferredTimeSlots,
    AdditionalNotes,
    ServiceConfig,
}

impl FormField {
    pub const ALL: [FormField; 22] = [
        FormField::CompanyName,
        FormField::Industry,
        FormField::CompanySize,
        FormField::ContactName,
        FormField::Email,
        FormField::Phone,
        FormField::JobTitle,
        FormField::ProjectDescription,
        FormField::PrimaryGoals,
        FormField::CurrentChallenges,
        FormField::CurrentSystems,
        FormField::IntegrationRequirements,
        FormField::HostingPreference,
        FormField::SecurityRequirements,
        FormField::Timeline,
        FormField::BudgetRange,
        FormField::DecisionTimeframe,
        FormField::NeedsConsultation,
        FormField::ConsultationFormat,
        FormField::PreferredTimeSlots,
        FormField::AdditionalNotes,
        FormField::ServiceConfig,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            FormField::CompanyName => "companyName",
            FormField::Industry => "industry",
            FormField::CompanySize => "companySize",
            FormField::ContactName => "contactName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::JobTitle => "jobTitle",
            FormField::ProjectDescription => "projectDescription",
            FormField::PrimaryGoals => "primaryGoals",
            FormField::CurrentChallenges => "currentChallenges",
            FormField::CurrentSystems => "currentSystems",
            FormField::IntegrationRequirements => "integrationRequirements",
            FormField::HostingPreference => "hostingPreference",
            FormField::SecurityRequirements => "securityRequirements",
            FormField::Timeline => "timeline",
            FormField::BudgetRange => "budgetRange",
            FormField::DecisionTimeframe => "decisionTimeframe",
            FormField::NeedsConsultation => "needsConsultation",
            FormField::ConsultationFormat => "consultationFormat",
            FormField::PreferredTimeSlots => "preferredTimeSlots",
            FormField::AdditionalNotes => "additionalNotes",
            FormField::ServiceConfig => "serviceConfig",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A replacement value for a single [`FormField`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    CompanyName(String),
    Industry(String),
    CompanySize(String),
    ContactName(String),
    Email(String),
    Phone(String),
    JobTitle(String),
    ProjectDescription(String),
    PrimaryGoals(Vec<String>),
    CurrentChallenges(String),
    CurrentSystems(Vec<String>),
    IntegrationRequirements(Vec<String>),
    HostingPreference(String),
    SecurityRequirements(Vec<String>),
    Timeline(String),
    BudgetRange(String),
    DecisionTimeframe(String),
    NeedsConsultation(bool),
    ConsultationFormat(Option<String>),
    PreferredTimeSlots(Vec<String>),
    AdditionalNotes(String),
    ServiceConfig(Option<ServiceConfig>),
}

impl FieldValue {
    pub fn field(&self) -> FormField {
        match self {
            FieldValue::CompanyName(_) => FormField::CompanyName,
            FieldValue::Industry(_) => FormField::Industry,
            FieldValue::CompanySize(_) => FormField::CompanySize,
            FieldValue::ContactName(_) => FormField::ContactName,
            FieldValue::Email(_) => FormField::Email,
            FieldValue::Phone(_) => FormField::Phone,
            FieldValue::JobTitle(_) => FormField::JobTitle,
            FieldValue::ProjectDescription(_) => FormField::ProjectDescription,
            FieldValue::PrimaryGoals(_) => FormField::PrimaryGoals,
            FieldValue::CurrentChallenges(_) => FormField::CurrentChallenges,
            FieldValue::CurrentSystems(_) => FormField::CurrentSystems,
            FieldValue::IntegrationRequirements(_) => FormField::IntegrationRequirements,
            FieldValue::HostingPreference(_) => FormField::HostingPreference,
            FieldValue::SecurityRequirements(_) => FormField::SecurityRequirements,
            FieldValue::Timeline(_) => FormField::Timeline,
            FieldValue::BudgetRange(_) => FormField::BudgetRange,
            FieldValue::DecisionTimeframe(_) => FormField::DecisionTimeframe,
            FieldValue::NeedsConsultation(_) => FormField::NeedsConsultation,
            FieldValue::ConsultationFormat(_) => FormField::ConsultationFormat,
            FieldValue::PreferredTimeSlots(_) => FormField::PreferredTimeSlots,
            FieldValue::AdditionalNotes(_) => FormField::AdditionalNotes,
            FieldValue::ServiceConfig(_) => FormField::ServiceConfig,
        }
    }
}
