//! Per-step schemas, built once and shared by validation and the step data
//! selector.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use quote_domain::{options::*, ConfigKind};

use super::schema::Schema;
use crate::steps::StepKind;

/// Ordered top-level fields of one step.
#[derive(Debug, Clone)]
pub struct StepSchema {
    pub fields: Vec<(&'static str, Schema)>,
    /// Whether the consultation cross-field rule applies.
    pub consultation_rule: bool,
}

impl StepSchema {
    fn new(fields: Vec<(&'static str, Schema)>) -> Self {
        Self {
            fields,
            consultation_rule: false,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(key, _)| *key)
    }

    pub fn field(&self, key: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, schema)| schema)
    }
}

const ALL_STEP_KINDS: [StepKind; 8] = [
    StepKind::BusinessInfo,
    StepKind::ProjectScope,
    StepKind::ServiceConfig(ConfigKind::AiAssistant),
    StepKind::ServiceConfig(ConfigKind::Integration),
    StepKind::ServiceConfig(ConfigKind::Application),
    StepKind::TechnicalRequirements,
    StepKind::TimelineBudget,
    StepKind::Consultation,
];

static STEP_SCHEMAS: Lazy<HashMap<StepKind, StepSchema>> = Lazy::new(|| {
    ALL_STEP_KINDS
        .iter()
        .map(|kind| (*kind, build(*kind)))
        .collect()
});

/// Schema for a step kind.
pub fn schema_for(kind: StepKind) -> &'static StepSchema {
    &STEP_SCHEMAS[&kind]
}

fn build(kind: StepKind) -> StepSchema {
    match kind {
        StepKind::BusinessInfo => StepSchema::new(vec![
            ("companyName", Schema::text(2, 100, "Company name is required")),
            ("industry", Schema::choice(INDUSTRIES, "Please select your industry")),
            (
                "companySize",
                Schema::choice(COMPANY_SIZES, "Please select your company size"),
            ),
            ("contactName", Schema::text(2, 100, "Contact name is required")),
            ("email", Schema::Email),
            ("phone", Schema::Phone),
            ("jobTitle", Schema::optional_text(100)),
        ]),
        StepKind::ProjectScope => StepSchema::new(vec![
            (
                "projectDescription",
                Schema::text(20, 2000, "Please describe your project"),
            ),
            (
                "primaryGoals",
                Schema::multi(PRIMARY_GOALS, 1, "Select at least one goal"),
            ),
            ("currentChallenges", Schema::optional_text(1000)),
        ]),
        StepKind::ServiceConfig(config) => StepSchema::new(vec![(
            config.step_key(),
            service_config_schema(config),
        )]),
        StepKind::TechnicalRequirements => StepSchema::new(vec![
            ("currentSystems", Schema::TextList { max: 20 }),
            ("integrationRequirements", Schema::TextList { max: 20 }),
            (
                "hostingPreference",
                Schema::choice(HOSTING_PREFERENCES, "Please select a hosting preference"),
            ),
            (
                "securityRequirements",
                Schema::multi(SECURITY_REQUIREMENTS, 0, "Invalid security requirement"),
            ),
        ]),
        StepKind::TimelineBudget => StepSchema::new(vec![
            ("timeline", Schema::choice(TIMELINES, "Please select a timeline")),
            (
                "budgetRange",
                Schema::choice(BUDGET_RANGES, "Please select a budget range"),
            ),
            ("decisionTimeframe", Schema::optional_choice(DECISION_TIMEFRAMES)),
        ]),
        StepKind::Consultation => StepSchema {
            fields: vec![
                ("needsConsultation", Schema::Bool),
                ("consultationFormat", Schema::optional_choice(CONSULTATION_FORMATS)),
                (
                    "preferredTimeSlots",
                    Schema::multi(TIME_SLOTS, 0, "Invalid time slot"),
                ),
                ("additionalNotes", Schema::optional_text(1000)),
            ],
            consultation_rule: true,
        },
    }
}

fn service_config_schema(kind: ConfigKind) -> Schema {
    match kind {
        ConfigKind::AiAssistant => Schema::Object {
            fields: vec![
                (
                    "primaryUseCase",
                    Schema::choice(ASSISTANT_USE_CASES, "Please select the main use case"),
                ),
                (
                    "channels",
                    Schema::multi(ASSISTANT_CHANNELS, 1, "Select at least one channel"),
                ),
                (
                    "languages",
                    Schema::multi(ASSISTANT_LANGUAGES, 1, "Select at least one language"),
                ),
                (
                    "monthlyConversations",
                    Schema::choice(CONVERSATION_VOLUMES, "Please estimate the conversation volume"),
                ),
                (
                    "knowledgeSources",
                    Schema::multi(KNOWLEDGE_SOURCES, 0, "Invalid knowledge source"),
                ),
                ("humanHandoff", Schema::Bool),
            ],
            message: "Please complete the assistant configuration",
        },
        ConfigKind::Integration => Schema::Object {
            fields: vec![
                (
                    "integrations",
                    Schema::List {
                        item: Box::new(integration_pair_schema()),
                        min: 1,
                        message: "Add at least one integration",
                    },
                ),
                (
                    "dataVolume",
                    Schema::choice(DATA_VOLUMES, "Please estimate the data volume"),
                ),
            ],
            message: "Please complete the integration details",
        },
        ConfigKind::Application => Schema::Object {
            fields: vec![
                (
                    "applicationType",
                    Schema::choice(APPLICATION_TYPES, "Please select the application type"),
                ),
                (
                    "platforms",
                    Schema::multi(PLATFORMS, 1, "Select at least one platform"),
                ),
                (
                    "expectedUsers",
                    Schema::choice(USER_SCALES, "Please estimate the number of users"),
                ),
                (
                    "aiCapabilities",
                    Schema::multi(AI_CAPABILITIES, 1, "Select at least one AI capability"),
                ),
                ("hasDesignAssets", Schema::Bool),
            ],
            message: "Please complete the application requirements",
        },
    }
}

fn integration_pair_schema() -> Schema {
    Schema::Object {
        fields: vec![
            ("id", Schema::text(1, 64, "Integration identifier is missing")),
            ("sourceSystem", Schema::text(1, 100, "Source system is required")),
            ("targetSystem", Schema::text(1, 100, "Target system is required")),
            (
                "direction",
                Schema::choice(INTEGRATION_DIRECTIONS, "Please select a direction"),
            ),
            (
                "syncFrequency",
                Schema::choice(SYNC_FREQUENCIES, "Please select a sync frequency"),
            ),
            ("apiAvailable", Schema::NullableBool),
        ],
        message: "Invalid integration",
    }
}
