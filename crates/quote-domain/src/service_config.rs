//! Service-specific configuration captured by step 3 of the extended flow.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::context::ConfigKind;

/// Exactly one of the three service-specific configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum ServiceConfig {
    AiAssistant(AssistantConfig),
    Integration(IntegrationConfig),
    Application(ApplicationConfig),
}

impl ServiceConfig {
    /// Blank configuration of the requested shape. Integration configs start
    /// with one empty pair.
    pub fn initial(kind: ConfigKind) -> Self {
        match kind {
            ConfigKind::AiAssistant => ServiceConfig::AiAssistant(AssistantConfig::default()),
            ConfigKind::Integration => ServiceConfig::Integration(IntegrationConfig::new()),
            ConfigKind::Application => ServiceConfig::Application(ApplicationConfig::default()),
        }
    }

    pub fn kind(&self) -> ConfigKind {
        match self {
            ServiceConfig::AiAssistant(_) => ConfigKind::AiAssistant,
            ServiceConfig::Integration(_) => ConfigKind::Integration,
            ServiceConfig::Application(_) => ConfigKind::Application,
        }
    }

    pub fn as_integration(&self) -> Option<&IntegrationConfig> {
        match self {
            ServiceConfig::Integration(config) => Some(config),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssistantConfig {
    pub primary_use_case: String,
    pub channels: Vec<String>,
    pub languages: Vec<String>,
    pub monthly_conversations: String,
    pub knowledge_sources: Vec<String>,
    pub human_handoff: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    #[serde(default = "one_blank_pair", deserialize_with = "at_least_one_pair")]
    pub integrations: Vec<IntegrationPair>,
    #[serde(default)]
    pub data_volume: String,
}

impl IntegrationConfig {
    pub fn new() -> Self {
        Self {
            integrations: one_blank_pair(),
            data_volume: String::new(),
        }
    }

    /// Appends a blank pair with a fresh identifier and returns that identifier.
    pub fn add_integration(&mut self) -> String {
        let pair = IntegrationPair::new();
        let id = pair.id.clone();
        self.integrations.push(pair);
        id
    }

    /// Removes the pair with `id`. Returns false, leaving the list untouched,
    /// when only one pair remains or the id is unknown.
    pub fn remove_integration(&mut self, id: &str) -> bool {
        if self.integrations.len() <= 1 {
            return false;
        }
        let before = self.integrations.len();
        self.integrations.retain(|pair| pair.id != id);
        self.integrations.len() != before
    }

    pub fn pair_mut(&mut self, id: &str) -> Option<&mut IntegrationPair> {
        self.integrations.iter_mut().find(|pair| pair.id == id)
    }
}

fn one_blank_pair() -> Vec<IntegrationPair> {
    vec![IntegrationPair::new()]
}

/// Saved drafts and answer files may carry an empty list; it loads as one
/// blank pair.
fn at_least_one_pair<'de, D>(deserializer: D) -> Result<Vec<IntegrationPair>, D::Error>
where
    D: Deserializer<'de>,
{
    let pairs = Vec::<IntegrationPair>::deserialize(deserializer)?;
    if pairs.is_empty() {
        return Ok(one_blank_pair());
    }
    Ok(pairs)
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One source → target system link inside an integration request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationPair {
    pub id: String,
    #[serde(default)]
    pub source_system: String,
    #[serde(default)]
    pub target_system: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub sync_frequency: String,
    #[serde(default)]
    pub api_available: Option<bool>,
}

impl IntegrationPair {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_system: String::new(),
            target_system: String::new(),
            direction: String::new(),
            sync_frequency: String::new(),
            api_available: None,
        }
    }
}

impl Default for IntegrationPair {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationConfig {
    pub application_type: String,
    pub platforms: Vec<String>,
    pub expected_users: String,
    pub ai_capabilities: Vec<String>,
    pub has_design_assets: bool,
}
