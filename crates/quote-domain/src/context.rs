//! Service contexts and the flow variants they select.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marketing service a quotation request is raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceContext {
    IntelligentApplications,
    Solutions,
    SmartAssistant,
    SystemIntegration,
}

impl ServiceContext {
    pub const ALL: [ServiceContext; 4] = [
        ServiceContext::IntelligentApplications,
        ServiceContext::Solutions,
        ServiceContext::SmartAssistant,
        ServiceContext::SystemIntegration,
    ];

    /// Parses a wire name. Unknown names yield `None`, which callers treat as
    /// the standard flow.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "intelligent-applications" => Some(ServiceContext::IntelligentApplications),
            "solutions" => Some(ServiceContext::Solutions),
            "smart-assistant" => Some(ServiceContext::SmartAssistant),
            "system-integration" => Some(ServiceContext::SystemIntegration),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceContext::IntelligentApplications => "intelligent-applications",
            ServiceContext::Solutions => "solutions",
            ServiceContext::SmartAssistant => "smart-assistant",
            ServiceContext::SystemIntegration => "system-integration",
        }
    }

    /// Human-readable service name used in submissions and the CLI banner.
    pub fn display_name(self) -> &'static str {
        match self {
            ServiceContext::IntelligentApplications => "Intelligent Applications",
            ServiceContext::Solutions => "Solutions",
            ServiceContext::SmartAssistant => "Smart Assistant",
            ServiceContext::SystemIntegration => "System Integration",
        }
    }

    /// Service-specific configuration captured by the extended flow, if any.
    pub fn config_kind(self) -> Option<ConfigKind> {
        match self {
            ServiceContext::SmartAssistant => Some(ConfigKind::AiAssistant),
            ServiceContext::SystemIntegration => Some(ConfigKind::Integration),
            ServiceContext::IntelligentApplications => Some(ConfigKind::Application),
            ServiceContext::Solutions => None,
        }
    }

    /// Identifier under which the exit-intent popup stores captured leads.
    pub fn exit_intent_id(self) -> &'static str {
        match self {
            ServiceContext::IntelligentApplications => "intelligent_apps",
            ServiceContext::Solutions => "solutions",
            ServiceContext::SmartAssistant => "ai_assistant",
            ServiceContext::SystemIntegration => "integrations",
        }
    }
}

impl fmt::Display for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step-count variant of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    /// Five steps: business, scope, technical, timeline/budget, consultation.
    Standard,
    /// Six steps: a service-specific configuration step follows project scope.
    Extended(ConfigKind),
}

impl FlowKind {
    pub fn for_context(context: Option<ServiceContext>) -> Self {
        match context.and_then(ServiceContext::config_kind) {
            Some(kind) => FlowKind::Extended(kind),
            None => FlowKind::Standard,
        }
    }

    pub fn total_steps(self) -> u8 {
        match self {
            FlowKind::Standard => 5,
            FlowKind::Extended(_) => 6,
        }
    }

    pub fn is_extended(self) -> bool {
        matches!(self, FlowKind::Extended(_))
    }
}

/// Total number of wizard steps for a context: 6 for the extended contexts, else 5.
pub fn total_steps_for(context: Option<ServiceContext>) -> u8 {
    FlowKind::for_context(context).total_steps()
}

/// The three shapes of service-specific configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigKind {
    AiAssistant,
    Integration,
    Application,
}

impl ConfigKind {
    /// Key under which the step data selector projects this configuration.
    pub fn step_key(self) -> &'static str {
        match self {
            ConfigKind::AiAssistant => "aiAssistantConfig",
            ConfigKind::Integration => "integrationConfig",
            ConfigKind::Application => "applicationConfig",
        }
    }
}
