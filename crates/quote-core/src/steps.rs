//! The `(step, flow)` table shared by the validation engine and the step data
//! selector.

use std::fmt;

use quote_domain::{ConfigKind, FlowKind};

/// What a wizard step collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    BusinessInfo,
    ProjectScope,
    ServiceConfig(ConfigKind),
    TechnicalRequirements,
    TimelineBudget,
    Consultation,
}

impl StepKind {
    pub fn title(self) -> &'static str {
        match self {
            StepKind::BusinessInfo => "Business information",
            StepKind::ProjectScope => "Project scope",
            StepKind::ServiceConfig(ConfigKind::AiAssistant) => "Assistant configuration",
            StepKind::ServiceConfig(ConfigKind::Integration) => "Integration details",
            StepKind::ServiceConfig(ConfigKind::Application) => "Application requirements",
            StepKind::TechnicalRequirements => "Technical requirements",
            StepKind::TimelineBudget => "Timeline & budget",
            StepKind::Consultation => "Consultation",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Resolves a 1-based step number. The extended flow inserts the
/// service-specific configuration step after project scope.
pub fn step_kind(step: u8, flow: FlowKind) -> Option<StepKind> {
    let kind = match (flow, step) {
        (_, 1) => StepKind::BusinessInfo,
        (_, 2) => StepKind::ProjectScope,
        (FlowKind::Standard, 3) => StepKind::TechnicalRequirements,
        (FlowKind::Standard, 4) => StepKind::TimelineBudget,
        (FlowKind::Standard, 5) => StepKind::Consultation,
        (FlowKind::Extended(config), 3) => StepKind::ServiceConfig(config),
        (FlowKind::Extended(_), 4) => StepKind::TechnicalRequirements,
        (FlowKind::Extended(_), 5) => StepKind::TimelineBudget,
        (FlowKind::Extended(_), 6) => StepKind::Consultation,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_in_range_resolves() {
        for flow in [
            FlowKind::Standard,
            FlowKind::Extended(ConfigKind::AiAssistant),
            FlowKind::Extended(ConfigKind::Integration),
        ] {
            for step in 1..=flow.total_steps() {
                assert!(step_kind(step, flow).is_some(), "{flow:?} step {step}");
            }
            assert!(step_kind(0, flow).is_none());
            assert!(step_kind(flow.total_steps() + 1, flow).is_none());
        }
    }

    #[test]
    fn extended_step_three_is_service_specific() {
        assert_eq!(
            step_kind(3, FlowKind::Extended(ConfigKind::Application)),
            Some(StepKind::ServiceConfig(ConfigKind::Application))
        );
        assert_eq!(
            step_kind(6, FlowKind::Extended(ConfigKind::Integration)),
            Some(StepKind::Consultation)
        );
        assert_eq!(
            step_kind(5, FlowKind::Standard),
            Some(StepKind::Consultation)
        );
    }
}
