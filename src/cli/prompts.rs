//! Interactive wizard run on a terminal.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use quote_core::{QuotationWizard, StepKind, StepOutcome};
use quote_domain::{
    options::{self, OptionItem},
    ApplicationConfig, AssistantConfig, ConfigKind, FieldValue, FormData, IntegrationConfig, IntegrationPair,
    ServiceConfig,
};

use crate::{cli::output, errors::CliError};

const API_AVAILABILITY: [&str; 3] = ["Yes", "No", "Not sure"];
const KEEP_PAIRS: &str = "Continue with these integrations";
const ADD_PAIR: &str = "Add an integration";
const REMOVE_PAIR: &str = "Remove an integration";

enum Recovery {
    Retry,
    Back,
    Quit,
}

/// Prompts step by step until the request is confirmed or the user quits.
/// Quitting, or a prompt failing, saves the draft.
pub fn run(wizard: &mut QuotationWizard) -> Result<String, CliError> {
    let theme = ColorfulTheme::default();
    let outcome = drive(&theme, wizard);
    close_on_error(wizard, outcome)
}

fn close_on_error<T>(
    wizard: &mut QuotationWizard,
    outcome: Result<T, CliError>,
) -> Result<T, CliError> {
    if outcome.is_err() {
        wizard.close();
    }
    outcome
}

fn drive(theme: &ColorfulTheme, wizard: &mut QuotationWizard) -> Result<String, CliError> {
    loop {
        let Some(kind) = wizard.current_step_kind() else {
            return Err(CliError::Cancelled);
        };
        output::section(format!(
            "Step {} of {}: {}",
            wizard.state().current_step,
            wizard.state().total_steps,
            kind
        ));
        if kind == StepKind::ServiceConfig(ConfigKind::Integration) {
            manage_integrations(theme, wizard)?;
        }
        let values = prompt_step(theme, kind, &wizard.state().form_data)?;
        apply_answers(wizard, values);

        match wizard.next() {
            StepOutcome::Advanced { .. } => {}
            StepOutcome::Confirmed { reference_number } => {
                wizard.close();
                return Ok(reference_number);
            }
            StepOutcome::Invalid { errors } => {
                output::field_errors(&errors);
                match recovery(theme, wizard.state().current_step > 1)? {
                    Recovery::Retry => {}
                    Recovery::Back => wizard.back(),
                    Recovery::Quit => {
                        wizard.close();
                        return Err(CliError::Cancelled);
                    }
                }
            }
            StepOutcome::SubmissionFailed => {
                output::field_errors(&wizard.state().errors);
                let retry = Confirm::with_theme(theme)
                    .with_prompt("Try submitting again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    wizard.close();
                    return Err(CliError::SubmissionFailed);
                }
            }
            StepOutcome::Ignored => return Err(CliError::Cancelled),
        }
    }
}

/// The deadline left by earlier answers is checked first; the time spent on
/// the prompts is the quiet period.
fn apply_answers(wizard: &mut QuotationWizard, values: Vec<FieldValue>) {
    wizard.tick();
    for value in values {
        wizard.update_field(value);
    }
}

fn integration_pairs(wizard: &QuotationWizard) -> Vec<IntegrationPair> {
    wizard
        .state()
        .form_data
        .service_config
        .as_ref()
        .and_then(ServiceConfig::as_integration)
        .map(|config| config.integrations.clone())
        .unwrap_or_default()
}

fn integration_menu(pairs: usize) -> Vec<&'static str> {
    let mut items = vec![KEEP_PAIRS, ADD_PAIR];
    if pairs > 1 {
        items.push(REMOVE_PAIR);
    }
    items
}

fn pair_label(index: usize, pair: &IntegrationPair) -> String {
    if pair.source_system.is_empty() && pair.target_system.is_empty() {
        return format!("Integration {} (not filled in yet)", index + 1);
    }
    format!(
        "Integration {}: {} -> {}",
        index + 1,
        pair.source_system,
        pair.target_system
    )
}

/// Adds or removes integration pairs until the user continues.
fn manage_integrations(
    theme: &ColorfulTheme,
    wizard: &mut QuotationWizard,
) -> Result<(), CliError> {
    loop {
        let pairs = integration_pairs(wizard);
        let labels: Vec<String> = pairs
            .iter()
            .enumerate()
            .map(|(index, pair)| pair_label(index, pair))
            .collect();
        for label in &labels {
            output::info(label);
        }
        let items = integration_menu(pairs.len());
        let choice = Select::with_theme(theme)
            .with_prompt("Integrations")
            .items(&items)
            .default(0)
            .interact()?;
        match items[choice] {
            ADD_PAIR => {
                wizard.add_integration();
            }
            REMOVE_PAIR => {
                let index = Select::with_theme(theme)
                    .with_prompt("Remove which integration?")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                if !wizard.remove_integration(&pairs[index].id) {
                    output::warning("At least one integration is required");
                }
            }
            _ => return Ok(()),
        }
    }
}

fn recovery(theme: &ColorfulTheme, can_go_back: bool) -> Result<Recovery, CliError> {
    let mut items = vec!["Edit this step"];
    if can_go_back {
        items.push("Go back");
    }
    items.push("Save draft and quit");
    let choice = Select::with_theme(theme)
        .with_prompt("What next?")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(match items[choice] {
        "Edit this step" => Recovery::Retry,
        "Go back" => Recovery::Back,
        _ => Recovery::Quit,
    })
}

fn prompt_step(
    theme: &ColorfulTheme,
    kind: StepKind,
    current: &FormData,
) -> Result<Vec<FieldValue>, CliError> {
    let values = match kind {
        StepKind::BusinessInfo => vec![
            FieldValue::CompanyName(text(theme, "Company name", &current.company_name)?),
            FieldValue::Industry(choose(theme, "Industry", options::INDUSTRIES, &current.industry)?),
            FieldValue::CompanySize(choose(
                theme,
                "Company size",
                options::COMPANY_SIZES,
                &current.company_size,
            )?),
            FieldValue::ContactName(text(theme, "Your name", &current.contact_name)?),
            FieldValue::Email(text(theme, "Business email", &current.email)?),
            FieldValue::Phone(text(theme, "Phone (optional)", &current.phone)?),
            FieldValue::JobTitle(text(theme, "Job title (optional)", &current.job_title)?),
        ],
        StepKind::ProjectScope => vec![
            FieldValue::ProjectDescription(text(
                theme,
                "Describe your project",
                &current.project_description,
            )?),
            FieldValue::PrimaryGoals(choose_many(
                theme,
                "Primary goals",
                options::PRIMARY_GOALS,
                &current.primary_goals,
            )?),
            FieldValue::CurrentChallenges(text(
                theme,
                "Current challenges (optional)",
                &current.current_challenges,
            )?),
        ],
        StepKind::ServiceConfig(_) => {
            let config = match current.service_config.clone() {
                Some(ServiceConfig::AiAssistant(config)) => {
                    ServiceConfig::AiAssistant(prompt_assistant(theme, config)?)
                }
                Some(ServiceConfig::Integration(config)) => {
                    ServiceConfig::Integration(prompt_integration(theme, config)?)
                }
                Some(ServiceConfig::Application(config)) => {
                    ServiceConfig::Application(prompt_application(theme, config)?)
                }
                None => return Ok(Vec::new()),
            };
            vec![FieldValue::ServiceConfig(Some(config))]
        }
        StepKind::TechnicalRequirements => vec![
            FieldValue::CurrentSystems(list(
                theme,
                "Current systems (comma separated)",
                &current.current_systems,
            )?),
            FieldValue::IntegrationRequirements(list(
                theme,
                "Required integrations (comma separated)",
                &current.integration_requirements,
            )?),
            FieldValue::HostingPreference(choose(
                theme,
                "Hosting preference",
                options::HOSTING_PREFERENCES,
                &current.hosting_preference,
            )?),
            FieldValue::SecurityRequirements(choose_many(
                theme,
                "Security requirements",
                options::SECURITY_REQUIREMENTS,
                &current.security_requirements,
            )?),
        ],
        StepKind::TimelineBudget => vec![
            FieldValue::Timeline(choose(theme, "Timeline", options::TIMELINES, &current.timeline)?),
            FieldValue::BudgetRange(choose(
                theme,
                "Budget range",
                options::BUDGET_RANGES,
                &current.budget_range,
            )?),
            FieldValue::DecisionTimeframe(choose(
                theme,
                "Decision timeframe",
                options::DECISION_TIMEFRAMES,
                &current.decision_timeframe,
            )?),
        ],
        StepKind::Consultation => {
            let needs = Confirm::with_theme(theme)
                .with_prompt("Would you like a consultation?")
                .default(current.needs_consultation)
                .interact()?;
            let (format, slots) = if needs {
                let format = choose(
                    theme,
                    "Consultation format",
                    options::CONSULTATION_FORMATS,
                    current.consultation_format.as_deref().unwrap_or_default(),
                )?;
                let slots = choose_many(
                    theme,
                    "Preferred time slots",
                    options::TIME_SLOTS,
                    &current.preferred_time_slots,
                )?;
                (Some(format), slots)
            } else {
                (None, Vec::new())
            };
            vec![
                FieldValue::NeedsConsultation(needs),
                FieldValue::ConsultationFormat(format),
                FieldValue::PreferredTimeSlots(slots),
                FieldValue::AdditionalNotes(text(
                    theme,
                    "Anything else? (optional)",
                    &current.additional_notes,
                )?),
            ]
        }
    };
    Ok(values)
}

fn prompt_assistant(
    theme: &ColorfulTheme,
    config: AssistantConfig,
) -> Result<AssistantConfig, CliError> {
    Ok(AssistantConfig {
        primary_use_case: choose(
            theme,
            "Primary use case",
            options::ASSISTANT_USE_CASES,
            &config.primary_use_case,
        )?,
        channels: choose_many(theme, "Channels", options::ASSISTANT_CHANNELS, &config.channels)?,
        languages: choose_many(
            theme,
            "Languages",
            options::ASSISTANT_LANGUAGES,
            &config.languages,
        )?,
        monthly_conversations: choose(
            theme,
            "Expected conversations",
            options::CONVERSATION_VOLUMES,
            &config.monthly_conversations,
        )?,
        knowledge_sources: choose_many(
            theme,
            "Knowledge sources",
            options::KNOWLEDGE_SOURCES,
            &config.knowledge_sources,
        )?,
        human_handoff: Confirm::with_theme(theme)
            .with_prompt("Hand over to a human when needed?")
            .default(config.human_handoff)
            .interact()?,
    })
}

fn prompt_integration(
    theme: &ColorfulTheme,
    mut config: IntegrationConfig,
) -> Result<IntegrationConfig, CliError> {
    for (index, pair) in config.integrations.iter_mut().enumerate() {
        output::section(pair_label(index, pair));
        *pair = prompt_pair(theme, pair.clone())?;
    }
    config.data_volume = choose(theme, "Data volume", options::DATA_VOLUMES, &config.data_volume)?;
    Ok(config)
}

fn prompt_pair(theme: &ColorfulTheme, pair: IntegrationPair) -> Result<IntegrationPair, CliError> {
    let default_api = match pair.api_available {
        Some(true) => 0,
        Some(false) => 1,
        None => 2,
    };
    let source_system = text(theme, "Source system", &pair.source_system)?;
    let target_system = text(theme, "Target system", &pair.target_system)?;
    let direction = choose(
        theme,
        "Direction",
        options::INTEGRATION_DIRECTIONS,
        &pair.direction,
    )?;
    let sync_frequency = choose(
        theme,
        "Sync frequency",
        options::SYNC_FREQUENCIES,
        &pair.sync_frequency,
    )?;
    let api = Select::with_theme(theme)
        .with_prompt("Does the source system offer an API?")
        .items(&API_AVAILABILITY)
        .default(default_api)
        .interact()?;
    Ok(IntegrationPair {
        source_system,
        target_system,
        direction,
        sync_frequency,
        api_available: match api {
            0 => Some(true),
            1 => Some(false),
            _ => None,
        },
        ..pair
    })
}

fn prompt_application(
    theme: &ColorfulTheme,
    config: ApplicationConfig,
) -> Result<ApplicationConfig, CliError> {
    Ok(ApplicationConfig {
        application_type: choose(
            theme,
            "Application type",
            options::APPLICATION_TYPES,
            &config.application_type,
        )?,
        platforms: choose_many(theme, "Platforms", options::PLATFORMS, &config.platforms)?,
        expected_users: choose(
            theme,
            "Expected users",
            options::USER_SCALES,
            &config.expected_users,
        )?,
        ai_capabilities: choose_many(
            theme,
            "AI capabilities",
            options::AI_CAPABILITIES,
            &config.ai_capabilities,
        )?,
        has_design_assets: Confirm::with_theme(theme)
            .with_prompt("Do you already have designs?")
            .default(config.has_design_assets)
            .interact()?,
    })
}

fn text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> Result<String, CliError> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

fn list(theme: &ColorfulTheme, prompt: &str, initial: &[String]) -> Result<Vec<String>, CliError> {
    let raw = text(theme, prompt, &initial.join(", "))?;
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect())
}

fn choose(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[OptionItem],
    current: &str,
) -> Result<String, CliError> {
    let labels: Vec<&str> = items.iter().map(|item| item.label).collect();
    let default = items
        .iter()
        .position(|item| item.value == current)
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(items[index].value.to_string())
}

fn choose_many(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[OptionItem],
    current: &[String],
) -> Result<Vec<String>, CliError> {
    let labels: Vec<&str> = items.iter().map(|item| item.label).collect();
    let defaults: Vec<bool> = items
        .iter()
        .map(|item| current.iter().any(|value| value == item.value))
        .collect();
    let picked = MultiSelect::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .defaults(&defaults)
        .interact()?;
    Ok(picked
        .into_iter()
        .map(|index| items[index].value.to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use chrono::{Duration, TimeZone, Utc};
    use quote_core::{
        DraftStore, FixedClock, MemoryStore, QuotationSubmitter, SubmitError, WizardOptions,
        WizardPhase,
    };
    use quote_domain::{QuotationRequest, QuotationResponse, ServiceContext};

    use super::*;

    struct Accepting;

    impl QuotationSubmitter for Accepting {
        fn submit(&self, _request: &QuotationRequest) -> Result<QuotationResponse, SubmitError> {
            Ok(QuotationResponse::accepted("Q-1"))
        }
    }

    fn wizard_on_step_two() -> (QuotationWizard, Arc<MemoryStore>, Arc<FixedClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap(),
        ));
        let drafts = DraftStore::new(store.clone(), clock.clone());
        let mut wizard = QuotationWizard::new(
            WizardOptions::new(Some(ServiceContext::Solutions)),
            drafts,
            clock.clone(),
            Box::new(Accepting),
        );
        wizard.open();
        for value in [
            FieldValue::CompanyName("Northwind Logistics".into()),
            FieldValue::Industry("logistics".into()),
            FieldValue::CompanySize("51-200".into()),
            FieldValue::ContactName("Robin Vermeer".into()),
            FieldValue::Email("robin@northwind.io".into()),
        ] {
            wizard.update_field(value);
        }
        assert!(matches!(wizard.next(), StepOutcome::Advanced { step: 2 }));
        (wizard, store, clock)
    }

    #[test]
    fn answers_given_after_the_quiet_period_autosave_earlier_ones() {
        let (mut wizard, store, clock) = wizard_on_step_two();
        apply_answers(
            &mut wizard,
            vec![FieldValue::ProjectDescription("First pass".into())],
        );
        assert!(!store.contains("quotation_form_data_solutions"));

        clock.advance(Duration::milliseconds(2_100));
        apply_answers(
            &mut wizard,
            vec![FieldValue::ProjectDescription("Second pass".into())],
        );
        assert!(store.contains("quotation_form_data_solutions"));
        assert!(wizard.autosave_pending());
    }

    #[test]
    fn failed_prompt_saves_the_draft() {
        let (mut wizard, store, _clock) = wizard_on_step_two();
        apply_answers(
            &mut wizard,
            vec![FieldValue::ProjectDescription("Half written".into())],
        );
        let interrupted = io::Error::new(io::ErrorKind::Interrupted, "interrupted");

        let outcome: Result<String, CliError> = close_on_error(
            &mut wizard,
            Err(CliError::Prompt(dialoguer::Error::from(interrupted))),
        );

        assert!(matches!(outcome, Err(CliError::Prompt(_))));
        assert_eq!(wizard.phase(), &WizardPhase::Closed);
        assert!(store.contains("quotation_form_data_solutions"));
    }

    #[test]
    fn removal_is_offered_only_with_several_pairs() {
        assert_eq!(integration_menu(1), vec![KEEP_PAIRS, ADD_PAIR]);
        assert_eq!(integration_menu(2), vec![KEEP_PAIRS, ADD_PAIR, REMOVE_PAIR]);
    }

    #[test]
    fn pair_labels_name_both_systems() {
        let mut pair = IntegrationPair::new();
        assert_eq!(pair_label(0, &pair), "Integration 1 (not filled in yet)");
        pair.source_system = "Exact Online".into();
        pair.target_system = "Salesforce".into();
        assert_eq!(pair_label(1, &pair), "Integration 2: Exact Online -> Salesforce");
    }
}
