//! Field-level rules: email, phone and input sanitisation.

use once_cell::sync::Lazy;
use quote_domain::{FormData, ServiceConfig};
use regex::Regex;

/// Domains of throwaway mailbox providers. Matched case-insensitively against
/// the full domain.
pub const DISPOSABLE_EMAIL_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "dispostable.com",
    "fakeinbox.com",
    "getnada.com",
    "guerrillamail.com",
    "mailinator.com",
    "maildrop.cc",
    "sharklasers.com",
    "temp-mail.org",
    "tempmail.com",
    "throwawaymail.com",
    "trashmail.com",
    "yopmail.com",
];

static EMAIL_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static SCRIPT_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|iframe)\b[^>]*>.*?</(script|iframe)\s*>").expect("valid pattern")
});
static STRAY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?(script|iframe)\b[^>]*>").expect("valid pattern"));
static JAVASCRIPT_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript\s*:").expect("valid pattern"));
/// An `on*=` attribute inside a tag; the tag prefix is captured and kept.
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(<[a-z][^>]*?)\s+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]*)"#)
        .expect("valid pattern")
});

/// Accepts well-formed addresses whose domain is not a disposable provider.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email address is required");
    }
    if !EMAIL_FORMAT.is_match(email) {
        return Err("Please enter a valid email address");
    }
    if is_disposable_email(email) {
        return Err("Please use your business email address");
    }
    Ok(())
}

pub fn is_disposable_email(email: &str) -> bool {
    let Some((_, domain)) = email.trim().rsplit_once('@') else {
        return false;
    };
    DISPOSABLE_EMAIL_DOMAINS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(domain))
}

/// Empty input passes. Otherwise only digits, spaces, dashes, plus signs and
/// parentheses are allowed, with at least 10 digits.
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Ok(());
    }
    let allowed = phone
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '-' | '+' | '(' | ')'));
    if !allowed {
        return Err("Phone number may only contain digits, spaces, +, - and parentheses");
    }
    if phone.chars().filter(|ch| ch.is_ascii_digit()).count() < 10 {
        return Err("Phone number must contain at least 10 digits");
    }
    Ok(())
}

/// Strips script/iframe elements, `javascript:` URIs and inline event-handler
/// attributes.
pub fn sanitize_input(input: &str) -> String {
    let without_elements = SCRIPT_ELEMENT.replace_all(input, "");
    let without_tags = STRAY_TAG.replace_all(&without_elements, "");
    let without_uris = JAVASCRIPT_URI.replace_all(&without_tags, "");
    let mut cleaned = without_uris.into_owned();
    while EVENT_HANDLER.is_match(&cleaned) {
        cleaned = EVENT_HANDLER.replace_all(&cleaned, "$1").into_owned();
    }
    cleaned.trim().to_string()
}

fn sanitize_in_place(value: &mut String) {
    *value = sanitize_input(value);
}

fn sanitize_list(values: &mut [String]) {
    values.iter_mut().for_each(sanitize_in_place);
}

/// Applies [`sanitize_input`] to every free-text and list field, nested
/// service configuration included.
pub fn sanitize_form_data(data: &mut FormData) {
    for text in [
        &mut data.company_name,
        &mut data.industry,
        &mut data.company_size,
        &mut data.contact_name,
        &mut data.email,
        &mut data.phone,
        &mut data.job_title,
        &mut data.project_description,
        &mut data.current_challenges,
        &mut data.hosting_preference,
        &mut data.timeline,
        &mut data.budget_range,
        &mut data.decision_timeframe,
        &mut data.additional_notes,
    ] {
        sanitize_in_place(text);
    }
    for list in [
        &mut data.primary_goals,
        &mut data.current_systems,
        &mut data.integration_requirements,
        &mut data.security_requirements,
        &mut data.preferred_time_slots,
    ] {
        sanitize_list(list);
    }
    if let Some(format) = data.consultation_format.as_mut() {
        sanitize_in_place(format);
    }

    match data.service_config.as_mut() {
        Some(ServiceConfig::AiAssistant(config)) => {
            sanitize_in_place(&mut config.primary_use_case);
            sanitize_in_place(&mut config.monthly_conversations);
            sanitize_list(&mut config.channels);
            sanitize_list(&mut config.languages);
            sanitize_list(&mut config.knowledge_sources);
        }
        Some(ServiceConfig::Integration(config)) => {
            sanitize_in_place(&mut config.data_volume);
            for pair in &mut config.integrations {
                sanitize_in_place(&mut pair.source_system);
                sanitize_in_place(&mut pair.target_system);
                sanitize_in_place(&mut pair.direction);
                sanitize_in_place(&mut pair.sync_frequency);
            }
        }
        Some(ServiceConfig::Application(config)) => {
            sanitize_in_place(&mut config.application_type);
            sanitize_in_place(&mut config.expected_users);
            sanitize_list(&mut config.platforms);
            sanitize_list(&mut config.ai_capabilities);
        }
        None => {}
    }
}
