//! Static option sets offered by the wizard steps and enforced by validation.

/// A selectable value with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionItem {
    pub value: &'static str,
    pub label: &'static str,
}

const fn item(value: &'static str, label: &'static str) -> OptionItem {
    OptionItem { value, label }
}

/// Returns true when `value` is one of the option values.
pub fn contains(options: &[OptionItem], value: &str) -> bool {
    options.iter().any(|option| option.value == value)
}

pub const INDUSTRIES: &[OptionItem] = &[
    item("technology", "Technology & Software"),
    item("healthcare", "Healthcare"),
    item("finance", "Finance & Insurance"),
    item("retail", "Retail & E-commerce"),
    item("manufacturing", "Manufacturing"),
    item("education", "Education"),
    item("logistics", "Logistics & Transport"),
    item("professional-services", "Professional Services"),
    item("hospitality", "Hospitality"),
    item("other", "Other"),
];

pub const COMPANY_SIZES: &[OptionItem] = &[
    item("1-10", "1-10 employees"),
    item("11-50", "11-50 employees"),
    item("51-200", "51-200 employees"),
    item("201-1000", "201-1000 employees"),
    item("1000+", "More than 1000 employees"),
];

pub const PRIMARY_GOALS: &[OptionItem] = &[
    item("automate-processes", "Automate manual processes"),
    item("reduce-costs", "Reduce operational costs"),
    item("improve-customer-experience", "Improve customer experience"),
    item("data-insights", "Get better insights from data"),
    item("scale-operations", "Scale operations"),
    item("modernize-systems", "Modernize legacy systems"),
];

pub const HOSTING_PREFERENCES: &[OptionItem] = &[
    item("cloud", "Cloud"),
    item("on-premise", "On-premise"),
    item("hybrid", "Hybrid"),
    item("no-preference", "No preference"),
];

pub const SECURITY_REQUIREMENTS: &[OptionItem] = &[
    item("gdpr", "GDPR compliance"),
    item("iso-27001", "ISO 27001"),
    item("soc2", "SOC 2"),
    item("hipaa", "HIPAA"),
    item("data-residency-eu", "EU data residency"),
];

pub const TIMELINES: &[OptionItem] = &[
    item("asap", "As soon as possible"),
    item("1-3-months", "Within 1-3 months"),
    item("3-6-months", "Within 3-6 months"),
    item("6-12-months", "Within 6-12 months"),
    item("flexible", "Flexible"),
];

pub const BUDGET_RANGES: &[OptionItem] = &[
    item("under-10k", "Under €10,000"),
    item("10k-25k", "€10,000 - €25,000"),
    item("25k-50k", "€25,000 - €50,000"),
    item("50k-100k", "€50,000 - €100,000"),
    item("100k-plus", "More than €100,000"),
    item("not-sure", "Not sure yet"),
];

pub const DECISION_TIMEFRAMES: &[OptionItem] = &[
    item("this-month", "This month"),
    item("this-quarter", "This quarter"),
    item("this-year", "This year"),
    item("exploring", "Just exploring"),
];

pub const CONSULTATION_FORMATS: &[OptionItem] = &[
    item("video-call", "Video call"),
    item("phone-call", "Phone call"),
    item("on-site", "On-site meeting"),
];

pub const TIME_SLOTS: &[OptionItem] = &[
    item("weekday-morning", "Weekday morning (9:00-12:00)"),
    item("weekday-afternoon", "Weekday afternoon (12:00-17:00)"),
    item("weekday-evening", "Weekday evening (17:00-20:00)"),
    item("weekend", "Weekend"),
];

pub const ASSISTANT_USE_CASES: &[OptionItem] = &[
    item("customer-support", "Customer support"),
    item("sales", "Sales & lead qualification"),
    item("internal-helpdesk", "Internal helpdesk"),
    item("appointment-booking", "Appointment booking"),
];

pub const ASSISTANT_CHANNELS: &[OptionItem] = &[
    item("website-chat", "Website chat"),
    item("whatsapp", "WhatsApp"),
    item("email", "Email"),
    item("phone", "Phone"),
    item("teams", "Microsoft Teams"),
    item("slack", "Slack"),
];

pub const ASSISTANT_LANGUAGES: &[OptionItem] = &[
    item("english", "English"),
    item("dutch", "Dutch"),
    item("german", "German"),
    item("french", "French"),
    item("spanish", "Spanish"),
];

pub const CONVERSATION_VOLUMES: &[OptionItem] = &[
    item("under-1k", "Fewer than 1,000 per month"),
    item("1k-10k", "1,000 - 10,000 per month"),
    item("10k-50k", "10,000 - 50,000 per month"),
    item("50k-plus", "More than 50,000 per month"),
];

pub const KNOWLEDGE_SOURCES: &[OptionItem] = &[
    item("website", "Website content"),
    item("documents", "Documents & manuals"),
    item("crm", "CRM"),
    item("helpdesk", "Helpdesk tickets"),
    item("database", "Internal database"),
];

pub const INTEGRATION_DIRECTIONS: &[OptionItem] = &[
    item("one-way", "One-way"),
    item("two-way", "Two-way"),
];

pub const SYNC_FREQUENCIES: &[OptionItem] = &[
    item("real-time", "Real-time"),
    item("hourly", "Hourly"),
    item("daily", "Daily"),
    item("weekly", "Weekly"),
];

pub const DATA_VOLUMES: &[OptionItem] = &[
    item("low", "Low (< 1,000 records/day)"),
    item("medium", "Medium (1,000 - 100,000 records/day)"),
    item("high", "High (> 100,000 records/day)"),
];

pub const APPLICATION_TYPES: &[OptionItem] = &[
    item("web-app", "Web application"),
    item("mobile-app", "Mobile application"),
    item("internal-tool", "Internal tool"),
    item("customer-portal", "Customer portal"),
    item("data-platform", "Data platform"),
];

pub const PLATFORMS: &[OptionItem] = &[
    item("web", "Web"),
    item("ios", "iOS"),
    item("android", "Android"),
    item("desktop", "Desktop"),
];

pub const USER_SCALES: &[OptionItem] = &[
    item("under-100", "Fewer than 100 users"),
    item("100-1k", "100 - 1,000 users"),
    item("1k-10k", "1,000 - 10,000 users"),
    item("10k-plus", "More than 10,000 users"),
];

pub const AI_CAPABILITIES: &[OptionItem] = &[
    item("document-processing", "Document processing"),
    item("predictive-analytics", "Predictive analytics"),
    item("natural-language", "Natural language understanding"),
    item("computer-vision", "Computer vision"),
    item("recommendations", "Recommendations"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_values_are_unique_per_set() {
        let sets: &[&[OptionItem]] = &[
            INDUSTRIES,
            COMPANY_SIZES,
            PRIMARY_GOALS,
            BUDGET_RANGES,
            TIME_SLOTS,
            ASSISTANT_CHANNELS,
            SYNC_FREQUENCIES,
            AI_CAPABILITIES,
        ];
        for set in sets {
            let mut values: Vec<_> = set.iter().map(|option| option.value).collect();
            values.sort_unstable();
            values.dedup();
            assert_eq!(values.len(), set.len());
        }
    }

    #[test]
    fn membership_lookup() {
        assert!(contains(CONSULTATION_FORMATS, "on-site"));
        assert!(!contains(CONSULTATION_FORMATS, "carrier-pigeon"));
        assert!(contains(BUDGET_RANGES, "not-sure"));
    }
}
