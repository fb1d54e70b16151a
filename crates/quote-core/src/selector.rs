//! Step data selector: projects the slice of [`FormData`] a step validates.
//!
//! The projected keys are read from the step's schema, so the selector and the
//! validation engine cannot drift apart.

use quote_domain::{FormData, ServiceContext};
use serde_json::{Map, Value};
use tracing::warn;

use crate::validation::step_schema;

const SERVICE_CONFIG_KEY: &str = "serviceConfig";

/// Returns the fields relevant to `step` under `context`. Unknown steps yield
/// an empty object.
pub fn get_step_data(
    form_data: &FormData,
    step: u8,
    context: Option<ServiceContext>,
) -> Map<String, Value> {
    let Some(schema) = step_schema(step, context) else {
        return Map::new();
    };
    let mut source = match serde_json::to_value(form_data) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(err) => {
            warn!(error = %err, "failed to serialize form data for step projection");
            Map::new()
        }
    };
    let service_config = service_config_entry(form_data, &mut source);

    schema
        .keys()
        .map(|key| {
            let value = match &service_config {
                Some((config_key, payload)) if *config_key == key => payload.clone(),
                _ => source.remove(key).unwrap_or(Value::Null),
            };
            (key.to_string(), value)
        })
        .collect()
}

/// The active service configuration as `(step key, payload)`.
fn service_config_entry(
    form_data: &FormData,
    source: &mut Map<String, Value>,
) -> Option<(&'static str, Value)> {
    let tagged = source.remove(SERVICE_CONFIG_KEY)?;
    let kind = form_data.service_config.as_ref()?.kind();
    let payload = match tagged {
        Value::Object(mut map) => map.remove("payload").unwrap_or(Value::Null),
        _ => Value::Null,
    };
    Some((kind.step_key(), payload))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quote_domain::{ConfigKind, FieldValue, FlowKind, ServiceConfig};

    use super::*;
    use crate::validation::step_schema;

    #[test]
    fn projection_matches_schema_keys_for_every_step() {
        let mut contexts: Vec<Option<ServiceContext>> =
            ServiceContext::ALL.iter().copied().map(Some).collect();
        contexts.push(None);

        let data = FormData::default();
        for context in contexts {
            for step in 1..=FlowKind::for_context(context).total_steps() {
                let projected: BTreeSet<_> =
                    get_step_data(&data, step, context).keys().cloned().collect();
                let expected: BTreeSet<_> = step_schema(step, context)
                    .expect("schema")
                    .keys()
                    .map(str::to_string)
                    .collect();
                assert_eq!(projected, expected, "{context:?} step {step}");
            }
        }
    }

    #[test]
    fn extended_step_three_projects_only_the_active_config() {
        let mut data = FormData::default();
        data.apply(FieldValue::ServiceConfig(Some(ServiceConfig::initial(
            ConfigKind::Integration,
        ))));

        let projected = get_step_data(&data, 3, Some(ServiceContext::SystemIntegration));
        assert_eq!(projected.len(), 1);
        let integrations = &projected["integrationConfig"]["integrations"];
        assert_eq!(integrations.as_array().map(Vec::len), Some(1));

        let mismatched = get_step_data(&data, 3, Some(ServiceContext::SmartAssistant));
        assert_eq!(mismatched.get("aiAssistantConfig"), Some(&Value::Null));
    }

    #[test]
    fn standard_step_three_is_technical() {
        let mut data = FormData::default();
        data.apply(FieldValue::HostingPreference("cloud".into()));
        let projected = get_step_data(&data, 3, Some(ServiceContext::Solutions));
        assert_eq!(projected["hostingPreference"], "cloud");
        assert!(get_step_data(&data, 0, None).is_empty());
    }
}
