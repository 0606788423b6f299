use crate::output::OutputWriter;
use anyhow::Result;
use reviewer_core::config::{ConfigSource, LayeredConfig, API_KEY_ENV};
use std::collections::BTreeMap;

pub fn execute(settings: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let values: BTreeMap<String, (String, ConfigSource)> =
        settings.to_inspection_map().into_iter().collect();
    let api_key_set = std::env::var(API_KEY_ENV).is_ok_and(|key| !key.trim().is_empty());

    if output.is_json() {
        let mut data = serde_json::Map::new();
        for (key, (value, source)) in &values {
            data.insert(key.clone(), serde_json::json!({ "value": value, "source": source }));
        }
        data.insert("api_key_set".to_string(), serde_json::Value::Bool(api_key_set));
        return output.result(data);
    }

    output.section("Configuration");
    for (key, (value, source)) in &values {
        output.kv(key, format!("{} ({:?})", value, source));
    }
    output.kv(API_KEY_ENV, if api_key_set { "set" } else { "not set" });

    Ok(())
}
