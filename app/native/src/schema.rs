//! JSON Schema for the configuration file.

use crate::config::WintileConfig;

/// Generates a JSON Schema for the wintile configuration.
#[must_use]
pub fn generate_schema() -> schemars::Schema { schemars::schema_for!(WintileConfig) }

/// Generates the schema as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn generate_schema_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&generate_schema())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_schema_produces_valid_json() {
        let schema_json = generate_schema_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&schema_json).unwrap();

        assert_eq!(parsed["$schema"], "https://json-schema.org/draft/2020-12/schema");
        assert_eq!(parsed["title"], "WintileConfig");
        assert!(parsed["properties"]["port"].is_object());
        assert!(parsed["properties"]["portFile"].is_object());
        assert!(parsed["properties"]["clientTimeoutMs"].is_object());
    }

    #[test]
    fn test_schema_documents_fields() {
        let schema_json = generate_schema_json().unwrap();
        assert!(schema_json.contains("--use-hardcoded-port"));
    }
}
