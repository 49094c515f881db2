use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read identity config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse identity config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Registered-player configuration, keyed by Discord handle.
///
/// The file shape mirrors the signups file the Discord bot maintains:
///
/// ```json
/// { "acorbs": { "wingspan name": ["Acorbs1", "AcorbsAlt"] } }
/// ```
///
/// Loaded once at process start and treated as immutable for the process
/// lifetime; gameplay never creates or destroys identity mappings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfig(pub(crate) BTreeMap<String, RegisteredPlayer>);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisteredPlayer {
    #[serde(rename = "wingspan name", default)]
    pub wingspan_names: Vec<String>,
}

impl IdentityConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Number of registered Discord handles
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_signups_file_shape() {
        let raw = r#"{
            "acorbs": { "wingspan name": ["Acorbs1", "AcorbsAlt"] },
            "wren": { "wingspan name": ["Wren"] }
        }"#;

        let config: IdentityConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(
            config.0.get("acorbs").unwrap().wingspan_names,
            vec!["Acorbs1", "AcorbsAlt"]
        );
    }

    #[test]
    fn test_missing_name_list_defaults_to_empty() {
        let raw = r#"{ "acorbs": {} }"#;

        let config: IdentityConfig = serde_json::from_str(raw).unwrap();
        assert!(config.0.get("acorbs").unwrap().wingspan_names.is_empty());
    }

    #[test]
    fn test_empty_file_is_empty_config() {
        let config: IdentityConfig = serde_json::from_str("{}").unwrap();
        assert!(config.is_empty());
    }
}
