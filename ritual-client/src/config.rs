//! Backend connection settings.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Connection block of the config file, `[backend]` in the TOML.
///
/// The database and collection ids are provisioned on the hosted backend;
/// the client treats them as opaque path segments.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the REST surface, e.g. `https://backend.example.com/v1`.
    pub endpoint: String,
    /// WebSocket URL of the realtime surface, e.g. `wss://backend.example.com/v1/realtime`.
    pub ws_endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub habits_collection_id: String,
    pub completions_collection_id: String,
    /// Where the session token is persisted between runs.
    pub session_path: PathBuf,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl BackendConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "endpoint",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if !self.ws_endpoint.starts_with("ws://") && !self.ws_endpoint.starts_with("wss://") {
            return Err(ConfigError::InvalidValue {
                field: "ws_endpoint",
                reason: "must start with ws:// or wss://".to_string(),
            });
        }
        for (field, value) in [
            ("project_id", &self.project_id),
            ("database_id", &self.database_id),
            ("habits_collection_id", &self.habits_collection_id),
            ("completions_collection_id", &self.completions_collection_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> BackendConfig {
        BackendConfig {
            endpoint: "https://backend.example.com/v1".to_string(),
            ws_endpoint: "wss://backend.example.com/v1/realtime".to_string(),
            project_id: "ritual".to_string(),
            database_id: "db".to_string(),
            habits_collection_id: "habits".to_string(),
            completions_collection_id: "completions".to_string(),
            session_path: PathBuf::from("/tmp/ritual/session.json"),
            request_timeout_ms: 10_000,
        }
    }

    #[test]
    fn accepts_well_formed_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let mut config = base_config();
        config.endpoint = "ftp://backend.example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "endpoint", .. })
        ));
    }

    #[test]
    fn rejects_non_ws_realtime_endpoint() {
        let mut config = base_config();
        config.ws_endpoint = "https://backend.example.com/v1/realtime".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "ws_endpoint", .. })
        ));
    }

    #[test]
    fn rejects_blank_collection_id() {
        let mut config = base_config();
        config.habits_collection_id = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "habits_collection_id", .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = base_config();
        config.request_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn timeout_defaults_when_omitted() {
        let toml = r#"
            endpoint = "https://backend.example.com/v1"
            ws_endpoint = "wss://backend.example.com/v1/realtime"
            project_id = "ritual"
            database_id = "db"
            habits_collection_id = "habits"
            completions_collection_id = "completions"
            session_path = "/tmp/ritual/session.json"
        "#;
        let config: BackendConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let toml = r#"
            endpoint = "https://backend.example.com/v1"
            ws_endpoint = "wss://backend.example.com/v1/realtime"
            project_id = "ritual"
            database_id = "db"
            habits_collection_id = "habits"
            completions_collection_id = "completions"
            session_path = "/tmp/ritual/session.json"
            api_key = "nope"
        "#;
        assert!(toml::from_str::<BackendConfig>(toml).is_err());
    }
}
