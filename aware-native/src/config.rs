//! Adapter configuration
//!
//! Controls which HAL revision the adapter starts out negotiated at, whether
//! every callback is traced, and how deep the event pump queue is.

use aware_hal::HalRevision;
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable holding the negotiated revision (`1.0`, `1.2`, `1.5`, `1.6`)
pub const ENV_HAL_REVISION: &str = "AWARE_HAL_REVISION";
/// Environment variable enabling verbose callback tracing
pub const ENV_VERBOSE: &str = "AWARE_VERBOSE";
/// Environment variable holding the event pump queue capacity
pub const ENV_EVENT_QUEUE_CAPACITY: &str = "AWARE_EVENT_QUEUE_CAPACITY";

/// Configuration for [`crate::AwareEventAdapter`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Revision the HAL is known to support at construction
    /// Default: 1.0
    pub revision: HalRevision,

    /// Log the full arguments of every callback at debug level
    /// Default: false
    pub verbose_logging: bool,

    /// Capacity of the queue between the HAL binding and the event pump
    /// Default: 256
    pub event_queue_capacity: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            revision: HalRevision::V1_0,
            verbose_logging: false,
            event_queue_capacity: 256,
        }
    }
}

impl AdapterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for the newest HAL this adapter understands
    pub fn latest() -> Self {
        Self {
            revision: HalRevision::V1_6,
            ..Default::default()
        }
    }

    pub fn with_revision(mut self, revision: HalRevision) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_verbose_logging(mut self, enabled: bool) -> Self {
        self.verbose_logging = enabled;
        self
    }

    pub fn with_event_queue_capacity(mut self, capacity: usize) -> Self {
        self.event_queue_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "Event queue capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Build from the process environment, starting from defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_HAL_REVISION) {
            config.revision = value.parse()?;
        }

        if let Some(value) = lookup(ENV_VERBOSE) {
            config.verbose_logging = parse_flag(&value).ok_or(ConfigError::InvalidValue {
                key: ENV_VERBOSE,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_EVENT_QUEUE_CAPACITY) {
            config.event_queue_capacity =
                value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_EVENT_QUEUE_CAPACITY,
                    value: value.clone(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AdapterConfig::default();
        assert_eq!(config.revision, HalRevision::V1_0);
        assert!(!config.verbose_logging);
        assert_eq!(config.event_queue_capacity, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AdapterConfig::new()
            .with_revision(HalRevision::V1_5)
            .with_verbose_logging(true)
            .with_event_queue_capacity(8);

        assert_eq!(config.revision, HalRevision::V1_5);
        assert!(config.verbose_logging);
        assert_eq!(config.event_queue_capacity, 8);
        assert_eq!(AdapterConfig::latest().revision, HalRevision::V1_6);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = AdapterConfig::new().with_event_queue_capacity(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_lookup() {
        let config = AdapterConfig::from_lookup(lookup_from(&[
            (ENV_HAL_REVISION, "1.2"),
            (ENV_VERBOSE, "true"),
            (ENV_EVENT_QUEUE_CAPACITY, "32"),
        ]))
        .unwrap();

        assert_eq!(config.revision, HalRevision::V1_2);
        assert!(config.verbose_logging);
        assert_eq!(config.event_queue_capacity, 32);
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let config = AdapterConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AdapterConfig::default());
    }

    #[test]
    fn test_from_lookup_invalid_values() {
        let err = AdapterConfig::from_lookup(lookup_from(&[(ENV_HAL_REVISION, "2.0")]));
        assert!(matches!(err, Err(ConfigError::InvalidRevision(_))));

        let err = AdapterConfig::from_lookup(lookup_from(&[(ENV_VERBOSE, "maybe")]));
        assert!(matches!(
            err,
            Err(ConfigError::InvalidValue { key: ENV_VERBOSE, .. })
        ));

        let err = AdapterConfig::from_lookup(lookup_from(&[(ENV_EVENT_QUEUE_CAPACITY, "0")]));
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AdapterConfig =
            serde_json::from_str(r#"{"revision": "1.6", "verbose_logging": true}"#).unwrap();
        assert_eq!(config.revision, HalRevision::V1_6);
        assert!(config.verbose_logging);
        assert_eq!(config.event_queue_capacity, 256);
    }
}
