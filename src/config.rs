//! Analysis configuration: defaults, YAML loading, and validation.

use std::fs::File;
use std::path::Path;

use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::aggregate::{DEFAULT_BATCH_SIZE, DEFAULT_REPLICATE_SIZE};
use crate::analysis::clients::DEFAULT_CLIENT_SUBSET;
use crate::analysis::stats::DEFAULT_CONFIDENCE;

/// Tunable analysis parameters, with the defaults used when no config file
/// is given. Any subset of fields may appear in the YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Records per batch-means chunk
    pub batch_size: usize,
    /// Records per independent-replicate window
    pub replicate_size: usize,
    /// Confidence level for interval estimates, strictly between 0 and 1
    pub confidence: f64,
    /// Client IDs included in the per-client figures
    pub clients: Vec<u32>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            replicate_size: DEFAULT_REPLICATE_SIZE,
            confidence: DEFAULT_CONFIDENCE,
            clients: DEFAULT_CLIENT_SUBSET.to_vec(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("batch_size must be non-zero")]
    ZeroBatchSize,

    #[error("replicate_size must be non-zero")]
    ZeroReplicateSize,

    #[error("confidence must be strictly between 0 and 1, got {0}")]
    ConfidenceOutOfRange(f64),

    #[error("client subset must not be empty")]
    EmptyClientSubset,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.batch_size == 0 {
            return Err(ValidationError::ZeroBatchSize);
        }
        if self.replicate_size == 0 {
            return Err(ValidationError::ZeroReplicateSize);
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ValidationError::ConfidenceOutOfRange(self.confidence));
        }
        if self.clients.is_empty() {
            return Err(ValidationError::EmptyClientSubset);
        }
        Ok(())
    }
}

/// Load and parse analysis configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<AnalysisConfig> {
    info!("Loading analysis configuration from: {:?}", config_path);

    // Open the configuration file
    let file = File::open(config_path)?;

    // Parse the YAML content
    let config: AnalysisConfig = serde_yaml::from_reader(file)?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.batch_size, 300);
        assert_eq!(config.replicate_size, 20);
        assert!((config.confidence - 0.95).abs() < 1e-9);
        assert_eq!(config.clients, vec![3, 4, 5]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validation_rejections() {
        let mut config = AnalysisConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::ZeroBatchSize));

        config.batch_size = 300;
        config.replicate_size = 0;
        assert_eq!(config.validate(), Err(ValidationError::ZeroReplicateSize));

        config.replicate_size = 20;
        config.confidence = 1.0;
        assert_eq!(
            config.validate(),
            Err(ValidationError::ConfidenceOutOfRange(1.0))
        );

        config.confidence = 0.95;
        config.clients.clear();
        assert_eq!(config.validate(), Err(ValidationError::EmptyClientSubset));
    }

    #[test]
    fn test_load_config_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        file.write_all(b"batch_size: 100\nclients: [1, 2]\n")
            .expect("write temp config");

        let config = load_config(file.path()).expect("load config");
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.clients, vec![1, 2]);
        // Unspecified fields keep their defaults
        assert_eq!(config.replicate_size, 20);
        assert!((config.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        file.write_all(b"confidence: 2.0\n").expect("write temp config");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_config_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        file.write_all(b"batch_len: 100\n").expect("write temp config");
        assert!(load_config(file.path()).is_err());
    }
}
