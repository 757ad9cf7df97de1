//! Detector run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DetectorError;

fn default_n_plus_one_query_name() -> String {
    "[NPLUSONEQUERY]".to_string()
}

/// Thresholds for the N+1 query detector.
///
/// Both thresholds must be crossed strictly before a cluster is
/// reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NPlusOneQueryConfig {
    /// Display label prefixed to reported issues.
    #[serde(default = "default_n_plus_one_query_name")]
    pub name: String,
    /// Combined duration the folded query spans must exceed.
    pub duration_involved_spans_thrsh: u64,
    /// Number of folded query spans that must be exceeded.
    pub count_involved_spans_thrsh: u64,
}

impl NPlusOneQueryConfig {
    /// Configuration with the default label and the given thresholds.
    pub fn new(duration_involved_spans_thrsh: u64, count_involved_spans_thrsh: u64) -> Self {
        Self {
            name: default_n_plus_one_query_name(),
            duration_involved_spans_thrsh,
            count_involved_spans_thrsh,
        }
    }

    /// Load the configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DetectorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, DetectorError> {
        Ok(toml::from_str(content)?)
    }
}

/// Which detectors a run assembles.
///
/// The simple detectors default to enabled; the N+1 query detector runs
/// only when its thresholds are provided.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub n_plus_one_query: Option<NPlusOneQueryConfig>,
    pub http_errors: bool,
    pub warnings: bool,
    pub exceptions: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            n_plus_one_query: None,
            http_errors: true,
            warnings: true,
            exceptions: true,
        }
    }
}
