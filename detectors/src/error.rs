//! Error types for detector configuration.

use thiserror::Error;

/// Errors surfaced while loading detector configuration.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// The configuration file could not be read.
    #[error("failed to read detector config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid TOML or misses required fields.
    #[error("failed to parse detector config: {0}")]
    Toml(#[from] toml::de::Error),
}
