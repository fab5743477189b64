//! Core domain for the aquaship serviceability engine: postal types, the
//! static pincode directory, region derivation tables, the delivery-charge
//! calculator, and application configuration.

use thiserror::Error;

pub mod app_config;
pub mod charge;
pub mod config;
pub mod directory;
pub mod region;
pub mod types;

pub use app_config::{AppConfig, SourceConfig, SourceKind};
pub use directory::Directory;
pub use types::{validate_pincode, Confidence, PostalRecord, Provenance, Region, ResolvedAddress};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read directory file {path}: {source}")]
    DirectoryIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse directory file: {0}")]
    DirectoryParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
