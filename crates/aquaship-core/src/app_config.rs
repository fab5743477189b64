//! Application configuration types.
//!
//! One source of truth for external-source settings: the resolver and any
//! admin surface both read [`SourceConfig`] from here rather than carrying
//! their own copies.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The external postal-code APIs the resolver knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Government open-data endpoint: records array keyed by a resource id,
    /// bearer key passed as a query parameter.
    OpenData,
    /// Generic postal-code lookup endpoint: array of post-office objects.
    PostalLookup,
}

impl SourceKind {
    /// Whether this source cannot operate without a credential.
    #[must_use]
    pub fn requires_credential(self) -> bool {
        matches!(self, SourceKind::OpenData)
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::OpenData => write!(f, "open-data"),
            SourceKind::PostalLookup => write!(f, "postal-lookup"),
        }
    }
}

/// Per-source settings. Adjustable from outside the core; read-only during
/// a lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub base_url: String,
    /// Credential for sources that need one. Deliberately has no baked-in
    /// default: absence puts the source in a missing-credential state.
    pub api_key: Option<String>,
    /// Dataset identifier for the open-data source.
    pub resource_id: Option<String>,
    pub enabled: bool,
    /// Lower number = tried first.
    pub priority: u8,
    pub rate_limit_per_minute: u32,
    pub timeout_ms: u64,
}

/// Top-level application configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory_path: PathBuf,
    pub log_level: String,
    pub cache_ttl_secs: u64,
    pub sources: Vec<SourceConfig>,
}
