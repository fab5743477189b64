//! Normalized output of a single external API call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aquaship_core::types::PostalRecord;
use aquaship_core::SourceKind;

/// One external source's answer for a pincode, normalized to the common
/// record shape plus provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    #[serde(flatten)]
    pub record: PostalRecord,
    /// Which API answered.
    pub source: SourceKind,
    pub fetched_at: DateTime<Utc>,
}
