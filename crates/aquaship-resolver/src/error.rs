use thiserror::Error;

/// Why a single source attempt produced no record.
///
/// Every variant is contained at the resolver boundary: callers only ever
/// observe a hit or a miss, but the reason is logged so disabled-vs-limited
/// -vs-broken stays inspectable.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source disabled")]
    Disabled,

    #[error("source disabled: missing credential")]
    MissingCredential,

    #[error("rate limit of {limit}/min exhausted")]
    RateLimited { limit: u32 },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no usable record for pincode {pincode}")]
    NoData { pincode: String },
}
