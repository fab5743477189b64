//! Remote resolver: tries the configured external sources in priority
//! order, behind a shared cache and per-source rate limits.
//!
//! `fetch` never propagates an error past this boundary. Each source
//! attempt is a `Result<RemoteRecord, SourceError>` so the failure reason
//! (disabled, missing credential, rate-limited, timeout, bad shape) is
//! logged before resolution falls through to the next source.

use std::time::Duration;

use reqwest::{Client, Url};

use aquaship_core::types::validate_pincode;
use aquaship_core::{SourceConfig, SourceKind};

use crate::cache::ResolverCache;
use crate::error::SourceError;
use crate::normalize;
use crate::rate_limit::RateLimiter;
use crate::record::RemoteRecord;

/// Queries external postal-code APIs and normalizes their answers.
pub struct RemoteResolver {
    client: Client,
    /// Sorted ascending by priority at construction; iteration order is the
    /// try order.
    sources: Vec<SourceConfig>,
    cache: ResolverCache,
    limiter: RateLimiter,
    denylist: Vec<String>,
}

impl RemoteResolver {
    /// Creates a resolver over `sources` with an injected cache and rate
    /// limiter.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        mut sources: Vec<SourceConfig>,
        cache: ResolverCache,
        limiter: RateLimiter,
        denylist: Vec<String>,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("aquaship/0.1 (serviceability)")
            .build()?;
        sources.sort_by_key(|s| s.priority);
        Ok(Self {
            client,
            sources,
            cache,
            limiter,
            denylist,
        })
    }

    /// Resolves `code` against the external sources.
    ///
    /// Checks the cache first; on a miss, tries each source in ascending
    /// priority order and caches the first hit. Returns `None` when the
    /// code is malformed or every source misses.
    pub async fn fetch(&self, code: &str) -> Option<RemoteRecord> {
        if !validate_pincode(code) {
            return None;
        }
        if let Some(hit) = self.cache.get(code) {
            tracing::debug!(pincode = %code, source = %hit.source, "cache hit");
            return Some(hit);
        }
        for source in &self.sources {
            match self.try_source(source, code).await {
                Ok(record) => {
                    self.cache.insert(code, record.clone());
                    tracing::debug!(pincode = %code, source = %source.kind, "remote hit");
                    return Some(record);
                }
                Err(e) => {
                    tracing::warn!(
                        pincode = %code,
                        source = %source.kind,
                        error = %e,
                        "source miss, falling through"
                    );
                }
            }
        }
        None
    }

    /// Drops all cached records and rate-limit counters.
    pub fn reset(&self) {
        self.cache.clear();
        self.limiter.clear();
    }

    #[must_use]
    pub fn cache(&self) -> &ResolverCache {
        &self.cache
    }

    async fn try_source(
        &self,
        source: &SourceConfig,
        code: &str,
    ) -> Result<RemoteRecord, SourceError> {
        if !source.enabled {
            return Err(SourceError::Disabled);
        }
        if source.kind.requires_credential()
            && (source.api_key.is_none() || source.resource_id.is_none())
        {
            return Err(SourceError::MissingCredential);
        }
        if !self
            .limiter
            .try_acquire(&source.kind.to_string(), source.rate_limit_per_minute)
        {
            return Err(SourceError::RateLimited {
                limit: source.rate_limit_per_minute,
            });
        }

        let url = build_url(source, code)?;
        let response = self
            .client
            .get(url.clone())
            .timeout(Duration::from_millis(source.timeout_ms))
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let place = match source.kind {
            SourceKind::OpenData => normalize::open_data_place(&payload, code),
            SourceKind::PostalLookup => normalize::postal_lookup_place(&payload),
        }
        .ok_or_else(|| SourceError::NoData {
            pincode: code.to_string(),
        })?;

        Ok(normalize::derive_record(
            code,
            place,
            source.kind,
            &self.denylist,
        ))
    }
}

/// Builds the per-source request URL with percent-encoded query parameters.
fn build_url(source: &SourceConfig, code: &str) -> Result<Url, SourceError> {
    let invalid = |reason: String| SourceError::InvalidBaseUrl {
        url: source.base_url.clone(),
        reason,
    };
    // Ensure exactly one trailing slash so join appends instead of replacing
    // the last path segment.
    let normalised = format!("{}/", source.base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    match source.kind {
        SourceKind::OpenData => {
            let resource_id = source
                .resource_id
                .as_deref()
                .ok_or_else(|| invalid("missing resource id".to_string()))?;
            let api_key = source
                .api_key
                .as_deref()
                .ok_or_else(|| invalid("missing api key".to_string()))?;
            let mut url = base
                .join(&format!("resource/{resource_id}"))
                .map_err(|e| invalid(e.to_string()))?;
            url.query_pairs_mut()
                .append_pair("api-key", api_key)
                .append_pair("format", "json")
                .append_pair("filters[pincode]", code);
            Ok(url)
        }
        SourceKind::PostalLookup => base
            .join(&format!("pincode/{code}"))
            .map_err(|e| invalid(e.to_string())),
    }
}
