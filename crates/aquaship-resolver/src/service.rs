//! Merge engine: combines the static directory with the remote resolver
//! into a single serviceability answer per pincode.

use std::time::Duration;

use aquaship_core::types::{validate_pincode, Confidence, PostalRecord, Provenance, ResolvedAddress};
use aquaship_core::Directory;

use crate::record::RemoteRecord;
use crate::resolver::RemoteResolver;

/// Codes per batch in [`PincodeService::batch_resolve`].
const BATCH_SIZE: usize = 10;
/// Pause between batches, sized to stay under source rate limits.
const BATCH_PAUSE: Duration = Duration::from_secs(1);

/// Delivery-time string reported when resolution fails entirely.
pub const DELIVERY_TIME_UNKNOWN: &str = "Not available";

/// Resolves pincodes by merging the local directory with remote sources.
pub struct PincodeService {
    directory: Directory,
    resolver: RemoteResolver,
}

impl PincodeService {
    #[must_use]
    pub fn new(directory: Directory, resolver: RemoteResolver) -> Self {
        Self {
            directory,
            resolver,
        }
    }

    /// Resolves one pincode.
    ///
    /// The directory lookup and the remote fetch contribute independently:
    /// a remote miss never suppresses the local record and vice versa.
    /// Returns `None` only when the code is malformed or both sources miss
    /// — "cannot determine serviceability", not "not serviceable".
    pub async fn resolve(&self, code: &str) -> Option<ResolvedAddress> {
        if !validate_pincode(code) {
            return None;
        }
        let local = self.directory.lookup(code).cloned();
        let remote = self.resolver.fetch(code).await;
        match (local, remote) {
            (Some(local), Some(remote)) => {
                let fetched_at = remote.fetched_at;
                Some(ResolvedAddress {
                    record: merge(local, remote),
                    source: Provenance::Hybrid,
                    confidence: Confidence::High,
                    last_updated: fetched_at.max(self.directory.loaded_at()),
                })
            }
            (None, Some(remote)) => Some(ResolvedAddress {
                record: remote.record,
                source: Provenance::Api,
                confidence: Confidence::Medium,
                last_updated: remote.fetched_at,
            }),
            (Some(local), None) => Some(ResolvedAddress {
                record: local,
                source: Provenance::Local,
                confidence: Confidence::Low,
                last_updated: self.directory.loaded_at(),
            }),
            (None, None) => None,
        }
    }

    /// Whether the storefront delivers to `code`. `false` when resolution
    /// fails.
    pub async fn is_serviceable(&self, code: &str) -> bool {
        self.resolve(code)
            .await
            .is_some_and(|r| r.record.serviceable)
    }

    /// Resolved shipping cost for `code`, or `0` when resolution fails.
    pub async fn shipping_cost(&self, code: &str) -> f64 {
        self.resolve(code)
            .await
            .map_or(0.0, |r| r.record.shipping_cost)
    }

    /// Resolved delivery-time estimate for `code`, or
    /// [`DELIVERY_TIME_UNKNOWN`] when resolution fails.
    pub async fn delivery_time(&self, code: &str) -> String {
        self.resolve(code)
            .await
            .map_or_else(|| DELIVERY_TIME_UNKNOWN.to_string(), |r| r.record.delivery_time)
    }

    /// Resolves many codes in batches of ten, pausing one second between
    /// batches to stay clear of source rate limits. Codes that fail to
    /// resolve are dropped from the result, not surfaced as errors.
    pub async fn batch_resolve(&self, codes: &[String]) -> Vec<ResolvedAddress> {
        let mut resolved = Vec::new();
        for (i, chunk) in codes.chunks(BATCH_SIZE).enumerate() {
            if i > 0 {
                tokio::time::sleep(BATCH_PAUSE).await;
            }
            let batch = futures::future::join_all(chunk.iter().map(|code| self.resolve(code))).await;
            resolved.extend(batch.into_iter().flatten());
        }
        resolved
    }

    #[must_use]
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    #[must_use]
    pub fn resolver(&self) -> &RemoteResolver {
        &self.resolver
    }
}

/// Remote-wins field merge: every remote value that is present overwrites
/// the local one. "Present" follows the original truthy semantics: empty
/// strings, zero costs, and a remote `serviceable = false` leave the local
/// value in place.
fn merge(local: PostalRecord, remote: RemoteRecord) -> PostalRecord {
    let r = remote.record;
    let keep = |remote_value: String, local_value: String| {
        if remote_value.trim().is_empty() {
            local_value
        } else {
            remote_value
        }
    };
    PostalRecord {
        code: local.code,
        state: keep(r.state, local.state),
        city: keep(r.city, local.city),
        district: keep(r.district, local.district),
        region: r.region,
        delivery_time: keep(r.delivery_time, local.delivery_time),
        shipping_cost: if r.shipping_cost > 0.0 {
            r.shipping_cost
        } else {
            local.shipping_cost
        },
        serviceable: if r.serviceable { true } else { local.serviceable },
    }
}
