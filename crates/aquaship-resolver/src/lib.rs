//! Remote pincode resolution and the serviceability merge engine.
//!
//! [`RemoteResolver`] queries external postal APIs in priority order behind
//! a TTL cache and per-source rate limits. [`PincodeService`] merges its
//! answers with the static directory into a [`aquaship_core::ResolvedAddress`].

pub mod cache;
pub mod error;
mod normalize;
pub mod rate_limit;
pub mod record;
pub mod resolver;
pub mod service;

pub use cache::{ResolverCache, DEFAULT_TTL};
pub use error::SourceError;
pub use rate_limit::RateLimiter;
pub use record::RemoteRecord;
pub use resolver::RemoteResolver;
pub use service::PincodeService;
