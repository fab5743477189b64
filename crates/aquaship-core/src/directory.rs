//! Static pincode directory: an immutable local table loaded once at start.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{validate_pincode, PostalRecord};
use crate::ConfigError;

/// Maximum number of results returned by [`Directory::search`].
const SEARCH_LIMIT: usize = 10;

/// On-disk shape of the directory YAML file.
#[derive(Debug, Deserialize)]
pub struct DirectoryFile {
    pub pincodes: Vec<PostalRecord>,
    /// Curated quick-pick subset for the checkout UI, by pincode.
    #[serde(default)]
    pub popular: Vec<String>,
    /// Codes the remote resolver must report as unserviceable. Empty today;
    /// kept so exclusions are data, not code.
    #[serde(default)]
    pub denylist: Vec<String>,
}

/// Read-only pincode table with exact lookup and substring search.
#[derive(Debug)]
pub struct Directory {
    records: Vec<PostalRecord>,
    by_code: HashMap<String, usize>,
    popular: Vec<String>,
    denylist: Vec<String>,
    loaded_at: DateTime<Utc>,
}

impl Directory {
    /// Loads and validates the directory from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails
    /// validation (malformed or duplicate codes, negative costs, popular or
    /// denylist entries naming unknown/invalid codes).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DirectoryIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: DirectoryFile =
            serde_yaml::from_str(&content).map_err(ConfigError::DirectoryParse)?;
        Self::from_file(file)
    }

    /// Builds a directory from an already-parsed file, validating it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when the table is inconsistent.
    pub fn from_file(file: DirectoryFile) -> Result<Self, ConfigError> {
        validate_file(&file)?;
        let by_code = file
            .pincodes
            .iter()
            .enumerate()
            .map(|(i, r)| (r.code.clone(), i))
            .collect();
        Ok(Self {
            records: file.pincodes,
            by_code,
            popular: file.popular,
            denylist: file.denylist,
            loaded_at: Utc::now(),
        })
    }

    /// Exact-match lookup. `None` when the code is malformed or absent.
    #[must_use]
    pub fn lookup(&self, code: &str) -> Option<&PostalRecord> {
        if !validate_pincode(code) {
            return None;
        }
        self.by_code.get(code).map(|&i| &self.records[i])
    }

    /// Case-insensitive substring search over city, state, and district.
    ///
    /// Returns at most ten records in table-insertion order; no relevance
    /// ranking. An empty query matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&PostalRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| {
                r.city.to_lowercase().contains(&needle)
                    || r.state.to_lowercase().contains(&needle)
                    || r.district.to_lowercase().contains(&needle)
            })
            .take(SEARCH_LIMIT)
            .collect()
    }

    /// The curated quick-pick subset, in configured order.
    #[must_use]
    pub fn popular_cities(&self) -> Vec<&PostalRecord> {
        self.popular
            .iter()
            .filter_map(|code| self.lookup(code))
            .collect()
    }

    /// Codes the resolver must derive as unserviceable.
    #[must_use]
    pub fn denylist(&self) -> &[String] {
        &self.denylist
    }

    /// When this table was loaded; stands in for a record timestamp on
    /// local-only resolutions.
    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate_file(file: &DirectoryFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for record in &file.pincodes {
        if !validate_pincode(&record.code) {
            return Err(ConfigError::Validation(format!(
                "malformed pincode: '{}'",
                record.code
            )));
        }
        if !seen.insert(record.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate pincode: '{}'",
                record.code
            )));
        }
        if record.shipping_cost < 0.0 {
            return Err(ConfigError::Validation(format!(
                "pincode '{}' has negative shipping cost {}",
                record.code, record.shipping_cost
            )));
        }
        if !record.serviceable && record.shipping_cost != 0.0 {
            return Err(ConfigError::Validation(format!(
                "unserviceable pincode '{}' must carry zero shipping cost",
                record.code
            )));
        }
    }
    for code in &file.popular {
        if !seen.contains(code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "popular entry '{code}' not present in pincode table"
            )));
        }
    }
    for code in &file.denylist {
        if !validate_pincode(code) {
            return Err(ConfigError::Validation(format!(
                "malformed denylist pincode: '{code}'"
            )));
        }
    }
    Ok(())
}
