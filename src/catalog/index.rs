//! Indexed, immutable view of a motif table.
//!
//! Construction is all-or-nothing: any duplicate key or malformed run aborts
//! the load and no catalog is returned. After `load` the catalog never
//! changes, so it can be shared across threads by reference.

use crate::catalog::{Motif, MotifKey, RawRecord};
use crate::error::{MotifError, Result};
use crate::schema_loader::TableSchema;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Authored cap table shipped with the crate.
pub const BUNDLED_TABLE: &str = include_str!("../../data/caps.json");

#[derive(Debug, Clone, PartialEq, Eq)]
/// Motifs keyed by `(category, variant)`, iterated in key order.
pub struct Catalog {
    by_key: BTreeMap<MotifKey, Motif>,
}

impl Catalog {
    /// Build a catalog from authored records.
    ///
    /// Fails with [`MotifError::DuplicateKey`] when a key repeats and with
    /// [`MotifError::MalformedRun`] when any run is invalid.
    pub fn load<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut by_key = BTreeMap::new();
        for record in records {
            let key = record.key();
            if by_key.contains_key(&key) {
                return Err(MotifError::DuplicateKey { key });
            }
            let runs = record.parse_runs()?;
            by_key.insert(key, Motif::new(key, runs));
        }

        let catalog = Self { by_key };
        info!(
            motifs = catalog.len(),
            categories = catalog.list_categories().len(),
            "Loaded motif catalog"
        );
        Ok(catalog)
    }

    /// Parse, schema-check and load a JSON table (array or one record per line).
    pub fn from_json_str(input: &str) -> Result<Self> {
        let records = parse_record_stream(input)?;
        Self::load(records)
    }

    /// Read and load a table file.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Reading motif table");
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Load the table embedded in the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_TABLE)
    }

    /// Exact lookup; there is no nearest-match fallback.
    pub fn get(&self, category: u32, variant: u32) -> Result<&Motif> {
        let key = MotifKey::new(category, variant);
        self.by_key.get(&key).ok_or(MotifError::NotFound { key })
    }

    pub fn contains(&self, category: u32, variant: u32) -> bool {
        self.by_key.contains_key(&MotifKey::new(category, variant))
    }

    /// Variant ids of `category` in ascending order; empty when unknown.
    pub fn list_variants(&self, category: u32) -> Vec<u32> {
        self.by_key
            .range(MotifKey::new(category, 0)..=MotifKey::new(category, u32::MAX))
            .map(|(key, _)| key.variant)
            .collect()
    }

    pub fn list_categories(&self) -> BTreeSet<u32> {
        self.by_key.keys().map(|key| key.category).collect()
    }

    /// Iterates motifs in stable key order.
    pub fn motifs(&self) -> impl Iterator<Item = &Motif> {
        self.by_key.values()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Parse a table given as a JSON array of records or as newline-delimited
/// records.
///
/// Array documents are checked against the bundled [`TableSchema`]; each
/// newline-delimited record is checked as a one-element table.
pub fn parse_record_stream(input: &str) -> Result<Vec<RawRecord>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MotifError::EmptyInput);
    }
    let schema = TableSchema::bundled()?;

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if is_single_record(&value) {
            schema.validate(&Value::Array(vec![value.clone()]))?;
            return Ok(vec![serde_json::from_value(value)?]);
        }
        schema.validate(&value)?;
        let records: Vec<RawRecord> = serde_json::from_value(value)?;
        if records.is_empty() {
            return Err(MotifError::EmptyInput);
        }
        return Ok(records);
    }

    let mut records = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim().trim_end_matches(',');
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .map_err(|source| MotifError::ParseLine {
                line: idx + 1,
                source,
            })?;
        schema.validate(&Value::Array(vec![value.clone()]))?;
        let record = serde_json::from_value(value).map_err(|source| MotifError::ParseLine {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(MotifError::EmptyInput);
    }
    Ok(records)
}

// A lone `[category, variant, runs]` record, as opposed to a table of records.
fn is_single_record(value: &Value) -> bool {
    matches!(value.as_array(), Some(items) if items.first().is_some_and(Value::is_number))
}
