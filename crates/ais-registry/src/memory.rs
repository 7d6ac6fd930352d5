//! In-memory registry executor.
//!
//! Records are loaded once, sorted into address order, and shared read-only.
//! A query scans the records and keeps the indices of the matches, so a
//! [`RecordSet`]'s size is known without cloning any record.

use crate::order::address_order;
use ais_core::filter::FilterSpecification;
use ais_core::registry::{RecordSet, Registry, RegistryQuery};
use ais_core::types::{AddressField, AddressRecord};
use ais_core::RegistryError;
use std::path::Path;

/// Address registry held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    records: Vec<AddressRecord>,
}

impl MemoryRegistry {
    /// Build a registry from records in any order.
    pub fn from_records(mut records: Vec<AddressRecord>) -> Self {
        records.sort_by(address_order);
        Self { records }
    }

    /// Load a JSON array of records.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<AddressRecord> = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), records = records.len(), "loaded registry");
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }
}

impl Registry for MemoryRegistry {
    fn select<'a>(&'a self, query: &RegistryQuery) -> Result<Box<dyn RecordSet + 'a>, RegistryError> {
        let hits: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches(query, record))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(hits = hits.len(), "registry scan");
        Ok(Box::new(Selection {
            records: &self.records,
            hits,
        }))
    }
}

/// Matching records, as indices into the registry in address order.
struct Selection<'a> {
    records: &'a [AddressRecord],
    hits: Vec<usize>,
}

impl RecordSet for Selection<'_> {
    fn size(&self) -> usize {
        self.hits.len()
    }

    fn window(&self, offset: usize, limit: usize) -> Vec<AddressRecord> {
        self.hits
            .iter()
            .skip(offset)
            .take(limit)
            .map(|&i| self.records[i].clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

fn matches(query: &RegistryQuery, record: &AddressRecord) -> bool {
    if query.aux.exclude_non_opa && !record.has_opa_account() {
        return false;
    }
    if let Some(unit_type) = &query.aux.unit_type {
        if !eq_opt(record.unit_type.as_deref(), unit_type) {
            return false;
        }
    }
    if let Some(tokens) = &query.owner_tokens {
        if !owner_matches(tokens, record) {
            return false;
        }
    }
    if let Some(range) = query.block {
        if !record.address_low.is_some_and(|low| range.contains(low)) {
            return false;
        }
    }
    if let Some(number) = &query.account_num {
        if record.opa_account_num.as_deref() != Some(number.as_str()) {
            return false;
        }
    }

    let filters = &query.filters;
    filters.matches(|field| record.field_text(field))
        || (query.aux.include_child_units && is_child_unit(filters, record))
}

fn eq_opt(actual: Option<&str>, expected: &str) -> bool {
    actual.is_some_and(|a| a.eq_ignore_ascii_case(expected))
}

/// Every token must occur in the record's owner names. No tokens, no match.
fn owner_matches(tokens: &[String], record: &AddressRecord) -> bool {
    let Some(owners) = record.opa_owners.as_deref() else {
        return false;
    };
    let owners = owners.to_uppercase();
    !tokens.is_empty() && tokens.iter().all(|t| owners.contains(t.as_str()))
}

/// A unit record nested in the queried range: same street, has a unit
/// number, and an address number between the range's low and high ends.
fn is_child_unit(filters: &FilterSpecification, record: &AddressRecord) -> bool {
    if filters.matches_nothing() || record.unit_num.is_none() {
        return false;
    }
    let bound = |field| {
        filters
            .constraint(field)
            .flatten()
            .and_then(|v| v.parse::<i64>().ok())
    };
    let (Some(low), Some(high), Some(n)) = (
        bound(AddressField::AddressLow),
        bound(AddressField::AddressHigh),
        record.address_low,
    ) else {
        return false;
    };
    if !(low..=high).contains(&n) {
        return false;
    }

    [
        AddressField::StreetName,
        AddressField::StreetPredir,
        AddressField::StreetPostdir,
        AddressField::StreetSuffix,
    ]
    .into_iter()
    .all(|field| match filters.constraint(field).flatten() {
        Some(expected) => eq_opt(record.field_text(field).as_deref(), expected),
        None => true,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
