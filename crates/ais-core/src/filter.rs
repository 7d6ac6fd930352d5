//! Filter specification builder.
//!
//! Matching uses two tiers. A **loose** filter constrains a field only when
//! the query supplied a value: an omitted predirectional still matches every
//! predirectional. A **strict** filter always constrains: an omitted
//! address-high means "not a ranged address", so ranged records must be
//! excluded by matching an explicit null.

use crate::types::{AddressField, ParsedQuery};
use std::collections::BTreeMap;

/// Fields matched loosely by an address lookup.
pub const LOOSE_ADDRESS_FIELDS: [AddressField; 6] = [
    AddressField::StreetName,
    AddressField::AddressLow,
    AddressField::StreetPredir,
    AddressField::StreetPostdir,
    AddressField::StreetSuffix,
    AddressField::UnitNum,
];

/// Fields matched strictly by an address lookup.
pub const STRICT_ADDRESS_FIELDS: [AddressField; 1] = [AddressField::AddressHigh];

/// Street-only fields used by the block lookup.
pub const STREET_FIELDS: [AddressField; 4] = [
    AddressField::StreetName,
    AddressField::StreetPredir,
    AddressField::StreetPostdir,
    AddressField::StreetSuffix,
];

// ---------------------------------------------------------------------------
// FilterSpecification
// ---------------------------------------------------------------------------

/// Loose and strict equality constraints over [`AddressField`]s.
///
/// The two maps are disjoint: inserting a field into one tier removes it
/// from the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpecification {
    loose: BTreeMap<AddressField, String>,
    strict: BTreeMap<AddressField, Option<String>>,
    match_none: bool,
}

impl FilterSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    /// A specification no record satisfies.
    pub fn nothing() -> Self {
        Self {
            match_none: true,
            ..Self::default()
        }
    }

    pub fn matches_nothing(&self) -> bool {
        self.match_none
    }

    /// Add a loose constraint. A `None` value leaves the field unconstrained.
    pub fn loose(mut self, field: AddressField, value: Option<String>) -> Self {
        self.strict.remove(&field);
        match value {
            Some(value) => {
                self.loose.insert(field, value);
            }
            None => {
                self.loose.remove(&field);
            }
        }
        self
    }

    /// Add a strict constraint. A `None` value must match an explicit null.
    pub fn strict(mut self, field: AddressField, value: Option<String>) -> Self {
        self.loose.remove(&field);
        self.strict.insert(field, value);
        self
    }

    pub fn loose_filters(&self) -> &BTreeMap<AddressField, String> {
        &self.loose
    }

    pub fn strict_filters(&self) -> &BTreeMap<AddressField, Option<String>> {
        &self.strict
    }

    /// The value a record must hold for `field`: `Some(Some(v))` for an
    /// equality constraint, `Some(None)` for an explicit null, `None` when
    /// the field is unconstrained.
    pub fn constraint(&self, field: AddressField) -> Option<Option<&str>> {
        if let Some(value) = self.loose.get(&field) {
            return Some(Some(value.as_str()));
        }
        self.strict.get(&field).map(|value| value.as_deref())
    }

    /// Check a record's field values against every constraint. Comparison
    /// ignores ASCII case.
    pub fn matches<F>(&self, field_value: F) -> bool
    where
        F: Fn(AddressField) -> Option<String>,
    {
        if self.match_none {
            return false;
        }
        let loose_ok = self.loose.iter().all(|(field, expected)| {
            field_value(*field).is_some_and(|actual| actual.eq_ignore_ascii_case(expected))
        });
        loose_ok
            && self.strict.iter().all(|(field, expected)| {
                match (field_value(*field), expected) {
                    (None, None) => true,
                    (Some(actual), Some(expected)) => actual.eq_ignore_ascii_case(expected),
                    _ => false,
                }
            })
    }

    pub fn is_empty(&self) -> bool {
        !self.match_none && self.loose.is_empty() && self.strict.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Auxiliary predicates
// ---------------------------------------------------------------------------

/// Predicates passed to the executor alongside the filter maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuxPredicates {
    /// Restrict to this unit designator when present.
    pub unit_type: Option<String>,
    /// Drop records without an OPA account number.
    pub exclude_non_opa: bool,
    /// Also surface unit records nested inside the queried range.
    pub include_child_units: bool,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build the filters for an address lookup.
///
/// A query with neither a street name nor an address number yields
/// [`FilterSpecification::nothing`].
pub fn address_filters(parsed: &ParsedQuery, opa_only: bool) -> (FilterSpecification, AuxPredicates) {
    let usable = parsed.street_name.is_some() || parsed.address_number_token().is_some();
    let spec = if usable {
        FilterSpecification::new()
    } else {
        FilterSpecification::nothing()
    };
    let spec = spec
        .loose(AddressField::StreetName, parsed.street_name.clone())
        .loose(AddressField::AddressLow, parsed.address_number_token())
        .loose(AddressField::StreetPredir, parsed.street_predir.clone())
        .loose(AddressField::StreetPostdir, parsed.street_postdir.clone())
        .loose(AddressField::StreetSuffix, parsed.street_suffix.clone())
        .loose(AddressField::UnitNum, parsed.unit_num.clone())
        .strict(AddressField::AddressHigh, parsed.address_high_full.clone());

    let aux = AuxPredicates {
        unit_type: parsed.unit_type.clone(),
        exclude_non_opa: opa_only,
        include_child_units: parsed.address_high_full.is_some(),
    };

    tracing::debug!(
        loose = spec.loose.len(),
        strict = spec.strict.len(),
        ?aux,
        "built address filters"
    );
    (spec, aux)
}

/// Loose street-only filters, used when the address number is expressed as
/// a [`BlockRange`](crate::block::BlockRange) instead.
pub fn street_filters(parsed: &ParsedQuery) -> FilterSpecification {
    FilterSpecification::new()
        .loose(AddressField::StreetName, parsed.street_name.clone())
        .loose(AddressField::StreetPredir, parsed.street_predir.clone())
        .loose(AddressField::StreetPostdir, parsed.street_postdir.clone())
        .loose(AddressField::StreetSuffix, parsed.street_suffix.clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
