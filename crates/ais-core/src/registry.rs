//! Registry executor contract.
//!
//! The registry is an injected collaborator: the lookup service hands it a
//! [`RegistryQuery`] and receives a [`RecordSet`], an ordered, sized,
//! window-sliceable view of the matching records. Applying predicates,
//! ordering and storage mechanics are the executor's concern.

use crate::block::BlockRange;
use crate::error::RegistryError;
use crate::filter::{AuxPredicates, FilterSpecification};
use crate::types::AddressRecord;

/// An ordered, already-filtered collection of records.
///
/// The ordering must be stable for the lifetime of the set so that
/// consecutive windows partition it.
pub trait RecordSet {
    /// Number of records in the set, without materialising them.
    fn size(&self) -> usize;

    /// Records `offset..offset + limit`, clamped to the end of the set.
    fn window(&self, offset: usize, limit: usize) -> Vec<AddressRecord>;
}

impl RecordSet for [AddressRecord] {
    fn size(&self) -> usize {
        self.len()
    }

    fn window(&self, offset: usize, limit: usize) -> Vec<AddressRecord> {
        let start = offset.min(self.len());
        let end = offset.saturating_add(limit).min(self.len());
        self[start..end].to_vec()
    }
}

impl RecordSet for Vec<AddressRecord> {
    fn size(&self) -> usize {
        self.len()
    }

    fn window(&self, offset: usize, limit: usize) -> Vec<AddressRecord> {
        self.as_slice().window(offset, limit)
    }
}

/// Every predicate an executor must support. Unset predicates do not
/// constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryQuery {
    pub filters: FilterSpecification,
    pub aux: AuxPredicates,
    /// Conjunctive owner-name tokens. `Some(vec![])` matches nothing.
    pub owner_tokens: Option<Vec<String>>,
    /// `low <= address_low < high`.
    pub block: Option<BlockRange>,
    /// Exact OPA account number.
    pub account_num: Option<String>,
}

impl RegistryQuery {
    pub fn addresses(filters: FilterSpecification, aux: AuxPredicates) -> Self {
        Self {
            filters,
            aux,
            ..Self::default()
        }
    }

    pub fn block(filters: FilterSpecification, range: BlockRange, opa_only: bool) -> Self {
        Self {
            filters,
            aux: AuxPredicates {
                exclude_non_opa: opa_only,
                ..AuxPredicates::default()
            },
            block: Some(range),
            ..Self::default()
        }
    }

    pub fn owner(tokens: Vec<String>, opa_only: bool) -> Self {
        Self {
            aux: AuxPredicates {
                exclude_non_opa: opa_only,
                ..AuxPredicates::default()
            },
            owner_tokens: Some(tokens),
            ..Self::default()
        }
    }

    pub fn account(number: impl Into<String>, opa_only: bool) -> Self {
        Self {
            aux: AuxPredicates {
                exclude_non_opa: opa_only,
                ..AuxPredicates::default()
            },
            account_num: Some(number.into()),
            ..Self::default()
        }
    }
}

/// A query executor backing the address registry.
///
/// Implementations are shared read-only across requests.
pub trait Registry: Send + Sync {
    /// Run `query` and return the matching records in address order.
    fn select<'a>(&'a self, query: &RegistryQuery) -> Result<Box<dyn RecordSet + 'a>, RegistryError>;
}
