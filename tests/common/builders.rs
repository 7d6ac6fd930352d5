//! Test builders: ergonomic constructors for records, registries and services.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use ais_core::parser::BasicParser;
use ais_core::{AddressRecord, AddressService};
use ais_registry::MemoryRegistry;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// AddressRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`AddressRecord`] fixtures. `street_address` is
/// composed from the parts on [`build`](Self::build) unless set explicitly.
///
/// ```rust
/// let record = AddressRecordBuilder::new(1234, "MARKET")
///     .suffix("ST")
///     .unit("APT", "2")
///     .account("883309050")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AddressRecordBuilder {
    record: AddressRecord,
    street_address: Option<String>,
}

impl AddressRecordBuilder {
    pub fn new(low: i64, street_name: &str) -> Self {
        Self {
            record: AddressRecord {
                address_low: Some(low),
                street_name: Some(street_name.to_string()),
                ..Default::default()
            },
            street_address: None,
        }
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.record.street_suffix = Some(suffix.to_string());
        self
    }

    pub fn predir(mut self, predir: &str) -> Self {
        self.record.street_predir = Some(predir.to_string());
        self
    }

    /// Full high end of a ranged address, e.g. `1236` for `1234-36`.
    pub fn high(mut self, high: i64) -> Self {
        self.record.address_high = Some(high);
        self
    }

    pub fn unit(mut self, unit_type: &str, unit_num: &str) -> Self {
        self.record.unit_type = Some(unit_type.to_string());
        self.record.unit_num = Some(unit_num.to_string());
        self
    }

    pub fn account(mut self, number: &str) -> Self {
        self.record.opa_account_num = Some(number.to_string());
        self
    }

    pub fn owners(mut self, owners: &str) -> Self {
        self.record.opa_owners = Some(owners.to_string());
        self
    }

    /// Random `LAST FIRST` owner name.
    pub fn fake_owner(self) -> Self {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        self.owners(&format!("{last} {first}").to_uppercase())
    }

    pub fn geocode(mut self, kind: &str, x: f64, y: f64) -> Self {
        self.record.geocode_type = Some(kind.to_string());
        self.record.geocode_x = Some(x);
        self.record.geocode_y = Some(y);
        self
    }

    pub fn recycling_rate(mut self, rate: &str) -> Self {
        self.record.service_areas.recycling_diversion_rate = Some(rate.to_string());
        self
    }

    pub fn street_address(mut self, street_address: &str) -> Self {
        self.street_address = Some(street_address.to_string());
        self
    }

    pub fn build(mut self) -> AddressRecord {
        self.record.street_address = self.street_address.take().unwrap_or_else(|| {
            let r = &self.record;
            let number = match (r.address_low, r.address_high) {
                (Some(low), Some(high)) => format!("{low}-{:02}", high % 100),
                (Some(low), None) => low.to_string(),
                _ => String::new(),
            };
            [
                Some(number.as_str()),
                r.street_predir.as_deref(),
                r.street_name.as_deref(),
                r.street_suffix.as_deref(),
                r.unit_type.as_deref(),
                r.unit_num.as_deref(),
            ]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
        });
        self.record
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// A lookup service over `records` with the basic parser.
pub fn service_with(records: Vec<AddressRecord>, page_size: usize) -> AddressService {
    AddressService::new(
        Arc::new(MemoryRegistry::from_records(records)),
        Arc::new(BasicParser),
    )
    .with_page_size(page_size)
}

/// `n` plain records on consecutive numbers of one street.
pub fn street_of(street_name: &str, first: i64, n: usize) -> Vec<AddressRecord> {
    (0..n as i64)
        .map(|i| {
            AddressRecordBuilder::new(first + i, street_name)
                .suffix("ST")
                .account(&format!("88{:07}", first + i))
                .build()
        })
        .collect()
}
