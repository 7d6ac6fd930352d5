//! Canonical address ordering.
//!
//! Street first (name, suffix, predir, postdir), then number (low, low
//! suffix, high), then unit. Missing values sort before present ones.

use ais_core::types::AddressRecord;
use std::cmp::Ordering;

pub fn address_order(a: &AddressRecord, b: &AddressRecord) -> Ordering {
    a.street_name
        .cmp(&b.street_name)
        .then_with(|| a.street_suffix.cmp(&b.street_suffix))
        .then_with(|| a.street_predir.cmp(&b.street_predir))
        .then_with(|| a.street_postdir.cmp(&b.street_postdir))
        .then_with(|| a.address_low.cmp(&b.address_low))
        .then_with(|| a.address_low_suffix.cmp(&b.address_low_suffix))
        .then_with(|| a.address_high.cmp(&b.address_high))
        .then_with(|| a.unit_num.cmp(&b.unit_num))
}
