//! Block range resolver.
//!
//! A block is the 100-wide run of address numbers sharing a hundreds digit:
//! `437 Market St` lives on the `400..500` block.

use crate::error::{context, QueryError};
use crate::filter::{street_filters, FilterSpecification};
use crate::types::ParsedQuery;
use serde_json::Value;

/// Width of one block.
pub const BLOCK_SIZE: i64 = 100;

/// A half-open range of address numbers, `low <= n < high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRange {
    pub low: i64,
    pub high: i64,
}

impl BlockRange {
    /// The block containing `address_number`. `None` when either end of the
    /// block falls outside `i64`.
    pub fn containing(address_number: i64) -> Option<Self> {
        let low = address_number.div_euclid(BLOCK_SIZE).checked_mul(BLOCK_SIZE)?;
        let high = low.checked_add(BLOCK_SIZE)?;
        Some(Self { low, high })
    }

    /// Parse an address-number token and return its block. `None` when the
    /// token is not an integer or its block is not representable.
    pub fn from_token(token: &str) -> Option<Self> {
        token.trim().parse::<i64>().ok().and_then(Self::containing)
    }

    pub fn contains(&self, address_number: i64) -> bool {
        self.low <= address_number && address_number < self.high
    }
}

/// Resolve the block for a parsed query, along with the street filters the
/// block lookup applies.
///
/// Fails with [`QueryError::InvalidBlockNumber`] when the query carries no
/// integer address number; the error context echoes `query` and its
/// normalised form.
pub fn resolve_block(
    query: &str,
    parsed: &ParsedQuery,
) -> Result<(BlockRange, FilterSpecification), QueryError> {
    let range = parsed
        .address_number_token()
        .as_deref()
        .and_then(BlockRange::from_token)
        .ok_or_else(|| QueryError::InvalidBlockNumber {
            context: context([
                ("query", Value::from(query)),
                ("normalized", Value::from(parsed.street_address.clone())),
            ]),
        })?;

    tracing::debug!(low = range.low, high = range.high, "resolved block");
    Ok((range, street_filters(parsed)))
}
