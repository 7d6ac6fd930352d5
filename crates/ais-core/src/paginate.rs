//! Pagination over a [`RecordSet`].
//!
//! Pages are 1-indexed and fixed-size. For a collection of `total` records
//! and page size `size`, page `n` covers `[(n-1)*size, min(n*size, total))`,
//! so consecutive pages partition the collection.

use crate::error::{context, QueryError};
use crate::registry::RecordSet;
use crate::types::AddressRecord;
use serde_json::{Map, Value};

/// Derived metadata for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub page_count: usize,
    pub total_size: usize,
    /// First item index on this page (inclusive).
    pub start: usize,
    /// One past the last item index on this page.
    pub end: usize,
}

impl PageInfo {
    /// Number of items on this page.
    pub fn page_size(&self) -> usize {
        self.end - self.start
    }

    /// Pagination fields as they appear in a rendered feature collection.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("page".into(), Value::from(self.page));
        fields.insert("page_count".into(), Value::from(self.page_count));
        fields.insert("page_size".into(), Value::from(self.page_size()));
        fields.insert("total_size".into(), Value::from(self.total_size));
        fields
    }
}

/// Page-based access to an ordered record set.
pub struct Paginator<'a, S: RecordSet + ?Sized> {
    set: &'a S,
    page_size: usize,
    collection_size: usize,
}

impl<'a, S: RecordSet + ?Sized> Paginator<'a, S> {
    /// Wrap `set`. A `page_size` of zero is treated as one.
    pub fn new(set: &'a S, page_size: usize) -> Self {
        Self {
            set,
            page_size: page_size.max(1),
            collection_size: set.size(),
        }
    }

    pub fn collection_size(&self) -> usize {
        self.collection_size
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages; zero for an empty collection.
    pub fn page_count(&self) -> usize {
        self.collection_size.div_ceil(self.page_size)
    }

    /// Parse a raw page parameter.
    ///
    /// The value must be a positive integer and, when the collection is not
    /// empty, no larger than [`page_count`](Self::page_count). Page 1 of an
    /// empty collection is valid.
    pub fn validate_page_num(&self, raw: &str) -> Result<usize, QueryError> {
        let invalid = |message: &str| {
            QueryError::validation(message, context([("page", raw)]))
        };

        let page = match raw.trim().parse::<usize>() {
            Ok(page) if page >= 1 => page,
            _ => return Err(invalid("Page number must be a positive integer.")),
        };

        if self.collection_size > 0 && page > self.page_count() {
            return Err(invalid("Page number exceeds the number of pages."));
        }
        Ok(page)
    }

    fn bounds(&self, page: usize) -> (usize, usize) {
        let start = page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(self.collection_size);
        let end = start.saturating_add(self.page_size).min(self.collection_size);
        (start, end)
    }

    /// The records on `page`, at most `page_size` of them.
    pub fn get_page(&self, page: usize) -> Vec<AddressRecord> {
        let (start, end) = self.bounds(page);
        self.set.window(start, end - start)
    }

    pub fn get_page_info(&self, page: usize) -> PageInfo {
        let (start, end) = self.bounds(page);
        PageInfo {
            page,
            page_count: self.page_count(),
            total_size: self.collection_size,
            start,
            end,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
