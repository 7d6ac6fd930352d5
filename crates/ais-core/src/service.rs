//! Lookup service: the four query pipelines.
//!
//! ```text
//! query ──► parser ──► filters / block / owner tokens ──► registry
//!                                                            │
//!        document ◄── serializer ◄── page ◄── paginator ◄────┘
//! ```
//!
//! Each lookup is request-scoped: filters, paginators and documents are built
//! per call and dropped with the response. The service itself only holds
//! read-only collaborators and can be shared across requests.

use crate::block::resolve_block;
use crate::error::{context, QueryError};
use crate::filter::address_filters;
use crate::owner::owner_tokens;
use crate::paginate::{PageInfo, Paginator};
use crate::parser::AddressParser;
use crate::registry::{RecordSet, Registry, RegistryQuery};
use crate::serialize::{
    AddressJsonSerializer, AddressSummaryJsonSerializer, Document, FeatureSerializer, Passthrough,
    Reproject,
};
use crate::types::AddressRecord;
use serde_json::Value;
use std::sync::Arc;

/// Request options common to every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Raw `page` parameter; page 1 when absent.
    pub page: Option<String>,
    /// Drop records without an OPA account number.
    pub opa_only: bool,
    /// Render with the flat summary serializer.
    pub summary: bool,
}

/// Runs address, block, owner and account lookups against an injected
/// registry and parser.
#[derive(Clone)]
pub struct AddressService {
    registry: Arc<dyn Registry>,
    parser: Arc<dyn AddressParser>,
    projection: Arc<dyn Reproject>,
    page_size: usize,
    srid: u32,
}

impl AddressService {
    pub fn new(registry: Arc<dyn Registry>, parser: Arc<dyn AddressParser>) -> Self {
        Self {
            registry,
            parser,
            projection: Arc::new(Passthrough),
            page_size: 100,
            srid: crate::serialize::DEFAULT_SRID,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_srid(mut self, srid: u32) -> Self {
        self.srid = srid;
        self
    }

    pub fn with_projection(mut self, projection: Arc<dyn Reproject>) -> Self {
        self.projection = projection;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Look up the addresses matching a free-text address.
    pub fn addresses(&self, query: &str, opts: &LookupOptions) -> Result<Value, QueryError> {
        let parsed = self.parser.parse(query);
        let normalized = Value::from(parsed.street_address.clone());
        let (filters, aux) = address_filters(&parsed, opts.opa_only);

        let set = self
            .registry
            .select(&RegistryQuery::addresses(filters, aux))?;
        let metadata = context([("query", Value::from(query)), ("normalized", normalized)]);

        self.render_page(
            &*set,
            opts,
            metadata.clone(),
            QueryError::not_found("Could not find addresses matching query.", metadata),
        )
    }

    /// Look up every address on the 100-block containing the queried number.
    pub fn block(&self, query: &str, opts: &LookupOptions) -> Result<Value, QueryError> {
        let parsed = self.parser.parse(query);
        let normalized = Value::from(parsed.street_address.clone());
        let (range, filters) = resolve_block(query, &parsed)?;

        let set = self
            .registry
            .select(&RegistryQuery::block(filters, range, opts.opa_only))?;
        let metadata = context([("query", Value::from(query)), ("normalized", normalized)]);

        self.render_page(
            &*set,
            opts,
            metadata.clone(),
            QueryError::not_found(
                "Could not find any address on a block matching query.",
                metadata,
            ),
        )
    }

    /// Look up the addresses whose owners match every token of the query.
    pub fn owner(&self, query: &str, opts: &LookupOptions) -> Result<Value, QueryError> {
        let tokens = owner_tokens(query);
        let parsed = Value::from(tokens.clone());

        let set = self
            .registry
            .select(&RegistryQuery::owner(tokens, opts.opa_only))?;

        self.render_page(
            &*set,
            opts,
            context([("query", Value::from(query)), ("parsed", parsed)]),
            QueryError::not_found(
                "Could not find any addresses with owner matching query.",
                context([("query", query)]),
            ),
        )
    }

    /// Look up the property with an OPA account number. Renders a single
    /// feature, the first in address order.
    pub fn account(&self, number: &str, opts: &LookupOptions) -> Result<Value, QueryError> {
        let set = self
            .registry
            .select(&RegistryQuery::account(number, opts.opa_only))?;

        let Some(record) = set.window(0, 1).into_iter().next() else {
            tracing::debug!(number, "no property with account number");
            return Err(QueryError::not_found(
                "Could not find property with account number.",
                context([("number", number)]),
            ));
        };

        Ok(if opts.summary {
            AddressSummaryJsonSerializer::new().serialize(&record)
        } else {
            self.full_serializer().serialize(&record)
        })
    }

    fn full_serializer(&self) -> AddressJsonSerializer {
        AddressJsonSerializer::new()
            .with_srid(self.srid)
            .with_projection(self.projection.clone())
    }

    /// Empty check, page validation, slicing and rendering shared by the
    /// collection lookups.
    fn render_page(
        &self,
        set: &dyn RecordSet,
        opts: &LookupOptions,
        metadata: Document,
        not_found: QueryError,
    ) -> Result<Value, QueryError> {
        let paginator = Paginator::new(set, self.page_size);
        if paginator.collection_size() == 0 {
            tracing::debug!(%not_found, "empty result set");
            return Err(not_found);
        }

        let page_num = paginator.validate_page_num(opts.page.as_deref().unwrap_or("1"))?;
        let page = paginator.get_page(page_num);
        let info = paginator.get_page_info(page_num);
        tracing::debug!(
            page = info.page,
            page_count = info.page_count,
            total = info.total_size,
            "rendering page"
        );

        Ok(self.render_collection(&page, metadata, info, opts.summary))
    }

    fn render_collection(
        &self,
        page: &[AddressRecord],
        metadata: Document,
        info: PageInfo,
        summary: bool,
    ) -> Value {
        if summary {
            AddressSummaryJsonSerializer::new()
                .with_metadata(metadata)
                .with_pagination(info)
                .serialize_many(page)
        } else {
            self.full_serializer()
                .with_metadata(metadata)
                .with_pagination(info)
                .serialize_many(page)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
