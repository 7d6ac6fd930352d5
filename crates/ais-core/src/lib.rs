//! ais-core: address information service core library.
//!
//! This crate holds the query-filter construction and result-rendering
//! pipeline, plus the contracts of its external collaborators (parser and
//! registry executor).
//!
//! # Architecture
//!
//! ```text
//! Parser ──► Filters / Block / Owner ──► Registry ──► Paginator ──► Serializer
//! ```
//!
//! Everything is request-scoped and synchronous; [`service::AddressService`]
//! wires the stages together for each lookup.

pub mod block;
pub mod config;
pub mod error;
pub mod filter;
pub mod owner;
pub mod paginate;
pub mod parser;
pub mod registry;
pub mod serialize;
pub mod service;
pub mod types;

pub use error::{QueryError, RegistryError};
pub use service::{AddressService, LookupOptions};
pub use types::{AddressField, AddressRecord, ParsedQuery, ServiceAreas};
