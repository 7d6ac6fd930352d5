//! ais: address information service.
//!
//! Looks up street addresses, 100-blocks, property owners and tax accounts
//! in an address registry and renders the matches as paginated GeoJSON.
//!
//! # Architecture
//!
//! ```text
//! CLI / HTTP ──► AddressService ──► Registry
//!                     │
//!                     └──► Paginator ──► Serializer
//! ```
//!
//! The pipeline lives in `ais-core`, the in-memory executor in
//! `ais-registry` and the router in `ais-api`. This crate wires them up from
//! [`Config`] and carries the engine maintenance commands.

pub mod engine;

use ais_core::config::Config;
use ais_core::parser::BasicParser;
use ais_core::{AddressService, RegistryError};
use ais_registry::MemoryRegistry;
use std::sync::Arc;

/// Load the configured registry and build the lookup service over it.
pub fn build_service(cfg: &Config) -> Result<AddressService, RegistryError> {
    let registry = MemoryRegistry::from_path(&cfg.registry.path)?;
    Ok(service_over(registry, cfg))
}

/// Build the lookup service over an already-loaded registry.
pub fn service_over(registry: MemoryRegistry, cfg: &Config) -> AddressService {
    AddressService::new(Arc::new(registry), Arc::new(BasicParser))
        .with_page_size(cfg.paging.page_size)
        .with_srid(cfg.geometry.srid)
}
