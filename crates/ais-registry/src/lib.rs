//! ais-registry: registry executors for the ais lookup service.
//!
//! [`MemoryRegistry`] loads a JSON array of [`AddressRecord`](ais_core::AddressRecord)s,
//! keeps them in canonical address order, and answers
//! [`RegistryQuery`](ais_core::registry::RegistryQuery)s by scanning.

pub mod memory;
pub mod order;

pub use memory::MemoryRegistry;
pub use order::address_order;
