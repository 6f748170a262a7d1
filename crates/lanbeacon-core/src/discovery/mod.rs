//! Service discovery: the multicast listener and the set it maintains.

pub mod service;
pub mod store;

pub use service::{Discoverer, DiscovererConfig, DEFAULT_MAX_IDLE, DEFAULT_MAX_SERVICES};
pub use store::DiscoverySet;
