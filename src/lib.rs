//! Data-center inventory data layer
//!
//! This crate models sites, racks, device types, devices and their console,
//! power and network interconnections, and provides rack space allocation,
//! placement validation and slot-aware ordering of component names.

pub mod config;
pub mod domain;
pub mod errors;
pub mod expander;
pub mod ordering;
pub mod placement;
pub mod rack_units;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use config::DcimConfig;
pub use errors::{DcimError, DcimResult};
pub use expander::{expand_device_type, ComponentSpecs, InterfaceSpec};
pub use ordering::{NameOrderKey, Named, NumericSuffixKey};
pub use rack_units::{RackOccupant, RackUnit, RackUnitMap};
pub use repository::{InMemoryInventory, InventoryRepository};
pub use service::InventoryService;
