// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! Entities and value objects of the data-center inventory: sites, racks,
//! device types with their component templates, devices and their
//! components and connections.
//!
//! # Value Objects with Invariants
//!
//! - [`Slug`] - URL-safe short names
//! - [`MacAddress`] - 48-bit interface MAC addresses
//! - [`IpAddressWithCidr`] - device primary addresses
//! - [`EntityId`] - typed UUID v7 identities
//!
//! # Choice Enumerations
//!
//! See [`choices`]: rack face/width/type, sub-device role, form factor,
//! device and connection status, RPC client.
//!
//! # Validation
//!
//! Field-scoped [`ValidationError`]s are produced by constructors, by
//! [`invariants`] and by [`crate::placement`].

pub mod choices;
pub mod components;
pub mod device;
pub mod device_type;
pub mod ids;
pub mod invariants;
pub mod network;
pub mod site;
pub mod slug;

pub use choices::{
    ConnectionStatus, DeviceStatus, FormFactor, FormFactorGroup, RackFace, RackType, RackWidth,
    RpcClient, SubdeviceRole,
};
pub use components::{
    ConsolePort, ConsolePortId, ConsoleServerPort, ConsoleServerPortId, DeviceBay, DeviceBayId,
    DeviceComponents, Interface, InterfaceConnection, InterfaceConnectionId, InterfaceId, Module,
    ModuleId, PowerOutlet, PowerOutletId, PowerPort, PowerPortId,
};
pub use device::{Device, DeviceBuilder, DeviceId, DeviceRole, DeviceRoleId, Platform, PlatformId};
pub use device_type::{
    ConsolePortTemplate, ConsoleServerPortTemplate, DeviceBayTemplate, DeviceType, DeviceTypeId,
    DeviceTypeTemplates, InterfaceTemplate, Manufacturer, ManufacturerId, PowerOutletTemplate,
    PowerPortTemplate,
};
pub use ids::EntityId;
pub use invariants::{ValidationError, ValidationResult};
pub use network::{IpAddressWithCidr, MacAddress, NetworkError};
pub use site::{Rack, RackGroup, RackGroupId, RackId, RackRole, RackRoleId, Site, SiteId, Tenant, TenantId};
pub use slug::{Slug, SlugError};
