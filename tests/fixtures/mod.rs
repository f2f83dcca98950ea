// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for dcim-inventory
//!
//! Provides a small deterministic catalog: one site with a 42U rack, one
//! manufacturer and a device type for each placement shape (full-depth 1U
//! switch, 2U server, half-depth patch panel, parent chassis, child blade).
//!
//! # Design Principles
//! - Identities and timestamps are fixed constants
//! - Integration tests build entities through these helpers
//! - `seeded_service` returns a service whose repository already holds the
//!   whole catalog
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use dcim_inventory::domain::{
    Device, DeviceRole, DeviceType, EntityId, FormFactor, Manufacturer, Platform, Rack, RackFace,
    RpcClient, Site, SubdeviceRole,
};
use dcim_inventory::{DcimConfig, InMemoryInventory, InventoryRepository, InventoryService};

// Fixed test UUIDs (UUID v7 format, but deterministic for testing)
pub const SITE_ID: &str = "01934f4a-0001-7000-8000-000000000001";
pub const RACK_ID: &str = "01934f4a-0002-7000-8000-000000000002";
pub const MANUFACTURER_ID: &str = "01934f4a-0003-7000-8000-000000000003";
pub const SWITCH_TYPE_ID: &str = "01934f4a-1001-7000-8000-000000001001";
pub const SERVER_TYPE_ID: &str = "01934f4a-1002-7000-8000-000000001002";
pub const PANEL_TYPE_ID: &str = "01934f4a-1003-7000-8000-000000001003";
pub const CHASSIS_TYPE_ID: &str = "01934f4a-1004-7000-8000-000000001004";
pub const BLADE_TYPE_ID: &str = "01934f4a-1005-7000-8000-000000001005";
pub const ROLE_ID: &str = "01934f4a-2001-7000-8000-000000002001";
pub const PLATFORM_ID: &str = "01934f4a-2002-7000-8000-000000002002";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

/// Parse a fixed UUID from a constant string
pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

/// Typed identity from a constant string
pub fn fixed_id<T>(s: &str) -> EntityId<T> {
    EntityId::from_uuid(parse_uuid(s))
}

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub struct Catalog {
    pub site: Site,
    pub rack: Rack,
    pub manufacturer: Manufacturer,
    /// 1U full-depth switch with console, power and interface templates
    pub switch: DeviceType,
    /// 2U full-depth server
    pub server: DeviceType,
    /// 1U half-depth patch panel
    pub panel: DeviceType,
    /// 10U parent chassis with two bays
    pub chassis: DeviceType,
    /// 0U child blade
    pub blade: DeviceType,
    pub role: DeviceRole,
    pub platform: Platform,
}

pub fn catalog() -> Catalog {
    let mut site = Site::new("DC West").expect("Invalid site");
    site.id = fixed_id(SITE_ID);
    site.created_at = fixed_timestamp();
    site.updated_at = fixed_timestamp();

    let mut rack = Rack::new(site.id, "R101", 42).expect("Invalid rack");
    rack.id = fixed_id(RACK_ID);
    rack.created_at = fixed_timestamp();
    rack.updated_at = fixed_timestamp();

    let mut manufacturer = Manufacturer::new("Juniper").expect("Invalid manufacturer");
    manufacturer.id = fixed_id(MANUFACTURER_ID);

    let mut switch = DeviceType::new(manufacturer.id, "EX4300-48T", 1).expect("Invalid type");
    switch.id = fixed_id(SWITCH_TYPE_ID);
    switch.add_console_port("Console").expect("template");
    switch.add_power_port("PSU0").expect("template");
    switch.add_power_port("PSU1").expect("template");
    switch.add_interface("em0", FormFactor::Fixed1Ge, true).expect("template");
    for port in [10, 2, 1, 0] {
        switch
            .add_interface(format!("ge-0/0/{port}"), FormFactor::Fixed1Ge, false)
            .expect("template");
    }
    switch.add_interface("xe-0/2/0:1", FormFactor::SfpPlus10Ge, false).expect("template");
    switch.add_interface("xe-0/2/0:0", FormFactor::SfpPlus10Ge, false).expect("template");
    switch.add_interface("vlan10", FormFactor::Virtual, false).expect("template");

    let mut server = DeviceType::new(manufacturer.id, "Server 2U", 2).expect("Invalid type");
    server.id = fixed_id(SERVER_TYPE_ID);

    let mut panel = DeviceType::new(manufacturer.id, "Patch Panel", 1)
        .expect("Invalid type")
        .with_full_depth(false);
    panel.id = fixed_id(PANEL_TYPE_ID);

    let mut chassis = DeviceType::new(manufacturer.id, "MX960", 10)
        .expect("Invalid type")
        .with_subdevice_role(Some(SubdeviceRole::Parent));
    chassis.id = fixed_id(CHASSIS_TYPE_ID);
    chassis.add_device_bay("Slot 1").expect("template");
    chassis.add_device_bay("Slot 0").expect("template");

    let mut blade = DeviceType::new(manufacturer.id, "Line Card", 0)
        .expect("Invalid type")
        .with_subdevice_role(Some(SubdeviceRole::Child));
    blade.id = fixed_id(BLADE_TYPE_ID);

    let mut role = DeviceRole::new("Access Switch", "2196f3").expect("Invalid role");
    role.id = fixed_id(ROLE_ID);

    let mut platform = Platform::new("Junos", Some(RpcClient::JuniperJunos)).expect("Invalid platform");
    platform.id = fixed_id(PLATFORM_ID);

    Catalog {
        site,
        rack,
        manufacturer,
        switch,
        server,
        panel,
        chassis,
        blade,
        role,
        platform,
    }
}

/// Service whose repository holds every catalog entity, and the catalog
pub fn seeded_service() -> (InventoryService<InMemoryInventory>, Catalog) {
    let catalog = catalog();
    let mut inventory = InMemoryInventory::new();

    inventory.insert_site(catalog.site.clone()).expect("seed site");
    inventory.insert_rack(catalog.rack.clone()).expect("seed rack");
    inventory
        .insert_manufacturer(catalog.manufacturer.clone())
        .expect("seed manufacturer");
    for device_type in [
        &catalog.switch,
        &catalog.server,
        &catalog.panel,
        &catalog.chassis,
        &catalog.blade,
    ] {
        inventory
            .insert_device_type(device_type.clone())
            .expect("seed device type");
    }
    inventory.insert_device_role(catalog.role.clone()).expect("seed role");
    inventory.insert_platform(catalog.platform.clone()).expect("seed platform");

    (InventoryService::new(inventory, DcimConfig::default()), catalog)
}

/// Named device of `device_type` slotted at `position` on `face`
pub fn racked(catalog: &Catalog, device_type: &DeviceType, name: &str, position: u16, face: RackFace) -> Device {
    let mut device = Device::builder(device_type.id, catalog.role.id, catalog.rack.id)
        .name(name)
        .position(position, face)
        .build()
        .expect("Invalid device");
    device.created_at = fixed_timestamp();
    device.updated_at = fixed_timestamp();
    device
}

/// Named device of `device_type` with no rack slot
pub fn unracked(catalog: &Catalog, device_type: &DeviceType, name: &str) -> Device {
    let mut device = Device::builder(device_type.id, catalog.role.id, catalog.rack.id)
        .name(name)
        .build()
        .expect("Invalid device");
    device.created_at = fixed_timestamp();
    device.updated_at = fixed_timestamp();
    device
}
