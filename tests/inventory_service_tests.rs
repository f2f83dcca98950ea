// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Service Integration Tests
//!
//! Exercises the service end to end over the in-memory repository:
//! device creation with component expansion, rack space validation,
//! connections, device bays, cascades and listings.

mod fixtures;

use anyhow::Result;
use pretty_assertions::assert_eq;

use dcim_inventory::domain::{
    ConnectionStatus, ConsolePortTemplate, DeviceType, FormFactor, IpAddressWithCidr, Module,
    RackFace, ValidationError,
};
use dcim_inventory::{DcimConfig, DcimError, InMemoryInventory, InventoryRepository, InventoryService};
use fixtures::{racked, seeded_service, unracked};

fn validation_field(err: &DcimError) -> Option<&'static str> {
    err.as_validation().map(ValidationError::field)
}

#[test]
fn test_create_device_expands_templates() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    let device = racked(&catalog, &catalog.switch, "sw1", 10, RackFace::Front);
    let device_id = device.id;

    let components = service.create_device(device)?;
    assert_eq!(components.console_ports.len(), 1);
    assert_eq!(components.power_ports.len(), 2);
    assert_eq!(components.interfaces.len(), 8);

    let stored = service.repository().components(device_id);
    assert_eq!(stored, components);
    Ok(())
}

#[test]
fn test_sorted_interfaces_follow_slots() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    let device = racked(&catalog, &catalog.switch, "sw1", 10, RackFace::Front);
    let device_id = device.id;
    service.create_device(device)?;

    let names: Vec<String> = service
        .sorted_components(device_id)?
        .interfaces
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "ge-0/0/0", "ge-0/0/1", "ge-0/0/2", "ge-0/0/10", "xe-0/2/0:0", "xe-0/2/0:1", "em0",
            "vlan10",
        ]
    );

    let (physical, virtual_) = service.interfaces(device_id)?;
    assert_eq!(physical.len(), 7);
    assert_eq!(virtual_.len(), 1);
    assert_eq!(virtual_[0].name, "vlan10");
    Ok(())
}

#[test]
fn test_occupied_slot_rejected_without_write() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    service.create_device(racked(&catalog, &catalog.server, "srv1", 20, RackFace::Front))?;

    // 2U server at 20 covers 21; a switch at 21 rear collides with full depth
    let clash = racked(&catalog, &catalog.switch, "sw1", 21, RackFace::Rear);
    let clash_id = clash.id;
    let err = service.create_device(clash).unwrap_err();
    assert_eq!(validation_field(&err), Some("position"));
    assert!(service.repository().device(clash_id).is_err());
    assert!(service.repository().components(clash_id).is_empty());
    Ok(())
}

#[test]
fn test_half_depth_devices_share_a_unit() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    let front = racked(&catalog, &catalog.panel, "pp-front", 5, RackFace::Front);
    let rear = racked(&catalog, &catalog.panel, "pp-rear", 5, RackFace::Rear);
    let (front_id, rear_id) = (front.id, rear.id);
    service.create_device(front)?;
    service.create_device(rear)?;

    let rack_id = catalog.rack.id;
    let front_row = service
        .elevation(rack_id, RackFace::Front, &[], true)?
        .into_iter()
        .find(|u| u.unit == 5)
        .and_then(|u| u.occupant);
    let rear_row = service
        .elevation(rack_id, RackFace::Rear, &[], true)?
        .into_iter()
        .find(|u| u.unit == 5)
        .and_then(|u| u.occupant);
    assert_eq!(front_row, Some(front_id));
    assert_eq!(rear_row, Some(rear_id));

    // A full-depth device fits neither face at U5
    assert!(!service.available_units(rack_id, 1, None, &[])?.contains(&5));
    assert_eq!(service.utilization(rack_id)?, 2);
    Ok(())
}

#[test]
fn test_growing_type_at_rack_top_fails() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    service.create_device(racked(&catalog, &catalog.switch, "sw-top", 42, RackFace::Front))?;

    let mut taller = catalog.switch.clone();
    taller.u_height = 2;
    let err = service.update_device_type(taller).unwrap_err();
    assert_eq!(validation_field(&err), Some("u_height"));
    assert_eq!(service.repository().device_type(catalog.switch.id)?.u_height, 1);

    // Shrinking a type is never blocked
    let mut shorter = catalog.server.clone();
    shorter.u_height = 1;
    service.update_device_type(shorter)?;
    Ok(())
}

#[test]
fn test_type_edit_checks_new_height_and_depth() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    service.create_device(racked(&catalog, &catalog.panel, "pp-a", 10, RackFace::Front))?;
    service.create_device(racked(&catalog, &catalog.panel, "pp-b", 11, RackFace::Rear))?;

    // 2U full depth at U10 would take U11 rear from pp-b
    let mut deeper = catalog.panel.clone().with_full_depth(true);
    deeper.u_height = 2;
    let err = service.update_device_type(deeper).unwrap_err();
    assert_eq!(validation_field(&err), Some("u_height"));

    let stored = service.repository().device_type(catalog.panel.id)?;
    assert_eq!((stored.u_height, stored.is_full_depth), (1, false));
    assert!(service
        .rack_unit_map(catalog.rack.id)?
        .checked_available_units(1, None, &[])
        .is_ok());

    // Same height, but now full depth: two panels back to back at U5 clash
    service.create_device(racked(&catalog, &catalog.panel, "pp-c", 5, RackFace::Front))?;
    service.create_device(racked(&catalog, &catalog.panel, "pp-d", 5, RackFace::Rear))?;
    let err = service
        .update_device_type(catalog.panel.clone().with_full_depth(true))
        .unwrap_err();
    assert_eq!(validation_field(&err), Some("is_full_depth"));
    Ok(())
}

#[test]
fn test_rack_resize_respects_installed_devices() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    service.create_device(racked(&catalog, &catalog.server, "srv1", 40, RackFace::Front))?;

    let err = service.resize_rack(catalog.rack.id, 40).unwrap_err();
    assert_eq!(validation_field(&err), Some("u_height"));
    assert!(err.to_string().contains("41U"));

    let rack = service.resize_rack(catalog.rack.id, 41)?;
    assert_eq!(rack.u_height, 41);
    assert_eq!(service.repository().rack(catalog.rack.id)?.u_height, 41);
    Ok(())
}

#[test]
fn test_create_rack_uses_configured_default() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    let rack = service.create_rack(catalog.site.id, "R102", None)?;
    assert_eq!(rack.u_height, 42);

    let err = service.create_rack(catalog.site.id, "R103", Some(120)).unwrap_err();
    assert_eq!(validation_field(&err), Some("u_height"));

    let err = service.create_rack(catalog.site.id, "R102", Some(10)).unwrap_err();
    assert!(matches!(err, DcimError::Duplicate { .. }));
    Ok(())
}

#[test]
fn test_interface_connections() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    let a = service.create_device(racked(&catalog, &catalog.switch, "sw1", 1, RackFace::Front))?;
    let b = service.create_device(racked(&catalog, &catalog.switch, "sw2", 2, RackFace::Front))?;
    let port = |components: &dcim_inventory::domain::DeviceComponents, name: &str| {
        components
            .interfaces
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.id)
            .expect("interface from template")
    };

    let a0 = port(&a, "ge-0/0/0");
    let b0 = port(&b, "ge-0/0/0");
    let b1 = port(&b, "ge-0/0/1");
    let a_vlan = port(&a, "vlan10");

    let err = service
        .connect_interfaces(a0, a0, ConnectionStatus::Connected)
        .unwrap_err();
    assert_eq!(validation_field(&err), Some("interface_b"));

    let err = service
        .connect_interfaces(a_vlan, b0, ConnectionStatus::Connected)
        .unwrap_err();
    assert_eq!(validation_field(&err), Some("interface_a"));

    service.connect_interfaces(a0, b0, ConnectionStatus::Planned)?;
    assert_eq!(service.peer_interface(a0)?.map(|i| i.id), Some(b0));
    assert_eq!(service.peer_interface(b0)?.map(|i| i.id), Some(a0));

    let err = service
        .connect_interfaces(b1, a0, ConnectionStatus::Connected)
        .unwrap_err();
    assert_eq!(validation_field(&err), Some("interface_b"));

    // A connected interface cannot become virtual
    let mut edited = service.repository().interface(a0)?;
    edited.form_factor = FormFactor::Virtual;
    let err = service.update_interface(edited.clone()).unwrap_err();
    assert_eq!(validation_field(&err), Some("form_factor"));

    service.disconnect_interface(a0)?;
    assert!(!service.is_connected(b0));
    service.update_interface(edited)?;
    Ok(())
}

#[test]
fn test_console_and_power_cabling() -> Result<()> {
    let (mut service, catalog) = seeded_service();

    let mut terminal = DeviceType::new(catalog.manufacturer.id, "CM7148", 1)?;
    terminal.is_console_server = true;
    terminal.is_pdu = true;
    terminal.add_console_server_port("Port 2")?;
    terminal.add_console_server_port("Port 10")?;
    terminal.add_console_server_port("Port 1")?;
    terminal.add_power_outlet("AA10")?;
    terminal.add_power_outlet("AA2")?;
    service.create_device_type(terminal.clone())?;

    let cs = service.create_device(racked(&catalog, &terminal, "cs1", 41, RackFace::Front))?;
    let sw1 = service.create_device(racked(&catalog, &catalog.switch, "sw1", 1, RackFace::Front))?;
    let sw2 = service.create_device(racked(&catalog, &catalog.switch, "sw2", 2, RackFace::Front))?;

    let cs_device = cs.console_server_ports[0].device_id;
    let listed = service.sorted_components(cs_device)?;
    let cs_names: Vec<&str> = listed.console_server_ports.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(cs_names, vec!["Port 1", "Port 2", "Port 10"]);
    let outlet_names: Vec<&str> = listed.power_outlets.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(outlet_names, vec!["AA2", "AA10"]);

    let cs_port = cs.console_server_ports[0].id;
    service.connect_console(sw1.console_ports[0].id, cs_port, ConnectionStatus::Connected)?;
    let err = service
        .connect_console(sw2.console_ports[0].id, cs_port, ConnectionStatus::Connected)
        .unwrap_err();
    assert_eq!(validation_field(&err), Some("cs_port"));

    let outlet = cs.power_outlets[0].id;
    service.connect_power(sw1.power_ports[0].id, outlet, ConnectionStatus::Planned)?;
    let err = service
        .connect_power(sw1.power_ports[1].id, outlet, ConnectionStatus::Planned)
        .unwrap_err();
    assert_eq!(validation_field(&err), Some("power_outlet"));

    // Deleting the console server unplugs the switch
    service.delete_device(cs_device)?;
    let console = service.repository().console_port(sw1.console_ports[0].id)?;
    assert_eq!(console.cs_port, None);
    assert_eq!(console.connection_status, None);
    Ok(())
}

#[test]
fn test_device_type_definition_checked_on_create() {
    let (mut service, catalog) = seeded_service();
    let mut broken = DeviceType::new(catalog.manufacturer.id, "PDU-8", 1).expect("valid type");
    broken.add_power_outlet("AA1").expect("template");

    let err = service.create_device_type(broken).unwrap_err();
    assert_eq!(validation_field(&err), Some("is_pdu"));
}

#[test]
fn test_device_bays_and_parent_moves() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    let chassis = racked(&catalog, &catalog.chassis, "mx1", 1, RackFace::Front);
    let chassis_id = chassis.id;
    let bays = service.create_device(chassis)?.device_bays;
    assert_eq!(bays.len(), 2);

    let blade = unracked(&catalog, &catalog.blade, "mx1-fpc0");
    let blade_id = blade.id;
    service.create_device(blade)?;

    let err = service.install_device(bays[0].id, chassis_id).unwrap_err();
    assert_eq!(validation_field(&err), Some("installed_device"));

    service.install_device(bays[0].id, blade_id)?;
    let children: Vec<_> = service.children(chassis_id)?.into_iter().map(|d| d.id).collect();
    assert_eq!(children, vec![blade_id]);
    assert_eq!(service.parent_bay(blade_id)?.map(|b| b.id), Some(bays[0].id));
    assert_eq!(service.parent_bay(chassis_id)?, None);

    // The same child cannot sit in two bays
    assert!(service.install_device(bays[1].id, blade_id).is_err());

    // Moving the chassis carries its children along
    let other = service.create_rack(catalog.site.id, "R102", None)?;
    service.move_device(chassis_id, other.id, Some(20), Some(RackFace::Front))?;
    assert_eq!(service.repository().device(blade_id)?.rack_id, other.id);

    // A child device never takes a rack face
    let mut misplaced = service.repository().device(blade_id)?;
    misplaced.face = Some(RackFace::Rear);
    let err = service.update_device(misplaced).unwrap_err();
    assert_eq!(validation_field(&err), Some("face"));

    // Deleting the parent empties the relation
    service.delete_device(chassis_id)?;
    assert!(service.parent_bay(blade_id)?.is_none());
    assert!(service.repository().device(blade_id).is_ok());
    Ok(())
}

#[test]
fn test_primary_ip_and_rpc_client() -> Result<()> {
    let (service, catalog) = seeded_service();

    let mut device = racked(&catalog, &catalog.switch, "sw1", 3, RackFace::Front);
    device.platform_id = Some(catalog.platform.id);
    device.primary_ip4 = Some(IpAddressWithCidr::new("192.0.2.10/24")?);
    device.primary_ip6 = Some(IpAddressWithCidr::new("2001:db8::10/64")?);
    let device_id = device.id;

    let config = DcimConfig {
        prefer_ipv4: true,
        ..Default::default()
    };
    let mut service = InventoryService::new(service.into_repository(), config);
    service.create_device(device)?;

    assert_eq!(
        service.primary_ip(device_id)?.map(|ip| ip.to_string()),
        Some("192.0.2.10/24".to_string())
    );
    assert_eq!(service.rpc_client_name(device_id)?, Some("juniper-junos"));
    Ok(())
}

#[test]
fn test_snapshot_reloads_to_same_elevation() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    service.create_device(racked(&catalog, &catalog.server, "srv1", 7, RackFace::Front))?;
    service.create_device(racked(&catalog, &catalog.panel, "pp1", 30, RackFace::Rear))?;

    let json = service.repository().to_json()?;
    let reloaded = InventoryService::new(InMemoryInventory::from_json(&json)?, service.config().clone());

    for face in [RackFace::Front, RackFace::Rear] {
        assert_eq!(
            reloaded.elevation(catalog.rack.id, face, &[], true)?,
            service.elevation(catalog.rack.id, face, &[], true)?
        );
    }
    Ok(())
}

#[test]
fn test_failed_component_insert_leaves_no_device() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    let mut twin_console = DeviceType::new(catalog.manufacturer.id, "Twin Console", 1)?;
    twin_console.templates.console_ports.push(ConsolePortTemplate::new("Console"));
    twin_console.templates.console_ports.push(ConsolePortTemplate::new("Console"));

    let err = service.create_device_type(twin_console.clone()).unwrap_err();
    assert_eq!(validation_field(&err), Some("name"));

    // Stored directly, the definition check is skipped
    service.repository_mut().insert_device_type(twin_console.clone())?;
    let device = racked(&catalog, &twin_console, "console-1", 8, RackFace::Front);
    let device_id = device.id;
    let err = service.create_device(device).unwrap_err();
    assert!(matches!(err, DcimError::Duplicate { entity: "console port", .. }));

    assert!(service.repository().device(device_id).is_err());
    assert!(service.repository().components(device_id).is_empty());
    assert!(service.available_units(catalog.rack.id, 1, None, &[])?.contains(&8));
    Ok(())
}

#[test]
fn test_modules_listed_and_removed_with_device() -> Result<()> {
    let (mut service, catalog) = seeded_service();
    let chassis = racked(&catalog, &catalog.chassis, "mx1", 1, RackFace::Front);
    let chassis_id = chassis.id;
    service.create_device(chassis)?;

    let psu = Module::new(chassis_id, "PEM 1");
    let card = Module::new(chassis_id, "FPC 0")
        .with_manufacturer(catalog.manufacturer.id)
        .with_part("750-031391", "CAAB1234");
    let pic = Module::child_of(&card, "PIC 0");
    let pic_id = pic.id;
    service.add_module(psu)?;
    service.add_module(card)?;
    service.add_module(pic)?;

    let names: Vec<String> = service.modules(chassis_id)?.into_iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["FPC 0", "PEM 1", "PIC 0"]);

    service.delete_device(chassis_id)?;
    assert!(service.repository().modules(chassis_id).is_empty());
    assert!(service.repository().module(pic_id).is_err());
    Ok(())
}
