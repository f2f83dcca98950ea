// Copyright (c) 2025 - Cowboy AI, Inc.
//! Placement Validation
//!
//! Checks run before a mutation is committed: placing or moving a device,
//! resizing a rack, growing a device type, connecting components and
//! installing a child into a device bay.
//!
//! Every check is a pure function over a snapshot and returns a field-scoped
//! [`ValidationError`]. Checks that consult rack occupancy use
//! [`RackUnitMap::checked_available_units`], so a pre-existing overlap blocks
//! the mutation instead of being silently accepted.

use tracing::debug;

use crate::domain::invariants::validate_rack_height;
use crate::domain::{
    ConsolePort, ConsoleServerPort, Device, DeviceBay, DeviceType, Interface, InterfaceConnection,
    PowerOutlet, PowerPort, RackFace, ValidationError, ValidationResult,
};
use crate::rack_units::RackUnitMap;

/// Face whose units a device of `device_type` needs (`None` = both)
pub fn effective_face(device: &Device, device_type: &DeviceType) -> Option<RackFace> {
    if device_type.is_full_depth {
        None
    } else {
        device.face
    }
}

/// Validate a device's `(rack, position, face)` against its rack
///
/// # Rules
/// - A position above 0 requires a face
/// - Child devices take neither a face nor a position
/// - The device must be in the map's rack
/// - A position above 0 must be a start unit with room for the whole device,
///   ignoring the device itself
pub fn validate_device_placement(
    map: &RackUnitMap,
    device: &Device,
    device_type: &DeviceType,
) -> ValidationResult {
    if device.occupies_units() && device.face.is_none() {
        return Err(ValidationError::constraint(
            "face",
            "Must specify rack face when defining rack position.",
        ));
    }

    if device_type.is_child_device() {
        if device.face.is_some() {
            return Err(ValidationError::constraint(
                "face",
                "Child device types cannot be assigned to a rack face. This is an attribute of \
                 the parent device.",
            ));
        }
        if device.position.is_some() {
            return Err(ValidationError::constraint(
                "position",
                "Child device types cannot be assigned to a rack position. This is an attribute \
                 of the parent device.",
            ));
        }
    }

    if device.rack_id != map.rack_id() {
        return Err(ValidationError::constraint(
            "rack",
            "Rack snapshot does not match the device's rack.",
        ));
    }

    let Some(position) = device.position.filter(|p| *p > 0) else {
        return Ok(());
    };

    let face = effective_face(device, device_type);
    let available = map
        .checked_available_units(device_type.u_height, face, &[device.id])
        .map_err(|e| e.with_field("position"))?;

    debug!(
        device_id = %device.id,
        position,
        u_height = device_type.u_height,
        candidates = available.len(),
        "Checked device placement"
    );

    if !available.contains(&position) {
        return Err(ValidationError::constraint(
            "position",
            format!(
                "U{} is already occupied or does not have sufficient space to accommodate a(n) \
                 {} ({}U).",
                position, device_type.model, device_type.u_height
            ),
        ));
    }

    Ok(())
}

/// Validate a new rack height against installed devices
pub fn validate_rack_resize(map: &RackUnitMap, new_height: u16, max_height: u16) -> ValidationResult {
    validate_rack_height(new_height, max_height)?;

    if let Some(top) = map.highest_occupied_unit() {
        if top > new_height {
            return Err(ValidationError::constraint(
                "u_height",
                format!(
                    "Rack must be at least {}U tall to house currently installed devices.",
                    top
                ),
            ));
        }
    }

    Ok(())
}

/// Validate a device type edit against every placed instance
///
/// `instances` pairs each device of the type with a map of its own rack.
/// Placements are re-checked with the edited height and depth when the type
/// grows or becomes full depth. Any other edit passes.
pub fn validate_device_type_resize<'a>(
    current: &DeviceType,
    updated: &DeviceType,
    instances: impl IntoIterator<Item = (&'a Device, &'a RackUnitMap)>,
) -> ValidationResult {
    let grows = updated.u_height > current.u_height;
    let deepens = updated.is_full_depth && !current.is_full_depth;
    if !grows && !deepens {
        return Ok(());
    }
    let field = if grows { "u_height" } else { "is_full_depth" };

    for (device, map) in instances {
        let Some(position) = device.position.filter(|p| *p > 0) else {
            continue;
        };

        let face = effective_face(device, updated);
        let available = map
            .checked_available_units(updated.u_height, face, &[device.id])
            .map_err(|e| e.with_field(field))?;

        if !available.contains(&position) {
            return Err(ValidationError::constraint(
                field,
                format!(
                    "Device {} in rack U{} does not have sufficient space to accommodate a height \
                     of {}U.",
                    device.identifier(),
                    position,
                    updated.u_height
                ),
            ));
        }
    }

    Ok(())
}

/// Validate a new link between two interfaces
///
/// `existing` holds the current interface connections.
pub fn validate_interface_connection(
    interface_a: &Interface,
    interface_b: &Interface,
    existing: &[InterfaceConnection],
) -> ValidationResult {
    if interface_a.id == interface_b.id {
        return Err(ValidationError::constraint(
            "interface_b",
            "Cannot connect an interface to itself.",
        ));
    }

    for (field, interface) in [("interface_a", interface_a), ("interface_b", interface_b)] {
        if !interface.is_physical() {
            return Err(ValidationError::constraint(
                field,
                format!("Virtual interface {} cannot be connected.", interface.name),
            ));
        }
        if existing.iter().any(|c| c.involves(interface.id)) {
            return Err(ValidationError::constraint(
                field,
                format!("Interface {} is already connected.", interface.name),
            ));
        }
    }

    Ok(())
}

/// Validate an interface edit; `interface` carries the new form factor
pub fn validate_interface_form_factor(interface: &Interface, is_connected: bool) -> ValidationResult {
    if !interface.is_physical() && is_connected {
        return Err(ValidationError::constraint(
            "form_factor",
            "Virtual interfaces cannot be connected to another interface. Delete the connection \
             first.",
        ));
    }
    Ok(())
}

/// Validate installing `child` into `bay` of a device of type `parent_type`
pub fn validate_device_bay_install(
    parent_type: &DeviceType,
    bay: &DeviceBay,
    child: &Device,
) -> ValidationResult {
    if !parent_type.is_parent_device() {
        return Err(ValidationError::constraint(
            "device",
            format!(
                "This type of device ({}) does not support device bays.",
                parent_type.model
            ),
        ));
    }

    if child.id == bay.device_id {
        return Err(ValidationError::constraint(
            "installed_device",
            "Cannot install a device into itself.",
        ));
    }

    Ok(())
}

/// Validate cabling `console_port` to `cs_port`
///
/// `console_ports` holds every console port known to the caller.
pub fn validate_console_connection(
    console_port: &ConsolePort,
    cs_port: &ConsoleServerPort,
    console_ports: &[ConsolePort],
) -> ValidationResult {
    let taken = console_ports
        .iter()
        .any(|p| p.id != console_port.id && p.cs_port == Some(cs_port.id));
    if taken {
        return Err(ValidationError::constraint(
            "cs_port",
            format!("Console server port {} is already connected.", cs_port.name),
        ));
    }
    Ok(())
}

/// Validate cabling `power_port` to `outlet`
pub fn validate_power_connection(
    power_port: &PowerPort,
    outlet: &PowerOutlet,
    power_ports: &[PowerPort],
) -> ValidationResult {
    let taken = power_ports
        .iter()
        .any(|p| p.id != power_port.id && p.power_outlet == Some(outlet.id));
    if taken {
        return Err(ValidationError::constraint(
            "power_outlet",
            format!("Power outlet {} is already connected.", outlet.name),
        ));
    }
    Ok(())
}
