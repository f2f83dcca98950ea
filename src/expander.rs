// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Type Expansion
//!
//! Copies a device type's component templates into the components of a new
//! device. Expansion happens once, when the device is created; editing the
//! templates later does not touch existing devices.
//!
//! The two halves are separate so the component list can be inspected or
//! validated before any identity is minted:
//!
//! ```rust
//! use dcim_inventory::domain::{DeviceId, DeviceType, FormFactor, ManufacturerId};
//! use dcim_inventory::expander::expand_device_type;
//!
//! let mut switch = DeviceType::new(ManufacturerId::new(), "EX2300-24T", 1).unwrap();
//! switch.add_interface("ge-0/0/0", FormFactor::Fixed1Ge, false).unwrap();
//! switch.add_power_port("PSU0").unwrap();
//!
//! let components = expand_device_type(&switch).instantiate(DeviceId::new());
//! assert_eq!(components.interfaces[0].name, "ge-0/0/0");
//! assert_eq!(components.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{
    ConsolePort, ConsoleServerPort, DeviceBay, DeviceComponents, DeviceId, DeviceType, FormFactor,
    Interface, PowerOutlet, PowerPort,
};

/// Interface to create on a new device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSpec {
    pub name: String,
    pub form_factor: FormFactor,
    pub mgmt_only: bool,
}

/// Components to create on a new device, in template order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpecs {
    pub console_ports: Vec<String>,
    pub console_server_ports: Vec<String>,
    pub power_ports: Vec<String>,
    pub power_outlets: Vec<String>,
    pub interfaces: Vec<InterfaceSpec>,
    pub device_bays: Vec<String>,
}

fn names<T: crate::ordering::Named>(templates: &[T]) -> Vec<String> {
    templates.iter().map(|t| t.name().to_string()).collect()
}

/// Read the component templates of `device_type`
pub fn expand_device_type(device_type: &DeviceType) -> ComponentSpecs {
    let templates = &device_type.templates;
    ComponentSpecs {
        console_ports: names(&templates.console_ports),
        console_server_ports: names(&templates.console_server_ports),
        power_ports: names(&templates.power_ports),
        power_outlets: names(&templates.power_outlets),
        interfaces: templates
            .interfaces
            .iter()
            .map(|t| InterfaceSpec {
                name: t.name.clone(),
                form_factor: t.form_factor,
                mgmt_only: t.mgmt_only,
            })
            .collect(),
        device_bays: names(&templates.device_bays),
    }
}

impl ComponentSpecs {
    pub fn len(&self) -> usize {
        self.console_ports.len()
            + self.console_server_ports.len()
            + self.power_ports.len()
            + self.power_outlets.len()
            + self.interfaces.len()
            + self.device_bays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create components with fresh identities bound to `device_id`
    pub fn instantiate(&self, device_id: DeviceId) -> DeviceComponents {
        DeviceComponents {
            console_ports: self
                .console_ports
                .iter()
                .map(|name| ConsolePort::new(device_id, name.as_str()))
                .collect(),
            console_server_ports: self
                .console_server_ports
                .iter()
                .map(|name| ConsoleServerPort::new(device_id, name.as_str()))
                .collect(),
            power_ports: self
                .power_ports
                .iter()
                .map(|name| PowerPort::new(device_id, name.as_str()))
                .collect(),
            power_outlets: self
                .power_outlets
                .iter()
                .map(|name| PowerOutlet::new(device_id, name.as_str()))
                .collect(),
            interfaces: self
                .interfaces
                .iter()
                .map(|spec| {
                    let mut interface = Interface::new(device_id, spec.name.as_str(), spec.form_factor);
                    interface.mgmt_only = spec.mgmt_only;
                    interface
                })
                .collect(),
            device_bays: self
                .device_bays
                .iter()
                .map(|name| DeviceBay::new(device_id, name.as_str()))
                .collect(),
        }
    }
}
