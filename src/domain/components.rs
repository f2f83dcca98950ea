// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Components and Connections
//!
//! Component instances belong to exactly one device. Console and power links
//! are stored on the consuming side (console port, power port); interface
//! links are symmetric [`InterfaceConnection`] records. A [`DeviceBay`]
//! stores the child device it houses; the inverse lookup is a repository
//! query. A [`Module`] is an inventory record of hardware inside a device,
//! nested under an optional parent module.

use serde::{Deserialize, Serialize};

use super::choices::{ConnectionStatus, FormFactor};
use super::device::DeviceId;
use super::device_type::ManufacturerId;
use super::ids::EntityId;
use super::network::MacAddress;
use crate::ordering::Named;

pub type ConsolePortId = EntityId<ConsolePort>;
pub type ConsoleServerPortId = EntityId<ConsoleServerPort>;
pub type PowerPortId = EntityId<PowerPort>;
pub type PowerOutletId = EntityId<PowerOutlet>;
pub type InterfaceId = EntityId<Interface>;
pub type InterfaceConnectionId = EntityId<InterfaceConnection>;
pub type DeviceBayId = EntityId<DeviceBay>;
pub type ModuleId = EntityId<Module>;

/// Console port on a device; connects to a console server port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolePort {
    pub id: ConsolePortId,
    pub device_id: DeviceId,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cs_port: Option<ConsoleServerPortId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_status: Option<ConnectionStatus>,
}

impl ConsolePort {
    pub fn new(device_id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id: ConsolePortId::new(),
            device_id,
            name: name.into(),
            cs_port: None,
            connection_status: None,
        }
    }
}

/// Port on a console server giving access to a console port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleServerPort {
    pub id: ConsoleServerPortId,
    pub device_id: DeviceId,
    pub name: String,
}

impl ConsoleServerPort {
    pub fn new(device_id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id: ConsoleServerPortId::new(),
            device_id,
            name: name.into(),
        }
    }
}

/// Power supply intake on a device; connects to a power outlet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerPort {
    pub id: PowerPortId,
    pub device_id: DeviceId,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_outlet: Option<PowerOutletId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_status: Option<ConnectionStatus>,
}

impl PowerPort {
    pub fn new(device_id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id: PowerPortId::new(),
            device_id,
            name: name.into(),
            power_outlet: None,
            connection_status: None,
        }
    }
}

/// Outlet on a PDU feeding a power port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerOutlet {
    pub id: PowerOutletId,
    pub device_id: DeviceId,
    pub name: String,
}

impl PowerOutlet {
    pub fn new(device_id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id: PowerOutletId::new(),
            device_id,
            name: name.into(),
        }
    }
}

/// Data interface on a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub id: InterfaceId,
    pub device_id: DeviceId,
    pub name: String,

    #[serde(default)]
    pub form_factor: FormFactor,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<MacAddress>,

    /// Used only for out-of-band management
    #[serde(default)]
    pub mgmt_only: bool,

    #[serde(default)]
    pub description: String,
}

impl Interface {
    pub fn new(device_id: DeviceId, name: impl Into<String>, form_factor: FormFactor) -> Self {
        Self {
            id: InterfaceId::new(),
            device_id,
            name: name.into(),
            form_factor,
            mac_address: None,
            mgmt_only: false,
            description: String::new(),
        }
    }

    pub fn is_physical(&self) -> bool {
        !self.form_factor.is_virtual()
    }
}

/// Symmetric one-to-one link between two interfaces
///
/// There is no difference in meaning between the `a` and `b` ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConnection {
    pub id: InterfaceConnectionId,
    pub interface_a: InterfaceId,
    pub interface_b: InterfaceId,
    #[serde(default)]
    pub connection_status: ConnectionStatus,
}

impl InterfaceConnection {
    pub fn new(interface_a: InterfaceId, interface_b: InterfaceId, connection_status: ConnectionStatus) -> Self {
        Self {
            id: InterfaceConnectionId::new(),
            interface_a,
            interface_b,
            connection_status,
        }
    }

    pub fn involves(&self, interface: InterfaceId) -> bool {
        self.interface_a == interface || self.interface_b == interface
    }

    /// The far end as seen from `interface`, if it is one of the two ends
    pub fn peer_of(&self, interface: InterfaceId) -> Option<InterfaceId> {
        if self.interface_a == interface {
            Some(self.interface_b)
        } else if self.interface_b == interface {
            Some(self.interface_a)
        } else {
            None
        }
    }
}

/// Slot in a parent device that can house one child device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceBay {
    pub id: DeviceBayId,
    pub device_id: DeviceId,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_device: Option<DeviceId>,
}

impl DeviceBay {
    pub fn new(device_id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id: DeviceBayId::new(),
            device_id,
            name: name.into(),
            installed_device: None,
        }
    }
}

/// Hardware inside a device (line card, power supply), tracked for inventory
///
/// Names are unique per `(device, parent)`. Deleting a module deletes its
/// submodules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub device_id: DeviceId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ModuleId>,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<ManufacturerId>,

    #[serde(default)]
    pub part_id: String,
    #[serde(default)]
    pub serial: String,

    /// Found by an inventory sweep rather than entered by hand
    #[serde(default)]
    pub discovered: bool,
}

impl Module {
    pub fn new(device_id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id: ModuleId::new(),
            device_id,
            parent_id: None,
            name: name.into(),
            manufacturer_id: None,
            part_id: String::new(),
            serial: String::new(),
            discovered: false,
        }
    }

    /// Submodule of `parent`, on the parent's device
    pub fn child_of(parent: &Module, name: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent.id),
            ..Self::new(parent.device_id, name)
        }
    }

    pub fn with_manufacturer(mut self, manufacturer_id: ManufacturerId) -> Self {
        self.manufacturer_id = Some(manufacturer_id);
        self
    }

    pub fn with_part(mut self, part_id: impl Into<String>, serial: impl Into<String>) -> Self {
        self.part_id = part_id.into();
        self.serial = serial.into();
        self
    }
}

macro_rules! named_component {
    ($($component:ident),+) => {
        $(
            impl Named for $component {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

named_component!(
    ConsolePort,
    ConsoleServerPort,
    PowerPort,
    PowerOutlet,
    Interface,
    DeviceBay,
    Module
);

/// Complete component set of one device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceComponents {
    pub console_ports: Vec<ConsolePort>,
    pub console_server_ports: Vec<ConsoleServerPort>,
    pub power_ports: Vec<PowerPort>,
    pub power_outlets: Vec<PowerOutlet>,
    pub interfaces: Vec<Interface>,
    pub device_bays: Vec<DeviceBay>,
}

impl DeviceComponents {
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
}
