// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Repository
//!
//! The storage seam of the crate. [`InventoryRepository`] is what the
//! service layer reads occupancy and templates from and writes accepted
//! mutations to; [`InMemoryInventory`] is the reference implementation, also
//! used for JSON snapshots.
//!
//! # Constraints enforced on write
//!
//! 1. **References**: racks, device types, roles, platforms and tenants named
//!    by a device must exist
//! 2. **Uniqueness**: one device per `(rack, position, face)`; device names and
//!    asset tags; rack names per site; device type models per manufacturer;
//!    component names per device and kind; one connection per endpoint
//! 3. **Cascades**: deleting a device removes its components, modules and
//!    their connections and empties any bay that housed it; deleting a
//!    component removes its connections only; deleting a module removes its
//!    submodules
//!
//! Snapshots loaded with [`InMemoryInventory::from_json`] are checked for
//! rack heights and device type definitions before use.
//!
//! Occupancy rules (overlaps, rack bounds) are not checked here; see
//! [`crate::placement`].

use std::collections::HashSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    ConsolePort, ConsolePortId, ConsoleServerPort, ConsoleServerPortId, Device, DeviceBay,
    DeviceBayId, DeviceComponents, DeviceId, DeviceRole, DeviceRoleId, DeviceType, DeviceTypeId,
    Interface, InterfaceConnection, InterfaceConnectionId, InterfaceId, Manufacturer,
    ManufacturerId, Module, ModuleId, Platform, PlatformId, PowerOutlet, PowerOutletId, PowerPort, PowerPortId, Rack,
    RackGroup, RackId, RackRole, Site, SiteId, Tenant, TenantId,
};
use crate::domain::invariants::{
    validate_device_type_definition, validate_name, validate_rack_height, MAX_RACK_HEIGHT,
};
use crate::errors::{DcimError, DcimResult};
use crate::ordering::Named;

/// Storage interface for inventory entities
///
/// Reads return owned values; writes validate references and uniqueness
/// and apply cascades.
pub trait InventoryRepository {
    fn site(&self, id: SiteId) -> DcimResult<Site>;
    fn rack(&self, id: RackId) -> DcimResult<Rack>;
    fn manufacturer(&self, id: ManufacturerId) -> DcimResult<Manufacturer>;
    fn device_type(&self, id: DeviceTypeId) -> DcimResult<DeviceType>;
    fn device_role(&self, id: DeviceRoleId) -> DcimResult<DeviceRole>;
    fn platform(&self, id: PlatformId) -> DcimResult<Platform>;
    fn device(&self, id: DeviceId) -> DcimResult<Device>;

    fn racks(&self) -> Vec<Rack>;

    /// Every device assigned to the rack, slotted or not
    fn devices_in_rack(&self, rack_id: RackId) -> Vec<Device>;

    fn devices_of_type(&self, device_type_id: DeviceTypeId) -> Vec<Device>;

    /// Components of one device, in insertion order
    fn components(&self, device_id: DeviceId) -> DeviceComponents;

    fn interface(&self, id: InterfaceId) -> DcimResult<Interface>;
    fn console_port(&self, id: ConsolePortId) -> DcimResult<ConsolePort>;
    fn console_server_port(&self, id: ConsoleServerPortId) -> DcimResult<ConsoleServerPort>;
    fn power_port(&self, id: PowerPortId) -> DcimResult<PowerPort>;
    fn power_outlet(&self, id: PowerOutletId) -> DcimResult<PowerOutlet>;
    fn device_bay(&self, id: DeviceBayId) -> DcimResult<DeviceBay>;
    fn module(&self, id: ModuleId) -> DcimResult<Module>;

    /// Modules of one device, in insertion order
    fn modules(&self, device_id: DeviceId) -> Vec<Module>;

    /// The connection an interface takes part in, if any
    fn interface_connection(&self, interface_id: InterfaceId) -> Option<InterfaceConnection>;

    fn interface_connections(&self) -> Vec<InterfaceConnection>;

    /// Console ports cabled to `cs_port`
    fn console_ports_on(&self, cs_port: ConsoleServerPortId) -> Vec<ConsolePort>;

    /// Power ports fed by `outlet`
    fn power_ports_on(&self, outlet: PowerOutletId) -> Vec<PowerPort>;

    /// Bay housing `device_id`, if it is installed in one
    fn parent_bay(&self, device_id: DeviceId) -> Option<DeviceBay>;

    /// Devices installed in the bays of `device_id`
    fn children(&self, device_id: DeviceId) -> Vec<Device>;

    /// RPC client name of the device's platform
    fn rpc_client_name(&self, device_id: DeviceId) -> DcimResult<Option<&'static str>> {
        let device = self.device(device_id)?;
        match device.platform_id {
            Some(platform_id) => Ok(self.platform(platform_id)?.rpc_client.map(|c| c.name())),
            None => Ok(None),
        }
    }

    fn insert_tenant(&mut self, tenant: Tenant) -> DcimResult<()>;
    fn insert_site(&mut self, site: Site) -> DcimResult<()>;
    fn insert_rack_group(&mut self, group: RackGroup) -> DcimResult<()>;
    fn insert_rack_role(&mut self, role: RackRole) -> DcimResult<()>;
    fn insert_rack(&mut self, rack: Rack) -> DcimResult<()>;
    fn update_rack(&mut self, rack: Rack) -> DcimResult<()>;
    fn insert_manufacturer(&mut self, manufacturer: Manufacturer) -> DcimResult<()>;
    fn insert_device_type(&mut self, device_type: DeviceType) -> DcimResult<()>;
    fn update_device_type(&mut self, device_type: DeviceType) -> DcimResult<()>;
    fn insert_device_role(&mut self, role: DeviceRole) -> DcimResult<()>;
    fn insert_platform(&mut self, platform: Platform) -> DcimResult<()>;

    fn insert_device(&mut self, device: Device) -> DcimResult<()>;
    fn update_device(&mut self, device: Device) -> DcimResult<()>;

    /// Remove a device with its components and connections
    fn delete_device(&mut self, id: DeviceId) -> DcimResult<()>;

    /// Add components to an existing device
    fn insert_components(&mut self, device_id: DeviceId, components: DeviceComponents) -> DcimResult<()>;

    fn update_interface(&mut self, interface: Interface) -> DcimResult<()>;
    fn delete_interface(&mut self, id: InterfaceId) -> DcimResult<()>;
    fn insert_interface_connection(&mut self, connection: InterfaceConnection) -> DcimResult<()>;
    fn delete_interface_connection(&mut self, id: InterfaceConnectionId) -> DcimResult<()>;

    fn update_console_port(&mut self, port: ConsolePort) -> DcimResult<()>;
    fn delete_console_server_port(&mut self, id: ConsoleServerPortId) -> DcimResult<()>;
    fn update_power_port(&mut self, port: PowerPort) -> DcimResult<()>;
    fn delete_power_outlet(&mut self, id: PowerOutletId) -> DcimResult<()>;
    fn update_device_bay(&mut self, bay: DeviceBay) -> DcimResult<()>;

    fn insert_module(&mut self, module: Module) -> DcimResult<()>;

    /// Remove a module with all of its submodules
    fn delete_module(&mut self, id: ModuleId) -> DcimResult<()>;
}

/// Entity with a typed identity
trait Identified {
    type Id: Copy + PartialEq + Display;
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;
}

macro_rules! identified {
    ($($entity:ty => $id:ty, $label:literal);+ $(;)?) => {
        $(
            impl Identified for $entity {
                type Id = $id;
                const ENTITY: &'static str = $label;

                fn id(&self) -> Self::Id {
                    self.id
                }
            }
        )+
    };
}

identified! {
    Tenant => TenantId, "tenant";
    Site => SiteId, "site";
    RackGroup => crate::domain::RackGroupId, "rack group";
    RackRole => crate::domain::RackRoleId, "rack role";
    Rack => RackId, "rack";
    Manufacturer => ManufacturerId, "manufacturer";
    DeviceType => DeviceTypeId, "device type";
    DeviceRole => DeviceRoleId, "device role";
    Platform => PlatformId, "platform";
    Device => DeviceId, "device";
    ConsolePort => ConsolePortId, "console port";
    ConsoleServerPort => ConsoleServerPortId, "console server port";
    PowerPort => PowerPortId, "power port";
    PowerOutlet => PowerOutletId, "power outlet";
    Interface => InterfaceId, "interface";
    InterfaceConnection => InterfaceConnectionId, "interface connection";
    DeviceBay => DeviceBayId, "device bay";
    Module => ModuleId, "module";
}

/// Component owned by a device
trait Component: Identified + Named {
    fn device_id(&self) -> DeviceId;
}

macro_rules! component {
    ($($component:ty),+) => {
        $(
            impl Component for $component {
                fn device_id(&self) -> DeviceId {
                    self.device_id
                }
            }
        )+
    };
}

component!(ConsolePort, ConsoleServerPort, PowerPort, PowerOutlet, Interface, DeviceBay);

fn lookup<T: Identified>(items: &[T], id: T::Id) -> DcimResult<&T> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| DcimError::not_found(T::ENTITY, id))
}

fn position_of<T: Identified>(items: &[T], id: T::Id) -> DcimResult<usize> {
    items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| DcimError::not_found(T::ENTITY, id))
}

fn ensure_absent<T: Identified>(items: &[T], id: T::Id) -> DcimResult<()> {
    if items.iter().any(|item| item.id() == id) {
        return Err(DcimError::duplicate(T::ENTITY, format!("id {} already exists", id)));
    }
    Ok(())
}

fn replace<T: Identified>(items: &mut [T], item: T) -> DcimResult<()> {
    let index = position_of(items, item.id())?;
    items[index] = item;
    Ok(())
}

fn owned_by<T: Component + Clone>(items: &[T], device_id: DeviceId) -> Vec<T> {
    items
        .iter()
        .filter(|c| c.device_id() == device_id)
        .cloned()
        .collect()
}

/// Names of `new` must not clash with each other or with `existing` on the same device
fn ensure_unique_names<T: Component>(existing: &[T], device_id: DeviceId, new: &[T]) -> DcimResult<()> {
    let mut seen: HashSet<&str> = existing
        .iter()
        .filter(|c| c.device_id() == device_id)
        .map(|c| c.name())
        .collect();

    for component in new {
        if component.device_id() != device_id {
            return Err(DcimError::InvalidValue(format!(
                "{} {} belongs to device {}, not {}",
                T::ENTITY,
                component.name(),
                component.device_id(),
                device_id
            )));
        }
        if !seen.insert(component.name()) {
            return Err(DcimError::duplicate(
                T::ENTITY,
                format!("name {:?} already exists on device {}", component.name(), device_id),
            ));
        }
    }
    Ok(())
}

/// Renaming `component` must not clash with siblings of the same kind
fn ensure_unique_rename<T: Component>(existing: &[T], component: &T) -> DcimResult<()> {
    let clash = existing.iter().any(|c| {
        c.id() != component.id() && c.device_id() == component.device_id() && c.name() == component.name()
    });
    if clash {
        return Err(DcimError::duplicate(
            T::ENTITY,
            format!("name {:?} already exists on device {}", component.name(), component.device_id()),
        ));
    }
    Ok(())
}

/// In-memory inventory; serializes to and from a JSON snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryInventory {
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub rack_groups: Vec<RackGroup>,
    #[serde(default)]
    pub rack_roles: Vec<RackRole>,
    #[serde(default)]
    pub racks: Vec<Rack>,
    #[serde(default)]
    pub manufacturers: Vec<Manufacturer>,
    #[serde(default)]
    pub device_types: Vec<DeviceType>,
    #[serde(default)]
    pub device_roles: Vec<DeviceRole>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub console_ports: Vec<ConsolePort>,
    #[serde(default)]
    pub console_server_ports: Vec<ConsoleServerPort>,
    #[serde(default)]
    pub power_ports: Vec<PowerPort>,
    #[serde(default)]
    pub power_outlets: Vec<PowerOutlet>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub interface_connections: Vec<InterfaceConnection>,
    #[serde(default)]
    pub device_bays: Vec<DeviceBay>,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot, rejecting out-of-range racks and invalid device types
    pub fn from_json(json: &str) -> DcimResult<Self> {
        let inventory: Self = serde_json::from_str(json)?;
        for rack in &inventory.racks {
            validate_rack_height(rack.u_height, MAX_RACK_HEIGHT)?;
        }
        for device_type in &inventory.device_types {
            validate_device_type_definition(device_type)?;
        }
        debug!(
            racks = inventory.racks.len(),
            devices = inventory.devices.len(),
            "Loaded inventory snapshot"
        );
        Ok(inventory)
    }

    pub fn to_json(&self) -> DcimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_device_references(&self, device: &Device) -> DcimResult<()> {
        lookup(&self.racks, device.rack_id)?;
        lookup(&self.device_types, device.device_type_id)?;
        lookup(&self.device_roles, device.device_role_id)?;
        if let Some(platform_id) = device.platform_id {
            lookup(&self.platforms, platform_id)?;
        }
        if let Some(tenant_id) = device.tenant_id {
            lookup(&self.tenants, tenant_id)?;
        }
        Ok(())
    }

    fn check_device_unique(&self, device: &Device) -> DcimResult<()> {
        for other in self.devices.iter().filter(|d| d.id != device.id) {
            if let (Some(position), Some(face)) = (device.position, device.face) {
                if other.rack_id == device.rack_id
                    && other.position == Some(position)
                    && other.face == Some(face)
                {
                    return Err(DcimError::duplicate(
                        "device",
                        format!("U{} ({}) of rack {} is taken by {}", position, face, device.rack_id, other.identifier()),
                    ));
                }
            }
            if device.name.is_some() && other.name == device.name {
                return Err(DcimError::duplicate(
                    "device",
                    format!("name {:?} is in use", device.name.as_deref().unwrap_or_default()),
                ));
            }
            if device.asset_tag.is_some() && other.asset_tag == device.asset_tag {
                return Err(DcimError::duplicate(
                    "device",
                    format!("asset tag {:?} is in use", device.asset_tag.as_deref().unwrap_or_default()),
                ));
            }
        }
        Ok(())
    }

    fn check_rack_unique(&self, rack: &Rack) -> DcimResult<()> {
        let clash = self
            .racks
            .iter()
            .any(|r| r.id != rack.id && r.site_id == rack.site_id && r.name == rack.name);
        if clash {
            return Err(DcimError::duplicate(
                "rack",
                format!("name {:?} is in use at site {}", rack.name, rack.site_id),
            ));
        }
        Ok(())
    }

    fn check_device_type_unique(&self, device_type: &DeviceType) -> DcimResult<()> {
        let clash = self.device_types.iter().any(|t| {
            t.id != device_type.id
                && t.manufacturer_id == device_type.manufacturer_id
                && t.model == device_type.model
        });
        if clash {
            return Err(DcimError::duplicate(
                "device type",
                format!("model {:?} already exists for this manufacturer", device_type.model),
            ));
        }
        Ok(())
    }

    fn disconnect_interfaces(&mut self, interfaces: &HashSet<InterfaceId>) -> usize {
        let before = self.interface_connections.len();
        self.interface_connections
            .retain(|c| !interfaces.contains(&c.interface_a) && !interfaces.contains(&c.interface_b));
        before - self.interface_connections.len()
    }

    fn unplug_console_server_ports(&mut self, ports: &HashSet<ConsoleServerPortId>) {
        for port in &mut self.console_ports {
            if port.cs_port.is_some_and(|id| ports.contains(&id)) {
                port.cs_port = None;
                port.connection_status = None;
            }
        }
    }

    fn check_module_unique(&self, module: &Module) -> DcimResult<()> {
        let clash = self.modules.iter().any(|m| {
            m.device_id == module.device_id && m.parent_id == module.parent_id && m.name == module.name
        });
        if clash {
            return Err(DcimError::duplicate(
                "module",
                format!("name {:?} already exists at this level of device {}", module.name, module.device_id),
            ));
        }
        Ok(())
    }

    fn unplug_power_outlets(&mut self, outlets: &HashSet<PowerOutletId>) {
        for port in &mut self.power_ports {
            if port.power_outlet.is_some_and(|id| outlets.contains(&id)) {
                port.power_outlet = None;
                port.connection_status = None;
            }
        }
    }
}

impl InventoryRepository for InMemoryInventory {
    fn site(&self, id: SiteId) -> DcimResult<Site> {
        lookup(&self.sites, id).cloned()
    }

    fn rack(&self, id: RackId) -> DcimResult<Rack> {
        lookup(&self.racks, id).cloned()
    }

    fn manufacturer(&self, id: ManufacturerId) -> DcimResult<Manufacturer> {
        lookup(&self.manufacturers, id).cloned()
    }

    fn device_type(&self, id: DeviceTypeId) -> DcimResult<DeviceType> {
        lookup(&self.device_types, id).cloned()
    }

    fn device_role(&self, id: DeviceRoleId) -> DcimResult<DeviceRole> {
        lookup(&self.device_roles, id).cloned()
    }

    fn platform(&self, id: PlatformId) -> DcimResult<Platform> {
        lookup(&self.platforms, id).cloned()
    }

    fn device(&self, id: DeviceId) -> DcimResult<Device> {
        lookup(&self.devices, id).cloned()
    }

    fn racks(&self) -> Vec<Rack> {
        self.racks.clone()
    }

    fn devices_in_rack(&self, rack_id: RackId) -> Vec<Device> {
        self.devices
            .iter()
            .filter(|d| d.rack_id == rack_id)
            .cloned()
            .collect()
    }

    fn devices_of_type(&self, device_type_id: DeviceTypeId) -> Vec<Device> {
        self.devices
            .iter()
            .filter(|d| d.device_type_id == device_type_id)
            .cloned()
            .collect()
    }

    fn components(&self, device_id: DeviceId) -> DeviceComponents {
        DeviceComponents {
            console_ports: owned_by(&self.console_ports, device_id),
            console_server_ports: owned_by(&self.console_server_ports, device_id),
            power_ports: owned_by(&self.power_ports, device_id),
            power_outlets: owned_by(&self.power_outlets, device_id),
            interfaces: owned_by(&self.interfaces, device_id),
            device_bays: owned_by(&self.device_bays, device_id),
        }
    }

    fn interface(&self, id: InterfaceId) -> DcimResult<Interface> {
        lookup(&self.interfaces, id).cloned()
    }

    fn console_port(&self, id: ConsolePortId) -> DcimResult<ConsolePort> {
        lookup(&self.console_ports, id).cloned()
    }

    fn console_server_port(&self, id: ConsoleServerPortId) -> DcimResult<ConsoleServerPort> {
        lookup(&self.console_server_ports, id).cloned()
    }

    fn power_port(&self, id: PowerPortId) -> DcimResult<PowerPort> {
        lookup(&self.power_ports, id).cloned()
    }

    fn power_outlet(&self, id: PowerOutletId) -> DcimResult<PowerOutlet> {
        lookup(&self.power_outlets, id).cloned()
    }

    fn device_bay(&self, id: DeviceBayId) -> DcimResult<DeviceBay> {
        lookup(&self.device_bays, id).cloned()
    }

    fn module(&self, id: ModuleId) -> DcimResult<Module> {
        lookup(&self.modules, id).cloned()
    }

    fn modules(&self, device_id: DeviceId) -> Vec<Module> {
        self.modules
            .iter()
            .filter(|m| m.device_id == device_id)
            .cloned()
            .collect()
    }

    fn interface_connection(&self, interface_id: InterfaceId) -> Option<InterfaceConnection> {
        self.interface_connections
            .iter()
            .find(|c| c.involves(interface_id))
            .cloned()
    }

    fn interface_connections(&self) -> Vec<InterfaceConnection> {
        self.interface_connections.clone()
    }

    fn console_ports_on(&self, cs_port: ConsoleServerPortId) -> Vec<ConsolePort> {
        self.console_ports
            .iter()
            .filter(|p| p.cs_port == Some(cs_port))
            .cloned()
            .collect()
    }

    fn power_ports_on(&self, outlet: PowerOutletId) -> Vec<PowerPort> {
        self.power_ports
            .iter()
            .filter(|p| p.power_outlet == Some(outlet))
            .cloned()
            .collect()
    }

    fn parent_bay(&self, device_id: DeviceId) -> Option<DeviceBay> {
        self.device_bays
            .iter()
            .find(|b| b.installed_device == Some(device_id))
            .cloned()
    }

    fn children(&self, device_id: DeviceId) -> Vec<Device> {
        let installed: HashSet<DeviceId> = self
            .device_bays
            .iter()
            .filter(|b| b.device_id == device_id)
            .filter_map(|b| b.installed_device)
            .collect();
        self.devices
            .iter()
            .filter(|d| installed.contains(&d.id))
            .cloned()
            .collect()
    }

    fn insert_tenant(&mut self, tenant: Tenant) -> DcimResult<()> {
        ensure_absent(&self.tenants, tenant.id)?;
        self.tenants.push(tenant);
        Ok(())
    }

    fn insert_site(&mut self, site: Site) -> DcimResult<()> {
        ensure_absent(&self.sites, site.id)?;
        if self.sites.iter().any(|s| s.slug == site.slug) {
            return Err(DcimError::duplicate("site", format!("slug {} is in use", site.slug)));
        }
        if let Some(tenant_id) = site.tenant_id {
            lookup(&self.tenants, tenant_id)?;
        }
        self.sites.push(site);
        Ok(())
    }

    fn insert_rack_group(&mut self, group: RackGroup) -> DcimResult<()> {
        ensure_absent(&self.rack_groups, group.id)?;
        lookup(&self.sites, group.site_id)?;
        self.rack_groups.push(group);
        Ok(())
    }

    fn insert_rack_role(&mut self, role: RackRole) -> DcimResult<()> {
        ensure_absent(&self.rack_roles, role.id)?;
        self.rack_roles.push(role);
        Ok(())
    }

    fn insert_rack(&mut self, rack: Rack) -> DcimResult<()> {
        ensure_absent(&self.racks, rack.id)?;
        lookup(&self.sites, rack.site_id)?;
        if let Some(group_id) = rack.group_id {
            lookup(&self.rack_groups, group_id)?;
        }
        if let Some(role_id) = rack.role_id {
            lookup(&self.rack_roles, role_id)?;
        }
        self.check_rack_unique(&rack)?;
        debug!(rack_id = %rack.id, name = %rack.name, u_height = rack.u_height, "Inserted rack");
        self.racks.push(rack);
        Ok(())
    }

    fn update_rack(&mut self, mut rack: Rack) -> DcimResult<()> {
        self.check_rack_unique(&rack)?;
        rack.touch();
        replace(&mut self.racks, rack)
    }

    fn insert_manufacturer(&mut self, manufacturer: Manufacturer) -> DcimResult<()> {
        ensure_absent(&self.manufacturers, manufacturer.id)?;
        self.manufacturers.push(manufacturer);
        Ok(())
    }

    fn insert_device_type(&mut self, device_type: DeviceType) -> DcimResult<()> {
        ensure_absent(&self.device_types, device_type.id)?;
        lookup(&self.manufacturers, device_type.manufacturer_id)?;
        self.check_device_type_unique(&device_type)?;
        self.device_types.push(device_type);
        Ok(())
    }

    fn update_device_type(&mut self, device_type: DeviceType) -> DcimResult<()> {
        self.check_device_type_unique(&device_type)?;
        replace(&mut self.device_types, device_type)
    }

    fn insert_device_role(&mut self, role: DeviceRole) -> DcimResult<()> {
        ensure_absent(&self.device_roles, role.id)?;
        self.device_roles.push(role);
        Ok(())
    }

    fn insert_platform(&mut self, platform: Platform) -> DcimResult<()> {
        ensure_absent(&self.platforms, platform.id)?;
        self.platforms.push(platform);
        Ok(())
    }

    fn insert_device(&mut self, device: Device) -> DcimResult<()> {
        ensure_absent(&self.devices, device.id)?;
        self.check_device_references(&device)?;
        self.check_device_unique(&device)?;
        self.devices.push(device);
        Ok(())
    }

    fn update_device(&mut self, mut device: Device) -> DcimResult<()> {
        position_of(&self.devices, device.id)?;
        self.check_device_references(&device)?;
        self.check_device_unique(&device)?;
        device.touch();
        replace(&mut self.devices, device)
    }

    fn delete_device(&mut self, id: DeviceId) -> DcimResult<()> {
        let index = position_of(&self.devices, id)?;
        self.devices.remove(index);

        let interfaces: HashSet<InterfaceId> = self
            .interfaces
            .iter()
            .filter(|i| i.device_id == id)
            .map(|i| i.id)
            .collect();
        let connections = self.disconnect_interfaces(&interfaces);

        let cs_ports: HashSet<ConsoleServerPortId> = self
            .console_server_ports
            .iter()
            .filter(|p| p.device_id == id)
            .map(|p| p.id)
            .collect();
        self.unplug_console_server_ports(&cs_ports);

        let outlets: HashSet<PowerOutletId> = self
            .power_outlets
            .iter()
            .filter(|o| o.device_id == id)
            .map(|o| o.id)
            .collect();
        self.unplug_power_outlets(&outlets);

        self.interfaces.retain(|c| c.device_id != id);
        self.console_ports.retain(|c| c.device_id != id);
        self.console_server_ports.retain(|c| c.device_id != id);
        self.power_ports.retain(|c| c.device_id != id);
        self.power_outlets.retain(|c| c.device_id != id);
        self.device_bays.retain(|c| c.device_id != id);
        self.modules.retain(|m| m.device_id != id);

        for bay in &mut self.device_bays {
            if bay.installed_device == Some(id) {
                bay.installed_device = None;
            }
        }

        info!(
            device_id = %id,
            interfaces = interfaces.len(),
            connections,
            "Deleted device and its components"
        );
        Ok(())
    }

    fn insert_components(&mut self, device_id: DeviceId, components: DeviceComponents) -> DcimResult<()> {
        position_of(&self.devices, device_id)?;

        ensure_unique_names(&self.console_ports, device_id, &components.console_ports)?;
        ensure_unique_names(&self.console_server_ports, device_id, &components.console_server_ports)?;
        ensure_unique_names(&self.power_ports, device_id, &components.power_ports)?;
        ensure_unique_names(&self.power_outlets, device_id, &components.power_outlets)?;
        ensure_unique_names(&self.interfaces, device_id, &components.interfaces)?;
        ensure_unique_names(&self.device_bays, device_id, &components.device_bays)?;

        debug!(device_id = %device_id, count = components.len(), "Inserted components");

        self.console_ports.extend(components.console_ports);
        self.console_server_ports.extend(components.console_server_ports);
        self.power_ports.extend(components.power_ports);
        self.power_outlets.extend(components.power_outlets);
        self.interfaces.extend(components.interfaces);
        self.device_bays.extend(components.device_bays);
        Ok(())
    }

    fn update_interface(&mut self, interface: Interface) -> DcimResult<()> {
        ensure_unique_rename(&self.interfaces, &interface)?;
        replace(&mut self.interfaces, interface)
    }

    fn delete_interface(&mut self, id: InterfaceId) -> DcimResult<()> {
        let index = position_of(&self.interfaces, id)?;
        self.interfaces.remove(index);
        self.disconnect_interfaces(&HashSet::from([id]));
        Ok(())
    }

    fn insert_interface_connection(&mut self, connection: InterfaceConnection) -> DcimResult<()> {
        ensure_absent(&self.interface_connections, connection.id)?;
        for end in [connection.interface_a, connection.interface_b] {
            lookup(&self.interfaces, end)?;
            if self.interface_connections.iter().any(|c| c.involves(end)) {
                return Err(DcimError::duplicate(
                    "interface connection",
                    format!("interface {} is already connected", end),
                ));
            }
        }
        self.interface_connections.push(connection);
        Ok(())
    }

    fn delete_interface_connection(&mut self, id: InterfaceConnectionId) -> DcimResult<()> {
        let index = position_of(&self.interface_connections, id)?;
        self.interface_connections.remove(index);
        Ok(())
    }

    fn update_console_port(&mut self, port: ConsolePort) -> DcimResult<()> {
        ensure_unique_rename(&self.console_ports, &port)?;
        if let Some(cs_port) = port.cs_port {
            lookup(&self.console_server_ports, cs_port)?;
            if self
                .console_ports
                .iter()
                .any(|p| p.id != port.id && p.cs_port == Some(cs_port))
            {
                return Err(DcimError::duplicate(
                    "console port",
                    format!("console server port {} is already connected", cs_port),
                ));
            }
        }
        replace(&mut self.console_ports, port)
    }

    fn delete_console_server_port(&mut self, id: ConsoleServerPortId) -> DcimResult<()> {
        let index = position_of(&self.console_server_ports, id)?;
        self.console_server_ports.remove(index);
        self.unplug_console_server_ports(&HashSet::from([id]));
        Ok(())
    }

    fn update_power_port(&mut self, port: PowerPort) -> DcimResult<()> {
        ensure_unique_rename(&self.power_ports, &port)?;
        if let Some(outlet) = port.power_outlet {
            lookup(&self.power_outlets, outlet)?;
            if self
                .power_ports
                .iter()
                .any(|p| p.id != port.id && p.power_outlet == Some(outlet))
            {
                return Err(DcimError::duplicate(
                    "power port",
                    format!("power outlet {} is already connected", outlet),
                ));
            }
        }
        replace(&mut self.power_ports, port)
    }

    fn delete_power_outlet(&mut self, id: PowerOutletId) -> DcimResult<()> {
        let index = position_of(&self.power_outlets, id)?;
        self.power_outlets.remove(index);
        self.unplug_power_outlets(&HashSet::from([id]));
        Ok(())
    }

    fn update_device_bay(&mut self, bay: DeviceBay) -> DcimResult<()> {
        ensure_unique_rename(&self.device_bays, &bay)?;
        if let Some(child) = bay.installed_device {
            lookup(&self.devices, child)?;
            if self
                .device_bays
                .iter()
                .any(|b| b.id != bay.id && b.installed_device == Some(child))
            {
                return Err(DcimError::duplicate(
                    "device bay",
                    format!("device {} is already installed in another bay", child),
                ));
            }
        }
        replace(&mut self.device_bays, bay)
    }

    fn insert_module(&mut self, module: Module) -> DcimResult<()> {
        ensure_absent(&self.modules, module.id)?;
        validate_name("name", &module.name, 50)?;
        lookup(&self.devices, module.device_id)?;
        if let Some(parent_id) = module.parent_id {
            let parent = lookup(&self.modules, parent_id)?;
            if parent.device_id != module.device_id {
                return Err(DcimError::InvalidValue(format!(
                    "module {} belongs to device {}, not {}",
                    parent.name, parent.device_id, module.device_id
                )));
            }
        }
        if let Some(manufacturer_id) = module.manufacturer_id {
            lookup(&self.manufacturers, manufacturer_id)?;
        }
        self.check_module_unique(&module)?;
        debug!(module_id = %module.id, device_id = %module.device_id, name = %module.name, "Inserted module");
        self.modules.push(module);
        Ok(())
    }

    fn delete_module(&mut self, id: ModuleId) -> DcimResult<()> {
        position_of(&self.modules, id)?;

        let mut doomed = HashSet::from([id]);
        loop {
            let before = doomed.len();
            for module in &self.modules {
                if module.parent_id.is_some_and(|p| doomed.contains(&p)) {
                    doomed.insert(module.id);
                }
            }
            if doomed.len() == before {
                break;
            }
        }

        self.modules.retain(|m| !doomed.contains(&m.id));
        debug!(module_id = %id, removed = doomed.len(), "Deleted module tree");
        Ok(())
    }
}
