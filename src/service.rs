// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Service Layer
//!
//! Coordinates the repository with the pure parts of the crate. Every
//! mutating method follows the same transaction shape:
//!
//! ```text
//! Load snapshot → Validate (pure) → Write to repository
//!        ↓                 ↓
//!   RackUnitMap    placement / invariants
//! ```
//!
//! Nothing is written when validation fails. Methods take `&mut self`, so a
//! caller sharing a service across threads wraps it in a lock of its own.
//!
//! # Device creation
//!
//! Creating a device is two steps: the device record is validated and
//! inserted, then its components are expanded from the device type
//! templates and inserted. When the second step fails the device record is
//! removed again. Expansion runs only here; updates to the device never
//! re-expand.
//!
//! # Example
//!
//! ```rust
//! use dcim_inventory::domain::*;
//! use dcim_inventory::{DcimConfig, InMemoryInventory, InventoryRepository, InventoryService};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut service = InventoryService::new(InMemoryInventory::new(), DcimConfig::default());
//!
//! let site = Site::new("DC1")?;
//! let site_id = site.id;
//! service.repository_mut().insert_site(site)?;
//! let rack = service.create_rack(site_id, "R1", None)?;
//!
//! let juniper = Manufacturer::new("Juniper")?;
//! let mut switch = DeviceType::new(juniper.id, "EX4300-48T", 1)?;
//! switch.add_interface("ge-0/0/0", FormFactor::Fixed1Ge, false)?;
//! service.repository_mut().insert_manufacturer(juniper)?;
//! service.create_device_type(switch.clone())?;
//!
//! let role = DeviceRole::new("Access", "2196f3")?;
//! service.repository_mut().insert_device_role(role.clone())?;
//!
//! let device = Device::builder(switch.id, role.id, rack.id)
//!     .name("sw1")
//!     .position(42, RackFace::Front)
//!     .build()?;
//! let components = service.create_device(device)?;
//! assert_eq!(components.interfaces.len(), 1);
//! assert_eq!(service.utilization(rack.id)?, 2);
//! # Ok(())
//! # }
//! ```

use tracing::{debug, info, warn};

use crate::config::DcimConfig;
use crate::domain::invariants::{validate_device_type_definition, validate_rack_height};
use crate::domain::{
    ConnectionStatus, ConsolePortId, ConsoleServerPortId, Device, DeviceBay, DeviceBayId,
    DeviceComponents, DeviceId, DeviceType, DeviceTypeId, Interface, InterfaceConnection,
    InterfaceConnectionId, InterfaceId, IpAddressWithCidr, Module, ModuleId, PowerOutletId, PowerPortId, Rack, RackFace, RackId, SiteId,
};
use crate::errors::DcimResult;
use crate::expander::{expand_device_type, ComponentSpecs};
use crate::ordering::{sort_by_name_order, sort_by_numeric_suffix, sort_by_padded_name};
use crate::placement;
use crate::rack_units::{RackOccupant, RackUnit, RackUnitMap};
use crate::repository::InventoryRepository;

/// Application service over an [`InventoryRepository`]
pub struct InventoryService<R> {
    repository: R,
    config: DcimConfig,
}

impl<R: InventoryRepository> InventoryService<R> {
    pub fn new(repository: R, config: DcimConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Direct repository access, bypassing occupancy validation
    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    pub fn config(&self) -> &DcimConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Rack space
    // ------------------------------------------------------------------

    /// Occupancy snapshot of one rack
    pub fn rack_unit_map(&self, rack_id: RackId) -> DcimResult<RackUnitMap> {
        let rack = self.repository.rack(rack_id)?;
        self.map_for(&rack)
    }

    fn map_for(&self, rack: &Rack) -> DcimResult<RackUnitMap> {
        let occupants = self
            .repository
            .devices_in_rack(rack.id)
            .into_iter()
            .filter(|device| device.position.is_some())
            .map(|device| {
                let device_type = self.repository.device_type(device.device_type_id)?;
                Ok(RackOccupant::from_device(&device, &device_type))
            })
            .collect::<DcimResult<Vec<_>>>()?;
        Ok(RackUnitMap::new(rack, occupants))
    }

    pub fn elevation(
        &self,
        rack_id: RackId,
        face: RackFace,
        exclude: &[DeviceId],
        collapse: bool,
    ) -> DcimResult<Vec<RackUnit>> {
        Ok(self.rack_unit_map(rack_id)?.elevation(face, exclude, collapse))
    }

    pub fn available_units(
        &self,
        rack_id: RackId,
        u_height: u16,
        face: Option<RackFace>,
        exclude: &[DeviceId],
    ) -> DcimResult<Vec<u16>> {
        Ok(self.rack_unit_map(rack_id)?.available_units(u_height, face, exclude))
    }

    pub fn utilization(&self, rack_id: RackId) -> DcimResult<u32> {
        Ok(self.rack_unit_map(rack_id)?.utilization())
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Check a device's rack slot against the current occupants of its rack
    pub fn validate_placement(&self, device: &Device) -> DcimResult<()> {
        let device_type = self.repository.device_type(device.device_type_id)?;
        let map = self.rack_unit_map(device.rack_id)?;
        placement::validate_device_placement(&map, device, &device_type)?;
        Ok(())
    }

    pub fn validate_rack_resize(&self, rack_id: RackId, new_height: u16) -> DcimResult<()> {
        let map = self.rack_unit_map(rack_id)?;
        placement::validate_rack_resize(&map, new_height, self.config.max_rack_height)?;
        Ok(())
    }

    /// Check that every placed instance of the type has room at `new_height`
    pub fn validate_device_type_resize(&self, device_type_id: DeviceTypeId, new_height: u16) -> DcimResult<()> {
        let mut updated = self.repository.device_type(device_type_id)?;
        updated.u_height = new_height;
        self.validate_device_type_change(&updated)
    }

    /// Check an edited device type against the placed instances of the stored one
    ///
    /// Height and depth are both taken from `updated`.
    pub fn validate_device_type_change(&self, updated: &DeviceType) -> DcimResult<()> {
        let current = self.repository.device_type(updated.id)?;
        let instances = self.repository.devices_of_type(updated.id);
        let maps = instances
            .iter()
            .map(|device| self.rack_unit_map(device.rack_id))
            .collect::<DcimResult<Vec<_>>>()?;

        placement::validate_device_type_resize(&current, updated, instances.iter().zip(maps.iter()))?;
        Ok(())
    }

    pub fn expand_device_type(&self, device_type_id: DeviceTypeId) -> DcimResult<ComponentSpecs> {
        Ok(expand_device_type(&self.repository.device_type(device_type_id)?))
    }

    // ------------------------------------------------------------------
    // Racks and device types
    // ------------------------------------------------------------------

    /// Create a rack; `u_height = None` uses the configured default
    pub fn create_rack(&mut self, site_id: SiteId, name: &str, u_height: Option<u16>) -> DcimResult<Rack> {
        let u_height = u_height.unwrap_or(self.config.default_rack_height);
        validate_rack_height(u_height, self.config.max_rack_height)?;
        let rack = Rack::new(site_id, name, u_height)?;
        self.repository.insert_rack(rack.clone())?;
        info!(rack_id = %rack.id, name, u_height, "Created rack");
        Ok(rack)
    }

    pub fn resize_rack(&mut self, rack_id: RackId, new_height: u16) -> DcimResult<Rack> {
        self.validate_rack_resize(rack_id, new_height)?;
        let mut rack = self.repository.rack(rack_id)?;
        let old_height = rack.u_height;
        rack.u_height = new_height;
        self.repository.update_rack(rack.clone())?;
        info!(rack_id = %rack_id, old_height, new_height, "Resized rack");
        Ok(rack)
    }

    pub fn create_device_type(&mut self, device_type: DeviceType) -> DcimResult<()> {
        validate_device_type_definition(&device_type)?;
        info!(device_type_id = %device_type.id, model = %device_type.model, "Created device type");
        self.repository.insert_device_type(device_type)
    }

    /// Replace a device type definition
    ///
    /// Growing the type, or making it full depth, is checked against every
    /// placed instance. Existing devices keep their components.
    pub fn update_device_type(&mut self, device_type: DeviceType) -> DcimResult<()> {
        validate_device_type_definition(&device_type)?;
        self.validate_device_type_change(&device_type)?;
        debug!(device_type_id = %device_type.id, u_height = device_type.u_height, "Updated device type");
        self.repository.update_device_type(device_type)
    }

    // ------------------------------------------------------------------
    // Devices
    // ------------------------------------------------------------------

    /// Insert a device and create its components from the type templates
    pub fn create_device(&mut self, device: Device) -> DcimResult<DeviceComponents> {
        self.validate_placement(&device)?;
        let device_id = device.id;
        let device_type_id = device.device_type_id;
        let components = self.expand_device_type(device_type_id)?.instantiate(device_id);
        self.repository.insert_device(device)?;

        if let Err(err) = self.repository.insert_components(device_id, components.clone()) {
            warn!(device_id = %device_id, error = %err, "Component insert failed, removing device");
            self.repository.delete_device(device_id)?;
            return Err(err);
        }

        info!(
            device_id = %device_id,
            device_type_id = %device_type_id,
            components = components.len(),
            "Created device"
        );
        Ok(components)
    }

    /// Replace a device record; a rack change is carried to its children
    pub fn update_device(&mut self, device: Device) -> DcimResult<()> {
        let previous = self.repository.device(device.id)?;
        self.validate_placement(&device)?;

        let device_id = device.id;
        let rack_id = device.rack_id;
        self.repository.update_device(device)?;

        if previous.rack_id != rack_id {
            for mut child in self.repository.children(device_id) {
                child.rack_id = rack_id;
                debug!(parent = %device_id, child = %child.id, rack_id = %rack_id, "Moved child with parent");
                self.repository.update_device(child)?;
            }
        }
        Ok(())
    }

    /// Move a device to a new rack slot
    pub fn move_device(
        &mut self,
        device_id: DeviceId,
        rack_id: RackId,
        position: Option<u16>,
        face: Option<RackFace>,
    ) -> DcimResult<()> {
        let mut device = self.repository.device(device_id)?;
        device.rack_id = rack_id;
        device.position = position;
        device.face = face;
        self.update_device(device)?;
        info!(device_id = %device_id, rack_id = %rack_id, ?position, ?face, "Moved device");
        Ok(())
    }

    pub fn delete_device(&mut self, device_id: DeviceId) -> DcimResult<()> {
        self.repository.delete_device(device_id)
    }

    /// Preferred primary address per the configured address family
    pub fn primary_ip(&self, device_id: DeviceId) -> DcimResult<Option<IpAddressWithCidr>> {
        let device = self.repository.device(device_id)?;
        Ok(device.primary_ip(self.config.prefer_ipv4).cloned())
    }

    pub fn rpc_client_name(&self, device_id: DeviceId) -> DcimResult<Option<&'static str>> {
        self.repository.rpc_client_name(device_id)
    }

    // ------------------------------------------------------------------
    // Connections
    // ------------------------------------------------------------------

    pub fn connect_interfaces(
        &mut self,
        interface_a: InterfaceId,
        interface_b: InterfaceId,
        status: ConnectionStatus,
    ) -> DcimResult<InterfaceConnectionId> {
        let a = self.repository.interface(interface_a)?;
        let b = self.repository.interface(interface_b)?;
        let existing: Vec<InterfaceConnection> = [a.id, b.id]
            .iter()
            .filter_map(|id| self.repository.interface_connection(*id))
            .collect();
        placement::validate_interface_connection(&a, &b, &existing)?;

        let connection = InterfaceConnection::new(a.id, b.id, status);
        let id = connection.id;
        self.repository.insert_interface_connection(connection)?;
        info!(connection_id = %id, a = %a.name, b = %b.name, %status, "Connected interfaces");
        Ok(id)
    }

    /// Remove the connection of an interface, if it has one
    pub fn disconnect_interface(&mut self, interface_id: InterfaceId) -> DcimResult<()> {
        if let Some(connection) = self.repository.interface_connection(interface_id) {
            self.repository.delete_interface_connection(connection.id)?;
        }
        Ok(())
    }

    /// The interface at the far end of `interface_id`'s connection
    pub fn peer_interface(&self, interface_id: InterfaceId) -> DcimResult<Option<Interface>> {
        match self
            .repository
            .interface_connection(interface_id)
            .and_then(|c| c.peer_of(interface_id))
        {
            Some(peer) => Ok(Some(self.repository.interface(peer)?)),
            None => Ok(None),
        }
    }

    pub fn is_connected(&self, interface_id: InterfaceId) -> bool {
        self.repository.interface_connection(interface_id).is_some()
    }

    /// Replace an interface record
    pub fn update_interface(&mut self, interface: Interface) -> DcimResult<()> {
        placement::validate_interface_form_factor(&interface, self.is_connected(interface.id))?;
        self.repository.update_interface(interface)
    }

    pub fn connect_console(
        &mut self,
        console_port_id: ConsolePortId,
        cs_port_id: ConsoleServerPortId,
        status: ConnectionStatus,
    ) -> DcimResult<()> {
        let mut console_port = self.repository.console_port(console_port_id)?;
        let cs_port = self.repository.console_server_port(cs_port_id)?;
        placement::validate_console_connection(
            &console_port,
            &cs_port,
            &self.repository.console_ports_on(cs_port_id),
        )?;

        console_port.cs_port = Some(cs_port_id);
        console_port.connection_status = Some(status);
        self.repository.update_console_port(console_port)
    }

    pub fn connect_power(
        &mut self,
        power_port_id: PowerPortId,
        outlet_id: PowerOutletId,
        status: ConnectionStatus,
    ) -> DcimResult<()> {
        let mut power_port = self.repository.power_port(power_port_id)?;
        let outlet = self.repository.power_outlet(outlet_id)?;
        placement::validate_power_connection(
            &power_port,
            &outlet,
            &self.repository.power_ports_on(outlet_id),
        )?;

        power_port.power_outlet = Some(outlet_id);
        power_port.connection_status = Some(status);
        self.repository.update_power_port(power_port)
    }

    // ------------------------------------------------------------------
    // Device bays
    // ------------------------------------------------------------------

    pub fn install_device(&mut self, bay_id: DeviceBayId, child_id: DeviceId) -> DcimResult<()> {
        let mut bay = self.repository.device_bay(bay_id)?;
        let parent = self.repository.device(bay.device_id)?;
        let parent_type = self.repository.device_type(parent.device_type_id)?;
        let child = self.repository.device(child_id)?;
        placement::validate_device_bay_install(&parent_type, &bay, &child)?;

        bay.installed_device = Some(child_id);
        self.repository.update_device_bay(bay)?;
        info!(bay_id = %bay_id, parent = %parent.id, child = %child_id, "Installed device");
        Ok(())
    }

    pub fn remove_device_from_bay(&mut self, bay_id: DeviceBayId) -> DcimResult<()> {
        let mut bay = self.repository.device_bay(bay_id)?;
        bay.installed_device = None;
        self.repository.update_device_bay(bay)
    }

    /// Bay a device is installed in, if any
    pub fn parent_bay(&self, device_id: DeviceId) -> DcimResult<Option<DeviceBay>> {
        self.repository.device(device_id)?;
        Ok(self.repository.parent_bay(device_id))
    }

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    pub fn add_module(&mut self, module: Module) -> DcimResult<ModuleId> {
        let (id, device_id) = (module.id, module.device_id);
        self.repository.insert_module(module)?;
        info!(module_id = %id, device_id = %device_id, "Added module");
        Ok(id)
    }

    /// Remove a module and its submodules
    pub fn remove_module(&mut self, module_id: ModuleId) -> DcimResult<()> {
        self.repository.delete_module(module_id)
    }

    /// Modules of a device, top level first, then by parent and name
    pub fn modules(&self, device_id: DeviceId) -> DcimResult<Vec<Module>> {
        self.repository.device(device_id)?;
        let mut modules = self.repository.modules(device_id);
        modules.sort_by(|a, b| a.parent_id.cmp(&b.parent_id).then_with(|| a.name.cmp(&b.name)));
        Ok(modules)
    }

    // ------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------

    /// Components of a device in display order
    ///
    /// Interfaces and device bays follow slot order, console server ports
    /// their trailing number, power outlets the padded key. Console and power
    /// ports are sorted by name.
    pub fn sorted_components(&self, device_id: DeviceId) -> DcimResult<DeviceComponents> {
        self.repository.device(device_id)?;
        let mut components = self.repository.components(device_id);

        sort_by_name_order(&mut components.interfaces);
        sort_by_name_order(&mut components.device_bays);
        sort_by_numeric_suffix(&mut components.console_server_ports);
        sort_by_padded_name(&mut components.power_outlets);
        components.console_ports.sort_by(|a, b| a.name.cmp(&b.name));
        components.power_ports.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(components)
    }

    /// Interfaces of a device in slot order, split into physical and virtual
    pub fn interfaces(&self, device_id: DeviceId) -> DcimResult<(Vec<Interface>, Vec<Interface>)> {
        let interfaces = self.sorted_components(device_id)?.interfaces;
        Ok(interfaces.into_iter().partition(Interface::is_physical))
    }

    /// Every rack with its occupancy snapshot
    pub fn rack_elevations(&self) -> DcimResult<Vec<(Rack, RackUnitMap)>> {
        self.repository
            .racks()
            .into_iter()
            .map(|rack| {
                let map = self.map_for(&rack)?;
                Ok((rack, map))
            })
            .collect()
    }

    /// Children installed in a device's bays
    pub fn children(&self, device_id: DeviceId) -> DcimResult<Vec<Device>> {
        self.repository.device(device_id)?;
        Ok(self.repository.children(device_id))
    }
}
