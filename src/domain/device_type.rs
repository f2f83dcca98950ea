// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Types and Component Templates
//!
//! A [`DeviceType`] is a make and model of hardware. It fixes the rack height
//! and depth of every device built from it and carries the component
//! templates copied into each new device. For example a 48-port access switch
//! type has one console port template, two power port templates and 48
//! interface templates.

use serde::{Deserialize, Serialize};

use super::choices::{FormFactor, SubdeviceRole};
use super::ids::EntityId;
use super::invariants::{validate_name, ValidationError, ValidationResult};
use super::slug::Slug;

pub type ManufacturerId = EntityId<Manufacturer>;
pub type DeviceTypeId = EntityId<DeviceType>;

/// Company producing hardware, e.g. Juniper or Dell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: ManufacturerId,
    pub name: String,
    pub slug: Slug,
}

impl Manufacturer {
    pub fn new(name: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_name("name", &name, 50)?;
        Ok(Self {
            id: ManufacturerId::new(),
            slug: Slug::slugify(&name),
            name,
        })
    }
}

/// Template for a console port on new devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolePortTemplate {
    pub name: String,
}

/// Template for a console server port on new devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleServerPortTemplate {
    pub name: String,
}

/// Template for a power supply intake on new devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerPortTemplate {
    pub name: String,
}

/// Template for a power outlet on new devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerOutletTemplate {
    pub name: String,
}

/// Template for a data interface on new devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceTemplate {
    pub name: String,
    #[serde(default)]
    pub form_factor: FormFactor,
    #[serde(default)]
    pub mgmt_only: bool,
}

/// Template for a device bay on new parent devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceBayTemplate {
    pub name: String,
}

macro_rules! named_template {
    ($($template:ident),+) => {
        $(
            impl $template {
                pub fn new(name: impl Into<String>) -> Self {
                    Self { name: name.into() }
                }
            }

            impl crate::ordering::Named for $template {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

named_template!(
    ConsolePortTemplate,
    ConsoleServerPortTemplate,
    PowerPortTemplate,
    PowerOutletTemplate,
    DeviceBayTemplate
);

impl InterfaceTemplate {
    pub fn new(name: impl Into<String>, form_factor: FormFactor, mgmt_only: bool) -> Self {
        Self {
            name: name.into(),
            form_factor,
            mgmt_only,
        }
    }
}

impl crate::ordering::Named for InterfaceTemplate {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered component templates of a device type
///
/// Order is insertion order; names are unique within each collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTypeTemplates {
    #[serde(default)]
    pub console_ports: Vec<ConsolePortTemplate>,
    #[serde(default)]
    pub console_server_ports: Vec<ConsoleServerPortTemplate>,
    #[serde(default)]
    pub power_ports: Vec<PowerPortTemplate>,
    #[serde(default)]
    pub power_outlets: Vec<PowerOutletTemplate>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceTemplate>,
    #[serde(default)]
    pub device_bays: Vec<DeviceBayTemplate>,
}

impl DeviceTypeTemplates {
    pub fn is_empty(&self) -> bool {
        self.console_ports.is_empty()
            && self.console_server_ports.is_empty()
            && self.power_ports.is_empty()
            && self.power_outlets.is_empty()
            && self.interfaces.is_empty()
            && self.device_bays.is_empty()
    }
}

fn push_unique<T: crate::ordering::Named>(
    templates: &mut Vec<T>,
    template: T,
) -> ValidationResult {
    validate_name("name", template.name(), 30)?;
    if templates.iter().any(|t| t.name() == template.name()) {
        return Err(ValidationError::constraint(
            "name",
            format!("A template named {:?} already exists.", template.name()),
        ));
    }
    templates.push(template);
    Ok(())
}

/// Make and model of a device
///
/// # Invariants
/// - `u_height` is 0 only for child types, and child types are always 0U
/// - Template flags agree with template collections (see
///   [`validate_device_type_definition`](super::invariants::validate_device_type_definition))
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: DeviceTypeId,
    pub manufacturer_id: ManufacturerId,
    pub model: String,
    pub slug: Slug,

    #[serde(default)]
    pub part_number: String,

    /// Height in rack units
    pub u_height: u16,

    /// Device consumes both front and rear rack faces
    pub is_full_depth: bool,

    pub is_console_server: bool,
    pub is_pdu: bool,
    pub is_network_device: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdevice_role: Option<SubdeviceRole>,

    #[serde(default)]
    pub comments: String,

    #[serde(default)]
    pub templates: DeviceTypeTemplates,
}

impl DeviceType {
    /// Create a full-depth network device type with no templates
    pub fn new(
        manufacturer_id: ManufacturerId,
        model: impl Into<String>,
        u_height: u16,
    ) -> ValidationResult<Self> {
        let model = model.into();
        validate_name("model", &model, 50)?;
        Ok(Self {
            id: DeviceTypeId::new(),
            manufacturer_id,
            slug: Slug::slugify(&model),
            model,
            part_number: String::new(),
            u_height,
            is_full_depth: true,
            is_console_server: false,
            is_pdu: false,
            is_network_device: true,
            subdevice_role: None,
            comments: String::new(),
            templates: DeviceTypeTemplates::default(),
        })
    }

    pub fn with_full_depth(mut self, is_full_depth: bool) -> Self {
        self.is_full_depth = is_full_depth;
        self
    }

    pub fn with_subdevice_role(mut self, role: Option<SubdeviceRole>) -> Self {
        self.subdevice_role = role;
        self
    }

    /// `"<manufacturer> <model>"`
    pub fn full_name(&self, manufacturer: &Manufacturer) -> String {
        format!("{} {}", manufacturer.name, self.model)
    }

    pub fn is_parent_device(&self) -> bool {
        self.subdevice_role == Some(SubdeviceRole::Parent)
    }

    pub fn is_child_device(&self) -> bool {
        self.subdevice_role == Some(SubdeviceRole::Child)
    }

    pub fn add_console_port(&mut self, name: impl Into<String>) -> ValidationResult {
        push_unique(&mut self.templates.console_ports, ConsolePortTemplate::new(name))
    }

    pub fn add_console_server_port(&mut self, name: impl Into<String>) -> ValidationResult {
        push_unique(
            &mut self.templates.console_server_ports,
            ConsoleServerPortTemplate::new(name),
        )
    }

    pub fn add_power_port(&mut self, name: impl Into<String>) -> ValidationResult {
        push_unique(&mut self.templates.power_ports, PowerPortTemplate::new(name))
    }

    pub fn add_power_outlet(&mut self, name: impl Into<String>) -> ValidationResult {
        push_unique(&mut self.templates.power_outlets, PowerOutletTemplate::new(name))
    }

    pub fn add_interface(
        &mut self,
        name: impl Into<String>,
        form_factor: FormFactor,
        mgmt_only: bool,
    ) -> ValidationResult {
        push_unique(
            &mut self.templates.interfaces,
            InterfaceTemplate::new(name, form_factor, mgmt_only),
        )
    }

    pub fn add_device_bay(&mut self, name: impl Into<String>) -> ValidationResult {
        push_unique(&mut self.templates.device_bays, DeviceBayTemplate::new(name))
    }
}
