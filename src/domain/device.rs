// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Entity
//!
//! A [`Device`] is one piece of hardware of a given [`DeviceType`], assigned a
//! [`DeviceRole`] and optionally a [`Platform`]. It always belongs to a rack,
//! but its `(position, face)` slot is optional:
//!
//! - `position = None`: not slotted (vertically mounted PDUs, child devices)
//! - `position = Some(0)`: 0U device, tracked but consuming no units
//! - `position = Some(n)`: occupies `n ..= n + u_height - 1` on `face`
//!
//! Occupancy rules live in [`crate::placement`]; this module only holds data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::choices::{DeviceStatus, RackFace, RpcClient};
use super::device_type::{DeviceType, DeviceTypeId};
use super::ids::EntityId;
use super::invariants::{validate_name, ValidationResult};
use super::network::IpAddressWithCidr;
use super::site::{validate_color, Rack, RackId, TenantId};
use super::slug::Slug;

pub type DeviceRoleId = EntityId<DeviceRole>;
pub type PlatformId = EntityId<Platform>;
pub type DeviceId = EntityId<Device>;

/// Functional role of a device, e.g. "Core Switch" or "File Server"
///
/// The color is used when drawing rack elevations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRole {
    pub id: DeviceRoleId,
    pub name: String,
    pub slug: Slug,
    pub color: String,
}

impl DeviceRole {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_name("name", &name, 50)?;
        Ok(Self {
            id: DeviceRoleId::new(),
            slug: Slug::slugify(&name),
            name,
            color: validate_color(color.into())?,
        })
    }
}

/// Software running on a device, e.g. "Juniper Junos"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub name: String,
    pub slug: Slug,

    /// Remote-management client used to talk to devices on this platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_client: Option<RpcClient>,
}

impl Platform {
    pub fn new(name: impl Into<String>, rpc_client: Option<RpcClient>) -> ValidationResult<Self> {
        let name = name.into();
        validate_name("name", &name, 50)?;
        Ok(Self {
            id: PlatformId::new(),
            slug: Slug::slugify(&name),
            name,
            rpc_client,
        })
    }
}

/// Physical device mounted in a rack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub device_type_id: DeviceTypeId,
    pub device_role_id: DeviceRoleId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<PlatformId>,

    /// Optional, unique when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub serial: String,

    /// Optional, unique when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_tag: Option<String>,

    pub rack_id: RackId,

    /// Lowest-numbered unit occupied by the device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<RackFace>,

    #[serde(default)]
    pub status: DeviceStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip4: Option<IpAddressWithCidr>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip6: Option<IpAddressWithCidr>,

    #[serde(default)]
    pub comments: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Device {
    /// Create an unslotted, unnamed device
    pub fn new(device_type_id: DeviceTypeId, device_role_id: DeviceRoleId, rack_id: RackId) -> Self {
        let now = Utc::now();
        Self {
            id: DeviceId::new(),
            device_type_id,
            device_role_id,
            tenant_id: None,
            platform_id: None,
            name: None,
            serial: String::new(),
            asset_tag: None,
            rack_id,
            position: None,
            face: None,
            status: DeviceStatus::default(),
            primary_ip4: None,
            primary_ip6: None,
            comments: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn builder(
        device_type_id: DeviceTypeId,
        device_role_id: DeviceRoleId,
        rack_id: RackId,
    ) -> DeviceBuilder {
        DeviceBuilder {
            device: Self::new(device_type_id, device_role_id, rack_id),
        }
    }

    /// Whether the device consumes rack units (position ≥ 1)
    pub fn occupies_units(&self) -> bool {
        matches!(self.position, Some(position) if position > 0)
    }

    /// Whether the device is a 0U device (position = 0)
    pub fn is_zero_u(&self) -> bool {
        self.position == Some(0)
    }

    /// Name used in listings
    ///
    /// Falls back to `"<model> (<rack> U<position>)"`, then `"<model> (<rack>)"`.
    pub fn display_name(&self, device_type: &DeviceType, rack: &Rack) -> String {
        match (&self.name, self.position) {
            (Some(name), _) => name.clone(),
            (None, Some(position)) if position > 0 => {
                format!("{} ({} U{})", device_type.model, rack.name, position)
            }
            _ => format!("{} ({})", device_type.model, rack.name),
        }
    }

    /// Name if set, otherwise `{<id>}`
    pub fn identifier(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{{{}}}", self.id),
        }
    }

    /// Preferred primary address
    ///
    /// With `prefer_ipv4` the IPv4 address wins when both are set; otherwise
    /// IPv6 wins. Either one is returned when only one is set.
    pub fn primary_ip(&self, prefer_ipv4: bool) -> Option<&IpAddressWithCidr> {
        if prefer_ipv4 && self.primary_ip4.is_some() {
            return self.primary_ip4.as_ref();
        }
        self.primary_ip6.as_ref().or(self.primary_ip4.as_ref())
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Builder for [`Device`] with fluent API
pub struct DeviceBuilder {
    device: Device,
}

impl DeviceBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.device.name = Some(name.into());
        self
    }

    pub fn position(mut self, position: u16, face: RackFace) -> Self {
        self.device.position = Some(position);
        self.device.face = Some(face);
        self
    }

    /// Set position and face independently (used to express invalid input)
    pub fn slot(mut self, position: Option<u16>, face: Option<RackFace>) -> Self {
        self.device.position = position;
        self.device.face = face;
        self
    }

    pub fn tenant(mut self, tenant_id: TenantId) -> Self {
        self.device.tenant_id = Some(tenant_id);
        self
    }

    pub fn platform(mut self, platform_id: PlatformId) -> Self {
        self.device.platform_id = Some(platform_id);
        self
    }

    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.device.serial = serial.into();
        self
    }

    pub fn asset_tag(mut self, tag: impl Into<String>) -> Self {
        self.device.asset_tag = Some(tag.into());
        self
    }

    pub fn status(mut self, status: DeviceStatus) -> Self {
        self.device.status = status;
        self
    }

    pub fn primary_ip4(mut self, ip: IpAddressWithCidr) -> Self {
        self.device.primary_ip4 = Some(ip);
        self
    }

    pub fn primary_ip6(mut self, ip: IpAddressWithCidr) -> Self {
        self.device.primary_ip6 = Some(ip);
        self
    }

    pub fn build(self) -> ValidationResult<Device> {
        if let Some(name) = &self.device.name {
            validate_name("name", name, 50)?;
        }
        if let Some(tag) = &self.device.asset_tag {
            validate_name("asset_tag", tag, 50)?;
        }
        Ok(self.device)
    }
}
