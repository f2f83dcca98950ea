// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sites, Tenants and Racks
//!
//! A [`Site`] is a building or campus. [`Rack`]s belong to a site and
//! optionally to a [`RackGroup`] (a room or floor) and a [`RackRole`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::choices::{RackType, RackWidth};
use super::ids::EntityId;
use super::invariants::{validate_name, validate_rack_height, ValidationError, ValidationResult, MAX_RACK_HEIGHT};
use super::slug::Slug;

pub type TenantId = EntityId<Tenant>;
pub type SiteId = EntityId<Site>;
pub type RackGroupId = EntityId<RackGroup>;
pub type RackRoleId = EntityId<RackRole>;
pub type RackId = EntityId<Rack>;

/// Organisation that owns sites, racks or devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub slug: Slug,
}

impl Tenant {
    pub fn new(name: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_name("name", &name, 30)?;
        Ok(Self {
            id: TenantId::new(),
            slug: Slug::slugify(&name),
            name,
        })
    }
}

/// Geographic location housing racks, typically a building or campus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub slug: Slug,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,

    /// External designation, such as a data center name
    #[serde(default)]
    pub facility: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<u32>,

    #[serde(default)]
    pub physical_address: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub comments: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Site {
    pub fn new(name: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_name("name", &name, 50)?;
        let now = Utc::now();
        Ok(Self {
            id: SiteId::new(),
            slug: Slug::slugify(&name),
            name,
            tenant_id: None,
            facility: String::new(),
            asn: None,
            physical_address: String::new(),
            shipping_address: String::new(),
            contact_name: String::new(),
            contact_phone: String::new(),
            contact_email: String::new(),
            comments: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = facility.into();
        self
    }

    /// 16- or 32-bit autonomous system number
    pub fn with_asn(mut self, asn: u32) -> ValidationResult<Self> {
        if asn == 0 {
            return Err(ValidationError::constraint("asn", "ASN must be between 1 and 4294967295."));
        }
        self.asn = Some(asn);
        Ok(self)
    }
}

/// Grouping of racks within a site, such as a room or floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackGroup {
    pub id: RackGroupId,
    pub site_id: SiteId,
    pub name: String,
    pub slug: Slug,
}

impl RackGroup {
    pub fn new(site_id: SiteId, name: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_name("name", &name, 50)?;
        Ok(Self {
            id: RackGroupId::new(),
            site_id,
            slug: Slug::slugify(&name),
            name,
        })
    }
}

/// Functional role of a rack, with a display color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackRole {
    pub id: RackRoleId,
    pub name: String,
    pub slug: Slug,
    /// Six hex digits, without a leading `#`
    pub color: String,
}

impl RackRole {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_name("name", &name, 50)?;
        let color = validate_color(color.into())?;
        Ok(Self {
            id: RackRoleId::new(),
            slug: Slug::slugify(&name),
            name,
            color,
        })
    }
}

/// Normalize a hex color (`#AABBCC` or `aabbcc`) to lowercase without `#`
pub(crate) fn validate_color(color: String) -> ValidationResult<String> {
    let color = color.trim_start_matches('#').to_ascii_lowercase();
    if color.len() != 6 || !color.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(ValidationError::constraint(
            "color",
            "Enter a valid hexadecimal RGB color code.",
        ));
    }
    Ok(color)
}

/// Equipment rack with a fixed height in rack units and two faces
///
/// # Invariants
/// - 1 ≤ `u_height` ≤ 100
/// - Installed devices never overlap and never extend above `u_height`
///   (enforced by [`crate::placement`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    pub id: RackId,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<String>,

    pub site_id: SiteId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<RackGroupId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RackRoleId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack_type: Option<RackType>,

    #[serde(default)]
    pub width: RackWidth,

    /// Height in rack units
    pub u_height: u16,

    /// Units are numbered top-to-bottom (U1 at the top)
    #[serde(default)]
    pub desc_units: bool,

    #[serde(default)]
    pub comments: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rack {
    pub fn new(site_id: SiteId, name: impl Into<String>, u_height: u16) -> ValidationResult<Self> {
        let name = name.into();
        validate_name("name", &name, 50)?;
        validate_rack_height(u_height, MAX_RACK_HEIGHT)?;
        let now = Utc::now();
        Ok(Self {
            id: RackId::new(),
            name,
            facility_id: None,
            site_id,
            group_id: None,
            tenant_id: None,
            role_id: None,
            rack_type: None,
            width: RackWidth::default(),
            u_height,
            desc_units: false,
            comments: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_facility_id(mut self, facility_id: impl Into<String>) -> Self {
        self.facility_id = Some(facility_id.into());
        self
    }

    pub fn with_descending_units(mut self, desc_units: bool) -> Self {
        self.desc_units = desc_units;
        self
    }

    /// Unit numbers as displayed from the top of the rack to the bottom
    ///
    /// Ascending racks (U1 at the bottom) list `u_height..=1`; descending
    /// racks list `1..=u_height`.
    pub fn units(&self) -> Vec<u16> {
        if self.desc_units {
            (1..=self.u_height).collect()
        } else {
            (1..=self.u_height).rev().collect()
        }
    }

    pub fn display_name(&self) -> String {
        match &self.facility_id {
            Some(facility_id) => format!("{} ({})", self.name, facility_id),
            None => self.name.clone(),
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
