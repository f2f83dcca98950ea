// Copyright (c) 2025 - Cowboy AI, Inc.
//! Rack Space Allocation
//!
//! A [`RackUnitMap`] is a snapshot of one rack's occupants. It answers three
//! questions:
//!
//! 1. **Elevation**: what sits in each unit of a face, top of the rack first
//! 2. **Availability**: where a device of a given height could start
//! 3. **Utilization**: what share of the front face is taken
//!
//! ```text
//!   U4  [ core-sw-01        ]      front face, 4U rack
//!   U3  [ (free)            ]
//!   U2  [ db01 (2U) ------- ]      collapsed: db01 shown once at U1
//!   U1  [ db01              ]
//! ```
//!
//! An occupant with `position > 0` claims `position ..= position + u_height - 1`
//! on its own face, or on both faces when it is full depth. Units above the
//! rack height are ignored. Occupants at `position = 0` are 0U devices and
//! never claim units.
//!
//! Rendering and plain availability tolerate overlapping occupants (last
//! write wins). [`RackUnitMap::checked_available_units`] reports the first
//! overlap instead, for use by validators.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Device, DeviceId, DeviceType, Rack, RackFace, RackId, ValidationError, ValidationResult};

/// A device as seen by the rack: where it sits and how much room it takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackOccupant {
    pub device_id: DeviceId,
    pub position: Option<u16>,
    pub face: Option<RackFace>,
    pub u_height: u16,
    pub is_full_depth: bool,
}

impl RackOccupant {
    pub fn from_device(device: &Device, device_type: &DeviceType) -> Self {
        Self {
            device_id: device.id,
            position: device.position,
            face: device.face,
            u_height: device_type.u_height,
            is_full_depth: device_type.is_full_depth,
        }
    }

    /// Units claimed, lowest first; empty unless `position > 0`
    pub fn units(&self) -> impl Iterator<Item = u16> {
        let (start, end) = match self.position {
            Some(position) if position > 0 => {
                let end = u32::from(position) + u32::from(self.u_height);
                (u32::from(position), end.min(u32::from(u16::MAX) + 1))
            }
            _ => (0, 0),
        };
        (start..end).filter_map(|unit| u16::try_from(unit).ok())
    }

    /// Whether the occupant takes room on `face` (`None` = either face)
    pub fn blocks(&self, face: Option<RackFace>) -> bool {
        match face {
            None => true,
            Some(face) => self.is_full_depth || self.face == Some(face),
        }
    }

    /// Faces actually claimed
    fn faces(&self) -> &'static [RackFace] {
        match (self.is_full_depth, self.face) {
            (true, _) => &[RackFace::Front, RackFace::Rear],
            (false, Some(RackFace::Front)) => &[RackFace::Front],
            (false, Some(RackFace::Rear)) => &[RackFace::Rear],
            (false, None) => &[],
        }
    }

    fn top_unit(&self) -> Option<u16> {
        self.units().last()
    }
}

/// One row of an elevation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackUnit {
    pub unit: u16,
    /// `U<unit>`
    pub name: String,
    pub face: RackFace,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupant: Option<DeviceId>,
}

impl RackUnit {
    fn new(unit: u16, face: RackFace) -> Self {
        Self {
            unit,
            name: format!("U{}", unit),
            face,
            occupant: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Occupied units of one rack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackUnitMap {
    rack_id: RackId,
    u_height: u16,
    desc_units: bool,
    occupants: Vec<RackOccupant>,
}

impl RackUnitMap {
    pub fn new(rack: &Rack, occupants: impl IntoIterator<Item = RackOccupant>) -> Self {
        Self {
            rack_id: rack.id,
            u_height: rack.u_height,
            desc_units: rack.desc_units,
            occupants: occupants.into_iter().collect(),
        }
    }

    pub fn rack_id(&self) -> RackId {
        self.rack_id
    }

    pub fn u_height(&self) -> u16 {
        self.u_height
    }

    pub fn occupants(&self) -> &[RackOccupant] {
        &self.occupants
    }

    pub fn occupant(&self, device_id: DeviceId) -> Option<&RackOccupant> {
        self.occupants.iter().find(|o| o.device_id == device_id)
    }

    /// Unit numbers from the top of the rack to the bottom
    fn display_order(&self) -> Vec<u16> {
        if self.desc_units {
            (1..=self.u_height).collect()
        } else {
            (1..=self.u_height).rev().collect()
        }
    }

    fn claiming<'a>(
        &'a self,
        face: Option<RackFace>,
        exclude: &'a [DeviceId],
    ) -> impl Iterator<Item = &'a RackOccupant> + 'a {
        self.occupants.iter().filter(move |o| {
            matches!(o.position, Some(position) if position > 0)
                && o.blocks(face)
                && !exclude.contains(&o.device_id)
        })
    }

    /// Units of one face, top first
    ///
    /// With `collapse`, each device keeps only its lowest unit and the rows
    /// for the rest of its span are dropped.
    pub fn elevation(&self, face: RackFace, exclude: &[DeviceId], collapse: bool) -> Vec<RackUnit> {
        let mut slots: Vec<RackUnit> = (0..=self.u_height).map(|unit| RackUnit::new(unit, face)).collect();
        let mut removed = vec![false; usize::from(self.u_height) + 1];

        let applied: Vec<&RackOccupant> = self.claiming(Some(face), exclude).collect();
        for occupant in &applied {
            for unit in occupant.units().filter(|u| *u <= self.u_height) {
                slots[usize::from(unit)].occupant = Some(occupant.device_id);
            }
        }

        if collapse {
            for occupant in &applied {
                for unit in occupant.units().skip(1).filter(|u| *u <= self.u_height) {
                    removed[usize::from(unit)] = true;
                }
            }
        }

        self.display_order()
            .into_iter()
            .filter(|unit| !removed[usize::from(*unit)])
            .map(|unit| slots[usize::from(unit)].clone())
            .collect()
    }

    /// Collapsed front elevation
    pub fn front_elevation(&self) -> Vec<RackUnit> {
        self.elevation(RackFace::Front, &[], true)
    }

    /// Collapsed rear elevation
    pub fn rear_elevation(&self) -> Vec<RackUnit> {
        self.elevation(RackFace::Rear, &[], true)
    }

    /// Units not claimed on `face` (`None` = on either face)
    fn free_units(&self, face: Option<RackFace>, exclude: &[DeviceId]) -> BTreeSet<u16> {
        let mut free: BTreeSet<u16> = (1..=self.u_height).collect();
        for occupant in self.claiming(face, exclude) {
            for unit in occupant.units() {
                free.remove(&unit);
            }
        }
        free
    }

    /// Start units where a device of `height` fits, highest first
    ///
    /// `face = None` asks for room on both faces, as a full-depth device
    /// needs. A height of 0 is treated as 1.
    pub fn available_units(&self, height: u16, face: Option<RackFace>, exclude: &[DeviceId]) -> Vec<u16> {
        let height = height.max(1);
        if height > self.u_height {
            return Vec::new();
        }

        let free = self.free_units(face, exclude);
        (1..=self.u_height - height + 1)
            .rev()
            .filter(|start| {
                let top = u32::from(*start) + u32::from(height) - 1;
                (u32::from(*start)..=top).all(|unit| u16::try_from(unit).is_ok_and(|u| free.contains(&u)))
            })
            .collect()
    }

    /// [`available_units`](Self::available_units), failing on overlapping occupants
    ///
    /// Every occupant that would block the query is inspected, across the
    /// whole rack: an overlap anywhere on the queried faces fails every query
    /// until it is repaired, even far from the requested span. The error is
    /// attached to `position`.
    pub fn checked_available_units(
        &self,
        height: u16,
        face: Option<RackFace>,
        exclude: &[DeviceId],
    ) -> ValidationResult<Vec<u16>> {
        self.find_overlap(face, exclude)?;
        Ok(self.available_units(height, face, exclude))
    }

    fn find_overlap(&self, face: Option<RackFace>, exclude: &[DeviceId]) -> ValidationResult {
        let mut cells: HashMap<(u16, RackFace), DeviceId> = HashMap::new();

        for occupant in self.claiming(face, exclude) {
            for &occupied_face in occupant.faces() {
                if face.is_some_and(|f| f != occupied_face) {
                    continue;
                }
                for unit in occupant.units().filter(|u| *u <= self.u_height) {
                    if let Some(first) = cells.insert((unit, occupied_face), occupant.device_id) {
                        warn!(
                            rack_id = %self.rack_id,
                            unit,
                            face = %occupied_face,
                            first = %first,
                            second = %occupant.device_id,
                            "Overlapping rack occupants"
                        );
                        return Err(ValidationError::DataIntegrityAnomaly {
                            field: "position",
                            unit,
                            first,
                            second: occupant.device_id,
                        });
                    }
                }
            }
        }

        debug!(rack_id = %self.rack_id, cells = cells.len(), "Rack occupancy consistent");
        Ok(())
    }

    /// Percentage of front units in use, rounded down
    pub fn utilization(&self) -> u32 {
        let height = u32::from(self.u_height);
        if height == 0 {
            return 0;
        }
        let free = self.available_units(1, Some(RackFace::Front), &[]).len() as u32;
        (height - free) * 100 / height
    }

    /// Devices mounted at position 0
    pub fn zero_u_devices(&self) -> Vec<DeviceId> {
        self.occupants
            .iter()
            .filter(|o| o.position == Some(0))
            .map(|o| o.device_id)
            .collect()
    }

    /// Highest unit claimed by any occupant, including units above the rack top
    pub fn highest_occupied_unit(&self) -> Option<u16> {
        self.occupants.iter().filter_map(RackOccupant::top_unit).max()
    }
}
