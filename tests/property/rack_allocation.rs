// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Rack Space Allocation
//!
//! Random racks with random (possibly overlapping) occupants. Availability is
//! checked against a brute-force scan of every unit.

use std::collections::HashSet;

use dcim_inventory::domain::{DeviceId, Rack, RackFace, SiteId};
use dcim_inventory::{RackOccupant, RackUnitMap};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn rack_face() -> impl Strategy<Value = RackFace> {
    prop_oneof![Just(RackFace::Front), Just(RackFace::Rear)]
}

fn query_face() -> impl Strategy<Value = Option<RackFace>> {
    prop_oneof![Just(None), rack_face().prop_map(Some)]
}

fn occupant() -> impl Strategy<Value = RackOccupant> {
    (0u16..=50, rack_face(), 0u16..=4, any::<bool>()).prop_map(
        |(position, face, u_height, is_full_depth)| RackOccupant {
            device_id: DeviceId::new(),
            position: Some(position),
            face: Some(face),
            u_height,
            is_full_depth,
        },
    )
}

fn rack_with_occupants() -> impl Strategy<Value = (Rack, Vec<RackOccupant>)> {
    (1u16..=48, any::<bool>(), prop::collection::vec(occupant(), 0..8)).prop_map(
        |(height, desc_units, occupants)| {
            let rack = Rack::new(SiteId::new(), "R1", height)
                .expect("height in range")
                .with_descending_units(desc_units);
            (rack, occupants)
        },
    )
}

/// Units claimed on `face` (`None` = either face) by non-excluded occupants
fn claimed(occupants: &[RackOccupant], face: Option<RackFace>, exclude: &[DeviceId]) -> HashSet<u16> {
    occupants
        .iter()
        .filter(|o| !exclude.contains(&o.device_id))
        .filter(|o| o.position.is_some_and(|p| p > 0))
        .filter(|o| match face {
            None => true,
            Some(face) => o.is_full_depth || o.face == Some(face),
        })
        .flat_map(|o| o.units().collect::<Vec<_>>())
        .collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: An uncollapsed elevation has one row per unit
    #[test]
    fn prop_elevation_length_equals_height((rack, occupants) in rack_with_occupants(), face in rack_face()) {
        let map = RackUnitMap::new(&rack, occupants);
        let units = map.elevation(face, &[], false);

        prop_assert_eq!(units.len(), usize::from(rack.u_height));
        let numbers: HashSet<u16> = units.iter().map(|u| u.unit).collect();
        prop_assert_eq!(numbers, (1..=rack.u_height).collect::<HashSet<_>>());
    }

    /// Property: Elevations run from the top of the rack to the bottom
    #[test]
    fn prop_elevation_order_follows_numbering((rack, occupants) in rack_with_occupants()) {
        let map = RackUnitMap::new(&rack, occupants);
        let units: Vec<u16> = map.elevation(RackFace::Front, &[], false).iter().map(|u| u.unit).collect();
        prop_assert_eq!(units, rack.units());
    }

    /// Property: A collapsed elevation shows each device at most once
    #[test]
    fn prop_collapsed_elevation_lists_devices_once((rack, occupants) in rack_with_occupants(), face in rack_face()) {
        let map = RackUnitMap::new(&rack, occupants);
        let mut seen = HashSet::new();
        for unit in map.elevation(face, &[], true) {
            if let Some(device_id) = unit.occupant {
                prop_assert!(seen.insert(device_id), "{} shown twice", device_id);
            }
        }
    }

    /// Property: Every returned start fits, and every fitting start is returned
    #[test]
    fn prop_available_units_match_brute_force(
        (rack, occupants) in rack_with_occupants(),
        height in 0u16..=6,
        face in query_face(),
    ) {
        let map = RackUnitMap::new(&rack, occupants.clone());
        let taken = claimed(&occupants, face, &[]);
        let span = height.max(1);

        let expected: Vec<u16> = (1..=rack.u_height)
            .rev()
            .filter(|start| {
                let top = u32::from(*start) + u32::from(span) - 1;
                top <= u32::from(rack.u_height) && (*start..*start + span).all(|u| !taken.contains(&u))
            })
            .collect();

        prop_assert_eq!(map.available_units(height, face, &[]), expected);
    }

    /// Property: Availability is a pure function of the snapshot
    #[test]
    fn prop_available_units_idempotent(
        (rack, occupants) in rack_with_occupants(),
        height in 1u16..=4,
        face in query_face(),
    ) {
        let map = RackUnitMap::new(&rack, occupants);
        let first = map.available_units(height, face, &[]);
        let second = map.available_units(height, face, &[]);
        prop_assert_eq!(first, second);
    }

    /// Property: Placing a device then excluding it restores availability
    #[test]
    fn prop_place_then_exclude_round_trip(
        (rack, occupants) in rack_with_occupants(),
        height in 1u16..=4,
        face in rack_face(),
        is_full_depth in any::<bool>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let query = if is_full_depth { None } else { Some(face) };
        let before_map = RackUnitMap::new(&rack, occupants.clone());
        let candidates = before_map.available_units(height, query, &[]);
        prop_assume!(!candidates.is_empty());

        let device = RackOccupant {
            device_id: DeviceId::new(),
            position: Some(candidates[pick.index(candidates.len())]),
            face: Some(face),
            u_height: height,
            is_full_depth,
        };
        let mut placed = occupants.clone();
        placed.push(device);
        let after_map = RackUnitMap::new(&rack, placed);

        prop_assert_eq!(
            after_map.available_units(height, query, &[device.device_id]),
            candidates
        );
        prop_assert!(!after_map
            .available_units(height, query, &[])
            .contains(&device.position.unwrap_or_default()));
    }

    /// Property: Utilization stays within 0..=100 and counts front units
    #[test]
    fn prop_utilization_bounded((rack, occupants) in rack_with_occupants()) {
        let map = RackUnitMap::new(&rack, occupants.clone());
        let utilization = map.utilization();
        prop_assert!(utilization <= 100);

        let used = claimed(&occupants, Some(RackFace::Front), &[])
            .into_iter()
            .filter(|u| *u <= rack.u_height)
            .count() as u32;
        prop_assert_eq!(utilization, used * 100 / u32::from(rack.u_height));
    }

    /// Property: Checked availability agrees with plain availability when it succeeds
    #[test]
    fn prop_checked_agrees_when_consistent(
        (rack, occupants) in rack_with_occupants(),
        height in 1u16..=4,
        face in query_face(),
    ) {
        let map = RackUnitMap::new(&rack, occupants);
        if let Ok(checked) = map.checked_available_units(height, face, &[]) {
            prop_assert_eq!(checked, map.available_units(height, face, &[]));
        }
    }
}
