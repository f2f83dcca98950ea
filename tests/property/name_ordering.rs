// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Slot-Aware Name Ordering

use std::cmp::Ordering;

use dcim_inventory::ordering::{cmp_names, padded_name_key, sort_by_name_order};
use dcim_inventory::NameOrderKey;
use proptest::prelude::*;

fn slotted_name() -> impl Strategy<Value = (String, (u64, u64, u64, Option<u64>))> {
    (
        prop_oneof![Just("et-"), Just("xe-"), Just("ge-")],
        0u64..4,
        0u64..4,
        0u64..64,
        prop::option::of(0u64..4),
    )
        .prop_map(|(prefix, a, b, c, d)| {
            let name = match d {
                Some(d) => format!("{prefix}{a}/{b}/{c}:{d}"),
                None => format!("{prefix}{a}/{b}/{c}"),
            };
            (name, (a, b, c, d))
        })
}

fn any_name() -> impl Strategy<Value = String> {
    prop_oneof![
        slotted_name().prop_map(|(name, _)| name),
        "[a-z]{1,6}[0-9]{0,3}",
        "[A-Za-z]{1,4}[0-9]{1,2}/[0-9]{1,2}",
    ]
}

proptest! {
    /// Property: The parsed key recovers the generated slot numbers
    #[test]
    fn prop_key_recovers_slots((name, (a, b, c, d)) in slotted_name()) {
        prop_assert_eq!(NameOrderKey::parse(&name).fields(), (Some(a), Some(b), Some(c), d));
    }

    /// Property: Sorting yields a permutation ordered by `cmp_names`
    #[test]
    fn prop_sort_is_ordered_permutation(names in prop::collection::vec(any_name(), 0..24)) {
        let mut sorted = names.clone();
        sort_by_name_order(&mut sorted);

        for pair in sorted.windows(2) {
            prop_assert_ne!(cmp_names(&pair[0], &pair[1]), Ordering::Greater);
        }

        let mut expected = names.clone();
        expected.sort();
        let mut actual = sorted.clone();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    /// Property: Slotted names always precede names without a slot path
    #[test]
    fn prop_slotted_before_unslotted((slotted, _) in slotted_name(), plain in "[a-z]{1,8}[0-9]{0,3}") {
        prop_assert_eq!(cmp_names(&slotted, &plain), Ordering::Less);
    }

    /// Property: Same prefix, numeric order of the last slot
    #[test]
    fn prop_numeric_not_lexical(c1 in 0u64..1000, c2 in 0u64..1000) {
        let first = format!("et-0/0/{c1}");
        let second = format!("et-0/0/{c2}");
        prop_assert_eq!(cmp_names(&first, &second), c1.cmp(&c2));
    }

    /// Property: Padded keys order trailing numbers numerically
    #[test]
    fn prop_padded_key_numeric(n1 in 0u32..10_000_000, n2 in 0u32..10_000_000) {
        let k1 = padded_name_key(&format!("AA{n1}"));
        let k2 = padded_name_key(&format!("AA{n2}"));
        prop_assert_eq!(k1.cmp(&k2), n1.cmp(&n2));
    }
}
