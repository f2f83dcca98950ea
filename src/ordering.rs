// Copyright (c) 2025 - Cowboy AI, Inc.
//! Slot-aware Ordering of Component Names
//!
//! Interface names encode their physical position (`et-0/1/10`,
//! `xe-0/1/1:3`), so plain lexical sorting puts `et-0/1/10` before
//! `et-0/1/2`. This module derives sort keys from the structured part of a
//! name instead.
//!
//! # Keys
//!
//! - [`NameOrderKey`]: up to three slash-delimited integers anchored at the end
//!   of the name (`a/b/c`) followed by an optional `:d` subchannel. Used for
//!   interfaces and interface templates.
//! - [`NumericSuffixKey`]: a bare trailing integer (`Port 10`). Used for
//!   console server ports.
//! - [`padded_name_key`]: a single string whose lexical order matches numeric
//!   order. Used for power outlets and anywhere only key extraction is
//!   available.
//!
//! ```text
//! et-0/0/0  et-0/0/1  et-0/1/0  xe-0/1/1:0  xe-0/1/1:1  et-0/1/2  et-0/1/10  et-1/0/0  vlan1  vlan10
//! ```
//!
//! Names without a slash path (`vlan10`) have no numeric fields at all; they
//! sort after every slotted name and among themselves by the tie-break key,
//! which is lexical. `vlan10` therefore sorts before `vlan2`.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Trailing `[a/]b/c[:d]` slot path
static SLOT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:([0-9]+)/)?([0-9]+)/([0-9]+)(?::([0-9]+))?$").expect("valid regex")
});

/// Trailing digit run
static NUMERIC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+$").expect("valid regex"));

static NON_NUMERIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9]+").expect("valid regex"));

static NUMERIC_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9/]+$").expect("valid regex"));

/// Width the numeric tail is padded to by [`padded_name_key`]
pub const NAME_PAD_WIDTH: usize = 8;

/// Anything listed by name
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl Named for &str {
    fn name(&self) -> &str {
        self
    }
}

/// One numeric field of a [`NameOrderKey`]
///
/// `Missing` orders after every index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Index(u64),
    Missing,
}

impl Slot {
    fn parse(digits: Option<regex::Match<'_>>) -> Self {
        digits
            .and_then(|m| m.as_str().parse().ok())
            .map_or(Self::Missing, Self::Index)
    }

    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Index(value) => Some(*value),
            Self::Missing => None,
        }
    }
}

/// Sort key `(a, b, c, d)` for names shaped like `<prefix>a/b/c:d`
///
/// The path needs at least one `/`; shorter paths are right-aligned so
/// `Gi0/1` yields `(None, 0, 1, None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameOrderKey([Slot; 4]);

impl NameOrderKey {
    pub fn parse(name: &str) -> Self {
        match SLOT_PATH.captures(name) {
            Some(caps) => Self([
                Slot::parse(caps.get(1)),
                Slot::parse(caps.get(2)),
                Slot::parse(caps.get(3)),
                Slot::parse(caps.get(4)),
            ]),
            None => Self([Slot::Missing; 4]),
        }
    }

    /// The four fields, `None` where absent
    pub fn fields(&self) -> (Option<u64>, Option<u64>, Option<u64>, Option<u64>) {
        let [a, b, c, d] = self.0;
        (a.value(), b.value(), c.value(), d.value())
    }

    /// Whether any numeric slot path was found
    pub fn has_path(&self) -> bool {
        self.0.iter().any(|slot| *slot != Slot::Missing)
    }
}

/// Default tie-break: case-insensitive name, then exact name
fn lexical_tie_break(name: &str) -> (String, String) {
    (name.to_lowercase(), name.to_string())
}

/// Compare two names by slot path, falling back to lexical order
pub fn cmp_names(a: &str, b: &str) -> Ordering {
    NameOrderKey::parse(a)
        .cmp(&NameOrderKey::parse(b))
        .then_with(|| lexical_tie_break(a).cmp(&lexical_tie_break(b)))
}

/// Sort by slot path with the default lexical tie-break
pub fn sort_by_name_order<T: Named>(items: &mut [T]) {
    items.sort_by_cached_key(|item| {
        (
            NameOrderKey::parse(item.name()),
            lexical_tie_break(item.name()),
        )
    });
}

/// Sort by slot path with a caller-supplied tie-break key
pub fn sort_by_name_order_then<T, K, F>(items: &mut [T], mut secondary: F)
where
    T: Named,
    K: Ord,
    F: FnMut(&T) -> K,
{
    items.sort_by_cached_key(|item| (NameOrderKey::parse(item.name()), secondary(item)));
}

/// Sort key for names ending in a bare integer, e.g. `Port 10`
///
/// Orders names that have digits first, then by the text before the digits,
/// then by the integer value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericSuffixKey {
    prefix: String,
    number: Option<u64>,
}

impl NumericSuffixKey {
    pub fn parse(name: &str) -> Self {
        match NUMERIC_SUFFIX.find(name) {
            Some(m) => Self {
                prefix: name[..m.start()].to_string(),
                number: m.as_str().parse().ok(),
            },
            None => Self {
                prefix: name.to_string(),
                number: None,
            },
        }
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Ord for NumericSuffixKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .is_none()
            .cmp(&other.number.is_none())
            .then_with(|| self.prefix.cmp(&other.prefix))
            .then_with(|| self.number.cmp(&other.number))
    }
}

impl PartialOrd for NumericSuffixKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort by trailing integer, ties broken by exact name
pub fn sort_by_numeric_suffix<T: Named>(items: &mut [T]) {
    items.sort_by_cached_key(|item| (NumericSuffixKey::parse(item.name()), item.name().to_string()));
}

/// Single-string sort key with the numeric tail zero-padded
///
/// Concatenates the leading non-numeric text with the trailing `[0-9/]+`
/// token left-padded with `0` to [`NAME_PAD_WIDTH`]. Tokens longer than the
/// width are cut to their first [`NAME_PAD_WIDTH`] characters. Text between
/// the prefix and the tail does not take part in the key.
///
/// ```rust
/// use dcim_inventory::ordering::padded_name_key;
///
/// assert_eq!(padded_name_key("AA2"), "AA00000002");
/// assert_eq!(padded_name_key("AA10"), "AA00000010");
/// assert!(padded_name_key("AA2") < padded_name_key("AA10"));
/// ```
pub fn padded_name_key(name: &str) -> String {
    let prefix = NON_NUMERIC_PREFIX.find(name).map_or("", |m| m.as_str());
    let tail = NUMERIC_TAIL.find(name).map_or(String::new(), |m| {
        let token: String = m.as_str().chars().take(NAME_PAD_WIDTH).collect();
        format!("{:0>width$}", token, width = NAME_PAD_WIDTH)
    });
    format!("{prefix}{tail}")
}

/// Sort by [`padded_name_key`], ties broken by exact name
pub fn sort_by_padded_name<T: Named>(items: &mut [T]) {
    items.sort_by_cached_key(|item| (padded_name_key(item.name()), item.name().to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        sort_by_name_order(&mut names);
        names
    }

    #[test]
    fn test_key_fields() {
        assert_eq!(NameOrderKey::parse("et-0/1/10").fields(), (Some(0), Some(1), Some(10), None));
        assert_eq!(NameOrderKey::parse("xe-0/1/1:3").fields(), (Some(0), Some(1), Some(1), Some(3)));
        assert_eq!(NameOrderKey::parse("Gi0/1").fields(), (None, Some(0), Some(1), None));
        assert_eq!(NameOrderKey::parse("vlan10").fields(), (None, None, None, None));
        assert_eq!(NameOrderKey::parse("eth1:2").fields(), (None, None, None, None));
    }

    #[test]
    fn test_only_trailing_three_fields_count() {
        assert_eq!(NameOrderKey::parse("fpc1/2/3/4").fields(), (Some(2), Some(3), Some(4), None));
    }

    #[test]
    fn test_missing_sorts_last() {
        assert!(Slot::Index(u64::MAX) < Slot::Missing);
        assert!(NameOrderKey::parse("et-9/9/9") < NameOrderKey::parse("vlan1"));
        assert!(NameOrderKey::parse("xe-0/1/1:0") < NameOrderKey::parse("xe-0/1/1"));
        assert!(!NameOrderKey::parse("lo").has_path());
    }

    #[test]
    fn test_documented_order() {
        let expected = vec![
            "et-0/0/0", "et-0/0/1", "et-0/1/0", "xe-0/1/1:0", "xe-0/1/1:1", "et-0/1/2",
            "et-0/1/10", "et-1/0/0", "vlan1", "vlan10",
        ];
        let shuffled = [
            "vlan10", "et-0/1/10", "xe-0/1/1:1", "et-1/0/0", "et-0/0/1", "vlan1", "et-0/1/2",
            "et-0/0/0", "xe-0/1/1:0", "et-0/1/0",
        ];
        assert_eq!(sorted(&shuffled), expected);
    }

    #[test]
    fn test_unslotted_names_are_lexical() {
        assert_eq!(sorted(&["vlan10", "vlan1", "vlan2"]), vec!["vlan1", "vlan10", "vlan2"]);
    }

    #[test]
    fn test_tie_break_case_insensitive() {
        assert_eq!(sorted(&["Lo0", "irb", "em0"]), vec!["em0", "irb", "Lo0"]);
        assert_eq!(cmp_names("ge-0/0/1", "xe-0/0/1"), Ordering::Less);
    }

    #[test]
    fn test_custom_tie_break() {
        let mut names = vec!["b-0/0/1".to_string(), "a-0/0/1".to_string(), "c-0/0/0".to_string()];
        sort_by_name_order_then(&mut names, |name| std::cmp::Reverse(name.clone()));
        assert_eq!(names, vec!["c-0/0/0", "b-0/0/1", "a-0/0/1"]);
    }

    #[test]
    fn test_numeric_suffix_order() {
        let mut names: Vec<String> = ["Port 10", "Port 2", "Console", "Port 1", "Aux 3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_by_numeric_suffix(&mut names);
        assert_eq!(names, vec!["Aux 3", "Port 1", "Port 2", "Port 10", "Console"]);

        let key = NumericSuffixKey::parse("Port 10");
        assert_eq!(key.prefix(), "Port ");
        assert_eq!(key.number(), Some(10));
    }

    #[test]
    fn test_padded_key() {
        assert_eq!(padded_name_key("AA1/2"), "AA000001/2");
        assert_eq!(padded_name_key("12"), "00000012");
        assert_eq!(padded_name_key("PSU"), "PSU");
        assert_eq!(padded_name_key("XX123456789"), "XX12345678");

        let mut names: Vec<String> = ["AB10", "AB2", "AA9"].iter().map(|s| s.to_string()).collect();
        sort_by_padded_name(&mut names);
        assert_eq!(names, vec!["AA9", "AB2", "AB10"]);
    }
}
