// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Configuration
//!
//! Settings are read from environment variables, each falling back to a
//! default when unset:
//!
//! | Variable                   | Default | Meaning                               |
//! |----------------------------|---------|---------------------------------------|
//! | `DCIM_PREFER_IPV4`         | `false` | Pick IPv4 as a device's primary IP    |
//! | `DCIM_DEFAULT_RACK_HEIGHT` | `42`    | Height of racks created without one   |
//! | `DCIM_MAX_RACK_HEIGHT`     | `100`   | Upper bound accepted for rack heights |

use serde::{Deserialize, Serialize};

use crate::domain::invariants::{MAX_RACK_HEIGHT, MIN_RACK_HEIGHT};
use crate::errors::{DcimError, DcimResult};

/// Inventory-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcimConfig {
    /// Prefer IPv4 over IPv6 when both primary addresses are set
    pub prefer_ipv4: bool,
    pub default_rack_height: u16,
    pub max_rack_height: u16,
}

impl Default for DcimConfig {
    fn default() -> Self {
        Self {
            prefer_ipv4: false,
            default_rack_height: 42,
            max_rack_height: MAX_RACK_HEIGHT,
        }
    }
}

impl DcimConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> DcimResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DcimResult<Self> {
        let defaults = Self::default();

        let prefer_ipv4 = match lookup("DCIM_PREFER_IPV4") {
            Some(value) => parse_bool("DCIM_PREFER_IPV4", &value)?,
            None => defaults.prefer_ipv4,
        };

        let default_rack_height = match lookup("DCIM_DEFAULT_RACK_HEIGHT") {
            Some(value) => parse_height("DCIM_DEFAULT_RACK_HEIGHT", &value)?,
            None => defaults.default_rack_height,
        };

        let max_rack_height = match lookup("DCIM_MAX_RACK_HEIGHT") {
            Some(value) => parse_height("DCIM_MAX_RACK_HEIGHT", &value)?,
            None => defaults.max_rack_height,
        };

        let config = Self {
            prefer_ipv4,
            default_rack_height,
            max_rack_height,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DcimResult<()> {
        if self.default_rack_height > self.max_rack_height {
            return Err(DcimError::Configuration(format!(
                "default rack height {}U exceeds maximum {}U",
                self.default_rack_height, self.max_rack_height
            )));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> DcimResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(DcimError::Configuration(format!(
            "{key}: expected a boolean, got {other:?}"
        ))),
    }
}

fn parse_height(key: &str, value: &str) -> DcimResult<u16> {
    let height: u16 = value
        .trim()
        .parse()
        .map_err(|_| DcimError::Configuration(format!("{key}: expected a number, got {value:?}")))?;
    if !(MIN_RACK_HEIGHT..=MAX_RACK_HEIGHT).contains(&height) {
        return Err(DcimError::Configuration(format!(
            "{key}: must be between {MIN_RACK_HEIGHT} and {MAX_RACK_HEIGHT}, got {height}"
        )));
    }
    Ok(height)
}
