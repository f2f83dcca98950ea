// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects
//!
//! Interface MAC addresses and device primary IP addresses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32 for IPv4, 0-128 for IPv6)")]
    InvalidPrefixLength(u8),

    #[error("Invalid MAC address format: {0}")]
    InvalidMacAddress(String),
}

/// IP address with prefix length, as assigned to a device
///
/// # Examples
///
/// ```rust
/// use dcim_inventory::domain::IpAddressWithCidr;
///
/// let ip = IpAddressWithCidr::new("192.0.2.10/24").unwrap();
/// assert!(ip.is_ipv4());
/// assert_eq!(ip.prefix_length(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpAddressWithCidr {
    address: IpAddr,
    prefix_length: u8,
}

impl IpAddressWithCidr {
    /// Parse `address/prefix`; a bare address gets a host prefix (/32 or /128)
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, NetworkError> {
        let cidr = cidr.as_ref();

        let (addr_str, prefix) = match cidr.split_once('/') {
            Some((addr_str, prefix_str)) => {
                let prefix = prefix_str
                    .parse::<u8>()
                    .map_err(|_| NetworkError::InvalidCidr(cidr.to_string()))?;
                (addr_str, Some(prefix))
            }
            None => (cidr, None),
        };

        let address = IpAddr::from_str(addr_str)
            .map_err(|_| NetworkError::InvalidIpAddress(addr_str.to_string()))?;

        let max_prefix = Self::max_prefix(&address);
        let prefix_length = prefix.unwrap_or(max_prefix);
        if prefix_length > max_prefix {
            return Err(NetworkError::InvalidPrefixLength(prefix_length));
        }

        Ok(Self {
            address,
            prefix_length,
        })
    }

    fn max_prefix(address: &IpAddr) -> u8 {
        match address {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        }
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    pub fn is_ipv4(&self) -> bool {
        self.address.is_ipv4()
    }

    pub fn is_ipv6(&self) -> bool {
        self.address.is_ipv6()
    }
}

impl fmt::Display for IpAddressWithCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_length)
    }
}

impl FromStr for IpAddressWithCidr {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for IpAddressWithCidr {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IpAddressWithCidr> for String {
    fn from(ip: IpAddressWithCidr) -> Self {
        ip.to_string()
    }
}

/// 48-bit MAC address of an interface
///
/// Accepts colon, hyphen or dot separated input (or none at all) and renders
/// in the uppercase colon-separated form, e.g. `00:1B:21:3C:4D:5E`.
///
/// # Examples
///
/// ```rust
/// use dcim_inventory::domain::MacAddress;
///
/// let mac = MacAddress::new("001b.213c.4d5e").unwrap();
/// assert_eq!(mac.to_string(), "00:1B:21:3C:4D:5E");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(mac: impl AsRef<str>) -> Result<Self, NetworkError> {
        let mac = mac.as_ref();
        let invalid = || NetworkError::InvalidMacAddress(mac.to_string());

        let digits: String = mac
            .chars()
            .filter(|ch| !matches!(ch, ':' | '-' | '.'))
            .collect();
        if digits.len() != 12 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut octets = [0u8; 6];
        for (octet, chunk) in octets.iter_mut().zip(digits.as_bytes().chunks(2)) {
            let hex = std::str::from_utf8(chunk).map_err(|_| invalid())?;
            *octet = u8::from_str_radix(hex, 16).map_err(|_| invalid())?;
        }

        Ok(Self(octets))
    }

    pub fn from_octets(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl FromStr for MacAddress {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}
