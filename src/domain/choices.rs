// Copyright (c) 2025 - Cowboy AI, Inc.
//! Choice Enumerations
//!
//! Closed sets of values used across the inventory model: rack faces, widths
//! and types, sub-device roles, interface form factors, device and connection
//! statuses, and remote-management client names.
//!
//! Each enum serializes as a snake_case name. Numeric codes are kept only as
//! stable identifiers for import/export (`code()` / `from_code()`); nothing in
//! the model depends on their values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mounting side of a rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RackFace {
    Front,
    Rear,
}

impl RackFace {
    pub fn code(&self) -> u16 {
        match self {
            Self::Front => 0,
            Self::Rear => 1,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Front),
            1 => Some(Self::Rear),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Rear => "Rear",
        }
    }

    /// The other face of the rack
    pub fn opposite(&self) -> Self {
        match self {
            Self::Front => Self::Rear,
            Self::Rear => Self::Front,
        }
    }
}

impl fmt::Display for RackFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Rail-to-rail width of a rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RackWidth {
    #[default]
    Inches19,
    Inches23,
}

impl RackWidth {
    pub fn code(&self) -> u16 {
        match self {
            Self::Inches19 => 19,
            Self::Inches23 => 23,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            19 => Some(Self::Inches19),
            23 => Some(Self::Inches23),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Inches19 => "19 inches",
            Self::Inches23 => "23 inches",
        }
    }
}

impl fmt::Display for RackWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Physical construction of a rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RackType {
    TwoPostFrame,
    FourPostFrame,
    FourPostCabinet,
    WallFrame,
    WallCabinet,
}

impl RackType {
    pub fn code(&self) -> u16 {
        match self {
            Self::TwoPostFrame => 100,
            Self::FourPostFrame => 200,
            Self::FourPostCabinet => 300,
            Self::WallFrame => 1000,
            Self::WallCabinet => 1100,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            100 => Some(Self::TwoPostFrame),
            200 => Some(Self::FourPostFrame),
            300 => Some(Self::FourPostCabinet),
            1000 => Some(Self::WallFrame),
            1100 => Some(Self::WallCabinet),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TwoPostFrame => "2-post frame",
            Self::FourPostFrame => "4-post frame",
            Self::FourPostCabinet => "4-post cabinet",
            Self::WallFrame => "Wall-mounted frame",
            Self::WallCabinet => "Wall-mounted cabinet",
        }
    }
}

impl fmt::Display for RackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parent/child status of a device type
///
/// A device type with no role is stored as `Option::<SubdeviceRole>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdeviceRole {
    /// Houses child devices in device bays
    Parent,
    /// Installed inside a parent's device bay, never racked directly
    Child,
}

impl SubdeviceRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Parent => "Parent",
            Self::Child => "Child",
        }
    }
}

impl fmt::Display for SubdeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Grouping used when presenting form factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormFactorGroup {
    Virtual,
    EthernetFixed,
    EthernetModular,
    FibreChannel,
    Serial,
    Stacking,
    Other,
}

impl fmt::Display for FormFactorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Virtual => write!(f, "Virtual interfaces"),
            Self::EthernetFixed => write!(f, "Ethernet (fixed)"),
            Self::EthernetModular => write!(f, "Ethernet (modular)"),
            Self::FibreChannel => write!(f, "FibreChannel"),
            Self::Serial => write!(f, "Serial"),
            Self::Stacking => write!(f, "Stacking"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Physical/electrical type of a network interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFactor {
    Virtual,
    // Ethernet (fixed)
    Fixed100Me,
    Fixed1Ge,
    Fixed10Ge,
    // Ethernet (modular)
    Gbic1Ge,
    Sfp1Ge,
    #[default]
    SfpPlus10Ge,
    Xfp10Ge,
    Xenpak10Ge,
    X2,
    Sfp28,
    QsfpPlus40Ge,
    Cfp100Ge,
    Qsfp28,
    // FibreChannel
    Sfp1Gfc,
    Sfp2Gfc,
    Sfp4Gfc,
    SfpPlus8Gfc,
    SfpPlus16Gfc,
    // Serial
    T1,
    E1,
    T3,
    E3,
    // Stacking
    StackWise,
    StackWisePlus,
    FlexStack,
    FlexStackPlus,
    Other,
}

impl FormFactor {
    /// All form factors in presentation order
    pub const ALL: [FormFactor; 28] = [
        Self::Virtual,
        Self::Fixed100Me,
        Self::Fixed1Ge,
        Self::Fixed10Ge,
        Self::Gbic1Ge,
        Self::Sfp1Ge,
        Self::SfpPlus10Ge,
        Self::Xfp10Ge,
        Self::Xenpak10Ge,
        Self::X2,
        Self::Sfp28,
        Self::QsfpPlus40Ge,
        Self::Cfp100Ge,
        Self::Qsfp28,
        Self::Sfp1Gfc,
        Self::Sfp2Gfc,
        Self::Sfp4Gfc,
        Self::SfpPlus8Gfc,
        Self::SfpPlus16Gfc,
        Self::T1,
        Self::E1,
        Self::T3,
        Self::E3,
        Self::StackWise,
        Self::StackWisePlus,
        Self::FlexStack,
        Self::FlexStackPlus,
        Self::Other,
    ];

    pub fn code(&self) -> u16 {
        match self {
            Self::Virtual => 0,
            Self::Fixed100Me => 800,
            Self::Fixed1Ge => 1000,
            Self::Gbic1Ge => 1050,
            Self::Sfp1Ge => 1100,
            Self::Fixed10Ge => 1150,
            Self::SfpPlus10Ge => 1200,
            Self::Xfp10Ge => 1300,
            Self::Xenpak10Ge => 1310,
            Self::X2 => 1320,
            Self::Sfp28 => 1350,
            Self::QsfpPlus40Ge => 1400,
            Self::Cfp100Ge => 1500,
            Self::Qsfp28 => 1600,
            Self::Sfp1Gfc => 3010,
            Self::Sfp2Gfc => 3020,
            Self::Sfp4Gfc => 3040,
            Self::SfpPlus8Gfc => 3080,
            Self::SfpPlus16Gfc => 3160,
            Self::T1 => 4000,
            Self::E1 => 4010,
            Self::T3 => 4040,
            Self::E3 => 4050,
            Self::StackWise => 5000,
            Self::StackWisePlus => 5050,
            Self::FlexStack => 5100,
            Self::FlexStackPlus => 5150,
            Self::Other => 32767,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|ff| ff.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Virtual => "Virtual",
            Self::Fixed100Me => "100BASE-TX (10/100ME)",
            Self::Fixed1Ge => "1000BASE-T (1GE)",
            Self::Fixed10Ge => "10GBASE-T (10GE)",
            Self::Gbic1Ge => "GBIC (1GE)",
            Self::Sfp1Ge => "SFP (1GE)",
            Self::SfpPlus10Ge => "SFP+ (10GE)",
            Self::Xfp10Ge => "XFP (10GE)",
            Self::Xenpak10Ge => "XENPAK (10GE)",
            Self::X2 => "X2 (10GE)",
            Self::Sfp28 => "SFP28 (25GE)",
            Self::QsfpPlus40Ge => "QSFP+ (40GE)",
            Self::Cfp100Ge => "CFP (100GE)",
            Self::Qsfp28 => "QSFP28 (100GE)",
            Self::Sfp1Gfc => "SFP (1GFC)",
            Self::Sfp2Gfc => "SFP (2GFC)",
            Self::Sfp4Gfc => "SFP (4GFC)",
            Self::SfpPlus8Gfc => "SFP+ (8GFC)",
            Self::SfpPlus16Gfc => "SFP+ (16GFC)",
            Self::T1 => "T1 (1.544 Mbps)",
            Self::E1 => "E1 (2.048 Mbps)",
            Self::T3 => "T3 (45 Mbps)",
            Self::E3 => "E3 (34 Mbps)",
            Self::StackWise => "Cisco StackWise",
            Self::StackWisePlus => "Cisco StackWise Plus",
            Self::FlexStack => "Cisco FlexStack",
            Self::FlexStackPlus => "Cisco FlexStack Plus",
            Self::Other => "Other",
        }
    }

    pub fn group(&self) -> FormFactorGroup {
        match self {
            Self::Virtual => FormFactorGroup::Virtual,

            Self::Fixed100Me | Self::Fixed1Ge | Self::Fixed10Ge => FormFactorGroup::EthernetFixed,

            Self::Gbic1Ge
            | Self::Sfp1Ge
            | Self::SfpPlus10Ge
            | Self::Xfp10Ge
            | Self::Xenpak10Ge
            | Self::X2
            | Self::Sfp28
            | Self::QsfpPlus40Ge
            | Self::Cfp100Ge
            | Self::Qsfp28 => FormFactorGroup::EthernetModular,

            Self::Sfp1Gfc
            | Self::Sfp2Gfc
            | Self::Sfp4Gfc
            | Self::SfpPlus8Gfc
            | Self::SfpPlus16Gfc => FormFactorGroup::FibreChannel,

            Self::T1 | Self::E1 | Self::T3 | Self::E3 => FormFactorGroup::Serial,

            Self::StackWise | Self::StackWisePlus | Self::FlexStack | Self::FlexStackPlus => {
                FormFactorGroup::Stacking
            }

            Self::Other => FormFactorGroup::Other,
        }
    }

    /// Virtual interfaces never carry a physical connection
    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual)
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Operational status of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    #[default]
    Active,
    Offline,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Offline => write!(f, "Offline"),
        }
    }
}

/// Status of a console, power or interface connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Planned,
    #[default]
    Connected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planned => write!(f, "Planned"),
            Self::Connected => write!(f, "Connected"),
        }
    }
}

/// Remote-management client associated with a platform
///
/// Only the client name is exposed; dispatching to a client happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RpcClient {
    #[serde(rename = "juniper-junos")]
    JuniperJunos,
    #[serde(rename = "cisco-ios")]
    CiscoIos,
    #[serde(rename = "opengear")]
    Opengear,
}

impl RpcClient {
    /// Client name used to look up the actual client implementation
    pub fn name(&self) -> &'static str {
        match self {
            Self::JuniperJunos => "juniper-junos",
            Self::CiscoIos => "cisco-ios",
            Self::Opengear => "opengear",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::JuniperJunos => "Juniper Junos (NETCONF)",
            Self::CiscoIos => "Cisco IOS (SSH)",
            Self::Opengear => "Opengear (SSH)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "juniper-junos" => Some(Self::JuniperJunos),
            "cisco-ios" => Some(Self::CiscoIos),
            "opengear" => Some(Self::Opengear),
            _ => None,
        }
    }
}

impl fmt::Display for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
