// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Domain Invariants
//!
//! Field-scoped validation for inventory entities. Every failure names the
//! attribute that must change, so callers can attach the message to the
//! offending input instead of rejecting the whole operation blindly.
//!
//! # Invariant Categories
//!
//! 1. **Structural Invariants**: value ranges (rack height, names)
//! 2. **Definition Invariants**: a device type's flags agree with its templates
//! 3. **Occupancy Invariants**: see [`crate::placement`]
//!
//! All functions are pure and return [`ValidationResult`].

use std::collections::HashSet;

use crate::domain::device_type::DeviceType;
use crate::domain::ids::EntityId;
use crate::domain::choices::SubdeviceRole;
use crate::ordering::Named;

/// Validation result with field information
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Field-scoped validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Input breaks a rule; correcting `field` resolves it
    #[error("{field}: {message}")]
    ConstraintViolation { field: &'static str, message: String },

    /// Two installed devices already claim the same unit
    #[error("{field}: devices {first} and {second} both occupy U{unit}")]
    DataIntegrityAnomaly {
        field: &'static str,
        unit: u16,
        first: EntityId<crate::domain::Device>,
        second: EntityId<crate::domain::Device>,
    },
}

impl ValidationError {
    pub fn constraint(field: &'static str, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            field,
            message: message.into(),
        }
    }

    /// Name of the attribute the error is attached to
    pub fn field(&self) -> &'static str {
        match self {
            Self::ConstraintViolation { field, .. } | Self::DataIntegrityAnomaly { field, .. } => field,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::ConstraintViolation { message, .. } => message.clone(),
            Self::DataIntegrityAnomaly { .. } => self.to_string(),
        }
    }

    /// Re-attach the error to another field
    pub fn with_field(self, field: &'static str) -> Self {
        match self {
            Self::ConstraintViolation { message, .. } => Self::ConstraintViolation { field, message },
            Self::DataIntegrityAnomaly {
                unit,
                first,
                second,
                ..
            } => Self::DataIntegrityAnomaly {
                field,
                unit,
                first,
                second,
            },
        }
    }
}

/// Smallest permitted rack height
pub const MIN_RACK_HEIGHT: u16 = 1;

/// Largest permitted rack height
pub const MAX_RACK_HEIGHT: u16 = 100;

/// Validate a rack height
///
/// # Rules
/// - 1 ≤ height ≤ `max_height` (100 unless configured lower)
pub fn validate_rack_height(u_height: u16, max_height: u16) -> ValidationResult {
    if u_height < MIN_RACK_HEIGHT || u_height > max_height {
        return Err(ValidationError::constraint(
            "u_height",
            format!(
                "Rack height must be between {}U and {}U.",
                MIN_RACK_HEIGHT, max_height
            ),
        ));
    }
    Ok(())
}

/// Validate a required free-form name
pub fn validate_name(field: &'static str, name: &str, max_length: usize) -> ValidationResult {
    if name.trim().is_empty() {
        return Err(ValidationError::constraint(field, "This field is required."));
    }
    if name.chars().count() > max_length {
        return Err(ValidationError::constraint(
            field,
            format!("Ensure this value has at most {} characters.", max_length),
        ));
    }
    Ok(())
}

/// Validate that a device type's flags agree with its templates and role
///
/// # Rules
/// - Console-server port templates require `is_console_server`
/// - Power outlet templates require `is_pdu`
/// - Non-management interface templates require `is_network_device`
/// - Device bay templates require the parent role
/// - Child types must be 0U, and only child types may be 0U
/// - Template names are unique within each template kind
pub fn validate_device_type_definition(device_type: &DeviceType) -> ValidationResult {
    let templates = &device_type.templates;

    unique_template_names("console port", &templates.console_ports)?;
    unique_template_names("console server port", &templates.console_server_ports)?;
    unique_template_names("power port", &templates.power_ports)?;
    unique_template_names("power outlet", &templates.power_outlets)?;
    unique_template_names("interface", &templates.interfaces)?;
    unique_template_names("device bay", &templates.device_bays)?;

    if !device_type.is_console_server && !templates.console_server_ports.is_empty() {
        return Err(ValidationError::constraint(
            "is_console_server",
            "Must delete all console server port templates associated with this device before \
             declassifying it as a console server.",
        ));
    }

    if !device_type.is_pdu && !templates.power_outlets.is_empty() {
        return Err(ValidationError::constraint(
            "is_pdu",
            "Must delete all power outlet templates associated with this device before \
             declassifying it as a PDU.",
        ));
    }

    if !device_type.is_network_device && templates.interfaces.iter().any(|t| !t.mgmt_only) {
        return Err(ValidationError::constraint(
            "is_network_device",
            "Must delete all non-management-only interface templates associated with this \
             device before declassifying it as a network device.",
        ));
    }

    if device_type.subdevice_role != Some(SubdeviceRole::Parent) && !templates.device_bays.is_empty() {
        return Err(ValidationError::constraint(
            "subdevice_role",
            "Must delete all device bay templates associated with this device before \
             declassifying it as a parent device.",
        ));
    }

    if device_type.is_child_device() && device_type.u_height != 0 {
        return Err(ValidationError::constraint(
            "u_height",
            "Child device types must be 0U.",
        ));
    }

    if device_type.u_height == 0 && !device_type.is_child_device() {
        return Err(ValidationError::constraint(
            "u_height",
            "Only child device types may be 0U.",
        ));
    }

    Ok(())
}

fn unique_template_names<T: Named>(kind: &str, templates: &[T]) -> ValidationResult {
    let mut seen = HashSet::new();
    for template in templates {
        if !seen.insert(template.name()) {
            return Err(ValidationError::constraint(
                "name",
                format!("A {} template named {:?} already exists.", kind, template.name()),
            ));
        }
    }
    Ok(())
}
