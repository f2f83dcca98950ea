// Copyright (c) 2025 - Cowboy AI, Inc.
//! Rack Elevation Report
//!
//! Loads a JSON inventory snapshot and prints the front and rear elevation of
//! every rack with its utilization.
//!
//! Run with: cargo run --bin rack-elevation -- inventory.json
//!
//! The snapshot path is taken from the first argument, or from
//! `DCIM_SNAPSHOT` when no argument is given. Inventory settings are read
//! from `DCIM_*` environment variables (see `DcimConfig`).

use anyhow::{Context, Result};
use dcim_inventory::domain::{DeviceId, RackFace};
use dcim_inventory::{DcimConfig, InMemoryInventory, InventoryRepository, InventoryService, RackUnit};
use tracing::{info, warn};

/// Label for one elevation row
fn label<R: InventoryRepository>(service: &InventoryService<R>, occupant: Option<DeviceId>) -> String {
    let Some(device_id) = occupant else {
        return "·".to_string();
    };

    let repository = service.repository();
    let described = repository.device(device_id).and_then(|device| {
        let device_type = repository.device_type(device.device_type_id)?;
        let rack = repository.rack(device.rack_id)?;
        Ok(format!("{} [{}]", device.display_name(&device_type, &rack), device_type.model))
    });

    described.unwrap_or_else(|err| {
        warn!(device_id = %device_id, error = %err, "Could not describe occupant");
        device_id.to_string()
    })
}

fn print_face<R: InventoryRepository>(service: &InventoryService<R>, face: RackFace, units: &[RackUnit]) {
    println!("  {}:", face);
    for unit in units {
        println!("    {:>4}  {}", unit.name, label(service, unit.occupant));
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DcimConfig::from_env().context("Failed to load DCIM configuration")?;
    info!("📋 Configuration loaded:");
    info!("  - Default rack height: {}U", config.default_rack_height);
    info!("  - Maximum rack height: {}U", config.max_rack_height);
    info!("  - Prefer IPv4: {}", config.prefer_ipv4);

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DCIM_SNAPSHOT").ok())
        .context("No snapshot given. Pass a path or set DCIM_SNAPSHOT")?;

    info!("📂 Loading inventory snapshot from {}", path);
    let json = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
    let inventory = InMemoryInventory::from_json(&json).context("Failed to parse inventory snapshot")?;
    info!(
        "✅ Loaded {} racks, {} devices",
        inventory.racks.len(),
        inventory.devices.len()
    );

    let service = InventoryService::new(inventory, config);

    for (rack, map) in service.rack_elevations()? {
        println!(
            "{} ({}U, {}% utilized)",
            rack.display_name(),
            rack.u_height,
            map.utilization()
        );

        print_face(&service, RackFace::Front, &map.front_elevation());
        print_face(&service, RackFace::Rear, &map.rear_elevation());

        let zero_u = map.zero_u_devices();
        if !zero_u.is_empty() {
            println!("  0U:");
            for device_id in zero_u {
                println!("          {}", label(&service, Some(device_id)));
            }
        }

        if let Err(err) = map.checked_available_units(1, None, &[]) {
            warn!(rack = %rack.name, "⚠️  {}", err);
        }
        println!();
    }

    Ok(())
}
