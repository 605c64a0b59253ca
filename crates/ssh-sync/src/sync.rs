//! Sync pipeline: fetch devices, fetch VMs, render, write.
//!
//! Both fetches must succeed before anything is rendered; the first failure
//! aborts the run with nothing written.

use crate::config::Settings;
use crate::error::SyncError;
use crate::render::{render, RenderContext};
use crate::writer::{deliver, Delivery};
use netbox_client::{
    InventoryRecord, NetBoxClientTrait, NetBoxError, PaginatedResponse, DEVICES_ENDPOINT,
    VIRTUAL_MACHINES_ENDPOINT,
};
use std::io::Write;
use tracing::{error, info};

/// Page size for both inventory queries; larger inventories are truncated.
pub const PAGE_LIMIT: &str = "1000";

/// Filters sent with both inventory queries.
pub const INVENTORY_FILTERS: &[(&str, &str)] =
    &[("primary_ip4__empty", "False"), ("limit", PAGE_LIMIT)];

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub devices: usize,
    pub virtual_machines: usize,
    /// Host blocks in the rendered config
    pub hosts: usize,
    pub delivery: Delivery,
}

/// Endpoint plus query string, as used in progress and error messages.
pub fn endpoint_label(endpoint: &str) -> String {
    let query = INVENTORY_FILTERS
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}/?{}", endpoint, query)
}

fn fetch_failed(endpoint: &str) -> impl FnOnce(NetBoxError) -> SyncError + '_ {
    move |source| {
        let endpoint = endpoint_label(endpoint);
        error!("Fetching {} failed: {}", endpoint, source);
        SyncError::Fetch { endpoint, source }
    }
}

/// Run the whole pipeline, printing progress on `console`.
pub async fn run<C, W>(
    settings: &Settings,
    client: &C,
    console: &mut W,
) -> Result<SyncReport, SyncError>
where
    C: NetBoxClientTrait + ?Sized,
    W: Write,
{
    info!("Syncing SSH config from {}", client.base_url());

    writeln!(console, "Fetching devices from NetBox...")?;
    let devices: PaginatedResponse<InventoryRecord> = client
        .query_devices(INVENTORY_FILTERS)
        .await
        .map_err(fetch_failed(DEVICES_ENDPOINT))?;

    writeln!(console, "Fetching virtual machines from NetBox...")?;
    let virtual_machines = client
        .query_virtual_machines(INVENTORY_FILTERS)
        .await
        .map_err(fetch_failed(VIRTUAL_MACHINES_ENDPOINT))?;

    writeln!(
        console,
        "Found {} devices and {} VMs",
        devices.results.len(),
        virtual_machines.results.len()
    )?;

    let config = render(&RenderContext::new(settings, &devices.results, &virtual_machines.results));
    let delivery = deliver(&settings.ssh_config_path, &config, console)?;

    Ok(SyncReport {
        devices: devices.results.len(),
        virtual_machines: virtual_machines.results.len(),
        hosts: config.host_count(),
        delivery,
    })
}
