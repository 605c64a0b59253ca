//! SSH config rendering.
//!
//! Turns device and VM records into `Host` blocks:
//!
//! ```text
//! # Devices
//!
//! # Netbox URL: http://netbox/api/dcim/devices/1/
//! Host r1
//!     User admin
//!     Hostname 10.0.0.1
//!     Port 22
//!     IdentityFile ~/.ssh/id_rsa
//!
//! # Virtual Machines
//! ```
//!
//! Records without a primary IPv4 are left out. Output depends only on the
//! inputs, so rendering the same inventory twice gives identical text.

use crate::config::Settings;
use netbox_client::InventoryRecord;
use std::fmt;
use tracing::{debug, warn};

const DEVICES_HEADER: &str = "# Devices";
const VIRTUAL_MACHINES_HEADER: &str = "# Virtual Machines";

/// Inputs for one render call.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub ssh_user: &'a str,
    pub ssh_port: &'a str,
    pub ssh_key_path: &'a str,
    pub devices: &'a [InventoryRecord],
    pub virtual_machines: &'a [InventoryRecord],
}

impl<'a> RenderContext<'a> {
    /// Context using the SSH options from `settings`.
    pub fn new(
        settings: &'a Settings,
        devices: &'a [InventoryRecord],
        virtual_machines: &'a [InventoryRecord],
    ) -> Self {
        Self {
            ssh_user: &settings.ssh_user,
            ssh_port: &settings.ssh_port,
            ssh_key_path: &settings.ssh_key_path,
            devices,
            virtual_machines,
        }
    }
}

/// Rendered SSH config text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedConfig {
    text: String,
    host_count: usize,
}

impl RenderedConfig {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of `Host` blocks in the text
    pub fn host_count(&self) -> usize {
        self.host_count
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for RenderedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render devices, then VMs, each in the order given.
pub fn render(ctx: &RenderContext<'_>) -> RenderedConfig {
    let mut text = String::new();
    let mut host_count = 0;

    text.push_str(DEVICES_HEADER);
    text.push('\n');
    host_count += push_section(&mut text, ctx, ctx.devices);

    text.push('\n');
    text.push_str(VIRTUAL_MACHINES_HEADER);
    text.push('\n');
    host_count += push_section(&mut text, ctx, ctx.virtual_machines);

    RenderedConfig { text, host_count }
}

/// Append one blank line plus a block per renderable record; returns the block count.
fn push_section(text: &mut String, ctx: &RenderContext<'_>, records: &[InventoryRecord]) -> usize {
    let mut count = 0;
    for record in records {
        if let Some(block) = host_block(ctx, record) {
            text.push('\n');
            text.push_str(&block);
            count += 1;
        }
    }
    count
}

/// The `Host` block for `record`, or `None` when it has no primary IPv4 or no name.
pub fn host_block(ctx: &RenderContext<'_>, record: &InventoryRecord) -> Option<String> {
    let ip = record.primary_ipv4()?;

    let Some(name) = record.host_name() else {
        warn!("Skipping unnamed record {} with primary IP {}", record.url, ip.address);
        return None;
    };

    if !ip.address.contains('/') {
        debug!("Primary IP {} of {} has no prefix length, using it as-is", ip.address, name);
    }

    let lines = [
        format!("# Netbox URL: {}", record.url),
        format!("Host {}", name),
        format!("    User {}", ctx.ssh_user),
        format!("    Hostname {}", ip.host_part()),
        format!("    Port {}", ctx.ssh_port),
        format!("    IdentityFile {}", ctx.ssh_key_path),
    ];

    let mut block = lines.join("\n");
    block.push('\n');
    Some(block)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;
