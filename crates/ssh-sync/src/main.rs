//! netbox-ssh-sync
//!
//! Generates `~/.ssh/config` (or `SSH_CONFIG_PATH`) from the devices and
//! virtual machines in NetBox.
//!
//! Exit codes: `0` on success, including when the config could only be
//! printed; `1` when a variable is missing or undecodable or NetBox cannot be
//! read; `2` when stdout itself cannot be written.

use netbox_client::NetBoxClient;
use netbox_ssh_sync::{Settings, SyncError, SyncReport};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout is reserved for the generated output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut console = stdout.lock();

    match sync(&mut console).await {
        Ok(report) => {
            info!(
                "Done: {} devices, {} VMs, {} host entries ({:?})",
                report.devices, report.virtual_machines, report.hosts, report.delivery
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            if writeln!(console, "Error: {}", e).is_err() {
                // stdout is gone; stderr is the last place the message can go
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn sync<W: Write>(console: &mut W) -> Result<SyncReport, SyncError> {
    // Settings are complete before any HTTP client exists
    let settings = Settings::from_env()?;

    info!("Configuration:");
    info!("  NetBox URL: {}", settings.netbox_url);
    info!("  SSH user: {}", settings.ssh_user);
    info!("  SSH config path: {}", settings.ssh_config_path);

    let client = NetBoxClient::new(settings.netbox_url.clone(), settings.netbox_token.clone())
        .map_err(SyncError::Client)?;

    netbox_ssh_sync::run(&settings, &client, console).await
}
