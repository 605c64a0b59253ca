//! End-to-end tests for the `netbox-ssh-sync` binary
//!
//! The binary runs with a clean environment against an in-process fake
//! NetBox (axum), and its exit code, stdout and output file are checked.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::path::Path;
use std::process::Output;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio::process::Command;

const TOKEN: &str = "0123456789abcdef";

async fn devices(State(hits): State<Arc<AtomicUsize>>, headers: HeaderMap) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    let authorization = headers.get("authorization").and_then(|v| v.to_str().ok());
    if authorization != Some("Token 0123456789abcdef") {
        return StatusCode::FORBIDDEN.into_response();
    }
    Json(json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": 1,
                "url": "http://nb/1",
                "name": "r1",
                "primary_ip4": {"id": 11, "address": "10.0.0.1/24"}
            },
            {"id": 2, "url": "http://nb/2", "name": "r2", "primary_ip4": null}
        ]
    }))
    .into_response()
}

async fn virtual_machines(State(hits): State<Arc<AtomicUsize>>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": 5,
                "url": "http://nb/vm/5",
                "name": "vm5",
                "primary_ip4": {"id": 15, "address": "10.1.0.5/16"}
            }
        ]
    }))
    .into_response()
}

async fn broken(State(hits): State<Arc<AtomicUsize>>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
}

/// Fake NetBox; returns its base URL and a request counter.
async fn spawn_netbox(vms_broken: bool) -> anyhow::Result<(String, Arc<AtomicUsize>)> {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new().route("/api/dcim/devices/", get(devices));
    let router = if vms_broken {
        router.route("/api/virtualization/virtual-machines/", get(broken))
    } else {
        router.route("/api/virtualization/virtual-machines/", get(virtual_machines))
    };
    let router = router.with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok((format!("http://{}/", addr), hits))
}

/// The binary with an empty environment apart from `HOME`
fn sync_command(home: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_netbox-ssh-sync"));
    command.env_clear().env("HOME", home).env("RUST_LOG", "off");
    command
}

async fn run_sync(env: &[(&str, &str)], home: &Path) -> anyhow::Result<Output> {
    let output = sync_command(home).envs(env.iter().copied()).output().await?;
    Ok(output)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[tokio::test]
async fn test_sync_writes_config_file() -> anyhow::Result<()> {
    let (base, hits) = spawn_netbox(false).await?;
    let home = TempDir::new()?;
    let target = home.path().join("out/ssh_config");
    let target_str = target.to_string_lossy().into_owned();

    let output = run_sync(
        &[
            ("NETBOX_URL", base.as_str()),
            ("NETBOX_TOKEN", TOKEN),
            ("SSH_USER", "admin"),
            ("SSH_CONFIG_PATH", target_str.as_str()),
        ],
        home.path(),
    )
    .await?;

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    let expected = "\
# Devices

# Netbox URL: http://nb/1
Host r1
    User admin
    Hostname 10.0.0.1
    Port 22
    IdentityFile ~/.ssh/id_rsa

# Virtual Machines

# Netbox URL: http://nb/vm/5
Host vm5
    User admin
    Hostname 10.1.0.5
    Port 22
    IdentityFile ~/.ssh/id_rsa
";
    assert_eq!(std::fs::read_to_string(&target)?, expected);

    let printed = stdout(&output);
    assert!(printed.contains("Fetching devices from NetBox...\n"));
    assert!(printed.contains("Fetching virtual machines from NetBox...\n"));
    assert!(printed.contains("Found 2 devices and 1 VMs\n"));
    assert!(printed.contains(&format!("SSH config saved to: {}\n", target.display())));
    Ok(())
}

#[tokio::test]
async fn test_default_path_is_under_home() -> anyhow::Result<()> {
    let (base, _hits) = spawn_netbox(false).await?;
    let home = TempDir::new()?;

    let output = run_sync(
        &[
            ("NETBOX_URL", base.as_str()),
            ("NETBOX_TOKEN", TOKEN),
            ("SSH_USER", "ops"),
            ("SSH_PORT", "2222"),
        ],
        home.path(),
    )
    .await?;

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    let written = std::fs::read_to_string(home.path().join(".ssh/config"))?;
    assert!(written.contains("Host r1\n    User ops\n    Hostname 10.0.0.1\n    Port 2222\n"));
    Ok(())
}

#[tokio::test]
async fn test_missing_variable_exits_before_any_request() -> anyhow::Result<()> {
    let (base, hits) = spawn_netbox(false).await?;
    let home = TempDir::new()?;

    let output = run_sync(
        &[("NETBOX_URL", base.as_str()), ("SSH_USER", "admin")],
        home.path(),
    )
    .await?;

    assert_ne!(output.status.code(), Some(0));
    let printed = stdout(&output);
    assert!(printed.contains("NETBOX_TOKEN"), "{printed}");
    assert!(!printed.contains("Fetching"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_server_error_exits_without_writing() -> anyhow::Result<()> {
    let (base, hits) = spawn_netbox(true).await?;
    let home = TempDir::new()?;
    let target = home.path().join("ssh_config");
    let target_str = target.to_string_lossy().into_owned();

    let output = run_sync(
        &[
            ("NETBOX_URL", base.as_str()),
            ("NETBOX_TOKEN", TOKEN),
            ("SSH_USER", "admin"),
            ("SSH_CONFIG_PATH", target_str.as_str()),
        ],
        home.path(),
    )
    .await?;

    assert_ne!(output.status.code(), Some(0));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    let printed = stdout(&output);
    assert!(
        printed.contains(
            "Failed to fetch data from \
             virtualization/virtual-machines/?primary_ip4__empty=False&limit=1000"
        ),
        "{printed}"
    );
    assert!(!printed.contains("Found"));
    assert!(!target.exists());
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_exits_without_writing() -> anyhow::Result<()> {
    let port = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let base = format!("http://127.0.0.1:{}", port);
    let home = TempDir::new()?;
    let target = home.path().join("ssh_config");
    let target_str = target.to_string_lossy().into_owned();

    let output = run_sync(
        &[
            ("NETBOX_URL", base.as_str()),
            ("NETBOX_TOKEN", TOKEN),
            ("SSH_USER", "admin"),
            ("SSH_CONFIG_PATH", target_str.as_str()),
        ],
        home.path(),
    )
    .await?;

    assert_ne!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Failed to fetch data from dcim/devices/"));
    assert!(!target.exists());
    Ok(())
}

#[tokio::test]
async fn test_unwritable_path_prints_config_and_succeeds() -> anyhow::Result<()> {
    let (base, _hits) = spawn_netbox(false).await?;
    let home = TempDir::new()?;
    let blocker = home.path().join("blocker");
    std::fs::write(&blocker, "")?;
    let target = blocker.join("config");
    let target_str = target.to_string_lossy().into_owned();

    let output = run_sync(
        &[
            ("NETBOX_URL", base.as_str()),
            ("NETBOX_TOKEN", TOKEN),
            ("SSH_USER", "admin"),
            ("SSH_CONFIG_PATH", target_str.as_str()),
        ],
        home.path(),
    )
    .await?;

    assert_eq!(output.status.code(), Some(0));
    let printed = stdout(&output);
    assert!(printed.contains(&format!("Error writing SSH config to {}", target.display())));
    assert!(printed.contains(
        "# Generated SSH Config\n# Devices\n\n# Netbox URL: http://nb/1\nHost r1\n"
    ));
    assert!(printed.contains("# Virtual Machines\n\n# Netbox URL: http://nb/vm/5\nHost vm5\n"));
    assert!(!target.exists());
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_utf8_config_path_fails_without_touching_default() -> anyhow::Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (base, hits) = spawn_netbox(false).await?;
    let home = TempDir::new()?;
    let mut target = home.path().as_os_str().as_bytes().to_vec();
    target.extend_from_slice(b"/out\xff/config");

    let output = sync_command(home.path())
        .env("NETBOX_URL", &base)
        .env("NETBOX_TOKEN", TOKEN)
        .env("SSH_USER", "admin")
        .env("SSH_CONFIG_PATH", OsStr::from_bytes(&target))
        .output()
        .await?;

    assert_eq!(output.status.code(), Some(1));
    let printed = stdout(&output);
    assert!(
        printed.contains("Environment variable SSH_CONFIG_PATH is not valid unicode"),
        "{printed}"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(!home.path().join(".ssh/config").exists());
    assert!(!Path::new(OsStr::from_bytes(&target)).exists());
    Ok(())
}

/// Runs the binary with a read-only stdout, so every console write fails
async fn run_with_dead_stdout(env: &[(&str, &str)], home: &Path) -> anyhow::Result<Output> {
    let sink = home.join("stdout");
    std::fs::write(&sink, "")?;
    let output = sync_command(home)
        .envs(env.iter().copied())
        .stdout(std::fs::File::open(&sink)?)
        .output()
        .await?;
    Ok(output)
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn test_fatal_message_goes_to_stderr_when_stdout_fails() -> anyhow::Result<()> {
    let home = TempDir::new()?;

    let output = run_with_dead_stdout(&[("NETBOX_URL", "http://127.0.0.1:9")], home.path()).await?;

    assert_eq!(output.status.code(), Some(1));
    let printed = stderr(&output);
    assert!(
        printed.contains("Error: Environment variable NETBOX_TOKEN is required but not set"),
        "{printed}"
    );
    Ok(())
}

#[tokio::test]
async fn test_console_failure_exits_2() -> anyhow::Result<()> {
    let (base, hits) = spawn_netbox(false).await?;
    let home = TempDir::new()?;

    let output = run_with_dead_stdout(
        &[
            ("NETBOX_URL", base.as_str()),
            ("NETBOX_TOKEN", TOKEN),
            ("SSH_USER", "admin"),
        ],
        home.path(),
    )
    .await?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Failed to write to console"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(!home.path().join(".ssh/config").exists());
    Ok(())
}
