//! Output writer.
//!
//! Writes the rendered config to its target path. A failed write is not
//! fatal: the reason and the full config go to the console instead, so the
//! operator can still copy it by hand.

use crate::error::SyncError;
use crate::render::RenderedConfig;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the rendered config ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Written to this file
    File(PathBuf),
    /// Writing `path` failed for `reason`; the config was printed instead
    Console { path: PathBuf, reason: String },
}

/// Expand a leading `~` to the current user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, dirs::home_dir().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Replace the file at `path` with `content`, creating parent directories.
///
/// The content goes to a `.tmp` sibling first and is renamed over the
/// target, so a failed write leaves any existing file untouched. An existing
/// file keeps its permissions, and a symlinked target is replaced through
/// the link. Returns the resolved (tilde-expanded) path.
pub fn write_config(path: &str, content: &str) -> Result<PathBuf, SyncError> {
    let path = expand_tilde(path);
    let io_err = |source: io::Error| SyncError::Write {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let target = resolve_symlink(&path).map_err(io_err)?;
    let tmp_path = tmp_sibling(&target).map_err(io_err)?;

    if let Err(source) = replace_with(&target, &tmp_path, content) {
        // The write error is reported; a leftover temp file is only logged
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            debug!("Could not remove {}: {}", tmp_path.display(), cleanup);
        }
        return Err(io_err(source));
    }

    Ok(path)
}

/// Follow a symlinked target so the rename replaces the file, not the link.
fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path),
        _ => Ok(path.to_path_buf()),
    }
}

fn tmp_sibling(path: &Path) -> io::Result<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path does not name a file",
        ));
    };
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn replace_with(target: &Path, tmp_path: &Path, content: &str) -> io::Result<()> {
    fs::write(tmp_path, content)?;
    if let Ok(meta) = fs::metadata(target) {
        fs::set_permissions(tmp_path, meta.permissions())?;
    }
    fs::rename(tmp_path, target)
}

/// Write the config, or print it on `console` when that fails.
///
/// Only console errors are returned; file errors are reported and absorbed.
pub fn deliver<W: Write>(
    path: &str,
    config: &RenderedConfig,
    console: &mut W,
) -> Result<Delivery, SyncError> {
    match write_config(path, config.as_str()) {
        Ok(written) => {
            info!("Wrote {} host entries to {}", config.host_count(), written.display());
            writeln!(console, "SSH config saved to: {}", written.display())?;
            Ok(Delivery::File(written))
        }
        Err(SyncError::Write { path, source }) => {
            warn!("Falling back to console output: {}", source);
            writeln!(console, "Error writing SSH config to {}: {}", path.display(), source)?;
            writeln!(console)?;
            writeln!(console, "# Generated SSH Config")?;
            console.write_all(config.as_str().as_bytes())?;
            console.flush()?;
            Ok(Delivery::Console {
                path,
                reason: source.to_string(),
            })
        }
        Err(other) => Err(other),
    }
}
