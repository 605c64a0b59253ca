//! Settings loaded from environment variables.

use crate::error::SyncError;
use std::env::VarError;
use std::fmt;

pub const NETBOX_URL: &str = "NETBOX_URL";
pub const NETBOX_TOKEN: &str = "NETBOX_TOKEN";
pub const SSH_USER: &str = "SSH_USER";
pub const SSH_PORT: &str = "SSH_PORT";
pub const SSH_PRIVATE_KEY_PATH: &str = "SSH_PRIVATE_KEY_PATH";
pub const SSH_CONFIG_PATH: &str = "SSH_CONFIG_PATH";

pub const DEFAULT_SSH_PORT: &str = "22";
pub const DEFAULT_SSH_KEY_PATH: &str = "~/.ssh/id_rsa";
pub const DEFAULT_SSH_CONFIG_PATH: &str = "~/.ssh/config";

/// Resolve one parameter through `lookup`, which has the shape of
/// [`std::env::var`].
///
/// Empty values count as unset. A supplied `default` is used whenever the
/// variable is unset; without one, a `required` variable is an error and an
/// optional one resolves to an empty string. A value that is not valid
/// UTF-8 is always an error, even when a default exists.
pub fn env_var<F>(
    lookup: &F,
    name: &str,
    required: bool,
    default: Option<&str>,
) -> Result<String, SyncError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let value = match lookup(name) {
        Ok(value) => Some(value).filter(|value| !value.is_empty()),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(_)) => return Err(SyncError::InvalidEnv(name.to_string())),
    };

    match value {
        Some(value) => Ok(value),
        None => match default {
            Some(default) => Ok(default.to_string()),
            None if required => Err(SyncError::MissingEnv(name.to_string())),
            None => Ok(String::new()),
        },
    }
}

/// Everything the sync needs, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// NetBox base URL without trailing `/`
    pub netbox_url: String,
    pub netbox_token: String,
    pub ssh_user: String,
    pub ssh_port: String,
    pub ssh_key_path: String,
    /// Output path, `~` not yet expanded
    pub ssh_config_path: String,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// Variables are read in a fixed order and the first missing or
    /// undecodable one is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let netbox_url = env_var(&lookup, NETBOX_URL, true, None)?;
        let netbox_token = env_var(&lookup, NETBOX_TOKEN, true, None)?;
        let ssh_user = env_var(&lookup, SSH_USER, true, None)?;
        let ssh_port = env_var(&lookup, SSH_PORT, false, Some(DEFAULT_SSH_PORT))?;
        let ssh_key_path =
            env_var(&lookup, SSH_PRIVATE_KEY_PATH, false, Some(DEFAULT_SSH_KEY_PATH))?;
        let ssh_config_path =
            env_var(&lookup, SSH_CONFIG_PATH, false, Some(DEFAULT_SSH_CONFIG_PATH))?;

        Ok(Self {
            netbox_url: netbox_url.trim_end_matches('/').to_string(),
            netbox_token,
            ssh_user,
            ssh_port,
            ssh_key_path,
            ssh_config_path,
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("netbox_url", &self.netbox_url)
            .field("netbox_token", &"<redacted>")
            .field("ssh_user", &self.ssh_user)
            .field("ssh_port", &self.ssh_port)
            .field("ssh_key_path", &self.ssh_key_path)
            .field("ssh_config_path", &self.ssh_config_path)
            .finish()
    }
}
