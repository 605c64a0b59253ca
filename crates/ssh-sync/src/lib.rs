//! NetBox to SSH config sync
//!
//! Reads devices and virtual machines from NetBox and renders every record
//! with a primary IPv4 address as an SSH `Host` block:
//!
//! - `config`: settings from `NETBOX_URL`, `NETBOX_TOKEN`, `SSH_USER`,
//!   `SSH_PORT`, `SSH_PRIVATE_KEY_PATH` and `SSH_CONFIG_PATH`
//! - `render`: host block rendering
//! - `writer`: file output with a console fallback
//! - `sync`: the fetch/render/write pipeline

pub mod config;
pub mod error;
pub mod render;
pub mod sync;
pub mod writer;

pub use config::Settings;
pub use error::SyncError;
pub use render::{render, RenderContext, RenderedConfig};
pub use sync::{run, SyncReport};
pub use writer::{deliver, expand_tilde, write_config, Delivery};
