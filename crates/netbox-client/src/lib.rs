//! NetBox REST API Client
//!
//! A Rust client library for reading inventory from the NetBox REST API.
//! Provides type-safe models for devices and virtual machines and their
//! primary IP addresses.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::NetBoxClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! let devices = client
//!     .query_devices(&[("primary_ip4__empty", "False"), ("limit", "1000")])
//!     .await?;
//! for device in &devices.results {
//!     println!("{:?} -> {:?}", device.host_name(), device.primary_ipv4());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **DCIM Operations**: Query devices
//! - **Virtualization Operations**: Query virtual machines
//! - **Bounded pages**: One request per query, sized by the `limit` filter
//! - **Mocking**: `MockNetBoxClient` behind the `test-util` feature

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod netbox_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{NetBoxClient, DEVICES_ENDPOINT, VIRTUAL_MACHINES_ENDPOINT};
pub use common::{HttpClient, PaginatedResponse};
pub use error::NetBoxError;
pub use models::*;
pub use netbox_trait::NetBoxClientTrait;
#[cfg(feature = "test-util")]
pub use mock::MockNetBoxClient;
