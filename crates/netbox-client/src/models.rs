//! NetBox API models
//!
//! Only the subset of the DCIM/virtualization serializers needed to build
//! SSH host entries. Unknown keys in the payload are ignored.
//! See: netbox/dcim/api/serializers_/devices.py

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// A device (`/api/dcim/devices/`) or virtual machine
/// (`/api/virtualization/virtual-machines/`) record.
///
/// Both endpoints share the fields used here, so one model covers both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InventoryRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub url: String,
    /// NetBox allows unnamed devices, so the name may be null
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub primary_ip4: Option<NestedIPAddress>,
    /// Family-agnostic primary address (IPv6 preferred by NetBox when both are set)
    #[serde(default)]
    pub primary_ip: Option<NestedIPAddress>,
}

impl InventoryRecord {
    /// Host identifier; `None` for unnamed or blank-named records
    pub fn host_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }

    /// Effective primary IPv4 address (CIDR notation, e.g. `10.0.0.5/24`).
    ///
    /// Uses `primary_ip4`, or `primary_ip` when that one is an IPv4 address.
    pub fn primary_ipv4(&self) -> Option<&NestedIPAddress> {
        self.primary_ip4
            .as_ref()
            .or_else(|| self.primary_ip.as_ref().filter(|ip| ip.is_ipv4()))
    }
}

/// Nested IP address reference as embedded in device/VM payloads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NestedIPAddress {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    pub address: String, // e.g., "192.168.1.1/24"
}

impl NestedIPAddress {
    /// Address portion before the prefix length, or the whole string when there is no `/`
    pub fn host_part(&self) -> &str {
        self.address
            .split_once('/')
            .map_or(self.address.as_str(), |(host, _)| host)
    }

    /// True when the address portion parses as IPv4
    pub fn is_ipv4(&self) -> bool {
        self.host_part().parse::<Ipv4Addr>().is_ok()
    }
}
