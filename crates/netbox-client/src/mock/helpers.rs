//! Helper functions for creating NetBox model values in mock setups

use crate::models::*;

/// Helper functions for creating records in mock implementations
pub struct Helpers {
    base_url: String,
}

impl Helpers {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /// Helper to create a device record
    pub fn create_device(&self, id: u64, name: &str, address: Option<&str>) -> InventoryRecord {
        self.create_record("dcim/devices", id, name, address)
    }

    /// Helper to create a virtual machine record
    pub fn create_virtual_machine(
        &self,
        id: u64,
        name: &str,
        address: Option<&str>,
    ) -> InventoryRecord {
        self.create_record("virtualization/virtual-machines", id, name, address)
    }

    /// Helper to create NestedIPAddress
    pub fn create_nested_ip_address(&self, id: u64, address: &str) -> NestedIPAddress {
        NestedIPAddress {
            id: Some(id),
            url: Some(format!("{}/api/ipam/ip-addresses/{}/", self.base_url, id)),
            display: Some(address.to_string()),
            address: address.to_string(),
        }
    }

    fn create_record(
        &self,
        endpoint: &str,
        id: u64,
        name: &str,
        address: Option<&str>,
    ) -> InventoryRecord {
        let primary_ip4 = address.map(|a| self.create_nested_ip_address(id, a));
        InventoryRecord {
            id: Some(id),
            url: format!("{}/api/{}/{}/", self.base_url, endpoint, id),
            name: Some(name.to_string()),
            display: Some(name.to_string()),
            primary_ip: primary_ip4.clone(),
            primary_ip4,
        }
    }
}
