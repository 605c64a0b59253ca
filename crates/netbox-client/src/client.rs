//! NetBox API client
//!
//! Implements the read-only inventory queries used to build SSH host entries.
//! Based on NetBox API structure: /api/dcim/devices/ and
//! /api/virtualization/virtual-machines/

use crate::common::query::query_page;
use crate::common::{HttpClient, PaginatedResponse};
use crate::error::NetBoxError;
use crate::models::InventoryRecord;
use crate::netbox_trait::NetBoxClientTrait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Request timeout applied to every call made by [`NetBoxClient`]
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// DCIM devices list endpoint
pub const DEVICES_ENDPOINT: &str = "dcim/devices";

/// Virtualization virtual machines list endpoint
pub const VIRTUAL_MACHINES_ENDPOINT: &str = "virtualization/virtual-machines";

/// NetBox API client
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    http: HttpClient,
}

impl NetBoxClient {
    /// Create a new NetBox client
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(NetBoxError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Query devices by filters (single page)
    ///
    /// # Arguments
    /// * `filters` - Query parameters (e.g., [("primary_ip4__empty", "False"), ("limit", "1000")])
    ///
    /// # Returns
    /// * `Ok(PaginatedResponse<InventoryRecord>)` - The page of matching devices
    /// * `Err(NetBoxError)` - If the request fails
    pub async fn query_devices(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<PaginatedResponse<InventoryRecord>, NetBoxError> {
        debug!("Querying devices with filters: {:?}", filters);
        query_page(&self.http, DEVICES_ENDPOINT, filters).await
    }

    /// Query virtual machines by filters (single page)
    pub async fn query_virtual_machines(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<PaginatedResponse<InventoryRecord>, NetBoxError> {
        debug!("Querying virtual machines with filters: {:?}", filters);
        query_page(&self.http, VIRTUAL_MACHINES_ENDPOINT, filters).await
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for NetBoxClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn query_devices(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<PaginatedResponse<InventoryRecord>, NetBoxError> {
        self.query_devices(filters).await
    }

    async fn query_virtual_machines(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<PaginatedResponse<InventoryRecord>, NetBoxError> {
        self.query_virtual_machines(filters).await
    }
}
