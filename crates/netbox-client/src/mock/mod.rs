//! Mock NetBoxClient for unit testing
//!
//! This module provides a mock implementation of NetBoxClientTrait that can be used
//! in unit tests without requiring a running NetBox instance.
//!
//! Records are returned in insertion order, the `limit` filter is honoured and
//! every other filter is ignored, like a server that does not know it.

mod helpers;

use crate::common::PaginatedResponse;
use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use crate::{DEVICES_ENDPOINT, VIRTUAL_MACHINES_ENDPOINT};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub use helpers::Helpers;

/// Mock NetBoxClient for testing
///
/// This mock stores records in memory, records every query it receives and
/// can be configured to fail a given endpoint.
#[derive(Clone)]
pub struct MockNetBoxClient {
    pub(crate) base_url: String,
    pub(crate) devices: Arc<Mutex<Vec<InventoryRecord>>>,
    pub(crate) virtual_machines: Arc<Mutex<Vec<InventoryRecord>>>,
    // endpoint -> error message returned as NetBoxError::Api
    pub(crate) failures: Arc<Mutex<HashMap<String, String>>>,
    // (endpoint, rendered filters) per call, in call order
    pub(crate) calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNetBoxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            devices: Arc::new(Mutex::new(Vec::new())),
            virtual_machines: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a device to the mock store (for test setup)
    pub fn add_device(&self, device: InventoryRecord) {
        self.devices.lock().unwrap().push(device);
    }

    /// Add a virtual machine to the mock store (for test setup)
    pub fn add_virtual_machine(&self, vm: InventoryRecord) {
        self.virtual_machines.lock().unwrap().push(vm);
    }

    /// Make every query against `endpoint` fail with `NetBoxError::Api(message)`
    pub fn fail_endpoint(&self, endpoint: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), message.to_string());
    }

    /// Queries received so far as `(endpoint, "k=v&k=v")`
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Get helpers instance
    pub fn helpers(&self) -> Helpers {
        Helpers::new(self.base_url.clone())
    }

    fn query(
        &self,
        endpoint: &str,
        store: &Mutex<Vec<InventoryRecord>>,
        filters: &[(&str, &str)],
    ) -> Result<PaginatedResponse<InventoryRecord>, NetBoxError> {
        let rendered = filters
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        self.calls.lock().unwrap().push((endpoint.to_string(), rendered));

        if let Some(message) = self.failures.lock().unwrap().get(endpoint) {
            return Err(NetBoxError::Api(message.clone()));
        }

        let records = store.lock().unwrap().clone();
        let count = records.len() as u64;
        let limit = filters
            .iter()
            .find(|(k, _)| *k == "limit")
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(records.len());

        let next = (records.len() > limit).then(|| {
            format!("{}/api/{}/?limit={}&offset={}", self.base_url, endpoint, limit, limit)
        });
        let results = records.into_iter().take(limit).collect();

        Ok(PaginatedResponse {
            count,
            next,
            previous: None,
            results,
        })
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for MockNetBoxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn query_devices(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<PaginatedResponse<InventoryRecord>, NetBoxError> {
        self.query(DEVICES_ENDPOINT, &self.devices, filters)
    }

    async fn query_virtual_machines(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<PaginatedResponse<InventoryRecord>, NetBoxError> {
        self.query(VIRTUAL_MACHINES_ENDPOINT, &self.virtual_machines, filters)
    }
}
