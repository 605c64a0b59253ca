//! NetBoxClient trait for mocking
//!
//! This trait abstracts the NetBoxClient to enable mocking in unit tests.
//! The concrete NetBoxClient implements this trait, and tests can use mock implementations.

use crate::common::PaginatedResponse;
use crate::error::NetBoxError;
use crate::models::InventoryRecord;

/// Trait for NetBox API client operations
///
/// All async methods must be `Send` to work with any Tokio runtime flavor.
#[async_trait::async_trait]
pub trait NetBoxClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    // DCIM Operations
    async fn query_devices(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<PaginatedResponse<InventoryRecord>, NetBoxError>;

    // Virtualization Operations
    async fn query_virtual_machines(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<PaginatedResponse<InventoryRecord>, NetBoxError>;
}
