//! Driven port for device persistence.
//!
//! Adapters translate each call into a single statement against one table
//! keyed by device id. `update` and `delete` report
//! [`DeviceRepositoryError::NotFound`] when no row was affected, whether or
//! not the backing driver has its own not-found signal.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Device, DeviceId, UpdateDevice};

use super::define_port_error;

define_port_error! {
    /// Errors raised by device repository adapters.
    pub enum DeviceRepositoryError {
        /// No device exists with the requested identifier.
        NotFound { id: String } => "device {id} not found",
        /// Repository connection could not be established.
        Connection { message: String } => "device repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "device repository query failed: {message}",
    }
}

impl DeviceRepositoryError {
    /// Whether this error marks a missing device.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Port for reading and writing devices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Fetch a device by identifier.
    async fn find_by_id(&self, id: &DeviceId) -> Result<Device, DeviceRepositoryError>;

    /// Insert a new device. The identifier is already populated and unique.
    async fn create(&self, device: &Device) -> Result<(), DeviceRepositoryError>;

    /// Apply the present fields of `changes` to the device.
    async fn update(
        &self,
        id: &DeviceId,
        changes: &UpdateDevice,
    ) -> Result<(), DeviceRepositoryError>;

    /// Return one page of devices.
    async fn list(&self, page: PageRequest) -> Result<Vec<Device>, DeviceRepositoryError>;

    /// Permanently remove a device.
    async fn delete(&self, id: &DeviceId) -> Result<(), DeviceRepositoryError>;

    /// Return one page of devices whose brand equals `brand` exactly.
    async fn search_by_brand(
        &self,
        brand: &str,
        page: PageRequest,
    ) -> Result<Vec<Device>, DeviceRepositoryError>;
}
