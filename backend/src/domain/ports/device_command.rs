//! Driving port for device mutations.
//!
//! Inbound adapters call this port to create, update and delete devices
//! without depending on persistence concerns.

use async_trait::async_trait;

use crate::domain::{CreateDevice, Device, DeviceId, Error, UpdateDevice};

/// Use-case port for changing devices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceCommand: Send + Sync {
    /// Validate `request`, persist it as a new device and return the device.
    async fn create(&self, request: CreateDevice) -> Result<Device, Error>;

    /// Apply a partial update to an existing device.
    async fn update(&self, id: &DeviceId, changes: UpdateDevice) -> Result<(), Error>;

    /// Remove a device.
    async fn delete(&self, id: &DeviceId) -> Result<(), Error>;
}
