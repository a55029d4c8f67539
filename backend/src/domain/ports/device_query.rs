//! Driving port for device reads.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Device, DeviceId, Error};

/// Use-case port for reading devices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceQuery: Send + Sync {
    /// Fetch a single device.
    async fn get_by_id(&self, id: &DeviceId) -> Result<Device, Error>;

    /// List devices one page at a time.
    async fn get_all(&self, page: PageRequest) -> Result<Vec<Device>, Error>;

    /// List devices with an exact brand match.
    async fn search_by_brand(&self, brand: &str, page: PageRequest) -> Result<Vec<Device>, Error>;
}
