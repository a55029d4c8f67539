//! Device domain service.
//!
//! [`DeviceService`] implements both device driving ports. Each operation
//! makes exactly one repository call; repository failures are wrapped with
//! the name of the failing store operation while keeping their kind.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;

use crate::domain::ports::{DeviceCommand, DeviceQuery, DeviceRepository, DeviceRepositoryError};
use crate::domain::{CreateDevice, Device, DeviceId, Error, UpdateDevice};

fn map_repository_error(operation: &'static str, error: DeviceRepositoryError) -> Error {
    let message = format!("{operation}: {error}");
    if error.is_not_found() {
        Error::not_found(message)
    } else {
        Error::internal(message)
    }
}

/// Device service implementing the command and query driving ports.
#[derive(Clone)]
pub struct DeviceService<R> {
    device_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> DeviceService<R> {
    /// Create a service over `device_repo`, stamping new devices with `clock`.
    pub fn new(device_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { device_repo, clock }
    }
}

#[async_trait]
impl<R> DeviceCommand for DeviceService<R>
where
    R: DeviceRepository,
{
    async fn create(&self, request: CreateDevice) -> Result<Device, Error> {
        let device = request
            .into_device(self.clock.as_ref())
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.device_repo
            .create(&device)
            .await
            .map_err(|err| map_repository_error("store.create", err))?;

        Ok(device)
    }

    async fn update(&self, id: &DeviceId, changes: UpdateDevice) -> Result<(), Error> {
        changes
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.device_repo
            .update(id, &changes)
            .await
            .map_err(|err| map_repository_error("store.update", err))
    }

    async fn delete(&self, id: &DeviceId) -> Result<(), Error> {
        self.device_repo
            .delete(id)
            .await
            .map_err(|err| map_repository_error("store.delete", err))
    }
}

#[async_trait]
impl<R> DeviceQuery for DeviceService<R>
where
    R: DeviceRepository,
{
    async fn get_by_id(&self, id: &DeviceId) -> Result<Device, Error> {
        self.device_repo
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error("store.by_id", err))
    }

    async fn get_all(&self, page: PageRequest) -> Result<Vec<Device>, Error> {
        self.device_repo
            .list(page)
            .await
            .map_err(|err| map_repository_error("store.get_all", err))
    }

    async fn search_by_brand(&self, brand: &str, page: PageRequest) -> Result<Vec<Device>, Error> {
        self.device_repo
            .search_by_brand(brand, page)
            .await
            .map_err(|err| map_repository_error("store.search_by_brand", err))
    }
}

#[cfg(test)]
#[path = "device_service_tests.rs"]
mod tests;
