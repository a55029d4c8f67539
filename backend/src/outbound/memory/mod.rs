//! In-process `DeviceRepository` adapter.
//!
//! Backs the HTTP integration tests and local runs without PostgreSQL. It
//! mirrors the Diesel adapter's observable behaviour: stable ordering by
//! creation time then identifier, not-found reporting on update and delete.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{DeviceRepository, DeviceRepositoryError};
use crate::domain::{Device, DeviceId, UpdateDevice};

/// Device repository holding all records in memory.
#[derive(Debug, Default)]
pub struct InMemoryDeviceRepository {
    devices: RwLock<HashMap<DeviceId, Device>>,
}

impl InMemoryDeviceRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored devices.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no devices are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<DeviceId, Device>> {
        self.devices.read().unwrap_or_else(|err| err.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<DeviceId, Device>> {
        self.devices.write().unwrap_or_else(|err| err.into_inner())
    }

    fn page<F>(&self, page: PageRequest, keep: F) -> Vec<Device>
    where
        F: Fn(&Device) -> bool,
    {
        let mut matching: Vec<Device> = self
            .read()
            .values()
            .filter(|device| keep(*device))
            .cloned()
            .collect();
        matching.sort_by_key(|device| (device.created_at(), *device.id().as_uuid()));
        matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect()
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn find_by_id(&self, id: &DeviceId) -> Result<Device, DeviceRepositoryError> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| DeviceRepositoryError::not_found(id.to_string()))
    }

    async fn create(&self, device: &Device) -> Result<(), DeviceRepositoryError> {
        let mut devices = self.write();
        if devices.contains_key(device.id()) {
            return Err(DeviceRepositoryError::query("duplicate record"));
        }
        devices.insert(*device.id(), device.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &DeviceId,
        changes: &UpdateDevice,
    ) -> Result<(), DeviceRepositoryError> {
        let mut devices = self.write();
        let current = devices
            .get_mut(id)
            .ok_or_else(|| DeviceRepositoryError::not_found(id.to_string()))?;
        *current = current.with_changes(changes);
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Device>, DeviceRepositoryError> {
        Ok(self.page(page, |_| true))
    }

    async fn delete(&self, id: &DeviceId) -> Result<(), DeviceRepositoryError> {
        self.write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DeviceRepositoryError::not_found(id.to_string()))
    }

    async fn search_by_brand(
        &self,
        brand: &str,
        page: PageRequest,
    ) -> Result<Vec<Device>, DeviceRepositoryError> {
        Ok(self.page(page, |device| device.brand() == brand))
    }
}
