//! PostgreSQL-backed `DeviceRepository` implementation using Diesel ORM.
//!
//! Each port call issues one statement. Updates and deletes infer a missing
//! device from a zero affected-row count.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{DeviceRepository, DeviceRepositoryError};
use crate::domain::{Device, DeviceDraft, DeviceId, UpdateDevice};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{DeviceChangeset, DeviceRow, NewDeviceRow};
use super::pool::{DbPool, PoolError};
use super::schema::devices;

/// Diesel-backed implementation of the device repository port.
#[derive(Clone)]
pub struct DieselDeviceRepository {
    pool: DbPool,
}

impl DieselDeviceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DeviceRepositoryError {
    map_basic_pool_error(error, DeviceRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DeviceRepositoryError {
    map_basic_diesel_error(
        error,
        DeviceRepositoryError::query,
        DeviceRepositoryError::connection,
    )
}

fn require_affected(rows: usize, id: &DeviceId) -> Result<(), DeviceRepositoryError> {
    if rows == 0 {
        Err(DeviceRepositoryError::not_found(id.to_string()))
    } else {
        Ok(())
    }
}

/// Convert a database row into a validated domain device.
fn row_to_device(row: DeviceRow) -> Result<Device, DeviceRepositoryError> {
    let DeviceRow {
        id,
        name,
        brand,
        created_at,
    } = row;

    Device::new(DeviceDraft {
        id: DeviceId::from_uuid(id),
        name,
        brand,
        created_at,
    })
    .map_err(|err| DeviceRepositoryError::query(format!("invalid device row {id}: {err}")))
}

fn rows_to_devices(rows: Vec<DeviceRow>) -> Result<Vec<Device>, DeviceRepositoryError> {
    rows.into_iter().map(row_to_device).collect()
}

#[async_trait]
impl DeviceRepository for DieselDeviceRepository {
    async fn find_by_id(&self, id: &DeviceId) -> Result<Device, DeviceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = devices::table
            .filter(devices::id.eq(id.as_uuid()))
            .select(DeviceRow::as_select())
            .first::<DeviceRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| DeviceRepositoryError::not_found(id.to_string()))?;

        row_to_device(row)
    }

    async fn create(&self, device: &Device) -> Result<(), DeviceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewDeviceRow {
            id: *device.id().as_uuid(),
            name: device.name(),
            brand: device.brand(),
            created_at: device.created_at(),
        };

        diesel::insert_into(devices::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &DeviceId,
        changes: &UpdateDevice,
    ) -> Result<(), DeviceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        if changes.is_empty() {
            // An empty changeset is not valid SQL, so only confirm existence.
            let exists = diesel::select(diesel::dsl::exists(
                devices::table.filter(devices::id.eq(id.as_uuid())),
            ))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
            return require_affected(usize::from(exists), id);
        }

        let changeset = DeviceChangeset {
            name: changes.name.as_deref(),
            brand: changes.brand.as_deref(),
        };

        let rows = diesel::update(devices::table.filter(devices::id.eq(id.as_uuid())))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        require_affected(rows, id)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Device>, DeviceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DeviceRow> = devices::table
            .select(DeviceRow::as_select())
            .order((devices::created_at.asc(), devices::id.asc()))
            .offset(i64::from(page.offset()))
            .limit(i64::from(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_devices(rows)
    }

    async fn delete(&self, id: &DeviceId) -> Result<(), DeviceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = diesel::delete(devices::table.filter(devices::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        require_affected(rows, id)
    }

    async fn search_by_brand(
        &self,
        brand: &str,
        page: PageRequest,
    ) -> Result<Vec<Device>, DeviceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DeviceRow> = devices::table
            .filter(devices::brand.eq(brand))
            .select(DeviceRow::as_select())
            .order((devices::created_at.asc(), devices::id.asc()))
            .offset(i64::from(page.offset()))
            .limit(i64::from(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_devices(rows)
    }
}
