//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::devices;

/// Row struct for reading from the devices table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = devices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DeviceRow {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new device records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = devices)]
pub(crate) struct NewDeviceRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub brand: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset for partial updates; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = devices)]
pub(crate) struct DeviceChangeset<'a> {
    pub name: Option<&'a str>,
    pub brand: Option<&'a str>,
}
