//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel models and
//! domain types. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a `bb8`
//! pool driven by `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use device_service::outbound::persistence::{DbPool, DieselDeviceRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/devices")).await?;
//! let repo = DieselDeviceRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_device_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_device_repository::DieselDeviceRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
