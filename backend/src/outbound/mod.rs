//! Outbound adapters implementing the device repository port.
//!
//! - **persistence**: PostgreSQL-backed repository using Diesel ORM
//! - **memory**: in-process repository for tests and database-free runs
//!
//! Adapters only translate between domain types and storage representations.

pub mod memory;
pub mod persistence;
