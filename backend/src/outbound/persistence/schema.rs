//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when the migrations change.

diesel::table! {
    /// Devices table.
    ///
    /// `brand` carries a secondary index for brand searches.
    devices (id) {
        /// Primary key: UUID v4 identifier assigned at creation.
        id -> Uuid,
        /// Device name, never empty.
        name -> Varchar,
        /// Manufacturer brand, never empty.
        brand -> Varchar,
        /// Creation timestamp, immutable.
        created_at -> Timestamptz,
    }
}
