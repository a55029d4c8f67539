//! HTTP inbound adapter exposing REST endpoints.

pub mod devices;
pub mod error;
pub mod health;
pub mod state;
pub mod validation;

pub use error::ApiResult;
