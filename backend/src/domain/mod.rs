//! Domain primitives, ports and services.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Device, DeviceId, CreateDevice, UpdateDevice: the device entity and the
//!   inputs of its mutating use cases.
//! - DeviceService: implementation of the device driving ports.
//! - TraceId: request-scoped correlation identifier.

pub mod device;
pub mod device_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::device::{
    CreateDevice, Device, DeviceDraft, DeviceId, DeviceValidationError, UpdateDevice,
};
pub use self::device_service::DeviceService;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

