//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`DeviceCommand`, `DeviceQuery`) are called by inbound
//! adapters; the driven port (`DeviceRepository`) is implemented by outbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod device_command;
mod device_query;
mod device_repository;

#[cfg(test)]
pub use device_command::MockDeviceCommand;
pub use device_command::DeviceCommand;
#[cfg(test)]
pub use device_query::MockDeviceQuery;
pub use device_query::DeviceQuery;
#[cfg(test)]
pub use device_repository::MockDeviceRepository;
pub use device_repository::{DeviceRepository, DeviceRepositoryError};
