//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DeviceCommand, DeviceQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Create, update and delete use cases.
    pub devices: Arc<dyn DeviceCommand>,
    /// Read use cases.
    pub devices_query: Arc<dyn DeviceQuery>,
}

impl HttpState {
    /// Construct state from the device driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use device_service::domain::DeviceService;
    /// use device_service::inbound::http::state::HttpState;
    /// use device_service::outbound::memory::InMemoryDeviceRepository;
    ///
    /// let service = Arc::new(DeviceService::new(
    ///     Arc::new(InMemoryDeviceRepository::new()),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.devices_query.clone();
    /// ```
    pub fn new(devices: Arc<dyn DeviceCommand>, devices_query: Arc<dyn DeviceQuery>) -> Self {
        Self {
            devices,
            devices_query,
        }
    }
}
