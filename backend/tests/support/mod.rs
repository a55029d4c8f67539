//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! suite pulls in only the helpers it uses.

#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use std::sync::Arc;

use actix_web::web;
use device_service::domain::DeviceService;
use device_service::inbound::http::health::HealthState;
use device_service::inbound::http::state::HttpState;
use device_service::outbound::memory::InMemoryDeviceRepository;
use device_service::server::AppDependencies;
use mockable::DefaultClock;

/// Environment variable naming a disposable PostgreSQL database.
pub const TEST_DATABASE_URL_ENV: &str = "DEVICE_TEST_DATABASE_URL";

/// Database URL for Diesel suites, or `None` (with a skip marker) when unset.
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL_ENV} is not set");
            None
        }
    }
}

/// Application dependencies over a fresh in-memory repository.
pub fn in_memory_dependencies() -> AppDependencies {
    let service = Arc::new(DeviceService::new(
        Arc::new(InMemoryDeviceRepository::new()),
        Arc::new(DefaultClock),
    ));
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    AppDependencies {
        health_state,
        http_state: web::Data::new(HttpState::new(service.clone(), service)),
    }
}
