//! Device HTTP handlers.
//!
//! ```text
//! POST   /api/v1/devices/
//! GET    /api/v1/devices/?brand=&offset=&limit=
//! GET    /api/v1/devices/{id}
//! PUT    /api/v1/devices/{id}
//! DELETE /api/v1/devices/{id}
//! ```
//!
//! Each handler parses and validates its input, invokes one driving port
//! and maps the outcome. Storage failures are logged here and replaced with
//! a generic per-operation message.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::SecondsFormat;
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CreateDevice, Device, Error, ErrorCode, UpdateDevice};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    brand_filter, parse_device_id, parse_json_body, validation_error,
};

const DEVICE_NOT_FOUND_MESSAGE: &str = "device not found";

/// Request payload for creating a device.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateDeviceRequestBody {
    /// Device name; required and non-empty.
    #[serde(default)]
    #[schema(example = "iPhone 15")]
    pub name: String,
    /// Manufacturer brand; required and non-empty.
    #[serde(default)]
    #[schema(example = "Apple")]
    pub brand: String,
}

impl From<CreateDeviceRequestBody> for CreateDevice {
    fn from(value: CreateDeviceRequestBody) -> Self {
        Self {
            name: value.name,
            brand: value.brand,
        }
    }
}

/// Request payload for a partial device update. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateDeviceRequestBody {
    /// Replacement name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement brand.
    #[serde(default)]
    pub brand: Option<String>,
}

impl From<UpdateDeviceRequestBody> for UpdateDevice {
    fn from(value: UpdateDeviceRequestBody) -> Self {
        Self {
            name: value.name,
            brand: value.brand,
        }
    }
}

/// Device representation returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeviceResponseBody {
    /// Device identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Device name.
    pub name: String,
    /// Manufacturer brand.
    pub brand: String,
    /// Creation time in RFC 3339.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&Device> for DeviceResponseBody {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id().to_string(),
            name: device.name().to_owned(),
            brand: device.brand().to_owned(),
            created_at: device
                .created_at()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

/// Confirmation body for mutations that return no entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageBody {
    /// Human-readable confirmation.
    #[schema(example = "device updated")]
    pub message: String,
}

impl MessageBody {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Query parameters accepted by the listing endpoint.
///
/// Values that are not non-negative integers fall back to their defaults.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[expect(dead_code, reason = "documents query parameters parsed from the raw query string")]
pub struct ListDevicesParams {
    /// Exact brand to match; empty or absent lists every device.
    brand: Option<String>,
    /// Records to skip (default 0).
    offset: Option<u32>,
    /// Maximum records to return (default 10).
    limit: Option<u32>,
}

/// Map a port failure to the client-facing error for `action`.
fn reject(error: Error, action: &'static str) -> Error {
    match error.code() {
        ErrorCode::InvalidRequest => error,
        ErrorCode::NotFound => Error::not_found(DEVICE_NOT_FOUND_MESSAGE),
        ErrorCode::InternalError => {
            error!(error = %error, operation = action, "device request failed");
            Error::internal(format!("unable to {action}"))
        }
    }
}

/// Create a device.
#[utoipa::path(
    post,
    path = "/api/v1/devices/",
    request_body = CreateDeviceRequestBody,
    responses(
        (status = 201, description = "Device created", body = DeviceResponseBody),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["devices"],
    operation_id = "createDevice"
)]
#[post("/devices/")]
pub async fn create_device(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let payload: CreateDeviceRequestBody = parse_json_body(&body)?;
    let request = CreateDevice::from(payload);
    request.validate().map_err(validation_error)?;

    let device = state
        .devices
        .create(request)
        .await
        .map_err(|err| reject(err, "create device"))?;

    Ok(HttpResponse::Created().json(DeviceResponseBody::from(&device)))
}

/// Apply a partial update to a device.
#[utoipa::path(
    put,
    path = "/api/v1/devices/{id}",
    params(("id" = String, Path, description = "Device identifier (UUID)")),
    request_body = UpdateDeviceRequestBody,
    responses(
        (status = 200, description = "Device updated", body = MessageBody),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Device not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["devices"],
    operation_id = "updateDevice"
)]
#[put("/devices/{id}")]
pub async fn update_device(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<MessageBody>> {
    let id = parse_device_id(&path)?;
    let payload: UpdateDeviceRequestBody = parse_json_body(&body)?;
    let changes = UpdateDevice::from(payload);
    changes.validate().map_err(validation_error)?;

    state
        .devices
        .update(&id, changes)
        .await
        .map_err(|err| reject(err, "update device"))?;

    Ok(web::Json(MessageBody::new("device updated")))
}

/// Fetch a device by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/devices/{id}",
    params(("id" = String, Path, description = "Device identifier (UUID)")),
    responses(
        (status = 200, description = "Device", body = DeviceResponseBody),
        (status = 400, description = "Invalid identifier", body = ErrorBody),
        (status = 404, description = "Device not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["devices"],
    operation_id = "getDevice"
)]
#[get("/devices/{id}")]
pub async fn get_device(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeviceResponseBody>> {
    let id = parse_device_id(&path)?;

    let device = state
        .devices_query
        .get_by_id(&id)
        .await
        .map_err(|err| reject(err, "get device"))?;

    Ok(web::Json(DeviceResponseBody::from(&device)))
}

/// Delete a device.
#[utoipa::path(
    delete,
    path = "/api/v1/devices/{id}",
    params(("id" = String, Path, description = "Device identifier (UUID)")),
    responses(
        (status = 200, description = "Device deleted", body = MessageBody),
        (status = 400, description = "Invalid identifier", body = ErrorBody),
        (status = 404, description = "Device not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["devices"],
    operation_id = "deleteDevice"
)]
#[delete("/devices/{id}")]
pub async fn delete_device(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = parse_device_id(&path)?;

    state
        .devices
        .delete(&id)
        .await
        .map_err(|err| reject(err, "delete device"))?;

    Ok(web::Json(MessageBody::new("device deleted")))
}

/// List devices, optionally filtered by brand.
#[utoipa::path(
    get,
    path = "/api/v1/devices/",
    params(ListDevicesParams),
    responses(
        (status = 200, description = "Devices", body = [DeviceResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["devices"],
    operation_id = "listDevices"
)]
#[get("/devices/")]
pub async fn list_devices(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<DeviceResponseBody>>> {
    let query = req.query_string();
    let page = PageRequest::from_query(query);

    let devices = match brand_filter(query) {
        Some(brand) => state
            .devices_query
            .search_by_brand(&brand, page)
            .await
            .map_err(|err| reject(err, "search devices by brand"))?,
        None => state
            .devices_query
            .get_all(page)
            .await
            .map_err(|err| reject(err, "get devices"))?,
    };

    Ok(web::Json(
        devices.iter().map(DeviceResponseBody::from).collect(),
    ))
}

#[cfg(test)]
#[path = "devices_tests.rs"]
mod tests;
