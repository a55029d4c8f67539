//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the device endpoints, the health probes and the
//! request/response bodies they use. The document backs Swagger UI in debug
//! builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::devices::{
    CreateDeviceRequestBody, DeviceResponseBody, MessageBody, UpdateDeviceRequestBody,
};
use crate::inbound::http::error::ErrorBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Device service API",
        description = "CRUD and brand search over devices, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::devices::create_device,
        crate::inbound::http::devices::list_devices,
        crate::inbound::http::devices::get_device,
        crate::inbound::http::devices::update_device,
        crate::inbound::http::devices::delete_device,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateDeviceRequestBody,
        UpdateDeviceRequestBody,
        DeviceResponseBody,
        MessageBody,
        ErrorBody
    )),
    tags(
        (name = "devices", description = "Device management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
