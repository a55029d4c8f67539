//! Tests for device HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::DeviceService;
use crate::domain::ports::{MockDeviceCommand, MockDeviceQuery};
use crate::outbound::memory::InMemoryDeviceRepository;

const UNKNOWN_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(create_device)
            .service(list_devices)
            .service(get_device)
            .service(update_device)
            .service(delete_device),
    )
}

fn in_memory_state() -> HttpState {
    let service = Arc::new(DeviceService::new(
        Arc::new(InMemoryDeviceRepository::new()),
        Arc::new(DefaultClock),
    ));
    HttpState::new(service.clone(), service)
}

fn mocked_state(command: MockDeviceCommand, query: MockDeviceQuery) -> HttpState {
    HttpState::new(Arc::new(command), Arc::new(query))
}

async fn error_message(response: actix_web::dev::ServiceResponse) -> String {
    let body: ErrorBody = actix_test::read_body_json(response).await;
    body.error
}

#[actix_web::test]
async fn create_returns_created_device() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/devices/")
        .set_json(json!({"name": "iPhone", "brand": "Apple"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: DeviceResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.name, "iPhone");
    assert_eq!(body.brand, "Apple");
    assert!(uuid::Uuid::parse_str(&body.id).is_ok());
    assert!(chrono::DateTime::parse_from_rfc3339(&body.created_at).is_ok());
}

#[rstest]
#[case(json!({"name": "", "brand": "Apple"}), "name is required")]
#[case(json!({"name": "iPhone"}), "brand is required")]
#[case(json!({}), "name is required")]
#[actix_web::test]
async fn create_rejects_missing_fields(#[case] payload: Value, #[case] expected: &str) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/devices/")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, expected);
}

#[actix_web::test]
async fn create_rejects_malformed_json() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/devices/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "invalid request payload");
}

#[actix_web::test]
async fn create_hides_storage_failure() {
    let mut command = MockDeviceCommand::new();
    command
        .expect_create()
        .times(1)
        .return_once(|_| Err(Error::internal("store.create: relation \"devices\" does not exist")));
    let app =
        actix_test::init_service(test_app(mocked_state(command, MockDeviceQuery::new()))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/devices/")
        .set_json(json!({"name": "iPhone", "brand": "Apple"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(response).await, "unable to create device");
}

#[rstest]
#[case::get(actix_test::TestRequest::get())]
#[case::delete(actix_test::TestRequest::delete())]
#[case::update(actix_test::TestRequest::put().set_json(json!({"name": "x"})))]
#[actix_web::test]
async fn malformed_id_is_rejected(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(mocked_state(
        MockDeviceCommand::new(),
        MockDeviceQuery::new(),
    )))
    .await;

    let response =
        actix_test::call_service(&app, request.uri("/api/v1/devices/not-a-uuid").to_request())
            .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "id is not a valid UUID");
}

#[rstest]
#[case::get(actix_test::TestRequest::get())]
#[case::delete(actix_test::TestRequest::delete())]
#[case::update(actix_test::TestRequest::put().set_json(json!({"brand": "Samsung"})))]
#[actix_web::test]
async fn unknown_id_is_not_found(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let uri = format!("/api/v1/devices/{UNKNOWN_ID}");
    let response = actix_test::call_service(&app, request.uri(&uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(response).await, "device not found");
}

#[actix_web::test]
async fn update_rejects_body_before_touching_store() {
    let mut command = MockDeviceCommand::new();
    command.expect_update().times(0);
    let app =
        actix_test::init_service(test_app(mocked_state(command, MockDeviceQuery::new()))).await;

    let uri = format!("/api/v1/devices/{UNKNOWN_ID}");
    let request = actix_test::TestRequest::put()
        .uri(&uri)
        .insert_header(("content-type", "application/json"))
        .set_payload("[1, 2")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "invalid request payload");
}

#[actix_web::test]
async fn update_rejects_present_empty_field() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let uri = format!("/api/v1/devices/{UNKNOWN_ID}");
    let request = actix_test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"name": ""}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "name must not be empty");
}

#[rstest]
#[case::update("update device")]
#[case::delete("delete device")]
#[actix_web::test]
async fn mutation_storage_failures_use_generic_message(#[case] action: &str) {
    let mut command = MockDeviceCommand::new();
    command
        .expect_update()
        .return_once(|_, _| Err(Error::internal("store.update: timeout")));
    command
        .expect_delete()
        .return_once(|_| Err(Error::internal("store.delete: timeout")));
    let app =
        actix_test::init_service(test_app(mocked_state(command, MockDeviceQuery::new()))).await;

    let uri = format!("/api/v1/devices/{UNKNOWN_ID}");
    let request = if action == "update device" {
        actix_test::TestRequest::put().set_json(json!({"brand": "Samsung"}))
    } else {
        actix_test::TestRequest::delete()
    };
    let response = actix_test::call_service(&app, request.uri(&uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(response).await, format!("unable to {action}"));
}

#[actix_web::test]
async fn get_storage_failure_uses_generic_message() {
    let mut query = MockDeviceQuery::new();
    query
        .expect_get_by_id()
        .return_once(|_| Err(Error::internal("store.by_id: connection reset")));
    let app =
        actix_test::init_service(test_app(mocked_state(MockDeviceCommand::new(), query))).await;

    let uri = format!("/api/v1/devices/{UNKNOWN_ID}");
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request())
            .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(response).await, "unable to get device");
}

#[rstest]
#[case("/api/v1/devices/", PageRequest::new(0, 10))]
#[case("/api/v1/devices/?offset=20&limit=5", PageRequest::new(20, 5))]
#[case("/api/v1/devices/?offset=x&limit=-1", PageRequest::new(0, 10))]
#[case("/api/v1/devices/?brand=&limit=3", PageRequest::new(0, 3))]
#[actix_web::test]
async fn list_without_brand_uses_get_all(#[case] uri: &str, #[case] expected: PageRequest) {
    let mut query = MockDeviceQuery::new();
    query
        .expect_get_all()
        .withf(move |page| *page == expected)
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    query.expect_search_by_brand().times(0);
    let app =
        actix_test::init_service(test_app(mocked_state(MockDeviceCommand::new(), query))).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<DeviceResponseBody> = actix_test::read_body_json(response).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn list_with_brand_searches() {
    let mut query = MockDeviceQuery::new();
    query.expect_get_all().times(0);
    query
        .expect_search_by_brand()
        .withf(|brand, page| brand == "Google Pixel" && *page == PageRequest::new(0, 5))
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));
    let app =
        actix_test::init_service(test_app(mocked_state(MockDeviceCommand::new(), query))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/devices/?brand=Google%20Pixel&limit=5")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[case("/api/v1/devices/", "unable to get devices")]
#[case("/api/v1/devices/?brand=Apple", "unable to search devices by brand")]
#[actix_web::test]
async fn list_storage_failures_use_generic_message(#[case] uri: &str, #[case] expected: &str) {
    let mut query = MockDeviceQuery::new();
    query
        .expect_get_all()
        .returning(|_| Err(Error::internal("store.get_all: timeout")));
    query
        .expect_search_by_brand()
        .returning(|_, _| Err(Error::internal("store.search_by_brand: timeout")));
    let app =
        actix_test::init_service(test_app(mocked_state(MockDeviceCommand::new(), query))).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
            .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(response).await, expected);
}

#[actix_web::test]
async fn update_then_get_keeps_absent_fields() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let create = actix_test::TestRequest::post()
        .uri("/api/v1/devices/")
        .set_json(json!({"name": "Galaxy", "brand": "Apple"}))
        .to_request();
    let created: DeviceResponseBody = actix_test::call_and_read_body_json(&app, create).await;
    let uri = format!("/api/v1/devices/{}", created.id);

    let update = actix_test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"brand": "Samsung"}))
        .to_request();
    let updated: MessageBody = actix_test::call_and_read_body_json(&app, update).await;
    assert_eq!(updated, MessageBody::new("device updated"));

    let fetched: DeviceResponseBody = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(fetched.name, "Galaxy");
    assert_eq!(fetched.brand, "Samsung");
    assert_eq!(fetched.created_at, created.created_at);

    let deleted: MessageBody = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(deleted, MessageBody::new("device deleted"));
}
