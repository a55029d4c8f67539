//! Shared request parsing helpers for inbound HTTP adapters.
//!
//! Every helper turns malformed input into an `InvalidRequest` domain error
//! whose message is safe to return to the client verbatim.

use pagination::first_query_value;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{DeviceId, DeviceValidationError, Error};

/// Message returned when a request body cannot be decoded.
pub(crate) const INVALID_PAYLOAD_MESSAGE: &str = "invalid request payload";

/// Query-string key filtering listings by brand.
pub(crate) const BRAND_PARAM: &str = "brand";

pub(crate) fn validation_error(err: DeviceValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Parse a device identifier taken from the request path.
pub(crate) fn parse_device_id(raw: &str) -> Result<DeviceId, Error> {
    DeviceId::new(raw).map_err(validation_error)
}

/// Decode a JSON request body, hiding decoder detail from the client.
pub(crate) fn parse_json_body<T>(body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "request body rejected");
        Error::invalid_request(INVALID_PAYLOAD_MESSAGE)
    })
}

/// Brand filter from a raw query string; empty values count as absent.
pub(crate) fn brand_filter(query: &str) -> Option<String> {
    first_query_value(query, BRAND_PARAM).filter(|brand| !brand.is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{CreateDevice, ErrorCode, UpdateDevice};

    #[rstest]
    #[case("", "id is required")]
    #[case("abc", "id is not a valid UUID")]
    fn parse_device_id_rejects_malformed(#[case] raw: &str, #[case] message: &str) {
        let err = parse_device_id(raw).expect_err("malformed id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    fn parse_device_id_accepts_uuid() {
        let id = parse_device_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case(b"not json".as_slice())]
    #[case(b"".as_slice())]
    #[case(br#"{"name": 42}"#.as_slice())]
    fn parse_json_body_hides_decoder_detail(#[case] body: &[u8]) {
        let err = parse_json_body::<CreateDevice>(body).expect_err("undecodable");
        assert_eq!(err.message(), INVALID_PAYLOAD_MESSAGE);
    }

    #[rstest]
    fn parse_json_body_decodes_partial_update() {
        let update: UpdateDevice =
            parse_json_body(br#"{"brand":"Samsung"}"#).expect("valid payload");
        assert_eq!(update.brand.as_deref(), Some("Samsung"));
        assert!(update.name.is_none());
    }

    #[rstest]
    #[case("brand=Apple&limit=5", Some("Apple"))]
    #[case("brand=&limit=5", None)]
    #[case("limit=5", None)]
    #[case("brand=Apple&brand=Samsung", Some("Apple"))]
    fn brand_filter_uses_first_non_empty_value(#[case] query: &str, #[case] expected: Option<&str>) {
        assert_eq!(brand_filter(query).as_deref(), expected);
    }
}
