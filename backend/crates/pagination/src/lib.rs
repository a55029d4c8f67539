//! Offset and limit pagination primitives shared by listing endpoints.
//!
//! Listing endpoints accept `offset` and `limit` query parameters. Parsing is
//! deliberately lenient: a missing parameter, or one that is not a
//! non-negative integer, resolves to its default instead of rejecting the
//! request.
//!
//! ```
//! use pagination::PageRequest;
//!
//! let page = PageRequest::from_query("brand=Apple&limit=5&offset=oops");
//! assert_eq!(page.offset(), 0);
//! assert_eq!(page.limit(), 5);
//! ```

use std::num::ParseIntError;

use thiserror::Error;
use url::form_urlencoded;

/// Offset applied when the request does not supply a usable value.
pub const DEFAULT_OFFSET: u32 = 0;
/// Page size applied when the request does not supply a usable value.
pub const DEFAULT_LIMIT: u32 = 10;

/// Query-string key carrying the number of records to skip.
pub const OFFSET_PARAM: &str = "offset";
/// Query-string key carrying the maximum number of records to return.
pub const LIMIT_PARAM: &str = "limit";

/// Reasons a pagination parameter was discarded in favour of its default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageParamError {
    /// The parameter was not present in the query string.
    #[error("{name} is missing")]
    Missing {
        /// Parameter name.
        name: &'static str,
    },
    /// The parameter was present but not a non-negative integer.
    #[error("{name} must be a non-negative integer, got `{value}`")]
    NotAnInteger {
        /// Parameter name.
        name: &'static str,
        /// Raw value received.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// A window over an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    offset: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_OFFSET, DEFAULT_LIMIT)
    }
}

impl PageRequest {
    /// Build a page request from explicit values.
    #[must_use]
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Number of records to skip.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Maximum number of records to return.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Parse `offset` and `limit` from a raw (undecoded) query string.
    ///
    /// The first occurrence of each key wins. Unusable values fall back to
    /// [`DEFAULT_OFFSET`] and [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let offset = parse_param(query, OFFSET_PARAM).unwrap_or(DEFAULT_OFFSET);
        let limit = parse_param(query, LIMIT_PARAM).unwrap_or(DEFAULT_LIMIT);
        Self::new(offset, limit)
    }
}

/// Return the first decoded value for `key` in a raw query string.
#[must_use]
pub fn first_query_value(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// Parse a single pagination parameter from a raw query string.
///
/// # Errors
///
/// Returns [`PageParamError::Missing`] when the key is absent or empty and
/// [`PageParamError::NotAnInteger`] when the value does not parse as `u32`.
pub fn parse_param(query: &str, name: &'static str) -> Result<u32, PageParamError> {
    let value = first_query_value(query, name)
        .filter(|value| !value.is_empty())
        .ok_or(PageParamError::Missing { name })?;
    value
        .parse::<u32>()
        .map_err(|source| PageParamError::NotAnInteger {
            name,
            value,
            source,
        })
}
