//! Device entity and its create/update inputs.
//!
//! A [`Device`] is only ever built through validating constructors, so its
//! name and brand are non-empty and its identifier is a canonical UUID.
//! [`CreateDevice`] and [`UpdateDevice`] are the inbound shapes for the two
//! mutating use cases.

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation failures for device identifiers and fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceValidationError {
    /// The identifier was empty.
    #[error("id is required")]
    EmptyId,
    /// The identifier is not a UUID.
    #[error("id is not a valid UUID")]
    InvalidId,
    /// A new device was submitted without a name.
    #[error("name is required")]
    MissingName,
    /// A new device was submitted without a brand.
    #[error("brand is required")]
    MissingBrand,
    /// An update or stored row carries an empty name.
    #[error("name must not be empty")]
    EmptyName,
    /// An update or stored row carries an empty brand.
    #[error("brand must not be empty")]
    EmptyBrand,
}

/// Stable device identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(Uuid);

impl DeviceId {
    /// Validate and construct a [`DeviceId`] from its textual form.
    ///
    /// # Examples
    /// ```
    /// use device_service::domain::{DeviceId, DeviceValidationError};
    ///
    /// assert!(DeviceId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// assert_eq!(DeviceId::new(""), Err(DeviceValidationError::EmptyId));
    /// assert_eq!(DeviceId::new("42"), Err(DeviceValidationError::InvalidId));
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, DeviceValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(DeviceValidationError::EmptyId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| DeviceValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DeviceId> for String {
    fn from(value: DeviceId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for DeviceId {
    type Error = DeviceValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unvalidated field bag used to rebuild a [`Device`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDraft {
    /// Device identifier.
    pub id: DeviceId,
    /// Device name; must be non-empty.
    pub name: String,
    /// Manufacturer brand; must be non-empty.
    pub brand: String,
    /// Creation timestamp in UTC.
    pub created_at: DateTime<Utc>,
}

/// Persisted device entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    id: DeviceId,
    name: String,
    brand: String,
    created_at: DateTime<Utc>,
}

impl Device {
    /// Validate a draft into a device.
    pub fn new(draft: DeviceDraft) -> Result<Self, DeviceValidationError> {
        let DeviceDraft {
            id,
            name,
            brand,
            created_at,
        } = draft;
        if name.is_empty() {
            return Err(DeviceValidationError::EmptyName);
        }
        if brand.is_empty() {
            return Err(DeviceValidationError::EmptyBrand);
        }
        Ok(Self {
            id,
            name,
            brand,
            created_at,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Manufacturer brand.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Creation time, fixed at microsecond precision.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Return a copy with the present fields of `changes` applied.
    ///
    /// Identifier and creation time never change.
    pub fn with_changes(&self, changes: &UpdateDevice) -> Self {
        Self {
            id: self.id,
            name: changes.name.clone().unwrap_or_else(|| self.name.clone()),
            brand: changes.brand.clone().unwrap_or_else(|| self.brand.clone()),
            created_at: self.created_at,
        }
    }
}

/// Input for creating a device.
///
/// Missing JSON fields decode as empty strings so validation, rather than
/// decoding, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateDevice {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
}

impl CreateDevice {
    /// Check required fields. Name is checked before brand.
    ///
    /// # Examples
    /// ```
    /// use device_service::domain::CreateDevice;
    ///
    /// let input = CreateDevice { name: String::new(), brand: String::new() };
    /// assert_eq!(input.validate().unwrap_err().to_string(), "name is required");
    /// ```
    pub fn validate(&self) -> Result<(), DeviceValidationError> {
        if self.name.is_empty() {
            return Err(DeviceValidationError::MissingName);
        }
        if self.brand.is_empty() {
            return Err(DeviceValidationError::MissingBrand);
        }
        Ok(())
    }

    /// Validate and convert into a new device with a fresh identifier and
    /// the clock's current UTC time, truncated to the microseconds storage
    /// keeps.
    pub fn into_device(self, clock: &dyn Clock) -> Result<Device, DeviceValidationError> {
        self.validate()?;
        Ok(Device {
            id: DeviceId::random(),
            name: self.name,
            brand: self.brand,
            created_at: clock.utc().trunc_subsecs(6),
        })
    }
}

/// Partial update input; `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdateDevice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl UpdateDevice {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.brand.is_none()
    }

    /// Present fields must not be empty.
    pub fn validate(&self) -> Result<(), DeviceValidationError> {
        if self.name.as_deref().is_some_and(str::is_empty) {
            return Err(DeviceValidationError::EmptyName);
        }
        if self.brand.as_deref().is_some_and(str::is_empty) {
            return Err(DeviceValidationError::EmptyBrand);
        }
        Ok(())
    }
}
