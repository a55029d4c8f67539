//! Startup configuration loaded via OrthoConfig.
//!
//! Values are read once from the environment (`SERVER_*`, `DB_*`) and passed
//! by value into constructors. Absent values fall back to the defaults below.

use std::ffi::OsString;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_NAME: &str = "devices";
const DEFAULT_DB_USER: &str = "postgres";
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while turning settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Configuration could not be loaded.
    #[error("failed to load {section} settings: {message}")]
    Load {
        /// Settings section that failed.
        section: &'static str,
        /// Loader message.
        message: String,
    },
    /// The database URL could not be assembled.
    #[error("invalid database settings: {message}")]
    DatabaseUrl {
        /// Description of the invalid component.
        message: String,
    },
    /// The bind address did not resolve.
    #[error("invalid bind address {address}: {message}")]
    BindAddress {
        /// Address as configured.
        address: String,
        /// Resolver message.
        message: String,
    },
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    /// Host or IP to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Worker thread count; Actix picks one per core when unset.
    pub workers: Option<usize>,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve the first socket address for the configured host and port.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddress`] when resolution fails.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let address = format!("{}:{}", self.host(), self.port());
        let bind_error = |message: String| SettingsError::BindAddress {
            address: address.clone(),
            message,
        };
        (self.host(), self.port())
            .to_socket_addrs()
            .map_err(|err| bind_error(err.to_string()))?
            .next()
            .ok_or_else(|| bind_error("no addresses resolved".to_owned()))
    }
}

/// PostgreSQL connection and pool settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DB")]
pub struct DatabaseSettings {
    /// Database host.
    pub host: Option<String>,
    /// Database port.
    #[ortho_config(default = 5432)]
    pub port: u16,
    /// Database name.
    pub name: Option<String>,
    /// Login role.
    pub user: Option<String>,
    /// Login password; empty when unset.
    pub password: Option<String>,
    /// Maximum pooled connections.
    #[ortho_config(default = 25)]
    pub max_connections: u32,
    /// Idle connections kept open.
    #[ortho_config(default = 10)]
    pub min_idle: u32,
    /// Maximum connection lifetime in seconds.
    #[ortho_config(default = 300)]
    pub max_lifetime_secs: u64,
}

impl DatabaseSettings {
    /// Configured host, falling back to `localhost`.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_DB_HOST)
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Configured database name, falling back to `devices`.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_DB_NAME)
    }

    /// Configured role, falling back to `postgres`.
    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or(DEFAULT_DB_USER)
    }

    /// Configured password, empty when unset.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }

    /// Assemble a `postgres://` URL with percent-encoded credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::DatabaseUrl`] when a component is rejected by
    /// the URL parser.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        let invalid = |message: String| SettingsError::DatabaseUrl { message };
        let mut url = Url::parse(&format!("postgres://{}:{}", self.host(), self.port()))
            .map_err(|err| invalid(format!("host: {err}")))?;
        url.set_username(self.user())
            .map_err(|()| invalid("user".to_owned()))?;
        if !self.password().is_empty() {
            url.set_password(Some(self.password()))
                .map_err(|()| invalid("password".to_owned()))?;
        }
        url.set_path(self.name());
        Ok(url.into())
    }

    /// Pool configuration derived from these settings.
    ///
    /// # Errors
    ///
    /// Propagates [`DatabaseSettings::database_url`] failures.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.max_connections)
            .with_min_idle(Some(self.min_idle))
            .with_connection_timeout(CHECKOUT_TIMEOUT)
            .with_max_lifetime(Some(Duration::from_secs(self.max_lifetime_secs))))
    }
}

/// All startup settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Listener settings.
    pub server: ServerSettings,
    /// Database settings.
    pub database: DatabaseSettings,
}

impl Settings {
    /// Load every section from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a section fails to parse.
    pub fn load() -> Result<Self, SettingsError> {
        let args = || [OsString::from("device-service")];
        let server =
            ServerSettings::load_from_iter(args()).map_err(|err| SettingsError::Load {
                section: "server",
                message: err.to_string(),
            })?;
        let database =
            DatabaseSettings::load_from_iter(args()).map_err(|err| SettingsError::Load {
                section: "database",
                message: err.to_string(),
            })?;
        Ok(Self { server, database })
    }
}
