//! Service configuration loaded via OrthoConfig.
//!
//! Every value can be supplied through an `SSO_`-prefixed environment
//! variable (for example `SSO_TOKEN_TTL_SECS=900`). Unset values fall back to
//! local-development defaults; [`SsoSettings::validate`] turns the raw layer
//! into a checked [`ServiceSettings`].

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    App, AppId, AppSecret, DEFAULT_BCRYPT_COST, MAX_BCRYPT_COST, MIN_BCRYPT_COST,
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const LOCAL_APP_ID: i32 = 1;
const LOCAL_APP_NAME: &str = "local";

/// Deployment environment selecting log format and strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Developer workstation: pretty logs, in-memory stores allowed.
    #[default]
    Local,
    /// Shared development deployment: JSON logs at debug level.
    Dev,
    /// Production: JSON logs at info level.
    Prod,
}

impl Environment {
    /// Lowercase name as accepted by `SSO_ENV`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            _ => Err(SettingsError::UnknownEnvironment {
                value: value.to_owned(),
            }),
        }
    }
}

/// Errors raised while validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `SSO_ENV` is not one of `local`, `dev` or `prod`.
    #[error("unknown environment {value:?}; expected local, dev or prod")]
    UnknownEnvironment {
        /// Rejected value.
        value: String,
    },
    /// `SSO_HOST` is not an IP address.
    #[error("invalid host {value:?}; expected an IP address")]
    InvalidHost {
        /// Rejected value.
        value: String,
    },
    /// Token lifetime must be positive.
    #[error("token ttl must be greater than zero")]
    ZeroTokenTtl,
    /// Bcrypt cost outside the supported range.
    #[error("bcrypt cost {cost} outside {min}..={max}")]
    InvalidBcryptCost {
        /// Rejected cost.
        cost: u32,
        /// Smallest accepted cost.
        min: u32,
        /// Largest accepted cost.
        max: u32,
    },
    /// Pool size must be positive.
    #[error("database pool size must be greater than zero")]
    ZeroPoolSize,
    /// Non-local environments must persist to PostgreSQL.
    #[error("SSO_DATABASE_URL is required when env is {env}")]
    MissingDatabaseUrl {
        /// Environment that requires a database.
        env: Environment,
    },
}

/// Raw configuration layer.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SSO")]
pub struct SsoSettings {
    /// Deployment environment: `local`, `dev` or `prod`.
    pub env: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 44044)]
    pub port: u16,
    /// PostgreSQL connection string. In-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Lifetime of issued tokens in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Signing secret for app 1 when running on in-memory stores.
    pub local_app_secret: Option<String>,
}

/// Checked configuration consumed by the binary.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Selected environment.
    pub environment: Environment,
    /// Socket address the HTTP server binds.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string, if persistence is enabled.
    pub database_url: Option<String>,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
    /// Bcrypt work factor.
    pub bcrypt_cost: u32,
    /// Upper bound on pooled database connections.
    pub db_max_connections: u32,
    /// Secret for the app seeded into in-memory stores, if any.
    pub local_app_secret: Option<AppSecret>,
}

impl fmt::Debug for ServiceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceSettings")
            .field("environment", &self.environment)
            .field("bind_addr", &self.bind_addr)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("db_max_connections", &self.db_max_connections)
            .field("local_app_secret", &self.local_app_secret)
            .finish()
    }
}

impl ServiceSettings {
    /// App to seed into in-memory stores, built from `SSO_LOCAL_APP_SECRET`.
    #[must_use]
    pub fn local_app(&self) -> Option<App> {
        self.local_app_secret
            .clone()
            .map(|secret| App::new(AppId::new(LOCAL_APP_ID), LOCAL_APP_NAME, secret))
    }
}

impl SsoSettings {
    /// Return the configured environment name, falling back to `local`.
    pub fn env(&self) -> &str {
        self.env.as_deref().unwrap_or("local")
    }

    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the token lifetime in seconds, falling back to one hour.
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS)
    }

    /// Return the bcrypt cost, falling back to the default.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Return the pool size, falling back to the default.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Check every value and resolve defaults.
    ///
    /// # Errors
    /// Returns the first [`SettingsError`] encountered.
    ///
    /// # Examples
    /// ```
    /// use sso::settings::{Environment, SsoSettings};
    ///
    /// let raw = SsoSettings {
    ///     env: None,
    ///     host: Some("127.0.0.1".into()),
    ///     port: 8080,
    ///     database_url: None,
    ///     token_ttl_secs: None,
    ///     bcrypt_cost: None,
    ///     db_max_connections: None,
    ///     local_app_secret: None,
    /// };
    /// let settings = raw.validate().expect("defaults are valid");
    /// assert_eq!(settings.environment, Environment::Local);
    /// assert_eq!(settings.bind_addr.port(), 8080);
    /// ```
    pub fn validate(&self) -> Result<ServiceSettings, SettingsError> {
        let environment: Environment = self.env().parse()?;
        let ip: IpAddr = self
            .host()
            .parse()
            .map_err(|_| SettingsError::InvalidHost {
                value: self.host().to_owned(),
            })?;

        let ttl_secs = self.token_ttl_secs();
        if ttl_secs == 0 {
            return Err(SettingsError::ZeroTokenTtl);
        }

        let cost = self.bcrypt_cost();
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(SettingsError::InvalidBcryptCost {
                cost,
                min: MIN_BCRYPT_COST,
                max: MAX_BCRYPT_COST,
            });
        }

        let db_max_connections = self.db_max_connections();
        if db_max_connections == 0 {
            return Err(SettingsError::ZeroPoolSize);
        }

        let database_url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_owned);
        if database_url.is_none() && environment != Environment::Local {
            return Err(SettingsError::MissingDatabaseUrl { env: environment });
        }

        let local_app_secret = self
            .local_app_secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
            .map(AppSecret::new);

        Ok(ServiceSettings {
            environment,
            bind_addr: SocketAddr::new(ip, self.port),
            database_url,
            token_ttl: Duration::from_secs(ttl_secs),
            bcrypt_cost: cost,
            db_max_connections,
            local_app_secret,
        })
    }
}
