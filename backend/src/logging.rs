//! Tracing subscriber setup per deployment environment.
//!
//! `local` renders human-readable output at debug level, `dev` and `prod`
//! emit JSON lines at debug and info level respectively. A `RUST_LOG`
//! directive always takes precedence over the environment default.

use tracing_subscriber::{EnvFilter, fmt};

use crate::settings::Environment;

/// Default filter directive for `environment`.
#[must_use]
pub const fn default_directive(environment: Environment) -> &'static str {
    match environment {
        Environment::Local | Environment::Dev => "debug",
        Environment::Prod => "info",
    }
}

fn filter_for(environment: Environment) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(environment)))
}

/// Install the global subscriber for `environment`.
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn init_tracing(
    environment: Environment,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let builder = fmt().with_env_filter(filter_for(environment));
    match environment {
        Environment::Local => builder.pretty().try_init(),
        Environment::Dev | Environment::Prod => builder.json().try_init(),
    }
}
