//! Service entry-point: loads settings, wires the stores and starts the
//! authentication HTTP API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};

use server::{ServerConfig, create_server};
use sso::domain::ports::{AppRepository, Authenticator, UserRepository};
use sso::domain::{AuthService, BcryptPasswordHasher, TokenIssuer};
use sso::inbound::http::health::HealthState;
use sso::inbound::http::state::HttpState;
use sso::logging::init_tracing;
use sso::middleware::LoggedAuthenticator;
use sso::outbound::memory::{InMemoryAppRepository, InMemoryUserRepository};
use sso::outbound::persistence::{DbPool, DieselAppRepository, DieselUserRepository, PoolConfig};
use sso::settings::{ServiceSettings, SsoSettings};

fn build_authenticator<U, A>(
    users: Arc<U>,
    apps: Arc<A>,
    settings: &ServiceSettings,
) -> Result<Arc<dyn Authenticator>>
where
    U: UserRepository + 'static,
    A: AppRepository + 'static,
{
    let hasher = BcryptPasswordHasher::new(settings.bcrypt_cost)
        .wrap_err("failed to configure password hasher")?;
    let service = AuthService::new(
        users,
        apps,
        Arc::new(hasher),
        TokenIssuer::new(Arc::new(DefaultClock)),
        settings.token_ttl,
    );
    Ok(Arc::new(LoggedAuthenticator::new(service)))
}

async fn wire_stores(settings: &ServiceSettings) -> Result<Arc<dyn Authenticator>> {
    match settings.database_url.as_deref() {
        Some(url) => {
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections),
            )
            .await
            .wrap_err("failed to build database pool")?;
            info!(
                max_connections = settings.db_max_connections,
                "using PostgreSQL stores"
            );
            build_authenticator(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselAppRepository::new(pool)),
                settings,
            )
        }
        None => {
            let apps = match settings.local_app() {
                Some(app) => {
                    warn!(app_id = %app.id(), "SSO_DATABASE_URL not set; using in-memory stores");
                    InMemoryAppRepository::new([app])
                }
                None => {
                    warn!(
                        "SSO_DATABASE_URL and SSO_LOCAL_APP_SECRET not set; \
                         in-memory stores hold no apps and every login fails"
                    );
                    InMemoryAppRepository::default()
                }
            };
            build_authenticator(
                Arc::new(InMemoryUserRepository::default()),
                Arc::new(apps),
                settings,
            )
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = SsoSettings::load()
        .map_err(|err| eyre!("failed to load settings: {err}"))?
        .validate()
        .wrap_err("invalid settings")?;

    init_tracing(settings.environment)
        .map_err(|err| eyre!("failed to initialise tracing: {err}"))?;
    info!(
        env = %settings.environment,
        bind_addr = %settings.bind_addr,
        token_ttl_secs = settings.token_ttl.as_secs(),
        "starting sso service"
    );

    let auth = wire_stores(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(HttpState::new(auth));

    let server = create_server(
        health_state.clone(),
        http_state,
        ServerConfig::from(&settings),
    )
    .wrap_err_with(|| format!("failed to bind {}", settings.bind_addr))?;

    let outcome = server.await;
    health_state.mark_unhealthy();
    info!("sso service stopped");
    outcome.wrap_err("server terminated with an error")
}
