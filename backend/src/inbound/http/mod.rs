//! HTTP inbound adapter exposing the authentication endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod state;
pub(crate) mod validation;

use actix_web::web;

pub use crate::domain::ApiResult;
pub use error::json_error_handler;

/// Register the `/api/v1` routes and JSON extractor configuration.
///
/// Callers provide [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use sso::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api/v1")
                .service(auth::login)
                .service(auth::register)
                .service(auth::is_admin),
        );
}
