//! Authentication API handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"a@x.com","password":"pw123","appId":1}
//! POST /api/v1/register {"email":"a@x.com","password":"pw123"}
//! GET /api/v1/users/7/admin
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::Credentials;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{credentials_error, parse_app_id, parse_user_id};

/// Login request body for `POST /api/v1/login`.
///
/// Missing fields deserialise to empty values and are rejected by validation
/// with a field-level error.
#[derive(Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Target app id.
    pub app_id: i64,
}

/// Registration request body for `POST /api/v1/register`.
#[derive(Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    /// Email to register.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Successful login payload.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
}

/// Successful registration payload.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Id assigned to the new user.
    pub user_id: i64,
}

/// Admin lookup payload.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsAdminResponse {
    /// Whether the user holds the admin flag.
    pub is_admin: bool,
}

fn credentials(email: &str, password: String) -> ApiResult<Credentials> {
    let password = Zeroizing::new(password);
    Credentials::try_from_parts(email, &password).map_err(credentials_error)
}

/// Verify credentials and issue a token for the requested app.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest {
        email,
        password,
        app_id,
    } = payload.into_inner();
    let credentials = credentials(&email, password)?;
    let app_id = parse_app_id(app_id)?;

    let token = state.auth.login(&credentials, app_id).await?;
    Ok(web::Json(LoginResponse {
        token: token.as_str().to_owned(),
    }))
}

/// Register a new user.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest { email, password } = payload.into_inner();
    let credentials = credentials(&email, password)?;

    let user_id = state.auth.register_new_user(&credentials).await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        user_id: user_id.get(),
    }))
}

/// Report whether the user holds the admin flag.
#[get("/users/{id}/admin")]
pub async fn is_admin(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<IsAdminResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;

    let admin = state.auth.is_admin(user_id).await?;
    Ok(web::Json(IsAdminResponse { is_admin: admin }))
}
