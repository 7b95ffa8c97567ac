//! End-to-end tests for the authentication HTTP endpoints over in-memory
//! stores.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};
use sso::Trace;
use sso::domain::{
    AccessToken, App as Tenant, AppId, AppSecret, AuthService, BcryptPasswordHasher,
    MIN_BCRYPT_COST, TRACE_ID_HEADER, TokenIssuer,
};
use sso::inbound::http::configure;
use sso::inbound::http::state::HttpState;
use sso::middleware::LoggedAuthenticator;
use sso::outbound::memory::{InMemoryAppRepository, InMemoryUserRepository};

fn tenant() -> Tenant {
    Tenant::new(AppId::new(1), "billing", AppSecret::new("app-one-secret"))
}

async fn init_app() -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    let service = AuthService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryAppRepository::new([tenant()])),
        Arc::new(BcryptPasswordHasher::new(MIN_BCRYPT_COST).expect("minimum cost is valid")),
        TokenIssuer::new(Arc::new(DefaultClock)),
        Duration::from_secs(3600),
    );
    let state = HttpState::new(Arc::new(LoggedAuthenticator::new(service)));
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

async fn send<S>(app: &S, request: TestRequest) -> (StatusCode, Option<String>, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, trace_id, value)
}

fn post(uri: &str, body: Value) -> TestRequest {
    TestRequest::post().uri(uri).set_json(body)
}

#[actix_web::test]
async fn register_login_and_admin_lookup_round_trip() {
    let app = init_app().await;

    let (status, _, body) = send(
        &app,
        post("/api/v1/register", json!({"email": "a@x.com", "password": "pw123"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["userId"].as_i64().expect("numeric user id");
    assert!(user_id > 0);

    let (status, trace_id, body) = send(
        &app,
        post(
            "/api/v1/login",
            json!({"email": "a@x.com", "password": "pw123", "appId": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(trace_id.is_some());
    let token = AccessToken::new(body["token"].as_str().expect("token string"));
    let claims = TokenIssuer::new(Arc::new(DefaultClock))
        .verify(&token, &tenant())
        .expect("token verifies");
    assert_eq!(claims.uid, user_id);

    let (status, _, body) = send(
        &app,
        TestRequest::get().uri(&format!("/api/v1/users/{user_id}/admin")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"isAdmin": false}));
}

#[rstest]
#[case(json!({"email": "a@x.com", "password": "wrong", "appId": 1}), StatusCode::UNAUTHORIZED, "invalid_credentials")]
#[case(json!({"email": "ghost@x.com", "password": "pw123", "appId": 1}), StatusCode::UNAUTHORIZED, "invalid_credentials")]
#[case(json!({"email": "a@x.com", "password": "pw123", "appId": 999}), StatusCode::NOT_FOUND, "app_not_found")]
#[case(json!({"email": "a@x.com", "password": "pw123", "appId": -1}), StatusCode::BAD_REQUEST, "invalid_request")]
#[actix_web::test]
async fn login_failures_carry_status_code_and_trace_id(
    #[case] payload: Value,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let app = init_app().await;
    send(
        &app,
        post("/api/v1/register", json!({"email": "a@x.com", "password": "pw123"})),
    )
    .await;

    let (actual, trace_id, body) = send(&app, post("/api/v1/login", payload)).await;

    assert_eq!(actual, status);
    assert_eq!(body["code"], code);
    assert_eq!(body["traceId"].as_str(), trace_id.as_deref());
}

#[actix_web::test]
async fn duplicate_registration_is_a_conflict_and_keeps_the_first_account() {
    let app = init_app().await;

    let (first, _, body) = send(
        &app,
        post("/api/v1/register", json!({"email": "a@x.com", "password": "pw123"})),
    )
    .await;
    assert_eq!(first, StatusCode::CREATED);
    let first_id = body["userId"].as_i64().expect("numeric user id");

    let (second, _, body) = send(
        &app,
        post("/api/v1/register", json!({"email": "a@x.com", "password": "pw2"})),
    )
    .await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], "user_exists");

    let (status, _, body) = send(
        &app,
        post(
            "/api/v1/login",
            json!({"email": "a@x.com", "password": "pw123", "appId": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = AccessToken::new(body["token"].as_str().expect("token string"));
    let claims = TokenIssuer::new(Arc::new(DefaultClock))
        .verify(&token, &tenant())
        .expect("token verifies");
    assert_eq!(claims.uid, first_id);

    let (status, _, body) = send(
        &app,
        post(
            "/api/v1/login",
            json!({"email": "a@x.com", "password": "pw2", "appId": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_credentials");
}

#[actix_web::test]
async fn admin_lookup_for_unknown_user_is_unauthorised() {
    let app = init_app().await;

    let (status, _, body) = send(&app, TestRequest::get().uri("/api/v1/users/77/admin")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_credentials");
}
