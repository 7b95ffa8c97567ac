//! Behavioural tests for the authentication service over in-memory stores.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use sso::domain::ports::Authenticator;
use sso::domain::{
    App, AppId, AppSecret, AuthService, BcryptPasswordHasher, Credentials, ErrorCode,
    MIN_BCRYPT_COST, TokenError, TokenIssuer, UserId,
};
use sso::middleware::LoggedAuthenticator;
use sso::outbound::memory::{InMemoryAppRepository, InMemoryUserRepository};

const TTL: Duration = Duration::from_secs(3600);

struct Harness {
    auth: LoggedAuthenticator<
        AuthService<InMemoryUserRepository, InMemoryAppRepository, BcryptPasswordHasher>,
    >,
    users: Arc<InMemoryUserRepository>,
    issuer: TokenIssuer,
}

fn app_one() -> App {
    App::new(AppId::new(1), "billing", AppSecret::new("app-one-secret"))
}

fn app_two() -> App {
    App::new(AppId::new(2), "reports", AppSecret::new("app-two-secret"))
}

fn creds(email: &str, password: &str) -> Credentials {
    Credentials::try_from_parts(email, password).expect("credentials shape")
}

#[fixture]
fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::default());
    let apps = Arc::new(InMemoryAppRepository::new([app_one(), app_two()]));
    let hasher = BcryptPasswordHasher::new(MIN_BCRYPT_COST).expect("minimum cost is valid");
    let issuer = TokenIssuer::new(Arc::new(DefaultClock));
    let service = AuthService::new(
        Arc::clone(&users),
        apps,
        Arc::new(hasher),
        issuer.clone(),
        TTL,
    );
    Harness {
        auth: LoggedAuthenticator::new(service),
        users,
        issuer,
    }
}

#[rstest]
#[tokio::test]
async fn register_then_login_issues_a_token_for_the_requested_app(harness: Harness) {
    let user_id = harness
        .auth
        .register_new_user(&creds("a@x.com", "pw123"))
        .await
        .expect("registration succeeds");

    let token = harness
        .auth
        .login(&creds("a@x.com", "pw123"), AppId::new(1))
        .await
        .expect("login succeeds");

    let claims = harness
        .issuer
        .verify(&token, &app_one())
        .expect("token verifies with app one's secret");
    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.app_id(), AppId::new(1));
    assert!(matches!(
        harness.issuer.verify(&token, &app_two()),
        Err(TokenError::Invalid { .. })
    ));
}

#[rstest]
#[tokio::test]
async fn login_failures_follow_the_error_contract(harness: Harness) {
    harness
        .auth
        .register_new_user(&creds("a@x.com", "pw123"))
        .await
        .expect("registration succeeds");

    let wrong_password = harness
        .auth
        .login(&creds("a@x.com", "nope"), AppId::new(1))
        .await
        .expect_err("wrong password fails");
    let unknown_email = harness
        .auth
        .login(&creds("ghost@x.com", "pw123"), AppId::new(1))
        .await
        .expect_err("unknown email fails");
    let unknown_app = harness
        .auth
        .login(&creds("a@x.com", "pw123"), AppId::new(999))
        .await
        .expect_err("unknown app fails");

    assert_eq!(wrong_password.code(), ErrorCode::InvalidCredentials);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(unknown_app.code(), ErrorCode::AppNotFound);
}

#[rstest]
#[tokio::test]
async fn registering_an_email_twice_keeps_the_first_account(harness: Harness) {
    let first_id = harness
        .auth
        .register_new_user(&creds("a@x.com", "pw123"))
        .await
        .expect("first registration succeeds");

    let err = harness
        .auth
        .register_new_user(&creds("a@x.com", "pw2"))
        .await
        .expect_err("second registration fails");

    assert_eq!(err.code(), ErrorCode::UserExists);
    assert_eq!(harness.users.user_count().expect("count"), 1);

    let token = harness
        .auth
        .login(&creds("a@x.com", "pw123"), AppId::new(1))
        .await
        .expect("original password still logs in");
    let claims = harness
        .issuer
        .verify(&token, &app_one())
        .expect("token verifies");
    assert_eq!(claims.user_id(), first_id);

    let rejected = harness
        .auth
        .login(&creds("a@x.com", "pw2"), AppId::new(1))
        .await
        .expect_err("second password was never stored");
    assert_eq!(rejected.code(), ErrorCode::InvalidCredentials);
}

#[rstest]
#[tokio::test]
async fn password_extended_past_the_bcrypt_limit_is_rejected(harness: Harness) {
    let exact = "x".repeat(72);
    harness
        .auth
        .register_new_user(&creds("long@x.com", &exact))
        .await
        .expect("72-byte password registers");

    let err = harness
        .auth
        .login(
            &creds("long@x.com", &format!("{exact}DIFFERENT-SUFFIX")),
            AppId::new(1),
        )
        .await
        .expect_err("extended password must not match");
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
}

#[rstest]
#[tokio::test]
async fn admin_flag_reflects_the_store(harness: Harness) {
    let user_id = harness
        .auth
        .register_new_user(&creds("a@x.com", "pw123"))
        .await
        .expect("registration succeeds");

    assert!(!harness.auth.is_admin(user_id).await.expect("lookup succeeds"));

    assert!(harness.users.grant_admin(user_id).expect("grant succeeds"));
    assert!(harness.auth.is_admin(user_id).await.expect("lookup succeeds"));

    let err = harness
        .auth
        .is_admin(UserId::new(404))
        .await
        .expect_err("unknown user fails");
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
}
