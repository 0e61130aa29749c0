//! Login, logout and route guarding against the mock API.

mod common;

use catalog_client::{
    post_login_navigation, AppState, ClientConfig, ClientError, Navigation, Route, RouteGuard,
};
use common::{app_allowing, app_for, logged_in_app, spawn_server, ALLOWED_EMAIL, TOKEN, TOKENLESS_EMAIL};

#[tokio::test]
async fn login_with_allowed_email_opens_a_session() {
    let server = spawn_server(vec![]).await;
    let app = app_for(&server);

    let navigation = app.auth.login(ALLOWED_EMAIL).await.unwrap();

    assert_eq!(navigation, Navigation::Push(Route::Products));
    let session = app.auth.snapshot();
    assert_eq!(session.token(), Some(TOKEN));
    assert_eq!(session.user_email(), Some(ALLOWED_EMAIL));
    assert_eq!(session.error(), None);
    assert!(!session.is_loading());
    assert_eq!(post_login_navigation(&session), Some(Navigation::Push(Route::Products)));
    assert_eq!(server.api.requests(), 1);
}

#[tokio::test]
async fn login_with_other_email_names_the_allowed_address() {
    let server = spawn_server(vec![]).await;
    let app = app_for(&server);

    let err = app.auth.login("someone@example.com").await.unwrap_err();

    assert!(err.is_auth_error());
    assert!(err.to_string().contains(ALLOWED_EMAIL));
    let session = app.auth.snapshot();
    assert_eq!(session.token(), None);
    assert_eq!(session.error(), Some(err.to_string().as_str()));
    assert!(!session.is_loading());
    assert_eq!(server.api.requests(), 0);
}

#[tokio::test]
async fn rejected_login_keeps_the_existing_token() {
    let server = spawn_server(vec![]).await;
    let app = logged_in_app(&server).await;

    assert!(app.auth.login("intruder@example.com").await.is_err());

    let session = app.auth.snapshot();
    assert_eq!(session.token(), Some(TOKEN));
    assert_eq!(session.user_email(), Some(ALLOWED_EMAIL));
    assert!(session.error().is_some());
}

#[tokio::test]
async fn email_missing_from_accounts_is_not_found() {
    let server = spawn_server(vec![]).await;
    let app = app_allowing(&server, "missing@example.com");

    let err = app.auth.login("missing@example.com").await.unwrap_err();

    assert_eq!(err.to_string(), "Email not found: missing@example.com");
    assert_eq!(app.auth.snapshot().token(), None);
    assert_eq!(server.api.requests(), 1);
}

#[tokio::test]
async fn account_without_token_gets_a_minted_one() {
    let server = spawn_server(vec![]).await;
    let app = app_allowing(&server, TOKENLESS_EMAIL);

    app.auth.login(TOKENLESS_EMAIL).await.unwrap();

    let token = app.auth.token().unwrap();
    assert!(uuid::Uuid::parse_str(&token).is_ok());
}

#[tokio::test]
async fn malformed_email_never_dispatches() {
    let server = spawn_server(vec![]).await;
    let app = app_for(&server);
    let mut session_rx = app.auth.subscribe();

    let err = app.auth.login("not-an-email").await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(err.to_string(), "Please enter a valid email");
    assert!(!session_rx.has_changed().unwrap());
    assert_eq!(app.auth.snapshot().error(), None);
    assert_eq!(server.api.requests(), 0);
}

#[tokio::test]
async fn unreachable_api_uses_the_fallback_message() {
    let app = AppState::new(ClientConfig::with_base_url("http://127.0.0.1:1/api")).unwrap();

    let err = app.auth.login(ALLOWED_EMAIL).await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(app.auth.snapshot().error(), Some("Login failed"));
    assert!(!app.auth.snapshot().is_loading());
}

#[tokio::test]
async fn logout_always_clears_the_session() {
    let server = spawn_server(vec![]).await;
    let app = logged_in_app(&server).await;
    let _ = app.auth.login("intruder@example.com").await;

    assert_eq!(app.auth.logout(), Navigation::Replace(Route::Login));

    let session = app.auth.snapshot();
    assert_eq!(session.token(), None);
    assert_eq!(session.user_email(), None);
    assert_eq!(session.error(), None);

    app.auth.logout();
    assert_eq!(app.auth.snapshot().token(), None);
}

#[tokio::test]
async fn logout_on_a_protected_view_redirects_once() {
    let server = spawn_server(vec![]).await;
    let app = logged_in_app(&server).await;

    let mut session_rx = app.auth.subscribe();
    let mut guard = RouteGuard::new();
    assert_eq!(guard.check(&Route::Products, &session_rx.borrow_and_update()), None);

    app.auth.logout();

    assert_eq!(
        guard.next_redirect(&Route::Products, &mut session_rx).await,
        Some(Navigation::Replace(Route::Login))
    );
    assert_eq!(guard.check(&Route::Products, &app.auth.snapshot()), None);
}
