// Integration tests for the session lifecycle over the HTTP surface
use actix_web::cookie::Cookie;
use actix_web::http::Method;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use stashgate::handlers::{health, login, logout, session_info};
use stashgate::session::COOKIE_NAME;
use stashgate::testing::constants::TEST_USER_ID;
use stashgate::testing::{RequestBuilder, TestFixtures};

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(TestFixtures::session_manager()))
                .route("/auth/login", web::post().to(login))
                .route("/auth/logout", web::post().to(logout))
                .route("/auth/session", web::get().to(session_info))
                .route("/ping", web::get().to(health)),
        )
        .await
    };
}

fn login_request() -> actix_web::test::TestRequest {
    RequestBuilder::new()
        .method(Method::POST)
        .uri("/auth/login")
        .json(json!({ "user_id": TEST_USER_ID }))
        .into_test_request()
}

#[actix_web::test]
async fn test_login_sets_session_cookie() {
    let app = test_app!();

    let resp = test::call_service(&app, login_request().to_request()).await;
    assert!(resp.status().is_success());

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == COOKIE_NAME)
        .expect("login response must set the session cookie");

    assert!(!cookie.value().is_empty());
    assert!(cookie.http_only().unwrap());
    assert_eq!(cookie.path().unwrap(), "/");
    assert_eq!(cookie.max_age().unwrap().whole_seconds(), 86_400);
    // Test fixture runs without TLS
    assert_eq!(cookie.secure(), Some(false));
}

#[actix_web::test]
async fn test_full_session_lifecycle() {
    let app = test_app!();

    // Sign in and capture the credential
    let resp = test::call_service(&app, login_request().to_request()).await;
    let session_cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == COOKIE_NAME)
        .unwrap()
        .into_owned();

    // The credential authenticates follow-up requests
    let req = RequestBuilder::new()
        .uri("/auth/session")
        .cookie(session_cookie.clone())
        .into_test_request();
    let resp = test::call_service(&app, req.to_request()).await;
    assert!(resp.status().is_success());
    let claims: Value = test::read_body_json(resp).await;
    assert_eq!(claims["user_id"], TEST_USER_ID);
    assert!(claims["jti"].is_string());
    assert!(claims["iat"].is_number());

    // Sign out clears the client-side copy
    let req = RequestBuilder::new()
        .method(Method::POST)
        .uri("/auth/logout")
        .cookie(session_cookie)
        .into_test_request();
    let resp = test::call_service(&app, req.to_request()).await;
    assert!(resp.status().is_success());

    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == COOKIE_NAME)
        .expect("logout response must overwrite the session cookie");
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age().unwrap().whole_seconds(), 0);
}

#[actix_web::test]
async fn test_session_info_without_cookie_is_unauthorized() {
    let app = test_app!();

    let req = RequestBuilder::new().uri("/auth/session").into_test_request();
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized");
}

#[actix_web::test]
async fn test_tampered_cookie_is_unauthorized() {
    let app = test_app!();

    let resp = test::call_service(&app, login_request().to_request()).await;
    let token = resp
        .response()
        .cookies()
        .find(|c| c.name() == COOKIE_NAME)
        .unwrap()
        .value()
        .to_string();

    // Corrupt the final character of the signature segment
    let mut tampered = token;
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let req = RequestBuilder::new()
        .uri("/auth/session")
        .cookie(Cookie::new(COOKIE_NAME, tampered))
        .into_test_request();
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), 401);

    // The response does not say whether the token was forged or expired
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_description"], "Authentication required");
}

#[actix_web::test]
async fn test_garbage_cookie_is_unauthorized() {
    let app = test_app!();

    for value in ["not.a.token", "", "a.b"] {
        let req = RequestBuilder::new()
            .uri("/auth/session")
            .cookie(Cookie::new(COOKIE_NAME, value))
            .into_test_request();
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), 401, "expected 401 for cookie {value:?}");
    }
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test_app!();

    let req = RequestBuilder::new().uri("/ping").into_test_request();
    let resp = test::call_service(&app, req.to_request()).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
