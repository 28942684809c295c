use axum::http::{StatusCode, header::SET_COOKIE};
use db::models::user::Role;
use serde_json::json;
use tower::ServiceExt;

use crate::helpers::{
    create_user, get_json_body, get_request, json_request, login, make_test_app,
};

#[tokio::test]
async fn register_creates_normal_user() {
    let (app, db) = make_test_app().await;

    let payload = json!({
        "name": "Jordan Example Normal User",
        "email": "jordan@example.com",
        "password": "Secret#123",
        "address": "12 Long Road"
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/auth/register", None, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "User registered");
    let id = json["userId"].as_i64().unwrap();

    let stored = db::models::user::Model::find_by_email(&db, "jordan@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.role, Role::NormalUser);
}

#[tokio::test]
async fn register_rejects_weak_password() {
    let (app, _db) = make_test_app().await;

    let payload = json!({
        "name": "Jordan Example Normal User",
        "email": "jordan@example.com",
        "password": "password",
        "address": "12 Long Road"
    });
    let response = app
        .oneshot(json_request("POST", "/auth/register", None, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("Password must be 8-16 characters"));
}

#[tokio::test]
async fn register_duplicate_email_is_conflict() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Existing Person", "taken@example.com", Role::NormalUser).await;

    let payload = json!({
        "name": "Jordan Example Normal User",
        "email": "taken@example.com",
        "password": "Secret#123",
        "address": "12 Long Road"
    });
    let response = app
        .oneshot(json_request("POST", "/auth/register", None, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(get_json_body(response).await["message"], "Email already exists.");
}

#[tokio::test]
async fn login_sets_cookie_and_me_returns_user() {
    let (app, db) = make_test_app().await;
    let user = create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;

    let cookie = login(&app, "rita@example.com").await;

    let response = app
        .oneshot(get_request("/auth/me", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "normal_user");
    assert!(json["user"].get("password").is_none());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;

    let payload = json!({ "email": "rita@example.com", "password": "Wrong#123" });
    let response = app
        .oneshot(json_request("POST", "/auth/login", None, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn me_without_session_is_unauthorized() {
    let (app, _db) = make_test_app().await;

    let response = app.oneshot(get_request("/auth/me", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Authentication required");
}

#[tokio::test]
async fn tampered_cookie_is_unauthorized() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;
    let cookie = login(&app, "rita@example.com").await;

    let tampered = format!("{cookie}x");
    let response = app
        .oneshot(get_request("/auth/me", Some(&tampered)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;
    let cookie = login(&app, "rita@example.com").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/auth/logout", Some(&cookie), &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_json_body(response).await["message"], "Logged out");

    let response = app
        .oneshot(get_request("/auth/me", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_change_takes_effect() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;
    let cookie = login(&app, "rita@example.com").await;

    let payload = json!({ "currentPassword": "Secret#123", "newPassword": "Fresh#4567" });
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/auth/password", Some(&cookie), &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let old = json!({ "email": "rita@example.com", "password": "Secret#123" });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/auth/login", None, &old))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let new = json!({ "email": "rita@example.com", "password": "Fresh#4567" });
    let response = app
        .oneshot(json_request("POST", "/auth/login", None, &new))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
