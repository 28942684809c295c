use api::{auth::session_layer, routes::app};
use axum::{
    Router,
    body::Body,
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
    response::Response,
};
use db::models::user::{self, Role};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use util::state::AppState;

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret-0123";
pub const PASSWORD: &str = "Secret#123";

/// Router over a fresh in-memory database with in-memory sessions.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await;
    let router = app(
        AppState::new(db.clone()),
        session_layer(MemoryStore::default(), TEST_SECRET, false),
    );
    (router, db)
}

pub async fn create_user(db: &DatabaseConnection, name: &str, email: &str, role: Role) -> user::Model {
    user::Model::create(db, name, email, PASSWORD, "1 Test Street", role)
        .await
        .expect("failed to create user")
}

/// Signs in and returns the `name=value` cookie pair to send back.
pub async fn login(app: &Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": PASSWORD });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/auth/login", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "login failed for {email}");

    response
        .headers()
        .get(SET_COOKIE)
        .expect("login sets a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_owned()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
