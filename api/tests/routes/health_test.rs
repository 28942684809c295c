use axum::http::StatusCode;
use tower::ServiceExt;

use crate::helpers::{get_json_body, get_request, make_test_app};

#[tokio::test]
async fn health_check_returns_ok_json() {
    let (app, _db) = make_test_app().await;

    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
    assert_eq!(json["message"], "Health check passed");
}
