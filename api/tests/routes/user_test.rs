use axum::http::StatusCode;
use db::models::{store, user::Role};
use serde_json::json;
use tower::ServiceExt;

use crate::helpers::{create_user, get_json_body, get_request, json_request, login, make_test_app};

#[tokio::test]
async fn rating_is_upserted_and_listed() {
    let (app, db) = make_test_app().await;
    let owner = create_user(&db, "Olive Owner", "olive@example.com", Role::StoreOwner).await;
    create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;
    let s = store::Model::create(&db, "Corner Mart", "mart@example.com", "1 Main St", owner.id)
        .await
        .unwrap();
    let cookie = login(&app, "rita@example.com").await;
    let uri = format!("/user/stores/{}/rate", s.id);

    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, Some(&cookie), &json!({ "rating": 3 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first = get_json_body(response).await;
    assert_eq!(first["message"], "Rating submitted");
    assert_eq!(first["avgRating"], 3.0);

    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, Some(&cookie), &json!({ "rating": 5 })))
        .await
        .unwrap();
    let second = get_json_body(response).await;
    assert_eq!(second["rating"]["id"], first["rating"]["id"]);
    assert_eq!(second["rating"]["rating"], 5);
    assert_eq!(second["avgRating"], 5.0);

    let response = app
        .oneshot(get_request("/user/rating", Some(&cookie)))
        .await
        .unwrap();
    let list = get_json_body(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["rating"], 5);
    assert_eq!(list[0]["store"]["name"], "Corner Mart");
}

#[tokio::test]
async fn rating_outside_range_or_unknown_store_is_rejected() {
    let (app, db) = make_test_app().await;
    let owner = create_user(&db, "Olive Owner", "olive@example.com", Role::StoreOwner).await;
    create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;
    let s = store::Model::create(&db, "Corner Mart", "mart@example.com", "1 Main St", owner.id)
        .await
        .unwrap();
    let cookie = login(&app, "rita@example.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/user/stores/{}/rate", s.id),
            Some(&cookie),
            &json!({ "rating": 6 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request("POST", "/user/stores/9999/rate", Some(&cookie), &json!({ "rating": 4 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admins_cannot_rate() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Ada Admin", "ada@example.com", Role::Admin).await;
    let cookie = login(&app, "ada@example.com").await;

    let response = app
        .oneshot(json_request("POST", "/user/stores/1/rate", Some(&cookie), &json!({ "rating": 4 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
