use axum::http::StatusCode;
use db::models::{rating, store, user::Role};
use tower::ServiceExt;

use crate::helpers::{create_user, get_json_body, get_request, login, make_test_app};

#[tokio::test]
async fn owner_sees_only_own_stores_with_raters() {
    let (app, db) = make_test_app().await;
    let olive = create_user(&db, "Olive Owner", "olive@example.com", Role::StoreOwner).await;
    let other = create_user(&db, "Otto Owner", "otto@example.com", Role::StoreOwner).await;
    let rita = create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;

    let mine = store::Model::create(&db, "Corner Mart", "mart@example.com", "1 Main St", olive.id)
        .await
        .unwrap();
    store::Model::create(&db, "Otto Outlet", "otto@shop.io", "2 Main St", other.id)
        .await
        .unwrap();
    rating::Model::create(&db, mine.id, rita.id, 4).await.unwrap();

    let cookie = login(&app, "olive@example.com").await;
    let response = app
        .clone()
        .oneshot(get_request("/owner/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    let stores = json["stores"].as_array().unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0]["name"], "Corner Mart");
    assert_eq!(stores[0]["averageRating"], 4.0);
    assert_eq!(stores[0]["ratings"][0]["user"]["name"], "Rita Rater");
    assert_eq!(stores[0]["ratings"][0]["rating"], 4);

    let rita_cookie = login(&app, "rita@example.com").await;
    let response = app
        .oneshot(get_request("/owner/dashboard", Some(&rita_cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
