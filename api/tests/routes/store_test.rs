use axum::http::StatusCode;
use db::models::{rating, store, user::Role};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use crate::helpers::{create_user, get_json_body, get_request, login, make_test_app};

/// Seeds one owner, five stores and two raters. Returns the first rater's id.
async fn seed_stores(db: &DatabaseConnection) -> i64 {
    let owner = create_user(db, "Olive Owner", "olive@example.com", Role::StoreOwner).await;
    let rita = create_user(db, "Rita Rater", "rita@example.com", Role::NormalUser).await;
    let omar = create_user(db, "Omar Other", "omar@example.com", Role::NormalUser).await;
    create_user(db, "Ada Admin", "ada@example.com", Role::Admin).await;

    let mut ids = Vec::new();
    for (name, email, address) in [
        ("Corner Mart", "corner@shops.io", "12 Elm Road"),
        ("Bean Bar", "beans@martmail.com", "7 Oak Lane"),
        ("apex Tools", "apex@tools.io", "3 Market Street"),
        ("Daily Mart", "daily@shops.io", "90 Pine Ave"),
        ("Zeta Books", "zeta@books.io", "1 Mart Square"),
    ] {
        ids.push(store::Model::create(db, name, email, address, owner.id).await.unwrap().id);
    }

    rating::Model::create(db, ids[0], rita.id, 4).await.unwrap();
    rating::Model::create(db, ids[0], omar.id, 5).await.unwrap();
    rating::Model::create(db, ids[3], omar.id, 2).await.unwrap();

    rita.id
}

#[tokio::test]
async fn listing_requires_a_session() {
    let (app, _db) = make_test_app().await;

    let response = app.oneshot(get_request("/store", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn store_owner_cannot_browse() {
    let (app, db) = make_test_app().await;
    seed_stores(&db).await;
    let cookie = login(&app, "olive@example.com").await;

    let response = app.oneshot(get_request("/store", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn search_sort_and_page_for_normal_user() {
    let (app, db) = make_test_app().await;
    seed_stores(&db).await;
    let cookie = login(&app, "rita@example.com").await;

    let response = app
        .oneshot(get_request(
            "/store?search=Mart&sortBy=name&order=ASC&page=1&limit=2",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    let stores = json["stores"].as_array().unwrap();
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0]["name"], "Corner Mart");
    assert_eq!(stores[0]["averageRating"], 4.5);
    assert_eq!(stores[0]["userRating"], 4);
    assert_eq!(stores[1]["name"], "Daily Mart");
    assert_eq!(stores[1]["averageRating"], 2.0);
    assert!(stores[1]["userRating"].is_null());

    assert_eq!(json["pagination"]["currentPage"], 1);
    assert_eq!(json["pagination"]["limit"], 2);
    assert_eq!(json["pagination"]["totalCount"], 3);
    assert_eq!(json["pagination"]["totalPages"], 2);
    assert_eq!(json["pagination"]["hasMore"], true);
}

#[tokio::test]
async fn defaults_apply_without_query_string() {
    let (app, db) = make_test_app().await;
    seed_stores(&db).await;
    let cookie = login(&app, "rita@example.com").await;

    let response = app.oneshot(get_request("/store", Some(&cookie))).await.unwrap();
    let json = get_json_body(response).await;

    let names: Vec<_> = json["stores"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, vec!["apex Tools", "Bean Bar"]);
    assert_eq!(json["pagination"]["totalCount"], 5);
}

#[tokio::test]
async fn unknown_sort_column_is_bad_request() {
    let (app, db) = make_test_app().await;
    seed_stores(&db).await;
    let cookie = login(&app, "rita@example.com").await;

    let response = app
        .oneshot(get_request("/store?sortBy=owner_id", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get_json_body(response).await["success"], false);
}

#[tokio::test]
async fn admin_search_reaches_email_on_both_mounts() {
    let (app, db) = make_test_app().await;
    seed_stores(&db).await;
    let cookie = login(&app, "ada@example.com").await;

    for uri in ["/store?search=martmail&limit=10", "/admin/stores?search=martmail&limit=10"] {
        let response = app.clone().oneshot(get_request(uri, Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let json = get_json_body(response).await;
        assert_eq!(json["stores"].as_array().unwrap().len(), 1, "{uri}");
        assert_eq!(json["stores"][0]["name"], "Bean Bar");
    }

    let rita = login(&app, "rita@example.com").await;
    let response = app
        .oneshot(get_request("/store?search=martmail", Some(&rita)))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["pagination"]["totalCount"], 0);
}
