use axum::{
    body::Body,
    http::{Request, StatusCode, header::{CONTENT_TYPE, COOKIE}},
};
use db::models::{rating, store, user::Role};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use tower::ServiceExt;

use crate::helpers::{create_user, get_json_body, get_request, json_request, login, make_test_app};

#[tokio::test]
async fn admin_routes_reject_other_roles() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;
    let cookie = login(&app, "rita@example.com").await;

    for uri in ["/admin/dashboard", "/admin/owners", "/admin/users", "/admin/stores"] {
        let response = app.clone().oneshot(get_request(uri, Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }

    let response = app.oneshot(get_request("/admin/dashboard", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_counts_rows() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Ada Admin", "ada@example.com", Role::Admin).await;
    let owner = create_user(&db, "Olive Owner", "olive@example.com", Role::StoreOwner).await;
    let rita = create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;
    let s = store::Model::create(&db, "Corner Mart", "mart@example.com", "1 Main St", owner.id)
        .await
        .unwrap();
    rating::Model::create(&db, s.id, rita.id, 3).await.unwrap();

    let cookie = login(&app, "ada@example.com").await;
    let response = app
        .oneshot(get_request("/admin/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        get_json_body(response).await,
        json!({ "totalUsers": 3, "totalStores": 1, "totalRatings": 1 })
    );
}

#[tokio::test]
async fn owner_lookup_filters_and_sorts() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Ada Admin", "ada@example.com", Role::Admin).await;
    create_user(&db, "Zed Owner", "zed@shops.io", Role::StoreOwner).await;
    create_user(&db, "Amy Owner", "amy@fruit.io", Role::StoreOwner).await;
    create_user(&db, "Zed Customer", "zed.c@shops.io", Role::NormalUser).await;
    let cookie = login(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(get_request("/admin/owners", Some(&cookie)))
        .await
        .unwrap();
    let all = get_json_body(response).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["name"], "Amy Owner");
    assert_eq!(all[1]["name"], "Zed Owner");
    assert!(all[0].get("password").is_none());

    let response = app
        .oneshot(get_request("/admin/owners?q=SHOPS", Some(&cookie)))
        .await
        .unwrap();
    let filtered = get_json_body(response).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["email"], "zed@shops.io");
}

#[tokio::test]
async fn create_store_validates_owner() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Ada Admin", "ada@example.com", Role::Admin).await;
    let owner = create_user(&db, "Olive Owner", "olive@example.com", Role::StoreOwner).await;
    let rita = create_user(&db, "Rita Rater", "rita@example.com", Role::NormalUser).await;
    let cookie = login(&app, "ada@example.com").await;

    for bad_owner in [rita.id, 98765] {
        let payload = json!({
            "name": "New Shop", "email": "new@shop.io", "address": "8 New Street", "owner_id": bad_owner
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/admin/stores", Some(&cookie), &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(get_json_body(response).await["message"], "Invalid store owner ID.");
    }
    assert_eq!(store::Entity::find().count(&db).await.unwrap(), 0);

    let payload = json!({
        "name": "New Shop", "email": "new@shop.io", "address": "8 New Street", "owner_id": owner.id
    });
    let response = app
        .oneshot(json_request("POST", "/admin/stores", Some(&cookie), &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Store created");
    assert!(json["storeId"].as_i64().is_some());
    assert_eq!(store::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn create_store_rejects_unreadable_bodies_with_envelope() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Ada Admin", "ada@example.com", Role::Admin).await;
    let cookie = login(&app, "ada@example.com").await;

    for payload in [
        json!({ "name": "New Shop", "email": "new@shop.io", "address": "8 New Street" }),
        json!({ "name": "New Shop", "email": "new@shop.io", "address": "8 New Street", "owner_id": "2" }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/admin/stores", Some(&cookie), &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["data"], json!({}));
        assert!(json["message"].as_str().is_some_and(|m| m.contains("owner_id")));
    }

    let malformed = Request::builder()
        .method("POST")
        .uri("/admin/stores")
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookie.as_str())
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(malformed).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get_json_body(response).await["success"], false);
    assert_eq!(store::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn create_user_and_fetch_detail() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Ada Admin", "ada@example.com", Role::Admin).await;
    let cookie = login(&app, "ada@example.com").await;

    let payload = json!({
        "name": "Jordan Example Store Owner",
        "email": "jordan@example.com",
        "password": "Secret#123",
        "address": "12 Long Road",
        "role": "store_owner"
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/admin/users", Some(&cookie), &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let user_id = get_json_body(response).await["userId"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/admin/users", Some(&cookie), &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/admin/users/{user_id}"), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert_eq!(json["role"], "store_owner");
    assert_eq!(json["averageStoreRating"], 0.0);

    let response = app
        .oneshot(get_request("/admin/users/424242", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_users_pages_and_filters_roles() {
    let (app, db) = make_test_app().await;
    create_user(&db, "Ada Admin", "ada@example.com", Role::Admin).await;
    for i in 0..6 {
        create_user(&db, &format!("Normal {i}"), &format!("n{i}@example.com"), Role::NormalUser).await;
    }
    create_user(&db, "Olive Owner", "olive@example.com", Role::StoreOwner).await;
    let cookie = login(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(get_request("/admin/users", Some(&cookie)))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["total"], 8);
    assert_eq!(json["page"], 1);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["users"].as_array().unwrap().len(), 5);

    let response = app
        .oneshot(get_request("/admin/users?role=store_owner,admin&sortBy=email", Some(&cookie)))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    let users = json["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "ada@example.com");
    assert!(users[0].get("averageStoreRating").is_none());
    assert_eq!(users[1]["averageStoreRating"], 0.0);
}
