//! Integration tests for banners, events, event categories and testimonies.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_request, db_lock, empty_request, parse_response_body, send, setup_super_admin, test_app,
};
use serde_json::{json, Value};

async fn admin_post(app: &axum::Router, token: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = send(app, admin_request(Method::POST, uri, token, Some(body))).await;
    let status = response.status();
    (status, parse_response_body(response).await)
}

fn images(count: usize) -> Value {
    (0..count)
        .map(|i| format!("https://cdn.example.com/events/{}.jpg", i))
        .collect::<Vec<_>>()
        .into()
}

// ============================================================================
// Banners
// ============================================================================

#[tokio::test]
async fn test_inactive_banners_hidden_from_storefront() {
    let _guard = db_lock().await;
    let Some((app, _pool)) = test_app().await else {
        return;
    };
    let (_, token) = setup_super_admin(&app, "owner@example.com").await;

    let (status, _) = admin_post(
        &app,
        &token,
        "/api/admin/banners",
        json!({ "title": "Diwali Sale", "imageUrl": "https://cdn.example.com/diwali.jpg", "sortOrder": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, draft) = admin_post(
        &app,
        &token,
        "/api/admin/banners",
        json!({ "title": "Draft", "imageUrl": "https://cdn.example.com/draft.jpg", "isActive": false }),
    )
    .await;

    let response = send(&app, empty_request(Method::GET, "/api/banners")).await;
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Diwali Sale");

    let uri = format!("/api/admin/banners/{}", draft["id"].as_str().unwrap());
    let response = send(
        &app,
        admin_request(Method::PUT, &uri, &token, Some(json!({ "isActive": true }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, empty_request(Method::GET, "/api/banners")).await;
    assert_eq!(parse_response_body(response).await.as_array().unwrap().len(), 2);

    let response = send(&app, admin_request(Method::DELETE, &uri, &token, None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_banner_requires_http_image() {
    let _guard = db_lock().await;
    let Some((app, _pool)) = test_app().await else {
        return;
    };
    let (_, token) = setup_super_admin(&app, "owner@example.com").await;

    let (status, body) = admin_post(
        &app,
        &token,
        "/api/admin/banners",
        json!({ "title": "Broken", "imageUrl": "javascript:alert(1)" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

// ============================================================================
// Events and categories
// ============================================================================

#[tokio::test]
async fn test_event_lifecycle_and_category_guard() {
    let _guard = db_lock().await;
    let Some((app, _pool)) = test_app().await else {
        return;
    };
    let (_, token) = setup_super_admin(&app, "owner@example.com").await;

    let (status, category) = admin_post(
        &app,
        &token,
        "/api/admin/event-categories",
        json!({ "name": "Wedding Decor" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(category["slug"], "wedding-decor");
    let category_id = category["id"].as_str().unwrap().to_string();

    let (status, event) = admin_post(
        &app,
        &token,
        "/api/admin/events",
        json!({
            "title": "Beach Wedding",
            "categoryId": category_id,
            "images": images(3),
            "location": "Goa"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let event_id = event["id"].as_str().unwrap().to_string();

    let response = send(
        &app,
        empty_request(Method::GET, &format!("/api/events?categoryId={}", category_id)),
    )
    .await;
    let body = parse_response_body(response).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["title"], "Beach Wedding");

    // A category with events cannot be removed.
    let category_uri = format!("/api/admin/event-categories/{}", category_id);
    let response = send(
        &app,
        admin_request(Method::DELETE, &category_uri, &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        admin_request(
            Method::DELETE,
            &format!("/api/admin/events/{}", event_id),
            &token,
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        admin_request(Method::DELETE, &category_uri, &token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_event_image_count_enforced() {
    let _guard = db_lock().await;
    let Some((app, _pool)) = test_app().await else {
        return;
    };
    let (_, token) = setup_super_admin(&app, "owner@example.com").await;
    let (_, category) = admin_post(
        &app,
        &token,
        "/api/admin/event-categories",
        json!({ "name": "Birthdays" }),
    )
    .await;

    for count in [2, 7] {
        let (status, _) = admin_post(
            &app,
            &token,
            "/api/admin/events",
            json!({
                "title": "Party",
                "categoryId": category["id"],
                "images": images(count)
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} images", count);
    }
}

#[tokio::test]
async fn test_event_with_unknown_category_rejected() {
    let _guard = db_lock().await;
    let Some((app, _pool)) = test_app().await else {
        return;
    };
    let (_, token) = setup_super_admin(&app, "owner@example.com").await;

    let (status, _) = admin_post(
        &app,
        &token,
        "/api/admin/events",
        json!({
            "title": "Orphan Event",
            "categoryId": uuid::Uuid::new_v4(),
            "images": images(4)
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unpublished_event_only_visible_to_admins() {
    let _guard = db_lock().await;
    let Some((app, _pool)) = test_app().await else {
        return;
    };
    let (_, token) = setup_super_admin(&app, "owner@example.com").await;
    let (_, category) = admin_post(
        &app,
        &token,
        "/api/admin/event-categories",
        json!({ "name": "Corporate" }),
    )
    .await;
    let (_, event) = admin_post(
        &app,
        &token,
        "/api/admin/events",
        json!({
            "title": "Annual Gala",
            "categoryId": category["id"],
            "images": images(5),
            "isPublished": false
        }),
    )
    .await;
    let event_id = event["id"].as_str().unwrap();

    let response = send(
        &app,
        empty_request(Method::GET, &format!("/api/events/{}", event_id)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        admin_request(
            Method::GET,
            &format!("/api/admin/events/{}", event_id),
            &token,
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_category_name_conflicts() {
    let _guard = db_lock().await;
    let Some((app, _pool)) = test_app().await else {
        return;
    };
    let (_, token) = setup_super_admin(&app, "owner@example.com").await;

    let body = json!({ "name": "Anniversaries" });
    let (status, _) = admin_post(&app, &token, "/api/admin/event-categories", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = admin_post(&app, &token, "/api/admin/event-categories", body).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let response = send(&app, empty_request(Method::GET, "/api/event-categories")).await;
    assert_eq!(parse_response_body(response).await.as_array().unwrap().len(), 1);
}

// ============================================================================
// Testimonies
// ============================================================================

#[tokio::test]
async fn test_testimony_visibility() {
    let _guard = db_lock().await;
    let Some((app, _pool)) = test_app().await else {
        return;
    };
    let (_, token) = setup_super_admin(&app, "owner@example.com").await;

    let (status, shown) = admin_post(
        &app,
        &token,
        "/api/admin/testimonies",
        json!({ "customerName": "Meera", "message": "Lovely hamper, arrived on time!", "rating": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    admin_post(
        &app,
        &token,
        "/api/admin/testimonies",
        json!({
            "customerName": "Ravi",
            "message": "Pending moderation review",
            "rating": 3,
            "isVisible": false
        }),
    )
    .await;

    let response = send(&app, empty_request(Method::GET, "/api/testimonies")).await;
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["customerName"], "Meera");

    let response = send(
        &app,
        admin_request(Method::GET, "/api/admin/testimonies", &token, None),
    )
    .await;
    assert_eq!(parse_response_body(response).await.as_array().unwrap().len(), 2);

    let uri = format!("/api/admin/testimonies/{}", shown["id"].as_str().unwrap());
    let response = send(
        &app,
        admin_request(Method::PUT, &uri, &token, Some(json!({ "isVisible": false }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, empty_request(Method::GET, "/api/testimonies")).await;
    assert!(parse_response_body(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_testimony_rating_range() {
    let _guard = db_lock().await;
    let Some((app, _pool)) = test_app().await else {
        return;
    };
    let (_, token) = setup_super_admin(&app, "owner@example.com").await;

    let (status, _) = admin_post(
        &app,
        &token,
        "/api/admin/testimonies",
        json!({ "customerName": "Kiran", "message": "Six stars if I could!", "rating": 6 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
