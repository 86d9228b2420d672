//! Router tests over the in-memory store.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use bson::doc;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use electron_core::{Collection, DocumentId};

use crate::config::{SentryConfig, StorefrontConfig};
use crate::db::{DocumentStore, MemoryStore};
use crate::middleware::{MAX_REQUEST_ID_LEN, REQUEST_ID_HEADER};
use crate::state::AppState;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("mongodb://localhost:27017"),
        database_name: "Electron".to_string(),
        host: [127, 0, 0, 1].into(),
        port: 5000,
        cors_origins: vec![axum::http::HeaderValue::from_static("http://localhost:5173")],
        sentry: SentryConfig::default(),
    }
}

fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(test_config(), store.clone());
    (super::app(state), store)
}

/// Twelve products; even-numbered ones are best sellers, every third is
/// a laptop, the rest are phones.
async fn seed_products(store: &MemoryStore) {
    for i in 1..=12 {
        let best_seller = i % 2 == 0;
        let (product_type, name) = if i % 3 == 0 {
            ("laptop", format!("Notebook {i}"))
        } else {
            ("phone", format!("Smartphone {i}"))
        };
        store
            .insert_one(
                Collection::Products,
                doc! {
                    "name": name,
                    "bestSeller": best_seller,
                    "productType": product_type,
                    "brand": "Voltix",
                    "seq": i,
                },
            )
            .await
            .unwrap();
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn sequence(products: &Value) -> Vec<i64> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["seq"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_home_and_health() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Electron-server is Running"));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));

    let (status, _) = get(&app, "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_reports_outage() {
    let (app, store) = test_app();
    store.set_offline(true);

    let (status, _) = get(&app, "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    // Liveness does not depend on the store
    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_products_default_page() {
    let (app, store) = test_app();
    seed_products(&store).await;

    let (status, body) = get(&app, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sequence(&body), (1..=10).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_products_best_seller_filter() {
    let (app, store) = test_app();
    seed_products(&store).await;

    let (_, body) = get(&app, "/products?bestSeller=true").await;
    assert_eq!(sequence(&body), vec![2, 4, 6, 8, 10, 12]);

    let (_, body) = get(&app, "/products?bestSeller=false").await;
    assert_eq!(sequence(&body), vec![1, 3, 5, 7, 9, 11]);
}

#[tokio::test]
async fn test_products_name_is_case_insensitive_substring() {
    let (app, store) = test_app();
    store
        .insert_one(Collection::Products, doc! { "name": "Smartphone X", "seq": 1 })
        .await
        .unwrap();
    store
        .insert_one(Collection::Products, doc! { "name": "Laptop Pro", "seq": 2 })
        .await
        .unwrap();

    let (_, body) = get(&app, "/products?name=PHONE").await;
    assert_eq!(sequence(&body), vec![1]);
}

#[tokio::test]
async fn test_products_name_is_literal() {
    let (app, store) = test_app();
    store
        .insert_one(Collection::Products, doc! { "name": "USB-C (2m)", "seq": 1 })
        .await
        .unwrap();
    store
        .insert_one(Collection::Products, doc! { "name": "USB-C 2m", "seq": 2 })
        .await
        .unwrap();

    let (_, body) = get(&app, "/products?name=%282m%29").await;
    assert_eq!(sequence(&body), vec![1]);
}

#[tokio::test]
async fn test_products_combined_filters() {
    let (app, store) = test_app();
    seed_products(&store).await;

    let (_, body) = get(&app, "/products?productType=laptop&bestSeller=true").await;
    assert_eq!(sequence(&body), vec![6, 12]);

    let (_, body) = get(&app, "/products?brand=Nobody").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_products_pagination() {
    let (app, store) = test_app();
    seed_products(&store).await;

    let (_, body) = get(&app, "/products?page=2&size=5").await;
    assert_eq!(sequence(&body), vec![6, 7, 8, 9, 10]);

    let (_, body) = get(&app, "/products?page=3&size=5").await;
    assert_eq!(sequence(&body), vec![11, 12]);

    let (_, body) = get(&app, "/products?page=9").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_products_page_beyond_range_is_empty() {
    let (app, store) = test_app();
    seed_products(&store).await;

    let (status, body) = get(&app, "/products?page=1000000000000000000&size=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_products_invalid_pagination_falls_back() {
    let (app, store) = test_app();
    seed_products(&store).await;

    let (status, body) = get(&app, "/products?page=abc&size=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sequence(&body), (1..=10).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_products_count_ignores_filters() {
    let (app, store) = test_app();
    seed_products(&store).await;

    let (status, body) = get(&app, "/productsCount").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "count": 12 }));

    let (_, body) = get(&app, "/productsCount?bestSeller=true").await;
    assert_eq!(body, json!({ "count": 12 }));
}

#[tokio::test]
async fn test_created_product_is_listed_and_counted() {
    let (app, store) = test_app();
    seed_products(&store).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({ "name": "Widget", "brand": "Acme", "bestSeller": "true" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/products?brand=Acme").await;
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], json!("Widget"));
    // Stored as given: the string, not a boolean
    assert_eq!(products[0]["bestSeller"], json!("true"));

    // The filter compares against the boolean, so the string never matches
    let (_, body) = get(&app, "/products?bestSeller=true&size=50").await;
    let best_sellers = body.as_array().unwrap();
    assert_eq!(best_sellers.len(), 6);
    assert!(best_sellers.iter().all(|p| p["name"] != json!("Widget")));

    let (_, body) = get(&app, "/productsCount").await;
    assert_eq!(body, json!({ "count": 13 }));
}

#[tokio::test]
async fn test_create_returns_insert_ack() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({ "name": "Tablet", "price": 299 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], json!(true));
    let id = body["insertedId"].as_str().unwrap();
    assert!(DocumentId::parse(id).is_ok());

    let (_, products) = get(&app, "/products").await;
    assert_eq!(products[0]["_id"], json!(id));
    assert_eq!(products[0]["name"], json!("Tablet"));
}

#[tokio::test]
async fn test_users_by_email() {
    let (app, _) = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "email": "a@x.io", "name": "Ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/users?email=a@x.io").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Ada"));
    assert!(body["_id"].is_string());

    let (status, body) = get(&app, "/users?email=missing@x.io").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, body) = get(&app, "/users").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = get(&app, "/users?email=").await;
    assert!(body.is_array());
}

#[tokio::test]
async fn test_update_merges_fields() {
    let (app, store) = test_app();
    let ack = store
        .insert_one(
            Collection::SpecialOffers,
            doc! { "title": "Spring", "discount": 10 },
        )
        .await
        .unwrap();
    let id = ack.inserted_id.as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/specialOffers/{id}"),
        Some(json!({ "discount": 25 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "acknowledged": true,
            "matchedCount": 1,
            "modifiedCount": 1,
            "upsertedCount": 0,
            "upsertedId": null,
        })
    );

    let (_, offers) = get(&app, "/specialOffers").await;
    assert_eq!(offers[0]["title"], json!("Spring"));
    assert_eq!(offers[0]["discount"], json!(25));
}

#[tokio::test]
async fn test_update_missing_document_matches_nothing() {
    let (app, _) = test_app();
    let id = DocumentId::generate();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/products/{id}"),
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], json!(0));
    assert_eq!(body["modifiedCount"], json!(0));
}

#[tokio::test]
async fn test_delete() {
    let (app, store) = test_app();
    let ack = store
        .insert_one(Collection::Testimonials, doc! { "quote": "Great" })
        .await
        .unwrap();
    let id = ack.inserted_id.as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::DELETE, &format!("/testimonials/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "acknowledged": true, "deletedCount": 1 }));

    let (_, body) = send(&app, Method::DELETE, &format!("/testimonials/{id}"), None).await;
    assert_eq!(body, json!({ "acknowledged": true, "deletedCount": 0 }));
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let (app, _) = test_app();

    let (status, _) = send(&app, Method::DELETE, "/products/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/featuredCategories/123",
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_operations() {
    let (app, _) = test_app();
    let id = DocumentId::generate();

    // Users, blog posts, brands and testimonials cannot be updated
    for path in ["users", "blogPosts", "featuredBrands", "testimonials"] {
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/{path}/{id}"),
            Some(json!({ "x": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{path}");
    }

    // The newsletter list has no item routes at all
    let (status, _) = send(&app, Method::DELETE, &format!("/newsLetter/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PATCH, "/products", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_collections_are_served_from_their_own_store() {
    let (app, _) = test_app();

    for collection in Collection::ALL {
        let (status, body) = get(&app, collection.path()).await;
        assert_eq!(status, StatusCode::OK, "{collection}");
        assert_eq!(body, json!([]), "{collection}");
    }

    send(
        &app,
        Method::POST,
        "/newsLetter",
        Some(json!({ "email": "news@x.io" })),
    )
    .await;
    let (_, body) = get(&app, "/newsLetter").await;
    assert_eq!(body[0]["email"], json!("news@x.io"));
    let (_, body) = get(&app, "/featuredBrands").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let (app, store) = test_app();
    store.set_offline(true);

    let (status, body) = get(&app, "/products").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!("Service unavailable"));

    let (status, _) = send(&app, Method::POST, "/users", Some(json!({ "email": "a" }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_duplicate_id_is_conflict() {
    let (app, _) = test_app();
    let body = json!({ "_id": "summer-sale", "name": "Summer" });

    let (status, ack) = send(&app, Method::POST, "/featuredCategories", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["insertedId"], json!("summer-sale"));

    let (status, _) = send(&app, Method::POST, "/featuredCategories", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let (app, store) = test_app();

    let status = send_raw(&app, Method::POST, "/products", "[1,2]").await;
    assert!(status.is_client_error(), "{status}");

    let status = send_raw(&app, Method::POST, "/products", "{not json").await;
    assert!(status.is_client_error(), "{status}");

    assert_eq!(store.count(Collection::Products).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unstorable_body_is_bad_request() {
    let (app, store) = test_app();
    let ack = store
        .insert_one(Collection::Products, doc! { "name": "Widget" })
        .await
        .unwrap();
    let id = ack.inserted_id.as_str().unwrap().to_string();

    // Unsigned integers beyond i64 have no document representation
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/products/{id}"),
        Some(json!({ "big": u64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({ "big": u64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.count(Collection::Products).await.unwrap(), 1);
}

#[tokio::test]
async fn test_request_id_header() {
    let (app, _) = test_app();

    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-123");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    // Oversized ids are replaced rather than echoed
    let oversized = "x".repeat(MAX_REQUEST_ID_LEN + 1);
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, oversized.as_str())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let echoed = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert_ne!(echoed, oversized);
    assert!(echoed.len() <= MAX_REQUEST_ID_LEN);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let (app, _) = test_app();

    let request = Request::builder()
        .uri("/products")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );

    let request = Request::builder()
        .uri("/products")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
