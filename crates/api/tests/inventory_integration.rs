//! Integration tests for global inventory administration.
//!
//! These tests require a running PostgreSQL instance. The global pool is
//! a singleton row, so run serially:
//! TEST_DATABASE_URL=... cargo test --test inventory_integration -- --test-threads=1

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn inventory_is_lazily_created_with_the_default_total() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::GET,
            "/api/v1/admin/inventory",
            &admin_token(),
            None,
        ))
        .await
        .unwrap();
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["total"], json!(2400));
    assert_eq!(body["consumed"], json!(0));
    assert_eq!(body["available"], json!(2400));
}

#[tokio::test]
async fn set_total_preserves_consumption_and_conservation() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;
    set_global_inventory(&pool, 100, 30).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/admin/inventory",
            &admin_token(),
            Some(json!({ "total": 80 })),
        ))
        .await
        .unwrap();
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["total"], json!(80));
    assert_eq!(body["consumed"], json!(30));
    assert_eq!(body["available"], json!(50));
}

#[tokio::test]
async fn set_total_below_consumption_is_refused() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;
    set_global_inventory(&pool, 100, 30).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/admin/inventory",
            &admin_token(),
            Some(json!({ "total": 20 })),
        ))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await;

    // Counters unchanged.
    assert_eq!(global_counters(&pool).await, (100, 30, 70));
}

#[tokio::test]
async fn reset_clears_pool_consumption_but_not_personal_quotas() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let identification = unique_identification();
    insert_attendee(&pool, &identification, 0, 2).await;
    set_global_inventory(&pool, 100, 40).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/admin/inventory/reset",
            &admin_token(),
            Some(json!({ "total": 200 })),
        ))
        .await
        .unwrap();
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["total"], json!(200));
    assert_eq!(body["consumed"], json!(0));
    assert_eq!(body["available"], json!(200));

    // Deliberately decoupled: personal consumption survives a pool reset.
    assert_eq!(attendee_consumed(&pool, &identification).await, 2);
}

#[tokio::test]
async fn reset_consumption_clears_people_but_not_the_pool() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let identification = unique_identification();
    insert_attendee(&pool, &identification, 0, 2).await;
    set_global_inventory(&pool, 100, 40).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/admin/attendees/reset-consumption",
            &admin_token(),
            None,
        ))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await;

    assert_eq!(attendee_consumed(&pool, &identification).await, 0);
    assert_eq!(global_counters(&pool).await, (100, 40, 60));
}

#[tokio::test]
async fn negative_total_is_rejected() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool);
    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/admin/inventory",
            &admin_token(),
            Some(json!({ "total": -5 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
