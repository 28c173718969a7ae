//! Integration tests for station inventory administration.
//!
//! These tests require a running PostgreSQL instance:
//! TEST_DATABASE_URL=... cargo test --test stations_integration -- --test-threads=1

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn create_and_fetch_a_station() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let created = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/admin/stations",
            &admin_token(),
            Some(json!({ "station_number": 7, "total": 120 })),
        ))
        .await
        .unwrap();
    let body = assert_status(created, StatusCode::CREATED).await;
    assert_eq!(body["station_number"], json!(7));
    assert_eq!(body["available"], json!(120));
    assert_eq!(body["active"], json!(true));

    let fetched = app
        .oneshot(json_request(
            Method::GET,
            "/api/v1/admin/stations/7",
            &admin_token(),
            None,
        ))
        .await
        .unwrap();
    let body = assert_status(fetched, StatusCode::OK).await;
    assert_eq!(body["total"], json!(120));
}

#[tokio::test]
async fn duplicate_station_number_conflicts() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;
    insert_station(&pool, 8, 50, true).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/admin/stations",
            &admin_token(),
            Some(json!({ "station_number": 8, "total": 10 })),
        ))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await;
}

#[tokio::test]
async fn add_meals_raises_total_and_available_together() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;
    insert_station(&pool, 9, 50, true).await;
    sqlx::query(
        "UPDATE station_inventory SET consumed = 20, available = 30 WHERE station_number = 9",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/admin/stations/9/add-meals",
            &admin_token(),
            Some(json!({ "amount": 25 })),
        ))
        .await
        .unwrap();
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["total"], json!(75));
    assert_eq!(body["consumed"], json!(20));
    assert_eq!(body["available"], json!(55));
}

#[tokio::test]
async fn station_set_total_below_consumption_is_refused() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;
    insert_station(&pool, 10, 50, true).await;
    sqlx::query(
        "UPDATE station_inventory SET consumed = 20, available = 30 WHERE station_number = 10",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/admin/stations/10",
            &admin_token(),
            Some(json!({ "total": 10 })),
        ))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await;
    assert_eq!(station_counters(&pool, 10).await, (50, 20, 30));
}

#[tokio::test]
async fn toggling_active_gates_redemption() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let identification = unique_identification();
    insert_attendee(&pool, &identification, 0, 0).await;
    insert_station(&pool, 11, 50, true).await;
    set_global_inventory(&pool, 100, 0).await;

    let app = create_test_app(test_config(), pool.clone());
    let toggled = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/admin/stations/11/active",
            &admin_token(),
            Some(json!({ "active": false })),
        ))
        .await
        .unwrap();
    let body = assert_status(toggled, StatusCode::OK).await;
    assert_eq!(body["active"], json!(false));

    let scan = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/checkin/scan",
            &mesa_token(11),
            Some(json!({ "identification": identification })),
        ))
        .await
        .unwrap();
    let body = assert_status(scan, StatusCode::OK).await;
    assert_eq!(body["granted"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("not active"));
}

#[tokio::test]
async fn station_reset_clears_counters_only_for_that_station() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;
    insert_station(&pool, 12, 50, true).await;
    insert_station(&pool, 13, 40, true).await;
    sqlx::query(
        "UPDATE station_inventory SET consumed = 15, available = total - 15",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/admin/stations/12/reset",
            &admin_token(),
            Some(json!({ "total": 60 })),
        ))
        .await
        .unwrap();
    let body = assert_status(response, StatusCode::OK).await;
    assert_eq!(body["consumed"], json!(0));
    assert_eq!(body["available"], json!(60));

    assert_eq!(station_counters(&pool, 13).await, (40, 15, 25));
}

#[tokio::test]
async fn deleted_station_stops_restricting_scans() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let identification = unique_identification();
    insert_attendee(&pool, &identification, 0, 0).await;
    // An exhausted station would refuse every scan.
    insert_station(&pool, 14, 0, true).await;
    set_global_inventory(&pool, 100, 0).await;

    let app = create_test_app(test_config(), pool.clone());
    let deleted = app
        .clone()
        .oneshot(json_request(
            Method::DELETE,
            "/api/v1/admin/stations/14",
            &admin_token(),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // With the record gone the station imposes no restriction.
    let scan = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/checkin/scan",
            &mesa_token(14),
            Some(json!({ "identification": identification })),
        ))
        .await
        .unwrap();
    let body = assert_status(scan, StatusCode::OK).await;
    assert_eq!(body["granted"], json!(true));

    let missing = app
        .oneshot(json_request(
            Method::GET,
            "/api/v1/admin/stations/14",
            &admin_token(),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn station_number_out_of_range_is_rejected() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool);
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/admin/stations",
            &admin_token(),
            Some(json!({ "station_number": 0, "total": 10 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
