use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin, require_operator,
    trace_id, RateLimiterState,
};
use crate::routes::{access_log, attendees, bulk_import, checkin, health, inventory, stations};
use crate::services::{CheckInService, Q10Client};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub check_in: CheckInService,
    pub q10: Option<Q10Client>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Rate limiting is disabled when the per-minute limit is 0.
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let q10 = if config.q10.enabled {
        match Q10Client::new(&config.q10) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!("Failed to build Q10 client, Q10 check-in disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        rate_limiter,
        check_in: CheckInService::new(pool),
        q10,
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Scanning surface: rate limited per operator. Auth runs first
    // (outermost layer), then rate limiting, which keys on the operator
    // identity the auth middleware attached.
    let scan_routes = Router::new()
        .route("/api/v1/checkin/scan", post(checkin::scan))
        .route("/api/v1/checkin/deny", post(checkin::deny))
        .route("/api/v1/checkin/q10", post(checkin::q10_checkin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_operator,
        ));

    // Read-side operator routes: authenticated, not rate limited.
    let operator_routes = Router::new()
        .route(
            "/api/v1/checkin/:identification/scanned",
            get(checkin::scanned),
        )
        .route("/api/v1/access-log", get(access_log::list_access_log))
        .route(
            "/api/v1/attendees/:identification",
            get(attendees::find_person),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_operator,
        ));

    // Admin routes: operator auth plus the admin role.
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/attendees/import",
            post(bulk_import::import_attendees),
        )
        .route(
            "/api/v1/admin/guests/import",
            post(bulk_import::import_guests),
        )
        .route(
            "/api/v1/admin/attendees",
            delete(attendees::delete_all_attendees),
        )
        .route("/api/v1/admin/guests", delete(attendees::delete_all_guests))
        .route(
            "/api/v1/admin/attendees/reset-consumption",
            post(attendees::reset_consumption),
        )
        .route(
            "/api/v1/admin/access-log",
            delete(access_log::wipe_access_log),
        )
        .route(
            "/api/v1/admin/inventory",
            get(inventory::read_inventory).put(inventory::set_inventory_total),
        )
        .route(
            "/api/v1/admin/inventory/reset",
            post(inventory::reset_inventory),
        )
        .route(
            "/api/v1/admin/stations",
            get(stations::list_stations).post(stations::create_station),
        )
        .route(
            "/api/v1/admin/stations/:station_number",
            get(stations::get_station)
                .put(stations::set_station_total)
                .delete(stations::delete_station),
        )
        .route(
            "/api/v1/admin/stations/:station_number/add-meals",
            post(stations::add_meals),
        )
        .route(
            "/api/v1/admin/stations/:station_number/active",
            post(stations::set_station_active),
        )
        .route(
            "/api/v1/admin/stations/:station_number/reset",
            post(stations::reset_station),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_operator,
        ));

    // Public routes: health probes and the metrics exporter.
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(scan_routes)
        .merge(operator_routes)
        .merge(admin_routes)
        .merge(public_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(trace_id))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state)
}
