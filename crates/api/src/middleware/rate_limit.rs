//! Rate limiting middleware.
//!
//! Scan endpoints are rate limited per operator, so a stuck barcode
//! reader firing in a loop cannot drain the pools or flood the log.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::OperatorAuth;

/// Type alias for the rate limiter used per operator.
type OperatorRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across all requests, keyed by operator ID.
pub struct RateLimiterState {
    limiters: RwLock<HashMap<Uuid, Arc<OperatorRateLimiter>>>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter state with the specified limit per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            rate_limit_per_minute,
        }
    }

    /// Get or create a rate limiter for the given operator.
    fn get_or_create_limiter(&self, operator_id: Uuid) -> Arc<OperatorRateLimiter> {
        {
            let limiters = self.limiters.read().unwrap();
            if let Some(limiter) = limiters.get(&operator_id) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap();

        // Double-check in case another request created it
        if let Some(limiter) = limiters.get(&operator_id) {
            return limiter.clone();
        }

        let quota = Quota::per_minute(
            NonZeroU32::new(self.rate_limit_per_minute).unwrap_or(NonZeroU32::new(120).unwrap()),
        );
        let limiter = Arc::new(GovRateLimiter::direct(quota));
        limiters.insert(operator_id, limiter.clone());
        limiter
    }

    /// Check whether a request from the given operator is allowed.
    /// Returns Err with retry-after seconds when rate limited.
    pub fn check(&self, operator_id: Uuid) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(operator_id);

        match limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                Err(wait_time.as_secs().max(1))
            }
        }
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_limiters", &self.limiters.read().unwrap().len())
            .finish()
    }
}

/// Middleware enforcing the per-operator scan rate limit. Must run after
/// `require_operator` so the operator identity is available.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(rate_limiter) = state.rate_limiter.as_ref() else {
        return next.run(req).await;
    };

    let Some(auth) = req.extensions().get::<OperatorAuth>() else {
        // Auth middleware did not run; fail closed.
        return ApiError::Unauthorized("Missing operator authentication".into()).into_response();
    };

    match rate_limiter.check(auth.operator_id) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            let mut response = ApiError::RateLimited.into_response();
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}
