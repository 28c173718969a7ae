//! Operator JWT authentication middleware.
//!
//! Operators authenticate with tokens issued by an external identity
//! system; the backend only validates them. The claims carry the
//! operator's role and, for meal-station operators, the assigned station.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use crate::error::ApiError;
use shared::jwt::{extract_operator_id, JwtConfig, OperatorRole};

/// Authenticated operator information extracted from the JWT.
#[derive(Debug, Clone)]
pub struct OperatorAuth {
    pub operator_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: OperatorRole,
    /// Assigned serving station (set for mesa operators).
    pub station: Option<i32>,
}

impl OperatorAuth {
    /// Validates a token and returns operator authentication info.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let operator_id =
            extract_operator_id(&claims).map_err(|_| "Invalid operator ID in token".to_string())?;

        Ok(OperatorAuth {
            operator_id,
            name: claims.name,
            email: claims.email,
            role: claims.role,
            station: claims.station,
        })
    }

    /// Creates a JwtConfig from the API's auth configuration.
    pub fn create_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, String> {
        JwtConfig::with_leeway(
            &config.private_key,
            &config.public_key,
            config.token_expiry_secs,
            config.leeway_secs,
        )
        .map_err(|e| format!("Failed to initialize JWT config: {}", e))
    }
}

/// Middleware that requires any authenticated operator.
pub async fn require_operator(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return ApiError::Unauthorized("Missing or invalid Authorization header".into())
                .into_response();
        }
    };

    let jwt_config = match OperatorAuth::create_jwt_config(&state.config.jwt) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to create JWT config: {}", e);
            return ApiError::Internal("Authentication service unavailable".into())
                .into_response();
        }
    };

    match OperatorAuth::validate(&jwt_config, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            ApiError::Unauthorized("Invalid or expired token".into()).into_response()
        }
    }
}

/// Middleware that requires an operator with the admin role. Must run
/// after `require_operator`.
pub async fn require_admin(req: Request<Body>, next: Next) -> Response {
    match req.extensions().get::<OperatorAuth>() {
        Some(auth) if auth.role == OperatorRole::Admin => next.run(req).await,
        Some(_) => ApiError::Forbidden("Admin role required".into()).into_response(),
        None => ApiError::Unauthorized("Missing operator authentication".into()).into_response(),
    }
}
