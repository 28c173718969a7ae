//! Operator authentication extractor.
//!
//! Provides an Axum extractor for validating operator JWTs and for
//! deriving the check-in mode (pure access control vs meal service) from
//! the operator's claims.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::OperatorAuth;
use domain::models::{AccessMode, ActorInfo};
use shared::jwt::OperatorRole;

/// Authenticated operator, available to route handlers.
///
/// Validates the Bearer token in the Authorization header unless the
/// auth middleware already did.
#[derive(Debug, Clone)]
pub struct Operator {
    pub operator_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: OperatorRole,
    pub station: Option<i32>,
}

impl Operator {
    /// Actor identity for access log entries.
    pub fn actor_info(&self) -> ActorInfo {
        ActorInfo {
            actor_id: self.operator_id,
            actor_name: self.name.clone(),
            actor_email: self.email.clone(),
            actor_role: self.role,
        }
    }

    /// The check-in mode this operator's grants run in.
    ///
    /// Only a mesa operator with an assigned station triggers voucher
    /// consumption; every other combination is pure access control. The
    /// mode is derived once here and passed explicitly from then on.
    pub fn access_mode(&self) -> AccessMode {
        match (self.role, self.station) {
            (OperatorRole::Mesa, Some(station)) => AccessMode::MealService(station),
            _ => AccessMode::AccessOnly,
        }
    }
}

impl From<OperatorAuth> for Operator {
    fn from(auth: OperatorAuth) -> Self {
        Self {
            operator_id: auth.operator_id,
            name: auth.name,
            email: auth.email,
            role: auth.role,
            station: auth.station,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Operator {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The auth middleware usually ran already and left the validated
        // claims in the extensions.
        if let Some(auth) = parts.extensions.get::<OperatorAuth>() {
            return Ok(auth.clone().into());
        }

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized(
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let jwt_config =
            OperatorAuth::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

        let auth = OperatorAuth::validate(&jwt_config, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(auth.into())
    }
}
