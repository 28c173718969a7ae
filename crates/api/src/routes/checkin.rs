//! Check-in route handlers: scan, deny, Q10, and the duplicate probe.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain::models::ScanSource;
use persistence::repositories::{AttendeeRepository, GuestRepository};
use shared::validation::validate_identification;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Operator;
use crate::services::Q10Error;

fn default_source() -> ScanSource {
    ScanSource::Direct
}

/// Request body for a scan or a denial.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ScanRequest {
    #[validate(custom(function = "validate_identification"))]
    pub identification: String,

    #[serde(default = "default_source")]
    pub source: ScanSource,
}

/// Request body for a denial with an operator-supplied reason.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct DenyRequest {
    #[validate(custom(function = "validate_identification"))]
    pub identification: String,

    #[validate(length(max = 500, message = "reason must be at most 500 characters"))]
    pub reason: Option<String>,

    #[serde(default = "default_source")]
    pub source: ScanSource,
}

/// Request body for a Q10 certificate check-in.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct Q10Request {
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
}

/// Outcome of a scan, deny, or Q10 check-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScanResponse {
    pub granted: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i32>,
}

/// Response for the duplicate probe.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScannedResponse {
    pub identification: String,
    pub already_scanned: bool,
}

/// Response for a denial.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DenyResponse {
    /// False when the denial was suppressed because a granted entry
    /// already exists.
    pub recorded: bool,
}

/// POST /api/v1/checkin/scan
pub async fn scan(
    State(state): State<AppState>,
    operator: Operator,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let identification = request.identification.trim();
    let outcome = state
        .check_in
        .scan(
            identification,
            request.source,
            &operator.actor_info(),
            operator.access_mode(),
        )
        .await?;

    Ok(Json(ScanResponse {
        granted: outcome.granted,
        message: outcome.message,
        remaining: outcome.remaining,
    }))
}

/// POST /api/v1/checkin/deny
pub async fn deny(
    State(state): State<AppState>,
    operator: Operator,
    Json(request): Json<DenyRequest>,
) -> Result<Json<DenyResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let details = request.reason.as_deref().unwrap_or("Access denied");
    let recorded = state
        .check_in
        .deny(
            request.identification.trim(),
            details,
            request.source,
            &operator.actor_info(),
        )
        .await?;

    Ok(Json(DenyResponse { recorded }))
}

/// POST /api/v1/checkin/q10
///
/// Extracts the identification from a certificate-portal URL, then runs
/// the same scan flow as a direct badge read: person lookup, the
/// operator's access mode, and the usual log entries. The certificate
/// verification itself is recorded alongside as `q10_success` /
/// `q10_failed`.
pub async fn q10_checkin(
    State(state): State<AppState>,
    operator: Operator,
    Json(request): Json<Q10Request>,
) -> Result<Json<ScanResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let client = state.q10.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Q10 check-in is not enabled".to_string())
    })?;
    let actor = operator.actor_info();

    let identification = match client.extract_identification(&request.url).await {
        Ok(identification) => identification,
        Err(err @ Q10Error::UrlNotAllowed) => {
            return Err(ApiError::Validation(err.to_string()));
        }
        Err(err) => {
            state
                .check_in
                .record_q10("unknown", false, &err.to_string(), &actor)
                .await?;
            return Ok(Json(ScanResponse {
                granted: false,
                message: err.to_string(),
                remaining: None,
            }));
        }
    };

    let known = AttendeeRepository::new(state.pool.clone())
        .find_by_identification(&identification)
        .await?
        .is_some()
        || GuestRepository::new(state.pool.clone())
            .find_by_identification(&identification)
            .await?
            .is_some();
    if !known {
        let details = "Identification not found in attendee or guest records";
        state
            .check_in
            .record_q10(&identification, false, details, &actor)
            .await?;
        return Ok(Json(ScanResponse {
            granted: false,
            message: details.to_string(),
            remaining: None,
        }));
    }

    let outcome = state
        .check_in
        .scan(&identification, ScanSource::Q10, &actor, operator.access_mode())
        .await?;

    if outcome.granted {
        state
            .check_in
            .record_q10(
                &identification,
                true,
                "Checked in via Q10 certificate",
                &actor,
            )
            .await?;
    }

    Ok(Json(ScanResponse {
        granted: outcome.granted,
        message: outcome.message,
        remaining: outcome.remaining,
    }))
}

/// GET /api/v1/checkin/:identification/scanned
pub async fn scanned(
    State(state): State<AppState>,
    Path(identification): Path<String>,
) -> Result<Json<ScannedResponse>, ApiError> {
    let identification = identification.trim().to_string();
    validate_identification(&identification)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let already_scanned = state.check_in.already_scanned(&identification).await?;
    Ok(Json(ScannedResponse {
        identification,
        already_scanned,
    }))
}
