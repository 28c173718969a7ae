//! Access log listing.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use domain::models::{AccessLogEntry, AccessStatus};
use persistence::entities::AccessStatusDb;
use persistence::repositories::{AccessLogFilter, AccessLogRepository};
use shared::pagination::LogCursor;

use crate::app::AppState;
use crate::error::ApiError;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

/// Query parameters for the log listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AccessLogQuery {
    pub status: Option<AccessStatus>,
    pub identification: Option<String>,
    /// Opaque cursor from a previous page's `next_cursor`.
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// One page of log entries, newest first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AccessLogPage {
    pub entries: Vec<AccessLogEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// GET /api/v1/access-log
pub async fn list_access_log(
    State(state): State<AppState>,
    Query(query): Query<AccessLogQuery>,
) -> Result<Json<AccessLogPage>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let cursor = match query.cursor.as_deref() {
        Some(raw) => Some(
            LogCursor::decode(raw)
                .map_err(|_| ApiError::Validation("Invalid cursor".to_string()))?,
        ),
        None => None,
    };

    let repo = AccessLogRepository::new(state.pool.clone());
    let entities = repo
        .list(&AccessLogFilter {
            status: query.status.map(AccessStatusDb::from),
            identification: query.identification,
            cursor,
            // Fetch one extra row to learn whether another page exists.
            limit: limit + 1,
        })
        .await?;

    let has_more = entities.len() as i64 > limit;
    let entries: Vec<AccessLogEntry> = entities
        .into_iter()
        .take(limit as usize)
        .map(Into::into)
        .collect();

    let next_cursor = if has_more {
        entries.last().map(|entry| {
            LogCursor {
                created_at: entry.created_at,
                id: entry.id,
            }
            .encode()
        })
    } else {
        None
    };

    Ok(Json(AccessLogPage {
        entries,
        next_cursor,
    }))
}

/// Result of the admin log wipe.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WipeResponse {
    pub deleted: u64,
}

/// DELETE /api/v1/admin/access-log
///
/// The only way log entries ever disappear. Clears duplicate-scan state
/// with them, so this is for between-event cleanup, not mid-event use.
pub async fn wipe_access_log(
    State(state): State<AppState>,
) -> Result<Json<WipeResponse>, ApiError> {
    let deleted = AccessLogRepository::new(state.pool.clone()).delete_all().await?;
    tracing::warn!(deleted, "admin wiped the access log");
    Ok(Json(WipeResponse { deleted }))
}
