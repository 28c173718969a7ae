//! Bulk import of attendee and guest rows.
//!
//! Rows arrive already parsed (spreadsheet handling happens in the admin
//! tooling). Each row is validated and applied independently; failures
//! are reported per row and never abort the batch.

use axum::{extract::State, Json};
use validator::Validate;

use domain::models::{
    AttendeeBulkImportRequest, BulkImportError, BulkImportResponse, GuestBulkImportRequest,
};
use persistence::repositories::{AttendeeRepository, GuestRepository};

use crate::app::AppState;
use crate::error::ApiError;

/// POST /api/v1/admin/attendees/import
pub async fn import_attendees(
    State(state): State<AppState>,
    Json(request): Json<AttendeeBulkImportRequest>,
) -> Result<Json<BulkImportResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let repo = AttendeeRepository::new(state.pool.clone());

    let mut processed = 0u32;
    let mut created = 0u32;
    let mut updated = 0u32;
    let mut skipped = 0u32;
    let mut errors = Vec::new();

    for (idx, row) in request.rows.iter().enumerate() {
        let row_number = idx + 1;
        processed += 1;

        if let Err(e) = row.validate() {
            errors.push(BulkImportError {
                row: row_number,
                identification: row.identification.clone(),
                error: e.to_string(),
            });
            continue;
        }

        let exists = match repo.find_by_identification(row.identification.trim()).await {
            Ok(found) => found.is_some(),
            Err(e) => {
                errors.push(BulkImportError {
                    row: row_number,
                    identification: row.identification.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let result = if exists {
            if !request.update_existing {
                skipped += 1;
                continue;
            }
            repo.update_by_identification(row).await.map(|_| ())
        } else {
            repo.insert(row).await.map(|_| ())
        };

        match result {
            Ok(()) if exists => updated += 1,
            Ok(()) => created += 1,
            Err(e) => errors.push(BulkImportError {
                row: row_number,
                identification: row.identification.clone(),
                error: e.to_string(),
            }),
        }
    }

    tracing::info!(processed, created, updated, skipped, failures = errors.len(), "attendee import finished");

    Ok(Json(BulkImportResponse {
        processed,
        created,
        updated,
        skipped,
        errors,
    }))
}

/// POST /api/v1/admin/guests/import
pub async fn import_guests(
    State(state): State<AppState>,
    Json(request): Json<GuestBulkImportRequest>,
) -> Result<Json<BulkImportResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let repo = GuestRepository::new(state.pool.clone());

    let mut processed = 0u32;
    let mut created = 0u32;
    let mut updated = 0u32;
    let mut skipped = 0u32;
    let mut errors = Vec::new();

    for (idx, row) in request.rows.iter().enumerate() {
        let row_number = idx + 1;
        processed += 1;

        if let Err(e) = row.validate() {
            errors.push(BulkImportError {
                row: row_number,
                identification: row.identification.clone(),
                error: e.to_string(),
            });
            continue;
        }

        let exists = match repo.find_by_identification(row.identification.trim()).await {
            Ok(found) => found.is_some(),
            Err(e) => {
                errors.push(BulkImportError {
                    row: row_number,
                    identification: row.identification.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let result = if exists {
            if !request.update_existing {
                skipped += 1;
                continue;
            }
            repo.update_by_identification(row).await.map(|_| ())
        } else {
            repo.insert(row).await.map(|_| ())
        };

        match result {
            Ok(()) if exists => updated += 1,
            Ok(()) => created += 1,
            Err(e) => errors.push(BulkImportError {
                row: row_number,
                identification: row.identification.clone(),
                error: e.to_string(),
            }),
        }
    }

    tracing::info!(processed, created, updated, skipped, failures = errors.len(), "guest import finished");

    Ok(Json(BulkImportResponse {
        processed,
        created,
        updated,
        skipped,
        errors,
    }))
}
