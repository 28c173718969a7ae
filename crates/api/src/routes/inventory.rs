//! Global meal inventory administration.

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use domain::models::MealInventory;
use persistence::repositories::GlobalInventoryRepository;
use shared::validation::validate_meal_count;

use crate::app::AppState;
use crate::error::ApiError;

/// Request body for resizing or resetting the global pool.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SetTotalRequest {
    #[validate(custom(function = "validate_meal_count"))]
    pub total: i32,
}

/// GET /api/v1/admin/inventory
pub async fn read_inventory(
    State(state): State<AppState>,
) -> Result<Json<MealInventory>, ApiError> {
    let entity = GlobalInventoryRepository::new(state.pool.clone()).read().await?;
    Ok(Json(entity.into()))
}

/// PUT /api/v1/admin/inventory
///
/// Resizes the pool while preserving consumption. Refused when the new
/// total is below what has already been consumed.
pub async fn set_inventory_total(
    State(state): State<AppState>,
    Json(request): Json<SetTotalRequest>,
) -> Result<Json<MealInventory>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let repo = GlobalInventoryRepository::new(state.pool.clone());
    if !repo.set_total(request.total).await? {
        return Err(ApiError::Conflict(
            "New total is below the number of meals already consumed".to_string(),
        ));
    }
    let entity = repo.read().await?;
    tracing::info!(total = request.total, "global inventory resized");
    Ok(Json(entity.into()))
}

/// POST /api/v1/admin/inventory/reset
///
/// Forgets all pool consumption. Per-person consumed_slots are left
/// untouched; resetting those is a separate attendee operation.
pub async fn reset_inventory(
    State(state): State<AppState>,
    Json(request): Json<SetTotalRequest>,
) -> Result<Json<MealInventory>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let entity = GlobalInventoryRepository::new(state.pool.clone())
        .reset(request.total)
        .await?;
    tracing::warn!(total = request.total, "global inventory reset");
    Ok(Json(entity.into()))
}
