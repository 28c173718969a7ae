//! Station ("mesa") inventory administration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use domain::models::StationInventory;
use persistence::repositories::StationInventoryRepository;
use shared::validation::{validate_meal_count, validate_station_number};

use crate::app::AppState;
use crate::error::ApiError;

/// Request body for creating a station pool.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateStationRequest {
    #[validate(custom(function = "validate_station_number"))]
    pub station_number: i32,

    #[validate(custom(function = "validate_meal_count"))]
    pub total: i32,
}

/// Request body for resizing or resetting a station pool.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct StationTotalRequest {
    #[validate(custom(function = "validate_meal_count"))]
    pub total: i32,
}

/// Request body for topping up a station.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AddMealsRequest {
    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount: i32,
}

/// Request body for switching a station on or off.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SetActiveRequest {
    pub active: bool,
}

/// GET /api/v1/admin/stations
pub async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationInventory>>, ApiError> {
    let entities = StationInventoryRepository::new(state.pool.clone()).list().await?;
    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/admin/stations
pub async fn create_station(
    State(state): State<AppState>,
    Json(request): Json<CreateStationRequest>,
) -> Result<(StatusCode, Json<StationInventory>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let entity = StationInventoryRepository::new(state.pool.clone())
        .create(request.station_number, request.total)
        .await?;
    tracing::info!(
        station = request.station_number,
        total = request.total,
        "station created"
    );
    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// GET /api/v1/admin/stations/:station_number
pub async fn get_station(
    State(state): State<AppState>,
    Path(station_number): Path<i32>,
) -> Result<Json<StationInventory>, ApiError> {
    let entity = StationInventoryRepository::new(state.pool.clone())
        .find(station_number)
        .await?
        .ok_or_else(|| station_not_found(station_number))?;
    Ok(Json(entity.into()))
}

/// PUT /api/v1/admin/stations/:station_number
pub async fn set_station_total(
    State(state): State<AppState>,
    Path(station_number): Path<i32>,
    Json(request): Json<StationTotalRequest>,
) -> Result<Json<StationInventory>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let repo = StationInventoryRepository::new(state.pool.clone());
    if !repo.set_total(station_number, request.total).await? {
        // Either the station does not exist or the new total is below
        // consumption; tell them apart for the response.
        return match repo.find(station_number).await? {
            None => Err(station_not_found(station_number)),
            Some(_) => Err(ApiError::Conflict(
                "New total is below the number of meals already consumed".to_string(),
            )),
        };
    }
    let entity = repo
        .find(station_number)
        .await?
        .ok_or_else(|| station_not_found(station_number))?;
    Ok(Json(entity.into()))
}

/// POST /api/v1/admin/stations/:station_number/add-meals
pub async fn add_meals(
    State(state): State<AppState>,
    Path(station_number): Path<i32>,
    Json(request): Json<AddMealsRequest>,
) -> Result<Json<StationInventory>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let entity = StationInventoryRepository::new(state.pool.clone())
        .add_meals(station_number, request.amount)
        .await?
        .ok_or_else(|| station_not_found(station_number))?;
    tracing::info!(station = station_number, amount = request.amount, "station topped up");
    Ok(Json(entity.into()))
}

/// POST /api/v1/admin/stations/:station_number/active
pub async fn set_station_active(
    State(state): State<AppState>,
    Path(station_number): Path<i32>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<StationInventory>, ApiError> {
    let repo = StationInventoryRepository::new(state.pool.clone());
    if !repo.set_active(station_number, request.active).await? {
        return Err(station_not_found(station_number));
    }
    let entity = repo
        .find(station_number)
        .await?
        .ok_or_else(|| station_not_found(station_number))?;
    tracing::info!(station = station_number, active = request.active, "station gate toggled");
    Ok(Json(entity.into()))
}

/// POST /api/v1/admin/stations/:station_number/reset
pub async fn reset_station(
    State(state): State<AppState>,
    Path(station_number): Path<i32>,
    Json(request): Json<StationTotalRequest>,
) -> Result<Json<StationInventory>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let repo = StationInventoryRepository::new(state.pool.clone());
    if !repo.reset(station_number, request.total).await? {
        return Err(station_not_found(station_number));
    }
    let entity = repo
        .find(station_number)
        .await?
        .ok_or_else(|| station_not_found(station_number))?;
    tracing::warn!(station = station_number, total = request.total, "station reset");
    Ok(Json(entity.into()))
}

/// DELETE /api/v1/admin/stations/:station_number
pub async fn delete_station(
    State(state): State<AppState>,
    Path(station_number): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let deleted = StationInventoryRepository::new(state.pool.clone())
        .delete(station_number)
        .await?;
    if deleted == 0 {
        return Err(station_not_found(station_number));
    }
    tracing::warn!(station = station_number, "station deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn station_not_found(station_number: i32) -> ApiError {
    ApiError::NotFound(format!("No inventory record for station {}", station_number))
}
