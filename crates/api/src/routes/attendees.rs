//! Attendee / guest lookup and admin maintenance.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use domain::models::Person;
use persistence::repositories::{AttendeeRepository, GuestRepository};
use shared::validation::validate_identification;

use crate::app::AppState;
use crate::error::ApiError;

/// Lookup response for a person. `kind` distinguishes attendees from
/// guests; quota fields are computed from the person's allotment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PersonResponse {
    pub kind: &'static str,
    pub identification: String,
    pub name: String,
    pub seat_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    pub total_slots: i32,
    pub consumed_slots: i32,
    pub remaining_slots: i32,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        let total_slots = person.total_slots();
        let consumed_slots = person.consumed_slots();
        let remaining_slots = person.remaining_slots();
        match person {
            Person::Attendee(attendee) => Self {
                kind: "attendee",
                identification: attendee.identification,
                name: attendee.name,
                seat_number: attendee.seat_number,
                program: attendee.program,
                total_slots,
                consumed_slots,
                remaining_slots,
            },
            Person::Guest(guest) => Self {
                kind: "guest",
                identification: guest.identification,
                name: guest.name,
                seat_number: guest.seat_number,
                program: None,
                total_slots,
                consumed_slots,
                remaining_slots,
            },
        }
    }
}

/// Result of an admin bulk maintenance call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BulkMaintenanceResponse {
    pub affected: u64,
}

/// GET /api/v1/attendees/:identification
///
/// Attendees are tried first; the guest table is a fallback namespace.
pub async fn find_person(
    State(state): State<AppState>,
    Path(identification): Path<String>,
) -> Result<Json<PersonResponse>, ApiError> {
    let identification = identification.trim().to_string();
    validate_identification(&identification)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let attendee_repo = AttendeeRepository::new(state.pool.clone());
    if let Some(attendee) = attendee_repo.find_by_identification(&identification).await? {
        return Ok(Json(Person::Attendee(attendee.into()).into()));
    }

    let guest_repo = GuestRepository::new(state.pool.clone());
    let guest = guest_repo
        .find_by_identification(&identification)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No attendee or guest with identification {}",
                identification
            ))
        })?;

    Ok(Json(Person::Guest(guest.into()).into()))
}

/// DELETE /api/v1/admin/attendees
pub async fn delete_all_attendees(
    State(state): State<AppState>,
) -> Result<Json<BulkMaintenanceResponse>, ApiError> {
    let affected = AttendeeRepository::new(state.pool.clone()).delete_all().await?;
    tracing::warn!(affected, "admin deleted all attendees");
    Ok(Json(BulkMaintenanceResponse { affected }))
}

/// DELETE /api/v1/admin/guests
pub async fn delete_all_guests(
    State(state): State<AppState>,
) -> Result<Json<BulkMaintenanceResponse>, ApiError> {
    let affected = GuestRepository::new(state.pool.clone()).delete_all().await?;
    tracing::warn!(affected, "admin deleted all guests");
    Ok(Json(BulkMaintenanceResponse { affected }))
}

/// POST /api/v1/admin/attendees/reset-consumption
///
/// The decoupled companion of an inventory reset: clears per-person
/// consumed_slots for attendees and guests without touching any pool.
pub async fn reset_consumption(
    State(state): State<AppState>,
) -> Result<Json<BulkMaintenanceResponse>, ApiError> {
    let attendees = AttendeeRepository::new(state.pool.clone())
        .reset_all_consumption()
        .await?;
    let guests = GuestRepository::new(state.pool.clone())
        .reset_all_consumption()
        .await?;
    tracing::info!(attendees, guests, "admin reset per-person consumption");
    Ok(Json(BulkMaintenanceResponse {
        affected: attendees + guests,
    }))
}
