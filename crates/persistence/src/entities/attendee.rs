//! Attendee entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Attendee;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the attendees table.
#[derive(Debug, Clone, FromRow)]
pub struct AttendeeEntity {
    pub id: Uuid,
    pub identification: String,
    pub name: String,
    pub seat_number: Option<String>,
    pub program: Option<String>,
    pub extra_slots: i32,
    pub consumed_slots: i32,
    pub created_at: DateTime<Utc>,
}

impl From<AttendeeEntity> for Attendee {
    fn from(entity: AttendeeEntity) -> Self {
        Attendee {
            id: entity.id,
            identification: entity.identification,
            name: entity.name,
            seat_number: entity.seat_number,
            program: entity.program,
            extra_slots: entity.extra_slots,
            consumed_slots: entity.consumed_slots,
            created_at: entity.created_at,
        }
    }
}
