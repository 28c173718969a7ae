//! Guest entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Guest;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the guests table.
#[derive(Debug, Clone, FromRow)]
pub struct GuestEntity {
    pub id: Uuid,
    pub identification: String,
    pub name: String,
    pub seat_number: Option<String>,
    pub consumed_slots: i32,
    pub created_at: DateTime<Utc>,
}

impl From<GuestEntity> for Guest {
    fn from(entity: GuestEntity) -> Self {
        Guest {
            id: entity.id,
            identification: entity.identification,
            name: entity.name,
            seat_number: entity.seat_number,
            consumed_slots: entity.consumed_slots,
            created_at: entity.created_at,
        }
    }
}
