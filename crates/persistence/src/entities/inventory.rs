//! Inventory entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{MealInventory, StationInventory};
use sqlx::FromRow;

/// Database row mapping for the meal_inventory singleton.
#[derive(Debug, Clone, FromRow)]
pub struct MealInventoryEntity {
    pub total: i32,
    pub consumed: i32,
    pub available: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<MealInventoryEntity> for MealInventory {
    fn from(entity: MealInventoryEntity) -> Self {
        MealInventory {
            total: entity.total,
            consumed: entity.consumed,
            available: entity.available,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the station_inventory table.
#[derive(Debug, Clone, FromRow)]
pub struct StationInventoryEntity {
    pub station_number: i32,
    pub total: i32,
    pub consumed: i32,
    pub available: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StationInventoryEntity> for StationInventory {
    fn from(entity: StationInventoryEntity) -> Self {
        StationInventory {
            station_number: entity.station_number,
            total: entity.total,
            consumed: entity.consumed,
            available: entity.available,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
