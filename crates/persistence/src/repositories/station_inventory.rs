//! Station ("mesa") inventory repository.
//!
//! One row per serving station. The consume path is the same guarded
//! decrement as the global pool, with the `active` gate folded into the
//! predicate.

use sqlx::{PgExecutor, PgPool};

use crate::entities::StationInventoryEntity;
use crate::metrics::QueryTimer;

const STATION_COLUMNS: &str =
    "station_number, total, consumed, available, active, created_at, updated_at";

/// Repository for station inventory database operations.
#[derive(Clone)]
pub struct StationInventoryRepository {
    pool: PgPool,
}

impl StationInventoryRepository {
    /// Creates a new StationInventoryRepository with the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a station pool, active by default.
    pub async fn create(
        &self,
        station_number: i32,
        total: i32,
    ) -> Result<StationInventoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_station");
        let result = sqlx::query_as::<_, StationInventoryEntity>(&format!(
            r#"
            INSERT INTO station_inventory (station_number, total, consumed, available, active)
            VALUES ($1, $2, 0, $2, true)
            RETURNING {STATION_COLUMNS}
            "#
        ))
        .bind(station_number)
        .bind(total)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a station's inventory record.
    pub async fn find(
        &self,
        station_number: i32,
    ) -> Result<Option<StationInventoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_station");
        let result = Self::find_on(&self.pool, station_number).await;
        timer.record();
        result
    }

    /// Find a station's inventory record on an arbitrary executor.
    pub async fn find_on<'e>(
        executor: impl PgExecutor<'e>,
        station_number: i32,
    ) -> Result<Option<StationInventoryEntity>, sqlx::Error> {
        sqlx::query_as::<_, StationInventoryEntity>(&format!(
            "SELECT {STATION_COLUMNS} FROM station_inventory WHERE station_number = $1"
        ))
        .bind(station_number)
        .fetch_optional(executor)
        .await
    }

    /// Find a station and lock the row for the rest of the transaction.
    pub async fn find_locked_on<'e>(
        executor: impl PgExecutor<'e>,
        station_number: i32,
    ) -> Result<Option<StationInventoryEntity>, sqlx::Error> {
        sqlx::query_as::<_, StationInventoryEntity>(&format!(
            "SELECT {STATION_COLUMNS} FROM station_inventory WHERE station_number = $1 FOR UPDATE"
        ))
        .bind(station_number)
        .fetch_optional(executor)
        .await
    }

    /// List every station, ordered by number.
    pub async fn list(&self) -> Result<Vec<StationInventoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_stations");
        let result = sqlx::query_as::<_, StationInventoryEntity>(&format!(
            "SELECT {STATION_COLUMNS} FROM station_inventory ORDER BY station_number"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Atomically consume one meal from this station's pool.
    ///
    /// Returns false without mutation when the station is inactive or
    /// exhausted (or does not exist).
    pub async fn consume_one_on<'e>(
        executor: impl PgExecutor<'e>,
        station_number: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE station_inventory
            SET consumed = consumed + 1, available = available - 1, updated_at = now()
            WHERE station_number = $1 AND active AND available > 0
            "#,
        )
        .bind(station_number)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Resize a station's pool with the shrink guard.
    pub async fn set_total(&self, station_number: i32, new_total: i32) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("set_station_total");
        let result = sqlx::query(
            r#"
            UPDATE station_inventory
            SET total = $2, available = $2 - consumed, updated_at = now()
            WHERE station_number = $1 AND consumed <= $2
            "#,
        )
        .bind(station_number)
        .bind(new_total)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() == 1)
    }

    /// Add meals to a station without touching consumption.
    pub async fn add_meals(
        &self,
        station_number: i32,
        amount: i32,
    ) -> Result<Option<StationInventoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("add_station_meals");
        let result = sqlx::query_as::<_, StationInventoryEntity>(&format!(
            r#"
            UPDATE station_inventory
            SET total = total + $2, available = available + $2, updated_at = now()
            WHERE station_number = $1
            RETURNING {STATION_COLUMNS}
            "#
        ))
        .bind(station_number)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Toggle the station gate without affecting counts.
    pub async fn set_active(&self, station_number: i32, active: bool) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("set_station_active");
        let result = sqlx::query(
            r#"
            UPDATE station_inventory
            SET active = $2, updated_at = now()
            WHERE station_number = $1
            "#,
        )
        .bind(station_number)
        .bind(active)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() == 1)
    }

    /// Reset a station's counters.
    pub async fn reset(&self, station_number: i32, new_total: i32) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("reset_station");
        let result = sqlx::query(
            r#"
            UPDATE station_inventory
            SET total = $2, consumed = 0, available = $2, updated_at = now()
            WHERE station_number = $1
            "#,
        )
        .bind(station_number)
        .bind(new_total)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() == 1)
    }

    /// Remove a station's record entirely (hard delete, not a
    /// soft-disable).
    pub async fn delete(&self, station_number: i32) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_station");
        let result = sqlx::query("DELETE FROM station_inventory WHERE station_number = $1")
            .bind(station_number)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
