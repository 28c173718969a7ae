//! Guest repository for database operations.

use domain::models::GuestImportRow;
use sqlx::{PgExecutor, PgPool};

use crate::entities::GuestEntity;
use crate::metrics::QueryTimer;

const GUEST_COLUMNS: &str = "id, identification, name, seat_number, consumed_slots, created_at";

/// Repository for guest database operations.
#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Creates a new GuestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a guest by identification.
    pub async fn find_by_identification(
        &self,
        identification: &str,
    ) -> Result<Option<GuestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_guest");
        let result = Self::find_by_identification_on(&self.pool, identification).await;
        timer.record();
        result
    }

    /// Find a guest by identification on an arbitrary executor.
    pub async fn find_by_identification_on<'e>(
        executor: impl PgExecutor<'e>,
        identification: &str,
    ) -> Result<Option<GuestEntity>, sqlx::Error> {
        sqlx::query_as::<_, GuestEntity>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE identification = $1"
        ))
        .bind(identification)
        .fetch_optional(executor)
        .await
    }

    /// Find a guest and lock the row for the rest of the transaction.
    pub async fn find_by_identification_locked<'e>(
        executor: impl PgExecutor<'e>,
        identification: &str,
    ) -> Result<Option<GuestEntity>, sqlx::Error> {
        sqlx::query_as::<_, GuestEntity>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE identification = $1 FOR UPDATE"
        ))
        .bind(identification)
        .fetch_optional(executor)
        .await
    }

    /// Insert a new guest from an import row.
    pub async fn insert(&self, row: &GuestImportRow) -> Result<GuestEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_guest");
        let result = sqlx::query_as::<_, GuestEntity>(&format!(
            r#"
            INSERT INTO guests (identification, name, seat_number)
            VALUES ($1, $2, $3)
            RETURNING {GUEST_COLUMNS}
            "#
        ))
        .bind(row.identification.trim())
        .bind(&row.name)
        .bind(&row.seat_number)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an existing guest's import fields.
    pub async fn update_by_identification(&self, row: &GuestImportRow) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_guest");
        let result = sqlx::query(
            "UPDATE guests SET name = $2, seat_number = $3 WHERE identification = $1",
        )
        .bind(row.identification.trim())
        .bind(&row.name)
        .bind(&row.seat_number)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Consume the guest's single voucher, guarded against double use.
    pub async fn consume_slot_on<'e>(
        executor: impl PgExecutor<'e>,
        identification: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE guests
            SET consumed_slots = consumed_slots + 1
            WHERE identification = $1 AND consumed_slots < 1
            "#,
        )
        .bind(identification)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Bulk reset of guest consumption.
    pub async fn reset_all_consumption(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("reset_guest_consumption");
        let result = sqlx::query("UPDATE guests SET consumed_slots = 0")
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Admin bulk delete of every guest record.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_all_guests");
        let result = sqlx::query("DELETE FROM guests").execute(&self.pool).await?;
        timer.record();
        Ok(result.rows_affected())
    }

}
