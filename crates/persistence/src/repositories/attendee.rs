//! Attendee repository for database operations.

use domain::models::AttendeeImportRow;
use sqlx::{PgExecutor, PgPool};

use crate::entities::AttendeeEntity;
use crate::metrics::QueryTimer;

const ATTENDEE_COLUMNS: &str =
    "id, identification, name, seat_number, program, extra_slots, consumed_slots, created_at";

/// Repository for attendee database operations.
#[derive(Clone)]
pub struct AttendeeRepository {
    pool: PgPool,
}

impl AttendeeRepository {
    /// Creates a new AttendeeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an attendee by identification.
    pub async fn find_by_identification(
        &self,
        identification: &str,
    ) -> Result<Option<AttendeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_attendee");
        let result = Self::find_by_identification_on(&self.pool, identification).await;
        timer.record();
        result
    }

    /// Find an attendee by identification on an arbitrary executor.
    ///
    /// The redemption transaction uses this with `FOR UPDATE` semantics
    /// provided by `find_by_identification_locked`.
    pub async fn find_by_identification_on<'e>(
        executor: impl PgExecutor<'e>,
        identification: &str,
    ) -> Result<Option<AttendeeEntity>, sqlx::Error> {
        sqlx::query_as::<_, AttendeeEntity>(&format!(
            "SELECT {ATTENDEE_COLUMNS} FROM attendees WHERE identification = $1"
        ))
        .bind(identification)
        .fetch_optional(executor)
        .await
    }

    /// Find an attendee and lock the row for the rest of the transaction.
    pub async fn find_by_identification_locked<'e>(
        executor: impl PgExecutor<'e>,
        identification: &str,
    ) -> Result<Option<AttendeeEntity>, sqlx::Error> {
        sqlx::query_as::<_, AttendeeEntity>(&format!(
            "SELECT {ATTENDEE_COLUMNS} FROM attendees WHERE identification = $1 FOR UPDATE"
        ))
        .bind(identification)
        .fetch_optional(executor)
        .await
    }

    /// Insert a new attendee from an import row.
    pub async fn insert(&self, row: &AttendeeImportRow) -> Result<AttendeeEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_attendee");
        let result = sqlx::query_as::<_, AttendeeEntity>(&format!(
            r#"
            INSERT INTO attendees (identification, name, seat_number, program, extra_slots)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ATTENDEE_COLUMNS}
            "#
        ))
        .bind(row.identification.trim())
        .bind(&row.name)
        .bind(&row.seat_number)
        .bind(&row.program)
        .bind(row.extra_slots)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an existing attendee's import fields. Consumption is never
    /// touched by re-imports.
    pub async fn update_by_identification(
        &self,
        row: &AttendeeImportRow,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_attendee");
        let result = sqlx::query(
            r#"
            UPDATE attendees
            SET name = $2, seat_number = $3, program = $4, extra_slots = $5
            WHERE identification = $1
            "#,
        )
        .bind(row.identification.trim())
        .bind(&row.name)
        .bind(&row.seat_number)
        .bind(&row.program)
        .bind(row.extra_slots)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Consume one voucher slot, guarded by the personal quota bound.
    ///
    /// Returns false (no mutation) when the attendee is at their
    /// allotment; the guard makes concurrent scans of the same
    /// identification serialize on the row instead of double-counting.
    pub async fn consume_slot_on<'e>(
        executor: impl PgExecutor<'e>,
        identification: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE attendees
            SET consumed_slots = consumed_slots + 1
            WHERE identification = $1 AND consumed_slots < 2 + extra_slots
            "#,
        )
        .bind(identification)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Bulk reset of per-attendee consumption. The decoupled companion of
    /// an inventory reset.
    pub async fn reset_all_consumption(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("reset_attendee_consumption");
        let result = sqlx::query("UPDATE attendees SET consumed_slots = 0")
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Admin bulk delete of every attendee record.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_all_attendees");
        let result = sqlx::query("DELETE FROM attendees").execute(&self.pool).await?;
        timer.record();
        Ok(result.rows_affected())
    }

}
