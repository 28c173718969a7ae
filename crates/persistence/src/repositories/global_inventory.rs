//! Global meal inventory repository.
//!
//! The global pool is a singleton row. Every consumption is a single
//! guarded `UPDATE`; two concurrent `consume_one` calls racing on the
//! last meal serialize on the row and exactly one succeeds.

use domain::models::DEFAULT_GLOBAL_TOTAL;
use sqlx::{PgExecutor, PgPool};

use crate::entities::MealInventoryEntity;
use crate::metrics::QueryTimer;

const INVENTORY_COLUMNS: &str = "total, consumed, available, updated_at";

/// Repository for the global meal inventory singleton.
#[derive(Clone)]
pub struct GlobalInventoryRepository {
    pool: PgPool,
}

impl GlobalInventoryRepository {
    /// Creates a new GlobalInventoryRepository with the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read the global inventory, lazily creating it with the default
    /// total on first access.
    pub async fn read(&self) -> Result<MealInventoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("read_global_inventory");
        Self::ensure_exists_on(&self.pool).await?;
        let result = sqlx::query_as::<_, MealInventoryEntity>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM meal_inventory WHERE id = 1"
        ))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert the singleton with the documented default if absent.
    pub async fn ensure_exists_on<'e>(executor: impl PgExecutor<'e>) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO meal_inventory (id, total, consumed, available)
            VALUES (1, $1, 0, $1)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(DEFAULT_GLOBAL_TOTAL)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Read the singleton and lock it for the rest of the transaction.
    /// Callers must have ensured the row exists.
    pub async fn read_locked_on<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<MealInventoryEntity, sqlx::Error> {
        sqlx::query_as::<_, MealInventoryEntity>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM meal_inventory WHERE id = 1 FOR UPDATE"
        ))
        .fetch_one(executor)
        .await
    }

    /// Atomically consume one meal from the global pool.
    ///
    /// Returns false without mutation when the pool is exhausted.
    pub async fn consume_one_on<'e>(executor: impl PgExecutor<'e>) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE meal_inventory
            SET consumed = consumed + 1, available = available - 1, updated_at = now()
            WHERE id = 1 AND available > 0
            "#,
        )
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Resize the pool. Fails (false) when the new total would drop below
    /// what has already been consumed.
    pub async fn set_total(&self, new_total: i32) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("set_global_total");
        Self::ensure_exists_on(&self.pool).await?;
        let result = sqlx::query(
            r#"
            UPDATE meal_inventory
            SET total = $1, available = $1 - consumed, updated_at = now()
            WHERE id = 1 AND consumed <= $1
            "#,
        )
        .bind(new_total)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() == 1)
    }

    /// Administrative reset: forget all consumption and resize.
    ///
    /// Deliberately leaves per-person consumed_slots untouched.
    pub async fn reset(&self, new_total: i32) -> Result<MealInventoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("reset_global_inventory");
        Self::ensure_exists_on(&self.pool).await?;
        let result = sqlx::query_as::<_, MealInventoryEntity>(&format!(
            r#"
            UPDATE meal_inventory
            SET total = $1, consumed = 0, available = $1, updated_at = now()
            WHERE id = 1
            RETURNING {INVENTORY_COLUMNS}
            "#
        ))
        .bind(new_total)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
