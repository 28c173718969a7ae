//! Access log repository.
//!
//! Append-only: the only mutating operations are `append` and the admin
//! wipe. Everything else is derived by query, including the duplicate
//! checks the scanning surfaces rely on.

use domain::models::NewAccessLogEntry;
use shared::pagination::LogCursor;
use sqlx::{PgExecutor, PgPool};

use crate::entities::{AccessLogEntity, AccessStatusDb, OperatorRoleDb, ScanSourceDb};
use crate::metrics::QueryTimer;

const LOG_COLUMNS: &str = "id, identification, status, details, source, \
     actor_id, actor_name, actor_email, actor_role, station_used, created_at";

/// Filters for listing access log entries.
#[derive(Debug, Clone, Default)]
pub struct AccessLogFilter {
    pub status: Option<AccessStatusDb>,
    pub identification: Option<String>,
    pub cursor: Option<LogCursor>,
    pub limit: i64,
}

/// Repository for access log database operations.
#[derive(Clone)]
pub struct AccessLogRepository {
    pool: PgPool,
}

impl AccessLogRepository {
    /// Creates a new AccessLogRepository with the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a new log entry.
    pub async fn append(&self, entry: &NewAccessLogEntry) -> Result<AccessLogEntity, sqlx::Error> {
        let timer = QueryTimer::new("append_access_log");
        let result = Self::append_on(&self.pool, entry).await;
        timer.record();
        result
    }

    /// Append a new log entry on an arbitrary executor (used by the
    /// redemption transaction so the log row commits with the counters).
    pub async fn append_on<'e>(
        executor: impl PgExecutor<'e>,
        entry: &NewAccessLogEntry,
    ) -> Result<AccessLogEntity, sqlx::Error> {
        let (actor_id, actor_name, actor_email, actor_role) = match &entry.actor {
            Some(actor) => (
                Some(actor.actor_id),
                Some(actor.actor_name.clone()),
                Some(actor.actor_email.clone()),
                Some(OperatorRoleDb::from(actor.actor_role)),
            ),
            None => (None, None, None, None),
        };

        sqlx::query_as::<_, AccessLogEntity>(&format!(
            r#"
            INSERT INTO access_log (
                identification, status, details, source,
                actor_id, actor_name, actor_email, actor_role, station_used
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(&entry.identification)
        .bind(AccessStatusDb::from(entry.status))
        .bind(&entry.details)
        .bind(ScanSourceDb::from(entry.source))
        .bind(actor_id)
        .bind(actor_name)
        .bind(actor_email)
        .bind(actor_role)
        .bind(entry.station_used)
        .fetch_one(executor)
        .await
    }

    /// True iff an entry counting as "already inside" (granted or
    /// q10_success) exists for this identification.
    pub async fn has_entry_counting_as_entry(
        &self,
        identification: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_already_scanned");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM access_log
                WHERE identification = $1 AND status IN ('granted', 'q10_success')
            )
            "#,
        )
        .bind(identification)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// True iff a `granted` entry exists for this identification. Used by
    /// the denial-suppression rule.
    pub async fn has_granted_entry(&self, identification: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_granted_entry");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM access_log
                WHERE identification = $1 AND status = 'granted'
            )
            "#,
        )
        .bind(identification)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List entries newest-first with optional filters and keyset cursor.
    pub async fn list(&self, filter: &AccessLogFilter) -> Result<Vec<AccessLogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_access_log");

        let mut conditions: Vec<String> = Vec::new();
        let mut param = 0;
        if filter.status.is_some() {
            param += 1;
            conditions.push(format!("status = ${}", param));
        }
        if filter.identification.is_some() {
            param += 1;
            conditions.push(format!("identification = ${}", param));
        }
        if filter.cursor.is_some() {
            conditions.push(format!("(created_at, id) < (${}, ${})", param + 1, param + 2));
            param += 2;
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit_param = param + 1;

        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM access_log {where_clause} \
             ORDER BY created_at DESC, id DESC LIMIT ${limit_param}"
        );

        let mut query = sqlx::query_as::<_, AccessLogEntity>(&sql);
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        if let Some(ref identification) = filter.identification {
            query = query.bind(identification.clone());
        }
        if let Some(cursor) = filter.cursor {
            query = query.bind(cursor.created_at).bind(cursor.id);
        }
        let result = query.bind(filter.limit).fetch_all(&self.pool).await;
        timer.record();
        result
    }

    /// Number of entries for one identification. Used by admin tooling
    /// and the duplicate-suppression tests.
    pub async fn count_for_identification(
        &self,
        identification: &str,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_access_log_entries");
        let result =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM access_log WHERE identification = $1")
                .bind(identification)
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result
    }

    /// Admin wipe of the whole log.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("wipe_access_log");
        let result = sqlx::query("DELETE FROM access_log").execute(&self.pool).await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
