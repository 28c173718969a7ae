//! Access log entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{AccessLogEntry, AccessStatus, ScanSource};
use shared::jwt::OperatorRole;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping to the PostgreSQL `access_status` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "access_status", rename_all = "snake_case")]
pub enum AccessStatusDb {
    Granted,
    Denied,
    Q10Success,
    Q10Failed,
}

impl From<AccessStatusDb> for AccessStatus {
    fn from(db: AccessStatusDb) -> Self {
        match db {
            AccessStatusDb::Granted => AccessStatus::Granted,
            AccessStatusDb::Denied => AccessStatus::Denied,
            AccessStatusDb::Q10Success => AccessStatus::Q10Success,
            AccessStatusDb::Q10Failed => AccessStatus::Q10Failed,
        }
    }
}

impl From<AccessStatus> for AccessStatusDb {
    fn from(status: AccessStatus) -> Self {
        match status {
            AccessStatus::Granted => AccessStatusDb::Granted,
            AccessStatus::Denied => AccessStatusDb::Denied,
            AccessStatus::Q10Success => AccessStatusDb::Q10Success,
            AccessStatus::Q10Failed => AccessStatusDb::Q10Failed,
        }
    }
}

/// Database enum mapping to the PostgreSQL `scan_source` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "scan_source", rename_all = "snake_case")]
pub enum ScanSourceDb {
    Direct,
    Q10,
    Manual,
}

impl From<ScanSourceDb> for ScanSource {
    fn from(db: ScanSourceDb) -> Self {
        match db {
            ScanSourceDb::Direct => ScanSource::Direct,
            ScanSourceDb::Q10 => ScanSource::Q10,
            ScanSourceDb::Manual => ScanSource::Manual,
        }
    }
}

impl From<ScanSource> for ScanSourceDb {
    fn from(source: ScanSource) -> Self {
        match source {
            ScanSource::Direct => ScanSourceDb::Direct,
            ScanSource::Q10 => ScanSourceDb::Q10,
            ScanSource::Manual => ScanSourceDb::Manual,
        }
    }
}

/// Database enum mapping to the PostgreSQL `operator_role` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "operator_role", rename_all = "snake_case")]
pub enum OperatorRoleDb {
    Admin,
    Operative,
    Mesa,
}

impl From<OperatorRoleDb> for OperatorRole {
    fn from(db: OperatorRoleDb) -> Self {
        match db {
            OperatorRoleDb::Admin => OperatorRole::Admin,
            OperatorRoleDb::Operative => OperatorRole::Operative,
            OperatorRoleDb::Mesa => OperatorRole::Mesa,
        }
    }
}

impl From<OperatorRole> for OperatorRoleDb {
    fn from(role: OperatorRole) -> Self {
        match role {
            OperatorRole::Admin => OperatorRoleDb::Admin,
            OperatorRole::Operative => OperatorRoleDb::Operative,
            OperatorRole::Mesa => OperatorRoleDb::Mesa,
        }
    }
}

/// Database row mapping for the access_log table.
#[derive(Debug, Clone, FromRow)]
pub struct AccessLogEntity {
    pub id: i64,
    pub identification: String,
    pub status: AccessStatusDb,
    pub details: String,
    pub source: ScanSourceDb,
    pub actor_id: Option<Uuid>,
    pub actor_name: Option<String>,
    pub actor_email: Option<String>,
    pub actor_role: Option<OperatorRoleDb>,
    pub station_used: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<AccessLogEntity> for AccessLogEntry {
    fn from(entity: AccessLogEntity) -> Self {
        AccessLogEntry {
            id: entity.id,
            identification: entity.identification,
            status: entity.status.into(),
            details: entity.details,
            source: entity.source.into(),
            actor_id: entity.actor_id,
            actor_name: entity.actor_name,
            actor_email: entity.actor_email,
            actor_role: entity.actor_role.map(Into::into),
            station_used: entity.station_used,
            created_at: entity.created_at,
        }
    }
}
