//! Access log entry models.
//!
//! The access log is append-only: entries are never updated or deleted
//! outside an explicit admin wipe. "Has this identification been granted
//! entry" is always derived from the log, never stored separately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::jwt::OperatorRole;

/// Outcome recorded for a scan or manual entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    Granted,
    Denied,
    Q10Success,
    Q10Failed,
}

impl AccessStatus {
    /// Statuses that count as "already inside" for duplicate-scan checks.
    pub fn counts_as_entry(self) -> bool {
        matches!(self, AccessStatus::Granted | AccessStatus::Q10Success)
    }
}

/// Where the raw identification string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanSource {
    /// Decoded barcode/QR payload.
    Direct,
    /// Extracted from a Q10 certificate page.
    Q10,
    /// Typed by an operator.
    Manual,
}

/// Identity of the operator who produced a log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActorInfo {
    pub actor_id: Uuid,
    pub actor_name: String,
    pub actor_email: String,
    pub actor_role: OperatorRole,
}

/// An access log entry as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AccessLogEntry {
    pub id: i64,
    pub identification: String,
    pub status: AccessStatus,
    pub details: String,
    pub source: ScanSource,
    pub actor_id: Option<Uuid>,
    pub actor_name: Option<String>,
    pub actor_email: Option<String>,
    pub actor_role: Option<OperatorRole>,
    /// Set only when the granting actor is a meal-station operator.
    pub station_used: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Input for appending a new log entry.
#[derive(Debug, Clone)]
pub struct NewAccessLogEntry {
    pub identification: String,
    pub status: AccessStatus,
    pub details: String,
    pub source: ScanSource,
    pub actor: Option<ActorInfo>,
    pub station_used: Option<i32>,
}

impl NewAccessLogEntry {
    pub fn new(
        identification: impl Into<String>,
        status: AccessStatus,
        details: impl Into<String>,
        source: ScanSource,
    ) -> Self {
        Self {
            identification: identification.into(),
            status,
            details: details.into(),
            source,
            actor: None,
            station_used: None,
        }
    }

    pub fn with_actor(mut self, actor: ActorInfo) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_station(mut self, station_number: i32) -> Self {
        self.station_used = Some(station_number);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_and_q10_success_count_as_entry() {
        assert!(AccessStatus::Granted.counts_as_entry());
        assert!(AccessStatus::Q10Success.counts_as_entry());
        assert!(!AccessStatus::Denied.counts_as_entry());
        assert!(!AccessStatus::Q10Failed.counts_as_entry());
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AccessStatus::Q10Success).unwrap(),
            "\"q10_success\""
        );
        assert_eq!(
            serde_json::to_string(&ScanSource::Manual).unwrap(),
            "\"manual\""
        );
    }
}
