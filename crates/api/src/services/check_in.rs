//! Access decision service.
//!
//! The front door of every scanning surface: duplicate detection, access
//! recording, and denial suppression. Whether a grant also consumes a
//! meal voucher is decided by the explicit [`AccessMode`] the caller
//! passes in, never inferred here.

use sqlx::PgPool;

use domain::models::{AccessMode, AccessStatus, ActorInfo, NewAccessLogEntry, ScanSource};
use persistence::repositories::AccessLogRepository;

use crate::middleware::metrics::record_scan_refused;
use crate::services::redemption::RedemptionService;

/// Result of a scan, deny, or Q10 check-in.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub granted: bool,
    pub message: String,
    /// Vouchers left after a meal-service grant.
    pub remaining: Option<i32>,
}

impl ScanOutcome {
    fn refused(message: impl Into<String>) -> Self {
        Self {
            granted: false,
            message: message.into(),
            remaining: None,
        }
    }
}

/// Records access decisions and routes meal-service grants through the
/// redemption service.
#[derive(Clone)]
pub struct CheckInService {
    access_log: AccessLogRepository,
    redemption: RedemptionService,
}

impl CheckInService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            access_log: AccessLogRepository::new(pool.clone()),
            redemption: RedemptionService::new(pool),
        }
    }

    /// True iff this identification already holds an entry that counts as
    /// being inside (granted or q10_success).
    pub async fn already_scanned(&self, identification: &str) -> Result<bool, sqlx::Error> {
        self.access_log.has_entry_counting_as_entry(identification).await
    }

    /// Process a grant for a scanned identification.
    ///
    /// In [`AccessMode::AccessOnly`] a grant is purely a log append, and
    /// a person already inside is refused as a duplicate. In
    /// [`AccessMode::MealService`] the duplicate gate does not apply:
    /// attendees return for each voucher in their allotment, so repeats
    /// are decided by the quota and pool gates instead, and a refused
    /// redemption is recorded as a denial (subject to suppression).
    pub async fn scan(
        &self,
        identification: &str,
        source: ScanSource,
        actor: &ActorInfo,
        mode: AccessMode,
    ) -> Result<ScanOutcome, sqlx::Error> {
        match mode {
            AccessMode::AccessOnly => {
                if self.already_scanned(identification).await? {
                    record_scan_refused("already_scanned");
                    return Ok(ScanOutcome::refused(format!(
                        "Identification {} has already been scanned",
                        identification
                    )));
                }
                let entry = NewAccessLogEntry::new(
                    identification,
                    AccessStatus::Granted,
                    "Access granted",
                    source,
                )
                .with_actor(actor.clone());
                self.access_log.append(&entry).await?;
                tracing::info!(identification, "access granted");
                Ok(ScanOutcome {
                    granted: true,
                    message: "Access granted".to_string(),
                    remaining: None,
                })
            }
            AccessMode::MealService(station_number) => {
                let outcome = self
                    .redemption
                    .redeem(identification, station_number, actor, source)
                    .await?;
                if !outcome.granted {
                    self.deny(identification, &outcome.message, source, actor).await?;
                }
                Ok(ScanOutcome {
                    granted: outcome.granted,
                    message: outcome.message,
                    remaining: outcome.remaining,
                })
            }
        }
    }

    /// Record a denial.
    ///
    /// Suppressed entirely when a granted entry already exists: a person
    /// already inside cannot be retroactively denied, and the log must
    /// not say otherwise.
    pub async fn deny(
        &self,
        identification: &str,
        details: &str,
        source: ScanSource,
        actor: &ActorInfo,
    ) -> Result<bool, sqlx::Error> {
        if self.access_log.has_granted_entry(identification).await? {
            tracing::debug!(identification, "denial suppressed, granted entry exists");
            return Ok(false);
        }
        let entry = NewAccessLogEntry::new(identification, AccessStatus::Denied, details, source)
            .with_actor(actor.clone());
        self.access_log.append(&entry).await?;
        Ok(true)
    }

    /// Record the outcome of a Q10 certificate check-in. Always appends;
    /// never touches inventories.
    pub async fn record_q10(
        &self,
        identification: &str,
        success: bool,
        details: &str,
        actor: &ActorInfo,
    ) -> Result<(), sqlx::Error> {
        let status = if success {
            AccessStatus::Q10Success
        } else {
            AccessStatus::Q10Failed
        };
        let entry = NewAccessLogEntry::new(identification, status, details, ScanSource::Q10)
            .with_actor(actor.clone());
        self.access_log.append(&entry).await?;
        Ok(())
    }
}
