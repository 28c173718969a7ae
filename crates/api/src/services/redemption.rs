//! Meal redemption service.
//!
//! Validate-then-commit in a single transaction. Phase 1 takes row locks
//! and runs the eligibility gates against the locked snapshots; phase 2
//! runs only when every gate passed and applies the guarded decrements
//! plus the granted log entry, so they commit or roll back together.
//!
//! A failed gate performs no mutation at all: the transaction is rolled
//! back with every counter untouched, including the station pool.

use sqlx::PgPool;

use domain::models::{
    ActorInfo, MealInventory, NewAccessLogEntry, Person, ScanSource, StationInventory,
};
use domain::services::{
    evaluate_eligibility, EligibilityDecision, EligibilityInput, StationState,
};
use persistence::repositories::{
    AccessLogRepository, AttendeeRepository, GlobalInventoryRepository, GuestRepository,
    StationInventoryRepository,
};

use crate::middleware::metrics::{record_scan_refused, record_voucher_served};

/// Result of a redemption attempt. Gate failures are outcomes, not
/// errors; only store failures surface as `sqlx::Error`.
#[derive(Debug, Clone)]
pub struct RedemptionOutcome {
    pub granted: bool,
    pub message: String,
    /// Vouchers the person has left after this attempt, when known.
    pub remaining: Option<i32>,
}

impl RedemptionOutcome {
    fn refused(decision: &EligibilityDecision) -> Self {
        Self {
            granted: false,
            message: decision.message(),
            remaining: None,
        }
    }
}

/// Serves meal vouchers at a station.
#[derive(Clone)]
pub struct RedemptionService {
    pool: PgPool,
}

impl RedemptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attempt to redeem one meal voucher for `identification` at
    /// `station_number`.
    ///
    /// On success the station pool (when tracked), the global pool, and
    /// the person's consumed_slots move together with the granted log
    /// entry in one transaction.
    pub async fn redeem(
        &self,
        identification: &str,
        station_number: i32,
        actor: &ActorInfo,
        source: ScanSource,
    ) -> Result<RedemptionOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        GlobalInventoryRepository::ensure_exists_on(&mut *tx).await?;

        // Phase 1: lock and read every row the gates depend on. Lock
        // order is fixed (station, global, person) so concurrent
        // redemptions cannot deadlock.
        let station: Option<StationInventory> =
            StationInventoryRepository::find_locked_on(&mut *tx, station_number)
                .await?
                .map(Into::into);
        let global: MealInventory =
            GlobalInventoryRepository::read_locked_on(&mut *tx).await?.into();
        let person = Self::find_person_locked(&mut tx, identification).await?;

        let decision = evaluate_eligibility(&EligibilityInput {
            station_number,
            station: station
                .as_ref()
                .map_or(StationState::Unrestricted, StationState::Tracked),
            global: &global,
            person: person.as_ref(),
        });

        if !decision.is_eligible() {
            tx.rollback().await?;
            record_scan_refused(refusal_label(&decision));
            tracing::info!(
                identification,
                station = station_number,
                reason = refusal_label(&decision),
                "voucher refused"
            );
            return Ok(RedemptionOutcome::refused(&decision));
        }
        let person = person.ok_or(sqlx::Error::RowNotFound)?;

        // Phase 2: guarded decrements. The rows are locked, so a zero-row
        // update here means the snapshot was stale; roll everything back.
        if station.is_some()
            && !StationInventoryRepository::consume_one_on(&mut *tx, station_number).await?
        {
            tx.rollback().await?;
            record_scan_refused("race_lost");
            return Ok(race_lost());
        }
        if !GlobalInventoryRepository::consume_one_on(&mut *tx).await? {
            tx.rollback().await?;
            record_scan_refused("race_lost");
            return Ok(race_lost());
        }
        let slot_taken = match &person {
            Person::Attendee(_) => {
                AttendeeRepository::consume_slot_on(&mut *tx, identification).await?
            }
            Person::Guest(_) => GuestRepository::consume_slot_on(&mut *tx, identification).await?,
        };
        if !slot_taken {
            tx.rollback().await?;
            record_scan_refused("race_lost");
            return Ok(race_lost());
        }

        let entry = NewAccessLogEntry::new(
            identification,
            domain::models::AccessStatus::Granted,
            decision.message(),
            source,
        )
        .with_actor(actor.clone())
        .with_station(station_number);
        AccessLogRepository::append_on(&mut *tx, &entry).await?;

        tx.commit().await?;
        record_voucher_served(Some(station_number));
        tracing::info!(identification, station = station_number, "voucher served");

        let remaining = match &decision {
            EligibilityDecision::Eligible { remaining_after } => Some(*remaining_after),
            _ => None,
        };
        Ok(RedemptionOutcome {
            granted: true,
            message: decision.message(),
            remaining,
        })
    }

    /// Lock the person row for the rest of the transaction. Attendees are
    /// tried first; the guest table is a fallback namespace.
    async fn find_person_locked(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        identification: &str,
    ) -> Result<Option<Person>, sqlx::Error> {
        if let Some(attendee) =
            AttendeeRepository::find_by_identification_locked(&mut **tx, identification).await?
        {
            return Ok(Some(Person::Attendee(attendee.into())));
        }
        Ok(GuestRepository::find_by_identification_locked(&mut **tx, identification)
            .await?
            .map(|guest| Person::Guest(guest.into())))
    }
}

fn race_lost() -> RedemptionOutcome {
    RedemptionOutcome {
        granted: false,
        message: "Voucher could not be reserved, please scan again".to_string(),
        remaining: None,
    }
}

fn refusal_label(decision: &EligibilityDecision) -> &'static str {
    match decision {
        EligibilityDecision::Eligible { .. } => "none",
        EligibilityDecision::StationInactive { .. } => "station_inactive",
        EligibilityDecision::StationExhausted { .. } => "station_exhausted",
        EligibilityDecision::GlobalExhausted => "global_exhausted",
        EligibilityDecision::PersonNotFound => "person_not_found",
        EligibilityDecision::QuotaExhausted { .. } => "quota_exhausted",
    }
}
