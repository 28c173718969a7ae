//! Meal-voucher eligibility rules.
//!
//! This is the decision half of meal redemption: given snapshots of the
//! station pool, the global pool, and the person's quota, decide whether
//! one voucher may be served and produce the operator-facing message.
//! It mutates nothing; the commit half lives in the redemption service,
//! which re-applies each gate as a guarded SQL update inside one
//! transaction so a decision that passed here cannot partially commit.
//!
//! Gate order is fixed: station, global pool, person lookup, personal
//! quota. Each failure names its gate so operators can tell a station
//! problem from a global or personal one.

use crate::models::{MealInventory, Person, StationInventory};

/// Station snapshot for an eligibility check.
///
/// A station with no inventory record imposes no restriction: the gate
/// passes and the commit skips the station decrement.
#[derive(Debug, Clone)]
pub enum StationState<'a> {
    /// No inventory record exists for the requested station.
    Unrestricted,
    /// The station's inventory record.
    Tracked(&'a StationInventory),
}

/// Input snapshots for an eligibility evaluation.
#[derive(Debug)]
pub struct EligibilityInput<'a> {
    pub station_number: i32,
    pub station: StationState<'a>,
    pub global: &'a MealInventory,
    pub person: Option<&'a Person>,
}

/// Outcome of an eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityDecision {
    /// Every gate passed; `remaining_after` is the person's balance after
    /// the voucher about to be served.
    Eligible { remaining_after: i32 },
    /// The station exists but is switched off.
    StationInactive { station_number: i32 },
    /// The station exists but its pool is empty.
    StationExhausted { station_number: i32 },
    /// The global pool is empty.
    GlobalExhausted,
    /// No attendee or guest matches the identification.
    PersonNotFound,
    /// The person has used every voucher in their allotment.
    QuotaExhausted { total_slots: i32 },
}

impl EligibilityDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityDecision::Eligible { .. })
    }

    /// Operator-facing message. Every failure names its gate; callers
    /// must not collapse these into a generic "denied".
    pub fn message(&self) -> String {
        match self {
            EligibilityDecision::Eligible { remaining_after } => format!(
                "Meal voucher accepted. {} voucher(s) remaining",
                remaining_after
            ),
            EligibilityDecision::StationInactive { station_number } => {
                format!("Station {} is not active", station_number)
            }
            EligibilityDecision::StationExhausted { station_number } => {
                format!("Station {} has no meals available", station_number)
            }
            EligibilityDecision::GlobalExhausted => {
                "No meals left in the global inventory".to_string()
            }
            EligibilityDecision::PersonNotFound => {
                "Identification not found in attendee or guest records".to_string()
            }
            EligibilityDecision::QuotaExhausted { total_slots } => format!(
                "All {} meal voucher(s) for this identification already consumed",
                total_slots
            ),
        }
    }
}

/// Runs the four eligibility gates in order, short-circuiting on the
/// first failure.
pub fn evaluate_eligibility(input: &EligibilityInput<'_>) -> EligibilityDecision {
    // Gate 1: station. Missing record means no restriction.
    if let StationState::Tracked(station) = &input.station {
        if !station.active {
            return EligibilityDecision::StationInactive {
                station_number: input.station_number,
            };
        }
        if station.available <= 0 {
            return EligibilityDecision::StationExhausted {
                station_number: input.station_number,
            };
        }
    }

    // Gate 2: global pool.
    if input.global.available <= 0 {
        return EligibilityDecision::GlobalExhausted;
    }

    // Gate 3: person lookup.
    let person = match input.person {
        Some(person) => person,
        None => return EligibilityDecision::PersonNotFound,
    };

    // Gate 4: personal quota.
    let remaining = person.remaining_slots();
    if remaining <= 0 {
        return EligibilityDecision::QuotaExhausted {
            total_slots: person.total_slots(),
        };
    }

    EligibilityDecision::Eligible {
        remaining_after: remaining - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attendee, Guest};
    use chrono::Utc;
    use uuid::Uuid;

    fn attendee(extra_slots: i32, consumed_slots: i32) -> Person {
        Person::Attendee(Attendee {
            id: Uuid::new_v4(),
            identification: "1002345678".to_string(),
            name: "Ana Torres".to_string(),
            seat_number: Some("A-14".to_string()),
            program: None,
            extra_slots,
            consumed_slots,
            created_at: Utc::now(),
        })
    }

    fn guest(consumed_slots: i32) -> Person {
        Person::Guest(Guest {
            id: Uuid::new_v4(),
            identification: "52441199".to_string(),
            name: "Luis Prada".to_string(),
            seat_number: None,
            consumed_slots,
            created_at: Utc::now(),
        })
    }

    fn global(available: i32) -> MealInventory {
        let mut pool = MealInventory::with_total(100);
        for _ in 0..(100 - available) {
            pool.consume_one().unwrap();
        }
        pool
    }

    fn station(number: i32, available: i32, active: bool) -> StationInventory {
        let mut s = StationInventory::new(number, available);
        s.active = active;
        s
    }

    #[test]
    fn fresh_attendee_at_stocked_station_is_eligible() {
        // Scenario A: station 3 with stock, full global pool, fresh attendee.
        let st = station(3, 10, true);
        let pool = global(100);
        let person = attendee(0, 0);
        let decision = evaluate_eligibility(&EligibilityInput {
            station_number: 3,
            station: StationState::Tracked(&st),
            global: &pool,
            person: Some(&person),
        });
        assert_eq!(
            decision,
            EligibilityDecision::Eligible { remaining_after: 1 }
        );
        assert!(decision.message().contains("1 voucher(s) remaining"));
    }

    #[test]
    fn exhausted_quota_is_refused_with_quota_message() {
        // Scenario B: attendee already at their 2-voucher allotment.
        let st = station(3, 10, true);
        let pool = global(100);
        let person = attendee(0, 2);
        let decision = evaluate_eligibility(&EligibilityInput {
            station_number: 3,
            station: StationState::Tracked(&st),
            global: &pool,
            person: Some(&person),
        });
        assert_eq!(
            decision,
            EligibilityDecision::QuotaExhausted { total_slots: 2 }
        );
        assert!(decision.message().contains("already consumed"));
    }

    #[test]
    fn inactive_station_short_circuits_every_later_gate() {
        // Scenario C: inactive station refuses even a fresh attendee.
        let st = station(5, 50, false);
        let pool = global(100);
        let person = attendee(0, 0);
        let decision = evaluate_eligibility(&EligibilityInput {
            station_number: 5,
            station: StationState::Tracked(&st),
            global: &pool,
            person: Some(&person),
        });
        assert_eq!(
            decision,
            EligibilityDecision::StationInactive { station_number: 5 }
        );
    }

    #[test]
    fn empty_global_pool_refuses_despite_station_stock() {
        // Scenario E: station 2 has stock but the global pool is empty.
        let st = station(2, 5, true);
        let pool = global(0);
        let person = attendee(0, 0);
        let decision = evaluate_eligibility(&EligibilityInput {
            station_number: 2,
            station: StationState::Tracked(&st),
            global: &pool,
            person: Some(&person),
        });
        assert_eq!(decision, EligibilityDecision::GlobalExhausted);
    }

    #[test]
    fn unknown_identification_is_refused_after_pool_gates() {
        let st = station(1, 5, true);
        let pool = global(10);
        let decision = evaluate_eligibility(&EligibilityInput {
            station_number: 1,
            station: StationState::Tracked(&st),
            global: &pool,
            person: None,
        });
        assert_eq!(decision, EligibilityDecision::PersonNotFound);
    }

    #[test]
    fn untracked_station_imposes_no_restriction() {
        let pool = global(10);
        let person = attendee(1, 0);
        let decision = evaluate_eligibility(&EligibilityInput {
            station_number: 7,
            station: StationState::Unrestricted,
            global: &pool,
            person: Some(&person),
        });
        assert_eq!(
            decision,
            EligibilityDecision::Eligible { remaining_after: 2 }
        );
    }

    #[test]
    fn station_exhaustion_wins_over_person_gates() {
        let st = station(4, 0, true);
        let pool = global(10);
        let decision = evaluate_eligibility(&EligibilityInput {
            station_number: 4,
            station: StationState::Tracked(&st),
            global: &pool,
            person: None,
        });
        assert_eq!(
            decision,
            EligibilityDecision::StationExhausted { station_number: 4 }
        );
    }

    #[test]
    fn guest_single_voucher_allotment_applies() {
        let pool = global(10);
        let fresh = guest(0);
        let decision = evaluate_eligibility(&EligibilityInput {
            station_number: 1,
            station: StationState::Unrestricted,
            global: &pool,
            person: Some(&fresh),
        });
        assert_eq!(
            decision,
            EligibilityDecision::Eligible { remaining_after: 0 }
        );

        let used = guest(1);
        let decision = evaluate_eligibility(&EligibilityInput {
            station_number: 1,
            station: StationState::Unrestricted,
            global: &pool,
            person: Some(&used),
        });
        assert_eq!(
            decision,
            EligibilityDecision::QuotaExhausted { total_slots: 1 }
        );
    }
}
