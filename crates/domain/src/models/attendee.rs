//! Attendee domain model.
//!
//! An attendee ("persona") is a graduating student or primary beneficiary.
//! Each attendee carries a meal-voucher allotment of two plus any extra
//! slots granted at import time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of meal vouchers per attendee.
pub const DEFAULT_ATTENDEE_ALLOTMENT: i32 = 2;

/// Represents an attendee record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Attendee {
    pub id: Uuid,
    /// Unique identification string (scanned from badge or typed).
    pub identification: String,
    pub name: String,
    pub seat_number: Option<String>,
    pub program: Option<String>,
    /// Additional vouchers beyond the default allotment. Never negative.
    pub extra_slots: i32,
    /// Vouchers already used. Never exceeds `total_slots()`.
    pub consumed_slots: i32,
    pub created_at: DateTime<Utc>,
}

impl Attendee {
    /// Total voucher allotment for this attendee.
    pub fn total_slots(&self) -> i32 {
        DEFAULT_ATTENDEE_ALLOTMENT + self.extra_slots
    }

    /// Vouchers still available to this attendee.
    pub fn remaining_slots(&self) -> i32 {
        self.total_slots() - self.consumed_slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(extra: i32, consumed: i32) -> Attendee {
        Attendee {
            id: Uuid::new_v4(),
            identification: "1002345678".to_string(),
            name: "Ana Torres".to_string(),
            seat_number: Some("A-14".to_string()),
            program: Some("Industrial Engineering".to_string()),
            extra_slots: extra,
            consumed_slots: consumed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn default_allotment_is_two() {
        assert_eq!(attendee(0, 0).total_slots(), 2);
        assert_eq!(attendee(0, 0).remaining_slots(), 2);
    }

    #[test]
    fn extra_slots_raise_the_allotment() {
        let a = attendee(3, 1);
        assert_eq!(a.total_slots(), 5);
        assert_eq!(a.remaining_slots(), 4);
    }

    #[test]
    fn exhausted_attendee_has_no_remaining_slots() {
        assert_eq!(attendee(0, 2).remaining_slots(), 0);
    }
}
