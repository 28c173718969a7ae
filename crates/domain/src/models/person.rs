//! A person eligible for check-in: either an attendee or a guest.
//!
//! The two record kinds share the quota invariant family but differ in
//! allotment, so the voucher rules work against this enum instead of
//! duplicating per kind.

use serde::Serialize;

use super::attendee::Attendee;
use super::guest::Guest;

/// An attendee or guest resolved from an identification string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Person {
    Attendee(Attendee),
    Guest(Guest),
}

impl Person {
    pub fn identification(&self) -> &str {
        match self {
            Person::Attendee(a) => &a.identification,
            Person::Guest(g) => &g.identification,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Person::Attendee(a) => &a.name,
            Person::Guest(g) => &g.name,
        }
    }

    pub fn consumed_slots(&self) -> i32 {
        match self {
            Person::Attendee(a) => a.consumed_slots,
            Person::Guest(g) => g.consumed_slots,
        }
    }

    /// Total voucher allotment: `2 + extra_slots` for attendees, 1 for
    /// guests.
    pub fn total_slots(&self) -> i32 {
        match self {
            Person::Attendee(a) => a.total_slots(),
            Person::Guest(_) => super::guest::GUEST_ALLOTMENT,
        }
    }

    /// Vouchers still available to this person.
    pub fn remaining_slots(&self) -> i32 {
        self.total_slots() - self.consumed_slots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn guest_allotment_is_fixed_at_one() {
        let person = Person::Guest(Guest {
            id: Uuid::new_v4(),
            identification: "52441199".to_string(),
            name: "Luis Prada".to_string(),
            seat_number: None,
            consumed_slots: 1,
            created_at: Utc::now(),
        });
        assert_eq!(person.total_slots(), 1);
        assert_eq!(person.remaining_slots(), 0);
    }

    #[test]
    fn attendee_allotment_includes_extra_slots() {
        let person = Person::Attendee(Attendee {
            id: Uuid::new_v4(),
            identification: "1002345678".to_string(),
            name: "Ana Torres".to_string(),
            seat_number: None,
            program: None,
            extra_slots: 2,
            consumed_slots: 3,
            created_at: Utc::now(),
        });
        assert_eq!(person.total_slots(), 4);
        assert_eq!(person.remaining_slots(), 1);
    }
}
