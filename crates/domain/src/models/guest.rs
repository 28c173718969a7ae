//! Guest domain model.
//!
//! A guest ("invitado") is a companion record with a single-voucher
//! allotment; `consumed_slots` is therefore always 0 or 1.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed voucher allotment for guests.
pub const GUEST_ALLOTMENT: i32 = 1;

/// Represents a guest record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Guest {
    pub id: Uuid,
    pub identification: String,
    pub name: String,
    pub seat_number: Option<String>,
    pub consumed_slots: i32,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    /// Vouchers still available to this guest (1 or 0).
    pub fn remaining_slots(&self) -> i32 {
        GUEST_ALLOTMENT - self.consumed_slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_guest_has_one_voucher() {
        let g = Guest {
            id: Uuid::new_v4(),
            identification: "52441199".to_string(),
            name: "Luis Prada".to_string(),
            seat_number: None,
            consumed_slots: 0,
            created_at: Utc::now(),
        };
        assert_eq!(g.remaining_slots(), 1);
    }
}
