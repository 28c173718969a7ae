//! Operator-side models for the check-in surfaces.

use serde::{Deserialize, Serialize};

/// What a granted scan should do beyond logging.
///
/// This is passed explicitly rather than inferred from the presence of an
/// assigned station on the actor, so an operator holding several roles can
/// never trigger an accidental double decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "station")]
pub enum AccessMode {
    /// Pure access control: record the grant, touch no counters.
    AccessOnly,
    /// Meal service at the given station: a grant consumes one voucher
    /// from the person, the station pool (when one exists), and the
    /// global pool, atomically.
    MealService(i32),
}

impl AccessMode {
    /// The station this mode serves meals at, if any.
    pub fn station(self) -> Option<i32> {
        match self {
            AccessMode::AccessOnly => None,
            AccessMode::MealService(station) => Some(station),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_service_exposes_its_station() {
        assert_eq!(AccessMode::MealService(4).station(), Some(4));
        assert_eq!(AccessMode::AccessOnly.station(), None);
    }
}
