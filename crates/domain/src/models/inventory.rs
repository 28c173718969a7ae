//! Meal inventory models and counter rules.
//!
//! Two kinds of counters share the same conservation rules: the single
//! event-wide pool and one pool per serving station. The methods here are
//! the pure form of those rules; the persistence layer mirrors each one as
//! a guarded single-statement `UPDATE` so the same invariants hold under
//! concurrent scanning stations.
//!
//! Invariants, after every operation:
//! - `available = total - consumed`
//! - `available >= 0` and `consumed >= 0`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default size of the global meal pool when lazily created.
pub const DEFAULT_GLOBAL_TOTAL: i32 = 2400;

/// Error type for inventory counter operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("No meals available")]
    Exhausted,

    #[error("Station is inactive")]
    Inactive,

    #[error("Cannot shrink total below {consumed} already-consumed meals")]
    ShrinkBelowConsumed { consumed: i32 },

    #[error("Amount must be non-negative")]
    NegativeAmount,
}

/// The event-wide meal pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MealInventory {
    pub total: i32,
    pub consumed: i32,
    pub available: i32,
    pub updated_at: DateTime<Utc>,
}

impl MealInventory {
    /// Creates a pool of the given size with nothing consumed.
    pub fn with_total(total: i32) -> Self {
        Self {
            total,
            consumed: 0,
            available: total,
            updated_at: Utc::now(),
        }
    }

    /// Consumes one meal. Fails without mutation when the pool is empty.
    pub fn consume_one(&mut self) -> Result<(), InventoryError> {
        if self.available <= 0 {
            return Err(InventoryError::Exhausted);
        }
        self.consumed += 1;
        self.available -= 1;
        Ok(())
    }

    /// Resizes the pool. The new total may not drop below what has
    /// already been consumed.
    pub fn set_total(&mut self, new_total: i32) -> Result<(), InventoryError> {
        if new_total < 0 {
            return Err(InventoryError::NegativeAmount);
        }
        if new_total < self.consumed {
            return Err(InventoryError::ShrinkBelowConsumed {
                consumed: self.consumed,
            });
        }
        self.total = new_total;
        self.available = new_total - self.consumed;
        Ok(())
    }

    /// Administrative reset: forgets all consumption and resizes.
    ///
    /// Per-person `consumed_slots` are deliberately untouched by this;
    /// resetting the pool does not "unconsume" individual attendees.
    pub fn reset(&mut self, new_total: i32) -> Result<(), InventoryError> {
        if new_total < 0 {
            return Err(InventoryError::NegativeAmount);
        }
        self.total = new_total;
        self.consumed = 0;
        self.available = new_total;
        Ok(())
    }
}

/// One serving station's meal pool, with an on/off gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StationInventory {
    pub station_number: i32,
    pub total: i32,
    pub consumed: i32,
    pub available: i32,
    /// Consumption is refused while the station is inactive.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StationInventory {
    /// Creates a station pool of the given size, active by default.
    pub fn new(station_number: i32, total: i32) -> Self {
        let now = Utc::now();
        Self {
            station_number,
            total,
            consumed: 0,
            available: total,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Consumes one meal at this station. Fails without mutation when the
    /// station is inactive or its pool is empty. The inactive gate wins
    /// over the exhaustion gate so the operator message names the right
    /// problem.
    pub fn consume_one(&mut self) -> Result<(), InventoryError> {
        if !self.active {
            return Err(InventoryError::Inactive);
        }
        if self.available <= 0 {
            return Err(InventoryError::Exhausted);
        }
        self.consumed += 1;
        self.available -= 1;
        Ok(())
    }

    /// Resizes this station's pool, with the same shrink guard as the
    /// global pool.
    pub fn set_total(&mut self, new_total: i32) -> Result<(), InventoryError> {
        if new_total < 0 {
            return Err(InventoryError::NegativeAmount);
        }
        if new_total < self.consumed {
            return Err(InventoryError::ShrinkBelowConsumed {
                consumed: self.consumed,
            });
        }
        self.total = new_total;
        self.available = new_total - self.consumed;
        Ok(())
    }

    /// Adds meals to this station without touching consumption.
    pub fn add_meals(&mut self, amount: i32) -> Result<(), InventoryError> {
        if amount < 0 {
            return Err(InventoryError::NegativeAmount);
        }
        self.total += amount;
        self.available += amount;
        Ok(())
    }

    /// Toggles the gate without affecting counts.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Resets this station's counters.
    pub fn reset(&mut self, new_total: i32) -> Result<(), InventoryError> {
        if new_total < 0 {
            return Err(InventoryError::NegativeAmount);
        }
        self.total = new_total;
        self.consumed = 0;
        self.available = new_total;
        Ok(())
    }

    fn conserved(&self) -> bool {
        self.consumed + self.available == self.total
    }

    /// Debug-only invariant probe used by tests.
    #[doc(hidden)]
    pub fn check_conservation(&self) -> bool {
        self.conserved() && self.available >= 0 && self.consumed >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_pool_conserves_counts() {
        let mut pool = MealInventory::with_total(100);
        for _ in 0..37 {
            pool.consume_one().unwrap();
        }
        assert_eq!(pool.total, 100);
        assert_eq!(pool.consumed, 37);
        assert_eq!(pool.available, 63);
        assert_eq!(pool.consumed + pool.available, pool.total);
    }

    #[test]
    fn global_pool_fails_instead_of_underflowing() {
        let mut pool = MealInventory::with_total(1);
        pool.consume_one().unwrap();
        assert_eq!(pool.consume_one(), Err(InventoryError::Exhausted));
        assert_eq!(pool.available, 0);
        assert_eq!(pool.consumed, 1);
    }

    #[test]
    fn set_total_recomputes_available() {
        let mut pool = MealInventory::with_total(100);
        pool.consume_one().unwrap();
        pool.set_total(150).unwrap();
        assert_eq!(pool.total, 150);
        assert_eq!(pool.consumed, 1);
        assert_eq!(pool.available, 149);
    }

    #[test]
    fn set_total_refuses_to_shrink_below_consumed() {
        let mut pool = MealInventory::with_total(10);
        for _ in 0..5 {
            pool.consume_one().unwrap();
        }
        assert_eq!(
            pool.set_total(4),
            Err(InventoryError::ShrinkBelowConsumed { consumed: 5 })
        );
        // Nothing mutated on failure.
        assert_eq!(pool.total, 10);
        assert_eq!(pool.available, 5);
    }

    #[test]
    fn reset_forgets_consumption() {
        let mut pool = MealInventory::with_total(10);
        pool.consume_one().unwrap();
        pool.reset(50).unwrap();
        assert_eq!(pool.total, 50);
        assert_eq!(pool.consumed, 0);
        assert_eq!(pool.available, 50);
    }

    #[test]
    fn inactive_station_refuses_regardless_of_stock() {
        let mut station = StationInventory::new(5, 40);
        station.set_active(false);
        assert_eq!(station.consume_one(), Err(InventoryError::Inactive));
        assert_eq!(station.available, 40);
        assert!(station.check_conservation());
    }

    #[test]
    fn station_exhaustion_fails_without_mutation() {
        let mut station = StationInventory::new(3, 2);
        station.consume_one().unwrap();
        station.consume_one().unwrap();
        assert_eq!(station.consume_one(), Err(InventoryError::Exhausted));
        assert_eq!(station.consumed, 2);
        assert_eq!(station.available, 0);
        assert!(station.check_conservation());
    }

    #[test]
    fn add_meals_grows_total_and_available() {
        let mut station = StationInventory::new(1, 10);
        station.consume_one().unwrap();
        station.add_meals(5).unwrap();
        assert_eq!(station.total, 15);
        assert_eq!(station.consumed, 1);
        assert_eq!(station.available, 14);
        assert!(station.check_conservation());
    }

    #[test]
    fn add_meals_rejects_negative_amount() {
        let mut station = StationInventory::new(1, 10);
        assert_eq!(station.add_meals(-3), Err(InventoryError::NegativeAmount));
    }

    #[test]
    fn toggling_active_preserves_counts() {
        let mut station = StationInventory::new(2, 8);
        station.consume_one().unwrap();
        station.set_active(false);
        station.set_active(true);
        assert_eq!(station.consumed, 1);
        assert_eq!(station.available, 7);
        station.consume_one().unwrap();
        assert_eq!(station.available, 6);
    }
}
