//! Database entity definitions (row mappings).

pub mod access_log;
pub mod attendee;
pub mod guest;
pub mod inventory;

pub use access_log::{AccessLogEntity, AccessStatusDb, OperatorRoleDb, ScanSourceDb};
pub use attendee::AttendeeEntity;
pub use guest::GuestEntity;
pub use inventory::{MealInventoryEntity, StationInventoryEntity};
