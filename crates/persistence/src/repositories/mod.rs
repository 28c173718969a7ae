//! Repository implementations.

pub mod access_log;
pub mod attendee;
pub mod global_inventory;
pub mod guest;
pub mod station_inventory;

pub use access_log::{AccessLogFilter, AccessLogRepository};
pub use attendee::AttendeeRepository;
pub use global_inventory::GlobalInventoryRepository;
pub use guest::GuestRepository;
pub use station_inventory::StationInventoryRepository;
