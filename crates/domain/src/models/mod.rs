//! Domain models for the event check-in backend.

pub mod access_log;
pub mod attendee;
pub mod bulk_import;
pub mod guest;
pub mod inventory;
pub mod operator;
pub mod person;

pub use access_log::{AccessLogEntry, AccessStatus, ActorInfo, NewAccessLogEntry, ScanSource};
pub use attendee::{Attendee, DEFAULT_ATTENDEE_ALLOTMENT};
pub use bulk_import::{
    AttendeeBulkImportRequest, AttendeeImportRow, BulkImportError, BulkImportResponse,
    GuestBulkImportRequest, GuestImportRow,
};
pub use guest::{Guest, GUEST_ALLOTMENT};
pub use inventory::{
    InventoryError, MealInventory, StationInventory, DEFAULT_GLOBAL_TOTAL,
};
pub use operator::AccessMode;
pub use person::Person;
