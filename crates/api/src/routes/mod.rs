//! HTTP route handlers.

pub mod access_log;
pub mod attendees;
pub mod bulk_import;
pub mod checkin;
pub mod health;
pub mod inventory;
pub mod stations;
