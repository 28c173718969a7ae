//! Domain layer for the event check-in backend.
//!
//! This crate contains:
//! - Domain models (Attendee, Guest, inventories, access log entries)
//! - Pure business rules (voucher quota arithmetic, eligibility gates)
//! - Domain error types
//!
//! Nothing in this crate performs I/O; every rule here is unit-testable
//! without a database.

pub mod models;
pub mod services;
