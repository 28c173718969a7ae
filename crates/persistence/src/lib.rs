//! Persistence layer for the event check-in backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//!
//! Every counter mutation is a guarded single-statement `UPDATE`, so the
//! conservation and non-negativity invariants hold under concurrent
//! scanning stations without in-process locking.

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
