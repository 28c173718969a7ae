//! Shared utilities and common types for the check-in backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Operator token (JWT) claims and validation
//! - Common validation logic for scan input
//! - Cursor pagination for the access log

pub mod jwt;
pub mod pagination;
pub mod validation;
