//! Axum extractors.

pub mod operator_auth;

pub use operator_auth::Operator;
