//! Domain services for the event check-in backend.
//!
//! Services contain business logic that operates on domain models.

pub mod voucher;

pub use voucher::{evaluate_eligibility, EligibilityDecision, EligibilityInput, StationState};
