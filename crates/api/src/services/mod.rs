//! Business logic services.

pub mod check_in;
pub mod q10;
pub mod redemption;

pub use check_in::{CheckInService, ScanOutcome};
pub use q10::{Q10Client, Q10Error};
pub use redemption::{RedemptionOutcome, RedemptionService};
