//! Common validation utilities for scan and admin input.

use validator::ValidationError;

/// Maximum accepted length for an identification string.
pub const MAX_IDENTIFICATION_LEN: usize = 64;

/// Maximum station number an event can configure.
pub const MAX_STATION_NUMBER: i32 = 99;

/// Validates an identification string captured from a scan or manual entry.
///
/// The core imposes only "non-empty, printable, bounded" — format checks
/// such as the 8-11 digit rule belong to the Q10 extraction path.
pub fn validate_identification(identification: &str) -> Result<(), ValidationError> {
    let trimmed = identification.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("identification_empty");
        err.message = Some("Identification must not be empty".into());
        return Err(err);
    }
    if trimmed.len() > MAX_IDENTIFICATION_LEN {
        let mut err = ValidationError::new("identification_too_long");
        err.message = Some("Identification must be at most 64 characters".into());
        return Err(err);
    }
    if trimmed.chars().any(char::is_control) {
        let mut err = ValidationError::new("identification_control_chars");
        err.message = Some("Identification must not contain control characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a serving-station number (1..=99).
pub fn validate_station_number(station_number: i32) -> Result<(), ValidationError> {
    if (1..=MAX_STATION_NUMBER).contains(&station_number) {
        Ok(())
    } else {
        let mut err = ValidationError::new("station_number_range");
        err.message = Some("Station number must be between 1 and 99".into());
        Err(err)
    }
}

/// Validates a meal count used for inventory sizing (must be non-negative).
pub fn validate_meal_count(count: i32) -> Result<(), ValidationError> {
    if count >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("meal_count_negative");
        err.message = Some("Meal count must be non-negative".into());
        Err(err)
    }
}

/// Validates the extra-slots allowance assigned to an attendee.
pub fn validate_extra_slots(extra_slots: i32) -> Result<(), ValidationError> {
    if (0..=20).contains(&extra_slots) {
        Ok(())
    } else {
        let mut err = ValidationError::new("extra_slots_range");
        err.message = Some("Extra slots must be between 0 and 20".into());
        Err(err)
    }
}
