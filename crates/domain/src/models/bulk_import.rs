//! Bulk import models for attendee and guest records.
//!
//! Spreadsheet parsing happens outside the backend; the import endpoint
//! receives already-parsed rows and reports per-row failures without
//! aborting the batch.

use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::validation::{validate_extra_slots, validate_identification};

/// Request to bulk import attendee rows.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AttendeeBulkImportRequest {
    /// Rows to import, in spreadsheet order. Rows are validated
    /// individually so one bad row fails alone instead of aborting the
    /// batch.
    #[validate(length(min = 1, max = 2000, message = "rows must contain 1-2000 items"))]
    pub rows: Vec<AttendeeImportRow>,

    /// Update rows whose identification already exists instead of
    /// skipping them.
    #[serde(default)]
    pub update_existing: bool,
}

/// Request to bulk import guest rows.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct GuestBulkImportRequest {
    #[validate(length(min = 1, max = 2000, message = "rows must contain 1-2000 items"))]
    pub rows: Vec<GuestImportRow>,

    #[serde(default)]
    pub update_existing: bool,
}

/// One attendee row from the import sheet.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AttendeeImportRow {
    pub seat_number: Option<String>,

    #[validate(custom(function = "validate_identification"))]
    pub identification: String,

    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,

    pub program: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_extra_slots"))]
    pub extra_slots: i32,
}

/// One guest row from the import sheet.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct GuestImportRow {
    pub seat_number: Option<String>,

    #[validate(custom(function = "validate_identification"))]
    pub identification: String,

    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
}

/// A row the import could not process.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BulkImportError {
    /// 1-based row number within the request.
    pub row: usize,
    pub identification: String,
    pub error: String,
}

/// Result of a bulk import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BulkImportResponse {
    pub processed: u32,
    pub created: u32,
    pub updated: u32,
    pub skipped: u32,
    pub errors: Vec<BulkImportError>,
}
