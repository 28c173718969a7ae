//! Cursor-based pagination for append-only log listings.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error type for cursor operations.
#[derive(Debug, Error)]
pub enum CursorError {
    #[error("Invalid cursor format")]
    InvalidFormat,
    #[error("Invalid cursor encoding")]
    InvalidEncoding,
    #[error("Invalid timestamp in cursor")]
    InvalidTimestamp,
    #[error("Invalid ID in cursor")]
    InvalidId,
}

/// Keyset cursor into the access log, ordered by `(created_at, id)`.
///
/// The composite key disambiguates entries written within the same
/// microsecond, which happens when several scanning stations log at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogCursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl LogCursor {
    pub fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        Self { created_at, id }
    }

    /// Encodes the cursor as `base64(RFC3339_timestamp:id)`.
    pub fn encode(&self) -> String {
        let raw = format!(
            "{}:{}",
            self.created_at
                .to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            self.id
        );
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    /// Decodes an opaque cursor string back into its components.
    pub fn decode(cursor: &str) -> Result<Self, CursorError> {
        let decoded = URL_SAFE_NO_PAD
            .decode(cursor)
            .map_err(|_| CursorError::InvalidEncoding)?;

        let s = String::from_utf8(decoded).map_err(|_| CursorError::InvalidFormat)?;

        // Split on the last colon; the timestamp itself contains colons.
        let colon_pos = s.rfind(':').ok_or(CursorError::InvalidFormat)?;
        let timestamp_str = &s[..colon_pos];
        let id_str = &s[colon_pos + 1..];

        let id: i64 = id_str.parse().map_err(|_| CursorError::InvalidId)?;
        let created_at = DateTime::parse_from_rfc3339(timestamp_str)
            .map_err(|_| CursorError::InvalidTimestamp)?
            .with_timezone(&Utc);

        Ok(Self { created_at, id })
    }
}
