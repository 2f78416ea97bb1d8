// crates/inlet-core/src/record.rs
// ============================================================================
// Module: Inlet Process-Log Record
// Description: Timestamp and record types captured for each processed message.
// Purpose: Model log records with caller-supplied time and open payloads.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`LogRecord`] captures the outcome and metadata of one processed
//! message. Timestamps are caller-supplied opaque text (ISO-8601 expected);
//! this crate never reads the wall clock, which keeps ordering deterministic
//! and replayable in tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::identifiers::BusinessId;
use crate::identifiers::LogId;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Opaque record timestamp.
///
/// # Invariants
/// - Stored as raw text; never parsed by this crate.
/// - Ordering is lexicographic over the underlying string, not chronological.
///   Timestamps that are not consistently zero-padded ISO-8601 will not sort
///   in time order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Creates a timestamp from raw text.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the timestamp as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// SECTION: Log Record
// ============================================================================

/// Process-log record keyed by an opaque log identifier.
///
/// # Invariants
/// - `log_id` uniqueness is the caller's responsibility; storing a record
///   under an existing id overwrites the previous record.
/// - Records are immutable once stored except by full overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Opaque unique record identifier, assigned before insertion.
    pub log_id: LogId,
    /// Owning tenant identifier; not unique across records.
    pub business_id: BusinessId,
    /// Caller-supplied timestamp text (ISO-8601 expected, stored opaque).
    pub timestamp: Timestamp,
    /// Open-ended attributes captured at insertion time.
    pub payload: Value,
}

impl LogRecord {
    /// Builds a new log record.
    #[must_use]
    pub const fn new(
        log_id: LogId,
        business_id: BusinessId,
        timestamp: Timestamp,
        payload: Value,
    ) -> Self {
        Self {
            log_id,
            business_id,
            timestamp,
            payload,
        }
    }
}
