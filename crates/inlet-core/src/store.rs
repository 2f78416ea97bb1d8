// crates/inlet-core/src/store.rs
// ============================================================================
// Module: Inlet Process-Log Store
// Description: Store seam and in-memory implementation for process logs.
// Purpose: Provide mutex-serialized insert, lookup, and recent-record queries.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This module defines the [`ProcessLogStore`] seam and the in-memory
//! implementation used by the intake server. All operations are serialized
//! by a single mutex over the backing map; no blocking I/O occurs inside the
//! store and every operation completes in bounded time.
//!
//! The in-memory implementation holds records for the lifetime of the
//! process only. It is not shared across processes; a multi-worker
//! deployment needs an external store behind the same trait.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use thiserror::Error;

use crate::identifiers::BusinessId;
use crate::identifiers::LogId;
use crate::record::LogRecord;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by process-log store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend failure (for the in-memory store, lock poisoning).
    #[error("store failure: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Store Trait
// ============================================================================

/// Storage seam for process-log records.
///
/// Implementations must serialize concurrent access; callers hold a shared
/// handle and invoke these methods from any number of request handlers.
pub trait ProcessLogStore: Send + Sync {
    /// Inserts or overwrites the record under its `log_id` (last-write-wins).
    ///
    /// Record content never causes an error; validation is the caller's
    /// responsibility, not the store's.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only on storage infrastructure failure.
    fn store(&self, record: LogRecord) -> Result<(), StoreError>;

    /// Returns the record stored under `log_id`, or `None` when absent.
    ///
    /// A missing key is not an error; absence is an explicit value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only on storage infrastructure failure.
    fn get(&self, log_id: &LogId) -> Result<Option<LogRecord>, StoreError>;

    /// Returns up to `limit` records for `business_id`, most recent first.
    ///
    /// Ordering is descending lexicographic comparison of the raw timestamp
    /// text. Ties have unspecified relative order. A `limit` of zero or less
    /// yields an empty sequence. The result is a new owned sequence; the
    /// store is never mutated by this call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only on storage infrastructure failure.
    fn list_recent(
        &self,
        business_id: &BusinessId,
        limit: i64,
    ) -> Result<Vec<LogRecord>, StoreError>;

    /// Readiness probe for the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot answer queries.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory process-log store.
///
/// # Invariants
/// - Records live until process shutdown; there is no TTL or eviction.
/// - All access is serialized through one mutex.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProcessLogStore {
    /// Record map protected by a mutex, keyed by log id.
    records: Arc<Mutex<BTreeMap<String, LogRecord>>>,
}

impl InMemoryProcessLogStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Store("process log store mutex poisoned".to_string()))?;
        Ok(guard.len())
    }

    /// Returns true when the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ProcessLogStore for InMemoryProcessLogStore {
    fn store(&self, record: LogRecord) -> Result<(), StoreError> {
        let key = record.log_id.as_str().to_string();
        self.records
            .lock()
            .map_err(|_| StoreError::Store("process log store mutex poisoned".to_string()))?
            .insert(key, record);
        Ok(())
    }

    fn get(&self, log_id: &LogId) -> Result<Option<LogRecord>, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Store("process log store mutex poisoned".to_string()))?;
        Ok(guard.get(log_id.as_str()).cloned())
    }

    fn list_recent(
        &self,
        business_id: &BusinessId,
        limit: i64,
    ) -> Result<Vec<LogRecord>, StoreError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let mut records: Vec<LogRecord> = {
            let guard = self
                .records
                .lock()
                .map_err(|_| StoreError::Store("process log store mutex poisoned".to_string()))?;
            guard.values().filter(|record| record.business_id == *business_id).cloned().collect()
        };
        // Descending raw-text comparison; timestamps are never parsed.
        records.sort_by(|a, b| b.timestamp.as_str().cmp(a.timestamp.as_str()));
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        records.truncate(take);
        Ok(records)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.len().map(|_| ())
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared process-log store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedProcessLogStore {
    /// Inner store implementation.
    inner: Arc<dyn ProcessLogStore + Send + Sync>,
}

impl SharedProcessLogStore {
    /// Wraps a process-log store in a shared, clonable handle.
    #[must_use]
    pub fn from_store(store: impl ProcessLogStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn ProcessLogStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl ProcessLogStore for SharedProcessLogStore {
    fn store(&self, record: LogRecord) -> Result<(), StoreError> {
        self.inner.store(record)
    }

    fn get(&self, log_id: &LogId) -> Result<Option<LogRecord>, StoreError> {
        self.inner.get(log_id)
    }

    fn list_recent(
        &self,
        business_id: &BusinessId,
        limit: i64,
    ) -> Result<Vec<LogRecord>, StoreError> {
        self.inner.list_recent(business_id, limit)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.inner.readiness()
    }
}
