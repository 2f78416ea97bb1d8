// crates/inlet-core/src/lib.rs
// ============================================================================
// Module: Inlet Core
// Description: Domain types and the process-log store for Message Inlet.
// Purpose: Provide strongly typed records and an injectable in-memory store.
// Dependencies: serde, serde_json, sha2, thiserror
// ============================================================================

//! ## Overview
//! Inlet Core defines the domain model for the message-intake service:
//! opaque identifiers, the process-log record, and the [`ProcessLogStore`]
//! seam with its in-memory implementation. The store is constructed once at
//! process start and injected by handle; there is no hidden global state.
//!
//! The in-memory store is scoped to a single process. It does not generalize
//! to multi-worker or multi-process deployments; substituting an externally
//! shared store behind [`ProcessLogStore`] is the supported path for that.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod hashing;
pub mod identifiers;
pub mod record;
pub mod store;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::hash_bytes;
pub use identifiers::BusinessId;
pub use identifiers::LogId;
pub use identifiers::UserId;
pub use record::LogRecord;
pub use record::Timestamp;
pub use store::InMemoryProcessLogStore;
pub use store::ProcessLogStore;
pub use store::SharedProcessLogStore;
pub use store::StoreError;
