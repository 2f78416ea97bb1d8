// crates/inlet-http/src/lib.rs
// ============================================================================
// Module: Inlet HTTP
// Description: HTTP intake transport, auth, validation, and audit for Inlet.
// Purpose: Expose message intake and log queries over a fail-closed HTTP API.
// Dependencies: axum, inlet-config, inlet-core, jsonschema, tokio
// ============================================================================

//! ## Overview
//! This crate implements the HTTP surface of Message Inlet: message
//! submission, log lookup, recent-record queries, and health probes. All
//! inbound data is untrusted; requests are decoded, authenticated, and
//! schema-validated before any record is stored. Auth decisions and request
//! outcomes are emitted as structured audit events.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod correlation;
pub mod error;
pub mod security;
pub mod server;
pub mod telemetry;
pub mod validate;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use audit::AuthAuditEvent;
pub use audit::FileAuditSink;
pub use audit::IntakeAuditEvent;
pub use audit::IntakeAuditEventParams;
pub use audit::IntakeAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use auth::AuthContext;
pub use auth::AuthError;
pub use auth::AuthMethod;
pub use auth::DefaultRequestAuthorizer;
pub use auth::RequestAuthorizer;
pub use auth::RequestContext;
pub use correlation::CLIENT_CORRELATION_HEADER;
pub use correlation::CorrelationIdRejection;
pub use correlation::IdGenerator;
pub use correlation::SERVER_CORRELATION_HEADER;
pub use error::ErrorBody;
pub use error::IntakeError;
pub use error::IntakeServerError;
pub use server::IntakeServer;
pub use telemetry::IntakeMetricEvent;
pub use telemetry::IntakeMetrics;
pub use telemetry::IntakeOperation;
pub use telemetry::IntakeOutcome;
pub use telemetry::NoopMetrics;
pub use validate::MessageValidator;
pub use validate::ValidateError;
