// crates/inlet-http/src/audit.rs
// ============================================================================
// Module: Intake Audit Logging
// Description: Structured audit events for intake request handling.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for intake request
//! logging. Events are JSON lines routed to stderr or a file; payload bodies
//! are never logged, only identifiers, sizes, and outcome labels. Bearer
//! tokens appear exclusively as hashed fingerprints.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::auth::AuthContext;
use crate::auth::AuthError;
use crate::auth::RequestContext;
use crate::telemetry::IntakeOperation;
use crate::telemetry::IntakeOutcome;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Intake request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Request operation classification.
    pub operation: IntakeOperation,
    /// Request outcome.
    pub outcome: IntakeOutcome,
    /// HTTP status code returned to the client.
    pub http_status: u16,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Log identifier when the request produced or addressed one.
    pub log_id: Option<String>,
    /// Business identifier when present in the request.
    pub business_id: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

/// Inputs required to construct an intake audit event.
pub struct IntakeAuditEventParams {
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Peer IP address if known.
    pub peer_ip: Option<String>,
    /// Request operation classification.
    pub operation: IntakeOperation,
    /// Request outcome.
    pub outcome: IntakeOutcome,
    /// HTTP status code returned to the client.
    pub http_status: u16,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Log identifier when the request produced or addressed one.
    pub log_id: Option<String>,
    /// Business identifier when present in the request.
    pub business_id: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

impl IntakeAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: IntakeAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "intake_request",
            timestamp_ms,
            request_id: params.request_id,
            peer_ip: params.peer_ip,
            operation: params.operation,
            outcome: params.outcome,
            http_status: params.http_status,
            error_kind: params.error_kind,
            log_id: params.log_id,
            business_id: params.business_id,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

/// Auth decision audit event payload.
#[derive(Debug, Serialize)]
pub struct AuthAuditEvent {
    /// Event identifier.
    event: &'static str,
    /// Decision outcome.
    decision: &'static str,
    /// Intake operation label.
    action: &'static str,
    /// Caller IP address (if available).
    peer_ip: Option<String>,
    /// Auth method label.
    auth_method: Option<&'static str>,
    /// Caller subject or identity label.
    subject: Option<String>,
    /// Bearer token fingerprint (sha256).
    token_fingerprint: Option<String>,
    /// Failure reason (for deny events).
    reason: Option<String>,
    /// Request identifier (if provided).
    request_id: Option<String>,
}

impl AuthAuditEvent {
    /// Builds an allow event.
    #[must_use]
    pub fn allowed(ctx: &RequestContext, operation: IntakeOperation, auth: &AuthContext) -> Self {
        Self {
            event: "intake_authz",
            decision: "allow",
            action: operation.as_str(),
            peer_ip: ctx.peer_ip.map(|ip| ip.to_string()),
            auth_method: Some(auth.method_label()),
            subject: auth.subject.clone(),
            token_fingerprint: auth.token_fingerprint.clone(),
            reason: None,
            request_id: ctx.request_id.clone(),
        }
    }

    /// Builds a deny event.
    #[must_use]
    pub fn denied(ctx: &RequestContext, operation: IntakeOperation, error: &AuthError) -> Self {
        Self {
            event: "intake_authz",
            decision: "deny",
            action: operation.as_str(),
            peer_ip: ctx.peer_ip.map(|ip| ip.to_string()),
            auth_method: None,
            subject: None,
            token_fingerprint: None,
            reason: Some(error.to_string()),
            request_id: ctx.request_id.clone(),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for intake request events.
pub trait IntakeAuditSink: Send + Sync {
    /// Record a request audit event.
    fn record(&self, event: &IntakeAuditEvent);

    /// Record an auth decision audit event.
    fn record_auth(&self, _event: &AuthAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl IntakeAuditSink for StderrAuditSink {
    fn record(&self, event: &IntakeAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_auth(&self, event: &AuthAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl IntakeAuditSink for FileAuditSink {
    fn record(&self, event: &IntakeAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }

    fn record_auth(&self, event: &AuthAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl IntakeAuditSink for NoopAuditSink {
    fn record(&self, _event: &IntakeAuditEvent) {}

    fn record_auth(&self, _event: &AuthAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
