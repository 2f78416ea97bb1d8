// crates/inlet-http/src/telemetry.rs
// ============================================================================
// Module: Intake Telemetry
// Description: Observability hooks for intake request handling.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for intake request counters
//! and latency histograms. It is intentionally dependency-light so downstream
//! deployments can plug in Prometheus or OpenTelemetry without redesign.
//! Labels derived from client input are untrusted and must be sanitized
//! before they reach a metrics backend.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for intake request histograms.
pub const INTAKE_LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000, 30_000];

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Intake request operation classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum IntakeOperation {
    /// Message submission.
    SubmitMessage,
    /// Single-record lookup by log id.
    GetLog,
    /// Recent-record listing by business id.
    ListLogs,
    /// Liveness probe.
    Health,
    /// Readiness probe.
    Ready,
}

impl IntakeOperation {
    /// Returns a stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubmitMessage => "message/submit",
            Self::GetLog => "logs/get",
            Self::ListLogs => "logs/list",
            Self::Health => "health",
            Self::Ready => "ready",
        }
    }
}

/// Intake request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum IntakeOutcome {
    /// Successful request.
    Ok,
    /// Failed request.
    Error,
}

impl IntakeOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// Intake request metric event payload.
///
/// # Invariants
/// - Optional fields are `None` when the metadata is unavailable.
#[derive(Debug, Clone)]
pub struct IntakeMetricEvent {
    /// Request operation classification.
    pub operation: IntakeOperation,
    /// Request outcome.
    pub outcome: IntakeOutcome,
    /// HTTP status code returned to the client.
    pub http_status: u16,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Unsafe client correlation identifier when available.
    pub unsafe_client_correlation_id: Option<String>,
    /// Server-issued correlation identifier when available.
    pub server_correlation_id: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for intake requests and latencies.
pub trait IntakeMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: IntakeMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: IntakeMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl IntakeMetrics for NoopMetrics {
    fn record_request(&self, _event: IntakeMetricEvent) {}

    fn record_latency(&self, _event: IntakeMetricEvent, _latency: Duration) {}
}
