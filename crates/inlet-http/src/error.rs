// crates/inlet-http/src/error.rs
// ============================================================================
// Module: Intake Errors
// Description: Request-level error kinds and wire error envelope.
// Purpose: Map intake failures to stable codes and HTTP statuses.
// Dependencies: axum, serde, thiserror
// ============================================================================

//! ## Overview
//! Every request failure is classified as an [`IntakeError`] kind with a
//! stable label for audit and telemetry. The wire envelope exposes a
//! client-facing `error_code` plus human-readable details; decode failures
//! keep their own internal kind but surface to clients as invalid requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Request Errors
// ============================================================================

/// Request-level intake errors.
///
/// # Invariants
/// - Kind labels are stable for audit and telemetry classification.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Request body could not be decoded as JSON.
    #[error("decode error: {0}")]
    Decode(String),
    /// Request was decoded but failed schema or parameter validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Caller could not be authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Request body exceeded the configured size limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    /// Internal processing failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntakeError {
    /// Returns the stable internal kind label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DECODE_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Returns the client-facing error code.
    ///
    /// Decode failures report `INVALID_REQUEST` on the wire; the distinct
    /// `DECODE_ERROR` kind is preserved for audit labels only.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) | Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the human-readable failure details.
    #[must_use]
    pub fn details(&self) -> &str {
        match self {
            Self::Decode(details)
            | Self::InvalidRequest(details)
            | Self::Unauthorized(details)
            | Self::NotFound(details)
            | Self::PayloadTooLarge(details)
            | Self::Internal(details) => details,
        }
    }
}

// ============================================================================
// SECTION: Wire Envelope
// ============================================================================

/// Error response body for intake endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable client-facing error code.
    pub error_code: &'static str,
    /// Human-readable failure details.
    pub details: String,
}

impl ErrorBody {
    /// Builds the wire envelope for an intake error.
    #[must_use]
    pub fn from_error(error: &IntakeError) -> Self {
        Self {
            error_code: error.error_code(),
            details: error.details().to_string(),
        }
    }
}

// ============================================================================
// SECTION: Server Errors
// ============================================================================

/// Server lifecycle errors.
#[derive(Debug, Error)]
pub enum IntakeServerError {
    /// Invalid server configuration.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization failure.
    #[error("init error: {0}")]
    Init(String),
    /// Transport-level failure.
    #[error("transport error: {0}")]
    Transport(String),
}
