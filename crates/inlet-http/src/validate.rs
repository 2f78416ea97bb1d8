// crates/inlet-http/src/validate.rs
// ============================================================================
// Module: Message Payload Validation
// Description: JSON Schema validation for inbound message payloads.
// Purpose: Reject malformed payloads with every violation reported at once.
// Dependencies: jsonschema, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Inbound message payloads are validated against a fixed JSON Schema that
//! requires `business_id`, `user_id`, and `message` string fields. Validation
//! collects every violation rather than stopping at the first, so a caller
//! can fix a payload in one round trip. Validation has no side effects; the
//! payload is never mutated or defaulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Message validation errors.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The message schema itself failed to compile.
    #[error("invalid message schema: {0}")]
    Schema(String),
    /// The payload violated the message schema.
    #[error("{0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Compiled validator for inbound message payloads.
///
/// # Invariants
/// - The compiled schema is immutable for the validator's lifetime.
/// - Validation never mutates the payload under inspection.
pub struct MessageValidator {
    /// Compiled message schema.
    schema: Validator,
}

impl MessageValidator {
    /// Compiles the message schema.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::Schema`] when the schema cannot be compiled.
    pub fn new() -> Result<Self, ValidateError> {
        let schema = compile_schema(&message_schema())?;
        Ok(Self {
            schema,
        })
    }

    /// Validates a message payload, reporting every violation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::Invalid`] with all violations joined by
    /// `"; "` when the payload does not conform to the message schema.
    pub fn validate(&self, payload: &Value) -> Result<(), ValidateError> {
        let messages: Vec<String> =
            self.schema.iter_errors(payload).map(|err| err.to_string()).collect();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(ValidateError::Invalid(messages.join("; ")))
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the message payload schema.
fn message_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": {
            "business_id": { "type": "string" },
            "user_id": { "type": "string" },
            "message": { "type": "string" }
        },
        "required": ["business_id", "user_id", "message"]
    })
}

/// Compiles a JSON schema for validation.
fn compile_schema(schema: &Value) -> Result<Validator, ValidateError> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| ValidateError::Schema(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
