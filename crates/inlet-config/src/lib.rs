// crates/inlet-config/src/lib.rs
// ============================================================================
// Module: Inlet Config
// Description: Canonical configuration model and validation for Message Inlet.
// Purpose: Load, validate, and expose fail-closed server configuration.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! This crate defines the canonical configuration model for the intake
//! server. Configuration is loaded from TOML and validated fail-closed:
//! every constraint violation is a hard error, and permissive combinations
//! (such as a non-loopback bind without an auth policy) are rejected.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod config;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use config::AuditConfig;
pub use config::AuthConfig;
pub use config::AuthMode;
pub use config::ConfigError;
pub use config::InletConfig;
pub use config::IntakeConfig;
pub use config::ServerConfig;
