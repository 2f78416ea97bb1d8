// crates/inlet-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Fixtures
// Description: Minimal valid configuration builders shared across test files.
// Purpose: Keep validation tests focused on the single mutated constraint.
// =============================================================================

//! Shared fixtures for inlet-config tests.

use inlet_config::InletConfig;

/// Returns a minimal valid configuration (loopback bind, no auth).
pub fn minimal_config() -> InletConfig {
    InletConfig::default()
}
