// crates/inlet-http/src/auth.rs
// ============================================================================
// Module: Intake Authentication
// Description: Authentication enforcement for inbound intake requests.
// Purpose: Provide strict, fail-closed auth policies for the HTTP surface.
// Dependencies: inlet-config, inlet-core, subtle, thiserror
// ============================================================================

//! ## Overview
//! This module defines the authentication seam for intake requests and the
//! default policies for local-only and bearer token enforcement. Decisions
//! are fail-closed: a request that cannot be positively authenticated is
//! rejected. Bearer tokens are compared in constant time and only their
//! hashed fingerprints ever reach audit output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::IpAddr;

use inlet_config::AuthConfig;
use inlet_config::AuthMode;
use inlet_core::HashAlgorithm;
use inlet_core::hash_bytes;
use thiserror::Error;

use crate::security::constant_time_eq_str;

// ============================================================================
// SECTION: Constants
// ============================================================================

const MAX_AUTH_HEADER_BYTES: usize = 8 * 1024;

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Per-request context used for auth decisions.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Peer IP address when available.
    pub peer_ip: Option<IpAddr>,
    /// Authorization header value.
    pub auth_header: Option<String>,
    /// Optional request identifier for auditing.
    pub request_id: Option<String>,
}

impl RequestContext {
    /// Builds an HTTP request context.
    #[must_use]
    pub const fn http(peer_ip: Option<IpAddr>, auth_header: Option<String>) -> Self {
        Self {
            peer_ip,
            auth_header,
            request_id: None,
        }
    }

    /// Returns a copy with the request identifier set.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Returns true when the peer IP is loopback.
    #[must_use]
    pub fn peer_is_loopback(&self) -> bool {
        self.peer_ip.is_some_and(|ip| ip.is_loopback())
    }
}

// ============================================================================
// SECTION: Auth Context
// ============================================================================

/// Authenticated caller context.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authentication method.
    pub method: AuthMethod,
    /// Optional subject identifier.
    pub subject: Option<String>,
    /// Token fingerprint for bearer auth (hashed).
    pub token_fingerprint: Option<String>,
}

impl AuthContext {
    /// Returns a stable label for the authentication method.
    #[must_use]
    pub const fn method_label(&self) -> &'static str {
        match self.method {
            AuthMethod::Local => "local",
            AuthMethod::BearerToken => "bearer_token",
        }
    }
}

/// Authentication method used for the request.
#[derive(Debug, Clone, Copy)]
pub enum AuthMethod {
    /// Local-only loopback access.
    Local,
    /// Bearer token authentication.
    BearerToken,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authentication or authorization errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or invalid authentication.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    /// Caller is authenticated but not authorized.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Authn interface for intake requests.
pub trait RequestAuthorizer: Send + Sync {
    /// Authorize a request. Returns an authenticated context on success.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the caller cannot be authenticated.
    fn authorize(&self, ctx: &RequestContext) -> Result<AuthContext, AuthError>;
}

// ============================================================================
// SECTION: Default Policy
// ============================================================================

/// Default authorizer derived from server config.
pub struct DefaultRequestAuthorizer {
    /// Configured auth mode.
    mode: AuthMode,
    /// Accepted bearer tokens.
    bearer_tokens: Vec<String>,
}

impl DefaultRequestAuthorizer {
    /// Builds a default auth policy from server auth configuration.
    #[must_use]
    pub fn from_config(config: Option<&AuthConfig>) -> Self {
        let mode = config.map_or(AuthMode::LocalOnly, |cfg| cfg.mode);
        let bearer_tokens = config.map(|cfg| cfg.bearer_tokens.clone()).unwrap_or_default();
        Self {
            mode,
            bearer_tokens,
        }
    }

    /// Returns the configured auth mode.
    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }
}

impl RequestAuthorizer for DefaultRequestAuthorizer {
    fn authorize(&self, ctx: &RequestContext) -> Result<AuthContext, AuthError> {
        match self.mode {
            AuthMode::LocalOnly => authorize_local_only(ctx),
            AuthMode::BearerToken => authorize_bearer(ctx, &self.bearer_tokens),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn authorize_local_only(ctx: &RequestContext) -> Result<AuthContext, AuthError> {
    if ctx.peer_is_loopback() {
        Ok(AuthContext {
            method: AuthMethod::Local,
            subject: Some("loopback".to_string()),
            token_fingerprint: None,
        })
    } else {
        Err(AuthError::Unauthenticated("local-only mode requires loopback access".to_string()))
    }
}

fn authorize_bearer(ctx: &RequestContext, tokens: &[String]) -> Result<AuthContext, AuthError> {
    let token = parse_bearer_token(ctx.auth_header.as_deref())?;
    // Every configured token is compared so timing does not reveal a match.
    let mut matched = false;
    for candidate in tokens {
        matched |= constant_time_eq_str(candidate, &token);
    }
    if !matched {
        return Err(AuthError::Unauthenticated("invalid bearer token".to_string()));
    }
    let digest = hash_bytes(HashAlgorithm::Sha256, token.as_bytes());
    Ok(AuthContext {
        method: AuthMethod::BearerToken,
        subject: None,
        token_fingerprint: Some(digest.value),
    })
}

fn parse_bearer_token(auth_header: Option<&str>) -> Result<String, AuthError> {
    let header = auth_header
        .ok_or_else(|| AuthError::Unauthenticated("missing authorization".to_string()))?;
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(AuthError::Unauthenticated("authorization header too large".to_string()));
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::Unauthenticated("invalid authorization header".to_string()));
    }
    Ok(token.to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions and helpers are permitted."
    )]

    use std::net::IpAddr;
    use std::net::Ipv4Addr;

    use inlet_config::AuthConfig;
    use inlet_config::AuthMode;

    use super::AuthError;
    use super::DefaultRequestAuthorizer;
    use super::RequestAuthorizer;
    use super::RequestContext;

    fn loopback_ctx(auth_header: Option<&str>) -> RequestContext {
        RequestContext::http(
            Some(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            auth_header.map(str::to_string),
        )
    }

    fn remote_ctx(auth_header: Option<&str>) -> RequestContext {
        RequestContext::http(
            Some(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9))),
            auth_header.map(str::to_string),
        )
    }

    fn bearer_authorizer(tokens: &[&str]) -> DefaultRequestAuthorizer {
        DefaultRequestAuthorizer::from_config(Some(&AuthConfig {
            mode: AuthMode::BearerToken,
            bearer_tokens: tokens.iter().map(|token| (*token).to_string()).collect(),
        }))
    }

    #[test]
    fn local_only_allows_loopback_peer() {
        let authorizer = DefaultRequestAuthorizer::from_config(None);
        let auth = authorizer.authorize(&loopback_ctx(None)).expect("loopback allowed");
        assert_eq!(auth.subject.as_deref(), Some("loopback"));
        assert!(auth.token_fingerprint.is_none());
    }

    #[test]
    fn local_only_rejects_remote_peer() {
        let authorizer = DefaultRequestAuthorizer::from_config(None);
        let error = authorizer.authorize(&remote_ctx(None)).expect_err("remote denied");
        assert!(matches!(error, AuthError::Unauthenticated(_)));
    }

    #[test]
    fn bearer_accepts_configured_token() {
        let authorizer = bearer_authorizer(&["alpha", "beta"]);
        let auth =
            authorizer.authorize(&remote_ctx(Some("Bearer beta"))).expect("token accepted");
        assert!(auth.token_fingerprint.is_some());
        assert!(auth.subject.is_none());
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let authorizer = bearer_authorizer(&["alpha"]);
        authorizer.authorize(&remote_ctx(Some("bearer alpha"))).expect("token accepted");
    }

    #[test]
    fn bearer_rejects_unknown_token() {
        let authorizer = bearer_authorizer(&["alpha"]);
        let error =
            authorizer.authorize(&remote_ctx(Some("Bearer gamma"))).expect_err("denied");
        assert!(matches!(error, AuthError::Unauthenticated(_)));
    }

    #[test]
    fn bearer_rejects_missing_header() {
        let authorizer = bearer_authorizer(&["alpha"]);
        let error = authorizer.authorize(&remote_ctx(None)).expect_err("denied");
        assert!(matches!(error, AuthError::Unauthenticated(_)));
    }

    #[test]
    fn bearer_rejects_malformed_header() {
        let authorizer = bearer_authorizer(&["alpha"]);
        let error =
            authorizer.authorize(&remote_ctx(Some("Token alpha"))).expect_err("denied");
        assert!(matches!(error, AuthError::Unauthenticated(_)));
    }

    #[test]
    fn bearer_rejects_oversized_header() {
        let authorizer = bearer_authorizer(&["alpha"]);
        let header = format!("Bearer {}", "a".repeat(9 * 1024));
        let error =
            authorizer.authorize(&remote_ctx(Some(&header))).expect_err("denied");
        assert!(matches!(error, AuthError::Unauthenticated(_)));
    }

    #[test]
    fn bearer_fingerprint_does_not_leak_token() {
        let authorizer = bearer_authorizer(&["alpha"]);
        let auth =
            authorizer.authorize(&remote_ctx(Some("Bearer alpha"))).expect("token accepted");
        let fingerprint = auth.token_fingerprint.expect("fingerprint");
        assert_ne!(fingerprint, "alpha");
        assert!(!fingerprint.contains("alpha"));
    }
}
