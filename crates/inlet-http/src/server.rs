// crates/inlet-http/src/server.rs
// ============================================================================
// Module: Intake Server
// Description: HTTP server wiring message intake, log queries, and probes.
// Purpose: Drive untrusted requests through decode, auth, validate, store.
// Dependencies: axum, inlet-config, inlet-core, serde_json, time, tokio
// ============================================================================

//! ## Overview
//! The intake server exposes message submission and log queries over HTTP.
//! Each request flows through a fixed pipeline: correlation handling, body
//! decode, authentication, schema validation, then storage. Any step that
//! fails short-circuits with a stable error code, and every request emits
//! one audit event plus metric observations regardless of outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use inlet_config::AuditConfig;
use inlet_config::InletConfig;
use inlet_core::BusinessId;
use inlet_core::InMemoryProcessLogStore;
use inlet_core::LogId;
use inlet_core::LogRecord;
use inlet_core::ProcessLogStore;
use inlet_core::SharedProcessLogStore;
use inlet_core::Timestamp;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::audit::AuthAuditEvent;
use crate::audit::FileAuditSink;
use crate::audit::IntakeAuditEvent;
use crate::audit::IntakeAuditEventParams;
use crate::audit::IntakeAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::auth::AuthContext;
use crate::auth::DefaultRequestAuthorizer;
use crate::auth::RequestAuthorizer;
use crate::auth::RequestContext;
use crate::correlation::CLIENT_CORRELATION_HEADER;
use crate::correlation::IdGenerator;
use crate::correlation::SERVER_CORRELATION_HEADER;
use crate::correlation::sanitize_client_correlation_id;
use crate::error::ErrorBody;
use crate::error::IntakeError;
use crate::error::IntakeServerError;
use crate::telemetry::IntakeMetricEvent;
use crate::telemetry::IntakeMetrics;
use crate::telemetry::IntakeOperation;
use crate::telemetry::IntakeOutcome;
use crate::telemetry::NoopMetrics;
use crate::validate::MessageValidator;

// ============================================================================
// SECTION: Intake Server
// ============================================================================

/// HTTP intake server instance.
pub struct IntakeServer {
    /// Validated server configuration.
    config: InletConfig,
    /// Shared process-log store.
    store: SharedProcessLogStore,
    /// Metrics sink for request observations.
    metrics: Arc<dyn IntakeMetrics>,
}

impl IntakeServer {
    /// Builds a new intake server from configuration.
    ///
    /// The store defaults to a process-local in-memory implementation; records
    /// are not shared across processes.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeServerError`] when the configuration is invalid.
    pub fn from_config(config: InletConfig) -> Result<Self, IntakeServerError> {
        config.validate().map_err(|err| IntakeServerError::Config(err.to_string()))?;
        Ok(Self {
            config,
            store: SharedProcessLogStore::from_store(InMemoryProcessLogStore::new()),
            metrics: Arc::new(NoopMetrics),
        })
    }

    /// Replaces the backing store.
    #[must_use]
    pub fn with_store(mut self, store: SharedProcessLogStore) -> Self {
        self.store = store;
        self
    }

    /// Replaces the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn IntakeMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Serves HTTP requests until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), IntakeServerError> {
        let addr: SocketAddr = self
            .config
            .server
            .bind
            .trim()
            .parse()
            .map_err(|_| IntakeServerError::Config("invalid bind address".to_string()))?;
        let audit = build_audit_sink(&self.config.server.audit)?;
        let state = Arc::new(build_server_state(&self.config, self.store, self.metrics, audit)?);
        let app = build_router(state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| IntakeServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| IntakeServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the audit sink selected by configuration.
fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn IntakeAuditSink>, IntakeServerError> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = FileAuditSink::new(std::path::Path::new(path.trim()))
                .map_err(|err| IntakeServerError::Init(err.to_string()))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Server State
// ============================================================================

/// Shared server state for request handlers.
struct ServerState {
    /// Shared process-log store.
    store: SharedProcessLogStore,
    /// Request authorizer.
    authorizer: Arc<dyn RequestAuthorizer>,
    /// Compiled message payload validator.
    validator: MessageValidator,
    /// Generator for server correlation identifiers.
    correlation_ids: IdGenerator,
    /// Generator for log identifiers.
    log_ids: IdGenerator,
    /// Metrics sink for request observations.
    metrics: Arc<dyn IntakeMetrics>,
    /// Audit sink for request and auth events.
    audit: Arc<dyn IntakeAuditSink>,
    /// Maximum accepted request body size in bytes.
    max_body_bytes: usize,
    /// Default limit for recent-records queries.
    default_list_limit: i64,
    /// Maximum accepted limit for recent-records queries.
    max_list_limit: i64,
}

/// Builds shared server state from validated configuration.
fn build_server_state(
    config: &InletConfig,
    store: SharedProcessLogStore,
    metrics: Arc<dyn IntakeMetrics>,
    audit: Arc<dyn IntakeAuditSink>,
) -> Result<ServerState, IntakeServerError> {
    let authorizer: Arc<dyn RequestAuthorizer> =
        Arc::new(DefaultRequestAuthorizer::from_config(config.server.auth.as_ref()));
    let validator =
        MessageValidator::new().map_err(|err| IntakeServerError::Init(err.to_string()))?;
    Ok(ServerState {
        store,
        authorizer,
        validator,
        correlation_ids: IdGenerator::new("req"),
        log_ids: IdGenerator::new("log"),
        metrics,
        audit,
        max_body_bytes: config.server.max_body_bytes,
        default_list_limit: config.intake.default_list_limit,
        max_list_limit: config.intake.max_list_limit,
    })
}

/// Builds the intake router over shared state.
fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/message", post(handle_submit))
        .route("/logs", get(handle_list))
        .route("/logs/{log_id}", get(handle_get))
        .route("/healthz", get(handle_health))
        .route("/readyz", get(handle_ready))
        .with_state(state)
}

// ============================================================================
// SECTION: Request Envelope
// ============================================================================

/// Per-request correlation and auth context.
struct RequestEnvelope {
    /// Auth context for this request.
    context: RequestContext,
    /// Sanitized client correlation ID (unsafe input).
    unsafe_client_id: Option<String>,
    /// Server-issued correlation ID.
    server_id: String,
}

/// Builds the request envelope and flags invalid correlation headers.
fn begin_request(
    state: &ServerState,
    peer: SocketAddr,
    headers: &HeaderMap,
) -> (RequestEnvelope, Option<IntakeError>) {
    let server_id = state.correlation_ids.issue();
    let auth_header =
        headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()).map(str::to_string);
    let context =
        RequestContext::http(Some(peer.ip()), auth_header).with_request_id(server_id.clone());
    let client_header =
        headers.get(CLIENT_CORRELATION_HEADER).and_then(|value| value.to_str().ok());
    match sanitize_client_correlation_id(client_header) {
        Ok(unsafe_client_id) => (
            RequestEnvelope {
                context,
                unsafe_client_id,
                server_id,
            },
            None,
        ),
        Err(rejection) => (
            RequestEnvelope {
                context,
                unsafe_client_id: None,
                server_id,
            },
            Some(IntakeError::InvalidRequest(format!("invalid correlation id: {rejection}"))),
        ),
    }
}

/// Successful handler outcome before serialization.
struct Handled {
    /// HTTP status for the response.
    status: StatusCode,
    /// JSON response body.
    body: Value,
    /// Log identifier produced or addressed by the request.
    log_id: Option<String>,
    /// Business identifier named by the request.
    business_id: Option<String>,
}

/// Serializes the outcome, emits audit and metrics, and builds the response.
fn complete(
    state: &ServerState,
    operation: IntakeOperation,
    envelope: &RequestEnvelope,
    started: Instant,
    request_bytes: usize,
    result: Result<Handled, IntakeError>,
) -> Response {
    let (status, body, outcome, error_kind, log_id, business_id) = match result {
        Ok(handled) => (
            handled.status,
            handled.body,
            IntakeOutcome::Ok,
            None,
            handled.log_id,
            handled.business_id,
        ),
        Err(error) => {
            let body = serde_json::to_value(ErrorBody::from_error(&error))
                .unwrap_or_else(|_| json!({ "error_code": "INTERNAL", "details": "" }));
            (error.status(), body, IntakeOutcome::Error, Some(error.kind()), None, None)
        }
    };
    let payload = serde_json::to_vec(&body).unwrap_or_else(|_| b"{}".to_vec());
    let response_bytes = payload.len();
    let event = IntakeMetricEvent {
        operation,
        outcome,
        http_status: status.as_u16(),
        error_kind,
        unsafe_client_correlation_id: envelope.unsafe_client_id.clone(),
        server_correlation_id: Some(envelope.server_id.clone()),
        request_bytes,
        response_bytes,
    };
    state.metrics.record_request(event.clone());
    state.metrics.record_latency(event, started.elapsed());
    state.audit.record(&IntakeAuditEvent::new(IntakeAuditEventParams {
        request_id: Some(envelope.server_id.clone()),
        peer_ip: envelope.context.peer_ip.map(|ip| ip.to_string()),
        operation,
        outcome,
        http_status: status.as_u16(),
        error_kind,
        log_id,
        business_id,
        request_bytes,
        response_bytes,
    }));
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&envelope.server_id) {
        headers.insert(SERVER_CORRELATION_HEADER, value);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    (status, headers, payload).into_response()
}

/// Runs the authorizer and records the auth decision.
fn authorize(
    state: &ServerState,
    ctx: &RequestContext,
    operation: IntakeOperation,
) -> Result<AuthContext, IntakeError> {
    match state.authorizer.authorize(ctx) {
        Ok(auth) => {
            state.audit.record_auth(&AuthAuditEvent::allowed(ctx, operation, &auth));
            Ok(auth)
        }
        Err(error) => {
            state.audit.record_auth(&AuthAuditEvent::denied(ctx, operation, &error));
            Err(IntakeError::Unauthorized(error.to_string()))
        }
    }
}

// ============================================================================
// SECTION: Message Submission
// ============================================================================

/// Handles message submission requests.
async fn handle_submit(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    bytes: Bytes,
) -> impl IntoResponse {
    let started = Instant::now();
    let (envelope, correlation_error) = begin_request(&state, peer, &headers);
    let result = match correlation_error {
        Some(error) => Err(error),
        None => submit_message(&state, &envelope, &bytes),
    };
    complete(&state, IntakeOperation::SubmitMessage, &envelope, started, bytes.len(), result)
}

/// Drives one submission through decode, auth, validate, and store.
fn submit_message(
    state: &ServerState,
    envelope: &RequestEnvelope,
    bytes: &Bytes,
) -> Result<Handled, IntakeError> {
    if bytes.len() > state.max_body_bytes {
        return Err(IntakeError::PayloadTooLarge(
            "request body exceeds max_body_bytes".to_string(),
        ));
    }
    let payload: Value = serde_json::from_slice(bytes.as_ref())
        .map_err(|err| IntakeError::Decode(err.to_string()))?;
    authorize(state, &envelope.context, IntakeOperation::SubmitMessage)?;
    state
        .validator
        .validate(&payload)
        .map_err(|err| IntakeError::InvalidRequest(err.to_string()))?;
    let business_id = payload
        .get("business_id")
        .and_then(Value::as_str)
        .ok_or_else(|| IntakeError::Internal("validated payload missing business_id".to_string()))?
        .to_string();
    let log_id = state.log_ids.issue();
    let timestamp = current_timestamp()?;
    let record = LogRecord::new(
        LogId::new(log_id.clone()),
        BusinessId::new(business_id.clone()),
        timestamp,
        payload,
    );
    state.store.store(record).map_err(|err| IntakeError::Internal(err.to_string()))?;
    Ok(Handled {
        status: StatusCode::CREATED,
        body: json!({ "log_id": log_id }),
        log_id: Some(log_id),
        business_id: Some(business_id),
    })
}

/// Returns the current UTC time as a whole-second RFC 3339 timestamp.
///
/// Whole seconds keep server-issued timestamps fixed-width, so raw-text
/// ordering matches time ordering for records this server creates.
fn current_timestamp() -> Result<Timestamp, IntakeError> {
    let now = OffsetDateTime::now_utc()
        .replace_nanosecond(0)
        .map_err(|err| IntakeError::Internal(err.to_string()))?;
    let text = now.format(&Rfc3339).map_err(|err| IntakeError::Internal(err.to_string()))?;
    Ok(Timestamp::new(text))
}

// ============================================================================
// SECTION: Log Queries
// ============================================================================

/// Handles single-record lookups by log id.
async fn handle_get(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(log_id): Path<String>,
) -> impl IntoResponse {
    let started = Instant::now();
    let (envelope, correlation_error) = begin_request(&state, peer, &headers);
    let result = match correlation_error {
        Some(error) => Err(error),
        None => get_log(&state, &envelope, &log_id),
    };
    complete(&state, IntakeOperation::GetLog, &envelope, started, 0, result)
}

/// Looks up one record; absence is a 404, never a panic.
fn get_log(
    state: &ServerState,
    envelope: &RequestEnvelope,
    log_id: &str,
) -> Result<Handled, IntakeError> {
    authorize(state, &envelope.context, IntakeOperation::GetLog)?;
    let log_id = log_id.trim();
    if log_id.is_empty() {
        return Err(IntakeError::InvalidRequest("log id must be non-empty".to_string()));
    }
    let record = state
        .store
        .get(&LogId::from(log_id))
        .map_err(|err| IntakeError::Internal(err.to_string()))?
        .ok_or_else(|| IntakeError::NotFound(format!("no record for log id {log_id}")))?;
    let body =
        serde_json::to_value(&record).map_err(|err| IntakeError::Internal(err.to_string()))?;
    Ok(Handled {
        status: StatusCode::OK,
        body,
        log_id: Some(log_id.to_string()),
        business_id: Some(record.business_id.as_str().to_string()),
    })
}

/// Query parameters for recent-record listings.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Business identifier to filter on.
    business_id: Option<String>,
    /// Requested record limit (raw text, parsed fail-closed).
    limit: Option<String>,
}

/// Handles recent-record listings by business id.
async fn handle_list(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let started = Instant::now();
    let (envelope, correlation_error) = begin_request(&state, peer, &headers);
    let result = match correlation_error {
        Some(error) => Err(error),
        None => list_logs(&state, &envelope, &query),
    };
    complete(&state, IntakeOperation::ListLogs, &envelope, started, 0, result)
}

/// Lists recent records for a business, newest timestamp text first.
fn list_logs(
    state: &ServerState,
    envelope: &RequestEnvelope,
    query: &ListQuery,
) -> Result<Handled, IntakeError> {
    authorize(state, &envelope.context, IntakeOperation::ListLogs)?;
    let business_id = query
        .business_id
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            IntakeError::InvalidRequest("business_id query parameter required".to_string())
        })?;
    let limit = match query.limit.as_deref().map(str::trim) {
        None => state.default_list_limit,
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| IntakeError::InvalidRequest("limit must be an integer".to_string()))?,
    };
    if limit > state.max_list_limit {
        return Err(IntakeError::InvalidRequest(format!(
            "limit exceeds max_list_limit {}",
            state.max_list_limit
        )));
    }
    let records = state
        .store
        .list_recent(&BusinessId::from(business_id), limit)
        .map_err(|err| IntakeError::Internal(err.to_string()))?;
    let records =
        serde_json::to_value(&records).map_err(|err| IntakeError::Internal(err.to_string()))?;
    let body = json!({ "records": records });
    Ok(Handled {
        status: StatusCode::OK,
        body,
        log_id: None,
        business_id: Some(business_id.to_string()),
    })
}

// ============================================================================
// SECTION: Health Checks
// ============================================================================

/// Handles liveness probes.
async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(json!({ "status": "ok" })))
}

/// Handles readiness probes against the store.
async fn handle_ready(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    match state.store.readiness() {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "status": "ready" }))),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            axum::Json(json!({ "status": "unavailable", "details": error.to_string() })),
        ),
    }
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
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only assertions and helpers are permitted."
    )]

    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::body::Bytes;
    use axum::body::to_bytes;
    use axum::extract::ConnectInfo;
    use axum::extract::Path;
    use axum::extract::Query;
    use axum::extract::State;
    use axum::http::HeaderMap;
    use axum::http::HeaderValue;
    use axum::http::StatusCode;
    use axum::http::header::AUTHORIZATION;
    use axum::response::IntoResponse;
    use axum::response::Response;
    use inlet_config::AuthConfig;
    use inlet_config::AuthMode;
    use inlet_config::InletConfig;
    use inlet_core::BusinessId;
    use inlet_core::InMemoryProcessLogStore;
    use inlet_core::LogId;
    use inlet_core::LogRecord;
    use inlet_core::ProcessLogStore;
    use inlet_core::SharedProcessLogStore;
    use inlet_core::StoreError;
    use inlet_core::Timestamp;
    use serde_json::Value;
    use serde_json::json;

    use super::ListQuery;
    use super::ServerState;
    use super::build_server_state;
    use super::handle_get;
    use super::handle_health;
    use super::handle_list;
    use super::handle_ready;
    use super::handle_submit;
    use crate::audit::NoopAuditSink;
    use crate::correlation::CLIENT_CORRELATION_HEADER;
    use crate::correlation::SERVER_CORRELATION_HEADER;
    use crate::telemetry::NoopMetrics;

    const PEER: &str = "127.0.0.1:54321";

    fn sample_state(config: &InletConfig) -> Arc<ServerState> {
        sample_state_with_store(
            config,
            SharedProcessLogStore::from_store(InMemoryProcessLogStore::new()),
        )
    }

    fn sample_state_with_store(
        config: &InletConfig,
        store: SharedProcessLogStore,
    ) -> Arc<ServerState> {
        let state =
            build_server_state(config, store, Arc::new(NoopMetrics), Arc::new(NoopAuditSink))
                .expect("server state");
        Arc::new(state)
    }

    fn bearer_config(tokens: &[&str]) -> InletConfig {
        let mut config = InletConfig::default();
        config.server.auth = Some(AuthConfig {
            mode: AuthMode::BearerToken,
            bearer_tokens: tokens.iter().map(|token| (*token).to_string()).collect(),
        });
        config
    }

    fn peer() -> ConnectInfo<SocketAddr> {
        ConnectInfo(PEER.parse().expect("peer address"))
    }

    async fn submit(state: &Arc<ServerState>, headers: HeaderMap, body: &[u8]) -> Response {
        handle_submit(
            State(Arc::clone(state)),
            peer(),
            headers,
            Bytes::copy_from_slice(body),
        )
        .await
        .into_response()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn valid_payload() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "business_id": "biz-1",
            "user_id": "user-1",
            "message": "hello"
        }))
        .expect("payload")
    }

    struct FailingStore;

    impl ProcessLogStore for FailingStore {
        fn store(&self, _record: LogRecord) -> Result<(), StoreError> {
            Err(StoreError::Store("store unavailable".to_string()))
        }

        fn get(&self, _log_id: &LogId) -> Result<Option<LogRecord>, StoreError> {
            Err(StoreError::Store("store unavailable".to_string()))
        }

        fn list_recent(
            &self,
            _business_id: &BusinessId,
            _limit: i64,
        ) -> Result<Vec<LogRecord>, StoreError> {
            Err(StoreError::Store("store unavailable".to_string()))
        }

        fn readiness(&self) -> Result<(), StoreError> {
            Err(StoreError::Store("store unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn submit_stores_record_and_returns_log_id() {
        let config = InletConfig::default();
        let store = SharedProcessLogStore::from_store(InMemoryProcessLogStore::new());
        let state = sample_state_with_store(&config, store.clone());
        let response = submit(&state, HeaderMap::new(), &valid_payload()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().contains_key(SERVER_CORRELATION_HEADER));
        let body = body_json(response).await;
        let log_id = body["log_id"].as_str().expect("log id");
        assert!(log_id.starts_with("log-"));
        let record = store
            .get(&LogId::from(log_id))
            .expect("store get")
            .expect("record stored");
        assert_eq!(record.business_id.as_str(), "biz-1");
        assert!(!record.timestamp.as_str().is_empty());
        assert_eq!(record.payload["message"], "hello");
    }

    #[tokio::test]
    async fn submit_rejects_malformed_json() {
        let state = sample_state(&InletConfig::default());
        let response = submit(&state, HeaderMap::new(), b"{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn submit_reports_all_schema_violations() {
        let state = sample_state(&InletConfig::default());
        let payload = serde_json::to_vec(&json!({ "message": 5 })).expect("payload");
        let response = submit(&state, HeaderMap::new(), &payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "INVALID_REQUEST");
        let details = body["details"].as_str().expect("details");
        assert!(details.contains("business_id"));
        assert!(details.contains("user_id"));
        assert!(details.contains("string"));
    }

    #[tokio::test]
    async fn submit_requires_bearer_token_when_configured() {
        let state = sample_state(&bearer_config(&["secret"]));
        let response = submit(&state, HeaderMap::new(), &valid_payload()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn submit_accepts_configured_bearer_token() {
        let state = sample_state(&bearer_config(&["secret"]));
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret"));
        let response = submit(&state, headers, &valid_payload()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn submit_rejects_oversized_body() {
        let mut config = InletConfig::default();
        config.server.max_body_bytes = 16;
        let state = sample_state(&config);
        let response = submit(&state, HeaderMap::new(), &valid_payload()).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn submit_rejects_invalid_correlation_header() {
        let state = sample_state(&InletConfig::default());
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_CORRELATION_HEADER, HeaderValue::from_static("bad id"));
        let response = submit(&state, headers, &valid_payload()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn submit_reports_internal_error_on_store_failure() {
        let config = InletConfig::default();
        let state =
            sample_state_with_store(&config, SharedProcessLogStore::from_store(FailingStore));
        let response = submit(&state, HeaderMap::new(), &valid_payload()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "INTERNAL");
    }

    #[tokio::test]
    async fn get_returns_stored_record() {
        let config = InletConfig::default();
        let store = SharedProcessLogStore::from_store(InMemoryProcessLogStore::new());
        store
            .store(LogRecord::new(
                LogId::from("log-a"),
                BusinessId::from("biz-1"),
                Timestamp::from("2026-01-01T00:00:00Z"),
                json!({ "message": "hi" }),
            ))
            .expect("seed record");
        let state = sample_state_with_store(&config, store);
        let response = handle_get(
            State(Arc::clone(&state)),
            peer(),
            HeaderMap::new(),
            Path("log-a".to_string()),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["log_id"], "log-a");
        assert_eq!(body["business_id"], "biz-1");
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let state = sample_state(&InletConfig::default());
        let response = handle_get(
            State(Arc::clone(&state)),
            peer(),
            HeaderMap::new(),
            Path("log-missing".to_string()),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "NOT_FOUND");
    }

    async fn list(
        state: &Arc<ServerState>,
        business_id: Option<&str>,
        limit: Option<&str>,
    ) -> Response {
        handle_list(
            State(Arc::clone(state)),
            peer(),
            HeaderMap::new(),
            Query(ListQuery {
                business_id: business_id.map(str::to_string),
                limit: limit.map(str::to_string),
            }),
        )
        .await
        .into_response()
    }

    fn seeded_store() -> SharedProcessLogStore {
        let store = SharedProcessLogStore::from_store(InMemoryProcessLogStore::new());
        let stamps = ["2026-01-01T00:00:01Z", "2026-01-01T00:00:03Z", "2026-01-01T00:00:02Z"];
        for (index, stamp) in stamps.iter().enumerate() {
            store
                .store(LogRecord::new(
                    LogId::new(format!("log-{index}")),
                    BusinessId::from("biz-1"),
                    Timestamp::from(*stamp),
                    json!({ "seq": index }),
                ))
                .expect("seed record");
        }
        store
            .store(LogRecord::new(
                LogId::from("log-other"),
                BusinessId::from("biz-2"),
                Timestamp::from("2026-01-01T00:00:09Z"),
                json!({}),
            ))
            .expect("seed record");
        store
    }

    #[tokio::test]
    async fn list_returns_matching_records_newest_first() {
        let state = sample_state_with_store(&InletConfig::default(), seeded_store());
        let response = list(&state, Some("biz-1"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let records = body["records"].as_array().expect("records");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["log_id"], "log-1");
        assert_eq!(records[1]["log_id"], "log-2");
        assert_eq!(records[2]["log_id"], "log-0");
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let state = sample_state_with_store(&InletConfig::default(), seeded_store());
        let response = list(&state, Some("biz-1"), Some("1")).await;
        let body = body_json(response).await;
        let records = body["records"].as_array().expect("records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["log_id"], "log-1");
    }

    #[tokio::test]
    async fn list_zero_or_negative_limit_is_empty() {
        let state = sample_state_with_store(&InletConfig::default(), seeded_store());
        for limit in ["0", "-5"] {
            let response = list(&state, Some("biz-1"), Some(limit)).await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["records"].as_array().expect("records").len(), 0);
        }
    }

    #[tokio::test]
    async fn list_requires_business_id() {
        let state = sample_state(&InletConfig::default());
        let response = list(&state, None, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn list_rejects_excessive_limit() {
        let state = sample_state(&InletConfig::default());
        let response = list(&state, Some("biz-1"), Some("100000")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_rejects_non_numeric_limit() {
        let state = sample_state(&InletConfig::default());
        let response = list(&state, Some("biz-1"), Some("ten")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_endpoint_ok() {
        let response = handle_health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ready_endpoint_ok() {
        let state = sample_state(&InletConfig::default());
        let response = handle_ready(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ready_endpoint_unavailable_when_store_fails() {
        let state = sample_state_with_store(
            &InletConfig::default(),
            SharedProcessLogStore::from_store(FailingStore),
        );
        let response = handle_ready(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
