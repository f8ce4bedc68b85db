//! Fintrack Web Server
//!
//! Axum-based REST API for the fintrack personal finance backend.
//!
//! Security features:
//! - Access-proxy header or API key authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Every record and report is scoped to the authenticated user
//! - Full audit logging for all API access (reads and writes)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use fintrack_core::db::Database;

mod handlers;

/// Maximum request body size for JSON payloads (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Identity used when authentication is disabled
pub const LOCAL_DEV_USER: &str = "local-dev";

/// Header set by an upstream access proxy with the authenticated user's email
const ACCESS_USER_HEADER: &str = "cf-access-authenticated-user-email";

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Environment variable holding `user=key` pairs
pub const API_KEYS_ENV: &str = "FINTRACK_API_KEYS";

/// Environment variable holding allowed CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "FINTRACK_ALLOWED_ORIGINS";

/// An API key and the user it authenticates as
#[derive(Clone, Debug)]
pub struct ApiKey {
    pub user: String,
    pub key: String,
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys for service authentication ("Authorization: Bearer <key>")
    pub api_keys: Vec<ApiKey>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

impl ServerConfig {
    /// Read API keys and CORS origins from the environment
    pub fn from_env(require_auth: bool) -> Self {
        Self {
            require_auth,
            allowed_origins: parse_list(&std::env::var(ALLOWED_ORIGINS_ENV).unwrap_or_default()),
            api_keys: parse_api_keys(&std::env::var(API_KEYS_ENV).unwrap_or_default()),
        }
    }
}

fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a comma-separated list of `user=key` pairs
///
/// Entries without a user or a key are skipped with a warning.
pub fn parse_api_keys(input: &str) -> Vec<ApiKey> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|entry| match entry.split_once('=') {
            Some((user, key)) if !user.trim().is_empty() && !key.trim().is_empty() => {
                Some(ApiKey {
                    user: user.trim().to_string(),
                    key: key.trim().to_string(),
                })
            }
            _ => {
                warn!("Ignoring malformed API key entry (expected user=key)");
                None
            }
        })
        .collect()
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

/// How a request was authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    AccessHeader,
    ApiKey,
    None,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessHeader => "access_header",
            Self::ApiKey => "api_key",
            Self::None => "none",
        }
    }
}

/// Resolve the caller's identity from request headers
///
/// Checks the access-proxy header first, then a bearer API key. Returns `None`
/// when neither identifies a user.
fn authenticate(headers: &HeaderMap, config: &ServerConfig) -> Option<(String, AuthMethod)> {
    let header_user = headers
        .get(ACCESS_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());

    if let Some(email) = header_user {
        return Some((email.to_string(), AuthMethod::AccessHeader));
    }

    headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .and_then(|key| match_api_key(key.trim(), &config.api_keys))
        .map(|user| (user.to_string(), AuthMethod::ApiKey))
}

/// Find the user owning `provided` using constant-time comparison
fn match_api_key<'a>(provided: &str, keys: &'a [ApiKey]) -> Option<&'a str> {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();
    let mut found = None;

    for entry in keys {
        let key_bytes = entry.key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        if provided_bytes.len() == key_bytes.len()
            && bool::from(provided_bytes.ct_eq(key_bytes))
            && found.is_none()
        {
            found = Some(entry.user.as_str());
        }
    }
    found
}

/// Identity the handlers scope data to, with how it was established
///
/// With authentication disabled, an access-proxy header is still honoured and
/// everyone else is `local-dev`.
pub fn get_user_with_method(headers: &HeaderMap, config: &ServerConfig) -> (String, AuthMethod) {
    authenticate(headers, config).unwrap_or_else(|| (LOCAL_DEV_USER.to_string(), AuthMethod::None))
}

/// Owner for the current request (for data scoping and audit logging)
pub fn get_user(headers: &HeaderMap, config: &ServerConfig) -> String {
    get_user_with_method(headers, config).0
}

/// Authentication middleware - accepts the access-proxy header or an API key
///
/// The access header is only safe behind a proxy that strips it from
/// client requests. API keys are compared in constant time.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    match authenticate(request.headers(), &state.config) {
        Some((user, method)) => {
            info!(
                user = %user,
                method = method.as_str(),
                path = %request.uri().path(),
                "Authenticated request"
            );
            next.run(request).await
        }
        None => {
            warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
            AppError::unauthorized("Authentication required").into_response()
        }
    }
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    let api_routes = Router::new()
        // Auth
        .route("/me", get(handlers::get_me))
        // Categories
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/categories/:id", delete(handlers::delete_category))
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/transactions/:id", delete(handlers::delete_transaction))
        // Analytics
        .route(
            "/analytics/monthly-summary",
            get(handlers::monthly_summary),
        )
        .route(
            "/analytics/category-analysis",
            get(handlers::category_analysis),
        )
        .route(
            "/analytics/spending-anomalies",
            get(handlers::spending_anomalies),
        )
        // Audit log
        .route("/audit", get(handlers::list_audit_log));

    // CORS: only explicitly allowed origins
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(db, host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<fintrack_core::Error> for AppError {
    fn from(err: fintrack_core::Error) -> Self {
        match err {
            fintrack_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            fintrack_core::Error::NotFound(msg) => Self::not_found(&format!("Not found: {}", msg)),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(other.into()),
            },
        }
    }
}
