// src/services/api_server.rs
//! API Server for the wallet authentication service
//!
//! This module provides the REST API interface for the server-side protocol
//! roles. The protocol itself is transport-agnostic; this surface is how a
//! relying party exposes it over HTTP.
//!
//! The API is built using Axum and includes endpoints for:
//! - Login payload verification
//! - Auth token issuance from a verified login
//! - Bearer token authentication
//!
//! Every protocol failure is answered with a JSON error body and an
//! unauthenticated status; the specific error kind is logged server-side
//! only.

use crate::errors::AuthError;
use crate::models::challenge::LoginPayload;
use crate::models::claims::TokenOptions;
use crate::services::login_verifier::LoginVerifier;
use crate::services::token_authenticator::TokenAuthenticator;
use crate::services::token_issuer::TokenIssuer;
use axum::{
    extract::{Json, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

// API request and response structures

/// Request payload for verifying a login
#[derive(Serialize, Deserialize)]
struct VerifyLoginRequest {
    /// Expected domain; the server's configured domain when absent
    domain: Option<String>,
    payload: LoginPayload,
}

/// Response for a verified login
#[derive(Serialize, Deserialize)]
struct VerifyLoginResponse {
    address: String,
}

/// Request payload for issuing an auth token
#[derive(Serialize, Deserialize)]
struct GenerateTokenRequest {
    payload: LoginPayload,
}

/// Response containing a freshly issued auth token
#[derive(Serialize, Deserialize)]
struct GenerateTokenResponse {
    token: String,
}

/// Response containing the authenticated subject
#[derive(Serialize, Deserialize)]
struct AuthenticateResponse {
    address: String,
}

/// Error response for all endpoints
#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// API server state containing all protocol services
pub struct ApiServer {
    /// Domain logins and tokens are scoped to
    domain: String,

    /// Service for verifying login payloads
    login_verifier: Arc<LoginVerifier>,

    /// Service for minting auth tokens
    token_issuer: Arc<TokenIssuer>,

    /// Service for validating presented tokens
    token_authenticator: Arc<TokenAuthenticator>,
}

impl ApiServer {
    /// Creates a new instance of the API server
    ///
    /// # Arguments
    /// * `domain` - Relying-party domain served by this instance
    /// * `login_verifier` - Service for login verification
    /// * `token_issuer` - Service for token issuance
    /// * `token_authenticator` - Service for token validation
    pub fn new(
        domain: String,
        login_verifier: LoginVerifier,
        token_issuer: TokenIssuer,
        token_authenticator: TokenAuthenticator,
    ) -> Self {
        ApiServer {
            domain,
            login_verifier: Arc::new(login_verifier),
            token_issuer: Arc::new(token_issuer),
            token_authenticator: Arc::new(token_authenticator),
        }
    }

    /// Starts the API server and begins listening for requests
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (e.g., "127.0.0.1:3000")
    pub async fn run(&self, addr: SocketAddr) -> anyhow::Result<()> {
        // Configure all API routes
        let app = Router::new()
            .route("/auth/verify", post(Self::verify_login_handler))
            .route("/auth/token", post(Self::generate_token_handler))
            .route("/auth/me", get(Self::authenticate_handler))
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(self.clone()));

        let listener = tokio::net::TcpListener::bind(addr).await?;

        // Start serving requests
        axum::serve(listener, app).await?;
        Ok(())
    }

    /// Maps a protocol error to its HTTP status.
    ///
    /// Callers of the API must treat any non-200 as "not authenticated";
    /// the split below exists for diagnostics, not for partial trust.
    fn error_status(error: &AuthError) -> StatusCode {
        match error {
            AuthError::Malformed(_) | AuthError::Json(_) => StatusCode::BAD_REQUEST,
            AuthError::ForbiddenContext => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(context: &str, error: AuthError) -> Response {
        log::warn!("{} failed: {}", context, error);
        (
            Self::error_status(&error),
            Json(ErrorResponse {
                error: error.to_string(),
            }),
        )
            .into_response()
    }

    /// Verifies a signed login payload
    ///
    /// # Endpoint
    /// POST /auth/verify
    ///
    /// # Request Body
    /// JSON payload containing the signed login and an optional domain
    ///
    /// # Responses
    /// - 200 OK: Returns the proven address
    /// - 400 Bad Request: Malformed payload
    /// - 401 Unauthorized: Any protocol check failed
    async fn verify_login_handler(
        State(state): State<Arc<ApiServer>>,
        Json(request): Json<VerifyLoginRequest>,
    ) -> Response {
        let domain = request.domain.as_deref().unwrap_or(&state.domain);
        match state.login_verifier.verify(domain, &request.payload) {
            Ok(address) => (StatusCode::OK, Json(VerifyLoginResponse { address })).into_response(),
            Err(e) => ApiServer::error_response("login verification", e),
        }
    }

    /// Issues an auth token from a verified login
    ///
    /// # Endpoint
    /// POST /auth/token
    ///
    /// # Request Body
    /// JSON payload containing the signed login
    ///
    /// # Responses
    /// - 200 OK: Returns the bearer token
    /// - 401 Unauthorized: Login verification failed
    /// - 403 Forbidden: This instance holds no issuer key
    async fn generate_token_handler(
        State(state): State<Arc<ApiServer>>,
        Json(request): Json<GenerateTokenRequest>,
    ) -> Response {
        match state
            .token_issuer
            .generate_auth_token(&state.domain, &request.payload, &TokenOptions::default())
            .await
        {
            Ok(token) => (StatusCode::OK, Json(GenerateTokenResponse { token })).into_response(),
            Err(e) => ApiServer::error_response("token issuance", e),
        }
    }

    /// Authenticates a bearer token and returns its subject
    ///
    /// # Endpoint
    /// GET /auth/me
    ///
    /// # Request Headers
    /// `Authorization: Bearer <token>`
    ///
    /// # Responses
    /// - 200 OK: Returns the authenticated address
    /// - 401 Unauthorized: Missing header or any protocol check failed
    async fn authenticate_handler(
        State(state): State<Arc<ApiServer>>,
        headers: HeaderMap,
    ) -> Response {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let token = match token {
            Some(token) => token,
            None => {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "missing bearer token".to_string(),
                    }),
                )
                    .into_response()
            }
        };

        match state.token_authenticator.authenticate(&state.domain, token) {
            Ok(address) => {
                (StatusCode::OK, Json(AuthenticateResponse { address })).into_response()
            }
            Err(e) => ApiServer::error_response("token authentication", e),
        }
    }
}

// Implement Clone for ApiServer to use with Axum's State
impl Clone for ApiServer {
    fn clone(&self) -> Self {
        ApiServer {
            domain: self.domain.clone(),
            login_verifier: Arc::clone(&self.login_verifier),
            token_issuer: Arc::clone(&self.token_issuer),
            token_authenticator: Arc::clone(&self.token_authenticator),
        }
    }
}
