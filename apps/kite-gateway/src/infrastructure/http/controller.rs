//! HTTP Controller (Driver Adapter)
//!
//! Axum routes that delegate to the session gateway.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::application::{
    BrokeragePort, GatewayError, LOGIN_URL_NOTE, SESSION_CREATED_MESSAGE, SessionGateway,
};
use crate::infrastructure::metrics::get_metrics_handle;

use super::middleware::log_request;
use super::request::CreateSessionQuery;
use super::response::{
    EndSessionResponse, ErrorResponse, LoginUrlResponse, SessionResponse, json_response,
};

/// Application state shared across handlers.
pub struct AppState<B>
where
    B: BrokeragePort,
{
    /// Session gateway.
    pub gateway: Arc<SessionGateway<B>>,
}

impl<B> AppState<B>
where
    B: BrokeragePort,
{
    /// Wrap a gateway for the router.
    pub fn new(gateway: SessionGateway<B>) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

impl<B> Clone for AppState<B>
where
    B: BrokeragePort,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<B>(state: AppState<B>) -> Router
where
    B: BrokeragePort + 'static,
{
    Router::new()
        .route("/api/hc", get(health_check))
        .route("/api/kite/login-url", get(login_url::<B>))
        .route(
            "/api/kite/session",
            post(create_session::<B>).delete(end_session::<B>),
        )
        .route("/api/kite/mf/holdings", get(mf_holdings::<B>))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Login URL endpoint.
async fn login_url<B>(State(state): State<AppState<B>>) -> Response
where
    B: BrokeragePort,
{
    json_response(
        StatusCode::OK,
        LoginUrlResponse {
            login_url: state.gateway.issue_login_url(),
            note: LOGIN_URL_NOTE.to_string(),
        },
    )
}

/// Token exchange endpoint.
///
/// The query is read as raw pairs so repeated or unknown keys never
/// produce an extractor rejection.
async fn create_session<B>(
    State(state): State<AppState<B>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError>
where
    B: BrokeragePort,
{
    let query = CreateSessionQuery::from_pairs(pairs);
    let grant = state.gateway.create_session(query.request_token()).await?;

    Ok(json_response(
        StatusCode::OK,
        SessionResponse {
            success: true,
            access_token: grant.access_token,
            user_id: grant.user_id,
            message: SESSION_CREATED_MESSAGE.to_string(),
        },
    ))
}

/// Logout endpoint.
async fn end_session<B>(State(state): State<AppState<B>>) -> Response
where
    B: BrokeragePort,
{
    let ended = state.gateway.end_session().await;

    let message = if ended {
        "Session ended"
    } else {
        "No active session to end"
    };
    json_response(
        StatusCode::OK,
        EndSessionResponse {
            success: true,
            message: message.to_string(),
        },
    )
}

/// Mutual fund holdings endpoint.
async fn mf_holdings<B>(State(state): State<AppState<B>>) -> Result<Response, ApiError>
where
    B: BrokeragePort,
{
    let holdings = state.gateway.get_holdings().await?;
    Ok(json_response(StatusCode::OK, holdings))
}

/// Prometheus scrape endpoint.
async fn metrics_handler() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                handle.render(),
            )
        },
    )
}

/// API error wrapper mapping gateway errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(GatewayError);

impl ApiError {
    /// HTTP status for the wrapped error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.0 {
            GatewayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamAuthFailure(_) | GatewayError::NoActiveSession => {
                StatusCode::UNAUTHORIZED
            }
            GatewayError::UpstreamRequestFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(code = self.0.code(), error = %self.0, "Request failed");
        json_response(
            self.status(),
            ErrorResponse {
                error: self.0.to_string(),
            },
        )
    }
}
