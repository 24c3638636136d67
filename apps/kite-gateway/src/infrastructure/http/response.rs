//! HTTP response DTOs.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};

/// Write `payload` as a JSON body with the given status.
///
/// Every JSON response, success or error, goes through here.
pub fn json_response<T: Serialize>(status: StatusCode, payload: T) -> Response {
    (status, Json(payload)).into_response()
}

/// Response from `GET /api/kite/login-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUrlResponse {
    /// URL the user visits to log in.
    pub login_url: String,
    /// Usage hint.
    pub note: String,
}

/// Response from `POST /api/kite/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Always `true` on this response.
    pub success: bool,
    /// Access token now held by the gateway.
    pub access_token: String,
    /// Brokerage user ID.
    pub user_id: String,
    /// Human-readable message.
    pub message: String,
}

/// Response from `DELETE /api/kite/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndSessionResponse {
    /// Always `true`; ending an absent session is not an error.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
}

/// API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_value(ErrorResponse {
            error: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"error": "boom"}));
    }

    #[test]
    fn session_response_shape() {
        let json = serde_json::to_value(SessionResponse {
            success: true,
            access_token: "abc".to_string(),
            user_id: "U1".to_string(),
            message: "ok".to_string(),
        })
        .unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["success"], true);
    }

    #[test]
    fn json_response_sets_status_and_content_type() {
        let response = json_response(StatusCode::UNAUTHORIZED, ErrorResponse {
            error: "nope".to_string(),
        });
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
