// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseError;

/// HTTP API error with appropriate status codes and client-friendly messages.
/// Every client-facing body is `{"error":{"message":"..."}}`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    MissingField(&'static str),
    EmptyUpdate(&'static str),
    BadRequest(String),

    // 404 Not Found
    NotFound(&'static str),

    // 500 Internal Server Error
    Database(DatabaseError),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptyUpdate(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::MissingField(field) => format!("Missing '{}' in request body", field),
            ApiError::EmptyUpdate(msg) => (*msg).to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::NotFound(msg) => (*msg).to_string(),
            ApiError::Database(_) => "An error occurred while processing your request".to_string(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": { "message": self.message() } })
    }

    pub fn missing_field(field: &'static str) -> Self {
        ApiError::MissingField(field)
    }

    pub fn empty_update(message: &'static str) -> Self {
        ApiError::EmptyUpdate(message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: &'static str) -> Self {
        ApiError::NotFound(message)
    }
}

// Store failures surface as generic 500s; the real error is logged here and
// never reaches the client.
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("database error: {}", err);
        ApiError::Database(err)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
