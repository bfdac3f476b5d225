//! Application error type and its HTTP mapping.
//!
//! Every failure on the request path is an [`AppError`]. Handlers return
//! `Result<_, AppError>` and the [`IntoResponse`] impl renders the common
//! JSON error envelope:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "validation_error",
//!     "message": "Invalid request body",
//!     "details": { "name": ["This field may not be blank."] }
//!   }
//! }
//! ```
//!
//! For validation failures `details` is a field-level message map
//! (`field -> [messages]`) so clients can redisplay forms.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload rendered inside the `error` envelope.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Validation failure on a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::bad_request(
            "Invalid request body",
            json!({ field: [message.into()] }),
        )
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Splits the error into status code and serializable payload.
    pub fn to_error_info(&self) -> (StatusCode, ErrorInfo) {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        (
            status,
            ErrorInfo {
                code,
                message: message.clone(),
                details: details.clone(),
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message, details } = &self {
            tracing::error!(%message, %details, "Request failed with internal error");
        }

        let (status, error) = self.to_error_info();
        let body = Json(ErrorBody { error });

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Maps a database error into an [`AppError`].
///
/// A unique violation on the category name means a concurrent insert won
/// the race after the service-level check; it is reported like the check
/// would have reported it.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
        && db.constraint() == Some("categories_name_key")
    {
        return AppError::field("name", "category with this name already exists.");
    }

    tracing::error!(error = %e, "Database error");
    AppError::internal("Database error", json!({}))
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request("Invalid request body", field_messages(&errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Malformed JSON body",
            json!({ "non_field_errors": [rejection.body_text()] }),
        )
    }
}

/// Flattens `validator` errors into `{ field: [message, ...] }`.
fn field_messages(errors: &ValidationErrors) -> Value {
    let mut map = Map::new();

    for (field, kind) in errors.errors() {
        let messages: Vec<Value> = match kind {
            ValidationErrorsKind::Field(list) => list
                .iter()
                .map(|e| {
                    let text = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    Value::String(text)
                })
                .collect(),
            ValidationErrorsKind::Struct(nested) => vec![field_messages(nested)],
            ValidationErrorsKind::List(_) => vec![Value::String("Invalid list".to_string())],
        };
        map.insert(field.to_string(), Value::Array(messages));
    }

    Value::Object(map)
}
