use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::r2d2;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum ApiError {
    Database(diesel::result::Error),
    DatabaseConnection(String),
    Validation(ValidationErrors),
    BadRequest(String),
    Auth(AuthError),
    NotFound(String),
    Payment(String),
    Token(String),
    Internal(String),
}

#[derive(Debug)]
pub enum AuthError {
    MissingHeader,
    InvalidFormat,
    InvalidToken(String),
    InvalidCredentials,
    DuplicateEmail,
}

/// Failures talking to the Chapa gateway. Always surfaced as a 502.
#[derive(Debug)]
pub enum ChapaError {
    RequestFailed(String),
    Api(String),
    InvalidResponse(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    #[schema(example = "Validation failed")]
    pub error: String,
    /// Field-keyed messages, present on validation failures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ApiError::Auth(e) => write!(f, "Authentication error: {}", e),
            ApiError::NotFound(e) => write!(f, "Not found: {}", e),
            ApiError::Payment(e) => write!(f, "Payment gateway error: {}", e),
            ApiError::Token(e) => write!(f, "Token error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Database(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingHeader => write!(f, "Authorization header required"),
            AuthError::InvalidFormat => write!(f, "Invalid Authorization format"),
            AuthError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::DuplicateEmail => write!(f, "Email already registered"),
        }
    }
}

impl fmt::Display for ChapaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapaError::RequestFailed(msg) => write!(f, "Chapa request failed: {}", msg),
            ChapaError::Api(msg) => write!(f, "{}", msg),
            ChapaError::InvalidResponse(msg) => write!(f, "Invalid Chapa response: {}", msg),
        }
    }
}

impl From<r2d2::PoolError> for ApiError {
    fn from(err: r2d2::PoolError) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Database(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<ChapaError> for ApiError {
    fn from(err: ChapaError) -> Self {
        ApiError::Payment(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Payment(err.to_string())
    }
}

/// Flattens validator output into `field -> [messages]`, falling back to the
/// error code when a rule carries no message.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl From<ApiError> for (StatusCode, ApiErrorResponse) {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Database(e) => match e {
                diesel::result::Error::NotFound => (
                    StatusCode::NOT_FOUND,
                    ApiErrorResponse::message("Resource not found"),
                ),
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => (
                    StatusCode::CONFLICT,
                    ApiErrorResponse::message("Resource already exists"),
                ),
                other => {
                    error!(error = %other, "Unhandled database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiErrorResponse::message("Internal server error"),
                    )
                }
            },
            ApiError::DatabaseConnection(e) => {
                error!(error = %e, "Database connection error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::message("Internal server error"),
                )
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: Some(field_messages(&errors)),
                },
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiErrorResponse::message(msg)),
            ApiError::Auth(AuthError::DuplicateEmail) => (
                StatusCode::CONFLICT,
                ApiErrorResponse::message(AuthError::DuplicateEmail.to_string()),
            ),
            ApiError::Auth(e) => (StatusCode::UNAUTHORIZED, ApiErrorResponse::message(e.to_string())),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiErrorResponse::message(msg)),
            ApiError::Payment(msg) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorResponse::message(format!("Payment gateway error: {}", msg)),
            ),
            ApiError::Token(e) => {
                error!(error = %e, "Token error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::message("Internal server error"),
                )
            }
            ApiError::Internal(e) => {
                error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::message("Internal server error"),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body): (StatusCode, ApiErrorResponse) = self.into();
        (status, Json(body)).into_response()
    }
}
