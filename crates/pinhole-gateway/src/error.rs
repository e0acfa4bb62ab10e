use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pinhole_core::ShortenerError;
use pinhole_redirector::RedirectorError;
use thiserror::Error;
use tracing::error;

use crate::model::{ErrorResponse, FieldError};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request")]
    Validation(Vec<FieldError>),
    #[error("short url not found")]
    NotFound,
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        match value {
            ShortenerError::InvalidUrl(message) => AppError::invalid_field("longUrl", message),
            e @ ShortenerError::CodeSpaceExhausted { .. } => AppError::Unavailable(e.to_string()),
            e @ ShortenerError::Storage(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<RedirectorError> for AppError {
    fn from(value: RedirectorError) -> Self {
        match value {
            RedirectorError::NotFound(_) => AppError::NotFound,
            RedirectorError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        AppError::invalid_field("body", value.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation(details) => ErrorResponse {
                error: "invalid request".to_string(),
                details,
            },
            AppError::NotFound => ErrorResponse {
                error: "short url not found".to_string(),
                details: Vec::new(),
            },
            AppError::Unavailable(message) | AppError::Internal(message) => {
                error!(status = status.as_u16(), error = %message, "request failed");
                ErrorResponse {
                    error: status
                        .canonical_reason()
                        .unwrap_or("internal error")
                        .to_lowercase(),
                    details: Vec::new(),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinhole_core::StorageError;

    #[test]
    fn shortener_errors_map_to_status() {
        let cases = [
            (
                ShortenerError::InvalidUrl("blank".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ShortenerError::CodeSpaceExhausted { attempts: 16 },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ShortenerError::Storage(StorageError::Unavailable("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn redirector_errors_map_to_status() {
        assert_eq!(
            AppError::from(RedirectorError::NotFound("x".to_string())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(RedirectorError::Storage(StorageError::Timeout(
                "slow".to_string()
            )))
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_url_is_reported_on_long_url() {
        let AppError::Validation(details) =
            AppError::from(ShortenerError::InvalidUrl("URL must not be blank".to_string()))
        else {
            panic!("expected validation error");
        };
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "longUrl");
        assert_eq!(details[0].message, "URL must not be blank");
    }
}
