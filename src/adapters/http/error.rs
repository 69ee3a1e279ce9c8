use crate::utils::error::MarketError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl MarketError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketError::NotFound { .. } => StatusCode::NOT_FOUND,
            MarketError::ValidationError { .. }
            | MarketError::ConfigError { .. }
            | MarketError::ConfigValidationError { .. }
            | MarketError::InvalidConfigValueError { .. } => StatusCode::BAD_REQUEST,
            MarketError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            MarketError::Conflict { .. } => StatusCode::CONFLICT,
            MarketError::IoError(_)
            | MarketError::SerializationError(_)
            | MarketError::CsvError(_)
            | MarketError::ZipError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            MarketError::NotFound { .. } => "not_found",
            MarketError::ValidationError { .. } => "validation_error",
            MarketError::ConfigError { .. }
            | MarketError::ConfigValidationError { .. }
            | MarketError::InvalidConfigValueError { .. } => "bad_request",
            MarketError::Unauthorized { .. } => "unauthorized",
            MarketError::Conflict { .. } => "conflict",
            MarketError::IoError(_) | MarketError::ZipError(_) => "storage_error",
            MarketError::SerializationError(_) | MarketError::CsvError(_) => "internal_error",
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.error_type(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(MarketError::not_found("Vendor", "v-1").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(MarketError::validation("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            MarketError::Unauthorized { message: "no".into() }.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            MarketError::Conflict { message: "dup".into() }.status_code(),
            StatusCode::CONFLICT
        );
        let io = MarketError::IoError(std::io::Error::other("disk"));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_response_status() {
        let response = MarketError::not_found("Booking", "b-1").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
