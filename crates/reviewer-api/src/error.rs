use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reviewer_core::error::ReviewerError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ReviewerError> for ApiError {
    fn from(err: ReviewerError) -> Self {
        match &err {
            ReviewerError::ConfigMissing { .. } | ReviewerError::ConfigInvalid { .. } => {
                Self::internal("Reviewer is not configured").with_details(err.to_string())
            }
            ReviewerError::Transport { .. } => {
                Self::bad_gateway("Generative API unavailable").with_details(err.to_string())
            }
            ReviewerError::RemoteRejection { message, .. } => {
                Self::bad_gateway("Generative API rejected the request").with_details(message.clone())
            }
            ReviewerError::MalformedResponse { .. } => {
                Self::bad_gateway("Generative API returned no review").with_details(err.to_string())
            }
            ReviewerError::Blocked { reason } => {
                Self::unprocessable("Review was blocked").with_details(reason.clone())
            }
            ReviewerError::Io(_) => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewer_error_status_mapping() {
        let cases = [
            (ReviewerError::ConfigMissing { key: "GOOGLE_GEMINI_KEY".into() }, StatusCode::INTERNAL_SERVER_ERROR),
            (ReviewerError::Transport { reason: "connection refused".into() }, StatusCode::BAD_GATEWAY),
            (
                ReviewerError::RemoteRejection { status: 429, message: "quota".into() },
                StatusCode::BAD_GATEWAY,
            ),
            (ReviewerError::MalformedResponse { reason: "no candidates".into() }, StatusCode::BAD_GATEWAY),
            (ReviewerError::Blocked { reason: "SAFETY".into() }, StatusCode::UNPROCESSABLE_ENTITY),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn test_rejection_details_carry_upstream_message() {
        let api_error = ApiError::from(ReviewerError::RemoteRejection {
            status: 400,
            message: "API key not valid.".into(),
        });
        assert_eq!(api_error.details.as_deref(), Some("API key not valid."));
    }
}
