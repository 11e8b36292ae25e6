use architect_core::ArchitectError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use llm_client::LlmError;

use crate::github::GitHubError;

// ---------------------------------------------------------------------------
// Internal sentinel for an explicit 400
// ---------------------------------------------------------------------------

/// Carries an explicit HTTP 400 through the `anyhow::Error` chain.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses. Body is always `{"error": "..."}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<BadRequestError>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        // Upstream failures.
        if self.0.downcast_ref::<LlmError>().is_some()
            || self.0.downcast_ref::<GitHubError>().is_some()
        {
            return StatusCode::BAD_GATEWAY;
        }
        match self.0.downcast_ref::<ArchitectError>() {
            Some(ArchitectError::BacklogItemNotFound(_)) => StatusCode::NOT_FOUND,
            Some(
                ArchitectError::InvalidPhase(_)
                | ArchitectError::InvalidStatus(_)
                | ArchitectError::InvalidPriority(_)
                | ArchitectError::InvalidMode(_),
            ) => StatusCode::BAD_REQUEST,
            Some(ArchitectError::Io(_) | ArchitectError::Yaml(_) | ArchitectError::Json(_)) | None => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backlog_item_not_found_maps_to_404() {
        let err = AppError(ArchitectError::BacklogItemNotFound("x".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_phase_maps_to_400() {
        let err = AppError(ArchitectError::InvalidPhase("9.9".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_status_maps_to_400() {
        let err = AppError(ArchitectError::InvalidStatus("shipped".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_error_maps_to_500() {
        let err = AppError(ArchitectError::Io(std::io::Error::other("disk full")).into());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn llm_failure_maps_to_502() {
        let err = AppError(LlmError::EmptyResponse.into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn github_failure_maps_to_502() {
        let err = AppError(
            GitHubError::Status {
                status: 404,
                url: "https://api.github.com/repos/a/b".into(),
            }
            .into(),
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unknown_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_maps_to_400() {
        assert_eq!(AppError::bad_request("nope").into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn response_body_is_json() {
        let response = AppError::bad_request("nope").into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
