//! Mapping of queue errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::queue::QueueError;

/// Error returned by handlers; renders as `{ "error": { "kind", "message" } }`.
#[derive(Debug)]
pub struct ApiError(pub QueueError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            QueueError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            QueueError::DuplicateId(_) => StatusCode::CONFLICT,
            QueueError::NotFound(_) | QueueError::EmptyStore => StatusCode::NOT_FOUND,
        }
    }
}

impl From<QueueError> for ApiError {
    fn from(e: QueueError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(
            status = status.as_u16(),
            kind = self.0.kind(),
            error = %self.0,
            "request rejected"
        );
        let body = Json(json!({
            "error": {
                "kind": self.0.kind(),
                "message": self.0.to_string(),
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::RequestId;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (QueueError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (QueueError::DuplicateId(RequestId::new(1)), StatusCode::CONFLICT),
            (QueueError::NotFound(RequestId::new(1)), StatusCode::NOT_FOUND),
            (QueueError::EmptyStore, StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }
}
