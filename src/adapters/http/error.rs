use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::dto::ErrorResponse;
use crate::domain::errors::DomainError;

/// Handler error rendered as `{"detail": ...}` with a status reflecting fault ownership.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Domain(DomainError::NotReady) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Domain(e) if e.is_client_fault() => StatusCode::BAD_REQUEST,
            Self::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            Self::Domain(e) => e.to_string(),
            Self::BadRequest(msg) => format!("invalid request body: {msg}"),
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_fault_ownership() {
        assert_eq!(ApiError::from(DomainError::Decode("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(DomainError::Inference("x".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::from(DomainError::Encode("x".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::from(DomainError::NotReady).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ApiError::BadRequest("missing field".into()).status(), StatusCode::BAD_REQUEST);
    }
}
