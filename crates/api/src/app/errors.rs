use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use teller_core::DomainError;
use teller_infra::account_store::StoreError;

use crate::app::dto::ErrorBody;

/// Every way a request can fail.
///
/// Handlers return `Result<_, ApiError>` and never build error responses
/// themselves; `into_response` below is the only place an error reaches the wire.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed path parameter or body. Storage was not touched.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// The account store failed.
    #[error("{0}")]
    Persistence(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::Persistence(_) => "persistence",
        }
    }

    /// HTTP status used for this error.
    ///
    /// All kinds currently share 400 on the wire; `kind` only drives logging.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => ApiError::NotFound(err.to_string()),
            DomainError::Validation(_) | DomainError::InvalidId(_) => {
                ApiError::Validation(err.to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::Persistence(msg) => ApiError::Persistence(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Persistence(_) => tracing::error!(error = %self, "account store failure"),
            _ => tracing::debug!(error = %self, kind = self.kind(), "request rejected"),
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use teller_core::AccountId;

    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn every_kind_renders_the_error_envelope() {
        let cases = [
            ApiError::Validation("invalid id given abc".to_string()),
            ApiError::from(StoreError::NotFound(AccountId::from_i64(7))),
            ApiError::from(StoreError::Persistence("connection refused".to_string())),
        ];
        let expected = ["invalid id given abc", "account 7 not found", "connection refused"];

        for (err, message) in cases.into_iter().zip(expected) {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, serde_json::json!({ "error": message }));
        }
    }

    #[test]
    fn domain_errors_map_to_kinds() {
        assert_eq!(ApiError::from(DomainError::validation("x")).kind(), "validation");
        assert_eq!(ApiError::from(DomainError::invalid_id("x")).kind(), "validation");
        assert_eq!(ApiError::from(DomainError::not_found()).kind(), "not_found");
    }
}
