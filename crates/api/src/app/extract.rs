//! Typed extractors.
//!
//! Both reject with `ApiError`, so a malformed request is answered with the
//! standard error envelope before any handler (or storage call) runs.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use teller_core::AccountId;

use crate::app::errors::ApiError;

/// The `{id}` path segment, parsed to an `AccountId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountIdPath(pub AccountId);

#[async_trait]
impl<S> FromRequestParts<S> for AccountIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rej| ApiError::Validation(rej.body_text()))?;
        Ok(Self(raw.parse()?))
    }
}

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rej| ApiError::Validation(rej.body_text()))?;
        Ok(Self(value))
    }
}
