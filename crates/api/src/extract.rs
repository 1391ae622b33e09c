//! Body and query extractors whose rejections use the validation error
//! format instead of axum's plain-text bodies.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use movies_core::error::CoreError;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// [`Json`] that rejects malformed payloads with a 400 validation error on
/// the `body` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

/// [`Query`] that rejects malformed query strings with a 400 validation
/// error on the `query` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(query_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected JSON body");
    CoreError::invalid("body", rejection.body_text()).into()
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected query string");
    CoreError::invalid("query", rejection.body_text()).into()
}
