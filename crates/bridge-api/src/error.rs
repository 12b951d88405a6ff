//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use bridge_core::{request::Request, store::RequestStore};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A rejected status transition. Carries the record as it stands so the
  /// client can catch up.
  #[error("conflict: {message}")]
  Conflict {
    message: String,
    request: Option<Box<Request>>,
  },
}

impl ApiError {
  /// Map a store error to its HTTP form, looking up the current record for
  /// rejected transitions.
  pub fn from_store(err: bridge_core::Error, store: &RequestStore) -> Self {
    use bridge_core::Error;
    tracing::debug!(error = %err, "store refused request");
    match &err {
      Error::RequestNotFound(_) | Error::EmptyStore => Self::NotFound(err.to_string()),
      Error::Validation(_) => Self::BadRequest(err.to_string()),
      Error::InvalidTransition { id, .. } => Self::Conflict {
        message: err.to_string(),
        request: store.get(*id).ok().cloned().map(Box::new),
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response(),
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Conflict { message, request } => (
        StatusCode::CONFLICT,
        Json(json!({ "error": message, "request": request })),
      )
        .into_response(),
    }
  }
}
