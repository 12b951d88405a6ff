//! Handlers for `/requests` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/requests` | Optional `?category=Food\|...\|All` and `?q=<text>` |
//! | `POST` | `/requests` | Body: [`NewRequest`]; returns 201 + stored request |
//! | `GET`  | `/requests/:id` | 404 if not found |
//! | `POST` | `/requests/:id/assign` | 409 + current record if not open |
//! | `POST` | `/requests/:id/resolve` | 409 + current record if already resolved |
//! | `POST` | `/requests/:id/cycle-tone` | Advances the tone one step |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bridge_core::{
  lifecycle::Action,
  request::{NewRequest, Request},
  view::{CategoryFilter, RequestQuery},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// A category name, or `All`. Defaults to `All`.
  pub category: Option<String>,
  /// Case-insensitive text matched against description and name.
  pub q:        Option<String>,
}

impl ListParams {
  fn query(self) -> Result<RequestQuery, ApiError> {
    let category = match self.category.as_deref() {
      None | Some("") => CategoryFilter::All,
      Some(raw) => raw
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown category: {raw:?}")))?,
    };
    Ok(RequestQuery {
      category,
      text: self.q.unwrap_or_default(),
    })
  }
}

/// `GET /requests[?category=<category>][&q=<text>]`
pub async fn list(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Request>>, ApiError> {
  let query = params.query()?;
  let store = state.store.read().await;
  let requests = query
    .apply(store.requests())
    .into_iter()
    .cloned()
    .collect();
  Ok(Json(requests))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /requests`: returns 201 + the stored [`Request`].
pub async fn create(
  State(state): State<AppState>,
  Json(body): Json<NewRequest>,
) -> Result<impl IntoResponse, ApiError> {
  let mut store = state.store.write().await;
  let request = store
    .create(body)
    .map_err(|e| ApiError::from_store(e, &store))?;
  Ok((StatusCode::CREATED, Json(request)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /requests/:id`
pub async fn get_one(
  State(state): State<AppState>,
  Path(id): Path<Uuid>,
) -> Result<Json<Request>, ApiError> {
  let store = state.store.read().await;
  store
    .get(id)
    .cloned()
    .map(Json)
    .map_err(|e| ApiError::from_store(e, &store))
}

// ─── Lifecycle ────────────────────────────────────────────────────────────────

async fn transition(state: &AppState, id: Uuid, action: Action) -> Result<Json<Request>, ApiError> {
  let mut store = state.store.write().await;
  let result = store.transition(id, action).cloned();
  result
    .map(Json)
    .map_err(|e| ApiError::from_store(e, &store))
}

/// `POST /requests/:id/assign`
pub async fn assign(
  State(state): State<AppState>,
  Path(id): Path<Uuid>,
) -> Result<Json<Request>, ApiError> {
  transition(&state, id, Action::Assign).await
}

/// `POST /requests/:id/resolve`
pub async fn resolve(
  State(state): State<AppState>,
  Path(id): Path<Uuid>,
) -> Result<Json<Request>, ApiError> {
  transition(&state, id, Action::Resolve).await
}

/// `POST /requests/:id/cycle-tone`
pub async fn cycle_tone(
  State(state): State<AppState>,
  Path(id): Path<Uuid>,
) -> Result<Json<Request>, ApiError> {
  let mut store = state.store.write().await;
  let result = store.cycle_tone(id).cloned();
  result
    .map(Json)
    .map_err(|e| ApiError::from_store(e, &store))
}
