//! Admin simulation endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/simulate/call` | Fabricates an incoming call; 201 + request |
//! | `POST` | `/simulate/cycle-tone` | Cycles the newest request's tone; 404 when empty |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use bridge_core::{request::Request, simulate};
use rand_core::OsRng;

use crate::{AppState, error::ApiError};

/// `POST /simulate/call`
pub async fn call(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
  let payload = simulate::new_call(&mut OsRng);
  let mut store = state.store.write().await;
  let request = store
    .create(payload)
    .map_err(|e| ApiError::from_store(e, &store))?;
  Ok((StatusCode::CREATED, Json(request)))
}

/// `POST /simulate/cycle-tone`
pub async fn cycle_tone(State(state): State<AppState>) -> Result<Json<Request>, ApiError> {
  let mut store = state.store.write().await;
  let result = store.cycle_newest_tone().cloned();
  result
    .map(Json)
    .map_err(|e| ApiError::from_store(e, &store))
}
