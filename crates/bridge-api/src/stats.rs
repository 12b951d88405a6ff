//! Handler for `GET /stats`.

use axum::{Json, extract::State};
use bridge_core::view::{Stats, compute_stats};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatsBody {
  #[serde(flatten)]
  pub stats:     Stats,
  /// Size of the partner directory.
  pub resources: usize,
}

/// `GET /stats`
pub async fn handler(State(state): State<AppState>) -> Json<StatsBody> {
  let store = state.store.read().await;
  Json(StatsBody {
    stats:     compute_stats(store.requests()),
    resources: state.resources.len(),
  })
}
