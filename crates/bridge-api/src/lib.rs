//! JSON REST API for Bridge.
//!
//! Exposes an axum [`Router`] over a shared [`RequestStore`] and the partner
//! resource directory. Transport concerns (binding, tracing layers) are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", bridge_api::api_router(state.clone()))
//! ```

pub mod error;
pub mod requests;
pub mod resources;
pub mod simulate;
pub mod stats;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use bridge_core::{resource::Resource, store::RequestStore};
use tokio::sync::RwLock;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. The store lock is the only
/// synchronisation point; it is never held across an await.
#[derive(Clone, Default)]
pub struct AppState {
  pub store:     Arc<RwLock<RequestStore>>,
  pub resources: Arc<Vec<Resource>>,
}

impl AppState {
  pub fn new(store: RequestStore, resources: Vec<Resource>) -> Self {
    Self {
      store:     Arc::new(RwLock::new(store)),
      resources: Arc::new(resources),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router(state: AppState) -> Router<()> {
  Router::new()
    // Requests
    .route("/requests", get(requests::list).post(requests::create))
    .route("/requests/{id}", get(requests::get_one))
    .route("/requests/{id}/assign", post(requests::assign))
    .route("/requests/{id}/resolve", post(requests::resolve))
    .route("/requests/{id}/cycle-tone", post(requests::cycle_tone))
    // Admin simulation
    .route("/simulate/call", post(simulate::call))
    .route("/simulate/cycle-tone", post(simulate::cycle_tone))
    // Resources
    .route("/resources", get(resources::list))
    .route("/resources/search", post(resources::search))
    // Stats
    .route("/stats", get(stats::handler))
    .with_state(state)
}
