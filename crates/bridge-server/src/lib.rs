//! HTTP server assembly for Bridge: configuration, initial state and the
//! top-level router.

use axum::{Json, Router, routing::get};
use bridge_api::AppState;
use bridge_core::{seed, store::RequestStore};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `BRIDGE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  /// Start with the demo requests and partner directory.
  #[serde(default = "default_seed")]
  pub seed: bool,
}

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 4000 }

fn default_seed() -> bool { true }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
      seed: default_seed(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The state the server starts with. The partner directory is always
  /// loaded; requests only when seeding.
  pub fn initial_state(&self) -> AppState {
    let store = if self.seed {
      RequestStore::with_requests(seed::requests())
    } else {
      RequestStore::new()
    };
    AppState::new(store, seed::resources())
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: health check at `/`, the JSON API under `/api`,
/// with request tracing on everything.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(health))
    .nest("/api", bridge_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
  Json(json!({
    "status":  "online",
    "service": "bridge",
    "version": env!("CARGO_PKG_VERSION"),
  }))
}

#[cfg(test)]
mod tests {
  use axum::{body::Body, http::Request};
  use tower::ServiceExt;

  use super::*;

  #[test]
  fn defaults() {
    let cfg = ServerConfig::default();
    assert_eq!(cfg.address(), "127.0.0.1:4000");
    assert!(cfg.seed);
  }

  #[test]
  fn partial_config_fills_defaults() {
    let settings = config::Config::builder()
      .add_source(config::File::from_str("port = 8080", config::FileFormat::Toml))
      .build()
      .unwrap();
    let cfg: ServerConfig = settings.try_deserialize().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "127.0.0.1");
  }

  #[tokio::test]
  async fn unseeded_state_is_empty_but_has_resources() {
    let state = ServerConfig {
      seed: false,
      ..ServerConfig::default()
    }
    .initial_state();
    assert!(state.store.read().await.is_empty());
    assert_eq!(state.resources.len(), 7);
  }

  #[tokio::test]
  async fn health_and_nested_api() {
    let app = router(ServerConfig::default().initial_state());

    let response = app
      .clone()
      .oneshot(Request::get("/").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert!(response.status().is_success());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "online");

    let response = app
      .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert!(response.status().is_success());
  }
}
