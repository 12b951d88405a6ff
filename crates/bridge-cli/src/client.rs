//! Async HTTP client wrapping the Bridge JSON API.
//!
//! [`ApiClient`] implements [`RequestService`], so the dashboard mirrors the
//! server through [`bridge_core::sync::SyncedStore`]. Transport failures and
//! 5xx answers become [`ServiceError::Unavailable`]; 4xx answers the server
//! explains become [`ServiceError::Rejected`].

use std::{future::Future, time::Duration};

use anyhow::{Context, anyhow};
use bridge_core::{
  Error,
  lifecycle::Action,
  request::{NewRequest, Request},
  resource::Resource,
  service::{RequestService, ServiceError},
};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use uuid::Uuid;

/// Connection settings for the Bridge API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

/// Async HTTP client for the Bridge JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// What a call was aimed at, used to interpret error answers.
#[derive(Debug, Clone, Copy)]
enum Target {
  Collection,
  Record(Uuid),
  Transition(Uuid, Action),
}

/// Error body produced by the API: `{"error": …}` plus, on 409, the current
/// record.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
  #[serde(default)]
  error:   String,
  #[serde(default)]
  request: Option<Request>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  async fn call<T: DeserializeOwned>(
    &self,
    req: RequestBuilder,
    route: String,
    target: Target,
  ) -> Result<T, ServiceError> {
    let resp = req.send().await.map_err(ServiceError::unavailable)?;

    let status = resp.status();
    if status.is_success() {
      return resp.json().await.map_err(ServiceError::unavailable);
    }

    tracing::debug!(%route, %status, "request refused");
    let body: ErrorBody = resp.json().await.unwrap_or_default();
    Err(classify(status.as_u16(), body, &route, target))
  }
}

/// Turn a non-success answer into the matching [`ServiceError`].
fn classify(status: u16, body: ErrorBody, route: &str, target: Target) -> ServiceError {
  match (status, target) {
    (404, Target::Record(id) | Target::Transition(id, _)) => Error::RequestNotFound(id).into(),
    (400, _) => Error::Validation(body.error).into(),
    (409, Target::Transition(id, action)) if body.request.is_some() => {
      let current = body.request.map(Box::new);
      ServiceError::Rejected {
        source: Error::InvalidTransition {
          id,
          from: current.as_ref().map(|r| r.status).unwrap_or_default(),
          action,
        },
        current,
      }
    }
    _ => ServiceError::unavailable(anyhow!("{route} → {status} {}", body.error)),
  }
}

impl RequestService for ApiClient {
  /// `GET /api/requests`
  fn list_requests(
    &self,
  ) -> impl Future<Output = Result<Vec<Request>, ServiceError>> + Send + '_ {
    self.call(
      self.client.get(self.url("/requests")),
      "GET /requests".into(),
      Target::Collection,
    )
  }

  /// `GET /api/resources`
  fn list_resources(
    &self,
  ) -> impl Future<Output = Result<Vec<Resource>, ServiceError>> + Send + '_ {
    self.call(
      self.client.get(self.url("/resources")),
      "GET /resources".into(),
      Target::Collection,
    )
  }

  /// `POST /api/requests`
  fn create_request(
    &self,
    input: NewRequest,
  ) -> impl Future<Output = Result<Request, ServiceError>> + Send + '_ {
    self.call(
      self.client.post(self.url("/requests")).json(&input),
      "POST /requests".into(),
      Target::Collection,
    )
  }

  /// `POST /api/requests/{id}/assign` or `/resolve`
  fn transition(
    &self,
    id: Uuid,
    action: Action,
  ) -> impl Future<Output = Result<Request, ServiceError>> + Send + '_ {
    self.call(
      self.client.post(self.url(&format!("/requests/{id}/{action}"))),
      format!("POST /requests/{id}/{action}"),
      Target::Transition(id, action),
    )
  }

  /// `POST /api/requests/{id}/cycle-tone`
  fn cycle_tone(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Request, ServiceError>> + Send + '_ {
    self.call(
      self.client.post(self.url(&format!("/requests/{id}/cycle-tone"))),
      format!("POST /requests/{id}/cycle-tone"),
      Target::Record(id),
    )
  }
}
