//! The `RequestService` trait: the remote request service the dashboard
//! synchronises with.
//!
//! The trait is implemented by transports (e.g. the HTTP client in
//! `bridge-cli`). [`crate::sync::SyncedStore`] depends on this abstraction,
//! not on any concrete transport.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::{
  lifecycle::Action,
  request::{NewRequest, Request},
  resource::Resource,
};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Why a remote call did not produce a record.
#[derive(Debug, Error)]
pub enum ServiceError {
  /// The service could not be reached or failed internally. The caller may
  /// fall back to applying the change locally.
  #[error("service unavailable: {0}")]
  Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The service understood the call and refused it.
  #[error("{source}")]
  Rejected {
    source:  crate::Error,
    /// The service's current copy of the record, when it sent one.
    current: Option<Box<Request>>,
  },
}

impl ServiceError {
  pub fn unavailable(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    Self::Unavailable(e.into())
  }
}

impl From<crate::Error> for ServiceError {
  fn from(source: crate::Error) -> Self {
    Self::Rejected {
      source,
      current: None,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the remote request service.
///
/// All methods return `Send` futures so implementations can be driven from a
/// multi-threaded runtime.
pub trait RequestService: Send + Sync {
  /// The service's full request collection, newest first.
  fn list_requests(
    &self,
  ) -> impl Future<Output = Result<Vec<Request>, ServiceError>> + Send + '_;

  /// The partner resource directory.
  fn list_resources(
    &self,
  ) -> impl Future<Output = Result<Vec<Resource>, ServiceError>> + Send + '_;

  /// Submit a new request and return the materialised record.
  fn create_request(
    &self,
    input: NewRequest,
  ) -> impl Future<Output = Result<Request, ServiceError>> + Send + '_;

  /// Assign or resolve the request with `id`; returns the updated record.
  fn transition(
    &self,
    id: Uuid,
    action: Action,
  ) -> impl Future<Output = Result<Request, ServiceError>> + Send + '_;

  /// Advance the tone of the request with `id`; returns the updated record.
  fn cycle_tone(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Request, ServiceError>> + Send + '_;
}
