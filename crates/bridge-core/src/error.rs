//! Error types for `bridge-core`.
//!
//! None of these are fatal: the store never mutates a record when it returns
//! one, and callers surface them as notices.

use thiserror::Error;
use uuid::Uuid;

use crate::lifecycle::{Action, Status};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("request not found: {0}")]
  RequestNotFound(Uuid),

  #[error("cannot {action} request {id}: it is already {from}")]
  InvalidTransition {
    id:     Uuid,
    from:   Status,
    action: Action,
  },

  #[error("there are no requests")]
  EmptyStore,

  #[error("invalid request: {0}")]
  Validation(String),
}

impl Error {
  /// `true` for the "unknown id" class of failure.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::RequestNotFound(_) | Self::EmptyStore)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
