//! Request lifecycle: the `open → assigned → resolved` state machine.
//!
//! ```text
//!         assign                resolve
//!  open ─────────► assigned ─────────────► resolved
//!    │                                        ▲
//!    └───────────────── resolve ──────────────┘
//! ```
//!
//! `resolved` is terminal. A rejected transition never changes anything; the
//! caller gets [`Error::InvalidTransition`] back and decides how loudly to
//! report it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a request is in its lifecycle.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
  #[default]
  Open,
  Assigned,
  Resolved,
}

impl Status {
  pub fn is_terminal(self) -> bool { matches!(self, Self::Resolved) }

  /// The state reached by applying `action`, if the transition is allowed.
  pub fn next(self, action: Action) -> Option<Status> {
    match (self, action) {
      (Self::Open, Action::Assign) => Some(Self::Assigned),
      (Self::Open | Self::Assigned, Action::Resolve) => Some(Self::Resolved),
      _ => None,
    }
  }

  /// Like [`Status::next`], but reports a rejected transition against `id`.
  pub fn apply(self, id: Uuid, action: Action) -> Result<Status> {
    self.next(action).ok_or(Error::InvalidTransition {
      id,
      from: self,
      action,
    })
  }

  /// Title-case label for display.
  pub fn label(self) -> &'static str {
    match self {
      Self::Open => "Open",
      Self::Assigned => "Assigned",
      Self::Resolved => "Resolved",
    }
  }
}

// ─── Action ──────────────────────────────────────────────────────────────────

/// A status-advancing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Action {
  Assign,
  Resolve,
}
