//! Request types: the central entity of the triage dashboard.
//!
//! A request is a help-seeker's submitted need. Its identity, content and
//! location are fixed at creation; only `status` (through the lifecycle) and
//! `tone` (through the admin tone cycle) ever change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{Error, Result, lifecycle::Status};

// ─── Category ────────────────────────────────────────────────────────────────

/// What kind of help is being asked for.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
  Food,
  Shelter,
  Legal,
  Other,
}

// ─── Tone ────────────────────────────────────────────────────────────────────

/// Coarse emotional-state classification of the requester.
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
#[strum(ascii_case_insensitive)]
pub enum Tone {
  #[default]
  Calm,
  Anxious,
  Distressed,
}

impl Tone {
  /// The next tone in the cycle `Calm → Anxious → Distressed → Calm`.
  pub fn next(self) -> Tone {
    match self {
      Self::Calm => Self::Anxious,
      Self::Anxious => Self::Distressed,
      Self::Distressed => Self::Calm,
    }
  }
}

// ─── Location ────────────────────────────────────────────────────────────────

/// A coordinate pair plus a human-readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub lat:     f64,
  pub lng:     f64,
  pub address: String,
}

impl Location {
  pub fn new(lat: f64, lng: f64, address: impl Into<String>) -> Self {
    Self {
      lat,
      lng,
      address: address.into(),
    }
  }

  fn validate(&self) -> Result<()> {
    if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
      return Err(Error::Validation(format!("latitude out of range: {}", self.lat)));
    }
    if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
      return Err(Error::Validation(format!("longitude out of range: {}", self.lng)));
    }
    if self.address.trim().is_empty() {
      return Err(Error::Validation("address is required".into()));
    }
    Ok(())
  }
}

// ─── Safety score ────────────────────────────────────────────────────────────

/// Upper bound of the externally computed risk rating.
pub const MAX_SAFETY_SCORE: f32 = 5.0;

/// Scores at or above this count as critical while the request is open.
pub const CRITICAL_SAFETY_SCORE: f32 = 4.0;

/// Display band for a safety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyLevel {
  Low,
  Elevated,
  High,
}

impl SafetyLevel {
  pub fn of(score: f32) -> SafetyLevel {
    if score >= CRITICAL_SAFETY_SCORE {
      Self::High
    } else if score >= 3.0 {
      Self::Elevated
    } else {
      Self::Low
    }
  }
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// A help request as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
  pub id:           Uuid,
  pub category:     Category,
  pub description:  String,
  pub tone:         Tone,
  pub status:       Status,
  pub location:     Location,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:        Option<String>,
  /// Alternating user / assistant transcript, user first.
  #[serde(default)]
  pub conversation: Vec<String>,
  /// Short extracted notes about the requester.
  #[serde(default)]
  pub memory:       Vec<String>,
  /// Set by the store on creation; never changes.
  pub timestamp:    DateTime<Utc>,
  /// Externally computed risk rating in `[0, 5]`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub safety_score: Option<f32>,
}

impl Request {
  /// The name to show for this request; anonymous requesters have none.
  pub fn display_name(&self) -> &str { self.name.as_deref().unwrap_or("Anonymous") }

  pub fn is_critical(&self) -> bool {
    self.status == Status::Open
      && self
        .safety_score
        .is_some_and(|score| score >= CRITICAL_SAFETY_SCORE)
  }

  pub fn safety_level(&self) -> Option<SafetyLevel> { self.safety_score.map(SafetyLevel::of) }
}

// ─── NewRequest ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::RequestStore::create`].
/// `id`, `status` and `timestamp` are always set by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
  pub category:     Category,
  pub description:  String,
  #[serde(default)]
  pub tone:         Tone,
  pub location:     Location,
  #[serde(default)]
  pub name:         Option<String>,
  #[serde(default)]
  pub phone:        Option<String>,
  #[serde(default)]
  pub conversation: Vec<String>,
  #[serde(default)]
  pub memory:       Vec<String>,
  #[serde(default)]
  pub safety_score: Option<f32>,
}

impl NewRequest {
  /// Convenience constructor with all optional fields empty.
  pub fn new(
    category: Category,
    description: impl Into<String>,
    location: Location,
  ) -> Self {
    Self {
      category,
      description: description.into(),
      tone: Tone::default(),
      location,
      name: None,
      phone: None,
      conversation: Vec::new(),
      memory: Vec::new(),
      safety_score: None,
    }
  }

  /// Check the payload and normalise it: trims text, turns blank optional
  /// strings into `None` and clamps the safety score into `[0, 5]`.
  pub fn normalize(mut self) -> Result<Self> {
    self.description = self.description.trim().to_string();
    if self.description.is_empty() {
      return Err(Error::Validation("description is required".into()));
    }
    self.location.validate()?;
    self.name = blank_to_none(self.name);
    self.phone = blank_to_none(self.phone);
    self.safety_score = match self.safety_score {
      Some(score) if score.is_nan() => {
        return Err(Error::Validation("safety score is not a number".into()));
      }
      Some(score) => Some(score.clamp(0.0, MAX_SAFETY_SCORE)),
      None => None,
    };
    Ok(self)
  }

  /// Materialise the record. Only the store calls this.
  pub(crate) fn into_request(self, id: Uuid, timestamp: DateTime<Utc>) -> Request {
    Request {
      id,
      category: self.category,
      description: self.description,
      tone: self.tone,
      status: Status::Open,
      location: self.location,
      name: self.name,
      phone: self.phone,
      conversation: self.conversation,
      memory: self.memory,
      timestamp,
      safety_score: self.safety_score,
    }
  }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
  value
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
}
