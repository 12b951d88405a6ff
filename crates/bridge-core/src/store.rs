//! [`RequestStore`], the single owner of the request collection.
//!
//! Every mutation of a [`Request`] goes through this type. Failed operations
//! never leave a partial change behind: the collection is untouched whenever
//! an `Err` is returned.

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  lifecycle::Action,
  request::{NewRequest, Request},
};

/// In-memory request collection, most recent first.
#[derive(Debug, Clone, Default)]
pub struct RequestStore {
  requests: Vec<Request>,
}

impl RequestStore {
  pub fn new() -> Self { Self::default() }

  /// A store holding `requests` in the given order.
  pub fn with_requests(requests: Vec<Request>) -> Self { Self { requests } }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All requests in insertion order (newest first).
  pub fn requests(&self) -> &[Request] { &self.requests }

  pub fn len(&self) -> usize { self.requests.len() }

  pub fn is_empty(&self) -> bool { self.requests.is_empty() }

  pub fn get(&self, id: Uuid) -> Result<&Request> {
    self
      .requests
      .iter()
      .find(|r| r.id == id)
      .ok_or(Error::RequestNotFound(id))
  }

  /// The most recently created request by timestamp. Ties go to the one
  /// inserted last.
  pub fn newest(&self) -> Option<&Request> {
    self
      .requests
      .iter()
      .reduce(|best, r| if r.timestamp > best.timestamp { r } else { best })
  }

  fn get_mut(&mut self, id: Uuid) -> Result<&mut Request> {
    self
      .requests
      .iter_mut()
      .find(|r| r.id == id)
      .ok_or(Error::RequestNotFound(id))
  }

  // ── Creation ──────────────────────────────────────────────────────────

  /// Validate `input`, give it a fresh id and the current time, and add it
  /// to the front of the collection as an open request.
  pub fn create(&mut self, input: NewRequest) -> Result<Request> {
    let input = input.normalize()?;

    let mut id = Uuid::new_v4();
    while self.requests.iter().any(|r| r.id == id) {
      id = Uuid::new_v4();
    }

    let request = input.into_request(id, Utc::now());
    tracing::info!(
      %id,
      category = %request.category,
      tone = %request.tone,
      "request created"
    );
    self.requests.insert(0, request.clone());
    Ok(request)
  }

  // ── Lifecycle ─────────────────────────────────────────────────────────

  /// `open → assigned`.
  pub fn assign(&mut self, id: Uuid) -> Result<&Request> { self.transition(id, Action::Assign) }

  /// `open | assigned → resolved`.
  pub fn resolve(&mut self, id: Uuid) -> Result<&Request> { self.transition(id, Action::Resolve) }

  /// Apply a status-advancing `action` to the request with `id`.
  pub fn transition(&mut self, id: Uuid, action: Action) -> Result<&Request> {
    let request = self.get_mut(id)?;
    match request.status.apply(id, action) {
      Ok(next) => {
        tracing::info!(%id, %action, from = %request.status, to = %next, "status changed");
        request.status = next;
        Ok(request)
      }
      Err(e) => {
        tracing::debug!(%id, status = %request.status, %action, "transition rejected");
        Err(e)
      }
    }
  }

  /// Advance the tone of the request with `id` one step around the cycle.
  pub fn cycle_tone(&mut self, id: Uuid) -> Result<&Request> {
    let request = self.get_mut(id)?;
    request.tone = request.tone.next();
    tracing::info!(%id, tone = %request.tone, "tone cycled");
    Ok(request)
  }

  /// [`RequestStore::cycle_tone`] on the newest request.
  pub fn cycle_newest_tone(&mut self) -> Result<&Request> {
    let id = self.newest().map(|r| r.id).ok_or(Error::EmptyStore)?;
    self.cycle_tone(id)
  }

  // ── Synchronisation ───────────────────────────────────────────────────

  /// Apply an authoritative copy of a request: replaces the record with the
  /// same id, or adds it to the front if it is new.
  pub fn upsert(&mut self, request: Request) {
    match self.requests.iter_mut().find(|r| r.id == request.id) {
      Some(existing) => *existing = request,
      None => self.requests.insert(0, request),
    }
  }

  /// Replace the whole collection with a fresh snapshot.
  pub fn replace_all(&mut self, requests: Vec<Request>) { self.requests = requests; }
}
