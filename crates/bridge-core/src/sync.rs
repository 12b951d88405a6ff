//! [`SyncedStore`]: a local [`RequestStore`] mirrored against a
//! [`RequestService`].
//!
//! The service is authoritative. Each user action makes exactly one remote
//! call:
//!
//! - success: the returned record replaces the local copy;
//! - [`ServiceError::Unavailable`]: the same operation is applied to the local
//!   store and the outcome is marked [`SyncMode::Degraded`];
//! - [`ServiceError::Rejected`]: nothing changes locally except adopting the
//!   service's current copy of the record, and the error is returned.

use uuid::Uuid;

use crate::{
  Result, seed,
  lifecycle::Action,
  request::{NewRequest, Request},
  resource::Resource,
  service::{RequestService, ServiceError},
  store::RequestStore,
};

/// Whether the last operation reached the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
  #[default]
  Remote,
  /// The service was unreachable; the change exists only locally.
  Degraded,
}

/// The value produced by an operation plus how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Synced<T> {
  pub value: T,
  pub mode:  SyncMode,
}

impl<T> Synced<T> {
  pub fn is_degraded(&self) -> bool { self.mode == SyncMode::Degraded }
}

/// Local mirror of the remote request collection.
pub struct SyncedStore<S> {
  service:   S,
  store:     RequestStore,
  resources: Vec<Resource>,
  mode:      SyncMode,
}

impl<S: RequestService> SyncedStore<S> {
  /// An empty mirror. Call [`SyncedStore::refresh`] to load data.
  pub fn new(service: S) -> Self {
    Self {
      service,
      store: RequestStore::new(),
      resources: Vec::new(),
      mode: SyncMode::Remote,
    }
  }

  pub fn service(&self) -> &S { &self.service }

  pub fn store(&self) -> &RequestStore { &self.store }

  pub fn requests(&self) -> &[Request] { self.store.requests() }

  pub fn resources(&self) -> &[Resource] { &self.resources }

  /// How the most recent operation was carried out.
  pub fn mode(&self) -> SyncMode { self.mode }

  // ── Loading ───────────────────────────────────────────────────────────

  /// Reload requests and resources from the service. When the service is
  /// unreachable, whatever is held locally is kept, and an empty mirror is
  /// filled from the seed data.
  pub async fn refresh(&mut self) -> SyncMode {
    let requests = self.service.list_requests().await;
    let resources = self.service.list_resources().await;

    self.mode = SyncMode::Remote;
    match requests {
      Ok(requests) => self.store.replace_all(requests),
      Err(e) => {
        tracing::warn!(error = %e, "could not load requests; working locally");
        self.mode = SyncMode::Degraded;
        if self.store.is_empty() {
          self.store.replace_all(seed::requests());
        }
      }
    }
    match resources {
      Ok(resources) => self.resources = resources,
      Err(e) => {
        tracing::warn!(error = %e, "could not load resources; working locally");
        self.mode = SyncMode::Degraded;
        if self.resources.is_empty() {
          self.resources = seed::resources();
        }
      }
    }
    self.mode
  }

  // ── Mutations ─────────────────────────────────────────────────────────

  pub async fn create(&mut self, input: NewRequest) -> Result<Synced<Request>> {
    let input = input.normalize()?;
    let remote = self.service.create_request(input.clone()).await;
    self.settle(remote, move |store| store.create(input))
  }

  pub async fn assign(&mut self, id: Uuid) -> Result<Synced<Request>> {
    self.transition(id, Action::Assign).await
  }

  pub async fn resolve(&mut self, id: Uuid) -> Result<Synced<Request>> {
    self.transition(id, Action::Resolve).await
  }

  pub async fn transition(&mut self, id: Uuid, action: Action) -> Result<Synced<Request>> {
    self.store.get(id)?;
    let remote = self.service.transition(id, action).await;
    self.settle(remote, |store| store.transition(id, action).cloned())
  }

  pub async fn cycle_tone(&mut self, id: Uuid) -> Result<Synced<Request>> {
    self.store.get(id)?;
    let remote = self.service.cycle_tone(id).await;
    self.settle(remote, |store| store.cycle_tone(id).cloned())
  }

  /// Cycle the tone of the newest request held locally.
  pub async fn cycle_newest_tone(&mut self) -> Result<Synced<Request>> {
    let id = self
      .store
      .newest()
      .map(|r| r.id)
      .ok_or(crate::Error::EmptyStore)?;
    self.cycle_tone(id).await
  }

  fn settle(
    &mut self,
    remote: Result<Request, ServiceError>,
    local: impl FnOnce(&mut RequestStore) -> Result<Request>,
  ) -> Result<Synced<Request>> {
    match remote {
      Ok(request) => {
        self.mode = SyncMode::Remote;
        self.store.upsert(request.clone());
        Ok(Synced {
          value: request,
          mode:  SyncMode::Remote,
        })
      }
      Err(ServiceError::Unavailable(e)) => {
        tracing::warn!(error = %e, "service unavailable; applying change locally");
        self.mode = SyncMode::Degraded;
        let request = local(&mut self.store)?;
        Ok(Synced {
          value: request,
          mode:  SyncMode::Degraded,
        })
      }
      Err(ServiceError::Rejected { source, current }) => {
        self.mode = SyncMode::Remote;
        if let Some(current) = current {
          self.store.upsert(*current);
        }
        Err(source)
      }
    }
  }
}
