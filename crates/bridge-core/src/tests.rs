//! Behavioural tests for `RequestStore`, the derived views and
//! `SyncedStore` against a fake service.

use std::{
  future::Future,
  sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
};

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error,
  lifecycle::{Action, Status},
  request::{Category, Location, NewRequest, Request},
  resource::Resource,
  seed,
  service::{RequestService, ServiceError},
  store::RequestStore,
  sync::{SyncMode, SyncedStore},
  view::{CategoryFilter, Stats, compute_stats, filter_by_category, filter_by_search},
};

fn new_request(category: Category, description: &str) -> NewRequest {
  NewRequest::new(
    category,
    description,
    Location::new(37.7749, -122.4194, "SoMa, SF"),
  )
}

fn store_with_one() -> (RequestStore, Uuid) {
  let mut store = RequestStore::new();
  let id = store
    .create(new_request(Category::Food, "Need dinner"))
    .unwrap()
    .id;
  (store, id)
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[test]
fn create_yields_open_requests_with_distinct_ids() {
  let mut store = RequestStore::new();
  let a = store.create(new_request(Category::Food, "first")).unwrap();
  let b = store.create(new_request(Category::Food, "second")).unwrap();

  assert_ne!(a.id, b.id);
  assert_eq!(a.status, Status::Open);
  assert_eq!(b.status, Status::Open);
  assert!(a.timestamp <= Utc::now());
  // Newest first.
  assert_eq!(store.requests()[0].id, b.id);
  assert_eq!(store.len(), 2);
}

#[test]
fn create_rejects_invalid_payload_without_inserting() {
  let mut store = RequestStore::new();
  let err = store.create(new_request(Category::Legal, "   ")).unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  assert!(store.is_empty());
}

#[test]
fn resolve_is_terminal_and_idempotent() {
  let (mut store, id) = store_with_one();
  assert_eq!(store.resolve(id).unwrap().status, Status::Resolved);

  let err = store.resolve(id).unwrap_err();
  assert!(matches!(err, Error::InvalidTransition { from: Status::Resolved, .. }));
  assert_eq!(store.get(id).unwrap().status, Status::Resolved);
}

#[test]
fn assign_never_regresses_a_resolved_request() {
  let (mut store, id) = store_with_one();
  store.resolve(id).unwrap();

  let err = store.assign(id).unwrap_err();
  assert_eq!(err, Error::InvalidTransition {
    id,
    from: Status::Resolved,
    action: Action::Assign,
  });
  assert_eq!(store.get(id).unwrap().status, Status::Resolved);
}

#[test]
fn assign_twice_is_rejected() {
  let (mut store, id) = store_with_one();
  store.assign(id).unwrap();
  assert!(store.assign(id).is_err());
  assert_eq!(store.get(id).unwrap().status, Status::Assigned);
}

#[test]
fn assign_then_resolve_then_assign() {
  let (mut store, id) = store_with_one();
  store.assign(id).unwrap();
  store.resolve(id).unwrap();
  let _ = store.assign(id);

  let statuses: Vec<_> = store.requests().iter().map(|r| (r.id, r.status)).collect();
  assert_eq!(statuses, vec![(id, Status::Resolved)]);
}

#[test]
fn unknown_ids_are_not_found() {
  let (mut store, _) = store_with_one();
  let missing = Uuid::new_v4();
  assert_eq!(store.assign(missing).unwrap_err(), Error::RequestNotFound(missing));
  assert_eq!(store.resolve(missing).unwrap_err(), Error::RequestNotFound(missing));
  assert!(store.cycle_tone(missing).unwrap_err().is_not_found());
  assert!(store.get(missing).is_err());
}

#[test]
fn three_tone_cycles_return_to_start() {
  let (mut store, id) = store_with_one();
  let original = store.get(id).unwrap().tone;
  for _ in 0..3 {
    store.cycle_tone(id).unwrap();
  }
  assert_eq!(store.get(id).unwrap().tone, original);
}

#[test]
fn cycle_newest_tone_targets_the_latest_timestamp() {
  // Seed requests are not in timestamp order once we reshuffle them.
  let mut requests = seed::requests();
  requests.reverse();
  let newest_id = requests.iter().max_by_key(|r| r.timestamp).unwrap().id;
  let mut store = RequestStore::with_requests(requests);

  let before = store.get(newest_id).unwrap().tone;
  let cycled = store.cycle_newest_tone().unwrap();
  assert_eq!(cycled.id, newest_id);
  assert_eq!(cycled.tone, before.next());
}

#[test]
fn cycle_newest_tone_on_empty_store() {
  let mut store = RequestStore::new();
  assert_eq!(store.cycle_newest_tone().unwrap_err(), Error::EmptyStore);
}

#[test]
fn newest_prefers_the_latest_insert_on_ties() {
  let mut store = RequestStore::new();
  let first = store.create(new_request(Category::Food, "a")).unwrap();
  let mut twin = first.clone();
  twin.id = Uuid::new_v4();
  store.upsert(twin.clone());
  assert_eq!(store.newest().unwrap().id, twin.id);
}

#[test]
fn upsert_replaces_in_place() {
  let (mut store, id) = store_with_one();
  let mut copy = store.get(id).unwrap().clone();
  copy.status = Status::Assigned;
  store.upsert(copy);
  assert_eq!(store.len(), 1);
  assert_eq!(store.get(id).unwrap().status, Status::Assigned);
}

// ─── Views ───────────────────────────────────────────────────────────────────

#[test]
fn all_filter_is_identity() {
  let requests = seed::requests();
  let filtered = filter_by_category(&requests, CategoryFilter::All);
  let ids: Vec<_> = filtered.iter().map(|r| r.id).collect();
  let expected: Vec<_> = requests.iter().map(|r| r.id).collect();
  assert_eq!(ids, expected);

  let empty: Vec<Request> = Vec::new();
  assert!(filter_by_category(&empty, CategoryFilter::All).is_empty());
}

#[test]
fn category_then_search_composes() {
  let mut store = RequestStore::with_requests(seed::requests());
  store
    .create(NewRequest {
      name: Some("Rosa".into()),
      ..new_request(Category::Food, "Groceries for MARIA's kids")
    })
    .unwrap();
  store
    .create(NewRequest {
      name: Some("Maria".into()),
      ..new_request(Category::Shelter, "Bed tonight")
    })
    .unwrap();

  let hits = filter_by_search(
    filter_by_category(store.requests(), CategoryFilter::Only(Category::Food)),
    "maria",
  );
  assert_eq!(hits.len(), 2);
  assert!(hits.iter().all(|r| r.category == Category::Food));
  assert!(hits.iter().all(|r| {
    r.description.to_lowercase().contains("maria")
      || r.name.as_deref().is_some_and(|n| n.to_lowercase().contains("maria"))
  }));
}

#[test]
fn stats_of_empty_collection() {
  let empty: Vec<Request> = Vec::new();
  assert_eq!(compute_stats(&empty), Stats::default());
  assert_eq!(compute_stats(&empty).success_rate, 0.0);
}

#[test]
fn stats_follow_transitions() {
  let mut store = RequestStore::new();
  let a = store.create(new_request(Category::Food, "a")).unwrap().id;
  let b = store.create(new_request(Category::Food, "b")).unwrap().id;
  store
    .create(NewRequest {
      safety_score: Some(4.5),
      ..new_request(Category::Other, "c")
    })
    .unwrap();
  store.assign(a).unwrap();
  store.resolve(b).unwrap();

  let stats = compute_stats(store.requests());
  assert_eq!(stats.total, 3);
  assert_eq!((stats.open, stats.assigned, stats.resolved), (1, 1, 1));
  assert_eq!(stats.critical, 1);
  assert!((stats.success_rate - 1.0 / 3.0).abs() < 1e-12);
}

// ─── SyncedStore ─────────────────────────────────────────────────────────────

/// An in-process service that can be switched offline.
struct FakeService {
  online: AtomicBool,
  calls:  AtomicUsize,
  inner:  Mutex<RequestStore>,
}

impl FakeService {
  fn new(requests: Vec<Request>) -> Self {
    Self {
      online: AtomicBool::new(true),
      calls:  AtomicUsize::new(0),
      inner:  Mutex::new(RequestStore::with_requests(requests)),
    }
  }

  fn set_online(&self, online: bool) { self.online.store(online, Ordering::SeqCst); }

  fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

  fn check(&self) -> Result<(), ServiceError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.online.load(Ordering::SeqCst) {
      Ok(())
    } else {
      Err(ServiceError::unavailable("connection refused"))
    }
  }

  fn status_of(&self, id: Uuid) -> Option<Status> {
    self.inner.lock().unwrap().get(id).ok().map(|r| r.status)
  }

  fn settle(
    &self,
    op: impl FnOnce(&mut RequestStore) -> crate::Result<Request>,
    id: Uuid,
  ) -> Result<Request, ServiceError> {
    self.check()?;
    let mut inner = self.inner.lock().unwrap();
    let result = op(&mut *inner);
    result.map_err(|source| ServiceError::Rejected {
      source,
      current: inner.get(id).ok().cloned().map(Box::new),
    })
  }
}

impl RequestService for FakeService {
  fn list_requests(
    &self,
  ) -> impl Future<Output = Result<Vec<Request>, ServiceError>> + Send + '_ {
    async move {
      self.check()?;
      Ok(self.inner.lock().unwrap().requests().to_vec())
    }
  }

  fn list_resources(
    &self,
  ) -> impl Future<Output = Result<Vec<Resource>, ServiceError>> + Send + '_ {
    async move {
      self.check()?;
      Ok(seed::resources())
    }
  }

  fn create_request(
    &self,
    input: NewRequest,
  ) -> impl Future<Output = Result<Request, ServiceError>> + Send + '_ {
    async move {
      self.check()?;
      Ok(self.inner.lock().unwrap().create(input)?)
    }
  }

  fn transition(
    &self,
    id: Uuid,
    action: Action,
  ) -> impl Future<Output = Result<Request, ServiceError>> + Send + '_ {
    async move { self.settle(|s| s.transition(id, action).cloned(), id) }
  }

  fn cycle_tone(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Request, ServiceError>> + Send + '_ {
    async move { self.settle(|s| s.cycle_tone(id).cloned(), id) }
  }
}

#[tokio::test]
async fn refresh_loads_remote_snapshot() {
  let mut synced = SyncedStore::new(FakeService::new(seed::requests()));
  assert_eq!(synced.refresh().await, SyncMode::Remote);
  assert_eq!(synced.requests().len(), 4);
  assert_eq!(synced.resources().len(), 7);
}

#[tokio::test]
async fn refresh_offline_falls_back_to_seed() {
  let service = FakeService::new(Vec::new());
  service.set_online(false);
  let mut synced = SyncedStore::new(service);

  assert_eq!(synced.refresh().await, SyncMode::Degraded);
  assert_eq!(synced.requests().len(), 4);
  assert!(!synced.resources().is_empty());
}

#[tokio::test]
async fn remote_transition_updates_both_sides() {
  let mut synced = SyncedStore::new(FakeService::new(seed::requests()));
  synced.refresh().await;
  let id = synced
    .requests()
    .iter()
    .find(|r| r.status == Status::Open)
    .unwrap()
    .id;

  let outcome = synced.assign(id).await.unwrap();
  assert_eq!(outcome.mode, SyncMode::Remote);
  assert_eq!(outcome.value.status, Status::Assigned);
  assert_eq!(synced.store().get(id).unwrap().status, Status::Assigned);
  assert_eq!(synced.service().status_of(id), Some(Status::Assigned));
}

#[tokio::test]
async fn unavailable_service_degrades_to_local_mutation() {
  let mut synced = SyncedStore::new(FakeService::new(seed::requests()));
  synced.refresh().await;
  let id = synced
    .requests()
    .iter()
    .find(|r| r.status == Status::Open)
    .unwrap()
    .id;

  synced.service().set_online(false);
  let outcome = synced.resolve(id).await.unwrap();
  assert!(outcome.is_degraded());
  assert_eq!(synced.mode(), SyncMode::Degraded);
  assert_eq!(synced.store().get(id).unwrap().status, Status::Resolved);
  // The service never saw the change.
  assert_eq!(synced.service().status_of(id), Some(Status::Open));

  // Local invariants still hold while degraded.
  assert!(synced.assign(id).await.is_err());
  assert_eq!(synced.store().get(id).unwrap().status, Status::Resolved);
}

#[tokio::test]
async fn rejected_transition_adopts_remote_copy() {
  let requests = seed::requests();
  let id = requests[0].id;
  let mut synced = SyncedStore::new(FakeService::new(requests));
  synced.refresh().await;

  // Someone else resolves the request; the mirror still believes it is open.
  synced.service().inner.lock().unwrap().resolve(id).unwrap();
  assert_eq!(synced.store().get(id).unwrap().status, Status::Open);

  let err = synced.assign(id).await.unwrap_err();
  assert!(matches!(err, Error::InvalidTransition { from: Status::Resolved, .. }));
  assert_eq!(synced.store().get(id).unwrap().status, Status::Resolved);
  assert_eq!(synced.mode(), SyncMode::Remote);
}

#[tokio::test]
async fn unknown_id_never_reaches_the_service() {
  let mut synced = SyncedStore::new(FakeService::new(seed::requests()));
  synced.refresh().await;
  let before = synced.service().calls();

  let missing = Uuid::new_v4();
  assert_eq!(synced.assign(missing).await.unwrap_err(), Error::RequestNotFound(missing));
  assert_eq!(synced.service().calls(), before);
}

#[tokio::test]
async fn create_goes_remote_then_local_when_offline() {
  let mut synced = SyncedStore::new(FakeService::new(Vec::new()));
  synced.refresh().await;

  let online = synced
    .create(new_request(Category::Shelter, "Bed tonight"))
    .await
    .unwrap();
  assert_eq!(online.mode, SyncMode::Remote);
  assert_eq!(synced.requests()[0].id, online.value.id);

  synced.service().set_online(false);
  let offline = synced
    .create(new_request(Category::Food, "Hot meal"))
    .await
    .unwrap();
  assert!(offline.is_degraded());
  assert_eq!(offline.value.status, Status::Open);
  assert_eq!(synced.requests().len(), 2);
  assert_ne!(online.value.id, offline.value.id);
}

#[tokio::test]
async fn invalid_create_is_rejected_before_any_call() {
  let mut synced = SyncedStore::new(FakeService::new(Vec::new()));
  let err = synced
    .create(new_request(Category::Food, ""))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  assert_eq!(synced.service().calls(), 0);
}

#[tokio::test]
async fn cycle_newest_tone_through_the_service() {
  let mut synced = SyncedStore::new(FakeService::new(seed::requests()));
  synced.refresh().await;
  let newest = synced.store().newest().unwrap().clone();

  let outcome = synced.cycle_newest_tone().await.unwrap();
  assert_eq!(outcome.value.id, newest.id);
  assert_eq!(outcome.value.tone, newest.tone.next());
  assert_eq!(synced.store().get(newest.id).unwrap().tone, newest.tone.next());
}
