//! Application state machine and event dispatcher.

use bridge_core::{
  Result,
  request::Request,
  resource::{RankedResource, ResourceKind, nearest},
  simulate,
  sync::{SyncMode, Synced, SyncedStore},
  view::{RequestQuery, Stats, compute_stats, rank_by_safety},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand_core::OsRng;
use uuid::Uuid;

use crate::{
  client::ApiClient,
  intake::{FormEvent, IntakeForm},
};

/// How many partner resources the detail pane suggests.
pub const NEARBY_LIMIT: usize = 3;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the request list.
  RequestList,
  /// Focus on the request detail pane.
  RequestDetail,
  /// The intake form replaces the detail pane.
  Intake,
}

// ─── Notices ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  Info,
  Success,
  Warning,
  Error,
}

/// One-line feedback shown in the status bar until the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub kind: NoticeKind,
  pub text: String,
}

impl Notice {
  fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
    Self {
      kind,
      text: text.into(),
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Local mirror of the server's requests and resources.
  pub synced: SyncedStore<ApiClient>,

  /// Category filter and search text applied to the list.
  pub query: RequestQuery,

  /// Whether the user is typing a search query.
  pub search_active: bool,

  /// Order the list by descending safety score instead of newest first.
  pub sort_by_safety: bool,

  /// Cursor position within the *visible* request list.
  pub list_cursor: usize,

  /// Scroll offset within the detail pane.
  pub detail_scroll: u16,

  /// The request shown in the detail pane. Purely local; never sent anywhere.
  pub selected_id: Option<Uuid>,

  pub intake: IntakeForm,

  pub notice: Option<Notice>,
}

impl App {
  /// Create an [`App`] with an empty mirror. Call [`App::load`] next.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::RequestList,
      synced: SyncedStore::new(client),
      query: RequestQuery::default(),
      search_active: false,
      sort_by_safety: false,
      list_cursor: 0,
      detail_scroll: 0,
      selected_id: None,
      intake: IntakeForm::default(),
      notice: None,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// (Re)load everything from the server, falling back to local data.
  pub async fn load(&mut self) {
    let mode = self.synced.refresh().await;
    self.clamp_cursor();
    if self.selected_request().is_none() {
      self.selected_id = None;
    }
    self.notice = Some(match mode {
      SyncMode::Remote => Notice::new(
        NoticeKind::Info,
        format!("Loaded {} requests", self.synced.requests().len()),
      ),
      SyncMode::Degraded => Notice::new(
        NoticeKind::Warning,
        format!(
          "Server {} unreachable; working offline",
          self.synced.service().base_url()
        ),
      ),
    });
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// Requests that pass the current query, in display order.
  pub fn visible_requests(&self) -> Vec<&Request> {
    let matched = self.query.apply(self.synced.requests());
    if self.sort_by_safety {
      rank_by_safety(matched)
    } else {
      matched
    }
  }

  /// The request under the list cursor, if any.
  pub fn cursor_request(&self) -> Option<&Request> {
    self.visible_requests().get(self.list_cursor).copied()
  }

  pub fn selected_request(&self) -> Option<&Request> {
    self
      .selected_id
      .and_then(|id| self.synced.store().get(id).ok())
  }

  /// Stats over the whole collection, regardless of the active filter.
  pub fn stats(&self) -> Stats { compute_stats(self.synced.requests()) }

  /// The partner resources closest to `request` that match its category.
  pub fn nearby_resources(&self, request: &Request) -> Vec<RankedResource> {
    nearest(
      self.synced.resources(),
      &request.location,
      Some(ResourceKind::for_category(request.category)),
      NEARBY_LIMIT,
    )
  }

  pub fn is_degraded(&self) -> bool { self.synced.mode() == SyncMode::Degraded }

  fn clamp_cursor(&mut self) {
    let len = self.visible_requests().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
  }

  /// The request an action key applies to: the open detail, else the cursor.
  fn target_id(&self) -> Option<Uuid> {
    match self.screen {
      Screen::RequestDetail => self.selected_id,
      _ => self.cursor_request().map(|r| r.id),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.search_active {
      self.handle_search_key(key);
      return true;
    }

    match self.screen {
      Screen::RequestList => self.handle_list_key(key).await,
      Screen::RequestDetail => self.handle_detail_key(key).await,
      Screen::Intake => {
        self.handle_intake_key(key).await;
        true
      }
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.query.text.clear();
      }
      KeyCode::Enter => self.search_active = false,
      KeyCode::Backspace => {
        self.query.text.pop();
      }
      KeyCode::Char(c) => self.query.text.push(c),
      _ => return,
    }
    self.list_cursor = 0;
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.visible_requests().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_request().map(|r| r.id) {
          self.selected_id = Some(id);
          self.detail_scroll = 0;
          self.screen = Screen::RequestDetail;
        }
      }

      KeyCode::Char('/') => {
        self.search_active = true;
        self.query.text.clear();
        self.list_cursor = 0;
      }
      KeyCode::Char('f') => {
        self.query.category = self.query.category.next();
        self.list_cursor = 0;
      }
      KeyCode::Char('s') => {
        self.sort_by_safety = !self.sort_by_safety;
        self.list_cursor = 0;
      }

      _ => self.handle_action_key(key).await,
    }
    true
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::RequestList;
        self.selected_id = None;
      }

      KeyCode::Down | KeyCode::Char('j') => {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      _ => self.handle_action_key(key).await,
    }
    true
  }

  /// Keys that act on data; shared by the list and detail screens.
  async fn handle_action_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('a') => {
        if let Some(id) = self.target_id() {
          let outcome = self.synced.assign(id).await;
          self.report(outcome, "Volunteer assigned to request");
        }
      }
      KeyCode::Char('r') => {
        if let Some(id) = self.target_id() {
          let outcome = self.synced.resolve(id).await;
          self.report(outcome, "Request marked as resolved");
        }
      }
      KeyCode::Char('n') => {
        let outcome = self.synced.create(simulate::new_call(&mut OsRng)).await;
        self.report(outcome, "New request received");
      }
      KeyCode::Char('t') => {
        let outcome = self.synced.cycle_newest_tone().await;
        self.report(outcome, "Tone updated for latest request");
      }
      KeyCode::Char('i') => {
        self.intake = IntakeForm::default();
        self.screen = Screen::Intake;
      }
      KeyCode::Char('g') => self.load().await,
      _ => {}
    }
  }

  async fn handle_intake_key(&mut self, key: KeyEvent) {
    match self.intake.handle_key(key) {
      FormEvent::Continue => {}
      FormEvent::Cancel => self.screen = Screen::RequestList,
      FormEvent::Submit => match self.intake.to_new_request() {
        Err(message) => self.notice = Some(Notice::new(NoticeKind::Error, message)),
        Ok(payload) => {
          let outcome = self.synced.create(payload).await;
          if outcome.is_ok() {
            self.intake = IntakeForm::default();
            self.screen = Screen::RequestList;
            self.list_cursor = 0;
          }
          self.report(outcome, "Request submitted");
        }
      },
    }
  }

  /// Turn the outcome of a store operation into a notice.
  fn report(&mut self, outcome: Result<Synced<Request>>, done: &str) {
    self.notice = Some(match outcome {
      Ok(synced) if synced.is_degraded() => {
        Notice::new(NoticeKind::Warning, format!("{done} (offline; saved locally)"))
      }
      Ok(_) => Notice::new(NoticeKind::Success, done),
      Err(e) => {
        tracing::info!(error = %e, "action refused");
        Notice::new(NoticeKind::Error, e.to_string())
      }
    });
    self.clamp_cursor();
  }
}
