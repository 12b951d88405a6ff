//! TUI rendering; orchestrates all panes.

pub mod intake_form;
pub mod request_detail;
pub mod request_list;

use bridge_core::{
  lifecycle::Status,
  request::{Category, Request, SafetyLevel, Tone},
};
use chrono::{DateTime, Local, Utc};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, NoticeKind, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(3), // stats tiles
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_stats(f, rows[1], app);
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d %H:%M").to_string();

  let left = Span::styled(
    " bridge  triage dashboard",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let (link_label, link_color) = if app.is_degraded() {
    ("● offline", Color::Yellow)
  } else {
    ("● live", Color::Green)
  };
  let link = Span::styled(format!("  {link_label}"), Style::default().fg(link_color));
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let used = (left.content.chars().count()
    + link.content.chars().count()
    + right.content.chars().count()) as u16;
  let pad = area.width.saturating_sub(used);

  let line = Line::from(vec![
    left,
    link,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Stats tiles ──────────────────────────────────────────────────────────────

fn draw_stats(f: &mut Frame, area: Rect, app: &App) {
  let stats = app.stats();
  let tiles = [
    ("Open", stats.open.to_string(), Color::Cyan),
    ("Assigned", stats.assigned.to_string(), Color::Yellow),
    ("Resolved", stats.resolved.to_string(), Color::Green),
    ("Critical", stats.critical.to_string(), Color::Red),
    (
      "Success",
      format!("{:.0}%", stats.success_rate * 100.0),
      Color::Magenta,
    ),
  ];

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, tiles.len() as u32); 5])
    .split(area);

  for ((label, value, color), col) in tiles.into_iter().zip(cols.iter()) {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let line = Line::from(vec![
      Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ),
      Span::styled(format!(" {label}"), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(line).block(block).centered(), *col);
  }
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  request_list::draw(f, cols[0], app);

  match app.screen {
    Screen::Intake => intake_form::draw(f, cols[1], app),
    _ => match app.selected_request() {
      Some(request) => request_detail::draw(f, cols[1], app, request),
      None => draw_empty_detail(f, cols[1]),
    },
  }
}

fn draw_empty_detail(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(vec![Span::styled(
      "Select a request and press Enter.",
      Style::default().fg(Color::DarkGray),
    )])),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    _ if app.search_active => ("SEARCH", "Type to search  Esc clear  Enter keep"),
    Screen::RequestList => (
      "LIST",
      "jk move  Enter open  f category  / search  s safety  a assign  r resolve  n call  t tone  i intake  g refresh  q quit",
    ),
    Screen::RequestDetail => (
      "DETAIL",
      "jk scroll  Esc back  a assign  r resolve  t tone  g refresh  q quit",
    ),
    Screen::Intake => (
      "INTAKE",
      "Tab/↑↓ field  ←→ category  Enter submit  Esc cancel",
    ),
  };

  let (text, color) = match &app.notice {
    Some(notice) => (notice.text.clone(), notice_color(notice.kind)),
    None => (hints.to_string(), Color::DarkGray),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(if app.is_degraded() { Color::Yellow } else { Color::Cyan })
      .add_modifier(Modifier::BOLD),
  );
  let text_span = Span::styled(format!("  {text}"), Style::default().fg(color));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, text_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared formatting ────────────────────────────────────────────────────────

fn notice_color(kind: NoticeKind) -> Color {
  match kind {
    NoticeKind::Info => Color::Gray,
    NoticeKind::Success => Color::Green,
    NoticeKind::Warning => Color::Yellow,
    NoticeKind::Error => Color::Red,
  }
}

pub(crate) fn category_color(category: Category) -> Color {
  match category {
    Category::Food => Color::Green,
    Category::Shelter => Color::Blue,
    Category::Legal => Color::Magenta,
    Category::Other => Color::Gray,
  }
}

pub(crate) fn tone_color(tone: Tone) -> Color {
  match tone {
    Tone::Calm => Color::Green,
    Tone::Anxious => Color::Yellow,
    Tone::Distressed => Color::Red,
  }
}

pub(crate) fn status_color(status: Status) -> Color {
  match status {
    Status::Open => Color::Cyan,
    Status::Assigned => Color::Yellow,
    Status::Resolved => Color::Green,
  }
}

/// `🚨 4/5`-style badge for a scored request.
pub(crate) fn safety_badge(request: &Request) -> Option<Span<'static>> {
  let score = request.safety_score?;
  let color = match SafetyLevel::of(score) {
    SafetyLevel::High => Color::Red,
    SafetyLevel::Elevated => Color::Yellow,
    SafetyLevel::Low => Color::Green,
  };
  Some(Span::styled(
    format!("🚨 {score}/5"),
    Style::default().fg(color).add_modifier(Modifier::BOLD),
  ))
}

/// Coarse relative time: minutes below an hour, whole hours above.
pub(crate) fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let minutes = (now - timestamp).num_minutes().max(0);
  if minutes < 60 {
    format!("{minutes}m ago")
  } else {
    format!("{}h ago", minutes / 60)
  }
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  #[test]
  fn time_ago_minutes_then_hours() {
    let now = Utc::now();
    assert_eq!(time_ago(now, now), "0m ago");
    assert_eq!(time_ago(now - Duration::minutes(5), now), "5m ago");
    assert_eq!(time_ago(now - Duration::minutes(59), now), "59m ago");
    assert_eq!(time_ago(now - Duration::minutes(60), now), "1h ago");
    assert_eq!(time_ago(now - Duration::minutes(150), now), "2h ago");
  }

  #[test]
  fn future_timestamps_clamp_to_zero() {
    let now = Utc::now();
    assert_eq!(time_ago(now + Duration::minutes(3), now), "0m ago");
  }

  #[test]
  fn badge_only_for_scored_requests() {
    let mut request = bridge_core::seed::requests().remove(0);
    request.safety_score = None;
    assert!(safety_badge(&request).is_none());
    request.safety_score = Some(4.0);
    assert_eq!(safety_badge(&request).unwrap().content, "🚨 4/5");
  }
}
