//! Request detail pane; right panel.

use bridge_core::request::Request;
use chrono::Utc;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{category_color, safety_badge, status_color, time_ago, tone_color};
use crate::app::App;

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render `request` into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, request: &Request) {
  let block = Block::default()
    .title(format!(" {} ", request.display_name()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();

  // Badges.
  let mut badges = vec![
    Span::styled(
      format!("{} ", request.category),
      Style::default()
        .fg(category_color(request.category))
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(
      format!(" {} ", request.status.label()),
      Style::default().fg(Color::Black).bg(status_color(request.status)),
    ),
    Span::styled(
      format!("  {}", request.tone),
      Style::default().fg(tone_color(request.tone)),
    ),
  ];
  if let Some(badge) = safety_badge(request) {
    badges.push(Span::raw("  "));
    badges.push(badge);
  }
  lines.push(Line::from(badges));
  lines.push(Line::from(Span::styled(
    request.description.clone(),
    Style::default().add_modifier(Modifier::BOLD),
  )));
  lines.push(Line::from(""));

  // Contact and location.
  lines.push(field("name", request.display_name().to_string()));
  if let Some(phone) = &request.phone {
    lines.push(field("phone", phone.clone()));
  }
  lines.push(field("address", request.location.address.clone()));
  lines.push(field(
    "coordinates",
    format!("{:.4}, {:.4}", request.location.lat, request.location.lng),
  ));
  lines.push(field("received", time_ago(request.timestamp, Utc::now())));

  // Transcript: the caller speaks first, turns alternate.
  if !request.conversation.is_empty() {
    lines.push(Line::from(""));
    lines.push(section("Transcript"));
    for (i, turn) in request.conversation.iter().enumerate() {
      let (speaker, color) = if i % 2 == 0 {
        ("User", Color::Cyan)
      } else {
        ("Assistant", Color::Magenta)
      };
      lines.push(Line::from(vec![
        Span::styled(format!("{speaker:>10}: "), Style::default().fg(color)),
        Span::raw(turn.clone()),
      ]));
    }
  }

  if !request.memory.is_empty() {
    lines.push(Line::from(""));
    lines.push(section("Memory"));
    for note in &request.memory {
      lines.push(Line::from(vec![
        Span::styled("  • ", Style::default().fg(Color::DarkGray)),
        Span::raw(note.clone()),
      ]));
    }
  }

  // Partner suggestions.
  lines.push(Line::from(""));
  lines.push(section("Nearby resources"));
  let nearby = app.nearby_resources(request);
  if nearby.is_empty() {
    lines.push(Line::from(Span::styled(
      "  none in the directory",
      Style::default().fg(Color::DarkGray),
    )));
  }
  for ranked in nearby {
    let resource = ranked.resource;
    lines.push(Line::from(vec![
      Span::styled(
        format!("  {:>5.2} mi  ", ranked.distance),
        Style::default().fg(Color::Yellow),
      ),
      Span::styled(resource.name, Style::default().add_modifier(Modifier::BOLD)),
    ]));
    let extra: Vec<String> = [resource.phone, resource.hours]
      .into_iter()
      .flatten()
      .collect();
    if !extra.is_empty() {
      lines.push(Line::from(Span::styled(
        format!("            {}", extra.join("  ·  ")),
        Style::default().fg(Color::Gray),
      )));
    }
  }

  let para = Paragraph::new(lines)
    .wrap(Wrap { trim: false })
    .scroll((app.detail_scroll, 0));
  f.render_widget(para, inner);
}

// ─── Line helpers ─────────────────────────────────────────────────────────────

fn field(label: &str, value: String) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("{label:<14}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::raw(value),
  ])
}

fn section(title: &str) -> Line<'static> {
  Line::from(Span::styled(
    title.to_string(),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
  ))
}
