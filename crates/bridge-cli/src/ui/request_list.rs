//! Request list pane; left panel.

use chrono::Utc;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::{category_color, safety_badge, status_color, time_ago, tone_color};
use crate::app::App;

/// Render the request list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let visible = app.visible_requests();
  let total = app.synced.requests().len();

  let order = if app.sort_by_safety { "  by safety" } else { "" };
  let title = if visible.len() == total {
    format!(" Requests ({total}) [{}]{order} ", app.query.category)
  } else {
    format!(
      " Requests ({}/{total}) [{}]{order} ",
      visible.len(),
      app.query.category
    )
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let now = Utc::now();
  let items: Vec<ListItem> = visible
    .iter()
    .map(|request| {
      let mut header = vec![
        Span::styled(
          format!("{:<8}", request.category),
          Style::default()
            .fg(category_color(request.category))
            .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
          format!("{:<9}", request.status.label()),
          Style::default().fg(status_color(request.status)),
        ),
        Span::styled(
          format!("{:<11}", request.tone),
          Style::default().fg(tone_color(request.tone)),
        ),
        Span::styled(time_ago(request.timestamp, now), Style::default().fg(Color::DarkGray)),
      ];
      if let Some(badge) = safety_badge(request) {
        header.push(Span::raw("  "));
        header.push(badge);
      }

      ListItem::new(vec![
        Line::from(header),
        Line::from(vec![
          Span::raw("  "),
          Span::raw(request.description.clone()),
          Span::styled(
            format!("  {}", request.display_name()),
            Style::default().fg(Color::Gray),
          ),
        ]),
      ])
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Search bar at the bottom of the pane while typing or when a query is set.
  if (app.search_active || !app.query.text.is_empty()) && inner_area.height > 2 {
    let search_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let search_text = if app.search_active {
      format!("/{}_", app.query.text)
    } else {
      format!("/{}", app.query.text)
    };
    f.render_widget(
      Paragraph::new(search_text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  if visible.is_empty() {
    f.render_widget(
      Paragraph::new("No requests match.").style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("▌"),
    inner_area,
    &mut state,
  );
}
