//! Intake form pane; replaces the detail panel while a request is typed in.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use super::category_color;
use crate::{app::App, intake::Field};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let form = &app.intake;

  let block = Block::default()
    .title(" Request help ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();
  for field in Field::ALL {
    let focused = field == form.focus;
    let label_style = if focused {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Cyan)
    };

    let value = match field {
      Field::Category => Span::styled(
        format!("‹ {} ›", form.category),
        Style::default()
          .fg(category_color(form.category))
          .add_modifier(Modifier::BOLD),
      ),
      _ => {
        let text = form.value(field);
        let cursor = if focused { "_" } else { "" };
        Span::raw(format!("{text}{cursor}"))
      }
    };

    lines.push(Line::from(vec![
      Span::styled(format!(" {:<18}", field.label()), label_style),
      Span::raw(" "),
      value,
    ]));
  }

  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    " Name, phone and address are optional. A blank address uses the coordinates.",
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines), inner);
}
