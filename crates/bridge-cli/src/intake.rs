//! Intake form state: the fields a caller's request is typed into before it
//! is submitted as a [`NewRequest`].

use bridge_core::request::{Category, Location, NewRequest};
use crossterm::event::{KeyCode, KeyEvent};

// ─── Fields ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Category,
  Description,
  Name,
  Phone,
  Address,
  Lat,
  Lng,
}

impl Field {
  pub const ALL: [Field; 7] = [
    Field::Category,
    Field::Description,
    Field::Name,
    Field::Phone,
    Field::Address,
    Field::Lat,
    Field::Lng,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::Category => "Category",
      Self::Description => "What do you need?",
      Self::Name => "Name",
      Self::Phone => "Phone",
      Self::Address => "Address",
      Self::Lat => "Latitude",
      Self::Lng => "Longitude",
    }
  }

  fn index(self) -> usize {
    Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
  }

  fn next(self) -> Field { Self::ALL[(self.index() + 1) % Self::ALL.len()] }

  fn prev(self) -> Field {
    Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

/// What the app should do after the form has seen a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
  Continue,
  Cancel,
  Submit,
}

// ─── Form ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct IntakeForm {
  pub category:    Category,
  pub description: String,
  pub name:        String,
  pub phone:       String,
  pub address:     String,
  pub lat:         String,
  pub lng:         String,
  pub focus:       Field,
}

impl Default for IntakeForm {
  fn default() -> Self {
    Self {
      category:    Category::Food,
      description: String::new(),
      name:        String::new(),
      phone:       String::new(),
      address:     String::new(),
      lat:         String::new(),
      lng:         String::new(),
      focus:       Field::Category,
    }
  }
}

impl IntakeForm {
  /// Text shown for `field`.
  pub fn value(&self, field: Field) -> String {
    match field {
      Field::Category => self.category.to_string(),
      Field::Description => self.description.clone(),
      Field::Name => self.name.clone(),
      Field::Phone => self.phone.clone(),
      Field::Address => self.address.clone(),
      Field::Lat => self.lat.clone(),
      Field::Lng => self.lng.clone(),
    }
  }

  fn text_mut(&mut self, field: Field) -> Option<&mut String> {
    match field {
      Field::Category => None,
      Field::Description => Some(&mut self.description),
      Field::Name => Some(&mut self.name),
      Field::Phone => Some(&mut self.phone),
      Field::Address => Some(&mut self.address),
      Field::Lat => Some(&mut self.lat),
      Field::Lng => Some(&mut self.lng),
    }
  }

  fn cycle_category(&mut self, forward: bool) {
    use Category::*;
    let order = [Food, Shelter, Legal, Other];
    let at = order.iter().position(|c| *c == self.category).unwrap_or(0);
    let step = if forward { 1 } else { order.len() - 1 };
    self.category = order[(at + step) % order.len()];
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
    match key.code {
      KeyCode::Esc => return FormEvent::Cancel,
      KeyCode::Enter => return FormEvent::Submit,
      KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
      KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
      KeyCode::Left if self.focus == Field::Category => self.cycle_category(false),
      KeyCode::Right | KeyCode::Char(' ') if self.focus == Field::Category => {
        self.cycle_category(true)
      }
      KeyCode::Backspace => {
        if let Some(text) = self.text_mut(self.focus) {
          text.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(text) = self.text_mut(self.focus) {
          text.push(c);
        }
      }
      _ => {}
    }
    FormEvent::Continue
  }

  /// Build the submission. The description doubles as the first transcript
  /// line; a blank address falls back to the coordinates.
  pub fn to_new_request(&self) -> Result<NewRequest, String> {
    let lat = parse_coordinate(&self.lat, Field::Lat)?;
    let lng = parse_coordinate(&self.lng, Field::Lng)?;
    let address = match self.address.trim() {
      "" => format!("{lat:.4}, {lng:.4}"),
      given => given.to_string(),
    };

    let description = self.description.trim();
    let mut request = NewRequest::new(self.category, description, Location::new(lat, lng, address));
    request.name = Some(self.name.clone());
    request.phone = Some(self.phone.clone());
    if !description.is_empty() {
      request.conversation = vec![description.to_string()];
    }
    request.normalize().map_err(|e| e.to_string())
  }
}

fn parse_coordinate(raw: &str, field: Field) -> Result<f64, String> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(format!("{} is required", field.label().to_lowercase()));
  }
  raw
    .parse()
    .map_err(|_| format!("{} must be a number, got {raw:?}", field.label().to_lowercase()))
}
