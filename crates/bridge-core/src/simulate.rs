//! Simulated intake for demos: fabricates an incoming call from fixed
//! option sets.

use rand_core::RngCore;
use strum::IntoEnumIterator;

use crate::request::{Category, Location, NewRequest, Tone};

const DESCRIPTIONS: [&str; 5] = [
  "Need warm clothes for tonight",
  "Looking for food pantry nearby",
  "Lost my ID, need help with documentation",
  "Need transportation to shelter",
  "Looking for job placement services",
];

const GREETING: [&str; 2] = [
  "Hello, I need help.",
  "I understand. Let me connect you with the right resources.",
];

/// Uniform index below `len`.
fn pick(rng: &mut impl RngCore, len: usize) -> usize { (rng.next_u32() as usize) % len }

/// Uniform value in `[0, 1)`.
fn unit(rng: &mut impl RngCore) -> f64 { f64::from(rng.next_u32()) / (f64::from(u32::MAX) + 1.0) }

/// A random new-call payload, ready for [`crate::store::RequestStore::create`].
pub fn new_call(rng: &mut impl RngCore) -> NewRequest {
  let categories: Vec<Category> = Category::iter().collect();
  let tones: Vec<Tone> = Tone::iter().collect();

  let category = categories[pick(rng, categories.len())];
  let description = DESCRIPTIONS[pick(rng, DESCRIPTIONS.len())];
  let tone = tones[pick(rng, tones.len())];
  let lat = 37.76 + unit(rng) * 0.03;
  let lng = -122.49 + unit(rng) * 0.08;
  let name = (rng.next_u32() % 2 == 0).then(|| "New Caller".to_string());

  NewRequest {
    tone,
    name,
    conversation: GREETING.iter().map(|s| s.to_string()).collect(),
    memory: vec!["First time caller".into()],
    ..NewRequest::new(category, description, Location::new(lat, lng, "San Francisco, CA"))
  }
}
