//! Partner resources (read-only locations offering food, shelter, legal or
//! medical help) and proximity ranking over them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::request::{Category, Location};

/// Mean earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// The service a partner organisation offers.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
  Food,
  Shelter,
  Legal,
  Medical,
}

impl ResourceKind {
  /// The kind of resource that serves requests of `category`.
  pub fn for_category(category: Category) -> ResourceKind {
    match category {
      Category::Food => Self::Food,
      Category::Shelter => Self::Shelter,
      Category::Legal => Self::Legal,
      Category::Other => Self::Medical,
    }
  }
}

/// A partner organisation location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
  pub id:       String,
  #[serde(rename = "type")]
  pub kind:     ResourceKind,
  pub name:     String,
  pub location: Location,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hours:    Option<String>,
  #[serde(default)]
  pub services: Vec<String>,
}

/// A resource together with its distance from a search origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResource {
  #[serde(flatten)]
  pub resource: Resource,
  /// Great-circle distance in miles, rounded to two decimals.
  pub distance: f64,
}

/// Great-circle distance between two points, in miles.
pub fn distance_miles(a: &Location, b: &Location) -> f64 {
  let lat_a = a.lat.to_radians();
  let lat_b = b.lat.to_radians();
  let d_lat = (b.lat - a.lat).to_radians();
  let d_lng = (b.lng - a.lng).to_radians();

  let h = (d_lat / 2.0).sin().powi(2)
    + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
  let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
  EARTH_RADIUS_MILES * c
}

/// The `limit` resources closest to `origin`, optionally restricted to one
/// kind. Equal distances keep directory order.
pub fn nearest(
  resources: &[Resource],
  origin: &Location,
  kind: Option<ResourceKind>,
  limit: usize,
) -> Vec<RankedResource> {
  let mut ranked: Vec<RankedResource> = resources
    .iter()
    .filter(|r| kind.is_none_or(|k| r.kind == k))
    .map(|r| RankedResource {
      resource: r.clone(),
      distance: (distance_miles(origin, &r.location) * 100.0).round() / 100.0,
    })
    .collect();
  ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
  ranked.truncate(limit);
  ranked
}
