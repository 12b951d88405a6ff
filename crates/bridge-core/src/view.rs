//! Derived views over a request collection.
//!
//! Everything here is a pure function of its input: filters keep the input
//! order, and statistics are recomputed from scratch on every call.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
  lifecycle::Status,
  request::{Category, Request},
};

// ─── Category filter ─────────────────────────────────────────────────────────

/// Either every category or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
  #[default]
  All,
  Only(Category),
}

impl CategoryFilter {
  pub fn matches(self, category: Category) -> bool {
    match self {
      Self::All => true,
      Self::Only(c) => c == category,
    }
  }

  /// The filter after this one in `All → Food → Shelter → Legal → Other → All`.
  pub fn next(self) -> CategoryFilter {
    let order: Vec<Self> = std::iter::once(Self::All)
      .chain(Category::iter().map(Self::Only))
      .collect();
    let pos = order.iter().position(|f| *f == self).unwrap_or(0);
    order[(pos + 1) % order.len()]
  }
}

impl fmt::Display for CategoryFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str("All"),
      Self::Only(c) => write!(f, "{c}"),
    }
  }
}

impl FromStr for CategoryFilter {
  type Err = strum::ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.trim().eq_ignore_ascii_case("all") {
      Ok(Self::All)
    } else {
      s.trim().parse().map(Self::Only)
    }
  }
}

impl From<Category> for CategoryFilter {
  fn from(c: Category) -> Self { Self::Only(c) }
}

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Requests whose category passes `filter`, in input order.
pub fn filter_by_category<'a, I>(requests: I, filter: CategoryFilter) -> Vec<&'a Request>
where
  I: IntoIterator<Item = &'a Request>,
{
  requests
    .into_iter()
    .filter(|r| filter.matches(r.category))
    .collect()
}

/// Requests whose description or name contains `query`, ignoring case. A
/// blank query matches everything.
pub fn filter_by_search<'a, I>(requests: I, query: &str) -> Vec<&'a Request>
where
  I: IntoIterator<Item = &'a Request>,
{
  let needle = query.trim().to_lowercase();
  requests
    .into_iter()
    .filter(|r| needle.is_empty() || matches_text(r, &needle))
    .collect()
}

fn matches_text(request: &Request, needle: &str) -> bool {
  request.description.to_lowercase().contains(needle)
    || request
      .name
      .as_deref()
      .is_some_and(|n| n.to_lowercase().contains(needle))
}

/// A category filter and a search query, applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQuery {
  pub category: CategoryFilter,
  pub text:     String,
}

impl RequestQuery {
  pub fn apply<'a, I>(&self, requests: I) -> Vec<&'a Request>
  where
    I: IntoIterator<Item = &'a Request>,
  {
    filter_by_search(filter_by_category(requests, self.category), &self.text)
  }
}

/// Requests ordered by descending safety score; unscored requests go last.
/// Equal scores keep input order.
pub fn rank_by_safety<'a, I>(requests: I) -> Vec<&'a Request>
where
  I: IntoIterator<Item = &'a Request>,
{
  let mut ranked: Vec<&Request> = requests.into_iter().collect();
  ranked.sort_by(|a, b| {
    let a = a.safety_score.unwrap_or(f32::NEG_INFINITY);
    let b = b.safety_score.unwrap_or(f32::NEG_INFINITY);
    b.total_cmp(&a)
  });
  ranked
}

// ─── Statistics ──────────────────────────────────────────────────────────────

/// Aggregate counts for the dashboard tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub total:        usize,
  pub open:         usize,
  pub assigned:     usize,
  pub resolved:     usize,
  /// Open requests with a safety score of 4 or more.
  pub critical:     usize,
  /// `resolved / total`, or 0 for an empty collection.
  pub success_rate: f64,
}

pub fn compute_stats<'a, I>(requests: I) -> Stats
where
  I: IntoIterator<Item = &'a Request>,
{
  let mut stats = Stats::default();
  for request in requests {
    stats.total += 1;
    match request.status {
      Status::Open => stats.open += 1,
      Status::Assigned => stats.assigned += 1,
      Status::Resolved => stats.resolved += 1,
    }
    if request.is_critical() {
      stats.critical += 1;
    }
  }
  if stats.total > 0 {
    stats.success_rate = stats.resolved as f64 / stats.total as f64;
  }
  stats
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seed;

  #[test]
  fn category_filter_cycles_back_to_all() {
    let mut filter = CategoryFilter::All;
    let mut seen = vec![filter];
    for _ in 0..4 {
      filter = filter.next();
      seen.push(filter);
    }
    assert_eq!(seen, vec![
      CategoryFilter::All,
      CategoryFilter::Only(Category::Food),
      CategoryFilter::Only(Category::Shelter),
      CategoryFilter::Only(Category::Legal),
      CategoryFilter::Only(Category::Other),
    ]);
    assert_eq!(filter.next(), CategoryFilter::All);
  }

  #[test]
  fn category_filter_parses() {
    assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
    assert_eq!(
      "shelter".parse::<CategoryFilter>().unwrap(),
      CategoryFilter::Only(Category::Shelter)
    );
    assert!("clothes".parse::<CategoryFilter>().is_err());
  }

  #[test]
  fn search_ignores_blank_query() {
    let requests = seed::requests();
    assert_eq!(filter_by_search(&requests, "   ").len(), requests.len());
  }

  #[test]
  fn search_matches_name_and_description() {
    let requests = seed::requests();
    let by_name = filter_by_search(&requests, "JAMES");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].category, Category::Legal);

    let by_text = filter_by_search(&requests, "tonight");
    assert_eq!(by_text.len(), 1);
    assert_eq!(by_text[0].category, Category::Shelter);
  }

  #[test]
  fn query_combines_both_filters() {
    let requests = seed::requests();
    let query = RequestQuery {
      category: CategoryFilter::Only(Category::Shelter),
      text:     "maria".into(),
    };
    assert!(query.apply(&requests).is_empty());
  }

  #[test]
  fn rank_by_safety_puts_unscored_last() {
    let requests = seed::requests();
    let ranked = rank_by_safety(&requests);
    let scores: Vec<_> = ranked.iter().map(|r| r.safety_score).collect();
    assert_eq!(scores, vec![Some(4.0), Some(3.0), Some(1.0), None]);
  }

  #[test]
  fn stats_over_seed_data() {
    let stats = compute_stats(&seed::requests());
    assert_eq!(stats.total, 4);
    assert_eq!(stats.open, 3);
    assert_eq!(stats.assigned, 1);
    assert_eq!(stats.resolved, 0);
    assert_eq!(stats.critical, 1);
    assert_eq!(stats.success_rate, 0.0);
  }
}
