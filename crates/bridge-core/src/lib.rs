//! Core types and operations for the Bridge triage dashboard.
//!
//! This crate has no HTTP or terminal dependencies. The
//! API, server and dashboard crates all depend on it.

pub mod error;
pub mod lifecycle;
pub mod request;
pub mod resource;
pub mod seed;
pub mod service;
pub mod simulate;
pub mod store;
pub mod sync;
pub mod view;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
