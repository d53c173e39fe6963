//! Shared utilities for ceasefire
//!
//! This crate provides:
//! - ID types (PlayerId, FactionId)
//! - Monotonic time for countdown enforcement
//! - Human-readable duration formatting for chat replies

mod ids;
mod time;

pub use ids::*;
pub use time::*;
