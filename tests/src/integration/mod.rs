//! # Integration Scenarios
//!
//! Multi-event choreography through the public [`dispatch`] surface,
//! driven by the host-like harness. Each scenario delivers a realistic
//! event sequence and asserts the resulting entity graph.
//!
//! [`dispatch`]: title_indexer::dispatch

pub mod lifecycle;
pub mod out_of_order;
