//! # Title-Graph Test Suite
//!
//! Unified test crate for cross-module scenarios:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Host-like delivery harness and event fixtures
//! └── integration/      # Multi-event choreography
//!     ├── lifecycle.rs  # Full title lifecycle, issuance through shred
//!     └── out_of_order.rs # Cross-stream ordering and lazy reconstruction
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p title-graph-tests
//!
//! # By category
//! cargo test -p title-graph-tests integration::
//! ```

#![allow(dead_code)]

pub mod harness;
pub mod integration;
