//! # Shared Types Crate
//!
//! Cross-boundary types for the title-graph indexer: chain primitives
//! (addresses, hashes, token identifiers) and the decoded event payloads
//! the host runtime delivers to the core.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: everything that crosses the host/core
//!   seam is defined here.
//! - **Normalize Once**: the zero address is collapsed to `None` at the
//!   decode boundary via [`non_zero`]; core logic never compares against
//!   the sentinel again.

pub mod events;
pub mod primitives;

pub use events::*;
pub use primitives::*;
