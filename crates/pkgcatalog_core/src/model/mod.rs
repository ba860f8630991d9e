//! Domain model for catalog entries.
//!
//! # Responsibility
//! - Define the canonical `Package` record shared by all import passes.
//! - Own the "missing summary" conventions used by the backfill pass.

pub mod package;
