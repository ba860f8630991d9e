//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the catalog.
//! - Isolate SQLite query details from reconciliation orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Absence on lookup is modelled as `Ok(None)`, not an error: "not found
//!   yet" is the routine signal that drives insert-if-absent.

pub mod package_repo;
