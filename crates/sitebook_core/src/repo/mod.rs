//! Repository layer abstractions and the SQLite-backed store.
//!
//! # Responsibility
//! - Define the domain store contract used by services.
//! - Isolate SQL details from service/report orchestration.
//!
//! # Invariants
//! - Write paths validate records before any SQL mutation.
//! - Association queries filter; an unmatched id yields an empty list.
//! - Keyed lookups return `Option`, never a not-found error.

pub mod project_repo;
