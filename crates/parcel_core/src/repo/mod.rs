//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the parcel data access contract.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repository APIs separate semantic errors (`NotFound`) from store
//!   failures (`Storage`).

pub mod parcel_repo;
