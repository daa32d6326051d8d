//! Domain model for parcel persistence.
//!
//! # Responsibility
//! - Define the record shapes shared by repository and callers.
//!
//! # Invariants
//! - A parcel is identified by its store-assigned `ParcelNumber`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod parcel;
