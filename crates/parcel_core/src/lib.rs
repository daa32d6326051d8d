//! Persistence layer for parcel shipment records.
//!
//! A thin repository over one SQLite table: add, fetch by number or client,
//! update status or address, and delete.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, open_db_with_options, DbError, DbOptions, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
pub use repo::parcel_repo::{ParcelRepository, RepoError, RepoResult, SqliteParcelRepository};
