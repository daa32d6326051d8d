//! Parcel repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the CRUD surface over the `parcels` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every operation is exactly one parameterized statement.
//! - `number` is always assigned by SQLite, never bound from caller input.
//! - Only `get` reports `NotFound`; updates and deletes on a missing number
//!   succeed with zero rows affected.

use crate::db::DbError;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCELS_TABLE: &str = "parcels";
const REQUIRED_COLUMNS: &[&str] = &["number", "client", "status", "address", "created_at"];

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcels";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for parcel persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// `get` matched no row.
    NotFound(ParcelNumber),
    /// The store rejected or failed a statement.
    Storage {
        operation: &'static str,
        parcel: Option<ParcelNumber>,
        client: Option<ClientId>,
        source: DbError,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::Storage {
                operation,
                parcel,
                client,
                source,
            } => {
                write!(f, "parcel {operation} failed")?;
                if let Some(number) = parcel {
                    write!(f, " for number {number}")?;
                }
                if let Some(client) = client {
                    write!(f, " for client {client}")?;
                }
                write!(f, ": {source}")
            }
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage { source, .. } => Some(source),
            Self::NotFound(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl RepoError {
    /// Returns whether this error means the parcel does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Repository interface for parcel CRUD operations.
pub trait ParcelRepository {
    /// Inserts a parcel and returns the number assigned by the store.
    ///
    /// `parcel.number` is ignored.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    /// Fetches one parcel, or `RepoError::NotFound`.
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Lists all parcels owned by `client` in store order.
    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> RepoResult<()>;
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Hard-deletes one parcel.
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel repository.
///
/// Borrows a `rusqlite::Connection`, which is `Send` but not `Sync`, so the
/// repository is neither `Send` nor `Sync` and stays on the thread that owns
/// the connection. Concurrent callers each open their own connection to the
/// same database file; SQLite serializes the statements.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    /// Wraps a connection without inspecting its schema.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking that `parcels` has every column
    /// this repository reads or writes.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_parcels_table(conn)?;
        Ok(Self::new(conn))
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        self.conn
            .execute(
                "INSERT INTO parcels (client, status, address, created_at)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    parcel.client,
                    parcel.status.as_str(),
                    parcel.address.as_str(),
                    parcel.created_at.as_str(),
                ],
            )
            .map_err(|err| storage_error("add", None, None, err))?;

        let number = self.conn.last_insert_rowid();
        debug!(
            "event=parcel_add module=repo status=ok number={} client={}",
            number, parcel.client
        );
        Ok(number)
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let row = self
            .conn
            .query_row(
                &format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"),
                [number],
                read_parcel_row,
            )
            .optional()
            .map_err(|err| storage_error("get", Some(number), None, err))?;

        match row {
            Some(parcel) => Ok(parcel),
            None => {
                debug!("event=parcel_get module=repo status=not_found number={number}");
                Err(RepoError::NotFound(number))
            }
        }
    }

    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let parcels = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE client = ?1;"))
            .and_then(|mut stmt| {
                let rows = stmt
                    .query_map([client], read_parcel_row)?
                    .collect::<rusqlite::Result<Vec<_>>>();
                rows
            })
            .map_err(|err| storage_error("get_by_client", None, Some(client), err))?;

        debug!(
            "event=parcel_get_by_client module=repo status=ok client={} count={}",
            client,
            parcels.len()
        );
        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE parcels SET status = ?1 WHERE number = ?2;",
                params![status.as_str(), number],
            )
            .map_err(|err| storage_error("set_status", Some(number), None, err))?;

        log_mutation("parcel_set_status", number, changed);
        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE parcels SET address = ?1 WHERE number = ?2;",
                params![address, number],
            )
            .map_err(|err| storage_error("set_address", Some(number), None, err))?;

        log_mutation("parcel_set_address", number, changed);
        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM parcels WHERE number = ?1;", [number])
            .map_err(|err| storage_error("delete", Some(number), None, err))?;

        log_mutation("parcel_delete", number, changed);
        Ok(())
    }
}

fn read_parcel_row(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status: ParcelStatus::from(row.get::<_, String>("status")?),
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

fn storage_error(
    operation: &'static str,
    parcel: Option<ParcelNumber>,
    client: Option<ClientId>,
    err: rusqlite::Error,
) -> RepoError {
    warn!(
        "event=parcel_{operation} module=repo status=error number={} client={} error={err}",
        parcel.map_or_else(|| "-".to_string(), |number| number.to_string()),
        client.map_or_else(|| "-".to_string(), |client| client.to_string())
    );
    RepoError::Storage {
        operation,
        parcel,
        client,
        source: DbError::Sqlite(err),
    }
}

fn log_mutation(event: &str, number: ParcelNumber, changed: usize) {
    if changed == 0 {
        debug!("event={event} module=repo status=noop number={number} rows_affected=0");
    } else {
        debug!("event={event} module=repo status=ok number={number} rows_affected={changed}");
    }
}

fn ensure_parcels_table(conn: &Connection) -> RepoResult<()> {
    let columns = conn
        .prepare(&format!("PRAGMA table_info({PARCELS_TABLE});"))
        .and_then(|mut stmt| {
            let names = stmt
                .query_map([], |row| row.get::<_, String>("name"))?
                .collect::<rusqlite::Result<Vec<_>>>();
            names
        })
        .map_err(|err| storage_error("schema_check", None, None, err))?;

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(PARCELS_TABLE));
    }

    for &column in REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: PARCELS_TABLE,
                column,
            });
        }
    }

    Ok(())
}
