//! Parcel domain model.
//!
//! # Responsibility
//! - Define the shipment record persisted in the `parcels` table.
//! - Map `ParcelStatus` to and from its stored text form without loss.
//!
//! # Invariants
//! - `number` is assigned by the store on insert; callers never pick it.
//! - `client` and `created_at` are fixed once the parcel is created.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned parcel identifier (`parcels.number`).
pub type ParcelNumber = i64;

/// Opaque reference to the owning client (`parcels.client`).
pub type ClientId = i64;

/// Delivery state of a parcel.
///
/// The named variants cover the states this crate knows about. Any other text
/// a caller stores is kept verbatim in `Other`, so reads never reject a row.
/// Any state may overwrite any other; transition rules belong to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParcelStatus {
    /// Accepted, not yet handed to a carrier.
    Registered,
    /// In transit.
    Sent,
    /// Handed to the recipient.
    Delivered,
    /// Caller-defined state outside the named set.
    ///
    /// Build it through `From`/`parse` so known text maps to its named variant.
    Other(String),
}

impl ParcelStatus {
    /// Text stored in `parcels.status`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Other(text) => text.as_str(),
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ParcelStatus {
    fn from(value: &str) -> Self {
        match value {
            "registered" => Self::Registered,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ParcelStatus {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<ParcelStatus> for String {
    fn from(value: ParcelStatus) -> Self {
        match value {
            ParcelStatus::Other(text) => text,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ParcelStatus {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(value))
    }
}

/// One shipment record.
///
/// Field names match the `parcels` columns, both in SQL and on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// `0` until the store assigns a number.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    /// Free-form delivery address.
    pub address: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl Parcel {
    /// Creates a `registered` parcel stamped with the current UTC time.
    pub fn new(client: ClientId, address: impl Into<String>) -> Self {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        Self::with_created_at(client, ParcelStatus::Registered, address, created_at)
    }

    /// Creates an unsaved parcel from explicit field values.
    ///
    /// Used by import paths and fixtures where `created_at` is already known.
    pub fn with_created_at(
        client: ClientId,
        status: ParcelStatus,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status,
            address: address.into(),
            created_at: created_at.into(),
        }
    }
}
