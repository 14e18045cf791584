//! Client and patient record types.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The two record families the server stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// Clinic client (an animal's owner).
    Client,
    /// Patient (an animal).
    Patient,
}

/// Rejected record type tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown record type '{0}'")]
pub struct UnknownRecordKind(pub String);

impl RecordKind {
    /// Wire tag for this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Patient => "patient",
        }
    }
}

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "client" => Ok(Self::Client),
            "patient" => Ok(Self::Patient),
            other => Err(UnknownRecordKind(other.to_owned())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.tag())
    }
}

/// A clinic client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    /// Record identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact details such as phone numbers and email addresses.
    pub contact: Vec<String>,
}

/// A patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    /// Record identifier.
    pub id: String,
    /// Patient name.
    pub name: String,
    /// Species, free text.
    pub species: String,
    /// Identifiers of the owning clients.
    pub owners: Vec<String>,
}

/// Any stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A client record.
    Client(ClientRecord),
    /// A patient record.
    Patient(PatientRecord),
}

impl Record {
    /// Record family.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Client(_) => RecordKind::Client,
            Self::Patient(_) => RecordKind::Patient,
        }
    }

    /// Record identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Client(client) => &client.id,
            Self::Patient(patient) => &patient.id,
        }
    }
}

impl From<ClientRecord> for Record {
    fn from(client: ClientRecord) -> Self {
        Self::Client(client)
    }
}

impl From<PatientRecord> for Record {
    fn from(patient: PatientRecord) -> Self {
        Self::Patient(patient)
    }
}
