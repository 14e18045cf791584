//! Conversion between records and their wire tuples, plus canonical replies.
//!
//! Records travel as positional tuples led by their type tag:
//!
//! ```text
//! ("client" "c-1" "Bobby Tables" ("396-555-3213" "bobtables@example.com"))
//! ("patient" "p-1" "Rex" "dog" ("c-1"))
//! ```

use thiserror::Error;
use vetclix_sexp::{Mapping, StructureError, Value, ValueKind, structure};

use super::model::{ClientRecord, PatientRecord, Record, RecordKind};
use crate::dispatch::ErrorKind;
use crate::permissions::Permissions;

/// Field names of a client tuple.
pub const CLIENT_FIELDS: [&str; 4] = ["type", "id", "name", "contact"];

/// Field names of a patient tuple.
pub const PATIENT_FIELDS: [&str; 5] = ["type", "id", "name", "species", "owners"];

const ERROR_TAG: &str = "error";
const SUCCESS_TAG: &str = "ok";
const PERMISSIONS_TAG: &str = "permissions";

/// Errors raised while reading a record tuple.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// The tuple has the wrong number of fields.
    #[error("record tuple has the wrong shape: {0}")]
    Shape(#[from] StructureError),
    /// The leading type tag names a different record family.
    #[error("expected a {expected} record but found tag {found}")]
    WrongTag {
        /// Family the caller asked for.
        expected: RecordKind,
        /// Rendered tag that was present.
        found: String,
    },
    /// A field holds the wrong kind of value.
    #[error("field '{field}' must be a {expected}")]
    FieldType {
        /// Offending field.
        field: &'static str,
        /// Kind the field requires.
        expected: ValueKind,
    },
}

/// Structural check for a `set-client` body.
#[must_use]
pub fn verify_client(body: &[Value]) -> bool {
    matches!(
        body,
        [Value::Text(tag), Value::Text(_), Value::Text(_), Value::List(contact)]
            if tag == RecordKind::Client.tag() && all_text(contact)
    )
}

/// Structural check for a `set-patient` body.
#[must_use]
pub fn verify_patient(body: &[Value]) -> bool {
    matches!(
        body,
        [
            Value::Text(tag),
            Value::Text(_),
            Value::Text(_),
            Value::Text(_),
            Value::List(owners),
        ] if tag == RecordKind::Patient.tag() && all_text(owners)
    )
}

/// Reads a client tuple.
///
/// # Errors
///
/// Returns [`MarshalError`] when the tuple does not describe a client.
pub fn parse_client(body: &[Value]) -> Result<ClientRecord, MarshalError> {
    let fields = structure(body, &CLIENT_FIELDS)?;
    expect_tag(&fields, RecordKind::Client)?;
    Ok(ClientRecord {
        id: text_field(&fields, "id")?,
        name: text_field(&fields, "name")?,
        contact: text_list_field(&fields, "contact")?,
    })
}

/// Reads a patient tuple.
///
/// # Errors
///
/// Returns [`MarshalError`] when the tuple does not describe a patient.
pub fn parse_patient(body: &[Value]) -> Result<PatientRecord, MarshalError> {
    let fields = structure(body, &PATIENT_FIELDS)?;
    expect_tag(&fields, RecordKind::Patient)?;
    Ok(PatientRecord {
        id: text_field(&fields, "id")?,
        name: text_field(&fields, "name")?,
        species: text_field(&fields, "species")?,
        owners: text_list_field(&fields, "owners")?,
    })
}

/// Renders a record as its wire tuple.
#[must_use]
pub fn to_wire(record: &Record) -> Value {
    match record {
        Record::Client(client) => Value::List(vec![
            Value::from(RecordKind::Client.tag()),
            Value::from(client.id.as_str()),
            Value::from(client.name.as_str()),
            text_list(&client.contact),
        ]),
        Record::Patient(patient) => Value::List(vec![
            Value::from(RecordKind::Patient.tag()),
            Value::from(patient.id.as_str()),
            Value::from(patient.name.as_str()),
            Value::from(patient.species.as_str()),
            text_list(&patient.owners),
        ]),
    }
}

/// Canonical error reply: `("error" "<kind>")`.
#[must_use]
pub fn error(kind: ErrorKind) -> Value {
    Value::List(vec![Value::from(ERROR_TAG), Value::from(kind.as_str())])
}

/// Returns the error kind carried by a canonical error reply.
#[cfg(test)]
#[must_use]
pub(crate) fn error_kind_of(response: &Value) -> Option<&str> {
    match response.as_list()? {
        [Value::Text(tag), Value::Text(kind)] if tag == ERROR_TAG => Some(kind.as_str()),
        _ => None,
    }
}

/// Generic success marker: `("ok")`.
#[must_use]
pub fn success() -> Value {
    Value::List(vec![Value::from(SUCCESS_TAG)])
}

/// Permissions reply: `("permissions" ("records" <level>))`.
#[must_use]
pub fn permissions(permissions: Permissions) -> Value {
    Value::List(vec![
        Value::from(PERMISSIONS_TAG),
        Value::List(vec![
            Value::from("records"),
            Value::Integer(i64::from(permissions.level())),
        ]),
    ])
}

fn all_text(values: &[Value]) -> bool {
    values.iter().all(|value| value.kind() == ValueKind::Text)
}

fn text_list(items: &[String]) -> Value {
    Value::List(items.iter().map(|item| Value::from(item.as_str())).collect())
}

fn expect_tag(fields: &Mapping, expected: RecordKind) -> Result<(), MarshalError> {
    match fields.get("type") {
        Some(Value::Text(tag)) if tag == expected.tag() => Ok(()),
        other => Err(MarshalError::WrongTag {
            expected,
            found: other.map_or_else(String::new, ToString::to_string),
        }),
    }
}

fn text_field(fields: &Mapping, field: &'static str) -> Result<String, MarshalError> {
    fields
        .get(field)
        .and_then(Value::as_text)
        .map(str::to_owned)
        .ok_or(MarshalError::FieldType {
            field,
            expected: ValueKind::Text,
        })
}

fn text_list_field(fields: &Mapping, field: &'static str) -> Result<Vec<String>, MarshalError> {
    let wrong_type = || MarshalError::FieldType {
        field,
        expected: ValueKind::List,
    };
    let items = fields.get(field).and_then(Value::as_list).ok_or_else(wrong_type)?;
    items
        .iter()
        .map(|item| item.as_text().map(str::to_owned).ok_or_else(wrong_type))
        .collect()
}
