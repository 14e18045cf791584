//! Client and patient records: the data model, its wire form and storage.

pub mod marshal;
mod model;
mod store;

pub use self::marshal::MarshalError;
pub use self::model::{ClientRecord, PatientRecord, Record, RecordKind, UnknownRecordKind};
pub use self::store::{InMemoryRecordStore, RecordStore, StoreError};
