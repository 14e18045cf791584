//! Mock record store for fault injection.

use mockall::mock;

use crate::records::{Record, RecordKind, RecordStore, StoreError};

mock! {
    pub Store {}
    impl RecordStore for Store {
        fn get(&self, kind: RecordKind, id: &str) -> Result<Option<Record>, StoreError>;
        fn set(&self, record: Record) -> Result<(), StoreError>;
        fn close(&self) -> Result<(), StoreError>;
    }
}
