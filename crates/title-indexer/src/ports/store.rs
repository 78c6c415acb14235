//! # Entity Store Port (Driven)
//!
//! The host-owned keyed record store. The host persists entities
//! transactionally per block; the core only sees load-by-id and
//! upsert-by-id over a neutral value representation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Storage operation errors.
///
/// These are infrastructure failures. Business conditions (missing
/// entity, reverted contract read) are never expressed as store errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store failed to read or write.
    #[error("store backend error: {message}")]
    Backend { message: String },

    /// A persisted value could not be decoded into its record type.
    #[error("record codec error for {kind}/{id}: {message}")]
    Codec {
        kind: &'static str,
        id: String,
        message: String,
    },
}

/// Abstract keyed record store, object-safe.
///
/// Records are grouped by kind and identified by a string id unique
/// within that kind. `save_raw` is an upsert; the store never deletes.
pub trait EntityStore {
    /// Load a record by kind and id. Absence is not an error.
    fn load_raw(&self, kind: &'static str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Create or overwrite a record.
    fn save_raw(&mut self, kind: &'static str, id: &str, value: Value) -> Result<(), StoreError>;

    /// All ids currently stored under a kind, in id order. This is the
    /// by-kind query surface consumed downstream.
    fn ids_of_kind(&self, kind: &'static str) -> Result<Vec<String>, StoreError>;
}

/// A record type that lives in the entity store.
pub trait EntityRecord: Serialize + DeserializeOwned {
    /// The store kind this record is grouped under.
    const KIND: &'static str;

    /// The record's id, unique within its kind.
    fn id(&self) -> &str;
}

/// Typed load/save over any [`EntityStore`], bridging through serde.
pub trait EntityStoreExt: EntityStore {
    /// Load and decode a record of type `R`.
    fn load<R: EntityRecord>(&self, id: &str) -> Result<Option<R>, StoreError> {
        match self.load_raw(R::KIND, id)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| StoreError::Codec {
                    kind: R::KIND,
                    id: id.to_string(),
                    message: err.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Encode and upsert a record.
    fn save<R: EntityRecord>(&mut self, record: &R) -> Result<(), StoreError> {
        let value = serde_json::to_value(record).map_err(|err| StoreError::Codec {
            kind: R::KIND,
            id: record.id().to_string(),
            message: err.to_string(),
        })?;
        self.save_raw(R::KIND, record.id(), value)
    }
}

impl<S: EntityStore + ?Sized> EntityStoreExt for S {}

/// Implement [`EntityRecord`] for a struct with an `id: String` field.
macro_rules! impl_entity_record {
    ($ty:ty, $kind:literal) => {
        impl $crate::ports::store::EntityRecord for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

pub(crate) use impl_entity_record;
