//! Document store seam.
//!
//! Persistence belongs to the surrounding platform. This module defines the
//! narrow interface the engine consumes ([`DocumentStore`]), typed helpers on
//! top of it, and an [`InMemoryStore`] used by tests and the demo server.

mod document;
mod memory;

pub use document::{DocKind, Document, Fields, Filter, Record, encode};
pub use memory::InMemoryStore;

use crate::error::{EngineError, EngineResult};

/// A synchronous store of named documents grouped by kind.
///
/// Implementations decide naming for unnamed inserts and are responsible
/// for any uniqueness guarantees beyond document names. They reject a
/// filter whose [`Filter::validate`] fails.
pub trait DocumentStore {
    /// Returns the first document of `kind` matching `key`, if any.
    fn find_one(&self, kind: DocKind, key: &Filter) -> EngineResult<Option<Record>>;

    /// Returns every document of `kind` matching `filter`.
    fn list(&self, kind: DocKind, filter: &Filter) -> EngineResult<Vec<Record>>;

    /// Updates the document matching `key` with `fields`, or inserts a new
    /// document seeded from `key` and `fields` when none matches.
    fn upsert(&mut self, kind: DocKind, key: &Filter, fields: Fields) -> EngineResult<Record>;

    /// Inserts a new document. `None` asks the store to assign a name.
    fn insert(&mut self, kind: DocKind, name: Option<String>, fields: Fields) -> EngineResult<Record>;

    /// Deletes a document by name.
    fn delete(&mut self, kind: DocKind, name: &str) -> EngineResult<()>;
}

/// Loads a typed document by name, failing with `DocumentNotFound`.
pub fn get_doc<T: Document>(store: &dyn DocumentStore, name: &str) -> EngineResult<T> {
    store
        .find_one(T::KIND, &Filter::by_name(name))?
        .ok_or_else(|| EngineError::not_found(T::KIND.label(), name))?
        .decode()
}

/// Loads the first typed document matching `filter`.
pub fn find_doc<T: Document>(store: &dyn DocumentStore, filter: &Filter) -> EngineResult<Option<T>> {
    store
        .find_one(T::KIND, filter)?
        .map(|record| record.decode())
        .transpose()
}

/// Loads every typed document matching `filter`.
pub fn list_docs<T: Document>(store: &dyn DocumentStore, filter: &Filter) -> EngineResult<Vec<T>> {
    store
        .list(T::KIND, filter)?
        .iter()
        .map(|record| record.decode::<T>())
        .collect()
}

/// Saves a typed document and returns it as stored.
///
/// Documents with an empty name are inserted (the store names them);
/// named documents are upserted by name.
pub fn save_doc<T: Document>(store: &mut dyn DocumentStore, doc: &T) -> EngineResult<T> {
    let fields = encode(doc)?;
    let record = if doc.name().is_empty() {
        store.insert(T::KIND, None, fields)?
    } else {
        store.upsert(T::KIND, &Filter::by_name(doc.name()), fields)?
    };
    record.decode()
}

/// Inserts a typed document under its own name, failing if it exists.
pub fn insert_doc<T: Document>(store: &mut dyn DocumentStore, doc: &T) -> EngineResult<T> {
    let fields = encode(doc)?;
    let name = Some(doc.name().to_string()).filter(|n| !n.is_empty());
    store.insert(T::KIND, name, fields)?.decode()
}
