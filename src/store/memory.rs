//! In-memory document store.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::document::{DocKind, Fields, Filter, Record};
use super::DocumentStore;

/// A [`DocumentStore`] held entirely in memory.
///
/// Documents are kept ordered by name within each kind. Unnamed inserts
/// draw from a per-kind naming series (`HR-ATT-00001`, `HR-ATT-00002`, ...).
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    docs: BTreeMap<DocKind, BTreeMap<String, Fields>>,
    series: HashMap<DocKind, u64>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents of a kind.
    pub fn count(&self, kind: DocKind) -> usize {
        self.docs.get(&kind).map_or(0, BTreeMap::len)
    }

    fn next_name(&mut self, kind: DocKind) -> String {
        let counter = self.series.entry(kind).or_insert(0);
        *counter += 1;
        format!("{}-{:05}", kind.naming_prefix(), counter)
    }
}

impl DocumentStore for InMemoryStore {
    fn find_one(&self, kind: DocKind, key: &Filter) -> EngineResult<Option<Record>> {
        key.validate()?;
        Ok(self.docs.get(&kind).and_then(|docs| {
            docs.iter()
                .find(|(name, fields)| key.matches(name, fields))
                .map(|(name, fields)| Record {
                    name: name.clone(),
                    fields: fields.clone(),
                })
        }))
    }

    fn list(&self, kind: DocKind, filter: &Filter) -> EngineResult<Vec<Record>> {
        filter.validate()?;
        Ok(self
            .docs
            .get(&kind)
            .map(|docs| {
                docs.iter()
                    .filter(|(name, fields)| filter.matches(name, fields))
                    .map(|(name, fields)| Record {
                        name: name.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn upsert(&mut self, kind: DocKind, key: &Filter, fields: Fields) -> EngineResult<Record> {
        if let Some(existing) = self.find_one(kind, key)? {
            let stored = self
                .docs
                .entry(kind)
                .or_default()
                .entry(existing.name.clone())
                .or_default();
            stored.extend(fields);
            debug!(kind = %kind, name = %existing.name, "Updated document");
            return Ok(Record {
                name: existing.name,
                fields: stored.clone(),
            });
        }

        let name = key
            .conditions()
            .iter()
            .find(|(field, _)| field == "name")
            .and_then(|(_, value)| value.as_str().map(str::to_string));
        let mut seeded = key.to_fields();
        seeded.extend(fields);
        self.insert(kind, name, seeded)
    }

    fn insert(&mut self, kind: DocKind, name: Option<String>, fields: Fields) -> EngineResult<Record> {
        let name = match name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => self.next_name(kind),
        };

        let docs = self.docs.entry(kind).or_default();
        if docs.contains_key(&name) {
            return Err(EngineError::DuplicateEntry {
                message: format!("{} '{}' already exists", kind, name),
            });
        }
        docs.insert(name.clone(), fields.clone());
        debug!(kind = %kind, name = %name, "Inserted document");

        Ok(Record { name, fields })
    }

    fn delete(&mut self, kind: DocKind, name: &str) -> EngineResult<()> {
        self.docs
            .get_mut(&kind)
            .and_then(|docs| docs.remove(name))
            .map(|_| ())
            .ok_or_else(|| EngineError::not_found(kind.label(), name))
    }
}
