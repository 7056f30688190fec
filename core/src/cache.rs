use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::graphql::Operation;

/// Identity of a query: the operation plus its serialized variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    operation: Operation,
    variables: String,
}

impl QueryKey {
    pub fn new<V: Serialize>(operation: Operation, variables: &V) -> Result<Self, serde_json::Error> {
        Ok(Self {
            operation,
            variables: serde_json::to_string(variables)?,
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

/// Owned read-through store for query results. Entries are replaced wholesale,
/// never merged, and dropped explicitly after mutations.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Value>,
}

impl QueryCache {
    pub fn get(&self, key: &QueryKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: QueryKey, data: Value) {
        self.entries.insert(key, data);
    }

    /// Drop every cached result of `operation`; returns how many were removed.
    pub fn invalidate(&mut self, operation: Operation) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.operation != operation);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
