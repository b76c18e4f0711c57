//! Select result cache
//!
//! Owned by the session. Entries are keyed by table and predicate and must be
//! dropped with [`ResultCache::invalidate`] whenever that table changes.

use std::collections::HashMap;

use crate::sql::{executor::ResultSet, types::Predicate};

type CacheKey = (String, Option<Predicate>);

#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<CacheKey, ResultSet>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table_name: &str, predicate: &Option<Predicate>) -> Option<&ResultSet> {
        let hit = self
            .entries
            .get(&(table_name.to_string(), predicate.clone()));
        log::debug!(
            "cache {} for {} {:?}",
            if hit.is_some() { "hit" } else { "miss" },
            table_name,
            predicate
        );
        hit
    }

    pub fn put(&mut self, table_name: &str, predicate: Option<Predicate>, result: ResultSet) {
        self.entries.insert((table_name.to_string(), predicate), result);
    }

    /// Drops every cached result of the table
    pub fn invalidate(&mut self, table_name: &str) {
        self.entries.retain(|(name, _), _| name != table_name);
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
