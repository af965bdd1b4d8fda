//! Introspected column lists, keyed by table and port.

use quarry_core::schema::ColumnInfo;

use indexmap::IndexMap;
use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

/// Identifies one remote table: the same table name behind two ports is two
/// different tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub table: String,
    pub port: u16,
}

/// Bounded, time-limited cache of `PRAGMA table_info` results.
///
/// Entries expire `ttl` after they were written; an expired entry is removed
/// by the read that finds it. When a new key is written at capacity, the
/// entry inserted first is evicted. Reads never change an entry's position,
/// and overwriting a key refreshes its timestamp but keeps its position.
#[derive(Debug)]
pub struct SchemaCache {
    capacity: usize,
    ttl: Duration,
    entries: Mutex<IndexMap<TableKey, Entry>>,
}

#[derive(Debug)]
struct Entry {
    columns: Vec<ColumnInfo>,
    inserted_at: Instant,
}

impl TableKey {
    pub fn new(table: impl Into<String>, port: u16) -> Self {
        Self {
            table: table.into(),
            port,
        }
    }
}

impl SchemaCache {
    pub const DEFAULT_CAPACITY: usize = 100;
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

    pub fn new() -> Self {
        Self::with_limits(Self::DEFAULT_CAPACITY, Self::DEFAULT_TTL)
    }

    pub fn with_limits(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            ttl,
            entries: Mutex::new(IndexMap::new()),
        }
    }

    pub fn get(&self, key: &TableKey) -> Option<Vec<ColumnInfo>> {
        let mut entries = self.entries();

        let entry = entries.get(key)?;

        if entry.inserted_at.elapsed() >= self.ttl {
            entries.shift_remove(key);
            return None;
        }

        Some(entry.columns.clone())
    }

    pub fn set(&self, key: TableKey, columns: Vec<ColumnInfo>) {
        let mut entries = self.entries();

        let entry = Entry {
            columns,
            inserted_at: Instant::now(),
        };

        if let Some(existing) = entries.get_mut(&key) {
            *existing = entry;
            return;
        }

        if self.capacity == 0 {
            return;
        }

        while entries.len() >= self.capacity {
            entries.shift_remove_index(0);
        }

        entries.insert(key, entry);
    }

    pub fn invalidate(&self, key: &TableKey) {
        self.entries().shift_remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    fn entries(&self) -> MutexGuard<'_, IndexMap<TableKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::Value;

    fn columns(name: &str) -> Vec<ColumnInfo> {
        vec![ColumnInfo {
            cid: 0,
            name: name.to_string(),
            ty: "TEXT".to_string(),
            not_null: false,
            default_value: Value::Null,
            primary_key: 0,
        }]
    }

    fn key(i: usize) -> TableKey {
        TableKey::new(format!("t{i}"), 4001)
    }

    #[test]
    fn first_inserted_is_evicted_even_if_read() {
        let cache = SchemaCache::new();

        for i in 0..100 {
            cache.set(key(i), columns("a"));
        }

        // Reading does not protect the oldest entry
        assert!(cache.get(&key(0)).is_some());

        cache.set(key(100), columns("a"));

        assert_eq!(cache.len(), 100);
        assert!(cache.get(&key(0)).is_none());
        for i in 1..=100 {
            assert!(cache.get(&key(i)).is_some(), "t{i}");
        }
    }

    #[test]
    fn overwrite_keeps_position() {
        let cache = SchemaCache::with_limits(2, SchemaCache::DEFAULT_TTL);

        cache.set(key(0), columns("a"));
        cache.set(key(1), columns("a"));
        cache.set(key(0), columns("b"));
        cache.set(key(2), columns("a"));

        assert!(cache.get(&key(0)).is_none());
        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(2)).is_some());
    }

    #[test]
    fn expired_entry_is_a_miss_and_removed() {
        let cache = SchemaCache::with_limits(10, Duration::ZERO);

        cache.set(key(0), columns("a"));
        assert_eq!(cache.len(), 1);

        assert!(cache.get(&key(0)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn fresh_entry_is_a_hit() {
        let cache = SchemaCache::new();
        cache.set(key(0), columns("a"));
        assert_eq!(cache.get(&key(0)), Some(columns("a")));
    }

    #[test]
    fn same_table_different_port() {
        let cache = SchemaCache::new();
        cache.set(TableKey::new("users", 4001), columns("a"));

        assert!(cache.get(&TableKey::new("users", 4002)).is_none());

        cache.invalidate(&TableKey::new("users", 4001));
        assert!(cache.is_empty());
    }
}
