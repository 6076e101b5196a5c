//! Insertion-ordered record map

use crate::key::strip_root;
use crate::record::PropertyRecord;
use std::collections::HashMap;

/// Records keyed by normalized key, iterated in first-insertion order.
///
/// Replacing a key keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    records: Vec<PropertyRecord>,
    index: HashMap<String, usize>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert a record under its own key, returning the record it replaced.
    pub fn insert(&mut self, record: PropertyRecord) -> Option<PropertyRecord> {
        match self.index.get(&record.key) {
            Some(&i) => Some(std::mem::replace(&mut self.records[i], record)),
            None => {
                self.index.insert(record.key.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut PropertyRecord> {
        let i = *self.index.get(key)?;
        Some(&mut self.records[i])
    }

    /// Insert `record`, linking whatever it replaces into its history.
    pub(crate) fn insert_linked(&mut self, record: PropertyRecord) {
        let key = record.key.clone();
        if let Some(previous) = self.insert(record) {
            if let Some(current) = self.get_mut(&key) {
                current.push_history(previous);
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<PropertyRecord> {
        self.records
    }

    /// Records strictly below `root`, i.e. whose key starts with `root.`.
    pub fn descendants<'a>(
        &'a self,
        root: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a PropertyRecord)> + 'a {
        self.records
            .iter()
            .filter_map(move |r| strip_root(root, &r.key).map(|rest| (rest, r)))
    }

    /// Whether any record lives below `root`.
    pub fn has_descendants(&self, root: &str) -> bool {
        self.descendants(root).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
