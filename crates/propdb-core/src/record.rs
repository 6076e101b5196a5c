//! Resolved property records and their override history

use serde::Serialize;
use std::collections::BTreeMap;

/// Free-form annotations attached to a record when it is set
pub type Metadata = BTreeMap<String, String>;

/// One resolved key/value pair with provenance.
///
/// `overwritten` links to the record this one replaced, most recent first.
/// Each link is created exactly once when a slot is replaced, so the chain
/// is always finite and acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRecord {
    /// Normalized, dot-delimited key
    pub key: String,

    /// Canonical string form of the value
    pub value: String,

    /// Name of the source that supplied the value
    pub source_name: String,

    /// Annotations supplied at set-time
    pub metadata: Metadata,

    /// The record this one replaced, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwritten: Option<Box<PropertyRecord>>,
}

impl PropertyRecord {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        source_name: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            source_name: source_name.into(),
            metadata,
            overwritten: None,
        }
    }

    /// The record directly replaced by this one.
    pub fn overwritten(&self) -> Option<&PropertyRecord> {
        self.overwritten.as_deref()
    }

    /// Iterate over every record this one (transitively) replaced.
    pub fn history(&self) -> History<'_> {
        History {
            next: self.overwritten(),
        }
    }

    /// Attach `previous` at the far end of this record's chain.
    ///
    /// Existing links are kept, so a record that already carries history
    /// from inside its own source also remembers what it replaced in the
    /// merged view.
    pub(crate) fn push_history(&mut self, previous: PropertyRecord) {
        match self.overwritten.as_mut() {
            Some(next) => next.push_history(previous),
            None => self.overwritten = Some(Box::new(previous)),
        }
    }
}

/// Iterator over an override chain, newest first
pub struct History<'a> {
    next: Option<&'a PropertyRecord>,
}

impl<'a> Iterator for History<'a> {
    type Item = &'a PropertyRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.overwritten();
        Some(current)
    }
}
