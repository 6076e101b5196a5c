//! Scripted loaders for database tests.

use async_trait::async_trait;
use propdb_core::{Error, Metadata, PropertyLoader, PropertySource, Result};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns fixed sources, one per `(name, value)` pair, in the given order.
#[derive(Debug, Clone)]
pub struct MapLoader {
    name: String,
    sources: Vec<(String, Value)>,
}

impl MapLoader {
    /// A loader with a single source named after the loader.
    pub fn new(name: &str, value: Value) -> Self {
        Self::with_sources(name, vec![(name.to_string(), value)])
    }

    pub fn with_sources(name: &str, sources: Vec<(String, Value)>) -> Self {
        Self {
            name: name.to_string(),
            sources,
        }
    }
}

#[async_trait]
impl PropertyLoader for MapLoader {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_properties(&self, _profiles: &[String]) -> Result<Vec<PropertySource>> {
        let metadata = Metadata::new();
        let mut sources = Vec::with_capacity(self.sources.len());
        for (name, value) in &self.sources {
            let mut source = PropertySource::new(name.clone());
            source.set_property("", value, &metadata)?;
            sources.push(source);
        }
        Ok(sources)
    }
}

/// Always fails with a `LoaderFailure` carrying `message`.
#[derive(Debug, Clone)]
pub struct FailingLoader {
    name: String,
    message: String,
}

impl FailingLoader {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl PropertyLoader for FailingLoader {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_properties(&self, _profiles: &[String]) -> Result<Vec<PropertySource>> {
        Err(Error::loader(self.name.clone(), self.message.clone()))
    }
}

/// Wraps another loader and counts how often it was asked to load.
///
/// Also records the profiles of the most recent call.
pub struct CountingLoader<L> {
    inner: L,
    calls: Arc<AtomicUsize>,
    last_profiles: Arc<std::sync::Mutex<Vec<String>>>,
}

impl<L: PropertyLoader> CountingLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
            last_profiles: Arc::default(),
        }
    }

    /// Shared call counter, still readable after the loader is registered.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn last_profiles(&self) -> Arc<std::sync::Mutex<Vec<String>>> {
        Arc::clone(&self.last_profiles)
    }
}

#[async_trait]
impl<L: PropertyLoader> PropertyLoader for CountingLoader<L> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn load_properties(&self, profiles: &[String]) -> Result<Vec<PropertySource>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_profiles.lock().unwrap() = profiles.to_vec();
        self.inner.load_properties(profiles).await
    }
}
