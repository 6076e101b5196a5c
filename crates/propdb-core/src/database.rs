//! Loader orchestration and precedence merging
//!
//! Loaders are registered in precedence order, highest first:
//!
//! ```text
//! db.with_property_loader(env)      // wins over everything below
//!   .which_overrides(files)
//!   .which_overrides(defaults);     // lowest precedence
//! ```
//!
//! `load_properties` runs every loader concurrently, concatenates their
//! sources in registration order, reverses that list and merges it lowest
//! precedence first. Each merge step that replaces a key links the replaced
//! record into the new record's history.

use crate::context::PropertyContext;
use crate::key::normalize_key;
use crate::loader::PropertyLoader;
use crate::map::PropertyMap;
use crate::mapper::{ArrayMapper, Mapper, MapperRegistry};
use crate::record::PropertyRecord;
use crate::source::PropertySource;
use crate::{Error, Result};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;

/// The merged, queryable property space
pub struct PropertyDatabase {
    loaders: Vec<Arc<dyn PropertyLoader>>,
    profiles: Vec<String>,
    merged: Option<Arc<PropertyMap>>,
    mappers: MapperRegistry,
    array_mappers: MapperRegistry,
}

/// Chaining handle returned by [`PropertyDatabase::with_property_loader`]
pub struct LoaderChain<'a> {
    database: &'a mut PropertyDatabase,
}

impl LoaderChain<'_> {
    /// Register `loader` with lower precedence than every loader chained so far.
    pub fn which_overrides(self, loader: impl PropertyLoader + 'static) -> Self {
        self.database.use_loader(loader);
        self
    }
}

impl PropertyDatabase {
    /// Create an unloaded database for the given active profiles.
    pub fn new<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loaders: Vec::new(),
            profiles: profiles.into_iter().map(Into::into).collect(),
            merged: None,
            mappers: MapperRegistry::new(),
            array_mappers: MapperRegistry::new(),
        }
    }

    /// Append a loader with the lowest precedence so far.
    pub fn use_loader(&mut self, loader: impl PropertyLoader + 'static) -> &mut Self {
        self.use_shared_loader(Arc::new(loader))
    }

    /// Append an already shared loader with the lowest precedence so far.
    pub fn use_shared_loader(&mut self, loader: Arc<dyn PropertyLoader>) -> &mut Self {
        tracing::debug!(
            loader = loader.name(),
            position = self.loaders.len(),
            "Registering loader"
        );
        self.loaders.push(loader);
        self
    }

    /// Register `loader` and return a handle for chaining lower-precedence loaders.
    pub fn with_property_loader(
        &mut self,
        loader: impl PropertyLoader + 'static,
    ) -> LoaderChain<'_> {
        self.use_loader(loader);
        LoaderChain { database: self }
    }

    /// Run every loader and rebuild the merged view.
    ///
    /// All loaders run to completion. If any of them fails, each failure is
    /// logged, the first one in registration order is returned and the
    /// previously merged view stays in place.
    pub async fn load_properties(&mut self) -> Result<()> {
        let profiles = self.profiles.as_slice();
        tracing::debug!(loaders = self.loaders.len(), ?profiles, "Loading properties");

        let results = join_all(
            self.loaders
                .iter()
                .map(|loader| loader.load_properties(profiles)),
        )
        .await;

        let mut sources = Vec::new();
        let mut failure = None;
        for (loader, result) in self.loaders.iter().zip(results) {
            match result {
                Ok(loaded) => {
                    tracing::debug!(
                        loader = loader.name(),
                        sources = loaded.len(),
                        "Loader finished"
                    );
                    sources.extend(loaded);
                }
                Err(e) => {
                    tracing::error!(loader = loader.name(), error = %e, "Loader failed");
                    failure.get_or_insert(e);
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        let source_count = sources.len();
        let merged = merge_sources(sources);
        tracing::info!(sources = source_count, keys = merged.len(), "Properties loaded");
        self.merged = Some(Arc::new(merged));
        Ok(())
    }

    /// A typed view over `key`.
    ///
    /// The key is normalized like source keys are, so `FOO_BAR` and
    /// `foo.bar` address the same property.
    pub fn get(&self, key: &str) -> Result<PropertyContext> {
        let merged = self.merged.as_ref().ok_or(Error::NotLoaded)?;
        let key = normalize_key(key);
        let mapper = self.mappers.get(&key);
        let array_mapper = self.array_mappers.get(&key);
        Ok(PropertyContext::new(key, Arc::clone(merged), mapper, array_mapper))
    }

    /// Set the default mapper used by `as_mapped` for `key`.
    pub fn register_mapper<T, F>(&mut self, key: &str, mapper: F) -> &mut Self
    where
        T: 'static,
        F: Fn(Value) -> Result<T> + Send + Sync + 'static,
    {
        let mapper: Mapper<T> = Arc::new(mapper);
        self.mappers.register(normalize_key(key), mapper);
        self
    }

    /// Set the default mapper used by `as_mapped_array` for `key`.
    pub fn register_array_mapper<T, F>(&mut self, key: &str, mapper: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&str, Value) -> Result<T> + Send + Sync + 'static,
    {
        let mapper: ArrayMapper<T> = Arc::new(mapper);
        self.array_mappers.register(normalize_key(key), mapper);
        self
    }

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    pub fn is_loaded(&self) -> bool {
        self.merged.is_some()
    }

    pub fn loader_names(&self) -> Vec<&str> {
        self.loaders.iter().map(|l| l.name()).collect()
    }

    /// The merged records of the last successful load.
    pub fn snapshot(&self) -> Result<Arc<PropertyMap>> {
        self.merged.clone().ok_or(Error::NotLoaded)
    }

    /// Merged keys in first-seen order.
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.snapshot()?.keys().map(str::to_string).collect())
    }

    /// Merged records in first-seen order, each carrying its override chain.
    pub fn records(&self) -> Result<Vec<PropertyRecord>> {
        Ok(self.snapshot()?.iter().cloned().collect())
    }
}

impl std::fmt::Debug for PropertyDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDatabase")
            .field("loaders", &self.loader_names())
            .field("profiles", &self.profiles)
            .field("loaded", &self.is_loaded())
            .field("mappers", &self.mappers)
            .field("array_mappers", &self.array_mappers)
            .finish()
    }
}

/// Merge sources given highest precedence first.
pub fn merge_sources(sources: Vec<PropertySource>) -> PropertyMap {
    let mut merged = PropertyMap::new();
    for source in sources.into_iter().rev() {
        tracing::debug!(source = source.name(), keys = source.len(), "Merging source");
        for record in source.into_records() {
            if merged.contains_key(&record.key) {
                tracing::trace!(
                    key = %record.key,
                    source = %record.source_name,
                    "Overriding property"
                );
            }
            merged.insert_linked(record);
        }
    }
    merged
}
