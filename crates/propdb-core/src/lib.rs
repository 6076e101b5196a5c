//! Layered property resolution for propdb
//!
//! Configuration arrives from many loaders (environment variables, files,
//! in-memory maps, config-server payloads). This crate merges everything
//! they produce into one flat, case-insensitive key space and answers
//! typed queries against it:
//!
//! - [`PropertySource`]: a named set of flattened records from one input
//! - [`PropertyLoader`]: the async capability that produces sources
//! - [`PropertyDatabase`]: runs loaders, merges by precedence, hands out contexts
//! - [`PropertyContext`]: typed access (`as_string`, `as_object`, `as_mapped`, ...)
//!
//! # Example
//!
//! ```ignore
//! use propdb_core::PropertyDatabase;
//!
//! let mut db = PropertyDatabase::new(["production"]);
//! db.with_property_loader(env_loader).which_overrides(file_loader);
//! db.load_properties().await?;
//! let port = db.get("server.port")?.as_number_or(8080.0);
//! ```

pub mod context;
pub mod database;
pub mod error;
pub mod key;
pub mod loader;
pub mod map;
pub mod mapper;
pub mod record;
pub mod scalar;
pub mod source;

pub use context::PropertyContext;
pub use database::{LoaderChain, PropertyDatabase, merge_sources};
pub use error::{BoxError, Error, PropertyKind, Result};
pub use key::normalize_key;
pub use loader::PropertyLoader;
pub use map::PropertyMap;
pub use mapper::{ArrayMapper, Mapper, MapperRegistry};
pub use record::{Metadata, PropertyRecord};
pub use source::PropertySource;
