//! Property loaders for propdb
//!
//! Each loader turns one kind of raw configuration into
//! [`PropertySource`](propdb_core::PropertySource)s:
//!
//! - [`EnvironmentPropertyLoader`] - process environment variables
//! - [`StaticPropertyLoader`] - an in-memory value, replaceable for reloads
//! - [`FilePropertyLoader`] - `application[-profile].{yaml,yml,json,toml,properties}` files
//! - [`ConfigServerPropertyLoader`] - a config-server `PropertySources` payload

pub mod config_server;
pub mod env;
pub mod error;
pub mod file;
pub mod format;
pub mod properties;
pub mod static_props;

pub use config_server::{
    ConfigServerProperties, ConfigServerPropertyLoader, ConfigServerPropertySource,
};
pub use env::{ENVIRONMENT_SOURCE, EnvironmentPropertyLoader};
pub use error::{Error, Result};
pub use file::{ConfigFile, FilePropertyLoader, compare_files};
pub use format::FileFormat;
pub use static_props::{STATIC_SOURCE, StaticPropertyLoader};
