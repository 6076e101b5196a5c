//! Shared test utilities for the propdb workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`] - [`ConfigTree`] builder for on-disk configuration roots
//! - [`loaders`] - scripted [`PropertyLoader`](propdb_core::PropertyLoader)s

pub mod loaders;
pub mod tree;

pub use loaders::{CountingLoader, FailingLoader, MapLoader};
pub use tree::ConfigTree;
