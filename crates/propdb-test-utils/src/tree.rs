//! [`ConfigTree`] builder for file loader scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary configuration root with helpers for writing files.
///
/// # Example
///
/// ```rust,no_run
/// use propdb_test_utils::ConfigTree;
///
/// let tree = ConfigTree::new()
///     .with_file("application.yaml", "server:\n  port: 8080\n")
///     .with_file("nested/application-prod.json", r#"{ "server": { "port": 80 } }"#);
/// assert!(tree.path("nested/application-prod.json").exists());
/// ```
pub struct ConfigTree {
    temp_dir: TempDir,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Could not create {}: {e}", parent.display()));
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
        full_path
    }

    /// Builder form of [`write`](Self::write).
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Source name the file loader gives to `relative`.
    pub fn source_name(&self, relative: &str) -> String {
        format!("File:{}", self.path(relative).display())
    }
}
