//! File-tree loader
//!
//! Discovers `application[-<profile>].<ext>` files anywhere below a root
//! directory and turns each one into a source.

use crate::format::FileFormat;
use crate::{Error, Result};
use async_trait::async_trait;
use propdb_core::{Metadata, PropertyLoader, PropertySource};
use regex::Regex;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^application(-(.+))?\.(yaml|yml|json|properties|toml)$")
        .expect("file name pattern is valid")
});

/// A discovered configuration file and the profile encoded in its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub profile: Option<String>,
}

impl ConfigFile {
    /// Match a file name against the `application[-profile].ext` pattern.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let captures = FILE_NAME.captures(file_name)?;
        Some(Self {
            path: path.to_path_buf(),
            profile: captures.get(2).map(|m| m.as_str().to_string()),
        })
    }

    fn path_len(&self) -> usize {
        self.path.to_string_lossy().len()
    }
}

/// Order files so that the first one has the highest precedence.
///
/// Profiled files come before unprofiled ones. Profiled files are ordered
/// by their position in `profiles`, with longer paths first on a tie.
/// Unprofiled files are ordered shorter path first.
pub fn compare_files(a: &ConfigFile, b: &ConfigFile, profiles: &[String]) -> Ordering {
    let position = |profile: &str| profiles.iter().position(|p| p == profile);

    match (&a.profile, &b.profile) {
        (None, None) => a.path_len().cmp(&b.path_len()),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(pa), Some(pb)) => position(pa)
            .cmp(&position(pb))
            .then_with(|| b.path_len().cmp(&a.path_len())),
    }
}

/// Loads every matching file below a root directory
#[derive(Debug, Clone)]
pub struct FilePropertyLoader {
    root: PathBuf,
    name: String,
}

impl FilePropertyLoader {
    /// Relative roots resolve against the process working directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = format!("File:{}", root.display());
        Self { root, name }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the files that apply to `profiles`, highest precedence first.
    ///
    /// This walks the file system synchronously; any unreadable entry below
    /// the root fails the whole discovery.
    pub fn discover(&self, profiles: &[String]) -> Result<Vec<ConfigFile>> {
        if !self.root.is_dir() {
            return Err(Error::InvalidRoot {
                path: self.root.clone(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(self.root.as_path()).to_path_buf();
                Error::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file) = ConfigFile::from_path(entry.path()) else {
                continue;
            };
            match &file.profile {
                Some(profile) if !profiles.contains(profile) => {
                    tracing::trace!(
                        path = %file.path.display(),
                        %profile,
                        "Skipping inactive profile"
                    );
                }
                _ => files.push(file),
            }
        }

        files.sort_by(|a, b| compare_files(a, b, profiles));
        Ok(files)
    }

    async fn load_file(&self, file: &ConfigFile) -> Result<Option<PropertySource>> {
        let format = FileFormat::from_path(&file.path)?;
        let content = tokio::fs::read_to_string(&file.path)
            .await
            .map_err(|e| Error::io(&file.path, e))?;
        let document = format.parse(&content, &file.path)?;

        if document.is_null() {
            tracing::debug!(path = %file.path.display(), "Empty document, no source created");
            return Ok(None);
        }

        let mut source = PropertySource::new(format!("File:{}", file.path.display()));
        source.set_property("", &document, &Metadata::new())?;
        tracing::debug!(path = %file.path.display(), keys = source.len(), "Loaded config file");
        Ok(Some(source))
    }

    async fn load(&self, profiles: &[String]) -> Result<Vec<PropertySource>> {
        let loader = self.clone();
        let active = profiles.to_vec();
        let files = tokio::task::spawn_blocking(move || loader.discover(&active))
            .await
            .map_err(|e| Error::io(&self.root, e.into()))??;

        let mut sources = Vec::new();
        for file in files {
            if let Some(source) = self.load_file(&file).await? {
                sources.push(source);
            }
        }
        Ok(sources)
    }
}

#[async_trait]
impl PropertyLoader for FilePropertyLoader {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_properties(
        &self,
        profiles: &[String],
    ) -> propdb_core::Result<Vec<PropertySource>> {
        self.load(profiles).await.map_err(|e| e.into_core(&self.name))
    }
}
