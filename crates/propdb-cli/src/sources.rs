//! Database assembly from command-line source options

use crate::cli::SourceArgs;
use crate::error::Result;
use propdb_core::PropertyDatabase;
use propdb_loaders::{ConfigServerPropertyLoader, EnvironmentPropertyLoader, FilePropertyLoader};

/// Register loaders in precedence order: environment, config server, files.
pub fn build_database(args: &SourceArgs) -> Result<PropertyDatabase> {
    let mut db = PropertyDatabase::new(args.profiles.iter().map(|p| p.trim().to_string()));

    if !args.no_env {
        db.use_loader(EnvironmentPropertyLoader::from_process_env());
    }
    if let Some(path) = &args.config_server {
        db.use_loader(ConfigServerPropertyLoader::from_file(path)?);
    }
    db.use_loader(FilePropertyLoader::new(args.config_root.clone()));

    tracing::debug!(
        loaders = ?db.loader_names(),
        profiles = ?db.profiles(),
        "Assembled property database"
    );
    Ok(db)
}

/// Build and load in one step.
pub async fn load_database(args: &SourceArgs) -> Result<PropertyDatabase> {
    let mut db = build_database(args)?;
    db.load_properties().await?;
    Ok(db)
}
