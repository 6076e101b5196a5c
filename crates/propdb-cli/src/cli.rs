//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// propdb - Inspect layered application configuration
///
/// Sources are merged with environment variables winning over the config
/// server payload, which wins over files under the config root.
#[derive(Parser, Debug)]
#[command(name = "propdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Where configuration is read from
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SourceArgs {
    /// Directory searched recursively for application[-profile].* files
    #[arg(long, global = true, env = "PROPDB_CONFIG_ROOT", default_value = "config")]
    pub config_root: PathBuf,

    /// Active profile; repeat or separate with commas, earliest wins
    #[arg(
        short,
        long = "profile",
        global = true,
        env = "PROPDB_PROFILES",
        value_delimiter = ','
    )]
    pub profiles: Vec<String>,

    /// JSON config-server payload to layer above the files
    #[arg(long, global = true, env = "PROPDB_CONFIG_SERVER")]
    pub config_server: Option<PathBuf>,

    /// Ignore process environment variables
    #[arg(long, global = true, env = "PROPDB_NO_ENV")]
    pub no_env: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the resolved value of a property
    ///
    /// Examples:
    ///   propdb get server.port --as number
    ///   propdb get SERVER_HOST --default localhost
    ///   propdb get db --as object --json
    Get {
        /// Property key (dotted or environment style)
        key: String,

        /// How to interpret the value
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,

        /// Value to print when the property is not set
        #[arg(long)]
        default: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print every merged property with its winning source
    Dump {
        /// Only show keys at or below this namespace
        #[arg(long)]
        prefix: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show which source set a property and what it overrode
    Explain {
        /// Property key (dotted or environment style)
        key: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// Typed accessor used by `get`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Object,
}
