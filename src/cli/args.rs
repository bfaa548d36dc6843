//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::application::ManifestFormat;
use crate::domain::Side;

/// Load, validate, inspect and export tutorial navigation manifests
#[derive(Parser, Debug)]
#[command(name = "docnav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .docnav.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    /// Route prefix, overrides the configured base_path
    #[arg(long, global = true)]
    pub base: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the navigation as a tree
    Tree {
        /// Manifest file (default: configured or built-in)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// List the full route of every entry
    Routes {
        /// Manifest file (default: configured or built-in)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show every root-to-leaf branch
    Branches {
        /// Manifest file (default: configured or built-in)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show one entry
    Show {
        /// Route, e.g. tutorials/grafana/setup-alerts
        route: String,
        /// Manifest file (default: configured or built-in)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Validate manifests (files, or directories scanned for .json/.toml)
    Validate {
        /// Files or directories (default: configured or built-in manifest)
        #[arg(value_hint = ValueHint::AnyPath)]
        paths: Vec<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// List unresolved merge conflict regions
    Conflicts {
        /// Manifest file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Resolve merge conflict markers by keeping one side
    Resolve {
        /// Manifest file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Side to keep
        #[arg(long, value_enum)]
        side: SideArg,
        /// Rewrite the file instead of printing the result
        #[arg(short, long)]
        write: bool,
    },

    /// Serialize a manifest as JSON or TOML
    Export {
        /// Manifest file (default: configured or built-in)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Output format (default: configured, or from --output extension)
        #[arg(long, value_enum)]
        format: Option<ManifestFormat>,
        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Count entries per tag
    Tags {
        /// Manifest file (default: configured or built-in)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// List entries carrying a tag
    Filter {
        /// Tag (exact match)
        tag: String,
        /// Manifest file (default: configured or built-in)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Search keywords, titles and excerpts
    Search {
        /// Search term (case-insensitive)
        term: String,
        /// Manifest file (default: configured or built-in)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

/// Conflict side as a CLI value.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    /// The HEAD half
    Ours,
    /// The merged-in half
    Theirs,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Ours => Side::Ours,
            SideArg::Theirs => Side::Theirs,
        }
    }
}
