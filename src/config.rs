//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/docnav/docnav.toml`
//! 3. Local config: `<dir>/.docnav.toml` (usually the working directory)
//! 4. Environment variables: `DOCNAV_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ManifestFormat};
use crate::domain::expand_env_vars;

/// Unified configuration for docnav.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Manifest used when a command gets no file (default: built-in index)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
    /// Prefix joined in front of every route (default: "/")
    pub base_path: String,
    /// Output format for `export` (default: json)
    pub format: ManifestFormat,
    /// Treat validation warnings as errors
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manifest: None,
            base_path: "/".into(),
            format: ManifestFormat::Json,
            strict: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub manifest: Option<PathBuf>,
    pub base_path: Option<String>,
    pub format: Option<ManifestFormat>,
    pub strict: Option<bool>,
}

/// Get the XDG config directory for docnav.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "docnav").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("docnav.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".docnav.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(manifest) = &self.manifest {
            let expanded = expand_env_vars(manifest.to_string_lossy().as_ref());
            self.manifest = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            manifest: overlay.manifest.clone().or_else(|| self.manifest.clone()),
            base_path: overlay
                .base_path
                .clone()
                .unwrap_or_else(|| self.base_path.clone()),
            format: overlay.format.unwrap_or(self.format),
            strict: overlay.strict.unwrap_or(self.strict),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.docnav.toml`
    ///
    /// A relative `manifest` in the local config is resolved against `local_dir`.
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let mut raw = load_raw_settings(&local_path)?;
                raw.manifest = raw.manifest.map(|m| {
                    let expanded = PathBuf::from(expand_env_vars(&m.to_string_lossy()));
                    if expanded.is_relative() {
                        dir.join(expanded)
                    } else {
                        expanded
                    }
                });
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply DOCNAV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("DOCNAV")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("manifest") {
            settings.manifest = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("base_path") {
            settings.base_path = val;
        }
        if let Ok(val) = config.get_string("format") {
            settings.format = match val.to_ascii_lowercase().as_str() {
                "json" => ManifestFormat::Json,
                "toml" => ManifestFormat::Toml,
                other => {
                    return Err(ApplicationError::Config {
                        message: format!("DOCNAV_FORMAT: unknown format '{other}'"),
                    })
                }
            };
        }
        if let Ok(val) = config.get_string("strict") {
            settings.strict = match val.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                other => {
                    return Err(ApplicationError::Config {
                        message: format!("DOCNAV_STRICT: expected a boolean, got '{other}'"),
                    })
                }
            };
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# docnav configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/docnav/docnav.toml
#   Local:  ./.docnav.toml
#   Env:    DOCNAV_* environment variables

# Manifest used when no file is given (default: built-in tutorials index)
# manifest = "docs/tutorials/page-index.json"

# Prefix joined in front of every route
# base_path = "/"

# Output format for export: "json" or "toml"
# format = "json"

# Treat warnings (duplicate sibling hrefs) as errors
# strict = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
