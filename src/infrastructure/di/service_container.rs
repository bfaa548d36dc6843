//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ManifestService, ManifestSource};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub manifests: ManifestService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let manifests = ManifestService::new(Arc::clone(&fs));

        Self {
            settings,
            fs,
            manifests,
        }
    }

    /// Manifest to use when a command is given no file:
    /// the configured one, otherwise the built-in index.
    pub fn default_source(&self) -> ManifestSource {
        match &self.settings.manifest {
            Some(path) => ManifestSource::File(path.clone()),
            None => ManifestSource::Builtin,
        }
    }
}
