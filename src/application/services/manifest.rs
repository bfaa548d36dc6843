//! Manifest loading service
//!
//! Reads manifest files through the [`FileSystem`] boundary, refuses text with
//! unresolved merge conflicts, parses by extension and validates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::codec::ManifestFormat;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    tutorials, validate, ConflictRegion, ConflictScanner, DomainError, Entry, Manifest, Report,
    Severity, Side, Violation,
};
use crate::infrastructure::traits::FileSystem;

/// Where a manifest comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// The compiled-in tutorials index
    Builtin,
    File(PathBuf),
}

impl ManifestSource {
    pub fn label(&self) -> String {
        match self {
            ManifestSource::Builtin => "<builtin>".to_string(),
            ManifestSource::File(path) => path.display().to_string(),
        }
    }
}

/// Validation result for one file.
#[derive(Debug)]
pub struct ValidationOutcome {
    pub source: ManifestSource,
    pub result: ApplicationResult<Report>,
}

impl ValidationOutcome {
    pub fn passed(&self, strict: bool) -> bool {
        matches!(&self.result, Ok(report) if report.is_ok(strict))
    }
}

/// Service for loading, validating and rewriting navigation manifests.
pub struct ManifestService {
    fs: Arc<dyn FileSystem>,
    scanner: ConflictScanner,
}

impl ManifestService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            scanner: ConflictScanner::new(),
        }
    }

    fn read_text(&self, path: &Path) -> ApplicationResult<String> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("manifest not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }
        self.fs
            .read_to_string(path)
            .with_path_context("read manifest", path)
    }

    /// Load and parse a manifest file.
    ///
    /// Conflict markers fail fast, before parsing, so the error points at the
    /// marker lines rather than at a syntax error they cause.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Manifest> {
        let format = ManifestFormat::from_path(path)?;
        let text = self.read_text(path)?;
        self.scanner.ensure_clean(&text)?;
        let manifest = format.parse(&text, path)?;
        debug!(
            "loaded {}: {} entries, depth {}",
            path.display(),
            manifest.len(),
            manifest.depth()
        );
        Ok(manifest)
    }

    pub fn load_source(&self, source: &ManifestSource) -> ApplicationResult<Manifest> {
        match source {
            ManifestSource::Builtin => Ok(tutorials().clone()),
            ManifestSource::File(path) => self.load(path),
        }
    }

    /// Load and require a passing validation report.
    pub fn load_validated(
        &self,
        source: &ManifestSource,
        strict: bool,
    ) -> ApplicationResult<(Manifest, Report)> {
        let manifest = self.load_source(source)?;
        let report = validate(&manifest);
        for warning in report.warnings() {
            warn!("{}: {}", source.label(), warning);
        }
        if !report.is_ok(strict) {
            let (errors, warnings): (Vec<Violation>, Vec<Violation>) = report
                .violations
                .iter()
                .cloned()
                .partition(|v| v.severity == Severity::Error);
            return Err(ApplicationError::Invalid {
                path: PathBuf::from(source.label()),
                errors,
                warnings,
            });
        }
        Ok((manifest, report))
    }

    /// Validate each source independently; one broken file does not stop the rest.
    pub fn validate_all(&self, sources: &[ManifestSource]) -> Vec<ValidationOutcome> {
        sources
            .iter()
            .map(|source| ValidationOutcome {
                source: source.clone(),
                result: self.load_source(source).map(|m| validate(&m)),
            })
            .collect()
    }

    /// Expand directories into the manifest files below them, sorted.
    ///
    /// Files are passed through as given, whatever their extension.
    pub fn discover(&self, paths: &[PathBuf]) -> ApplicationResult<Vec<PathBuf>> {
        let mut found = Vec::new();
        for path in paths {
            if self.fs.is_dir(path) {
                let mut files: Vec<PathBuf> = self
                    .fs
                    .list_files(path)
                    .with_path_context("scan directory", path)?
                    .into_iter()
                    .filter(|f| ManifestFormat::from_path(f).is_ok())
                    .collect();
                files.sort();
                debug!("discovered {} manifests in {}", files.len(), path.display());
                found.extend(files);
            } else {
                found.push(path.clone());
            }
        }
        Ok(found)
    }

    /// Write a manifest, creating parent directories.
    ///
    /// Without an explicit format, the extension decides.
    #[instrument(level = "debug", skip(self, manifest))]
    pub fn save(
        &self,
        manifest: &Manifest,
        path: &Path,
        format: Option<ManifestFormat>,
    ) -> ApplicationResult<()> {
        let format = match format {
            Some(format) => format,
            None => ManifestFormat::from_path(path)?,
        };
        let text = format.render(manifest)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs.write(path, &text).with_path_context("write manifest", path)
    }

    pub fn conflicts(&self, path: &Path) -> ApplicationResult<Vec<ConflictRegion>> {
        let text = self.read_text(path)?;
        Ok(self.scanner.scan(&text)?)
    }

    /// Resolve every conflict region in favour of `side` and return the new text.
    ///
    /// The result must parse, otherwise the resolution is rejected.
    pub fn resolve(&self, path: &Path, side: Side) -> ApplicationResult<String> {
        let text = self.read_text(path)?;
        let resolved = self.scanner.resolve(&text, side)?;
        if let Ok(format) = ManifestFormat::from_path(path) {
            format.parse(&resolved, path)?;
        }
        Ok(resolved)
    }

    /// Resolve in place. Returns the number of regions resolved; 0 leaves the file untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_in_place(&self, path: &Path, side: Side) -> ApplicationResult<usize> {
        let count = self.conflicts(path)?.len();
        if count == 0 {
            return Ok(0);
        }
        let resolved = self.resolve(path, side)?;
        self.fs
            .write(path, &resolved)
            .with_path_context("write manifest", path)?;
        debug!("resolved {} conflict regions in {}", count, path.display());
        Ok(count)
    }

    /// Look up an entry by route, for commands that address a single entry.
    pub fn find<'m>(
        &self,
        manifest: &'m Manifest,
        route: &str,
    ) -> ApplicationResult<&'m Entry> {
        manifest
            .find(route)
            .ok_or_else(|| DomainError::EntryNotFound(route.to_string()).into())
    }
}
