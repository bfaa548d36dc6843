//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Note: These tests run without a global config (temp directories only), so they
//! test the local overlay and DOCNAV_* variables against defaults. Tests touching
//! the process environment are serialized with the rest of this file.

use std::fs;
use std::path::PathBuf;

use rstest::rstest;
use serial_test::serial;
use tempfile::TempDir;

use docnav::application::services::ManifestSource;
use docnav::application::{ApplicationError, ManifestFormat};
use docnav::config::{local_config_path, Settings};
use docnav::infrastructure::di::ServiceContainer;

#[test]
#[serial]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
    let container = ServiceContainer::new(settings);
    assert_eq!(container.default_source(), ManifestSource::Builtin);
}

#[test]
#[serial]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
base_path = "/timescaledb"
format = "toml"
strict = true
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.base_path, "/timescaledb");
    assert_eq!(settings.format, ManifestFormat::Toml);
    assert!(settings.strict);
    assert_eq!(settings.manifest, None);
}

#[test]
#[serial]
fn given_relative_manifest_in_local_config_when_load_then_resolved_against_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "manifest = \"nav/page-index.json\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    let expected = dir.path().join("nav/page-index.json");
    assert_eq!(settings.manifest.as_deref(), Some(expected.as_path()));
    let container = ServiceContainer::new(settings);
    assert_eq!(container.default_source(), ManifestSource::File(expected));
}

#[test]
#[serial]
fn given_absolute_manifest_in_local_config_when_load_then_kept() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "manifest = \"/srv/docs/page-index.toml\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(
        settings.manifest,
        Some(PathBuf::from("/srv/docs/page-index.toml"))
    );
}

#[test]
#[serial]
fn given_unknown_key_in_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "colour = \"blue\"\n").unwrap();

    let result = Settings::load(Some(dir.path()));

    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains(".docnav.toml"), "message: {message}");
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
#[serial]
fn given_template_written_as_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), Settings::template()).unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
}

// ============================================================
// DOCNAV_* environment overrides
// ============================================================

/// Sets environment variables for the lifetime of the guard.
struct EnvGuard(Vec<&'static str>);

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
        Self(vars.iter().map(|(name, _)| *name).collect())
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for name in &self.0 {
            std::env::remove_var(name);
        }
    }
}

#[test]
#[serial]
fn given_docnav_env_vars_when_load_then_override_local_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "base_path = \"/from-file\"\nstrict = false\n",
    )
    .unwrap();
    let _env = EnvGuard::set(&[
        ("DOCNAV_BASE_PATH", "/from-env"),
        ("DOCNAV_STRICT", "true"),
        ("DOCNAV_FORMAT", "TOML"),
    ]);

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.base_path, "/from-env");
    assert!(settings.strict);
    assert_eq!(settings.format, ManifestFormat::Toml);
}

#[test]
#[serial]
fn given_docnav_manifest_env_var_when_load_then_used_as_default_source() {
    let dir = TempDir::new().unwrap();
    let _env = EnvGuard::set(&[("DOCNAV_MANIFEST", "/srv/docs/page-index.json")]);

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    let container = ServiceContainer::new(settings);
    assert_eq!(
        container.default_source(),
        ManifestSource::File(PathBuf::from("/srv/docs/page-index.json"))
    );
}

#[rstest]
#[case("DOCNAV_STRICT", "maybe")]
#[case("DOCNAV_FORMAT", "yaml")]
#[serial]
fn given_invalid_docnav_env_value_when_load_then_config_error(
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let dir = TempDir::new().unwrap();
    let _env = EnvGuard::set(&[(name, value)]);

    let result = Settings::load(Some(dir.path()));

    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.starts_with(name), "message: {message}");
        }
        other => panic!("expected config error, got {:?}", other),
    }
}
