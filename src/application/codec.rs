//! Manifest file formats.
//!
//! JSON is a top-level array of entries. TOML has no top-level arrays, so the
//! forest lives under an `entries` array of tables:
//!
//! ```toml
//! [[entries]]
//! title = "Tutorials"
//! href = "tutorials"
//!
//! [[entries.children]]
//! title = "Introduction to IoT"
//! href = "nyc-taxi-cab"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Entry, Manifest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    #[default]
    Json,
    Toml,
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestFormat::Json => write!(f, "json"),
            ManifestFormat::Toml => write!(f, "toml"),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDocument {
    #[serde(default)]
    entries: Vec<Entry>,
}

impl ManifestFormat {
    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> ApplicationResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(ManifestFormat::Json),
            Some("toml") => Ok(ManifestFormat::Toml),
            _ => Err(ApplicationError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }

    /// Parse manifest text. `origin` only labels errors.
    pub fn parse(&self, text: &str, origin: &Path) -> ApplicationResult<Manifest> {
        let parse_err = |message: String| ApplicationError::Parse {
            path: PathBuf::from(origin),
            message,
        };
        match self {
            ManifestFormat::Json => {
                serde_json::from_str::<Manifest>(text).map_err(|e| parse_err(e.to_string()))
            }
            ManifestFormat::Toml => toml::from_str::<TomlDocument>(text)
                .map(|doc| Manifest::new(doc.entries))
                .map_err(|e| parse_err(e.to_string())),
        }
    }

    /// Serialize a manifest; output ends with a newline.
    pub fn render(&self, manifest: &Manifest) -> ApplicationResult<String> {
        let serialize_err = |message: String| ApplicationError::OperationFailed {
            context: format!("serialize manifest as {self}"),
            source: message.into(),
        };
        let mut text = match self {
            ManifestFormat::Json => {
                serde_json::to_string_pretty(manifest).map_err(|e| serialize_err(e.to_string()))?
            }
            ManifestFormat::Toml => {
                let doc = TomlDocument {
                    entries: manifest.entries.clone(),
                };
                toml::to_string_pretty(&doc).map_err(|e| serialize_err(e.to_string()))?
            }
        };
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("nav.json", ManifestFormat::Json)]
    #[case("nav.TOML", ManifestFormat::Toml)]
    #[case("dir/page-index.json", ManifestFormat::Json)]
    fn given_extension_when_detecting_format_then_matches(
        #[case] path: &str,
        #[case] expected: ManifestFormat,
    ) {
        assert_eq!(ManifestFormat::from_path(Path::new(path)).unwrap(), expected);
    }

    #[rstest]
    #[case("page-index.js")]
    #[case("nav")]
    fn given_unknown_extension_when_detecting_format_then_unsupported(#[case] path: &str) {
        assert!(matches!(
            ManifestFormat::from_path(Path::new(path)),
            Err(ApplicationError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn given_json_array_when_parsing_then_optional_fields_default() {
        let text = r#"[{"title": "Tutorials", "href": "tutorials", "children": [
            {"title": "IoT", "href": "iot", "tags": ["iot"], "keywords": ["IoT"], "excerpt": "x"}
        ]}]"#;
        let manifest = ManifestFormat::Json.parse(text, Path::new("t.json")).unwrap();
        assert!(manifest.entries[0].tags.is_empty());
        assert_eq!(manifest.entries[0].excerpt, None);
        assert_eq!(manifest.entries[0].children[0].tags, vec!["iot"]);
    }

    #[test]
    fn given_unknown_field_when_parsing_then_error_names_origin() {
        let text = r#"[{"title": "T", "href": "t", "keyword": ["typo"]}]"#;
        let err = ManifestFormat::Json
            .parse(text, Path::new("typo.json"))
            .unwrap_err();
        assert!(err.to_string().starts_with("cannot parse typo.json"));
    }

    #[test]
    fn given_manifest_when_rendering_json_then_omits_absent_fields() {
        let manifest = Manifest::new(vec![Entry::new("Tutorials", "tutorials")]);
        let text = ManifestFormat::Json.render(&manifest).unwrap();
        assert!(!text.contains("excerpt"));
        assert!(!text.contains("children"));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn given_nested_manifest_when_rendering_toml_then_uses_array_of_tables() {
        let manifest = Manifest::new(vec![Entry::new("Tutorials", "tutorials")
            .with_children(vec![Entry::new("IoT", "iot").with_tags(["iot"])])]);
        let text = ManifestFormat::Toml.render(&manifest).unwrap();
        assert!(text.contains("[[entries]]"));
        assert!(text.contains("[[entries.children]]"));
        let back = ManifestFormat::Toml.parse(&text, Path::new("t.toml")).unwrap();
        assert_eq!(back, manifest);
    }
}
