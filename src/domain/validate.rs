//! Structural checks over a navigation manifest.
//!
//! Validation never fails: it returns a [`Report`] listing every violation so
//! callers can print them all at once and decide what is fatal.

use std::fmt;

use itertools::Itertools;

use crate::domain::entities::{Entry, Manifest, Visit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    EmptyTitle,
    EmptyHref,
    UnsafeHref(String),
    MissingTags,
    EmptyTag,
    DuplicateTag(String),
    MissingKeywords,
    EmptyKeyword,
    MissingExcerpt,
    DuplicateHref(String),
}

impl ViolationKind {
    pub fn severity(&self) -> Severity {
        match self {
            // Ambiguous routing, but renderers cope with it
            ViolationKind::DuplicateHref(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::EmptyTitle => write!(f, "title is empty"),
            ViolationKind::EmptyHref => write!(f, "href is empty"),
            ViolationKind::UnsafeHref(href) => {
                write!(f, "href '{href}' contains characters that are not URL-safe")
            }
            ViolationKind::MissingTags => write!(f, "tutorial has no tags"),
            ViolationKind::EmptyTag => write!(f, "tag is an empty string"),
            ViolationKind::DuplicateTag(tag) => write!(f, "tag '{tag}' is listed more than once"),
            ViolationKind::MissingKeywords => write!(f, "tutorial has no keywords"),
            ViolationKind::EmptyKeyword => write!(f, "keyword is an empty string"),
            ViolationKind::MissingExcerpt => write!(f, "tutorial has no excerpt"),
            ViolationKind::DuplicateHref(href) => {
                write!(f, "href '{href}' is used by more than one sibling")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Route of the offending entry (or of the parent, for sibling checks)
    pub route: String,
    pub severity: Severity,
    pub kind: ViolationKind,
}

impl Violation {
    fn new(route: String, kind: ViolationKind) -> Self {
        Self {
            route,
            severity: kind.severity(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.route, self.kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub entries_checked: usize,
    pub violations: Vec<Violation>,
}

impl Report {
    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
    }

    /// No errors; with `strict`, no warnings either.
    pub fn is_ok(&self, strict: bool) -> bool {
        if strict {
            self.violations.is_empty()
        } else {
            self.errors().next().is_none()
        }
    }
}

/// RFC 3986 unreserved characters; an href is a single path segment.
pub fn is_url_safe(href: &str) -> bool {
    !href.is_empty()
        && href
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
}

pub fn validate(manifest: &Manifest) -> Report {
    let mut report = Report::default();

    check_siblings(&manifest.entries, "/".to_string(), &mut report);
    for visit in manifest.walk() {
        report.entries_checked += 1;
        check_entry(&visit, &mut report);
    }

    report
}

fn check_entry(visit: &Visit<'_>, report: &mut Report) {
    let entry = visit.entry;
    let route = visit.route("/");
    let mut push = |kind| report.violations.push(Violation::new(route.clone(), kind));

    if entry.title.trim().is_empty() {
        push(ViolationKind::EmptyTitle);
    }
    if entry.href.is_empty() {
        push(ViolationKind::EmptyHref);
    } else if !is_url_safe(&entry.href) {
        push(ViolationKind::UnsafeHref(entry.href.clone()));
    }

    if !entry.is_section() {
        if entry.tags.is_empty() {
            push(ViolationKind::MissingTags);
        }
        if entry.keywords.is_empty() {
            push(ViolationKind::MissingKeywords);
        }
        if entry.excerpt.as_deref().map_or(true, |e| e.trim().is_empty()) {
            push(ViolationKind::MissingExcerpt);
        }
    }
    if entry.tags.iter().any(|t| t.trim().is_empty()) {
        push(ViolationKind::EmptyTag);
    }
    for tag in entry.tags.iter().duplicates() {
        push(ViolationKind::DuplicateTag(tag.clone()));
    }
    if entry.keywords.iter().any(|k| k.trim().is_empty()) {
        push(ViolationKind::EmptyKeyword);
    }

    check_siblings(&entry.children, route, report);
}

fn check_siblings(siblings: &[Entry], parent_route: String, report: &mut Report) {
    for href in siblings
        .iter()
        .map(|e| e.href.as_str())
        .filter(|h| !h.is_empty())
        .duplicates()
    {
        report.violations.push(Violation::new(
            parent_route.clone(),
            ViolationKind::DuplicateHref(href.to_string()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tutorial(href: &str) -> Entry {
        Entry::new("Tutorial", href)
            .with_tags(["learn"])
            .with_keywords(["tutorial"])
            .with_excerpt("A tutorial")
    }

    #[rstest]
    #[case("nyc-taxi-cab", true)]
    #[case("3rd-party-api-ingest", true)]
    #[case("v1.2_beta~x", true)]
    #[case("", false)]
    #[case("with space", false)]
    #[case("a/b", false)]
    #[case("caf\u{e9}", false)]
    fn given_href_when_checking_url_safety_then_matches_unreserved_set(
        #[case] href: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_url_safe(href), expected);
    }

    #[test]
    fn given_well_formed_manifest_when_validating_then_report_is_clean() {
        let manifest = Manifest::new(vec![Entry::new("Tutorials", "tutorials")
            .with_children(vec![tutorial("one"), tutorial("two")])]);
        let report = validate(&manifest);
        assert_eq!(report.entries_checked, 3);
        assert!(report.violations.is_empty(), "{:?}", report.violations);
        assert!(report.is_ok(true));
    }

    #[test]
    fn given_leaf_without_metadata_when_validating_then_reports_missing_fields() {
        let manifest = Manifest::new(vec![Entry::new("Bare", "bare")]);
        let report = validate(&manifest);
        let kinds: Vec<_> = report.violations.iter().map(|v| v.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::MissingTags,
                ViolationKind::MissingKeywords,
                ViolationKind::MissingExcerpt
            ]
        );
        assert!(report.violations.iter().all(|v| v.route == "/bare"));
        assert!(!report.is_ok(false));
    }

    #[test]
    fn given_duplicate_sibling_hrefs_when_validating_then_warns_on_parent() {
        let manifest = Manifest::new(vec![Entry::new("Tutorials", "tutorials")
            .with_children(vec![tutorial("same"), tutorial("same")])]);
        let report = validate(&manifest);
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.errors().count(), 0);
        let warning = report.warnings().next().unwrap();
        assert_eq!(warning.route, "/tutorials");
        assert_eq!(warning.kind, ViolationKind::DuplicateHref("same".into()));
        assert!(report.is_ok(false));
        assert!(!report.is_ok(true));
    }

    #[test]
    fn given_empty_and_repeated_tags_when_validating_then_reports_each() {
        let mut entry = tutorial("t");
        entry.tags = vec!["iot".into(), "".into(), "iot".into()];
        entry.keywords = vec!["".into()];
        let report = validate(&Manifest::new(vec![entry]));
        let kinds: Vec<_> = report.errors().map(|v| v.kind.clone()).collect();
        assert!(kinds.contains(&ViolationKind::EmptyTag));
        assert!(kinds.contains(&ViolationKind::DuplicateTag("iot".into())));
        assert!(kinds.contains(&ViolationKind::EmptyKeyword));
    }
}
