//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

/// One tutorial page in the navigation, possibly with nested sub-pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    /// Display title
    pub title: String,
    /// Path segment, joined with the parents' segments to form the route
    pub href: String,
    /// Facets for filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Search terms, in authoring order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Short summary shown under the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Sub-pages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Entry>,
}

impl Entry {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            tags: Vec::new(),
            keywords: Vec::new(),
            excerpt: None,
            children: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Entry>) -> Self {
        self.children = children;
        self
    }

    /// A section only groups children: it has no tags, keywords or excerpt.
    pub fn is_section(&self) -> bool {
        !self.children.is_empty()
            && self.tags.is_empty()
            && self.keywords.is_empty()
            && self.excerpt.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, href: &str) -> Option<&Entry> {
        self.children.iter().find(|c| c.href == href)
    }
}

/// Ordered forest of top-level navigation entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<Entry>,
}

/// Entry visited by [`Manifest::walk`], with its place in the forest.
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    /// 0 for top-level entries
    pub depth: usize,
    /// Hrefs from the root down to and including this entry
    pub segments: Vec<&'a str>,
    pub entry: &'a Entry,
}

impl Visit<'_> {
    pub fn route(&self, base: &str) -> String {
        join_route(base, &self.segments)
    }
}

impl Manifest {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Number of entries in the whole forest.
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum nesting depth; 0 for an empty manifest.
    pub fn depth(&self) -> usize {
        fn entry_depth(entry: &Entry) -> usize {
            1 + entry.children.iter().map(entry_depth).max().unwrap_or(0)
        }
        self.entries.iter().map(entry_depth).max().unwrap_or(0)
    }

    /// Pre-order traversal of the forest, siblings in authoring order.
    pub fn walk(&self) -> Walk<'_> {
        let stack = self
            .entries
            .iter()
            .rev()
            .map(|entry| Visit {
                depth: 0,
                segments: vec![entry.href.as_str()],
                entry,
            })
            .collect();
        Walk { stack }
    }

    /// Look up an entry by its `/`-separated href path, e.g. `tutorials/grafana/setup-alerts`.
    ///
    /// Leading and trailing slashes are ignored.
    pub fn find(&self, route: &str) -> Option<&Entry> {
        let mut segments = route.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let mut current = self.entries.iter().find(|e| e.href == first)?;
        for segment in segments {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// Full route of every entry, in pre-order.
    pub fn routes(&self, base: &str) -> Vec<String> {
        self.walk().map(|v| v.route(base)).collect()
    }
}

pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        let entry: &'a Entry = visit.entry;
        // Reverse push keeps left-to-right order on pop
        for child in entry.children.iter().rev() {
            let mut segments = visit.segments.clone();
            segments.push(child.href.as_str());
            self.stack.push(Visit {
                depth: visit.depth + 1,
                segments,
                entry: child,
            });
        }
        Some(visit)
    }
}

/// Join a base path and href segments into an absolute route.
///
/// `join_route("/docs/", &["tutorials", "grafana"])` → `/docs/tutorials/grafana`
pub fn join_route(base: &str, segments: &[&str]) -> String {
    let base = base.trim_matches('/');
    let mut route = String::from("/");
    if !base.is_empty() {
        route.push_str(base);
    }
    for segment in segments {
        if !route.ends_with('/') {
            route.push('/');
        }
        route.push_str(segment);
    }
    route
}

/// Expand environment variables in a path string.
///
/// Supports `$VAR`, `${VAR}` and `~`.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Manifest {
        Manifest::new(vec![Entry::new("Tutorials", "tutorials").with_children(vec![
            Entry::new("A", "a").with_children(vec![Entry::new("A1", "a1")]),
            Entry::new("B", "b"),
        ])])
    }

    #[test]
    fn given_nested_manifest_when_walking_then_yields_preorder() {
        let manifest = sample();
        let hrefs: Vec<_> = manifest.walk().map(|v| v.entry.href.as_str()).collect();
        assert_eq!(hrefs, vec!["tutorials", "a", "a1", "b"]);
        let depths: Vec<_> = manifest.walk().map(|v| v.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1]);
    }

    #[test]
    fn given_route_when_finding_then_resolves_nested_entry() {
        let manifest = sample();
        assert_eq!(manifest.find("/tutorials/a/a1/").unwrap().title, "A1");
        assert!(manifest.find("tutorials/a1").is_none());
        assert!(manifest.find("").is_none());
    }

    #[test]
    fn given_base_path_when_joining_route_then_normalizes_slashes() {
        assert_eq!(join_route("/", &["tutorials", "a"]), "/tutorials/a");
        assert_eq!(join_route("docs/", &["tutorials"]), "/docs/tutorials");
        assert_eq!(join_route("", &[]), "/");
    }

    #[test]
    fn given_entry_with_children_only_then_is_section() {
        let manifest = sample();
        assert!(manifest.entries[0].is_section());
        assert!(!manifest.entries[0].children[1].is_section());
        assert!(manifest.entries[0].children[1].is_leaf());
    }

    #[test]
    fn given_manifest_then_len_and_depth_cover_forest() {
        let manifest = sample();
        assert_eq!(manifest.len(), 4);
        assert_eq!(manifest.depth(), 3);
        assert_eq!(Manifest::default().depth(), 0);
    }
}
