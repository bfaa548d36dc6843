//! Tag facets and keyword lookup over an in-memory manifest.

use std::collections::BTreeMap;

use crate::domain::entities::{Entry, Manifest};

/// Entry matched by a query, with its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit<'a> {
    pub route: String,
    pub entry: &'a Entry,
}

/// How a search term matched an entry. Ordering is ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchField {
    Keyword,
    Title,
    Excerpt,
}

/// Number of entries carrying each tag.
pub fn tag_facets(manifest: &Manifest) -> BTreeMap<String, usize> {
    let mut facets = BTreeMap::new();
    for visit in manifest.walk() {
        for tag in &visit.entry.tags {
            *facets.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    facets
}

/// Entries carrying `tag` (exact match), in manifest order.
pub fn filter_by_tag<'a>(manifest: &'a Manifest, tag: &str, base: &str) -> Vec<Hit<'a>> {
    manifest
        .walk()
        .filter(|v| v.entry.tags.iter().any(|t| t == tag))
        .map(|v| Hit {
            route: v.route(base),
            entry: v.entry,
        })
        .collect()
}

/// Best field of `entry` matching the lowercased `needle`.
pub fn match_field(entry: &Entry, needle: &str) -> Option<MatchField> {
    if entry
        .keywords
        .iter()
        .any(|k| k.to_lowercase().contains(needle))
    {
        Some(MatchField::Keyword)
    } else if entry.title.to_lowercase().contains(needle) {
        Some(MatchField::Title)
    } else if entry
        .excerpt
        .as_deref()
        .is_some_and(|e| e.to_lowercase().contains(needle))
    {
        Some(MatchField::Excerpt)
    } else {
        None
    }
}

/// Case-insensitive search. Keyword matches rank first, then title, then excerpt;
/// ties keep manifest order. A blank term matches nothing.
pub fn search<'a>(manifest: &'a Manifest, term: &str, base: &str) -> Vec<Hit<'a>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut ranked: Vec<(MatchField, Hit<'a>)> = manifest
        .walk()
        .filter_map(|v| {
            match_field(v.entry, &needle).map(|field| {
                (
                    field,
                    Hit {
                        route: v.route(base),
                        entry: v.entry,
                    },
                )
            })
        })
        .collect();
    // Stable sort keeps manifest order within a rank
    ranked.sort_by_key(|(field, _)| *field);
    ranked.into_iter().map(|(_, hit)| hit).collect()
}
