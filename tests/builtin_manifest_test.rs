//! Integration tests for the compiled-in tutorials index.

use std::path::Path;

use rstest::rstest;

use docnav::application::ManifestFormat;
use docnav::domain::query::{filter_by_tag, search, tag_facets};
use docnav::domain::validate::is_url_safe;
use docnav::domain::{validate, NavBuilder};
use docnav::tutorials;
use docnav::util::testing;

#[test]
fn given_builtin_index_when_validating_then_report_is_clean() {
    testing::init_test_setup();
    let report = validate(tutorials());

    assert_eq!(report.entries_checked, 35);
    assert!(
        report.violations.is_empty(),
        "unexpected violations: {:?}",
        report.violations
    );
    assert!(report.is_ok(true));
}

#[test]
fn given_builtin_index_then_single_section_root_with_fifteen_tutorials() {
    let manifest = tutorials();

    assert_eq!(manifest.entries.len(), 1);
    let root = &manifest.entries[0];
    assert_eq!(root.title, "Tutorials");
    assert_eq!(root.href, "tutorials");
    assert!(root.is_section());
    assert_eq!(root.children.len(), 15);
    assert_eq!(manifest.depth(), 3);
}

#[test]
fn given_builtin_index_then_every_href_is_url_safe() {
    for visit in tutorials().walk() {
        assert!(
            is_url_safe(&visit.entry.href),
            "{} is not url safe",
            visit.route("/")
        );
    }
}

#[test]
fn given_builtin_index_then_every_tutorial_has_tags_keywords_and_excerpt() {
    for visit in tutorials().walk().filter(|v| v.depth > 0) {
        let entry = visit.entry;
        assert!(!entry.tags.is_empty(), "{}", visit.route("/"));
        assert!(!entry.keywords.is_empty(), "{}", visit.route("/"));
        assert!(entry.excerpt.is_some(), "{}", visit.route("/"));
    }
}

#[test]
fn given_nyc_taxi_cab_when_looked_up_then_has_resolved_keywords() {
    let entry = tutorials()
        .find("tutorials/nyc-taxi-cab")
        .expect("nyc-taxi-cab entry");

    assert_eq!(entry.title, "Introduction to IoT");
    assert_eq!(entry.tags, vec!["iot", "query", "learn", "tsc"]);
    assert_eq!(entry.keywords, vec!["IoT", "tutorial", "Timescale Cloud"]);
    assert!(entry.children.is_empty());
}

#[test]
fn given_analyze_intraday_stocks_then_children_keep_authoring_order() {
    let entry = tutorials()
        .find("/tutorials/analyze-intraday-stocks/")
        .expect("analyze-intraday-stocks entry");

    let hrefs: Vec<&str> = entry.children.iter().map(|c| c.href.as_str()).collect();
    assert_eq!(
        hrefs,
        vec!["design-schema", "fetch-and-ingest", "explore-stocks-data"]
    );
}

#[rstest]
#[case("tutorials/grafana/setup-alerts", "Setup alerts")]
#[case("tutorials/aws-lambda/3rd-party-api-ingest", "Pull and ingest data from a third party API")]
#[case("tutorials/sample-datasets", "Sample datasets")]
fn given_nested_route_when_finding_then_returns_entry(#[case] route: &str, #[case] title: &str) {
    let entry = tutorials().find(route).expect("entry for route");
    assert_eq!(entry.title, title);
}

#[test]
fn given_builtin_index_when_listing_routes_then_uses_base_path() {
    let routes = tutorials().routes("/docs");

    assert_eq!(routes.len(), 35);
    assert_eq!(routes[0], "/docs/tutorials");
    assert_eq!(routes[1], "/docs/tutorials/nyc-taxi-cab");
    assert_eq!(routes.last().map(String::as_str), Some("/docs/tutorials/sample-datasets"));
}

#[test]
fn given_builtin_index_when_built_into_arena_then_branches_end_in_leaves() {
    let arena = NavBuilder::new().build(tutorials());

    assert_eq!(arena.len(), 35);
    arena.verify_acyclic().expect("builtin index is acyclic");
    assert_eq!(arena.leaf_nodes().len(), 29);
    assert_eq!(arena.to_manifest(), *tutorials());
}

#[test]
fn given_builtin_index_when_counting_tags_then_learn_dominates() {
    let facets = tag_facets(tutorials());

    assert_eq!(facets.get("grafana"), Some(&7));
    assert_eq!(facets.get("tsc"), Some(&1));
    assert_eq!(facets.get("learn"), Some(&33));
    assert_eq!(filter_by_tag(tutorials(), "lambda", "/").len(), 3);
}

#[test]
fn given_term_in_keywords_when_searching_then_hits_follow_manifest_order() {
    let hits = search(tutorials(), "PROMSCALE", "/");

    assert_eq!(hits.len(), 6);
    assert_eq!(hits[0].route, "/tutorials/promscale");
    assert_eq!(
        hits[5].route,
        "/tutorials/setting-up-timescale-cloud-endpoint-for-prometheus"
    );
}

#[rstest]
#[case(ManifestFormat::Json)]
#[case(ManifestFormat::Toml)]
fn given_builtin_index_when_rendered_and_parsed_then_unchanged(#[case] format: ManifestFormat) {
    let text = format.render(tutorials()).expect("render");
    let parsed = format
        .parse(&text, Path::new("builtin"))
        .expect("parse rendered text");
    assert_eq!(parsed, *tutorials());
}

#[test]
fn given_shipped_data_file_when_parsed_then_matches_builtin_index() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/tutorials.json");
    let text = std::fs::read_to_string(&path).expect("read data/tutorials.json");

    let parsed = ManifestFormat::Json.parse(&text, &path).expect("parse");
    assert_eq!(parsed, *tutorials());
}
