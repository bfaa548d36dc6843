//! Built-in TimescaleDB tutorials navigation.
//!
//! Authored as a static tree and materialized into an owned [`Manifest`] once,
//! on first access.

use std::sync::OnceLock;

use crate::domain::entities::{Entry, Manifest};

/// Compile-time form of an [`Entry`].
#[derive(Debug)]
pub struct StaticEntry {
    pub title: &'static str,
    pub href: &'static str,
    pub tags: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub excerpt: Option<&'static str>,
    pub children: &'static [StaticEntry],
}

impl From<&StaticEntry> for Entry {
    fn from(entry: &StaticEntry) -> Self {
        Entry {
            title: entry.title.to_string(),
            href: entry.href.to_string(),
            tags: entry.tags.iter().map(|t| t.to_string()).collect(),
            keywords: entry.keywords.iter().map(|k| k.to_string()).collect(),
            excerpt: entry.excerpt.map(str::to_string),
            children: entry.children.iter().map(Entry::from).collect(),
        }
    }
}

/// The tutorials index.
pub fn tutorials() -> &'static Manifest {
    static TUTORIALS: OnceLock<Manifest> = OnceLock::new();
    TUTORIALS.get_or_init(|| Manifest::new(TUTORIAL_INDEX.iter().map(Entry::from).collect()))
}

pub static TUTORIAL_INDEX: &[StaticEntry] = &[
    StaticEntry {
        title: "Tutorials",
        href: "tutorials",
        tags: &[],
        keywords: &[],
        excerpt: None,
        children: &[
            StaticEntry {
                title: "Introduction to IoT",
                href: "nyc-taxi-cab",
                tags: &["iot", "query", "learn", "tsc"],
                keywords: &["IoT", "tutorial", "Timescale Cloud"],
                excerpt: Some("An introduction to IoT using NYC taxi data"),
                children: &[],
            },
            StaticEntry {
                title: "Introduction to time-series forecasting",
                href: "time-series-forecast",
                tags: &["r", "analyze", "learn", "timescaledb"],
                keywords: &["r", "tutorial", "TimescaleDB"],
                excerpt: Some("An introduction to time-series forecasting using NYC taxi data"),
                children: &[],
            },
            StaticEntry {
                title: "Analyze cryptocurrency data",
                href: "analyze-cryptocurrency-data",
                tags: &["cryptocurrency", "finance", "analyze", "learn", "timescaledb"],
                keywords: &["cryptocurrency", "finance", "tutorial", "TimescaleDB"],
                excerpt: Some("Use TimescaleDB to analyze cryptocurrency data"),
                children: &[],
            },
            StaticEntry {
                title: "Analyze intraday stock data",
                href: "analyze-intraday-stocks",
                tags: &["finance", "analyze", "learn", "timescaledb"],
                keywords: &["finance", "tutorial", "TimescaleDB"],
                excerpt: Some("Analyze intraday stock data with TimescaleDB"),
                children: &[
                    StaticEntry {
                        title: "Design database schema",
                        href: "design-schema",
                        tags: &["finance", "create", "learn", "timescaledb"],
                        keywords: &["finance", "tutorial", "TimescaleDB"],
                        excerpt: Some("Design a database schema for intraday stock data analysis"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Fetch and ingest stock data",
                        href: "fetch-and-ingest",
                        tags: &["finance", "ingest", "learn", "timescaledb"],
                        keywords: &["finance", "tutorial", "TimescaleDB"],
                        excerpt: Some("Fetch and ingest stock data using TimescaleDB"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Explore stock market data",
                        href: "explore-stocks-data",
                        tags: &["finance", "analyze", "learn", "timescaledb"],
                        keywords: &["finance", "tutorial", "TimescaleDB"],
                        excerpt: Some("Explore stock market data with TimescaleDB"),
                        children: &[],
                    },
                ],
            },
            StaticEntry {
                title: "Analyze data using hyperfunctions",
                href: "nfl-analytics",
                tags: &["hyperfunctions", "analyze", "learn", "timescaledb"],
                keywords: &["hyperfunctions", "tutorial", "TimescaleDB"],
                excerpt: Some("Analyze NFL data using TimescaleDB"),
                children: &[
                    StaticEntry {
                        title: "Ingest and query data",
                        href: "ingest-and-query",
                        tags: &["hyperfunctions", "ingest", "query", "learn", "timescaledb"],
                        keywords: &["hyperfunctions", "tutorial", "TimescaleDB"],
                        excerpt: Some("Ingest and query NFL data with TimescaleDB"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Analyze data using SQL and hyperfunctions",
                        href: "advanced-analysis",
                        tags: &["hyperfunctions", "analyze", "learn", "timescaledb"],
                        keywords: &["hyperfunctions", "tutorial", "TimescaleDB"],
                        excerpt: Some("Analyze NFL data using SQL and hyperfunctions in TimescaleDB"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Join time-series and relational data",
                        href: "join-with-relational",
                        tags: &["hyperfunctions", "analyze", "learn", "timescaledb"],
                        keywords: &["hyperfunctions", "tutorial", "TimescaleDB"],
                        excerpt: Some("Join time-series and relational NFL data in TimescaleDB"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Visualize time-series data",
                        href: "play-visualization",
                        tags: &["hyperfunctions", "visualize", "learn", "timescaledb"],
                        keywords: &["hyperfunctions", "visualize", "tutorial", "TimescaleDB"],
                        excerpt: Some("Visualize NFL data with TimescaleDB"),
                        children: &[],
                    },
                ],
            },
            StaticEntry {
                title: "Getting started with Promscale",
                href: "promscale",
                tags: &["promscale", "prometheus", "learn", "timescaledb"],
                keywords: &["Promscale", "Prometheus", "tutorial", "TimescaleDB"],
                excerpt: Some("Learn about Promscale with TimescaleDB"),
                children: &[
                    StaticEntry {
                        title: "The Benefits of using Promscale",
                        href: "promscale-benefits",
                        tags: &["promscale", "prometheus", "learn", "timescaledb"],
                        keywords: &["Promscale", "Prometheus", "tutorial", "TimescaleDB"],
                        excerpt: Some("Explore the benefits of using Promscale"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "How Promscale works",
                        href: "promscale-how-it-works",
                        tags: &["promscale", "prometheus", "learn", "timescaledb"],
                        keywords: &["Promscale", "Prometheus", "tutorial", "TimescaleDB"],
                        excerpt: Some("Learn how Promscale works"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Installing Promscale",
                        href: "promscale-install",
                        tags: &["promscale", "prometheus", "install", "learn", "timescaledb"],
                        keywords: &["Promscale", "Prometheus", "tutorial", "TimescaleDB"],
                        excerpt: Some("Install Promscale"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Run queries with PromQL and SQL",
                        href: "promscale-run-queries",
                        tags: &["promscale", "prometheus", "query", "learn", "timescaledb"],
                        keywords: &["Promscale", "Prometheus", "tutorial", "TimescaleDB"],
                        excerpt: Some("Query your data using PromQL and SQL in Promscale"),
                        children: &[],
                    },
                ],
            },
            StaticEntry {
                title: "Monitor Timescale Cloud with Prometheus",
                href: "setting-up-timescale-cloud-endpoint-for-prometheus",
                tags: &["prometheus", "monitor", "learn", "timescaledb"],
                keywords: &["Promscale", "Prometheus", "tutorial", "TimescaleDB"],
                excerpt: Some("Monitor Timescale Cloud with Prometheus"),
                children: &[],
            },
            StaticEntry {
                title: "Monitor a Django application with Prometheus",
                href: "monitor-django-with-prometheus",
                tags: &["prometheus", "django", "monitor", "learn", "timescaledb"],
                keywords: &["Prometheus", "Django", "tutorial", "TimescaleDB"],
                excerpt: Some("Monitor a Django application with Prometheus"),
                children: &[],
            },
            StaticEntry {
                title: "Collect metrics with Telegraf",
                href: "telegraf-output-plugin",
                tags: &["telegraf", "monitor", "learn", "timescaledb"],
                keywords: &["Telegraf", "tutorial", "TimescaleDB"],
                excerpt: Some("Collect metrics with Telegraf"),
                children: &[],
            },
            StaticEntry {
                title: "Grafana",
                href: "grafana",
                tags: &["grafana", "visualize", "learn", "timescaledb"],
                keywords: &["Grafana", "tutorial", "TimescaleDB"],
                excerpt: Some("Getting Started with Grafana and TimescaleDB"),
                children: &[
                    StaticEntry {
                        title: "Install Grafana",
                        href: "installation",
                        tags: &["grafana", "visualize", "install", "learn", "timescaledb"],
                        keywords: &["Grafana", "tutorial", "TimescaleDB"],
                        excerpt: Some("Learn how to install Grafana"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Create a dashboard and panel",
                        href: "create-dashboard-and-panel",
                        tags: &["grafana", "visualize", "create", "learn", "timescaledb"],
                        keywords: &["Grafana", "tutorial", "TimescaleDB"],
                        excerpt: Some("Create a dashboard and panel with Grafana and TimescaleDB"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Build Geospatial dashboards",
                        href: "geospatial-dashboards",
                        tags: &["grafana", "visualize", "create", "learn", "timescaledb"],
                        keywords: &["Grafana", "tutorial", "TimescaleDB"],
                        excerpt: Some("Build Geospatial dashboards with Grafana and TimescaleDB"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Use Grafana variables",
                        href: "grafana-variables",
                        tags: &["grafana", "visualize", "manage", "learn", "timescaledb"],
                        keywords: &["Grafana", "tutorial", "TimescaleDB"],
                        excerpt: Some("Use Grafana variables with TimescaleDB"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Visualize missing data",
                        href: "visualize-missing-data",
                        tags: &["grafana", "visualize", "manage", "learn", "timescaledb"],
                        keywords: &["Grafana", "tutorial", "TimescaleDB"],
                        excerpt: Some("Visualize missing data in Grafana with TimescaleDB"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Setup alerts",
                        href: "setup-alerts",
                        tags: &["grafana", "visualize", "alert", "learn", "timescaledb"],
                        keywords: &["Grafana", "tutorial", "TimescaleDB"],
                        excerpt: Some("Setup alerts in Grafana with TimescaleDB"),
                        children: &[],
                    },
                ],
            },
            StaticEntry {
                title: "Visualize data in Tableau",
                href: "visualize-with-tableau",
                tags: &["tableau", "visualize", "learn", "timescaledb"],
                keywords: &["Tableau", "tutorial", "TimescaleDB"],
                excerpt: Some("Visualize data in Tableau with TimescaleDB"),
                children: &[],
            },
            StaticEntry {
                title: "Custom TimescaleDB dashboards",
                href: "custom-timescaledb-dashboards",
                tags: &["tableau", "visualize", "create", "timescaledb"],
                keywords: &["Tableau", "tutorial", "TimescaleDB"],
                excerpt: Some("Custom TimescaleDB dashboards in Tableau"),
                children: &[],
            },
            StaticEntry {
                title: "Simulate IoT Sensor Data",
                href: "simulate-iot-sensor-data",
                tags: &["tableau", "iot", "visualize", "learn", "timescaledb"],
                keywords: &["Tableau", "tutorial", "IoT", "TimescaleDB"],
                excerpt: Some("Simulate IoT Sensor Data with TimescaleDB"),
                children: &[],
            },
            StaticEntry {
                title: "TimescaleDB with AWS Lambda",
                href: "aws-lambda",
                tags: &["lambda", "learn", "timescaledb"],
                keywords: &["AWS Lambda", "tutorial", "TimescaleDB"],
                excerpt: Some("Tutorial for using TimescaleDB with AWS Lambda"),
                children: &[
                    StaticEntry {
                        title: "Create a data API for TimescaleDB",
                        href: "create-data-api",
                        tags: &["lambda", "data", "learn", "timescaledb"],
                        keywords: &["AWS Lambda", "tutorial", "TimescaleDB"],
                        excerpt: Some("Create a data API for TimescaleDB with AWS Lambda and API Gateway"),
                        children: &[],
                    },
                    StaticEntry {
                        title: "Pull and ingest data from a third party API",
                        href: "3rd-party-api-ingest",
                        tags: &["lambda", "data", "ingest", "learn", "timescaledb"],
                        keywords: &["AWS Lambda", "tutorial", "TimescaleDB"],
                        excerpt: Some("Pull and ingest data from a third party into TimescaleDB with AWS Lambda"),
                        children: &[],
                    },
                ],
            },
            StaticEntry {
                title: "Sample datasets",
                href: "sample-datasets",
                tags: &["data", "learn", "timescaledb"],
                keywords: &["tutorial", "Tableau", "TimescaleDB"],
                excerpt: Some("Sample datasets for Tableau and TimescaleDB"),
                children: &[],
            },
        ],
    },
];
