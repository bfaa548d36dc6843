//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{ManifestSource, ValidationOutcome};
use crate::application::{ApplicationError, ManifestFormat};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::query::{filter_by_tag, search, tag_facets};
use crate::domain::{create_branches, DomainError, Manifest, NavBuilder, Side, ToOutline};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };
    let mut settings = Settings::load(Some(&config_dir))?;
    if let Some(base) = &cli.base {
        settings.base_path = base.clone();
    }
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Tree { file }) => _tree(&container, file.as_deref()),
        Some(Commands::Routes { file }) => _routes(&container, file.as_deref()),
        Some(Commands::Branches { file }) => _branches(&container, file.as_deref()),
        Some(Commands::Show { route, file }) => _show(&container, route, file.as_deref()),
        Some(Commands::Validate { paths, strict }) => _validate(&container, paths, *strict),
        Some(Commands::Conflicts { file }) => _conflicts(&container, file),
        Some(Commands::Resolve { file, side, write }) => {
            _resolve(&container, file, Side::from(*side), *write)
        }
        Some(Commands::Export {
            file,
            format,
            output,
        }) => _export(&container, file.as_deref(), *format, output.as_deref()),
        Some(Commands::Tags { file }) => _tags(&container, file.as_deref()),
        Some(Commands::Filter { tag, file }) => _filter(&container, tag, file.as_deref()),
        Some(Commands::Search { term, file }) => _search(&container, term, file.as_deref()),
        Some(Commands::Config { command }) => _config(&container, command, &config_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn source_for(container: &ServiceContainer, file: Option<&Path>) -> ManifestSource {
    match file {
        Some(path) => ManifestSource::File(path.to_path_buf()),
        None => container.default_source(),
    }
}

fn load(container: &ServiceContainer, file: Option<&Path>) -> CliResult<Manifest> {
    let source = source_for(container, file);
    debug!("loading manifest from {}", source.label());
    Ok(container.manifests.load_source(&source)?)
}

/// Routes on the command line may carry the base path; manifest lookups do not.
fn strip_base<'r>(route: &'r str, base: &str) -> &'r str {
    let base = base.trim_matches('/');
    let route = route.trim_start_matches('/');
    if base.is_empty() {
        return route;
    }
    match route.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => route,
    }
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let manifest = load(container, file)?;
    let arena = NavBuilder::new().build(&manifest);
    arena.verify_acyclic().map_err(ApplicationError::from)?;
    for tree in arena.to_outline() {
        output::info(&tree);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _routes(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let manifest = load(container, file)?;
    for route in manifest.routes(&container.settings.base_path) {
        output::info(&route);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _branches(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let manifest = load(container, file)?;
    let arena = NavBuilder::new().build(&manifest);
    let branches = create_branches(&arena).map_err(ApplicationError::from)?;
    debug!("found {} branches", branches.len());
    for branch in branches {
        output::info(&branch.iter().join(" > "));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _show(container: &ServiceContainer, route: &str, file: Option<&Path>) -> CliResult<()> {
    let manifest = load(container, file)?;
    let base = &container.settings.base_path;
    let relative = strip_base(route, base);
    let entry = container.manifests.find(&manifest, relative)?;
    let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();

    output::header(&entry.title);
    output::detail(&format!("route:    {}", crate::domain::join_route(base, &segments)));
    if let Some(excerpt) = &entry.excerpt {
        output::detail(&format!("excerpt:  {excerpt}"));
    }
    if !entry.tags.is_empty() {
        output::detail(&format!("tags:     {}", entry.tags.join(", ")));
    }
    if !entry.keywords.is_empty() {
        output::detail(&format!("keywords: {}", entry.keywords.join(", ")));
    }
    if !entry.children.is_empty() {
        output::detail(&format!(
            "children: {}",
            entry.children.iter().map(|c| c.href.as_str()).join(", ")
        ));
    }
    Ok(())
}

fn print_outcome(outcome: &ValidationOutcome, strict: bool) {
    let label = outcome.source.label();
    match &outcome.result {
        Ok(report) => {
            if outcome.passed(strict) {
                output::success(&format!(
                    "{label}: {} entries ok",
                    report.entries_checked
                ));
            } else {
                output::failure(&label);
            }
            for violation in &report.violations {
                output::detail(violation);
            }
        }
        Err(e) => {
            output::failure(&label);
            output::detail(e);
        }
    }
}

#[instrument(skip(container))]
fn _validate(container: &ServiceContainer, paths: &[PathBuf], strict: bool) -> CliResult<()> {
    let strict = strict || container.settings.strict;
    let sources: Vec<ManifestSource> = if paths.is_empty() {
        vec![container.default_source()]
    } else {
        container
            .manifests
            .discover(paths)?
            .into_iter()
            .map(ManifestSource::File)
            .collect()
    };
    if sources.is_empty() {
        output::warning("no manifests found");
        return Ok(());
    }

    let outcomes = container.manifests.validate_all(&sources);
    for outcome in &outcomes {
        print_outcome(outcome, strict);
    }

    let failed = outcomes.iter().filter(|o| !o.passed(strict)).count();
    if failed > 0 {
        return Err(CliError::ValidationFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

#[instrument(skip(container))]
fn _conflicts(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let regions = container.manifests.conflicts(file)?;
    if regions.is_empty() {
        output::success(&format!("{}: no conflict markers", file.display()));
        return Ok(());
    }
    for region in &regions {
        output::header(&format!(
            "{}:{}-{} ({} vs {})",
            file.display(),
            region.start_line,
            region.end_line,
            region.ours_label,
            region.theirs_label
        ));
        for line in &region.ours {
            output::diff_add(line);
        }
        for line in &region.base {
            output::detail(&format!("| {line}"));
        }
        for line in &region.theirs {
            output::diff_remove(line);
        }
    }
    let lines = regions.iter().flat_map(|r| r.marker_lines()).collect();
    Err(ApplicationError::from(DomainError::ConflictMarkers { lines }).into())
}

#[instrument(skip(container))]
fn _resolve(container: &ServiceContainer, file: &Path, side: Side, write: bool) -> CliResult<()> {
    if write {
        let count = container.manifests.resolve_in_place(file, side)?;
        if count == 0 {
            output::success(&format!("{}: no conflict markers", file.display()));
        } else {
            output::action(
                "Resolved",
                &format!("{count} regions in {} (kept {side})", file.display()),
            );
        }
    } else {
        print!("{}", container.manifests.resolve(file, side)?);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _export(
    container: &ServiceContainer,
    file: Option<&Path>,
    format: Option<ManifestFormat>,
    output_path: Option<&Path>,
) -> CliResult<()> {
    let manifest = load(container, file)?;
    match output_path {
        Some(path) => {
            let format = match format {
                Some(f) => f,
                None => ManifestFormat::from_path(path).unwrap_or(container.settings.format),
            };
            container.manifests.save(&manifest, path, Some(format))?;
            output::action("Exported", &format!("{} ({format})", path.display()));
        }
        None => {
            let format = format.unwrap_or(container.settings.format);
            print!("{}", format.render(&manifest)?);
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn _tags(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let manifest = load(container, file)?;
    let facets = tag_facets(&manifest);
    let width = facets.keys().map(|t| t.len()).max().unwrap_or(0);
    for (tag, count) in facets {
        output::info(&format!("{tag:<width$}  {count}"));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _filter(container: &ServiceContainer, tag: &str, file: Option<&Path>) -> CliResult<()> {
    let manifest = load(container, file)?;
    let hits = filter_by_tag(&manifest, tag, &container.settings.base_path);
    if hits.is_empty() {
        output::warning(&format!("no entries tagged '{tag}'"));
    }
    for hit in hits {
        output::info(&format!("{}  {}", hit.route, hit.entry.title));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _search(container: &ServiceContainer, term: &str, file: Option<&Path>) -> CliResult<()> {
    let manifest = load(container, file)?;
    let hits = search(&manifest, term, &container.settings.base_path);
    if hits.is_empty() {
        output::warning(&format!("no entries match '{term}'"));
    }
    for hit in hits {
        output::info(&format!("{}  {}", hit.route, hit.entry.title));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    config_dir: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(p) => output::detail(&format!("global: {}", p.display())),
                None => output::detail(&"global: <unavailable>"),
            }
            output::detail(&format!("local:  {}", local_config_path(config_dir).display()));
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(config_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}
