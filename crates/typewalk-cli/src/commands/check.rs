//! Check command implementation.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use typewalk_core::{Analyzer, Config, RuleBox, SourceHost};
use typewalk_rules::{rules_from_config, Preset, RULE_NAMES};
use typewalk_ts::TypeScriptHost;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    preset: Preset,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;
    let host = TypeScriptHost::new();

    let target = if path.is_file() {
        path.to_path_buf()
    } else {
        path.join(&config.linter.root)
    };
    let target = std::fs::canonicalize(&target)
        .with_context(|| format!("Failed to resolve {}", target.display()))?;

    let (root, files) = if target.is_file() {
        let root = target.parent().map_or_else(|| PathBuf::from("/"), Path::to_path_buf);
        (root, vec![target])
    } else {
        let files = discover_files(&target, &host, config.linter.respect_gitignore)?;
        (target, files)
    };

    let rules = select_rules(&config, preset, rules_filter.as_deref());

    let mut builder = Analyzer::builder()
        .root(&root)
        .excludes(exclude)
        .config(config)
        .files(files);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    let analyzer = builder.host(host).build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        root.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    if result.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

/// Rules named in the configuration, or the preset when it names none,
/// narrowed to `filter` when given.
fn select_rules(config: &Config, preset: Preset, filter: Option<&str>) -> Vec<RuleBox> {
    let rules = if config.configured_rules().is_empty() {
        preset.rules()
    } else {
        rules_from_config(config)
    };

    let Some(filter) = filter else {
        return rules;
    };

    let names: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();
    for name in &names {
        if !RULE_NAMES.contains(name) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    rules
        .into_iter()
        .filter(|rule| names.contains(&rule.name()))
        .collect()
}

/// Lists files under `root` the host can parse, honoring `.gitignore` when
/// asked to.
fn discover_files(root: &Path, host: &dyn SourceHost, respect_gitignore: bool) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(respect_gitignore)
        .git_exclude(respect_gitignore)
        .require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();

        if path.is_file() && host.supports(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
