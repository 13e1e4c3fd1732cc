use crate::classify::{Classification, classify};
use crate::error::{IncludeError, Result};
use crate::fs_utils::{DiscoveryOptions, discover};
use crate::output::{destination_path, output_path, write_output};
use crate::progress::ProgressDisplay;
use crate::report::{Event, EventSink};
use crate::resolver::{ResolveConfig, Resolver};
use crate::source::{RootFile, SourceFile, scan_batch};
use crate::summary::{Outcome, RunSummary};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Glob used when no include pattern is given
pub const DEFAULT_PATTERN: &str = "**/*.html";

/// Output root used when no destination is given
pub const DEFAULT_DESTINATION: &str = "build";

/// Configuration for a whole run
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directories to scan
    pub sources: Vec<PathBuf>,
    /// Globs, relative to each source directory, selecting candidate files
    pub patterns: Vec<String>,
    /// Root of the output tree
    pub destination: PathBuf,
    /// Drop the source directory from output paths
    pub omit_source_parent: bool,
    /// Resolve everything but write nothing
    pub dry_run: bool,
    pub discovery: DiscoveryOptions,
    pub resolve: ResolveConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            sources: vec![PathBuf::from(".")],
            patterns: vec![DEFAULT_PATTERN.to_string()],
            destination: PathBuf::from(DEFAULT_DESTINATION),
            omit_source_parent: true,
            dry_run: false,
            discovery: DiscoveryOptions::default(),
            resolve: ResolveConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Where `root` is written
    #[must_use]
    pub fn target_for(&self, root: &RootFile) -> PathBuf {
        destination_path(&self.destination, &output_path(root, self.omit_source_parent))
    }
}

/// Discovers and scans candidate files in every source directory.
///
/// Each (source, pattern) pair is one batch. A file matched by several patterns is only
/// scanned once per source, and nothing inside the destination tree is picked up.
///
/// # Errors
///
/// Returns an error if a pattern is invalid or a source directory cannot be walked.
pub fn scan_sources(
    config: &BuildConfig,
    sink: &mut dyn EventSink,
    summary: &mut RunSummary,
) -> Result<Vec<SourceFile>> {
    let destination = fs::canonicalize(&config.destination).ok();
    let mut files = Vec::new();

    for source in &config.sources {
        let mut seen = HashSet::new();
        for pattern in &config.patterns {
            let batch: Vec<PathBuf> = discover(source, pattern, &config.discovery)?
                .into_iter()
                .filter(|relative| !is_inside(&source.join(relative), destination.as_deref()))
                .filter(|relative| seen.insert(relative.clone()))
                .collect();

            sink.emit(Event::Discovered {
                directory: source.clone(),
                pattern: pattern.clone(),
                count: batch.len(),
            });
            files.extend(scan_batch(source, &batch, sink, summary));
        }
    }

    Ok(files)
}

/// Discovers, scans and classifies, without resolving anything
///
/// # Errors
///
/// See [`scan_sources`].
pub fn plan(
    config: &BuildConfig,
    sink: &mut dyn EventSink,
    summary: &mut RunSummary,
) -> Result<Classification> {
    let classification = classify(scan_sources(config, sink, summary)?);
    for fragment in &classification.fragments {
        sink.emit(Event::FragmentSkipped {
            path: fragment.path(),
        });
    }
    Ok(classification)
}

/// Runs a complete build: discovery, classification, resolution and writing.
///
/// Missing includes, unreadable sources and write failures are reported to `sink` and
/// counted in the returned summary; they never fail the run.
///
/// # Errors
///
/// Only configuration problems fail the run; see [`scan_sources`].
pub fn run(
    config: &BuildConfig,
    sink: &mut dyn EventSink,
    progress: &ProgressDisplay,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let classification = match plan(config, sink, &mut summary) {
        Ok(classification) => classification,
        Err(err) => {
            progress.abandon();
            return Err(err);
        }
    };

    progress.set_length(classification.roots.len() as u64);
    for root in &classification.roots {
        sink.emit(Event::Resolving { path: root.path() });
        let content = Resolver::new(&config.resolve, &mut *sink, &mut summary).resolve(root);
        let target = config.target_for(root);
        progress.update(&target.display().to_string());

        if config.dry_run {
            sink.emit(Event::Written { path: target });
            summary.record(Outcome::Written);
            continue;
        }

        match write_output(&target, &content) {
            Ok(()) => {
                sink.emit(Event::Written { path: target });
                summary.record(Outcome::Written);
            }
            Err(err) => {
                let reason = match err {
                    IncludeError::WriteFailure { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                sink.emit(Event::WriteFailure {
                    path: target,
                    reason,
                });
                summary.record(Outcome::Error);
            }
        }
    }
    progress.finish();

    Ok(summary)
}

fn is_inside(path: &Path, destination: Option<&Path>) -> bool {
    destination.is_some_and(|destination| {
        fs::canonicalize(path).is_ok_and(|canonical| canonical.starts_with(destination))
    })
}
