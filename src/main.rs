use atinclude::build::{DEFAULT_DESTINATION, DEFAULT_PATTERN};
use atinclude::resolver::DEFAULT_MAX_DEPTH;
use atinclude::{
    BuildConfig, DiscoveryOptions, LogSink, ProgressDisplay, ResolveConfig, Result, RunSummary,
    SourceFile, plan, run,
};
use clap::{ArgAction, Parser, ValueEnum};
use console::style;
use globset::{Glob, GlobSetBuilder};
use log::{Level, LevelFilter};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

const LONG_HELP: &str = r"
Directive:
  @@include('partials/header.html')  - Replaced by the contents of that file,
                                       resolved relative to the including file

Files that are included anywhere are fragments and are never written on their own.

Examples:
  # Flatten every HTML file under src/ into build/
  atinclude -s src
  # Several sources and patterns
  atinclude -s pages -s layouts -i '**/*.html' -i '**/*.htm'
  # Keep the source directory in output paths
  atinclude -s src -o false
  # Inline only one level, leaving nested directives untouched
  atinclude -s src -r false
  # Leave failed directives in place instead of inserting a message
  atinclude -s src -p false
  # Show roots and fragments without writing anything
  atinclude -s src --list
  # Same, as JSON
  atinclude -s src --list=json
  # Fail the build when any include is missing
  atinclude -s src --strict
";

/// Flatten @@include('path') directives into standalone output files.
#[derive(Parser, Debug)]
#[command(
    name = "atinclude",
    version,
    about = "Flatten @@include('path') directives into standalone output files.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Glob patterns of files to scan, relative to each source directory
    #[arg(short, long, value_name = "PATTERN", num_args = 1.., default_value = DEFAULT_PATTERN)]
    include: Vec<String>,

    /// Source directories to scan
    #[arg(short, long, value_name = "DIR", num_args = 1.., default_value = ".")]
    source: Vec<PathBuf>,

    /// Output root
    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = DEFAULT_DESTINATION,
        env = "ATINCLUDE_DESTINATION"
    )]
    destination: PathBuf,

    /// Drop the source directory from output paths
    #[arg(short, long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    omit_source_parent: bool,

    /// Expand directives inside included files too
    #[arg(short = 'r', long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    include_recursive: bool,

    /// Insert "File not found: <path>" for includes that cannot be read
    #[arg(short = 'p', long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    not_found_placeholder: bool,

    /// Deepest include nesting before an include is reported as cyclic
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Exclude glob patterns (repeatable), relative to each source directory
    #[arg(short = 'x', long = "exclude", value_name = "GLOB", action = ArgAction::Append)]
    exclude: Vec<String>,

    /// Disable compliance with .gitignore files
    #[arg(long)]
    no_gitignore: bool,

    /// Resolve everything but write nothing
    #[arg(long, conflicts_with = "list")]
    dry_run: bool,

    /// List roots and fragments (optionally with format: plain, detailed, json)
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "plain")]
    list: Option<ListFormat>,

    /// Exit with status 1 when any file error occurred
    #[arg(long)]
    strict: bool,

    /// Log every written file and skipped fragment
    #[arg(long)]
    verbose: bool,

    /// Also log every substituted directive
    #[arg(long)]
    extra_verbose: bool,

    /// Suppress all output except errors
    #[arg(long, conflicts_with_all = ["verbose", "extra_verbose"])]
    silent: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum ListFormat {
    /// Root files and their destinations
    Plain,
    /// Roots and fragments with their directives
    Detailed,
    /// JSON output for scripting
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum FileKind {
    Root,
    Fragment,
}

#[derive(Serialize)]
struct FileInfo {
    path: String,
    kind: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    includes: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    let level = log_level(&cli);
    init_logging(level);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            log::error!("{message}");
            std::process::exit(2);
        }
    };

    if let Some(format) = cli.list {
        if let Err(e) = list_files(&config, format) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    // Log lines and the bar would interleave, so only draw it at the default level
    let progress = if level == LevelFilter::Warn {
        ProgressDisplay::new(0)
    } else {
        ProgressDisplay::hidden()
    };

    let summary = match run(&config, &mut LogSink, &progress) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if !cli.silent {
        print_summary(&summary, config.dry_run);
    }

    if cli.strict && summary.has_errors() {
        std::process::exit(1);
    }
}

fn log_level(cli: &Cli) -> LevelFilter {
    match (cli.silent, cli.verbose, cli.extra_verbose) {
        (true, _, _) => LevelFilter::Error,
        (false, _, true) => LevelFilter::Trace,
        (false, true, false) => LevelFilter::Debug,
        (false, false, false) => LevelFilter::Warn,
    }
}

fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // RUST_LOG, when set, overrides the flags
    builder.parse_env(env_logger::Env::default());
    builder.format(|buf, record| {
        let label = match record.level() {
            Level::Error => style("ERROR").red().bold(),
            Level::Warn => style("WARN").yellow().bold(),
            Level::Info => style("INFO").green(),
            Level::Debug => style("DEBUG").cyan(),
            Level::Trace => style("TRACE").dim(),
        };
        writeln!(buf, "[{}] {}", label.for_stderr(), record.args())
    });
    builder.target(env_logger::Target::Stderr).init();
}

fn build_config(cli: &Cli) -> std::result::Result<BuildConfig, String> {
    let exclude = if cli.exclude.is_empty() {
        None
    } else {
        let mut builder = GlobSetBuilder::new();
        for pat in &cli.exclude {
            let glob =
                Glob::new(pat).map_err(|e| format!("Invalid exclude pattern '{pat}': {e}"))?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| format!("Failed to build exclude set: {e}"))?;
        Some(set)
    };

    Ok(BuildConfig {
        sources: cli.source.clone(),
        patterns: cli.include.clone(),
        destination: cli.destination.clone(),
        omit_source_parent: cli.omit_source_parent,
        dry_run: cli.dry_run,
        discovery: DiscoveryOptions {
            use_gitignore: !cli.no_gitignore,
            exclude,
        },
        resolve: ResolveConfig {
            include_recursive: cli.include_recursive,
            insert_not_found_placeholder: cli.not_found_placeholder,
            max_depth: cli.max_depth,
        },
    })
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    let written = style(summary.written).green().bold();
    let errors = if summary.has_errors() {
        style(summary.errors).red().bold()
    } else {
        style(summary.errors).green().bold()
    };
    let prefix = if dry_run { "[dry run] " } else { "" };
    println!("{prefix}Files written: {written}, File errors: {errors}");
}

fn includes_of(file: &SourceFile) -> Vec<String> {
    file.matches
        .iter()
        .map(|directive| directive.referenced_path.clone())
        .collect()
}

fn list_files(config: &BuildConfig, format: ListFormat) -> Result<()> {
    log::debug!("Listing roots and fragments...");

    let mut summary = RunSummary::default();
    let classification = plan(config, &mut LogSink, &mut summary)?;

    match format {
        ListFormat::Plain => {
            for root in &classification.roots {
                println!(
                    "{} -> {}",
                    root.path().display(),
                    config.target_for(root).display()
                );
            }
        }
        ListFormat::Detailed => {
            for root in &classification.roots {
                println!("Root: {}", root.path().display());
                println!("  Output: {}", config.target_for(root).display());
                println!("  Directives: {}", root.matches.len());
                for include in includes_of(root) {
                    println!("    - {include}");
                }
                println!();
            }
            for fragment in &classification.fragments {
                println!("Fragment: {}", fragment.path().display());
                println!("  Directives: {}", fragment.matches.len());
                for include in includes_of(fragment) {
                    println!("    - {include}");
                }
                println!();
            }
        }
        ListFormat::Json => {
            let roots = classification.roots.iter().map(|root| FileInfo {
                path: root.path().display().to_string(),
                kind: FileKind::Root,
                output: Some(config.target_for(root).display().to_string()),
                includes: includes_of(root),
            });
            let fragments = classification.fragments.iter().map(|fragment| FileInfo {
                path: fragment.path().display().to_string(),
                kind: FileKind::Fragment,
                output: None,
                includes: includes_of(fragment),
            });
            let infos: Vec<FileInfo> = roots.chain(fragments).collect();

            let json = serde_json::to_string_pretty(&infos)?;
            println!("{json}");
        }
    }

    if summary.has_errors() {
        log::warn!("{} file(s) could not be read while listing", summary.errors);
    }

    Ok(())
}
