//! # atinclude
//!
//! A build-time text preprocessor that flattens `@@include('path')` directives. Source
//! files matching glob patterns are scanned, files that other files include are treated
//! as fragments, and every remaining root file is written to a destination tree with its
//! includes inlined.
//!
//! ## Features
//!
//! - `@@include('partials/header.html')` directives, resolved relative to the including file
//! - Recursive or single-level inlining
//! - Fragments are never written on their own
//! - Missing includes become a `File not found: <path>` placeholder (or stay in place)
//! - Include cycles are detected and reported instead of overflowing the stack
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use atinclude::{BuildConfig, LogSink, ProgressDisplay, run};
//!
//! let config = BuildConfig::default();
//! match run(&config, &mut LogSink, &ProgressDisplay::hidden()) {
//!     Ok(summary) => println!("{summary}"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Flatten every HTML file under src/ into build/
//! atinclude -s src
//!
//! # Keep the source directory in output paths, inline only one level
//! atinclude -s src -o false -r false
//!
//! # Show which files are roots and which are fragments
//! atinclude -s src --list
//! ```

pub mod build;
pub mod classify;
pub mod directive;
pub mod error;
pub mod fs_utils;
pub mod output;
pub mod progress;
pub mod report;
pub mod resolver;
pub mod source;
pub mod summary;

// Re-export main types and functions for convenience
pub use build::{BuildConfig, plan, run, scan_sources};
pub use classify::{Classification, classify};
pub use directive::{DirectiveMatch, find_directives};
pub use error::{IncludeError, Result};
pub use fs_utils::DiscoveryOptions;
pub use output::output_path;
pub use progress::ProgressDisplay;
pub use report::{Event, EventSink, LogSink};
pub use resolver::{ResolveConfig, Resolver};
pub use source::{RootFile, SourceFile};
pub use summary::{Outcome, RunSummary};
