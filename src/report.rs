//! Typed run events and the sinks that receive them.
//!
//! The resolver and the build loop never print or log directly. Everything user-visible
//! goes through an [`EventSink`] handed in by the caller; [`LogSink`] forwards events to
//! the `log` facade and is what the CLI uses.

use log::Level;
use std::fmt;
use std::path::PathBuf;

/// Something noteworthy that happened during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A source directory/pattern batch produced this many candidates
    Discovered {
        directory: PathBuf,
        pattern: String,
        count: usize,
    },
    /// A discovered file is referenced by some directive and will not be written
    FragmentSkipped { path: PathBuf },
    /// Resolution of a root file started
    Resolving { path: PathBuf },
    /// A directive was substituted
    Included { path: PathBuf, depth: usize },
    /// A referenced include could not be read
    MissingInclude { path: PathBuf, placeholder: bool },
    /// A discovered candidate could not be read; the rest of its batch is skipped
    UnreadableSource { path: PathBuf, skipped: usize },
    /// An include chain looped back on itself or went too deep
    CyclicInclude { path: PathBuf, depth: usize },
    /// An output file was written (or would be, in a dry run)
    Written { path: PathBuf },
    /// An output file could not be written
    WriteFailure { path: PathBuf, reason: String },
}

impl Event {
    /// Log level this event is reported at
    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::MissingInclude { .. }
            | Self::UnreadableSource { .. }
            | Self::CyclicInclude { .. }
            | Self::WriteFailure { .. } => Level::Error,
            Self::Written { .. } => Level::Info,
            Self::Discovered { .. } | Self::FragmentSkipped { .. } | Self::Resolving { .. } => {
                Level::Debug
            }
            Self::Included { .. } => Level::Trace,
        }
    }

    /// Whether this event counts towards `RunSummary::errors`
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level(), Level::Error)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovered {
                directory,
                pattern,
                count,
            } => write!(
                f,
                "Found {count} candidate(s) for '{pattern}' in {}",
                directory.display()
            ),
            Self::FragmentSkipped { path } => {
                write!(f, "Skipping fragment {}", path.display())
            }
            Self::Resolving { path } => write!(f, "Resolving {}", path.display()),
            Self::Included { path, depth } => {
                write!(f, "Included {} at depth {depth}", path.display())
            }
            Self::MissingInclude { path, placeholder } => {
                write!(f, "File not found: {}", path.display())?;
                if !*placeholder {
                    write!(f, " (directive left in place)")?;
                }
                Ok(())
            }
            Self::UnreadableSource { path, skipped } => write!(
                f,
                "Cannot read {} as a file, skipping {skipped} remaining file(s) in this batch",
                path.display()
            ),
            Self::CyclicInclude { path, depth } => {
                write!(f, "Cyclic include of {} at depth {depth}", path.display())
            }
            Self::Written { path } => write!(f, "File written: {}", path.display()),
            Self::WriteFailure { path, reason } => {
                write!(f, "Failed to write {}: {reason}", path.display())
            }
        }
    }
}

/// Receiver of run events
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

/// Forwards events to the `log` facade at their own level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: Event) {
        log::log!(event.level(), "{event}");
    }
}

/// Keeps every event in memory
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub events: Vec<Event>,
}

impl CollectingSink {
    #[must_use]
    pub fn errors(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_error()).collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
