use crate::directive::{DirectiveMatch, find_directives, last_segment};
use crate::fs_utils::read_file_contents;
use crate::report::{Event, EventSink};
use crate::summary::{Outcome, RunSummary};
use std::path::{Path, PathBuf};

/// A file found by discovery, or synthesized from a directive during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Folder the file was discovered in
    pub directory: PathBuf,
    /// Path relative to `directory`, possibly with subdirectory segments
    pub filename: PathBuf,
    /// Directives found in the file's content at scan time
    pub matches: Vec<DirectiveMatch>,
}

/// A discovered file that no directive references; resolved and written as output
pub type RootFile = SourceFile;

impl SourceFile {
    pub fn new(directory: impl Into<PathBuf>, filename: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            filename: filename.into(),
            matches: Vec::new(),
        }
    }

    /// Full path to read from
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    /// Last path segment of `filename`, used for fragment exclusion
    #[must_use]
    pub fn name(&self) -> String {
        last_segment(&self.filename.to_string_lossy()).to_string()
    }

    /// Directory that this file's directives are resolved against.
    ///
    /// `directory` joined with the parent of `filename`, so a fragment nested in a
    /// subdirectory resolves its own includes relative to itself.
    #[must_use]
    pub fn include_directory(&self) -> PathBuf {
        match self.filename.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.directory.join(parent),
            _ => self.directory.clone(),
        }
    }

    /// Synthetic file for the target of `directive`, as seen from this file
    #[must_use]
    pub fn for_directive(&self, directive: &DirectiveMatch) -> Self {
        Self::new(self.include_directory(), &directive.referenced_path)
    }
}

/// Reads and scans one discovery batch (a source directory and pattern).
///
/// The first candidate that cannot be read as a file is reported and counted, and
/// stops the batch: no later candidate in `filenames` is scanned.
pub fn scan_batch(
    directory: &Path,
    filenames: &[PathBuf],
    sink: &mut dyn EventSink,
    summary: &mut RunSummary,
) -> Vec<SourceFile> {
    let mut scanned = Vec::with_capacity(filenames.len());

    for (index, filename) in filenames.iter().enumerate() {
        let mut file = SourceFile::new(directory, filename);
        match read_file_contents(&file.path()) {
            Ok(content) => {
                file.matches = find_directives(&content);
                scanned.push(file);
            }
            Err(_) => {
                sink.emit(Event::UnreadableSource {
                    path: file.path(),
                    skipped: filenames.len() - index - 1,
                });
                summary.record(Outcome::Error);
                break;
            }
        }
    }

    scanned
}
