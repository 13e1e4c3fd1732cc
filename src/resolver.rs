use crate::directive::{DirectiveMatch, find_directives};
use crate::error::{IncludeError, Result};
use crate::fs_utils::read_file_contents;
use crate::report::{Event, EventSink};
use crate::source::SourceFile;
use crate::summary::{Outcome, RunSummary};
use std::fs;
use std::path::{Path, PathBuf};

/// Default limit on include nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for resolving include directives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Expand directives inside included fragments too, instead of inlining them raw
    pub include_recursive: bool,
    /// Replace failed includes with a message instead of leaving the directive in place
    pub insert_not_found_placeholder: bool,
    /// Deepest include nesting allowed before reporting a cyclic include
    pub max_depth: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            include_recursive: true,
            insert_not_found_placeholder: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A pending replacement of `start..end` in the content being resolved
struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

/// Resolves include directives, reporting failures to a sink and counting them
pub struct Resolver<'a> {
    config: &'a ResolveConfig,
    sink: &'a mut dyn EventSink,
    summary: &'a mut RunSummary,
}

impl<'a> Resolver<'a> {
    pub fn new(
        config: &'a ResolveConfig,
        sink: &'a mut dyn EventSink,
        summary: &'a mut RunSummary,
    ) -> Self {
        Self {
            config,
            sink,
            summary,
        }
    }

    /// Returns the content of `file` with every directive substituted.
    ///
    /// Failures never abort: an unreadable `file` yields empty content, and a failed
    /// include becomes a placeholder or stays as its literal directive text. Each
    /// failure is emitted once and counted once in the run summary.
    pub fn resolve(&mut self, file: &SourceFile) -> String {
        let mut chain = Vec::new();
        match self.resolve_file(file, &mut chain) {
            Ok(content) => content,
            Err(err) => {
                self.report(&err, file.path());
                String::new()
            }
        }
    }

    fn resolve_file(&mut self, file: &SourceFile, chain: &mut Vec<PathBuf>) -> Result<String> {
        let path = file.path();
        let identity = file_identity(&path);
        if chain.len() > self.config.max_depth || chain.contains(&identity) {
            return Err(IncludeError::CyclicInclude {
                path,
                depth: chain.len(),
            });
        }

        let content = read_include(&path)?;
        let directives = find_directives(&content);
        if directives.is_empty() {
            return Ok(content);
        }

        chain.push(identity);
        let mut edits = Vec::with_capacity(directives.len());
        for directive in &directives {
            let target = file.for_directive(directive);
            let included = if self.config.include_recursive {
                self.resolve_file(&target, chain)
            } else {
                read_include(&target.path())
            };

            let replacement = match included {
                Ok(text) => {
                    self.sink.emit(Event::Included {
                        path: target.path(),
                        depth: chain.len(),
                    });
                    text
                }
                Err(err) => self.fallback(&err, directive, target.path()),
            };

            edits.push(Edit {
                start: directive.start,
                end: directive.end,
                replacement,
            });
        }
        chain.pop();

        Ok(apply_edits(content, edits))
    }

    /// Reports a failed include and returns the text to put in its place
    fn fallback(&mut self, err: &IncludeError, directive: &DirectiveMatch, path: PathBuf) -> String {
        let placeholder = if matches!(err, IncludeError::CyclicInclude { .. }) {
            format!("Cyclic include: {}", directive.referenced_path)
        } else {
            format!("File not found: {}", directive.referenced_path)
        };
        self.report(err, path);

        if self.config.insert_not_found_placeholder {
            placeholder
        } else {
            directive.literal_text.clone()
        }
    }

    fn report(&mut self, err: &IncludeError, path: PathBuf) {
        let event = match err {
            IncludeError::CyclicInclude { depth, .. } => Event::CyclicInclude {
                path,
                depth: *depth,
            },
            _ => Event::MissingInclude {
                path,
                placeholder: self.config.insert_not_found_placeholder,
            },
        };
        self.sink.emit(event);
        self.summary.record(Outcome::Error);
    }
}

/// Reads an include target, folding every read failure into `MissingInclude`
fn read_include(path: &Path) -> Result<String> {
    read_file_contents(path).map_err(|_| IncludeError::MissingInclude {
        path: path.to_path_buf(),
    })
}

/// Canonical path when the file exists, so `a/../b.html` and `b.html` compare equal
fn file_identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Applies span edits back to front so earlier offsets stay valid
fn apply_edits(mut content: String, edits: Vec<Edit>) -> String {
    for edit in edits.into_iter().rev() {
        content.replace_range(edit.start..edit.end, &edit.replacement);
    }
    content
}
