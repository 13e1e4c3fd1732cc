use crate::error::{IncludeError, Result};
use globset::{GlobBuilder, GlobSet};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads the contents of a file at the given path
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than failing the read.
///
/// # Errors
///
/// - `IncludeError::MissingInclude` if the path doesn't exist.
/// - `IncludeError::UnreadableSource` if the path exists but isn't a file.
/// - `IncludeError::Io` if there's an error reading the file.
pub fn read_file_contents(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(IncludeError::MissingInclude {
            path: path.to_path_buf(),
        });
    }

    if !path.is_file() {
        return Err(IncludeError::UnreadableSource {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Options for walking a source directory
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Honor `.gitignore` and `.ignore` files; hidden files are skipped either way
    pub use_gitignore: bool,
    /// Paths (relative to the source directory) to leave out
    pub exclude: Option<GlobSet>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            use_gitignore: true,
            exclude: None,
        }
    }
}

/// Finds every entry under `source` whose relative path matches `pattern`.
///
/// `*` never crosses a path separator; use `**` for recursive matches. Directories are
/// returned too when they match, so that callers can report them as unreadable.
/// Results are relative to `source` and sorted.
///
/// # Errors
///
/// - `IncludeError::Glob` if `pattern` is not a valid glob.
/// - `IncludeError::Walk` if the directory walk fails (e.g. `source` does not exist).
pub fn discover(source: &Path, pattern: &str, options: &DiscoveryOptions) -> Result<Vec<PathBuf>> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher();

    let walker = WalkBuilder::new(source)
        .standard_filters(options.use_gitignore)
        .hidden(true)
        .build();

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };

        if !matcher.is_match(relative) {
            continue;
        }
        if let Some(exclude) = &options.exclude
            && exclude.is_match(relative)
        {
            continue;
        }

        found.push(relative.to_path_buf());
    }

    found.sort();
    Ok(found)
}
