use crate::error::{IncludeError, Result};
use crate::source::RootFile;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Destination of `file` relative to the output root.
///
/// With `omit_source_parent` the source directory is dropped and only `filename` is
/// kept; otherwise the full discovered path is preserved.
#[must_use]
pub fn output_path(file: &RootFile, omit_source_parent: bool) -> PathBuf {
    if omit_source_parent {
        file.filename.clone()
    } else {
        file.directory.join(&file.filename)
    }
}

/// Places `relative` under `destination`.
///
/// Root, prefix, `.` and `..` components are dropped so an absolute or escaping source
/// directory still lands inside the destination tree.
#[must_use]
pub fn destination_path(destination: &Path, relative: &Path) -> PathBuf {
    let mut target = destination.to_path_buf();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            target.push(part);
        }
    }
    target
}

/// Writes `content` to `target`, creating parent directories first
///
/// # Errors
///
/// Returns `IncludeError::WriteFailure` if the directory or the file cannot be created.
pub fn write_output(target: &Path, content: &str) -> Result<()> {
    let write_failure = |source| IncludeError::WriteFailure {
        path: target.to_path_buf(),
        source,
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(write_failure)?;
    }
    fs::write(target, content).map_err(write_failure)
}
