use crate::source::{RootFile, SourceFile};
use std::collections::HashSet;

/// Discovered files split into outputs and includable fragments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Files to resolve and write, in discovery order
    pub roots: Vec<RootFile>,
    /// Files referenced by at least one directive; never written on their own
    pub fragments: Vec<SourceFile>,
}

/// Last path segments of every referenced path across `files`
#[must_use]
pub fn referenced_names(files: &[SourceFile]) -> HashSet<String> {
    files
        .iter()
        .flat_map(|file| file.matches.iter())
        .map(|directive| directive.target_name().to_string())
        .collect()
}

/// Partitions `files` into roots and fragments.
///
/// A file is a fragment when its filename (last segment only) is the target of any
/// directive in any file. Directory prefixes are not compared, so `a/nav.html` and
/// `b/nav.html` are both fragments as soon as either one is included.
#[must_use]
pub fn classify(files: Vec<SourceFile>) -> Classification {
    let referenced = referenced_names(&files);
    let (fragments, roots): (Vec<SourceFile>, Vec<RootFile>) = files
        .into_iter()
        .partition(|file| referenced.contains(&file.name()));

    Classification { roots, fragments }
}
