use regex::Regex;
use std::sync::LazyLock;

/// `@@include('<path>')`; the path is captured verbatim up to the first `')`.
static DIRECTIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@@include\('(.*?)'\)").expect("directive pattern compiles"));

/// One `@@include('...')` occurrence inside a text blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMatch {
    /// The exact substring to be replaced, e.g. `@@include('partials/header.html')`
    pub literal_text: String,
    /// The path argument as written, relative to the including file's directory
    pub referenced_path: String,
    /// Starting byte offset in the scanned content
    pub start: usize,
    /// Ending byte offset in the scanned content
    pub end: usize,
}

impl DirectiveMatch {
    /// Last path segment of the referenced path.
    ///
    /// This is the identity used for fragment exclusion; directory prefixes are ignored.
    #[must_use]
    pub fn target_name(&self) -> &str {
        last_segment(&self.referenced_path)
    }
}

/// Finds every include directive in `content`, left to right, without overlap.
#[must_use]
pub fn find_directives(content: &str) -> Vec<DirectiveMatch> {
    DIRECTIVE_PATTERN
        .captures_iter(content)
        .filter_map(|capture| {
            let full_match = capture.get(0)?;
            let path = capture.get(1)?;
            Some(DirectiveMatch {
                literal_text: full_match.as_str().to_string(),
                referenced_path: path.as_str().to_string(),
                start: full_match.start(),
                end: full_match.end(),
            })
        })
        .collect()
}

/// Returns the final `/` or `\` separated segment of `path`.
#[must_use]
pub fn last_segment(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
