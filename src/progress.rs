//! Progress bar display for output files

use indicatif::{ProgressBar, ProgressStyle};

/// Progress over the root files of a run
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// Create a progress display for `total` files
    #[must_use]
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }

    /// A display that never draws
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Show `file_path` as the file being processed and advance by one
    pub fn update(&self, file_path: &str) {
        // Truncate long paths for display
        let display_path = if file_path.chars().count() > 50 {
            let cut = file_path.char_indices().rev().nth(46).map_or(0, |(i, _)| i);
            format!("...{}", &file_path[cut..])
        } else {
            file_path.to_string()
        };
        self.bar.set_message(display_path);
        self.bar.inc(1);
    }

    pub fn set_length(&self, total: u64) {
        self.bar.set_length(total);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
