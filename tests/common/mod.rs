//! Common test utilities for atinclude integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary project tree for integration tests
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace, creating parent directories
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create a directory in workspace
    pub fn create_dir(&self, path: &str) {
        std::fs::create_dir_all(self.path.join(path)).expect("Failed to create directory");
    }

    /// The usual two-file site: a page including a header partial
    pub fn with_site(self) -> Self {
        self.write_file("src/index.html", "<body>@@include('partials/header.html')</body>");
        self.write_file("src/partials/header.html", "<h1>Hi</h1>");
        self
    }
}
