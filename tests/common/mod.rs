//! Common test utilities for appstores-feed integration tests

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment the binary reads its inputs from
const INPUT_VARS: &[&str] = &[
    "INPUT_SVG_PATH",
    "INPUT_APPSTORE_IDS",
    "INPUT_PLAYSTORE_IDS",
    "INPUT_APP_IDS",
    "INPUT_CONFIG_PATH",
    "INPUT_COMMITTER_USERNAME",
    "INPUT_COMMITTER_EMAIL",
    "INPUT_COMMIT_MESSAGE",
    "INPUT_GH_TOKEN",
    "INPUT_COUNTRY",
    "INPUT_LANG",
    "INPUT_README_PATH",
    "GITHUB_REPOSITORY",
    "GITHUB_ACTIONS",
];

/// A temporary directory the binary runs in
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

    /// Create a new test workspace with an initialized git repository
    #[allow(dead_code)]
    pub fn with_git() -> Self {
        let workspace = Self::new();
        git2::Repository::init(&workspace.path).expect("Failed to init git repository");
        workspace
    }

    /// Write a file in workspace
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// The binary, running in this workspace with no inputs inherited from the host
    pub fn feed_cmd(&self) -> Command {
        let mut cmd = feed_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The binary with no inputs inherited from the host
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn feed_cmd() -> Command {
    let mut cmd = Command::cargo_bin("appstores-feed").expect("Failed to find binary");
    for var in INPUT_VARS {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "off");
    cmd
}
