//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and definition snippets to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_definitions(definitions::FOLDER);
//!     fixture.command().arg("validate").arg(fixture.definitions_path()).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::definitions;
    pub use super::TestFixture;
}

/// Common definition files for testing.
#[allow(dead_code)]
pub mod definitions {
    /// A folder holding an all view and a list view.
    pub const FOLDER: &str = r#"
- job:
    name: platform
    primary-view: Services
    views:
      - all:
          parent: folder
      - sublist:
          name: Services
          parent: folder
          job-name: [web-deploy, Api-build]
"#;

    /// Two standalone views.
    pub const VIEWS: &str = r#"
- view:
    name: Everything
    view-type: all
- view:
    name: Releases
    view-type: delivery_pipeline
    components:
      - name: web
        first-job: web-build
"#;

    /// A list view without its required name.
    pub const MISSING_NAME: &str = r#"
- view:
    name: broken
    view-type: nested
    views:
      - sublist:
          description: no name here
"#;

    /// A build pipeline view with an unsupported link style.
    pub const INVALID_CHOICE: &str = r#"
- view:
    name: Builds
    view-type: build_pipeline
    console-output-link-style: Popup
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "- job: {name: [unclosed";

    /// A job and a standalone view sharing one name.
    pub const NAME_COLLISION: &str = r#"
- job:
    name: Releases
- view:
    name: Releases
    view-type: all
"#;

    /// A view whose name would escape the output directory.
    pub const PATH_IN_NAME: &str = r#"
- view:
    name: ../escaped
    view-type: all
"#;

    /// A view type no generator handles.
    pub const UNKNOWN_VIEW_TYPE: &str = r#"
- view:
    name: Board
    view-type: kanban
"#;
}

/// A test fixture that provides a temporary directory with optional
/// definition files.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_definitions(definitions::FOLDER)
///     .with_file("more/views.yaml", definitions::VIEWS);
///
/// fixture.command()
///     .arg("generate")
///     .arg(fixture.path())
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `jobs.yaml` with the given content.
    pub fn with_definitions(self, content: &str) -> Self {
        self.with_file("jobs.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to `jobs.yaml`.
    pub fn definitions_path(&self) -> PathBuf {
        self.temp_dir.path().join("jobs.yaml")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("jenkins-job-addons");
        cmd.current_dir(self.path());
        cmd.env_remove("RUST_LOG");
        cmd.env_remove("JENKINS_JOB_ADDONS_OUTPUT");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_definitions() {
        let fixture = TestFixture::new().with_definitions(definitions::FOLDER);
        assert!(fixture.definitions_path().exists());
    }

    #[test]
    fn test_definition_snippets_are_valid_yaml() {
        let snippets = [
            definitions::FOLDER,
            definitions::VIEWS,
            definitions::MISSING_NAME,
            definitions::INVALID_CHOICE,
            definitions::UNKNOWN_VIEW_TYPE,
            definitions::NAME_COLLISION,
            definitions::PATH_IN_NAME,
        ];

        for snippet in snippets {
            serde_yaml::from_str::<serde_yaml::Value>(snippet).expect("Snippet should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(definitions::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
