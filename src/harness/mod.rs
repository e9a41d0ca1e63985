//! The harness: exclusive project root, materialization, path resolution.
//!
//! A [`GradleHarness`] owns one exclusive temporary directory for its whole
//! lifetime and one random token fixed at construction. The token is embedded
//! in every synthesized source file, so two harnesses built from an identical
//! layout produce identical file names but different file contents — the
//! build cache never hits across separate test runs.
//!
//! ## Modules
//!
//! - `sources` - Kotlin source synthesis (defect-bearing or clean)
//! - `invoker` - command construction and build-tool execution
//!
//! ## Design
//!
//! Materialization happens once per harness, via [`GradleHarness::setup_project`].
//! Any I/O failure during setup propagates immediately; setup is not retried.
//! The temporary root is released when the harness drops, on every exit path
//! including a failing test.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod invoker;
pub mod sources;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uuid::Uuid;

use crate::error::{HarnessError, HarnessResult};
use crate::layout::ProjectLayout;
use invoker::{CommandRunner, SystemGradleRunner};

/// File name of the generated project-settings descriptor.
pub const SETTINGS_FILENAME: &str = "settings.gradle";

/// Fixed root project name written into the settings file.
const ROOT_PROJECT_NAME: &str = "harness-root";

/// Canned rule configuration: one numeric issue threshold, one enabled rule.
const CONFIG_FILE_CONTENT: &str = "build:\n  maxIssues: 5\nstyle:\n  MagicNumber:\n    active: true\n";

/// Canned placeholder baseline document.
const BASELINE_FILE_CONTENT: &str = "<some>\n   <xml/>\n</some>\n";

/// A disposable Gradle project tree plus the means to run builds against it.
pub struct GradleHarness {
    layout: ProjectLayout,
    build_file_name: String,
    build_file_content: String,
    config_file: Option<String>,
    baseline_file: Option<String>,
    gradle_version: Option<String>,
    dry_run: bool,
    root: TempDir,
    token: String,
    runner: Box<dyn CommandRunner>,
}

impl GradleHarness {
    /// Create a harness for the given layout.
    ///
    /// `build_file_name` is the descriptor file name used for the root and
    /// every submodule (for example `build.gradle` or `build.gradle.kts`);
    /// `build_file_content` is written verbatim to the root descriptor.
    ///
    /// The exclusive temporary root is created here and released when the
    /// harness drops.
    pub fn new(
        layout: ProjectLayout,
        build_file_name: impl Into<String>,
        build_file_content: impl Into<String>,
    ) -> HarnessResult<Self> {
        let root = TempDir::with_prefix("gradlekit-").map_err(HarnessError::RootDir)?;
        Ok(Self {
            layout,
            build_file_name: build_file_name.into(),
            build_file_content: build_file_content.into(),
            config_file: None,
            baseline_file: None,
            gradle_version: None,
            dry_run: false,
            root,
            token: Uuid::new_v4().to_string(),
            runner: Box::new(SystemGradleRunner),
        })
    }

    /// Also write the canned rule configuration to `path` during setup.
    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Also write the canned placeholder baseline to `path` during setup.
    pub fn with_baseline_file(mut self, path: impl Into<String>) -> Self {
        self.baseline_file = Some(path.into());
        self
    }

    /// Pin builds to a specific Gradle version instead of the system default.
    pub fn with_gradle_version(mut self, version: impl Into<String>) -> Self {
        self.gradle_version = Some(version.into());
        self
    }

    /// Pass the dry-run property on every invocation, short-circuiting the
    /// plugin's actual analysis work.
    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Replace the build-tool runner. Tests use this to fake the `gradle`
    /// process; production use keeps the default [`SystemGradleRunner`].
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// The harness's exclusive root directory.
    pub fn root_dir(&self) -> &Path {
        self.root.path()
    }

    /// The random token embedded in every synthesized source file.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn gradle_version(&self) -> Option<&str> {
        self.gradle_version.as_deref()
    }

    pub(crate) fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub(crate) fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Materialize the whole project tree described by the layout.
    ///
    /// Writes, in order: the root build descriptor, the settings file, the
    /// optional config and baseline files, the root sources, then every
    /// submodule (directory, build descriptor, sources).
    #[tracing::instrument(skip_all, fields(
        root = %self.root.path().display(),
        src_dirs = self.layout.src_dirs.len(),
        submodules = self.layout.submodules.len(),
    ))]
    pub fn setup_project(&self) -> HarnessResult<()> {
        self.write_project_file(&self.build_file_name, &self.build_file_content)?;
        self.write_project_file(SETTINGS_FILENAME, &self.settings_content())?;
        if let Some(config_file) = &self.config_file {
            self.write_project_file(config_file, CONFIG_FILE_CONTENT)?;
        }
        if let Some(baseline_file) = &self.baseline_file {
            self.write_project_file(baseline_file, BASELINE_FILE_CONTENT)?;
        }

        for (dir_idx, src_dir) in self.layout.src_dirs.iter().enumerate() {
            for file_idx in 0..self.layout.files_per_src_dir {
                let with_smell = dir_idx * self.layout.files_per_src_dir + file_idx
                    < self.layout.defect_threshold;
                self.write_kotlin_file(
                    &self.root.path().join(src_dir),
                    &format!("My{dir_idx}Root{file_idx}Class"),
                    with_smell,
                )?;
            }
        }

        for submodule in &self.layout.submodules {
            let module_root = self.root.path().join(&submodule.name);
            create_dir_all(&module_root)?;
            write(
                module_root.join(&self.build_file_name),
                submodule.build_file_content.as_deref().unwrap_or(""),
            )?;
            for (dir_idx, src_dir) in submodule.src_dirs.iter().enumerate() {
                for file_idx in 0..submodule.files_per_src_dir {
                    let with_smell = dir_idx * submodule.files_per_src_dir + file_idx
                        < submodule.defect_threshold;
                    self.write_kotlin_file(
                        &module_root.join(src_dir),
                        &format!("My{dir_idx}{}{file_idx}Class", submodule.name),
                        with_smell,
                    )?;
                }
            }
        }

        Ok(())
    }

    /// Resolve a path relative to the harness root to an absolute path,
    /// independent of the process's current working directory.
    pub fn project_file(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.root.path().join(relative);
        path.canonicalize().unwrap_or(path)
    }

    /// Write an arbitrary file under the harness root, creating parent
    /// directories as needed. Available before or after `setup_project`.
    pub fn write_project_file(&self, relative: &str, content: &str) -> HarnessResult<()> {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        write(path, content)
    }

    /// Write one additional synthesized, non-defect-bearing source file into
    /// a source directory relative to the harness root.
    pub fn write_source_file(&self, src_dir: &str, class_name: &str) -> HarnessResult<()> {
        self.write_kotlin_file(&self.root.path().join(src_dir), class_name, false)
    }

    fn write_kotlin_file(&self, dir: &Path, class_name: &str, with_smell: bool) -> HarnessResult<()> {
        create_dir_all(dir)?;
        write(
            dir.join(format!("{class_name}.kt")),
            &sources::kotlin_class(class_name, &self.token, with_smell),
        )
    }

    fn settings_content(&self) -> String {
        let includes = self
            .layout
            .submodules
            .iter()
            .map(|submodule| format!("\"{}\"", submodule.name))
            .collect::<Vec<_>>()
            .join(",");
        format!("rootProject.name = \"{ROOT_PROJECT_NAME}\"\ninclude({includes})\n")
    }
}

impl std::fmt::Debug for GradleHarness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradleHarness")
            .field("root", &self.root.path())
            .field("build_file_name", &self.build_file_name)
            .field("gradle_version", &self.gradle_version)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

fn create_dir_all(path: &Path) -> HarnessResult<()> {
    fs::create_dir_all(path).map_err(|source| HarnessError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: PathBuf, content: &str) -> HarnessResult<()> {
    fs::write(&path, content).map_err(|source| HarnessError::Write { path, source })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::Submodule;

    fn harness(layout: ProjectLayout) -> GradleHarness {
        GradleHarness::new(layout, "build.gradle", "// root build file").unwrap()
    }

    #[test]
    fn settings_lists_submodules_in_layout_order() {
        let layout = ProjectLayout::new(0, 0)
            .with_submodule(Submodule::new("core", 0, 0))
            .with_submodule(Submodule::new("app", 0, 0));
        let harness = harness(layout);
        assert_eq!(
            harness.settings_content(),
            "rootProject.name = \"harness-root\"\ninclude(\"core\",\"app\")\n"
        );
    }

    #[test]
    fn settings_include_is_empty_without_submodules() {
        let harness = harness(ProjectLayout::default());
        assert_eq!(
            harness.settings_content(),
            "rootProject.name = \"harness-root\"\ninclude()\n"
        );
    }

    #[test]
    fn setup_writes_optional_config_and_baseline() {
        let harness = GradleHarness::new(ProjectLayout::default(), "build.gradle", "")
            .unwrap()
            .with_config_file("config/lint.yml")
            .with_baseline_file("baseline.xml");
        harness.setup_project().unwrap();

        let config = fs::read_to_string(harness.project_file("config/lint.yml")).unwrap();
        assert!(config.contains("maxIssues: 5"));
        assert!(config.contains("MagicNumber"));

        let baseline = fs::read_to_string(harness.project_file("baseline.xml")).unwrap();
        assert!(baseline.contains("<xml/>"));
    }

    #[test]
    fn project_file_is_absolute_and_under_root() {
        let harness = harness(ProjectLayout::default());
        harness.setup_project().unwrap();
        let settings = harness.project_file(SETTINGS_FILENAME);
        assert!(settings.is_absolute());
        assert!(settings.exists());
    }

    #[test]
    fn root_dir_is_released_on_drop() {
        let harness = harness(ProjectLayout::default());
        let root = harness.root_dir().to_path_buf();
        assert!(root.exists());
        drop(harness);
        assert!(!root.exists());
    }
}
