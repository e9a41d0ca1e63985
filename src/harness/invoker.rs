//! Build-tool invocation: command construction, execution, captured results.
//!
//! The command line has a fixed shape:
//!
//! ```text
//! --stacktrace --info --build-cache [-Plint-dry-run=true] <task...>
//! ```
//!
//! Execution goes through the [`CommandRunner`] trait so tests of the harness
//! itself can fake the `gradle` process; the default [`SystemGradleRunner`]
//! launches the real one. The plugin under test rides on the environment the
//! child process inherits from the test run.
//!
//! A build that runs and fails is a normal [`BuildResult`]; only a failure to
//! launch the process at all is an error.

use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::{HarnessError, HarnessResult};
use crate::harness::GradleHarness;

/// Default task name understood by the plugin under test.
pub const LINT_TASK: &str = "lint";

/// Environment variable overriding the build-tool executable.
pub const GRADLE_BIN_ENV: &str = "GRADLE_BIN";

const DRY_RUN_PROPERTY: &str = "-Plint-dry-run=true";

/// Outcome of an invoked build. Both variants are valid, expected results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    Failure,
}

/// Structured result of one build invocation. Immutable once produced; each
/// invocation yields a fresh, independent result.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub outcome: BuildOutcome,
    /// Raw combined output (stdout, then stderr). Exposed as-is; the harness
    /// does not interpret it.
    pub log: String,
}

impl BuildResult {
    pub fn is_success(&self) -> bool {
        self.outcome == BuildOutcome::Success
    }
}

/// Raw output of one build-tool process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Launches the build tool and captures its output.
///
/// This trait separates process execution from command construction and
/// result handling, so harness tests can substitute a fake runner.
pub trait CommandRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// Runs the real build tool via `std::process::Command`, blocking until the
/// process completes.
#[derive(Debug, Default)]
pub struct SystemGradleRunner;

impl CommandRunner for SystemGradleRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).current_dir(cwd).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Assemble the fixed-shape argument list for one invocation.
pub fn build_command(tasks: &[&str], dry_run: bool) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "--stacktrace".to_string(),
        "--info".to_string(),
        "--build-cache".to_string(),
    ];
    if dry_run {
        args.push(DRY_RUN_PROPERTY.to_string());
    }
    args.extend(tasks.iter().map(|task| task.to_string()));
    args
}

impl GradleHarness {
    /// Run the given tasks against the harness root and return the result.
    ///
    /// Blocks until the build tool exits. Success and failure both return
    /// normally; only the inability to launch the process is an error.
    #[tracing::instrument(skip_all, fields(tasks = ?tasks, dry_run = self.dry_run()))]
    pub fn run_tasks(&self, tasks: &[&str]) -> HarnessResult<BuildResult> {
        let program = self.gradle_program();
        let args = build_command(tasks, self.dry_run());
        let output = self
            .runner()
            .run(self.root_dir(), &program, &args)
            .map_err(|source| HarnessError::Launch { program, source })?;

        let outcome = if output.success {
            BuildOutcome::Success
        } else {
            BuildOutcome::Failure
        };
        tracing::debug!(?outcome, "build finished");

        Ok(BuildResult {
            outcome,
            log: format!("{}\n{}", output.stdout, output.stderr),
        })
    }

    /// Identical to [`run_tasks`](Self::run_tasks); the name documents that a
    /// failing outcome is the expected, normal case for this call. No error
    /// is raised for either outcome — the caller's assertions decide.
    pub fn run_tasks_expecting_failure(&self, tasks: &[&str]) -> HarnessResult<BuildResult> {
        self.run_tasks(tasks)
    }

    /// Run tasks and thread the result into the assertion callback.
    pub fn run_tasks_and_check<F>(&self, tasks: &[&str], assert: F) -> HarnessResult<()>
    where
        F: FnOnce(&GradleHarness, &BuildResult),
    {
        let result = self.run_tasks(tasks)?;
        assert(self, &result);
        Ok(())
    }

    /// Run tasks whose failure is expected, threading the result into the
    /// assertion callback.
    pub fn run_tasks_and_expect_failure<F>(&self, tasks: &[&str], assert: F) -> HarnessResult<()>
    where
        F: FnOnce(&GradleHarness, &BuildResult),
    {
        let result = self.run_tasks_expecting_failure(tasks)?;
        assert(self, &result);
        Ok(())
    }

    /// Run the default lint task.
    pub fn run_lint_task(&self) -> HarnessResult<BuildResult> {
        self.run_tasks(&[LINT_TASK])
    }

    /// Run the default lint task and thread the result into the assertion
    /// callback.
    pub fn run_lint_task_and_check<F>(&self, assert: F) -> HarnessResult<()>
    where
        F: FnOnce(&GradleHarness, &BuildResult),
    {
        self.run_tasks_and_check(&[LINT_TASK], assert)
    }

    /// Run the default lint task whose failure is expected.
    pub fn run_lint_task_and_expect_failure<F>(&self, assert: F) -> HarnessResult<()>
    where
        F: FnOnce(&GradleHarness, &BuildResult),
    {
        self.run_tasks_and_expect_failure(&[LINT_TASK], assert)
    }

    fn gradle_program(&self) -> String {
        match self.gradle_version() {
            // A pinned version selects a versioned launcher, e.g. `gradle-8.5`.
            Some(version) => format!("gradle-{version}"),
            None => std::env::var(GRADLE_BIN_ENV).unwrap_or_else(|_| "gradle".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_has_fixed_prefix_and_tasks_in_order() {
        let args = build_command(&["lint", "check"], false);
        assert_eq!(
            args,
            vec!["--stacktrace", "--info", "--build-cache", "lint", "check"]
        );
    }

    #[test]
    fn dry_run_property_sits_between_flags_and_tasks() {
        let args = build_command(&["lint"], true);
        assert_eq!(
            args,
            vec![
                "--stacktrace",
                "--info",
                "--build-cache",
                "-Plint-dry-run=true",
                "lint"
            ]
        );
    }

    #[test]
    fn empty_task_list_keeps_only_flags() {
        assert_eq!(
            build_command(&[], false),
            vec!["--stacktrace", "--info", "--build-cache"]
        );
    }
}
