#![forbid(unsafe_code)]
//! gradlekit — integration-test harness for Gradle static-analysis plugins
//!
//! A test case builds a [`GradleHarness`] from a [`ProjectLayout`], which
//! materializes a disposable multi-module Gradle project under an exclusive
//! temporary root. Some of the generated Kotlin sources deliberately carry a
//! lint defect (a magic-number constant), so the plugin under test has
//! something to find. The harness then drives real `gradle` invocations
//! against the tree and hands the captured [`BuildResult`] to the caller's
//! assertions.
//!
//! ```no_run
//! use gradlekit::{GradleHarness, ProjectLayout};
//!
//! let layout = ProjectLayout::new(3, 2).with_src_dir("src/main/kotlin");
//! let harness = GradleHarness::new(layout, "build.gradle", "plugins { id(\"lint\") }")?;
//! harness.setup_project()?;
//! harness.run_lint_task_and_check(|_harness, result| {
//!     assert!(result.is_success());
//! })?;
//! # Ok::<(), gradlekit::HarnessError>(())
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `harness` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! A build that runs and fails is *not* an error at this layer: both outcomes
//! come back as a normal [`BuildResult`]. Only setup I/O failures and the
//! inability to launch the build tool at all surface as [`HarnessError`].

pub mod error;
pub mod harness;
pub mod layout;

pub use error::HarnessError;
pub use harness::GradleHarness;
pub use harness::invoker::{
    BuildOutcome, BuildResult, CommandOutput, CommandRunner, LINT_TASK, SystemGradleRunner,
    build_command,
};
pub use layout::{ProjectLayout, Submodule};
