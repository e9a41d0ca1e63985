//! Error types for harness setup and build-tool invocation.
//!
//! Two disjoint failure categories exist. Materialization I/O errors and the
//! inability to even launch the build tool are fatal and propagate as
//! [`HarnessError`]; setup is never retried. A build that launches, runs, and
//! fails is a normal [`crate::BuildResult`] and never appears here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while setting up a harness or launching the build tool.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The exclusive temporary project root could not be created.
    #[error("failed to create harness root directory: {0}")]
    RootDir(#[source] std::io::Error),

    /// A generated file or directory could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build tool process could not be started at all (for example, the
    /// executable is not on `PATH`). Distinct from a build that runs and
    /// fails, which is returned as a normal result.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
