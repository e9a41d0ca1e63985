//! Project layout descriptions.
//!
//! A [`ProjectLayout`] describes the shape of the Gradle project the harness
//! materializes: which source directories exist at the root, how many files
//! to generate in each, how many of those files (counted cumulatively across
//! directories, root-first) carry an injected lint defect, and which
//! submodules the root project includes.
//!
//! Defect thresholds are cumulative, not per-directory: the file at 0-based
//! cumulative position `i` within a scope is defect-bearing iff
//! `i < threshold`. A threshold exceeding the total file count is tolerated;
//! the excess is simply never reached.

/// Shape of the root project and its submodules.
#[derive(Debug, Clone, Default)]
pub struct ProjectLayout {
    /// Root source directories, in declaration order.
    pub src_dirs: Vec<String>,
    /// Files generated per root source directory.
    pub files_per_src_dir: usize,
    /// Cumulative count of root files that carry the injected defect.
    pub defect_threshold: usize,
    /// Included submodules, in declaration order.
    pub submodules: Vec<Submodule>,
}

impl ProjectLayout {
    pub fn new(files_per_src_dir: usize, defect_threshold: usize) -> Self {
        Self {
            src_dirs: Vec::new(),
            files_per_src_dir,
            defect_threshold,
            submodules: Vec::new(),
        }
    }

    /// Append a root source directory (relative to the project root).
    pub fn with_src_dir(mut self, dir: impl Into<String>) -> Self {
        self.src_dirs.push(dir.into());
        self
    }

    /// Append an included submodule.
    pub fn with_submodule(mut self, submodule: Submodule) -> Self {
        self.submodules.push(submodule);
        self
    }

    /// Total number of root source files this layout generates.
    pub fn total_root_files(&self) -> usize {
        self.src_dirs.len() * self.files_per_src_dir
    }
}

/// A named, independently-buildable sub-tree included by the root project.
///
/// The name doubles as the submodule's directory name and its identifier in
/// the settings file's `include(...)` statement, so it must be unique within
/// a layout.
#[derive(Debug, Clone)]
pub struct Submodule {
    pub name: String,
    /// Literal build-descriptor content; an empty file is written when absent.
    pub build_file_content: Option<String>,
    /// The submodule's own source directories, in declaration order.
    pub src_dirs: Vec<String>,
    /// Files generated per submodule source directory.
    pub files_per_src_dir: usize,
    /// Cumulative defect count, scoped to this submodule alone.
    pub defect_threshold: usize,
}

impl Submodule {
    pub fn new(name: impl Into<String>, files_per_src_dir: usize, defect_threshold: usize) -> Self {
        Self {
            name: name.into(),
            build_file_content: None,
            src_dirs: Vec::new(),
            files_per_src_dir,
            defect_threshold,
        }
    }

    pub fn with_build_file(mut self, content: impl Into<String>) -> Self {
        self.build_file_content = Some(content.into());
        self
    }

    pub fn with_src_dir(mut self, dir: impl Into<String>) -> Self {
        self.src_dirs.push(dir.into());
        self
    }

    /// Total number of source files this submodule generates.
    pub fn total_files(&self) -> usize {
        self.src_dirs.len() * self.files_per_src_dir
    }
}
