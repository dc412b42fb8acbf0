//! Launch data model shared by every vessel crate

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, VesselError};

/// Conventional name of the version-control metadata marker
pub const GIT_MARKER: &str = ".git";

/// A host path exposed inside the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub source: PathBuf,
    pub target: PathBuf,
    pub read_only: bool,
}

impl Binding {
    pub fn new(source: impl AsRef<Path>, target: impl AsRef<Path>, read_only: bool) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            target: target.as_ref().to_path_buf(),
            read_only,
        }
    }

    /// Bind a host path to the same path inside the container
    pub fn identity(path: impl AsRef<Path>) -> Self {
        Self::new(&path, &path, false)
    }
}

/// Where a repository lives on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation {
    /// Working tree root
    pub root: PathBuf,
    /// Authoritative metadata store (the primary store for worktrees)
    pub metadata_dir: PathBuf,
}

impl RepositoryLocation {
    /// Path at which tooling expects the metadata store: `<root>/.git`
    pub fn conventional_metadata_dir(&self) -> PathBuf {
        self.root.join(GIT_MARKER)
    }
}

/// Launch configuration from a single source; every field may be absent.
///
/// List fields are kept as given (environment as `KEY=VALUE`, volumes as raw
/// `SOURCE:TARGET[:ro]` expressions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSpec {
    pub image: Option<String>,
    pub command: Vec<String>,
    pub entrypoint: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub environment: Vec<String>,
    pub volumes: Vec<String>,
    pub user: Option<String>,
    pub network_mode: Option<String>,
    pub interactive: bool,
    pub privileged: bool,
}

/// Fully merged launch configuration handed to the container engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub image: String,
    pub command: Vec<String>,
    pub entrypoint: Vec<String>,
    pub working_dir: PathBuf,
    pub environment: Vec<String>,
    pub bindings: Vec<Binding>,
    pub user: Option<String>,
    pub network_mode: Option<String>,
    pub interactive: bool,
    pub privileged: bool,
    /// Repository discovered for this launch, if any
    pub repository: Option<RepositoryLocation>,
    /// Script the launch was read from, if any
    pub script: Option<PathBuf>,
}

impl LaunchSpec {
    pub fn validate(&self) -> Result<()> {
        if self.image.trim().is_empty() {
            return Err(VesselError::InvalidConfig(
                "an image is required (use --image or a launch script)".to_string(),
            ));
        }
        if self.bindings.is_empty() {
            return Err(VesselError::InvalidConfig(
                "at least the working directory binding is required".to_string(),
            ));
        }
        Ok(())
    }
}
