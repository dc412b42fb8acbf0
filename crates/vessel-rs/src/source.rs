//! Choice between script-driven and flag-driven launches

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use vessel_core::{PartialSpec, Result};

/// Where the authoritative launch settings come from.
///
/// Decided once per invocation; the two sources are never merged field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchSource {
    /// A launch script; `args` are appended to its command
    Script {
        path: PathBuf,
        spec: PartialSpec,
        args: Vec<String>,
    },
    /// Command-line and environment settings; `args` form the command
    Flags { spec: PartialSpec, args: Vec<String> },
}

impl LaunchSource {
    /// Use the first positional argument as a script when it is a regular
    /// file that loads as one, otherwise fall back to `flags`.
    pub fn sniff(flags: PartialSpec, positional: Vec<String>) -> Self {
        let Some(first) = positional.first() else {
            return LaunchSource::Flags {
                spec: flags,
                args: positional,
            };
        };

        let path = Path::new(first);
        let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
        if is_file {
            match vessel_script::load(path) {
                Ok(spec) => {
                    debug!("Running {} as a launch script", path.display());
                    let path = path.to_path_buf();
                    let args = positional.into_iter().skip(1).collect();
                    return LaunchSource::Script { path, spec, args };
                }
                Err(e) => debug!("{} is not a launch script: {}", path.display(), e),
            }
        }

        LaunchSource::Flags {
            spec: flags,
            args: positional,
        }
    }

    /// Load `path` as a script; failures are returned to the caller
    pub fn explicit(path: impl AsRef<Path>, args: Vec<String>) -> Result<Self> {
        let path = path.as_ref();
        let spec = vessel_script::load(path)?;
        Ok(LaunchSource::Script {
            path: path.to_path_buf(),
            spec,
            args,
        })
    }

    pub fn is_script(&self) -> bool {
        matches!(self, LaunchSource::Script { .. })
    }

    pub fn script_path(&self) -> Option<&Path> {
        match self {
            LaunchSource::Script { path, .. } => Some(path),
            LaunchSource::Flags { .. } => None,
        }
    }
}
