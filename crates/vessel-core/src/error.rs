//! Error types for launch operations

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for launch operations
pub type Result<T> = std::result::Result<T, VesselError>;

/// Phase of the container engine interaction that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Connect,
    Create,
    Start,
    Wait,
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnginePhase::Connect => write!(f, "connect"),
            EnginePhase::Create => write!(f, "create"),
            EnginePhase::Start => write!(f, "start"),
            EnginePhase::Wait => write!(f, "wait"),
        }
    }
}

/// Errors that can occur while resolving or launching a container.
///
/// "Nothing found" outcomes (no repository, unusable volume expression) are
/// not errors and are represented as `None` by the components that produce them.
#[derive(Error, Debug)]
pub enum VesselError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Repository discovery failed at {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid launch script {path}: {reason}")]
    Script { path: PathBuf, reason: String },

    #[error("Launch script {path} must specify an image")]
    MissingImage { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to {phase} container: {message}")]
    Engine { phase: EnginePhase, message: String },

    #[error("Launch cancelled while waiting for container")]
    Cancelled,

    #[error("Output error: {0}")]
    Output(String),
}

impl VesselError {
    pub fn engine(phase: EnginePhase, err: impl fmt::Display) -> Self {
        VesselError::Engine {
            phase,
            message: err.to_string(),
        }
    }

    /// True for errors raised while parsing a launch script
    pub fn is_script_error(&self) -> bool {
        matches!(
            self,
            VesselError::Script { .. } | VesselError::MissingImage { .. }
        )
    }
}
