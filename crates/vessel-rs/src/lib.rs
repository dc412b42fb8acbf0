//! vessel-rs: run containers bound to the invoker's working context
//!
//! Builds a [`LaunchSpec`] from either a launch script or command-line
//! settings, adds bindings for the working directory and enclosing
//! repository, and hands it to a container engine.
//!
//! # Example
//!
//! ```ignore
//! use vessel_rs::{BindingResolver, DockerEngine, LaunchSource, LaunchSpecBuilder, Launcher};
//!
//! let cwd = std::env::current_dir()?;
//! let repository = vessel_rs::git::locate(&cwd)?;
//! let source = LaunchSource::sniff(flags, positional);
//! let spec = LaunchSpecBuilder::new(BindingResolver::for_user(&cwd))
//!     .repository(repository)
//!     .build(source)?;
//!
//! let report = Launcher::new(DockerEngine::connect()?)
//!     .launch(spec, std::future::pending())
//!     .await?;
//! println!("exit code: {}", report.exit_code);
//! ```

pub mod builder;
pub mod engine;
pub mod launcher;
pub mod source;

// Re-export sub-crate types for convenience
pub use vessel_core::{
    self as core, Binding, EnginePhase, LaunchSpec, PartialSpec, RepositoryLocation, Result,
    VesselError,
};
pub use vessel_git as git;
pub use vessel_mount::{BindingResolver, VolumeExpr};
pub use vessel_script as script;

pub use builder::LaunchSpecBuilder;
pub use engine::{ContainerEngine, DockerEngine};
pub use launcher::{LaunchReport, Launcher};
pub use source::LaunchSource;
