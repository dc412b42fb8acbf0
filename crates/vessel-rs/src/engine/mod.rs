//! Container engine seam
//!
//! The launcher only needs three operations from an engine: create a
//! container from a spec, start it, and wait for it to stop.

pub mod docker;

pub use docker::DockerEngine;

use std::future::Future;

use vessel_core::{LaunchSpec, Result};

/// An engine able to run a [`LaunchSpec`]
pub trait ContainerEngine {
    /// Create a container and return its identity
    fn create(&self, spec: &LaunchSpec) -> impl Future<Output = Result<String>> + Send;

    /// Start a created container
    fn start(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Wait until the container stops and return its exit status
    fn wait(&self, id: &str) -> impl Future<Output = Result<i64>> + Send;
}
