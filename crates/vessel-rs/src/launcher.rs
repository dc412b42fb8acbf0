//! Hand a launch specification to the container engine

use log::{debug, info, warn};
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;

use vessel_core::{Binding, LaunchSpec, Result, VesselError};

use crate::engine::ContainerEngine;

/// Outcome of a launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchReport {
    pub success: bool,
    pub container_id: String,
    pub image: String,
    pub working_dir: PathBuf,
    pub mounts: Vec<Binding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_path: Option<PathBuf>,
    pub exit_code: i64,
    pub message: String,
}

/// Runs launch specifications on an engine
pub struct Launcher<E> {
    engine: E,
}

impl<E: ContainerEngine> Launcher<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Create, start and wait for a container.
    ///
    /// The wait is abandoned with [`VesselError::Cancelled`] as soon as
    /// `cancel` completes; the container itself is removed by the engine's
    /// auto-remove policy once it exits.
    pub async fn launch<C>(&self, spec: LaunchSpec, cancel: C) -> Result<LaunchReport>
    where
        C: Future<Output = ()>,
    {
        spec.validate()?;

        info!("Creating container");
        let id = self.engine.create(&spec).await?;
        info!("Container created: {}", id);

        info!("Starting container");
        self.engine.start(&id).await?;

        debug!("Waiting for container {} to complete", id);
        let exit_code = tokio::select! {
            status = self.engine.wait(&id) => status?,
            _ = cancel => {
                warn!("Stopped waiting for container {}", id);
                return Err(VesselError::Cancelled);
            }
        };
        info!("Container {} exited with status {}", id, exit_code);

        let success = exit_code == 0;
        let message = if success {
            "Container executed successfully".to_string()
        } else {
            format!("Container exited with status {exit_code}")
        };

        Ok(LaunchReport {
            success,
            container_id: id,
            image: spec.image,
            working_dir: spec.working_dir,
            mounts: spec.bindings,
            git_root: spec.repository.map(|r| r.root),
            script_path: spec.script,
            exit_code,
            message,
        })
    }
}
