//! Docker engine backed by bollard

use bollard::Docker;
use bollard::errors::Error as DockerError;
use bollard::models::{
    ContainerCreateBody, ContainerWaitResponse, HostConfig, Mount, MountTypeEnum,
};
use bollard::query_parameters::{
    CreateContainerOptions, StartContainerOptions, WaitContainerOptions,
};
use futures::StreamExt;
use log::{debug, info, warn};

use vessel_core::{Binding, EnginePhase, LaunchSpec, Result, VesselError};

use super::ContainerEngine;

/// Engine talking to the local Docker daemon
pub struct DockerEngine {
    client: Docker,
}

impl DockerEngine {
    /// Connect using `DOCKER_HOST` or the platform default socket
    pub fn connect() -> Result<Self> {
        let client = Docker::connect_with_local_defaults()
            .map_err(|e| VesselError::engine(EnginePhase::Connect, e))?;
        Ok(Self { client })
    }

    /// Daemon version, confirming the engine is reachable
    pub async fn version(&self) -> Result<String> {
        let version = self
            .client
            .version()
            .await
            .map_err(|e| VesselError::engine(EnginePhase::Connect, e))?;
        Ok(version.version.unwrap_or_else(|| "unknown".to_string()))
    }
}

impl ContainerEngine for DockerEngine {
    async fn create(&self, spec: &LaunchSpec) -> Result<String> {
        let response = self
            .client
            .create_container(None::<CreateContainerOptions>, container_config(spec))
            .await
            .map_err(|e| VesselError::engine(EnginePhase::Create, e))?;
        for warning in &response.warnings {
            warn!("Engine warning: {}", warning);
        }
        Ok(response.id)
    }

    async fn start(&self, id: &str) -> Result<()> {
        self.client
            .start_container(id, None::<StartContainerOptions>)
            .await
            .map_err(|e| VesselError::engine(EnginePhase::Start, e))
    }

    async fn wait(&self, id: &str) -> Result<i64> {
        let stream = self.client.wait_container(id, None::<WaitContainerOptions>);
        futures::pin_mut!(stream);

        wait_outcome(id, stream.next().await)
    }
}

/// Exit code from the first item of a wait stream
fn wait_outcome(
    id: &str,
    item: Option<std::result::Result<ContainerWaitResponse, DockerError>>,
) -> Result<i64> {
    match item {
        Some(Ok(response)) => Ok(response.status_code),
        // bollard reports non-zero exits as errors
        Some(Err(DockerError::DockerContainerWaitError { code, error })) => {
            debug!("Container {} exited with {}: {}", id, code, error);
            Ok(code)
        }
        Some(Err(e)) => Err(VesselError::engine(EnginePhase::Wait, e)),
        None => Err(VesselError::engine(
            EnginePhase::Wait,
            "engine closed the wait stream without a status",
        )),
    }
}

/// Translate a launch spec into the engine's create request
pub fn container_config(spec: &LaunchSpec) -> ContainerCreateBody {
    info!(
        "Creating container from {} with {} binding(s)",
        spec.image,
        spec.bindings.len()
    );

    let host_config = HostConfig {
        mounts: Some(spec.bindings.iter().map(bind_mount).collect()),
        auto_remove: Some(true),
        privileged: Some(spec.privileged),
        network_mode: spec.network_mode.clone(),
        ..Default::default()
    };

    ContainerCreateBody {
        image: Some(spec.image.clone()),
        cmd: non_empty(&spec.command),
        entrypoint: non_empty(&spec.entrypoint),
        working_dir: Some(spec.working_dir.display().to_string()),
        env: Some(spec.environment.clone()),
        user: spec.user.clone(),
        tty: Some(spec.interactive),
        attach_stdin: Some(spec.interactive),
        open_stdin: Some(spec.interactive),
        attach_stdout: Some(true),
        attach_stderr: Some(true),
        host_config: Some(host_config),
        ..Default::default()
    }
}

fn bind_mount(binding: &Binding) -> Mount {
    Mount {
        typ: Some(MountTypeEnum::BIND),
        source: Some(binding.source.display().to_string()),
        target: Some(binding.target.display().to_string()),
        read_only: Some(binding.read_only),
        ..Default::default()
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}
