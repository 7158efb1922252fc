//! Docker API wrapper using the bollard crate.
//!
//! Only the operations a bot sandbox needs are exposed: create with a fixed
//! port binding and a read-only bind mount, start, kill, force remove, and
//! image presence checks.

use std::collections::HashMap;

use bollard::container::{
    Config, CreateContainerOptions, KillContainerOptions, RemoveContainerOptions,
    StartContainerOptions,
};
use bollard::image::CreateImageOptions;
use bollard::models::{HostConfig, Mount, MountTypeEnum, PortBinding};
use bollard::Docker;
use futures::StreamExt;

use crate::error::SandboxError;

/// Configuration for creating a bot container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Unique container name.
    pub name: String,
    /// Image to run.
    pub image: String,
    /// Port the bot server listens on inside the container.
    pub container_port: u16,
    /// Host interface the port is published on.
    pub host_ip: String,
    /// Host port the container port is published on.
    pub host_port: u16,
    /// Host directory mounted read-only into the container.
    pub mount_source: String,
    /// Mount point inside the container.
    pub mount_target: String,
}

impl ContainerSpec {
    /// Docker's key for the exposed container port (e.g. `8080/tcp`).
    pub fn port_key(&self) -> String {
        format!("{}/tcp", self.container_port)
    }

    fn host_config(&self) -> HostConfig {
        let mut port_bindings = HashMap::new();
        port_bindings.insert(
            self.port_key(),
            Some(vec![PortBinding {
                host_ip: Some(self.host_ip.clone()),
                host_port: Some(self.host_port.to_string()),
            }]),
        );

        HostConfig {
            port_bindings: Some(port_bindings),
            mounts: Some(vec![Mount {
                typ: Some(MountTypeEnum::BIND),
                source: Some(self.mount_source.clone()),
                target: Some(self.mount_target.clone()),
                read_only: Some(true),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    /// Builds the bollard create request for this spec.
    pub fn to_config(&self) -> Config<String> {
        let mut exposed_ports = HashMap::new();
        exposed_ports.insert(self.port_key(), HashMap::new());

        Config {
            image: Some(self.image.clone()),
            exposed_ports: Some(exposed_ports),
            host_config: Some(self.host_config()),
            ..Default::default()
        }
    }
}

/// Docker client wrapper for sandbox operations.
pub struct DockerClient {
    docker: Docker,
}

impl DockerClient {
    /// Creates a client for the local Docker daemon.
    ///
    /// # Errors
    ///
    /// Returns `SandboxError::DaemonUnavailable` if the daemon settings are unusable.
    pub fn new() -> Result<Self, SandboxError> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| SandboxError::DaemonUnavailable(format!("Failed to connect: {e}")))?;

        Ok(Self { docker })
    }

    /// Creates a container and returns its ID.
    pub async fn create_container(&self, spec: &ContainerSpec) -> Result<String, SandboxError> {
        let options = CreateContainerOptions {
            name: spec.name.clone(),
            platform: None,
        };

        let response = self
            .docker
            .create_container(Some(options), spec.to_config())
            .await
            .map_err(|e| SandboxError::CreateFailed(e.to_string()))?;

        for warning in &response.warnings {
            tracing::warn!(container = %response.id, "Docker create warning: {}", warning);
        }

        Ok(response.id)
    }

    /// Starts a created container.
    pub async fn start_container(&self, id: &str) -> Result<(), SandboxError> {
        self.docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| SandboxError::StartFailed {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends SIGKILL to a container.
    pub async fn kill_container(&self, id: &str) -> Result<(), SandboxError> {
        self.docker
            .kill_container(id, None::<KillContainerOptions<String>>)
            .await
            .map_err(|e| SandboxError::KillFailed {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }

    /// Force removes a container.
    pub async fn remove_container(&self, id: &str) -> Result<(), SandboxError> {
        let options = RemoveContainerOptions {
            force: true,
            ..Default::default()
        };

        self.docker
            .remove_container(id, Some(options))
            .await
            .map_err(|e| SandboxError::RemoveFailed {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }

    /// Checks if an image exists locally.
    pub async fn image_exists(&self, image: &str) -> bool {
        self.docker.inspect_image(image).await.is_ok()
    }

    /// Pulls an image from its registry.
    pub async fn pull_image(&self, image: &str) -> Result<(), SandboxError> {
        let options = CreateImageOptions {
            from_image: image,
            ..Default::default()
        };

        let mut stream = self.docker.create_image(Some(options), None, None);

        while let Some(result) = stream.next().await {
            result.map_err(|e| SandboxError::PullFailed {
                image: image.to_string(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }
}
