//! Sandbox lifecycle for a single bot.
//!
//! A sandbox is one Docker container running the bot server image with the
//! resource directory bind-mounted read-only. The host port is fixed, so only
//! one sandbox may be alive at a time; [`SandboxHandle`] is not `Clone` and
//! teardown consumes it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::SandboxError;
use crate::execution::docker_client::{ContainerSpec, DockerClient};

/// Default image serving the bot over gRPC.
pub const DEFAULT_IMAGE: &str = "py-grpc-server";
/// Port the bot server listens on, inside and outside the container.
pub const DEFAULT_PORT: u16 = 8080;
/// Mount point of the resource directory inside the container.
pub const DEFAULT_CONTAINER_MOUNT: &str = "/botblitz";
/// File the bot's source is written to inside the resource directory.
pub const DEFAULT_ENTRY_POINT: &str = "bot.py";

/// Configuration for bot sandboxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Docker image to run.
    pub image: String,
    /// Port exposed by the bot server in the container.
    pub container_port: u16,
    /// Host interface to publish on.
    pub host_ip: String,
    /// Host port to publish on.
    pub host_port: u16,
    /// Mount point of the resource directory inside the container.
    pub container_mount_path: String,
    /// File name of the bot's entry point inside the resource directory.
    pub entry_point: String,
    /// Grace period after start before the bot is called, in milliseconds.
    pub settle_delay_ms: u64,
    /// Pull the image when it is missing instead of failing.
    pub pull_missing_image: bool,
}

impl SandboxConfig {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_host_port(mut self, port: u16) -> Self {
        self.host_port = port;
        self
    }

    pub fn with_pull_missing_image(mut self, pull: bool) -> Self {
        self.pull_missing_image = pull;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            container_port: DEFAULT_PORT,
            host_ip: "0.0.0.0".to_string(),
            host_port: DEFAULT_PORT,
            container_mount_path: DEFAULT_CONTAINER_MOUNT.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            settle_delay_ms: 2000,
            pull_missing_image: false,
        }
    }
}

/// Identifier of a running sandbox.
#[derive(Debug, PartialEq, Eq)]
pub struct SandboxHandle {
    id: String,
}

impl SandboxHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for SandboxHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Creates and destroys isolated bot environments.
#[async_trait]
pub trait SandboxRuntime: Send + Sync {
    /// Materializes `source` into `mount_dir`, then creates and starts a sandbox.
    async fn provision(&self, source: &[u8], mount_dir: &Path)
        -> Result<SandboxHandle, SandboxError>;

    /// Force-kills and removes the sandbox, then deletes the entry point.
    async fn teardown(&self, handle: SandboxHandle, mount_dir: &Path) -> Result<(), SandboxError>;
}

/// Writes the bot's source to its entry-point file and returns the path.
pub fn write_entry_point(
    mount_dir: &Path,
    entry_point: &str,
    source: &[u8],
) -> Result<PathBuf, SandboxError> {
    let path = mount_dir.join(entry_point);
    std::fs::write(&path, source).map_err(|source| SandboxError::EntryPoint {
        path: path.clone(),
        source,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).map_err(
            |source| SandboxError::EntryPoint {
                path: path.clone(),
                source,
            },
        )?;
    }

    Ok(path)
}

/// Deletes the entry-point file. A missing file is not an error.
pub fn remove_entry_point(mount_dir: &Path, entry_point: &str) -> Result<(), SandboxError> {
    let path = mount_dir.join(entry_point);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(SandboxError::EntryPoint { path, source }),
    }
}

/// Docker-backed sandbox runtime.
///
/// A daemon connection is opened per operation, so constructing the runtime
/// never fails.
#[derive(Debug, Clone, Default)]
pub struct DockerSandbox {
    config: SandboxConfig,
}

impl DockerSandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Builds the container spec for a sandbox mounted from `mount_dir`.
    pub fn container_spec(&self, mount_dir: &Path) -> ContainerSpec {
        ContainerSpec {
            name: format!("botblitz-sandbox-{}", Uuid::new_v4()),
            image: self.config.image.clone(),
            container_port: self.config.container_port,
            host_ip: self.config.host_ip.clone(),
            host_port: self.config.host_port,
            mount_source: mount_dir.to_string_lossy().to_string(),
            mount_target: self.config.container_mount_path.clone(),
        }
    }

    async fn ensure_image(&self, client: &DockerClient) -> Result<(), SandboxError> {
        if client.image_exists(&self.config.image).await {
            return Ok(());
        }

        if !self.config.pull_missing_image {
            return Err(SandboxError::ImageNotFound(self.config.image.clone()));
        }

        info!(image = %self.config.image, "Pulling sandbox image");
        client.pull_image(&self.config.image).await
    }
}

#[async_trait]
impl SandboxRuntime for DockerSandbox {
    async fn provision(
        &self,
        source: &[u8],
        mount_dir: &Path,
    ) -> Result<SandboxHandle, SandboxError> {
        debug!("Creating source code file");
        write_entry_point(mount_dir, &self.config.entry_point, source)?;

        let client = DockerClient::new()?;
        self.ensure_image(&client).await?;

        let spec = self.container_spec(mount_dir);
        let id = client.create_container(&spec).await?;
        debug!(container = %id, name = %spec.name, "Created sandbox container");

        if let Err(e) = client.start_container(&id).await {
            // A created-but-unstarted container still holds the port binding.
            if let Err(cleanup) = client.remove_container(&id).await {
                error!(container = %id, error = %cleanup, "Failed to remove unstarted sandbox");
            }
            return Err(e);
        }

        let delay = self.config.settle_delay();
        debug!(container = %id, ?delay, "Waiting for bot server to boot");
        tokio::time::sleep(delay).await;

        Ok(SandboxHandle::new(id))
    }

    async fn teardown(&self, handle: SandboxHandle, mount_dir: &Path) -> Result<(), SandboxError> {
        let client = DockerClient::new()?;

        info!(container = %handle, "Killing container");
        client.kill_container(handle.id()).await?;

        info!(container = %handle, "Force deleting container");
        client.remove_container(handle.id()).await?;

        if let Err(e) = remove_entry_point(mount_dir, &self.config.entry_point) {
            warn!(error = %e, "Failed to delete bot entry point");
        }

        Ok(())
    }
}
