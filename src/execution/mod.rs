//! Docker execution layer for bot sandboxes.
//!
//! # Architecture
//!
//! Each bot gets exactly one container for the duration of its simulations:
//! ```text
//! write entry point → CREATE → START → settle delay → (gRPC calls) → KILL → REMOVE → delete entry point
//! ```
//!
//! # Example
//!
//! ```ignore
//! use botblitz_engine::execution::{DockerSandbox, SandboxConfig, SandboxRuntime};
//!
//! let sandbox = DockerSandbox::new(SandboxConfig::default());
//! let handle = sandbox.provision(b"...", mount_dir).await?;
//! // ... call the bot ...
//! sandbox.teardown(handle, mount_dir).await?;
//! ```

pub mod docker_client;
pub mod sandbox;

pub use docker_client::{ContainerSpec, DockerClient};
pub use sandbox::{
    remove_entry_point, write_entry_point, DockerSandbox, SandboxConfig, SandboxHandle,
    SandboxRuntime,
};
