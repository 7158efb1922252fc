//! Error types for bot engine operations.
//!
//! Each subsystem owns one error enum:
//! - Configuration validation (fatal, run never starts)
//! - Source retrieval (fatal, aborts before any sandbox work)
//! - Sandbox lifecycle (fatal wherever it occurs, including cleanup)
//! - Remote invocation (recoverable, recorded as an absent result)
//!
//! [`EngineError`] is what a run hands back to its caller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while checking bot and simulation configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Bot validation failed: {0}")]
    InvalidBot(String),

    #[error("Duplicate bot id '{0}'")]
    DuplicateBot(String),

    #[error("Simulation validation failed: {0}")]
    InvalidSimulation(String),

    #[error("Duplicate simulation id '{0}'")]
    DuplicateSimulation(String),
}

/// Errors raised while acquiring a bot's source code.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Source file '{path}' could not be read: {source}")]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Working directory unavailable: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("Remote source '{owner}/{repo}/{path}' not found")]
    NotFound {
        owner: String,
        repo: String,
        path: String,
    },

    #[error("Not authorized to read '{owner}/{repo}' ({status})")]
    Unauthorized {
        owner: String,
        repo: String,
        status: u16,
    },

    #[error("GitHub API returned {status} for '{url}'")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Errors raised while provisioning or tearing down a sandbox.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("Docker daemon not available: {0}")]
    DaemonUnavailable(String),

    #[error("Sandbox image '{0}' is not available locally")]
    ImageNotFound(String),

    #[error("Failed to pull image '{image}': {reason}")]
    PullFailed { image: String, reason: String },

    #[error("Failed to create sandbox: {0}")]
    CreateFailed(String),

    #[error("Failed to start sandbox '{id}': {reason}")]
    StartFailed { id: String, reason: String },

    #[error("Failed to kill sandbox '{id}': {reason}")]
    KillFailed { id: String, reason: String },

    #[error("Failed to remove sandbox '{id}': {reason}")]
    RemoveFailed { id: String, reason: String },

    #[error("Failed to materialize entry point '{path}': {source}")]
    EntryPoint {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a single remote call into a sandboxed bot.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Failed to connect to {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },

    #[error("Call exceeded its {seconds}s deadline")]
    DeadlineExceeded { seconds: u64 },

    #[error("Bot returned {code:?}: {message}")]
    Remote { code: tonic::Code, message: String },
}

impl From<tonic::Status> for InvocationError {
    fn from(status: tonic::Status) -> Self {
        Self::Remote {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

/// Fatal errors that end a run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to retrieve source for bot '{bot_id}': {source}")]
    Retrieval {
        bot_id: String,
        #[source]
        source: RetrievalError,
    },

    #[error("Sandbox failure for bot '{bot_id}': {source}")]
    Sandbox {
        bot_id: String,
        #[source]
        source: SandboxError,
    },

    #[error("No cached source for bot '{bot_id}'")]
    MissingSource { bot_id: String },

    #[error("Resource directory '{path}' could not be prepared: {source}")]
    Resources {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    /// Returns true for failures raised while fetching bot sources.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Self::Retrieval { .. })
    }

    /// Returns true for failures raised by the sandbox lifecycle.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Self::Sandbox { .. })
    }
}
