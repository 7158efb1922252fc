//! botblitz-engine: run untrusted fantasy bots in Docker sandboxes.
//!
//! Each bot's source is fetched (locally or from GitHub), mounted into a
//! container running the bot server image, and driven through every configured
//! simulation over gRPC. Per-iteration selections are collected into a
//! [`engine::ResultStore`].

pub mod cli;
pub mod engine;
pub mod error;
pub mod execution;
pub mod models;
pub mod proto;
pub mod rpc;
pub mod source;
pub mod validation;

// Re-export commonly used types
pub use engine::{BotEngine, EngineSettings, ResultStore, RunPhase};
pub use error::{EngineError, InvocationError, RetrievalError, SandboxError, ValidationError};
pub use models::{Bot, Simulation, SourceLocation, SourceType};
