//! Remote calls into a sandboxed bot.

pub mod client;

pub use client::{GrpcActionClient, RpcConfig};

use async_trait::async_trait;

use crate::error::InvocationError;
use crate::proto::{FantasyLandscape, FantasySelections};

/// Performs one bot invocation per simulation iteration.
#[async_trait]
pub trait ActionInvoker: Send + Sync {
    async fn invoke(&self, landscape: &FantasyLandscape)
        -> Result<FantasySelections, InvocationError>;
}
