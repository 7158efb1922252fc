//! gRPC action client.
//!
//! Every invocation dials a fresh plaintext channel, issues a single
//! `PerformFantasyActions` call and drops the channel. Call volume is small
//! (bots × simulations × iterations), so there is no pooling.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tonic::transport::Endpoint;
use tracing::trace;

use super::ActionInvoker;
use crate::error::InvocationError;
use crate::proto::{AgentServiceClient, FantasyLandscape, FantasySelections};

/// Connection settings for the bot server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Bot server address.
    pub endpoint: String,
    /// Dial timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Per-call deadline in seconds.
    pub call_timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            connect_timeout_secs: 5,
            call_timeout_secs: 30,
        }
    }
}

impl RpcConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout_secs = timeout.as_secs();
        self
    }
}

/// One-shot gRPC client for a sandboxed bot.
#[derive(Debug, Clone, Default)]
pub struct GrpcActionClient {
    config: RpcConfig,
}

impl GrpcActionClient {
    pub fn new(config: RpcConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    fn endpoint(&self) -> Result<Endpoint, InvocationError> {
        let endpoint = Endpoint::from_shared(self.config.endpoint.clone()).map_err(|e| {
            InvocationError::InvalidEndpoint {
                endpoint: self.config.endpoint.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(endpoint
            .connect_timeout(Duration::from_secs(self.config.connect_timeout_secs))
            .timeout(Duration::from_secs(self.config.call_timeout_secs)))
    }
}

#[async_trait]
impl ActionInvoker for GrpcActionClient {
    async fn invoke(
        &self,
        landscape: &FantasyLandscape,
    ) -> Result<FantasySelections, InvocationError> {
        let channel = self
            .endpoint()?
            .connect()
            .await
            .map_err(|e| InvocationError::Connect {
                endpoint: self.config.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let mut client = AgentServiceClient::new(channel);
        let deadline = Duration::from_secs(self.config.call_timeout_secs);

        let mut request = tonic::Request::new(landscape.clone());
        request.set_timeout(deadline);

        trace!(endpoint = %self.config.endpoint, "Calling PerformFantasyActions");
        match client.perform_fantasy_actions(request).await {
            Ok(response) => Ok(response.into_inner()),
            Err(status) if status.code() == tonic::Code::DeadlineExceeded => {
                Err(InvocationError::DeadlineExceeded {
                    seconds: self.config.call_timeout_secs,
                })
            }
            Err(status) => Err(status.into()),
        }
    }
}
