//! Unary gRPC client for the bot's `AgentService`.

use tonic::codegen::http;
use tonic::transport::Channel;

use super::{FantasyLandscape, FantasySelections};

/// Fully qualified service name.
pub const SERVICE_NAME: &str = "AgentService";

/// Route of the single remote operation a bot exposes.
pub const PERFORM_FANTASY_ACTIONS_PATH: &str = "/AgentService/PerformFantasyActions";

/// Client for the `AgentService` exposed by a sandboxed bot.
#[derive(Debug, Clone)]
pub struct AgentServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl AgentServiceClient {
    /// Wraps an established channel.
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    /// Asks the bot to act on a landscape and returns its selections.
    pub async fn perform_fantasy_actions(
        &mut self,
        request: impl tonic::IntoRequest<FantasyLandscape>,
    ) -> Result<tonic::Response<FantasySelections>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {e}")))?;

        let codec = tonic::codec::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static(PERFORM_FANTASY_ACTIONS_PATH);
        let mut req = request.into_request();
        req.extensions_mut().insert(tonic::GrpcMethod::new(
            SERVICE_NAME,
            "PerformFantasyActions",
        ));

        self.inner.unary(req, path, codec).await
    }
}
