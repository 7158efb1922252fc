//! Run manifest: everything a run needs, loaded from YAML or JSON.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{EngineSettings, ResultStore};
use crate::execution::SandboxConfig;
use crate::models::{Bot, Simulation};
use crate::rpc::RpcConfig;
use crate::source::GithubConfig;

/// Bots, simulations and settings for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunManifest {
    pub settings: EngineSettings,
    pub sandbox: SandboxConfig,
    pub rpc: RpcConfig,
    pub github: GithubConfig,
    pub bots: Vec<Bot>,
    pub simulations: Vec<Simulation>,
}

impl RunManifest {
    /// Loads a manifest; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let manifest = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON manifest {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML manifest {}", path.display()))?
        };

        Ok(manifest)
    }
}

/// Results of a completed run, written with `--output`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub succeeded: bool,
    pub error: Option<String>,
    pub results: ResultStore,
}
