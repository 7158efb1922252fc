//! Run phases.
//!
//! ```text
//! Idle → ResourcesCollected → SourcesFetched
//!      → { ContainerStarted → SimulationsRun → ContainerCleaned } × bots
//!      → Done
//! ```
//! Any fatal error moves the run to `Failed`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Idle,
    ResourcesCollected,
    SourcesFetched,
    ContainerStarted { bot_id: String },
    SimulationsRun { bot_id: String },
    ContainerCleaned { bot_id: String },
    Done,
    Failed,
}

impl RunPhase {
    /// Returns true once a run can no longer make progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Failed)
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::Idle => write!(f, "idle"),
            RunPhase::ResourcesCollected => write!(f, "resources collected"),
            RunPhase::SourcesFetched => write!(f, "sources fetched"),
            RunPhase::ContainerStarted { bot_id } => write!(f, "container started ({bot_id})"),
            RunPhase::SimulationsRun { bot_id } => write!(f, "simulations run ({bot_id})"),
            RunPhase::ContainerCleaned { bot_id } => write!(f, "container cleaned ({bot_id})"),
            RunPhase::Done => write!(f, "done"),
            RunPhase::Failed => write!(f, "failed"),
        }
    }
}
