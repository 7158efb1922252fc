//! Protobuf messages exchanged with a sandboxed bot.
//!
//! The engine treats [`FantasyLandscape`] and [`FantasySelections`] as opaque:
//! landscapes are passed through from the run manifest unchanged and selections
//! are stored as returned. The messages are declared with `prost` derives so no
//! build script or `protoc` is needed.

pub mod agent_service;

pub use agent_service::AgentServiceClient;

use serde::{Deserialize, Serialize};

/// Draft state of a single player.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftStatus {
    #[prost(bool, tag = "1")]
    pub drafted: bool,
    #[prost(uint32, tag = "2")]
    pub team_id_chosen: u32,
    #[prost(uint32, tag = "3")]
    pub pick_chosen: u32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub full_name: String,
    #[prost(string, repeated, tag = "3")]
    pub allowed_positions: Vec<String>,
    #[prost(string, tag = "4")]
    pub professional_team: String,
    #[prost(uint32, tag = "5")]
    pub rank: u32,
    #[prost(message, optional, tag = "6")]
    pub draft_status: Option<DraftStatus>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterSlot {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, repeated, tag = "2")]
    pub allowed_player_positions: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueSettings {
    #[prost(uint32, tag = "1")]
    pub num_teams: u32,
    #[prost(bool, tag = "2")]
    pub is_snake_draft: bool,
    #[prost(uint32, tag = "3")]
    pub total_rounds: u32,
    #[prost(message, repeated, tag = "4")]
    pub slots_per_team: Vec<RosterSlot>,
}

/// Scenario state handed to a bot for one iteration.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct FantasyLandscape {
    #[prost(message, repeated, tag = "1")]
    pub players: Vec<Player>,
    #[prost(message, optional, tag = "2")]
    pub league_settings: Option<LeagueSettings>,
    #[prost(uint32, tag = "3")]
    pub current_pick: u32,
    #[prost(uint32, tag = "4")]
    pub drafting_team_id: u32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftSelection {
    #[prost(string, tag = "1")]
    pub player_id: String,
}

/// A bot's decision output for one iteration.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct FantasySelections {
    #[prost(message, optional, tag = "1")]
    pub draft_selection: Option<DraftSelection>,
}

impl FantasySelections {
    /// Convenience constructor for a single draft pick.
    pub fn draft(player_id: impl Into<String>) -> Self {
        Self {
            draft_selection: Some(DraftSelection {
                player_id: player_id.into(),
            }),
        }
    }
}
