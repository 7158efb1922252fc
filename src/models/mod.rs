//! Bot and simulation configuration.
//!
//! These values are supplied once to a run and never mutated by the engine.

use serde::{Deserialize, Serialize};

use crate::proto::FantasyLandscape;

/// Where a bot's source code lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A file relative to the engine's working directory.
    #[default]
    Local,
    /// A file in a hosted GitHub repository.
    Remote,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Local => write!(f, "local"),
            SourceType::Remote => write!(f, "remote"),
        }
    }
}

/// Resolved source location descriptor handed to a source acquirer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Local {
        path: String,
    },
    Remote {
        owner: String,
        repo: String,
        path: String,
    },
}

/// An untrusted program evaluated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    pub id: String,
    #[serde(default)]
    pub source_type: SourceType,
    /// Repository owner, only meaningful for remote bots.
    #[serde(default)]
    pub source_repo_username: String,
    /// Repository name, only meaningful for remote bots.
    #[serde(default)]
    pub source_repo_name: String,
    /// File path (relative to the working directory or the repository root).
    pub source_path: String,
    /// Team the bot drafts for in the simulated league.
    #[serde(default)]
    pub fantasy_team_id: u32,
}

impl Bot {
    /// Creates a bot whose source is a local file.
    pub fn local(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_type: SourceType::Local,
            source_repo_username: String::new(),
            source_repo_name: String::new(),
            source_path: path.into(),
            fantasy_team_id: 0,
        }
    }

    /// Creates a bot whose source lives in a GitHub repository.
    pub fn remote(
        id: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_type: SourceType::Remote,
            source_repo_username: owner.into(),
            source_repo_name: repo.into(),
            source_path: path.into(),
            fantasy_team_id: 0,
        }
    }

    /// Sets the fantasy team this bot drafts for.
    pub fn with_fantasy_team(mut self, team_id: u32) -> Self {
        self.fantasy_team_id = team_id;
        self
    }

    /// Returns the descriptor used to fetch this bot's source.
    pub fn source_location(&self) -> SourceLocation {
        match self.source_type {
            SourceType::Local => SourceLocation::Local {
                path: self.source_path.clone(),
            },
            SourceType::Remote => SourceLocation::Remote {
                owner: self.source_repo_username.clone(),
                repo: self.source_repo_name.clone(),
                path: self.source_path.clone(),
            },
        }
    }
}

/// A named scenario executed for a fixed number of iterations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub id: String,
    /// Number of times each bot is invoked for this simulation.
    pub num_iterations: u32,
    /// Passed unchanged to every invocation.
    #[serde(default)]
    pub landscape: FantasyLandscape,
}

impl Simulation {
    pub fn new(id: impl Into<String>, num_iterations: u32, landscape: FantasyLandscape) -> Self {
        Self {
            id: id.into(),
            num_iterations,
            landscape,
        }
    }
}
