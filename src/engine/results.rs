//! Result store and source cache owned by the engine.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::proto::FantasySelections;

/// Outcome of one iteration: `None` marks a failed invocation.
pub type IterationOutcome = Option<FantasySelections>;

/// Collected outcomes keyed by bot, then simulation, in iteration order.
///
/// Sequences are append-only. A bot's entry exists once its sandbox has
/// started; a simulation's entry exists once its first iteration begins (or
/// immediately, for zero-iteration simulations).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultStore {
    bots: BTreeMap<String, BTreeMap<String, Vec<IterationOutcome>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bot with no simulations yet.
    pub fn begin_bot(&mut self, bot_id: &str) {
        self.bots.entry(bot_id.to_string()).or_default();
    }

    /// Starts a fresh, empty sequence for a bot's simulation.
    pub fn begin_simulation(&mut self, bot_id: &str, simulation_id: &str) {
        self.bots
            .entry(bot_id.to_string())
            .or_default()
            .insert(simulation_id.to_string(), Vec::new());
    }

    /// Appends one iteration outcome.
    pub fn record(&mut self, bot_id: &str, simulation_id: &str, outcome: IterationOutcome) {
        self.bots
            .entry(bot_id.to_string())
            .or_default()
            .entry(simulation_id.to_string())
            .or_default()
            .push(outcome);
    }

    /// Per-simulation results for a bot.
    pub fn bot(&self, bot_id: &str) -> Option<&BTreeMap<String, Vec<IterationOutcome>>> {
        self.bots.get(bot_id)
    }

    /// Ordered iteration outcomes for a bot's simulation.
    pub fn simulation(&self, bot_id: &str, simulation_id: &str) -> Option<&[IterationOutcome]> {
        self.bots
            .get(bot_id)
            .and_then(|sims| sims.get(simulation_id))
            .map(Vec::as_slice)
    }

    pub fn contains_bot(&self, bot_id: &str) -> bool {
        self.bots.contains_key(bot_id)
    }

    pub fn bot_ids(&self) -> impl Iterator<Item = &str> {
        self.bots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    /// Number of failed iterations across the whole store.
    pub fn failure_count(&self) -> usize {
        self.bots
            .values()
            .flat_map(|sims| sims.values())
            .flatten()
            .filter(|outcome| outcome.is_none())
            .count()
    }

    /// Human-readable dump, one line per bot/simulation pair.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (bot_id, simulations) in &self.bots {
            let _ = writeln!(out, "{bot_id}:");
            for (simulation_id, outcomes) in simulations {
                let rendered: Vec<String> = outcomes.iter().map(render_outcome).collect();
                let _ = writeln!(out, "\t{simulation_id}: [{}]", rendered.join(", "));
            }
        }
        out
    }
}

fn render_outcome(outcome: &IterationOutcome) -> String {
    match outcome {
        None => "<absent>".to_string(),
        Some(selections) => match &selections.draft_selection {
            Some(pick) => format!("draft({})", pick.player_id),
            None => "{}".to_string(),
        },
    }
}

/// Raw source bytes per bot, filled before any sandbox is created.
#[derive(Debug, Clone, Default)]
pub struct SourceCache {
    sources: HashMap<String, Vec<u8>>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bot_id: impl Into<String>, source: Vec<u8>) {
        self.sources.insert(bot_id.into(), source);
    }

    pub fn get(&self, bot_id: &str) -> Option<&[u8]> {
        self.sources.get(bot_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }
}
