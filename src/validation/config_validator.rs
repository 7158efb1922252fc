//! Predicate checks for bot and simulation configuration.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::{Bot, Simulation, SourceType};

/// Validates the bots supplied to a run.
///
/// Checks performed:
/// - ids are non-empty and unique
/// - every bot names a source path
/// - remote bots name both a repository owner and a repository
pub fn validate_bots(bots: &[Bot]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for bot in bots {
        if bot.id.trim().is_empty() {
            return Err(ValidationError::InvalidBot(
                "bot id must not be empty".to_string(),
            ));
        }

        if !seen.insert(bot.id.as_str()) {
            return Err(ValidationError::DuplicateBot(bot.id.clone()));
        }

        if bot.source_path.trim().is_empty() {
            return Err(ValidationError::InvalidBot(format!(
                "bot '{}' has no source path",
                bot.id
            )));
        }

        if bot.source_type == SourceType::Remote
            && (bot.source_repo_username.trim().is_empty() || bot.source_repo_name.trim().is_empty())
        {
            return Err(ValidationError::InvalidBot(format!(
                "remote bot '{}' must name a repository owner and repository",
                bot.id
            )));
        }
    }

    Ok(())
}

/// Validates the simulations supplied to a run.
///
/// A simulation with zero iterations is accepted and produces an empty
/// result sequence.
pub fn validate_simulations(simulations: &[Simulation]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for simulation in simulations {
        if simulation.id.trim().is_empty() {
            return Err(ValidationError::InvalidSimulation(
                "simulation id must not be empty".to_string(),
            ));
        }

        if !seen.insert(simulation.id.as_str()) {
            return Err(ValidationError::DuplicateSimulation(simulation.id.clone()));
        }
    }

    Ok(())
}
