//! Bot engine: the run orchestrator.
//!
//! # Architecture
//!
//! ```text
//! validate → reset resource dir → fetch all sources
//!          → for each bot: provision sandbox → simulations × iterations (gRPC) → teardown
//! ```
//!
//! Bots run strictly one after another because every sandbox publishes the
//! same host port.
//!
//! # Example
//!
//! ```ignore
//! use botblitz_engine::engine::{BotEngine, EngineSettings};
//!
//! let mut engine = BotEngine::new(simulations, bots, EngineSettings::default());
//! println!("{}", engine.summarize());
//! engine.run().await?;
//! engine.print_results();
//! ```

pub mod orchestrator;
pub mod results;
pub mod settings;
pub mod state;

pub use orchestrator::{reset_resource_dir, BotEngine};
pub use results::{IterationOutcome, ResultStore, SourceCache};
pub use settings::{EngineSettings, DEFAULT_RESOURCE_FOLDER};
pub use state::RunPhase;
