//! Configuration validation run before any engine work starts.

pub mod config_validator;

pub use config_validator::{validate_bots, validate_simulations};
