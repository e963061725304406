//! The turn-decision harness: one position and one clock reading in, one move out.

pub mod engine;
pub mod playout;

pub use engine::{Decision, Engine, EngineConfig, EngineError};
pub use playout::{evaluate_by_playing, select_move, PlayoutChoice, PlayoutConfig};
