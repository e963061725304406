//! CLI command implementations.

use thiserror::Error;

use sensibot::board::error::BoardError;
use sensibot::game::EngineError;
use sensibot::input_handler::InputError;

pub trait Command {
    fn execute(self) -> Result<(), CliError>;
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("there are no valid moves in the given position")]
    NoValidMoves,
}

pub mod calculate_best_move;
pub mod watch;
