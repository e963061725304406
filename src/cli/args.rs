//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    calculate_best_move::CalculateBestMoveArgs, watch::WatchArgs, CliError, Command,
};

#[derive(StructOpt)]
#[structopt(
    name = "sensibot",
    about = "A sensible chess bot: negamax with alpha-beta pruning and capture extensions ♞"
)]
pub enum Sensibot {
    #[structopt(
        name = "calculate-best-move",
        about = "Determine the best move from a position given in FEN notation with `--fen` (default: starting position), optionally after playing `--moves`. Search depth follows `--time-remaining-ms` (default: 60000) unless a fixed `--depth` is given."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
    #[structopt(
        name = "watch",
        about = "Watch the engine play against itself from `--fen` (default: starting position), each side thinking on its own `--time-budget-ms` clock, until the game ends or `--max-moves` is reached."
    )]
    Watch(WatchArgs),
}

impl Command for Sensibot {
    fn execute(self) -> Result<(), CliError> {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            CalculateBestMove(cmd),
            Watch(cmd),
        }
    }
}
