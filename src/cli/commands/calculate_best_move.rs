//! Calculate best move command - determine the best move from a position.

use std::time::Duration;

use sensibot::board::fen::STARTING_POSITION;
use sensibot::board::{ChessBoard, MoveMode};
use sensibot::game::{Engine, EngineConfig, PlayoutConfig};
use sensibot::input_handler::parse_move_list;
use sensibot::time_control::{DepthPolicy, FixedClock};
use structopt::StructOpt;

use super::{CliError, Command};

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(long = "fen", default_value = STARTING_POSITION)]
    pub starting_position: ChessBoard,
    #[structopt(
        long = "moves",
        help = "Moves to play from the FEN first, in coordinate notation (e2e4,e7e5)"
    )]
    pub moves: Option<String>,
    #[structopt(
        short,
        long,
        help = "Search at this fixed depth instead of deriving it from the clock"
    )]
    pub depth: Option<u8>,
    #[structopt(
        long,
        default_value = "2",
        help = "Capture extension used with --depth, rounded down to keep the horizon even"
    )]
    pub extra_capture_depth: u8,
    #[structopt(long = "time-remaining-ms", default_value = "60000")]
    pub time_remaining_ms: u64,
    #[structopt(long, help = "Re-rank near-best moves by short self-play")]
    pub playout: bool,
    #[structopt(long, help = "Also print the score and the principal line")]
    pub show_line: bool,
}

impl CalculateBestMoveArgs {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default().with_principal_line(self.show_line);
        if let Some(depth) = self.depth {
            // Full depth on every ply, and no endgame deepening past it.
            config = config.with_depth_policy(
                DepthPolicy::default()
                    .with_max_depths(depth, self.extra_capture_depth)
                    .with_opening_plies(0)
                    .with_max_deepening_depth(depth),
            );
        }
        if self.playout {
            config = config.with_playout(PlayoutConfig::default());
        }
        config
    }

    fn clock(&self) -> FixedClock {
        match self.depth {
            Some(_) => FixedClock::new(Duration::MAX),
            None => FixedClock::from_millis(self.time_remaining_ms),
        }
    }
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) -> Result<(), CliError> {
        let mut board = self.starting_position.clone();
        if let Some(moves) = &self.moves {
            for chess_move in parse_move_list(moves)? {
                board.make_move(chess_move, MoveMode::Game)?;
            }
        }

        if board.legal_move_count() == 0 {
            return Err(CliError::NoValidMoves);
        }

        let mut engine = Engine::with_config(self.engine_config());
        let best_move = engine.think(&mut board, &self.clock())?;
        println!("{}", best_move);

        if self.show_line {
            if let Some(decision) = engine.last_decision() {
                println!("score {:.3}", decision.score);
                if let Some(line) = &decision.line {
                    let line: Vec<String> = line.iter().map(ToString::to_string).collect();
                    println!("line {}", line.join(" "));
                }
            }
        }
        Ok(())
    }
}
