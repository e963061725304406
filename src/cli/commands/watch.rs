//! Watch command - watch the engine play against itself.

use std::time::Duration;

use chess::Color;
use sensibot::board::fen::STARTING_POSITION;
use sensibot::board::ChessBoard;
use sensibot::game::{Engine, EngineConfig, PlayoutConfig};
use sensibot::time_control::{Clock, TurnTimer};
use structopt::StructOpt;

use super::{CliError, Command};

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(long = "fen", default_value = STARTING_POSITION)]
    pub starting_position: ChessBoard,
    #[structopt(
        long = "time-budget-ms",
        default_value = "60000",
        help = "Thinking time for each side for the whole game"
    )]
    pub time_budget_ms: u64,
    #[structopt(long = "max-moves", default_value = "200")]
    pub max_moves: u32,
    #[structopt(
        long = "delay",
        default_value = "0",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
    #[structopt(long, help = "Let both sides choose moves by playout")]
    pub playout: bool,
}

enum GameResult {
    Checkmate { winner: Color },
    Draw,
    OutOfTime { loser: Color },
    MoveLimit,
}

impl GameResult {
    fn describe(&self) -> String {
        match self {
            GameResult::Checkmate { winner } => {
                format!("{} checkmate, {:?} wins", score_for(*winner), winner)
            }
            GameResult::Draw => "1/2-1/2 draw".to_string(),
            GameResult::OutOfTime { loser } => {
                format!("{} {:?} ran out of time", score_for(!*loser), loser)
            }
            GameResult::MoveLimit => "* move limit reached".to_string(),
        }
    }
}

fn score_for(winner: Color) -> &'static str {
    match winner {
        Color::White => "1-0",
        Color::Black => "0-1",
    }
}

impl Command for WatchArgs {
    fn execute(self) -> Result<(), CliError> {
        let mut board = self.starting_position.clone();
        let mut config = EngineConfig::default();
        if self.playout {
            config = config.with_playout(PlayoutConfig::default());
        }

        let budget = Duration::from_millis(self.time_budget_ms);
        let mut white = (Engine::with_config(config.clone()), TurnTimer::new(budget));
        let mut black = (Engine::with_config(config), TurnTimer::new(budget));

        println!("{}", board);
        let mut moves_played = 0;
        let result = loop {
            if board.is_checkmate() {
                break GameResult::Checkmate {
                    winner: !board.side_to_move(),
                };
            }
            if board.is_draw() {
                break GameResult::Draw;
            }
            if moves_played >= self.max_moves {
                break GameResult::MoveLimit;
            }

            let side = board.side_to_move();
            let (engine, timer) = match side {
                Color::White => &mut white,
                Color::Black => &mut black,
            };

            timer.start_turn();
            let chess_move = engine.make_best_move(&mut board, &*timer)?;
            let spent = timer.end_turn();
            moves_played += 1;

            println!(
                "{:>3}. {:?} {} ({} ms, {} ms left)  {}",
                board.ply_count().saturating_sub(1) / 2 + 1,
                side,
                chess_move,
                spent.as_millis(),
                timer.remaining().as_millis(),
                board
            );

            if timer.is_flagged() {
                break GameResult::OutOfTime { loser: side };
            }
            if self.delay_ms > 0 {
                std::thread::sleep(Duration::from_millis(self.delay_ms));
            }
        };

        println!("{}", result.describe());
        Ok(())
    }
}
