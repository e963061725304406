use std::time::Duration;

use chess::ChessMove;
use log::info;
use thiserror::Error;

use crate::alpha_beta_searcher::{Score, SearchConfig, SearchContext, SearchError, SearchResult};
use crate::board::error::BoardError;
use crate::board::{ChessBoard, MoveMode};
use crate::chess_search::{ChessMoveGenerator, ChessMoveOrderer};
use crate::evaluate::ChessEvaluator;
use crate::time_control::{self, Clock, DepthPolicy};

use super::playout::{self, PlayoutConfig};

/// Weight of the history in the running average of evaluations per turn.
const EVALUATION_AVERAGE_WEIGHT: f64 = 9.0;

#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub depth_policy: DepthPolicy,
    pub evaluator: ChessEvaluator,
    /// Choose moves by playout instead of the plain search when set.
    pub playout: Option<PlayoutConfig>,
    pub track_principal_line: bool,
}

impl EngineConfig {
    pub fn with_depth_policy(mut self, depth_policy: DepthPolicy) -> Self {
        self.depth_policy = depth_policy;
        self
    }

    pub fn with_evaluator(mut self, evaluator: ChessEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_playout(mut self, playout: PlayoutConfig) -> Self {
        self.playout = Some(playout);
        self
    }

    pub fn with_principal_line(mut self, track_principal_line: bool) -> Self {
        self.track_principal_line = track_principal_line;
        self
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("board error: {0}")]
    Board(#[from] BoardError),
    #[error("search error: {0}")]
    Search(#[from] SearchError),
}

/// What the engine decided on its last turn.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub best_move: ChessMove,
    /// Score for the side that moved, from the search or the playout.
    pub score: Score,
    /// Principal line starting with `best_move`, when tracked.
    pub line: Option<Vec<ChessMove>>,
}

/// Search performance statistics
#[derive(Debug, Clone)]
pub struct SearchStats {
    pub positions_searched: usize,
    pub evaluations: usize,
    pub average_evaluations: f64,
    pub depth: u8,
    pub extra_capture_depth: u8,
    pub last_score: Option<Score>,
    pub last_search_duration: Option<Duration>,
}

/// Turns a position and a clock reading into a move.
pub struct Engine {
    config: EngineConfig,
    search_context: SearchContext<ChessMove>,
    move_generator: ChessMoveGenerator,
    move_orderer: ChessMoveOrderer,
    evaluations: usize,
    average_evaluations: f64,
    last_decision: Option<Decision>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let search_config =
            SearchConfig::default().with_principal_line(config.track_principal_line);
        Self {
            config,
            search_context: SearchContext::new(search_config),
            move_generator: ChessMoveGenerator,
            move_orderer: ChessMoveOrderer::new(ChessMoveGenerator),
            evaluations: 0,
            average_evaluations: 0.0,
            last_decision: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Chooses a move for the side to move. The board is returned unchanged.
    pub fn think<C: Clock>(
        &mut self,
        board: &mut ChessBoard,
        clock: &C,
    ) -> Result<ChessMove, EngineError> {
        let decision = match self.config.playout.clone() {
            Some(playout_config) => self.think_by_playout(board, clock, &playout_config)?,
            None => self.think_by_search(board, clock)?,
        };

        self.average_evaluations = (EVALUATION_AVERAGE_WEIGHT * self.average_evaluations
            + self.evaluations as f64)
            / (EVALUATION_AVERAGE_WEIGHT + 1.0);
        info!(
            "move {} score {:.3} after {} evaluations (average {:.0})",
            decision.best_move, decision.score, self.evaluations, self.average_evaluations
        );

        let best_move = decision.best_move;
        self.last_decision = Some(decision);
        Ok(best_move)
    }

    /// Thinks, then plays the chosen move on `board`.
    pub fn make_best_move<C: Clock>(
        &mut self,
        board: &mut ChessBoard,
        clock: &C,
    ) -> Result<ChessMove, EngineError> {
        let best_move = self.think(board, clock)?;
        board.make_move(best_move, MoveMode::Game)?;
        Ok(best_move)
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    pub fn average_evaluations(&self) -> f64 {
        self.average_evaluations
    }

    pub fn get_search_stats(&self) -> SearchStats {
        let config = self.search_context.config();
        SearchStats {
            positions_searched: self.search_context.searched_position_count(),
            evaluations: self.evaluations,
            average_evaluations: self.average_evaluations,
            depth: config.exploration_depth,
            extra_capture_depth: config.extra_capture_depth,
            last_score: self.last_decision.as_ref().map(|decision| decision.score),
            last_search_duration: self.search_context.last_search_duration(),
        }
    }

    fn think_by_search<C: Clock>(
        &mut self,
        board: &mut ChessBoard,
        clock: &C,
    ) -> Result<Decision, EngineError> {
        let result: SearchResult<ChessMove> = time_control::think(
            &mut self.search_context,
            board,
            &self.move_generator,
            &self.config.evaluator,
            &self.move_orderer,
            &self.config.depth_policy,
            clock,
        )?;
        self.evaluations = self.search_context.evaluation_count();

        let best_move = result.best_move.ok_or(SearchError::NoAvailableMoves)?;
        Ok(Decision {
            best_move,
            score: result.score,
            line: result.line,
        })
    }

    fn think_by_playout<C: Clock>(
        &mut self,
        board: &mut ChessBoard,
        clock: &C,
        playout_config: &PlayoutConfig,
    ) -> Result<Decision, EngineError> {
        self.search_context.begin_turn();
        let depths = self
            .config
            .depth_policy
            .decide(clock.remaining(), board.ply_count());
        self.search_context
            .set_depths(depths.exploration_depth, depths.extra_capture_depth);

        let choice = playout::select_move(
            &mut self.search_context,
            board,
            &self.move_generator,
            &self.config.evaluator,
            &self.move_orderer,
            playout_config,
        )?;
        self.evaluations = self.search_context.evaluation_count() + choice.evaluations;

        Ok(Decision {
            best_move: choice.best_move,
            score: choice.playout_score,
            line: None,
        })
    }
}
