//! Move selection by short self-play.
//!
//! The regular search ranks root moves by their minimax score. Here that score
//! only shortlists moves: everything within `strategic_discrepancy` of the
//! best survives, and the survivors are re-ranked by playing a few plies
//! ahead with a shallow search and scoring where the game ends up.

use log::debug;

use crate::alpha_beta_searcher::{
    negamax, with_move_applied, Evaluator, GameState, MoveCollection, MoveGenerator, MoveOrderer,
    Score, SearchConfig, SearchContext, SearchError, Window,
};

pub const STRATEGIC_DISCREPANCY: Score = 0.5;
pub const VISION_DEPTH: u8 = 2;
pub const PLAY_DEPTH: u8 = 2;
pub const PLAYOUT_EXTRA_CAPTURE_DEPTH: u8 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayoutConfig {
    /// How far below the best search score a move may fall and still be played out.
    pub strategic_discrepancy: Score,
    /// Depth of the search that picks each move of a playout.
    pub vision_depth: u8,
    /// Plies played after the candidate move before the position is scored.
    pub play_depth: u8,
    pub extra_capture_depth: u8,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            strategic_discrepancy: STRATEGIC_DISCREPANCY,
            vision_depth: VISION_DEPTH,
            play_depth: PLAY_DEPTH,
            extra_capture_depth: PLAYOUT_EXTRA_CAPTURE_DEPTH,
        }
    }
}

impl PlayoutConfig {
    pub fn with_strategic_discrepancy(mut self, discrepancy: Score) -> Self {
        self.strategic_discrepancy = discrepancy;
        self
    }

    pub fn with_vision_depth(mut self, depth: u8) -> Self {
        self.vision_depth = depth;
        self
    }

    pub fn with_play_depth(mut self, plies: u8) -> Self {
        self.play_depth = plies;
        self
    }

    pub fn with_extra_capture_depth(mut self, depth: u8) -> Self {
        self.extra_capture_depth = depth;
        self
    }
}

/// The move picked by a playout and how it compared to the alternatives.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayoutChoice<M> {
    pub best_move: M,
    /// Score of the position reached by playing the move out.
    pub playout_score: Score,
    /// Search score of the chosen move.
    pub search_score: Score,
    /// Best search score among all root moves.
    pub best_search_score: Score,
    /// Moves that were close enough to the best to be played out.
    pub candidates: usize,
    /// Static evaluations made by the playouts.
    pub evaluations: usize,
}

/// Shortlists root moves with the search in `context`, then re-ranks the
/// shortlist by playout.
///
/// `context` must already carry the depths for this turn. The playouts use
/// their own context so that their shallower results never mix with the
/// shortlist's cache entries.
#[allow(clippy::too_many_arguments)]
pub fn select_move<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    config: &PlayoutConfig,
) -> Result<PlayoutChoice<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let moves = move_generator.generate_moves(state);
    if moves.is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }

    let discrepancy = config.strategic_discrepancy;
    let child_depth = i32::from(context.config().exploration_depth).max(1) - 1;
    let mut best_search_score = Score::NEG_INFINITY;
    let mut scored = Vec::with_capacity(moves.as_ref().len());

    for candidate in moves.as_ref() {
        // Widened so moves just short of the best still get an exact score.
        let window = Window::new(Score::NEG_INFINITY, -(best_search_score - discrepancy));
        let outcome = with_move_applied(candidate, state, |state| {
            negamax(
                context,
                state,
                move_generator,
                evaluator,
                move_orderer,
                child_depth,
                window,
            )
        })?;
        let score = -outcome.score();
        best_search_score = best_search_score.max(score);
        scored.push((candidate.clone(), score));
    }

    let mut playout_context = SearchContext::new(SearchConfig::new(
        config.vision_depth,
        config.extra_capture_depth,
    ));
    let mut choice: Option<PlayoutChoice<G::Move>> = None;
    let mut candidates = 0;

    for (candidate, search_score) in scored {
        if search_score < best_search_score - discrepancy {
            continue;
        }
        candidates += 1;

        let playout_score = -with_move_applied(&candidate, state, |state| {
            evaluate_by_playing(
                &mut playout_context,
                state,
                move_generator,
                evaluator,
                move_orderer,
                config.vision_depth,
                config.play_depth,
            )
        })?;

        if choice
            .as_ref()
            .map_or(true, |best| playout_score > best.playout_score)
        {
            choice = Some(PlayoutChoice {
                best_move: candidate,
                playout_score,
                search_score,
                best_search_score,
                candidates: 0,
                evaluations: 0,
            });
        }
    }

    let mut choice = choice.ok_or(SearchError::NoAvailableMoves)?;
    choice.candidates = candidates;
    choice.evaluations = playout_context.evaluation_count();
    debug!(
        "playout {:.2} ({:.2} < {:.2}) among {} moves",
        choice.playout_score, choice.search_score, choice.best_search_score, choice.candidates
    );
    Ok(choice)
}

/// Plays `plies` moves from the current position, each chosen by a search at
/// `vision_depth`, and scores the final position for the side to move now.
///
/// A game that ends early is scored where it ended.
pub fn evaluate_by_playing<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    vision_depth: u8,
    plies: u8,
) -> Result<Score, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let outcome = negamax(
        context,
        state,
        move_generator,
        evaluator,
        move_orderer,
        i32::from(vision_depth),
        Window::FULL,
    )?;
    let result = outcome.into_result();

    let best_move = match result.best_move {
        Some(best_move) if plies > 0 => best_move,
        _ => return Ok(result.score),
    };

    let score = with_move_applied(&best_move, state, |state| {
        evaluate_by_playing(
            context,
            state,
            move_generator,
            evaluator,
            move_orderer,
            vision_depth,
            plies - 1,
        )
    })?;
    Ok(-score)
}
