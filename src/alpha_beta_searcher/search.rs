//! Negamax search with alpha-beta pruning and a quiescence extension.
//!
//! # Core Algorithm
//!
//! Every node scores the position from the perspective of its own side to move.
//! A child's score is negated on the way up, and the child searches the parent's
//! window mirrored: `[-upper, -lower]`. When the best score at a node pushes the
//! lower cutoff above the upper cutoff, the remaining moves cannot matter to the
//! parent and expansion stops.
//!
//! ## Quiescence
//! Once the base depth is used up (`depth <= 0`) the node only follows forcing
//! moves: captures, and moves that leave the opponent in check. The static
//! evaluation stands in as the initial best score, so a quiet position simply
//! returns it. Depth keeps decreasing below zero and the node is scored
//! statically once it reaches `-extra_capture_depth`, which bounds every
//! capture sequence.
//!
//! ## Position Cache
//! Only exact results are cached: a node that cut off hands back an
//! [`Outcome::CutOff`] which is never stored, and a completed node is only
//! stored when its score lies inside the window it was searched with. Cached
//! results are reused verbatim when they were searched at least as deep as
//! requested.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::search_result::{mated_score, Outcome, Score, SearchResult, DRAW_SCORE};
use super::transposition_table::{fingerprint, PositionCache, Window};
use super::{Evaluator, GameMove, GameState, MoveCollection, MoveGenerator, MoveOrderer};

/// Upper bound on the length of a reconstructed principal line. Cache entries
/// can form cycles through repeated positions, so the walk needs a stop.
pub const MAX_LINE_LENGTH: usize = 64;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("move application failed during search: {reason}")]
    MoveApplication { reason: String },
}

/// Depth parameters and switches for one search invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Base negamax depth. Every move is searched until this is used up.
    pub exploration_depth: u8,
    /// How many plies of forcing moves are followed past the base depth.
    pub extra_capture_depth: u8,
    pub use_cache: bool,
    /// Reconstruct the principal line from the cache after the search.
    pub track_principal_line: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_depth: 3,
            extra_capture_depth: 2,
            use_cache: true,
            track_principal_line: false,
        }
    }
}

impl SearchConfig {
    pub fn new(exploration_depth: u8, extra_capture_depth: u8) -> Self {
        Self {
            exploration_depth,
            extra_capture_depth,
            ..Self::default()
        }
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn with_principal_line(mut self, track_principal_line: bool) -> Self {
        self.track_principal_line = track_principal_line;
        self
    }

    /// Depth at which a node stops searching and is scored statically.
    fn depth_floor(&self) -> i32 {
        -(self.extra_capture_depth as i32)
    }
}

/// Counters collected over one turn. Purely diagnostic.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    pub nodes: usize,
    pub quiescence_nodes: usize,
    /// Leaf evaluations performed by the static evaluator.
    pub evaluations: usize,
    pub cutoffs: usize,
    pub searches: usize,
    pub last_score: Option<Score>,
    pub last_duration: Option<Duration>,
}

impl SearchStats {
    fn record_result(&mut self, score: Score, duration: Duration) {
        self.searches += 1;
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// Everything a search owns for the duration of one turn: its configuration,
/// counters and the position cache.
pub struct SearchContext<M> {
    config: SearchConfig,
    stats: SearchStats,
    cache: PositionCache<M>,
}

impl<M: Clone> Default for SearchContext<M> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<M: Clone> SearchContext<M> {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
            cache: PositionCache::new(),
        }
    }

    /// Starts a new move decision. The cache is rebuilt rather than cleared so
    /// nothing computed for an earlier turn can leak into this one.
    pub fn begin_turn(&mut self) {
        self.cache = PositionCache::new();
        self.stats = SearchStats::default();
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_depths(&mut self, exploration_depth: u8, extra_capture_depth: u8) {
        self.config.exploration_depth = exploration_depth;
        self.config.extra_capture_depth = extra_capture_depth;
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn cache(&self) -> &PositionCache<M> {
        &self.cache
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.nodes
    }

    pub fn evaluation_count(&self) -> usize {
        self.stats.evaluations
    }

    pub fn last_score(&self) -> Option<Score> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }

    fn evaluate<S, E>(&mut self, evaluator: &E, state: &S) -> Score
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.evaluations += 1;
        evaluator.evaluate(state)
    }
}

/// Applies a move, runs `f` on the resulting state, then undoes the move.
///
/// The undo runs whether or not `f` succeeded, so an early return from inside
/// the closure can never leave the move on the board. If both fail, the
/// closure's error is returned.
pub fn with_move_applied<S, M, F, R>(game_move: &M, state: &mut S, f: F) -> Result<R, SearchError>
where
    S: GameState,
    M: GameMove<State = S>,
    F: FnOnce(&mut S) -> Result<R, SearchError>,
{
    game_move
        .apply(state)
        .map_err(|err| SearchError::MoveApplication {
            reason: format!("apply {:?}: {:?}", game_move, err),
        })?;

    let result = f(state);
    let undone = game_move
        .undo(state)
        .map_err(|err| SearchError::MoveApplication {
            reason: format!("undo {:?}: {:?}", game_move, err),
        });

    let value = result?;
    undone?;
    Ok(value)
}

/// Searches the current position and returns the best move with its score.
///
/// This is the top-level entry point. It always expands every legal root move,
/// so a position the rules would already call drawn still yields a move, and
/// an exploration depth of zero is treated as one.
///
/// # Returns
///
/// - `Ok(result)` - `result.best_move` is always `Some`
/// - `Err(SearchError::NoAvailableMoves)` - If the side to move has no legal moves
///
/// # Examples
///
/// ```ignore
/// let mut context = SearchContext::new(SearchConfig::new(3, 2));
/// let result = negamax_search(
///     &mut context,
///     &mut board,
///     &move_generator,
///     &evaluator,
///     &move_orderer,
/// )?;
/// ```
#[must_use = "search returns the best move found"]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn negamax_search<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
) -> Result<SearchResult<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let mut depth = context.config.exploration_depth as i32;
    if depth < 1 {
        warn!("exploration depth {} is too low, searching at depth 1", depth);
        depth = 1;
    }

    let start = Instant::now();
    let mut candidates = move_generator.generate_moves(state);
    if candidates.is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }

    let root = fingerprint(state.position_hash(), state.ply_count());
    let cached = if context.config.use_cache {
        context.cache.lookup(root, depth).cloned()
    } else {
        None
    };

    let mut best = match cached {
        Some(result)
            if result
                .best_move
                .as_ref()
                .map_or(false, |mv| candidates.as_ref().contains(mv)) =>
        {
            debug!("root served from position cache at depth {}", depth);
            result
        }
        _ => {
            move_orderer.order_moves(candidates.as_mut(), state)?;
            search_root(
                context,
                state,
                move_generator,
                evaluator,
                move_orderer,
                candidates.as_ref(),
                depth,
                root,
            )?
        }
    };

    if context.config.track_principal_line {
        if let Some(first) = best.best_move.clone() {
            let mut line = Vec::new();
            extend_principal_line(context, state, move_generator, &first, &mut line)?;
            best.line = Some(line);
        }
    }

    context.stats.record_result(best.score, start.elapsed());
    debug!(
        "depth {}+{}: best {:?} score {:.4} nodes {} (quiescence {}) evals {} cache hits {} size {}",
        depth,
        context.config.extra_capture_depth,
        best.best_move,
        best.score,
        context.stats.nodes,
        context.stats.quiescence_nodes,
        context.stats.evaluations,
        context.cache.hits(),
        context.cache.size()
    );

    Ok(best)
}

#[allow(clippy::too_many_arguments)]
fn search_root<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    candidates: &[G::Move],
    depth: i32,
    root: u64,
) -> Result<SearchResult<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    context.stats.nodes += 1;

    let mut window = Window::FULL;
    let mut best = SearchResult::unresolved(depth);

    for candidate in candidates {
        let child = with_move_applied(candidate, state, |state| {
            negamax(
                context,
                state,
                move_generator,
                evaluator,
                move_orderer,
                depth - 1,
                window.negated(),
            )
        })?;

        let score = -child.score();
        trace!("root move {:?} scores {:.4}", candidate, score);
        if score > best.score {
            best = child.into_result().extend(candidate.clone());
            window.lower = window.lower.max(score);
        }
    }

    if context.config.use_cache {
        context.cache.store(root, best.clone(), depth, window);
    }

    Ok(best)
}

/// Searches one node to `depth` within `window` and reports whether the result
/// is exact or was cut off.
///
/// `depth` may be zero or negative, in which case only forcing moves are
/// followed until the quiescence floor is reached.
#[allow(clippy::too_many_arguments)]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn negamax<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    depth: i32,
    mut window: Window,
) -> Result<Outcome<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    context.stats.nodes += 1;
    if depth <= 0 {
        context.stats.quiescence_nodes += 1;
    }

    let node = fingerprint(state.position_hash(), state.ply_count());
    if context.config.use_cache {
        if let Some(cached) = context.cache.lookup(node, depth) {
            return Ok(Outcome::Complete(cached.clone()));
        }
    }

    if state.is_checkmate() {
        let score = mated_score(state.ply_count());
        return Ok(Outcome::Complete(SearchResult::terminal(score, depth)));
    }
    if state.is_draw() {
        return Ok(Outcome::Complete(SearchResult::terminal(DRAW_SCORE, depth)));
    }

    if depth <= context.config.depth_floor() {
        let score = context.evaluate(evaluator, state);
        return Ok(Outcome::Complete(SearchResult::leaf(score, depth)));
    }

    let mut best = if depth <= 0 {
        // Stand pat: the side to move may decline every capture.
        let stand_pat = context.evaluate(evaluator, state);
        window.lower = window.lower.max(stand_pat);
        let result = SearchResult::leaf(stand_pat, depth);
        if window.lower > window.upper {
            context.stats.cutoffs += 1;
            return Ok(Outcome::CutOff(result));
        }
        result
    } else {
        SearchResult::unresolved(depth)
    };

    let mut moves = move_generator.generate_moves(state);
    if depth > 0 {
        move_orderer.order_moves(moves.as_mut(), state)?;
    }

    for candidate in moves.as_ref() {
        let is_capture = depth <= 0 && candidate.is_capture(state);
        let child = with_move_applied(candidate, state, |state| {
            if depth <= 0 && !is_capture && !state.is_in_check() {
                return Ok(None);
            }
            negamax(
                context,
                state,
                move_generator,
                evaluator,
                move_orderer,
                depth - 1,
                window.negated(),
            )
            .map(Some)
        })?;

        let child = match child {
            Some(child) => child,
            None => continue,
        };

        let score = -child.score();
        if score > best.score {
            best = child.into_result().extend(candidate.clone());
            window.lower = window.lower.max(score);
            if window.lower > window.upper {
                context.stats.cutoffs += 1;
                return Ok(Outcome::CutOff(best));
            }
        }
    }

    if best.score == Score::NEG_INFINITY {
        // No moves at all without a terminal verdict from the rules.
        let score = context.evaluate(evaluator, state);
        best = SearchResult::leaf(score, depth);
    }

    if context.config.use_cache {
        context.cache.store(node, best.clone(), depth, window);
    }

    Ok(Outcome::Complete(best))
}

/// Walks the best moves stored in the position cache, starting with `first`.
/// Each step is checked against the legal moves of the position it is played
/// from, and the walk ends at the first cache miss.
fn extend_principal_line<S, G>(
    context: &SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    game_move: &G::Move,
    line: &mut Vec<G::Move>,
) -> Result<(), SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    line.push(game_move.clone());
    if line.len() >= MAX_LINE_LENGTH {
        return Ok(());
    }

    with_move_applied(game_move, state, |state| {
        let node = fingerprint(state.position_hash(), state.ply_count());
        let next = context
            .cache
            .peek(node)
            .and_then(|entry| entry.result.best_move.clone());

        match next {
            Some(next) if move_generator.generate_moves(state).as_ref().contains(&next) => {
                extend_principal_line(context, state, move_generator, &next, line)
            }
            _ => Ok(()),
        }
    })
}
