use std::time::Instant;

use log::{debug, info};
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::alpha_beta_searcher::{
    negamax_search, Evaluator, GameState, MoveGenerator, MoveOrderer, SearchContext, SearchError,
    SearchResult,
};

use super::clock::Clock;
use super::depth_policy::{DepthPolicy, SearchDepths};

/// Decides one turn: picks depths from the clock, searches, then keeps
/// searching one ply deeper while the endgame budget allows.
///
/// The position cache and counters are reset once at the start of the turn
/// and shared by every deepening iteration.
///
/// Time spent on the turn is the larger of what the clock reports and the
/// wall time measured here, so a clock that does not advance still bounds
/// deepening.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn think<S, G, E, O, C>(
    context: &mut SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    policy: &DepthPolicy,
    clock: &C,
) -> Result<SearchResult<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
    C: Clock,
{
    let turn_started = Instant::now();
    context.begin_turn();

    let mut depths = policy.decide(clock.remaining(), state.ply_count());
    let mut result = search_at(context, state, move_generator, evaluator, move_orderer, depths)?;

    while !result.is_mate()
        && policy.should_deepen(
            depths,
            state.piece_count(),
            clock.remaining(),
            clock.elapsed_this_turn().max(turn_started.elapsed()),
        )
    {
        depths = depths.deepened();
        debug!(
            "endgame deepening to {}+{}",
            depths.exploration_depth, depths.extra_capture_depth
        );
        result = search_at(context, state, move_generator, evaluator, move_orderer, depths)?;
    }

    info!(
        "decided at depth {}+{}: score {:.3}, {} nodes, {} evaluations",
        depths.exploration_depth,
        depths.extra_capture_depth,
        result.score,
        context.searched_position_count(),
        context.evaluation_count()
    );
    Ok(result)
}

fn search_at<S, G, E, O>(
    context: &mut SearchContext<G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    depths: SearchDepths,
) -> Result<SearchResult<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    context.set_depths(depths.exploration_depth, depths.extra_capture_depth);
    negamax_search(context, state, move_generator, evaluator, move_orderer)
}
