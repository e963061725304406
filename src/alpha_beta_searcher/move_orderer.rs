//! Look-ahead move ordering for improved alpha-beta pruning.

use std::cmp::Reverse;

use super::search::{with_move_applied, SearchError};
use super::{GameMove, GameState, MoveCollection, MoveGenerator, MoveOrderer};

pub const CHECKMATE_PRIORITY: i32 = 1000;
pub const CHECK_PRIORITY: i32 = 500;
pub const CAPTURE_PRIORITY: i32 = 250;

/// Orders moves by playing each one and looking at the reply position.
///
/// A move scores higher the fewer replies it leaves the opponent, with flat
/// bonuses for checkmate, check and captures:
/// `-(opponent moves) + 1000·mate + 500·check + 250·capture`.
/// Moves with equal priority keep their generation order.
#[derive(Clone, Default, Debug)]
pub struct PriorityMoveOrderer<G> {
    move_generator: G,
}

impl<G> PriorityMoveOrderer<G> {
    pub fn new(move_generator: G) -> Self {
        Self { move_generator }
    }

    /// Priority of a single move. Costs one apply/undo pair and one move
    /// generation for the opponent.
    pub fn priority<S>(&self, game_move: &G::Move, state: &mut S) -> Result<i32, SearchError>
    where
        S: GameState,
        G: MoveGenerator<S>,
    {
        let capture_bonus = if game_move.is_capture(state) {
            CAPTURE_PRIORITY
        } else {
            0
        };

        with_move_applied(game_move, state, |state| {
            let replies = self.move_generator.generate_moves(state).len() as i32;
            let mut priority = capture_bonus - replies;
            if state.is_checkmate() {
                priority += CHECKMATE_PRIORITY;
            }
            if state.is_in_check() {
                priority += CHECK_PRIORITY;
            }
            Ok(priority)
        })
    }
}

impl<S, G> MoveOrderer<S, G::Move> for PriorityMoveOrderer<G>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    fn order_moves(&self, moves: &mut [G::Move], state: &mut S) -> Result<(), SearchError> {
        if moves.len() < 2 {
            return Ok(());
        }

        let mut prioritized = Vec::with_capacity(moves.len());
        for game_move in moves.iter() {
            prioritized.push((self.priority(game_move, state)?, game_move.clone()));
        }

        // sort_by_key is stable, so ties stay in generation order
        prioritized.sort_by_key(|(priority, _)| Reverse(*priority));

        for (slot, (_, game_move)) in moves.iter_mut().zip(prioritized) {
            *slot = game_move;
        }
        Ok(())
    }
}
