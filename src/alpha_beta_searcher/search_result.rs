//! Search result records and score conventions.

/// Scores are always expressed from the perspective of the side to move at the
/// node that produced them.
pub type Score = f64;

/// Value of delivering checkmate at the root. Scaled by the distance from the
/// end of the game so that quicker mates score strictly higher.
pub const MATE_VALUE: Score = 1e6;

/// Ply count at which the mate scale bottoms out.
pub const MATE_PLY_HORIZON: u32 = 1000;

pub const DRAW_SCORE: Score = 0.0;

/// Score of a node whose side to move is checkmated at the given game ply.
///
/// Mates earlier in the game are more extreme, so from any fixed root the
/// fastest forced mate is preferred and the slowest forced loss is chosen.
#[inline]
pub fn mated_score(ply_count: u32) -> Score {
    -MATE_VALUE * MATE_PLY_HORIZON.saturating_sub(ply_count).max(1) as Score
}

#[inline]
pub fn is_mate_score(score: Score) -> bool {
    score.abs() >= MATE_VALUE
}

/// The result of searching one node.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<M> {
    /// Score from the perspective of the side to move at the producing node.
    pub score: Score,
    /// Remaining depth at the node where the principal line ended (a leaf,
    /// a terminal position, or a quiescence stand-pat).
    pub horizon: i32,
    /// Best move at this node. `None` at leaves and terminal positions.
    pub best_move: Option<M>,
    /// Principal line from this node, only reconstructed for reporting.
    pub line: Option<Vec<M>>,
}

impl<M: Clone> SearchResult<M> {
    /// A leaf scored without expansion at the given remaining depth.
    pub fn leaf(score: Score, depth: i32) -> Self {
        Self {
            score,
            horizon: depth,
            best_move: None,
            line: None,
        }
    }

    /// A checkmate or draw. Terminal positions consume no quiescence plies.
    pub fn terminal(score: Score, depth: i32) -> Self {
        Self::leaf(score, depth.max(0))
    }

    /// Placeholder for a node whose moves have not been examined yet.
    pub(crate) fn unresolved(depth: i32) -> Self {
        Self::leaf(Score::NEG_INFINITY, depth)
    }

    /// Lifts a child's result to its parent, which reached it by playing `game_move`.
    pub(crate) fn extend(self, game_move: M) -> Self {
        Self {
            score: -self.score,
            horizon: self.horizon,
            best_move: Some(game_move),
            line: None,
        }
    }

    /// Plies consumed from the base depth budget, as a non-positive remaining depth.
    pub fn core_depth(&self) -> i32 {
        self.horizon.min(0)
    }

    /// Quiescence plies searched beyond the base depth along the principal line.
    pub fn extra_depth(&self) -> u32 {
        (-self.horizon).max(0) as u32
    }

    pub fn is_mate(&self) -> bool {
        is_mate_score(self.score)
    }
}

/// What a node hands back to its parent.
///
/// A result produced under a cutoff is only a bound: the parent may compare it
/// against its window, but it must never be cached or trusted as exact.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<M> {
    Complete(SearchResult<M>),
    CutOff(SearchResult<M>),
}

impl<M> Outcome<M> {
    pub fn result(&self) -> &SearchResult<M> {
        match self {
            Outcome::Complete(result) | Outcome::CutOff(result) => result,
        }
    }

    pub fn into_result(self) -> SearchResult<M> {
        match self {
            Outcome::Complete(result) | Outcome::CutOff(result) => result,
        }
    }

    pub fn score(&self) -> Score {
        self.result().score
    }

    pub fn is_cut_off(&self) -> bool {
        matches!(self, Outcome::CutOff(_))
    }
}
