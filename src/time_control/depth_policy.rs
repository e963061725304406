//! Chooses search depths from the time left on the clock.
//!
//! Depths are decided once per turn, before the search starts. Nothing
//! interrupts a search in progress, so the only lever is to search shallower
//! when the clock runs low.

use std::time::Duration;

pub const MAX_EXPLORATION_DEPTH: u8 = 3;
pub const MAX_EXTRA_CAPTURE_DEPTH: u8 = 3;
pub const GENEROUS_TIME: Duration = Duration::from_secs(10);
pub const SCARCE_TIME: Duration = Duration::from_secs(5);
pub const CRITICAL_TIME: Duration = Duration::from_secs(1);
pub const OPENING_PLIES: u32 = 10;
pub const ENDGAME_PIECE_THRESHOLD: u32 = 10;
pub const DEEPENING_SAFETY_FACTOR: u32 = 50;
pub const MAX_DEEPENING_DEPTH: u8 = 12;

/// Base and quiescence depth for one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchDepths {
    pub exploration_depth: u8,
    pub extra_capture_depth: u8,
}

impl SearchDepths {
    pub fn new(exploration_depth: u8, extra_capture_depth: u8) -> Self {
        Self {
            exploration_depth,
            extra_capture_depth,
        }
    }

    /// Plies to the deepest possible leaf.
    pub fn horizon(&self) -> u32 {
        u32::from(self.exploration_depth) + u32::from(self.extra_capture_depth)
    }

    /// One more ply of each, as used by endgame deepening.
    pub fn deepened(&self) -> Self {
        Self::new(
            self.exploration_depth.saturating_add(1),
            self.extra_capture_depth.saturating_add(1),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthPolicy {
    pub max_exploration_depth: u8,
    pub max_extra_capture_depth: u8,
    /// Above this much remaining time the full depth is affordable.
    pub generous_time: Duration,
    /// Below this the quiescence floor shrinks.
    pub scarce_time: Duration,
    /// Below this both depths shrink.
    pub critical_time: Duration,
    /// Plies searched one shallower while time is generous.
    pub opening_plies: u32,
    /// Endgame deepening only runs below this many pieces on the board.
    pub endgame_piece_threshold: u32,
    /// Deepening continues while remaining time exceeds this multiple of the
    /// time already spent on the turn.
    pub deepening_safety_factor: u32,
    /// Exploration depth at which deepening stops regardless of time.
    pub max_deepening_depth: u8,
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self {
            max_exploration_depth: MAX_EXPLORATION_DEPTH,
            max_extra_capture_depth: MAX_EXTRA_CAPTURE_DEPTH,
            generous_time: GENEROUS_TIME,
            scarce_time: SCARCE_TIME,
            critical_time: CRITICAL_TIME,
            opening_plies: OPENING_PLIES,
            endgame_piece_threshold: ENDGAME_PIECE_THRESHOLD,
            deepening_safety_factor: DEEPENING_SAFETY_FACTOR,
            max_deepening_depth: MAX_DEEPENING_DEPTH,
        }
    }
}

impl DepthPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depths(mut self, exploration_depth: u8, extra_capture_depth: u8) -> Self {
        self.max_exploration_depth = exploration_depth;
        self.max_extra_capture_depth = extra_capture_depth;
        self
    }

    pub fn with_time_thresholds(
        mut self,
        generous_time: Duration,
        scarce_time: Duration,
        critical_time: Duration,
    ) -> Self {
        self.generous_time = generous_time;
        self.scarce_time = scarce_time;
        self.critical_time = critical_time;
        self
    }

    pub fn with_opening_plies(mut self, opening_plies: u32) -> Self {
        self.opening_plies = opening_plies;
        self
    }

    pub fn with_endgame_piece_threshold(mut self, threshold: u32) -> Self {
        self.endgame_piece_threshold = threshold;
        self
    }

    pub fn with_deepening_safety_factor(mut self, factor: u32) -> Self {
        self.deepening_safety_factor = factor;
        self
    }

    pub fn with_max_deepening_depth(mut self, depth: u8) -> Self {
        self.max_deepening_depth = depth;
        self
    }

    /// Depths for a search starting at `ply_count` with `remaining` on the clock.
    ///
    /// The returned depths always sum to an even number of plies, so the
    /// deepest quiescence leaf is scored for the same side as the root.
    pub fn decide(&self, remaining: Duration, ply_count: u32) -> SearchDepths {
        let max_exploration = self.max_exploration_depth;
        let max_extra = self.max_extra_capture_depth;
        let mut exploration = max_exploration;
        let mut extra = max_extra;

        if remaining > self.generous_time {
            if ply_count < self.opening_plies {
                exploration = max_exploration.saturating_sub(1);
            }
        } else {
            exploration = max_exploration.saturating_sub(1);
            if remaining < self.critical_time {
                exploration = max_exploration.saturating_sub(2);
                extra = max_extra.saturating_sub(2);
            } else if remaining < self.scarce_time {
                extra = max_extra.saturating_sub(2);
            }
        }

        let exploration = exploration.min(max_exploration);
        let extra = if extra == 0 {
            exploration % 2
        } else {
            let extra = extra.min(max_extra);
            extra - ((u16::from(exploration) + u16::from(extra)) % 2) as u8
        };

        SearchDepths::new(exploration, extra)
    }

    /// Whether another, one ply deeper, search fits the endgame budget.
    pub fn should_deepen(
        &self,
        current: SearchDepths,
        piece_count: u32,
        remaining: Duration,
        elapsed_this_turn: Duration,
    ) -> bool {
        piece_count < self.endgame_piece_threshold
            && current.exploration_depth < self.max_deepening_depth
            && remaining > elapsed_this_turn.saturating_mul(self.deepening_safety_factor)
    }
}
