//! Turn-level control: how deep to search given the clock, and the driver
//! that runs the search for one move decision.

mod clock;
mod controller;
mod depth_policy;

pub use clock::{Clock, FixedClock, TurnTimer};
pub use controller::think;
pub use depth_policy::{
    DepthPolicy, SearchDepths, CRITICAL_TIME, DEEPENING_SAFETY_FACTOR, ENDGAME_PIECE_THRESHOLD,
    GENEROUS_TIME, MAX_DEEPENING_DEPTH, MAX_EXPLORATION_DEPTH, MAX_EXTRA_CAPTURE_DEPTH,
    OPENING_PLIES, SCARCE_TIME,
};
