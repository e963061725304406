use std::time::{Duration, Instant};

/// What the depth policy needs to know about the game clock.
pub trait Clock {
    /// Time left on the game budget, including the current turn's consumption.
    fn remaining(&self) -> Duration;
    /// Time spent since the current turn started.
    fn elapsed_this_turn(&self) -> Duration;
}

/// Wall clock with a fixed budget for the whole game.
#[derive(Clone, Debug)]
pub struct TurnTimer {
    budget: Duration,
    used: Duration,
    turn_started: Option<Instant>,
}

impl TurnTimer {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            used: Duration::ZERO,
            turn_started: None,
        }
    }

    pub fn start_turn(&mut self) {
        self.turn_started = Some(Instant::now());
    }

    /// Charges the time spent this turn against the budget and returns it.
    pub fn end_turn(&mut self) -> Duration {
        let elapsed = self.elapsed_this_turn();
        self.used += elapsed;
        self.turn_started = None;
        elapsed
    }

    pub fn is_flagged(&self) -> bool {
        self.remaining() == Duration::ZERO
    }
}

impl Clock for TurnTimer {
    fn remaining(&self) -> Duration {
        self.budget
            .saturating_sub(self.used)
            .saturating_sub(self.elapsed_this_turn())
    }

    fn elapsed_this_turn(&self) -> Duration {
        self.turn_started
            .map(|started| started.elapsed())
            .unwrap_or(Duration::ZERO)
    }
}

/// A frozen clock reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock {
    pub remaining: Duration,
    pub elapsed_this_turn: Duration,
}

impl FixedClock {
    pub fn new(remaining: Duration) -> Self {
        Self {
            remaining,
            elapsed_this_turn: Duration::ZERO,
        }
    }

    pub fn from_millis(remaining_ms: u64) -> Self {
        Self::new(Duration::from_millis(remaining_ms))
    }

    pub fn with_elapsed(mut self, elapsed_this_turn: Duration) -> Self {
        self.elapsed_this_turn = elapsed_this_turn;
        self
    }
}

impl Clock for FixedClock {
    fn remaining(&self) -> Duration {
        self.remaining
    }

    fn elapsed_this_turn(&self) -> Duration {
        self.elapsed_this_turn
    }
}
