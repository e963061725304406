/// Half-moves since the last capture or pawn move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfmoveClock(u16);

/// Half-moves without progress after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u16 = 100;

impl HalfmoveClock {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// The clock after one more half-move; captures and pawn moves reset it.
    pub fn advance(self, resets: bool) -> Self {
        if resets {
            Self(0)
        } else {
            Self(self.0.saturating_add(1))
        }
    }

    pub fn reaches_fifty_move_limit(self) -> bool {
        self.0 >= FIFTY_MOVE_LIMIT
    }
}

impl From<u16> for HalfmoveClock {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
