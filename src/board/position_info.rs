use rustc_hash::FxHashMap;

/// Counts how often each position has occurred since the board was loaded,
/// for threefold repetition.
#[derive(Clone, Debug, Default)]
pub struct PositionInfo {
    position_count: FxHashMap<u64, u8>,
}

impl PositionInfo {
    pub fn new(initial_hash: u64) -> Self {
        let mut info = Self::default();
        info.count_position(initial_hash);
        info
    }

    pub fn count_position(&mut self, hash: u64) -> u8 {
        let count = self.position_count.entry(hash).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn uncount_position(&mut self, hash: u64) -> u8 {
        match self.position_count.get_mut(&hash) {
            Some(count) if *count > 1 => {
                *count -= 1;
                *count
            }
            Some(_) => {
                self.position_count.remove(&hash);
                0
            }
            None => 0,
        }
    }

    pub fn occurrences(&self, hash: u64) -> u8 {
        self.position_count.get(&hash).copied().unwrap_or(0)
    }
}
