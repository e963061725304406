//! Turn-scoped position cache for exact search results.

use log::trace;
use rustc_hash::FxHashMap;

use super::search_result::{Score, SearchResult};

/// Combines a position hash with the game ply so that the same position reached
/// after a different number of half-moves never shares an entry. Mate scores
/// depend on the ply, and repetitions are only meaningful along one path.
#[inline]
pub fn fingerprint(position_hash: u64, ply_count: u32) -> u64 {
    // Shifted so the ply never cancels a side-to-move bit kept in bit 0.
    position_hash ^ ((ply_count as u64) << 1)
}

/// The alpha-beta window in effect at a node, from that node's perspective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub lower: Score,
    pub upper: Score,
}

impl Window {
    pub const FULL: Window = Window {
        lower: Score::NEG_INFINITY,
        upper: Score::INFINITY,
    };

    pub fn new(lower: Score, upper: Score) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn contains(&self, score: Score) -> bool {
        self.lower <= score && score <= self.upper
    }

    /// The child's window in negamax: bounds swap and change sign.
    #[inline]
    pub fn negated(&self) -> Self {
        Self {
            lower: -self.upper,
            upper: -self.lower,
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Window::FULL
    }
}

#[derive(Clone, Debug)]
pub struct CacheEntry<M> {
    pub result: SearchResult<M>,
    pub depth: i32,
}

/// Maps fingerprints to results that were exact when computed.
///
/// There is no eviction: the cache lives for one move decision and is rebuilt
/// from scratch at the start of the next one.
pub struct PositionCache<M> {
    table: FxHashMap<u64, CacheEntry<M>>,
    hits: usize,
    depth_rejected: usize,
    stores: usize,
    rejected_stores: usize,
}

impl<M> Default for PositionCache<M> {
    fn default() -> Self {
        Self {
            table: FxHashMap::default(),
            hits: 0,
            depth_rejected: 0,
            stores: 0,
            rejected_stores: 0,
        }
    }
}

impl<M: Clone> PositionCache<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored result if it was searched at least `depth` deep.
    /// A shallower entry is a miss; it will be replaced by the next `store`.
    pub fn lookup(&mut self, fingerprint: u64, depth: i32) -> Option<&SearchResult<M>> {
        match self.table.get(&fingerprint) {
            Some(entry) if entry.depth >= depth => {
                self.hits += 1;
                Some(&entry.result)
            }
            Some(_) => {
                self.depth_rejected += 1;
                None
            }
            None => None,
        }
    }

    /// Returns whatever is stored for the fingerprint, regardless of depth.
    pub fn peek(&self, fingerprint: u64) -> Option<&CacheEntry<M>> {
        self.table.get(&fingerprint)
    }

    /// Stores `result` only if its score lies within `window`; anything outside
    /// is a bound rather than an exact value. Returns whether it was stored.
    pub fn store(
        &mut self,
        fingerprint: u64,
        result: SearchResult<M>,
        depth: i32,
        window: Window,
    ) -> bool {
        if !window.contains(result.score) {
            self.rejected_stores += 1;
            trace!(
                "cache reject {:016x}: {} outside [{}, {}]",
                fingerprint,
                result.score,
                window.lower,
                window.upper
            );
            return false;
        }

        self.stores += 1;
        self.table.insert(fingerprint, CacheEntry { result, depth });
        true
    }

    pub fn contains(&self, fingerprint: u64) -> bool {
        self.table.contains_key(&fingerprint)
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn depth_rejected(&self) -> usize {
        self.depth_rejected
    }

    pub fn stores(&self) -> usize {
        self.stores
    }

    pub fn rejected_stores(&self) -> usize {
        self.rejected_stores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(score: Score) -> SearchResult<u8> {
        SearchResult {
            score,
            horizon: 0,
            best_move: Some(1),
            line: None,
        }
    }

    #[test]
    fn test_lookup_requires_sufficient_depth() {
        let mut cache = PositionCache::new();
        assert!(cache.store(42, exact(0.5), 3, Window::FULL));

        assert_eq!(cache.lookup(42, 3).map(|r| r.score), Some(0.5));
        assert_eq!(cache.lookup(42, 2).map(|r| r.score), Some(0.5));
        assert!(cache.lookup(42, 4).is_none());
        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.depth_rejected(), 1);
    }

    #[test]
    fn test_shallow_entry_is_overwritten() {
        let mut cache = PositionCache::new();
        cache.store(42, exact(0.5), 1, Window::FULL);
        cache.store(42, exact(-0.25), 3, Window::FULL);

        assert_eq!(cache.lookup(42, 3).map(|r| r.score), Some(-0.25));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_store_rejects_scores_outside_window() {
        let mut cache = PositionCache::new();

        assert!(!cache.store(7, exact(2.0), 2, Window::new(-1.0, 1.0)));
        assert!(!cache.store(7, exact(-2.0), 2, Window::new(-1.0, 1.0)));
        assert!(!cache.contains(7));
        assert_eq!(cache.rejected_stores(), 2);

        assert!(cache.store(7, exact(1.0), 2, Window::new(-1.0, 1.0)));
        assert!(cache.contains(7));
        assert_eq!(cache.stores(), 1);
    }

    #[test]
    fn test_fingerprint_separates_plies() {
        let hash = 0xDEAD_BEEF_u64;
        assert_ne!(fingerprint(hash, 10), fingerprint(hash, 11));
        assert_ne!(fingerprint(hash, 10), fingerprint(hash, 12));
        assert_eq!(fingerprint(hash, 10), fingerprint(hash, 10));
    }

    #[test]
    fn test_negated_window_swaps_bounds() {
        let window = Window::new(-0.5, 2.0);
        assert_eq!(window.negated(), Window::new(-2.0, 0.5));
        assert_eq!(Window::FULL.negated(), Window::FULL);
    }
}
