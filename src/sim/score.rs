//! Current and best score
//!
//! Best score is persisted through a [`KeyValueStore`] every time it rises.
//! Storage failures never reach the tracker; a missing or corrupt value
//! starts best at 0.

use serde::{Deserialize, Serialize};

use crate::consts::BEST_SCORE_KEY;
use crate::persistence::{self, KeyValueStore};

/// Result of [`ScoreTracker::add_score`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub current: u32,
    pub new_best: bool,
}

/// End-of-run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u32,
    pub best: u32,
    pub new_best: bool,
}

pub struct ScoreTracker {
    current: u32,
    best: u32,
    /// Sticky for the rest of the run once set
    new_best: bool,
    store: Box<dyn KeyValueStore>,
}

impl ScoreTracker {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let best = persistence::load_or(&*store, BEST_SCORE_KEY, 0u32);
        log::info!("Best score: {}", best);
        Self {
            current: 0,
            best,
            new_best: false,
            store,
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.new_best = false;
    }

    pub fn add_score(&mut self, points: u32) -> ScoreUpdate {
        self.current = self.current.saturating_add(points);

        if self.current > self.best {
            self.best = self.current;
            self.new_best = true;
            persistence::save(&mut *self.store, BEST_SCORE_KEY, &self.best);
        }

        ScoreUpdate {
            current: self.current,
            new_best: self.new_best,
        }
    }

    /// Snapshot for end-of-run reporting; does not change any numbers
    pub fn on_run_end(&self) -> RunSummary {
        let summary = RunSummary {
            score: self.current,
            best: self.best,
            new_best: self.new_best,
        };
        if summary.new_best {
            log::info!("Run ended with a new best: {}", summary.score);
        } else {
            log::info!("Run ended: score {}, best {}", summary.score, summary.best);
        }
        summary
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn best(&self) -> u32 {
        self.best
    }

    #[inline]
    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    /// Storage backing the best score
    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }
}

impl std::fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("current", &self.current)
            .field("best", &self.best)
            .field("new_best", &self.new_best)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn store_with_best(best: &str) -> Box<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, best).unwrap();
        Box::new(store)
    }

    #[test]
    fn test_loads_best_from_store() {
        let tracker = ScoreTracker::new(store_with_best("12"));
        assert_eq!(tracker.best(), 12);
        assert_eq!(tracker.current(), 0);
        assert!(!tracker.is_new_best());
    }

    #[test]
    fn test_reads_existing_browser_best() {
        // Value as written by JSON.stringify under the established key
        let mut store = MemoryStore::new();
        store.set("flappyBirdBestScore", "27").unwrap();
        let tracker = ScoreTracker::new(Box::new(store));
        assert_eq!(tracker.best(), 27);
    }

    #[test]
    fn test_corrupt_best_defaults_to_zero() {
        let tracker = ScoreTracker::new(store_with_best("NaN?"));
        assert_eq!(tracker.best(), 0);
    }

    #[test]
    fn test_new_best_is_sticky_and_persisted() {
        let mut tracker = ScoreTracker::new(store_with_best("2"));

        assert_eq!(
            tracker.add_score(1),
            ScoreUpdate {
                current: 1,
                new_best: false
            }
        );
        tracker.add_score(1);
        assert!(!tracker.is_new_best());

        let update = tracker.add_score(1);
        assert_eq!(update.current, 3);
        assert!(update.new_best);
        assert_eq!(tracker.best(), 3);
        assert_eq!(tracker.store().get(BEST_SCORE_KEY), Ok(Some("3".to_string())));

        let update = tracker.add_score(2);
        assert!(update.new_best);
        assert_eq!(tracker.best(), 5);
    }

    #[test]
    fn test_best_never_below_current() {
        let mut tracker = ScoreTracker::new(Box::new(MemoryStore::new()));
        for _ in 0..10 {
            tracker.add_score(1);
            assert!(tracker.best() >= tracker.current());
        }
    }

    #[test]
    fn test_reset_keeps_best() {
        let mut tracker = ScoreTracker::new(Box::new(MemoryStore::new()));
        tracker.add_score(4);
        assert!(tracker.is_new_best());

        tracker.reset();
        assert_eq!(tracker.current(), 0);
        assert_eq!(tracker.best(), 4);
        assert!(!tracker.is_new_best());

        // Matching the best again is not a new best
        tracker.add_score(4);
        assert!(!tracker.is_new_best());
    }

    #[test]
    fn test_on_run_end_is_read_only() {
        let mut tracker = ScoreTracker::new(Box::new(MemoryStore::new()));
        tracker.add_score(2);
        let summary = tracker.on_run_end();
        assert_eq!(
            summary,
            RunSummary {
                score: 2,
                best: 2,
                new_best: true
            }
        );
        assert_eq!(tracker.current(), 2);
        assert!(tracker.is_new_best());
    }
}
