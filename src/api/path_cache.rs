use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::core::{ChartPath, HighlightPoint};

/// Runtime metrics exposed by the per-layout path cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Lazily built paths, one slot per line index.
///
/// A cache lives exactly as long as the layout generation that owns it, so it
/// is never partially invalidated. Slots are write-once: concurrent first
/// requests may both build the path, and whichever lands first is kept.
#[derive(Debug, Default)]
pub(crate) struct PathCache {
    slots: Vec<OnceLock<Arc<ChartPath>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PathCache {
    pub(crate) fn with_lines(line_count: usize) -> Self {
        Self {
            slots: (0..line_count).map(|_| OnceLock::new()).collect(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns `None` only when `line_index` has no slot.
    pub(crate) fn get_or_build(
        &self,
        line_index: usize,
        points: &[HighlightPoint],
    ) -> Option<Arc<ChartPath>> {
        let slot = self.slots.get(line_index)?;
        if let Some(path) = slot.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Some(Arc::clone(path));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(line_index, points = points.len(), "build line path");
        let path = slot.get_or_init(|| Arc::new(ChartPath::from_points(points)));
        Some(Arc::clone(path))
    }

    pub(crate) fn stats(&self) -> PathCacheStats {
        PathCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.slots.iter().filter(|slot| slot.get().is_some()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> HighlightPoint {
        HighlightPoint {
            x,
            y,
            data_x: x,
            value: y,
            origin: None,
        }
    }

    #[test]
    fn second_request_hits_cached_path() {
        let cache = PathCache::with_lines(1);
        let points = [point(0.0, 0.0), point(10.0, 5.0)];

        let first = cache.get_or_build(0, &points).expect("slot");
        let second = cache.get_or_build(0, &points).expect("slot");

        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn unknown_line_has_no_slot() {
        let cache = PathCache::with_lines(1);
        assert!(cache.get_or_build(3, &[]).is_none());
    }
}
