//! Per-region chunk selection.
//!
//! A region is either unmarked, partially marked (a sparse set of chunks) or
//! fully marked (a single flag). The two representations never coexist:
//! marking the last missing chunk collapses the set into the flag, and
//! unmarking one chunk of a fully marked region expands the flag back into
//! the set first.

use crate::core::constants::CHUNKS_PER_REGION;
use crate::core::geo::Point;
use crate::prelude::HashSet;
use serde::{Deserialize, Serialize};

/// Coarse selection state of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkLevel {
    Unmarked,
    Partial,
    Full,
}

/// Selection state of one region, in chunk coordinates.
///
/// Invariants:
/// - when `full` is set, `chunks` is empty;
/// - otherwise `chunks.len() < CHUNKS_PER_REGION`;
/// - `chunks` only holds chunks of `region`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkState {
    region: Point,
    full: bool,
    chunks: HashSet<Point>,
}

impl MarkState {
    /// Unmarked state for the region at `region` (region units).
    pub fn new(region: Point) -> Self {
        Self {
            region,
            full: false,
            chunks: HashSet::default(),
        }
    }

    pub fn region(&self) -> Point {
        self.region
    }

    pub fn level(&self) -> MarkLevel {
        if self.full {
            MarkLevel::Full
        } else if self.chunks.is_empty() {
            MarkLevel::Unmarked
        } else {
            MarkLevel::Partial
        }
    }

    pub fn is_region_marked(&self) -> bool {
        self.full
    }

    pub fn is_chunk_marked(&self, chunk: Point) -> bool {
        self.full || self.chunks.contains(&chunk)
    }

    /// Whether `chunk` belongs to this region at all.
    pub fn contains_chunk(&self, chunk: Point) -> bool {
        chunk.chunk_to_region() == self.region
    }

    /// Number of entries in the sparse set (zero when fully marked).
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// `true` when nothing in the region is marked.
    pub fn is_empty(&self) -> bool {
        self.level() == MarkLevel::Unmarked
    }

    /// Number of marked chunks, counting a full mark as every chunk.
    pub fn marked_count(&self) -> usize {
        if self.full {
            CHUNKS_PER_REGION
        } else {
            self.chunks.len()
        }
    }

    /// Sparse entries, in no particular order. Empty when fully marked.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.chunks.iter().copied()
    }

    /// Sorted copy of the sparse entries.
    pub fn snapshot(&self) -> Vec<Point> {
        let mut chunks: Vec<Point> = self.iter().collect();
        chunks.sort_unstable();
        chunks
    }

    /// Sets or clears the full-region flag.
    ///
    /// Setting it drops the sparse set. Clearing it leaves the sparse set
    /// untouched; [`MarkState::unmark_chunk`] relies on that while expanding.
    pub fn set_full_mark(&mut self, marked: bool) {
        self.full = marked;
        if marked {
            self.chunks.clear();
        }
    }

    /// Marks one chunk. Returns `false` if the chunk is outside the region.
    pub fn mark_chunk(&mut self, chunk: Point) -> bool {
        if !self.contains_chunk(chunk) {
            log::warn!("chunk {} is not part of region {}", chunk, self.region);
            return false;
        }
        if self.full {
            return true;
        }
        self.chunks.insert(chunk);
        if self.chunks.len() == CHUNKS_PER_REGION {
            self.set_full_mark(true);
        }
        true
    }

    /// Unmarks one chunk. Returns `false` if the chunk is outside the region.
    pub fn unmark_chunk(&mut self, chunk: Point) -> bool {
        if !self.contains_chunk(chunk) {
            log::warn!("chunk {} is not part of region {}", chunk, self.region);
            return false;
        }
        if self.full {
            self.chunks.extend(self.region.region_chunks());
            self.set_full_mark(false);
        }
        self.chunks.remove(&chunk);
        true
    }

    pub fn clear(&mut self) {
        self.set_full_mark(false);
        self.chunks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_chunks(region: Point) -> Vec<Point> {
        region.region_chunks().collect()
    }

    #[test]
    fn test_compaction_on_last_chunk() {
        let region = Point::new(2, -3);
        let mut marks = MarkState::new(region);
        let chunks = region_chunks(region);

        for chunk in &chunks[..CHUNKS_PER_REGION - 1] {
            assert!(marks.mark_chunk(*chunk));
        }
        assert!(!marks.is_region_marked());
        assert_eq!(marks.level(), MarkLevel::Partial);
        assert_eq!(marks.len(), CHUNKS_PER_REGION - 1);

        marks.mark_chunk(chunks[CHUNKS_PER_REGION - 1]);
        assert!(marks.is_region_marked());
        assert_eq!(marks.level(), MarkLevel::Full);
        assert_eq!(marks.len(), 0);
        assert_eq!(marks.marked_count(), CHUNKS_PER_REGION);
    }

    #[test]
    fn test_duplicate_marks_do_not_compact() {
        let region = Point::new(0, 0);
        let mut marks = MarkState::new(region);
        for _ in 0..CHUNKS_PER_REGION {
            marks.mark_chunk(Point::new(5, 5));
        }
        assert_eq!(marks.len(), 1);
        assert!(!marks.is_region_marked());
    }

    #[test]
    fn test_expansion_on_unmark() {
        let region = Point::new(-1, 0);
        let mut marks = MarkState::new(region);
        marks.set_full_mark(true);

        let removed = Point::new(-20, 7);
        assert!(marks.unmark_chunk(removed));

        assert!(!marks.is_region_marked());
        assert!(!marks.is_chunk_marked(removed));
        assert_eq!(marks.len(), CHUNKS_PER_REGION - 1);
        for chunk in region.region_chunks().filter(|c| *c != removed) {
            assert!(marks.is_chunk_marked(chunk), "{chunk} should stay marked");
        }
    }

    #[test]
    fn test_mark_while_full_keeps_set_empty() {
        let mut marks = MarkState::new(Point::new(0, 0));
        marks.set_full_mark(true);
        assert!(marks.mark_chunk(Point::new(1, 1)));
        assert!(marks.is_region_marked());
        assert_eq!(marks.len(), 0);
    }

    #[test]
    fn test_clear_full_flag_keeps_sparse_set() {
        let mut marks = MarkState::new(Point::new(0, 0));
        marks.mark_chunk(Point::new(3, 4));
        marks.set_full_mark(false);
        assert!(marks.is_chunk_marked(Point::new(3, 4)));

        marks.clear();
        assert!(marks.is_empty());
        assert_eq!(marks.level(), MarkLevel::Unmarked);
    }

    #[test]
    fn test_foreign_chunks_rejected() {
        let mut marks = MarkState::new(Point::new(0, 0));
        assert!(!marks.mark_chunk(Point::new(32, 0)));
        assert!(!marks.mark_chunk(Point::new(-1, 0)));
        assert!(marks.is_empty());

        marks.set_full_mark(true);
        assert!(!marks.unmark_chunk(Point::new(0, 32)));
        assert!(marks.is_region_marked());
    }

    #[test]
    fn test_snapshot_sorted() {
        let mut marks = MarkState::new(Point::new(0, 0));
        marks.mark_chunk(Point::new(4, 1));
        marks.mark_chunk(Point::new(0, 9));
        marks.mark_chunk(Point::new(4, 0));
        assert_eq!(
            marks.snapshot(),
            vec![Point::new(0, 9), Point::new(4, 0), Point::new(4, 1)]
        );
    }
}
