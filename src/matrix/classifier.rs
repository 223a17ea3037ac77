use std::collections::HashMap;
use std::sync::Arc;

use crate::matrix::bits::BitMatrix;

/// Side length of each finder-pattern exclusion block (7×7 marker plus separator).
pub(crate) const FINDER_BLOCK: i64 = 8;

/// Memo table for one matrix revision. Never merged: a new revision starts from empty.
#[derive(Debug, Default)]
pub(crate) struct ModuleVisibilityCache {
    entries: HashMap<(i64, i64), bool>,
}

impl ModuleVisibilityCache {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Decides which modules of a [`BitMatrix`] are drawn as data modules.
///
/// Out-of-bounds coordinates and the three finder-pattern corner blocks are never renderable,
/// whatever the underlying bit says. Answers are memoized for the current revision.
#[derive(Debug)]
pub struct MatrixClassifier {
    matrix: Arc<BitMatrix>,
    cache: ModuleVisibilityCache,
    revision: u64,
}

impl MatrixClassifier {
    pub fn new(matrix: Arc<BitMatrix>) -> Self {
        Self {
            matrix,
            cache: ModuleVisibilityCache::default(),
            revision: 0,
        }
    }

    /// Swap in a new matrix revision and drop every memoized answer.
    pub fn reset(&mut self, matrix: Arc<BitMatrix>) {
        self.matrix = matrix;
        self.cache.clear();
        self.revision += 1;
    }

    pub fn matrix(&self) -> &Arc<BitMatrix> {
        &self.matrix
    }

    pub fn dimension(&self) -> usize {
        self.matrix.dimension()
    }

    /// Number of resets since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_renderable(&mut self, x: i64, y: i64) -> bool {
        if let Some(&hit) = self.cache.entries.get(&(x, y)) {
            return hit;
        }
        let visible = classify(&self.matrix, x, y);
        self.cache.entries.insert((x, y), visible);
        visible
    }
}

/// `true` when `(x, y)` lies in one of the three finder-pattern blocks of an `n`×`n` symbol.
pub(crate) fn in_finder_block(n: i64, x: i64, y: i64) -> bool {
    let top_left = x < FINDER_BLOCK && y < FINDER_BLOCK;
    let top_right = x > n - 9 && y < FINDER_BLOCK;
    let bottom_left = x < FINDER_BLOCK && y > n - 9;
    top_left || top_right || bottom_left
}

fn classify(matrix: &BitMatrix, x: i64, y: i64) -> bool {
    let n = i64::try_from(matrix.dimension()).unwrap_or(i64::MAX);
    if x < 0 || y < 0 || x >= n || y >= n {
        return false;
    }
    if in_finder_block(n, x, y) {
        return false;
    }
    // Both coordinates are in 0..n here, so the casts are lossless.
    matrix.get(x as usize, y as usize).unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/matrix/classifier.rs"]
mod tests;
