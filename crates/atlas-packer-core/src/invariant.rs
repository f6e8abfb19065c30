//! Development-time invariant monitor. Compiled only in debug builds; the
//! engines feed every placement through a [`DisjointRectSet`] and assert the
//! acceptance.

use crate::model::Rect;

/// Collection that accepts a rectangle only if it is disjoint from every
/// previously accepted one.
#[derive(Debug, Default)]
pub(crate) struct DisjointRectSet {
    rects: Vec<Rect>,
}

impl DisjointRectSet {
    /// Accepts `rect` iff it overlaps none of the accepted rectangles.
    /// Returns false and refuses the rectangle otherwise.
    pub fn insert(&mut self, rect: Rect) -> bool {
        if self.rects.iter().any(|r| r.intersects(&rect)) {
            return false;
        }
        self.rects.push(rect);
        true
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}
