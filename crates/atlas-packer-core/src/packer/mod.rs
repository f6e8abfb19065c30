use crate::model::{Rect, Size};

pub mod guillotine;
pub mod maxrects;

/// Where a single rectangle landed within the bin.
///
/// `rect` carries the post-rotation dimensions: when `rotated` is true its
/// width is the input height and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub rect: Rect,
    pub rotated: bool,
}

/// One entry of an offline batch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlacement {
    /// Index into the caller's input slice.
    pub index: usize,
    /// Destination within the bin, post-rotation dimensions.
    pub rect: Rect,
    pub rotated: bool,
}

/// A free-space engine placing rectangles into a fixed-size bin.
///
/// Implementations must keep placements pairwise disjoint and inside the bin.
/// "No fit" is a normal outcome reported as `None`; the engines have no other
/// failure path.
pub trait BinPacker {
    /// Place one `w x h` rectangle online, returning where it landed.
    fn insert(&mut self, w: u32, h: u32) -> Option<Placed>;

    /// Offline mode: each round, score every remaining input across all free
    /// rectangles and both orientations, place the globally best one, and
    /// repeat until everything is placed or nothing fits. The returned
    /// entries carry the original input indices; the result is shorter than
    /// the input when the bin ran out of room.
    fn insert_batch(&mut self, sizes: &[Size]) -> Vec<BatchPlacement>;

    /// Ratio of placed pixel area to bin area (0.0 to 1.0).
    fn occupancy(&self) -> f64;
}
