use super::{BatchPlacement, BinPacker, Placed};
use crate::config::MaxRectsHeuristic;
use crate::model::{Rect, Size};

#[cfg(debug_assertions)]
use crate::invariant::DisjointRectSet;

/// MAXRECTS free-list packer.
///
/// Unused space is covered by a set of maximal free rectangles which may
/// overlap each other; only the placed rectangles are pairwise disjoint.
/// After every insertion the free list is pruned so that no free rectangle is
/// contained in another.
pub struct MaxRectsEngine {
    width: u32,
    height: u32,
    allow_rotation: bool,
    heuristic: MaxRectsHeuristic,
    free: Vec<Rect>,
    used: Vec<Rect>,
    #[cfg(debug_assertions)]
    monitor: DisjointRectSet,
}

impl MaxRectsEngine {
    pub fn new(width: u32, height: u32, allow_rotation: bool, heuristic: MaxRectsHeuristic) -> Self {
        Self {
            width,
            height,
            allow_rotation,
            heuristic,
            free: vec![Rect::new(0, 0, width, height)],
            used: Vec::new(),
            #[cfg(debug_assertions)]
            monitor: DisjointRectSet::default(),
        }
    }

    /// Back to an empty bin; dimensions, rotation and heuristic are retained.
    pub fn reset(&mut self) {
        self.free.clear();
        self.free.push(Rect::new(0, 0, self.width, self.height));
        self.used.clear();
        #[cfg(debug_assertions)]
        self.monitor.clear();
    }

    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    pub fn used_rects(&self) -> &[Rect] {
        &self.used
    }

    /// How much of the candidate's perimeter at `(x, y, w, h)` touches the
    /// bin boundary or an already placed rectangle. Larger is better.
    pub fn contact_score(&self, x: u32, y: u32, w: u32, h: u32) -> u64 {
        let mut score = 0u64;
        if x == 0 || x + w == self.width {
            score += h as u64;
        }
        if y == 0 || y + h == self.height {
            score += w as u64;
        }
        for u in &self.used {
            if u.x == x + w || u.right() == x {
                score += overlap_1d(y, y + h, u.y, u.bottom()) as u64;
            }
            if u.y == y + h || u.bottom() == y {
                score += overlap_1d(x, x + w, u.x, u.right()) as u64;
            }
        }
        score
    }

    fn score(&self, fr: &Rect, w: u32, h: u32) -> (i64, i64) {
        let leftover_h = (fr.w as i64 - w as i64).abs();
        let leftover_v = (fr.h as i64 - h as i64).abs();
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);
        let area_fit = fr.area() as i64 - (w as u64 * h as u64) as i64;
        match self.heuristic {
            MaxRectsHeuristic::BestAreaFit => (area_fit, short_fit),
            MaxRectsHeuristic::BestShortSideFit => (short_fit, long_fit),
            MaxRectsHeuristic::BestLongSideFit => (long_fit, short_fit),
            MaxRectsHeuristic::BottomLeft => ((fr.y + h) as i64, fr.x as i64),
            MaxRectsHeuristic::ContactPoint => {
                // maximizes; negated so the same minimizing loop serves
                // both the online and the batch path
                let contact = self.contact_score(fr.x, fr.y, w, h);
                (-(contact as i64), area_fit)
            }
        }
    }

    fn find_scored(&self, w: u32, h: u32) -> Option<(Placed, (i64, i64))> {
        let mut best: Option<(Placed, (i64, i64))> = None;
        for fr in &self.free {
            if fr.w >= w && fr.h >= h {
                let score = self.score(fr, w, h);
                if best.as_ref().map_or(true, |(_, b)| score < *b) {
                    best = Some((
                        Placed {
                            rect: Rect::new(fr.x, fr.y, w, h),
                            rotated: false,
                        },
                        score,
                    ));
                }
            }
            if self.allow_rotation && fr.w >= h && fr.h >= w {
                let score = self.score(fr, h, w);
                if best.as_ref().map_or(true, |(_, b)| score < *b) {
                    best = Some((
                        Placed {
                            rect: Rect::new(fr.x, fr.y, h, w),
                            rotated: true,
                        },
                        score,
                    ));
                }
            }
        }
        best
    }

    fn place(&mut self, node: Rect) {
        // Split only the originally present free rects; residuals are
        // appended afterwards so they are never re-split in this insertion.
        let mut residuals: Vec<Rect> = Vec::new();
        let mut i = 0;
        while i < self.free.len() {
            if split_free_node(self.free[i], &node, &mut residuals) {
                self.free.swap_remove(i);
            } else {
                i += 1;
            }
        }
        self.free.append(&mut residuals);
        self.prune_free_list();
        self.used.push(node);
        #[cfg(debug_assertions)]
        {
            let accepted = self.monitor.insert(node);
            debug_assert!(accepted, "placement {:?} overlaps an earlier one", node);
        }
    }

    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut j = i + 1;
            let mut removed_i = false;
            while j < self.free.len() {
                if self.free[j].contains(&self.free[i]) {
                    self.free.remove(i);
                    removed_i = true;
                    break;
                }
                if self.free[i].contains(&self.free[j]) {
                    self.free.remove(j);
                    continue;
                }
                j += 1;
            }
            if !removed_i {
                i += 1;
            }
        }
    }
}

/// Splits `free` against a placed `node`, appending up to four residual
/// slabs: top/bottom spanning the free rect's full width, left/right its
/// full height. The residuals may overlap each other. Returns true iff the
/// rectangles intersected (and `free` must therefore be dropped).
fn split_free_node(free: Rect, node: &Rect, out: &mut Vec<Rect>) -> bool {
    if !free.intersects(node) {
        return false;
    }
    // top
    if node.y > free.y && node.y < free.bottom() {
        out.push(Rect::new(free.x, free.y, free.w, node.y - free.y));
    }
    // bottom
    if node.bottom() < free.bottom() {
        out.push(Rect::new(
            free.x,
            node.bottom(),
            free.w,
            free.bottom() - node.bottom(),
        ));
    }
    // left
    if node.x > free.x && node.x < free.right() {
        out.push(Rect::new(free.x, free.y, node.x - free.x, free.h));
    }
    // right
    if node.right() < free.right() {
        out.push(Rect::new(
            node.right(),
            free.y,
            free.right() - node.right(),
            free.h,
        ));
    }
    true
}

fn overlap_1d(a1: u32, a2: u32, b1: u32, b2: u32) -> u32 {
    let start = a1.max(b1);
    let end = a2.min(b2);
    end.saturating_sub(start)
}

impl BinPacker for MaxRectsEngine {
    fn insert(&mut self, w: u32, h: u32) -> Option<Placed> {
        if w == 0 || h == 0 {
            return None;
        }
        let (placed, _) = self.find_scored(w, h)?;
        self.place(placed.rect);
        Some(placed)
    }

    fn insert_batch(&mut self, sizes: &[Size]) -> Vec<BatchPlacement> {
        let mut remaining: Vec<usize> = (0..sizes.len()).collect();
        let mut out = Vec::with_capacity(sizes.len());
        while !remaining.is_empty() {
            let mut best: Option<(usize, Placed, (i64, i64))> = None;
            for (slot, &idx) in remaining.iter().enumerate() {
                let size = sizes[idx];
                if size.w == 0 || size.h == 0 {
                    continue;
                }
                if let Some((placed, score)) = self.find_scored(size.w, size.h) {
                    if best.as_ref().map_or(true, |(_, _, b)| score < *b) {
                        best = Some((slot, placed, score));
                    }
                }
            }
            let Some((slot, placed, _)) = best else {
                break;
            };
            let idx = remaining.remove(slot);
            self.place(placed.rect);
            out.push(BatchPlacement {
                index: idx,
                rect: placed.rect,
                rotated: placed.rotated,
            });
        }
        out
    }

    fn occupancy(&self) -> f64 {
        let bin = self.width as u64 * self.height as u64;
        if bin == 0 {
            return 0.0;
        }
        let used: u64 = self.used.iter().map(Rect::area).sum();
        used as f64 / bin as f64
    }
}
