use super::{BatchPlacement, BinPacker, Placed};
use crate::config::{GuillotineChoice, GuillotineSplit};
use crate::model::{Rect, Size};

#[cfg(debug_assertions)]
use crate::invariant::DisjointRectSet;

/// Guillotine split packer.
///
/// Every placement sits at the top-left of its free rectangle and splits the
/// leftover space with a single straight cut, so the free list stays pairwise
/// disjoint by construction. Rotation is always considered. With `merge`
/// enabled, abutting free rectangles sharing a full edge are coalesced after
/// each placement.
pub struct GuillotineEngine {
    width: u32,
    height: u32,
    choice: GuillotineChoice,
    split: GuillotineSplit,
    merge: bool,
    free: Vec<Rect>,
    used: Vec<Rect>,
    #[cfg(debug_assertions)]
    monitor: DisjointRectSet,
}

impl GuillotineEngine {
    pub fn new(
        width: u32,
        height: u32,
        choice: GuillotineChoice,
        split: GuillotineSplit,
        merge: bool,
    ) -> Self {
        Self {
            width,
            height,
            choice,
            split,
            merge,
            free: vec![Rect::new(0, 0, width, height)],
            used: Vec::new(),
            #[cfg(debug_assertions)]
            monitor: DisjointRectSet::default(),
        }
    }

    /// Back to an empty bin; dimensions and heuristics are retained.
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

    fn score(choice: &GuillotineChoice, fr: &Rect, w: u32, h: u32) -> i64 {
        // a perfect fit beats every heuristic
        if fr.w == w && fr.h == h {
            return i64::MIN;
        }
        let area_fit = fr.area() as i64 - (w as u64 * h as u64) as i64;
        let leftover_h = (fr.w as i64 - w as i64).abs();
        let leftover_v = (fr.h as i64 - h as i64).abs();
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);
        match choice {
            GuillotineChoice::BestAreaFit => area_fit,
            GuillotineChoice::BestShortSideFit => short_fit,
            GuillotineChoice::BestLongSideFit => long_fit,
            GuillotineChoice::WorstAreaFit => -area_fit,
            GuillotineChoice::WorstShortSideFit => -short_fit,
            GuillotineChoice::WorstLongSideFit => -long_fit,
        }
    }

    fn choose(&self, w: u32, h: u32) -> Option<(usize, Placed, i64)> {
        let mut best: Option<(usize, Placed, i64)> = None;
        for (i, fr) in self.free.iter().enumerate() {
            if fr.w >= w && fr.h >= h {
                let s = Self::score(&self.choice, fr, w, h);
                if best.as_ref().map_or(true, |(_, _, b)| s < *b) {
                    best = Some((
                        i,
                        Placed {
                            rect: Rect::new(fr.x, fr.y, w, h),
                            rotated: false,
                        },
                        s,
                    ));
                }
            }
            if fr.w >= h && fr.h >= w {
                let s = Self::score(&self.choice, fr, h, w);
                if best.as_ref().map_or(true, |(_, _, b)| s < *b) {
                    best = Some((
                        i,
                        Placed {
                            rect: Rect::new(fr.x, fr.y, h, w),
                            rotated: true,
                        },
                        s,
                    ));
                }
            }
        }
        best
    }

    fn place(&mut self, idx: usize, placed: &Rect) {
        let fr = self.free.swap_remove(idx);
        let (bottom, right) = split_free_rect(&fr, placed, &self.split);
        self.free.extend(bottom);
        self.free.extend(right);
        if self.merge {
            self.merge_free_list();
        }
        self.used.push(*placed);
        #[cfg(debug_assertions)]
        {
            let accepted = self.monitor.insert(*placed);
            debug_assert!(accepted, "placement {:?} overlaps an earlier one", placed);
            self.debug_check_free_disjoint();
        }
    }

    /// Coalesces free rectangles sharing a full edge, one O(n^2) pairwise
    /// pass. A single pass misses three-way merges; callers may invoke it
    /// repeatedly. At a fixed point the call changes nothing.
    pub fn merge_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut j = i + 1;
            while j < self.free.len() {
                let a = self.free[i];
                let b = self.free[j];
                if a.x == b.x && a.w == b.w {
                    if b.y == a.bottom() {
                        self.free[i].h += b.h;
                        self.free.remove(j);
                        continue;
                    }
                    if a.y == b.bottom() {
                        self.free[i].y = b.y;
                        self.free[i].h += b.h;
                        self.free.remove(j);
                        continue;
                    }
                }
                if a.y == b.y && a.h == b.h {
                    if b.x == a.right() {
                        self.free[i].w += b.w;
                        self.free.remove(j);
                        continue;
                    }
                    if a.x == b.right() {
                        self.free[i].x = b.x;
                        self.free[i].w += b.w;
                        self.free.remove(j);
                        continue;
                    }
                }
                j += 1;
            }
            i += 1;
        }
    }

    #[cfg(debug_assertions)]
    fn debug_check_free_disjoint(&self) {
        for i in 0..self.free.len() {
            for j in (i + 1)..self.free.len() {
                debug_assert!(
                    !self.free[i].intersects(&self.free[j]),
                    "free rects {:?} and {:?} overlap",
                    self.free[i],
                    self.free[j]
                );
            }
        }
    }
}

/// Cuts the leftover of `fr` around `placed` into a bottom and a right
/// rectangle. The split axis decides which of the two spans the full free
/// rect; degenerate residuals are dropped.
fn split_free_rect(
    fr: &Rect,
    placed: &Rect,
    split: &GuillotineSplit,
) -> (Option<Rect>, Option<Rect>) {
    let leftover_w = fr.w - placed.w;
    let leftover_h = fr.h - placed.h;

    let split_horizontal = match split {
        GuillotineSplit::SplitShorterLeftoverAxis => leftover_w <= leftover_h,
        GuillotineSplit::SplitLongerLeftoverAxis => leftover_w > leftover_h,
        GuillotineSplit::SplitMinimizeArea => {
            (placed.w as u64 * leftover_h as u64) > (leftover_w as u64 * placed.h as u64)
        }
        GuillotineSplit::SplitMaximizeArea => {
            (placed.w as u64 * leftover_h as u64) <= (leftover_w as u64 * placed.h as u64)
        }
        GuillotineSplit::SplitShorterAxis => fr.w <= fr.h,
        GuillotineSplit::SplitLongerAxis => fr.w > fr.h,
    };

    let mut bottom = Rect::new(fr.x, placed.bottom(), 0, leftover_h);
    let mut right = Rect::new(placed.right(), fr.y, leftover_w, 0);
    if split_horizontal {
        bottom.w = fr.w;
        right.h = placed.h;
    } else {
        bottom.w = placed.w;
        right.h = fr.h;
    }
    let bottom = (!bottom.is_degenerate()).then_some(bottom);
    let right = (!right.is_degenerate()).then_some(right);
    (bottom, right)
}

impl BinPacker for GuillotineEngine {
    fn insert(&mut self, w: u32, h: u32) -> Option<Placed> {
        if w == 0 || h == 0 {
            return None;
        }
        let (idx, placed, _) = self.choose(w, h)?;
        self.place(idx, &placed.rect);
        Some(placed)
    }

    fn insert_batch(&mut self, sizes: &[Size]) -> Vec<BatchPlacement> {
        let mut remaining: Vec<usize> = (0..sizes.len()).collect();
        let mut out = Vec::with_capacity(sizes.len());
        while !remaining.is_empty() {
            let mut best: Option<(usize, usize, Placed, i64)> = None;
            for (slot, &idx) in remaining.iter().enumerate() {
                let size = sizes[idx];
                if size.w == 0 || size.h == 0 {
                    continue;
                }
                if let Some((free_idx, placed, score)) = self.choose(size.w, size.h) {
                    if best.as_ref().map_or(true, |(_, _, _, b)| score < *b) {
                        best = Some((slot, free_idx, placed, score));
                    }
                }
            }
            let Some((slot, free_idx, placed, _)) = best else {
                break;
            };
            let idx = remaining.remove(slot);
            self.place(free_idx, &placed.rect);
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
