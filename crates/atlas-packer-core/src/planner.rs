use crate::config::{AtlasConfig, MaxRectsHeuristic, SizeRestriction};
use crate::error::{AtlasError, Result};
use crate::model::{PackResult, Placement, Rect, Size, SourceImage};
use crate::packer::{maxrects::MaxRectsEngine, BinPacker};
use crate::sizing;
use tracing::{debug, instrument, trace};

/// Fixed trial order of the MAXRECTS heuristics within one candidate size.
const HEURISTIC_ORDER: [MaxRectsHeuristic; 5] = [
    MaxRectsHeuristic::BestShortSideFit,
    MaxRectsHeuristic::BestLongSideFit,
    MaxRectsHeuristic::BottomLeft,
    MaxRectsHeuristic::ContactPoint,
    MaxRectsHeuristic::BestAreaFit,
];

/// Summary of the (sorted) input set driving the size search.
struct PackSummary {
    /// Per-axis minima over the non-degenerate entries.
    min: Size,
    /// Per-axis maxima over the non-degenerate entries.
    max: Size,
    /// Total pixel area of the non-degenerate entries.
    total_area: u64,
    /// Number of non-degenerate entries.
    count: usize,
}

impl PackSummary {
    fn of<K>(images: &[SourceImage<K>]) -> Self {
        let mut min = Size::new(u32::MAX, u32::MAX);
        let mut max = Size::new(0, 0);
        let mut total_area = 0u64;
        let mut count = 0usize;
        for img in images {
            let r = &img.rect;
            if r.is_degenerate() {
                continue;
            }
            min.w = min.w.min(r.w);
            min.h = min.h.min(r.h);
            max.w = max.w.max(r.w);
            max.h = max.h.max(r.h);
            total_area += r.area();
            count += 1;
        }
        if count == 0 {
            min = Size::new(0, 0);
        }
        Self {
            min,
            max,
            total_area,
            count,
        }
    }

    /// All non-degenerate entries share one size.
    fn is_uniform(&self) -> bool {
        self.count > 0 && self.min == self.max
    }
}

/// Top-level atlas planner.
///
/// Examines the input set, chooses a uniform-grid fast path or the general
/// MAXRECTS search, enumerates candidate atlas sizes under the configured
/// restriction, and returns the first viable layout.
pub struct TextureBinPacker {
    config: AtlasConfig,
}

impl TextureBinPacker {
    /// Validates `config` and builds a planner. The planner is stateless
    /// across calls; every `try_process` owns its whole search.
    pub fn new(config: AtlasConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Searches for a single atlas containing every input without overlap.
    ///
    /// Inputs are re-ordered by descending area (stable, with a fixed
    /// tie-break), and the returned placements follow that order. Zero-area
    /// entries are echoed back with a zero destination rectangle. Search
    /// exhaustion is reported as [`AtlasError::OutOfSpace`].
    #[instrument(skip_all, fields(inputs = images.len()))]
    pub fn try_process<K: Clone>(&self, images: &[SourceImage<K>]) -> Result<PackResult<K>> {
        let mut sorted: Vec<SourceImage<K>> = images.to_vec();
        sorted.sort_by(|a, b| {
            b.rect
                .area()
                .cmp(&a.rect.area())
                .then_with(|| priority(&b.rect).cmp(&priority(&a.rect)))
        });
        let summary = PackSummary::of(&sorted);

        if summary.total_area == 0 {
            return Ok(self.degenerate_result(&sorted));
        }
        if summary.is_uniform() {
            self.pack_uniform(&sorted, &summary)
        } else {
            self.pack_general(&sorted, &summary)
        }
    }

    /// Atlas for inputs with no pixel area at all (including an empty input
    /// list): a minimal border-only atlas with zero destination rectangles.
    fn degenerate_result<K: Clone>(&self, sorted: &[SourceImage<K>]) -> PackResult<K> {
        let border = &self.config.border;
        let size = Size::new(border.sum_x().max(1), border.sum_y().max(1));
        let placements = sorted
            .iter()
            .map(|img| Placement {
                source: img.clone(),
                dest: Rect::ZERO,
                rotated: false,
            })
            .collect();
        PackResult { size, placements }
    }

    /// Fast path for same-size inputs: a row-major grid, never rotated.
    fn pack_uniform<K: Clone>(
        &self,
        sorted: &[SourceImage<K>],
        summary: &PackSummary,
    ) -> Result<PackResult<K>> {
        let cell = summary.max;
        let n = summary.count as u64;
        let max_size = self.config.max_size();
        debug!(cell_w = cell.w, cell_h = cell.h, n, "uniform grid path");

        match self.config.restriction {
            SizeRestriction::Any => {
                let mut min_area = summary.total_area;
                loop {
                    let size = sizing::minimum_texture_size(
                        min_area,
                        summary.max,
                        max_size,
                        &self.config.border,
                        &self.config.restriction,
                    );
                    if size.w > max_size.w || size.h > max_size.h {
                        return Err(self.out_of_space(sorted.len()));
                    }
                    let (cols, rows) = self.grid_dims(size, cell);
                    if cols as u64 * rows as u64 >= n {
                        return Ok(self.emit_grid(sorted, size, cell, cols));
                    }
                    let missing = (n - cols as u64 * rows as u64) * cell.area();
                    min_area += (missing / 10).max(1);
                }
            }
            _ => {
                let square = self.config.restriction == SizeRestriction::Pow2Square;
                let min = sizing::minimum_texture_size(
                    summary.total_area,
                    summary.max,
                    max_size,
                    &self.config.border,
                    &self.config.restriction,
                );
                for size in sizing::pow2_candidates(min, max_size, square) {
                    let (cols, rows) = self.grid_dims(size, cell);
                    if cols as u64 * rows as u64 >= n {
                        return Ok(self.emit_grid(sorted, size, cell, cols));
                    }
                }
                Err(self.out_of_space(sorted.len()))
            }
        }
    }

    fn grid_dims(&self, size: Size, cell: Size) -> (u32, u32) {
        let usable_w = size.w.saturating_sub(self.config.border.sum_x());
        let usable_h = size.h.saturating_sub(self.config.border.sum_y());
        (usable_w / cell.w, usable_h / cell.h)
    }

    fn emit_grid<K: Clone>(
        &self,
        sorted: &[SourceImage<K>],
        size: Size,
        cell: Size,
        cols: u32,
    ) -> PackResult<K> {
        let mut placements = Vec::with_capacity(sorted.len());
        let mut i = 0u32;
        for img in sorted {
            if img.rect.is_degenerate() {
                placements.push(Placement {
                    source: img.clone(),
                    dest: Rect::ZERO,
                    rotated: false,
                });
                continue;
            }
            let dest = Rect::new((i % cols) * cell.w, (i / cols) * cell.h, cell.w, cell.h);
            placements.push(Placement {
                source: img.clone(),
                dest,
                rotated: false,
            });
            i += 1;
        }
        PackResult { size, placements }
    }

    /// General path: candidate sizes x the five MAXRECTS heuristics.
    fn pack_general<K: Clone>(
        &self,
        sorted: &[SourceImage<K>],
        summary: &PackSummary,
    ) -> Result<PackResult<K>> {
        let max_size = self.config.max_size();
        match self.config.restriction {
            SizeRestriction::Any => {
                let mut min_area = summary.total_area;
                loop {
                    let size = sizing::minimum_texture_size(
                        min_area,
                        summary.max,
                        max_size,
                        &self.config.border,
                        &self.config.restriction,
                    );
                    if size.w > max_size.w || size.h > max_size.h {
                        return Err(self.out_of_space(sorted.len()));
                    }
                    match self.try_heuristics(sorted, size) {
                        Ok(result) => return Ok(result),
                        Err(missing) => min_area += (missing / 10).max(1),
                    }
                }
            }
            _ => {
                let square = self.config.restriction == SizeRestriction::Pow2Square;
                let min = sizing::minimum_texture_size(
                    summary.total_area,
                    summary.max,
                    max_size,
                    &self.config.border,
                    &self.config.restriction,
                );
                for size in sizing::pow2_candidates(min, max_size, square) {
                    if let Ok(result) = self.try_heuristics(sorted, size) {
                        return Ok(result);
                    }
                }
                Err(self.out_of_space(sorted.len()))
            }
        }
    }

    /// Tries every heuristic at one candidate size; on failure reports the
    /// smallest unplaced area seen across the heuristics.
    fn try_heuristics<K: Clone>(
        &self,
        sorted: &[SourceImage<K>],
        size: Size,
    ) -> std::result::Result<PackResult<K>, u64> {
        debug!(w = size.w, h = size.h, "trying candidate atlas size");
        let mut best_missing = u64::MAX;
        for heuristic in &HEURISTIC_ORDER {
            match self.try_pack(sorted, size, heuristic.clone()) {
                Ok(placements) => {
                    debug!(?heuristic, "candidate size packed");
                    return Ok(PackResult { size, placements });
                }
                Err(missing) => best_missing = best_missing.min(missing),
            }
        }
        Err(best_missing)
    }

    /// One trial: a fresh engine on the border-shrunken bin, inputs fed in
    /// sorted order. Fails with the summed area of everything that did not
    /// fit.
    fn try_pack<K: Clone>(
        &self,
        sorted: &[SourceImage<K>],
        size: Size,
        heuristic: MaxRectsHeuristic,
    ) -> std::result::Result<Vec<Placement<K>>, u64> {
        trace!(?heuristic, "trial");
        let border = &self.config.border;
        let usable_w = size.w.saturating_sub(border.sum_x());
        let usable_h = size.h.saturating_sub(border.sum_y());
        let mut engine: Box<dyn BinPacker> = Box::new(MaxRectsEngine::new(
            usable_w,
            usable_h,
            self.config.allow_rotation,
            heuristic,
        ));
        let mut placements = Vec::with_capacity(sorted.len());
        let mut missing = 0u64;
        for img in sorted {
            if img.rect.is_degenerate() {
                placements.push(Placement {
                    source: img.clone(),
                    dest: Rect::ZERO,
                    rotated: false,
                });
                continue;
            }
            match engine.insert(img.rect.w, img.rect.h) {
                Some(placed) => placements.push(Placement {
                    source: img.clone(),
                    dest: placed.rect,
                    rotated: placed.rotated,
                }),
                None => missing += img.rect.area(),
            }
        }
        if missing == 0 {
            Ok(placements)
        } else {
            Err(missing)
        }
    }

    fn out_of_space(&self, count: usize) -> AtlasError {
        AtlasError::OutOfSpace {
            max_width: self.config.max_width,
            max_height: self.config.max_height,
            count,
        }
    }
}

/// Composite tie-break priority stabilising the descending-area order.
fn priority(r: &Rect) -> u64 {
    r.h as u64 * 16384 + r.w as u64
}
