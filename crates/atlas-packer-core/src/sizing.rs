//! Candidate atlas size enumeration under a dimension restriction.

use crate::config::SizeRestriction;
use crate::model::{Size, Thickness};
use std::collections::VecDeque;

/// Smallest power of two >= `max(1, v)`.
pub fn next_pow2(v: u32) -> u32 {
    if v <= 1 {
        return 1;
    }
    let mut v = v - 1;
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v + 1
}

/// Ceiling division.
pub fn ceil_div(a: u64, b: u64) -> u64 {
    debug_assert!(b > 0);
    (a + b - 1) / b
}

/// Pixel area left for content once the border band is reserved:
/// `w*h - (sum_x*h + sum_y*w)`, saturating at zero.
pub fn usable_area(size: Size, border: &Thickness) -> u64 {
    let band = border.sum_x() as u64 * size.h as u64 + border.sum_y() as u64 * size.w as u64;
    size.area().saturating_sub(band)
}

fn ceil_sqrt(v: u64) -> u64 {
    if v == 0 {
        return 0;
    }
    // float seed, corrected to the exact integer ceiling
    let mut s = (v as f64).sqrt() as u64;
    while s.saturating_mul(s) < v {
        s += 1;
    }
    while s > 0 && (s - 1).saturating_mul(s - 1) >= v {
        s -= 1;
    }
    s
}

/// Smallest admissible atlas size whose usable area reaches `min_area`, with
/// each axis large enough for `min_rect` plus the border on that axis.
///
/// Power-of-two modes snap up and double until covered; the unrestricted mode
/// seeds a near-square width and derives the exact height. The result may
/// exceed `max_size` when nothing admissible fits; callers reject it then.
pub fn minimum_texture_size(
    min_area: u64,
    min_rect: Size,
    max_size: Size,
    border: &Thickness,
    restriction: &SizeRestriction,
) -> Size {
    let w0 = min_rect.w.saturating_add(border.sum_x()).max(1);
    let h0 = min_rect.h.saturating_add(border.sum_y()).max(1);
    match restriction {
        SizeRestriction::Pow2Square => {
            let mut s = next_pow2(w0.max(h0));
            while usable_area(Size::new(s, s), border) < min_area {
                if s > max_size.w && s > max_size.h {
                    break;
                }
                let next = s.saturating_mul(2);
                if next == s {
                    break;
                }
                s = next;
            }
            Size::new(s, s)
        }
        SizeRestriction::Pow2 => {
            let mut w = next_pow2(w0);
            let mut h = next_pow2(h0);
            while usable_area(Size::new(w, h), border) < min_area {
                if w > max_size.w && h > max_size.h {
                    break;
                }
                // double the smaller axis, unless it already exceeds its bound
                if (w <= h && w <= max_size.w) || h > max_size.h {
                    let next = w.saturating_mul(2);
                    if next == w {
                        break;
                    }
                    w = next;
                } else {
                    let next = h.saturating_mul(2);
                    if next == h {
                        break;
                    }
                    h = next;
                }
            }
            Size::new(w, h)
        }
        SizeRestriction::Any => {
            let side = ceil_sqrt(min_area).min(u32::MAX as u64) as u32;
            let w = w0.max(side);
            let span = w.saturating_sub(border.sum_x()).max(1) as u64;
            let need = ceil_div(min_area + border.sum_y() as u64 * w as u64, span);
            let h = h0.max(need.min(u32::MAX as u64) as u32);
            Size::new(w, h)
        }
    }
}

/// Search queue of candidate atlas sizes under a power-of-two restriction,
/// ordered by non-decreasing total area (the search tries earlier entries
/// first and the first viable packing wins).
///
/// Starts at `min`; square mode doubles the side, non-square mode enqueues
/// `(s, s)`, `(2s, s)` and `(s, 2s)` at each square step. Sizes beyond `max`
/// are not produced.
pub fn pow2_candidates(min: Size, max: Size, square: bool) -> VecDeque<Size> {
    let fits = |s: Size| s.w <= max.w && s.h <= max.h;
    let mut queue = VecDeque::new();
    if !fits(min) {
        return queue;
    }
    queue.push_back(min);
    if square {
        let mut s = min.w;
        loop {
            let next = s.saturating_mul(2);
            if next == s || !fits(Size::new(next, next)) {
                break;
            }
            s = next;
            queue.push_back(Size::new(s, s));
        }
    } else {
        let mut s = min.w.max(min.h);
        loop {
            let sq = Size::new(s, s);
            if sq != min && fits(sq) {
                queue.push_back(sq);
            }
            let wide = Size::new(s.saturating_mul(2), s);
            if wide.w != s && fits(wide) {
                queue.push_back(wide);
            }
            let tall = Size::new(s, s.saturating_mul(2));
            if tall.h != s && fits(tall) {
                queue.push_back(tall);
            }
            let next = s.saturating_mul(2);
            if next == s || (next > max.w && next > max.h) {
                break;
            }
            s = next;
        }
    }
    queue
}
